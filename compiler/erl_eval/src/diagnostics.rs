//! Diagnostic infrastructure for the evaluator.
//!
//! This module provides:
//! - `EvalCounters`: optional performance counters enabled by
//!   `ProcessBuilder::profile`
//! - `init_tracing`: subscriber setup for the evaluator's `tracing` output

use std::sync::Once;

/// Optional performance counters.
///
/// Stored as `Option<EvalCounters>` on `ModeState`. When `None`, all
/// counter increments are no-ops.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalCounters {
    pub function_calls: u64,
    pub tail_calls: u64,
    pub pattern_matches: u64,
    pub statements: u64,
}

impl EvalCounters {
    #[inline]
    pub fn count_function_call(&mut self) {
        self.function_calls = self.function_calls.wrapping_add(1);
    }

    #[inline]
    pub fn count_tail_call(&mut self) {
        self.tail_calls = self.tail_calls.wrapping_add(1);
    }

    #[inline]
    pub fn count_pattern_match(&mut self) {
        self.pattern_matches = self.pattern_matches.wrapping_add(1);
    }

    #[inline]
    pub fn count_statement(&mut self) {
        self.statements = self.statements.wrapping_add(1);
    }

    /// Format a summary report.
    pub fn report(&self) -> String {
        format!(
            "Evaluation profile:\n  \
             Function calls:  {}\n  \
             Tail calls:      {}\n  \
             Pattern matches: {}\n  \
             Statements:      {}",
            self.function_calls, self.tail_calls, self.pattern_matches, self.statements,
        )
    }
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=erl_eval=debug`;
/// set `ERL_LOG_TREE=1` as well for indented, per-call span output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        let registry = tracing_subscriber::registry().with(filter);
        if std::env::var("ERL_LOG_TREE").is_ok() {
            registry
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .init();
        } else {
            registry
                .with(fmt::layer().with_target(true).with_level(true))
                .init();
        }
    });
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn counters_increment() {
        let mut counters = EvalCounters::default();
        counters.count_function_call();
        counters.count_function_call();
        counters.count_statement();
        assert_eq!(counters.function_calls, 2);
        assert_eq!(counters.statements, 1);
        assert_eq!(counters.tail_calls, 0);
    }

    #[test]
    fn report_lists_every_counter() {
        let counters = EvalCounters {
            function_calls: 4,
            tail_calls: 3,
            pattern_matches: 2,
            statements: 1,
        };
        let report = counters.report();
        assert!(report.contains("Function calls:  4"));
        assert!(report.contains("Tail calls:      3"));
        assert!(report.contains("Pattern matches: 2"));
        assert!(report.contains("Statements:      1"));
    }

    #[test]
    fn init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
