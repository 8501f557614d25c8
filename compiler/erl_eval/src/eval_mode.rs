//! Evaluation modes.
//!
//! Parameterizes the evaluator via an `EvalMode` enum so an embedding host
//! can choose between unrestricted interpretation and a bounded run with a
//! call budget. Uses enum dispatch: each variant answers policy questions
//! through methods, and per-run mutable state lives in [`ModeState`].

use crate::diagnostics::EvalCounters;

/// Evaluation mode; determines limits via match dispatch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// No call limit; the native stack grows on demand.
    #[default]
    Interpret,
    /// Depth-capped evaluation that aborts after `budget` function calls.
    Bounded {
        /// Maximum number of function calls before aborting.
        budget: u64,
    },
}

impl EvalMode {
    /// Maximum call depth, or `None` for unlimited (native `stacker` fallback).
    ///
    /// - `Interpret`: `None` on native, 200 on WASM
    /// - `Bounded`: always 512
    #[inline]
    pub fn max_call_depth(&self) -> Option<usize> {
        match self {
            Self::Interpret => {
                #[cfg(target_arch = "wasm32")]
                {
                    Some(200)
                }
                #[cfg(not(target_arch = "wasm32"))]
                {
                    None
                }
            }
            Self::Bounded { .. } => Some(512),
        }
    }

    /// The call budget, if this mode has one.
    #[inline]
    pub fn call_budget(&self) -> Option<u64> {
        match self {
            Self::Interpret => None,
            Self::Bounded { budget } => Some(*budget),
        }
    }
}

/// Per-mode mutable state stored alongside `EvalMode`.
pub struct ModeState {
    /// Function calls made so far.
    pub call_count: u64,
    budget: Option<u64>,
    /// `None` unless profiling was requested; increments are then no-ops.
    counters: Option<EvalCounters>,
}

impl ModeState {
    pub fn new(mode: &EvalMode) -> Self {
        Self {
            call_count: 0,
            budget: mode.call_budget(),
            counters: None,
        }
    }

    pub fn enable_counters(&mut self) {
        self.counters = Some(EvalCounters::default());
    }

    /// Count one function call against the budget.
    ///
    /// Always `Ok(())` for modes without a budget.
    #[inline]
    pub fn check_budget(&mut self) -> Result<(), BudgetExceeded> {
        if let Some(budget) = self.budget {
            self.call_count = self.call_count.saturating_add(1);
            if self.call_count > budget {
                return Err(BudgetExceeded {
                    budget,
                    calls: self.call_count,
                });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn count_function_call(&mut self) {
        if let Some(ref mut c) = self.counters {
            c.count_function_call();
        }
    }

    #[inline]
    pub fn count_tail_call(&mut self) {
        if let Some(ref mut c) = self.counters {
            c.count_tail_call();
        }
    }

    #[inline]
    pub fn count_pattern_match(&mut self) {
        if let Some(ref mut c) = self.counters {
            c.count_pattern_match();
        }
    }

    #[inline]
    pub fn count_statement(&mut self) {
        if let Some(ref mut c) = self.counters {
            c.count_statement();
        }
    }

    pub fn counters(&self) -> Option<&EvalCounters> {
        self.counters.as_ref()
    }
}

/// Error returned when a `Bounded` budget is exceeded.
#[derive(Debug)]
pub struct BudgetExceeded {
    /// The configured budget limit.
    pub budget: u64,
    /// The number of calls made.
    pub calls: u64,
}

impl From<BudgetExceeded> for erl_value::EvalError {
    fn from(err: BudgetExceeded) -> Self {
        erl_value::budget_exceeded(err.budget)
    }
}
