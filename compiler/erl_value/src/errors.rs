//! Evaluation errors.
//!
//! Every evaluation step returns [`EvalResult`] and propagates failures with
//! `?`, so the first error aborts the enclosing computation unexamined.
//! At the public boundary an [`EvalError`] is turned back into a
//! [`Value::Error`] carrying the same message.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` names the failure; factory functions (e.g.
//! `bad_match()`) are the public API and fill in both `kind` and `message`.

use std::fmt;

use erl_ir::NumericError;

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
///
/// The `Display` impl produces the message users see, so the message of a
/// factory-created error always equals `kind.to_string()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Type mismatch
    NotNumbers,
    NotIntegers,
    NotIntegral,
    NotABoolean,
    NotAList,
    NotAProperList,
    CannotConcat,
    DivisionByZero,
    ExpectedAtom,
    BadArgument {
        function: String,
        arity: usize,
    },

    // Lookup
    UndefinedVariable {
        name: String,
    },
    /// An unqualified call that no module in scope could answer.
    UnresolvedFunction {
        name: String,
        arity: usize,
    },
    /// A module was asked for a function it does not export.
    NoMatchingFunction,
    NoMatchingModule {
        module: String,
    },
    NoMatchingTupleItem,
    InvalidModuleInfoCall,

    // Structural mismatch
    BadMatch,
    BadMatchOnCase,
    /// A tail call whose target function group accepted none of the arguments.
    NoSuchTailCallFunction,

    // Unsupported
    NotImplemented {
        feature: String,
    },

    // Resource limits
    StackOverflow {
        depth: usize,
    },
    BudgetExceeded {
        budget: u64,
    },
    Cancelled,

    /// Errors raised by host code or carried in as error values.
    Custom {
        message: String,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotNumbers => write!(f, "not numbers"),
            Self::NotIntegers => write!(f, "not integers"),
            Self::NotIntegral => write!(f, "not integral"),
            Self::NotABoolean => write!(f, "not a boolean"),
            Self::NotAList => write!(f, "not a list"),
            Self::NotAProperList => write!(f, "not a proper list"),
            Self::CannotConcat => write!(f, "can't concat"),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::ExpectedAtom => write!(f, "must be called with atom"),
            Self::BadArgument { function, arity } => {
                write!(f, "bad argument in {function}/{arity}")
            }

            Self::UndefinedVariable { name } => write!(f, "No such variable {name}"),
            Self::UnresolvedFunction { name, arity } => {
                write!(f, "no matching function '{name}/{arity}'")
            }
            Self::NoMatchingFunction => write!(f, "no matching function found"),
            Self::NoMatchingModule { module } => write!(f, "no matching module found: {module}"),
            Self::NoMatchingTupleItem => write!(f, "no matching tuple item"),
            Self::InvalidModuleInfoCall => write!(f, "no matching function"),

            Self::BadMatch => write!(f, "bad match"),
            Self::BadMatchOnCase => write!(f, "bad match on case"),
            Self::NoSuchTailCallFunction => write!(f, "no_such_tailcall_function"),

            Self::NotImplemented { feature } => write!(f, "{feature} nyi"),

            Self::StackOverflow { depth } => {
                write!(f, "maximum call depth exceeded (limit: {depth})")
            }
            Self::BudgetExceeded { budget } => {
                write!(f, "evaluation budget of {budget} calls exceeded")
            }
            Self::Cancelled => write!(f, "evaluation cancelled"),

            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// A single frame in an evaluation backtrace, rendered as `module:function/arity`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    pub name: String,
}

/// Snapshot of the live call frames at the point an error left the evaluator,
/// innermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {}", frame.name)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable error message; equals `kind.to_string()`.
    pub message: String,
    /// Call frames live when the error crossed the public boundary.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    /// Create an error with just a message (`Custom` kind).
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            backtrace: None,
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            backtrace: None,
        }
    }

    /// Attach a backtrace to this error.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    /// The error as a value, for callers that expect the language's
    /// error-as-value convention.
    pub fn to_value(&self) -> Value {
        Value::error(&self.message)
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

impl From<NumericError> for EvalError {
    fn from(err: NumericError) -> Self {
        match err {
            NumericError::NotIntegers => not_integers(),
            NumericError::NotIntegral => not_integral(),
            NumericError::DivisionByZero => division_by_zero(),
        }
    }
}

// Type Errors

#[cold]
pub fn not_numbers() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotNumbers)
}

#[cold]
pub fn not_integers() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotIntegers)
}

#[cold]
pub fn not_integral() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotIntegral)
}

#[cold]
pub fn not_a_boolean() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotABoolean)
}

#[cold]
pub fn not_a_list() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAList)
}

#[cold]
pub fn not_a_proper_list() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAProperList)
}

/// `++` reached a non-list tail on its left operand.
#[cold]
pub fn cannot_concat() -> EvalError {
    EvalError::from_kind(EvalErrorKind::CannotConcat)
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn expected_atom() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ExpectedAtom)
}

/// A builtin received an argument outside its domain (`hd([])`).
#[cold]
pub fn bad_argument(function: &str, arity: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BadArgument {
        function: function.to_string(),
        arity,
    })
}

// Lookup Errors

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn unresolved_function(name: &str, arity: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnresolvedFunction {
        name: name.to_string(),
        arity,
    })
}

#[cold]
pub fn no_matching_function() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoMatchingFunction)
}

#[cold]
pub fn no_matching_module(module: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoMatchingModule {
        module: module.to_string(),
    })
}

#[cold]
pub fn no_matching_tuple_item() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoMatchingTupleItem)
}

/// `module_info` called with a non-atom or with more than one argument.
#[cold]
pub fn invalid_module_info_call() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidModuleInfoCall)
}

// Pattern Errors

#[cold]
pub fn bad_match() -> EvalError {
    EvalError::from_kind(EvalErrorKind::BadMatch)
}

#[cold]
pub fn bad_match_on_case() -> EvalError {
    EvalError::from_kind(EvalErrorKind::BadMatchOnCase)
}

#[cold]
pub fn no_such_tail_call_function() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoSuchTailCallFunction)
}

// Not Implemented

#[cold]
pub fn not_implemented(feature: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotImplemented {
        feature: feature.to_string(),
    })
}

// Resource Limits

#[cold]
pub fn call_depth_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth: limit })
}

#[cold]
pub fn budget_exceeded(budget: u64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BudgetExceeded { budget })
}

#[cold]
pub fn cancelled() -> EvalError {
    EvalError::from_kind(EvalErrorKind::Cancelled)
}

#[cfg(test)]
mod tests;
