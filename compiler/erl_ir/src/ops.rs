//! Binary and unary operators.

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    /// `=`: match the right-hand value against the left-hand pattern.
    Match,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    IntDiv,
    Rem,

    // Strict boolean
    And,
    Or,
    Xor,

    // Short-circuit boolean
    AndAlso,
    OrElse,

    // Comparison
    Lt,
    LtEq,
    Gt,
    GtEq,
    Eq,
    NotEq,
    ExactEq,
    ExactNotEq,

    // Lists
    Concat,
}

impl BinaryOp {
    /// Every operator, in declaration order.
    pub const ALL: [BinaryOp; 21] = [
        Self::Match,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::IntDiv,
        Self::Rem,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::AndAlso,
        Self::OrElse,
        Self::Lt,
        Self::LtEq,
        Self::Gt,
        Self::GtEq,
        Self::Eq,
        Self::NotEq,
        Self::ExactEq,
        Self::ExactNotEq,
        Self::Concat,
    ];

    /// Returns the source-level symbol for this operator.
    ///
    /// Used in error messages to show the exact operator that failed.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Match => "=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::IntDiv => "div",
            Self::Rem => "rem",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::AndAlso => "andalso",
            Self::OrElse => "orelse",
            Self::Lt => "<",
            Self::LtEq => "=<",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Eq => "==",
            Self::NotEq => "/=",
            Self::ExactEq => "=:=",
            Self::ExactNotEq => "=/=",
            Self::Concat => "++",
        }
    }

    /// Inverse of [`as_symbol`](Self::as_symbol), for parsers feeding the tree.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_symbol() == symbol)
    }

    /// Returns the precedence level of this operator.
    ///
    /// Higher number = lower precedence (binds less tightly).
    /// - 3: `*` `/` `div` `rem` `and`
    /// - 4: `+` `-` `or` `xor`
    /// - 5: `++` (right associative)
    /// - 6: comparisons
    /// - 7: `andalso`
    /// - 8: `orelse`
    /// - 9: `=` (right associative)
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Mul | Self::Div | Self::IntDiv | Self::Rem | Self::And => 3,
            Self::Add | Self::Sub | Self::Or | Self::Xor => 4,
            Self::Concat => 5,
            Self::Lt
            | Self::LtEq
            | Self::Gt
            | Self::GtEq
            | Self::Eq
            | Self::NotEq
            | Self::ExactEq
            | Self::ExactNotEq => 6,
            Self::AndAlso => 7,
            Self::OrElse => 8,
            Self::Match => 9,
        }
    }

    /// Right-hand side is only evaluated when the left side does not decide the result.
    #[inline]
    pub const fn is_short_circuit(self) -> bool {
        matches!(self, Self::AndAlso | Self::OrElse)
    }

    #[inline]
    pub const fn is_right_associative(self) -> bool {
        matches!(self, Self::Concat | Self::Match)
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Plus,
    Neg,
    Not,
    BNot,
}

impl UnaryOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Neg => "-",
            Self::Not => "not",
            Self::BNot => "bnot",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        [Self::Plus, Self::Neg, Self::Not, Self::BNot]
            .into_iter()
            .find(|op| op.as_symbol() == symbol)
    }
}
