//! The expression tree consumed by the evaluator.
//!
//! An external parser produces these nodes; the evaluator only reads them.
//! Every node kind is a variant of the closed [`Expr`] enum or one of the
//! plain structs it owns (guards, case branches, function clauses), so the
//! evaluator dispatches with exhaustive `match` instead of runtime type tests.
//!
//! Patterns use the same representation as expressions: a function head
//! `f({ok, [H|T]} = Msg)` is a `Clause` whose single parameter is the
//! `Binary { op: Match, .. }` node for `{ok, [H|T]} = Msg`.

use std::fmt;

use crate::{BinaryOp, Name, Number, UnaryOp};

/// An expression (or pattern) node.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// `ok`, `'hello world'`
    Atom(Name),
    /// `X`, `_Acc`, `_`
    Variable(Name),
    /// `42`, `3.14`
    Constant(Number),
    /// `{A, b, 3}`
    Tuple(Vec<Expr>),
    /// `[1, 2 | T]`
    List(ListExpr),
    /// `-X`, `not B`
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// `A + B`, `{ok, V} = f()`
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `f(X)`, `lists:reverse(L)`
    Invocation(Invocation),
    /// `case E of ... end`
    Case(CaseExpr),
}

/// List literal or cons pattern: `[elements | tail]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ListExpr {
    pub elements: Vec<Expr>,
    /// `None` terminates the list with `[]`.
    pub tail: Option<Box<Expr>>,
}

/// A direct function call, optionally module-qualified.
#[derive(Clone, Debug, PartialEq)]
pub struct Invocation {
    pub module: Option<Name>,
    pub function: Name,
    pub args: Vec<Expr>,
}

impl Invocation {
    #[inline]
    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

/// `case subject of branches end`
#[derive(Clone, Debug, PartialEq)]
pub struct CaseExpr {
    pub subject: Box<Expr>,
    pub branches: Vec<CaseBranch>,
}

/// `Pattern when Guard -> Body`
#[derive(Clone, Debug, PartialEq)]
pub struct CaseBranch {
    pub pattern: Expr,
    pub guard: Option<Guard>,
    pub body: Vec<Expr>,
}

impl CaseBranch {
    pub fn new(pattern: Expr, body: Vec<Expr>) -> Self {
        Self {
            pattern,
            guard: None,
            body,
        }
    }

    #[must_use]
    pub fn with_guard(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }
}

/// One clause of a multi-clause function: `f(Params) when Guard -> Body`.
#[derive(Clone, Debug, PartialEq)]
pub struct Clause {
    pub params: Vec<Expr>,
    pub guard: Option<Guard>,
    pub body: Vec<Expr>,
}

impl Clause {
    pub fn new(params: Vec<Expr>, body: Vec<Expr>) -> Self {
        Self {
            params,
            guard: None,
            body,
        }
    }

    #[must_use]
    pub fn with_guard(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// The separator written after a guard clause: `,` or `;`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// `,`
    And,
    /// `;`
    Or,
}

/// A guard test and the separator that followed it.
///
/// The combinator of the final clause is never consulted.
#[derive(Clone, Debug, PartialEq)]
pub struct GuardClause {
    pub expr: Expr,
    pub combinator: Combinator,
}

/// `when A, B ; C`: `;` separates alternatives and `,` joins the tests of
/// one alternative, so this reads `(A andalso B) orelse C` and
/// `when A ; B, C` reads `A orelse (B andalso C)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Guard {
    pub clauses: Vec<GuardClause>,
}

impl Guard {
    /// Start a guard with its first test.
    pub fn new(first: Expr) -> Self {
        Self {
            clauses: vec![GuardClause {
                expr: first,
                combinator: Combinator::And,
            }],
        }
    }

    /// Append `, next`.
    #[must_use]
    pub fn and(self, next: Expr) -> Self {
        self.push(Combinator::And, next)
    }

    /// Append `; next`.
    #[must_use]
    pub fn or(self, next: Expr) -> Self {
        self.push(Combinator::Or, next)
    }

    fn push(mut self, separator: Combinator, next: Expr) -> Self {
        if let Some(last) = self.clauses.last_mut() {
            last.combinator = separator;
        }
        self.clauses.push(GuardClause {
            expr: next,
            combinator: Combinator::And,
        });
        self
    }
}

// Constructors, used by parsers and tests alike.
impl Expr {
    pub fn atom(name: &str) -> Self {
        Expr::Atom(Name::intern(name))
    }

    pub fn var(name: &str) -> Self {
        Expr::Variable(Name::intern(name))
    }

    pub fn number(n: impl Into<Number>) -> Self {
        Expr::Constant(n.into())
    }

    pub fn int(n: i64) -> Self {
        Expr::Constant(Number::from(n))
    }

    pub fn float(f: f64) -> Self {
        Expr::Constant(Number::Float(f))
    }

    /// A string literal: the proper list of its character codes.
    pub fn string(text: &str) -> Self {
        Expr::list(
            text.chars()
                .map(|c| Expr::Constant(Number::from(u32::from(c))))
                .collect(),
        )
    }

    pub fn tuple(elements: Vec<Expr>) -> Self {
        Expr::Tuple(elements)
    }

    /// `[e1, ..., en]`
    pub fn list(elements: Vec<Expr>) -> Self {
        Expr::List(ListExpr {
            elements,
            tail: None,
        })
    }

    /// `[e1, ..., en | tail]`
    pub fn cons(elements: Vec<Expr>, tail: Expr) -> Self {
        Expr::List(ListExpr {
            elements,
            tail: Some(Box::new(tail)),
        })
    }

    /// `[]`
    pub fn nil() -> Self {
        Expr::list(Vec::new())
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// `pattern = value`
    pub fn matches(pattern: Expr, value: Expr) -> Self {
        Expr::binary(BinaryOp::Match, pattern, value)
    }

    /// `function(args)`
    pub fn call(function: &str, args: Vec<Expr>) -> Self {
        Expr::Invocation(Invocation {
            module: None,
            function: Name::intern(function),
            args,
        })
    }

    /// `module:function(args)`
    pub fn remote_call(module: &str, function: &str, args: Vec<Expr>) -> Self {
        Expr::Invocation(Invocation {
            module: Some(Name::intern(module)),
            function: Name::intern(function),
            args,
        })
    }

    pub fn case(subject: Expr, branches: Vec<CaseBranch>) -> Self {
        Expr::Case(CaseExpr {
            subject: Box::new(subject),
            branches,
        })
    }

    /// Whether the node is the `_` wildcard.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Expr::Variable(name) if name.is_wildcard())
    }
}

fn write_separated(f: &mut fmt::Formatter<'_>, items: &[Expr], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Expr, parent: BinaryOp) -> fmt::Result {
    match operand {
        Expr::Binary { op, .. } if op.precedence() >= parent.precedence() => {
            write!(f, "({operand})")
        }
        _ => write!(f, "{operand}"),
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.clauses.len().saturating_sub(1);
        for (i, clause) in self.clauses.iter().enumerate() {
            write!(f, "{}", clause.expr)?;
            if i < last {
                f.write_str(match clause.combinator {
                    Combinator::And => ", ",
                    Combinator::Or => "; ",
                })?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Atom(name) | Expr::Variable(name) => write!(f, "{name}"),
            Expr::Constant(n) => write!(f, "{n}"),
            Expr::Tuple(elements) => {
                f.write_str("{")?;
                write_separated(f, elements, ", ")?;
                f.write_str("}")
            }
            Expr::List(list) => {
                f.write_str("[")?;
                write_separated(f, &list.elements, ", ")?;
                if let Some(tail) = &list.tail {
                    write!(f, " | {tail}")?;
                }
                f.write_str("]")
            }
            Expr::Unary { op, operand } => match op {
                UnaryOp::Not | UnaryOp::BNot => write!(f, "{} {operand}", op.as_symbol()),
                UnaryOp::Plus | UnaryOp::Neg => write!(f, "{}{operand}", op.as_symbol()),
            },
            Expr::Binary { op, left, right } => {
                write_operand(f, left, *op)?;
                write!(f, " {} ", op.as_symbol())?;
                write_operand(f, right, *op)
            }
            Expr::Invocation(call) => {
                if let Some(module) = call.module {
                    write!(f, "{module}:")?;
                }
                write!(f, "{}(", call.function)?;
                write_separated(f, &call.args, ", ")?;
                f.write_str(")")
            }
            Expr::Case(case) => {
                write!(f, "case {} of ", case.subject)?;
                for (i, branch) in case.branches.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{}", branch.pattern)?;
                    if let Some(guard) = &branch.guard {
                        write!(f, " when {guard}")?;
                    }
                    f.write_str(" -> ")?;
                    write_separated(f, &branch.body, ", ")?;
                }
                f.write_str(" end")
            }
        }
    }
}
