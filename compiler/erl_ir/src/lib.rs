//! erl IR - the data handed to the erlite evaluator.
//!
//! This crate contains:
//! - `Name` and `StringInterner` for interned identifiers and atoms
//! - `Number`, the integer/float numeric tower
//! - `BinaryOp` / `UnaryOp`
//! - `Expr` and the guard, case and clause nodes built from it
//! - `ModuleDecl`, the parsed form of a module
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers and atoms are `Name(u32)`, so
//!   equality and hashing never touch string contents.
//! - **Closed Node Set**: one enum, exhaustive matches in the evaluator.
//! - **Read-Only**: nothing here is mutated once built; trees are shared
//!   freely between compiled modules and processes.

mod expr;
mod interner;
mod module_decl;
mod name;
mod number;
mod ops;

pub use expr::{
    CaseBranch, CaseExpr, Clause, Combinator, Expr, Guard, GuardClause, Invocation, ListExpr,
};
pub use interner::{InternError, StringInterner};
pub use module_decl::{Attribute, AttributeArg, FunctionDecl, FunctionRef, ModuleDecl};
pub use name::Name;
pub use number::{Number, NumericError};
pub use ops::{BinaryOp, UnaryOp};

pub use num_bigint::BigInt;
