//! Module declarations as handed over by a parser.
//!
//! Attributes other than `-module`, `-export` and `-compile(export_all)`
//! are carried along untouched; their semantics are not evaluated.

use crate::{Clause, Expr, Name};

/// `name/arity`, as written in `-export([...])`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionRef {
    pub name: Name,
    pub arity: usize,
}

impl FunctionRef {
    pub fn new(name: &str, arity: usize) -> Self {
        Self {
            name: Name::intern(name),
            arity,
        }
    }
}

/// One argument of a `-name(...)` attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeArg {
    Atom(Name),
    FunctionRefs(Vec<FunctionRef>),
    Expr(Expr),
}

/// `-name(args).`
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    pub name: Name,
    pub args: Vec<AttributeArg>,
}

impl Attribute {
    pub fn new(name: &str, args: Vec<AttributeArg>) -> Self {
        Self {
            name: Name::intern(name),
            args,
        }
    }

    /// The single atom argument of `-name(atom)`.
    fn single_atom(&self) -> Option<Name> {
        match self.args.as_slice() {
            [AttributeArg::Atom(atom)] => Some(*atom),
            _ => None,
        }
    }
}

/// All clauses of one `name/arity` function.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    pub name: Name,
    pub arity: usize,
    pub clauses: Vec<Clause>,
}

impl FunctionDecl {
    /// Arity is taken from the first clause.
    pub fn new(name: &str, clauses: Vec<Clause>) -> Self {
        let arity = clauses.first().map_or(0, Clause::arity);
        Self {
            name: Name::intern(name),
            arity,
            clauses,
        }
    }
}

/// A parsed module: attributes and function groups in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModuleDecl {
    pub attributes: Vec<Attribute>,
    pub functions: Vec<FunctionDecl>,
}

impl ModuleDecl {
    /// Start a declaration with its `-module(name).` attribute.
    pub fn new(name: &str) -> Self {
        Self {
            attributes: vec![Attribute::new(
                "module",
                vec![AttributeArg::Atom(Name::intern(name))],
            )],
            functions: Vec::new(),
        }
    }

    /// Add `-compile(export_all).`
    #[must_use]
    pub fn export_all(mut self) -> Self {
        self.attributes.push(Attribute::new(
            "compile",
            vec![AttributeArg::Atom(Name::intern("export_all"))],
        ));
        self
    }

    /// Add `-export([f/N, ...]).`
    #[must_use]
    pub fn export(mut self, functions: &[(&str, usize)]) -> Self {
        let refs = functions
            .iter()
            .map(|&(name, arity)| FunctionRef::new(name, arity))
            .collect();
        self.attributes.push(Attribute::new(
            "export",
            vec![AttributeArg::FunctionRefs(refs)],
        ));
        self
    }

    #[must_use]
    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    #[must_use]
    pub fn function(mut self, function: FunctionDecl) -> Self {
        self.functions.push(function);
        self
    }

    fn attributes_named(&self, name: &str) -> impl Iterator<Item = &Attribute> {
        let name = Name::intern(name);
        self.attributes.iter().filter(move |a| a.name == name)
    }

    /// The atom of the first `-module(...)` attribute.
    pub fn module_name(&self) -> Option<Name> {
        self.attributes_named("module")
            .find_map(Attribute::single_atom)
    }

    /// Whether `-compile(export_all)` is present.
    pub fn exports_all(&self) -> bool {
        let export_all = Name::intern("export_all");
        self.attributes_named("compile")
            .any(|a| a.single_atom() == Some(export_all))
    }

    /// Every `name/arity` listed in `-export([...])` attributes.
    pub fn exported(&self) -> impl Iterator<Item = FunctionRef> + '_ {
        self.attributes_named("export")
            .filter_map(|a| match a.args.as_slice() {
                [AttributeArg::FunctionRefs(refs)] => Some(refs.iter().copied()),
                _ => None,
            })
            .flatten()
    }
}
