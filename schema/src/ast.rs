//! Unresolved schema declarations as they come out of the parser.
//!
//! Named types are plain strings here; [`Schema::from_ast`](crate::Schema::from_ast) validates the
//! declarations and resolves names into [`StructId`](crate::StructId)s.

use crate::types::Primitive;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemaAst {
    pub structs: Vec<StructDecl>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructDecl {
    pub name: String,
    pub fields: Vec<FieldDecl>,
    pub comment: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeAst,
    pub comment: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeAst {
    Primitive(Primitive),
    Named(String),
    Array(Box<TypeAst>),
    Optional(Box<TypeAst>),
}

impl TypeAst {
    /// Calls `f` with every struct name referenced by this type.
    pub fn for_each_named<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            Self::Primitive(_) => {}
            Self::Named(name) => f(name),
            Self::Array(inner) | Self::Optional(inner) => inner.for_each_named(f),
        }
    }
}

impl std::fmt::Display for TypeAst {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Primitive(p) => write!(f, "{p}"),
            Self::Named(name) => f.write_str(name),
            Self::Array(inner) => write!(f, "[]{inner}"),
            Self::Optional(inner) => write!(f, "Option<{inner}>"),
        }
    }
}
