use std::{fmt, num::NonZeroU16};

use serde::Serialize;

/// The closed set of primitive field types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Bool,
    Str,
}

impl Primitive {
    pub const ALL: [Primitive; 12] = [
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::F32,
        Self::F64,
        Self::Bool,
        Self::Str,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Bool => "bool",
            Self::Str => "str",
        }
    }

    /// Maps a schema type name to a primitive. `string` is accepted as an alias of `str`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::Str),
            _ => Self::ALL.into_iter().find(|p| p.name() == name),
        }
    }

    /// Encoded width in bytes, or `None` for the length-prefixed `str`.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            Self::U8 | Self::I8 | Self::Bool => Some(1),
            Self::U16 | Self::I16 => Some(2),
            Self::U32 | Self::I32 | Self::F32 => Some(4),
            Self::U64 | Self::I64 | Self::F64 => Some(8),
            Self::Str => None,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies a struct within its [`Schema`](crate::Schema).
///
/// The wrapped value is the struct's type id: its 1-based position in schema declaration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StructId(NonZeroU16);

impl StructId {
    pub(crate) fn from_index(index: usize) -> Option<Self> {
        u16::try_from(index + 1)
            .ok()
            .and_then(NonZeroU16::new)
            .map(Self)
    }

    pub fn from_type_id(type_id: u16) -> Option<Self> {
        NonZeroU16::new(type_id).map(Self)
    }

    pub fn type_id(self) -> u16 {
        self.0.get()
    }

    pub fn index(self) -> usize {
        usize::from(self.0.get()) - 1
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "lowercase")]
pub enum TypeKind {
    Primitive(Primitive),
    Named(StructId),
    Array(Box<TypeExpr>),
}

/// A resolved field type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TypeExpr {
    pub kind: TypeKind,
    pub optional: bool,
}

impl TypeExpr {
    pub fn primitive(primitive: Primitive) -> Self {
        Self {
            kind: TypeKind::Primitive(primitive),
            optional: false,
        }
    }

    pub fn named(id: StructId) -> Self {
        Self {
            kind: TypeKind::Named(id),
            optional: false,
        }
    }

    pub fn array(element: TypeExpr) -> Self {
        Self {
            kind: TypeKind::Array(Box::new(element)),
            optional: false,
        }
    }

    /// Marks the type optional. Optional types cannot be wrapped again.
    pub fn into_optional(self) -> Self {
        debug_assert!(!self.optional, "nested optional");
        Self {
            optional: true,
            ..self
        }
    }

    /// The same type without the optional marker.
    pub fn required(&self) -> TypeExpr {
        Self {
            kind: self.kind.clone(),
            optional: false,
        }
    }

    /// Encoded width if it does not depend on the value.
    pub fn fixed_width(&self) -> Option<usize> {
        match (&self.kind, self.optional) {
            (TypeKind::Primitive(p), false) => p.fixed_width(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_names_round_trip() {
        for primitive in Primitive::ALL {
            assert_eq!(Primitive::from_name(primitive.name()), Some(primitive));
        }
        assert_eq!(Primitive::from_name("string"), Some(Primitive::Str));
        assert_eq!(Primitive::from_name("usize"), None);
    }

    #[test]
    fn struct_id_is_one_based() {
        let id = StructId::from_index(0).unwrap();
        assert_eq!(id.type_id(), 1);
        assert_eq!(id.index(), 0);
        assert!(StructId::from_index(usize::from(u16::MAX)).is_none());
        assert!(StructId::from_type_id(0).is_none());
    }

    #[test]
    fn optional_has_no_fixed_width() {
        let ty = TypeExpr::primitive(Primitive::U32);
        assert_eq!(ty.fixed_width(), Some(4));
        assert_eq!(ty.clone().into_optional().fixed_width(), None);
        assert_eq!(ty.into_optional().required().fixed_width(), Some(4));
    }
}
