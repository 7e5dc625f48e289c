//! Dynamically typed values for schema-driven encoding without generated code.

use crate::{
    error::ValueError,
    schema::Schema,
    types::{Primitive, StructId, TypeExpr, TypeKind},
};

#[derive(Clone, Debug)]
pub enum Value {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Bool(bool),
    Str(String),
    Array(Vec<Value>),
    /// Value of an optional type. `Optional(None)` is absent.
    Optional(Option<Box<Value>>),
    Struct(StructValue),
}

/// Field values of one struct, in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct StructValue {
    pub id: StructId,
    pub fields: Vec<Value>,
}

impl Value {
    pub fn optional(value: Option<Value>) -> Self {
        Self::Optional(value.map(Box::new))
    }

    /// Short description used in conformance errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Bool(_) => "bool",
            Self::Str(_) => "str",
            Self::Array(_) => "array",
            Self::Optional(_) => "optional",
            Self::Struct(_) => "struct",
        }
    }

    /// Checks that the value has exactly the shape of `ty`, recursing into arrays, optionals
    /// and structs.
    pub fn check(&self, schema: &Schema, ty: &TypeExpr, path: &str) -> Result<(), ValueError> {
        if ty.optional {
            return match self {
                Self::Optional(None) => Ok(()),
                Self::Optional(Some(inner)) => inner.check(schema, &ty.required(), path),
                other => Err(mismatch(path, describe(schema, ty), other)),
            };
        }
        match (&ty.kind, self) {
            (TypeKind::Primitive(p), value) => {
                if primitive_of(value) == Some(*p) {
                    Ok(())
                } else {
                    Err(mismatch(path, p.name().to_owned(), value))
                }
            }
            (TypeKind::Array(element), Self::Array(values)) => {
                for (i, value) in values.iter().enumerate() {
                    value.check(schema, element, &format!("{path}[{i}]"))?;
                }
                Ok(())
            }
            (TypeKind::Named(id), Self::Struct(value)) if value.id == *id => {
                value.check_fields(schema, path)
            }
            (_, value) => Err(mismatch(path, describe(schema, ty), value)),
        }
    }
}

impl StructValue {
    /// Checks the field count and every field value against the struct declaration.
    pub fn check(&self, schema: &Schema) -> Result<(), ValueError> {
        let Some(decl) = schema.by_type_id(self.id.type_id()) else {
            return Err(ValueError {
                path: "value".into(),
                expected: format!("a struct of a schema with {} structs", schema.structs().len()),
                found: format!("struct id {}", self.id.type_id()),
            });
        };
        self.check_fields(schema, &decl.name)
    }

    fn check_fields(&self, schema: &Schema, path: &str) -> Result<(), ValueError> {
        let decl = schema.get(self.id);
        if decl.fields.len() != self.fields.len() {
            return Err(ValueError {
                path: path.to_owned(),
                expected: format!("{} fields of {}", decl.fields.len(), decl.name),
                found: format!("{} fields", self.fields.len()),
            });
        }
        for (field, value) in decl.fields.iter().zip(&self.fields) {
            value.check(schema, &field.ty, &format!("{path}.{}", field.name))?;
        }
        Ok(())
    }
}

fn primitive_of(value: &Value) -> Option<Primitive> {
    Some(match value {
        Value::U8(_) => Primitive::U8,
        Value::U16(_) => Primitive::U16,
        Value::U32(_) => Primitive::U32,
        Value::U64(_) => Primitive::U64,
        Value::I8(_) => Primitive::I8,
        Value::I16(_) => Primitive::I16,
        Value::I32(_) => Primitive::I32,
        Value::I64(_) => Primitive::I64,
        Value::F32(_) => Primitive::F32,
        Value::F64(_) => Primitive::F64,
        Value::Bool(_) => Primitive::Bool,
        Value::Str(_) => Primitive::Str,
        _ => return None,
    })
}

/// Renders a resolved type back in schema syntax.
pub fn describe(schema: &Schema, ty: &TypeExpr) -> String {
    let inner = match &ty.kind {
        TypeKind::Primitive(p) => p.name().to_owned(),
        TypeKind::Named(id) => schema.get(*id).name.clone(),
        TypeKind::Array(element) => format!("[]{}", describe(schema, element)),
    };
    if ty.optional {
        format!("Option<{inner}>")
    } else {
        inner
    }
}

fn mismatch(path: &str, expected: String, found: &Value) -> ValueError {
    ValueError {
        path: path.to_owned(),
        expected,
        found: found.kind_name().to_owned(),
    }
}

/// Floats compare by bit pattern so NaN payloads and signed zeros round-trip observably.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (U8(a), U8(b)) => a == b,
            (U16(a), U16(b)) => a == b,
            (U32(a), U32(b)) => a == b,
            (U64(a), U64(b)) => a == b,
            (I8(a), I8(b)) => a == b,
            (I16(a), I16(b)) => a == b,
            (I32(a), I32(b)) => a == b,
            (I64(a), I64(b)) => a == b,
            (F32(a), F32(b)) => a.to_bits() == b.to_bits(),
            (F64(a), F64(b)) => a.to_bits() == b.to_bits(),
            (Bool(a), Bool(b)) => a == b,
            (Str(a), Str(b)) => a == b,
            (Array(a), Array(b)) => a == b,
            (Optional(a), Optional(b)) => a == b,
            (Struct(a), Struct(b)) => a == b,
            _ => false,
        }
    }
}
