use std::collections::HashMap;

use serde::Serialize;

use crate::{
    ast::{SchemaAst, TypeAst},
    error::{SchemaError, ValidationCode, ValidationError, ValidationErrors},
    types::{StructId, TypeExpr},
    validator,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Struct {
    pub id: StructId,
    pub name: String,
    pub fields: Vec<Field>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A validated schema with every named type resolved.
///
/// Structs keep their declaration order, which is also wire order for type ids. The schema is
/// immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Schema {
    structs: Vec<Struct>,
    #[serde(skip)]
    by_name: HashMap<String, StructId>,
}

impl Schema {
    /// Validates `ast` and builds the IR.
    ///
    /// Every validation rule runs before anything is resolved; all violations are returned
    /// together in [`SchemaError::Invalid`].
    pub fn from_ast(ast: SchemaAst) -> Result<Self, SchemaError> {
        let errors = validator::validate(&ast);
        if !errors.is_empty() {
            return Err(ValidationErrors(errors).into());
        }

        let by_name = assign_ids(&ast)?;
        let structs = ast
            .structs
            .into_iter()
            .map(|decl| -> Result<Struct, ValidationError> {
                let fields = decl
                    .fields
                    .into_iter()
                    .map(|field| -> Result<Field, ValidationError> {
                        Ok(Field {
                            ty: resolve(&field.ty, &by_name)?,
                            name: field.name,
                            comment: field.comment,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Struct {
                    id: by_name[&decl.name],
                    name: decl.name,
                    fields,
                    comment: decl.comment,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ValidationErrors(vec![e]))?;

        tracing::debug!(structs = structs.len(), "built schema");
        Ok(Self { structs, by_name })
    }

    pub fn structs(&self) -> &[Struct] {
        &self.structs
    }

    /// Ids are only handed out by this schema, so a lookup with a foreign id may panic.
    pub fn get(&self, id: StructId) -> &Struct {
        &self.structs[id.index()]
    }

    pub fn by_name(&self, name: &str) -> Option<&Struct> {
        self.by_name.get(name).map(|&id| self.get(id))
    }

    pub fn by_type_id(&self, type_id: u16) -> Option<&Struct> {
        StructId::from_type_id(type_id).and_then(|id| self.structs.get(id.index()))
    }
}

/// The id-assignment pass: type id = declaration index + 1.
fn assign_ids(ast: &SchemaAst) -> Result<HashMap<String, StructId>, ValidationErrors> {
    ast.structs
        .iter()
        .enumerate()
        .map(|(index, decl)| {
            StructId::from_index(index)
                .map(|id| (decl.name.clone(), id))
                .ok_or_else(|| {
                    ValidationErrors(vec![ValidationError::new(
                        ValidationCode::TooManyStructs,
                        format!("struct {:?} has no type id left", decl.name),
                    )])
                })
        })
        .collect()
}

fn resolve(ty: &TypeAst, ids: &HashMap<String, StructId>) -> Result<TypeExpr, ValidationError> {
    Ok(match ty {
        TypeAst::Primitive(p) => TypeExpr::primitive(*p),
        TypeAst::Named(name) => TypeExpr::named(*ids.get(name).ok_or_else(|| {
            ValidationError::new(ValidationCode::UnknownType, format!("unknown type {name:?}"))
        })?),
        TypeAst::Array(element) => TypeExpr::array(resolve(element, ids)?),
        TypeAst::Optional(inner) => resolve(inner, ids)?.into_optional(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parser::parse_schema_ast, types::Primitive, types::TypeKind};

    fn schema(source: &str) -> Schema {
        Schema::from_ast(parse_schema_ast(source).unwrap()).unwrap()
    }

    #[test]
    fn ids_follow_declaration_order() {
        let schema = schema("struct A { x: u8 }\nstruct B { a: A }\nstruct C { b: []B }");
        let ids = schema
            .structs()
            .iter()
            .map(|s| (s.name.as_str(), s.id.type_id()))
            .collect::<Vec<_>>();
        assert_eq!(ids, [("A", 1), ("B", 2), ("C", 3)]);
        assert_eq!(schema.by_type_id(2).unwrap().name, "B");
        assert!(schema.by_type_id(0).is_none());
        assert!(schema.by_type_id(4).is_none());
        assert_eq!(schema.by_name("C").unwrap().id.type_id(), 3);
    }

    #[test]
    fn resolves_types() {
        let schema = schema(
            "struct Point { x: f32 }\nstruct Shape { anchor: Option<Point>, tags: []Option<string> }",
        );
        let shape = schema.by_name("Shape").unwrap();
        let point = schema.by_name("Point").unwrap().id;
        assert_eq!(shape.fields[0].ty, TypeExpr::named(point).into_optional());
        assert_eq!(
            shape.fields[1].ty,
            TypeExpr::array(TypeExpr::primitive(Primitive::Str).into_optional())
        );
        assert!(matches!(shape.fields[1].ty.kind, TypeKind::Array(_)));
    }

    #[test]
    fn collects_every_validation_error() {
        let err = Schema::from_ast(
            parse_schema_ast("struct A { b: Missing }\nstruct B {}").unwrap(),
        )
        .unwrap_err();
        let SchemaError::Invalid(ValidationErrors(errors)) = &err else {
            panic!("expected validation errors, got {err:?}");
        };
        let codes = errors.iter().map(|e| e.code).collect::<Vec<_>>();
        assert_eq!(codes, [ValidationCode::EmptyStruct, ValidationCode::UnknownType]);
    }

    #[test]
    fn serializes_to_json() {
        let schema = schema("/// a point\nstruct Point { x: u8, next: Option<[]u16> }");
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "structs": [{
                    "id": 1,
                    "name": "Point",
                    "comment": "a point",
                    "fields": [
                        { "name": "x", "type": { "kind": { "kind": "primitive", "of": "u8" }, "optional": false } },
                        { "name": "next", "type": {
                            "kind": { "kind": "array", "of": { "kind": { "kind": "primitive", "of": "u16" }, "optional": false } },
                            "optional": true
                        } }
                    ]
                }]
            })
        );
    }
}
