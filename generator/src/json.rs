//! Conversion between JSON documents and dynamic [`Value`]s.
//!
//! Struct fields map to object keys of the same name. An optional field is absent when its key is
//! missing or `null`.

use sdp_schema::{Primitive, Schema, StructId, StructValue, TypeExpr, TypeKind, Value, ValueError};
use serde_json::{Map, Number, Value as Json};

pub fn struct_from_json(
    schema: &Schema,
    id: StructId,
    json: &Json,
    path: &str,
) -> Result<StructValue, ValueError> {
    let decl = schema.get(id);
    let Json::Object(object) = json else {
        return Err(mismatch(path, format!("object for {}", decl.name), json));
    };
    if let Some(key) = object
        .keys()
        .find(|key| !decl.fields.iter().any(|field| &field.name == *key))
    {
        return Err(ValueError {
            path: format!("{path}.{key}"),
            expected: format!("a field of {}", decl.name),
            found: "unknown key".into(),
        });
    }
    let fields = decl
        .fields
        .iter()
        .map(|field| {
            let json = object.get(&field.name).unwrap_or(&Json::Null);
            value_from_json(schema, &field.ty, json, &format!("{path}.{}", field.name))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(StructValue { id, fields })
}

pub fn value_from_json(
    schema: &Schema,
    ty: &TypeExpr,
    json: &Json,
    path: &str,
) -> Result<Value, ValueError> {
    if ty.optional {
        return match json {
            Json::Null => Ok(Value::Optional(None)),
            json => Ok(Value::optional(Some(value_from_json(
                schema,
                &ty.required(),
                json,
                path,
            )?))),
        };
    }
    match &ty.kind {
        TypeKind::Primitive(primitive) => primitive_from_json(*primitive, json, path),
        TypeKind::Named(id) => struct_from_json(schema, *id, json, path).map(Value::Struct),
        TypeKind::Array(element) => match json {
            Json::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| value_from_json(schema, element, item, &format!("{path}[{i}]")))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            json => Err(mismatch(path, "array", json)),
        },
    }
}

fn primitive_from_json(primitive: Primitive, json: &Json, path: &str) -> Result<Value, ValueError> {
    let out_of_range = || mismatch(path, primitive.name(), json);
    let unsigned = || json.as_u64().ok_or_else(out_of_range);
    let signed = || json.as_i64().ok_or_else(out_of_range);
    let float = || json.as_f64().ok_or_else(out_of_range);
    Ok(match primitive {
        Primitive::U8 => Value::U8(unsigned()?.try_into().map_err(|_| out_of_range())?),
        Primitive::U16 => Value::U16(unsigned()?.try_into().map_err(|_| out_of_range())?),
        Primitive::U32 => Value::U32(unsigned()?.try_into().map_err(|_| out_of_range())?),
        Primitive::U64 => Value::U64(unsigned()?),
        Primitive::I8 => Value::I8(signed()?.try_into().map_err(|_| out_of_range())?),
        Primitive::I16 => Value::I16(signed()?.try_into().map_err(|_| out_of_range())?),
        Primitive::I32 => Value::I32(signed()?.try_into().map_err(|_| out_of_range())?),
        Primitive::I64 => Value::I64(signed()?),
        Primitive::F32 => {
            let value = float()? as f32;
            if !value.is_finite() {
                return Err(out_of_range());
            }
            Value::F32(value)
        }
        Primitive::F64 => Value::F64(float()?),
        Primitive::Bool => Value::Bool(json.as_bool().ok_or_else(out_of_range)?),
        Primitive::Str => Value::Str(json.as_str().ok_or_else(out_of_range)?.to_owned()),
    })
}

fn mismatch(path: &str, expected: impl Into<String>, found: &Json) -> ValueError {
    let found = match found {
        Json::Null => "null".to_owned(),
        Json::Bool(b) => b.to_string(),
        Json::Number(n) => format!("number {n}"),
        Json::String(_) => "string".to_owned(),
        Json::Array(_) => "array".to_owned(),
        Json::Object(_) => "object".to_owned(),
    };
    ValueError {
        path: path.to_owned(),
        expected: expected.into(),
        found,
    }
}

pub fn struct_to_json(schema: &Schema, value: &StructValue) -> Json {
    let decl = schema.get(value.id);
    let object = decl
        .fields
        .iter()
        .zip(&value.fields)
        .map(|(field, value)| (field.name.clone(), value_to_json(schema, value)))
        .collect::<Map<_, _>>();
    Json::Object(object)
}

/// Non-finite floats have no JSON form and become `null`.
pub fn value_to_json(schema: &Schema, value: &Value) -> Json {
    match value {
        Value::U8(v) => Json::from(*v),
        Value::U16(v) => Json::from(*v),
        Value::U32(v) => Json::from(*v),
        Value::U64(v) => Json::from(*v),
        Value::I8(v) => Json::from(*v),
        Value::I16(v) => Json::from(*v),
        Value::I32(v) => Json::from(*v),
        Value::I64(v) => Json::from(*v),
        Value::F32(v) => float_to_json(f64::from(*v)),
        Value::F64(v) => float_to_json(*v),
        Value::Bool(v) => Json::Bool(*v),
        Value::Str(v) => Json::String(v.clone()),
        Value::Array(values) => values.iter().map(|v| value_to_json(schema, v)).collect(),
        Value::Optional(None) => Json::Null,
        Value::Optional(Some(inner)) => value_to_json(schema, inner),
        Value::Struct(value) => struct_to_json(schema, value),
    }
}

fn float_to_json(v: f64) -> Json {
    Number::from_f64(v).map_or(Json::Null, Json::Number)
}
