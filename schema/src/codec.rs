//! Schema-directed byte-mode codec over [`Value`]s.
//!
//! Produces the same bytes as generated code for the same schema; the contract tests compare the
//! two.

use sdp_wire::{DecodeContext, DecodeError, DecodeLimits, Reader, Writer};

use crate::{
    error::ValueError,
    schema::Schema,
    types::{Primitive, StructId, TypeExpr, TypeKind},
    value::{StructValue, Value},
};

/// Exact encoded size of `value`.
pub fn size(value: &Value) -> usize {
    match value {
        Value::U8(_) | Value::I8(_) | Value::Bool(_) => 1,
        Value::U16(_) | Value::I16(_) => 2,
        Value::U32(_) | Value::I32(_) | Value::F32(_) => 4,
        Value::U64(_) | Value::I64(_) | Value::F64(_) => 8,
        Value::Str(s) => 4 + s.len(),
        Value::Array(values) => 4 + values.iter().map(size).sum::<usize>(),
        Value::Optional(inner) => 1 + inner.as_deref().map_or(0, size),
        Value::Struct(value) => struct_size(value),
    }
}

pub fn struct_size(value: &StructValue) -> usize {
    value.fields.iter().map(size).sum()
}

/// Writes `value` in byte mode. The writer must have room for [`size`] bytes.
pub fn write_value(value: &Value, writer: &mut Writer<'_>) {
    match value {
        Value::U8(v) => writer.write_u8(*v),
        Value::U16(v) => writer.write_u16(*v),
        Value::U32(v) => writer.write_u32(*v),
        Value::U64(v) => writer.write_u64(*v),
        Value::I8(v) => writer.write_i8(*v),
        Value::I16(v) => writer.write_i16(*v),
        Value::I32(v) => writer.write_i32(*v),
        Value::I64(v) => writer.write_i64(*v),
        Value::F32(v) => writer.write_f32(*v),
        Value::F64(v) => writer.write_f64(*v),
        Value::Bool(v) => writer.write_bool(*v),
        Value::Str(s) => writer.write_str(s),
        Value::Array(values) => {
            writer.write_len(values.len());
            for value in values {
                write_value(value, writer);
            }
        }
        Value::Optional(inner) => {
            writer.write_presence(inner.is_some());
            if let Some(inner) = inner {
                write_value(inner, writer);
            }
        }
        Value::Struct(value) => write_struct(value, writer),
    }
}

pub fn write_struct(value: &StructValue, writer: &mut Writer<'_>) {
    for field in &value.fields {
        write_value(field, writer);
    }
}

/// Checks `value` against its struct declaration, then encodes it into an exactly sized buffer.
pub fn encode(schema: &Schema, value: &StructValue) -> Result<Vec<u8>, ValueError> {
    value.check(schema)?;
    let mut buf = vec![0; struct_size(value)];
    let mut writer = Writer::new(&mut buf);
    write_struct(value, &mut writer);
    debug_assert_eq!(writer.offset(), buf.len());
    Ok(buf)
}

/// Decodes one `id` struct from the front of `data`, returning it with the number of bytes
/// consumed. An id from another schema fails with `UnknownMessageType`.
pub fn decode(
    schema: &Schema,
    id: StructId,
    data: &[u8],
    limits: DecodeLimits,
) -> Result<(StructValue, usize), DecodeError> {
    if schema.by_type_id(id.type_id()).is_none() {
        return Err(DecodeError::UnknownMessageType(id.type_id()));
    }
    limits.check_input_size(data.len())?;
    let mut ctx = DecodeContext::new(limits);
    let mut reader = Reader::new(data);
    let value = read_struct(schema, id, &mut reader, &mut ctx)?;
    Ok((value, reader.offset()))
}

pub fn read_struct(
    schema: &Schema,
    id: StructId,
    reader: &mut Reader<'_>,
    ctx: &mut DecodeContext,
) -> Result<StructValue, DecodeError> {
    let fields = schema
        .get(id)
        .fields
        .iter()
        .map(|field| read_value(schema, &field.ty, reader, ctx))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(StructValue { id, fields })
}

pub fn read_value(
    schema: &Schema,
    ty: &TypeExpr,
    reader: &mut Reader<'_>,
    ctx: &mut DecodeContext,
) -> Result<Value, DecodeError> {
    if ty.optional {
        return Ok(Value::Optional(if reader.read_presence()? {
            Some(Box::new(read_value(schema, &ty.required(), reader, ctx)?))
        } else {
            None
        }));
    }
    Ok(match &ty.kind {
        TypeKind::Primitive(p) => read_primitive(*p, reader)?,
        TypeKind::Named(id) => Value::Struct(read_struct(schema, *id, reader, ctx)?),
        TypeKind::Array(element) => {
            let (count, capacity) = reader.read_array_len(ctx)?;
            let mut values = Vec::with_capacity(capacity);
            for _ in 0..count {
                values.push(read_value(schema, element, reader, ctx)?);
            }
            Value::Array(values)
        }
    })
}

fn read_primitive(primitive: Primitive, reader: &mut Reader<'_>) -> Result<Value, DecodeError> {
    Ok(match primitive {
        Primitive::U8 => Value::U8(reader.read_u8()?),
        Primitive::U16 => Value::U16(reader.read_u16()?),
        Primitive::U32 => Value::U32(reader.read_u32()?),
        Primitive::U64 => Value::U64(reader.read_u64()?),
        Primitive::I8 => Value::I8(reader.read_i8()?),
        Primitive::I16 => Value::I16(reader.read_i16()?),
        Primitive::I32 => Value::I32(reader.read_i32()?),
        Primitive::I64 => Value::I64(reader.read_i64()?),
        Primitive::F32 => Value::F32(reader.read_f32()?),
        Primitive::F64 => Value::F64(reader.read_f64()?),
        Primitive::Bool => Value::Bool(reader.read_bool()?),
        Primitive::Str => Value::Str(reader.read_string()?),
    })
}
