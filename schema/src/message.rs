use sdp_wire::{
    DecodeContext, DecodeError, DecodeLimits, MessageHeader, Reader, Writer, MESSAGE_HEADER_SIZE,
};

use crate::{
    codec::{read_struct, struct_size, write_struct},
    error::ValueError,
    schema::Schema,
    value::StructValue,
};

/// Encodes `value` in message mode: header with the struct's type id, then the byte-mode payload.
pub fn frame(schema: &Schema, value: &StructValue) -> Result<Vec<u8>, ValueError> {
    value.check(schema)?;
    let size = struct_size(value);
    let mut buf = vec![0; MESSAGE_HEADER_SIZE + size];
    let mut writer = Writer::new(&mut buf);
    MessageHeader::new(value.id.type_id(), size).write(&mut writer);
    write_struct(value, &mut writer);
    debug_assert_eq!(writer.offset(), buf.len());
    Ok(buf)
}

/// Validates the message header and decodes the payload as the struct its type id names.
pub fn dispatch(
    schema: &Schema,
    data: &[u8],
    limits: DecodeLimits,
) -> Result<StructValue, DecodeError> {
    limits.check_input_size(data.len())?;
    let (header, payload) = MessageHeader::parse(data)?;
    let decl = schema
        .by_type_id(header.type_id)
        .ok_or(DecodeError::UnknownMessageType(header.type_id))?;
    let mut ctx = DecodeContext::new(limits);
    read_struct(schema, decl.id, &mut Reader::new(payload), &mut ctx)
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;
    use crate::{parse_schema, value::Value};

    #[test]
    fn frame_and_dispatch() {
        let schema = parse_schema("struct A { x: u8 }\nstruct B { y: u16 }").unwrap();
        let b = schema.by_name("B").unwrap().id;
        let value = StructValue {
            id: b,
            fields: vec![Value::U16(0xbeef)],
        };
        let bytes = frame(&schema, &value).unwrap();
        assert_eq!(bytes, hex!("534450 32 0200 02000000 efbe"));
        assert_eq!(dispatch(&schema, &bytes, DecodeLimits::default()), Ok(value));
    }

    #[test]
    fn header_errors() {
        let schema = parse_schema("struct A { x: u8 }").unwrap();
        let limits = DecodeLimits::default();

        assert!(matches!(
            dispatch(&schema, b"SDP2", limits),
            Err(DecodeError::UnexpectedEof { .. })
        ));
        assert_eq!(
            dispatch(&schema, &hex!("534451 32 0100 01000000 07"), limits),
            Err(DecodeError::InvalidMagic(*b"SDQ"))
        );
        assert_eq!(
            dispatch(&schema, &hex!("534450 31 0100 01000000 07"), limits),
            Err(DecodeError::InvalidVersion(b'1'))
        );
        assert_eq!(
            dispatch(&schema, &hex!("534450 32 0900 01000000 07"), limits),
            Err(DecodeError::UnknownMessageType(9))
        );
        assert_eq!(
            dispatch(&schema, &hex!("534450 32 0000 01000000 07"), limits),
            Err(DecodeError::UnknownMessageType(0))
        );
        assert!(matches!(
            dispatch(&schema, &hex!("534450 32 0100 02000000 07"), limits),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn payload_is_sliced_to_its_declared_length() {
        let schema = parse_schema("struct A { items: []u8 }").unwrap();
        // payload_len = 4 cuts the array count short of its elements
        let data = hex!("534450 32 0100 04000000 01000000 2a");
        assert!(matches!(
            dispatch(&schema, &data, DecodeLimits::default()),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }
}
