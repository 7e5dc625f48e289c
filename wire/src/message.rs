//! Message mode: a byte-mode payload behind a fixed 10-byte header.
//!
//! ```text
//! offset  size  field
//! 0       3     magic "SDP"
//! 3       1     protocol version
//! 4       2     type id (u16, little-endian, 1-based schema declaration order)
//! 6       4     payload length (u32, little-endian)
//! 10      N     payload
//! ```

use crate::{
    codec::{Decode, Encode},
    error::DecodeError,
    limits::{DecodeContext, DecodeLimits},
    reader::Reader,
    writer::Writer,
};

pub const MESSAGE_MAGIC: [u8; 3] = *b"SDP";
/// ASCII `'2'`, protocol 0.2.
pub const MESSAGE_VERSION: u8 = b'2';
pub const MESSAGE_HEADER_SIZE: usize = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MessageHeader {
    pub type_id: u16,
    pub payload_len: u32,
}

impl MessageHeader {
    pub fn new(type_id: u16, payload_len: usize) -> Self {
        let payload_len = u32::try_from(payload_len).unwrap_or_else(|_| {
            panic!("payload of {payload_len} bytes does not fit the u32 length field");
        });
        Self {
            type_id,
            payload_len,
        }
    }

    pub fn write(&self, writer: &mut Writer<'_>) {
        writer.put_slice(&MESSAGE_MAGIC);
        writer.write_u8(MESSAGE_VERSION);
        writer.write_u16(self.type_id);
        writer.write_u32(self.payload_len);
    }

    pub fn to_bytes(&self) -> [u8; MESSAGE_HEADER_SIZE] {
        let mut bytes = [0; MESSAGE_HEADER_SIZE];
        self.write(&mut Writer::new(&mut bytes));
        bytes
    }

    /// Validates the header at the front of `data` and returns it with exactly
    /// `payload_len` bytes of payload. Bytes after the payload are ignored.
    pub fn parse(data: &[u8]) -> Result<(Self, &[u8]), DecodeError> {
        let mut reader = Reader::new(data);
        if data.len() < MESSAGE_HEADER_SIZE {
            return Err(DecodeError::UnexpectedEof {
                offset: 0,
                needed: MESSAGE_HEADER_SIZE,
                available: data.len(),
            });
        }
        let magic = reader.read_array::<3>()?;
        if magic != MESSAGE_MAGIC {
            return Err(DecodeError::InvalidMagic(magic));
        }
        let version = reader.read_u8()?;
        if version != MESSAGE_VERSION {
            return Err(DecodeError::InvalidVersion(version));
        }
        let type_id = reader.read_u16()?;
        let payload_len = reader.read_u32()?;
        let payload = reader.read_bytes(payload_len as usize)?;
        Ok((
            Self {
                type_id,
                payload_len,
            },
            payload,
        ))
    }
}

/// Wraps an already encoded payload in a message header.
pub fn frame_payload(type_id: u16, payload: &[u8]) -> Vec<u8> {
    let header = MessageHeader::new(type_id, payload.len());
    let mut buf = vec![0; MESSAGE_HEADER_SIZE + payload.len()];
    let mut writer = Writer::new(&mut buf);
    header.write(&mut writer);
    writer.put_slice(payload);
    buf
}

/// A schema struct that can travel in message mode.
pub trait Message: Encode + Decode {
    /// 1-based position of the struct in its schema.
    const TYPE_ID: u16;

    fn encode_message(&self) -> Vec<u8> {
        let size = self.encoded_size();
        let mut buf = vec![0; MESSAGE_HEADER_SIZE + size];
        let mut writer = Writer::new(&mut buf);
        MessageHeader::new(Self::TYPE_ID, size).write(&mut writer);
        self.encode_into(&mut writer);
        debug_assert_eq!(writer.offset(), buf.len());
        buf
    }

    fn decode_message_with_limits(data: &[u8], limits: DecodeLimits) -> Result<Self, DecodeError> {
        limits.check_input_size(data.len())?;
        let (header, payload) = MessageHeader::parse(data)?;
        if header.type_id != Self::TYPE_ID {
            return Err(DecodeError::UnknownMessageType(header.type_id));
        }
        decode_payload(payload, limits)
    }

    fn decode_message(data: &[u8]) -> Result<Self, DecodeError> {
        Self::decode_message_with_limits(data, DecodeLimits::default())
    }
}

/// Decodes a message payload with a fresh [`DecodeContext`].
///
/// Used by typed message decoders and by generated dispatchers once the header has been
/// validated.
pub fn decode_payload<T: Decode>(payload: &[u8], limits: DecodeLimits) -> Result<T, DecodeError> {
    let mut ctx = DecodeContext::new(limits);
    T::decode_from(&mut Reader::new(payload), &mut ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout() {
        let header = MessageHeader::new(0x0102, 0x0a0b_0c0d);
        assert_eq!(
            header.to_bytes(),
            [b'S', b'D', b'P', b'2', 0x02, 0x01, 0x0d, 0x0c, 0x0b, 0x0a]
        );
    }

    #[test]
    fn parse_slices_exact_payload() {
        let mut data = frame_payload(3, &[1, 2, 3]);
        data.extend_from_slice(&[0xee, 0xee]);
        let (header, payload) = MessageHeader::parse(&data).unwrap();
        assert_eq!(header.type_id, 3);
        assert_eq!(payload, [1, 2, 3]);
    }

    #[test]
    fn parse_errors_in_order() {
        assert!(matches!(
            MessageHeader::parse(b"SDP2"),
            Err(DecodeError::UnexpectedEof { .. })
        ));

        let good = frame_payload(1, &[7]);

        let mut bad = good.clone();
        bad[1] = b'X';
        assert_eq!(
            MessageHeader::parse(&bad),
            Err(DecodeError::InvalidMagic(*b"SXP"))
        );

        let mut bad = good.clone();
        bad[3] = b'1';
        assert_eq!(
            MessageHeader::parse(&bad),
            Err(DecodeError::InvalidVersion(b'1'))
        );

        assert!(matches!(
            MessageHeader::parse(&good[..10]),
            Err(DecodeError::UnexpectedEof { offset: 10, .. })
        ));
    }

    struct Ping(u32);

    impl Encode for Ping {
        fn encoded_size(&self) -> usize {
            self.0.encoded_size()
        }

        fn encode_into(&self, writer: &mut Writer<'_>) {
            self.0.encode_into(writer);
        }
    }

    impl Decode for Ping {
        fn decode_from(
            reader: &mut Reader<'_>,
            ctx: &mut DecodeContext,
        ) -> Result<Self, DecodeError> {
            Ok(Self(u32::decode_from(reader, ctx)?))
        }
    }

    impl Message for Ping {
        const TYPE_ID: u16 = 4;
    }

    #[test]
    fn typed_message_checks_type_id() {
        let bytes = Ping(9).encode_message();
        assert_eq!(bytes.len(), MESSAGE_HEADER_SIZE + 4);
        assert_eq!(Ping::decode_message(&bytes).unwrap().0, 9);

        let other = frame_payload(5, &9u32.to_le_bytes());
        assert_eq!(
            Ping::decode_message(&other).err(),
            Some(DecodeError::UnknownMessageType(5))
        );
    }
}
