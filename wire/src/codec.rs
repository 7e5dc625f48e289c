use crate::{
    error::DecodeError,
    limits::{DecodeContext, DecodeLimits},
    reader::Reader,
    writer::Writer,
};

/// Byte-mode encoding.
///
/// Implemented here for every primitive of the protocol, `String`, `Vec<T>` and `Option<T>`;
/// generated code implements it for schema structs by visiting fields in declaration order.
pub trait Encode {
    /// Exact number of bytes [`Encode::encode_into`] will write.
    fn encoded_size(&self) -> usize;

    fn encode_into(&self, writer: &mut Writer<'_>);

    /// Encodes into `buf`, which must hold at least [`Encode::encoded_size`] bytes, and returns
    /// the number of bytes written.
    fn encode_to_slice(&self, buf: &mut [u8]) -> usize {
        let mut writer = Writer::new(buf);
        self.encode_into(&mut writer);
        writer.offset()
    }

    fn encode(&self) -> Vec<u8> {
        let mut buf = vec![0; self.encoded_size()];
        let written = self.encode_to_slice(&mut buf);
        debug_assert_eq!(written, buf.len(), "encoded_size disagrees with encode_into");
        buf
    }
}

/// Byte-mode decoding under [`DecodeLimits`].
pub trait Decode: Sized {
    fn decode_from(reader: &mut Reader<'_>, ctx: &mut DecodeContext) -> Result<Self, DecodeError>;

    /// Decodes one value from the front of `data`, returning it with the number of bytes
    /// consumed. Trailing bytes are left alone.
    fn decode_prefix_with_limits(
        data: &[u8],
        limits: DecodeLimits,
    ) -> Result<(Self, usize), DecodeError> {
        limits.check_input_size(data.len())?;
        let mut ctx = DecodeContext::new(limits);
        let mut reader = Reader::new(data);
        let value = Self::decode_from(&mut reader, &mut ctx)?;
        Ok((value, reader.offset()))
    }

    fn decode_prefix(data: &[u8]) -> Result<(Self, usize), DecodeError> {
        Self::decode_prefix_with_limits(data, DecodeLimits::default())
    }

    fn decode_with_limits(data: &[u8], limits: DecodeLimits) -> Result<Self, DecodeError> {
        Self::decode_prefix_with_limits(data, limits).map(|(value, _)| value)
    }

    fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        Self::decode_with_limits(data, DecodeLimits::default())
    }
}

macro_rules! impl_wire_fixed {
    ($($ty:ty => $write:ident, $read:ident;)*) => {
        $(
            impl Encode for $ty {
                #[inline]
                fn encoded_size(&self) -> usize {
                    std::mem::size_of::<$ty>()
                }

                #[inline]
                fn encode_into(&self, writer: &mut Writer<'_>) {
                    writer.$write(*self);
                }
            }

            impl Decode for $ty {
                #[inline]
                fn decode_from(
                    reader: &mut Reader<'_>,
                    _ctx: &mut DecodeContext,
                ) -> Result<Self, DecodeError> {
                    reader.$read()
                }
            }
        )*
    };
}

impl_wire_fixed! {
    u8 => write_u8, read_u8;
    u16 => write_u16, read_u16;
    u32 => write_u32, read_u32;
    u64 => write_u64, read_u64;
    i8 => write_i8, read_i8;
    i16 => write_i16, read_i16;
    i32 => write_i32, read_i32;
    i64 => write_i64, read_i64;
    f32 => write_f32, read_f32;
    f64 => write_f64, read_f64;
    bool => write_bool, read_bool;
}

impl Encode for String {
    fn encoded_size(&self) -> usize {
        4 + self.len()
    }

    fn encode_into(&self, writer: &mut Writer<'_>) {
        writer.write_str(self);
    }
}

impl Decode for String {
    fn decode_from(reader: &mut Reader<'_>, _ctx: &mut DecodeContext) -> Result<Self, DecodeError> {
        reader.read_string()
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encoded_size(&self) -> usize {
        4 + self.iter().map(Encode::encoded_size).sum::<usize>()
    }

    fn encode_into(&self, writer: &mut Writer<'_>) {
        writer.write_len(self.len());
        for element in self {
            element.encode_into(writer);
        }
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode_from(reader: &mut Reader<'_>, ctx: &mut DecodeContext) -> Result<Self, DecodeError> {
        let (count, capacity) = reader.read_array_len(ctx)?;
        let mut elements = Vec::with_capacity(capacity);
        for _ in 0..count {
            elements.push(T::decode_from(reader, ctx)?);
        }
        Ok(elements)
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encoded_size(&self) -> usize {
        1 + self.as_ref().map_or(0, Encode::encoded_size)
    }

    fn encode_into(&self, writer: &mut Writer<'_>) {
        writer.write_presence(self.is_some());
        if let Some(value) = self {
            value.encode_into(writer);
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode_from(reader: &mut Reader<'_>, ctx: &mut DecodeContext) -> Result<Self, DecodeError> {
        if reader.read_presence()? {
            T::decode_from(reader, ctx).map(Some)
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_widths() {
        assert_eq!(0u8.encoded_size(), 1);
        assert_eq!(true.encoded_size(), 1);
        assert_eq!(0i16.encoded_size(), 2);
        assert_eq!(0f32.encoded_size(), 4);
        assert_eq!(0u64.encoded_size(), 8);
        assert_eq!(0f64.encoded_size(), 8);
    }

    #[test]
    fn absent_optional_is_one_byte() {
        let value: Option<Vec<String>> = None;
        assert_eq!(value.encode(), [0]);

        let (decoded, consumed) = Option::<u64>::decode_prefix(&[0, 0xaa, 0xbb]).unwrap();
        assert_eq!(decoded, None);
        assert_eq!(consumed, 1);
    }

    #[test]
    fn absent_and_empty_optional_array_differ() {
        let absent: Option<Vec<u8>> = None;
        let empty: Option<Vec<u8>> = Some(Vec::new());
        assert_eq!(absent.encode(), [0]);
        assert_eq!(empty.encode(), [1, 0, 0, 0, 0]);
        assert_eq!(Option::<Vec<u8>>::decode(&[1, 0, 0, 0, 0]).unwrap(), Some(vec![]));
    }

    #[test]
    fn nested_arrays() {
        let value = vec![vec![1u16, 2], vec![], vec![3]];
        let bytes = value.encode();
        assert_eq!(bytes.len(), value.encoded_size());
        assert_eq!(
            bytes,
            [3, 0, 0, 0, 2, 0, 0, 0, 1, 0, 2, 0, 0, 0, 0, 0, 1, 0, 0, 0, 3, 0]
        );
        assert_eq!(Vec::<Vec<u16>>::decode(&bytes).unwrap(), value);
    }

    #[test]
    fn total_element_limit_spans_nested_arrays() {
        let value = vec![vec![0u8; 4], vec![0u8; 4]];
        let limits = DecodeLimits {
            max_total_elements: 9,
            ..DecodeLimits::default()
        };
        // 2 outer + 4 + 4 inner elements
        assert!(Vec::<Vec<u8>>::decode_with_limits(&value.encode(), limits).is_err());
        let limits = DecodeLimits {
            max_total_elements: 10,
            ..limits
        };
        assert!(Vec::<Vec<u8>>::decode_with_limits(&value.encode(), limits).is_ok());
    }

    #[test]
    fn data_too_large_is_checked_before_parsing() {
        let limits = DecodeLimits {
            max_message_size: 2,
            ..DecodeLimits::default()
        };
        // the content would be an invalid bool, but the size check wins
        assert_eq!(
            bool::decode_with_limits(&[9, 9, 9], limits),
            Err(DecodeError::DataTooLarge { size: 3, max: 2 })
        );
    }
}
