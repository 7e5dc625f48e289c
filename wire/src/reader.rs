use crate::{error::DecodeError, limits::DecodeContext};

/// Bounds-checked cursor over an encoded byte slice.
#[derive(Debug)]
pub struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

macro_rules! read_le {
    ($($name:ident -> $ty:ty;)*) => {
        $(
            pub fn $name(&mut self) -> Result<$ty, DecodeError> {
                Ok(<$ty>::from_le_bytes(self.read_array()?))
            }
        )*
    };
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Takes the next `len` bytes, failing with [`DecodeError::UnexpectedEof`] if fewer remain.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if len > self.remaining() {
            return Err(DecodeError::UnexpectedEof {
                offset: self.offset,
                needed: len,
                available: self.remaining(),
            });
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut array = [0; N];
        array.copy_from_slice(self.read_bytes(N)?);
        Ok(array)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, DecodeError> {
        Ok(i8::from_le_bytes(self.read_array()?))
    }

    read_le! {
        read_u16 -> u16;
        read_u32 -> u32;
        read_u64 -> u64;
        read_i16 -> i16;
        read_i32 -> i32;
        read_i64 -> i64;
    }

    pub fn read_f32(&mut self) -> Result<f32, DecodeError> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        let offset = self.offset;
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(DecodeError::InvalidBoolValue { offset, value }),
        }
    }

    /// Reads the presence byte in front of an optional value.
    pub fn read_presence(&mut self) -> Result<bool, DecodeError> {
        let offset = self.offset;
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(DecodeError::InvalidPresenceFlag { offset, value }),
        }
    }

    /// Reads a `u32` byte length followed by that many bytes of UTF-8.
    pub fn read_str(&mut self) -> Result<&'a str, DecodeError> {
        let len = self.read_u32()? as usize;
        let offset = self.offset;
        let bytes = self.read_bytes(len)?;
        std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 { offset })
    }

    pub fn read_string(&mut self) -> Result<String, DecodeError> {
        self.read_str().map(str::to_owned)
    }

    /// Reads an array count and accounts for it in `ctx`.
    ///
    /// Returns the element count together with a capacity that is safe to pre-allocate: every
    /// encoded element occupies at least one byte, so the capacity never exceeds what the rest of
    /// the input could describe.
    pub fn read_array_len(&mut self, ctx: &mut DecodeContext) -> Result<(usize, usize), DecodeError> {
        let count = self.read_u32()?;
        ctx.check_array_size(count)?;
        let count = count as usize;
        Ok((count, count.min(self.remaining())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian() {
        let data = [0x78, 0x56, 0x34, 0x12, 0xff];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.read_u32().unwrap(), 0x1234_5678);
        assert_eq!(reader.read_i8().unwrap(), -1);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn eof_reports_position() {
        let data = [1, 2, 3];
        let mut reader = Reader::new(&data);
        reader.read_u8().unwrap();
        assert_eq!(
            reader.read_u32(),
            Err(DecodeError::UnexpectedEof {
                offset: 1,
                needed: 4,
                available: 2
            })
        );
        // a failed read does not move the cursor
        assert_eq!(reader.offset(), 1);
    }

    #[test]
    fn bool_rejects_other_bytes() {
        let mut reader = Reader::new(&[1, 0, 2]);
        assert!(reader.read_bool().unwrap());
        assert!(!reader.read_bool().unwrap());
        assert_eq!(
            reader.read_bool(),
            Err(DecodeError::InvalidBoolValue {
                offset: 2,
                value: 2
            })
        );
    }

    #[test]
    fn presence_rejects_other_bytes() {
        let mut reader = Reader::new(&[0xff]);
        assert_eq!(
            reader.read_presence(),
            Err(DecodeError::InvalidPresenceFlag {
                offset: 0,
                value: 0xff
            })
        );
    }

    #[test]
    fn invalid_utf8() {
        let data = [2, 0, 0, 0, 0xc3, 0x28];
        let mut reader = Reader::new(&data);
        assert_eq!(
            reader.read_str(),
            Err(DecodeError::InvalidUtf8 { offset: 4 })
        );
    }

    #[test]
    fn array_len_capacity_is_bounded_by_input() {
        let data = [100, 0, 0, 0, 1, 2, 3];
        let mut reader = Reader::new(&data);
        let mut ctx = DecodeContext::default();
        assert_eq!(reader.read_array_len(&mut ctx).unwrap(), (100, 3));
        assert_eq!(ctx.total_elements(), 100);
    }

    #[test]
    fn huge_array_count_rejected_before_reading_elements() {
        let data = [0xff, 0xff, 0xff, 0xff];
        let mut reader = Reader::new(&data);
        let mut ctx = DecodeContext::default();
        assert!(matches!(
            reader.read_array_len(&mut ctx),
            Err(DecodeError::ArrayTooLarge {
                count: u32::MAX,
                ..
            })
        ));
    }
}
