/// Cursor writing into a buffer that was sized up front.
///
/// The buffer must be exactly as large as the value's encoded size. Writing past its end is a
/// programming error and panics; the writer never grows or reallocates.
#[derive(Debug)]
pub struct Writer<'a> {
    buf: &'a mut [u8],
    offset: usize,
}

macro_rules! write_le {
    ($($name:ident($ty:ty);)*) => {
        $(
            pub fn $name(&mut self, value: $ty) {
                self.put_slice(&value.to_le_bytes());
            }
        )*
    };
}

impl<'a> Writer<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// Number of bytes written so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn put_slice(&mut self, bytes: &[u8]) {
        let end = self.offset + bytes.len();
        assert!(
            end <= self.buf.len(),
            "encode buffer too small: writing {} bytes at offset {} into {} bytes",
            bytes.len(),
            self.offset,
            self.buf.len()
        );
        self.buf[self.offset..end].copy_from_slice(bytes);
        self.offset = end;
    }

    write_le! {
        write_u8(u8);
        write_u16(u16);
        write_u32(u32);
        write_u64(u64);
        write_i8(i8);
        write_i16(i16);
        write_i32(i32);
        write_i64(i64);
    }

    pub fn write_f32(&mut self, value: f32) {
        self.write_u32(value.to_bits());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.write_u64(value.to_bits());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(u8::from(value));
    }

    pub fn write_presence(&mut self, present: bool) {
        self.write_u8(u8::from(present));
    }

    /// Writes a `u32` length prefix. Lengths beyond `u32::MAX` cannot be represented on the wire.
    pub fn write_len(&mut self, len: usize) {
        let len = u32::try_from(len).unwrap_or_else(|_| {
            panic!("length {len} does not fit the u32 length prefix");
        });
        self.write_u32(len);
    }

    pub fn write_str(&mut self, value: &str) {
        self.write_len(value.len());
        self.put_slice(value.as_bytes());
    }
}
