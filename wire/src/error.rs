use thiserror::Error;

/// Reasons a decode call can fail.
///
/// Every variant is terminal for the call that produced it: decoders never retry and never hand
/// back a partially populated value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of data: {needed} bytes needed at offset {offset}, {available} available")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("invalid magic bytes {0:?} (expected \"SDP\")")]
    InvalidMagic([u8; 3]),
    #[error("unsupported protocol version {0:#04x}")]
    InvalidVersion(u8),
    #[error("unknown message type id {0}")]
    UnknownMessageType(u16),
    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 { offset: usize },
    #[error("invalid boolean value {value:#04x} at offset {offset}")]
    InvalidBoolValue { offset: usize, value: u8 },
    #[error("invalid presence flag {value:#04x} at offset {offset}")]
    InvalidPresenceFlag { offset: usize, value: u8 },
    #[error("array count {count} exceeds per-array limit {max}")]
    ArrayTooLarge { count: u32, max: u32 },
    #[error("total element count {total} exceeds limit {max}")]
    TooManyElements { total: u64, max: u64 },
    #[error("data size {size} exceeds limit {max}")]
    DataTooLarge { size: usize, max: usize },
}

impl DecodeError {
    /// Stable, language-independent name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnexpectedEof { .. } => "UnexpectedEOF",
            Self::InvalidMagic(_) => "InvalidMagic",
            Self::InvalidVersion(_) => "InvalidVersion",
            Self::UnknownMessageType(_) => "UnknownMessageType",
            Self::InvalidUtf8 { .. } => "InvalidUTF8",
            Self::InvalidBoolValue { .. } => "InvalidBoolValue",
            Self::InvalidPresenceFlag { .. } => "InvalidPresenceFlag",
            Self::ArrayTooLarge { .. } => "ArrayTooLarge",
            Self::TooManyElements { .. } => "TooManyElements",
            Self::DataTooLarge { .. } => "DataTooLarge",
        }
    }
}
