//! Runtime support for Serial Data Protocol codecs.
//!
//! Byte mode lays out struct fields in declaration order with no padding: little-endian scalars,
//! IEEE-754 bit patterns for floats, `0`/`1` booleans, `u32` length prefixes for strings and
//! arrays, and a presence byte in front of optional values. Message mode adds the header from
//! [`message`].
//!
//! Code produced by `sdp-gen --lang rust` implements [`Encode`], [`Decode`] and [`Message`] on top of this
//! crate.

pub mod codec;
pub mod error;
pub mod limits;
pub mod message;
pub mod reader;
pub mod writer;

pub use codec::{Decode, Encode};
pub use error::DecodeError;
pub use limits::{
    DecodeContext, DecodeLimits, MAX_ARRAY_ELEMENTS, MAX_SERIALIZED_SIZE, MAX_TOTAL_ELEMENTS,
};
pub use message::{
    decode_payload, frame_payload, Message, MessageHeader, MESSAGE_HEADER_SIZE, MESSAGE_MAGIC,
    MESSAGE_VERSION,
};
pub use reader::Reader;
pub use writer::Writer;
