use crate::error::DecodeError;

/// Largest input a single decode call accepts (128 MiB).
pub const MAX_SERIALIZED_SIZE: usize = 128 * 1024 * 1024;
/// Largest element count accepted for a single array.
pub const MAX_ARRAY_ELEMENTS: u32 = 1_000_000;
/// Largest element count accepted across all arrays of one decode call.
pub const MAX_TOTAL_ELEMENTS: u64 = 10_000_000;

/// Resource limits enforced while decoding untrusted input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DecodeLimits {
    pub max_message_size: usize,
    pub max_array_elements: u32,
    pub max_total_elements: u64,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_message_size: MAX_SERIALIZED_SIZE,
            max_array_elements: MAX_ARRAY_ELEMENTS,
            max_total_elements: MAX_TOTAL_ELEMENTS,
        }
    }
}

impl DecodeLimits {
    /// Rejects inputs larger than [`DecodeLimits::max_message_size`].
    pub fn check_input_size(&self, size: usize) -> Result<(), DecodeError> {
        if size > self.max_message_size {
            return Err(DecodeError::DataTooLarge {
                size,
                max: self.max_message_size,
            });
        }
        Ok(())
    }
}

/// Per-call decode state.
///
/// A fresh context is created for every top-level decode and dropped when it returns; it is never
/// shared between calls.
#[derive(Debug)]
pub struct DecodeContext {
    limits: DecodeLimits,
    total_elements: u64,
}

impl DecodeContext {
    pub fn new(limits: DecodeLimits) -> Self {
        Self {
            limits,
            total_elements: 0,
        }
    }

    pub fn limits(&self) -> &DecodeLimits {
        &self.limits
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Accounts for an array of `count` elements. Must be called before anything is allocated for
    /// the array.
    pub fn check_array_size(&mut self, count: u32) -> Result<(), DecodeError> {
        if count > self.limits.max_array_elements {
            return Err(DecodeError::ArrayTooLarge {
                count,
                max: self.limits.max_array_elements,
            });
        }
        self.total_elements += u64::from(count);
        if self.total_elements > self.limits.max_total_elements {
            return Err(DecodeError::TooManyElements {
                total: self.total_elements,
                max: self.limits.max_total_elements,
            });
        }
        Ok(())
    }
}

impl Default for DecodeContext {
    fn default() -> Self {
        Self::new(DecodeLimits::default())
    }
}
