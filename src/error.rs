//! Error types for the buffer bridge.
//!
//! All fallible operations in this crate share one error enum. Factory
//! implementations raise `BufferError` directly and the bridge propagates
//! it unchanged — nothing is retried, translated, or wrapped on the way to
//! the caller.

use thiserror::Error;

use crate::byte_buffer::BufferKind;

pub type Result<T> = std::result::Result<T, BufferError>;

/// Errors raised by buffer construction and bridge operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// `unwrap` was handed a handle that is not backed by native memory.
    ///
    /// The original design narrowed the handle with an unchecked cast and
    /// left this case undefined; here the narrowing is checked and the
    /// wrong variant is reported instead.
    #[error("expected a direct byte buffer, found a {found} buffer")]
    TypeMismatch { found: BufferKind },

    /// The string factory received no input to encode.
    #[error("string factory received no input")]
    AbsentInput,

    /// A view range does not fit inside its buffer.
    #[error("view range {offset}+{len} exceeds buffer length {byte_length}")]
    ViewOutOfBounds {
        offset: usize,
        len: usize,
        byte_length: usize,
    },
}
