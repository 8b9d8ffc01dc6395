//! Buffer factory: turns text into byte-buffer handles.
//!
//! The [`BufferFactory`] trait is the seam through which the bridge creates
//! handles from strings. The bridge holds exactly one factory per process
//! (or per injected instance in tests) and forwards inputs to it untouched,
//! so the factory alone decides the encoding and the absent-input policy.

use std::sync::Arc;

use crate::array_buffer::ArrayBuffer;
use crate::byte_buffer::{ByteBuffer, DirectByteBuffer};
use crate::error::{BufferError, Result};

/// Produces byte-buffer handles from text.
///
/// Implementations receive the caller's input exactly as given, including
/// `None` for absent text. Errors they raise flow back to the caller
/// unchanged.
pub trait BufferFactory: Send + Sync {
    /// Encode `text` into a newly allocated byte-buffer handle.
    fn string_to_byte_buffer(&self, text: Option<&str>) -> Result<ByteBuffer>;
}

/// The stock factory: UTF-8 encodes text into fresh native memory.
///
/// Absent input is an error; the empty string yields a zero-length direct
/// handle.
#[derive(Debug, Default)]
pub struct DefaultBufferFactory;

impl DefaultBufferFactory {
    pub fn new() -> Self {
        Self
    }

    /// Convenience for sharing a factory behind the trait object the
    /// bridge expects.
    pub fn shared() -> Arc<dyn BufferFactory> {
        Arc::new(Self::new())
    }
}

impl BufferFactory for DefaultBufferFactory {
    fn string_to_byte_buffer(&self, text: Option<&str>) -> Result<ByteBuffer> {
        let text = text.ok_or(BufferError::AbsentInput)?;
        let buffer = ArrayBuffer::from_bytes(text.as_bytes());
        Ok(ByteBuffer::Direct(DirectByteBuffer::new(buffer)))
    }
}
