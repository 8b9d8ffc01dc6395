//! typed-buffer: a narrow bridge between opaque byte-buffer handles and
//! the host runtime's native binary buffers.
//!
//! The crate does two things:
//!
//! - [`bridge::unwrap`] takes a [`ByteBuffer`] handle known to be backed by
//!   native memory and returns a zero-copy [`ArrayBufferView`] over its
//!   bytes. Narrowing is checked: a handle of the wrong variant fails with
//!   [`BufferError::TypeMismatch`] rather than misbehaving.
//! - [`bridge::from_string`] builds a new handle holding a string's encoded
//!   bytes, delegating the encoding to a lazily-created, process-wide
//!   [`BufferFactory`].
//!
//! Everything else here is the minimal collaborator surface those two
//! operations need: the handle variants, the native buffer and view types,
//! and the factory abstraction.
//!
//! # Example
//!
//! ```
//! use typed_buffer::bridge;
//!
//! let handle = bridge::from_string(Some("hello"))?;
//! let view = bridge::unwrap(&handle)?;
//! assert_eq!(view.to_vec(), b"hello");
//!
//! // Views alias the handle's memory.
//! view.set(0, b'y');
//! assert_eq!(bridge::unwrap(&handle)?.get(0), Some(b'y'));
//! # Ok::<(), typed_buffer::BufferError>(())
//! ```

pub mod array_buffer;
pub mod bridge;
pub mod byte_buffer;
pub mod error;
pub mod factory;

pub use array_buffer::{ArrayBuffer, ArrayBufferView};
pub use bridge::TypedBufferBridge;
pub use byte_buffer::{BufferFlags, BufferKind, ByteBuffer, DirectByteBuffer, HeapByteBuffer};
pub use error::{BufferError, Result};
pub use factory::{BufferFactory, DefaultBufferFactory};
