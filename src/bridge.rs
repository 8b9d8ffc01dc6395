//! The typed buffer bridge: handle narrowing and string-to-buffer creation.
//!
//! [`TypedBufferBridge`] is the whole visible surface of this crate:
//! `unwrap` narrows an opaque [`ByteBuffer`] to its native-backed variant
//! and hands back the backing view without copying, `from_string` forwards
//! text to the shared [`BufferFactory`] and returns its result unchanged,
//! and `wrap` adopts an existing [`ArrayBuffer`] as a direct handle.
//!
//! The factory reference is created lazily, exactly once, before either
//! operation's own logic runs; first use is safe under concurrency. The
//! [`bridge`] function exposes a process-wide instance for callers that do
//! not need to inject their own factory.

use std::sync::{Arc, OnceLock};

use crate::array_buffer::{ArrayBuffer, ArrayBufferView};
use crate::byte_buffer::{ByteBuffer, DirectByteBuffer};
use crate::error::{BufferError, Result};
use crate::factory::{BufferFactory, DefaultBufferFactory};

type FactoryInit = Box<dyn Fn() -> Arc<dyn BufferFactory> + Send + Sync>;

/// Bridge between byte-buffer handles and the host runtime's native
/// buffers.
///
/// Both operations are stateless pass-throughs apart from the one-time
/// factory initialization. Construct with [`TypedBufferBridge::new`] for
/// the stock factory, or [`TypedBufferBridge::with_initializer`] to inject
/// another one.
pub struct TypedBufferBridge {
    factory: OnceLock<Arc<dyn BufferFactory>>,
    init: FactoryInit,
}

impl TypedBufferBridge {
    /// A bridge that lazily installs the [`DefaultBufferFactory`].
    pub fn new() -> Self {
        Self::with_initializer(DefaultBufferFactory::shared)
    }

    /// A bridge whose factory is produced by `init` on first use.
    ///
    /// `init` runs at most once per bridge, even under concurrent first
    /// use; later calls reuse the same factory.
    pub fn with_initializer<F>(init: F) -> Self
    where
        F: Fn() -> Arc<dyn BufferFactory> + Send + Sync + 'static,
    {
        Self {
            factory: OnceLock::new(),
            init: Box::new(init),
        }
    }

    fn factory(&self) -> &Arc<dyn BufferFactory> {
        self.factory.get_or_init(|| (self.init)())
    }

    /// Narrow `handle` to its native-backed variant and return the view
    /// over its bytes.
    ///
    /// Zero-copy: the returned view aliases the handle's memory, so writes
    /// through it are visible when the handle is unwrapped again. A handle
    /// that is not native-backed fails with [`BufferError::TypeMismatch`]
    /// instead of the unchecked narrowing the original relied on.
    pub fn unwrap(&self, handle: &ByteBuffer) -> Result<ArrayBufferView> {
        self.factory();
        match handle {
            ByteBuffer::Direct(direct) => Ok(direct.typed_array().clone()),
            other => Err(BufferError::TypeMismatch {
                found: other.kind(),
            }),
        }
    }

    /// Create a new handle holding the encoded bytes of `text`.
    ///
    /// Delegates entirely to the factory: the input is forwarded exactly as
    /// given (including `None`) and the factory's result or error comes
    /// back unchanged.
    pub fn from_string(&self, text: Option<&str>) -> Result<ByteBuffer> {
        self.factory().string_to_byte_buffer(text)
    }

    /// Adopt an existing native buffer as a read-write direct handle with
    /// capacity equal to the buffer's byte length and position 0.
    pub fn wrap(&self, buffer: ArrayBuffer) -> ByteBuffer {
        self.factory();
        ByteBuffer::Direct(DirectByteBuffer::new(buffer))
    }
}

impl Default for TypedBufferBridge {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide bridge instance, created on first use.
pub fn bridge() -> &'static TypedBufferBridge {
    static INSTANCE: OnceLock<TypedBufferBridge> = OnceLock::new();
    INSTANCE.get_or_init(TypedBufferBridge::new)
}

/// [`TypedBufferBridge::unwrap`] on the process-wide bridge.
pub fn unwrap(handle: &ByteBuffer) -> Result<ArrayBufferView> {
    bridge().unwrap(handle)
}

/// [`TypedBufferBridge::from_string`] on the process-wide bridge.
pub fn from_string(text: Option<&str>) -> Result<ByteBuffer> {
    bridge().from_string(text)
}

/// [`TypedBufferBridge::wrap`] on the process-wide bridge.
pub fn wrap(buffer: ArrayBuffer) -> ByteBuffer {
    bridge().wrap(buffer)
}
