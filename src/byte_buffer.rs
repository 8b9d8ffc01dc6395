//! The opaque byte-buffer handle and its variants.
//!
//! [`ByteBuffer`] is a tagged union over the handle's dynamic variants:
//! [`DirectByteBuffer`] is backed by host-runtime native memory and is the
//! variant the bridge narrows to; [`HeapByteBuffer`] is plain `Vec`-backed
//! and is not native-backed. Handles expose only identity and attribute
//! accessors here — get/put, slicing, and endianness belong to a fuller
//! buffer layer and are deliberately absent.

use std::fmt;

use bitflags::bitflags;

use crate::array_buffer::{ArrayBuffer, ArrayBufferView};

bitflags! {
    /// Attributes of a byte-buffer handle.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BufferFlags: u8 {
        /// Backed by host-runtime native memory.
        const DIRECT = 1 << 0;
        /// Writes through the handle are disallowed.
        const READ_ONLY = 1 << 1;
    }
}

/// Discriminant of a [`ByteBuffer`] variant, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    Direct,
    Heap,
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferKind::Direct => write!(f, "direct"),
            BufferKind::Heap => write!(f, "heap"),
        }
    }
}

/// An opaque byte-buffer handle.
///
/// Cloning a `Direct` handle aliases the same native memory; cloning a
/// `Heap` handle copies its bytes.
#[derive(Debug, Clone)]
pub enum ByteBuffer {
    /// Native-backed: owns a view over host-runtime memory.
    Direct(DirectByteBuffer),
    /// Plain heap-allocated bytes, not native-backed.
    Heap(HeapByteBuffer),
}

impl ByteBuffer {
    /// The variant discriminant of this handle.
    pub fn kind(&self) -> BufferKind {
        match self {
            ByteBuffer::Direct(_) => BufferKind::Direct,
            ByteBuffer::Heap(_) => BufferKind::Heap,
        }
    }

    /// Attribute flags of this handle.
    pub fn flags(&self) -> BufferFlags {
        match self {
            ByteBuffer::Direct(direct) => direct.flags(),
            ByteBuffer::Heap(_) => BufferFlags::empty(),
        }
    }

    /// Total number of bytes the handle covers.
    pub fn capacity(&self) -> usize {
        match self {
            ByteBuffer::Direct(direct) => direct.capacity(),
            ByteBuffer::Heap(heap) => heap.capacity(),
        }
    }

    /// Current read/write position. Always 0 for freshly created handles.
    pub fn position(&self) -> usize {
        match self {
            ByteBuffer::Direct(direct) => direct.position(),
            ByteBuffer::Heap(heap) => heap.position(),
        }
    }

    pub fn is_direct(&self) -> bool {
        self.flags().contains(BufferFlags::DIRECT)
    }

    pub fn is_read_only(&self) -> bool {
        self.flags().contains(BufferFlags::READ_ONLY)
    }
}

/// A native-backed byte buffer: a handle over host-runtime memory.
///
/// The backing [`ArrayBufferView`] aliases the runtime's storage; the
/// handle never copies it. This is the variant the bridge's `unwrap`
/// narrows to.
#[derive(Debug, Clone)]
pub struct DirectByteBuffer {
    typed_array: ArrayBufferView,
    position: usize,
    flags: BufferFlags,
}

impl DirectByteBuffer {
    /// Adopt `buffer` as a read-write direct handle covering the whole
    /// allocation, positioned at 0.
    pub fn new(buffer: ArrayBuffer) -> Self {
        Self {
            typed_array: ArrayBufferView::new(buffer),
            position: 0,
            flags: BufferFlags::DIRECT,
        }
    }

    /// Adopt `buffer` as a read-only direct handle.
    pub fn read_only(buffer: ArrayBuffer) -> Self {
        Self {
            typed_array: ArrayBufferView::new(buffer),
            position: 0,
            flags: BufferFlags::DIRECT | BufferFlags::READ_ONLY,
        }
    }

    /// The view over the native memory backing this handle.
    ///
    /// The returned reference aliases the handle's storage; cloning it
    /// yields another alias of the same region, never a copy.
    pub fn typed_array(&self) -> &ArrayBufferView {
        &self.typed_array
    }

    pub fn capacity(&self) -> usize {
        self.typed_array.byte_length()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn flags(&self) -> BufferFlags {
        self.flags
    }
}

impl From<DirectByteBuffer> for ByteBuffer {
    fn from(direct: DirectByteBuffer) -> Self {
        ByteBuffer::Direct(direct)
    }
}

/// A heap-backed byte buffer with no native memory behind it.
#[derive(Debug, Clone)]
pub struct HeapByteBuffer {
    data: Vec<u8>,
    position: usize,
}

impl HeapByteBuffer {
    /// Allocate a zero-filled heap buffer of `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity],
            position: 0,
        }
    }

    /// Take ownership of `data` as a heap buffer.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data, position: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl From<HeapByteBuffer> for ByteBuffer {
    fn from(heap: HeapByteBuffer) -> Self {
        ByteBuffer::Heap(heap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_handle_covers_whole_buffer() {
        let handle = DirectByteBuffer::new(ArrayBuffer::new(16));
        assert_eq!(handle.capacity(), 16);
        assert_eq!(handle.position(), 0);
        assert_eq!(handle.flags(), BufferFlags::DIRECT);
    }

    #[test]
    fn read_only_handle_carries_both_flags() {
        let handle = DirectByteBuffer::read_only(ArrayBuffer::new(4));
        let bb = ByteBuffer::from(handle);
        assert!(bb.is_direct());
        assert!(bb.is_read_only());
    }

    #[test]
    fn heap_handle_is_not_direct() {
        let bb = ByteBuffer::from(HeapByteBuffer::new(8));
        assert_eq!(bb.kind(), BufferKind::Heap);
        assert_eq!(bb.capacity(), 8);
        assert!(!bb.is_direct());
        assert!(!bb.is_read_only());
    }

    #[test]
    fn clone_of_direct_aliases_storage() {
        let handle = DirectByteBuffer::new(ArrayBuffer::new(4));
        let clone = handle.clone();
        assert!(ArrayBufferView::ptr_eq(
            handle.typed_array(),
            clone.typed_array()
        ));
        handle.typed_array().set(0, 0x7F);
        assert_eq!(clone.typed_array().get(0), Some(0x7F));
    }

    #[test]
    fn kind_display_is_lowercase() {
        assert_eq!(BufferKind::Direct.to_string(), "direct");
        assert_eq!(BufferKind::Heap.to_string(), "heap");
    }
}
