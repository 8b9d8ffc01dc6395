//! Host-runtime binary memory: [`ArrayBuffer`] and [`ArrayBufferView`].
//!
//! An `ArrayBuffer` is a fixed-length region of contiguous binary memory
//! owned by the runtime; an `ArrayBufferView` is a raw, mutable window over
//! a region of one. Both are cheap handles: cloning either never copies the
//! underlying bytes, so every clone aliases the same storage and a write
//! through one view is visible through every other view of that region.
//!
//! Identity is storage identity, not value equality — two buffers holding
//! the same bytes are still distinct. Use [`ArrayBuffer::ptr_eq`] and
//! [`ArrayBufferView::ptr_eq`] when a test or caller needs to know that two
//! handles refer to the very same memory.

use std::fmt;
use std::sync::{Arc, RwLock};

use crate::error::BufferError;

/// Fixed-length, shared, mutable binary memory.
///
/// The Rust rendition of the host runtime's `ArrayBuffer`. The byte length
/// is fixed at construction; the contents are mutable through any
/// [`ArrayBufferView`] over the buffer. Access is synchronized internally so
/// the type stays sound on multi-threaded hosts.
#[derive(Clone)]
pub struct ArrayBuffer {
    data: Arc<RwLock<Box<[u8]>>>,
    byte_length: usize,
}

impl ArrayBuffer {
    /// Allocate a zero-filled buffer of `byte_length` bytes.
    pub fn new(byte_length: usize) -> Self {
        Self {
            data: Arc::new(RwLock::new(vec![0u8; byte_length].into_boxed_slice())),
            byte_length,
        }
    }

    /// Allocate a buffer initialized with a copy of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            data: Arc::new(RwLock::new(bytes.to_vec().into_boxed_slice())),
            byte_length: bytes.len(),
        }
    }

    /// Length of the buffer in bytes. Fixed for the buffer's lifetime.
    #[inline]
    pub fn byte_length(&self) -> usize {
        self.byte_length
    }

    /// Whether two handles refer to the same underlying storage.
    #[inline]
    pub fn ptr_eq(a: &ArrayBuffer, b: &ArrayBuffer) -> bool {
        Arc::ptr_eq(&a.data, &b.data)
    }

    fn read_at(&self, index: usize) -> Option<u8> {
        self.data.read().unwrap().get(index).copied()
    }

    fn write_at(&self, index: usize, value: u8) -> bool {
        match self.data.write().unwrap().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    fn copy_out(&self, offset: usize, len: usize) -> Vec<u8> {
        self.data.read().unwrap()[offset..offset + len].to_vec()
    }

    fn copy_in(&self, offset: usize, bytes: &[u8]) {
        self.data.write().unwrap()[offset..offset + bytes.len()].copy_from_slice(bytes);
    }
}

impl fmt::Debug for ArrayBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayBuffer")
            .field("byte_length", &self.byte_length)
            .finish_non_exhaustive()
    }
}

/// A raw, mutable, fixed-length view over a region of an [`ArrayBuffer`].
///
/// The view does not own the bytes; its lifetime is tied to the buffer
/// handle it holds. Clones of a view alias the same region — mutations
/// through one are observable through all of them and through any other
/// view of the same buffer.
#[derive(Clone)]
pub struct ArrayBufferView {
    buffer: ArrayBuffer,
    byte_offset: usize,
    byte_length: usize,
}

impl ArrayBufferView {
    /// View over the whole of `buffer`.
    pub fn new(buffer: ArrayBuffer) -> Self {
        let byte_length = buffer.byte_length();
        Self {
            buffer,
            byte_offset: 0,
            byte_length,
        }
    }

    /// View over `len` bytes of `buffer` starting at `offset`.
    ///
    /// Fails with [`BufferError::ViewOutOfBounds`] when the requested range
    /// does not fit inside the buffer.
    pub fn with_range(buffer: ArrayBuffer, offset: usize, len: usize) -> Result<Self, BufferError> {
        let byte_length = buffer.byte_length();
        if offset.checked_add(len).is_none_or(|end| end > byte_length) {
            return Err(BufferError::ViewOutOfBounds {
                offset,
                len,
                byte_length,
            });
        }
        Ok(Self {
            buffer,
            byte_offset: offset,
            byte_length: len,
        })
    }

    /// The buffer this view windows into.
    #[inline]
    pub fn buffer(&self) -> &ArrayBuffer {
        &self.buffer
    }

    /// Offset of the view within its buffer, in bytes.
    #[inline]
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Length of the view in bytes.
    #[inline]
    pub fn byte_length(&self) -> usize {
        self.byte_length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.byte_length == 0
    }

    /// Read the byte at `index`, or `None` when `index` is out of range.
    pub fn get(&self, index: usize) -> Option<u8> {
        if index < self.byte_length {
            self.buffer.read_at(self.byte_offset + index)
        } else {
            None
        }
    }

    /// Write `value` at `index`. Returns `false` when `index` is out of
    /// range; in-range writes are visible through every alias of this
    /// region.
    pub fn set(&self, index: usize, value: u8) -> bool {
        index < self.byte_length && self.buffer.write_at(self.byte_offset + index, value)
    }

    /// Copy `bytes` into the front of the view. `bytes` must fit.
    pub fn fill_from(&self, bytes: &[u8]) -> Result<(), BufferError> {
        if bytes.len() > self.byte_length {
            return Err(BufferError::ViewOutOfBounds {
                offset: self.byte_offset,
                len: bytes.len(),
                byte_length: self.buffer.byte_length(),
            });
        }
        self.buffer.copy_in(self.byte_offset, bytes);
        Ok(())
    }

    /// Copy the view's bytes out into a fresh `Vec`.
    pub fn to_vec(&self) -> Vec<u8> {
        self.buffer.copy_out(self.byte_offset, self.byte_length)
    }

    /// Whether two views window the same region of the same storage.
    pub fn ptr_eq(a: &ArrayBufferView, b: &ArrayBufferView) -> bool {
        ArrayBuffer::ptr_eq(&a.buffer, &b.buffer)
            && a.byte_offset == b.byte_offset
            && a.byte_length == b.byte_length
    }
}

impl fmt::Debug for ArrayBufferView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayBufferView")
            .field("byte_offset", &self.byte_offset)
            .field("byte_length", &self.byte_length)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_alias_storage() {
        let buffer = ArrayBuffer::new(8);
        let other = buffer.clone();
        assert!(ArrayBuffer::ptr_eq(&buffer, &other));
        assert_eq!(other.byte_length(), 8);
    }

    #[test]
    fn from_bytes_copies_once() {
        let buffer = ArrayBuffer::from_bytes(&[1, 2, 3]);
        let view = ArrayBufferView::new(buffer);
        assert_eq!(view.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn writes_visible_through_aliases() {
        let buffer = ArrayBuffer::new(4);
        let a = ArrayBufferView::new(buffer.clone());
        let b = ArrayBufferView::new(buffer);
        assert!(a.set(2, 0xAB));
        assert_eq!(b.get(2), Some(0xAB));
    }

    #[test]
    fn ranged_view_offsets_into_buffer() {
        let buffer = ArrayBuffer::from_bytes(&[10, 20, 30, 40, 50]);
        let view = ArrayBufferView::with_range(buffer, 1, 3).unwrap();
        assert_eq!(view.byte_offset(), 1);
        assert_eq!(view.byte_length(), 3);
        assert_eq!(view.get(0), Some(20));
        assert_eq!(view.get(3), None);
    }

    #[test]
    fn out_of_range_view_rejected() {
        let buffer = ArrayBuffer::new(4);
        let err = ArrayBufferView::with_range(buffer, 2, 3).unwrap_err();
        assert_eq!(
            err,
            BufferError::ViewOutOfBounds {
                offset: 2,
                len: 3,
                byte_length: 4
            }
        );
    }

    #[test]
    fn overflowing_range_rejected() {
        let buffer = ArrayBuffer::new(4);
        assert!(ArrayBufferView::with_range(buffer, usize::MAX, 2).is_err());
    }

    #[test]
    fn out_of_range_write_refused() {
        let buffer = ArrayBuffer::new(2);
        let view = ArrayBufferView::new(buffer);
        assert!(!view.set(2, 1));
        assert_eq!(view.to_vec(), vec![0, 0]);
    }

    #[test]
    fn fill_from_rejects_oversized_input() {
        let buffer = ArrayBuffer::new(2);
        let view = ArrayBufferView::new(buffer);
        assert!(view.fill_from(&[1, 2, 3]).is_err());
        view.fill_from(&[7, 8]).unwrap();
        assert_eq!(view.to_vec(), vec![7, 8]);
    }

    #[test]
    fn ptr_eq_distinguishes_regions() {
        let buffer = ArrayBuffer::new(8);
        let whole = ArrayBufferView::new(buffer.clone());
        let front = ArrayBufferView::with_range(buffer.clone(), 0, 4).unwrap();
        assert!(ArrayBufferView::ptr_eq(&whole, &whole.clone()));
        assert!(!ArrayBufferView::ptr_eq(&whole, &front));
        let separate = ArrayBufferView::new(ArrayBuffer::new(8));
        assert!(!ArrayBufferView::ptr_eq(&whole, &separate));
    }
}
