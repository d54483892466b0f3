//! The circular index protocol over caller-owned storage.
//!
//! These functions hold no state of their own. The caller owns the backing
//! store and both cursors and passes them in on every call, which lets it
//! pick a plain array, a slice of a larger allocation, or any other
//! contiguous storage, together with the narrowest [`Cursor`] type that can
//! index it.
//!
//! A store of length `n` holds at most `n - 1` elements: one slot is kept
//! free so that `read == write` always means empty.
//!
//! ```
//! use ringbuffer::raw;
//!
//! let mut buf = [0; 5];
//! let mut read: i8 = 0;
//! let mut write: i8 = 0;
//!
//! raw::push(&mut buf, read, &mut write, 1);
//! raw::push(&mut buf, read, &mut write, 2);
//! let v1 = raw::pop(&buf, &mut read, write);
//! let v2 = raw::pop(&buf, &mut read, write);
//! assert_eq!((v1, v2), (Some(1), Some(2)));
//! ```
//!
//! [`push`] and [`pop`] work on any initialised store, and `pop` clones
//! the value out, leaving the slot as it was. [`push_uninit`] and
//! [`pop_uninit`] do the same over `MaybeUninit` slots and move values in
//! and out without cloning; [`RingBuffer`](crate::RingBuffer) is built on
//! them.
//!
//! # Cursor width
//!
//! Cursors must be able to represent every index of the store. Nothing
//! guards against picking a type that is too narrow; debug builds assert,
//! release builds truncate.

use core::mem::MaybeUninit;

use crate::cursor::Cursor;
use crate::error::CapacityError;

#[inline]
fn advance(index: usize, len: usize) -> usize {
    debug_assert!(index < len, "cursor {} out of bounds for store of {}", index, len);
    (index + 1) % len
}

#[inline]
fn count(read: usize, write: usize, len: usize) -> usize {
    debug_assert!(read < len);
    debug_assert!(write < len);
    if write >= read {
        write - read
    } else {
        len - (read - write)
    }
}

/// Returns how many elements a store can hold.
///
/// That is one less than the store length, and 0 for an empty store.
///
/// ```
/// use ringbuffer::raw;
///
/// let buf = [0; 10];
/// assert_eq!(raw::capacity(&buf), 9);
/// assert_eq!(raw::capacity::<u8>(&[]), 0);
/// ```
#[inline]
pub fn capacity<T>(store: &[T]) -> usize {
    store.len().saturating_sub(1)
}

/// Returns how many elements are currently stored.
///
/// A zero-length store always reports 0, whatever the cursors say.
///
/// ```
/// use ringbuffer::raw;
///
/// let mut buf = [0; 10];
/// let read: i8 = 0;
/// let mut write: i8 = 0;
///
/// assert_eq!(raw::len(&buf, read, write), 0);
/// raw::push(&mut buf, read, &mut write, 1);
/// assert_eq!(raw::len(&buf, read, write), 1);
/// ```
#[inline]
pub fn len<T, I: Cursor>(store: &[T], read: I, write: I) -> usize {
    if store.is_empty() {
        return 0;
    }
    count(read.to_usize(), write.to_usize(), store.len())
}

/// Returns true if no element is stored.
#[inline]
pub fn is_empty<I: Cursor>(read: I, write: I) -> bool {
    read == write
}

/// Returns true if a push would fail.
///
/// A zero-length store is always full.
#[inline]
pub fn is_full<T, I: Cursor>(store: &[T], read: I, write: I) -> bool {
    if store.is_empty() {
        return true;
    }
    advance(write.to_usize(), store.len()) == read.to_usize()
}

/// Pushes `value` into the slot under the write cursor.
///
/// Returns `true` on success. Returns `false` and drops `value` if there is
/// no free slot. Only `write` and the one written slot are touched.
///
/// ```
/// use ringbuffer::raw;
///
/// let mut buf = [0; 2];
/// let read = 0usize;
/// let mut write = 0usize;
///
/// assert!(raw::push(&mut buf, read, &mut write, 7));
/// assert!(!raw::push(&mut buf, read, &mut write, 8));
/// assert_eq!(write, 1);
/// ```
#[inline]
pub fn push<T, I: Cursor>(store: &mut [T], read: I, write: &mut I, value: T) -> bool {
    try_push(store, read, write, value).is_ok()
}

/// Pushes `value` into the slot under the write cursor.
///
/// On a full store the cursors are left alone and `value` is handed back
/// inside the error.
///
/// ```
/// use ringbuffer::raw;
///
/// let mut buf = [0u32; 2];
/// let read: u8 = 0;
/// let mut write: u8 = 0;
///
/// assert_eq!(raw::try_push(&mut buf, read, &mut write, 1), Ok(()));
/// let err = raw::try_push(&mut buf, read, &mut write, 2).unwrap_err();
/// assert_eq!(err.element, 2);
/// ```
pub fn try_push<T, I: Cursor>(store: &mut [T],
                              read: I,
                              write: &mut I,
                              value: T)
                              -> Result<(), CapacityError<T>> {
    match claim_write(store.len(), read, write) {
        Some(slot) => {
            store[slot] = value;
            Ok(())
        }
        None => Err(CapacityError { element: value }),
    }
}

/// Pops the element under the read cursor.
///
/// Returns `None` if the store is empty. The vacated slot keeps its old
/// value until a later push overwrites it; only `read` changes.
///
/// ```
/// use ringbuffer::raw;
///
/// let mut buf = [0; 5];
/// let mut read: i8 = 0;
/// let mut write: i8 = 0;
///
/// assert_eq!(raw::pop(&buf, &mut read, write), None);
/// raw::push(&mut buf, read, &mut write, 1);
/// assert_eq!(raw::pop(&buf, &mut read, write), Some(1));
/// assert_eq!(buf[0], 1);
/// ```
#[inline]
pub fn pop<T: Clone, I: Cursor>(store: &[T], read: &mut I, write: I) -> Option<T> {
    claim_read(store.len(), read, write).map(|slot| store[slot].clone())
}

/// Pushes `value` into an uninitialised store.
///
/// Same outcomes as [`try_push`], but the slot under the write cursor is
/// written without dropping whatever bits it held. Slots outside
/// `[read, write)` are never read through these functions, so a store of
/// `MaybeUninit::uninit()` slots is a valid empty store.
///
/// ```
/// use core::mem::MaybeUninit;
/// use ringbuffer::raw;
///
/// let mut buf: [MaybeUninit<String>; 3] = [MaybeUninit::uninit(),
///                                          MaybeUninit::uninit(),
///                                          MaybeUninit::uninit()];
/// let mut read = 0u8;
/// let mut write = 0u8;
///
/// raw::push_uninit(&mut buf, read, &mut write, String::from("a")).unwrap();
/// let a = unsafe { raw::pop_uninit(&buf, &mut read, write) };
/// assert_eq!(a.as_deref(), Some("a"));
/// ```
#[inline]
pub fn push_uninit<T, I: Cursor>(store: &mut [MaybeUninit<T>],
                                 read: I,
                                 write: &mut I,
                                 value: T)
                                 -> Result<(), CapacityError<T>> {
    match claim_write(store.len(), read, write) {
        Some(slot) => {
            store[slot].write(value);
            Ok(())
        }
        None => Err(CapacityError { element: value }),
    }
}

/// Moves the element under the read cursor out of an uninitialised store.
///
/// Returns `None` if the store is empty. Nothing is cloned; the vacated
/// slot is logically uninitialised afterwards.
///
/// # Safety
///
/// Every slot in `[read, write)` must hold a value written by
/// [`push_uninit`] that has not been moved out yet, and the caller must not
/// read the vacated slot again before it is pushed to.
#[inline]
pub unsafe fn pop_uninit<T, I: Cursor>(store: &[MaybeUninit<T>],
                                       read: &mut I,
                                       write: I)
                                       -> Option<T> {
    claim_read(store.len(), read, write).map(|slot| store[slot].assume_init_read())
}

/// Returns the slot to write and advances `write`, or `None` when full.
#[inline]
fn claim_write<I: Cursor>(len: usize, read: I, write: &mut I) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let slot = write.to_usize();
    let next = advance(slot, len);
    if next == read.to_usize() {
        return None;
    }
    *write = I::from_usize(next);
    Some(slot)
}

/// Returns the slot to read and advances `read`, or `None` when empty.
#[inline]
fn claim_read<I: Cursor>(len: usize, read: &mut I, write: I) -> Option<usize> {
    if is_empty(*read, write) {
        return None;
    }
    let slot = read.to_usize();
    *read = I::from_usize(advance(slot, len));
    Some(slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store() {
        macro_rules! test {
            ($cursor:ty) => ({
                let mut buf: [i32; 0] = [];
                let mut read: $cursor = 0;
                let mut write: $cursor = 0;
                assert_eq!(capacity(&buf), 0);
                assert_eq!(len(&buf, read, write), 0);
                assert!(is_full(&buf, read, write));
                assert!(!push(&mut buf, read, &mut write, 5));
                assert_eq!(pop(&buf, &mut read, write), None);
                assert_eq!((read, write), (0, 0));
            })
        }

        test!(u8);
        test!(i8);
        test!(u16);
        test!(i32);
        test!(u64);
        test!(usize);
        test!(isize);
    }

    #[test]
    fn empty_store_ignores_cursors() {
        let buf: [i32; 0] = [];
        assert_eq!(len(&buf, 3u8, 1u8), 0);
    }

    #[test]
    fn reserved_slot() {
        let mut buf = [0; 10];
        let read: i8 = 0;
        let mut write: i8 = 0;

        assert_eq!(capacity(&buf), 9);
        assert_eq!(len(&buf, read, write), 0);
        assert!(push(&mut buf, read, &mut write, 1));
        assert_eq!(len(&buf, read, write), 1);
    }

    #[test]
    fn single_slot_store() {
        let mut buf = [0; 1];
        let mut read = 0u8;
        let mut write = 0u8;

        assert_eq!(capacity(&buf), 0);
        assert!(is_empty(read, write));
        assert!(is_full(&buf, read, write));
        assert!(!push(&mut buf, read, &mut write, 1));
        assert_eq!(pop(&buf, &mut read, write), None);
    }

    #[test]
    fn fifo_order() {
        macro_rules! test {
            ($cursor:ty) => ({
                let mut buf = [0u32; 6];
                let mut read: $cursor = 0;
                let mut write: $cursor = 0;

                for v in 1..6 {
                    assert!(push(&mut buf, read, &mut write, v));
                }
                assert!(is_full(&buf, read, write));
                assert_eq!(len(&buf, read, write), 5);

                let mut out = Vec::new();
                while let Some(v) = pop(&buf, &mut read, write) {
                    out.push(v);
                }
                assert_eq!(out, vec![1, 2, 3, 4, 5]);
                assert!(is_empty(read, write));
            })
        }

        test!(u8);
        test!(i8);
        test!(u16);
        test!(i16);
        test!(u32);
        test!(i64);
        test!(usize);
    }

    #[test]
    fn full_push_leaves_state_alone() {
        let mut buf = [0; 3];
        let read = 0u8;
        let mut write = 0u8;

        assert!(push(&mut buf, read, &mut write, 1));
        assert!(push(&mut buf, read, &mut write, 2));
        let before = (buf, write);

        let err = try_push(&mut buf, read, &mut write, 3).unwrap_err();
        assert_eq!(err.into_element(), 3);
        assert_eq!((buf, write), before);
    }

    #[test]
    fn push_never_moves_read() {
        let mut buf = [0; 4];
        let read = 2u16;
        let mut write = 2u16;

        assert!(push(&mut buf, read, &mut write, 1));
        assert!(push(&mut buf, read, &mut write, 2));
        assert!(push(&mut buf, read, &mut write, 3));
        assert!(!push(&mut buf, read, &mut write, 4));
        assert_eq!(read, 2);
        assert_eq!(write, 1);
        assert_eq!(buf, [3, 0, 1, 2]);
    }

    #[test]
    fn length_across_wrap() {
        let buf = [0; 5];
        assert_eq!(len(&buf, 0usize, 4usize), 4);
        assert_eq!(len(&buf, 3usize, 1usize), 3);
        assert_eq!(len(&buf, 4usize, 3usize), 4);
        assert_eq!(len(&buf, 2usize, 2usize), 0);
    }

    #[test]
    fn pop_keeps_stale_slot() {
        let mut buf = [0; 3];
        let mut read = 0i32;
        let mut write = 0i32;

        assert!(push(&mut buf, read, &mut write, 42));
        assert_eq!(pop(&buf, &mut read, write), Some(42));
        assert_eq!(buf[0], 42);
        assert_eq!(read, 1);
        assert_eq!(write, 1);
    }

    #[test]
    fn wraparound_cycles() {
        let mut buf = [0u8; 4];
        let mut read = 0u8;
        let mut write = 0u8;

        for round in 0..50u8 {
            assert!(push(&mut buf, read, &mut write, round));
            assert!(push(&mut buf, read, &mut write, round.wrapping_add(1)));
            assert_eq!(len(&buf, read, write), 2);
            assert_eq!(pop(&buf, &mut read, write), Some(round));
            assert_eq!(pop(&buf, &mut read, write), Some(round.wrapping_add(1)));
            assert_eq!(pop(&buf, &mut read, write), None);
            assert!(read < 4 && write < 4);
        }
    }

    #[test]
    fn narrowest_cursor_fits_full_range() {
        // 256 slots is the largest store a u8 cursor can index.
        let mut buf = [0u16; 256];
        let mut read = 0u8;
        let mut write = 0u8;

        for round in 0..3 {
            for v in 0..255 {
                assert!(push(&mut buf, read, &mut write, v), "round {} value {}", round, v);
            }
            assert!(!push(&mut buf, read, &mut write, 255));
            assert_eq!(len(&buf, read, write), 255);
            for v in 0..255 {
                assert_eq!(pop(&buf, &mut read, write), Some(v));
            }
            assert_eq!(pop(&buf, &mut read, write), None);
        }
    }

    #[test]
    fn heap_store() {
        let mut buf = vec![String::new(); 3];
        let mut read = 0usize;
        let mut write = 0usize;

        assert!(push(&mut buf, read, &mut write, "a".to_string()));
        assert!(push(&mut buf, read, &mut write, "b".to_string()));
        assert!(!push(&mut buf, read, &mut write, "c".to_string()));
        assert_eq!(pop(&buf, &mut read, write).as_deref(), Some("a"));
        assert!(push(&mut buf, read, &mut write, "c".to_string()));
        assert_eq!(pop(&buf, &mut read, write).as_deref(), Some("b"));
        assert_eq!(pop(&buf, &mut read, write).as_deref(), Some("c"));
        assert_eq!(pop(&buf, &mut read, write), None);
    }

    #[test]
    fn uninit_store_moves_values() {
        use std::rc::Rc;

        let item = Rc::new(5);
        let mut buf: [MaybeUninit<Rc<i32>>; 3] = [MaybeUninit::uninit(),
                                                  MaybeUninit::uninit(),
                                                  MaybeUninit::uninit()];
        let mut read = 0i16;
        let mut write = 0i16;

        for _ in 0..4 {
            assert!(push_uninit(&mut buf, read, &mut write, item.clone()).is_ok());
            assert!(push_uninit(&mut buf, read, &mut write, item.clone()).is_ok());
            let err = push_uninit(&mut buf, read, &mut write, item.clone()).unwrap_err();
            drop(err);
            assert_eq!(Rc::strong_count(&item), 3);
            assert_eq!(len(&buf, read, write), 2);

            let a = unsafe { pop_uninit(&buf, &mut read, write) }.unwrap();
            drop(a);
            assert_eq!(Rc::strong_count(&item), 2);
            let b = unsafe { pop_uninit(&buf, &mut read, write) }.unwrap();
            drop(b);
            assert_eq!(Rc::strong_count(&item), 1);
            assert!(unsafe { pop_uninit(&buf, &mut read, write) }.is_none());
        }
    }

    #[test]
    fn uninit_empty_store() {
        let mut buf: [MaybeUninit<u8>; 0] = [];
        let mut read = 0u8;
        let mut write = 0u8;

        assert_eq!(push_uninit(&mut buf, read, &mut write, 1).unwrap_err().element, 1);
        assert_eq!(unsafe { pop_uninit(&buf, &mut read, write) }, None);
        assert_eq!((read, write), (0, 0));
    }
}

#[cfg(test)]
mod test_generic_array {
    use generic_array::GenericArray;
    use generic_array::typenum::U41;

    use super::*;

    #[test]
    fn generic_array_store() {
        let mut buf: GenericArray<i32, U41> = GenericArray::default();
        let mut read = 0u8;
        let mut write = 0u8;

        assert_eq!(capacity(&buf), 40);
        for v in 0..40 {
            assert!(push(&mut buf, read, &mut write, v));
        }
        assert!(!push(&mut buf, read, &mut write, 40));
        assert_eq!(len(&buf, read, write), 40);
        for v in 0..40 {
            assert_eq!(pop(&buf, &mut read, write), Some(v));
        }
        assert_eq!(pop(&buf, &mut read, write), None);
    }
}
