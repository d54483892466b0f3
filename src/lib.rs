//! A FIFO ring buffer with fixed capacity.
//!
//! The buffer is two cursors and a store of `capacity + 1` slots. One slot
//! is always left free so that `read == write` can only mean "empty", and no
//! separate counter or flag is needed. Push and pop are `O(1)` and never
//! allocate; the only allocation happens in [`RingBuffer::new`].
//!
//! The crate has two layers:
//!
//! - [`RingBuffer`] owns its store and `usize` cursors.
//! - [`raw`] holds the same algorithm as free functions over storage and
//!   cursors supplied by the caller, who can use a plain array and any
//!   integer type implementing [`Cursor`], down to `u8` or `i8`.
//!
//! Neither layer is synchronized. Callers sharing a buffer between threads
//! bring their own locking or fences.
//!
//! # Feature Flags
//! The **ringbuffer** crate has the following cargo feature flags:
//!
//! - `std`
//!   - Optional, enabled by default
//!   - Use libstd and implement `std::error::Error` for `CapacityError`
//!   - Without it the crate is `no_std` and needs only `alloc`
//!
//! # Capacity
//!
//! Note that the `capacity()` is always `store.len() - 1`.
//! [Read more]
//!
//! [Read more]: https://en.wikipedia.org/wiki/Circular_buffer
//!
//! # Examples
//! ```
//! use ringbuffer::RingBuffer;
//!
//! let mut buf: RingBuffer<i32> = RingBuffer::new(5);
//! assert_eq!(buf.capacity(), 5);
//!
//! buf.push(1);
//! buf.push(2);
//! assert_eq!(buf.len(), 2);
//!
//! assert_eq!(buf.pop(), Some(1));
//! assert_eq!(buf.pop(), Some(2));
//! assert_eq!(buf.pop(), None);
//! ```
//!
//! # Caller-owned storage
//! ```
//! use ringbuffer::raw;
//!
//! let mut buf = [0; 10];
//! let mut read: i8 = 0;
//! let mut write: i8 = 0;
//!
//! assert_eq!(raw::capacity(&buf), 9);
//! raw::push(&mut buf, read, &mut write, 1);
//! assert_eq!(raw::len(&buf, read, write), 1);
//! assert_eq!(raw::pop(&buf, &mut read, write), Some(1));
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(missing_docs)]

extern crate alloc;

use alloc::boxed::Box;
use core::fmt;
use core::iter;
use core::mem::MaybeUninit;

mod cursor;
pub mod error;
pub mod raw;

pub use cursor::Cursor;
pub use error::CapacityError;

/// A fixed capacity FIFO ring buffer.
///
/// Elements go in with [`push`](RingBuffer::push) and come out with
/// [`pop`](RingBuffer::pop). A full buffer rejects pushes instead of
/// overwriting, and the buffer never grows.
///
/// `RingBuffer::default()` is a valid buffer of capacity 0: every push
/// fails and every pop returns `None`.
///
/// # Capacity
///
/// Note that the `capacity()` is always `store.len() - 1`.
/// [Read more]
///
/// [Read more]: https://en.wikipedia.org/wiki/Circular_buffer
pub struct RingBuffer<T> {
    // Slots in `[read, write)` are initialised, all others are not.
    store: Box<[MaybeUninit<T>]>,
    read: usize,
    write: usize,
}

impl<T: Clone> Clone for RingBuffer<T> {
    fn clone(&self) -> Self {
        let mut out = RingBuffer {
            store: uninit_store(self.store.len()),
            read: self.read,
            write: self.read,
        };
        for element in self {
            out.push(element.clone());
        }
        out
    }
}

impl<T> Drop for RingBuffer<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

fn uninit_store<T>(len: usize) -> Box<[MaybeUninit<T>]> {
    iter::repeat_with(MaybeUninit::uninit).take(len).collect()
}

impl<T> Default for RingBuffer<T> {
    #[inline]
    fn default() -> Self {
        RingBuffer::empty()
    }
}

impl<T> RingBuffer<T> {
    /// Creates a buffer of capacity 0.
    ///
    /// Same as `RingBuffer::default()`. Nothing is allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let mut buf: RingBuffer<u8> = RingBuffer::empty();
    /// assert_eq!(buf.capacity(), 0);
    /// assert!(!buf.push(5));
    /// ```
    #[inline]
    pub fn empty() -> Self {
        RingBuffer {
            store: Box::new([]),
            read: 0,
            write: 0,
        }
    }

    /// Creates a buffer that holds up to `capacity` elements.
    ///
    /// The store gets `capacity + 1` slots, left uninitialised until pushed
    /// to. A capacity of 0 allocates nothing and behaves like
    /// `RingBuffer::default()`.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if `capacity + 1` overflows `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let buf: RingBuffer<u32> = RingBuffer::new(3);
    /// assert_eq!(buf.capacity(), 3);
    /// assert_eq!(buf.len(), 0);
    ///
    /// let none: RingBuffer<u32> = RingBuffer::new(0);
    /// assert_eq!(none.capacity(), 0);
    /// ```
    pub fn new(capacity: usize) -> Self {
        if capacity == 0 {
            return RingBuffer::empty();
        }
        let len = capacity.checked_add(1).expect("capacity overflow");
        RingBuffer {
            store: uninit_store(len),
            read: 0,
            write: 0,
        }
    }

    /// Returns the number of elements the buffer can hold.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let buf: RingBuffer<usize> = RingBuffer::new(5);
    /// assert_eq!(buf.capacity(), 5);
    /// ```
    #[inline]
    pub fn capacity(&self) -> usize {
        raw::capacity(&self.store)
    }

    /// Returns the number of elements in the buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let mut buf = RingBuffer::new(5);
    /// assert_eq!(buf.len(), 0);
    /// buf.push(1);
    /// assert_eq!(buf.len(), 1);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        raw::len(&self.store, self.read, self.write)
    }

    /// Returns true if the buffer contains no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        raw::is_empty(self.read, self.write)
    }

    /// Returns true if the next push would fail.
    ///
    /// A buffer of capacity 0 is always full.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let mut buf = RingBuffer::new(1);
    /// assert!(!buf.is_full());
    /// buf.push(1);
    /// assert!(buf.is_full());
    /// ```
    #[inline]
    pub fn is_full(&self) -> bool {
        raw::is_full(&self.store, self.read, self.write)
    }

    /// Appends an element to the back of the buffer.
    ///
    /// Returns `true` on success, or `false` if there is no free slot, in
    /// which case `element` is dropped.
    ///
    /// # Examples
    ///
    /// ```text
    /// [_, _] <-(+)- 1 => [1, _] -> true
    /// [1, _] <-(+)- 2 => [1, 2] -> true
    /// [1, 2] <-(+)- 3 => [1, 2] -> false
    /// ```
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let mut buf = RingBuffer::new(2);
    /// assert!(buf.push(1));
    /// assert!(buf.push(2));
    /// assert!(!buf.push(3));
    /// ```
    #[inline]
    pub fn push(&mut self, element: T) -> bool {
        self.try_push(element).is_ok()
    }

    /// Appends an element to the back of the buffer.
    ///
    /// Returns the element inside a `CapacityError` if the buffer is full.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let mut buf = RingBuffer::new(1);
    /// assert!(buf.try_push("a").is_ok());
    ///
    /// let overflow = buf.try_push("b").unwrap_err();
    /// assert_eq!(overflow.element, "b");
    /// ```
    #[inline]
    pub fn try_push(&mut self, element: T) -> Result<(), CapacityError<T>> {
        raw::push_uninit(&mut self.store, self.read, &mut self.write, element)
    }

    /// Removes the first element and returns it, or `None` if the buffer is
    /// empty.
    ///
    /// The element is moved out; nothing is cloned or allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let mut buf = RingBuffer::new(2);
    /// buf.push(1);
    /// buf.push(2);
    ///
    /// assert_eq!(buf.pop(), Some(1));
    /// assert_eq!(buf.pop(), Some(2));
    /// assert_eq!(buf.pop(), None);
    /// ```
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        // SAFETY: `[read, write)` holds initialised values and `pop_uninit`
        // moves `read` past the slot it reads.
        unsafe { raw::pop_uninit(&self.store, &mut self.read, self.write) }
    }

    /// Drops every stored element, leaving the buffer empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let mut buf = RingBuffer::new(4);
    /// buf.push(1);
    /// buf.clear();
    /// assert!(buf.is_empty());
    /// assert_eq!(buf.capacity(), 4);
    /// ```
    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }

    /// Returns a front-to-back iterator over the stored elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringbuffer::RingBuffer;
    ///
    /// let mut buf = RingBuffer::new(3);
    /// buf.push(5);
    /// buf.push(3);
    /// let c: Vec<&i32> = buf.iter().collect();
    /// assert_eq!(c, [&5, &3]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<T> {
        Iter {
            ring: &self.store,
            read: self.read,
            write: self.write,
        }
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

/// `RingBuffer` iterator
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
#[derive(Clone)]
pub struct Iter<'a, T: 'a> {
    ring: &'a [MaybeUninit<T>],
    read: usize,
    write: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.read == self.write {
            return None;
        }
        // SAFETY: slots in `[read, write)` of a `RingBuffer` are initialised.
        let item = unsafe { self.ring[self.read].assume_init_ref() };
        self.read = (self.read + 1) % self.ring.len();
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = raw::len(self.ring, self.read, self.write);
        (len, Some(len))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}
