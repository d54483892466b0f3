//! Error types.

#[cfg(feature = "std")]
use std::error::Error;
use core::fmt;

/// Error value for a push into a full ring buffer.
///
/// Returned by `try_push` when every usable slot is taken, which includes
/// the zero-capacity buffer. The rejected element rides along so the
/// caller can retry it after a pop, or route it elsewhere.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct CapacityError<T = ()> {
    /// The element that did not fit.
    pub element: T,
}

impl<T> CapacityError<T> {
    /// Extracts the element that could not be pushed.
    #[inline]
    pub fn into_element(self) -> T {
        self.element
    }
}

const FULL: &str = "ring buffer is full";

#[cfg(feature = "std")]
impl<T> Error for CapacityError<T> {}

// Neither impl needs `T: Debug`, so `unwrap_err` works for any element.
impl<T> fmt::Display for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(FULL)
    }
}

impl<T> fmt::Debug for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CapacityError: {}", FULL)
    }
}
