//! Cursor index types.

/// Trait for integer types usable as read/write cursors.
///
/// The protocol in [`raw`](crate::raw) does all of its arithmetic in
/// `usize` and only narrows the result back into the cursor type, so any
/// fixed width integer works as long as it can hold every index of the
/// store it is used with.
///
/// Picking a cursor type too narrow for the store (for example `i8` over a
/// store of 200 slots), or handing the protocol a negative cursor, breaks
/// that precondition. Debug builds assert on it, release builds silently
/// truncate.
pub trait Cursor: PartialEq + Copy {
    /// Widens the cursor into a store index.
    fn to_usize(self) -> usize;

    /// Narrows a store index into the cursor type.
    fn from_usize(ix: usize) -> Self;
}

macro_rules! impl_cursor {
    ($($t:ty),*) => {$(
        impl Cursor for $t {
            #[inline(always)]
            fn to_usize(self) -> usize {
                debug_assert!(usize::try_from(self).is_ok(),
                              "cursor {} does not fit in usize",
                              self);
                self as usize
            }

            #[inline(always)]
            fn from_usize(ix: usize) -> Self {
                debug_assert!(<$t>::try_from(ix).is_ok(),
                              "index {} does not fit in cursor type {}",
                              ix,
                              stringify!($t));
                ix as $t
            }
        }
    )*}
}

macro_rules! impl_signed_cursor {
    ($($t:ty),*) => {$(
        impl Cursor for $t {
            #[inline(always)]
            fn to_usize(self) -> usize {
                debug_assert!(self >= 0, "negative cursor {}", self);
                debug_assert!(usize::try_from(self).is_ok(),
                              "cursor {} does not fit in usize",
                              self);
                self as usize
            }

            #[inline(always)]
            fn from_usize(ix: usize) -> Self {
                debug_assert!(<$t>::try_from(ix).is_ok(),
                              "index {} does not fit in cursor type {}",
                              ix,
                              stringify!($t));
                ix as $t
            }
        }
    )*}
}

impl_cursor!(u8, u16, u32, u64, usize);
impl_signed_cursor!(i8, i16, i32, i64, isize);
