//! Fixed-width mask words.
//!
//! `MaskWord` abstracts the handful of bit operations the mask sink and the
//! canonicalizer need, so both widths share one implementation.

use std::fmt::Debug;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// An unsigned integer used as an action mask: bit `i` stands for the action
/// with ordinal `i`.
pub trait MaskWord:
    Copy + Eq + Debug + Default + BitOr<Output = Self> + BitOrAssign + BitAnd<Output = Self>
{
    /// Width of the word in bits.
    const BITS: u32;
    const ZERO: Self;
    const MAX: Self;

    /// The word with only bit `index` set. `index` must be below `BITS`.
    fn bit(index: u32) -> Self;

    /// The word with bits `0..count` set, saturating to `MAX` once
    /// `count >= BITS`.
    fn low_bits(count: usize) -> Self;

    fn trailing_zeros(self) -> u32;

    fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// Clear the lowest set bit.
    fn clear_lowest(self) -> Self;
}

macro_rules! impl_mask_word {
    ($($ty:ty),*) => {$(
        impl MaskWord for $ty {
            const BITS: u32 = <$ty>::BITS;
            const ZERO: Self = 0;
            const MAX: Self = <$ty>::MAX;

            #[inline]
            fn bit(index: u32) -> Self {
                1 << index
            }

            #[inline]
            fn low_bits(count: usize) -> Self {
                if count >= Self::BITS as usize { Self::MAX } else { (1 << count) - 1 }
            }

            #[inline]
            fn trailing_zeros(self) -> u32 {
                <$ty>::trailing_zeros(self)
            }

            #[inline]
            fn clear_lowest(self) -> Self {
                self & self.wrapping_sub(1)
            }
        }
    )*};
}

impl_mask_word!(u32, u64);
