// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Element-wise bit utilities and a NaN-aware range helper.
//!
//! Quality-flag words in satellite and station products pack booleans into
//! integer bit fields. The functions below operate on every element of an
//! integer array with a single bit mask `1 << pos`:
//!
//! | Function | Operation |
//! |----------|-----------|
//! | [`testbit`]   | `v & (1 << pos)` |
//! | [`setbit`]    | `v \| (1 << pos)` |
//! | [`clearbit`]  | `v & !(1 << pos)` |
//! | [`togglebit`] | `v ^ (1 << pos)` |
//!
//! A `pos` at or beyond the width of the integer type selects no bit: the
//! mask is zero.

use ndarray::{Array, ArrayBase, Data, Dimension};
use std::ops::{BitAnd, BitOr, BitXor, Not};

/// Integer types usable as bit words.
pub trait BitWord:
    Copy + BitAnd<Output = Self> + BitOr<Output = Self> + BitXor<Output = Self> + Not<Output = Self>
{
    /// `1 << pos`, or zero when `pos` is out of range.
    fn mask(pos: u32) -> Self;

    /// Two's complement bit pattern, zero-extended to 64 bits.
    fn to_bits(self) -> u64;
}

macro_rules! impl_bit_word {
    ($($t:ty => $u:ty),* $(,)?) => {
        $(
            impl BitWord for $t {
                #[inline]
                fn mask(pos: u32) -> Self {
                    (1 as $t).checked_shl(pos).unwrap_or(0)
                }

                #[inline]
                fn to_bits(self) -> u64 {
                    self as $u as u64
                }
            }
        )*
    };
}

impl_bit_word!(
    u8 => u8, u16 => u16, u32 => u32, u64 => u64,
    i8 => u8, i16 => u16, i32 => u32, i64 => u64,
);

/// Keep only bit `pos` of every element: `v & (1 << pos)`.
///
/// ```
/// use ndarray::array;
/// use sunpos::bits::testbit;
///
/// assert_eq!(testbit(&array![0b0110_u8, 0b0001], 2), array![0b0100, 0]);
/// ```
pub fn testbit<T, S, D>(v: &ArrayBase<S, D>, pos: u32) -> Array<T, D>
where
    T: BitWord,
    S: Data<Elem = T>,
    D: Dimension,
{
    let m = T::mask(pos);
    v.mapv(|x| x & m)
}

/// Set bit `pos` in every element: `v | (1 << pos)`.
pub fn setbit<T, S, D>(v: &ArrayBase<S, D>, pos: u32) -> Array<T, D>
where
    T: BitWord,
    S: Data<Elem = T>,
    D: Dimension,
{
    let m = T::mask(pos);
    v.mapv(|x| x | m)
}

/// Clear bit `pos` in every element: `v & !(1 << pos)`.
pub fn clearbit<T, S, D>(v: &ArrayBase<S, D>, pos: u32) -> Array<T, D>
where
    T: BitWord,
    S: Data<Elem = T>,
    D: Dimension,
{
    let m = !T::mask(pos);
    v.mapv(|x| x & m)
}

/// Flip bit `pos` in every element: `v ^ (1 << pos)`.
pub fn togglebit<T, S, D>(v: &ArrayBase<S, D>, pos: u32) -> Array<T, D>
where
    T: BitWord,
    S: Data<Elem = T>,
    D: Dimension,
{
    let m = T::mask(pos);
    v.mapv(|x| x ^ m)
}

/// Number of set bits in the low 32 bits of every element.
pub fn popcount32<T, S, D>(v: &ArrayBase<S, D>) -> Array<u32, D>
where
    T: BitWord,
    S: Data<Elem = T>,
    D: Dimension,
{
    v.mapv(|x| (x.to_bits() & 0xFFFF_FFFF).count_ones())
}

/// Number of set bits in every element.
pub fn popcount64<T, S, D>(v: &ArrayBase<S, D>) -> Array<u32, D>
where
    T: BitWord,
    S: Data<Elem = T>,
    D: Dimension,
{
    v.mapv(|x| x.to_bits().count_ones())
}

/// [`popcount32`] for `maxbits <= 32`, [`popcount64`] otherwise.
pub fn countbits<T, S, D>(v: &ArrayBase<S, D>, maxbits: u32) -> Array<u32, D>
where
    T: BitWord,
    S: Data<Elem = T>,
    D: Dimension,
{
    if maxbits <= 32 {
        popcount32(v)
    } else {
        popcount64(v)
    }
}

/// Smallest and largest element.
///
/// With `skipna` the `NaN` elements are ignored (an all-`NaN` array gives
/// `(NaN, NaN)`); without it any `NaN` makes both bounds `NaN`. Returns
/// `None` for an empty array.
pub fn minmax<S, D>(x: &ArrayBase<S, D>, skipna: bool) -> Option<(f64, f64)>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    if x.is_empty() {
        return None;
    }
    let mut bounds: Option<(f64, f64)> = None;
    for &v in x.iter() {
        if v.is_nan() {
            if skipna {
                continue;
            }
            return Some((f64::NAN, f64::NAN));
        }
        bounds = Some(match bounds {
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
            None => (v, v),
        });
    }
    Some(bounds.unwrap_or((f64::NAN, f64::NAN)))
}
