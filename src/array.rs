// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Array plumbing shared by every ephemeris function.
//!
//! Every quantity in this crate is carried as a [`Values`] array
//! (`ndarray::ArrayD<f64>`). A scalar is the 0-dimensional array, so a
//! scalar input always yields a scalar output and an `N`-element input
//! yields `N` outputs in the same shape.
//!
//! Binary and ternary element-wise operations follow NumPy broadcasting:
//! shapes are aligned on their trailing axes and axes of length 1 (or
//! missing leading axes) are stretched. Anything else is reported as
//! [`SunposError::ShapeMismatch`].

use crate::error::{Result, SunposError};
use ndarray::{arr0, Array, ArrayBase, ArrayD, ArrayViewD, Data, Dimension, Zip};

/// Dynamic-rank array of `f64` values.
pub type Values = ArrayD<f64>;

// ═══════════════════════════════════════════════════════════════════════════
// IntoValues
// ═══════════════════════════════════════════════════════════════════════════

/// Conversion into a [`Values`] array.
///
/// Implemented for plain scalars, vectors, slices, fixed-size arrays and
/// any `ndarray` array of `f64`.
pub trait IntoValues {
    fn into_values(self) -> Values;
}

impl IntoValues for f64 {
    #[inline]
    fn into_values(self) -> Values {
        arr0(self).into_dyn()
    }
}

impl IntoValues for Vec<f64> {
    #[inline]
    fn into_values(self) -> Values {
        Array::from(self).into_dyn()
    }
}

impl IntoValues for &[f64] {
    #[inline]
    fn into_values(self) -> Values {
        Array::from(self.to_vec()).into_dyn()
    }
}

impl<const N: usize> IntoValues for [f64; N] {
    #[inline]
    fn into_values(self) -> Values {
        Array::from(self.to_vec()).into_dyn()
    }
}

impl<S, D> IntoValues for ArrayBase<S, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    #[inline]
    fn into_values(self) -> Values {
        self.into_owned().into_dyn()
    }
}

impl<S, D> IntoValues for &ArrayBase<S, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    #[inline]
    fn into_values(self) -> Values {
        self.to_owned().into_dyn()
    }
}

/// The value of a 0-dimensional array, `None` for any other rank.
#[inline]
pub fn as_scalar(values: &Values) -> Option<f64> {
    if values.ndim() == 0 {
        values.first().copied()
    } else {
        None
    }
}

/// Sine and cosine of every element, evaluated together.
pub fn sincos(x: &Values) -> (Values, Values) {
    let pairs = x.mapv(f64::sin_cos);
    (pairs.mapv(|(s, _)| s), pairs.mapv(|(_, c)| c))
}

// ═══════════════════════════════════════════════════════════════════════════
// Broadcasting
// ═══════════════════════════════════════════════════════════════════════════

/// Common shape of two arrays under NumPy broadcasting rules.
pub fn broadcast_shape(left: &[usize], right: &[usize]) -> Result<Vec<usize>> {
    let rank = left.len().max(right.len());
    let mut shape = vec![0; rank];
    for (axis, slot) in shape.iter_mut().enumerate() {
        // Align on trailing axes; missing leading axes behave like length 1.
        let l = axis.checked_sub(rank - left.len()).map_or(1, |i| left[i]);
        let r = axis.checked_sub(rank - right.len()).map_or(1, |i| right[i]);
        *slot = match (l, r) {
            (a, b) if a == b => a,
            (1, b) => b,
            (a, 1) => a,
            _ => return Err(SunposError::shape_mismatch(left, right)),
        };
    }
    Ok(shape)
}

fn broadcast_view<'a, A>(array: &'a ArrayD<A>, shape: &[usize]) -> Result<ArrayViewD<'a, A>> {
    array
        .broadcast(shape)
        .ok_or_else(|| SunposError::shape_mismatch(array.shape(), shape))
}

/// Apply `f` element-wise over two co-broadcast arrays.
pub(crate) fn zip_with<A, B, R, F>(a: &ArrayD<A>, b: &ArrayD<B>, mut f: F) -> Result<ArrayD<R>>
where
    F: FnMut(&A, &B) -> R,
{
    let shape = broadcast_shape(a.shape(), b.shape())?;
    log::trace!("broadcast {:?} x {:?} -> {:?}", a.shape(), b.shape(), shape);
    let av = broadcast_view(a, &shape)?;
    let bv = broadcast_view(b, &shape)?;
    Ok(Zip::from(av).and(bv).map_collect(|x, y| f(x, y)))
}

/// Apply `f` element-wise over three co-broadcast arrays.
pub(crate) fn zip_with3<A, B, C, R, F>(
    a: &ArrayD<A>,
    b: &ArrayD<B>,
    c: &ArrayD<C>,
    mut f: F,
) -> Result<ArrayD<R>>
where
    F: FnMut(&A, &B, &C) -> R,
{
    let shape = broadcast_shape(&broadcast_shape(a.shape(), b.shape())?, c.shape())?;
    log::trace!(
        "broadcast {:?} x {:?} x {:?} -> {:?}",
        a.shape(),
        b.shape(),
        c.shape(),
        shape
    );
    let av = broadcast_view(a, &shape)?;
    let bv = broadcast_view(b, &shape)?;
    let cv = broadcast_view(c, &shape)?;
    Ok(Zip::from(av)
        .and(bv)
        .and(cv)
        .map_collect(|x, y, z| f(x, y, z)))
}

// ═══════════════════════════════════════════════════════════════════════════
// Circular wrapping
// ═══════════════════════════════════════════════════════════════════════════

/// Reduce `x` into `[0, period)`. `NaN` stays `NaN`.
#[inline]
pub(crate) fn wrap_positive(x: f64, period: f64) -> f64 {
    let r = x.rem_euclid(period);
    // rem_euclid rounds tiny negative inputs up to exactly `period`.
    if r >= period {
        r - period
    } else {
        r
    }
}

/// Reduce `x` into `[-period/2, period/2)`.
#[inline]
pub(crate) fn wrap_signed(x: f64, period: f64) -> f64 {
    let half = 0.5 * period;
    wrap_positive(x + half, period) - half
}

/// Reduce `x` into `(-period/2, period/2]`.
#[inline]
pub(crate) fn wrap_signed_upper(x: f64, period: f64) -> f64 {
    let half = 0.5 * period;
    half - wrap_positive(half - x, period)
}
