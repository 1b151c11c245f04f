// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by every fallible operation in the crate.
//!
//! All variants are local validation failures raised synchronously by the
//! call that received the bad input. Geometric singularities (e.g. azimuth
//! at the poles) are *not* errors: they surface as `NaN`/`±∞` values.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SunposError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SunposError {
    /// A unit name that is not one of the recognised angle units.
    #[error("invalid angle unit: {unit:?}")]
    InvalidUnit { unit: String },

    /// A time value that is neither a day count nor a recognised timestamp.
    #[error("unsupported time type: {reason}")]
    UnsupportedTimeType { reason: String },

    /// Neither the time nor the complete set of precomputed angles was given.
    #[error("{operation}: missing argument `{argument}`")]
    MissingArgument {
        operation: &'static str,
        argument: &'static str,
    },

    /// Array shapes that cannot be broadcast against each other.
    #[error("shape mismatch: {left:?} cannot be broadcast with {right:?}")]
    ShapeMismatch { left: Vec<usize>, right: Vec<usize> },
}

impl SunposError {
    pub fn invalid_unit(unit: impl Into<String>) -> Self {
        Self::InvalidUnit { unit: unit.into() }
    }

    pub fn unsupported_time(reason: impl Into<String>) -> Self {
        Self::UnsupportedTimeType {
            reason: reason.into(),
        }
    }

    pub fn shape_mismatch(left: &[usize], right: &[usize]) -> Self {
        Self::ShapeMismatch {
            left: left.to_vec(),
            right: right.to_vec(),
        }
    }
}
