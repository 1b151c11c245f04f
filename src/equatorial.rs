// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Equatorial coordinates of the Sun: right ascension and declination.
//!
//! Both follow from the ecliptic longitude `l` and the obliquity `ε`:
//!
//! ```text
//! α = atan2(cos ε · sin l, cos l)
//! δ = asin(sin ε · sin l)
//! ```
//!
//! The longitude is first reduced into `(−π, π]`; `atan2` then resolves the
//! quadrant of `α` directly, so the right ascension lies in `(−π, π]` as well.
//!
//! The input is an [`EclipticSource`]: either a time, from which `l` and `ε`
//! are derived, or a precomputed `(l, ε)` pair in degrees.

use crate::array::{wrap_signed_upper, zip_with, IntoValues, Values};
use crate::ecliptic::{ecliptic_longitude_deg, obliquity_deg};
use crate::epoch::Epoch;
use crate::error::{Result, SunposError};
use crate::time::TimeValue;
use crate::units::{AngleUnit, IntoAngleUnit};
use std::f64::consts::TAU;

/// Where the ecliptic longitude and obliquity come from.
#[derive(Debug, Clone, PartialEq)]
pub enum EclipticSource {
    /// Derive both angles from a time value.
    Time(TimeValue),
    /// Precomputed angles, in degrees. The two arrays must broadcast.
    Angles {
        longitude: Values,
        obliquity: Values,
    },
}

impl EclipticSource {
    pub fn from_time(time: impl Into<TimeValue>) -> Self {
        Self::Time(time.into())
    }

    pub fn from_angles(longitude_deg: impl IntoValues, obliquity_deg: impl IntoValues) -> Self {
        Self::Angles {
            longitude: longitude_deg.into_values(),
            obliquity: obliquity_deg.into_values(),
        }
    }

    /// Build a source from optional pieces.
    ///
    /// A present `time` wins. Without it both angles are required, otherwise
    /// the call fails with [`SunposError::MissingArgument`] naming the first
    /// absent one.
    pub fn from_parts(
        operation: &'static str,
        time: Option<TimeValue>,
        longitude_deg: Option<Values>,
        obliquity_deg: Option<Values>,
    ) -> Result<Self> {
        if let Some(time) = time {
            return Ok(Self::Time(time));
        }
        match (longitude_deg, obliquity_deg) {
            (Some(longitude), Some(obliquity)) => Ok(Self::Angles {
                longitude,
                obliquity,
            }),
            (None, _) => Err(SunposError::MissingArgument {
                operation,
                argument: "longitude",
            }),
            (Some(_), None) => Err(SunposError::MissingArgument {
                operation,
                argument: "obliquity",
            }),
        }
    }

    /// `(sin l, cos l, sin ε, cos ε)` per element, with `l` in `(−π, π]`.
    fn trig(&self) -> Result<ndarray::ArrayD<EclipticTrig>> {
        match self {
            Self::Time(time) => {
                let t = time.to_continuous_days(&Epoch::J2000)?;
                Ok(t.mapv(EclipticTrig::at))
            }
            Self::Angles {
                longitude,
                obliquity,
            } => zip_with(longitude, obliquity, |&l, &e| EclipticTrig::new(l, e)),
        }
    }
}

impl From<TimeValue> for EclipticSource {
    fn from(time: TimeValue) -> Self {
        Self::Time(time)
    }
}

/// Shared trigonometry of one `(l, ε)` pair.
#[derive(Debug, Copy, Clone)]
pub(crate) struct EclipticTrig {
    sin_l: f64,
    cos_l: f64,
    sin_eps: f64,
    cos_eps: f64,
}

impl EclipticTrig {
    pub(crate) fn new(longitude_deg: f64, obliquity_deg: f64) -> Self {
        let l = wrap_signed_upper(longitude_deg.to_radians(), TAU);
        let (sin_l, cos_l) = l.sin_cos();
        let (sin_eps, cos_eps) = obliquity_deg.to_radians().sin_cos();
        Self {
            sin_l,
            cos_l,
            sin_eps,
            cos_eps,
        }
    }

    /// Evaluate at `t` days since J2000.0.
    #[inline]
    pub(crate) fn at(t: f64) -> Self {
        Self::new(ecliptic_longitude_deg(t), obliquity_deg(t))
    }

    /// Right ascension in radians, `(−π, π]`.
    #[inline]
    pub(crate) fn right_ascension(&self) -> f64 {
        (self.cos_eps * self.sin_l).atan2(self.cos_l)
    }

    /// Declination in radians, `[−π/2, π/2]`.
    #[inline]
    pub(crate) fn declination(&self) -> f64 {
        (self.sin_eps * self.sin_l).asin()
    }
}

/// Declination and right ascension evaluated in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialCoordinates {
    pub declination: Values,
    pub right_ascension: Values,
}

/// Right ascension of the Sun in the requested unit.
pub fn right_ascension(source: EclipticSource, units: impl IntoAngleUnit) -> Result<Values> {
    let units = units.angle_unit()?;
    let ra = source.trig()?.mapv(|e| e.right_ascension());
    Ok(AngleUnit::Radians.convert_values(ra, units))
}

/// Declination of the Sun in the requested unit.
pub fn declination(source: EclipticSource, units: impl IntoAngleUnit) -> Result<Values> {
    let units = units.angle_unit()?;
    let dec = source.trig()?.mapv(|e| e.declination());
    Ok(AngleUnit::Radians.convert_values(dec, units))
}

/// Declination and right ascension together, sharing the trigonometry of
/// `l` and `ε`.
pub fn celestial_coordinates(
    source: EclipticSource,
    units: impl IntoAngleUnit,
) -> Result<CelestialCoordinates> {
    let units = units.angle_unit()?;
    let trig = source.trig()?;
    Ok(CelestialCoordinates {
        declination: AngleUnit::Radians.convert_values(trig.mapv(|e| e.declination()), units),
        right_ascension: AngleUnit::Radians
            .convert_values(trig.mapv(|e| e.right_ascension()), units),
    })
}
