// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Ecliptic geometry of the Sun.
//!
//! Low-precision formulae of the *Astronomical Almanac* as evaluated by
//! Michalsky (1988), valid to about 0.01° over 1950–2050. `t` is the number
//! of days since J2000.0.
//!
//! ```text
//! L = 280.460° + 0.9856474° t          mean longitude
//! g = 357.528° + 0.9856003° t          mean anomaly
//! l = L + 1.915° sin g + 0.020° sin 2g ecliptic longitude, mod 360°
//! ε = 23.439° − 0.0000004° t           obliquity of the ecliptic
//! ```
//!
//! ## References
//! * United States Naval Observatory (1993), *The Astronomical Almanac*.
//! * Michalsky, J.J. (1988a), "The Astronomical Almanac's algorithm for
//!   approximate solar position (1950–2050)", Solar Energy 40(3).
//! * Michalsky, J.J. (1988b), Errata, Solar Energy 41(1).

use crate::array::{wrap_positive, Values};
use crate::error::Result;
use crate::time::{julian_days, TimeValue};
use crate::units::{AngleUnit, IntoAngleUnit};

/// Mean anomaly of the Sun, in radians.
#[inline]
pub(crate) fn mean_anomaly_rad(t: f64) -> f64 {
    (357.528 + 0.985_600_3 * t).to_radians()
}

/// Ecliptic longitude of the Sun in degrees, within `[0, 360)`.
#[inline]
pub(crate) fn ecliptic_longitude_deg(t: f64) -> f64 {
    let mean_longitude = 280.460 + 0.985_647_4 * t;
    let g = mean_anomaly_rad(t);
    let l = mean_longitude + 1.915 * g.sin() + 0.020 * (2.0 * g).sin();
    wrap_positive(l, 360.0)
}

/// Obliquity of the ecliptic in degrees.
#[inline]
pub(crate) fn obliquity_deg(t: f64) -> f64 {
    23.439 - 0.000_000_4 * t
}

/// Ecliptic longitude of the Sun in the requested unit.
///
/// The result lies in `[0°, 360°)` (or the equivalent range of `units`).
pub fn ecliptic_longitude(time: impl Into<TimeValue>, units: impl IntoAngleUnit) -> Result<Values> {
    let units = units.angle_unit()?;
    let t = julian_days(time)?;
    Ok(AngleUnit::Degrees.convert_values(t.mapv_into(ecliptic_longitude_deg), units))
}

/// Obliquity of the ecliptic in the requested unit.
pub fn obliquity_of_ecliptic(
    time: impl Into<TimeValue>,
    units: impl IntoAngleUnit,
) -> Result<Values> {
    let units = units.angle_unit()?;
    let t = julian_days(time)?;
    Ok(AngleUnit::Degrees.convert_values(t.mapv_into(obliquity_deg), units))
}
