// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Topocentric zenith and azimuth angles of the Sun.
//!
//! For an observer at latitude `φ` and east longitude `λ`, with the Greenwich
//! hour angle `gha = θ_g − α` of the Sun:
//!
//! ```text
//! sin H = sin gha · cos λ + cos gha · sin λ
//! cos H = cos gha · cos λ − sin gha · sin λ
//! cos ζ = sin δ · sin φ + cos δ · cos φ · cos H
//! sin A = −cos δ · sin H
//! cos A = (sin δ − cos ζ · sin φ) / cos φ
//! ```
//!
//! The azimuth is measured clockwise from north and reduced into `[0, 2π)`:
//! at local solar noon it reads 180° when the observer is north of the
//! sub-solar point. At the poles the azimuth is undefined: the division by
//! `cos φ` is carried out anyway and its result (large, `±∞` or `NaN`) is
//! returned without an error.

use crate::array::{wrap_positive, zip_with3, IntoValues, Values};
use crate::epoch::Epoch;
use crate::equatorial::EclipticTrig;
use crate::error::Result;
use crate::sidereal::greenwich_sidereal_hours;
use crate::time::TimeValue;
use crate::units::{AngleUnit, IntoAngleUnit};
use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Zenith and azimuth angles on the broadcast shape of time, latitude and
/// longitude.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SunAngles {
    pub zenith: Values,
    pub azimuth: Values,
    /// Unit of both angle arrays.
    pub units: AngleUnit,
}

impl SunAngles {
    /// Solar elevation above the horizon, `90° − ζ`, in [`SunAngles::units`].
    pub fn elevation(&self) -> Values {
        let right_angle = self.units.full_turn() / 4.0;
        self.zenith.mapv(|z| right_angle - z)
    }
}

/// Per-instant quantities that do not depend on the observer.
#[derive(Debug, Copy, Clone)]
struct SolarTrig {
    sin_gha: f64,
    cos_gha: f64,
    sin_dec: f64,
    cos_dec: f64,
}

impl SolarTrig {
    fn at(t: f64) -> Self {
        let ecliptic = EclipticTrig::at(t);
        let gmst = AngleUnit::Hours.convert_value(greenwich_sidereal_hours(t), AngleUnit::Radians);
        let (sin_gha, cos_gha) = (gmst - ecliptic.right_ascension()).sin_cos();
        let (sin_dec, cos_dec) = ecliptic.declination().sin_cos();
        Self {
            sin_gha,
            cos_gha,
            sin_dec,
            cos_dec,
        }
    }

    /// `(ζ, A)` in radians for an observer with the given `sin_cos` of
    /// latitude and longitude.
    fn zenith_azimuth(
        &self,
        (sin_lat, cos_lat): (f64, f64),
        (sin_lon, cos_lon): (f64, f64),
    ) -> (f64, f64) {
        let sin_ha = self.sin_gha * cos_lon + self.cos_gha * sin_lon;
        let cos_ha = self.cos_gha * cos_lon - self.sin_gha * sin_lon;

        let cos_zenith = self.sin_dec * sin_lat + self.cos_dec * cos_lat * cos_ha;
        // Rounding can push |cos ζ| a hair past 1 when the Sun is at the zenith.
        let zenith = cos_zenith.clamp(-1.0, 1.0).acos();

        let sin_az = -self.cos_dec * sin_ha;
        let cos_az = (self.sin_dec - cos_zenith * sin_lat) / cos_lat;
        let azimuth = wrap_positive(sin_az.atan2(cos_az), TAU);
        (zenith, azimuth)
    }
}

/// Zenith and azimuth of the Sun seen from `(latitude, longitude)`.
///
/// `latitude_deg` and `longitude_deg` are in degrees (north and east
/// positive). Time, latitude and longitude broadcast against each other;
/// both outputs are reported in `units`.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use sunpos::{sun_angles, as_scalar};
///
/// let when = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
/// let angles = sun_angles(when, 51.48, 0.0, "deg").unwrap();
/// let zenith = as_scalar(&angles.zenith).unwrap();
/// assert!((zenith - 28.1).abs() < 0.5);
/// ```
pub fn sun_angles(
    time: impl Into<TimeValue>,
    latitude_deg: impl IntoValues,
    longitude_deg: impl IntoValues,
    units: impl IntoAngleUnit,
) -> Result<SunAngles> {
    let units = units.angle_unit()?;
    let t = time.into().to_continuous_days(&Epoch::J2000)?;
    let solar = t.mapv(SolarTrig::at);
    let lat = latitude_deg
        .into_values()
        .mapv(|phi| phi.to_radians().sin_cos());
    let lon = longitude_deg
        .into_values()
        .mapv(|lambda| lambda.to_radians().sin_cos());

    let both = zip_with3(&solar, &lat, &lon, |s, &lat, &lon| {
        s.zenith_azimuth(lat, lon)
    })?;
    let zenith = both.mapv(|(z, _)| z);
    let azimuth = both.mapv(|(_, a)| a);
    Ok(SunAngles {
        zenith: AngleUnit::Radians.convert_values(zenith, units),
        azimuth: AngleUnit::Radians.convert_values(azimuth, units),
        units,
    })
}
