// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Mean sidereal time, hour angle and the derived solar times.
//!
//! Greenwich mean sidereal time follows the WMO CIMO Guide (2014, ch. 7):
//!
//! ```text
//! hh  = ((t − 0.5) mod 1) × 24              UT hour of day
//! θ_g = 6.697375 + 0.0657098242 t + hh      hours
//! θ_l = θ_g + λ / 15                        λ = east longitude in degrees
//! ```
//!
//! Sidereal times are reduced into `[0, 24)` hours. Hour angles always use
//! `H = ((θ − α + 12) mod 24) − 12`, i.e. the range `[−12, 12)` hours; every
//! consumer in the crate goes through [`hour_angle`] or the same helper.

use crate::array::{wrap_positive, wrap_signed, zip_with, IntoValues, Values};
use crate::epoch::Epoch;
use crate::equatorial::EclipticTrig;
use crate::error::Result;
use crate::time::TimeValue;
use crate::units::{AngleUnit, IntoAngleUnit};

/// The meridian a sidereal time or hour angle is referred to.
#[derive(Debug, Clone, PartialEq)]
pub enum Meridian {
    Greenwich,
    /// East longitude in degrees; broadcast against the time array.
    Local(Values),
}

impl Meridian {
    pub fn local(longitude_deg: impl IntoValues) -> Self {
        Self::Local(longitude_deg.into_values())
    }
}

/// Greenwich mean sidereal time in hours, not yet reduced.
#[inline]
fn greenwich_sidereal_hours_unwrapped(t: f64) -> f64 {
    let hh = wrap_positive(t - 0.5, 1.0) * 24.0;
    6.697_375 + 0.065_709_824_2 * t + hh
}

/// Greenwich mean sidereal time in hours, `[0, 24)`.
#[inline]
pub(crate) fn greenwich_sidereal_hours(t: f64) -> f64 {
    wrap_positive(greenwich_sidereal_hours_unwrapped(t), 24.0)
}

/// Right ascension in hours, `(−12, 12]`.
#[inline]
fn right_ascension_hours(t: f64) -> f64 {
    AngleUnit::Radians.convert_value(EclipticTrig::at(t).right_ascension(), AngleUnit::Hours)
}

/// `θ_g − α` in hours, `[−12, 12)`.
#[inline]
fn greenwich_hour_angle_hours(t: f64) -> f64 {
    wrap_signed(greenwich_sidereal_hours(t) - right_ascension_hours(t), 24.0)
}

fn sidereal_hours(t: &Values, meridian: &Meridian) -> Result<Values> {
    match meridian {
        Meridian::Greenwich => Ok(t.mapv(greenwich_sidereal_hours)),
        Meridian::Local(lon) => zip_with(t, lon, |&t, &lon| {
            wrap_positive(greenwich_sidereal_hours_unwrapped(t) + lon / 15.0, 24.0)
        }),
    }
}

/// Greenwich (`Meridian::Greenwich`) or local mean sidereal time.
///
/// The value is reduced into `[0h, 24h)` before conversion to `units`.
pub fn mean_sidereal_time(
    time: impl Into<TimeValue>,
    meridian: Meridian,
    units: impl IntoAngleUnit,
) -> Result<Values> {
    let units = units.angle_unit()?;
    let t = time.into().to_continuous_days(&Epoch::J2000)?;
    let mst = sidereal_hours(&t, &meridian)?;
    Ok(AngleUnit::Hours.convert_values(mst, units))
}

// ═══════════════════════════════════════════════════════════════════════════
// Hour angle
// ═══════════════════════════════════════════════════════════════════════════

/// Inputs to [`hour_angle`]: a time, or a precomputed sidereal time and
/// right ascension.
#[derive(Debug, Clone, PartialEq)]
pub enum HourAngleSource {
    Time {
        time: TimeValue,
        meridian: Meridian,
    },
    /// Both angles expressed in `unit`.
    Angles {
        sidereal_time: Values,
        right_ascension: Values,
        unit: AngleUnit,
    },
}

impl HourAngleSource {
    pub fn from_time(time: impl Into<TimeValue>, meridian: Meridian) -> Self {
        Self::Time {
            time: time.into(),
            meridian,
        }
    }

    pub fn from_angles(
        sidereal_time: impl IntoValues,
        right_ascension: impl IntoValues,
        unit: impl IntoAngleUnit,
    ) -> Result<Self> {
        Ok(Self::Angles {
            sidereal_time: sidereal_time.into_values(),
            right_ascension: right_ascension.into_values(),
            unit: unit.angle_unit()?,
        })
    }

    fn hours(&self) -> Result<Values> {
        match self {
            Self::Time { time, meridian } => {
                let t = time.to_continuous_days(&Epoch::J2000)?;
                let mst = sidereal_hours(&t, meridian)?;
                let ra = t.mapv(right_ascension_hours);
                zip_with(&mst, &ra, |&m, &a| wrap_signed(m - a, 24.0))
            }
            Self::Angles {
                sidereal_time,
                right_ascension,
                unit,
            } => zip_with(sidereal_time, right_ascension, |&m, &a| {
                wrap_signed(unit.convert_value(m - a, AngleUnit::Hours), 24.0)
            }),
        }
    }
}

/// Greenwich or local hour angle of the Sun, within `[−12h, 12h)`
/// (`[−180°, 180°)`, `[−π, π)`).
pub fn hour_angle(source: HourAngleSource, units: impl IntoAngleUnit) -> Result<Values> {
    let units = units.angle_unit()?;
    Ok(AngleUnit::Hours.convert_values(source.hours()?, units))
}

/// `θ_g − α`, wrapped into `[−12h, 12h)`.
pub fn equation_of_time(time: impl Into<TimeValue>, units: impl IntoAngleUnit) -> Result<Values> {
    let units = units.angle_unit()?;
    let t = time.into().to_continuous_days(&Epoch::J2000)?;
    let eot = t.mapv_into(greenwich_hour_angle_hours);
    Ok(AngleUnit::Hours.convert_values(eot, units))
}

/// Greenwich or local apparent solar time, `[0h, 24h)`.
///
/// Apparent (sundial) time is the hour angle of the Sun plus twelve hours:
/// it reads 12h when the Sun crosses the meridian.
pub fn apparent_time(
    time: impl Into<TimeValue>,
    meridian: Meridian,
    units: impl IntoAngleUnit,
) -> Result<Values> {
    let units = units.angle_unit()?;
    let ha = HourAngleSource::from_time(time, meridian).hours()?;
    Ok(AngleUnit::Hours.convert_values(ha.mapv_into(|h| wrap_positive(h + 12.0, 24.0)), units))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::as_scalar;
    use crate::equatorial::{right_ascension, EclipticSource};
    use crate::error::SunposError;
    use chrono::{TimeZone, Utc};
    use ndarray::{array, Array1};

    fn scalar(v: Result<Values>) -> f64 {
        as_scalar(&v.unwrap()).unwrap()
    }

    #[test]
    fn gmst_at_j2000_noon() {
        // t = 0 → hh = 12 → 18.697375 h
        let gmst = scalar(mean_sidereal_time(0.0, Meridian::Greenwich, "h"));
        assert!((gmst - 18.697_375).abs() < 1e-12);
        let deg = scalar(mean_sidereal_time(0.0, Meridian::Greenwich, "deg"));
        assert!((deg - 280.460_625).abs() < 1e-9);
    }

    #[test]
    fn day_boundary_is_independent_of_sign() {
        // Midnight UT on either side of the epoch → hh = 0.
        let t = array![-0.5, 0.5, -1000.5].into_dyn();
        let gmst = mean_sidereal_time(t.clone(), Meridian::Greenwich, "h").unwrap();
        for (g, &t) in gmst.iter().zip(t.iter()) {
            let expected = wrap_positive(6.697_375 + 0.065_709_824_2 * t, 24.0);
            assert!((g - expected).abs() < 1e-9, "t = {t}");
        }
    }

    #[test]
    fn zero_longitude_is_a_real_meridian() {
        let t = 1234.567;
        let g = scalar(mean_sidereal_time(t, Meridian::Greenwich, "h"));
        let l = scalar(mean_sidereal_time(t, Meridian::local(0.0), "h"));
        assert_eq!(g, l);
        let east = scalar(mean_sidereal_time(t, Meridian::local(45.0), "h"));
        assert!((wrap_signed(east - g, 24.0) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn local_sidereal_time_broadcasts_longitudes() {
        let t = array![[0.0], [0.25]];
        let lon = array![-90.0, 0.0, 90.0, 180.0].into_dyn();
        let lmst = mean_sidereal_time(t, Meridian::Local(lon), "deg").unwrap();
        assert_eq!(lmst.shape(), &[2, 4]);
        assert!(lmst.iter().all(|&x| (0.0..360.0).contains(&x)));
    }

    #[test]
    fn hour_angle_is_in_range_for_any_time() {
        let t = Array1::linspace(-40_000.0, 40_000.0, 50_001);
        let greenwich = HourAngleSource::from_time(t.clone(), Meridian::Greenwich);
        let ha = hour_angle(greenwich, "h").unwrap();
        assert!(ha.iter().all(|&h| (-12.0..12.0).contains(&h)));
        let local = HourAngleSource::from_time(t, Meridian::local(-123.4));
        let ha = hour_angle(local, "deg").unwrap();
        assert!(ha.iter().all(|&h| (-180.0..180.0).contains(&h)));
    }

    #[test]
    fn hour_angle_from_angles_wraps() {
        let mst = array![23.5, 0.5, 12.0];
        let ra = array![0.5, 23.5, 0.0];
        let source = HourAngleSource::from_angles(mst, ra, "h").unwrap();
        let ha = hour_angle(source, AngleUnit::Hours).unwrap();
        assert!((ha[[0]] + 1.0).abs() < 1e-12);
        assert!((ha[[1]] - 1.0).abs() < 1e-12);
        assert_eq!(ha[[2]], -12.0);

        let source = HourAngleSource::from_angles(30.0, -60.0, AngleUnit::Degrees).unwrap();
        let ha = scalar(hour_angle(source, AngleUnit::Radians));
        assert!((ha - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn hour_angle_modes_agree() {
        let when = Utc.with_ymd_and_hms(2019, 3, 14, 15, 9, 26).unwrap();
        let mst = mean_sidereal_time(when, Meridian::local(13.4), "rad").unwrap();
        let ra = right_ascension(EclipticSource::from_time(when), "rad").unwrap();
        let from_angles = scalar(hour_angle(
            HourAngleSource::from_angles(mst, ra, "rad").unwrap(),
            "h",
        ));
        let from_time = scalar(hour_angle(
            HourAngleSource::from_time(when, Meridian::local(13.4)),
            "h",
        ));
        assert!((from_angles - from_time).abs() < 1e-9);
    }

    #[test]
    fn hour_angle_honours_requested_unit() {
        let source = || HourAngleSource::from_time(500.25, Meridian::local(10.0));
        let h = scalar(hour_angle(source(), "h"));
        let r = scalar(hour_angle(source(), "rad"));
        assert!((h * std::f64::consts::PI / 12.0 - r).abs() < 1e-12);
    }

    #[test]
    fn equation_of_time_is_wrapped_greenwich_difference() {
        let t = Array1::linspace(-3_650.0, 3_650.0, 7_301);
        let eot = equation_of_time(t.clone(), "h").unwrap();
        let greenwich = HourAngleSource::from_time(t, Meridian::Greenwich);
        let gha = hour_angle(greenwich, "h").unwrap();
        for (e, g) in eot.iter().zip(gha.iter()) {
            assert!((-12.0..12.0).contains(e));
            assert!((e - g).abs() < 1e-12);
        }
    }

    #[test]
    fn apparent_time_tracks_clock_time() {
        // Early November: the sundial runs about 16 minutes ahead of UT.
        let noon = Utc.with_ymd_and_hms(2021, 11, 3, 12, 0, 0).unwrap();
        let gat = scalar(apparent_time(noon, Meridian::Greenwich, "h"));
        assert!((gat - 12.0 - 16.4 / 60.0).abs() < 2.0 / 60.0, "gat = {gat}");

        // Mid-February: about 14 minutes behind.
        let noon = Utc.with_ymd_and_hms(2021, 2, 11, 12, 0, 0).unwrap();
        let gat = scalar(apparent_time(noon, Meridian::Greenwich, "h"));
        assert!((gat - 12.0 + 14.2 / 60.0).abs() < 2.0 / 60.0, "gat = {gat}");
    }

    #[test]
    fn local_apparent_time_shifts_with_longitude() {
        let t = 8_000.1;
        let gat = scalar(apparent_time(t, Meridian::Greenwich, "h"));
        let lat = scalar(apparent_time(t, Meridian::local(30.0), "h"));
        assert!((wrap_signed(lat - gat, 24.0) - 2.0).abs() < 1e-9);
        assert!((0.0..24.0).contains(&lat));
    }

    #[test]
    fn invalid_unit_and_shape_errors() {
        let greenwich = HourAngleSource::from_time(0.0, Meridian::Greenwich);
        assert!(matches!(
            hour_angle(greenwich, "turns"),
            Err(SunposError::InvalidUnit { .. })
        ));
        assert!(matches!(
            HourAngleSource::from_angles(1.0, 2.0, "grad"),
            Err(SunposError::InvalidUnit { .. })
        ));
        assert!(matches!(
            mean_sidereal_time(vec![0.0, 1.0], Meridian::local(vec![0.0, 1.0, 2.0]), "h"),
            Err(SunposError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn nan_propagates() {
        assert!(scalar(mean_sidereal_time(f64::NAN, Meridian::Greenwich, "h")).is_nan());
        assert!(scalar(mean_sidereal_time(1.0, Meridian::local(f64::NAN), "h")).is_nan());
        assert!(scalar(equation_of_time(f64::NAN, "h")).is_nan());
        assert!(scalar(apparent_time(f64::NAN, Meridian::Greenwich, "h")).is_nan());
        let greenwich = HourAngleSource::from_time(f64::NAN, Meridian::Greenwich);
        assert!(scalar(hour_angle(greenwich, "deg")).is_nan());
    }
}
