// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Solar Position
//!
//! Vectorised low-precision solar ephemeris after the *Astronomical Almanac*
//! algorithm evaluated by Michalsky (1988). Accuracy is about 0.01° between
//! 1950 and 2050.
//!
//! # Inputs
//!
//! - **Time** is anything convertible into a [`TimeValue`]: a continuous day
//!   count since J2000.0 (`f64`, vectors, `ndarray` arrays) or calendar
//!   timestamps ([`chrono`] values, ISO-8601 text, or arrays of them).
//! - **Angles in** (latitude, longitude, precomputed ecliptic angles) are
//!   degrees unless the operation takes an explicit [`AngleUnit`].
//! - **Angles out** are always in the unit the caller names, via
//!   [`AngleUnit`] or one of its string aliases (`"deg"`, `"rad"`, `"h"`).
//!
//! Every output is a [`Values`] array on the broadcast shape of the inputs;
//! scalars give 0-dimensional arrays, see [`as_scalar`].
//!
//! # Operations
//!
//! | Function | Quantity |
//! |----------|----------|
//! | [`convert`] | angle unit conversion |
//! | [`to_continuous_days`] | time normalization |
//! | [`ecliptic_longitude`], [`obliquity_of_ecliptic`] | ecliptic geometry |
//! | [`right_ascension`], [`declination`], [`celestial_coordinates`] | equatorial coordinates |
//! | [`mean_sidereal_time`], [`hour_angle`] | sidereal time |
//! | [`equation_of_time`], [`apparent_time`] | solar time |
//! | [`sun_angles`] | topocentric zenith and azimuth |
//! | [`earth_sun_distance`] | distance in AU |
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use sunpos::{as_scalar, declination, EclipticSource};
//!
//! let solstice = Utc.with_ymd_and_hms(2020, 6, 20, 21, 44, 0).unwrap();
//! let dec = declination(EclipticSource::from_time(solstice), "deg").unwrap();
//! assert!((as_scalar(&dec).unwrap() - 23.44).abs() < 0.01);
//! ```

mod array;
pub mod bits;
mod distance;
mod ecliptic;
mod epoch;
mod equatorial;
mod error;
mod sidereal;
mod time;
mod topocentric;
mod units;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use array::{as_scalar, broadcast_shape, sincos, IntoValues, Values};
pub use distance::earth_sun_distance;
pub use ecliptic::{ecliptic_longitude, obliquity_of_ecliptic};
pub use epoch::Epoch;
pub use equatorial::{
    celestial_coordinates, declination, right_ascension, CelestialCoordinates, EclipticSource,
};
pub use error::{Result, SunposError};
pub use sidereal::{
    apparent_time, equation_of_time, hour_angle, mean_sidereal_time, HourAngleSource, Meridian,
};
pub use time::{to_continuous_days, TimeValue, Timestamp};
pub use topocentric::{sun_angles, SunAngles};
pub use units::{convert, AngleUnit, IntoAngleUnit};
