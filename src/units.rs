// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Angle units.
//!
//! Every public function in the crate states the unit of its angular output
//! explicitly through an [`AngleUnit`]. Units are never inferred from the
//! magnitude of a value.
//!
//! | Unit | Aliases | One full turn |
//! |------|---------|---------------|
//! | [`AngleUnit::Degrees`] | `"degrees"`, `"deg"`, `"d"` | 360 |
//! | [`AngleUnit::Radians`] | `"radians"`, `"rad"`, `"r"` | 2π |
//! | [`AngleUnit::Hours`]   | `"hours"`, `"hr"`, `"h"`   | 24 |
//!
//! Conversion factors are exact: `1 h = 15° = π/12 rad`. They are taken from
//! the `qtty` unit definitions ([`Degree`], [`Radian`], [`HourAngle`]).

use crate::array::{IntoValues, Values};
use crate::error::{Result, SunposError};
use qtty::{Degree, Degrees, HourAngle, HourAngles, Radian, Radians};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unit of an angular quantity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AngleUnit {
    Degrees,
    Radians,
    Hours,
}

impl AngleUnit {
    /// One full revolution expressed in this unit.
    pub fn full_turn(self) -> f64 {
        match self {
            Self::Degrees => 360.0,
            Self::Radians => std::f64::consts::TAU,
            Self::Hours => 24.0,
        }
    }

    /// Convert a single value from `self` to `to`.
    #[inline]
    pub fn convert_value(self, x: f64, to: AngleUnit) -> f64 {
        use AngleUnit as U;
        match (self, to) {
            (U::Degrees, U::Radians) => Degrees::new(x).to::<Radian>().value(),
            (U::Degrees, U::Hours) => Degrees::new(x).to::<HourAngle>().value(),
            (U::Radians, U::Degrees) => Radians::new(x).to::<Degree>().value(),
            (U::Radians, U::Hours) => Radians::new(x).to::<HourAngle>().value(),
            (U::Hours, U::Degrees) => HourAngles::new(x).to::<Degree>().value(),
            (U::Hours, U::Radians) => HourAngles::new(x).to::<Radian>().value(),
            (U::Degrees, U::Degrees) | (U::Radians, U::Radians) | (U::Hours, U::Hours) => x,
        }
    }

    /// Convert a whole array from `self` to `to`.
    ///
    /// The identity conversion returns the input untouched.
    pub fn convert_values(self, x: Values, to: AngleUnit) -> Values {
        if self == to {
            x
        } else {
            x.mapv_into(|v| self.convert_value(v, to))
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Degrees => "degrees",
            Self::Radians => "radians",
            Self::Hours => "hours",
        };
        f.write_str(name)
    }
}

impl FromStr for AngleUnit {
    type Err = SunposError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEGREES" | "DEG" | "D" => Ok(Self::Degrees),
            "RADIANS" | "RAD" | "R" => Ok(Self::Radians),
            "HOURS" | "HR" | "H" => Ok(Self::Hours),
            _ => {
                log::debug!("rejecting unknown angle unit {s:?}");
                Err(SunposError::invalid_unit(s))
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// IntoAngleUnit
// ═══════════════════════════════════════════════════════════════════════════

/// Anything that names an angle unit: the enum itself or a unit name.
///
/// Names are matched case-insensitively; an unknown name yields
/// [`SunposError::InvalidUnit`].
pub trait IntoAngleUnit {
    fn angle_unit(&self) -> Result<AngleUnit>;
}

impl IntoAngleUnit for AngleUnit {
    #[inline]
    fn angle_unit(&self) -> Result<AngleUnit> {
        Ok(*self)
    }
}

impl IntoAngleUnit for &str {
    fn angle_unit(&self) -> Result<AngleUnit> {
        self.parse()
    }
}

impl IntoAngleUnit for String {
    fn angle_unit(&self) -> Result<AngleUnit> {
        self.parse()
    }
}

impl IntoAngleUnit for &String {
    fn angle_unit(&self) -> Result<AngleUnit> {
        self.parse()
    }
}

/// Convert `x` between any pair of angle units.
///
/// ```
/// use sunpos::{as_scalar, convert, AngleUnit};
///
/// let deg = convert(6.0, AngleUnit::Hours, "degrees").unwrap();
/// assert!((as_scalar(&deg).unwrap() - 90.0).abs() < 1e-12);
/// ```
pub fn convert(
    x: impl IntoValues,
    from: impl IntoAngleUnit,
    to: impl IntoAngleUnit,
) -> Result<Values> {
    let from = from.angle_unit()?;
    let to = to.angle_unit()?;
    Ok(from.convert_values(x.into_values(), to))
}
