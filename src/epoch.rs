// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Reference epoch for continuous day counts.
//!
//! An [`Epoch`] is a fixed UTC instant. A continuous day count is the signed
//! number of days (fractional part = time of day) elapsed since that
//! instant, so moving between epochs is a plain additive offset.
//!
//! The epoch is stored as whole Unix seconds plus nanoseconds so that the
//! difference to a timestamp is taken in integer seconds first and only then
//! converted to days. Subtracting two large Julian-day floats instead would
//! throw away the sub-millisecond part of the time of day.

use chrono::{DateTime, Utc};
use qtty::*;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// JD of the Unix epoch (1970-01-01T00:00:00Z).
const UNIX_EPOCH_JD: Days = Days::new(2_440_587.5);

/// A fixed reference instant on the UTC axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Epoch {
    unix_seconds: i64,
    nanos: u32,
}

impl Epoch {
    /// J2000.0: 2000-01-01T12:00:00 UTC (JD 2 451 545.0).
    pub const J2000: Self = Self {
        unix_seconds: 946_728_000,
        nanos: 0,
    };

    /// Julian Day of [`Epoch::J2000`].
    pub const J2000_JULIAN_DAY: Days = Days::new(2_451_545.0);

    /// Build an epoch from a UTC timestamp.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        Self {
            unix_seconds: datetime.timestamp(),
            nanos: datetime.timestamp_subsec_nanos(),
        }
    }

    /// Build an epoch from an absolute Julian Day.
    ///
    /// The value is rounded to the nearest nanosecond. Returns `None` when
    /// `jd` is not finite or lies outside the range of `DateTime<Utc>`.
    pub fn from_julian_day(jd: Days) -> Option<Self> {
        let min = DateTime::<Utc>::MIN_UTC.timestamp();
        let max = DateTime::<Utc>::MAX_UTC.timestamp();
        let seconds = (jd - UNIX_EPOCH_JD).to::<Second>().value();
        let whole = seconds.floor();
        if !(min as f64..=max as f64).contains(&whole) {
            return None;
        }
        let mut unix_seconds = whole as i64;
        let mut nanos = ((seconds - whole) * 1e9).round() as u32;
        if nanos >= 1_000_000_000 {
            unix_seconds += 1;
            nanos -= 1_000_000_000;
        }
        (unix_seconds <= max).then_some(Self {
            unix_seconds,
            nanos,
        })
    }

    /// Absolute Julian Day of this epoch.
    pub fn julian_day(&self) -> Days {
        UNIX_EPOCH_JD + self.since_unix_epoch().to::<Day>()
    }

    /// The epoch as a `chrono::DateTime<Utc>`.
    ///
    /// Returns `None` if it falls outside chrono's representable range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.unix_seconds, self.nanos)
    }

    /// Signed days elapsed from this epoch to `datetime`.
    pub fn days_until(&self, datetime: &DateTime<Utc>) -> f64 {
        let whole = Seconds::new((datetime.timestamp() - self.unix_seconds) as f64);
        let frac = Seconds::new(
            (i64::from(datetime.timestamp_subsec_nanos()) - i64::from(self.nanos)) as f64 / 1e9,
        );
        (whole + frac).to::<Day>().value()
    }

    /// Shift a day count referenced to `self` onto `other`.
    pub fn rebase(&self, days: f64, other: &Epoch) -> f64 {
        days + (self.julian_day() - other.julian_day()).value()
    }

    fn since_unix_epoch(&self) -> Seconds {
        Seconds::new(self.unix_seconds as f64) + Seconds::new(f64::from(self.nanos) / 1e9)
    }
}

impl Default for Epoch {
    fn default() -> Self {
        Self::J2000
    }
}

impl From<DateTime<Utc>> for Epoch {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::from_utc(datetime)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_utc() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339()),
            None => write!(f, "Julian Day: {}", self.julian_day()),
        }
    }
}
