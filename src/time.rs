// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time normalization.
//!
//! Every ephemeris function accepts a [`TimeValue`] and reduces it to a
//! continuous day count relative to an [`Epoch`] before doing any
//! astronomy. Two representations are accepted:
//!
//! - **Day counts** — `f64` scalars or arrays, already interpreted as days
//!   since the epoch and passed through unchanged.
//! - **Calendar timestamps** — a single [`Timestamp`] or an array of them.
//!   Mixed timestamp flavours (UTC, fixed offset, naive, ISO-8601 text) are
//!   coerced element-wise to `DateTime<Utc>` and converted to days.
//!
//! Normalization is shape-preserving: `N` timestamps give `N` day counts in
//! the same shape, a scalar gives a 0-dimensional array.

use crate::array::{IntoValues, Values};
use crate::epoch::Epoch;
use crate::error::{Result, SunposError};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use ndarray::{arr0, Array, ArrayD, ArrayView, Dimension};

/// `strftime` layouts accepted for naive (zone-less) timestamp text.
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

// ═══════════════════════════════════════════════════════════════════════════
// Timestamp
// ═══════════════════════════════════════════════════════════════════════════

/// One calendar timestamp in any of the supported flavours.
///
/// Naive values and zone-less text are taken to be UTC.
#[derive(Debug, Clone, PartialEq)]
pub enum Timestamp {
    Utc(DateTime<Utc>),
    Offset(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
    /// RFC 3339 / ISO-8601 text, e.g. `"2000-01-01T12:00"`.
    Text(String),
}

impl Timestamp {
    /// Coerce to a UTC instant.
    ///
    /// Fails with [`SunposError::UnsupportedTimeType`] if text cannot be
    /// read as a timestamp.
    pub fn to_utc(&self) -> Result<DateTime<Utc>> {
        match self {
            Self::Utc(dt) => Ok(*dt),
            Self::Offset(dt) => Ok(dt.with_timezone(&Utc)),
            Self::Naive(dt) => Ok(dt.and_utc()),
            Self::Text(text) => parse_timestamp(text),
        }
    }
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    let text = text.strip_suffix('Z').unwrap_or(text);
    for layout in NAIVE_LAYOUTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, layout) {
            return Ok(dt.and_utc());
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }
    log::debug!("cannot read {text:?} as a timestamp");
    Err(SunposError::unsupported_time(format!(
        "{text:?} is not a recognised timestamp"
    )))
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Utc(dt)
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::Offset(dt)
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Self::Naive(dt)
    }
}

impl From<&str> for Timestamp {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Timestamp {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TimeValue
// ═══════════════════════════════════════════════════════════════════════════

/// Any time representation accepted by the ephemeris functions.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeValue {
    /// Continuous days since the epoch.
    Days(Values),
    /// Calendar timestamps, any rank.
    Timestamps(ArrayD<Timestamp>),
}

impl TimeValue {
    /// Shape of the represented array (empty for a scalar).
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Days(days) => days.shape(),
            Self::Timestamps(stamps) => stamps.shape(),
        }
    }

    /// Continuous days since `epoch`, in the shape of the input.
    ///
    /// Day counts are returned unchanged; timestamps are converted
    /// element-wise.
    pub fn to_continuous_days(&self, epoch: &Epoch) -> Result<Values> {
        match self {
            Self::Days(days) => Ok(days.clone()),
            Self::Timestamps(stamps) => {
                log::debug!(
                    "normalising {} timestamp(s) of shape {:?} against epoch {}",
                    stamps.len(),
                    stamps.shape(),
                    epoch
                );
                let mut days = Values::zeros(stamps.raw_dim());
                for (slot, stamp) in days.iter_mut().zip(stamps.iter()) {
                    *slot = epoch.days_until(&stamp.to_utc()?);
                }
                Ok(days)
            }
        }
    }
}

/// Continuous days since `epoch` for any supported time representation.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use sunpos::{as_scalar, to_continuous_days, Epoch};
///
/// let noon = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
/// let days = to_continuous_days(noon, &Epoch::J2000).unwrap();
/// assert_eq!(as_scalar(&days), Some(0.0));
/// ```
pub fn to_continuous_days(time: impl Into<TimeValue>, epoch: &Epoch) -> Result<Values> {
    time.into().to_continuous_days(epoch)
}

/// Days since J2000.0, the timeline every almanac formula is written on.
pub(crate) fn julian_days(time: impl Into<TimeValue>) -> Result<Values> {
    to_continuous_days(time, &Epoch::J2000)
}

// ── day-count conversions ─────────────────────────────────────────────────

macro_rules! impl_days_from {
    ($($t:ty),+ $(,)?) => {
        $(
            impl From<$t> for TimeValue {
                #[inline]
                fn from(days: $t) -> Self {
                    Self::Days(days.into_values())
                }
            }
        )+
    };
}

impl_days_from!(f64, Vec<f64>, &[f64]);

impl<const N: usize> From<[f64; N]> for TimeValue {
    fn from(days: [f64; N]) -> Self {
        Self::Days(days.into_values())
    }
}

impl<D: Dimension> From<Array<f64, D>> for TimeValue {
    fn from(days: Array<f64, D>) -> Self {
        Self::Days(days.into_dyn())
    }
}

impl<'a, D: Dimension> From<ArrayView<'a, f64, D>> for TimeValue {
    fn from(days: ArrayView<'a, f64, D>) -> Self {
        Self::Days(days.to_owned().into_dyn())
    }
}

// ── timestamp conversions ─────────────────────────────────────────────────

impl From<Timestamp> for TimeValue {
    fn from(stamp: Timestamp) -> Self {
        Self::Timestamps(arr0(stamp).into_dyn())
    }
}

macro_rules! impl_timestamp_from {
    ($($t:ty),+ $(,)?) => {
        $(
            impl From<$t> for TimeValue {
                #[inline]
                fn from(stamp: $t) -> Self {
                    Timestamp::from(stamp).into()
                }
            }

            impl From<Vec<$t>> for TimeValue {
                fn from(stamps: Vec<$t>) -> Self {
                    stamps.into_iter().map(Timestamp::from).collect::<Vec<_>>().into()
                }
            }
        )+
    };
}

impl_timestamp_from!(DateTime<Utc>, DateTime<FixedOffset>);
impl_timestamp_from!(NaiveDateTime, &str, String);

impl From<Vec<Timestamp>> for TimeValue {
    fn from(stamps: Vec<Timestamp>) -> Self {
        Self::Timestamps(Array::from(stamps).into_dyn())
    }
}

impl<D: Dimension> From<Array<Timestamp, D>> for TimeValue {
    fn from(stamps: Array<Timestamp, D>) -> Self {
        Self::Timestamps(stamps.into_dyn())
    }
}

impl<D: Dimension> From<Array<DateTime<Utc>, D>> for TimeValue {
    fn from(stamps: Array<DateTime<Utc>, D>) -> Self {
        Self::Timestamps(stamps.mapv(Timestamp::Utc).into_dyn())
    }
}
