// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Earth–Sun distance.

use crate::array::Values;
use crate::ecliptic::mean_anomaly_rad;
use crate::error::Result;
use crate::time::{julian_days, TimeValue};

/// Earth–Sun distance in astronomical units.
///
/// `R = 1.00014 − 0.01671 cos g + 0.00014 cos 2g`, with `g` the mean anomaly.
pub fn earth_sun_distance(time: impl Into<TimeValue>) -> Result<Values> {
    let t = julian_days(time)?;
    Ok(t.mapv_into(|t| {
        let g = mean_anomaly_rad(t);
        1.000_14 - 0.016_71 * g.cos() + 0.000_14 * (2.0 * g).cos()
    }))
}
