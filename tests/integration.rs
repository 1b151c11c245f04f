use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use ndarray::{array, Array1};
use sunpos::{
    as_scalar, convert, declination, earth_sun_distance, ecliptic_longitude, equation_of_time,
    hour_angle, mean_sidereal_time, right_ascension, sun_angles, to_continuous_days, AngleUnit,
    EclipticSource, Epoch, HourAngleSource, Meridian, SunposError, TimeValue, Timestamp,
};

fn j2000() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap()
}

fn scalar(v: sunpos::Result<sunpos::Values>) -> f64 {
    as_scalar(&v.unwrap()).unwrap()
}

#[test]
fn reference_epoch_is_day_zero() {
    let cet = FixedOffset::east_opt(3600).unwrap();
    let naive = NaiveDate::from_ymd_opt(2000, 1, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let representations: Vec<TimeValue> = vec![
        0.0.into(),
        vec![0.0].into(),
        j2000().into(),
        j2000().with_timezone(&cet).into(),
        naive.into(),
        "2000-01-01T12:00:00Z".into(),
        "2000-01-01T13:00:00+01:00".into(),
        vec![Timestamp::Text("2000-01-01 12:00".into())].into(),
    ];
    for time in representations {
        let days = to_continuous_days(time, &Epoch::J2000).unwrap();
        assert!(days.iter().all(|&d| d == 0.0));
    }
}

#[test]
fn unit_conversions_roundtrip() {
    let x = array![-400.0, -1.0, 0.0, 0.5, 3.25, 1000.0];
    let units = [AngleUnit::Degrees, AngleUnit::Radians, AngleUnit::Hours];
    for a in units {
        for b in units {
            let back = convert(convert(x.clone(), a, b).unwrap(), b, a).unwrap();
            for (y, x) in back.iter().zip(x.iter()) {
                assert!((y - x).abs() <= 1e-9 * x.abs().max(1.0));
            }
        }
    }
}

#[test]
fn outputs_stay_in_their_ranges() {
    let t = Array1::linspace(-18_000.0, 18_000.0, 7_201);

    let l = ecliptic_longitude(t.clone(), "deg").unwrap();
    assert!(l.iter().all(|&l| (0.0..360.0).contains(&l)));

    let local = HourAngleSource::from_time(t.clone(), Meridian::local(77.0));
    let ha = hour_angle(local, "h").unwrap();
    assert!(ha.iter().all(|&h| (-12.0..12.0).contains(&h)));

    let lat = array![[-60.0], [0.0], [35.0], [80.0]];
    let angles = sun_angles(t, lat, 12.5, "deg").unwrap();
    assert_eq!(angles.azimuth.shape(), &[4, 7_201]);
    assert!(angles.azimuth.iter().all(|&a| (0.0..360.0).contains(&a)));
    assert!(angles.zenith.iter().all(|&z| (0.0..=180.0).contains(&z)));
}

#[test]
fn declination_vanishes_at_the_equinoxes() {
    let march = Utc.with_ymd_and_hms(2024, 3, 20, 3, 6, 0).unwrap();
    let september = Utc.with_ymd_and_hms(2024, 9, 22, 12, 44, 0).unwrap();
    for equinox in [march, september] {
        let times: Vec<_> = (-4..=4).map(|q| equinox + Duration::hours(6 * q)).collect();
        let dec = declination(EclipticSource::from_time(times), "deg").unwrap();
        assert!(dec.iter().all(|d| d.abs() < 1.0), "{dec}");
    }
}

#[test]
fn vectorised_call_matches_scalar_calls() {
    let start = Utc.with_ymd_and_hms(2022, 5, 1, 0, 0, 0).unwrap();
    let times: Vec<_> = (0..48).map(|h| start + Duration::minutes(37 * h)).collect();
    let (lat, lon) = (-33.9, 18.4);

    let batch = sun_angles(times.clone(), lat, lon, AngleUnit::Radians).unwrap();
    let ra = right_ascension(EclipticSource::from_time(times.clone()), "h").unwrap();
    for (i, &when) in times.iter().enumerate() {
        let single = sun_angles(when, lat, lon, AngleUnit::Radians).unwrap();
        assert!((batch.zenith[[i]] - as_scalar(&single.zenith).unwrap()).abs() < 1e-12);
        assert!((batch.azimuth[[i]] - as_scalar(&single.azimuth).unwrap()).abs() < 1e-12);
        let ra_single = scalar(right_ascension(EclipticSource::from_time(when), "h"));
        assert!((ra[[i]] - ra_single).abs() < 1e-12);
    }
}

#[test]
fn sun_is_due_south_at_local_solar_noon() {
    let when = Utc.with_ymd_and_hms(2024, 5, 10, 15, 20, 0).unwrap();
    let gmst = scalar(mean_sidereal_time(when, Meridian::Greenwich, "h"));
    let ra = scalar(right_ascension(EclipticSource::from_time(when), "h"));
    // Longitude where the local sidereal time equals the right ascension.
    let lon = ((ra - gmst) * 15.0 + 540.0).rem_euclid(360.0) - 180.0;

    let lmst = scalar(mean_sidereal_time(when, Meridian::local(lon), "h"));
    let offset = (lmst - ra + 36.0).rem_euclid(24.0) - 12.0;
    assert!(offset.abs() < 1e-9);

    let local = HourAngleSource::from_time(when, Meridian::local(lon));
    let ha = scalar(hour_angle(local, "deg"));
    assert!(ha.abs() < 1e-6);

    let angles = sun_angles(when, 52.0, lon, "deg").unwrap();
    assert!((as_scalar(&angles.azimuth).unwrap() - 180.0).abs() < 1e-6);
}

#[test]
fn reference_vectors() {
    // Greenwich observatory, June solstice 2024 at 12:00 UTC.
    let when = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
    let angles = sun_angles(when, 51.48, 0.0, "deg").unwrap();
    assert!((as_scalar(&angles.zenith).unwrap() - 28.05).abs() < 0.1);
    assert!((as_scalar(&angles.azimuth).unwrap() - 179.06).abs() < 0.1);

    // Boulder, Colorado, a winter morning.
    let when = Utc.with_ymd_and_hms(2023, 1, 15, 15, 30, 0).unwrap();
    let angles = sun_angles(when, 40.0, -105.0, "deg").unwrap();
    assert!((as_scalar(&angles.zenith).unwrap() - 79.61).abs() < 0.1);
    assert!((as_scalar(&angles.azimuth).unwrap() - 129.15).abs() < 0.1);
}

#[test]
fn nan_time_propagates_everywhere() {
    let nan = f64::NAN;
    assert!(scalar(ecliptic_longitude(nan, "deg")).is_nan());
    assert!(scalar(declination(EclipticSource::from_time(nan), "deg")).is_nan());
    assert!(scalar(right_ascension(EclipticSource::from_time(nan), "deg")).is_nan());
    assert!(scalar(mean_sidereal_time(nan, Meridian::Greenwich, "h")).is_nan());
    let greenwich = HourAngleSource::from_time(nan, Meridian::Greenwich);
    assert!(scalar(hour_angle(greenwich, "h")).is_nan());
    assert!(scalar(equation_of_time(nan, "h")).is_nan());
    assert!(scalar(earth_sun_distance(nan)).is_nan());
    let angles = sun_angles(nan, 45.0, 7.0, "deg").unwrap();
    assert!(as_scalar(&angles.zenith).unwrap().is_nan());
    assert!(as_scalar(&angles.azimuth).unwrap().is_nan());
}

#[test]
fn errors_are_recoverable_values() {
    assert!(matches!(
        declination(EclipticSource::from_time(0.0), "gon"),
        Err(SunposError::InvalidUnit { .. })
    ));
    assert!(matches!(
        to_continuous_days("not a date", &Epoch::J2000),
        Err(SunposError::UnsupportedTimeType { .. })
    ));
    assert!(matches!(
        EclipticSource::from_parts("declination", None, None, None),
        Err(SunposError::MissingArgument { .. })
    ));
    assert!(matches!(
        sun_angles(vec![0.0, 1.0], vec![1.0, 2.0, 3.0], 0.0, "deg"),
        Err(SunposError::ShapeMismatch { .. })
    ));
}

#[cfg(feature = "serde")]
#[test]
fn serde_sun_angles_and_units() {
    let angles = sun_angles(vec![0.0, 0.5], 10.0, 20.0, AngleUnit::Degrees).unwrap();
    let json = serde_json::to_string(&angles).unwrap();
    assert!(json.contains("zenith"));
    let back: sunpos::SunAngles = serde_json::from_str(&json).unwrap();
    assert_eq!(back.zenith.shape(), angles.zenith.shape());
    assert_eq!(back.units, AngleUnit::Degrees);
    for (a, b) in back.azimuth.iter().zip(angles.azimuth.iter()) {
        assert!((a - b).abs() < 1e-12);
    }

    let unit = serde_json::to_string(&AngleUnit::Hours).unwrap();
    assert_eq!(unit, "\"hours\"");
    let json = serde_json::to_string(&Epoch::J2000).unwrap();
    let epoch: Epoch = serde_json::from_str(&json).unwrap();
    assert_eq!(epoch, Epoch::J2000);
}
