use chrono::{Duration, Utc};
use sunpos::{
    as_scalar, celestial_coordinates, earth_sun_distance, equation_of_time, sun_angles, AngleUnit,
    EclipticSource, Values,
};

fn main() -> sunpos::Result<()> {
    let now = Utc::now();
    let (lat, lon) = (48.137, 11.575);

    let coords = celestial_coordinates(EclipticSource::from_time(now), AngleUnit::Degrees)?;
    let angles = sun_angles(now, lat, lon, AngleUnit::Degrees)?;
    let distance = earth_sun_distance(now)?;
    let eot = equation_of_time(now, AngleUnit::Hours)?;

    let value = |v: &Values| as_scalar(v).unwrap_or(f64::NAN);
    println!("UTC:             {now}");
    println!("declination:     {:.3}°", value(&coords.declination));
    println!("right ascension: {:.3}°", value(&coords.right_ascension));
    println!("zenith:          {:.3}°", value(&angles.zenith));
    println!("azimuth:         {:.3}°", value(&angles.azimuth));
    println!("distance:        {:.5} AU", value(&distance));
    println!("θg − α:          {:.4} h", value(&eot));

    let day: Vec<_> = (0..24).map(|h| now + Duration::hours(h)).collect();
    let track = sun_angles(day, lat, lon, AngleUnit::Degrees)?;
    println!("\nnext 24 hours (zenith, azimuth):");
    for (h, (z, a)) in track.zenith.iter().zip(track.azimuth.iter()).enumerate() {
        println!("  +{h:02}h  {z:7.2}°  {a:7.2}°");
    }
    Ok(())
}
