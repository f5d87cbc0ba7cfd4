//! WGS84 to web mercator (EPSG:3857) projection.

use std::f64::consts::FRAC_PI_4;

use wind_map_turbine_models::Position;

/// Semi-major axis of the WGS84 ellipsoid, used as the sphere radius of
/// the spherical mercator projection.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Latitude at which the projected map becomes square. Points beyond are
/// clamped to it.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Projects a latitude/longitude pair to `(x, y)` metres.
#[must_use]
pub fn to_web_mercator(lat: f64, lon: f64) -> (f64, f64) {
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let x = EARTH_RADIUS_M * lon.to_radians();
    let y = EARTH_RADIUS_M * (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
    (x, y)
}

/// Builds a [`Position`] from WGS84 coordinates.
#[must_use]
pub fn position(lat: f64, lon: f64) -> Position {
    let (x, y) = to_web_mercator(lat, lon);
    Position { lat, lon, x, y }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF_WORLD: f64 = 20_037_508.342_789_244;

    #[test]
    fn origin_maps_to_origin() {
        let (x, y) = to_web_mercator(0.0, 0.0);
        assert!(x.abs() < 1e-9);
        assert!(y.abs() < 1e-9);
    }

    #[test]
    fn antimeridian_and_max_latitude_hit_the_square_edge() {
        let (x, y) = to_web_mercator(MAX_LATITUDE, 180.0);
        assert!((x - HALF_WORLD).abs() < 1e-6);
        assert!((y - HALF_WORLD).abs() < 1e-3);
    }

    #[test]
    fn clamps_polar_latitudes() {
        let (_, y) = to_web_mercator(90.0, 0.0);
        assert!(y.is_finite());
        assert!((y - HALF_WORLD).abs() < 1e-3);
    }

    #[test]
    fn projects_a_north_sea_point() {
        // Reference values from EPSG:4326 -> EPSG:3857.
        let p = position(51.5, 3.0);
        assert!((p.x - 333_958.472_379_821_5).abs() < 1e-3);
        assert!((p.y - 6_710_219.083_220_7).abs() < 1.0);
    }
}
