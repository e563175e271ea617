//! Great-circle distance on a spherical Earth.

use crate::models::Location;

/// Mean Earth radius in miles used by every distance computation.
pub const EARTH_RADIUS_MILES: f64 = 3958.76;

/// Haversine distance in miles between two points given in decimal degrees.
///
/// Non-numeric input (NaN) propagates to the result; callers validate
/// coordinates before getting here.
pub fn haversine_miles(origin_lat: f64, origin_lon: f64, dest_lat: f64, dest_lon: f64) -> f64 {
    let dlat = (dest_lat - origin_lat).to_radians();
    let dlon = (dest_lon - origin_lon).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + origin_lat.to_radians().cos() * dest_lat.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1.0 for antipodal points.
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_MILES * c
}

/// Distance in miles between two locations.
pub fn distance_miles(origin: &Location, dest: &Location) -> f64 {
    haversine_miles(origin.lat, origin.long, dest.lat, dest.long)
}
