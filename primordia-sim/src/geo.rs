//! Great-circle distance between catalog coordinates.

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers between two WGS-84 coordinate pairs.
#[must_use]
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + (d_lon / 2.0).sin().powi(2) * lat1.to_radians().cos() * lat2.to_radians().cos();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_for_identical_points() {
        assert!(haversine_km(-23.55, -46.63, -23.55, -46.63).abs() < 1e-9);
    }

    #[test]
    fn sao_paulo_to_manaus_is_about_2700_km() {
        let d = haversine_km(-23.55, -46.63, -3.12, -60.02);
        assert!((2300.0..3100.0).contains(&d), "unexpected distance {d}");
    }

    #[test]
    fn antipodal_points_approach_half_circumference() {
        let d = haversine_km(0.0, 0.0, 0.0, 180.0);
        assert!((d - EARTH_RADIUS_KM * std::f64::consts::PI).abs() < 1.0);
    }
}
