//! Distancia de gran círculo (fórmula de Haversine)

use super::GeoPoint;

/// Radio medio de la Tierra en kilómetros
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calcular la distancia en kilómetros entre dos puntos con Haversine.
///
/// No valida rangos: los puntos llegan validados desde la capa superior.
/// Dos puntos idénticos devuelven exactamente `0.0`.
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = lat2 - lat1;
    let delta_lon = to.longitude.to_radians() - from.longitude.to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);

    // El redondeo puede dejar `a` ligeramente fuera de [0, 1]
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::unchecked(lat, lon)
    }

    #[test]
    fn test_same_point_is_exactly_zero() {
        let samples = [
            (52.52, 13.405),
            (-90.0, -180.0),
            (90.0, 180.0),
            (0.0, 0.0),
            (-33.8688, 151.2093),
        ];

        for (lat, lon) in samples {
            assert_eq!(haversine_km(point(lat, lon), point(lat, lon)), 0.0);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let pairs = [
            ((52.52, 13.405), (48.8566, 2.3522)),
            ((-90.0, -180.0), (-89.999, -179.999)),
            ((0.0, 179.9), (0.0, -179.9)),
            ((40.7128, -74.006), (-33.8688, 151.2093)),
        ];

        for (a, b) in pairs {
            let ab = haversine_km(point(a.0, a.1), point(b.0, b.1));
            let ba = haversine_km(point(b.0, b.1), point(a.0, a.1));
            assert_eq!(ab, ba);
        }
    }

    #[test]
    fn test_antipodes_stay_within_half_circumference() {
        let half_circumference = PI * EARTH_RADIUS_KM;

        let d = haversine_km(point(0.0, 0.0), point(0.0, 180.0));
        assert!(d.is_finite());
        assert!(d <= half_circumference + 1e-9);
        assert!((d - half_circumference).abs() < 1e-6);

        let d = haversine_km(point(90.0, 0.0), point(-90.0, 0.0));
        assert!(d <= half_circumference + 1e-9);
    }

    #[test]
    fn test_berlin_short_distance() {
        let d = haversine_km(point(52.52, 13.405), point(52.53, 13.41));
        assert!(d > 1.1 && d < 1.25, "distance was {}", d);
    }

    #[test]
    fn test_south_pole_antimeridian_edge() {
        let d = haversine_km(point(-90.0, -180.0), point(-89.999, -179.999));
        assert!(d >= 0.11 && d <= 0.15, "distance was {}", d);
    }

    #[test]
    fn test_antimeridian_crossing_is_short() {
        let d = haversine_km(point(0.0, 179.99), point(0.0, -179.99));
        assert!(d < 2.5, "distance was {}", d);
    }

    #[test]
    fn test_known_city_distance() {
        // Berlín - París ~ 878 km
        let d = haversine_km(point(52.52, 13.405), point(48.8566, 2.3522));
        assert!(d > 870.0 && d < 885.0, "distance was {}", d);
    }
}
