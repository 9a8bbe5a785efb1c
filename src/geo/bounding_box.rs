//! Bounding box para pre-filtrar candidatos
//!
//! El rectángulo es conservador: nunca excluye un punto cuya distancia
//! Haversine al centro sea menor o igual al radio. La distancia exacta se
//! calcula siempre después sobre los candidatos que pasan el filtro.

use super::GeoPoint;

/// Kilómetros por grado de latitud (redondeado hacia abajo)
const KM_PER_DEGREE: f64 = 111.0;

/// Rango de longitudes cubierto por el rectángulo
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LongitudeSpan {
    /// Sin restricción (toca un polo o cubre los 360°)
    Any,
    /// `min <= lon <= max`
    Range { min: f64, max: f64 },
    /// Cruza el antimeridiano: `lon >= min || lon <= max`
    Wrapped { min: f64, max: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub longitude: LongitudeSpan,
}

impl BoundingBox {
    /// Calcular el rectángulo alrededor de `center` para un radio en km
    pub fn around(center: GeoPoint, radius_km: f64) -> Self {
        let lat_delta = radius_km.max(0.0) / KM_PER_DEGREE;
        let raw_min_lat = center.latitude - lat_delta;
        let raw_max_lat = center.latitude + lat_delta;

        let min_latitude = raw_min_lat.max(-90.0);
        let max_latitude = raw_max_lat.min(90.0);

        if raw_min_lat <= -90.0 || raw_max_lat >= 90.0 {
            return Self {
                min_latitude,
                max_latitude,
                longitude: LongitudeSpan::Any,
            };
        }

        // El grado de longitud más corto está en la latitud más cercana al polo
        let poleward = raw_min_lat.abs().max(raw_max_lat.abs());
        let lon_delta = lat_delta / poleward.to_radians().cos();

        if !lon_delta.is_finite() || lon_delta >= 180.0 {
            return Self {
                min_latitude,
                max_latitude,
                longitude: LongitudeSpan::Any,
            };
        }

        let min_lon = center.longitude - lon_delta;
        let max_lon = center.longitude + lon_delta;

        let longitude = if min_lon < -180.0 {
            LongitudeSpan::Wrapped {
                min: min_lon + 360.0,
                max: max_lon,
            }
        } else if max_lon > 180.0 {
            LongitudeSpan::Wrapped {
                min: min_lon,
                max: max_lon - 360.0,
            }
        } else {
            LongitudeSpan::Range {
                min: min_lon,
                max: max_lon,
            }
        };

        Self {
            min_latitude,
            max_latitude,
            longitude,
        }
    }

    /// Verificar si un punto cae dentro del rectángulo
    pub fn contains(&self, point: &GeoPoint) -> bool {
        if point.latitude < self.min_latitude || point.latitude > self.max_latitude {
            return false;
        }

        match self.longitude {
            LongitudeSpan::Any => true,
            LongitudeSpan::Range { min, max } => point.longitude >= min && point.longitude <= max,
            LongitudeSpan::Wrapped { min, max } => point.longitude >= min || point.longitude <= max,
        }
    }
}
