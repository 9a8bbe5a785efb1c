//! Cálculos geográficos
//!
//! Este módulo contiene la distancia Haversine, el bounding box usado como
//! pre-filtro de candidatos y el tipo `GeoPoint` validado.

pub mod bounding_box;
pub mod distance;
pub mod error;

pub use bounding_box::BoundingBox;
pub use distance::{haversine_km, EARTH_RADIUS_KM};
pub use error::GeoError;

use serde::{Deserialize, Serialize};

/// Límites válidos de latitud en grados
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// Límites válidos de longitud en grados
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Punto geográfico en grados decimales
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Crear un punto validando los rangos de latitud y longitud
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !latitude.is_finite() || latitude < LATITUDE_RANGE.0 || latitude > LATITUDE_RANGE.1 {
            return Err(GeoError::invalid(
                "latitude",
                format!("{} is outside [-90, 90]", latitude),
            ));
        }

        if !longitude.is_finite() || longitude < LONGITUDE_RANGE.0 || longitude > LONGITUDE_RANGE.1 {
            return Err(GeoError::invalid(
                "longitude",
                format!("{} is outside [-180, 180]", longitude),
            ));
        }

        Ok(Self { latitude, longitude })
    }

    /// Crear un punto sin validar (datos ya validados al persistir)
    pub const fn unchecked(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Distancia en kilómetros hasta otro punto
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        haversine_km(*self, *other)
    }
}
