//! Modelo de Address
//!
//! Este módulo contiene el struct Address y sus variantes para CRUD operations.
//! Mapea exactamente a la tabla `addresses`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::geo::GeoPoint;

/// Address principal - mapea a la tabla addresses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Address {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: Option<String>,
    pub building_number: Option<String>,
    pub apartment: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Address {
    /// Ubicación de la dirección (validada al crear/actualizar)
    pub fn location(&self) -> GeoPoint {
        GeoPoint::unchecked(self.latitude, self.longitude)
    }
}

/// Datos para crear una dirección; el repositorio asigna id, uuid y timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct NewAddress {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: Option<String>,
    pub building_number: Option<String>,
    pub apartment: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewAddress {
    /// Materializar la dirección con la identidad asignada por el repositorio
    pub fn into_address(self, id: i64, uuid: Uuid, now: DateTime<Utc>) -> Address {
        Address {
            id,
            uuid,
            name: self.name,
            street: self.street,
            city: self.city,
            state: self.state,
            country: self.country,
            postal_code: self.postal_code,
            building_number: self.building_number,
            apartment: self.apartment,
            latitude: self.latitude,
            longitude: self.longitude,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Cambios parciales: solo los campos presentes se modifican.
///
/// En los campos opcionales `Some(None)` borra el valor actual y `None`
/// lo deja intacto.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressChanges {
    pub name: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<Option<String>>,
    pub building_number: Option<Option<String>>,
    pub apartment: Option<Option<String>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl AddressChanges {
    /// Aplicar los cambios sobre una dirección existente y refrescar `updated_at`.
    /// `id`, `uuid` y `created_at` nunca cambian.
    pub fn apply(self, address: &mut Address, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            address.name = name;
        }
        if let Some(street) = self.street {
            address.street = street;
        }
        if let Some(city) = self.city {
            address.city = city;
        }
        if let Some(state) = self.state {
            address.state = state;
        }
        if let Some(country) = self.country {
            address.country = country;
        }
        if let Some(postal_code) = self.postal_code {
            address.postal_code = postal_code;
        }
        if let Some(building_number) = self.building_number {
            address.building_number = building_number;
        }
        if let Some(apartment) = self.apartment {
            address.apartment = apartment;
        }
        if let Some(latitude) = self.latitude {
            address.latitude = latitude;
        }
        if let Some(longitude) = self.longitude {
            address.longitude = longitude;
        }

        // Nunca retroceder updated_at respecto a created_at
        address.updated_at = now.max(address.created_at);
    }
}

/// Resultado transitorio: dirección + distancia en km al punto de consulta
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceResult {
    pub address: Address,
    pub distance_km: f64,
}
