use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::{Address, AddressChanges, DistanceResult, NewAddress};
use crate::utils::validation::{validate_coordinates, validate_latitude, validate_longitude, validate_not_blank};

// Request para crear una dirección
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_create_coordinates"))]
pub struct CreateAddressRequest {
    #[validate(length(min = 1, max = 150), custom = "validate_not_blank")]
    pub name: String,

    #[validate(length(min = 1, max = 200), custom = "validate_not_blank")]
    pub street: String,

    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub city: String,

    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub state: String,

    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub country: String,

    #[validate(length(max = 20))]
    pub postal_code: Option<String>,

    #[validate(length(max = 20))]
    pub building_number: Option<String>,

    #[validate(length(max = 50))]
    pub apartment: Option<String>,

    pub latitude: f64,
    pub longitude: f64,
}

fn validate_create_coordinates(request: &CreateAddressRequest) -> Result<(), ValidationError> {
    validate_coordinates(request.latitude, request.longitude)
}

impl From<CreateAddressRequest> for NewAddress {
    fn from(request: CreateAddressRequest) -> Self {
        Self {
            name: request.name,
            street: request.street,
            city: request.city,
            state: request.state,
            country: request.country,
            postal_code: request.postal_code,
            building_number: request.building_number,
            apartment: request.apartment,
            latitude: request.latitude,
            longitude: request.longitude,
        }
    }
}

// Request para actualización parcial (PATCH)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_update_coordinates"))]
pub struct UpdateAddressRequest {
    #[validate(length(min = 1, max = 150), custom = "validate_not_blank")]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 200), custom = "validate_not_blank")]
    pub street: Option<String>,

    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub city: Option<String>,

    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub state: Option<String>,

    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub country: Option<String>,

    #[serde(default, deserialize_with = "present_or_null")]
    #[validate(length(max = 20))]
    pub postal_code: Option<Option<String>>,

    #[serde(default, deserialize_with = "present_or_null")]
    #[validate(length(max = 20))]
    pub building_number: Option<Option<String>>,

    #[serde(default, deserialize_with = "present_or_null")]
    #[validate(length(max = 50))]
    pub apartment: Option<Option<String>>,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

// Campo ausente -> None (por `default`); `null` explícito -> Some(None)
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn validate_update_coordinates(request: &UpdateAddressRequest) -> Result<(), ValidationError> {
    if let Some(latitude) = request.latitude {
        validate_latitude(latitude)?;
    }
    if let Some(longitude) = request.longitude {
        validate_longitude(longitude)?;
    }
    Ok(())
}

impl From<UpdateAddressRequest> for AddressChanges {
    fn from(request: UpdateAddressRequest) -> Self {
        Self {
            name: request.name,
            street: request.street,
            city: request.city,
            state: request.state,
            country: request.country,
            postal_code: request.postal_code,
            building_number: request.building_number,
            apartment: request.apartment,
            latitude: request.latitude,
            longitude: request.longitude,
        }
    }
}

// Response de dirección
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddressResponse {
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

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id,
            uuid: address.uuid,
            name: address.name,
            street: address.street,
            city: address.city,
            state: address.state,
            country: address.country,
            postal_code: address.postal_code,
            building_number: address.building_number,
            apartment: address.apartment,
            latitude: address.latitude,
            longitude: address.longitude,
            created_at: address.created_at,
            updated_at: address.updated_at,
        }
    }
}

// Response de búsqueda geográfica: dirección + distancia
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NearbyAddressResponse {
    pub address: AddressResponse,
    pub distance_km: f64,
}

impl From<DistanceResult> for NearbyAddressResponse {
    fn from(result: DistanceResult) -> Self {
        Self {
            address: result.address.into(),
            distance_km: result.distance_km,
        }
    }
}

// Query string de /addresses/nearby
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NearbyQuery {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: Option<f64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// Query string de GET /addresses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAddressesQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// Request para búsqueda avanzada (POST /addresses/search)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchAddressRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: Option<f64>,
    pub limit: Option<i64>,
    pub name: Option<String>,
    pub city: Option<String>,
}
