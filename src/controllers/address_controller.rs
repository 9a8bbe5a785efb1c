use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use crate::dto::address_dto::{
    AddressResponse, CreateAddressRequest, ListAddressesQuery, NearbyAddressResponse, NearbyQuery,
    SearchAddressRequest, UpdateAddressRequest,
};
use crate::geo::BoundingBox;
use crate::repositories::AddressRepository;
use crate::services::proximity_filter::{
    self, require_center, ProximityQuery, DEFAULT_LIMIT, DEFAULT_RADIUS_KM,
};
use crate::services::search_filter::{self, SearchQuery};
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::validation::normalize_filter;

pub struct AddressController {
    repository: Arc<dyn AddressRepository>,
}

impl AddressController {
    pub fn new(repository: Arc<dyn AddressRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, request: CreateAddressRequest) -> AppResult<AddressResponse> {
        request.validate()?;

        let address = self.repository.create(request.into()).await?;
        info!("📍 Dirección creada: id={} uuid={}", address.id, address.uuid);

        Ok(address.into())
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<AddressResponse> {
        let address = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Address", &id.to_string()))?;

        Ok(address.into())
    }

    pub async fn list(&self, query: ListAddressesQuery) -> AppResult<Vec<AddressResponse>> {
        let limit = proximity_filter::validate_limit(query.limit.unwrap_or(DEFAULT_LIMIT))?;
        let offset = proximity_filter::validate_offset(query.offset.unwrap_or(0))?;

        let addresses = self.repository.list_page(limit, offset).await?;

        Ok(addresses.into_iter().map(AddressResponse::from).collect())
    }

    pub async fn update(&self, id: i64, request: UpdateAddressRequest) -> AppResult<AddressResponse> {
        request.validate()?;

        let address = self
            .repository
            .update(id, request.into())
            .await?
            .ok_or_else(|| not_found_error("Address", &id.to_string()))?;
        info!("✏️ Dirección actualizada: id={}", address.id);

        Ok(address.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Address", &id.to_string()));
        }
        info!("🗑️ Dirección eliminada: id={}", id);

        Ok(())
    }

    pub async fn nearby(&self, query: NearbyQuery) -> AppResult<Vec<NearbyAddressResponse>> {
        let center = require_center(query.latitude, query.longitude)?;
        let proximity = ProximityQuery::new(
            center,
            query.radius_km.unwrap_or(DEFAULT_RADIUS_KM),
            query.limit.unwrap_or(DEFAULT_LIMIT),
            query.offset.unwrap_or(0),
        )?;

        info!(
            "🔍 Buscando direcciones cerca de ({}, {}) radius={} km",
            center.latitude, center.longitude, proximity.radius_km
        );

        let bounds = BoundingBox::around(proximity.center, proximity.radius_km);
        let candidates = self.repository.list_within(&bounds).await?;
        let candidate_count = candidates.len();

        let results = proximity_filter::filter_nearby(&proximity, candidates);
        debug!("✅ {} candidatos, {} resultados", candidate_count, results.len());

        Ok(results.into_iter().map(NearbyAddressResponse::from).collect())
    }

    pub async fn search(&self, request: SearchAddressRequest) -> AppResult<Vec<NearbyAddressResponse>> {
        let name = normalize_filter(request.name);
        let city = normalize_filter(request.city);

        let query = SearchQuery::new(
            request.latitude,
            request.longitude,
            request.radius_km.unwrap_or(DEFAULT_RADIUS_KM),
            request.limit.unwrap_or(DEFAULT_LIMIT),
        )?
        .with_name_contains(name.as_deref())
        .with_city_contains(city.as_deref());

        info!(
            "🔍 Búsqueda avanzada cerca de ({}, {}) radius={} km, {} filtros",
            query.center.latitude,
            query.center.longitude,
            query.radius_km,
            query.predicate_count()
        );

        let bounds = BoundingBox::around(query.center, query.radius_km);
        let candidates = self.repository.list_within(&bounds).await?;

        let results = search_filter::search(&query, candidates);
        debug!("✅ {} resultados", results.len());

        Ok(results.into_iter().map(NearbyAddressResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryAddressRepository;
    use crate::utils::errors::AppError;

    fn controller() -> AddressController {
        AddressController::new(Arc::new(InMemoryAddressRepository::new()))
    }

    fn request(name: &str, city: &str, latitude: f64, longitude: f64) -> CreateAddressRequest {
        CreateAddressRequest {
            name: name.to_string(),
            street: "Main Street".to_string(),
            city: city.to_string(),
            state: "State".to_string(),
            country: "Country".to_string(),
            postal_code: None,
            building_number: None,
            apartment: None,
            latitude,
            longitude,
        }
    }

    #[tokio::test]
    async fn test_crud_flow() {
        let controller = controller();

        let created = controller.create(request("Home", "Berlin", 52.52, 13.405)).await.unwrap();
        let fetched = controller.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, created);

        let updated = controller
            .update(
                created.id,
                UpdateAddressRequest {
                    apartment: Some(Some("4B".to_string())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.apartment.as_deref(), Some("4B"));
        assert_eq!(updated.name, "Home");

        controller.delete(created.id).await.unwrap();
        assert!(matches!(controller.get_by_id(created.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(controller.delete(created.id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_coordinates() {
        let result = controller().create(request("Bad", "Nowhere", 120.0, 0.0)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_nearby_uses_defaults_and_orders_results() {
        let controller = controller();
        controller.create(request("Far", "Berlin", 52.53, 13.41)).await.unwrap();
        controller.create(request("Near", "Berlin", 52.52, 13.405)).await.unwrap();
        controller.create(request("Paris", "Paris", 48.8566, 2.3522)).await.unwrap();

        let results = controller
            .nearby(NearbyQuery {
                latitude: Some(52.52),
                longitude: Some(13.405),
                ..Default::default()
            })
            .await
            .unwrap();

        let names: Vec<&str> = results.iter().map(|r| r.address.name.as_str()).collect();
        assert_eq!(names, vec!["Near", "Far"]);
        assert_eq!(results[0].distance_km, 0.0);
    }

    #[tokio::test]
    async fn test_nearby_rejects_invalid_parameters() {
        let controller = controller();

        let zero_radius = controller
            .nearby(NearbyQuery {
                latitude: Some(52.52),
                longitude: Some(13.405),
                radius_km: Some(0.0),
                ..Default::default()
            })
            .await;
        assert!(matches!(zero_radius, Err(AppError::InvalidParameter { .. })));

        let big_limit = controller
            .nearby(NearbyQuery {
                latitude: Some(52.52),
                longitude: Some(13.405),
                limit: Some(150),
                ..Default::default()
            })
            .await;
        assert!(matches!(big_limit, Err(AppError::InvalidParameter { .. })));

        let missing_center = controller.nearby(NearbyQuery::default()).await;
        assert!(matches!(missing_center, Err(AppError::InvalidParameter { .. })));
    }

    #[tokio::test]
    async fn test_search_ignores_blank_filters() {
        let controller = controller();
        controller.create(request("Cafe", "Berlin", 52.52, 13.405)).await.unwrap();
        controller.create(request("Bakery", "Berlin", 52.521, 13.406)).await.unwrap();

        let all = controller
            .search(SearchAddressRequest {
                latitude: Some(52.52),
                longitude: Some(13.405),
                name: Some("  ".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let cafes = controller
            .search(SearchAddressRequest {
                latitude: Some(52.52),
                longitude: Some(13.405),
                name: Some("CAF".to_string()),
                city: Some("berl".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(cafes.len(), 1);
        assert_eq!(cafes[0].address.name, "Cafe");
    }

    #[tokio::test]
    async fn test_search_without_center_fails() {
        let result = controller()
            .search(SearchAddressRequest {
                city: Some("Berlin".to_string()),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(AppError::InvalidParameter { .. })));
    }
}
