//! Repositorio en memoria
//!
//! Usado en tests y con `STORAGE_BACKEND=memory`. Las escrituras se
//! serializan con el write lock; el contador de ids solo avanza.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::address_repository::AddressRepository;
use crate::models::{Address, AddressChanges, NewAddress};
use crate::utils::errors::AppResult;

#[derive(Default)]
struct MemoryStore {
    last_id: i64,
    addresses: BTreeMap<i64, Address>,
}

#[derive(Default)]
pub struct InMemoryAddressRepository {
    store: RwLock<MemoryStore>,
}

impl InMemoryAddressRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AddressRepository for InMemoryAddressRepository {
    async fn create(&self, address: NewAddress) -> AppResult<Address> {
        let mut store = self.store.write().await;
        store.last_id += 1;

        let created = address.into_address(store.last_id, Uuid::new_v4(), Utc::now());
        store.addresses.insert(created.id, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Address>> {
        Ok(self.store.read().await.addresses.get(&id).cloned())
    }

    async fn update(&self, id: i64, changes: AddressChanges) -> AppResult<Option<Address>> {
        let mut store = self.store.write().await;

        Ok(store.addresses.get_mut(&id).map(|address| {
            changes.apply(address, Utc::now());
            address.clone()
        }))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.store.write().await.addresses.remove(&id).is_some())
    }

    async fn list_all(&self) -> AppResult<Vec<Address>> {
        Ok(self.store.read().await.addresses.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{BoundingBox, GeoPoint};

    fn new_address(name: &str, latitude: f64, longitude: f64) -> NewAddress {
        NewAddress {
            name: name.to_string(),
            street: "Main Street".to_string(),
            city: "Berlin".to_string(),
            state: "Berlin".to_string(),
            country: "Germany".to_string(),
            postal_code: None,
            building_number: Some("12".to_string()),
            apartment: None,
            latitude,
            longitude,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_identity_and_timestamps() {
        let repo = InMemoryAddressRepository::new();

        let first = repo.create(new_address("A", 52.52, 13.405)).await.unwrap();
        let second = repo.create(new_address("B", 52.53, 13.41)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_ne!(first.uuid, second.uuid);
        assert_eq!(first.created_at, first.updated_at);
    }

    #[tokio::test]
    async fn test_ids_are_never_reused_after_delete() {
        let repo = InMemoryAddressRepository::new();

        let first = repo.create(new_address("A", 0.0, 0.0)).await.unwrap();
        assert!(repo.delete(first.id).await.unwrap());
        assert!(!repo.delete(first.id).await.unwrap());

        let second = repo.create(new_address("B", 0.0, 0.0)).await.unwrap();
        assert_eq!(second.id, 2);
        assert!(repo.find_by_id(first.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_keeps_identity() {
        let repo = InMemoryAddressRepository::new();
        let created = repo.create(new_address("A", 52.52, 13.405)).await.unwrap();

        let updated = repo
            .update(
                created.id,
                AddressChanges {
                    name: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.uuid, created.uuid);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        assert!(repo.update(99, AddressChanges::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_is_ordered_by_id() {
        let repo = InMemoryAddressRepository::new();
        for name in ["C", "A", "B"] {
            repo.create(new_address(name, 1.0, 1.0)).await.unwrap();
        }

        let ids: Vec<i64> = repo.list_all().await.unwrap().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let page: Vec<i64> = repo.list_page(1, 1).await.unwrap().iter().map(|a| a.id).collect();
        assert_eq!(page, vec![2]);
    }

    #[tokio::test]
    async fn test_list_within_uses_bounding_box() {
        let repo = InMemoryAddressRepository::new();
        repo.create(new_address("Berlin", 52.52, 13.405)).await.unwrap();
        repo.create(new_address("Paris", 48.8566, 2.3522)).await.unwrap();

        let bounds = BoundingBox::around(GeoPoint::new(52.52, 13.405).unwrap(), 10.0);
        let names: Vec<String> = repo
            .list_within(&bounds)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();

        assert_eq!(names, vec!["Berlin".to_string()]);
    }
}
