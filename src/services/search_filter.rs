//! Filtro de búsqueda avanzada
//!
//! Generaliza el filtro de proximidad con una lista explícita de predicados
//! que se evalúan en conjunción (AND) sobre cada candidato.

use crate::geo::{GeoError, GeoPoint};
use crate::models::{Address, DistanceResult};
use crate::services::proximity_filter::{
    self, require_center, sort_and_paginate, validate_limit, validate_radius,
};

/// Predicado sobre una dirección candidata
pub type AddressPredicate = Box<dyn Fn(&Address) -> bool + Send + Sync>;

/// Predicado: el nombre contiene el texto (sin distinguir mayúsculas)
pub fn name_contains(needle: &str) -> AddressPredicate {
    let needle = needle.to_lowercase();
    Box::new(move |address: &Address| address.name.to_lowercase().contains(&needle))
}

/// Predicado: la ciudad contiene el texto (sin distinguir mayúsculas)
pub fn city_contains(needle: &str) -> AddressPredicate {
    let needle = needle.to_lowercase();
    Box::new(move |address: &Address| address.city.to_lowercase().contains(&needle))
}

/// Búsqueda validada: centro + radio + límite y predicados adicionales
pub struct SearchQuery {
    pub center: GeoPoint,
    pub radius_km: f64,
    pub limit: usize,
    predicates: Vec<AddressPredicate>,
}

impl std::fmt::Debug for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchQuery")
            .field("center", &self.center)
            .field("radius_km", &self.radius_km)
            .field("limit", &self.limit)
            .field("predicates", &self.predicates.len())
            .finish()
    }
}

impl SearchQuery {
    /// Validar parámetros; el centro es obligatorio aunque haya filtros de texto
    pub fn new(
        latitude: Option<f64>,
        longitude: Option<f64>,
        radius_km: f64,
        limit: i64,
    ) -> Result<Self, GeoError> {
        Ok(Self {
            center: require_center(latitude, longitude)?,
            radius_km: validate_radius(radius_km)?,
            limit: validate_limit(limit)?,
            predicates: Vec::new(),
        })
    }

    pub fn with_predicate(mut self, predicate: AddressPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn with_name_contains(self, name: Option<&str>) -> Self {
        match name {
            Some(name) => self.with_predicate(name_contains(name)),
            None => self,
        }
    }

    pub fn with_city_contains(self, city: Option<&str>) -> Self {
        match city {
            Some(city) => self.with_predicate(city_contains(city)),
            None => self,
        }
    }

    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    fn matches(&self, address: &Address) -> bool {
        self.predicates.iter().all(|predicate| predicate(address))
    }
}

/// Aplicar predicados, filtro de distancia, orden y límite (sin offset)
pub fn search<I>(query: &SearchQuery, candidates: I) -> Vec<DistanceResult>
where
    I: IntoIterator<Item = Address>,
{
    let narrowed = candidates
        .into_iter()
        .filter(|address| query.matches(address));
    let matches = proximity_filter::within_radius(query.center, query.radius_km, narrowed);
    sort_and_paginate(matches, 0, query.limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::address::fixtures::address;

    fn candidates() -> Vec<Address> {
        vec![
            address(1, "Café Mitte", "Berlin", 52.52, 13.405),
            address(2, "Bakery", "Berlin", 52.5219, 13.4132),
            address(3, "cafe kreuzberg", "Berlin-Kreuzberg", 52.4986, 13.4030),
            address(4, "Cafe Potsdam", "Potsdam", 52.3906, 13.0645),
            address(5, "CAFE Hamburg", "Hamburg", 53.5511, 9.9937),
        ]
    }

    fn ids(results: &[DistanceResult]) -> Vec<i64> {
        results.iter().map(|r| r.address.id).collect()
    }

    #[test]
    fn test_individual_predicates() {
        let sample = address(1, "Green Park Cafe", "Berlin", 52.5, 13.4);

        assert!(name_contains("park")(&sample));
        assert!(name_contains("GREEN")(&sample));
        assert!(!name_contains("bakery")(&sample));

        assert!(city_contains("ber")(&sample));
        assert!(city_contains("BERLIN")(&sample));
        assert!(!city_contains("Hamburg")(&sample));
    }

    #[test]
    fn test_distance_only_search() {
        let query = SearchQuery::new(Some(52.52), Some(13.405), 10.0, 20).unwrap();
        assert_eq!(query.predicate_count(), 0);

        let results = search(&query, candidates());
        assert_eq!(ids(&results), vec![1, 2, 3]);
    }

    #[test]
    fn test_name_predicate_excludes_non_matching() {
        let query = SearchQuery::new(Some(52.52), Some(13.405), 1000.0, 100)
            .unwrap()
            .with_name_contains(Some("cafe"));

        let results = search(&query, candidates());

        // "Café Mitte" no contiene "cafe" (acento)
        assert_eq!(ids(&results), vec![3, 4, 5]);
        for r in &results {
            assert!(r.address.name.to_lowercase().contains("cafe"));
        }
    }

    #[test]
    fn test_predicates_are_conjunctive_with_distance() {
        let query = SearchQuery::new(Some(52.52), Some(13.405), 50.0, 100)
            .unwrap()
            .with_name_contains(Some("cafe"))
            .with_city_contains(Some("berlin"));

        let results = search(&query, candidates());

        // Hamburg y Potsdam no cumplen ciudad; Hamburg además queda fuera del radio
        assert_eq!(ids(&results), vec![3]);
    }

    #[test]
    fn test_limit_applies_after_sorting() {
        let query = SearchQuery::new(Some(52.52), Some(13.405), 1000.0, 2).unwrap();

        let results = search(&query, candidates());

        assert_eq!(ids(&results), vec![1, 2]);
        assert!(results[0].distance_km <= results[1].distance_km);
    }

    #[test]
    fn test_search_requires_center() {
        let err = SearchQuery::new(None, None, 5.0, 20).unwrap_err();
        assert_eq!(err.field(), "latitude");

        let err = SearchQuery::new(Some(52.5), None, 5.0, 20).unwrap_err();
        assert_eq!(err.field(), "longitude");
    }

    #[test]
    fn test_search_rejects_bad_radius_and_limit() {
        assert_eq!(SearchQuery::new(Some(0.0), Some(0.0), 0.0, 20).unwrap_err().field(), "radius_km");
        assert_eq!(SearchQuery::new(Some(0.0), Some(0.0), 5.0, 150).unwrap_err().field(), "limit");
    }
}
