//! Filtro de proximidad
//!
//! Dado un centro, un radio y un conjunto de candidatos, devuelve las
//! direcciones dentro del radio ordenadas por distancia (empates por id)
//! con paginación offset/limit. Funciones puras: no hay I/O ni estado.

use std::cmp::Ordering;

use crate::geo::{GeoError, GeoPoint};
use crate::models::{Address, DistanceResult};

/// Radio por defecto en kilómetros
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// Límite de resultados por defecto
pub const DEFAULT_LIMIT: i64 = 20;

/// Límite máximo de resultados por consulta
pub const MAX_LIMIT: i64 = 100;

/// Consulta de proximidad ya validada
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityQuery {
    pub center: GeoPoint,
    pub radius_km: f64,
    pub limit: usize,
    pub offset: usize,
}

impl ProximityQuery {
    pub fn new(center: GeoPoint, radius_km: f64, limit: i64, offset: i64) -> Result<Self, GeoError> {
        Ok(Self {
            center,
            radius_km: validate_radius(radius_km)?,
            limit: validate_limit(limit)?,
            offset: validate_offset(offset)?,
        })
    }
}

/// Construir el centro de la consulta; ambas coordenadas son obligatorias
pub fn require_center(latitude: Option<f64>, longitude: Option<f64>) -> Result<GeoPoint, GeoError> {
    let latitude = latitude.ok_or_else(|| GeoError::invalid("latitude", "center latitude is required"))?;
    let longitude = longitude.ok_or_else(|| GeoError::invalid("longitude", "center longitude is required"))?;
    GeoPoint::new(latitude, longitude)
}

pub fn validate_radius(radius_km: f64) -> Result<f64, GeoError> {
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(GeoError::invalid(
            "radius_km",
            format!("radius must be a finite number greater than 0, got {}", radius_km),
        ));
    }
    Ok(radius_km)
}

pub fn validate_limit(limit: i64) -> Result<usize, GeoError> {
    if !(0..=MAX_LIMIT).contains(&limit) {
        return Err(GeoError::invalid(
            "limit",
            format!("limit must be between 0 and {}, got {}", MAX_LIMIT, limit),
        ));
    }
    Ok(limit as usize)
}

pub fn validate_offset(offset: i64) -> Result<usize, GeoError> {
    usize::try_from(offset)
        .map_err(|_| GeoError::invalid("offset", format!("offset must be non-negative, got {}", offset)))
}

/// Orden total: distancia ascendente y, en empate, id ascendente
pub(crate) fn by_distance_then_id(a: &DistanceResult, b: &DistanceResult) -> Ordering {
    a.distance_km
        .total_cmp(&b.distance_km)
        .then_with(|| a.address.id.cmp(&b.address.id))
}

/// Calcular distancias y quedarse con los candidatos dentro del radio (inclusive)
pub(crate) fn within_radius<I>(center: GeoPoint, radius_km: f64, candidates: I) -> Vec<DistanceResult>
where
    I: IntoIterator<Item = Address>,
{
    candidates
        .into_iter()
        .filter_map(|address| {
            let distance_km = center.distance_to(&address.location());
            (distance_km <= radius_km).then_some(DistanceResult { address, distance_km })
        })
        .collect()
}

/// Ordenar y paginar. Solo ordena completamente los primeros `offset + limit`.
pub(crate) fn sort_and_paginate(
    mut matches: Vec<DistanceResult>,
    offset: usize,
    limit: usize,
) -> Vec<DistanceResult> {
    let keep = offset.saturating_add(limit);
    if keep == 0 || offset >= matches.len() {
        return Vec::new();
    }

    if keep < matches.len() {
        matches.select_nth_unstable_by(keep - 1, by_distance_then_id);
        matches.truncate(keep);
    }
    matches.sort_unstable_by(by_distance_then_id);

    matches.into_iter().skip(offset).take(limit).collect()
}

/// Aplicar el filtro de proximidad sobre un snapshot de candidatos
pub fn filter_nearby<I>(query: &ProximityQuery, candidates: I) -> Vec<DistanceResult>
where
    I: IntoIterator<Item = Address>,
{
    let matches = within_radius(query.center, query.radius_km, candidates);
    sort_and_paginate(matches, query.offset, query.limit)
}
