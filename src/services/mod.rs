//! Servicios de negocio
//!
//! Núcleo de filtrado geográfico: proximidad y búsqueda avanzada.

pub mod proximity_filter;
pub mod search_filter;

pub use proximity_filter::{filter_nearby, ProximityQuery};
pub use search_filter::{search, SearchQuery};
