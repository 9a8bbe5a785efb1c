//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema
//! PostgreSQL y los resultados transitorios del filtrado geográfico.

pub mod address;

pub use address::{Address, AddressChanges, DistanceResult, NewAddress};
