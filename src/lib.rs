//! Address Book - API de direcciones con coordenadas
//!
//! CRUD de direcciones postales con latitud/longitud y búsqueda por
//! proximidad (Haversine) con filtros adicionales.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod geo;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app;
pub use state::AppState;
