//! Repositorios de persistencia

pub mod address_repository;
pub mod memory_address_repository;

pub use address_repository::{AddressRepository, PgAddressRepository};
pub use memory_address_repository::InMemoryAddressRepository;
