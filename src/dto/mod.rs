//! DTOs de la API HTTP

pub mod address_dto;
