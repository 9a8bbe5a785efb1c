//! Controladores: validación, orquestación y mapeo a DTOs

pub mod address_controller;
