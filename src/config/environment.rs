//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Las variables se leen una vez al arrancar; los valores inválidos son errores
//! de arranque.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

/// Backend de almacenamiento de direcciones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(anyhow!("unknown storage backend '{}'", other)),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub app_name: String,
    pub version: String,
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub log_level: tracing::Level,
    pub cors_origins: Vec<String>,
    pub debug: bool,
    pub storage: StorageBackend,
}

impl EnvironmentConfig {
    /// Leer la configuración desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Leer la configuración desde una función de búsqueda arbitraria
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let debug = parse_bool(&var("DEBUG", "false")).context("DEBUG must be true or false")?;
        let log_level = if debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::from_str(&var("LOG_LEVEL", "info"))
                .map_err(|_| anyhow!("LOG_LEVEL must be one of trace, debug, info, warn, error"))?
        };

        Ok(Self {
            app_name: var("APP_NAME", "Address Book"),
            version: var("APP_VERSION", env!("CARGO_PKG_VERSION")),
            environment: var("ENVIRONMENT", "development"),
            port: var("PORT", "8000")
                .parse()
                .context("PORT must be a valid number")?,
            host: var("HOST", "0.0.0.0"),
            log_level,
            cors_origins: var("CORS_ORIGINS", "*")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            debug,
            storage: var("STORAGE_BACKEND", "postgres").parse()?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow!("invalid boolean '{}'", other)),
    }
}
