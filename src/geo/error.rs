use thiserror::Error;

/// Errores del núcleo de filtrado geográfico
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("Invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },
}

impl GeoError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        GeoError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    /// Nombre del parámetro que provocó el error
    pub fn field(&self) -> &'static str {
        match self {
            GeoError::InvalidParameter { field, .. } => field,
        }
    }
}
