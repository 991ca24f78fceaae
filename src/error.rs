// ============================================================================
// ERRORES - Taxonomía de errores de la aplicación
// ============================================================================
// Network   -> se muestra como página de error ("Erreur 404", "Erreur 500")
// Validation -> se queda en el formulario, nunca se propaga
// Format    -> se recupera por registro (fecha cruda + warning)
// ============================================================================

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// El Store rechazó la llamada
    #[error("{message}")]
    Network { status: Option<u16>, message: String },

    /// Entrada del usuario no aceptada (extensión de archivo, justificativo ausente)
    #[error("{0}")]
    Validation(String),

    /// Campo de un registro con formato inválido
    #[error("formato inválido: {0}")]
    Format(String),

    #[error("error de storage: {0}")]
    Storage(String),

    #[error("error de DOM: {0}")]
    Dom(String),
}

impl AppError {
    /// Error de red con el texto que ve el usuario ("Erreur 404")
    pub fn http(status: u16) -> Self {
        Self::Network {
            status: Some(status),
            message: format!("Erreur {}", status),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            status: None,
            message: message.into(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        Self::Format(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_renders_french_status_text() {
        let err = AppError::http(404);
        assert_eq!(err.to_string(), "Erreur 404");
        assert!(err.is_network());
    }

    #[test]
    fn validation_error_is_not_network() {
        assert!(!AppError::Validation("txt".into()).is_network());
    }
}
