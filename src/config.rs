use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url: String,
    pub environment: String,
    pub enable_logging: bool,
    /// Usar el MockStore (fixtures) en lugar del backend HTTP
    pub use_mock_store: bool,
    pub bill_config: BillConfig,
    pub ui_config: UIConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:5678".to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            use_mock_store: false,
            bill_config: BillConfig::default(),
            ui_config: UIConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillConfig {
    /// Extensiones aceptadas para el justificativo (minúsculas, sin punto)
    pub allowed_proof_extensions: Vec<String>,
    /// Porcentaje de TVA cuando el campo pct queda vacío
    pub default_vat_pct: u32,
}

impl Default for BillConfig {
    fn default() -> Self {
        Self {
            allowed_proof_extensions: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
            default_vat_pct: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UIConfig {
    /// Ancho (px) del modal del justificativo; la imagen ocupa la mitad
    pub proof_modal_width: u32,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            proof_modal_width: 800,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url: option_env!("BACKEND_URL")
                .unwrap_or("http://localhost:5678").to_string(),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            use_mock_store: option_env!("USE_MOCK_STORE")
                .unwrap_or("false").parse().unwrap_or(false),
            bill_config: BillConfig {
                allowed_proof_extensions: option_env!("ALLOWED_PROOF_EXTENSIONS")
                    .map(parse_extension_list)
                    .unwrap_or(defaults.bill_config.allowed_proof_extensions),
                default_vat_pct: option_env!("DEFAULT_VAT_PCT")
                    .unwrap_or("20").parse().unwrap_or(20),
            },
            ui_config: UIConfig {
                proof_modal_width: option_env!("PROOF_MODAL_WIDTH")
                    .unwrap_or("800").parse().unwrap_or(800),
            },
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }

    /// ¿La extensión del archivo está en la allow-list? (sin distinguir mayúsculas)
    pub fn accepts_extension(&self, extension: &str) -> bool {
        let extension = extension.to_ascii_lowercase();
        self.bill_config
            .allowed_proof_extensions
            .iter()
            .any(|allowed| *allowed == extension)
    }
}

/// "jpg, JPEG ,png" -> ["jpg", "jpeg", "png"]
fn parse_extension_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allow_list_is_images_only() {
        let config = AppConfig::default();
        assert!(config.accepts_extension("png"));
        assert!(config.accepts_extension("JPG"));
        assert!(config.accepts_extension("jpeg"));
        assert!(!config.accepts_extension("txt"));
        assert!(!config.accepts_extension("pdf"));
    }

    #[test]
    fn extension_list_from_env_is_normalized() {
        assert_eq!(
            parse_extension_list(" .PNG, jpg,,gif "),
            vec!["png".to_string(), "jpg".to_string(), "gif".to_string()]
        );
    }
}
