// ============================================================================
// BILLED - FRONTEND MVVM ESTRICTO (RUST PURO)
// ============================================================================
// Arquitectura MVVM estricta:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Controladores de cada página (eventos + llamadas al Store)
// - Router: Monta la página de la ruta actual en #root
// - Services: SOLO comunicación con el Store (HTTP o mock)
// - State: Sesión del empleado en localStorage
// - Models: Estructuras compartidas con backend
// ============================================================================

pub mod app;
pub mod config;
pub mod dom;
pub mod error;
pub mod models;
pub mod router;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;
pub mod views;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests;

pub use app::App;
pub use error::AppError;
pub use router::Router;
pub use routes::{Navigator, Route, SharedNavigator};
