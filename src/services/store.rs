// ============================================================================
// STORE - Contrato del backend (SOLO comunicación, sin lógica de UI)
// ============================================================================
// `store.bills()` devuelve el recurso de notas con list/create/update.
// Implementaciones: HttpStore (navegador) y MockStore (fixtures, tests).
// ============================================================================

use std::rc::Rc;
use async_trait::async_trait;
use crate::error::AppError;
use crate::models::{Bill, Credentials, NewBillPayload, UploadRequest, UploadedFile};

/// Recurso REST `/bills`
#[async_trait(?Send)]
pub trait BillsApi {
    /// Notas visibles para el usuario, en el orden del backend
    async fn list(&self) -> Result<Vec<Bill>, AppError>;

    /// Sube el justificativo y crea la nota; `key` es su id
    async fn create(&self, request: UploadRequest) -> Result<UploadedFile, AppError>;

    /// Completa la nota `selector` con los datos del formulario.
    /// `selector` vacío: no se llegó a subir justificativo.
    async fn update(&self, selector: &str, payload: &NewBillPayload) -> Result<Bill, AppError>;
}

#[async_trait(?Send)]
pub trait Store {
    fn bills(&self) -> Rc<dyn BillsApi>;

    /// Autenticación; devuelve el JWT
    async fn login(&self, credentials: &Credentials) -> Result<String, AppError>;
}

pub type SharedStore = Rc<dyn Store>;
