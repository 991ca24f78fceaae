// ============================================================================
// APP - Cablea documento, storage, Store y router
// ============================================================================

use crate::dom::{Document, ElementBuilder};
use crate::error::AppError;
use crate::router::Router;
use crate::services::SharedStore;
use crate::utils::{SharedStorage, ROOT_ELEMENT_ID};

/// Aplicación principal
pub struct App {
    document: Document,
    router: Router,
}

impl App {
    /// Crea `#root` en el body si el documento aún no lo tiene
    pub fn new(
        document: Document,
        storage: SharedStorage,
        store: Option<SharedStore>,
    ) -> Result<Self, AppError> {
        if document.get_element_by_id(ROOT_ELEMENT_ID).is_none() {
            log::debug!("🧱 [APP] Creando #{}", ROOT_ELEMENT_ID);
            let root = ElementBuilder::new(&document, "div").id(ROOT_ELEMENT_ID).build();
            document.body().append_child(&root);
        }
        if store.is_none() {
            log::warn!("⚠️ [APP] Sin Store: la lista de notas estará vacía");
        }

        let router = Router::new(document.clone(), storage, store)?;
        Ok(Self { document, router })
    }

    pub fn start(&self, initial_path: &str) {
        self.router.start(initial_path);
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn router(&self) -> &Router {
        &self.router
    }
}
