// ============================================================================
// LOGOUT VIEWMODEL - Botón de desconexión del layout
// ============================================================================

use std::rc::Rc;

use crate::dom::{on_click, Document};
use crate::routes::{Route, SharedNavigator};
use crate::state::SessionState;
use crate::utils::SharedStorage;
use crate::views::DISCONNECT_ID;

pub struct LogoutViewModel {
    navigator: SharedNavigator,
    session: SessionState,
}

impl LogoutViewModel {
    /// Engancha el click sobre `#layout-disconnect` si la página lo tiene
    pub fn new(document: &Document, navigator: SharedNavigator, storage: SharedStorage) -> Rc<Self> {
        let vm = Rc::new(Self {
            navigator,
            session: SessionState::new(storage),
        });
        if let Some(button) = document.get_element_by_id(DISCONNECT_ID) {
            let handler = vm.clone();
            on_click(&button, move |_| handler.handle_click_disconnect());
        }
        vm
    }

    pub fn handle_click_disconnect(&self) {
        log::info!("👋 [LOGOUT] Cerrando sesión");
        if let Err(e) = self.session.clear() {
            log::error!("❌ [LOGOUT] No se pudo limpiar la sesión: {}", e);
        }
        self.navigator.navigate_to(Route::Login);
    }
}
