// ============================================================================
// LOGIN VIEWMODEL - Formulario de conexión del empleado
// ============================================================================
// Guarda el usuario en sesión, pide el JWT al Store (si hay) y navega a Bills.
// Un login rechazado no bloquea la navegación: el JWT simplemente no se guarda.
// ============================================================================

use std::rc::Rc;

use crate::dom::{on_submit, Document, Event};
use crate::models::User;
use crate::routes::{Route, SharedNavigator};
use crate::services::SharedStore;
use crate::state::SessionState;
use crate::utils::{spawn_local, SharedStorage};

pub struct LoginViewModel {
    navigator: SharedNavigator,
    store: Option<SharedStore>,
    session: SessionState,
}

impl LoginViewModel {
    pub fn new(
        document: &Document,
        navigator: SharedNavigator,
        store: Option<SharedStore>,
        storage: SharedStorage,
    ) -> Rc<Self> {
        let vm = Rc::new(Self {
            navigator,
            store,
            session: SessionState::new(storage),
        });
        if let Some(form) = document.get_by_test_id("form-employee") {
            let handler = vm.clone();
            on_submit(&form, move |event| handler.handle_submit_employee(event));
        }
        vm
    }

    pub fn handle_submit_employee(self: &Rc<Self>, event: &Event) {
        event.prevent_default();
        let form = event.target();
        let read = |test_id: &str| {
            form.get_by_test_id(test_id)
                .map(|input| input.value())
                .unwrap_or_default()
        };
        let user = User::employee(read("employee-email-input"), read("employee-password-input"));

        if let Err(e) = self.session.set_user(&user) {
            log::error!("❌ [LOGIN] No se pudo guardar el usuario: {}", e);
            return;
        }
        log::info!("🔐 [LOGIN] Usuario {} conectado", user.email_or_empty());

        let Some(store) = self.store.clone() else {
            self.navigator.navigate_to(Route::Bills);
            return;
        };

        let vm = self.clone();
        spawn_local(async move {
            match store.login(&user.credentials()).await {
                Ok(jwt) => {
                    if let Err(e) = vm.session.set_jwt(&jwt) {
                        log::error!("❌ [LOGIN] No se pudo guardar el JWT: {}", e);
                    }
                }
                Err(e) => log::warn!("⚠️ [LOGIN] Login rechazado por el backend: {}", e),
            }
            vm.navigator.navigate_to(Route::Bills);
        });
    }
}
