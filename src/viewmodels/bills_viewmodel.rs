// ============================================================================
// BILLS VIEWMODEL - Lista de notas del empleado
// ============================================================================
// Engancha los botones de la página de notas y convierte las notas del Store
// en filas listas para pintar (fecha y estado en francés).
// ============================================================================

use std::rc::Rc;

use crate::config::CONFIG;
use crate::dom::{hide_modal, on_click, show_modal, Document, ElementBuilder, ElementRef};
use crate::error::AppError;
use crate::models::{Bill, BillRow};
use crate::routes::{Route, SharedNavigator};
use crate::services::SharedStore;
use crate::utils::{format_date, format_status, SharedStorage, PROOF_MODAL_ID};
use crate::viewmodels::LogoutViewModel;

pub struct BillsViewModel {
    document: Document,
    navigator: SharedNavigator,
    store: Option<SharedStore>,
}

impl BillsViewModel {
    pub fn new(
        document: Document,
        navigator: SharedNavigator,
        store: Option<SharedStore>,
        storage: SharedStorage,
    ) -> Rc<Self> {
        LogoutViewModel::new(&document, navigator.clone(), storage);
        let vm = Rc::new(Self {
            document,
            navigator,
            store,
        });
        vm.bind();
        vm
    }

    fn bind(self: &Rc<Self>) {
        if let Some(button) = self.document.get_by_test_id("btn-new-bill") {
            let vm = self.clone();
            on_click(&button, move |_| vm.handle_click_new_bill());
        }

        for icon in self.document.get_all_by_test_id("icon-eye") {
            let vm = self.clone();
            let target = icon.clone();
            on_click(&icon, move |_| vm.handle_click_icon_eye(&target));
        }

        if let Some(close) = self.proof_modal().and_then(|modal| modal.query_selector(".close")) {
            let vm = self.clone();
            on_click(&close, move |_| {
                if let Some(modal) = vm.proof_modal() {
                    hide_modal(&modal);
                }
            });
        }
    }

    fn proof_modal(&self) -> Option<ElementRef> {
        self.document.get_element_by_id(PROOF_MODAL_ID)
    }

    pub fn handle_click_new_bill(&self) {
        self.navigator.navigate_to(Route::NewBill);
    }

    /// Muestra el justificativo del icono en el modal
    pub fn handle_click_icon_eye(&self, icon: &ElementRef) {
        let url = icon.attr("data-bill-url").unwrap_or_default();
        let Some(modal) = self.proof_modal() else {
            log::warn!("⚠️ [BILLS] Modal #{} no encontrado", PROOF_MODAL_ID);
            return;
        };
        let Some(body) = modal.query_selector(".modal-body") else {
            log::warn!("⚠️ [BILLS] Modal sin .modal-body");
            return;
        };

        let width = CONFIG.ui_config.proof_modal_width / 2;
        let image = ElementBuilder::new(&self.document, "img")
            .attr("width", &width.to_string())
            .attr("src", &url)
            .attr("alt", "Bill")
            .build();
        let container = ElementBuilder::new(&self.document, "div")
            .class("bill-proof-container")
            .attr("style", "text-align: center;")
            .child(image)
            .build();

        body.replace_children(&container);
        show_modal(&modal);
    }

    /// Notas del Store en el orden recibido. Sin Store: lista vacía.
    pub async fn get_bills(&self) -> Result<Vec<BillRow>, AppError> {
        let Some(store) = &self.store else {
            return Ok(Vec::new());
        };
        let bills = store.bills().list().await?;
        log::info!("📄 [BILLS] {} notas recibidas", bills.len());
        Ok(bills.iter().map(format_bill_row).collect())
    }
}

/// Fila formateada; si la fecha está corrupta se deja tal cual
pub fn format_bill_row(bill: &Bill) -> BillRow {
    match format_date(&bill.date) {
        Ok(date) => BillRow::new(bill, date, format_status(bill.status)),
        Err(e) => {
            log::warn!("⚠️ [BILLS] Nota {} con fecha corrupta: {}", bill.id, e);
            BillRow::unformatted(bill)
        }
    }
}
