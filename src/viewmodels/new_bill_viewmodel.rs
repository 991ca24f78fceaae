// ============================================================================
// NEW BILL VIEWMODEL - Formulario "Envoyer une note de frais"
// ============================================================================
// Flujo en dos pasos:
//   1. change en el input de archivo → se valida la extensión y se sube el
//      justificativo (create). El Store devuelve la clave de la nota.
//   2. submit → update(clave, campos del formulario) y vuelta a Bills.
//      Siempre una sola llamada al Store, haya o no justificativo.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::CONFIG;
use crate::dom::{on_change, on_submit, Document, ElementRef, Event};
use crate::error::AppError;
use crate::models::{BillStatus, NewBillPayload, SelectedFile, UploadRequest};
use crate::routes::{Route, SharedNavigator};
use crate::services::SharedStore;
use crate::state::SessionState;
use crate::utils::{file_name_from_path, spawn_local, SharedStorage};
use crate::viewmodels::LogoutViewModel;

/// Justificativo subido para la nota en curso
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProofUpload {
    pub bill_id: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
}

pub struct NewBillViewModel {
    document: Document,
    navigator: SharedNavigator,
    store: Option<SharedStore>,
    session: SessionState,
    proof: RefCell<ProofUpload>,
    // Cada selección de archivo invalida las subidas anteriores en vuelo
    selection: Cell<u64>,
}

impl NewBillViewModel {
    pub fn new(
        document: Document,
        navigator: SharedNavigator,
        store: Option<SharedStore>,
        storage: SharedStorage,
    ) -> Rc<Self> {
        LogoutViewModel::new(&document, navigator.clone(), storage.clone());
        let vm = Rc::new(Self {
            document,
            navigator,
            store,
            session: SessionState::new(storage),
            proof: RefCell::new(ProofUpload::default()),
            selection: Cell::new(0),
        });
        vm.bind();
        vm
    }

    fn bind(self: &Rc<Self>) {
        if let Some(form) = self.document.get_by_test_id("form-new-bill") {
            let vm = self.clone();
            on_submit(&form, move |event| vm.handle_submit(event));
        }
        if let Some(input) = self.document.get_by_test_id("file") {
            let vm = self.clone();
            on_change(&input, move |event| vm.handle_change_file(event));
        }
    }

    pub fn proof(&self) -> ProofUpload {
        self.proof.borrow().clone()
    }

    // ========================================================================
    // ARCHIVO
    // ========================================================================

    pub fn handle_change_file(self: &Rc<Self>, event: &Event) {
        event.prevent_default();
        let input = event.target().clone();
        let selection = self.selection.get() + 1;
        self.selection.set(selection);

        let Some(file) = input.files().into_iter().next() else {
            self.proof.replace(ProofUpload::default());
            return;
        };

        if let Err(e) = validate_proof_file(&file) {
            log::warn!("⚠️ [NEW BILL] {}: {}", file.name, e);
            input.clear_files();
            self.proof.replace(ProofUpload::default());
            self.show_file_error(&e.to_string());
            return;
        }
        self.hide_file_error();

        let file_name = match file_name_from_path(&input.value()) {
            "" => file.name.clone(),
            name => name.to_string(),
        };
        self.proof.replace(ProofUpload {
            file_name: Some(file_name),
            ..ProofUpload::default()
        });

        let Some(store) = self.store.clone() else {
            return;
        };
        let request = UploadRequest {
            file,
            email: self.session.email(),
        };
        let bills = store.bills();
        let vm = self.clone();
        spawn_local(async move {
            match bills.create(request).await {
                Ok(uploaded) => {
                    if vm.selection.get() != selection {
                        log::debug!("🔁 [NEW BILL] Subida {} obsoleta, se ignora", uploaded.key);
                        return;
                    }
                    log::info!("📎 [NEW BILL] Justificativo subido, nota {}", uploaded.key);
                    let mut proof = vm.proof.borrow_mut();
                    proof.bill_id = Some(uploaded.key);
                    proof.file_url = Some(uploaded.file_url);
                }
                Err(e) => log::error!("❌ [NEW BILL] Error subiendo el justificativo: {}", e),
            }
        });
    }

    fn file_error(&self) -> Option<ElementRef> {
        self.document.get_by_test_id("file-error")
    }

    fn show_file_error(&self, message: &str) {
        if let Some(error) = self.file_error() {
            error.set_text(message);
            error.remove_attr("hidden");
        }
    }

    /// No-op si ya está oculto: no debe provocar un re-volcado de #root
    fn hide_file_error(&self) {
        if let Some(error) = self.file_error() {
            if error.attr("hidden").is_some() && error.text_content().is_empty() {
                return;
            }
            error.set_text("");
            error.set_attr("hidden", "");
        }
    }

    // ========================================================================
    // SUBMIT
    // ========================================================================

    pub fn handle_submit(self: &Rc<Self>, event: &Event) {
        event.prevent_default();
        let payload = self.read_form(event.target());

        let Some(store) = self.store.clone() else {
            log::info!("📝 [NEW BILL] Sin Store, vuelta a la lista");
            self.navigator.navigate_to(Route::Bills);
            return;
        };

        // Sin justificativo subido el selector va vacío
        let bill_id = self.proof.borrow().bill_id.clone().unwrap_or_else(|| {
            log::warn!("⚠️ [NEW BILL] Envío sin justificativo subido");
            String::new()
        });

        let bills = store.bills();
        let navigator = self.navigator.clone();
        spawn_local(async move {
            match bills.update(&bill_id, &payload).await {
                Ok(bill) => {
                    log::info!("✅ [NEW BILL] Nota {} enviada", bill.id);
                    navigator.navigate_to(Route::Bills);
                }
                Err(e) => log::error!("❌ [NEW BILL] Error enviando la nota {}: {}", bill_id, e),
            }
        });
    }

    /// Lee los campos del formulario. Importes vacíos o no numéricos → None.
    pub fn read_form(&self, form: &ElementRef) -> NewBillPayload {
        let field = |test_id: &str| {
            form.get_by_test_id(test_id)
                .map(|element| element.value().trim().to_string())
                .unwrap_or_default()
        };
        let proof = self.proof.borrow();

        NewBillPayload {
            email: self.session.email(),
            expense_type: field("expense-type"),
            name: field("expense-name"),
            amount: field("amount").parse().ok(),
            date: field("datepicker"),
            vat: field("vat").parse().ok(),
            pct: field("pct")
                .parse()
                .unwrap_or(CONFIG.bill_config.default_vat_pct),
            commentary: field("commentary"),
            file_url: proof.file_url.clone(),
            file_name: proof.file_name.clone(),
            status: BillStatus::Pending,
        }
    }
}

/// Solo imágenes jpg / jpeg / png (configurable)
pub fn validate_proof_file(file: &SelectedFile) -> Result<(), AppError> {
    match file.extension() {
        Some(extension) if CONFIG.accepts_extension(&extension) => Ok(()),
        _ => Err(AppError::Validation(format!(
            "Formats acceptés : {}",
            CONFIG.bill_config.allowed_proof_extensions.join(", ")
        ))),
    }
}
