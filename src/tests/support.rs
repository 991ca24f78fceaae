// ============================================================================
// SUPPORT - Logger de captura, navegador de prueba y sesiones
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use async_trait::async_trait;
use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::error::AppError;
use crate::models::{Bill, NewBillPayload, UploadRequest, UploadedFile, User};
use crate::routes::Navigator;
use crate::services::BillsApi;
use crate::state::SessionState;
use crate::utils::{MemoryStorage, SharedStorage};

// ----------------------------------------------------------------------------
// Logs
// ----------------------------------------------------------------------------

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.with(|records| {
            records
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Instala el logger (una vez por proceso) y vacía los registros de este hilo
pub fn capture_logs() {
    INIT.call_once(|| {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Trace);
    });
    RECORDS.with(|records| records.borrow_mut().clear());
}

pub fn logged(level: Level) -> Vec<String> {
    RECORDS.with(|records| {
        records
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    })
}

// ----------------------------------------------------------------------------
// Navegación
// ----------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct RecordingNavigator {
    paths: Rc<RefCell<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.paths.borrow_mut().push(path.to_string());
    }
}

// ----------------------------------------------------------------------------
// Sesión
// ----------------------------------------------------------------------------

pub const EMPLOYEE_EMAIL: &str = "a@a";

/// Storage con un empleado conectado
pub fn employee_storage() -> SharedStorage {
    let storage = MemoryStorage::shared();
    SessionState::new(storage.clone())
        .set_user(&User::employee(EMPLOYEE_EMAIL, "azerty"))
        .expect("memory storage never fails");
    storage
}

// ----------------------------------------------------------------------------
// Store
// ----------------------------------------------------------------------------

/// Recurso que siempre lista las mismas notas
pub struct StaticBills(pub Vec<Bill>);

#[async_trait(?Send)]
impl BillsApi for StaticBills {
    async fn list(&self) -> Result<Vec<Bill>, AppError> {
        Ok(self.0.clone())
    }

    async fn create(&self, _request: UploadRequest) -> Result<UploadedFile, AppError> {
        Err(AppError::http(500))
    }

    async fn update(&self, _selector: &str, _payload: &NewBillPayload) -> Result<Bill, AppError> {
        Err(AppError::http(500))
    }
}
