// ============================================================================
// MOCK STORE - Backend en memoria (tests y build de demo sin servidor)
// ============================================================================
// Cuenta las llamadas y permite sustituir `bills()` para la próxima llamada,
// por ejemplo para simular un 404/500 del backend.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use async_trait::async_trait;
use crate::error::AppError;
use crate::models::{Bill, Credentials, NewBillPayload, UploadRequest, UploadedFile};
use crate::services::fixtures::sample_bills;
use crate::services::store::{BillsApi, Store};

pub const MOCK_FILE_URL: &str = "https://localhost:3456/images/test.jpg";
pub const MOCK_BILL_KEY: &str = "1234";
pub const MOCK_JWT: &str = "mock-jwt";

/// Recurso `/bills` respondido con fixtures
#[derive(Default)]
pub struct MockBills {
    list_calls: Cell<usize>,
    create_calls: Cell<usize>,
    update_calls: Cell<usize>,
    uploads: RefCell<Vec<UploadRequest>>,
    updates: RefCell<Vec<(String, NewBillPayload)>>,
}

impl MockBills {
    pub fn list_calls(&self) -> usize {
        self.list_calls.get()
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.get()
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.get()
    }

    pub fn uploads(&self) -> Vec<UploadRequest> {
        self.uploads.borrow().clone()
    }

    pub fn updates(&self) -> Vec<(String, NewBillPayload)> {
        self.updates.borrow().clone()
    }
}

#[async_trait(?Send)]
impl BillsApi for MockBills {
    async fn list(&self) -> Result<Vec<Bill>, AppError> {
        self.list_calls.set(self.list_calls.get() + 1);
        Ok(sample_bills())
    }

    async fn create(&self, request: UploadRequest) -> Result<UploadedFile, AppError> {
        self.create_calls.set(self.create_calls.get() + 1);
        self.uploads.borrow_mut().push(request);
        Ok(UploadedFile {
            file_url: MOCK_FILE_URL.to_string(),
            key: MOCK_BILL_KEY.to_string(),
        })
    }

    async fn update(&self, selector: &str, payload: &NewBillPayload) -> Result<Bill, AppError> {
        self.update_calls.set(self.update_calls.get() + 1);
        self.updates
            .borrow_mut()
            .push((selector.to_string(), payload.clone()));
        let mut bill = sample_bills().remove(0);
        bill.id = selector.to_string();
        bill.email = payload.email.clone();
        bill.expense_type = payload.expense_type.clone();
        bill.name = payload.name.clone();
        bill.amount = payload.amount.unwrap_or_default();
        bill.date = payload.date.clone();
        bill.vat = payload.vat;
        bill.pct = Some(payload.pct);
        bill.commentary = payload.commentary.clone();
        bill.file_url = payload.file_url.clone();
        bill.file_name = payload.file_name.clone();
        bill.status = payload.status;
        bill.comment_admin = None;
        Ok(bill)
    }
}

/// Recurso que rechaza todas las llamadas con el mismo error
pub struct FailingBills {
    error: AppError,
}

impl FailingBills {
    pub fn new(error: AppError) -> Self {
        Self { error }
    }
}

#[async_trait(?Send)]
impl BillsApi for FailingBills {
    async fn list(&self) -> Result<Vec<Bill>, AppError> {
        Err(self.error.clone())
    }

    async fn create(&self, _request: UploadRequest) -> Result<UploadedFile, AppError> {
        Err(self.error.clone())
    }

    async fn update(&self, _selector: &str, _payload: &NewBillPayload) -> Result<Bill, AppError> {
        Err(self.error.clone())
    }
}

#[derive(Default)]
pub struct MockStore {
    bills: Rc<MockBills>,
    bills_calls: Cell<usize>,
    overrides: RefCell<VecDeque<Rc<dyn BillsApi>>>,
    fail_login: Cell<bool>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// Veces que se llamó a `bills()`
    pub fn bills_calls(&self) -> usize {
        self.bills_calls.get()
    }

    /// Recurso por defecto (para inspeccionar contadores)
    pub fn api(&self) -> Rc<MockBills> {
        self.bills.clone()
    }

    /// La próxima llamada a `bills()` devuelve `api`
    pub fn mock_bills_once(&self, api: Rc<dyn BillsApi>) {
        self.overrides.borrow_mut().push_back(api);
    }

    /// La próxima llamada a `bills()` devuelve un recurso que falla con `error`
    pub fn fail_bills_once(&self, error: AppError) {
        self.mock_bills_once(Rc::new(FailingBills::new(error)));
    }

    pub fn set_fail_login(&self, fail: bool) {
        self.fail_login.set(fail);
    }
}

#[async_trait(?Send)]
impl Store for MockStore {
    fn bills(&self) -> Rc<dyn BillsApi> {
        self.bills_calls.set(self.bills_calls.get() + 1);
        match self.overrides.borrow_mut().pop_front() {
            Some(api) => api,
            None => self.bills.clone(),
        }
    }

    async fn login(&self, credentials: &Credentials) -> Result<String, AppError> {
        if self.fail_login.get() || credentials.email.is_empty() {
            return Err(AppError::http(401));
        }
        Ok(MOCK_JWT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn list_returns_fixtures_in_backend_order() {
        let store = MockStore::new();
        let bills = block_on(store.bills().list()).unwrap();
        let ids: Vec<&str> = bills.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["47qAXb6fIm2zOKkLzMro", "BeKy5Mo4jkmdfPGYpTxZ", "UIUZtnPQvnbFnB0ozvJh", "qcCK3SzECmaZAGRrHjaC"]
        );
        assert_eq!(store.bills_calls(), 1);
        assert_eq!(store.api().list_calls(), 1);
    }

    #[test]
    fn override_applies_to_a_single_call() {
        let store = MockStore::new();
        store.fail_bills_once(AppError::http(500));
        let err = block_on(store.bills().list()).unwrap_err();
        assert_eq!(err.to_string(), "Erreur 500");
        assert!(block_on(store.bills().list()).is_ok());
        assert_eq!(store.bills_calls(), 2);
    }

    #[test]
    fn login_rejects_empty_email() {
        let store = MockStore::new();
        let creds = Credentials { email: String::new(), password: "x".into() };
        assert!(block_on(store.login(&creds)).is_err());
        let creds = Credentials { email: "a@a".into(), password: "x".into() };
        assert_eq!(block_on(store.login(&creds)).unwrap(), MOCK_JWT);
    }
}
