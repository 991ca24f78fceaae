// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP.
// Errores: si la respuesta no es 2xx se usa el `message` del JSON del backend
// o "Erreur <status>".
// ============================================================================

use std::rc::Rc;
use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize};
use wasm_bindgen::JsValue;
use crate::config::CONFIG;
use crate::error::AppError;
use crate::models::{Bill, Credentials, NewBillPayload, UploadRequest, UploadedFile};
use crate::services::store::{BillsApi, Store};
use crate::utils::{SharedStorage, JWT_STORAGE_KEY};

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Deserialize)]
struct LoginResponse {
    jwt: String,
}

/// Cliente API - SOLO comunicación HTTP
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    storage: SharedStorage,
}

impl ApiClient {
    pub fn new(storage: SharedStorage) -> Self {
        Self {
            base_url: CONFIG.backend_url.trim_end_matches('/').to_string(),
            storage,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Headers comunes: JSON por defecto y Bearer si hay JWT guardado
    fn with_headers(&self, builder: RequestBuilder, json_body: bool, authorized: bool) -> RequestBuilder {
        let builder = if json_body {
            builder.header("Content-Type", "application/json")
        } else {
            builder
        };
        match self.storage.get_item(JWT_STORAGE_KEY) {
            Some(jwt) if authorized => builder.header("Authorization", &format!("Bearer {}", jwt)),
            _ => builder,
        }
    }

    async fn json_or_error<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
        if !response.ok() {
            let status = response.status();
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| format!("Erreur {}", status));
            return Err(AppError::Network {
                status: Some(status),
                message,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Format(format!("Parse error: {}", e)))
    }

    pub async fn list_bills(&self) -> Result<Vec<Bill>, AppError> {
        let response = self
            .with_headers(Request::get(&self.url("/bills")), true, true)
            .send()
            .await
            .map_err(|e| AppError::network(format!("Network error: {}", e)))?;
        Self::json_or_error(response).await
    }

    /// POST multipart (file + email), sin Content-Type JSON
    pub async fn upload_bill(&self, request: UploadRequest) -> Result<UploadedFile, AppError> {
        let form = build_form_data(&request)
            .map_err(|e| AppError::Dom(format!("FormData: {:?}", e)))?;
        let response = self
            .with_headers(Request::post(&self.url("/bills")), false, true)
            .body(form)
            .map_err(|e| AppError::network(format!("Request build error: {}", e)))?
            .send()
            .await
            .map_err(|e| AppError::network(format!("Network error: {}", e)))?;
        Self::json_or_error(response).await
    }

    pub async fn update_bill(&self, selector: &str, payload: &NewBillPayload) -> Result<Bill, AppError> {
        let response = self
            .with_headers(Request::patch(&self.url(&format!("/bills/{}", selector))), true, true)
            .json(payload)
            .map_err(|e| AppError::network(format!("Serialization error: {}", e)))?
            .send()
            .await
            .map_err(|e| AppError::network(format!("Network error: {}", e)))?;
        Self::json_or_error(response).await
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<String, AppError> {
        log::info!("🔐 [API] Login para usuario: {}", credentials.email);
        let response = self
            .with_headers(Request::post(&self.url("/auth/login")), true, false)
            .json(credentials)
            .map_err(|e| AppError::network(format!("Serialization error: {}", e)))?
            .send()
            .await
            .map_err(|e| AppError::network(format!("Network error: {}", e)))?;
        let body: LoginResponse = Self::json_or_error(response).await?;
        Ok(body.jwt)
    }
}

fn build_form_data(request: &UploadRequest) -> Result<web_sys::FormData, JsValue> {
    let bytes = js_sys::Uint8Array::from(request.file.data.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let props = web_sys::BlobPropertyBag::new();
    props.set_type(&request.file.content_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &props)?;
    let form = web_sys::FormData::new()?;
    form.append_with_blob_and_filename("file", &blob, &request.file.name)?;
    form.append_with_str("email", &request.email)?;
    Ok(form)
}

/// Recurso `/bills` sobre HTTP
pub struct HttpBills {
    client: ApiClient,
}

#[async_trait(?Send)]
impl BillsApi for HttpBills {
    async fn list(&self) -> Result<Vec<Bill>, AppError> {
        self.client.list_bills().await
    }

    async fn create(&self, request: UploadRequest) -> Result<UploadedFile, AppError> {
        self.client.upload_bill(request).await
    }

    async fn update(&self, selector: &str, payload: &NewBillPayload) -> Result<Bill, AppError> {
        self.client.update_bill(selector, payload).await
    }
}

/// Store real del navegador
pub struct HttpStore {
    bills: Rc<HttpBills>,
}

impl HttpStore {
    pub fn new(storage: SharedStorage) -> Self {
        Self {
            bills: Rc::new(HttpBills {
                client: ApiClient::new(storage),
            }),
        }
    }
}

#[async_trait(?Send)]
impl Store for HttpStore {
    fn bills(&self) -> Rc<dyn BillsApi> {
        self.bills.clone()
    }

    async fn login(&self, credentials: &Credentials) -> Result<String, AppError> {
        self.bills.client.login(credentials).await
    }
}
