use serde::{Deserialize, Deserializer, Serialize};
use crate::utils::file_extension;

/// Estado de una nota de gastos (solo el backend lo cambia tras la creación)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
}

/// Nota de gastos tal como la devuelve el Store
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    /// Categoría del gasto ("Transports", "Hôtel et logement", ...)
    #[serde(rename = "type", default)]
    pub expense_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "de_amount")]
    pub amount: u32,
    /// Fecha ISO "YYYY-MM-DD" tal como está guardada
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "de_optional_amount")]
    pub vat: Option<u32>,
    #[serde(default, deserialize_with = "de_optional_amount")]
    pub pct: Option<u32>,
    #[serde(default)]
    pub commentary: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub status: BillStatus,
    #[serde(default)]
    pub comment_admin: Option<String>,
}

/// Proyección lista para pintar en la tabla de notas
#[derive(Clone, Debug, PartialEq)]
pub struct BillRow {
    pub id: String,
    pub expense_type: String,
    pub name: String,
    /// Fecha mostrada ("4 Avr. 04", o la cruda si no se pudo formatear)
    pub date: String,
    /// Fecha ISO original, clave de orden
    pub raw_date: String,
    pub amount: u32,
    pub status: String,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
}

impl BillRow {
    pub fn new(bill: &Bill, display_date: String, status_label: &str) -> Self {
        Self {
            id: bill.id.clone(),
            expense_type: bill.expense_type.clone(),
            name: bill.name.clone(),
            date: display_date,
            raw_date: bill.date.clone(),
            amount: bill.amount,
            status: status_label.to_string(),
            file_url: bill.file_url.clone(),
            file_name: bill.file_name.clone(),
        }
    }

    /// Fila con la fecha sin formatear
    pub fn unformatted(bill: &Bill) -> Self {
        Self::new(bill, bill.date.clone(), crate::utils::format_status(bill.status))
    }
}

/// Cuerpo enviado al completar una nota desde el formulario
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBillPayload {
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub amount: Option<u32>,
    pub date: String,
    pub vat: Option<u32>,
    pub pct: u32,
    pub commentary: String,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub status: BillStatus,
}

/// Archivo elegido en un `<input type="file">`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    pub fn extension(&self) -> Option<String> {
        file_extension(&self.name)
    }
}

/// Subida del justificativo (multipart: file + email)
#[derive(Clone, Debug, PartialEq)]
pub struct UploadRequest {
    pub file: SelectedFile,
    pub email: String,
}

/// Respuesta del Store a la subida: `key` es el id de la nota creada
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub file_url: String,
    pub key: String,
}

/// Importes: número JSON, string numérico, "" o null
fn de_optional_amount<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("importe inválido: {}", n))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("importe inválido: {}", s))),
        Some(other) => Err(D::Error::custom(format!("importe inválido: {}", other))),
    }
}

fn de_amount<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_optional_amount(deserializer)?.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bill_accepts_string_and_empty_amounts() {
        let json = r#"{
            "id": "BeKy5Mo4jkmdfPGYpTxZ",
            "vat": "",
            "amount": 100,
            "name": "test1",
            "fileName": "1592770761.jpeg",
            "commentary": "plop",
            "pct": "20",
            "type": "Transports",
            "email": "a@a",
            "fileUrl": "https://test.storage.tld/1592770761.jpeg",
            "date": "2001-01-01",
            "status": "refused",
            "commentAdmin": "en fait non"
        }"#;
        let bill: Bill = serde_json::from_str(json).unwrap();
        assert_eq!(bill.vat, None);
        assert_eq!(bill.pct, Some(20));
        assert_eq!(bill.amount, 100);
        assert_eq!(bill.expense_type, "Transports");
        assert_eq!(bill.status, BillStatus::Refused);
        assert_eq!(bill.file_name.as_deref(), Some("1592770761.jpeg"));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let json = r#"{"amount": -5, "status": "pending"}"#;
        assert!(serde_json::from_str::<Bill>(json).is_err());
    }

    #[test]
    fn unknown_status_is_rejected() {
        let json = r#"{"amount": 5, "status": "archived"}"#;
        assert!(serde_json::from_str::<Bill>(json).is_err());
    }

    #[test]
    fn payload_uses_wire_names() {
        let payload = NewBillPayload {
            email: "a@a".into(),
            expense_type: "Transports".into(),
            name: "Vol Paris Londres".into(),
            amount: Some(348),
            date: "2022-03-01".into(),
            vat: Some(70),
            pct: 20,
            commentary: String::new(),
            file_url: Some("https://localhost:3456/images/test.jpg".into()),
            file_name: Some("test.jpg".into()),
            status: BillStatus::Pending,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["type"], "Transports");
        assert_eq!(value["fileUrl"], "https://localhost:3456/images/test.jpg");
        assert_eq!(value["status"], "pending");
    }

    #[test]
    fn uploaded_file_reads_camel_case() {
        let uploaded: UploadedFile =
            serde_json::from_str(r#"{"fileUrl": "https://localhost:3456/images/test.jpg", "key": "1234"}"#)
                .unwrap();
        assert_eq!(uploaded.key, "1234");
    }
}
