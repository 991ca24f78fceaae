use chrono::{Datelike, NaiveDate};
use crate::error::AppError;
use crate::models::BillStatus;

/// Meses abreviados en francés (tres letras, primera en mayúscula)
const MONTHS_FR: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// "2004-04-04" -> "4 Avr. 04"
pub fn format_date(raw: &str) -> Result<String, AppError> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| AppError::Format(format!("fecha '{}': {}", raw, e)))?;
    let month = MONTHS_FR[date.month0() as usize];
    Ok(format!("{} {}. {:02}", date.day(), month, date.year().rem_euclid(100)))
}

/// Etiqueta visible del estado de una nota de gastos
pub fn format_status(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "En attente",
        BillStatus::Accepted => "Accepté",
        BillStatus::Refused => "Refusé",
    }
}

/// Extensión (en minúsculas) de un nombre de archivo, si tiene
pub fn file_extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// "C:\\fakepath\\image.png" -> "image.png"
pub fn file_name_from_path(path: &str) -> &str {
    path.rsplit(['\\', '/']).next().unwrap_or(path)
}
