// ============================================================================
// STORAGE - localStorage detrás de un trait (memoria en tests, window en wasm)
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use serde::{Serialize, de::DeserializeOwned};
use crate::error::AppError;

/// Almacenamiento clave/valor con la forma de `window.localStorage`
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove_item(&self, key: &str) -> Result<(), AppError>;
    fn clear(&self) -> Result<(), AppError>;
}

pub type SharedStorage = Rc<dyn KeyValueStorage>;

/// Implementación en memoria (tests y entornos sin navegador)
#[derive(Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStorage {
        Rc::new(Self::new())
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), AppError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        self.items.borrow_mut().clear();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStorage;

#[cfg(target_arch = "wasm32")]
mod browser {
    use web_sys::{window, Storage};
    use super::KeyValueStorage;
    use crate::error::AppError;

    /// `window.localStorage` real
    pub struct BrowserStorage;

    impl BrowserStorage {
        fn storage() -> Result<Storage, AppError> {
            window()
                .and_then(|w| w.local_storage().ok().flatten())
                .ok_or_else(|| AppError::Storage("No se pudo acceder a localStorage".to_string()))
        }
    }

    impl KeyValueStorage for BrowserStorage {
        fn get_item(&self, key: &str) -> Option<String> {
            Self::storage().ok()?.get_item(key).ok()?
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
            Self::storage()?
                .set_item(key, value)
                .map_err(|_| AppError::Storage("Error guardando en localStorage".to_string()))
        }

        fn remove_item(&self, key: &str) -> Result<(), AppError> {
            Self::storage()?
                .remove_item(key)
                .map_err(|_| AppError::Storage("Error eliminando de localStorage".to_string()))
        }

        fn clear(&self) -> Result<(), AppError> {
            Self::storage()?
                .clear()
                .map_err(|_| AppError::Storage("Error limpiando localStorage".to_string()))
        }
    }
}

pub fn save_to_storage<T: Serialize>(
    storage: &dyn KeyValueStorage,
    key: &str,
    value: &T,
) -> Result<(), AppError> {
    let json = serde_json::to_string(value)
        .map_err(|e| AppError::Storage(format!("Error serializando datos: {}", e)))?;
    storage.set_item(key, &json)
}

/// Lee y deserializa; una entrada corrupta cuenta como ausente
pub fn load_from_storage<T: DeserializeOwned>(storage: &dyn KeyValueStorage, key: &str) -> Option<T> {
    let json = storage.get_item(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("⚠️ [STORAGE] Entrada '{}' ilegible: {}", key, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        name: String,
    }

    #[test]
    fn save_then_load_typed_value() {
        let storage = MemoryStorage::new();
        save_to_storage(&storage, "entry", &Entry { name: "a".into() }).unwrap();
        assert_eq!(
            load_from_storage::<Entry>(&storage, "entry"),
            Some(Entry { name: "a".into() })
        );
    }

    #[test]
    fn corrupt_entry_loads_as_none() {
        let storage = MemoryStorage::new();
        storage.set_item("entry", "{not json").unwrap();
        assert_eq!(load_from_storage::<Entry>(&storage, "entry"), None);
    }

    #[test]
    fn clear_removes_everything() {
        let storage = MemoryStorage::new();
        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "2").unwrap();
        storage.clear().unwrap();
        assert!(storage.is_empty());
        assert_eq!(storage.get_item("a"), None);
    }
}
