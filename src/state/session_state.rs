// ============================================================================
// SESSION STATE - Usuario conectado (persistido en localStorage)
// ============================================================================

use crate::error::AppError;
use crate::models::User;
use crate::utils::{load_from_storage, save_to_storage, SharedStorage, JWT_STORAGE_KEY, USER_STORAGE_KEY};

/// Acceso a la sesión guardada bajo la clave "user"
#[derive(Clone)]
pub struct SessionState {
    storage: SharedStorage,
}

impl SessionState {
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }

    /// Usuario actual; una entrada ilegible cuenta como "sin sesión"
    pub fn current_user(&self) -> Option<User> {
        load_from_storage::<User>(self.storage.as_ref(), USER_STORAGE_KEY)
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user().is_some()
    }

    /// Email para sellar notas y subidas ("" si la sesión no lo tiene)
    pub fn email(&self) -> String {
        self.current_user()
            .map(|user| user.email_or_empty().to_string())
            .unwrap_or_default()
    }

    pub fn set_user(&self, user: &User) -> Result<(), AppError> {
        save_to_storage(self.storage.as_ref(), USER_STORAGE_KEY, user)
    }

    pub fn set_jwt(&self, jwt: &str) -> Result<(), AppError> {
        self.storage.set_item(JWT_STORAGE_KEY, jwt)
    }

    /// Logout: se borra todo el storage
    pub fn clear(&self) -> Result<(), AppError> {
        self.storage.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserType;
    use crate::utils::{KeyValueStorage, MemoryStorage};

    #[test]
    fn no_entry_means_no_session() {
        let session = SessionState::new(MemoryStorage::shared());
        assert!(!session.is_logged_in());
        assert_eq!(session.email(), "");
    }

    #[test]
    fn stored_user_is_read_back() {
        let storage = MemoryStorage::shared();
        storage
            .set_item(USER_STORAGE_KEY, r#"{"type":"Employee","email":"a@a"}"#)
            .unwrap();
        let session = SessionState::new(storage);
        let user = session.current_user().unwrap();
        assert_eq!(user.user_type, UserType::Employee);
        assert_eq!(session.email(), "a@a");
    }

    #[test]
    fn clear_logs_out() {
        let session = SessionState::new(MemoryStorage::shared());
        session.set_user(&User::employee("a@a", "pw")).unwrap();
        session.set_jwt("token").unwrap();
        session.clear().unwrap();
        assert!(!session.is_logged_in());
    }
}
