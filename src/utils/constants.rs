/// Clave de localStorage con el usuario conectado (JSON)
pub const USER_STORAGE_KEY: &str = "user";

/// Clave de localStorage con el JWT devuelto por /auth/login
pub const JWT_STORAGE_KEY: &str = "jwt";

/// id del contenedor donde el router monta cada página
pub const ROOT_ELEMENT_ID: &str = "root";

/// Clase CSS del icono activo en el layout vertical
pub const ACTIVE_ICON_CLASS: &str = "active-icon";

/// id del modal del justificativo
pub const PROOF_MODAL_ID: &str = "modaleFile";

/// Fondo del body en la página de login / resto de páginas
pub const LOGIN_BACKGROUND: &str = "background-color: #0E5AE5;";
pub const APP_BACKGROUND: &str = "background-color: #fff;";
