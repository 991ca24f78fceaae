// ============================================================================
// STATE MODULE - Estado compartido (sesión en localStorage)
// ============================================================================

pub mod session_state;

pub use session_state::*;
