// ============================================================================
// DOM MODULE - Documento en memoria + helpers
// ============================================================================

pub mod document;
pub mod builder;
pub mod events;
pub mod modal;

pub use document::*;
pub use builder::*;
pub use events::*;
pub use modal::*;
