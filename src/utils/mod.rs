// Utils compartidos

pub mod constants;
pub mod format;
pub mod storage;
pub mod task;

pub use constants::*;
pub use format::*;
pub use storage::*;
pub use task::*;
