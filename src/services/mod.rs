pub mod store;
pub mod fixtures;
pub mod mock_store;
#[cfg(target_arch = "wasm32")]
pub mod api_client;

pub use store::*;
pub use fixtures::sample_bills;
pub use mock_store::{FailingBills, MockBills, MockStore};
#[cfg(target_arch = "wasm32")]
pub use api_client::{ApiClient, HttpStore};
