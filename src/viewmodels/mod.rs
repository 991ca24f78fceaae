// ============================================================================
// VIEWMODELS - Controladores de cada página
// ============================================================================

pub mod bills_viewmodel;
pub mod login_viewmodel;
pub mod logout_viewmodel;
pub mod new_bill_viewmodel;

pub use bills_viewmodel::{format_bill_row, BillsViewModel};
pub use login_viewmodel::LoginViewModel;
pub use logout_viewmodel::LogoutViewModel;
pub use new_bill_viewmodel::{validate_proof_file, NewBillViewModel, ProofUpload};
