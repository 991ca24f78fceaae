pub mod bill;
pub mod user;

pub use bill::{Bill, BillRow, BillStatus, NewBillPayload, SelectedFile, UploadRequest, UploadedFile};
pub use user::{Credentials, User, UserType};
