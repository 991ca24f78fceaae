pub mod layout;
pub mod status_pages;
pub mod bills;
pub mod new_bill;
pub mod login;
pub mod routes;

pub use layout::{render_vertical_layout, DISCONNECT_ID, MAIL_ICON_ID, WINDOW_ICON_ID};
pub use status_pages::{render_error_page, render_loading_page};
pub use bills::{render_bills_page, sort_latest_first, BillsPage};
pub use new_bill::{render_new_bill_page, EXPENSE_TYPES};
pub use login::render_login_page;
pub use routes::{render_route, NOT_FOUND_ERROR};
