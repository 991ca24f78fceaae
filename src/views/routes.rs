// ============================================================================
// ROUTE VIEWS - Página a pintar para cada ruta (sin lógica)
// ============================================================================

use crate::dom::{Document, ElementRef};
use crate::routes::Route;
use crate::views::bills::{render_bills_page, BillsPage};
use crate::views::login::render_login_page;
use crate::views::new_bill::render_new_bill_page;
use crate::views::status_pages::render_error_page;

/// Texto de la página de ruta desconocida
pub const NOT_FOUND_ERROR: &str = "Erreur 404";

/// `None` = ruta desconocida
pub fn render_route(doc: &Document, route: Option<Route>, bills: BillsPage<'_>) -> ElementRef {
    match route {
        None => render_error_page(doc, NOT_FOUND_ERROR),
        Some(Route::Login) => render_login_page(doc),
        Some(Route::Bills) => render_bills_page(doc, bills),
        Some(Route::NewBill) => render_new_bill_page(doc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_renders_its_landmark() {
        let cases = [
            (Some(Route::Login), "form-employee"),
            (Some(Route::Bills), "btn-new-bill"),
            (Some(Route::NewBill), "form-new-bill"),
            (None, "error-message"),
        ];
        for (route, landmark) in cases {
            let doc = Document::new();
            doc.body()
                .append_child(&render_route(&doc, route, BillsPage::Loaded(&[])));
            assert!(doc.get_by_test_id(landmark).is_some(), "{:?} -> {}", route, landmark);
        }
    }
}
