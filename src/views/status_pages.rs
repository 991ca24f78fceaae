// ============================================================================
// STATUS PAGES - Página de carga y página de error
// ============================================================================

use crate::dom::{Document, ElementBuilder, ElementRef};
use crate::views::layout::render_page_shell;

pub fn render_loading_page(doc: &Document) -> ElementRef {
    let content = ElementBuilder::new(doc, "div")
        .class("content")
        .child(ElementBuilder::new(doc, "div").id("loading").text("Loading...").build())
        .build();
    render_page_shell(doc, content)
}

/// Mensaje fijo + texto del error ("Erreur 404"); nunca trazas
pub fn render_error_page(doc: &Document, error: &str) -> ElementRef {
    let message = ElementBuilder::new(doc, "div")
        .class("error-message")
        .test_id("error-message")
        .text(error)
        .build();
    let content = ElementBuilder::new(doc, "div")
        .class("content")
        .child(
            ElementBuilder::new(doc, "div")
                .class("content-header")
                .child(message)
                .build(),
        )
        .build();
    render_page_shell(doc, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_page_shows_error_label() {
        let doc = Document::new();
        let page = render_error_page(&doc, "Erreur 500");
        doc.body().append_child(&page);
        assert_eq!(doc.get_by_test_id("error-message").unwrap().text_content(), "Erreur 500");
        assert!(doc.get_by_test_id("icon-window").is_some());
    }

    #[test]
    fn loading_page_keeps_the_navbar() {
        let doc = Document::new();
        doc.body().append_child(&render_loading_page(&doc));
        assert!(doc.contains_text("Loading..."));
        assert!(doc.get_by_test_id("icon-mail").is_some());
    }
}
