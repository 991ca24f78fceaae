// ============================================================================
// LAYOUT - Barra vertical + contenedor de página
// ============================================================================

use crate::dom::{Document, ElementBuilder, ElementRef};

pub const WINDOW_ICON_ID: &str = "layout-icon1";
pub const MAIL_ICON_ID: &str = "layout-icon2";
pub const DISCONNECT_ID: &str = "layout-disconnect";

/// Barra de navegación vertical (icono de notas, icono de nueva nota, logout)
pub fn render_vertical_layout(doc: &Document) -> ElementRef {
    let icon = |id: &str, test_id: &str, glyph: &str| {
        ElementBuilder::new(doc, "div")
            .id(id)
            .test_id(test_id)
            .child(ElementBuilder::new(doc, "span").class("layout-glyph").text(glyph).build())
            .build()
    };

    ElementBuilder::new(doc, "div")
        .class("vertical-navbar")
        .child(ElementBuilder::new(doc, "div").class("layout-title").text("Billed").build())
        .child(icon(WINDOW_ICON_ID, "icon-window", "▤"))
        .child(icon(MAIL_ICON_ID, "icon-mail", "✉"))
        .child(icon(DISCONNECT_ID, "layout-disconnect", "⏻"))
        .build()
}

/// Página completa: layout vertical + contenido
pub fn render_page_shell(doc: &Document, content: ElementRef) -> ElementRef {
    ElementBuilder::new(doc, "div")
        .class("layout")
        .child(render_vertical_layout(doc))
        .child(content)
        .build()
}

/// Cabecera de contenido con título
pub fn render_content_header(doc: &Document, title: &str) -> ElementRef {
    ElementBuilder::new(doc, "div")
        .class("content-header")
        .child(ElementBuilder::new(doc, "div").class("content-title").text(title).build())
        .build()
}
