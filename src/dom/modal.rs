// ============================================================================
// MODAL - Mostrar/ocultar modales (mismas clases que Bootstrap)
// ============================================================================

use crate::dom::ElementRef;

pub fn show_modal(modal: &ElementRef) {
    modal.add_class("show");
    modal.set_style("display: block;");
    modal.set_attr("aria-hidden", "false");
}

pub fn hide_modal(modal: &ElementRef) {
    modal.remove_class("show");
    modal.set_style("display: none;");
    modal.set_attr("aria-hidden", "true");
}

pub fn is_modal_open(modal: &ElementRef) -> bool {
    modal.has_class("show")
}
