// ============================================================================
// LOGIN VIEW - Formulario de conexión del empleado
// ============================================================================

use crate::dom::{Document, ElementBuilder, ElementRef};

pub fn render_login_page(doc: &Document) -> ElementRef {
    let field = |label: &str, kind: &str, test_id: &str, placeholder: &str| {
        ElementBuilder::new(doc, "div")
            .class("form-group")
            .child(ElementBuilder::new(doc, "label").class("small").text(label).build())
            .child(
                ElementBuilder::new(doc, "input")
                    .attr("type", kind)
                    .test_id(test_id)
                    .class("form-control")
                    .attr("placeholder", placeholder)
                    .attr("required", "")
                    .build(),
            )
            .build()
    };

    let form = ElementBuilder::new(doc, "form")
        .class("form-employee")
        .test_id("form-employee")
        .child(ElementBuilder::new(doc, "h2").class("h3 mb-3").text("Employé").build())
        .child(field("Votre email", "email", "employee-email-input", "johndoe@email.com"))
        .child(field("Mot de passe", "password", "employee-password-input", "******"))
        .child(
            ElementBuilder::new(doc, "button")
                .attr("type", "submit")
                .class("btn btn-primary")
                .test_id("employee-login-button")
                .text("Se connecter")
                .build(),
        )
        .build();

    ElementBuilder::new(doc, "div")
        .class("login-page")
        .child(ElementBuilder::new(doc, "div").class("login-title").text("Billed").build())
        .child(form)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_page_has_employee_form_and_no_navbar() {
        let doc = Document::new();
        doc.body().append_child(&render_login_page(&doc));
        assert!(doc.get_by_test_id("form-employee").is_some());
        assert!(doc.get_by_test_id("employee-email-input").is_some());
        assert!(doc.get_by_test_id("icon-window").is_none());
    }
}
