// ============================================================================
// NEW BILL VIEW - Formulario "Envoyer une note de frais"
// ============================================================================

use crate::dom::{Document, ElementBuilder, ElementRef};
use crate::views::layout::{render_content_header, render_page_shell};

pub const EXPENSE_TYPES: [&str; 7] = [
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

fn labelled(doc: &Document, label: &str, control: ElementRef) -> ElementRef {
    ElementBuilder::new(doc, "div")
        .class("col-half")
        .child(ElementBuilder::new(doc, "label").class("bold-label").text(label).build())
        .child(control)
        .build()
}

fn input(doc: &Document, kind: &str, test_id: &str, placeholder: Option<&str>, required: bool) -> ElementRef {
    let mut builder = ElementBuilder::new(doc, "input")
        .attr("type", kind)
        .class("form-control blue-border")
        .test_id(test_id);
    if let Some(placeholder) = placeholder {
        builder = builder.attr("placeholder", placeholder);
    }
    if required {
        builder = builder.attr("required", "");
    }
    builder.build()
}

pub fn render_new_bill_page(doc: &Document) -> ElementRef {
    let expense_type = ElementBuilder::new(doc, "select")
        .class("form-control blue-border")
        .test_id("expense-type")
        .attr("required", "")
        .value(EXPENSE_TYPES[0])
        .children(
            EXPENSE_TYPES
                .iter()
                .map(|kind| ElementBuilder::new(doc, "option").text(kind).build()),
        )
        .build();

    let commentary = ElementBuilder::new(doc, "textarea")
        .class("form-control blue-border")
        .test_id("commentary")
        .attr("rows", "3")
        .build();

    let vat_group = ElementBuilder::new(doc, "div")
        .class("flex-col")
        .child(input(doc, "number", "vat", Some("70"), false))
        .child(
            ElementBuilder::new(doc, "div")
                .class("col-half-right")
                .child(input(doc, "number", "pct", Some("20"), false))
                .build(),
        )
        .build();

    let file_error = ElementBuilder::new(doc, "p")
        .class("error-message")
        .test_id("file-error")
        .attr("hidden", "")
        .build();

    let form = ElementBuilder::new(doc, "form")
        .test_id("form-new-bill")
        .child(labelled(doc, "Type de dépense", expense_type))
        .child(labelled(doc, "Nom de la dépense", input(doc, "text", "expense-name", Some("Vol Paris Londres"), false)))
        .child(labelled(doc, "Date", input(doc, "date", "datepicker", None, true)))
        .child(labelled(doc, "Montant TTC", input(doc, "number", "amount", Some("348"), true)))
        .child(labelled(doc, "TVA", vat_group))
        .child(labelled(doc, "Commentaire", commentary))
        .child(labelled(doc, "Justificatif", input(doc, "file", "file", None, true)))
        .child(file_error)
        .child(
            ElementBuilder::new(doc, "button")
                .attr("type", "submit")
                .id("btn-send-bill")
                .class("btn btn-primary")
                .text("Envoyer")
                .build(),
        )
        .build();

    let content = ElementBuilder::new(doc, "div")
        .class("content")
        .child(render_content_header(doc, "Envoyer une note de frais"))
        .child(
            ElementBuilder::new(doc, "div")
                .class("form-newbill-container content-inner")
                .child(form)
                .build(),
        )
        .build();

    render_page_shell(doc, content)
}
