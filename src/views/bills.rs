// ============================================================================
// BILLS VIEW - Tabla "Mes notes de frais" + modal del justificativo
// ============================================================================

use crate::dom::{Document, ElementBuilder, ElementRef};
use crate::models::BillRow;
use crate::utils::PROOF_MODAL_ID;
use crate::views::layout::{render_content_header, render_page_shell};
use crate::views::status_pages::{render_error_page, render_loading_page};

/// Estado de la página de notas
pub enum BillsPage<'a> {
    Loading,
    Failed(&'a str),
    Loaded(&'a [BillRow]),
}

pub fn render_bills_page(doc: &Document, page: BillsPage<'_>) -> ElementRef {
    match page {
        BillsPage::Loading => render_loading_page(doc),
        BillsPage::Failed(error) => render_error_page(doc, error),
        BillsPage::Loaded(rows) => render_bills(doc, rows),
    }
}

/// Filas de la más reciente a la más antigua (orden estable para fechas iguales)
pub fn sort_latest_first(rows: &[BillRow]) -> Vec<&BillRow> {
    let mut sorted: Vec<&BillRow> = rows.iter().collect();
    sorted.sort_by(|a, b| b.raw_date.cmp(&a.raw_date));
    sorted
}

fn render_bills(doc: &Document, rows: &[BillRow]) -> ElementRef {
    let header = render_content_header(doc, "Mes notes de frais");
    header.append_child(
        &ElementBuilder::new(doc, "button")
            .attr("type", "button")
            .test_id("btn-new-bill")
            .class("btn btn-primary")
            .text("Nouvelle note de frais")
            .build(),
    );

    let head_row = ElementBuilder::new(doc, "tr")
        .children(
            ["Type", "Nom", "Date", "Montant", "Statut", "Actions"]
                .into_iter()
                .map(|title| ElementBuilder::new(doc, "th").text(title).build()),
        )
        .build();

    let body = ElementBuilder::new(doc, "tbody")
        .test_id("tbody")
        .children(sort_latest_first(rows).into_iter().map(|row| render_row(doc, row)))
        .build();

    let table = ElementBuilder::new(doc, "table")
        .id("example")
        .class("table table-striped")
        .child(ElementBuilder::new(doc, "thead").child(head_row).build())
        .child(body)
        .build();

    let content = ElementBuilder::new(doc, "div")
        .class("content")
        .child(header)
        .child(ElementBuilder::new(doc, "div").id("data-table").child(table).build())
        .build();

    let page = render_page_shell(doc, content);
    page.append_child(&render_proof_modal(doc));
    page
}

fn render_row(doc: &Document, row: &BillRow) -> ElementRef {
    let cell = |text: &str| ElementBuilder::new(doc, "td").text(text).build();
    let eye = ElementBuilder::new(doc, "div")
        .test_id("icon-eye")
        .attr("data-bill-url", row.file_url.as_deref().unwrap_or(""))
        .child(ElementBuilder::new(doc, "span").class("eye-glyph").text("👁").build())
        .build();
    let actions = ElementBuilder::new(doc, "td")
        .child(ElementBuilder::new(doc, "div").class("icon-actions").child(eye).build())
        .build();

    ElementBuilder::new(doc, "tr")
        .attr("data-bill-id", &row.id)
        .child(cell(&row.expense_type))
        .child(cell(&row.name))
        .child(cell(&row.date))
        .child(cell(&format!("{} €", row.amount)))
        .child(cell(&row.status))
        .child(actions)
        .build()
}

fn render_proof_modal(doc: &Document) -> ElementRef {
    let title = ElementBuilder::new(doc, "h5")
        .class("modal-title")
        .id("exampleModalLongTitle")
        .text("Justificatif")
        .build();
    let close = ElementBuilder::new(doc, "button")
        .attr("type", "button")
        .class("close")
        .attr("data-dismiss", "modal")
        .attr("aria-label", "Close")
        .text("×")
        .build();
    let content = ElementBuilder::new(doc, "div")
        .class("modal-content")
        .child(ElementBuilder::new(doc, "div").class("modal-header").child(title).child(close).build())
        .child(ElementBuilder::new(doc, "div").class("modal-body").build())
        .build();

    ElementBuilder::new(doc, "div")
        .class("modal fade")
        .id(PROOF_MODAL_ID)
        .attr("tabindex", "-1")
        .attr("role", "dialog")
        .attr("aria-hidden", "true")
        .child(
            ElementBuilder::new(doc, "div")
                .class("modal-dialog modal-dialog-centered modal-lg")
                .attr("role", "document")
                .child(content)
                .build(),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::models::BillRow;
    use crate::services::sample_bills;

    fn fixture_rows() -> Vec<BillRow> {
        sample_bills().iter().map(BillRow::unformatted).collect()
    }

    fn mount(doc: &Document, page: BillsPage<'_>) {
        doc.body().replace_children(&render_bills_page(doc, page));
    }

    #[test]
    fn fixture_bills_are_listed_latest_first() {
        let doc = Document::new();
        let rows = fixture_rows();
        mount(&doc, BillsPage::Loaded(&rows));

        let dates: Vec<String> = doc
            .query_selector_all("tbody tr")
            .iter()
            .map(|tr| tr.children()[2].text_content())
            .collect();
        let mut anti_chrono = dates.clone();
        anti_chrono.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, anti_chrono);
        assert_eq!(dates, vec!["2004-04-04", "2003-03-03", "2002-02-02", "2001-01-01"]);
    }

    #[test]
    fn every_row_has_an_eye_icon_with_its_proof_url() {
        let doc = Document::new();
        let rows = fixture_rows();
        mount(&doc, BillsPage::Loaded(&rows));

        let eyes = doc.get_all_by_test_id("icon-eye");
        assert_eq!(eyes.len(), 4);
        assert!(eyes
            .iter()
            .all(|eye| eye.attr("data-bill-url").is_some_and(|url| url.starts_with("https://"))));
        // un id por fila se repetiría en el documento
        assert!(eyes.iter().all(|eye| eye.attr("id").is_none()));
        assert!(doc.get_element_by_id("eye").is_none());
        assert!(doc.contains_text("Mes notes de frais"));
        assert!(doc.get_by_test_id("btn-new-bill").is_some());
        assert!(doc.contains_text("Justificatif"));
    }

    #[test]
    fn amount_and_status_cells() {
        let doc = Document::new();
        let rows = fixture_rows();
        mount(&doc, BillsPage::Loaded(&rows));
        let first = doc.query_selector("tbody tr").unwrap();
        let cells: Vec<String> = first.children().iter().map(|td| td.text_content()).collect();
        assert_eq!(cells[0], "Hôtel et logement");
        assert_eq!(cells[3], "400 €");
        assert_eq!(cells[4], "En attente");
    }

    #[test]
    fn empty_list_renders_an_empty_table() {
        let doc = Document::new();
        mount(&doc, BillsPage::Loaded(&[]));
        let tbody = doc.get_by_test_id("tbody").unwrap();
        assert!(tbody.children().is_empty());
    }

    #[test]
    fn error_states_show_the_error_text() {
        for label in ["Erreur 404", "Erreur 500"] {
            let doc = Document::new();
            mount(&doc, BillsPage::Failed(label));
            assert!(doc.contains_text(label));
            assert!(doc.get_by_test_id("tbody").is_none());
        }
    }

    #[test]
    fn loading_state() {
        let doc = Document::new();
        mount(&doc, BillsPage::Loading);
        assert!(doc.contains_text("Loading..."));
    }
}
