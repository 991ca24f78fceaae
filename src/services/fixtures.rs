// Notas de ejemplo (mismo contenido que el backend de desarrollo)

use crate::models::{Bill, BillStatus};

#[allow(clippy::too_many_arguments)]
fn bill(
    id: &str,
    expense_type: &str,
    name: &str,
    date: &str,
    amount: u32,
    vat: Option<u32>,
    commentary: &str,
    file_name: &str,
    status: BillStatus,
    comment_admin: &str,
) -> Bill {
    Bill {
        id: id.to_string(),
        email: "a@a".to_string(),
        expense_type: expense_type.to_string(),
        name: name.to_string(),
        amount,
        date: date.to_string(),
        vat,
        pct: Some(20),
        commentary: commentary.to_string(),
        file_url: Some(format!("https://test.storage.tld/v0/b/billable-677b6.appspot.com/justificatifs/{}", file_name)),
        file_name: Some(file_name.to_string()),
        status,
        comment_admin: Some(comment_admin.to_string()),
    }
}

/// Cuatro notas de "a@a", en el orden en que las guarda el backend (sin ordenar)
pub fn sample_bills() -> Vec<Bill> {
    vec![
        bill(
            "47qAXb6fIm2zOKkLzMro",
            "Hôtel et logement",
            "encore",
            "2004-04-04",
            400,
            Some(80),
            "séminaire billed",
            "preview-facture-free-201801-pdf-1.jpg",
            BillStatus::Pending,
            "ok",
        ),
        bill(
            "BeKy5Mo4jkmdfPGYpTxZ",
            "Transports",
            "test1",
            "2001-01-01",
            100,
            None,
            "plop",
            "1592770761.jpeg",
            BillStatus::Refused,
            "en fait non",
        ),
        bill(
            "UIUZtnPQvnbFnB0ozvJh",
            "Services en ligne",
            "test3",
            "2003-03-03",
            300,
            Some(60),
            "",
            "facture-client-php-exportee-dans-document-pdf-enregistre-sur-disque-dur.png",
            BillStatus::Accepted,
            "bon bah d'accord",
        ),
        bill(
            "qcCK3SzECmaZAGRrHjaC",
            "Restaurants et bars",
            "test2",
            "2002-02-02",
            200,
            Some(40),
            "test2",
            "preview-facture-free-201801-pdf-1.jpg",
            BillStatus::Refused,
            "pas la bonne facture",
        ),
    ]
}
