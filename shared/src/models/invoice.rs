//! Invoice Model

use serde::{Deserialize, Serialize};

/// Invoice row as persisted and embedded in customer aggregates.
///
/// Created only; never updated through the customers page. `invoice_datetime`
/// is set server-side at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Invoice {
    pub id: i64,
    pub customer_id: i64,
    /// `YYYY-MM-DD HH:MM:SS`, wall-clock of creation.
    pub invoice_datetime: String,
    pub filename: String,
    pub file_link: String,
    pub hash: String,
}

/// The server's reply to invoice creation: what the client appends to the
/// cached aggregate and renders as a download link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDescriptor {
    pub id: i64,
    pub invoice_datetime: String,
    pub filename: String,
    pub file_link: String,
    pub hash: String,
}

impl From<Invoice> for InvoiceDescriptor {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id,
            invoice_datetime: invoice.invoice_datetime,
            filename: invoice.filename,
            file_link: invoice.file_link,
            hash: invoice.hash,
        }
    }
}

/// Full create-invoice response: the descriptor plus the best-effort mail
/// outcome (`None` when no mail was requested).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceCreated {
    #[serde(flatten)]
    pub descriptor: InvoiceDescriptor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_sent: Option<bool>,
}

impl InvoiceCreated {
    /// The invoice row the client caches: descriptor fields plus the owner id.
    pub fn to_invoice(&self, customer_id: i64) -> Invoice {
        Invoice {
            id: self.descriptor.id,
            customer_id,
            invoice_datetime: self.descriptor.invoice_datetime.clone(),
            filename: self.descriptor.filename.clone(),
            file_link: self.descriptor.file_link.clone(),
            hash: self.descriptor.hash.clone(),
        }
    }
}
