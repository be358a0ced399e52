use crate::model::Amount;
use crate::store::{IdFormat, Record, Searchable};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A bill sent to a client.
///
/// `client` is the client's display name as typed on the invoice. It is not checked against the
/// client list.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub number: String,
    pub client: String,
    pub amount: Amount,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
}

/// Where an invoice is in its life cycle.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Overdue,
}

serde_plain::derive_display_from_serialize!(InvoiceStatus);
serde_plain::derive_fromstr_from_deserialize!(InvoiceStatus);

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 4] = [
        InvoiceStatus::Draft,
        InvoiceStatus::Sent,
        InvoiceStatus::Paid,
        InvoiceStatus::Overdue,
    ];

    /// Sent or overdue: money the client still owes.
    pub fn is_outstanding(&self) -> bool {
        matches!(self, InvoiceStatus::Sent | InvoiceStatus::Overdue)
    }
}

impl Record for Invoice {
    const ID_FORMAT: IdFormat = IdFormat::new("", 0);
    const KIND: &'static str = "invoice";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }
}

impl Searchable for Invoice {
    type Facet = InvoiceStatus;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.client.as_str(), self.number.as_str()]
    }

    fn facet(&self) -> &InvoiceStatus {
        &self.status
    }
}
