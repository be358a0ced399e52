use crate::model::Amount;
use crate::store::{IdFormat, Record, Searchable};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A customer and the running totals of what they have been invoiced.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub company: String,
    pub status: ClientStatus,
    pub total_invoices: u32,
    pub total_amount: Amount,
    pub last_invoice: NaiveDate,
}

#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    #[default]
    Active,
    Inactive,
}

serde_plain::derive_display_from_serialize!(ClientStatus);
serde_plain::derive_fromstr_from_deserialize!(ClientStatus);

impl Record for Client {
    const ID_FORMAT: IdFormat = IdFormat::new("CLI-", 3);
    const KIND: &'static str = "client";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }
}

impl Searchable for Client {
    type Facet = ClientStatus;

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.company.as_str(),
            self.email.as_str(),
        ]
    }

    fn facet(&self) -> &ClientStatus {
        &self.status
    }
}
