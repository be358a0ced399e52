use crate::model::Amount;
use crate::store::{IdFormat, Record, Searchable};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Money spent by the business.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    /// Free-form category name; the category list is whatever the expenses use.
    pub category: String,
    pub vendor: String,
    pub amount: Amount,
    pub tax_deductible: bool,
    pub has_receipt: bool,
}

impl Record for Expense {
    const ID_FORMAT: IdFormat = IdFormat::new("", 0);
    const KIND: &'static str = "expense";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }
}

impl Searchable for Expense {
    type Facet = String;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.description.as_str(), self.vendor.as_str()]
    }

    fn facet(&self) -> &String {
        &self.category
    }
}
