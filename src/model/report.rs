use crate::model::Amount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Financial totals for one calendar month.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPeriod {
    /// The month as `YYYY-MM`.
    pub period: String,
    pub revenue: Amount,
    pub expenses: Amount,
    pub profit: Amount,
    pub tax_deductible: Amount,
}

impl ReportPeriod {
    /// The first day of the month, if `period` is a valid `YYYY-MM`.
    pub fn start(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&format!("{}-01", self.period), "%Y-%m-%d").ok()
    }

    /// e.g. "January 2024". Falls back to the raw period text.
    pub fn long_label(&self) -> String {
        self.start()
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| self.period.clone())
    }

    /// e.g. "Jan 2024". Falls back to the raw period text.
    pub fn short_label(&self) -> String {
        self.start()
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|| self.period.clone())
    }
}

/// One row of the expense breakdown in the reports.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: String,
    pub amount: Amount,
    pub percentage: rust_decimal::Decimal,
}
