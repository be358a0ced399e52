use crate::routes::Page;
use serde::{Deserialize, Serialize};

/// An entry in the dashboard's recent activity feed.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub kind: ActivityKind,
    pub title: String,
    pub subtitle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    /// Relative time as shown, e.g. "2 hours ago".
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ActivityStatus>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    InvoicePaid,
    ExpenseAdded,
    ClientAdded,
    InvoiceCreated,
}

serde_plain::derive_display_from_serialize!(ActivityKind);

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Paid,
    Pending,
    Overdue,
}

serde_plain::derive_display_from_serialize!(ActivityStatus);

/// A shortcut on the dashboard that leads to another page.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickAction {
    pub title: String,
    pub description: String,
    pub page: Page,
}
