use crate::model::{Activity, Amount, Expense, Invoice, InvoiceStatus, QuickAction};
use crate::routes::Page;
use crate::store::{self, Store};
use serde::{Deserialize, Serialize};

/// The headline figures, computed from the invoice and expense lists.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    /// Paid invoices.
    pub total_revenue: Amount,
    /// Sent and overdue invoices.
    pub outstanding: Amount,
    pub monthly_expenses: Amount,
    pub net_profit: Amount,
}

/// A quick action with the path it leads to.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickActionLink {
    pub title: String,
    pub description: String,
    pub page: Page,
    pub path: String,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub metrics: DashboardMetrics,
    pub quick_actions: Vec<QuickActionLink>,
    pub recent_activity: Vec<Activity>,
}

impl DashboardMetrics {
    pub fn compute(invoices: &Store<Invoice>, expenses: &Store<Expense>) -> Self {
        let invoices = invoices.records();
        let total_revenue =
            store::sum_where(invoices, |i| i.status == InvoiceStatus::Paid, |i| i.amount);
        let outstanding = store::sum_where(invoices, |i| i.status.is_outstanding(), |i| i.amount);
        let monthly_expenses = store::sum(expenses.records(), |e| e.amount);
        Self {
            total_revenue,
            outstanding,
            monthly_expenses,
            net_profit: total_revenue - monthly_expenses,
        }
    }
}

impl DashboardView {
    pub fn new(
        invoices: &Store<Invoice>,
        expenses: &Store<Expense>,
        quick_actions: &[QuickAction],
        recent_activity: &[Activity],
    ) -> Self {
        Self {
            metrics: DashboardMetrics::compute(invoices, expenses),
            quick_actions: quick_actions
                .iter()
                .map(|a| QuickActionLink {
                    title: a.title.clone(),
                    description: a.description.clone(),
                    page: a.page,
                    path: a.page.path().to_string(),
                })
                .collect(),
            recent_activity: recent_activity.to_vec(),
        }
    }
}
