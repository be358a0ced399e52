//! Per-page state and the summaries each page shows.
//!
//! Every list page owns its own [`Store`](crate::store::Store) along with its current filter.
//! [`Books`] gathers them, seeded from the same [`SeedData`].

mod clients;
mod dashboard;
mod expenses;
mod invoices;
mod reports;
mod settings;

pub use clients::{ClientSummary, ClientsPage};
pub use dashboard::{DashboardMetrics, DashboardView, QuickActionLink};
pub use expenses::{ExpenseSummary, ExpensesPage};
pub use invoices::{InvoiceSummary, InvoicesPage, StatusTotal};
pub use reports::{
    ReportMetrics, ReportSection, ReportTab, ReportView, ReportsPage, TaxReport, TrendRow,
};
pub use settings::{ProfileView, SettingsView};

use crate::model::{Activity, QuickAction, SeedData};
use crate::Result;
use rust_decimal::Decimal;

/// All of the pages, seeded together.
#[derive(Debug, Clone, PartialEq)]
pub struct Books {
    pub invoices: InvoicesPage,
    pub expenses: ExpensesPage,
    pub clients: ClientsPage,
    pub reports: ReportsPage,
    quick_actions: Vec<QuickAction>,
    activities: Vec<Activity>,
}

impl Books {
    /// # Errors
    /// Returns an error if any seed list repeats an id.
    pub fn new(seed: SeedData, tax_rate: Decimal) -> Result<Self> {
        Ok(Self {
            invoices: InvoicesPage::new(seed.invoices)?,
            expenses: ExpensesPage::new(seed.expenses)?,
            clients: ClientsPage::new(seed.clients)?,
            reports: ReportsPage::new(seed.report_periods, seed.expense_categories, tax_rate),
            quick_actions: seed.quick_actions,
            activities: seed.activities,
        })
    }

    pub fn dashboard(&self) -> DashboardView {
        DashboardView::new(
            self.invoices.store(),
            self.expenses.store(),
            &self.quick_actions,
            &self.activities,
        )
    }
}
