//! The built-in records every list starts from.
//!
//! Nothing is saved between runs, so each command begins from these values (or from a seed file
//! that replaces some of them).

use crate::model::{
    Activity, ActivityKind, ActivityStatus, Amount, CategoryShare, Client, ClientStatus, Expense,
    Invoice, InvoiceStatus, QuickAction, ReportPeriod,
};
use crate::routes::Page;
use crate::Result;
use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Every seed list. Lists missing from a seed file keep their built-in values.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeedData {
    pub clients: Vec<Client>,
    pub expenses: Vec<Expense>,
    pub invoices: Vec<Invoice>,
    pub report_periods: Vec<ReportPeriod>,
    pub expense_categories: Vec<CategoryShare>,
    pub activities: Vec<Activity>,
    pub quick_actions: Vec<QuickAction>,
}

impl Default for SeedData {
    fn default() -> Self {
        Self {
            clients: clients(),
            expenses: expenses(),
            invoices: invoices(),
            report_periods: report_periods(),
            expense_categories: expense_categories(),
            activities: activities(),
            quick_actions: quick_actions(),
        }
    }
}

impl SeedData {
    /// Reads a JSON seed file.
    pub async fn load(path: &Path) -> Result<Self> {
        crate::utils::deserialize(path)
            .await
            .with_context(|| format!("Unable to load seed data from {}", path.display()))
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn dollars(n: i64) -> Amount {
    Amount::new(Decimal::from(n))
}

pub fn clients() -> Vec<Client> {
    vec![
        Client {
            id: "CLI-001".into(),
            name: "John Smith".into(),
            email: "john@abccorp.com".into(),
            phone: "+1 (555) 123-4567".into(),
            address: "123 Business St, New York, NY 10001".into(),
            company: "ABC Corporation".into(),
            status: ClientStatus::Active,
            total_invoices: 12,
            total_amount: dollars(45000),
            last_invoice: date(2024, 1, 15),
        },
        Client {
            id: "CLI-002".into(),
            name: "Sarah Johnson".into(),
            email: "sarah@techsolutions.com".into(),
            phone: "+1 (555) 987-6543".into(),
            address: "456 Tech Ave, San Francisco, CA 94105".into(),
            company: "Tech Solutions Inc".into(),
            status: ClientStatus::Active,
            total_invoices: 8,
            total_amount: dollars(32000),
            last_invoice: date(2024, 1, 10),
        },
        Client {
            id: "CLI-003".into(),
            name: "Mike Wilson".into(),
            email: "mike@startup.com".into(),
            phone: "+1 (555) 456-7890".into(),
            address: "789 Startup Blvd, Austin, TX 73301".into(),
            company: "Startup Ventures".into(),
            status: ClientStatus::Inactive,
            total_invoices: 3,
            total_amount: dollars(15000),
            last_invoice: date(2023, 12, 20),
        },
    ]
}

pub fn expenses() -> Vec<Expense> {
    let expense = |id: &str, day: u32, description: &str, category: &str, vendor: &str, cents| {
        Expense {
            id: id.into(),
            date: date(2024, 1, day),
            description: description.into(),
            category: category.into(),
            vendor: vendor.into(),
            amount: Amount::cents(cents),
            tax_deductible: true,
            has_receipt: true,
        }
    };
    let mut lunch = expense(
        "3",
        25,
        "Client lunch meeting",
        "Meals & Entertainment",
        "Italian Bistro",
        8750,
    );
    lunch.has_receipt = false;
    vec![
        expense(
            "1",
            28,
            "Office supplies - Paper and pens",
            "Office Supplies",
            "Staples Inc.",
            14999,
        ),
        expense("2", 27, "Software subscription", "Software", "Adobe Systems", 5999),
        lunch,
        expense(
            "4",
            24,
            "Internet service monthly fee",
            "Utilities",
            "Comcast",
            12999,
        ),
        expense(
            "5",
            22,
            "Fuel for business trip",
            "Travel",
            "Shell Gas Station",
            6530,
        ),
    ]
}

pub fn invoices() -> Vec<Invoice> {
    let invoice = |id: &str, client: &str, amount, issue: u32, status| Invoice {
        id: id.into(),
        number: format!("INV-{id:0>3}"),
        client: client.into(),
        amount: dollars(amount),
        issue_date: date(2024, 1, issue),
        due_date: date(2024, 2, issue),
        status,
    };
    vec![
        invoice("1", "ABC Corporation", 2500, 15, InvoiceStatus::Paid),
        invoice("2", "Smith & Associates", 1850, 20, InvoiceStatus::Sent),
        invoice("3", "XYZ Technologies", 3200, 10, InvoiceStatus::Overdue),
        invoice("4", "Digital Solutions Ltd", 975, 25, InvoiceStatus::Draft),
    ]
}

/// Most recent period first.
pub fn report_periods() -> Vec<ReportPeriod> {
    let period = |period: &str, revenue, expenses, profit, tax_deductible| ReportPeriod {
        period: period.into(),
        revenue: dollars(revenue),
        expenses: dollars(expenses),
        profit: dollars(profit),
        tax_deductible: dollars(tax_deductible),
    };
    vec![
        period("2024-01", 45000, 12000, 33000, 8000),
        period("2023-12", 42000, 15000, 27000, 9000),
        period("2023-11", 38000, 11000, 27000, 7000),
        period("2023-10", 41000, 13000, 28000, 8500),
        period("2023-09", 35000, 10000, 25000, 6500),
        period("2023-08", 39000, 14000, 25000, 9000),
    ]
}

pub fn expense_categories() -> Vec<CategoryShare> {
    let share = |category: &str, amount, tenths| CategoryShare {
        category: category.into(),
        amount: dollars(amount),
        percentage: Decimal::new(tenths, 1),
    };
    vec![
        share("Office Supplies", 2500, 208),
        share("Software Licenses", 1800, 150),
        share("Marketing", 3200, 267),
        share("Travel", 1500, 125),
        share("Utilities", 2000, 167),
        share("Professional Services", 1000, 83),
    ]
}

pub fn activities() -> Vec<Activity> {
    vec![
        Activity {
            id: "1".into(),
            kind: ActivityKind::InvoicePaid,
            title: "Invoice #INV-001 paid".into(),
            subtitle: "ABC Corporation".into(),
            amount: Some("$2,500.00".into()),
            time: "2 hours ago".into(),
            status: Some(ActivityStatus::Paid),
        },
        Activity {
            id: "2".into(),
            kind: ActivityKind::ExpenseAdded,
            title: "Office supplies expense".into(),
            subtitle: "Staples Inc.".into(),
            amount: Some("$149.99".into()),
            time: "4 hours ago".into(),
            status: None,
        },
        Activity {
            id: "3".into(),
            kind: ActivityKind::ClientAdded,
            title: "New client added".into(),
            subtitle: "XYZ Technologies".into(),
            amount: None,
            time: "1 day ago".into(),
            status: None,
        },
        Activity {
            id: "4".into(),
            kind: ActivityKind::InvoiceCreated,
            title: "Invoice #INV-002 created".into(),
            subtitle: "Smith & Associates".into(),
            amount: Some("$1,850.00".into()),
            time: "2 days ago".into(),
            status: Some(ActivityStatus::Pending),
        },
    ]
}

pub fn quick_actions() -> Vec<QuickAction> {
    let action = |title: &str, description: &str, page| QuickAction {
        title: title.into(),
        description: description.into(),
        page,
    };
    vec![
        action("Create Invoice", "Generate a new invoice", Page::Invoices),
        action("Add Expense", "Record a new expense", Page::Expenses),
        action("New Client", "Add a new client", Page::Clients),
        action("View Reports", "Generate financial reports", Page::Reports),
    ]
}
