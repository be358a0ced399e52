//! Raw form input and its validation into records.
//!
//! Every field arrives as text, the way it is typed. Nothing becomes an `Invoice`, `Expense` or
//! `Client` until every field has been checked, and a rejection lists every failing field rather
//! than only the first one.
//!
//! Each `*Patch` type holds optional replacements for some fields of an existing record. It is
//! applied by filling a form from the record, overlaying the replacements and validating the
//! result as a whole, so an edit cannot produce a record that a new form would have rejected.

use crate::model::{Amount, Client, ClientStatus, Expense, Invoice, InvoiceStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One rejected field and why.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct FieldProblem {
    pub field: String,
    pub reason: String,
}

/// The reasons a form was rejected.
#[derive(Clone, Eq, PartialEq)]
pub struct FormError {
    kind: &'static str,
    problems: Vec<FieldProblem>,
}

impl FormError {
    pub fn problems(&self) -> &[FieldProblem] {
        &self.problems
    }

    /// True if `field` is among the rejected fields.
    pub fn has(&self, field: &str) -> bool {
        self.problems.iter().any(|p| p.field == field)
    }
}

impl Debug for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid {}: ", self.kind)?;
        for (ix, p) in self.problems.iter().enumerate() {
            if ix > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{} {}", p.field, p.reason)?;
        }
        Ok(())
    }
}

impl std::error::Error for FormError {}

/// Collects problems while fields are checked one at a time.
#[derive(Default)]
struct Checker {
    problems: Vec<FieldProblem>,
}

impl Checker {
    fn reject(&mut self, field: &str, reason: impl Into<String>) {
        self.problems.push(FieldProblem {
            field: field.to_string(),
            reason: reason.into(),
        });
    }

    fn required(&mut self, field: &str, value: &str) -> String {
        let value = value.trim();
        if value.is_empty() {
            self.reject(field, "is required");
        }
        value.to_string()
    }

    fn amount(&mut self, field: &str, value: &str) -> Option<Amount> {
        if self.required(field, value).is_empty() {
            return None;
        }
        match Amount::from_str(value) {
            Ok(a) if a.is_negative() => {
                self.reject(field, "must not be negative");
                None
            }
            Ok(a) => Some(a),
            Err(e) => {
                self.reject(field, format!("is not a number ({e})"));
                None
            }
        }
    }

    fn date(&mut self, field: &str, value: &str) -> Option<NaiveDate> {
        let value = self.required(field, value);
        if value.is_empty() {
            return None;
        }
        match NaiveDate::parse_from_str(&value, DATE_FORMAT) {
            Ok(d) => Some(d),
            Err(_) => {
                self.reject(field, format!("'{value}' is not a date in YYYY-MM-DD form"));
                None
            }
        }
    }

    fn choice<T>(&mut self, field: &str, value: &str, allowed: &str) -> Option<T>
    where
        T: FromStr,
    {
        match T::from_str(value.trim()) {
            Ok(v) => Some(v),
            Err(_) => {
                self.reject(field, format!("'{}' is not one of {allowed}", value.trim()));
                None
            }
        }
    }

    fn email(&mut self, field: &str, value: &str) -> String {
        let value = self.required(field, value);
        if !value.is_empty() {
            let valid = match value.split_once('@') {
                Some((user, domain)) => {
                    !user.is_empty() && !domain.is_empty() && !value.contains(char::is_whitespace)
                }
                None => false,
            };
            if !valid {
                self.reject(field, format!("'{value}' is not an email address"));
            }
        }
        value
    }

    fn finish(self, kind: &'static str) -> Result<(), FormError> {
        if self.problems.is_empty() {
            Ok(())
        } else {
            Err(FormError {
                kind,
                problems: self.problems,
            })
        }
    }
}

/// The fields of the create-invoice form.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct InvoiceForm {
    pub number: String,
    pub client: String,
    pub amount: String,
    pub issue_date: String,
    pub due_date: String,
    pub status: String,
}

impl Default for InvoiceForm {
    fn default() -> Self {
        Self {
            number: String::new(),
            client: String::new(),
            amount: String::new(),
            issue_date: String::new(),
            due_date: String::new(),
            status: InvoiceStatus::Draft.to_string(),
        }
    }
}

impl InvoiceForm {
    pub fn from_invoice(invoice: &Invoice) -> Self {
        Self {
            number: invoice.number.clone(),
            client: invoice.client.clone(),
            amount: invoice.amount.value().to_string(),
            issue_date: invoice.issue_date.format(DATE_FORMAT).to_string(),
            due_date: invoice.due_date.format(DATE_FORMAT).to_string(),
            status: invoice.status.to_string(),
        }
    }

    /// Builds an invoice with an empty id; the store assigns one on create.
    pub fn validate(&self) -> Result<Invoice, FormError> {
        let mut c = Checker::default();
        let number = c.required("number", &self.number);
        let client = c.required("client", &self.client);
        let amount = c.amount("amount", &self.amount);
        let issue_date = c.date("issue_date", &self.issue_date);
        let due_date = c.date("due_date", &self.due_date);
        let status = c.choice("status", &self.status, "draft, sent, paid, overdue");
        if let (Some(issue), Some(due)) = (issue_date, due_date) {
            if due < issue {
                c.reject("due_date", "must not be before the issue date");
            }
        }
        c.finish("invoice")?;
        match (amount, issue_date, due_date, status) {
            (Some(amount), Some(issue_date), Some(due_date), Some(status)) => Ok(Invoice {
                id: String::new(),
                number,
                client,
                amount,
                issue_date,
                due_date,
                status,
            }),
            // finish() has already rejected any field that failed to parse
            _ => Err(FormError {
                kind: "invoice",
                problems: Vec::new(),
            }),
        }
    }
}

/// Replacement values for some fields of an invoice.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct InvoicePatch {
    pub number: Option<String>,
    pub client: Option<String>,
    pub amount: Option<String>,
    pub issue_date: Option<String>,
    pub due_date: Option<String>,
    pub status: Option<String>,
}

impl InvoicePatch {
    pub fn is_empty(&self) -> bool {
        self == &InvoicePatch::default()
    }

    pub fn apply(&self, existing: &Invoice) -> Result<Invoice, FormError> {
        let mut form = InvoiceForm::from_invoice(existing);
        overlay(&mut form.number, &self.number);
        overlay(&mut form.client, &self.client);
        overlay(&mut form.amount, &self.amount);
        overlay(&mut form.issue_date, &self.issue_date);
        overlay(&mut form.due_date, &self.due_date);
        overlay(&mut form.status, &self.status);
        let mut invoice = form.validate()?;
        invoice.id = existing.id.clone();
        Ok(invoice)
    }
}

/// The fields of the add-expense form.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExpenseForm {
    pub date: String,
    pub description: String,
    pub category: String,
    pub vendor: String,
    pub amount: String,
    pub tax_deductible: bool,
    pub has_receipt: bool,
}

impl ExpenseForm {
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            date: expense.date.format(DATE_FORMAT).to_string(),
            description: expense.description.clone(),
            category: expense.category.clone(),
            vendor: expense.vendor.clone(),
            amount: expense.amount.value().to_string(),
            tax_deductible: expense.tax_deductible,
            has_receipt: expense.has_receipt,
        }
    }

    pub fn validate(&self) -> Result<Expense, FormError> {
        let mut c = Checker::default();
        let date = c.date("date", &self.date);
        let description = c.required("description", &self.description);
        let category = c.required("category", &self.category);
        let vendor = c.required("vendor", &self.vendor);
        let amount = c.amount("amount", &self.amount);
        c.finish("expense")?;
        match (date, amount) {
            (Some(date), Some(amount)) => Ok(Expense {
                id: String::new(),
                date,
                description,
                category,
                vendor,
                amount,
                tax_deductible: self.tax_deductible,
                has_receipt: self.has_receipt,
            }),
            _ => Err(FormError {
                kind: "expense",
                problems: Vec::new(),
            }),
        }
    }
}

/// Replacement values for some fields of an expense.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExpensePatch {
    pub date: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub vendor: Option<String>,
    pub amount: Option<String>,
    pub tax_deductible: Option<bool>,
    pub has_receipt: Option<bool>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self == &ExpensePatch::default()
    }

    pub fn apply(&self, existing: &Expense) -> Result<Expense, FormError> {
        let mut form = ExpenseForm::from_expense(existing);
        overlay(&mut form.date, &self.date);
        overlay(&mut form.description, &self.description);
        overlay(&mut form.category, &self.category);
        overlay(&mut form.vendor, &self.vendor);
        overlay(&mut form.amount, &self.amount);
        if let Some(v) = self.tax_deductible {
            form.tax_deductible = v;
        }
        if let Some(v) = self.has_receipt {
            form.has_receipt = v;
        }
        let mut expense = form.validate()?;
        expense.id = existing.id.clone();
        Ok(expense)
    }
}

/// The fields of the add/edit client form. The invoice totals are not editable.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClientForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub company: String,
    pub status: String,
}

impl Default for ClientForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            company: String::new(),
            status: ClientStatus::Active.to_string(),
        }
    }
}

impl ClientForm {
    pub fn from_client(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            email: client.email.clone(),
            phone: client.phone.clone(),
            address: client.address.clone(),
            company: client.company.clone(),
            status: client.status.to_string(),
        }
    }

    /// Builds a new client with no invoices yet. `today` becomes the last-invoice date.
    pub fn validate_new(&self, today: NaiveDate) -> Result<Client, FormError> {
        self.check(String::new(), 0, Amount::ZERO, today)
    }

    /// Builds the edited version of `existing`, which keeps its id and invoice totals.
    pub fn validate_edit(&self, existing: &Client) -> Result<Client, FormError> {
        self.check(
            existing.id.clone(),
            existing.total_invoices,
            existing.total_amount,
            existing.last_invoice,
        )
    }

    fn check(
        &self,
        id: String,
        total_invoices: u32,
        total_amount: Amount,
        last_invoice: NaiveDate,
    ) -> Result<Client, FormError> {
        let mut c = Checker::default();
        let name = c.required("name", &self.name);
        let email = c.email("email", &self.email);
        let phone = c.required("phone", &self.phone);
        let address = c.required("address", &self.address);
        let company = c.required("company", &self.company);
        let status = c.choice("status", &self.status, "active, inactive");
        c.finish("client")?;
        match status {
            Some(status) => Ok(Client {
                id,
                name,
                email,
                phone,
                address,
                company,
                status,
                total_invoices,
                total_amount,
                last_invoice,
            }),
            None => Err(FormError {
                kind: "client",
                problems: Vec::new(),
            }),
        }
    }
}

/// Replacement values for some fields of a client.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub company: Option<String>,
    pub status: Option<String>,
}

impl ClientPatch {
    pub fn is_empty(&self) -> bool {
        self == &ClientPatch::default()
    }

    pub fn apply(&self, existing: &Client) -> Result<Client, FormError> {
        let mut form = ClientForm::from_client(existing);
        overlay(&mut form.name, &self.name);
        overlay(&mut form.email, &self.email);
        overlay(&mut form.phone, &self.phone);
        overlay(&mut form.address, &self.address);
        overlay(&mut form.company, &self.company);
        overlay(&mut form.status, &self.status);
        form.validate_edit(existing)
    }
}

fn overlay(field: &mut String, replacement: &Option<String>) {
    if let Some(value) = replacement {
        field.clone_from(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::seed;

    fn invoice_form() -> InvoiceForm {
        InvoiceForm {
            number: "INV-005".into(),
            client: "Acme".into(),
            amount: "1,200.50".into(),
            issue_date: "2024-02-01".into(),
            due_date: "2024-03-01".into(),
            status: "sent".into(),
        }
    }

    #[test]
    fn test_valid_invoice() {
        let invoice = invoice_form().validate().unwrap();
        assert_eq!(invoice.amount, Amount::cents(120050));
        assert_eq!(invoice.status, InvoiceStatus::Sent);
        assert!(invoice.id.is_empty());
    }

    #[test]
    fn test_non_numeric_amount_rejected() {
        let form = InvoiceForm {
            amount: "abc".into(),
            ..invoice_form()
        };
        let err = form.validate().unwrap_err();
        assert!(err.has("amount"));
        assert_eq!(err.problems().len(), 1);
        assert!(err.to_string().starts_with("Invalid invoice: amount is not a number"));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let form = InvoiceForm {
            amount: "-5".into(),
            ..invoice_form()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid invoice: amount must not be negative");
    }

    #[test]
    fn test_due_before_issue_rejected() {
        let form = InvoiceForm {
            due_date: "2024-01-31".into(),
            ..invoice_form()
        };
        let err = form.validate().unwrap_err();
        assert!(err.has("due_date"));
        assert!(err.to_string().contains("must not be before the issue date"));
    }

    #[test]
    fn test_due_on_issue_date_is_fine() {
        let form = InvoiceForm {
            due_date: "2024-02-01".into(),
            ..invoice_form()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_every_problem_is_reported() {
        let err = InvoiceForm::default().validate().unwrap_err();
        for field in ["number", "client", "amount", "issue_date", "due_date"] {
            assert!(err.has(field), "expected a problem with {field}: {err}");
        }
        assert!(!err.has("status"));
    }

    #[test]
    fn test_bad_date_and_status() {
        let form = InvoiceForm {
            issue_date: "01/15/2024".into(),
            status: "void".into(),
            ..invoice_form()
        };
        let err = form.validate().unwrap_err();
        assert!(err.has("issue_date"));
        assert!(err.has("status"));
        assert!(!err.has("due_date"));
    }

    #[test]
    fn test_invoice_patch_keeps_other_fields() {
        let existing = seed::invoices().remove(1);
        let patch = InvoicePatch {
            status: Some("paid".into()),
            ..Default::default()
        };
        let updated = patch.apply(&existing).unwrap();
        assert_eq!(updated.status, InvoiceStatus::Paid);
        assert_eq!(
            updated,
            Invoice {
                status: InvoiceStatus::Paid,
                ..existing
            }
        );
    }

    #[test]
    fn test_invoice_patch_is_revalidated() {
        let existing = seed::invoices().remove(0);
        let patch = InvoicePatch {
            due_date: Some("2023-12-31".into()),
            ..Default::default()
        };
        assert!(patch.apply(&existing).unwrap_err().has("due_date"));
    }

    #[test]
    fn test_expense_form() {
        let form = ExpenseForm {
            date: "2024-02-02".into(),
            description: "Printer ink".into(),
            category: "Office Supplies".into(),
            vendor: "Staples Inc.".into(),
            amount: "$42.10".into(),
            tax_deductible: true,
            has_receipt: false,
        };
        let expense = form.validate().unwrap();
        assert_eq!(expense.amount, Amount::cents(4210));
        assert!(!expense.has_receipt);

        let err = ExpenseForm {
            vendor: "  ".into(),
            ..form
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid expense: vendor is required");
    }

    #[test]
    fn test_expense_patch_flags() {
        let existing = seed::expenses().remove(2);
        let patch = ExpensePatch {
            has_receipt: Some(true),
            ..Default::default()
        };
        let updated = patch.apply(&existing).unwrap();
        assert!(updated.has_receipt);
        assert_eq!(updated.id, "3");
        assert_eq!(updated.amount, existing.amount);
    }

    #[test]
    fn test_new_client_starts_with_no_invoices() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let form = ClientForm {
            name: "Ada Lovelace".into(),
            email: "ada@engines.co".into(),
            phone: "+44 20 7946 0000".into(),
            address: "12 Analytical Row, London".into(),
            company: "Engines Ltd".into(),
            ..Default::default()
        };
        let client = form.validate_new(today).unwrap();
        assert_eq!(client.total_invoices, 0);
        assert_eq!(client.total_amount, Amount::ZERO);
        assert_eq!(client.last_invoice, today);
        assert_eq!(client.status, ClientStatus::Active);
    }

    #[test]
    fn test_bad_email_rejected() {
        for email in ["ada", "@engines.co", "ada@", "ada lovelace@engines.co"] {
            let form = ClientForm {
                name: "Ada".into(),
                email: email.into(),
                phone: "555-0100".into(),
                address: "1 Main St".into(),
                company: "Engines".into(),
                ..Default::default()
            };
            let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
            assert!(form.validate_new(today).unwrap_err().has("email"), "{email}");
        }
    }

    #[test]
    fn test_blank_phone_and_address_rejected() {
        let form = ClientForm {
            name: "Ada".into(),
            email: "ada@engines.co".into(),
            phone: " ".into(),
            company: "Engines".into(),
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let err = form.validate_new(today).unwrap_err();
        assert!(err.has("phone"));
        assert!(err.has("address"));
        assert_eq!(err.problems().len(), 2);

        let existing = seed::clients().remove(1);
        let patch = ClientPatch {
            address: Some(String::new()),
            ..Default::default()
        };
        let err = patch.apply(&existing).unwrap_err();
        assert_eq!(err.to_string(), "Invalid client: address is required");
    }

    #[test]
    fn test_client_edit_keeps_totals() {
        let existing = seed::clients().remove(0);
        let patch = ClientPatch {
            status: Some("inactive".into()),
            phone: Some("+1 (555) 000-0000".into()),
            ..Default::default()
        };
        let edited = patch.apply(&existing).unwrap();
        assert_eq!(edited.id, "CLI-001");
        assert_eq!(edited.status, ClientStatus::Inactive);
        assert_eq!(edited.phone, "+1 (555) 000-0000");
        assert_eq!(edited.total_invoices, 12);
        assert_eq!(edited.total_amount, existing.total_amount);
        assert_eq!(edited.last_invoice, existing.last_invoice);
    }

    #[test]
    fn test_empty_patches() {
        assert!(InvoicePatch::default().is_empty());
        assert!(ExpensePatch::default().is_empty());
        assert!(!ClientPatch {
            name: Some("x".into()),
            ..Default::default()
        }
        .is_empty());
    }
}
