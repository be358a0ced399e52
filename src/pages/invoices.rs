use crate::form::{InvoiceForm, InvoicePatch};
use crate::model::{Amount, Invoice, InvoiceStatus};
use crate::store::{self, Choice, Filter, Store};
use crate::Result;
use anyhow::bail;
use serde::{Deserialize, Serialize};
use tracing::info;

/// The invoice list together with its search text and status filter.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoicesPage {
    store: Store<Invoice>,
    filter: Filter<InvoiceStatus>,
}

/// Totals over the visible invoices.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub shown: usize,
    pub total: usize,
    pub total_amount: Amount,
    pub outstanding_amount: Amount,
    pub by_status: Vec<StatusTotal>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusTotal {
    pub status: InvoiceStatus,
    pub count: usize,
    pub amount: Amount,
}

impl InvoicesPage {
    pub fn new(seed: Vec<Invoice>) -> Result<Self> {
        Ok(Self {
            store: Store::new(seed)?,
            filter: Filter::all(),
        })
    }

    pub fn store(&self) -> &Store<Invoice> {
        &self.store
    }

    pub fn filter(&self) -> &Filter<InvoiceStatus> {
        &self.filter
    }

    pub fn set_search(&mut self, text: impl AsRef<str>) {
        self.filter = self.filter.clone().with_text(text);
    }

    pub fn set_status(&mut self, status: Choice<InvoiceStatus>) {
        self.filter = self.filter.clone().with_choice(status);
    }

    /// The invoices that pass the current search and status filter.
    pub fn visible(&self) -> Vec<&Invoice> {
        self.store.query(&self.filter)
    }

    pub fn summary(&self) -> InvoiceSummary {
        let visible = self.visible();
        let by_status = InvoiceStatus::ALL
            .iter()
            .map(|status| StatusTotal {
                status: *status,
                count: store::count_where(visible.iter().copied(), |i| i.status == *status),
                amount: store::sum_where(
                    visible.iter().copied(),
                    |i| i.status == *status,
                    |i| i.amount,
                ),
            })
            .collect();
        InvoiceSummary {
            shown: visible.len(),
            total: self.store.len(),
            total_amount: store::sum(visible.iter().copied(), |i| i.amount),
            outstanding_amount: store::sum_where(
                visible.iter().copied(),
                |i| i.status.is_outstanding(),
                |i| i.amount,
            ),
            by_status,
        }
    }

    /// Suggests the next invoice number for `prefix`, e.g. `INV-005` after `INV-004`.
    ///
    /// # Errors
    /// - Returns an error if the largest number with `prefix` cannot be incremented.
    pub fn next_number(&self, prefix: &str) -> Result<String> {
        let max = self
            .store
            .records()
            .iter()
            .filter_map(|i| i.number.strip_prefix(prefix)?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        match max.checked_add(1) {
            Some(next) => Ok(format!("{prefix}{next:03}")),
            None => bail!("No invoice number follows '{prefix}{max}'"),
        }
    }

    /// Validates `form` and appends the invoice. Returns the new id.
    pub fn create(&mut self, form: &InvoiceForm) -> Result<String> {
        let invoice = form.validate()?;
        let number = invoice.number.clone();
        let id = self.store.create(invoice)?;
        info!("Created invoice {number} with id '{id}'");
        Ok(id)
    }

    /// Applies `patch` to the invoice with identifier `id`.
    pub fn update(&mut self, id: &str, patch: &InvoicePatch) -> Result<&Invoice> {
        self.store.modify(id, |invoice| {
            *invoice = patch.apply(invoice)?;
            Ok(())
        })
    }

    /// Marks the invoice as sent. A paid invoice cannot be sent again.
    pub fn send(&mut self, id: &str) -> Result<&Invoice> {
        self.store.modify(id, |invoice| {
            if invoice.status == InvoiceStatus::Paid {
                bail!("Invoice {} is already paid", invoice.number);
            }
            invoice.status = InvoiceStatus::Sent;
            Ok(())
        })
    }

    pub fn mark_paid(&mut self, id: &str) -> Result<&Invoice> {
        self.store.modify(id, |invoice| {
            if invoice.status == InvoiceStatus::Draft {
                bail!("Invoice {} has not been sent", invoice.number);
            }
            invoice.status = InvoiceStatus::Paid;
            Ok(())
        })
    }

    /// Returns `false` if there was no such invoice.
    pub fn delete(&mut self, id: &str) -> bool {
        self.store.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::seed;

    fn page() -> InvoicesPage {
        InvoicesPage::new(seed::invoices()).unwrap()
    }

    fn form() -> InvoiceForm {
        InvoiceForm {
            number: "INV-005".into(),
            client: "Acme".into(),
            amount: "400".into(),
            issue_date: "2024-02-01".into(),
            due_date: "2024-03-01".into(),
            status: "draft".into(),
        }
    }

    #[test]
    fn test_unfiltered_summary() {
        let summary = page().summary();
        assert_eq!(summary.shown, 4);
        assert_eq!(summary.total_amount, Amount::cents(852500));
        assert_eq!(summary.outstanding_amount, Amount::cents(505000));
        let overdue = summary
            .by_status
            .iter()
            .find(|s| s.status == InvoiceStatus::Overdue)
            .unwrap();
        assert_eq!(overdue.count, 1);
        assert_eq!(overdue.amount, Amount::cents(320000));
    }

    #[test]
    fn test_search_and_status() {
        let mut page = page();
        page.set_search("tech");
        assert_eq!(page.visible().len(), 1);
        page.set_status(Choice::Only(InvoiceStatus::Paid));
        assert!(page.visible().is_empty());
        assert_eq!(page.summary().total_amount, Amount::ZERO);
        page.set_search("");
        let visible: Vec<&str> = page.visible().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(visible, vec!["1"]);
    }

    #[test]
    fn test_create_and_next_number() {
        let mut page = page();
        assert_eq!(page.next_number("INV-").unwrap(), "INV-005");
        let id = page.create(&form()).unwrap();
        assert_eq!(id, "5");
        assert_eq!(page.next_number("INV-").unwrap(), "INV-006");
        assert_eq!(page.store().get("5").unwrap().client, "Acme");
    }

    #[test]
    fn test_next_number_after_largest_suffix_fails() {
        let mut invoices = seed::invoices();
        invoices[0].number = format!("INV-{}", u64::MAX);
        let page = InvoicesPage::new(invoices).unwrap();
        assert!(page.next_number("INV-").is_err());
        assert_eq!(page.next_number("BILL-").unwrap(), "BILL-001");
    }

    #[test]
    fn test_create_rejects_bad_form() {
        let mut page = page();
        let bad = InvoiceForm {
            amount: "lots".into(),
            ..form()
        };
        let err = page.create(&bad).unwrap_err();
        assert!(err.downcast_ref::<crate::form::FormError>().is_some());
        assert_eq!(page.store().len(), 4);
    }

    #[test]
    fn test_send_and_pay() {
        let mut page = page();
        assert!(page.mark_paid("4").is_err());
        assert_eq!(page.send("4").unwrap().status, InvoiceStatus::Sent);
        assert_eq!(page.mark_paid("4").unwrap().status, InvoiceStatus::Paid);
        let err = page.send("4").unwrap_err();
        assert_eq!(err.to_string(), "Invoice INV-004 is already paid");
    }

    #[test]
    fn test_update_via_patch() {
        let mut page = page();
        let patch = InvoicePatch {
            amount: Some("2,000".into()),
            ..Default::default()
        };
        let updated = page.update("2", &patch).unwrap();
        assert_eq!(updated.amount, Amount::cents(200000));
        assert_eq!(updated.number, "INV-002");
        assert!(page.update("9", &patch).is_err());
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut page = page();
        assert!(!page.delete("99"));
        assert_eq!(page.store().len(), 4);
        assert!(page.delete("3"));
        assert_eq!(page.store().len(), 3);
    }
}
