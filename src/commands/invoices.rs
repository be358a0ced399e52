//! Invoice command handlers.

use crate::args::{IdArgs, InvoiceAddArgs, InvoiceListArgs, InvoiceUpdateArgs};
use crate::commands::{plural, Out};
use crate::error::{ErrorType, IntoResult};
use crate::model::InvoiceStatus;
use crate::pages::{Books, InvoicesPage};
use crate::render::{Format, Rows};
use crate::store::Choice;
use crate::{Config, Result};
use anyhow::{anyhow, Context};

/// Lists the invoices that match the search text and status.
///
/// # Returns
/// The matching invoices in the requested format. The message gives the count and total.
///
/// # Errors
/// - Returns a validation error if the status is not a known invoice status.
pub fn invoices_list(books: &mut Books, args: &InvoiceListArgs) -> Result<Out<Rows>> {
    let status = Choice::<InvoiceStatus>::parse(args.status())
        .with_context(|| format!("Unknown invoice status '{}'", args.status().unwrap_or("")))
        .pub_result(ErrorType::Validation)?;
    let page = &mut books.invoices;
    page.set_search(args.list().search().unwrap_or(""));
    page.set_status(status);
    render(page, args.list().format(), String::new())
}

/// Creates an invoice. Without `--number` the next free number is used.
///
/// # Errors
/// - Returns a validation error listing every rejected field.
/// - Returns a validation error if no invoice number can be suggested.
pub fn invoices_add(books: &mut Books, config: &Config, args: &InvoiceAddArgs) -> Result<Out<Rows>> {
    let page = &mut books.invoices;
    let number = match args.number() {
        Some(number) => number.to_string(),
        None => page
            .next_number(&config.preferences().invoice_prefix)
            .pub_result(ErrorType::Validation)?,
    };
    let form = args.to_form(number);
    let id = page.create(&form).pub_result(ErrorType::Validation)?;
    render(page, Format::Table, format!("Created invoice {} ({id}). ", form.number))
}

/// Changes the given fields of one invoice.
///
/// # Errors
/// - Returns a not-found error if there is no such invoice.
/// - Returns a validation error if the changed invoice would be invalid.
pub fn invoices_update(books: &mut Books, args: &InvoiceUpdateArgs) -> Result<Out<Rows>> {
    let page = &mut books.invoices;
    require(page, args.id())?;
    let patch = args.to_patch();
    if patch.is_empty() {
        return render(page, Format::Table, "Nothing to update. ".to_string());
    }
    let number = page
        .update(args.id(), &patch)
        .pub_result(ErrorType::Validation)?
        .number
        .clone();
    render(page, Format::Table, format!("Updated invoice {number}. "))
}

/// Marks one invoice as sent.
///
/// # Errors
/// - Returns a not-found error if there is no such invoice.
/// - Returns a validation error if the invoice is already paid.
pub fn invoices_send(books: &mut Books, args: &IdArgs) -> Result<Out<Rows>> {
    let page = &mut books.invoices;
    require(page, args.id())?;
    let number = page
        .send(args.id())
        .pub_result(ErrorType::Validation)?
        .number
        .clone();
    render(page, Format::Table, format!("Sent invoice {number}. "))
}

/// Marks one invoice as paid.
///
/// # Errors
/// - Returns a not-found error if there is no such invoice.
/// - Returns a validation error if the invoice is still a draft.
pub fn invoices_pay(books: &mut Books, args: &IdArgs) -> Result<Out<Rows>> {
    let page = &mut books.invoices;
    require(page, args.id())?;
    let number = page
        .mark_paid(args.id())
        .pub_result(ErrorType::Validation)?
        .number
        .clone();
    render(page, Format::Table, format!("Invoice {number} is paid. "))
}

/// Deletes one invoice. Deleting an id that does not exist changes nothing.
pub fn invoices_delete(books: &mut Books, args: &IdArgs) -> Result<Out<Rows>> {
    let page = &mut books.invoices;
    let message = if page.delete(args.id()) {
        format!("Deleted invoice {}. ", args.id())
    } else {
        format!("No invoice with id '{}', nothing deleted. ", args.id())
    };
    render(page, Format::Table, message)
}

fn require(page: &InvoicesPage, id: &str) -> Result<()> {
    if page.store().contains(id) {
        Ok(())
    } else {
        Err(anyhow!("No invoice with id '{id}'")).pub_result(ErrorType::NotFound)
    }
}

fn render(page: &InvoicesPage, format: Format, prefix: String) -> Result<Out<Rows>> {
    let summary = page.summary();
    let rows = Rows::new(&page.visible(), format).pub_result(ErrorType::Io)?;
    let message = format!(
        "{prefix}Showing {} of {}, {} total, {} outstanding",
        summary.shown,
        plural(summary.total, "invoice"),
        summary.total_amount,
        summary.outstanding_amount
    );
    Ok(Out::new(message, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ListArgs;
    use crate::error::error_type;
    use crate::form::InvoicePatch;
    use crate::test::TestEnv;

    async fn books(env: &TestEnv) -> Books {
        crate::commands::open(&env.config(), None).await.unwrap()
    }

    #[tokio::test]
    async fn test_list_by_status() {
        let env = TestEnv::new().await;
        let mut books = books(&env).await;
        let args = InvoiceListArgs::new(ListArgs::new(None, Format::Csv), Some("overdue".into()));
        let out = invoices_list(&mut books, &args).unwrap();
        assert_eq!(
            out.message(),
            "Showing 1 of 4 invoices, $3,200.00 total, $3,200.00 outstanding"
        );
        let csv = out.structure().unwrap().to_string();
        assert!(csv.contains("XYZ Technologies"));
        assert!(!csv.contains("ABC Corporation"));
    }

    #[tokio::test]
    async fn test_list_rejects_unknown_status() {
        let env = TestEnv::new().await;
        let mut books = books(&env).await;
        let args = InvoiceListArgs::new(ListArgs::default(), Some("lost".into()));
        let err = invoices_list(&mut books, &args).unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Validation));
    }

    #[tokio::test]
    async fn test_add_uses_next_number() {
        let env = TestEnv::new().await;
        let mut books = books(&env).await;
        let args = InvoiceAddArgs::new(None, "Acme", "$1,200", "2024-02-01", "2024-03-01", "sent");
        let out = invoices_add(&mut books, &env.config(), &args).unwrap();
        assert!(out.message().starts_with("Created invoice INV-005 (5)."));
        let created = books.invoices.store().get("5").unwrap();
        assert_eq!(created.status, InvoiceStatus::Sent);
    }

    #[tokio::test]
    async fn test_add_rejects_due_before_issue() {
        let env = TestEnv::new().await;
        let mut books = books(&env).await;
        let args = InvoiceAddArgs::new(
            Some("INV-100".into()),
            "Acme",
            "10",
            "2024-03-01",
            "2024-02-01",
            "draft",
        );
        let err = invoices_add(&mut books, &env.config(), &args).unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Validation));
        assert!(err.to_string().contains("due_date"), "{err}");
        assert_eq!(books.invoices.store().len(), 4);
    }

    #[tokio::test]
    async fn test_add_with_number_when_none_can_be_suggested() {
        let env = TestEnv::new().await;
        let mut seed = crate::model::SeedData::default();
        seed.invoices[0].number = format!("INV-{}", u64::MAX);
        let mut books = Books::new(seed, env.config().tax_rate()).unwrap();

        let args = InvoiceAddArgs::new(None, "Acme", "10", "2024-02-01", "2024-03-01", "draft");
        let err = invoices_add(&mut books, &env.config(), &args).unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Validation));

        let args = InvoiceAddArgs::new(
            Some("INV-900".into()),
            "Acme",
            "10",
            "2024-02-01",
            "2024-03-01",
            "draft",
        );
        let out = invoices_add(&mut books, &env.config(), &args).unwrap();
        assert!(out.message().starts_with("Created invoice INV-900 (5)."));
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found() {
        let env = TestEnv::new().await;
        let mut books = books(&env).await;
        let patch = InvoicePatch {
            client: Some("Other".into()),
            ..Default::default()
        };
        let err = invoices_update(&mut books, &InvoiceUpdateArgs::new("42", patch)).unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::NotFound));
    }

    #[tokio::test]
    async fn test_send_then_pay() {
        let env = TestEnv::new().await;
        let mut books = books(&env).await;
        invoices_send(&mut books, &IdArgs::new("4")).unwrap();
        let out = invoices_pay(&mut books, &IdArgs::new("4")).unwrap();
        assert!(out.message().starts_with("Invoice INV-004 is paid."));
        let err = invoices_send(&mut books, &IdArgs::new("4")).unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Validation));
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let env = TestEnv::new().await;
        let mut books = books(&env).await;
        let out = invoices_delete(&mut books, &IdArgs::new("77")).unwrap();
        assert!(out.message().contains("nothing deleted"));
        assert_eq!(books.invoices.store().len(), 4);
    }
}
