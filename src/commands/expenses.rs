//! Expense command handlers.

use crate::args::{ExpenseAddArgs, ExpenseListArgs, ExpenseUpdateArgs, IdArgs};
use crate::commands::{plural, Out};
use crate::error::{ErrorType, IntoResult};
use crate::pages::{Books, ExpensesPage};
use crate::render::{Format, Rows};
use crate::store::Choice;
use crate::Result;
use anyhow::anyhow;

/// Lists the expenses that match the search text and category.
///
/// # Returns
/// The matching expenses in the requested format. The message gives the count, the total and
/// how much of it is tax deductible.
pub fn expenses_list(books: &mut Books, args: &ExpenseListArgs) -> Result<Out<Rows>> {
    // String parsing cannot fail
    let category = Choice::<String>::parse(args.category()).pub_result(ErrorType::Validation)?;
    let page = &mut books.expenses;
    page.set_search(args.list().search().unwrap_or(""));
    page.set_category(category);
    render(page, args.list().format(), String::new())
}

/// Records an expense.
///
/// # Errors
/// - Returns a validation error listing every rejected field.
pub fn expenses_add(books: &mut Books, args: &ExpenseAddArgs) -> Result<Out<Rows>> {
    let page = &mut books.expenses;
    let id = page
        .create(&args.to_form())
        .pub_result(ErrorType::Validation)?;
    render(page, Format::Table, format!("Recorded expense {id}. "))
}

/// Changes the given fields of one expense.
///
/// # Errors
/// - Returns a not-found error if there is no such expense.
/// - Returns a validation error if the changed expense would be invalid.
pub fn expenses_update(books: &mut Books, args: &ExpenseUpdateArgs) -> Result<Out<Rows>> {
    let page = &mut books.expenses;
    if !page.store().contains(args.id()) {
        return Err(anyhow!("No expense with id '{}'", args.id())).pub_result(ErrorType::NotFound);
    }
    let patch = args.to_patch();
    if patch.is_empty() {
        return render(page, Format::Table, "Nothing to update. ".to_string());
    }
    page.update(args.id(), &patch)
        .pub_result(ErrorType::Validation)?;
    render(page, Format::Table, format!("Updated expense {}. ", args.id()))
}

/// Deletes one expense. Deleting an id that does not exist changes nothing.
pub fn expenses_delete(books: &mut Books, args: &IdArgs) -> Result<Out<Rows>> {
    let page = &mut books.expenses;
    let message = if page.delete(args.id()) {
        format!("Deleted expense {}. ", args.id())
    } else {
        format!("No expense with id '{}', nothing deleted. ", args.id())
    };
    render(page, Format::Table, message)
}

/// Lists the expense categories in use, in the order they first appear.
pub fn expenses_categories(books: &Books) -> Result<Out<Vec<String>>> {
    let categories: Vec<String> = books
        .expenses
        .categories()
        .into_iter()
        .map(str::to_string)
        .collect();
    Ok(Out::new(
        format!("Found {}", plural_category(categories.len())),
        categories,
    ))
}

fn plural_category(count: usize) -> String {
    format!("{} categor{}", count, if count == 1 { "y" } else { "ies" })
}

fn render(page: &ExpensesPage, format: Format, prefix: String) -> Result<Out<Rows>> {
    let summary = page.summary();
    let rows = Rows::new(&page.visible(), format).pub_result(ErrorType::Io)?;
    let deductible = match summary.tax_deductible_percent {
        Some(p) => format!("{}%", p.normalize()),
        None => "N/A".to_string(),
    };
    let message = format!(
        "{prefix}Showing {} of {}, {} total, {} tax deductible ({deductible}), {} missing",
        summary.shown,
        plural(summary.total, "expense"),
        summary.total_amount,
        summary.tax_deductible_amount,
        plural(summary.receipts_missing, "receipt"),
    );
    Ok(Out::new(message, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ListArgs;
    use crate::error::error_type;
    use crate::form::{ExpenseForm, ExpensePatch};
    use crate::model::Amount;
    use crate::test::TestEnv;

    async fn books(env: &TestEnv) -> Books {
        crate::commands::open(&env.config(), None).await.unwrap()
    }

    #[tokio::test]
    async fn test_list_by_category() {
        let env = TestEnv::new().await;
        let mut books = books(&env).await;
        let args = ExpenseListArgs::new(ListArgs::default(), Some("Software".into()));
        let out = expenses_list(&mut books, &args).unwrap();
        assert_eq!(
            out.message(),
            "Showing 1 of 5 expenses, $59.99 total, $59.99 tax deductible (100%), 0 receipts missing"
        );
    }

    #[tokio::test]
    async fn test_empty_list_shows_na() {
        let env = TestEnv::new().await;
        let mut books = books(&env).await;
        let args = ExpenseListArgs::new(ListArgs::new(Some("zzz".into()), Format::Json), None);
        let out = expenses_list(&mut books, &args).unwrap();
        assert!(out.message().contains("(N/A)"), "{}", out.message());
    }

    #[tokio::test]
    async fn test_add_and_categories() {
        let env = TestEnv::new().await;
        let mut books = books(&env).await;
        let args = ExpenseAddArgs::new(ExpenseForm {
            date: "2024-02-02".into(),
            description: "Conference ticket".into(),
            category: "Education".into(),
            vendor: "RustConf".into(),
            amount: "300".into(),
            tax_deductible: true,
            has_receipt: true,
        });
        expenses_add(&mut books, &args).unwrap();
        let out = expenses_categories(&books).unwrap();
        assert_eq!(out.message(), "Found 6 categories");
        assert_eq!(out.structure().unwrap().last().unwrap(), "Education");
    }

    #[tokio::test]
    async fn test_add_rejects_negative_amount() {
        let env = TestEnv::new().await;
        let mut books = books(&env).await;
        let args = ExpenseAddArgs::new(ExpenseForm {
            date: "2024-02-02".into(),
            description: "Refund".into(),
            category: "Other".into(),
            vendor: "Shop".into(),
            amount: "-5".into(),
            ..Default::default()
        });
        let err = expenses_add(&mut books, &args).unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Validation));
    }

    #[tokio::test]
    async fn test_update() {
        let env = TestEnv::new().await;
        let mut books = books(&env).await;
        let patch = ExpensePatch {
            amount: Some("100".into()),
            ..Default::default()
        };
        expenses_update(&mut books, &ExpenseUpdateArgs::new("2", patch.clone())).unwrap();
        assert_eq!(
            books.expenses.store().get("2").unwrap().amount,
            Amount::cents(10_000)
        );
        let err = expenses_update(&mut books, &ExpenseUpdateArgs::new("9", patch)).unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::NotFound));
    }

    #[tokio::test]
    async fn test_delete() {
        let env = TestEnv::new().await;
        let mut books = books(&env).await;
        let out = expenses_delete(&mut books, &IdArgs::new("5")).unwrap();
        assert!(out.message().starts_with("Deleted expense 5. Showing 4 of 4 expenses"));
    }
}
