//! Client command handlers.

use crate::args::{ClientAddArgs, ClientEditArgs, ClientListArgs, IdArgs};
use crate::commands::{plural, Out};
use crate::error::{ErrorType, IntoResult};
use crate::model::ClientStatus;
use crate::pages::{Books, ClientsPage};
use crate::render::{Format, Rows};
use crate::store::Choice;
use crate::Result;
use anyhow::{anyhow, Context};
use chrono::NaiveDate;

/// Lists the clients that match the search text and status.
///
/// # Returns
/// The matching clients in the requested format. The message summarizes all clients, whatever
/// the filter.
///
/// # Errors
/// - Returns a validation error if the status is not `active`, `inactive` or `all`.
pub fn clients_list(books: &mut Books, args: &ClientListArgs) -> Result<Out<Rows>> {
    let status = Choice::<ClientStatus>::parse(args.status())
        .with_context(|| format!("Unknown client status '{}'", args.status().unwrap_or("")))
        .pub_result(ErrorType::Validation)?;
    let page = &mut books.clients;
    page.set_search(args.list().search().unwrap_or(""));
    page.set_status(status);
    render(page, args.list().format(), String::new())
}

/// Adds a client with no invoices. `today` is recorded as its last invoice date.
///
/// # Errors
/// - Returns a validation error listing every rejected field.
pub fn clients_add(books: &mut Books, args: &ClientAddArgs, today: NaiveDate) -> Result<Out<Rows>> {
    let page = &mut books.clients;
    let id = page
        .create(&args.to_form(), today)
        .pub_result(ErrorType::Validation)?;
    render(page, Format::Table, format!("Added client {id}. "))
}

/// Changes the contact details or status of one client. Invoice totals are not editable.
///
/// # Errors
/// - Returns a not-found error if there is no such client.
/// - Returns a validation error if the edited client would be invalid.
pub fn clients_edit(books: &mut Books, args: &ClientEditArgs) -> Result<Out<Rows>> {
    let page = &mut books.clients;
    if !page.store().contains(args.id()) {
        return Err(anyhow!("No client with id '{}'", args.id())).pub_result(ErrorType::NotFound);
    }
    let patch = args.to_patch();
    if patch.is_empty() {
        return render(page, Format::Table, "Nothing to edit. ".to_string());
    }
    let name = page
        .edit(args.id(), &patch)
        .pub_result(ErrorType::Validation)?
        .name
        .clone();
    render(page, Format::Table, format!("Edited client {name}. "))
}

/// Deletes one client. Deleting an id that does not exist changes nothing.
pub fn clients_delete(books: &mut Books, args: &IdArgs) -> Result<Out<Rows>> {
    let page = &mut books.clients;
    let message = if page.delete(args.id()) {
        format!("Deleted client {}. ", args.id())
    } else {
        format!("No client with id '{}', nothing deleted. ", args.id())
    };
    render(page, Format::Table, message)
}

fn render(page: &ClientsPage, format: Format, prefix: String) -> Result<Out<Rows>> {
    let summary = page.summary();
    let visible = page.visible();
    let rows = Rows::new(&visible, format).pub_result(ErrorType::Io)?;
    let average = summary
        .average_revenue
        .map(|a| a.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let message = format!(
        "{prefix}Showing {} of {} ({} active), {} total revenue, {average} average",
        visible.len(),
        plural(summary.total_clients, "client"),
        summary.active_clients,
        summary.total_revenue,
    );
    Ok(Out::new(message, rows))
}
