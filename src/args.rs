//! These structs provide the CLI interface for the accubooks CLI.

use crate::form::{ClientForm, ClientPatch, ExpenseForm, ExpensePatch, InvoiceForm, InvoicePatch};
use crate::pages::ReportTab;
use crate::render::Format;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// accubooks: Invoices, expenses, clients and reports for a small business.
///
/// Every command starts from the same seed records (built in, or read from a JSON seed file),
/// applies at most one change and prints the resulting view. Nothing is saved between runs.
///
/// Log messages go to stderr and command output goes to stdout, so output can be piped.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory and write a default config.json into it.
    ///
    /// Edit the file afterwards to fill in your company and profile details, the tax rate used
    /// by the reports, or a seed_path pointing at your own records.
    Init,
    /// Show which page a path such as /invoices resolves to.
    Route(RouteArgs),
    /// Show the headline metrics, quick actions and recent activity.
    Dashboard,
    /// List, add, update, send, pay or delete invoices.
    Invoices(InvoicesArgs),
    /// List, add, update or delete expenses, or list their categories.
    Expenses(ExpensesArgs),
    /// List, add, edit or delete clients.
    Clients(ClientsArgs),
    /// Show the financial report for a period.
    Reports(ReportsArgs),
    /// Show the company, user and preference settings.
    Settings,
    /// Show the user profile.
    Profile,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where the accubooks configuration is held. Defaults to ~/accubooks
    #[arg(long, env = "ACCUBOOKS_HOME", default_value_t = default_accubooks_home())]
    home: DisplayPath,

    /// A JSON seed file that replaces the built-in records. Overrides seed_path in config.json.
    #[arg(long)]
    seed: Option<PathBuf>,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf, seed: Option<PathBuf>) -> Self {
        Self {
            log_level,
            home: home.into(),
            seed,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }

    pub fn seed(&self) -> Option<&Path> {
        self.seed.as_deref()
    }
}

/// (Not shown): Args for the `accubooks route` command.
#[derive(Debug, Parser, Clone)]
pub struct RouteArgs {
    /// The path to resolve, e.g. /clients
    path: String,
}

impl RouteArgs {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Search and filter options shared by the list subcommands.
#[derive(Debug, Parser, Clone, Default)]
pub struct ListArgs {
    /// Only show records containing this text (case-insensitive).
    #[arg(long)]
    search: Option<String>,

    /// The output format.
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

impl ListArgs {
    pub fn new(search: Option<String>, format: Format) -> Self {
        Self { search, format }
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn format(&self) -> Format {
        self.format
    }
}

/// (Not shown): Args for the `accubooks invoices` command.
#[derive(Debug, Parser, Clone)]
pub struct InvoicesArgs {
    #[command(subcommand)]
    command: InvoicesCommand,
}

impl InvoicesArgs {
    pub fn new(command: InvoicesCommand) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &InvoicesCommand {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum InvoicesCommand {
    /// List invoices matching a search and status.
    List(InvoiceListArgs),
    /// Create an invoice.
    Add(InvoiceAddArgs),
    /// Change fields of an invoice.
    Update(InvoiceUpdateArgs),
    /// Mark an invoice as sent.
    Send(IdArgs),
    /// Mark a sent or overdue invoice as paid.
    Pay(IdArgs),
    /// Delete an invoice.
    Delete(IdArgs),
}

/// (Not shown): Args for `accubooks invoices list`.
#[derive(Debug, Parser, Clone, Default)]
pub struct InvoiceListArgs {
    #[clap(flatten)]
    list: ListArgs,

    /// One of draft, sent, paid, overdue or all.
    #[arg(long)]
    status: Option<String>,
}

impl InvoiceListArgs {
    pub fn new(list: ListArgs, status: Option<String>) -> Self {
        Self { list, status }
    }

    pub fn list(&self) -> &ListArgs {
        &self.list
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

/// (Not shown): Args for `accubooks invoices add`.
#[derive(Debug, Parser, Clone, Default)]
pub struct InvoiceAddArgs {
    /// The invoice number. Defaults to the next number after the highest existing one, using the
    /// invoice_prefix preference.
    #[arg(long)]
    number: Option<String>,

    /// The client name as it should appear on the invoice.
    #[arg(long)]
    client: String,

    /// The amount, e.g. 1250.00 or $1,250
    #[arg(long)]
    amount: String,

    /// The issue date as YYYY-MM-DD.
    #[arg(long)]
    issue_date: String,

    /// The due date as YYYY-MM-DD. Must not be before the issue date.
    #[arg(long)]
    due_date: String,

    /// One of draft, sent, paid or overdue.
    #[arg(long, default_value = "draft")]
    status: String,
}

impl InvoiceAddArgs {
    pub fn new(
        number: Option<String>,
        client: impl Into<String>,
        amount: impl Into<String>,
        issue_date: impl Into<String>,
        due_date: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            number,
            client: client.into(),
            amount: amount.into(),
            issue_date: issue_date.into(),
            due_date: due_date.into(),
            status: status.into(),
        }
    }

    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    /// The form these arguments fill in, using `number` when none was given.
    pub fn to_form(&self, number: impl Into<String>) -> InvoiceForm {
        InvoiceForm {
            number: self.number.clone().unwrap_or_else(|| number.into()),
            client: self.client.clone(),
            amount: self.amount.clone(),
            issue_date: self.issue_date.clone(),
            due_date: self.due_date.clone(),
            status: self.status.clone(),
        }
    }
}

/// (Not shown): Args for `accubooks invoices update`.
#[derive(Debug, Parser, Clone, Default)]
pub struct InvoiceUpdateArgs {
    /// The id of the invoice to update.
    id: String,

    #[arg(long)]
    number: Option<String>,

    #[arg(long)]
    client: Option<String>,

    #[arg(long)]
    amount: Option<String>,

    #[arg(long)]
    issue_date: Option<String>,

    #[arg(long)]
    due_date: Option<String>,

    #[arg(long)]
    status: Option<String>,
}

impl InvoiceUpdateArgs {
    pub fn new(id: impl Into<String>, patch: InvoicePatch) -> Self {
        Self {
            id: id.into(),
            number: patch.number,
            client: patch.client,
            amount: patch.amount,
            issue_date: patch.issue_date,
            due_date: patch.due_date,
            status: patch.status,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn to_patch(&self) -> InvoicePatch {
        InvoicePatch {
            number: self.number.clone(),
            client: self.client.clone(),
            amount: self.amount.clone(),
            issue_date: self.issue_date.clone(),
            due_date: self.due_date.clone(),
            status: self.status.clone(),
        }
    }
}

/// (Not shown): Args for subcommands that act on one record.
#[derive(Debug, Parser, Clone)]
pub struct IdArgs {
    /// The id of the record.
    id: String,
}

impl IdArgs {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// (Not shown): Args for the `accubooks expenses` command.
#[derive(Debug, Parser, Clone)]
pub struct ExpensesArgs {
    #[command(subcommand)]
    command: ExpensesCommand,
}

impl ExpensesArgs {
    pub fn new(command: ExpensesCommand) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &ExpensesCommand {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ExpensesCommand {
    /// List expenses matching a search and category.
    List(ExpenseListArgs),
    /// Record an expense.
    Add(ExpenseAddArgs),
    /// Change fields of an expense.
    Update(ExpenseUpdateArgs),
    /// Delete an expense.
    Delete(IdArgs),
    /// List the categories in use.
    Categories,
}

/// (Not shown): Args for `accubooks expenses list`.
#[derive(Debug, Parser, Clone, Default)]
pub struct ExpenseListArgs {
    #[clap(flatten)]
    list: ListArgs,

    /// A category name, or all.
    #[arg(long)]
    category: Option<String>,
}

impl ExpenseListArgs {
    pub fn new(list: ListArgs, category: Option<String>) -> Self {
        Self { list, category }
    }

    pub fn list(&self) -> &ListArgs {
        &self.list
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// (Not shown): Args for `accubooks expenses add`.
#[derive(Debug, Parser, Clone, Default)]
pub struct ExpenseAddArgs {
    /// The date as YYYY-MM-DD.
    #[arg(long)]
    date: String,

    #[arg(long)]
    description: String,

    #[arg(long)]
    category: String,

    #[arg(long)]
    vendor: String,

    /// The amount, e.g. 49.99
    #[arg(long)]
    amount: String,

    /// The expense is tax deductible.
    #[arg(long)]
    tax_deductible: bool,

    /// A receipt is on file.
    #[arg(long)]
    has_receipt: bool,
}

impl ExpenseAddArgs {
    pub fn new(form: ExpenseForm) -> Self {
        Self {
            date: form.date,
            description: form.description,
            category: form.category,
            vendor: form.vendor,
            amount: form.amount,
            tax_deductible: form.tax_deductible,
            has_receipt: form.has_receipt,
        }
    }

    pub fn to_form(&self) -> ExpenseForm {
        ExpenseForm {
            date: self.date.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            vendor: self.vendor.clone(),
            amount: self.amount.clone(),
            tax_deductible: self.tax_deductible,
            has_receipt: self.has_receipt,
        }
    }
}

/// (Not shown): Args for `accubooks expenses update`.
#[derive(Debug, Parser, Clone, Default)]
pub struct ExpenseUpdateArgs {
    /// The id of the expense to update.
    id: String,

    #[arg(long)]
    date: Option<String>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    vendor: Option<String>,

    #[arg(long)]
    amount: Option<String>,

    /// true or false
    #[arg(long)]
    tax_deductible: Option<bool>,

    /// true or false
    #[arg(long)]
    has_receipt: Option<bool>,
}

impl ExpenseUpdateArgs {
    pub fn new(id: impl Into<String>, patch: ExpensePatch) -> Self {
        Self {
            id: id.into(),
            date: patch.date,
            description: patch.description,
            category: patch.category,
            vendor: patch.vendor,
            amount: patch.amount,
            tax_deductible: patch.tax_deductible,
            has_receipt: patch.has_receipt,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn to_patch(&self) -> ExpensePatch {
        ExpensePatch {
            date: self.date.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            vendor: self.vendor.clone(),
            amount: self.amount.clone(),
            tax_deductible: self.tax_deductible,
            has_receipt: self.has_receipt,
        }
    }
}

/// (Not shown): Args for the `accubooks clients` command.
#[derive(Debug, Parser, Clone)]
pub struct ClientsArgs {
    #[command(subcommand)]
    command: ClientsCommand,
}

impl ClientsArgs {
    pub fn new(command: ClientsCommand) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &ClientsCommand {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ClientsCommand {
    /// List clients matching a search and status.
    List(ClientListArgs),
    /// Add a client.
    Add(ClientAddArgs),
    /// Change the contact details or status of a client.
    Edit(ClientEditArgs),
    /// Delete a client.
    Delete(IdArgs),
}

/// (Not shown): Args for `accubooks clients list`.
#[derive(Debug, Parser, Clone, Default)]
pub struct ClientListArgs {
    #[clap(flatten)]
    list: ListArgs,

    /// One of active, inactive or all.
    #[arg(long)]
    status: Option<String>,
}

impl ClientListArgs {
    pub fn new(list: ListArgs, status: Option<String>) -> Self {
        Self { list, status }
    }

    pub fn list(&self) -> &ListArgs {
        &self.list
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

/// (Not shown): Args for `accubooks clients add`.
#[derive(Debug, Parser, Clone)]
pub struct ClientAddArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    phone: String,

    #[arg(long)]
    address: String,

    #[arg(long)]
    company: String,

    /// One of active or inactive.
    #[arg(long, default_value = "active")]
    status: String,
}

impl ClientAddArgs {
    pub fn new(form: ClientForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
            phone: form.phone,
            address: form.address,
            company: form.company,
            status: form.status,
        }
    }

    pub fn to_form(&self) -> ClientForm {
        ClientForm {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            company: self.company.clone(),
            status: self.status.clone(),
        }
    }
}

/// (Not shown): Args for `accubooks clients edit`.
#[derive(Debug, Parser, Clone, Default)]
pub struct ClientEditArgs {
    /// The id of the client to edit, e.g. CLI-001
    id: String,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    #[arg(long)]
    address: Option<String>,

    #[arg(long)]
    company: Option<String>,

    #[arg(long)]
    status: Option<String>,
}

impl ClientEditArgs {
    pub fn new(id: impl Into<String>, patch: ClientPatch) -> Self {
        Self {
            id: id.into(),
            name: patch.name,
            email: patch.email,
            phone: patch.phone,
            address: patch.address,
            company: patch.company,
            status: patch.status,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn to_patch(&self) -> ClientPatch {
        ClientPatch {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            company: self.company.clone(),
            status: self.status.clone(),
        }
    }
}

/// (Not shown): Args for the `accubooks reports` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ReportsArgs {
    /// The period as YYYY-MM. Defaults to the most recent period.
    #[arg(long)]
    period: Option<String>,

    /// Which breakdown to show.
    #[arg(long, value_enum, default_value_t = ReportTab::Overview)]
    tab: ReportTab,
}

impl ReportsArgs {
    pub fn new(period: Option<String>, tab: ReportTab) -> Self {
        Self { period, tab }
    }

    pub fn period(&self) -> Option<&str> {
        self.period.as_deref()
    }

    pub fn tab(&self) -> ReportTab {
        self.tab
    }
}

fn default_accubooks_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("accubooks"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or ACCUBOOKS_HOME instead of relying on the default \
                accubooks home directory.",
            );
            PathBuf::from("accubooks")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_invoice_add() {
        let args = Args::try_parse_from([
            "accubooks",
            "--home",
            "/tmp/books",
            "invoices",
            "add",
            "--client",
            "Acme",
            "--amount",
            "$1,200",
            "--issue-date",
            "2024-02-01",
            "--due-date",
            "2024-03-01",
        ])
        .unwrap();
        assert_eq!(args.common().home().path(), Path::new("/tmp/books"));
        let Command::Invoices(invoices) = args.command() else {
            panic!("expected invoices");
        };
        let InvoicesCommand::Add(add) = invoices.command() else {
            panic!("expected add");
        };
        assert_eq!(add.number(), None);
        let form = add.to_form("INV-005");
        assert_eq!(form.number, "INV-005");
        assert_eq!(form.status, "draft");
    }

    #[test]
    fn test_parse_reports_tab() {
        let args =
            Args::try_parse_from(["accubooks", "reports", "--tab", "trends", "--period", "2023-11"])
                .unwrap();
        let Command::Reports(reports) = args.command() else {
            panic!("expected reports");
        };
        assert_eq!(reports.tab(), ReportTab::Trends);
        assert_eq!(reports.period(), Some("2023-11"));
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        let result =
            Args::try_parse_from(["accubooks", "clients", "list", "--format", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_clients_add_needs_phone_and_address() {
        let base = [
            "accubooks", "clients", "add", "--name", "Ada", "--email", "ada@engines.co",
            "--company", "Engines",
        ];
        assert!(Args::try_parse_from(base).is_err());

        let mut full = base.to_vec();
        full.extend(["--phone", "555-0100", "--address", "1 Main St"]);
        let args = Args::try_parse_from(full).unwrap();
        let Command::Clients(clients) = args.command() else {
            panic!("expected clients");
        };
        let ClientsCommand::Add(add) = clients.command() else {
            panic!("expected add");
        };
        assert_eq!(add.to_form().address, "1 Main St");
    }

    #[test]
    fn test_log_level_default() {
        let args = Args::try_parse_from(["accubooks", "dashboard"]).unwrap();
        assert_eq!(args.common().log_level(), LevelFilter::INFO);
        assert!(args.common().seed().is_none());
    }
}
