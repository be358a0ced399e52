use accubooks::args::{Args, ClientsCommand, Command, ExpensesCommand, InvoicesCommand};
use accubooks::{commands, Config, ErrorType, IntoResult, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().home().path();
    let seed = args.common().seed();

    // Commands that need no records
    match args.command() {
        Command::Init => {
            commands::init(home).await?.print();
            return Ok(());
        }
        Command::Route(route_args) => {
            commands::route(route_args)?.print();
            return Ok(());
        }
        _ => {}
    }

    let config = Config::load(home).await.pub_result(ErrorType::Config)?;
    let mut books = commands::open(&config, seed).await?;

    let _: () = match args.command() {
        Command::Init | Command::Route(_) => {}

        Command::Dashboard => commands::dashboard(&books)?.print(),

        Command::Invoices(invoices_args) => match invoices_args.command() {
            InvoicesCommand::List(a) => commands::invoices_list(&mut books, a)?.print(),
            InvoicesCommand::Add(a) => commands::invoices_add(&mut books, &config, a)?.print(),
            InvoicesCommand::Update(a) => commands::invoices_update(&mut books, a)?.print(),
            InvoicesCommand::Send(a) => commands::invoices_send(&mut books, a)?.print(),
            InvoicesCommand::Pay(a) => commands::invoices_pay(&mut books, a)?.print(),
            InvoicesCommand::Delete(a) => commands::invoices_delete(&mut books, a)?.print(),
        },

        Command::Expenses(expenses_args) => match expenses_args.command() {
            ExpensesCommand::List(a) => commands::expenses_list(&mut books, a)?.print(),
            ExpensesCommand::Add(a) => commands::expenses_add(&mut books, a)?.print(),
            ExpensesCommand::Update(a) => commands::expenses_update(&mut books, a)?.print(),
            ExpensesCommand::Delete(a) => commands::expenses_delete(&mut books, a)?.print(),
            ExpensesCommand::Categories => commands::expenses_categories(&books)?.print(),
        },

        Command::Clients(clients_args) => match clients_args.command() {
            ClientsCommand::List(a) => commands::clients_list(&mut books, a)?.print(),
            ClientsCommand::Add(a) => {
                let today = chrono::Local::now().date_naive();
                commands::clients_add(&mut books, a, today)?.print()
            }
            ClientsCommand::Edit(a) => commands::clients_edit(&mut books, a)?.print(),
            ClientsCommand::Delete(a) => commands::clients_delete(&mut books, a)?.print(),
        },

        Command::Reports(reports_args) => commands::reports(&mut books, reports_args)?.print(),

        Command::Settings => commands::settings(&config)?.print(),

        Command::Profile => commands::profile(&config)?.print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
