//! Command handlers for the accubooks CLI.
//!
//! Each handler works on a freshly seeded [`Books`] and returns an [`Out`] holding a message for
//! the log and the data to print.

mod clients;
mod expenses;
mod init;
mod invoices;
mod views;

use crate::error::{ErrorType, IntoResult};
use crate::pages::Books;
use crate::{Config, Result};
use anyhow::Context;
use serde::Serialize;
use std::fmt::Debug;
use std::path::Path;
use tracing::{debug, info};

pub use clients::{clients_add, clients_delete, clients_edit, clients_list};
pub use expenses::{
    expenses_add, expenses_categories, expenses_delete, expenses_list, expenses_update,
};
pub use init::init;
pub use invoices::{
    invoices_add, invoices_delete, invoices_list, invoices_pay, invoices_send, invoices_update,
};
pub use views::{dashboard, profile, reports, route, settings};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) to stdout.
    ///
    /// Data that serializes to a plain string, such as a rendered table, is printed as is.
    /// Anything else is printed as pretty JSON.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            match serde_json::to_value(structure) {
                Ok(serde_json::Value::String(s)) => print!("{s}"),
                Ok(value) => match serde_json::to_string_pretty(&value) {
                    Ok(json) => println!("{json}"),
                    Err(e) => debug!("Unable to print command output: {e}"),
                },
                Err(e) => debug!("Unable to print command output: {e}"),
            }
        }
    }
}

/// Seeds every page from `seed_override`, the configured seed file or the built-in records.
///
/// # Errors
/// - Returns an error if the seed file cannot be read or parsed.
/// - Returns an error if a seed list repeats an id.
pub async fn open(config: &Config, seed_override: Option<&Path>) -> Result<Books> {
    let seed = config.seed(seed_override).await.pub_result(ErrorType::Config)?;
    Books::new(seed, config.tax_rate())
        .context("The seed data is not usable")
        .pub_result(ErrorType::Config)
}

/// `count` followed by `noun`, with an `s` unless `count` is one.
fn plural(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, if count == 1 { "" } else { "s" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::error_type;
    use crate::test::TestEnv;

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "invoice"), "1 invoice");
        assert_eq!(plural(0, "client"), "0 clients");
    }

    #[tokio::test]
    async fn test_open_with_builtin_seed() {
        let env = TestEnv::new().await;
        let books = open(&env.config(), None).await.unwrap();
        assert_eq!(books.invoices.store().len(), 4);
        assert_eq!(books.clients.store().len(), 3);
    }

    #[tokio::test]
    async fn test_open_with_missing_seed_file() {
        let env = TestEnv::new().await;
        let missing = env.root().join("nope.json");
        let err = open(&env.config(), Some(&missing)).await.unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Config));
    }

    #[test]
    fn test_out_message() {
        let out: Out<()> = "done".into();
        assert_eq!(out.message(), "done");
        assert!(out.structure().is_none());
    }
}
