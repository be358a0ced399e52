//! Types that represent the core data model, such as `Invoice`, `Expense` and `Client`.
mod activity;
mod amount;
mod client;
mod expense;
mod invoice;
mod report;
pub mod seed;

pub use activity::{Activity, ActivityKind, ActivityStatus, QuickAction};
pub use amount::{Amount, AmountError};
pub use client::{Client, ClientStatus};
pub use expense::Expense;
pub use invoice::{Invoice, InvoiceStatus};
pub use report::{CategoryShare, ReportPeriod};
pub use seed::SeedData;
