pub mod args;
pub mod commands;
mod config;
mod error;
pub mod form;
pub mod model;
pub mod pages;
pub mod render;
pub mod routes;
pub mod store;
mod utils;

#[cfg(test)]
mod test;

pub use config::{Company, Config, Preferences, UserProfile};
pub use error::{error_type, Error, ErrorType, IntoResult, Result, TaggedError};
