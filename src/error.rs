use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// The broad category of a failure that is reported back to the user of a command.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The input was rejected before any record was constructed.
    Validation,
    /// The requested record does not exist.
    NotFound,
    /// The configuration or seed data could not be loaded.
    Config,
    /// A file system operation failed.
    Io,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

/// An error that has been tagged with an `ErrorType` at the public command boundary.
#[derive(Debug)]
pub struct TaggedError {
    error_type: ErrorType,
    source: Error,
}

impl TaggedError {
    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }
}

impl Display for TaggedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {:#}", self.error_type, self.source)
    }
}

impl std::error::Error for TaggedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

/// Tags the error side of a `Result` with an `ErrorType` before it leaves a command handler.
pub trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| {
            let source = e.into();
            // Keep the innermost tag if the error was already classified.
            if source.downcast_ref::<TaggedError>().is_some() {
                return source;
            }
            anyhow::Error::new(TaggedError { error_type, source })
        })
    }
}

/// Returns the `ErrorType` of `e` if it was tagged with `pub_result`.
pub fn error_type(e: &Error) -> Option<ErrorType> {
    e.downcast_ref::<TaggedError>().map(|t| t.error_type())
}
