use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the home directory and writes a default `config.json` into it.
///
/// # Arguments
/// - `home` - The directory that will be the home directory, e.g. `$HOME/accubooks`
///
/// # Errors
/// - Returns an error if a config file already exists.
/// - Returns an error if any file operations fail.
pub async fn init(home: &Path) -> Result<Out<()>> {
    let config = Config::create(home)
        .await
        .context("Unable to create the home directory and config")
        .pub_result(ErrorType::Config)?;
    Ok(format!("Created the config file at {}", config.config_path().display()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::error_type;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_then_init_again() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("books");
        let out = init(&home).await.unwrap();
        assert!(out.message().contains("config.json"));
        assert!(home.join("config.json").is_file());

        let err = init(&home).await.unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Config));
    }
}
