//! Configuration file handling for AccuBooks.
//!
//! The configuration file is stored at `$ACCUBOOKS_HOME/config.json`. It holds the company and
//! user profile shown on the settings and profile pages, display preferences, the tax rate used
//! by the reports and an optional seed file that replaces the built-in records.

use crate::model::SeedData;
use crate::{utils, Result};
use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "accubooks";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$ACCUBOOKS_HOME` and from there it loads `$ACCUBOOKS_HOME/config.json`.
///
/// Nothing here is required: a home directory without a config file behaves as if the default
/// file were present.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory and writes a default `config.json` into it.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the home directory, e.g. `$HOME/accubooks`
    ///
    /// # Errors
    /// - Returns an error if a config file already exists there.
    /// - Returns an error if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the accubooks home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        anyhow::ensure!(
            !config_path.exists(),
            "A config file already exists at '{}'",
            config_path.display()
        );

        let config_file = ConfigFile::default();
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    /// Loads `$ACCUBOOKS_HOME/config.json`. A missing home directory or config file gives the
    /// default configuration.
    pub async fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let home = home.into();
        let config_path = home.join(CONFIG_JSON);
        if !config_path.is_file() {
            debug!(
                "No config file at '{}', using the default configuration",
                config_path.display()
            );
            return Ok(Self {
                root: home,
                config_path,
                config_file: ConfigFile::default(),
            });
        }

        let root = utils::canonicalize(&home).await?;
        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile::load(&config_path).await?;
        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn company(&self) -> &Company {
        &self.config_file.company
    }

    pub fn user(&self) -> &UserProfile {
        &self.config_file.user
    }

    pub fn preferences(&self) -> &Preferences {
        &self.config_file.preferences
    }

    /// The tax rate used to estimate tax savings, e.g. `0.25`.
    pub fn tax_rate(&self) -> Decimal {
        self.config_file.tax_rate
    }

    /// Returns the stored `seed_path` if it is absolute, otherwise resolves it against the home
    /// directory.
    pub fn seed_path(&self) -> Option<PathBuf> {
        self.config_file
            .seed_path
            .as_ref()
            .map(|p| if p.is_absolute() { p.clone() } else { self.root.join(p) })
    }

    /// Loads the records every page starts from.
    ///
    /// `seed_override` wins over the configured `seed_path`. With neither, the built-in records
    /// are used.
    pub async fn seed(&self, seed_override: Option<&Path>) -> Result<SeedData> {
        let path = match seed_override {
            Some(p) => Some(p.to_path_buf()),
            None => self.seed_path(),
        };
        match path {
            Some(path) => {
                debug!("Loading seed data from '{}'", path.display());
                SeedData::load(&path).await
            }
            None => Ok(SeedData::default()),
        }
    }
}

/// The company section of the settings page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Company {
    pub name: String,
    pub business_type: String,
    pub address: String,
    pub tax_id: String,
    pub phone: String,
    pub email: String,
}

/// The signed-in user, shown on the settings and profile pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub role: String,
}

impl UserProfile {
    /// First and last name joined, without stray spaces when either is blank.
    pub fn full_name(&self) -> String {
        [self.first_name.trim(), self.last_name.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Display preferences. `invoice_prefix` is used when suggesting invoice numbers.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Preferences {
    pub currency: String,
    pub timezone: String,
    pub date_format: String,
    pub invoice_prefix: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            timezone: "UTC".to_string(),
            date_format: "MM/DD/YYYY".to_string(),
            invoice_prefix: "INV-".to_string(),
        }
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "accubooks",
///   "config_version": 1,
///   "company": { "name": "Acme LLC", "business_type": "LLC", "email": "books@acme.test" },
///   "user": { "first_name": "Ada", "last_name": "Lovelace", "role": "Owner" },
///   "preferences": { "currency": "USD", "invoice_prefix": "INV-" },
///   "tax_rate": "0.25",
///   "seed_path": "seed.json"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "accubooks"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    #[serde(default)]
    company: Company,

    #[serde(default)]
    user: UserProfile,

    #[serde(default)]
    preferences: Preferences,

    /// Fraction of tax-deductible spending saved in tax, between 0 and 1
    #[serde(default = "default_tax_rate")]
    tax_rate: Decimal,

    /// JSON file that replaces the built-in records (optional, relative to the home directory or
    /// absolute)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seed_path: Option<PathBuf>,
}

fn default_tax_rate() -> Decimal {
    DEFAULT_TAX_RATE
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            company: Company::default(),
            user: UserProfile::default(),
            preferences: Preferences::default(),
            tax_rate: DEFAULT_TAX_RATE,
            seed_path: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it fails validation
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .await
            .context("Unable to load the config file")?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.tax_rate >= Decimal::ZERO && config.tax_rate <= Decimal::ONE,
            "Invalid tax_rate in config file: expected a value from 0 to 1, got '{}'",
            config.tax_rate
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("accubooks_home");

        let config = Config::create(&home).await.unwrap();

        assert!(config.config_path().is_file());
        assert_eq!(config.tax_rate(), Decimal::new(25, 2));
        assert_eq!(config.preferences().invoice_prefix, "INV-");
        assert!(config.seed_path().is_none());
    }

    #[tokio::test]
    async fn test_config_create_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path()).await.unwrap();
        let err = Config::create(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("already exists"), "{err}");
    }

    #[tokio::test]
    async fn test_load_without_config_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path().join("missing")).await.unwrap();
        assert_eq!(config.company(), &Company::default());
        assert_eq!(config.tax_rate(), DEFAULT_TAX_RATE);
        let seed = config.seed(None).await.unwrap();
        assert_eq!(seed, SeedData::default());
    }

    #[tokio::test]
    async fn test_load_partial_config() {
        let dir = TempDir::new().unwrap();
        let json = r#"{
            "app_name": "accubooks",
            "config_version": 1,
            "company": { "name": "Acme LLC" },
            "tax_rate": 0.3,
            "seed_path": "seed.json"
        }"#;
        utils::write(dir.path().join(CONFIG_JSON), json)
            .await
            .unwrap();

        let config = Config::load(dir.path()).await.unwrap();
        assert_eq!(config.company().name, "Acme LLC");
        assert_eq!(config.company().email, "");
        assert_eq!(config.preferences(), &Preferences::default());
        assert_eq!(config.tax_rate(), Decimal::new(3, 1));
        assert_eq!(
            config.seed_path().unwrap(),
            config.root().join("seed.json")
        );
    }

    #[tokio::test]
    async fn test_load_rejects_wrong_app_name() {
        let dir = TempDir::new().unwrap();
        let json = r#"{ "app_name": "ledger", "config_version": 1 }"#;
        utils::write(dir.path().join(CONFIG_JSON), json)
            .await
            .unwrap();
        let err = Config::load(dir.path()).await.unwrap_err();
        assert!(format!("{err:#}").contains("Invalid app_name"), "{err:#}");
    }

    #[tokio::test]
    async fn test_load_rejects_bad_tax_rate() {
        let dir = TempDir::new().unwrap();
        let json = r#"{ "app_name": "accubooks", "config_version": 1, "tax_rate": 2 }"#;
        utils::write(dir.path().join(CONFIG_JSON), json)
            .await
            .unwrap();
        assert!(Config::load(dir.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_seed_override_wins() {
        let dir = TempDir::new().unwrap();
        let seed_path = dir.path().join("other.json");
        utils::write(&seed_path, r#"{ "clients": [] }"#)
            .await
            .unwrap();
        let config = Config::create(dir.path().join("home")).await.unwrap();
        let seed = config.seed(Some(&seed_path)).await.unwrap();
        assert!(seed.clients.is_empty());
        assert_eq!(seed.invoices.len(), 4);
    }

    #[test]
    fn test_full_name() {
        let user = UserProfile {
            first_name: "Ada".into(),
            last_name: " ".into(),
            ..Default::default()
        };
        assert_eq!(user.full_name(), "Ada");
    }
}
