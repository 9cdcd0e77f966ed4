use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::filter::DEFAULT_MIN_POPULARITY;
use crate::model::MAX_POPULARITY;

/// Upper bound on the recommendation count offered by default.
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 100;

/// Keys accepted by `galaxy config get` / `galaxy config set`.
pub const KEYS: [&str; 3] = ["catalog_path", "min_popularity", "max_recommendations"];

/// Configuration for galaxy.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (GALAXY_* prefix)
/// 3. Config file (~/.config/galaxy/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the catalog artifact.
    ///
    /// Can be set via:
    /// - CLI: --catalog /path/to/catalog.bin
    /// - ENV: GALAXY_CATALOG_PATH
    /// - Config: catalog_path = "/path/to/catalog.bin"
    /// - Default: ~/.local/share/galaxy/catalog.bin
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Popularity floor applied when the dashboard opens (0-100).
    #[serde(
        default = "default_min_popularity",
        deserialize_with = "deserialize_number"
    )]
    pub min_popularity: u8,

    /// Largest recommendation count offered.
    #[serde(
        default = "default_max_recommendations",
        deserialize_with = "deserialize_number"
    )]
    pub max_recommendations: usize,

    /// Logger options, handed to twyg at startup.
    #[serde(default)]
    pub logging: twyg::Opts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            min_popularity: default_min_popularity(),
            max_recommendations: default_max_recommendations(),
            logging: twyg::Opts::default(),
        }
    }
}

impl Config {
    /// Load configuration from `config_path` and environment variables.
    ///
    /// The default file lives at [`config_file_path`]; environment
    /// variables use the GALAXY_ prefix. A missing file is not an error;
    /// defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed, or
    /// holds out-of-range values.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("galaxy");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Override the catalog path (used when the --catalog CLI flag is given).
    #[must_use]
    pub fn with_catalog_path(mut self, catalog_path: PathBuf) -> Self {
        self.catalog_path = catalog_path;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.min_popularity > MAX_POPULARITY {
            anyhow::bail!(
                "min_popularity must be between 0 and {}, got {}",
                MAX_POPULARITY,
                self.min_popularity
            );
        }
        validate_max_recommendations(self.max_recommendations)
    }

    /// Render one config key as text.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "catalog_path" => Ok(self.catalog_path.display().to_string()),
            "min_popularity" => Ok(self.min_popularity.to_string()),
            "max_recommendations" => Ok(self.max_recommendations.to_string()),
            _ => Err(unknown_key(key)),
        }
    }
}

/// Accept a number written either as a TOML integer or as text.
///
/// Environment overrides reach the builder as strings.
fn deserialize_number<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: fmt::Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText<T> {
        Number(T),
        Text(String),
    }

    match NumberOrText::<T>::deserialize(deserializer)? {
        NumberOrText::Number(value) => Ok(value),
        NumberOrText::Text(text) => text.trim().parse().map_err(|e| {
            serde::de::Error::custom(format!("invalid number {text:?}: {e}"))
        }),
    }
}

fn validate_max_recommendations(value: usize) -> Result<()> {
    if value == 0 || value % 5 != 0 {
        anyhow::bail!(
            "max_recommendations must be a positive multiple of 5, got {}",
            value
        );
    }
    Ok(())
}

fn unknown_key(key: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Unknown config key: {}\n\nValid keys: {}",
        key,
        KEYS.join(", ")
    )
}

/// Get the default catalog path.
///
/// Returns: ~/.local/share/galaxy/catalog.bin (or platform equivalent)
fn default_catalog_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("galaxy")
        .join("catalog.bin")
}

const fn default_min_popularity() -> u8 {
    DEFAULT_MIN_POPULARITY
}

const fn default_max_recommendations() -> usize {
    DEFAULT_MAX_RECOMMENDATIONS
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/galaxy/config.toml
/// - macOS: ~/Library/Application Support/galaxy/config.toml
/// - Windows: %APPDATA%\galaxy\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("galaxy")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Galaxy Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (GALAXY_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Path to the catalog artifact
#
# Supported encodings, picked by extension:
# - .bin / .galaxy          columnar table
# - .db / .sqlite / .sqlite3  SQLite database with a `tracks` table
# - .json                   array of track records
#
# Can also be set via:
# - CLI: galaxy --catalog /custom/catalog.bin explore
# - Environment: GALAXY_CATALOG_PATH=/custom/catalog.bin
#
# Default: Platform-specific data directory
#catalog_path = "/path/to/catalog.bin"

# Minimum popularity (0-100) applied when the dashboard opens
min_popularity = 20

# Largest number of recommendations offered (a multiple of 5)
max_recommendations = 100

# Logging options
#
# Set an output file when using the interactive dashboard so log lines do
# not land on the terminal it draws to.
#[logging]
#coloured = true
#level = "info"
"#
}

/// Create the config file at `config_path` from the example if it doesn't
/// exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

/// Set one key in the config file at `config_path`, keeping comments and
/// layout intact. The file is created from the example if missing.
pub fn set_value(config_path: &Path, key: &str, value: &str) -> Result<()> {
    ensure_config_file(config_path)?;

    let contents = std::fs::read_to_string(config_path).context("Failed to read config file")?;
    let mut doc = contents
        .parse::<toml_edit::DocumentMut>()
        .context("Failed to parse config file")?;

    match key {
        "catalog_path" => {
            doc[key] = toml_edit::value(value);
        }
        "min_popularity" => {
            let parsed: u8 = value
                .parse()
                .ok()
                .filter(|v| *v <= MAX_POPULARITY)
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "min_popularity must be between 0 and {}, got {}",
                        MAX_POPULARITY,
                        value
                    )
                })?;
            doc[key] = toml_edit::value(i64::from(parsed));
        }
        "max_recommendations" => {
            let parsed: usize = value
                .parse()
                .with_context(|| format!("max_recommendations must be a number, got {}", value))?;
            validate_max_recommendations(parsed)?;
            let parsed = i64::try_from(parsed).context("max_recommendations is too large")?;
            doc[key] = toml_edit::value(parsed);
        }
        _ => return Err(unknown_key(key)),
    }

    std::fs::write(config_path, doc.to_string()).context("Failed to write config file")?;
    Ok(())
}
