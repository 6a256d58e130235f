use anyhow::{Context, Result, bail};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::config::AppConfig;
use crate::services::lookup::lookup_service::MAX_RECENT_COMMITS;

const REDACTED: &str = "********";

/// Builds the effective [`AppConfig`] from defaults, an optional TOML file
/// and environment variables, in increasing order of precedence.
pub struct ConfigStorage {
    config: AppConfig,
    config_file: Option<PathBuf>,
}

impl ConfigStorage {
    /// Loads `config_file` on top of the defaults.
    ///
    /// A missing file is only an error when `required` is set; a file that
    /// exists but cannot be read or parsed always is.
    pub fn new(config_file: &Path, required: bool) -> Result<Self> {
        let mut storage = Self {
            config: AppConfig::default(),
            config_file: None,
        };

        if !config_file.exists() {
            if required {
                bail!("Config file not found: {}", config_file.display());
            }
            return Ok(storage);
        }

        storage.load_config(config_file)?;
        Ok(storage)
    }

    pub fn from_config(config: AppConfig) -> Self {
        Self {
            config,
            config_file: None,
        }
    }

    fn load_config(&mut self, config_file: &Path) -> Result<()> {
        let toml_str = fs::read_to_string(config_file)
            .with_context(|| format!("Failed to load config from {}", config_file.display()))?;

        self.config = toml::from_str(&toml_str)
            .with_context(|| format!("Failed to parse config at {}", config_file.display()))?;
        self.config_file = Some(config_file.to_path_buf());
        Ok(())
    }

    /// Overrides values from environment variables, looked up through `var`.
    pub fn apply_env<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = var("GITHUB_TOKEN") {
            self.config.github.api_token = Some(token);
        }
        if let Some(api_url) = var("GITHUB_API_URL") {
            self.config.github.api_url = api_url;
        }
        if let Some(timeout) = var("GITHUB_TIMEOUT_SECS") {
            self.config.github.timeout_secs = parse_var("GITHUB_TIMEOUT_SECS", &timeout)?;
        }
        if let Some(host) = var("HOST") {
            self.config.server.host = host;
        }
        if let Some(port) = var("PORT") {
            self.config.server.port = parse_var("PORT", &port)?;
        }
        Ok(())
    }

    /// Checks the invariants the server relies on before it starts.
    pub fn validate(&self) -> Result<()> {
        if self.config.token().is_none() {
            bail!("GitHub Token is missing");
        }
        if self.config.github.timeout_secs == 0 {
            bail!("github.timeout_secs must be greater than zero");
        }
        let commit_limit = self.config.github.commit_limit;
        if commit_limit == 0 || commit_limit > MAX_RECENT_COMMITS {
            bail!(
                "github.commit_limit must be between 1 and {}",
                MAX_RECENT_COMMITS
            );
        }
        if self.config.github.api_url.trim().is_empty() {
            bail!("github.api_url cannot be empty");
        }
        Ok(())
    }

    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    pub fn get_mut_config(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// Gets all configuration keys and values as flattened dot-notation paths,
    /// with the API token masked.
    pub fn get_flattened_config(&self) -> HashMap<String, String> {
        let root =
            toml::Value::try_from(&self.config).unwrap_or(toml::Value::Table(Default::default()));
        let mut flat = self.flatten_value(&root, "", 10, 0);
        if let Some(token) = flat.get_mut("github.api_token") {
            *token = REDACTED.to_string();
        }
        flat
    }

    fn flatten_value(
        &self,
        value: &toml::Value,
        prefix: &str,
        max_depth: usize,
        current_depth: usize,
    ) -> HashMap<String, String> {
        let mut result = HashMap::new();

        if current_depth >= max_depth {
            return result;
        }

        match value {
            toml::Value::String(s) => {
                result.insert(prefix.to_string(), s.clone());
            }
            toml::Value::Integer(i) => {
                result.insert(prefix.to_string(), i.to_string());
            }
            toml::Value::Boolean(b) => {
                result.insert(prefix.to_string(), b.to_string());
            }
            toml::Value::Table(table) => {
                for (key, val) in table {
                    let new_prefix = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", prefix, key)
                    };
                    result.extend(self.flatten_value(
                        val,
                        &new_prefix,
                        max_depth,
                        current_depth + 1,
                    ));
                }
            }
            _ => {}
        }

        result
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid value for environment variable {}: {:?}", name, raw))
}

#[cfg(test)]
#[path = "../../../tests/services/storage/config_storage.rs"]
mod tests;
