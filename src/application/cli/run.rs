use anyhow::{Context, Result};
use tracing::debug;

use crate::application::cli::arguments::Cli;
use crate::application::server;
use crate::models::config::AppConfig;
use crate::services::storage::ConfigStorage;
use crate::utils::static_paths;

impl Cli {
    pub async fn run(self) -> Result<()> {
        // A .env file is optional; real environment variables still win.
        dotenvy::dotenv().ok();

        let config = self.resolve_config(|key| std::env::var(key).ok())?;
        server::run(config).await
    }

    /// Merges defaults, config file, environment (via `var`) and flags, then
    /// validates the result.
    pub fn resolve_config<F>(&self, var: F) -> Result<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut storage = match &self.config {
            Some(path) => ConfigStorage::new(path, true)?,
            None => match static_paths::default_config_file() {
                Some(path) => ConfigStorage::new(&path, false)?,
                None => ConfigStorage::from_config(AppConfig::default()),
            },
        };

        storage.apply_env(var).context("Invalid environment configuration")?;

        let config = storage.get_mut_config();
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(policy) = self.status_policy {
            config.server.status_policy = policy.into();
        }

        storage.validate()?;

        let effective = storage.get_config();
        debug!(
            host = %effective.server.host,
            port = effective.server.port,
            status_policy = ?effective.server.status_policy,
            "Resolved configuration"
        );
        if let Some(path) = storage.config_file() {
            debug!(path = %path.display(), "Loaded config file");
        }
        let mut flattened: Vec<_> = storage.get_flattened_config().into_iter().collect();
        flattened.sort();
        for (key, value) in flattened {
            debug!("{} = {}", key, value);
        }

        Ok(storage.into_config())
    }
}
