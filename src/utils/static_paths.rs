use std::path::PathBuf;

/// Location of the optional config file, `<config dir>/ghlens/config.toml`.
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(env!("CARGO_PKG_NAME")).join("config.toml"))
}
