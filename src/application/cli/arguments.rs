use clap::Parser;
use std::path::PathBuf;

use crate::models::common::StatusPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StatusPolicyArg {
    /// Report every upstream-side failure as 404
    Collapsed,
    /// Report rate limiting as 429 and other upstream failures as 502
    Distinct,
}

impl From<StatusPolicyArg> for StatusPolicy {
    fn from(arg: StatusPolicyArg) -> Self {
        match arg {
            StatusPolicyArg::Collapsed => StatusPolicy::Collapsed,
            StatusPolicyArg::Distinct => StatusPolicy::Distinct,
        }
    }
}

/// Look up GitHub accounts, repositories and recent commits without handing
/// a token to the client.
#[derive(Debug, Parser)]
#[command(name = "ghlens")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to the user config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// How upstream failures map onto HTTP status codes
    #[arg(long, value_enum)]
    pub status_policy: Option<StatusPolicyArg>,
}

#[cfg(test)]
#[path = "../../../tests/application/cli/arguments.rs"]
mod tests;
