//! CLI override definitions and application logic.

use clap::Parser;

use crate::Config;

#[derive(Debug, Clone, Parser, Default)]
pub struct CliOverrides {
    /// Override listen address, e.g. 127.0.0.1:28262
    #[arg(long)]
    pub listen: Option<String>,
    /// Override the authorization endpoint path
    #[arg(long)]
    pub auth_path: Option<String>,
    /// Override database connection URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
    /// Override mismatch delay (seconds)
    #[arg(long)]
    pub mismatch_delay_secs: Option<u64>,
    /// Override account lookup timeout (seconds)
    #[arg(long)]
    pub lookup_timeout_secs: Option<u64>,
    /// Override metrics listen address
    #[arg(long)]
    pub metrics_listen: Option<String>,
    /// Override log level (trace/debug/info/warn/error)
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) {
    if let Some(v) = &overrides.listen {
        config.server.listen = v.clone();
    }
    if let Some(v) = &overrides.auth_path {
        config.server.auth_path = v.clone();
    }
    if let Some(v) = &overrides.database_url {
        config.auth.database_url = Some(v.clone());
    }
    if let Some(v) = overrides.mismatch_delay_secs {
        config.auth.mismatch_delay_secs = v;
    }
    if let Some(v) = overrides.lookup_timeout_secs {
        config.auth.lookup_timeout_secs = v;
    }
    if let Some(v) = &overrides.metrics_listen {
        config.metrics.listen = Some(v.clone());
    }
    if let Some(v) = &overrides.log_level {
        config.logging.level = Some(v.clone());
    }
}
