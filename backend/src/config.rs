use std::net::SocketAddr;

use anyhow::{bail, Context, Result};
use axum::http::HeaderValue;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::storage::connection::DEFAULT_DATABASE_URL;

const DEFAULT_BIND: &str = "127.0.0.1:3000";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_address: SocketAddr,
    pub cors_origins: Vec<HeaderValue>,
    /// Used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl ServerConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            database_url,
            bind,
            cors_origins,
            log_filter,
        } = args;

        let bind_address = match bind {
            Some(addr) => addr,
            None => DEFAULT_BIND.parse().context("default bind address")?,
        };

        let cors_origins = cors_origins
            .unwrap_or_else(|| vec![DEFAULT_CORS_ORIGIN.to_string()])
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).with_context(|| format!("invalid CORS origin '{}'", origin))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            database_url: database_url.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            bind_address,
            cors_origins,
            log_filter: log_filter.unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }

    /// Checks that cannot be expressed as clap value parsers
    pub fn validate(&self) -> Result<()> {
        if self.database_url.trim().is_empty() {
            bail!("database URL must not be empty");
        }
        if !self.database_url.starts_with("sqlite:") {
            bail!("database URL '{}' must start with 'sqlite:'", self.database_url);
        }
        EnvFilter::try_new(&self.log_filter)
            .with_context(|| format!("invalid log filter '{}'", self.log_filter))?;
        Ok(())
    }
}

#[derive(Parser, Debug, Default, Clone)]
#[command(name = "vet-clinic-backend", about = "Veterinary clinic admin API", version)]
pub struct CliArgs {
    #[arg(
        long,
        env = "CLINIC_DATABASE_URL",
        value_name = "URL",
        help = "SQLite database URL, created if missing"
    )]
    pub database_url: Option<String>,

    #[arg(
        long,
        env = "CLINIC_BIND",
        value_name = "ADDR",
        help = "Address the HTTP server listens on"
    )]
    pub bind: Option<SocketAddr>,

    #[arg(
        long = "cors-origin",
        env = "CLINIC_CORS_ORIGINS",
        value_name = "ORIGIN",
        value_delimiter = ',',
        help = "Browser origin allowed to call the API; repeat or comma-separate for several"
    )]
    pub cors_origins: Option<Vec<String>>,

    #[arg(
        long,
        env = "CLINIC_LOG",
        value_name = "FILTER",
        help = "Log filter used when RUST_LOG is not set"
    )]
    pub log_filter: Option<String>,
}
