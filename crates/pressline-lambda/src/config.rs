use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use pressline_export::stream::MIN_CHUNK_SIZE;

pub const DEFAULT_ROUTE: &str = "/api/generate-pdf";
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            other => Err(eyre::eyre!("unknown log format: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Path the render endpoint is mounted on.
    pub route: String,
    /// Listen address when not running inside Lambda.
    pub bind_addr: SocketAddr,
    /// Size of the chunks the renderer streams back.
    pub chunk_size: usize,
    pub log_format: LogFormat,
    /// Running under the Lambda runtime API.
    pub lambda: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            route: DEFAULT_ROUTE.to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            chunk_size: DEFAULT_CHUNK_SIZE,
            log_format: LogFormat::Pretty,
            lambda: false,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let lambda = lookup("AWS_LAMBDA_RUNTIME_API").is_some();

        let route = lookup("PRESSLINE_ROUTE").unwrap_or_else(|| DEFAULT_ROUTE.to_string());
        if !route.starts_with('/') || route == "/health" {
            return Err(eyre::eyre!(
                "PRESSLINE_ROUTE must start with '/' and not be /health, got {route}"
            ));
        }

        let bind_addr = lookup("PRESSLINE_BIND")
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| eyre::eyre!("invalid PRESSLINE_BIND: {e}"))?;

        let chunk_size = match lookup("PRESSLINE_CHUNK_SIZE") {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|e| eyre::eyre!("invalid PRESSLINE_CHUNK_SIZE: {e}"))?,
            None => DEFAULT_CHUNK_SIZE,
        };
        if chunk_size < MIN_CHUNK_SIZE {
            return Err(eyre::eyre!(
                "PRESSLINE_CHUNK_SIZE must be at least {MIN_CHUNK_SIZE}, got {chunk_size}"
            ));
        }

        let log_format = match lookup("PRESSLINE_LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            // Structured JSON logging for CloudWatch
            None if lambda => LogFormat::Json,
            None => LogFormat::Pretty,
        };

        Ok(Self {
            route,
            bind_addr,
            chunk_size,
            log_format,
            lambda,
        })
    }
}
