//! Startup configuration read from the environment.

use std::net::SocketAddr;

use smartgrocer_observability::LogFormat;

pub const BIND_ADDR_VAR: &str = "SMARTGROCER_BIND_ADDR";
pub const SEED_VAR: &str = "SMARTGROCER_SEED";
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Process configuration.
///
/// Values that fail to parse fall back to their defaults; the reasons are kept
/// in `warnings` so they can be logged once logging is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Load the sample catalog on startup.
    pub seed: bool,
    pub log_format: LogFormat,
    pub warnings: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            seed: true,
            log_format: LogFormat::default(),
            warnings: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(raw) = lookup(BIND_ADDR_VAR) {
            match raw.trim().parse() {
                Ok(addr) => cfg.bind_addr = addr,
                Err(e) => cfg.warnings.push(format!(
                    "{BIND_ADDR_VAR}='{raw}' is not a socket address ({e}); using {DEFAULT_BIND_ADDR}"
                )),
            }
        }

        if let Some(raw) = lookup(SEED_VAR) {
            match parse_flag(&raw) {
                Some(flag) => cfg.seed = flag,
                None => cfg.warnings.push(format!(
                    "{SEED_VAR}='{raw}' is not a boolean; seeding the sample catalog"
                )),
            }
        }

        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            match raw.parse() {
                Ok(format) => cfg.log_format = format,
                Err(e) => cfg.warnings.push(format!("{e}; using json")),
            }
        }

        cfg
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
