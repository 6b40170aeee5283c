// src/config.rs
use std::env;
use std::net::SocketAddr;

use crate::domain::monitor::ThresholdPolicy;

/// Runtime configuration, read once at startup from the environment.
/// Every value has a default so a bare `cargo run` works.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub db_path: String,
    pub schema_path: String,
    pub thresholds: ThresholdPolicy,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr = env::var("PLANTOPS_ADDR")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| "127.0.0.1:3000".parse().expect("default addr is valid"));

        let db_path = env::var("PLANTOPS_DB").unwrap_or_else(|_| "plantops.sqlite3".into());
        let schema_path =
            env::var("PLANTOPS_SCHEMA").unwrap_or_else(|_| "sql/schema.sql".into());

        let defaults = ThresholdPolicy::default();
        let thresholds = ThresholdPolicy {
            warning_percent: env_f64("SERVICE_WARNING_PERCENT", defaults.warning_percent),
            overdue_percent: env_f64("SERVICE_OVERDUE_PERCENT", defaults.overdue_percent),
            realert_drift: env_f64("SERVICE_REALERT_DRIFT", defaults.realert_drift),
        };

        AppConfig {
            bind_addr,
            db_path,
            schema_path,
            thresholds,
        }
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    match env::var(key) {
        Ok(value) => match value.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                log::warn!("ignoring non-numeric {key}={value}, using {default}");
                default
            }
        },
        Err(_) => default,
    }
}
