#![cfg(feature = "server")]
use anyhow::{anyhow, bail, Context, Result};
use std::time::Duration;

use crate::fleet::refresher::{normalize_route, RefreshPolicy};

pub const DEFAULT_ODOO_MODEL: &str = "fleet.smart.vehicle";
pub const DEFAULT_DEMO_LATENCY_MS: u64 = 800;
pub const DEFAULT_CONTACT_LATENCY_MS: u64 = 2_000;

#[derive(Debug, Clone, PartialEq)]
pub enum SourceConfig {
    Demo {
        latency: Duration,
        drift: bool,
    },
    Odoo {
        url: String,
        model: String,
        session_id: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FleetConfig {
    pub source: SourceConfig,
    pub refresh: RefreshPolicy,
    pub contact_latency: Duration,
}

impl FleetConfig {
    /// Reads the process environment; call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let odoo_url = var("ODOO_URL");
        // sample data only when asked for by name
        let kind = match (var("FLEET_SOURCE"), &odoo_url) {
            (Some(kind), _) => kind.to_ascii_lowercase(),
            (None, Some(_)) => "odoo".to_string(),
            (None, None) => {
                bail!("set ODOO_URL for a live backend, or FLEET_SOURCE=demo for sample data")
            }
        };

        let source = match kind.as_str() {
            "demo" => SourceConfig::Demo {
                latency: Duration::from_millis(parse_u64(
                    &var,
                    "FLEET_DEMO_LATENCY_MS",
                    DEFAULT_DEMO_LATENCY_MS,
                )?),
                drift: parse_flag(&var, "FLEET_DEMO_DRIFT")?,
            },
            "odoo" => {
                let url = odoo_url.ok_or_else(|| anyhow!("FLEET_SOURCE=odoo requires ODOO_URL"))?;
                SourceConfig::Odoo {
                    url: url.trim_end_matches('/').to_string(),
                    model: var("ODOO_MODEL").unwrap_or_else(|| DEFAULT_ODOO_MODEL.to_string()),
                    session_id: var("ODOO_SESSION_ID"),
                }
            }
            other => bail!("unknown FLEET_SOURCE {other:?} (expected demo or odoo)"),
        };

        let defaults = RefreshPolicy::default();
        let interval = parse_u64(&var, "FLEET_REFRESH_SECS", defaults.interval.as_secs())?;
        if interval == 0 {
            bail!("FLEET_REFRESH_SECS must be at least 1");
        }
        let fetch_timeout = parse_u64(
            &var,
            "FLEET_FETCH_TIMEOUT_SECS",
            defaults.fetch_timeout.as_secs(),
        )?;
        if fetch_timeout == 0 {
            bail!("FLEET_FETCH_TIMEOUT_SECS must be at least 1");
        }
        let lease_ttl = parse_u64(&var, "FLEET_LEASE_TTL_SECS", defaults.lease_ttl.as_secs())?;
        if lease_ttl == 0 {
            bail!("FLEET_LEASE_TTL_SECS must be at least 1");
        }
        let routes = match var("FLEET_REFRESH_ROUTES") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(normalize_route)
                .collect(),
            None => defaults.routes,
        };

        Ok(Self {
            source,
            refresh: RefreshPolicy {
                interval: Duration::from_secs(interval),
                fetch_timeout: Duration::from_secs(fetch_timeout),
                lease_ttl: Duration::from_secs(lease_ttl),
                routes,
            },
            contact_latency: Duration::from_millis(parse_u64(
                &var,
                "CONTACT_LATENCY_MS",
                DEFAULT_CONTACT_LATENCY_MS,
            )?),
        })
    }
}

fn parse_u64(var: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<u64> {
    match var(key) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{key} must be a non-negative integer, got {raw:?}")),
        None => Ok(default),
    }
}

fn parse_flag(var: &impl Fn(&str) -> Option<String>, key: &str) -> Result<bool> {
    match var(key).map(|v| v.to_ascii_lowercase()) {
        None => Ok(false),
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => Ok(false),
        Some(v) => bail!("{key} must be a boolean, got {v:?}"),
    }
}
