#![allow(dead_code)]
//! Process-wide configuration (SPEC_FULL §4.9): figment-loaded from TOML and
//! environment, validated with `validator`, then handed by reference into
//! every orchestrator call. Immutable once loaded — never global mutable
//! state, per spec §9.

use std::collections::HashMap;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::fleet::CountryCode;
use crate::domain::pile::PilePowerConfig;
use crate::domain::sizing_tables::{CountryTables, StandardTables};

/// HTTP server configuration for the thin boundary layer.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ServerConfig {
    #[validate(length(min = 1))]
    pub host: String,

    #[validate(range(min = 1, max = 65535))]
    pub port: u16,

    #[serde(default)]
    pub enable_cors: bool,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .context("failed to parse socket address")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: false,
        }
    }
}

/// Target fraction of vehicles to provision piles for, by class, for
/// `computeV2G`'s pile-configuration suggestion (spec §4.8).
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct PileSuggestionRatios {
    pub fast: Decimal,
    pub slow: Decimal,
    pub ultra: Decimal,
}

impl Default for PileSuggestionRatios {
    fn default() -> Self {
        Self {
            fast: dec!(0.2),
            slow: dec!(0.7),
            ultra: dec!(0.1),
        }
    }
}

/// Every "Configurable constant" spec.md §3 enumerates, plus the per-country
/// standard module tables (§3 "Standard module tables").
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct StationEngineConfig {
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerConfig,

    #[serde(default)]
    pub pile_power: PilePowerConfig,

    #[serde(default = "default_slot_interval_minutes")]
    pub slot_interval_minutes: u32,

    #[serde(default = "default_empirical_coefficient")]
    pub empirical_coefficient: Decimal,

    #[serde(default = "default_v2g_discharge_derate")]
    pub v2g_discharge_derate: Decimal,

    #[serde(default = "default_ess_unit_cost")]
    pub ess_unit_cost_yuan_per_kwh: Decimal,

    #[serde(default = "default_om_ratio")]
    pub om_ratio: Decimal,

    #[serde(default = "default_om_inflation_per_year")]
    pub om_inflation_per_year: Decimal,

    #[serde(default)]
    pub pile_suggestion_ratios: PileSuggestionRatios,

    #[serde(default = "default_countries")]
    pub countries: HashMap<CountryCode, CountryTables>,
}

fn default_slot_interval_minutes() -> u32 {
    15
}
fn default_empirical_coefficient() -> Decimal {
    dec!(0.8)
}
fn default_v2g_discharge_derate() -> Decimal {
    dec!(0.85)
}
fn default_ess_unit_cost() -> Decimal {
    dec!(1500)
}
fn default_om_ratio() -> Decimal {
    dec!(0.02)
}
fn default_om_inflation_per_year() -> Decimal {
    dec!(0.02)
}
fn default_countries() -> HashMap<CountryCode, CountryTables> {
    StandardTables::default().countries
}

impl Default for StationEngineConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            pile_power: PilePowerConfig::default(),
            slot_interval_minutes: default_slot_interval_minutes(),
            empirical_coefficient: default_empirical_coefficient(),
            v2g_discharge_derate: default_v2g_discharge_derate(),
            ess_unit_cost_yuan_per_kwh: default_ess_unit_cost(),
            om_ratio: default_om_ratio(),
            om_inflation_per_year: default_om_inflation_per_year(),
            pile_suggestion_ratios: PileSuggestionRatios::default(),
            countries: default_countries(),
        }
    }
}

impl StationEngineConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// 1. `config/default.toml` (base configuration)
    /// 2. `config/<environment>.toml`, if given
    /// 3. Environment variables with the `STATION__` prefix
    ///    (`STATION__SERVER__PORT` -> `server.port`)
    pub fn load() -> Result<Self> {
        Self::load_with_env(None)
    }

    pub fn load_with_env(environment: Option<&str>) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::file("config/default.toml"));

        if let Some(env) = environment {
            figment = figment.merge(Toml::file(format!("config/{env}.toml")));
        }

        figment = figment.merge(Env::prefixed("STATION__").split("__"));

        let config: StationEngineConfig = figment
            .extract()
            .context("failed to parse configuration")?;

        config
            .validate()
            .context("configuration validation failed")?;

        Ok(config)
    }

    pub fn table_for(&self, country: CountryCode) -> &CountryTables {
        self.countries
            .get(&country)
            .expect("StationEngineConfig must carry an entry for every supported country")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_country() {
        let config = StationEngineConfig::default();
        assert!(config.countries.contains_key(&CountryCode::Cn));
        assert!(config.countries.contains_key(&CountryCode::Jp));
        assert!(config.countries.contains_key(&CountryCode::Uk));
    }

    #[test]
    fn defaults_match_spec_constants() {
        let config = StationEngineConfig::default();
        assert_eq!(config.empirical_coefficient, dec!(0.8));
        assert_eq!(config.v2g_discharge_derate, dec!(0.85));
        assert_eq!(config.slot_interval_minutes, 15);
    }

    #[test]
    fn server_socket_addr_parses() {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            enable_cors: false,
        };
        assert_eq!(server.socket_addr().unwrap().port(), 8080);
    }
}
