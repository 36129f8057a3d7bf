#![allow(dead_code)]
//! Standard transformer and ESS module tables, per country (spec §3).
//!
//! Process-wide immutable configuration: loaded once (by `StationEngineConfig::load`, see
//! `crate::config`) and passed by reference into the sizing step. Never
//! global mutable state, per spec §9.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::fleet::CountryCode;
use crate::domain::types::{Kw, Kwh};

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EssModule {
    pub power_kw: Kw,
    pub capacity_kwh: Kwh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryTables {
    /// Ascending kVA.
    pub transformer_sizes_kva: Vec<Decimal>,
    pub ess_modules: Vec<EssModule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardTables {
    pub countries: HashMap<CountryCode, CountryTables>,
}

fn default_ess_modules() -> Vec<EssModule> {
    vec![
        EssModule {
            power_kw: Kw::new(dec!(100)),
            capacity_kwh: Kwh::new(dec!(215)),
        },
        EssModule {
            power_kw: Kw::new(dec!(125)),
            capacity_kwh: Kwh::new(dec!(261)),
        },
    ]
}

impl Default for StandardTables {
    fn default() -> Self {
        let mut countries = HashMap::new();
        countries.insert(
            CountryCode::Cn,
            CountryTables {
                transformer_sizes_kva: vec![
                    dec!(30),
                    dec!(50),
                    dec!(80),
                    dec!(100),
                    dec!(125),
                    dec!(160),
                    dec!(200),
                    dec!(250),
                    dec!(315),
                    dec!(400),
                    dec!(500),
                    dec!(630),
                    dec!(800),
                    dec!(1000),
                    dec!(1250),
                    dec!(1600),
                    dec!(2000),
                    dec!(2500),
                    dec!(3150),
                ],
                ess_modules: default_ess_modules(),
            },
        );
        countries.insert(
            CountryCode::Jp,
            CountryTables {
                transformer_sizes_kva: vec![
                    dec!(20),
                    dec!(50),
                    dec!(75),
                    dec!(100),
                    dec!(150),
                    dec!(200),
                    dec!(300),
                    dec!(500),
                    dec!(750),
                    dec!(1000),
                    dec!(1500),
                    dec!(2000),
                ],
                ess_modules: default_ess_modules(),
            },
        );
        countries.insert(
            CountryCode::Uk,
            CountryTables {
                transformer_sizes_kva: vec![
                    dec!(25),
                    dec!(50),
                    dec!(100),
                    dec!(200),
                    dec!(315),
                    dec!(500),
                    dec!(750),
                    dec!(1000),
                    dec!(1500),
                    dec!(2000),
                ],
                ess_modules: default_ess_modules(),
            },
        );
        Self { countries }
    }
}

impl StandardTables {
    pub fn for_country(&self, country: CountryCode) -> &CountryTables {
        self.countries
            .get(&country)
            .expect("StandardTables must carry an entry for every CountryCode variant")
    }
}

impl std::hash::Hash for CountryCode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (*self as u8).hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_cover_all_countries() {
        let tables = StandardTables::default();
        assert!(tables.countries.contains_key(&CountryCode::Cn));
        assert!(tables.countries.contains_key(&CountryCode::Jp));
        assert!(tables.countries.contains_key(&CountryCode::Uk));
    }

    #[test]
    fn cn_transformer_list_is_ascending() {
        let tables = StandardTables::default();
        let cn = tables.for_country(CountryCode::Cn);
        let mut sorted = cn.transformer_sizes_kva.clone();
        sorted.sort();
        assert_eq!(cn.transformer_sizes_kva, sorted);
        assert_eq!(cn.transformer_sizes_kva.last(), Some(&dec!(3150)));
    }
}
