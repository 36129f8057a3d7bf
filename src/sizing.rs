#![allow(dead_code)]
//! C6: transformer auto-selection and ESS sizing against standard module
//! tables (spec §4.6).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::sizing_tables::{CountryTables, EssModule};
use crate::domain::types::{round_half_up, Kw, Kwh};
use crate::errors::Warning;

/// ESS duty cycle: "one charge, one discharge" per day (2h duration) or
/// "two" (4h duration), per spec §4.6/§4.7.
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeMode {
    One,
    Two,
}

impl ChargeMode {
    pub fn duration_hours(&self) -> Decimal {
        match self {
            ChargeMode::One => dec!(2),
            ChargeMode::Two => dec!(4),
        }
    }

    pub fn daily_cycles(&self) -> Decimal {
        match self {
            ChargeMode::One => dec!(1),
            ChargeMode::Two => dec!(2),
        }
    }
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EssSizing {
    pub rated_power_kw: Kw,
    pub capacity_kwh: Kwh,
    pub model_power_kw: Kw,
    pub model_capacity_kwh: Kwh,
    pub units: u32,
    pub calculated_power_kw: Kw,
    pub calculated_capacity_kwh: Kwh,
}

/// Transformer auto-selection: respect a user-supplied kVA if present;
/// otherwise the smallest standard size `>= peakLoadKw`, falling back to the
/// largest standard size if the peak exceeds every entry in the table.
pub fn select_transformer(peak_load_kw: Kw, user_kva: Option<Kw>, table: &CountryTables) -> Kw {
    if let Some(kva) = user_kva {
        return kva;
    }
    let peak = peak_load_kw.value();
    table
        .transformer_sizes_kva
        .iter()
        .find(|&&size| size >= peak)
        .copied()
        .or_else(|| table.transformer_sizes_kva.last().copied())
        .map(Kw::new)
        .unwrap_or(peak_load_kw)
}

fn units_for_model(req_power_kw: Decimal, req_capacity_kwh: Decimal, model: &EssModule) -> u32 {
    let power_units = if model.power_kw.is_zero() {
        Decimal::ZERO
    } else {
        (req_power_kw / model.power_kw.value()).ceil()
    };
    let capacity_units = if model.capacity_kwh.is_zero() {
        Decimal::ZERO
    } else {
        (req_capacity_kwh / model.capacity_kwh.value()).ceil()
    };
    power_units
        .max(capacity_units)
        .max(Decimal::ONE)
        .to_u64()
        .unwrap_or(1) as u32
}

/// C6 ESS sizing: derive the raw power/capacity requirement from the site
/// peak load and PV offset, then round up to the standard module that needs
/// the fewest units (ties broken by smallest resulting total capacity).
pub fn size_ess(
    peak_load_kw: Kw,
    pv_peak_power_kw: Kw,
    empirical_coefficient: Decimal,
    mode: ChargeMode,
    table: &CountryTables,
) -> EssSizing {
    let ess_max_power_kw = Kw::new(round_half_up(peak_load_kw.value() * empirical_coefficient, 2));
    let rated_power_kw = Kw::new((ess_max_power_kw.value() - pv_peak_power_kw.value()).max(Decimal::ZERO));
    let calculated_capacity_kwh = Kwh::new(rated_power_kw.value() * mode.duration_hours());

    let best = table
        .ess_modules
        .iter()
        .map(|model| {
            let units = units_for_model(rated_power_kw.value(), calculated_capacity_kwh.value(), model);
            let total_capacity = model.capacity_kwh.value() * Decimal::from(units);
            (units, total_capacity, *model)
        })
        .min_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)))
        .expect("ESS module table must not be empty");

    let (units, _, model) = best;

    EssSizing {
        rated_power_kw: Kw::new(model.power_kw.value() * Decimal::from(units)),
        capacity_kwh: Kwh::new(model.capacity_kwh.value() * Decimal::from(units)),
        model_power_kw: model.power_kw,
        model_capacity_kwh: model.capacity_kwh,
        units,
        calculated_power_kw: rated_power_kw,
        calculated_capacity_kwh,
    }
}

/// Non-fatal overflow check (spec §4.6 "Transformer validation").
pub fn check_transformer_overflow(ess_rated_power_kw: Kw, transformer_kva: Kw) -> Option<Warning> {
    if ess_rated_power_kw.value() > transformer_kva.value() {
        Some(Warning::transformer_overflow(
            ess_rated_power_kw.value() - transformer_kva.value(),
        ))
    } else {
        None
    }
}
