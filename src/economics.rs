#![allow(dead_code)]
//! C7: 20-year economic projection under capacity decay and cost inflation
//! (spec §4.7).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::types::{round_half_up, Yuan, YuanPerKwh};
use crate::sizing::ChargeMode;

pub const PROJECTION_YEARS: u32 = 20;

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct YearlyEconomic {
    pub year: u32,
    pub arbitrage_revenue: Yuan,
    pub peak_shaving_revenue: Yuan,
    pub operating_cost: Yuan,
    pub net_profit: Yuan,
    pub cumulative_profit: Yuan,
}

#[derive(Debug, Clone, Copy)]
pub struct EconomicsInputs {
    pub capacity_kwh: Decimal,
    pub annual_decay_percent: Decimal,
    pub mode: ChargeMode,
    pub price_spread: YuanPerKwh,
    pub enable_peak_shaving: bool,
    pub peak_shaving_subsidy: YuanPerKwh,
    pub ess_unit_cost_yuan_per_kwh: Decimal,
    pub om_ratio: Decimal,
    pub om_inflation_per_year: Decimal,
}

/// C7: produce the 20-year projection. `decayFactor^(y-1)` is computed by
/// repeated multiplication (spec §9: "Exponentiation for decay uses repeated
/// multiplication at >=10 significant digits"), never `powi`/`powf`.
pub fn project_economics(inputs: &EconomicsInputs) -> Vec<YearlyEconomic> {
    let decay_factor = Decimal::ONE - inputs.annual_decay_percent / dec!(100);
    let daily_cycles = inputs.mode.daily_cycles();
    let initial_investment = inputs.capacity_kwh * inputs.ess_unit_cost_yuan_per_kwh;

    let mut years = Vec::with_capacity(PROJECTION_YEARS as usize);
    let mut cumulative_profit = Yuan::zero();
    let mut effective_capacity = inputs.capacity_kwh;

    for year in 1..=PROJECTION_YEARS {
        if year > 1 {
            effective_capacity *= decay_factor;
        }

        let arbitrage_revenue = Yuan::new(round_half_up(
            effective_capacity * inputs.price_spread.value() * daily_cycles * dec!(365),
            2,
        ));

        let peak_shaving_revenue = if inputs.enable_peak_shaving {
            Yuan::new(round_half_up(
                effective_capacity * inputs.peak_shaving_subsidy.value() * dec!(365),
                2,
            ))
        } else {
            Yuan::zero()
        };

        let inflation = Decimal::ONE + inputs.om_inflation_per_year * Decimal::from(year - 1);
        let operating_cost = Yuan::new(round_half_up(
            initial_investment * inputs.om_ratio * inflation,
            2,
        ));

        let net_profit = arbitrage_revenue + peak_shaving_revenue - operating_cost;
        cumulative_profit = cumulative_profit + net_profit;

        years.push(YearlyEconomic {
            year,
            arbitrage_revenue,
            peak_shaving_revenue,
            operating_cost,
            net_profit,
            cumulative_profit,
        });
    }

    years
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_seed_year_one_projection() {
        let inputs = EconomicsInputs {
            capacity_kwh: dec!(430),
            annual_decay_percent: dec!(2),
            mode: ChargeMode::One,
            price_spread: YuanPerKwh::new(dec!(0.9)),
            enable_peak_shaving: false,
            peak_shaving_subsidy: YuanPerKwh::zero(),
            ess_unit_cost_yuan_per_kwh: dec!(1500),
            om_ratio: dec!(0.02),
            om_inflation_per_year: dec!(0.02),
        };
        let years = project_economics(&inputs);
        let y1 = years[0];
        assert_eq!(y1.arbitrage_revenue.value(), dec!(141255.00));
        assert_eq!(y1.operating_cost.value(), dec!(12900.00));
        assert_eq!(y1.net_profit.value(), dec!(128355.00));
        assert_eq!(y1.cumulative_profit.value(), y1.net_profit.value());
    }

    #[test]
    fn cumulative_profit_telescopes_exactly() {
        let inputs = EconomicsInputs {
            capacity_kwh: dec!(430),
            annual_decay_percent: dec!(2),
            mode: ChargeMode::Two,
            price_spread: YuanPerKwh::new(dec!(0.9)),
            enable_peak_shaving: true,
            peak_shaving_subsidy: YuanPerKwh::new(dec!(0.1)),
            ess_unit_cost_yuan_per_kwh: dec!(1500),
            om_ratio: dec!(0.02),
            om_inflation_per_year: dec!(0.02),
        };
        let years = project_economics(&inputs);
        assert_eq!(years.len(), PROJECTION_YEARS as usize);
        for y in 1..years.len() {
            let expected = years[y - 1].cumulative_profit + years[y].net_profit;
            assert_eq!(years[y].cumulative_profit.value(), expected.value());
        }
    }

    proptest::proptest! {
        /// Cumulative profit always telescopes: year N's cumulative equals
        /// year N-1's cumulative plus year N's net profit, for any inputs
        /// (spec.md §8).
        #[test]
        fn cumulative_profit_telescopes_for_arbitrary_inputs(
            capacity in 1i64..2000,
            decay_percent in 0i64..10,
            spread in 1i64..500,
        ) {
            let inputs = EconomicsInputs {
                capacity_kwh: Decimal::from(capacity),
                annual_decay_percent: Decimal::from(decay_percent),
                mode: ChargeMode::One,
                price_spread: YuanPerKwh::new(Decimal::new(spread, 2)),
                enable_peak_shaving: false,
                peak_shaving_subsidy: YuanPerKwh::zero(),
                ess_unit_cost_yuan_per_kwh: dec!(1500),
                om_ratio: dec!(0.02),
                om_inflation_per_year: dec!(0.02),
            };
            let years = project_economics(&inputs);
            for y in 1..years.len() {
                let expected = years[y - 1].cumulative_profit + years[y].net_profit;
                proptest::prop_assert_eq!(years[y].cumulative_profit.value(), expected.value());
            }
        }
    }

    #[test]
    fn capacity_decays_year_over_year() {
        let inputs = EconomicsInputs {
            capacity_kwh: dec!(430),
            annual_decay_percent: dec!(2),
            mode: ChargeMode::One,
            price_spread: YuanPerKwh::new(dec!(0.9)),
            enable_peak_shaving: false,
            peak_shaving_subsidy: YuanPerKwh::zero(),
            ess_unit_cost_yuan_per_kwh: dec!(1500),
            om_ratio: dec!(0.02),
            om_inflation_per_year: dec!(0.02),
        };
        let years = project_economics(&inputs);
        // year 2 arbitrage should be strictly less than year 1's (decay).
        assert!(years[1].arbitrage_revenue.value() < years[0].arbitrage_revenue.value());
    }
}
