#![allow(dead_code)]
//! C3: V1G (unidirectional) day scheduler.
//!
//! Dispatches a single day's energy demand across its chargeable slots,
//! cheapest-price-first, filling each slot up to the pile pool's per-slot
//! energy cap until the demand is exhausted.

use rust_decimal_macros::dec;

use crate::domain::curve::SlotCurve;
use crate::domain::time_grid::SLOTS_PER_DAY;
use crate::domain::types::{Kw, Kwh, YuanPerKwh};

/// Hours per slot as a `Decimal`, derived from the configured slot length.
pub fn slot_hours() -> rust_decimal::Decimal {
    rust_decimal::Decimal::from(crate::domain::time_grid::SLOT_MINUTES) / dec!(60)
}

/// C3 day scheduler. `chargeable` need not be sorted or deduplicated by the
/// caller; it is sorted here to guarantee the ascending-price,
/// ascending-index tie-break spec.md §4.3 calls for.
///
/// Returns the populated curve (charge fields only — discharge fields stay
/// zero) together with the energy actually dispatched, which may be less
/// than `demand` if the chargeable pool is too small to absorb it (spec's
/// `min(E_day, E_max * |chargeable|)` contract).
pub fn schedule_v1g_day(
    chargeable: &[usize],
    prices: &[YuanPerKwh; SLOTS_PER_DAY],
    demand: Kwh,
    pile_power: Kw,
) -> (SlotCurve, Kwh) {
    let mut curve = SlotCurve::zeroed();
    if chargeable.is_empty() || pile_power.is_zero() {
        return (curve, Kwh::zero());
    }

    let e_max = pile_power * slot_hours();

    let mut by_price: Vec<(usize, YuanPerKwh)> =
        chargeable.iter().map(|&i| (i, prices[i])).collect();
    // Stable sort keeps ascending-slot-index order among equal prices.
    by_price.sort_by(|a, b| a.1.value().cmp(&b.1.value()));

    let mut remaining = demand;
    let mut dispatched = Kwh::zero();

    for (slot, _) in by_price {
        if remaining.is_zero() || remaining.value() <= rust_decimal::Decimal::ZERO {
            break;
        }
        let e = remaining.min(e_max);
        curve.points[slot].charge_power_kw = pile_power;
        curve.points[slot].charge_energy_kwh = e;
        remaining = remaining - e;
        dispatched = dispatched + e;
    }

    (curve, dispatched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::time_grid::SLOTS_PER_DAY;
    use rust_decimal_macros::dec;

    fn flat_prices(price: rust_decimal::Decimal) -> [YuanPerKwh; SLOTS_PER_DAY] {
        [YuanPerKwh::new(price); SLOTS_PER_DAY]
    }

    #[test]
    fn scenario_seed_v1g_trivial() {
        // 1 vehicle, 100 kWh battery, minSoc 80% => demand 80 kWh, one 7 kW
        // slow pile, all 96 slots chargeable, flat price.
        let chargeable: Vec<usize> = (0..SLOTS_PER_DAY).collect();
        let prices = flat_prices(dec!(0.5));
        let pile_power = Kw::new(dec!(7));
        let demand = Kwh::new(dec!(80));

        let (curve, dispatched) = schedule_v1g_day(&chargeable, &prices, demand, pile_power);

        assert_eq!(dispatched.value(), dec!(80));
        assert_eq!(curve.peak_charge_power().value(), dec!(7));
        assert_eq!(curve.total_charge_energy().value(), dec!(80));

        // 45 full slots at 1.75 kWh + a 46th partial slot at 1.25 kWh.
        let filled: Vec<&crate::domain::curve::SlotPoint> = curve
            .points
            .iter()
            .filter(|p| !p.charge_energy_kwh.is_zero())
            .collect();
        assert_eq!(filled.len(), 46);
        assert_eq!(filled[44].charge_energy_kwh.value(), dec!(1.75));
        assert_eq!(filled[45].charge_energy_kwh.value(), dec!(1.25));
        assert_eq!(filled[45].charge_power_kw.value(), dec!(7));
    }

    #[test]
    fn cheapest_slots_fill_first_with_index_tiebreak() {
        let chargeable = vec![0, 1, 2, 3];
        let mut prices = flat_prices(dec!(1.0));
        prices[2] = YuanPerKwh::new(dec!(0.1));
        prices[0] = YuanPerKwh::new(dec!(0.1));
        let pile_power = Kw::new(dec!(4));
        // e_max = 4 * 0.25 = 1 kWh/slot; demand of 1.5 kWh needs two slots.
        let demand = Kwh::new(dec!(1.5));

        let (curve, dispatched) = schedule_v1g_day(&chargeable, &prices, demand, pile_power);
        assert_eq!(dispatched.value(), dec!(1.5));
        // slot 0 and slot 2 tie at 0.1; ascending index picks slot 0 first.
        assert_eq!(curve.points[0].charge_energy_kwh.value(), dec!(1.0));
        assert_eq!(curve.points[2].charge_energy_kwh.value(), dec!(0.5));
        assert!(curve.points[1].charge_energy_kwh.is_zero());
        assert!(curve.points[3].charge_energy_kwh.is_zero());
    }

    #[test]
    fn demand_capped_by_chargeable_pool_size() {
        let chargeable = vec![0, 1];
        let prices = flat_prices(dec!(0.3));
        let pile_power = Kw::new(dec!(7));
        let demand = Kwh::new(dec!(100));

        let (_, dispatched) = schedule_v1g_day(&chargeable, &prices, demand, pile_power);
        // e_max = 1.75 kWh per slot * 2 slots = 3.5 kWh ceiling.
        assert_eq!(dispatched.value(), dec!(3.5));
    }

    #[test]
    fn empty_chargeable_set_yields_zero_curve() {
        let prices = flat_prices(dec!(0.3));
        let (curve, dispatched) =
            schedule_v1g_day(&[], &prices, Kwh::new(dec!(50)), Kw::new(dec!(7)));
        assert!(dispatched.is_zero());
        assert!(curve.total_charge_energy().is_zero());
    }
}
