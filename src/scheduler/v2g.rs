#![allow(dead_code)]
//! C4: V2G (bidirectional) day scheduler — the hardest subsystem.
//!
//! Tracks SOC across a day's temporally-ordered chargeable ranges in
//! steady state (the vehicle arrives at a range's start holding the SOC it
//! departed the previous range at, wrapping from the prior day's last
//! range), discharging surplus at the most expensive slots of a range and
//! charging deficit at the cheapest, and accumulates the resulting
//! arbitrage revenue.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::curve::SlotCurve;
use crate::domain::fleet::{DaySchedule, TimeRange};
use crate::domain::time_grid::SLOTS_PER_DAY;
use crate::domain::types::{Kw, Kwh, Percent, Yuan, YuanPerKwh};
use crate::scheduler::v1g::slot_hours;

/// Sort a range's slots by price, with ties broken by ascending slot index
/// (stable pre-sort, then a stable sort on price preserves that order for
/// equal prices either ascending or descending).
fn sorted_by_price(
    slots: &[usize],
    prices: &[YuanPerKwh; SLOTS_PER_DAY],
    descending: bool,
) -> Vec<usize> {
    let mut indexed: Vec<usize> = slots.to_vec();
    indexed.sort_unstable();
    if descending {
        indexed.sort_by(|&a, &b| prices[b].value().cmp(&prices[a].value()));
    } else {
        indexed.sort_by(|&a, &b| prices[a].value().cmp(&prices[b].value()));
    }
    indexed
}

fn soc_delta_kwh(from: Percent, to: Percent, battery_kwh: Kwh, vehicles: u32) -> Kwh {
    let diff = (to.value() - from.value()).abs() / dec!(100);
    Kwh::new(battery_kwh.value() * diff * Decimal::from(vehicles))
}

/// Result of scheduling one day's V2G ranges: the populated charge/discharge
/// curve plus the net arbitrage revenue for the day.
pub struct V2gDayResult {
    pub curve: SlotCurve,
    pub arbitrage: Yuan,
}

/// C4 day scheduler.
///
/// `v2g_charge_power` is the V2G pool's rated charging power (as selected by
/// C2 over the V2G-capable piles and vehicle count); discharge power is
/// derived from it via `discharge_derate` per spec §4.4.
pub fn schedule_v2g_day(
    day: &DaySchedule,
    prices: &[YuanPerKwh; SLOTS_PER_DAY],
    battery_kwh: Kwh,
    v2g_vehicles: u32,
    v2g_charge_power: Kw,
    discharge_derate: Decimal,
) -> V2gDayResult {
    let mut curve = SlotCurve::zeroed();
    let mut discharge_revenue = Yuan::zero();
    let mut charge_cost = Yuan::zero();

    if !day.operating || day.chargeable_ranges.is_empty() || v2g_vehicles == 0 {
        return V2gDayResult {
            curve,
            arbitrage: Yuan::zero(),
        };
    }

    let discharge_power = Kw::new(v2g_charge_power.value() * discharge_derate);
    let e_max_charge = v2g_charge_power * slot_hours();
    let e_max_discharge = discharge_power * slot_hours();

    let ranges: Vec<&TimeRange> = day.chargeable_ranges.iter().collect();
    let mut soc = ranges.last().unwrap().min_soc;

    for range in &ranges {
        let arrival = soc;
        let target = range.min_soc;
        let slots = range.range.expand();

        if arrival.value() > target.value() {
            let mut remaining = soc_delta_kwh(arrival, target, battery_kwh, v2g_vehicles);
            for slot in sorted_by_price(&slots, prices, true) {
                if remaining.is_zero() {
                    break;
                }
                let e = remaining.min(e_max_discharge);
                curve.points[slot].discharge_power_kw =
                    Kw::new(curve.points[slot].discharge_power_kw.value() - discharge_power.value());
                curve.points[slot].discharge_energy_kwh =
                    Kwh::new(curve.points[slot].discharge_energy_kwh.value() - e.value());
                discharge_revenue = discharge_revenue + (e * prices[slot]);
                remaining = remaining - e;
            }
        } else if arrival.value() < target.value() {
            let mut remaining = soc_delta_kwh(arrival, target, battery_kwh, v2g_vehicles);
            for slot in sorted_by_price(&slots, prices, false) {
                if remaining.is_zero() {
                    break;
                }
                let e = remaining.min(e_max_charge);
                curve.points[slot].charge_power_kw =
                    curve.points[slot].charge_power_kw + v2g_charge_power;
                curve.points[slot].charge_energy_kwh =
                    curve.points[slot].charge_energy_kwh + e;
                charge_cost = charge_cost + (e * prices[slot]);
                remaining = remaining - e;
            }
        }

        soc = target;
    }

    V2gDayResult {
        curve,
        arbitrage: discharge_revenue - charge_cost,
    }
}
