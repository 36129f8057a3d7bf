#![allow(dead_code)]
//! C5: weekly aggregator.
//!
//! Runs C3 (V1G-only) or C4 (V2G) once per operating weekday, producing
//! per-day curves, a slot-wise max envelope across the week, peak power, and
//! arbitrage aggregates.

use rust_decimal::Decimal;

use crate::domain::curve::SlotCurve;
use crate::domain::fleet::{DaySchedule, FleetConfig, WeeklySchedule, WEEKDAY_NAMES};
use crate::domain::pile::{select_pile_power, PilePowerConfig};
use crate::domain::time_grid::SLOTS_PER_DAY;
use crate::domain::types::{Kw, Kwh, Percent, Yuan, YuanPerKwh};
use crate::scheduler::v1g::schedule_v1g_day;
use crate::scheduler::v2g::schedule_v2g_day;

/// One weekday's result: its label, the combined (V1G+V2G) curve, and the
/// day's V2G arbitrage (zero when the station has no V2G piles).
pub struct DayResult {
    pub weekday: &'static str,
    pub curve: SlotCurve,
    pub arbitrage: Yuan,
}

pub struct WeeklyResult {
    pub days: Vec<DayResult>,
    pub envelope: SlotCurve,
    pub peak_power_kw: Kw,
    /// The V2G pile pool's rated discharge capability (pile-side), per spec
    /// §4.5 — distinct from any envelope-derived discharge figure, which
    /// reflects slot-integrated usage rather than pile rating.
    pub peak_discharge_power_kw: Kw,
    pub daily_max_energy_kwh: Kwh,
    pub max_daily_arbitrage: Yuan,
    pub weekly_arbitrage_sum: Yuan,
}

/// The SOC target driving a day's V1G demand: the highest `minSoc` among its
/// chargeable ranges, or `fallback` if it has none (spec.md is silent on
/// what a demand target means for an operating day with no ranges or with
/// time control disabled; we resolve it to the maximum minSoc anywhere, or
/// full charge if no ranges exist at all — see DESIGN.md).
fn day_target_soc(day: &DaySchedule, fallback: Percent) -> Percent {
    if day.chargeable_ranges.is_empty() {
        fallback
    } else {
        day.chargeable_ranges
            .iter()
            .map(|r| r.min_soc)
            .fold(Percent::zero(), Percent::max)
    }
}

/// C5 entry point, shared by `computeLoadCurve`/`computeSizing` (V1G-only,
/// call with a `FleetConfig` whose `v2g_piles` is zeroed) and `computeV2G`.
pub fn compute_weekly(
    fleet: &FleetConfig,
    schedule: &WeeklySchedule,
    prices: &[YuanPerKwh; SLOTS_PER_DAY],
    pile_power: &PilePowerConfig,
    v2g_discharge_derate: Decimal,
) -> WeeklyResult {
    // Normalize to exactly 7 days regardless of how the caller built
    // `schedule`: `WeeklySchedule`'s `Deserialize` already pads/truncates,
    // but `days` is a public field and nothing stops a caller from
    // constructing the struct literal directly with fewer than 7 (or zero)
    // entries. `day()`/`days[0]` below assume exactly 7, so normalize once
    // here rather than trust every call site.
    let schedule = WeeklySchedule::new(schedule.days.clone());
    let schedule = &schedule;

    let v2g_total = fleet.v2g_piles.total();
    let v2g_vehicles = v2g_total.min(fleet.vehicle_count);
    let v1g_vehicles = fleet.vehicle_count - v2g_vehicles;
    let v1g_piles = fleet.piles.saturating_sub(fleet.v2g_piles);

    let v1g_pile_power = select_pile_power(v1g_piles, v1g_vehicles, pile_power);
    let v2g_pile_power = if v2g_total > 0 {
        select_pile_power(fleet.v2g_piles, v2g_vehicles, pile_power)
    } else {
        Kw::zero()
    };
    let peak_discharge_power_kw = Kw::new(v2g_pile_power.value() * v2g_discharge_derate);

    let fallback_target = Percent::new(Decimal::from(100));
    let all_slots: Vec<usize> = (0..SLOTS_PER_DAY).collect();

    // When time control is disabled, the same curve applies to every day;
    // compute it once from the first operating day found (or day 0).
    let uncontrolled_curve_and_arbitrage = if !fleet.enable_time_control {
        let reference_day = schedule
            .days
            .iter()
            .find(|d| d.operating)
            .unwrap_or(&schedule.days[0]);
        Some(compute_day(
            reference_day,
            &all_slots,
            prices,
            fleet,
            v1g_vehicles,
            v1g_pile_power,
            v2g_vehicles,
            v2g_pile_power,
            v2g_discharge_derate,
            fallback_target,
        ))
    } else {
        None
    };

    let mut days = Vec::with_capacity(7);
    for (idx, weekday) in WEEKDAY_NAMES.iter().enumerate() {
        let day = schedule.day(idx);

        let (curve, arbitrage) = if let Some((curve, arbitrage)) = &uncontrolled_curve_and_arbitrage {
            (curve.clone(), *arbitrage)
        } else if !day.operating {
            (SlotCurve::zeroed(), Yuan::zero())
        } else {
            let chargeable = day.chargeable_slots();
            compute_day(
                day,
                &chargeable,
                prices,
                fleet,
                v1g_vehicles,
                v1g_pile_power,
                v2g_vehicles,
                v2g_pile_power,
                v2g_discharge_derate,
                fallback_target,
            )
        };

        days.push(DayResult {
            weekday,
            curve,
            arbitrage,
        });
    }

    let envelope = SlotCurve::envelope(days.iter().map(|d| &d.curve));
    let peak_power_kw = envelope.peak_charge_power();
    let daily_max_energy_kwh = days
        .iter()
        .map(|d| d.curve.total_charge_energy())
        .fold(Kwh::zero(), Kwh::max);
    let max_daily_arbitrage = days
        .iter()
        .map(|d| d.arbitrage)
        .fold(Yuan::zero(), Yuan::max);
    let weekly_arbitrage_sum = days.iter().map(|d| d.arbitrage).sum();

    WeeklyResult {
        days,
        envelope,
        peak_power_kw,
        peak_discharge_power_kw,
        daily_max_energy_kwh,
        max_daily_arbitrage,
        weekly_arbitrage_sum,
    }
}

#[allow(clippy::too_many_arguments)]
fn compute_day(
    day: &DaySchedule,
    chargeable: &[usize],
    prices: &[YuanPerKwh; SLOTS_PER_DAY],
    fleet: &FleetConfig,
    v1g_vehicles: u32,
    v1g_pile_power: Kw,
    v2g_vehicles: u32,
    v2g_pile_power: Kw,
    v2g_discharge_derate: Decimal,
    fallback_target: Percent,
) -> (SlotCurve, Yuan) {
    if chargeable.is_empty() {
        return (SlotCurve::zeroed(), Yuan::zero());
    }

    let target = day_target_soc(day, fallback_target);
    let v1g_demand = Kwh::new(
        fleet.battery_kwh.value() * (target.value() / Decimal::from(100)) * Decimal::from(v1g_vehicles),
    );
    let (v1g_curve, _) = schedule_v1g_day(chargeable, prices, v1g_demand, v1g_pile_power);

    if v2g_vehicles == 0 {
        return (v1g_curve, Yuan::zero());
    }

    let v2g_result = schedule_v2g_day(
        day,
        prices,
        fleet.battery_kwh,
        v2g_vehicles,
        v2g_pile_power,
        v2g_discharge_derate,
    );
    (v1g_curve.merge(&v2g_result.curve), v2g_result.arbitrage)
}
