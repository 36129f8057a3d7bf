#![allow(dead_code)]
//! Time-of-use tariff periods and slot pricing (C1, second half).

use serde::{Deserialize, Serialize};

use crate::domain::time_grid::{parse_hhmm, SlotRange};
use crate::domain::types::YuanPerKwh;

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouPeriodType {
    Peak,
    High,
    Normal,
    Valley,
}

/// One priced window of the day. `time_ranges` may wrap past midnight; a
/// period may carry more than one disjoint range (e.g. a valley period that
/// occurs both overnight and at midday).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TouPeriod {
    pub period_type: TouPeriodType,
    pub time_ranges: Vec<SlotRange>,
    pub price: YuanPerKwh,
}

impl TouPeriod {
    pub fn new(period_type: TouPeriodType, time_ranges: Vec<SlotRange>, price: YuanPerKwh) -> Self {
        Self {
            period_type,
            time_ranges,
            price,
        }
    }
}

/// `priceForSlot`: resolve the price that applies at the given "HH:MM". The
/// first period with a matching range wins; ranges are matched on minutes,
/// not slot index, per spec ("first match wins", non-overlap is not
/// required). Falls back to the mean of all period prices if nothing
/// matches, or to the 0.5 sentinel if `tous` is empty.
///
/// Returns the resolved price plus whether the fallback path was taken, so
/// callers can emit the `TouCoverageFallback` warning spec.md §9 calls for.
pub fn price_for_slot(
    time_str: &str,
    tous: &[TouPeriod],
) -> Result<(YuanPerKwh, bool), crate::errors::CoreError> {
    let minutes = parse_hhmm(time_str)
        .map_err(|e| crate::errors::CoreError::MalformedTimeString(e.to_string()))?;

    for period in tous {
        for range in &period.time_ranges {
            let start_minutes = range.start as u32 * crate::domain::time_grid::SLOT_MINUTES;
            let end_minutes = range.end as u32 * crate::domain::time_grid::SLOT_MINUTES;
            if range.contains_minutes(minutes, start_minutes, end_minutes) {
                return Ok((period.price, false));
            }
        }
    }

    if tous.is_empty() {
        return Ok((YuanPerKwh::new(rust_decimal::Decimal::new(5, 1)), true));
    }

    let sum: rust_decimal::Decimal = tous.iter().map(|p| p.price.value()).sum();
    let mean = sum / rust_decimal::Decimal::from(tous.len());
    Ok((YuanPerKwh::new(mean), true))
}

/// Resolve the price at every slot of the day in one pass, used by the day
/// schedulers (C3/C4) instead of calling `price_for_slot` 96 times per day.
pub fn price_curve(tous: &[TouPeriod]) -> Result<[YuanPerKwh; crate::domain::time_grid::SLOTS_PER_DAY], crate::errors::CoreError> {
    let mut out = [YuanPerKwh::zero(); crate::domain::time_grid::SLOTS_PER_DAY];
    for (slot, price) in out.iter_mut().enumerate() {
        let time_str = crate::domain::time_grid::slot_to_time(slot);
        let (resolved, fell_back) = price_for_slot(&time_str, tous)?;
        if fell_back {
            tracing::warn!(slot, time = %time_str, "TOU tariff has no coverage for this slot; using mean price fallback");
        }
        *price = resolved;
    }
    Ok(out)
}
