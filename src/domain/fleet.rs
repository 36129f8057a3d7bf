#![allow(dead_code)]
//! Station, fleet, and weekly-schedule value objects (spec §3).

use serde::{Deserialize, Serialize};

use crate::domain::time_grid::SlotRange;
use crate::domain::types::{Kw, Percent};
use crate::errors::CoreError;

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CountryCode {
    Cn,
    Jp,
    Uk,
}

impl std::str::FromStr for CountryCode {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CN" => Ok(Self::Cn),
            "JP" => Ok(Self::Jp),
            "UK" => Ok(Self::Uk),
            other => Err(CoreError::MissingInput(format!(
                "unsupported country code {other:?}"
            ))),
        }
    }
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StationConfig {
    pub pv_peak_power_kw: Kw,
    pub transformer_kva: Option<Kw>,
    pub country: CountryCode,
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FleetConfig {
    pub vehicle_count: u32,
    pub battery_kwh: crate::domain::types::Kwh,
    pub enable_time_control: bool,
    pub piles: crate::domain::pile::PileCounts,
    pub v2g_piles: crate::domain::pile::PileCounts,
}

impl FleetConfig {
    /// v2g counts must not exceed the corresponding total pile counts.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.v2g_piles.slow > self.piles.slow
            || self.v2g_piles.fast > self.piles.fast
            || self.v2g_piles.ultra_fast > self.piles.ultra_fast
        {
            return Err(CoreError::MissingInput(
                "v2gPiles counts exceed total pile counts per class".to_string(),
            ));
        }
        Ok(())
    }
}

/// One chargeable window within a day, with the SOC target a vehicle is
/// expected to depart at.
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimeRange {
    pub range: SlotRange,
    pub min_soc: Percent,
}

impl TimeRange {
    pub fn from_hhmm(start: &str, end: &str, min_soc: Percent) -> Result<Self, CoreError> {
        Ok(Self {
            range: SlotRange::from_hhmm(start, end)?,
            min_soc,
        })
    }
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaySchedule {
    pub operating: bool,
    /// Sorted by start slot at construction time, per spec invariant.
    pub chargeable_ranges: Vec<TimeRange>,
}

impl DaySchedule {
    pub fn new(operating: bool, mut ranges: Vec<TimeRange>) -> Self {
        ranges.sort_by_key(|r| r.range.start);
        Self {
            operating,
            chargeable_ranges: ranges,
        }
    }

    /// All slot indices covered by this day's chargeable ranges, deduplicated
    /// and sorted. Used as the `chargeable set` input to the V1G/V2G day
    /// schedulers.
    pub fn chargeable_slots(&self) -> Vec<usize> {
        if !self.operating {
            return Vec::new();
        }
        let mut slots: Vec<usize> = self
            .chargeable_ranges
            .iter()
            .flat_map(|r| r.range.expand())
            .collect();
        slots.sort_unstable();
        slots.dedup();
        slots
    }
}

pub const WEEKDAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Seven `DaySchedule`s, Mon..Sun. Missing days (fewer than 7 supplied) are
/// treated as non-operating, per spec invariant.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WeeklySchedule {
    pub days: Vec<DaySchedule>,
}

impl WeeklySchedule {
    pub fn new(mut days: Vec<DaySchedule>) -> Self {
        days.truncate(7);
        while days.len() < 7 {
            days.push(DaySchedule::default());
        }
        Self { days }
    }

    /// Missing days are padded non-operating, same as `new`. Never panics on
    /// `index`: callers always iterate 0..7, and `new`/`Deserialize` both
    /// guarantee exactly 7 days either way.
    pub fn day(&self, index: usize) -> &DaySchedule {
        &self.days[index]
    }
}

/// Deserializes through the same padding/truncation `new()` applies, so a
/// JSON body with fewer than 7 days (or an empty `days` array) — valid input
/// per spec.md §3 ("length <= 7; missing days treated as non-operating") —
/// can never reach `day()` or `days[0]` out of bounds. The derived
/// `Deserialize` bypassed `new()` entirely; this replaces it.
impl<'de> Deserialize<'de> for WeeklySchedule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wire {
            #[serde(default)]
            days: Vec<DaySchedule>,
        }
        let wire = Wire::deserialize(deserializer)?;
        Ok(WeeklySchedule::new(wire.days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn missing_days_default_to_non_operating() {
        let schedule = WeeklySchedule::new(vec![DaySchedule::new(true, vec![])]);
        assert_eq!(schedule.days.len(), 7);
        assert!(!schedule.days[1].operating);
    }

    #[test]
    fn deserialized_schedule_with_fewer_than_seven_days_pads_to_seven() {
        // A request body with 3 days is valid per spec.md §3 ("length <= 7;
        // missing days treated as non-operating") and must not bypass the
        // padding `WeeklySchedule::new` applies.
        let json = r#"{"days":[
            {"operating":true,"chargeable_ranges":[]},
            {"operating":true,"chargeable_ranges":[]},
            {"operating":false,"chargeable_ranges":[]}
        ]}"#;
        let schedule: WeeklySchedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.days.len(), 7);
        assert!(schedule.days[0].operating);
        assert!(!schedule.days[3].operating);
        assert!(!schedule.days[6].operating);
    }

    #[test]
    fn deserialized_schedule_with_empty_days_array_pads_to_seven_non_operating() {
        let schedule: WeeklySchedule = serde_json::from_str(r#"{"days":[]}"#).unwrap();
        assert_eq!(schedule.days.len(), 7);
        assert!(schedule.days.iter().all(|d| !d.operating));
    }

    #[test]
    fn deserialized_schedule_with_missing_days_field_pads_to_seven() {
        let schedule: WeeklySchedule = serde_json::from_str("{}").unwrap();
        assert_eq!(schedule.days.len(), 7);
    }

    #[test]
    fn ranges_are_sorted_by_start() {
        let r1 = TimeRange::from_hhmm("18:00", "20:00", Percent::new(dec!(90))).unwrap();
        let r2 = TimeRange::from_hhmm("08:00", "10:00", Percent::new(dec!(50))).unwrap();
        let day = DaySchedule::new(true, vec![r1, r2]);
        assert_eq!(day.chargeable_ranges[0].range.start, r2.range.start);
    }

    #[test]
    fn v2g_counts_cannot_exceed_totals() {
        let fleet = FleetConfig {
            vehicle_count: 5,
            battery_kwh: crate::domain::types::Kwh::zero(),
            enable_time_control: true,
            piles: crate::domain::pile::PileCounts {
                slow: 1,
                fast: 0,
                ultra_fast: 0,
            },
            v2g_piles: crate::domain::pile::PileCounts {
                slow: 2,
                fast: 0,
                ultra_fast: 0,
            },
        };
        assert!(fleet.validate().is_err());
    }
}
