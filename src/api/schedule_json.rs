//! Adapts persisted JSON blobs (spec.md §6 "Persisted state layout") into the
//! core's typed `WeeklySchedule`/`SlotRange` values. The core itself never
//! touches JSON (spec.md §9); this is the thin boundary-side translation
//! spec.md §1 calls "a thin adapter layer [that] converts persisted JSON
//! strings to these values." A real sqlx-backed `Repositories` impl would
//! call these on every row load; `InMemoryRepositories` stores typed values
//! directly and has no use for them (persistence itself is spec.md §1's
//! explicit non-goal).

use serde::Deserialize;

use crate::domain::fleet::{DaySchedule, TimeRange, WeeklySchedule};
use crate::domain::time_grid::SlotRange;
use crate::domain::types::Percent;
use crate::errors::Warning;

#[derive(Debug, Deserialize)]
struct RangeJson {
    start: String,
    end: String,
    #[serde(default)]
    min_soc: rust_decimal::Decimal,
}

#[derive(Debug, Deserialize)]
struct DayJson {
    #[serde(default)]
    #[allow(dead_code)]
    day: Option<String>,
    is_operating: bool,
    #[serde(default)]
    chargeable_ranges: Vec<RangeJson>,
    #[serde(default)]
    #[allow(dead_code)]
    departure_count: Option<u32>,
}

/// Parse the `weeklySchedule` JSON blob (spec.md §6: "array of 7 day entries
/// `{day, isOperating, chargeableRanges: [{start,end,minSoc}], departureCount}`").
///
/// On malformed JSON, degrades to an empty (all-non-operating) schedule with
/// a warning rather than failing the request, per spec.md §7:
/// `SerializationFailure` "degrades to an empty schedule with a warning, so
/// that downstream producer-consumer races do not take down the service." A
/// day entry whose own ranges fail to parse ("HH:MM" malformed) drops just
/// those ranges and keeps the rest of the schedule intact.
pub fn parse_weekly_schedule_json(blob: &str) -> (WeeklySchedule, Option<Warning>) {
    let days_json: Vec<DayJson> = match serde_json::from_str(blob) {
        Ok(d) => d,
        Err(error) => {
            tracing::warn!(%error, "weeklySchedule JSON blob unparseable; degrading to empty schedule");
            return (WeeklySchedule::new(vec![]), Some(Warning::empty_schedule()));
        }
    };

    let mut days = Vec::with_capacity(days_json.len());
    for day in days_json {
        let mut ranges = Vec::with_capacity(day.chargeable_ranges.len());
        for r in &day.chargeable_ranges {
            match SlotRange::from_hhmm(&r.start, &r.end) {
                Ok(range) => ranges.push(TimeRange {
                    range,
                    min_soc: Percent::new(r.min_soc),
                }),
                Err(error) => {
                    tracing::warn!(%error, start = %r.start, end = %r.end, "chargeableRange has malformed HH:MM; dropping range");
                }
            }
        }
        days.push(DaySchedule::new(day.is_operating, ranges));
    }

    (WeeklySchedule::new(days), None)
}

#[derive(Debug, Deserialize)]
struct TouRangeJson {
    start: String,
    end: String,
}

/// Parse a TOU period's `timeRanges` JSON blob (spec.md §6: "array of
/// `{start,end}`"). Same degrade-on-parse-failure behavior as
/// `parse_weekly_schedule_json`: unparseable JSON yields an empty range list
/// plus a warning instead of failing the whole request.
pub fn parse_tou_ranges_json(blob: &str) -> (Vec<SlotRange>, Option<Warning>) {
    let ranges_json: Vec<TouRangeJson> = match serde_json::from_str(blob) {
        Ok(r) => r,
        Err(error) => {
            tracing::warn!(%error, "TOU timeRanges JSON blob unparseable; degrading to empty ranges");
            return (Vec::new(), Some(Warning::empty_schedule()));
        }
    };

    let mut ranges = Vec::with_capacity(ranges_json.len());
    for r in ranges_json {
        match SlotRange::from_hhmm(&r.start, &r.end) {
            Ok(range) => ranges.push(range),
            Err(error) => {
                tracing::warn!(%error, start = %r.start, end = %r.end, "TOU range has malformed HH:MM; dropping");
            }
        }
    }
    (ranges, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_schedule_blob_parses() {
        let blob = r#"[
            {"day":"Mon","isOperating":true,"chargeableRanges":[{"start":"08:00","end":"10:00","minSoc":80}],"departureCount":1}
        ]"#;
        let (schedule, warning) = parse_weekly_schedule_json(blob);
        assert!(warning.is_none());
        assert_eq!(schedule.days.len(), 7);
        assert!(schedule.days[0].operating);
        assert_eq!(schedule.days[0].chargeable_ranges.len(), 1);
        assert!(!schedule.days[1].operating); // missing days default non-operating
    }

    #[test]
    fn malformed_json_degrades_to_empty_schedule_with_warning() {
        let (schedule, warning) = parse_weekly_schedule_json("not json at all");
        assert!(warning.is_some());
        assert_eq!(schedule.days.len(), 7);
        assert!(schedule.days.iter().all(|d| !d.operating));
    }

    #[test]
    fn malformed_range_is_dropped_but_day_survives() {
        let blob = r#"[
            {"day":"Mon","isOperating":true,"chargeableRanges":[{"start":"08:00","end":"10:00","minSoc":80},{"start":"25:99","end":"10:00","minSoc":50}]}
        ]"#;
        let (schedule, warning) = parse_weekly_schedule_json(blob);
        assert!(warning.is_none());
        assert_eq!(schedule.days[0].chargeable_ranges.len(), 1);
    }

    #[test]
    fn tou_ranges_blob_parses() {
        let (ranges, warning) = parse_tou_ranges_json(r#"[{"start":"18:00","end":"20:00"}]"#);
        assert!(warning.is_none());
        assert_eq!(ranges.len(), 1);
    }

    #[test]
    fn malformed_tou_ranges_blob_degrades_with_warning() {
        let (ranges, warning) = parse_tou_ranges_json("{not valid");
        assert!(warning.is_some());
        assert!(ranges.is_empty());
    }
}
