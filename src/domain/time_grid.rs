#![allow(dead_code)]
//! 96-slot day grid and wall-clock conversions (C1, first half).
//!
//! The day is partitioned into `SLOTS_PER_DAY` slots of `SLOT_MINUTES`
//! minutes each. All slot math is integer arithmetic; nothing here touches
//! `Decimal` directly, matching the controller's separation between its
//! `Timestamp`/`Duration` helpers and its unit newtypes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SLOT_MINUTES: u32 = 15;
pub const SLOTS_PER_DAY: usize = (24 * 60 / SLOT_MINUTES as usize);

/// Errors parsing a wall-clock "HH:MM" string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedTimeString {
    #[error("time string {0:?} is not in HH:MM form")]
    BadFormat(String),
    #[error("hour {0} out of range in {1:?}")]
    HourOutOfRange(u32, String),
    #[error("minute {0} out of range in {1:?}")]
    MinuteOutOfRange(u32, String),
}

/// Parse "HH:MM" into minutes-since-midnight. Rejects rather than silently
/// defaulting, per spec.
pub fn parse_hhmm(s: &str) -> Result<u32, MalformedTimeString> {
    let (h, m) = s
        .split_once(':')
        .ok_or_else(|| MalformedTimeString::BadFormat(s.to_string()))?;
    let h: u32 = h
        .parse()
        .map_err(|_| MalformedTimeString::BadFormat(s.to_string()))?;
    let m: u32 = m
        .parse()
        .map_err(|_| MalformedTimeString::BadFormat(s.to_string()))?;
    if h > 23 {
        return Err(MalformedTimeString::HourOutOfRange(h, s.to_string()));
    }
    if m > 59 {
        return Err(MalformedTimeString::MinuteOutOfRange(m, s.to_string()));
    }
    Ok(h * 60 + m)
}

/// `timeToSlot`: "HH:MM" -> slot index in [0, 95].
pub fn time_to_slot(s: &str) -> Result<usize, MalformedTimeString> {
    let minutes = parse_hhmm(s)?;
    Ok((minutes / SLOT_MINUTES) as usize)
}

/// `slotToTime`: slot index -> zero-padded "HH:MM". Indices are taken modulo
/// `SLOTS_PER_DAY` so wrap-around expansion can use it without bounds checks.
pub fn slot_to_time(slot: usize) -> String {
    let slot = slot % SLOTS_PER_DAY;
    let minutes = slot as u32 * SLOT_MINUTES;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// A chargeable or tariff time window, possibly wrapping past midnight.
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotRange {
    pub start: usize,
    pub end: usize,
}

impl SlotRange {
    pub fn from_hhmm(start: &str, end: &str) -> Result<Self, MalformedTimeString> {
        Ok(Self {
            start: time_to_slot(start)?,
            end: time_to_slot(end)?,
        })
    }

    pub fn wraps(&self) -> bool {
        self.start > self.end
    }

    /// Expand to the inclusive set of slot indices this range covers. The
    /// end slot is inclusive per spec; wrapping ranges cover `start..=95`
    /// and `0..=end`.
    pub fn expand(&self) -> Vec<usize> {
        if !self.wraps() {
            (self.start..=self.end).collect()
        } else {
            (self.start..SLOTS_PER_DAY)
                .chain(0..=self.end)
                .collect()
        }
    }

    /// Whether the given minutes-since-midnight value falls in this range,
    /// using the same wrap convention as `priceForSlot`: non-wrapping ranges
    /// are `[a, b)` on minutes, wrapping ranges are `min >= a OR min < b`.
    pub fn contains_minutes(&self, minutes: u32, start_minutes: u32, end_minutes: u32) -> bool {
        if start_minutes <= end_minutes {
            minutes >= start_minutes && minutes < end_minutes
        } else {
            minutes >= start_minutes || minutes < end_minutes
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_round_trip() {
        assert_eq!(time_to_slot("00:00").unwrap(), 0);
        assert_eq!(time_to_slot("00:15").unwrap(), 1);
        assert_eq!(time_to_slot("23:45").unwrap(), 95);
        assert_eq!(slot_to_time(0), "00:00");
        assert_eq!(slot_to_time(95), "23:45");
    }

    #[test]
    fn rejects_malformed_time() {
        assert!(time_to_slot("25:00").is_err());
        assert!(time_to_slot("12:60").is_err());
        assert!(time_to_slot("garbage").is_err());
    }

    #[test]
    fn non_wrapping_range_expands_inclusive() {
        let r = SlotRange::from_hhmm("08:00", "08:30").unwrap();
        assert_eq!(r.expand(), vec![32, 33, 34]);
    }

    #[test]
    fn wrapping_range_expands_across_midnight() {
        let r = SlotRange::from_hhmm("23:30", "00:15").unwrap();
        let expanded = r.expand();
        assert_eq!(expanded.first(), Some(&94));
        assert_eq!(expanded.last(), Some(&1));
        assert_eq!(expanded.len(), 4); // 94, 95, 0, 1
    }
}
