#![allow(dead_code)]
//! Charging pile catalogue and the pile selector (C2).

use serde::{Deserialize, Serialize};

use crate::domain::types::Kw;

/// Counts of piles by power class. Used both for a station's total fleet of
/// piles and for its V2G-capable subset.
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PileCounts {
    pub slow: u32,
    pub fast: u32,
    pub ultra_fast: u32,
}

impl PileCounts {
    pub fn total(&self) -> u32 {
        self.slow + self.fast + self.ultra_fast
    }

    /// Subtract another set of counts class-by-class (used to derive the
    /// V1G-only pile pool by removing the V2G-reserved piles). Saturates at
    /// zero per class; callers validate `other <= self` up front via
    /// `FleetConfig::validate`.
    pub fn saturating_sub(&self, other: PileCounts) -> PileCounts {
        PileCounts {
            slow: self.slow.saturating_sub(other.slow),
            fast: self.fast.saturating_sub(other.fast),
            ultra_fast: self.ultra_fast.saturating_sub(other.ultra_fast),
        }
    }
}

/// Rated power per pile class, configurable (spec §3 "Configurable
/// constants").
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PilePowerConfig {
    pub slow_kw: Kw,
    pub fast_kw: Kw,
    pub ultra_kw: Kw,
    pub fallback_kw: Kw,
}

impl Default for PilePowerConfig {
    fn default() -> Self {
        use rust_decimal_macros::dec;
        Self {
            slow_kw: Kw::new(dec!(7)),
            fast_kw: Kw::new(dec!(120)),
            ultra_kw: Kw::new(dec!(350)),
            fallback_kw: Kw::new(dec!(7)),
        }
    }
}

/// C2: total simultaneous charging power a station can draw, given its pile
/// counts and the number of vehicles that can plug in at once.
///
/// Materializes the multiset of individual pile powers, sorts descending,
/// and sums the top `min(vehicle_count, total_piles)` — a station with more
/// piles than vehicles can only ever energize `vehicle_count` of them, so
/// picking the highest-power piles gives the worst-case (and therefore
/// sizing-relevant) simultaneous draw.
pub fn select_pile_power(counts: PileCounts, vehicle_count: u32, power: &PilePowerConfig) -> Kw {
    if counts.total() == 0 {
        return power.fallback_kw;
    }

    let mut powers: Vec<rust_decimal::Decimal> = Vec::with_capacity(counts.total() as usize);
    powers.extend(std::iter::repeat(power.ultra_kw.value()).take(counts.ultra_fast as usize));
    powers.extend(std::iter::repeat(power.fast_kw.value()).take(counts.fast as usize));
    powers.extend(std::iter::repeat(power.slow_kw.value()).take(counts.slow as usize));
    powers.sort_by(|a, b| b.cmp(a));

    let take = vehicle_count.min(counts.total()) as usize;
    Kw::new(powers.into_iter().take(take).sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn scenario_seed_pile_selection() {
        // vehicleCount=8, fast=2, slow=6, ultra=1 => 625 kW
        let counts = PileCounts {
            slow: 6,
            fast: 2,
            ultra_fast: 1,
        };
        let power = select_pile_power(counts, 8, &PilePowerConfig::default());
        assert_eq!(power.value(), dec!(625));
    }

    #[test]
    fn all_zero_counts_use_fallback() {
        let power = select_pile_power(PileCounts::default(), 5, &PilePowerConfig::default());
        assert_eq!(power.value(), dec!(7));
    }

    #[test]
    fn vehicle_cap_below_pile_count_selects_highest_power_first() {
        let counts = PileCounts {
            slow: 10,
            fast: 0,
            ultra_fast: 1,
        };
        // Only 2 vehicles can plug in: pick the ultra pile plus one slow pile.
        let power = select_pile_power(counts, 2, &PilePowerConfig::default());
        assert_eq!(power.value(), dec!(357));
    }

    #[test]
    fn selector_equals_top_n_sum_property() {
        let counts = PileCounts {
            slow: 3,
            fast: 2,
            ultra_fast: 1,
        };
        let cfg = PilePowerConfig::default();
        let mut all = vec![cfg.ultra_kw.value()];
        all.extend(std::iter::repeat(cfg.fast_kw.value()).take(2));
        all.extend(std::iter::repeat(cfg.slow_kw.value()).take(3));
        all.sort_by(|a, b| b.cmp(a));

        for n in 0..=counts.total() {
            let expected: rust_decimal::Decimal = all.iter().take(n as usize).sum();
            assert_eq!(select_pile_power(counts, n, &cfg).value(), expected);
        }
    }
}
