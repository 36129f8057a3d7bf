#![allow(dead_code)]
//! The 96-point daily load/discharge curve (spec §3 `SlotCurve`/`SlotPoint`).

use serde::{Deserialize, Serialize};

use crate::domain::time_grid::{slot_to_time, SLOTS_PER_DAY};
use crate::domain::types::Kw;
use crate::domain::types::Kwh;

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlotPoint {
    pub time_slot: [u8; 5], // "HH:MM" as fixed ASCII bytes, avoids per-point String allocation
    pub charge_power_kw: Kw,
    pub discharge_power_kw: Kw,
    pub charge_energy_kwh: Kwh,
    pub discharge_energy_kwh: Kwh,
}

impl SlotPoint {
    pub fn empty(slot: usize) -> Self {
        let label = slot_to_time(slot);
        let mut bytes = [0u8; 5];
        bytes.copy_from_slice(label.as_bytes());
        Self {
            time_slot: bytes,
            charge_power_kw: Kw::zero(),
            discharge_power_kw: Kw::zero(),
            charge_energy_kwh: Kwh::zero(),
            discharge_energy_kwh: Kwh::zero(),
        }
    }

    pub fn time_slot_str(&self) -> String {
        String::from_utf8_lossy(&self.time_slot).into_owned()
    }
}

/// A day's 96-point curve. Always exactly `SLOTS_PER_DAY` long (spec
/// invariant: "Each day curve has exactly 96 points").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotCurve {
    pub points: Vec<SlotPoint>,
}

impl SlotCurve {
    pub fn zeroed() -> Self {
        Self {
            points: (0..SLOTS_PER_DAY).map(SlotPoint::empty).collect(),
        }
    }

    pub fn total_charge_energy(&self) -> Kwh {
        self.points.iter().map(|p| p.charge_energy_kwh).sum()
    }

    pub fn total_discharge_energy(&self) -> Kwh {
        self.points.iter().map(|p| p.discharge_energy_kwh).sum()
    }

    pub fn peak_charge_power(&self) -> Kw {
        self.points
            .iter()
            .map(|p| p.charge_power_kw)
            .fold(Kw::zero(), Kw::max)
    }

    /// Superimpose another curve onto this one slot-by-slot: powers and
    /// energies add. Used to combine a day's V1G and V2G contributions (spec
    /// §4.4: "V1G charge and V2G charge may both land in the same slot and
    /// are additive").
    pub fn merge(&self, other: &SlotCurve) -> SlotCurve {
        let mut out = self.clone();
        for (i, point) in out.points.iter_mut().enumerate() {
            point.charge_power_kw = point.charge_power_kw + other.points[i].charge_power_kw;
            point.discharge_power_kw = point.discharge_power_kw + other.points[i].discharge_power_kw;
            point.charge_energy_kwh = point.charge_energy_kwh + other.points[i].charge_energy_kwh;
            point.discharge_energy_kwh = point.discharge_energy_kwh + other.points[i].discharge_energy_kwh;
        }
        out
    }

    /// Slot-wise max across a set of day curves — the envelope of spec §4.5.
    /// Discharge is the slot-wise *minimum* (most negative).
    pub fn envelope<'a>(curves: impl Iterator<Item = &'a SlotCurve>) -> SlotCurve {
        let mut envelope = SlotCurve::zeroed();
        for curve in curves {
            for (i, point) in curve.points.iter().enumerate() {
                envelope.points[i].charge_power_kw =
                    envelope.points[i].charge_power_kw.max(point.charge_power_kw);
                envelope.points[i].discharge_power_kw =
                    envelope.points[i].discharge_power_kw.min(point.discharge_power_kw);
            }
        }
        envelope
    }
}
