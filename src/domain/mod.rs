pub mod curve;
pub mod fleet;
pub mod pile;
pub mod sizing_tables;
pub mod tariff;
pub mod time_grid;
pub mod types;

pub use curve::{SlotCurve, SlotPoint};
pub use fleet::{CountryCode, DaySchedule, FleetConfig, StationConfig, TimeRange, WeeklySchedule, WEEKDAY_NAMES};
pub use pile::{select_pile_power, PileCounts, PilePowerConfig};
pub use sizing_tables::{CountryTables, EssModule, StandardTables};
pub use tariff::{price_curve, price_for_slot, TouPeriod, TouPeriodType};
pub use time_grid::{slot_to_time, time_to_slot, SlotRange, SLOTS_PER_DAY, SLOT_MINUTES};
pub use types::{round_half_up, Kw, Kwh, Percent, Yuan, YuanPerKwh};
