pub mod v1g;
pub mod v2g;
pub mod weekly;

pub use v1g::schedule_v1g_day;
pub use v2g::{schedule_v2g_day, V2gDayResult};
pub use weekly::{compute_weekly, DayResult, WeeklyResult};
