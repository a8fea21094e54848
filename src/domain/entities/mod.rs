pub mod calendar_stats;
pub mod work_calendar;

pub use calendar_stats::*;
pub use work_calendar::*;
