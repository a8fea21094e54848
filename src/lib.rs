pub mod api;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use config::Config;
pub use domain::calendar_date::{CalendarDate, MonthDay};
pub use domain::entities::*;
pub use domain::errors::{CalendarError, CalendarResult};
pub use domain::ports::CalendarStore;
pub use services::calendar_service::CalendarService;
pub use services::day_resolver::{default_day_type, resolve_day_type, CalendarView, RecurringIndex};
pub use services::statistics_service::compute_stats;
