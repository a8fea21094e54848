pub mod error;

pub use error::*;

use crate::services::calendar_service::CalendarService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub calendar_service: Arc<CalendarService>,
}
