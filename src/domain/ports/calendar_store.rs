use crate::domain::calendar_date::CalendarDate;
use crate::domain::entities::{CalendarDay, WorkCalendar, WorkingTimeRules};
use crate::domain::errors::CalendarResult;
use std::collections::BTreeSet;

/// Durable store for the work calendar. The store is the system of record,
/// but the engine only reads it at bootstrap; all later reads go through
/// the in-memory snapshot.
#[async_trait::async_trait]
pub trait CalendarStore: Send + Sync {
    /// Load the full calendar, or `None` when it has never been created.
    async fn read_calendar(&self, calendar_id: &str) -> CalendarResult<Option<WorkCalendar>>;

    /// Create the calendar document. Used once, at bootstrap.
    async fn create_calendar(
        &self,
        calendar_id: &str,
        calendar: &WorkCalendar,
    ) -> CalendarResult<()>;

    /// Persist weekend pattern and working-time rules.
    async fn update_settings(
        &self,
        calendar_id: &str,
        weekend_days: &BTreeSet<u8>,
        rules: &WorkingTimeRules,
    ) -> CalendarResult<()>;

    /// Create or replace one day entry.
    async fn upsert_day(
        &self,
        calendar_id: &str,
        date: &CalendarDate,
        day: &CalendarDay,
    ) -> CalendarResult<()>;

    /// Remove one day entry.
    async fn delete_day(&self, calendar_id: &str, date: &CalendarDate) -> CalendarResult<()>;
}
