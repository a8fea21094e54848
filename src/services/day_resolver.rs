use crate::domain::calendar_date::{CalendarDate, MonthDay};
use crate::domain::entities::{CalendarDay, CalendarEvent, DayType, WorkCalendar};
use std::collections::HashMap;

/// Month-day lookup indices derived from `calendar.days`.
///
/// Derived data only: rebuilt whenever a fresh [`CalendarView`] is taken,
/// never mutated independently of the source map.
#[derive(Debug, Clone, Default)]
pub struct RecurringIndex {
    holidays: HashMap<MonthDay, CalendarDay>,
    events: HashMap<MonthDay, Vec<CalendarEvent>>,
}

impl RecurringIndex {
    /// Single pass over `calendar.days`. Map keys that do not parse as
    /// canonical `yyyy-MM-dd` are skipped with a warning; one corrupt
    /// legacy entry must not invalidate the whole calendar.
    ///
    /// When several stored years mark the same month-day as a recurring
    /// holiday, the entry of the most recent year wins: `days` is a
    /// `BTreeMap` with canonical keys, so iteration is chronological and
    /// insertion is last-write-wins.
    pub fn build(calendar: &WorkCalendar) -> Self {
        let mut index = RecurringIndex::default();
        for (key, day) in &calendar.days {
            let date = match CalendarDate::parse(key) {
                Ok(date) => date,
                Err(_) => {
                    tracing::warn!(key = %key, "skipping calendar day with malformed date key");
                    continue;
                }
            };
            let month_day = date.month_day();
            if day.is_recurring_holiday() {
                index.holidays.insert(month_day, day.clone());
            }
            for event in day.events.iter().filter(|event| event.is_recurring) {
                index.events.entry(month_day).or_default().push(event.clone());
            }
        }
        index
    }

    pub fn holiday_on(&self, month_day: MonthDay) -> Option<&CalendarDay> {
        self.holidays.get(&month_day)
    }

    pub fn events_on(&self, month_day: MonthDay) -> &[CalendarEvent] {
        self.events
            .get(&month_day)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Read-only view over one calendar snapshot with its recurring indices
/// built once, so batch readers pay the index cost a single time.
pub struct CalendarView<'a> {
    calendar: &'a WorkCalendar,
    index: RecurringIndex,
}

impl<'a> CalendarView<'a> {
    pub fn new(calendar: &'a WorkCalendar) -> Self {
        Self {
            index: RecurringIndex::build(calendar),
            calendar,
        }
    }

    pub fn calendar(&self) -> &WorkCalendar {
        self.calendar
    }

    /// Classify a date. Precedence, highest first: exact entry, recurring
    /// holiday on the same month-day, configured weekend, working.
    pub fn day_type(&self, date: CalendarDate) -> DayType {
        if let Some(day) = self.calendar.day(&date) {
            return day.day_type;
        }
        if let Some(holiday) = self.index.holiday_on(date.month_day()) {
            return holiday.day_type;
        }
        if self.calendar.is_weekend(&date) {
            DayType::Weekend
        } else {
            DayType::Working
        }
    }

    /// Merged day information for display/editing.
    ///
    /// Prefers the exact entry, appending recurring events for the
    /// month-day that are not already present (by event id). Otherwise a
    /// matching recurring holiday is projected onto the queried date.
    /// Otherwise, if only recurring events match, a `working`-typed entry
    /// carrying just those events is synthesized.
    pub fn day_data(&self, date: CalendarDate) -> Option<CalendarDay> {
        let month_day = date.month_day();
        let recurring_events = self.index.events_on(month_day);

        if let Some(day) = self.calendar.day(&date) {
            let mut merged = day.clone();
            for event in recurring_events {
                if !merged.events.iter().any(|existing| existing.id == event.id) {
                    merged.events.push(event.clone());
                }
            }
            return Some(merged);
        }

        if let Some(holiday) = self.index.holiday_on(month_day) {
            let mut projected = holiday.clone();
            projected.date = date;
            return Some(projected);
        }

        if !recurring_events.is_empty() {
            let mut day = CalendarDay::new(date, DayType::Working);
            day.events = recurring_events.to_vec();
            return Some(day);
        }

        None
    }
}

/// Fallback used when no calendar has been loaded: Saturday/Sunday are
/// weekend, everything else working.
pub fn default_day_type(date: CalendarDate) -> DayType {
    match date.weekday_number() {
        0 | 6 => DayType::Weekend,
        _ => DayType::Working,
    }
}

/// One-shot resolution. Builds the recurring index on every call; readers
/// that classify many dates should hold a [`CalendarView`] instead.
pub fn resolve_day_type(date: CalendarDate, calendar: Option<&WorkCalendar>) -> DayType {
    match calendar {
        Some(calendar) => CalendarView::new(calendar).day_type(date),
        None => default_day_type(date),
    }
}
