#![allow(dead_code)]
use hrdesk::{CalendarDate, CalendarDay, CalendarEvent, DayType, HolidayType, WorkCalendar};

pub fn date(value: &str) -> CalendarDate {
    CalendarDate::parse(value).expect("test date must be canonical")
}

/// Calendar with the default weekend/rules and the given day overrides.
pub fn calendar_with_days(days: Vec<CalendarDay>) -> WorkCalendar {
    let mut calendar = WorkCalendar::default();
    for day in days {
        calendar.days.insert(day.date.to_string(), day);
    }
    calendar
}

pub fn day(value: &str, day_type: DayType) -> CalendarDay {
    CalendarDay::new(date(value), day_type)
}

pub fn holiday(value: &str, name: &str, day_type: DayType, recurring: bool) -> CalendarDay {
    let mut entry = CalendarDay::new(date(value), day_type);
    entry.holiday_name = Some(name.to_string());
    entry.holiday_type = Some(match day_type {
        DayType::CompanyHoliday => HolidayType::Company,
        _ => HolidayType::Public,
    });
    entry.is_recurring = if recurring { Some(true) } else { None };
    entry
}

pub fn recurring_event(id: &str, title: &str) -> CalendarEvent {
    CalendarEvent {
        id: id.to_string(),
        title: title.to_string(),
        event_type: "meeting".to_string(),
        description: None,
        is_recurring: true,
    }
}
