use crate::domain::calendar_date::CalendarDate;
use crate::domain::errors::CalendarError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Classification of a single calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Working,
    Weekend,
    PublicHoliday,
    CompanyHoliday,
    SpecialWorking,
    HalfDay,
}

impl DayType {
    pub fn is_holiday(&self) -> bool {
        matches!(self, DayType::PublicHoliday | DayType::CompanyHoliday)
    }

    /// Day types that represent worked time.
    pub fn is_worked(&self) -> bool {
        matches!(
            self,
            DayType::Working | DayType::SpecialWorking | DayType::HalfDay
        )
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayType::Working => write!(f, "working"),
            DayType::Weekend => write!(f, "weekend"),
            DayType::PublicHoliday => write!(f, "public_holiday"),
            DayType::CompanyHoliday => write!(f, "company_holiday"),
            DayType::SpecialWorking => write!(f, "special_working"),
            DayType::HalfDay => write!(f, "half_day"),
        }
    }
}

impl FromStr for DayType {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "working" => Ok(DayType::Working),
            "weekend" => Ok(DayType::Weekend),
            "public_holiday" => Ok(DayType::PublicHoliday),
            "company_holiday" => Ok(DayType::CompanyHoliday),
            "special_working" => Ok(DayType::SpecialWorking),
            "half_day" => Ok(DayType::HalfDay),
            other => Err(CalendarError::UnknownDayType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayType {
    Public,
    Company,
}

impl fmt::Display for HolidayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HolidayType::Public => write!(f, "public"),
            HolidayType::Company => write!(f, "company"),
        }
    }
}

/// Informational overlay on a calendar day. Events never change the day's
/// classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
}

impl CalendarEvent {
    pub fn new(title: impl Into<String>, event_type: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            event_type: event_type.into(),
            description: None,
            is_recurring: false,
        }
    }
}

/// One stored override in the calendar's `days` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: CalendarDate,
    pub day_type: DayType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_type: Option<HolidayType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_paid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_recurring: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<CalendarEvent>,
}

impl CalendarDay {
    pub fn new(date: CalendarDate, day_type: DayType) -> Self {
        Self {
            date,
            day_type,
            holiday_name: None,
            holiday_type: None,
            working_hours: None,
            is_paid: None,
            is_recurring: None,
            legal_reference: None,
            note: None,
            events: Vec::new(),
        }
    }

    /// True for holiday-type entries flagged to reapply every year on the
    /// same month-day.
    pub fn is_recurring_holiday(&self) -> bool {
        self.is_recurring.unwrap_or(false) && self.day_type.is_holiday()
    }
}

/// Working-time rules attached to the calendar, used for hour attribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingTimeRules {
    #[serde(default = "default_standard_hours")]
    pub standard_working_hours_per_day: f64,
    #[serde(default = "default_weekly_hours")]
    pub working_hours_per_week: f64,
    #[serde(default = "default_half_day_hours")]
    pub half_day_hours: f64,
    #[serde(default = "default_break_minutes")]
    pub break_time_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_shift_based: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overtime_eligible: Option<bool>,
}

fn default_standard_hours() -> f64 {
    8.0
}

fn default_weekly_hours() -> f64 {
    40.0
}

fn default_half_day_hours() -> f64 {
    4.0
}

fn default_break_minutes() -> u32 {
    60
}

impl Default for WorkingTimeRules {
    fn default() -> Self {
        Self {
            standard_working_hours_per_day: default_standard_hours(),
            working_hours_per_week: default_weekly_hours(),
            half_day_hours: default_half_day_hours(),
            break_time_minutes: default_break_minutes(),
            is_shift_based: None,
            overtime_eligible: None,
        }
    }
}

/// Singleton aggregate root: one work calendar per organization.
///
/// `days` keys are canonical `yyyy-MM-dd`. Every key this crate writes goes
/// through [`CalendarDate`]; foreign snapshots may carry corrupt keys,
/// which readers skip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkCalendar {
    #[serde(default = "default_weekend_days")]
    pub weekend_days: BTreeSet<u8>,
    #[serde(default)]
    pub working_time_rules: WorkingTimeRules,
    #[serde(default)]
    pub days: BTreeMap<String, CalendarDay>,
}

fn default_weekend_days() -> BTreeSet<u8> {
    BTreeSet::from([0, 6])
}

impl Default for WorkCalendar {
    fn default() -> Self {
        Self {
            weekend_days: default_weekend_days(),
            working_time_rules: WorkingTimeRules::default(),
            days: BTreeMap::new(),
        }
    }
}

impl WorkCalendar {
    pub fn day(&self, date: &CalendarDate) -> Option<&CalendarDay> {
        self.days.get(&date.to_string())
    }

    pub fn is_weekend(&self, date: &CalendarDate) -> bool {
        self.weekend_days.contains(&date.weekday_number())
    }
}

/// Partial day edit accepted by the mutation coordinator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayEdit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_type: Option<DayType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_type: Option<HolidayType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_paid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_recurring: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DayEdit {
    /// Build the canonical stored day. The day type defaults to `working`;
    /// optional fields are carried only when their value is defined:
    /// `working_hours` on presence (0 is a valid value), strings when
    /// non-empty, booleans when true.
    pub fn into_day(self, date: CalendarDate) -> CalendarDay {
        CalendarDay {
            date,
            day_type: self.day_type.unwrap_or(DayType::Working),
            holiday_name: self.holiday_name.filter(|name| !name.is_empty()),
            holiday_type: self.holiday_type,
            working_hours: self.working_hours,
            is_paid: self.is_paid.filter(|paid| *paid),
            is_recurring: self.is_recurring.filter(|recurring| *recurring),
            legal_reference: self.legal_reference.filter(|r| !r.is_empty()),
            note: self.note.filter(|note| !note.is_empty()),
            events: Vec::new(),
        }
    }
}
