use crate::domain::entities::DayType;
use serde::{Deserialize, Serialize};

/// Day counters plus the hour sum for one aggregation scope.
///
/// `working_days` doubles as the plain-working counter: `special_working`
/// and `half_day` increment their own counter and `working_days`, since
/// they represent worked time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DayTally {
    pub total_days: u32,
    pub working_days: u32,
    pub weekend_days: u32,
    pub public_holidays: u32,
    pub company_holidays: u32,
    pub special_working_days: u32,
    pub half_days: u32,
    pub total_working_hours: f64,
}

impl DayTally {
    pub fn record(&mut self, day_type: DayType, working_hours: f64) {
        self.total_days += 1;
        match day_type {
            DayType::Working => self.working_days += 1,
            DayType::Weekend => self.weekend_days += 1,
            DayType::PublicHoliday => self.public_holidays += 1,
            DayType::CompanyHoliday => self.company_holidays += 1,
            DayType::SpecialWorking => {
                self.special_working_days += 1;
                self.working_days += 1;
            }
            DayType::HalfDay => {
                self.half_days += 1;
                self.working_days += 1;
            }
        }
        self.total_working_hours += working_hours;
    }

    pub fn add(&mut self, other: &DayTally) {
        self.total_days += other.total_days;
        self.working_days += other.working_days;
        self.weekend_days += other.weekend_days;
        self.public_holidays += other.public_holidays;
        self.company_holidays += other.company_holidays;
        self.special_working_days += other.special_working_days;
        self.half_days += other.half_days;
        self.total_working_hours += other.total_working_hours;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStats {
    /// 1..=12
    pub month: u32,
    pub totals: DayTally,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyStats {
    /// 1..=4
    pub quarter: u32,
    pub totals: DayTally,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HalfYearStats {
    pub working_days: u32,
    pub total_working_hours: f64,
}

/// Full statistics record for one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarStats {
    pub year: i32,
    pub totals: DayTally,
    pub monthly: Vec<MonthlyStats>,
    pub quarterly: Vec<QuarterlyStats>,
    pub first_half: HalfYearStats,
    pub second_half: HalfYearStats,
}

impl CalendarStats {
    /// All-zero record, used for years outside the supported date range.
    pub fn empty(year: i32) -> Self {
        Self {
            year,
            totals: DayTally::default(),
            monthly: (1..=12)
                .map(|month| MonthlyStats {
                    month,
                    totals: DayTally::default(),
                })
                .collect(),
            quarterly: (1..=4)
                .map(|quarter| QuarterlyStats {
                    quarter,
                    totals: DayTally::default(),
                })
                .collect(),
            first_half: HalfYearStats::default(),
            second_half: HalfYearStats::default(),
        }
    }
}
