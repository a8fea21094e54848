use crate::domain::calendar_date::CalendarDate;
use crate::domain::entities::{
    CalendarDay, CalendarStats, DayTally, DayType, HalfYearStats, MonthlyStats, QuarterlyStats,
    WorkCalendar, WorkingTimeRules,
};
use crate::services::day_resolver::CalendarView;
use chrono::{Datelike, NaiveDate};

/// Aggregate one year of day classifications into monthly, quarterly,
/// half-year and yearly statistics.
///
/// Returns `None` iff `calendar` is `None`. Pure and deterministic for a
/// fixed `(calendar, year)`: one pass over the proleptic Gregorian dates of
/// the year, no timezone dependency. Quarter and half-year rollups are
/// derived by summing the monthly tallies, never by re-walking dates.
pub fn compute_stats(calendar: Option<&WorkCalendar>, year: i32) -> Option<CalendarStats> {
    let calendar = calendar?;

    let (Some(start), Some(end)) = (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) else {
        // Year outside the representable range: zeroed stats, not an error.
        return Some(CalendarStats::empty(year));
    };

    let view = CalendarView::new(calendar);
    let rules = &calendar.working_time_rules;

    let mut monthly: Vec<MonthlyStats> = (1..=12)
        .map(|month| MonthlyStats {
            month,
            totals: DayTally::default(),
        })
        .collect();
    let mut totals = DayTally::default();

    let mut current = start;
    loop {
        let date = CalendarDate::new(current);
        let day_type = view.day_type(date);
        let hours = scheduled_hours(day_type, calendar.day(&date), rules);

        monthly[current.month0() as usize].totals.record(day_type, hours);
        totals.record(day_type, hours);

        if current == end {
            break;
        }
        current = match current.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    let quarterly = (0..4)
        .map(|quarter| {
            let mut tally = DayTally::default();
            for stats in &monthly[quarter * 3..quarter * 3 + 3] {
                tally.add(&stats.totals);
            }
            QuarterlyStats {
                quarter: quarter as u32 + 1,
                totals: tally,
            }
        })
        .collect();

    Some(CalendarStats {
        year,
        totals,
        first_half: half_year(&monthly[..6]),
        second_half: half_year(&monthly[6..]),
        monthly,
        quarterly,
    })
}

fn half_year(months: &[MonthlyStats]) -> HalfYearStats {
    let mut half = HalfYearStats::default();
    for stats in months {
        half.working_days += stats.totals.working_days;
        half.total_working_hours += stats.totals.total_working_hours;
    }
    half
}

/// Hours a date contributes to `total_working_hours`. Only the exact
/// stored entry can override the rule defaults; holiday and weekend days
/// contribute nothing.
fn scheduled_hours(
    day_type: DayType,
    day: Option<&CalendarDay>,
    rules: &WorkingTimeRules,
) -> f64 {
    match day_type {
        DayType::Working | DayType::SpecialWorking => day
            .and_then(|day| day.working_hours)
            .unwrap_or(rules.standard_working_hours_per_day),
        DayType::HalfDay => day
            .and_then(|day| day.working_hours)
            .unwrap_or(rules.half_day_hours),
        DayType::Weekend | DayType::PublicHoliday | DayType::CompanyHoliday => 0.0,
    }
}
