mod helpers;

use helpers::*;
use hrdesk::{compute_stats, DayEdit, DayType, WorkCalendar};

#[test]
fn null_calendar_yields_no_stats() {
    assert!(compute_stats(None, 2025).is_none());
}

#[test]
fn default_calendar_2025() {
    let calendar = WorkCalendar::default();
    let stats = compute_stats(Some(&calendar), 2025).unwrap();

    // 2025 has 52 Saturdays and 52 Sundays.
    assert_eq!(stats.totals.total_days, 365);
    assert_eq!(stats.totals.weekend_days, 104);
    assert_eq!(stats.totals.working_days, 261);
    assert_eq!(stats.totals.public_holidays, 0);
    assert_eq!(stats.totals.company_holidays, 0);
    assert_eq!(stats.totals.special_working_days, 0);
    assert_eq!(stats.totals.half_days, 0);
    assert_eq!(stats.totals.total_working_hours, 261.0 * 8.0);
}

#[test]
fn leap_year_attribution() {
    let calendar = WorkCalendar::default();

    let leap = compute_stats(Some(&calendar), 2024).unwrap();
    assert_eq!(leap.totals.total_days, 366);
    let february = &leap.monthly[1];
    assert_eq!(february.month, 2);
    assert_eq!(february.totals.total_days, 29);
    assert_eq!(february.totals.weekend_days, 8);
    assert_eq!(february.totals.working_days, 21);

    let common = compute_stats(Some(&calendar), 2023).unwrap();
    assert_eq!(common.totals.total_days, 365);
    assert_eq!(common.monthly[1].totals.total_days, 28);
}

#[test]
fn rollups_sum_to_year_totals() {
    let calendar = calendar_with_days(vec![
        holiday("2024-05-01", "Labour Day", DayType::PublicHoliday, true),
        holiday("2025-12-24", "Office closed", DayType::CompanyHoliday, false),
        day("2025-06-02", DayType::HalfDay),
        day("2025-03-08", DayType::SpecialWorking),
    ]);
    let stats = compute_stats(Some(&calendar), 2025).unwrap();

    let mut total_days = 0;
    let mut working_days = 0;
    let mut hours = 0.0;
    for month in &stats.monthly {
        total_days += month.totals.total_days;
        working_days += month.totals.working_days;
        hours += month.totals.total_working_hours;
    }
    assert_eq!(total_days, stats.totals.total_days);
    assert_eq!(working_days, stats.totals.working_days);
    assert_eq!(hours, stats.totals.total_working_hours);

    let quarterly_working: u32 = stats.quarterly.iter().map(|q| q.totals.working_days).sum();
    assert_eq!(quarterly_working, stats.totals.working_days);
    let quarterly_days: u32 = stats.quarterly.iter().map(|q| q.totals.total_days).sum();
    assert_eq!(quarterly_days, stats.totals.total_days);

    assert_eq!(
        stats.first_half.working_days + stats.second_half.working_days,
        stats.totals.working_days
    );
    assert_eq!(
        stats.first_half.total_working_hours + stats.second_half.total_working_hours,
        stats.totals.total_working_hours
    );

    // Quarter boundaries: Q1 = Jan..Mar.
    let q1: u32 = stats.monthly[..3].iter().map(|m| m.totals.total_days).sum();
    assert_eq!(stats.quarterly[0].totals.total_days, q1);
    assert_eq!(stats.quarterly[0].quarter, 1);
}

#[test]
fn half_day_contributes_half_day_hours_by_default() {
    // 2025-06-02 is a Monday; overriding it to half_day swaps 8h for 4h.
    let calendar = calendar_with_days(vec![day("2025-06-02", DayType::HalfDay)]);
    let stats = compute_stats(Some(&calendar), 2025).unwrap();

    // Half days still count as worked days.
    assert_eq!(stats.totals.working_days, 261);
    assert_eq!(stats.totals.half_days, 1);
    assert_eq!(stats.totals.total_working_hours, 260.0 * 8.0 + 4.0);

    let june = &stats.monthly[5];
    assert_eq!(june.totals.half_days, 1);
    assert_eq!(june.totals.working_days, 21);
}

#[test]
fn explicit_working_hours_override_the_rule_defaults() {
    // A worked Saturday with explicit hours, and a half day with explicit
    // hours: both override the rule defaults.
    let mut saturday = day("2025-03-08", DayType::SpecialWorking);
    saturday.working_hours = Some(6.0);
    let mut short_day = day("2025-06-02", DayType::HalfDay);
    short_day.working_hours = Some(3.5);
    let calendar = calendar_with_days(vec![saturday, short_day]);

    let stats = compute_stats(Some(&calendar), 2025).unwrap();
    assert_eq!(stats.totals.weekend_days, 103);
    assert_eq!(stats.totals.special_working_days, 1);
    assert_eq!(stats.totals.working_days, 262);
    assert_eq!(stats.totals.total_working_hours, 260.0 * 8.0 + 6.0 + 3.5);
}

#[test]
fn zero_working_hours_is_a_defined_override() {
    // An explicitly zero-hour working day contributes nothing, rather
    // than falling back to the 8h default.
    let zero = DayEdit {
        working_hours: Some(0.0),
        ..DayEdit::default()
    }
    .into_day(date("2025-06-02"));
    let calendar = calendar_with_days(vec![zero]);

    let stats = compute_stats(Some(&calendar), 2025).unwrap();
    assert_eq!(stats.totals.working_days, 261);
    assert_eq!(stats.totals.total_working_hours, 260.0 * 8.0);
}

#[test]
fn recurring_holiday_counts_in_every_matching_year() {
    // Stored once for 2024; 2025-09-01 (a Monday) resolves as the
    // recurring holiday and contributes no hours.
    let calendar = calendar_with_days(vec![holiday(
        "2024-09-01",
        "Constitution Day",
        DayType::PublicHoliday,
        true,
    )]);
    let stats = compute_stats(Some(&calendar), 2025).unwrap();

    assert_eq!(stats.totals.public_holidays, 1);
    assert_eq!(stats.totals.working_days, 260);
    assert_eq!(stats.totals.weekend_days, 104);
    assert_eq!(stats.totals.total_working_hours, 260.0 * 8.0);
    assert_eq!(stats.monthly[8].totals.public_holidays, 1);
}

#[test]
fn corrupt_day_keys_do_not_poison_the_year() {
    let mut calendar = WorkCalendar::default();
    calendar.days.insert(
        "not-a-date".to_string(),
        day("2025-01-01", DayType::PublicHoliday),
    );

    let clean = compute_stats(Some(&WorkCalendar::default()), 2025).unwrap();
    let stats = compute_stats(Some(&calendar), 2025).unwrap();
    assert_eq!(stats, clean);
}

#[test]
fn out_of_range_year_yields_zeroed_stats() {
    let calendar = WorkCalendar::default();
    let stats = compute_stats(Some(&calendar), 400_000).unwrap();
    assert_eq!(stats.year, 400_000);
    assert_eq!(stats.totals.total_days, 0);
    assert_eq!(stats.monthly.len(), 12);
    assert_eq!(stats.quarterly.len(), 4);
    assert_eq!(stats.first_half.working_days, 0);
}

#[test]
fn stats_are_deterministic() {
    let calendar = calendar_with_days(vec![
        holiday("2024-05-01", "Labour Day", DayType::PublicHoliday, true),
        day("2025-06-02", DayType::HalfDay),
    ]);
    let first = compute_stats(Some(&calendar), 2025).unwrap();
    let second = compute_stats(Some(&calendar), 2025).unwrap();
    assert_eq!(first, second);
}
