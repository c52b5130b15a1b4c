//! Holiday calendars.

use chrono::{Datelike, NaiveDate};
use forecast_spi::{ForecastError, Holiday, HolidayCalendar, Result};

/// Build the calendar for an ISO country code.
pub fn holiday_calendar(country: &str) -> Result<Box<dyn HolidayCalendar>> {
    match country.trim().to_ascii_uppercase().as_str() {
        "KR" => Ok(Box::new(KoreanHolidays)),
        other => Err(ForecastError::UnsupportedCountry(other.to_string())),
    }
}

/// Fixed solar-calendar holidays: (month, day, name).
const KR_FIXED: &[(u32, u32, &str)] = &[
    (1, 1, "New Year's Day"),
    (3, 1, "Independence Movement Day"),
    (5, 5, "Children's Day"),
    (6, 6, "Memorial Day"),
    (8, 15, "Liberation Day"),
    (10, 3, "National Foundation Day"),
    (10, 9, "Hangul Day"),
    (12, 25, "Christmas Day"),
];

/// Lunisolar holidays by year: (year, Korean New Year, Buddha's Birthday, Chuseok)
/// as (month, day).
const KR_LUNAR: &[(i32, (u32, u32), (u32, u32), (u32, u32))] = &[
    (2020, (1, 25), (4, 30), (10, 1)),
    (2021, (2, 12), (5, 19), (9, 21)),
    (2022, (2, 1), (5, 8), (9, 10)),
    (2023, (1, 22), (5, 27), (9, 29)),
    (2024, (2, 10), (5, 15), (9, 17)),
    (2025, (1, 29), (5, 5), (10, 6)),
    (2026, (2, 17), (5, 24), (9, 25)),
];

/// Public holidays of the Republic of Korea.
///
/// Substitute holidays are not included.
#[derive(Debug, Clone, Copy, Default)]
pub struct KoreanHolidays;

impl KoreanHolidays {
    fn year(year: i32, out: &mut Vec<Holiday>) {
        for &(month, day, name) in KR_FIXED {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                out.push(Holiday::new(date, name));
            }
        }

        let Some(&(_, new_year, buddha, chuseok)) = KR_LUNAR.iter().find(|row| row.0 == year)
        else {
            tracing::warn!(year, "no lunisolar holiday table for year; using fixed holidays only");
            return;
        };

        if let Some(date) = NaiveDate::from_ymd_opt(year, new_year.0, new_year.1) {
            push_three_day(
                date,
                [
                    "The day preceding Korean New Year",
                    "Korean New Year",
                    "The second day of Korean New Year",
                ],
                out,
            );
        }
        if let Some(date) = NaiveDate::from_ymd_opt(year, buddha.0, buddha.1) {
            out.push(Holiday::new(date, "Buddha's Birthday"));
        }
        if let Some(date) = NaiveDate::from_ymd_opt(year, chuseok.0, chuseok.1) {
            push_three_day(
                date,
                [
                    "The day preceding Chuseok",
                    "Chuseok",
                    "The second day of Chuseok",
                ],
                out,
            );
        }
    }
}

fn push_three_day(day: NaiveDate, names: [&str; 3], out: &mut Vec<Holiday>) {
    let days = [day.pred_opt(), Some(day), day.succ_opt()];
    for (date, name) in days.into_iter().zip(names) {
        if let Some(date) = date {
            out.push(Holiday::new(date, name));
        }
    }
}

impl HolidayCalendar for KoreanHolidays {
    fn country_code(&self) -> &str {
        "KR"
    }

    fn holidays(&self, years: &[i32]) -> Vec<Holiday> {
        let mut years = years.to_vec();
        years.sort_unstable();
        years.dedup();

        let mut out = Vec::new();
        for year in years {
            Self::year(year, &mut out);
        }
        out.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));
        out
    }
}

/// Calendar years touched by the inclusive range `[first, last]`.
pub fn years_between(first: NaiveDate, last: NaiveDate) -> Vec<i32> {
    (first.year()..=last.year()).collect()
}
