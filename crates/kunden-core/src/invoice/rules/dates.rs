//! Date conversion helpers for invoice and job dates.

use chrono::{Datelike, NaiveDate};

/// Reorder a captured German date (day, month, year) to ISO "YYYY-MM-DD".
///
/// Purely positional: day and month are zero-padded, not validated against
/// the calendar. The preview is operator-reviewed before anything is saved.
pub fn german_date_to_iso(day: &str, month: &str, year: &str) -> String {
    format!("{}-{:0>2}-{:0>2}", year, month, day)
}

/// Parse a date string in either store format, ISO "YYYY-MM-DD" or German
/// "DD.MM.YYYY" / "DD.MM.YY" (two-digit years are 2000-based).
pub fn parse_date_flexible(s: &str) -> Option<NaiveDate> {
    if s.contains('-') {
        let mut parts = s.splitn(3, '-');
        let y: i32 = parts.next()?.parse().ok()?;
        let m: u32 = parts.next()?.parse().ok()?;
        let d: u32 = parts.next()?.parse().ok()?;
        return NaiveDate::from_ymd_opt(y, m, d);
    }

    if s.contains('.') {
        let mut parts = s.splitn(3, '.');
        let d: u32 = parts.next()?.parse().ok()?;
        let m: u32 = parts.next()?.parse().ok()?;
        let mut y: i32 = parts.next()?.parse().ok()?;
        if y < 100 {
            y += 2000;
        }
        return NaiveDate::from_ymd_opt(y, m, d);
    }

    None
}

/// Year of a job date string, for the year filter in listings.
pub fn year_of(s: &str) -> Option<i32> {
    parse_date_flexible(s).map(|d| d.year())
}

/// Format a date in German short style ("dd.mm.yy").
pub fn format_date_german(date: NaiveDate) -> String {
    date.format("%d.%m.%y").to_string()
}
