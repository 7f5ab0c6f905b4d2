//! Date-range selection over ledger records
//!
//! Ranges are inclusive at both ends. The end bound covers its whole calendar
//! day, so a record stamped at 23:59 on the last day is still inside.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

/// Anything that can be placed on the calendar for range checks
pub trait RangeInstant {
    fn calendar_date(&self) -> NaiveDate;
}

impl RangeInstant for NaiveDate {
    fn calendar_date(&self) -> NaiveDate {
        *self
    }
}

impl RangeInstant for NaiveDateTime {
    fn calendar_date(&self) -> NaiveDate {
        self.date()
    }
}

impl RangeInstant for DateTime<Utc> {
    fn calendar_date(&self) -> NaiveDate {
        self.date_naive()
    }
}

/// Records whose date falls in `[start, end]`, in input order
///
/// `start > end` selects nothing.
pub fn select_in_range<'a, T, D, F>(
    records: &'a [T],
    start: NaiveDate,
    end: NaiveDate,
    date_of: F,
) -> Vec<&'a T>
where
    D: RangeInstant,
    F: Fn(&T) -> D,
{
    if start > end {
        return Vec::new();
    }

    records
        .iter()
        .filter(|record| {
            let day = date_of(record).calendar_date();
            day >= start && day <= end
        })
        .collect()
}

/// Case-insensitive substring match used for list filtering
pub fn matches_search(label: &str, term: &str) -> bool {
    label.to_lowercase().contains(&term.to_lowercase())
}

/// An inclusive calendar range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// First of the month up to and including `today`; the default report window
    pub fn month_to_date(today: NaiveDate) -> Self {
        Self::new(first_of_month(today), today)
    }

    /// The whole calendar month containing `today`
    pub fn month_of(today: NaiveDate) -> Self {
        Self::new(first_of_month(today), last_of_month(today))
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains<D: RangeInstant>(&self, instant: &D) -> bool {
        let day = instant.calendar_date();
        day >= self.start && day <= self.end
    }

    pub fn select<'a, T, D, F>(&self, records: &'a [T], date_of: F) -> Vec<&'a T>
    where
        D: RangeInstant,
        F: Fn(&T) -> D,
    {
        select_in_range(records, self.start, self.end, date_of)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%d/%m/%Y"),
            self.end.format("%d/%m/%Y")
        )
    }
}

pub fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

pub fn last_of_month(day: NaiveDate) -> NaiveDate {
    let (year, month) = if day.month() == 12 {
        (day.year() + 1, 1)
    } else {
        (day.year(), day.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(day)
}

pub fn days_in_month(day: NaiveDate) -> u32 {
    last_of_month(day).day()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_end_day_is_inclusive() {
        let stamps = vec![
            date(2025, 3, 31).and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap()),
            date(2025, 4, 1).and_time(NaiveTime::from_hms_opt(0, 0, 0).unwrap()),
            date(2025, 3, 1).and_time(NaiveTime::from_hms_opt(0, 0, 0).unwrap()),
        ];

        let selected = select_in_range(&stamps, date(2025, 3, 1), date(2025, 3, 31), |s| *s);
        assert_eq!(selected, vec![&stamps[0], &stamps[2]]);
    }

    #[test]
    fn test_utc_instants() {
        let stamps = vec![Utc.with_ymd_and_hms(2025, 3, 31, 23, 0, 0).unwrap()];
        let selected = select_in_range(&stamps, date(2025, 3, 31), date(2025, 3, 31), |s| *s);
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let days = vec![date(2025, 3, 10)];
        assert!(select_in_range(&days, date(2025, 3, 31), date(2025, 3, 1), |d| *d).is_empty());
        assert!(DateRange::new(date(2025, 3, 31), date(2025, 3, 1)).is_empty());
    }

    #[test]
    fn test_preserves_input_order() {
        let days = vec![date(2025, 3, 20), date(2025, 3, 2), date(2025, 3, 11)];
        let selected = DateRange::month_of(date(2025, 3, 5)).select(&days, |d| *d);
        assert_eq!(selected, vec![&days[0], &days[1], &days[2]]);
    }

    #[test]
    fn test_month_windows() {
        let today = date(2024, 2, 17);
        assert_eq!(DateRange::month_to_date(today), DateRange::new(date(2024, 2, 1), today));
        assert_eq!(DateRange::month_of(today).end, date(2024, 2, 29));
        assert_eq!(last_of_month(date(2025, 12, 3)), date(2025, 12, 31));
        assert_eq!(days_in_month(date(2025, 4, 30)), 30);
    }

    #[test]
    fn test_contains() {
        let range = DateRange::new(date(2025, 1, 1), date(2025, 1, 31));
        assert!(range.contains(&date(2025, 1, 31)));
        assert!(!range.contains(&date(2025, 2, 1)));
    }

    #[test]
    fn test_matches_search() {
        assert!(matches_search("Conta de Luz", "luz"));
        assert!(matches_search("anything", ""));
        assert!(!matches_search("Padaria", "mercado"));
    }
}
