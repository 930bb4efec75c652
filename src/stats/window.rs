//! Trailing calendar-month selection over the scored series.

use chrono::{Months, NaiveDate};

use crate::domain::ScoredPoint;
use crate::error::AppError;

/// `max_date` minus `months` calendar months.
///
/// Calendar-month arithmetic, not a fixed-day approximation: the offset lands
/// on the same day-of-month in the target month, clamped to the month's last
/// day when that day does not exist (e.g. Mar 31 − 1 month = Feb 29 in a
/// leap year).
pub fn cutoff_date(max_date: NaiveDate, months: u32) -> NaiveDate {
    max_date
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

/// Keep only points dated within `months` calendar months of the most recent
/// point (cutoff inclusive).
///
/// Terminal when nothing remains: the renderer collaborator is never invoked
/// with an empty series.
pub fn clip_recent(
    points: Vec<ScoredPoint>,
    months: u32,
) -> Result<Vec<ScoredPoint>, AppError> {
    let Some(max_date) = points.iter().map(|p| p.date).max() else {
        return Err(AppError::empty("Series is empty; nothing to render."));
    };

    let cutoff = cutoff_date(max_date, months);
    let recent: Vec<ScoredPoint> = points.into_iter().filter(|p| p.date >= cutoff).collect();

    if recent.is_empty() {
        return Err(AppError::empty(format!(
            "No rows fall within the trailing {months} months; nothing to render."
        )));
    }
    Ok(recent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn point(date: NaiveDate) -> ScoredPoint {
        ScoredPoint {
            date,
            z_long: Some(0.5),
            z_short: Some(-0.5),
        }
    }

    #[test]
    fn fourteen_months_back_lands_on_the_same_day() {
        assert_eq!(cutoff_date(d(2024, 3, 15), 14), d(2023, 1, 15));
    }

    #[test]
    fn day_of_month_is_clamped_when_absent() {
        assert_eq!(cutoff_date(d(2024, 3, 31), 1), d(2024, 2, 29));
        assert_eq!(cutoff_date(d(2023, 3, 31), 1), d(2023, 2, 28));
    }

    #[test]
    fn cutoff_is_inclusive_and_the_day_before_is_excluded() {
        let points = vec![
            point(d(2023, 1, 14)),
            point(d(2023, 1, 15)),
            point(d(2024, 3, 15)),
        ];

        let recent = clip_recent(points, 14).unwrap();
        let dates: Vec<NaiveDate> = recent.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![d(2023, 1, 15), d(2024, 3, 15)]);
    }

    #[test]
    fn empty_input_is_a_terminal_condition() {
        let err = clip_recent(Vec::new(), 14).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
