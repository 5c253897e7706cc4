//! Forced wipe schedule: the first Thursday of every month.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// First day of the month containing `date`.
fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// First day of the month after the one containing `date`.
fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    // 31 days past the 1st always lands inside the following month
    first_of_month(first_of_month(date) + Days::new(31))
}

/// First Thursday of the month containing `date`.
pub fn first_thursday(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    let weekday = first.weekday().num_days_from_monday();
    let thursday = Weekday::Thu.num_days_from_monday();
    first + Days::new(u64::from((thursday + 7 - weekday) % 7))
}

/// The next wipe day as seen from `today`.
///
/// Returns `today` when it is this month's first Thursday, otherwise the
/// first Thursday of the following month.
pub fn next_wipe_date(today: NaiveDate) -> NaiveDate {
    let this_month = first_thursday(today);
    if today == this_month {
        this_month
    } else {
        first_thursday(first_of_next_month(today))
    }
}
