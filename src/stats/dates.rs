use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use crate::foundation::error::{PhotopostError, PhotopostResult};

/// Inclusive calendar date range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn month(year: i32, month: u32) -> PhotopostResult<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| PhotopostError::date_range(format!("invalid month {year}-{month}")))?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let end = next
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| PhotopostError::date_range(format!("month {year}-{month} has no end")))?;
        Ok(Self { start, end })
    }

    pub fn year(year: i32) -> PhotopostResult<Self> {
        match (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        ) {
            (Some(start), Some(end)) => Ok(Self { start, end }),
            _ => Err(PhotopostError::date_range(format!("invalid year {year}"))),
        }
    }
}

const MONTHS_RU: [&str; 12] = [
    "ЯНВАРЬ", "ФЕВРАЛЬ", "МАРТ", "АПРЕЛЬ", "МАЙ", "ИЮНЬ", "ИЮЛЬ", "АВГУСТ", "СЕНТЯБРЬ", "ОКТЯБРЬ",
    "НОЯБРЬ", "ДЕКАБРЬ",
];

const MONTHS_EN: [&str; 12] = [
    "JANUARY",
    "FEBRUARY",
    "MARCH",
    "APRIL",
    "MAY",
    "JUNE",
    "JULY",
    "AUGUST",
    "SEPTEMBER",
    "OCTOBER",
    "NOVEMBER",
    "DECEMBER",
];

fn month_number(token: &str) -> Option<u32> {
    MONTHS_RU
        .iter()
        .position(|m| *m == token)
        .or_else(|| MONTHS_EN.iter().position(|m| *m == token))
        .map(|i| i as u32 + 1)
}

/// Four-digit year after 2000, with an optional Russian `Г` ("год") suffix.
fn year_number(token: &str) -> Option<i32> {
    let token = token.strip_suffix('Г').unwrap_or(token);
    if token.len() != 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse::<i32>().ok().filter(|y| *y > 2000)
}

/// Resolve the period a stats caption asks for.
///
/// A month name selects that whole month (in the named year, else `today`'s year); a year alone
/// selects the whole year; a caption naming neither selects `today`'s month. A blank caption is
/// rejected. When several tokens of one kind appear, the last one wins.
pub fn parse_caption_date_range(caption: &str, today: NaiveDate) -> PhotopostResult<DateRange> {
    if caption.trim().is_empty() {
        return Err(PhotopostError::date_range("caption is blank"));
    }

    let mut month = None;
    let mut year = None;
    for raw in caption.split_whitespace() {
        let token = raw
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_uppercase();
        if let Some(m) = month_number(&token) {
            month = Some(m);
        } else if let Some(y) = year_number(&token) {
            year = Some(y);
        }
    }

    let range = match (month, year) {
        (Some(m), y) => DateRange::month(y.unwrap_or(today.year()), m)?,
        (None, Some(y)) => DateRange::year(y)?,
        (None, None) => DateRange::month(today.year(), today.month())?,
    };
    tracing::debug!(start = %range.start, end = %range.end, "caption date range");
    Ok(range)
}

/// [`parse_caption_date_range`] against the local calendar date.
pub fn parse_caption_date_range_now(caption: &str) -> PhotopostResult<DateRange> {
    parse_caption_date_range(caption, Local::now().date_naive())
}

#[cfg(test)]
#[path = "../../tests/unit/stats/dates.rs"]
mod tests;
