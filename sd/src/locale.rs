//! Indonesian display formatting
//!
//! All date, time and number formatting happens here, upstream of the
//! renderer. The renderer only ever sees pre-formatted strings.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use tracing::debug;

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Indonesian month name for a 1-based month number
pub fn month_name(month: u32) -> &'static str {
    MONTHS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or_default()
}

/// Indonesian weekday name
pub fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Senin",
        Weekday::Tue => "Selasa",
        Weekday::Wed => "Rabu",
        Weekday::Thu => "Kamis",
        Weekday::Fri => "Jumat",
        Weekday::Sat => "Sabtu",
        Weekday::Sun => "Minggu",
    }
}

/// Long-form date, e.g. `28 Januari 1989`
pub fn long_date(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), month_name(date.month()), date.year())
}

/// Weekday plus long-form date, e.g. `Sabtu, 12 Oktober 2024`
pub fn day_date(date: NaiveDate) -> String {
    format!("{}, {}", day_name(date.weekday()), long_date(date))
}

/// Clock time with the Indonesian dot separator, e.g. `19.00`
pub fn clock_time(time: NaiveTime) -> String {
    time.format("%H.%M").to_string()
}

/// A parsed point in time as stored by the records layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
}

/// Parse the date/time shapes the records layer produces.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (the written date is kept, no
/// timezone conversion), `YYYY-MM-DDTHH:MM[:SS]` and a bare `HH:MM[:SS]`.
pub fn parse_moment(raw: &str) -> Option<Moment> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(Moment {
            date: Some(date),
            time: None,
        });
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        let local = dt.naive_local();
        return Some(Moment {
            date: Some(local.date()),
            time: Some(local.time()),
        });
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Moment {
                date: Some(dt.date()),
                time: Some(dt.time()),
            });
        }
    }

    for fmt in ["%H:%M:%S", "%H:%M"] {
        if let Ok(time) = NaiveTime::parse_from_str(raw, fmt) {
            return Some(Moment {
                date: None,
                time: Some(time),
            });
        }
    }

    None
}

/// Long-form date from a stored value. Unparsable input is returned as-is.
pub fn long_date_from_str(raw: &str) -> String {
    debug!(%raw, "long_date_from_str: called");
    match parse_moment(raw) {
        Some(Moment { date: Some(date), .. }) => long_date(date),
        _ => {
            debug!(%raw, "long_date_from_str: not a date, passing through");
            raw.trim().to_string()
        }
    }
}

/// Day, date and time from a stored value, e.g.
/// `Sabtu, 12 Oktober 2024 pukul 19.00`. Unparsable input is returned as-is.
pub fn long_datetime_from_str(raw: &str) -> String {
    debug!(%raw, "long_datetime_from_str: called");
    match parse_moment(raw) {
        Some(Moment {
            date: Some(date),
            time: Some(time),
        }) => format!("{} pukul {}", day_date(date), clock_time(time)),
        Some(Moment {
            date: Some(date),
            time: None,
        }) => day_date(date),
        Some(Moment { date: None, time: Some(time) }) => clock_time(time),
        _ => {
            debug!(%raw, "long_datetime_from_str: not a moment, passing through");
            raw.trim().to_string()
        }
    }
}

/// Number with `.` thousands separators and `,` decimals, e.g. `1.500.000`.
///
/// At most two decimals are kept and trailing zeros are dropped. Non-finite
/// values format as an empty string.
pub fn group_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }

    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3 + 4);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if frac > 0 {
        let decimals = format!("{:02}", frac);
        grouped.push(',');
        grouped.push_str(decimals.trim_end_matches('0'));
    }

    if value < 0.0 && cents > 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Rupiah amount, e.g. `Rp 1.500.000`
pub fn rupiah(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    format!("Rp {}", group_number(value))
}
