use chrono::{Local, NaiveDate};

pub const NO_DUE_DATE: &str = "No due date";

const KEY_FORMAT: &str = "%Y-%m-%d";

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn today_key() -> String {
    date_key(today())
}

pub fn date_key(date: NaiveDate) -> String {
    date.format(KEY_FORMAT).to_string()
}

/// Accepts canonical keys only, so every lookup agrees on what a day key is.
pub fn parse_key(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, KEY_FORMAT)
        .ok()
        .filter(|date| date_key(*date) == value)
}

/// Short display form such as "Jan 5". Unparsable input is returned as-is.
pub fn format_for_display(value: Option<&str>) -> String {
    let Some(raw) = value else {
        return NO_DUE_DATE.to_string();
    };
    match parse_key(raw) {
        Some(date) => date.format("%b %-d").to_string(),
        None => raw.to_string(),
    }
}

/// Signed whole-day count from `from` to `to`. Calendar dates carry no
/// time-of-day, so daylight-saving shifts cannot skew the result.
pub fn days_between(from: &str, to: &str) -> Option<i64> {
    let from = parse_key(from)?;
    let to = parse_key(to)?;
    Some((to - from).num_days())
}

pub fn is_same_day(a: &str, b: &str) -> bool {
    a == b
}
