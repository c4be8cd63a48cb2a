use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, prelude::ToPrimitive};

pub fn parse_date(field: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(field, "%Y-%m-%d")
        .with_context(|| format!("Failed to parse date '{}'", field))
}

/// Blank for `None`, otherwise fixed to `dp` decimals.
pub fn format_decimal(value: Option<Decimal>, dp: u32) -> String {
    match value {
        Some(value) => format!("{:.*}", dp as usize, value.round_dp(dp)),
        None => String::new(),
    }
}

/// Ratio shown as a percentage, `3.967` -> `396.70%`.
pub fn format_percent(value: Option<Decimal>) -> String {
    match value {
        Some(value) => format!("{:.2}%", (value * Decimal::ONE_HUNDRED).round_dp(2)),
        None => String::new(),
    }
}

pub fn format_date(value: Option<NaiveDate>) -> String {
    value
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub fn format_volume(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn to_chart_point(date: NaiveDate, value: Decimal) -> Option<(f64, f64)> {
    Some((date_to_x(date), value.to_f64()?))
}

pub fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}
