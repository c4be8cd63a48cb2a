use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{error::FeedError, models::PriceBar};

#[derive(Debug, Deserialize, Getters, new)]
pub struct AvDailyBarDto {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

impl AvDailyBarDto {
    pub fn to_price_bar(&self, date: &str) -> Result<PriceBar, FeedError> {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| FeedError::Parse(format!("Alpha Vantage date '{}': {}", date, e)))?;
        let close = parse_price(&self.close, "close")?;

        Ok(PriceBar::new(
            date,
            Some(parse_price(&self.open, "open")?),
            Some(parse_price(&self.high, "high")?),
            Some(parse_price(&self.low, "low")?),
            close,
            // the free daily series carries no adjustment
            Some(close),
            self.volume.parse::<i64>().ok(),
        ))
    }
}

fn parse_price(field: &str, field_name: &str) -> Result<Decimal, FeedError> {
    field
        .parse::<Decimal>()
        .map_err(|e| FeedError::Parse(format!("Alpha Vantage {} '{}': {}", field_name, field, e)))
}
