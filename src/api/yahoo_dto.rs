use chrono::DateTime;
use derive_getters::Getters;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{PriceBar, PriceSeries};

#[derive(Debug, Deserialize, Getters)]
pub struct YahooChartDto {
    chart: YahooChartBodyDto,
}

#[derive(Debug, Deserialize, Getters)]
pub struct YahooChartBodyDto {
    result: Option<Vec<YahooChartResultDto>>,
    error: Option<YahooErrorDto>,
}

#[derive(Debug, Deserialize, Getters)]
pub struct YahooErrorDto {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize, Getters)]
pub struct YahooChartResultDto {
    meta: YahooMetaDto,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: YahooIndicatorsDto,
}

#[derive(Debug, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct YahooMetaDto {
    symbol: String,
    currency: Option<String>,
    exchange_name: Option<String>,
}

#[derive(Debug, Deserialize, Getters)]
pub struct YahooIndicatorsDto {
    #[serde(default)]
    quote: Vec<YahooQuoteDto>,
    #[serde(default)]
    adjclose: Vec<YahooAdjCloseDto>,
}

#[derive(Debug, Deserialize, Getters)]
pub struct YahooQuoteDto {
    #[serde(default)]
    open: Vec<Option<Decimal>>,
    #[serde(default)]
    high: Vec<Option<Decimal>>,
    #[serde(default)]
    low: Vec<Option<Decimal>>,
    #[serde(default)]
    close: Vec<Option<Decimal>>,
    #[serde(default)]
    volume: Vec<Option<i64>>,
}

#[derive(Debug, Deserialize, Getters)]
pub struct YahooAdjCloseDto {
    #[serde(default)]
    adjclose: Vec<Option<Decimal>>,
}

impl YahooChartResultDto {
    /// Zips the column arrays into bars. Sessions without a close are dropped.
    pub fn to_price_series(&self) -> PriceSeries {
        let empty_quote = YahooQuoteDto {
            open: Vec::new(),
            high: Vec::new(),
            low: Vec::new(),
            close: Vec::new(),
            volume: Vec::new(),
        };
        let quote = self.indicators.quote.first().unwrap_or(&empty_quote);
        let adjclose = self.indicators.adjclose.first().map(|a| &a.adjclose);

        let bars = self
            .timestamp
            .iter()
            .enumerate()
            .filter_map(|(i, ts)| {
                let date = DateTime::from_timestamp(*ts, 0)?.date_naive();
                let close = column(&quote.close, i)?;
                Some(PriceBar::new(
                    date,
                    column(&quote.open, i),
                    column(&quote.high, i),
                    column(&quote.low, i),
                    close,
                    adjclose.and_then(|a| column(a, i)),
                    column(&quote.volume, i),
                ))
            })
            .collect();

        PriceSeries::new(self.meta.symbol.clone(), bars)
    }
}

fn column<T: Copy>(values: &[Option<T>], i: usize) -> Option<T> {
    values.get(i).copied().flatten()
}
