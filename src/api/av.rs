use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;

use super::{
    av_dto::AvDailyBarDto,
    feed::PriceFeed,
    utils::{make_request, parse_response_object},
};
use crate::{
    error::FeedError,
    models::{FeedType, PriceSeries},
};

const BASE_URL: &str = "https://www.alphavantage.co";

pub async fn get_daily_series(
    symbol: &str,
    client: &Client,
    api_key: &str,
) -> Result<PriceSeries, FeedError> {
    let params = format!(
        "function=TIME_SERIES_DAILY&symbol={}&outputsize=full&apikey={}",
        symbol, api_key
    );
    let res = make_request(client, BASE_URL, "query", &params).await?;

    for key in ["Error Message", "Note", "Information"] {
        if let Some(message) = res.get(key).and_then(|v| v.as_str()) {
            return Err(FeedError::Provider(message.to_string()));
        }
    }

    let series = res
        .get("Time Series (Daily)")
        .ok_or_else(|| FeedError::NotFound(symbol.to_string()))?;

    let days = parse_response_object::<BTreeMap<String, AvDailyBarDto>>(
        series.clone(),
        &format!("No results for symbol {}", symbol),
    )?;

    let bars = days
        .iter()
        .map(|(date, bar)| bar.to_price_bar(date))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PriceSeries::new(symbol.to_string(), bars))
}

pub struct AlphaVantageFeed {
    client: Client,
    api_key: String,
}

impl AlphaVantageFeed {
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }
}

#[async_trait]
impl PriceFeed for AlphaVantageFeed {
    fn feed_type(&self) -> FeedType {
        FeedType::AlphaVantage
    }

    async fn fetch(
        &self,
        reference: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, FeedError> {
        let series = get_daily_series(reference, &self.client, &self.api_key).await?;
        Ok(series.within(start, end))
    }
}
