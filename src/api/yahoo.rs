use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use reqwest::Client;

use super::{
    feed::PriceFeed,
    utils::{make_request, parse_response_object, unix_timestamp},
    yahoo_dto::YahooChartDto,
};
use crate::{
    error::FeedError,
    models::{FeedType, PriceSeries},
};

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

pub async fn get_history(
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
    client: &Client,
) -> Result<PriceSeries, FeedError> {
    // period2 is exclusive
    let until = end.checked_add_days(Days::new(1)).unwrap_or(end);
    let params = format!(
        "period1={}&period2={}&interval=1d&events=history",
        unix_timestamp(start),
        unix_timestamp(until)
    );
    let res = make_request(client, BASE_URL, symbol, &params).await?;

    let chart = parse_response_object::<YahooChartDto>(
        res,
        &format!("Failed to parse Yahoo chart for {}", symbol),
    )?;

    if let Some(err) = chart.chart().error() {
        return Err(FeedError::Provider(format!(
            "{}: {}",
            err.code(),
            err.description()
        )));
    }

    let result = chart
        .chart()
        .result()
        .as_ref()
        .and_then(|results| results.first())
        .ok_or_else(|| FeedError::NotFound(symbol.to_string()))?;

    Ok(result.to_price_series().within(start, end))
}

pub struct YahooFeed {
    client: Client,
}

impl YahooFeed {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PriceFeed for YahooFeed {
    fn feed_type(&self) -> FeedType {
        FeedType::Yahoo
    }

    async fn fetch(
        &self,
        reference: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, FeedError> {
        get_history(reference, start, end, &self.client).await
    }
}
