mod catalog;
mod portfolio;
mod record;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    api::PriceFeed,
    error::FeedError,
    models::{AssetType, FeedType, Lot, PriceBar, PriceSeries, Sale},
};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Valuation date later than every fixture price.
pub fn as_of() -> NaiveDate {
    date("2024-12-31")
}

pub fn bar(day: &str, close: Decimal) -> PriceBar {
    PriceBar::new(date(day), None, None, None, close, None, None)
}

pub fn series(symbol: &str, closes: &[(&str, Decimal)]) -> PriceSeries {
    PriceSeries::new(
        symbol.to_string(),
        closes.iter().map(|(day, close)| bar(day, *close)).collect(),
    )
}

pub fn lot(asset_id: &str, purchase_date: &str, price: Decimal, volume: i64) -> Lot {
    Lot::new(
        asset_id.to_string(),
        AssetType::Common,
        date(purchase_date),
        price,
        None,
        volume,
        Decimal::ONE,
        FeedType::Yahoo,
        asset_id.to_string(),
    )
}

pub fn sold_lot(
    asset_id: &str,
    purchase_date: &str,
    price: Decimal,
    volume: i64,
    sale_date: &str,
    sale_price: Decimal,
) -> Lot {
    Lot::new(
        asset_id.to_string(),
        AssetType::Common,
        date(purchase_date),
        price,
        Some(Sale::new(date(sale_date), sale_price)),
        volume,
        Decimal::ONE,
        FeedType::Yahoo,
        asset_id.to_string(),
    )
}

/// Serves fixed series by reference; unknown references fail like a
/// missing ticker would.
pub struct StaticFeed {
    feed_type: FeedType,
    series: HashMap<String, PriceSeries>,
}

impl StaticFeed {
    pub fn new(feed_type: FeedType) -> Self {
        Self {
            feed_type,
            series: HashMap::new(),
        }
    }

    pub fn with(mut self, reference: &str, series: PriceSeries) -> Self {
        self.series.insert(reference.to_string(), series);
        self
    }
}

#[async_trait]
impl PriceFeed for StaticFeed {
    fn feed_type(&self) -> FeedType {
        self.feed_type
    }

    async fn fetch(
        &self,
        reference: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, FeedError> {
        self.series
            .get(reference)
            .cloned()
            .map(|series| series.within(start, end))
            .ok_or_else(|| FeedError::NotFound(reference.to_string()))
    }
}
