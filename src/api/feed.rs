use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use tracing::{debug, warn};

use super::{AlphaVantageFeed, ArchivedFeed, YahooFeed};
use crate::{
    error::FeedError,
    models::{FeedType, Lot, PriceSeries},
};

/// A source of daily price history.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    fn feed_type(&self) -> FeedType;

    async fn fetch(
        &self,
        reference: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, FeedError>;
}

/// Maps each feed type to the implementation that serves it.
#[derive(Default)]
pub struct FeedRegistry {
    feeds: HashMap<FeedType, Box<dyn PriceFeed>>,
}

impl FeedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Yahoo and archived files are always available, Alpha Vantage only
    /// with an API key.
    pub fn with_defaults(client: Client, data_dir: PathBuf, av_api_key: Option<String>) -> Self {
        let mut registry = Self::new()
            .with(Box::new(YahooFeed::new(client.clone())))
            .with(Box::new(ArchivedFeed::new(data_dir)));

        if let Some(api_key) = av_api_key {
            registry = registry.with(Box::new(AlphaVantageFeed::new(client, api_key)));
        }

        registry
    }

    /// Registers `feed`, replacing any feed of the same type.
    pub fn with(mut self, feed: Box<dyn PriceFeed>) -> Self {
        self.feeds.insert(feed.feed_type(), feed);
        self
    }

    /// Price history of `lot` from its purchase date to the end of its
    /// holding period. Failures and empty results are logged and come back
    /// as `None` so one lot never stops the rest of the portfolio.
    pub async fn fetch(&self, lot: &Lot, as_of: NaiveDate) -> Option<PriceSeries> {
        let start = *lot.purchase_date();
        let end = lot.holding_end(as_of);

        let result = match self.feeds.get(lot.price_feed_type()) {
            Some(feed) => feed.fetch(lot.price_feed_ref(), start, end).await,
            None => Err(FeedError::Unavailable(*lot.price_feed_type())),
        };

        match result {
            Ok(series) if series.is_empty() => {
                warn!(
                    asset_id = %lot.asset_id(),
                    reference = %lot.price_feed_ref(),
                    "No price data between {} and {}", start, end
                );
                None
            }
            Ok(series) => {
                debug!(
                    asset_id = %lot.asset_id(),
                    bars = series.len(),
                    "Fetched price history"
                );
                Some(series)
            }
            Err(err) => {
                warn!(
                    asset_id = %lot.asset_id(),
                    reference = %lot.price_feed_ref(),
                    feed = %lot.price_feed_type(),
                    "Price fetch failed: {}", err
                );
                None
            }
        }
    }
}
