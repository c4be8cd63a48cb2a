use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use csv::Reader;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::feed::PriceFeed;
use crate::{
    error::FeedError,
    models::{FeedType, PriceBar, PriceSeries},
};

#[derive(Debug, Deserialize)]
struct ArchivedBarDto {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Open", default)]
    open: Option<Decimal>,
    #[serde(rename = "High", default)]
    high: Option<Decimal>,
    #[serde(rename = "Low", default)]
    low: Option<Decimal>,
    #[serde(rename = "Close")]
    close: Decimal,
    #[serde(rename = "Adj Close", default)]
    adj_close: Option<Decimal>,
    #[serde(rename = "Volume", default)]
    volume: Option<i64>,
}

impl ArchivedBarDto {
    fn to_price_bar(&self) -> PriceBar {
        PriceBar::new(
            self.date,
            self.open,
            self.high,
            self.low,
            self.close,
            self.adj_close,
            self.volume,
        )
    }
}

/// Price history kept in CSV files, e.g. appraisals of real property or
/// exported quote archives. Relative references resolve against `root`.
pub struct ArchivedFeed {
    root: PathBuf,
}

impl ArchivedFeed {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn resolve(&self, reference: &str) -> PathBuf {
        let path = Path::new(reference);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn read_series(&self, reference: &str) -> Result<PriceSeries, FeedError> {
        let path = self.resolve(reference);
        let archive_error = |source| FeedError::Archive {
            path: path.clone(),
            source,
        };

        let mut reader = Reader::from_path(&path).map_err(archive_error)?;
        let mut bars = Vec::new();
        for record in reader.deserialize::<ArchivedBarDto>() {
            bars.push(record.map_err(archive_error)?.to_price_bar());
        }

        Ok(PriceSeries::new(reference.to_string(), bars))
    }
}

#[async_trait]
impl PriceFeed for ArchivedFeed {
    fn feed_type(&self) -> FeedType {
        FeedType::Archived
    }

    async fn fetch(
        &self,
        reference: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, FeedError> {
        Ok(self.read_series(reference)?.within(start, end))
    }
}
