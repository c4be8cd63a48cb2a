use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::ConfigurationError,
    models::{AssetType, FeedType, Lot, Sale},
};

/// Persisted form of a lot.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LotRecord {
    #[serde(rename = "assetID")]
    pub asset_id: String,
    pub asset_type: String,
    pub purchase_date: String,
    pub purchase_price: Decimal,
    pub volume: i64,
    #[serde(default)]
    pub sale_date: Option<String>,
    #[serde(default)]
    pub sale_price: Option<Decimal>,
    pub price_feed_type: String,
    pub price_feed_ref: String,
    // reserved
    #[serde(default)]
    pub debt_feed_type: Option<String>,
    #[serde(default)]
    pub debt_feed_ref: Option<String>,
    pub percent_ownership: Decimal,
    // reserved
    #[serde(default)]
    pub thresholds: Vec<Value>,
}

/// Document table keyed by id, `{"_default": {"1": {...}, "2": {...}}}`.
type DocumentTables = BTreeMap<String, BTreeMap<String, LotRecord>>;

/// Documents of every table, ordered by numeric id.
fn table_records(tables: DocumentTables) -> Vec<LotRecord> {
    let mut documents: Vec<(u64, String, LotRecord)> = tables
        .into_values()
        .flat_map(|table| table.into_iter())
        .map(|(id, record)| (id.parse::<u64>().unwrap_or(u64::MAX), id, record))
        .collect();
    documents.sort_by(|a, b| (a.0, &a.1).cmp(&(b.0, &b.1)));
    documents.into_iter().map(|(_, _, record)| record).collect()
}

pub fn read_records(path: &Path) -> Result<Vec<LotRecord>, ConfigurationError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_records(&text).map_err(|source| ConfigurationError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Accepts a plain list of records or a document table. The layout is
/// picked from the outer JSON shape so field errors keep their position.
pub fn parse_records(text: &str) -> Result<Vec<LotRecord>, serde_json::Error> {
    if text.trim_start().starts_with('[') {
        serde_json::from_str::<Vec<LotRecord>>(text)
    } else {
        serde_json::from_str::<DocumentTables>(text).map(table_records)
    }
}

/// Validates every record and rejects duplicate asset ids.
pub fn build_lots(records: Vec<LotRecord>) -> Result<Vec<Lot>, ConfigurationError> {
    let mut seen = HashSet::new();
    let mut lots = Vec::with_capacity(records.len());

    for record in records {
        let lot = record.into_lot()?;
        if !seen.insert(lot.asset_id().clone()) {
            return Err(ConfigurationError::DuplicateAsset(lot.asset_id().clone()));
        }
        lots.push(lot);
    }

    Ok(lots)
}

impl LotRecord {
    pub fn into_lot(self) -> Result<Lot, ConfigurationError> {
        let id = self.asset_id.trim().to_string();
        if id.is_empty() {
            return Err(ConfigurationError::invalid_lot(&self.asset_id, "empty asset id"));
        }

        let asset_type = AssetType::from_str(&self.asset_type).map_err(|_| {
            ConfigurationError::invalid_lot(
                &id,
                format!("unknown asset type '{}'", self.asset_type),
            )
        })?;
        let feed_type = FeedType::from_str(&self.price_feed_type).map_err(|_| {
            ConfigurationError::invalid_lot(
                &id,
                format!("unknown price feed type '{}'", self.price_feed_type),
            )
        })?;
        if !asset_type.accepts_feed(&feed_type) {
            return Err(ConfigurationError::invalid_lot(
                &id,
                format!("{} assets cannot be priced from a {} feed", asset_type, feed_type),
            ));
        }
        if self.price_feed_ref.trim().is_empty() {
            return Err(ConfigurationError::invalid_lot(&id, "empty price feed reference"));
        }

        let purchase_date = parse_date(&id, "purchase date", &self.purchase_date)?;
        if self.purchase_price < Decimal::ZERO {
            return Err(ConfigurationError::invalid_lot(
                &id,
                format!("negative purchase price {}", self.purchase_price),
            ));
        }
        if self.volume <= 0 {
            return Err(ConfigurationError::invalid_lot(
                &id,
                format!("volume must be positive, got {}", self.volume),
            ));
        }
        if self.percent_ownership <= Decimal::ZERO || self.percent_ownership > Decimal::ONE {
            return Err(ConfigurationError::invalid_lot(
                &id,
                format!(
                    "ownership must be within (0, 1], got {}",
                    self.percent_ownership
                ),
            ));
        }

        let sale = match (&self.sale_date, self.sale_price) {
            (None, None) => None,
            (Some(date), Some(price)) => {
                let date = parse_date(&id, "sale date", date)?;
                if date < purchase_date {
                    return Err(ConfigurationError::invalid_lot(
                        &id,
                        format!("sold on {} before purchase on {}", date, purchase_date),
                    ));
                }
                if price < Decimal::ZERO {
                    return Err(ConfigurationError::invalid_lot(
                        &id,
                        format!("negative sale price {}", price),
                    ));
                }
                Some(Sale::new(date, price))
            }
            _ => {
                return Err(ConfigurationError::invalid_lot(
                    &id,
                    "sale date and sale price must be given together",
                ));
            }
        };

        Ok(Lot::new(
            id,
            asset_type,
            purchase_date,
            self.purchase_price,
            sale,
            self.volume,
            self.percent_ownership,
            feed_type,
            self.price_feed_ref.trim().to_string(),
        ))
    }
}

fn parse_date(asset_id: &str, field_name: &str, field: &str) -> Result<NaiveDate, ConfigurationError> {
    NaiveDate::parse_from_str(field, "%Y-%m-%d").map_err(|_| {
        ConfigurationError::invalid_lot(
            asset_id,
            format!("failed to parse {} '{}'", field_name, field),
        )
    })
}
