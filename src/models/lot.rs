use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

use super::{AssetType, FeedType};

/// Terms of a closed position.
#[derive(Clone, Copy, Debug, Eq, Getters, PartialEq, new)]
pub struct Sale {
    date: NaiveDate,
    price: Decimal,
}

/// One owned position in an asset with its own purchase terms.
///
/// Lots are built from validated records (see [`crate::store::LotRecord`])
/// and never change for the lifetime of a portfolio.
#[derive(Clone, Debug, Getters, new)]
pub struct Lot {
    asset_id: String,
    asset_type: AssetType,
    purchase_date: NaiveDate,
    purchase_price: Decimal,
    sale: Option<Sale>,
    volume: i64,
    percent_ownership: Decimal,
    price_feed_type: FeedType,
    price_feed_ref: String,
}

impl Lot {
    /// Cost basis: purchase price × volume × ownership share.
    pub fn acquisition_value(&self) -> Decimal {
        self.purchase_price * self.share()
    }

    /// Value of the owned share at the given unit price.
    pub fn value_at(&self, price: Decimal) -> Decimal {
        price * self.share()
    }

    /// Last date the position tracks the market.
    pub fn holding_end(&self, as_of: NaiveDate) -> NaiveDate {
        match self.sale {
            Some(sale) => sale.date.min(as_of),
            None => as_of,
        }
    }

    /// The sale, if it had happened by `as_of`.
    pub fn sale_by(&self, as_of: NaiveDate) -> Option<&Sale> {
        self.sale.as_ref().filter(|sale| sale.date <= as_of)
    }

    pub fn is_sold(&self) -> bool {
        self.sale.is_some()
    }

    fn share(&self) -> Decimal {
        Decimal::from(self.volume) * self.percent_ownership
    }
}

impl PartialEq for Lot {
    fn eq(&self, other: &Self) -> bool {
        self.asset_id == other.asset_id
    }
}

impl Eq for Lot {}

impl Hash for Lot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.asset_id.hash(state);
    }
}
