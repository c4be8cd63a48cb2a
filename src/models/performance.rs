use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

use super::Metric;

/// Derived metrics of one lot on one date.
///
/// `pct_est_profit` is a ratio (3.5 means +350%) and is `None` when the
/// acquisition value is zero. `realized` marks the row priced at the sale
/// price instead of the market close.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct PerformanceRow {
    date: NaiveDate,
    acquisition: Decimal,
    close: Decimal,
    market: Decimal,
    est_profit: Decimal,
    pct_est_profit: Option<Decimal>,
    realized: bool,
}

impl PerformanceRow {
    pub fn value(&self, metric: Metric) -> Option<Decimal> {
        match metric {
            Metric::Acquisition => Some(self.acquisition),
            Metric::Close => Some(self.close),
            Metric::Market => Some(self.market),
            Metric::EstProfit => Some(self.est_profit),
            Metric::PctEstProfit => self.pct_est_profit,
        }
    }
}

/// Date-ordered performance rows of one lot.
#[derive(Clone, Debug, Default, Eq, Getters, PartialEq, new)]
pub struct PerformanceTable {
    asset_id: String,
    rows: Vec<PerformanceRow>,
}

impl PerformanceTable {
    pub fn empty(asset_id: &str) -> Self {
        Self::new(asset_id.to_string(), Vec::new())
    }

    pub fn latest(&self) -> Option<&PerformanceRow> {
        self.rows.last()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn series(&self, metric: Metric) -> Vec<(NaiveDate, Decimal)> {
        self.rows
            .iter()
            .filter_map(|row| row.value(metric).map(|value| (row.date, value)))
            .collect()
    }
}
