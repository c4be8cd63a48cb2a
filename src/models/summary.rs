use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

pub const TOTAL_LABEL: &str = "Total";

pub const SUMMARY_COLUMNS: [&str; 10] = [
    "Asset ID",
    "Purchase date",
    "Purchase price",
    "Volume",
    "Acquisition",
    "Close",
    "Market",
    "Est Profit",
    "% Est Profit",
    "Annual Return",
];

/// One line of the summary table. `None` cells render blank.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct SummaryRow {
    asset_id: String,
    purchase_date: Option<NaiveDate>,
    purchase_price: Option<Decimal>,
    volume: Option<i64>,
    acquisition: Option<Decimal>,
    close: Option<Decimal>,
    market: Option<Decimal>,
    est_profit: Option<Decimal>,
    pct_est_profit: Option<Decimal>,
    annual_return: Option<Decimal>,
}

impl SummaryRow {
    pub fn total(acquisition: Decimal, market: Decimal, est_profit: Decimal) -> Self {
        Self::new(
            TOTAL_LABEL.to_string(),
            None,
            None,
            None,
            Some(acquisition),
            None,
            Some(market),
            Some(est_profit),
            None,
            None,
        )
    }

    pub fn is_total(&self) -> bool {
        self.asset_id == TOTAL_LABEL
    }

    /// Whether the lot had any price data behind this row.
    pub fn has_metrics(&self) -> bool {
        self.market.is_some()
    }
}

/// Latest row of every lot followed by the Total row.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct SummaryTable {
    rows: Vec<SummaryRow>,
    total: SummaryRow,
}

impl Default for SummaryTable {
    fn default() -> Self {
        Self::new(
            Vec::new(),
            SummaryRow::total(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
        )
    }
}

impl SummaryTable {
    /// Lot rows then the Total row, in display order.
    pub fn iter(&self) -> impl Iterator<Item = &SummaryRow> {
        self.rows.iter().chain(std::iter::once(&self.total))
    }

    pub fn row(&self, asset_id: &str) -> Option<&SummaryRow> {
        self.rows.iter().find(|row| row.asset_id == asset_id)
    }

    pub fn len(&self) -> usize {
        self.rows.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether some lot has no price data and so is missing from the Total.
    pub fn has_unpriced(&self) -> bool {
        self.rows.iter().any(|row| !row.has_metrics())
    }
}
