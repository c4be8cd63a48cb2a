use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

/// One daily price observation.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct PriceBar {
    date: NaiveDate,
    open: Option<Decimal>,
    high: Option<Decimal>,
    low: Option<Decimal>,
    close: Decimal,
    adj_close: Option<Decimal>,
    volume: Option<i64>,
}

/// Date-ordered price history for one reference symbol.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Sorts the bars by date. When a date repeats the last bar given wins.
    pub fn new(symbol: String, mut bars: Vec<PriceBar>) -> Self {
        bars.reverse();
        bars.sort_by_key(|bar| bar.date);
        bars.dedup_by_key(|bar| bar.date);

        Self { symbol, bars }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// Keeps bars dated within `[start, end]`.
    pub fn within(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.bars.retain(|bar| bar.date >= start && bar.date <= end);
        self
    }
}
