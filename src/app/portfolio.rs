use chrono::NaiveDate;
use derive_getters::Getters;
use rust_decimal::Decimal;
use tracing::info;

use crate::{
    api::FeedRegistry,
    app::calc::{performance_table, summarize},
    error::PortfolioError,
    models::{Lot, MenuItem, Metric, PerformanceTable, SummaryTable},
    store::{PortfolioSource, build_lots, read_records},
};

/// The lots of one portfolio source and everything derived from them.
///
/// `tables[i]` always belongs to `lots[i]`.
#[derive(Clone, Debug, Getters)]
pub struct Portfolio {
    source: String,
    as_of: NaiveDate,
    lots: Vec<Lot>,
    tables: Vec<PerformanceTable>,
    summary: SummaryTable,
}

impl Portfolio {
    /// Reads and validates the lots of `source`, then prices them.
    pub async fn load(
        source: &PortfolioSource,
        registry: &FeedRegistry,
        as_of: NaiveDate,
    ) -> Result<Self, PortfolioError> {
        let records = read_records(source.path())?;
        let lots = build_lots(records)?;

        Ok(Self::build(source.label(), lots, registry, as_of).await)
    }

    /// Fetches every lot one after the other and summarizes the result.
    pub async fn build(
        source: &str,
        lots: Vec<Lot>,
        registry: &FeedRegistry,
        as_of: NaiveDate,
    ) -> Self {
        info!(source, lots = lots.len(), %as_of, "Building portfolio");

        let mut tables = Vec::with_capacity(lots.len());
        for lot in &lots {
            let series = registry.fetch(lot, as_of).await;
            tables.push(performance_table(lot, series.as_ref(), as_of));
        }

        let summary = summarize(lots.iter().zip(tables.iter()));
        let priced = tables.iter().filter(|table| !table.is_empty()).count();
        info!(source, priced, unpriced = lots.len() - priced, "Portfolio ready");

        Self {
            source: source.to_string(),
            as_of,
            lots,
            tables,
            summary,
        }
    }

    pub fn asset_menu(&self) -> Vec<MenuItem> {
        self.lots
            .iter()
            .map(|lot| MenuItem::new(lot.asset_id().clone(), lot.asset_id().clone()))
            .collect()
    }

    pub fn asset_index(&self, asset_id: &str) -> Option<usize> {
        self.lots.iter().position(|lot| lot.asset_id() == asset_id)
    }

    pub fn lot(&self, asset_id: &str) -> Option<&Lot> {
        self.asset_index(asset_id).map(|i| &self.lots[i])
    }

    pub fn performance(&self, asset_id: &str) -> Option<&PerformanceTable> {
        self.asset_index(asset_id).map(|i| &self.tables[i])
    }

    /// Dated values of `metric` for one lot, blanks skipped.
    pub fn series(
        &self,
        asset_id: &str,
        metric: Metric,
    ) -> Result<Vec<(NaiveDate, Decimal)>, PortfolioError> {
        self.performance(asset_id)
            .map(|table| table.series(metric))
            .ok_or_else(|| PortfolioError::UnknownAsset(asset_id.to_string()))
    }

    /// Re-fetches one lot and rebuilds the summary from scratch.
    pub async fn refresh_lot(
        &mut self,
        asset_id: &str,
        registry: &FeedRegistry,
    ) -> Result<(), PortfolioError> {
        let i = self
            .asset_index(asset_id)
            .ok_or_else(|| PortfolioError::UnknownAsset(asset_id.to_string()))?;

        let lot = &self.lots[i];
        let series = registry.fetch(lot, self.as_of).await;
        self.tables[i] = performance_table(lot, series.as_ref(), self.as_of);
        self.summary = summarize(self.lots.iter().zip(self.tables.iter()));

        Ok(())
    }
}
