use chrono::NaiveDate;
use tracing::warn;

use crate::{
    api::FeedRegistry,
    app::Portfolio,
    error::{ConfigurationError, PortfolioError},
    models::MenuItem,
    store::SourceCatalog,
};

/// What one user is looking at: the selected source and its portfolio.
///
/// Selecting a source builds a fresh [`Portfolio`] and swaps it in only once
/// it is complete. A failed load leaves the previous portfolio in place and
/// records the error.
pub struct Session {
    catalog: SourceCatalog,
    registry: FeedRegistry,
    as_of: NaiveDate,
    portfolio: Option<Portfolio>,
    last_error: Option<String>,
}

impl Session {
    pub fn new(catalog: SourceCatalog, registry: FeedRegistry, as_of: NaiveDate) -> Self {
        Self {
            catalog,
            registry,
            as_of,
            portfolio: None,
            last_error: None,
        }
    }

    pub fn catalog(&self) -> &SourceCatalog {
        &self.catalog
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn portfolio(&self) -> Option<&Portfolio> {
        self.portfolio.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn source_menu(&self) -> Vec<MenuItem> {
        self.catalog.menu()
    }

    /// Label of the loaded source.
    pub fn current_source(&self) -> Option<&str> {
        self.portfolio.as_ref().map(|p| p.source().as_str())
    }

    pub async fn select(&mut self, label: &str) -> Result<(), PortfolioError> {
        let result = match self.catalog.get(label) {
            Some(source) => Portfolio::load(source, &self.registry, self.as_of).await,
            None => Err(ConfigurationError::UnknownSource(label.to_string()).into()),
        };

        match result {
            Ok(portfolio) => {
                self.portfolio = Some(portfolio);
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                warn!(source = label, "Portfolio load failed: {}", err);
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Rebuilds the current source, or loads the first one if none is loaded.
    pub async fn reload(&mut self) -> Result<(), PortfolioError> {
        let label = match self.current_source() {
            Some(label) => label.to_string(),
            None => match self.catalog.first() {
                Some(source) => source.label().clone(),
                None => return Ok(()),
            },
        };

        self.select(&label).await
    }

    pub async fn refresh_lot(&mut self, asset_id: &str) -> Result<(), PortfolioError> {
        match self.portfolio.as_mut() {
            Some(portfolio) => portfolio.refresh_lot(asset_id, &self.registry).await,
            None => Err(PortfolioError::UnknownAsset(asset_id.to_string())),
        }
    }

    /// Label of the source `step` places away from the current one, wrapping.
    pub fn neighbour_source(&self, step: isize) -> Option<String> {
        let labels = self.catalog.labels();
        if labels.is_empty() {
            return None;
        }

        let current = self
            .current_source()
            .and_then(|label| self.catalog.position(label))
            .unwrap_or(0) as isize;
        let len = labels.len() as isize;
        let next = (current + step).rem_euclid(len) as usize;

        Some(labels[next].to_string())
    }
}
