pub mod catalog;
pub mod record;

pub use catalog::{CATALOG_FILE, PortfolioSource, SourceCatalog};
pub use record::{LotRecord, build_lots, parse_records, read_records};
