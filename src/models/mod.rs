pub mod asset;
pub mod lot;
pub mod metric;
pub mod performance;
pub mod price;
pub mod summary;

pub use asset::{AssetType, FeedType};
pub use lot::{Lot, Sale};
pub use metric::{MenuItem, Metric};
pub use performance::{PerformanceRow, PerformanceTable};
pub use price::{PriceBar, PriceSeries};
pub use summary::{SUMMARY_COLUMNS, SummaryRow, SummaryTable, TOTAL_LABEL};
