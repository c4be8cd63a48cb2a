use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Category of an owned asset.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, EnumIter, EnumString, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum AssetType {
    Common,
    Preferred,
    Real,
}

impl AssetType {
    /// Feeds a category may be priced from. Listed securities can use any
    /// quote source, real property only has archived valuations.
    pub fn accepts_feed(&self, feed: &FeedType) -> bool {
        match self {
            AssetType::Common | AssetType::Preferred => true,
            AssetType::Real => *feed == FeedType::Archived,
        }
    }
}

/// Source a lot's reference price is read from.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, EnumIter, EnumString, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum FeedType {
    Yahoo,
    AlphaVantage,
    Archived,
}
