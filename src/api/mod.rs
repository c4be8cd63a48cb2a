pub mod archive;
pub mod av;
pub mod av_dto;
pub mod feed;
pub mod utils;
pub mod yahoo;
pub mod yahoo_dto;

pub use archive::ArchivedFeed;
pub use av::AlphaVantageFeed;
pub use feed::{FeedRegistry, PriceFeed};
pub use yahoo::YahooFeed;
