//! Forestry-news aggregation.
//!
//! Four ordered stages, each a fallback for the previous: parallel RSS
//! fan-out, an acceptance check on the combined article count, a
//! secondary keyword news API, and a static hand-curated set that cannot
//! fail. The endpoint built on this module never surfaces an error.

pub mod aggregate;
pub mod fallback;
pub mod feeds;
pub mod gnews;
pub mod rss;
pub mod text;

pub use aggregate::{NewsAggregator, NewsPage, MIN_RSS_ARTICLES, PER_PAGE};
pub use feeds::FeedSpec;
