//! Aggregation engine - filtering, group-by reduction and ranking.

pub mod aggregate;
pub mod filter;
pub mod frame;
pub mod rank;

pub use aggregate::{aggregate, with_ratio, EngineError, Metric, Reducer};
pub use filter::FilterSpec;
pub use rank::{bottom_n, mean, median, top_n};
