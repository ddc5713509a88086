pub mod aggregator;
pub mod tally;

pub use aggregator::{ServiceHealthAggregator, ServiceStateCalculator};
pub use tally::AggregationTally;
