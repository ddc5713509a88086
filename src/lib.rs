pub mod api;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod topology;
pub mod types;

pub use config::Config;
pub use error::TopologyError;
pub use health::{AggregationTally, ServiceHealthAggregator, ServiceStateCalculator};
pub use topology::{InMemoryTopology, TopologyProvider};
pub use types::*;
