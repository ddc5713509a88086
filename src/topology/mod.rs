pub mod memory;
pub mod snapshot;
pub mod traits;

pub use memory::InMemoryTopology;
pub use snapshot::{SnapshotFormat, TopologySnapshot};
pub use traits::TopologyProvider;
