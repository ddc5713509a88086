use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Result, TopologyError};
use crate::topology::memory::InMemoryTopology;
use crate::types::{ComponentCategory, ComponentInstance, ComponentKind, LifecycleState, StackId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Yaml,
    Json,
    Toml,
}

impl SnapshotFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "yaml" | "yml" => Ok(SnapshotFormat::Yaml),
            "json" => Ok(SnapshotFormat::Json),
            "toml" => Ok(SnapshotFormat::Toml),
            _ => Err(TopologyError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Serialized form of a whole topology: stack metadata plus clusters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopologySnapshot {
    #[serde(default)]
    pub stacks: Vec<StackSnapshot>,
    #[serde(default)]
    pub clusters: Vec<ClusterSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackSnapshot {
    pub name: String,
    pub version: String,
    /// service name -> component name -> category
    #[serde(default)]
    pub services: BTreeMap<String, BTreeMap<String, ComponentCategory>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    pub name: String,
    #[serde(default)]
    pub services: Vec<ServiceSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSnapshot {
    pub name: String,
    /// `NAME-VERSION`
    pub stack: String,
    #[serde(default)]
    pub components: Vec<HostComponentSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostComponentSnapshot {
    pub component: ComponentKind,
    pub host: String,
    pub state: LifecycleState,
}

impl TopologySnapshot {
    pub fn parse(content: &str, format: SnapshotFormat) -> Result<Self> {
        let snapshot: TopologySnapshot = match format {
            SnapshotFormat::Yaml => serde_yaml::from_str(content)?,
            SnapshotFormat::Json => serde_json::from_str(content)?,
            SnapshotFormat::Toml => toml::from_str(content)?,
        };
        Ok(snapshot)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = SnapshotFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    pub fn into_topology(self) -> Result<InMemoryTopology> {
        let topology = InMemoryTopology::new();

        for stack in self.stacks {
            let stack_id = StackId::new(stack.name, stack.version);
            topology.register_stack(stack_id.clone())?;
            for (service, components) in stack.services {
                for (component, category) in components {
                    topology.register_component(
                        &stack_id,
                        &service,
                        ComponentKind::from_name(&component),
                        category,
                    )?;
                }
            }
        }

        for cluster in self.clusters {
            topology.add_cluster(&cluster.name)?;
            for service in cluster.services {
                let stack: StackId = service.stack.parse().map_err(|e: String| {
                    TopologyError::InvalidSnapshot(format!(
                        "service {} in cluster {}: {}",
                        service.name, cluster.name, e
                    ))
                })?;
                topology.add_service(&cluster.name, &service.name, stack)?;

                for hc in service.components {
                    topology.add_host_component(
                        &cluster.name,
                        ComponentInstance::new(&service.name, hc.component, hc.host, hc.state),
                    )?;
                }
            }
        }

        Ok(topology)
    }
}

impl InMemoryTopology {
    pub fn from_snapshot_file(path: impl AsRef<Path>) -> Result<Self> {
        TopologySnapshot::from_path(path)?.into_topology()
    }
}
