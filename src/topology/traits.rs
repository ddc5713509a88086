use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ComponentInstance, ComponentKind, ComponentRole, ServiceHandle, ServiceId, StackId};

/// Source of cluster topology and stack metadata.
///
/// Implementations must hand out one consistent snapshot per call; the
/// aggregator does no locking of its own.
#[async_trait]
pub trait TopologyProvider: Send + Sync {
    /// `Ok(None)` when the cluster or the service does not exist.
    async fn resolve_service(&self, id: &ServiceId) -> Result<Option<ServiceHandle>>;

    /// Every host-component record of the service. Order is provider-defined.
    async fn list_component_instances(&self, handle: &ServiceHandle) -> Result<Vec<ComponentInstance>>;

    /// Stack metadata for a component of `service`.
    ///
    /// `Ok(None)` means the stack has no such component; an `Err` means the
    /// metadata itself could not be consulted.
    async fn describe_component_role(
        &self,
        stack: &StackId,
        service: &str,
        component: &ComponentKind,
    ) -> Result<Option<ComponentRole>>;

    async fn list_services(&self, cluster: &str) -> Result<Vec<ServiceId>>;
}
