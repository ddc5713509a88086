use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{Result, TopologyError};
use crate::topology::traits::TopologyProvider;
use crate::types::{
    ComponentCategory, ComponentInstance, ComponentKind, ComponentRole, LifecycleState,
    ServiceHandle, ServiceId, StackId,
};

type StackCatalog = HashMap<String, HashMap<ComponentKind, ComponentRole>>;

fn poisoned<T>(_: T) -> TopologyError {
    TopologyError::internal("topology lock poisoned")
}

/// Topology held entirely in memory.
///
/// Host components are returned in insertion order, so aggregation over an
/// `InMemoryTopology` is deterministic.
#[derive(Clone)]
pub struct InMemoryTopology {
    clusters: Arc<RwLock<HashMap<String, Vec<ServiceHandle>>>>,
    host_components: Arc<RwLock<HashMap<ServiceId, Vec<ComponentInstance>>>>,
    stacks: Arc<RwLock<HashMap<StackId, StackCatalog>>>,
}

impl InMemoryTopology {
    pub fn new() -> Self {
        Self {
            clusters: Arc::new(RwLock::new(HashMap::new())),
            host_components: Arc::new(RwLock::new(HashMap::new())),
            stacks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn add_cluster(&self, cluster: &str) -> Result<()> {
        let mut clusters = self.clusters.write().map_err(poisoned)?;
        clusters.entry(cluster.to_string()).or_default();
        Ok(())
    }

    /// Adds `service` to an existing cluster, replacing its stack if it was
    /// already present.
    pub fn add_service(&self, cluster: &str, service: &str, stack: StackId) -> Result<ServiceHandle> {
        let mut clusters = self.clusters.write().map_err(poisoned)?;
        let services = clusters
            .get_mut(cluster)
            .ok_or_else(|| TopologyError::ClusterNotFound(cluster.to_string()))?;

        let handle = ServiceHandle {
            id: ServiceId::new(cluster, service),
            stack,
        };

        match services.iter_mut().find(|h| h.id == handle.id) {
            Some(existing) => existing.stack = handle.stack.clone(),
            None => services.push(handle.clone()),
        }

        Ok(handle)
    }

    pub fn register_stack(&self, stack: StackId) -> Result<()> {
        let mut stacks = self.stacks.write().map_err(poisoned)?;
        stacks.entry(stack).or_default();
        Ok(())
    }

    /// Declares a component of `service` in `stack`, registering the stack on
    /// first use.
    pub fn register_component(
        &self,
        stack: &StackId,
        service: &str,
        component: ComponentKind,
        category: ComponentCategory,
    ) -> Result<()> {
        let mut stacks = self.stacks.write().map_err(poisoned)?;
        stacks
            .entry(stack.clone())
            .or_default()
            .entry(service.to_string())
            .or_default()
            .insert(component, ComponentRole::new(category));
        Ok(())
    }

    pub fn add_host_component(&self, cluster: &str, instance: ComponentInstance) -> Result<()> {
        let id = ServiceId::new(cluster, instance.service.clone());
        {
            let clusters = self.clusters.read().map_err(poisoned)?;
            let services = clusters
                .get(cluster)
                .ok_or_else(|| TopologyError::ClusterNotFound(cluster.to_string()))?;
            if !services.iter().any(|h| h.id == id) {
                return Err(TopologyError::service_not_found(cluster, instance.service.as_str()));
            }
        }

        let mut host_components = self.host_components.write().map_err(poisoned)?;
        host_components.entry(id).or_default().push(instance);
        Ok(())
    }

    /// Updates the live state of every matching record. Returns whether any
    /// record matched.
    pub fn set_live_state(
        &self,
        id: &ServiceId,
        component: &ComponentKind,
        host: &str,
        state: LifecycleState,
    ) -> Result<bool> {
        let mut host_components = self.host_components.write().map_err(poisoned)?;
        let mut matched = false;

        if let Some(instances) = host_components.get_mut(id) {
            for instance in instances
                .iter_mut()
                .filter(|i| &i.component == component && i.host == host)
            {
                instance.live_state = state;
                matched = true;
            }
        }

        Ok(matched)
    }
}

impl Default for InMemoryTopology {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TopologyProvider for InMemoryTopology {
    async fn resolve_service(&self, id: &ServiceId) -> Result<Option<ServiceHandle>> {
        let clusters = self.clusters.read().map_err(poisoned)?;
        Ok(clusters
            .get(&id.cluster)
            .and_then(|services| services.iter().find(|h| &h.id == id))
            .cloned())
    }

    async fn list_component_instances(&self, handle: &ServiceHandle) -> Result<Vec<ComponentInstance>> {
        let host_components = self.host_components.read().map_err(poisoned)?;
        Ok(host_components.get(&handle.id).cloned().unwrap_or_default())
    }

    async fn describe_component_role(
        &self,
        stack: &StackId,
        service: &str,
        component: &ComponentKind,
    ) -> Result<Option<ComponentRole>> {
        let stacks = self.stacks.read().map_err(poisoned)?;
        let catalog = stacks
            .get(stack)
            .ok_or_else(|| TopologyError::StackNotFound(stack.clone()))?;

        Ok(catalog
            .get(service)
            .and_then(|components| components.get(component))
            .copied())
    }

    async fn list_services(&self, cluster: &str) -> Result<Vec<ServiceId>> {
        let clusters = self.clusters.read().map_err(poisoned)?;
        let services = clusters
            .get(cluster)
            .ok_or_else(|| TopologyError::ClusterNotFound(cluster.to_string()))?;
        Ok(services.iter().map(|h| h.id.clone()).collect())
    }
}
