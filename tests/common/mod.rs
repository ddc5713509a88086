#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use svcstate::error::{Result, TopologyError};
use svcstate::topology::TopologyProvider;
use svcstate::{
    ComponentCategory, ComponentInstance, ComponentKind, ComponentRole, LifecycleState,
    ServiceHandle, ServiceHealthAggregator, ServiceId, StackId,
};

pub fn hdp() -> StackId {
    StackId::new("HDP", "2.6")
}

pub fn hive() -> ServiceId {
    ServiceId::new("c1", "HIVE")
}

pub fn kind(name: &str) -> ComponentKind {
    ComponentKind::from_name(name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Resolve,
    List,
    Describe,
}

/// Provider serving a single HIVE service, with failure injection.
#[derive(Debug, Clone)]
pub struct MockTopology {
    pub resolvable: bool,
    pub failure: Option<Failure>,
    pub roles: HashMap<ComponentKind, ComponentRole>,
    pub instances: Vec<ComponentInstance>,
}

impl MockTopology {
    pub fn new() -> Self {
        let mut roles = HashMap::new();
        for k in [
            ComponentKind::Server,
            ComponentKind::Metastore,
            ComponentKind::CatalogGateway,
            ComponentKind::EmbeddedDatabase,
            kind("EXTRA_MASTER"),
        ] {
            roles.insert(k, ComponentRole::new(ComponentCategory::Master));
        }
        roles.insert(kind("HIVE_CLIENT"), ComponentRole::new(ComponentCategory::Client));
        roles.insert(kind("HCAT_WORKER"), ComponentRole::new(ComponentCategory::Slave));

        Self {
            resolvable: true,
            failure: None,
            roles,
            instances: Vec::new(),
        }
    }

    pub fn with(mut self, component: ComponentKind, state: LifecycleState) -> Self {
        let host = format!("host{}", self.instances.len());
        self.instances
            .push(ComponentInstance::new("HIVE", component, host, state));
        self
    }

    pub fn with_all(self, components: &[(ComponentKind, LifecycleState)]) -> Self {
        components
            .iter()
            .fold(self, |topology, (k, s)| topology.with(k.clone(), *s))
    }

    pub fn unresolvable(mut self) -> Self {
        self.resolvable = false;
        self
    }

    pub fn failing(mut self, failure: Failure) -> Self {
        self.failure = Some(failure);
        self
    }

    fn check(&self, failure: Failure) -> Result<()> {
        if self.failure == Some(failure) {
            return Err(TopologyError::internal(format!("injected {:?} failure", failure)));
        }
        Ok(())
    }
}

#[async_trait]
impl TopologyProvider for MockTopology {
    async fn resolve_service(&self, id: &ServiceId) -> Result<Option<ServiceHandle>> {
        self.check(Failure::Resolve)?;
        if !self.resolvable || id != &hive() {
            return Ok(None);
        }
        Ok(Some(ServiceHandle {
            id: id.clone(),
            stack: hdp(),
        }))
    }

    async fn list_component_instances(&self, _handle: &ServiceHandle) -> Result<Vec<ComponentInstance>> {
        self.check(Failure::List)?;
        Ok(self.instances.clone())
    }

    async fn describe_component_role(
        &self,
        _stack: &StackId,
        _service: &str,
        component: &ComponentKind,
    ) -> Result<Option<ComponentRole>> {
        self.check(Failure::Describe)?;
        Ok(self.roles.get(component).copied())
    }

    async fn list_services(&self, cluster: &str) -> Result<Vec<ServiceId>> {
        if cluster != "c1" {
            return Err(TopologyError::ClusterNotFound(cluster.to_string()));
        }
        Ok(vec![hive()])
    }
}

pub async fn compute(topology: MockTopology) -> LifecycleState {
    ServiceHealthAggregator::new(Arc::new(topology))
        .compute_service_state(&hive())
        .await
}

pub fn compute_blocking(topology: MockTopology) -> LifecycleState {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(compute(topology))
}
