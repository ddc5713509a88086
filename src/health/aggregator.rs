use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;

use crate::error::Result;
use crate::health::tally::AggregationTally;
use crate::topology::TopologyProvider;
use crate::types::{LifecycleState, ServiceId, ServiceStateReport};

/// Computes a single state for a service.
#[async_trait]
pub trait ServiceStateCalculator: Send + Sync {
    /// Never fails; `UNKNOWN` stands for "could not determine".
    async fn service_state(&self, id: &ServiceId) -> LifecycleState;
}

/// Reduces the host-component states of a service to one lifecycle state.
///
/// The service counts as `STARTED` when no primary component is outside the
/// running class, or when the server, the catalog gateway, at least one
/// metastore and (if deployed) the embedded database are all running.
/// Otherwise the state of the last non-running primary component is reported.
pub struct ServiceHealthAggregator<P: ?Sized> {
    provider: Arc<P>,
}

impl<P: TopologyProvider + ?Sized> ServiceHealthAggregator<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    pub async fn compute_service_state(&self, id: &ServiceId) -> LifecycleState {
        match self.collect_tally(id).await {
            Ok(Some(tally)) => tally.decide(),
            Ok(None) => {
                log::warn!("Can't determine service state: {} not found", id);
                LifecycleState::Unknown
            }
            Err(e) => {
                log::error!("Can't determine service state for {}: {}", id, e);
                LifecycleState::Unknown
            }
        }
    }

    pub async fn report(&self, id: &ServiceId) -> ServiceStateReport {
        let state = self.compute_service_state(id).await;
        ServiceStateReport::new(id, state)
    }

    /// Computes every service of `cluster` concurrently. Only the service
    /// listing can fail.
    pub async fn compute_cluster_states(&self, cluster: &str) -> Result<Vec<ServiceStateReport>> {
        let services = self.provider.list_services(cluster).await?;
        Ok(join_all(services.iter().map(|id| self.report(id))).await)
    }

    /// `Ok(None)` when the service cannot be resolved.
    async fn collect_tally(&self, id: &ServiceId) -> Result<Option<AggregationTally>> {
        let Some(handle) = self.provider.resolve_service(id).await? else {
            return Ok(None);
        };

        let instances = self.provider.list_component_instances(&handle).await?;
        let mut tally = AggregationTally::new();

        for instance in &instances {
            let role = self
                .provider
                .describe_component_role(&handle.stack, &instance.service, &instance.component)
                .await?;

            match role {
                Some(role) if role.is_primary() => {
                    tally.observe(&instance.component, instance.live_state)
                }
                Some(_) => {}
                None => log::debug!(
                    "Skipping {} on {}: not defined in stack {}",
                    instance.component,
                    instance.host,
                    handle.stack
                ),
            }
        }

        Ok(Some(tally))
    }
}

#[async_trait]
impl<P: TopologyProvider + ?Sized> ServiceStateCalculator for ServiceHealthAggregator<P> {
    async fn service_state(&self, id: &ServiceId) -> LifecycleState {
        self.compute_service_state(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::InMemoryTopology;
    use crate::types::{ComponentCategory, ComponentInstance, ComponentKind, StackId};

    fn hdp() -> StackId {
        StackId::new("HDP", "2.6")
    }

    fn create_test_topology(components: &[(ComponentKind, LifecycleState)]) -> Arc<InMemoryTopology> {
        let topology = InMemoryTopology::new();
        topology.add_cluster("c1").unwrap();
        topology.add_service("c1", "HIVE", hdp()).unwrap();

        for kind in [
            ComponentKind::Server,
            ComponentKind::Metastore,
            ComponentKind::CatalogGateway,
            ComponentKind::EmbeddedDatabase,
        ] {
            topology
                .register_component(&hdp(), "HIVE", kind, ComponentCategory::Master)
                .unwrap();
        }
        topology
            .register_component(
                &hdp(),
                "HIVE",
                ComponentKind::from_name("HIVE_CLIENT"),
                ComponentCategory::Client,
            )
            .unwrap();

        for (i, (kind, state)) in components.iter().enumerate() {
            topology
                .add_host_component(
                    "c1",
                    ComponentInstance::new("HIVE", kind.clone(), format!("h{}", i), *state),
                )
                .unwrap();
        }

        Arc::new(topology)
    }

    fn hive() -> ServiceId {
        ServiceId::new("c1", "HIVE")
    }

    #[tokio::test]
    async fn test_healthy_service_is_started() {
        let topology = create_test_topology(&[
            (ComponentKind::Server, LifecycleState::Started),
            (ComponentKind::Metastore, LifecycleState::Started),
            (ComponentKind::CatalogGateway, LifecycleState::Started),
        ]);
        let aggregator = ServiceHealthAggregator::new(topology);

        assert_eq!(aggregator.compute_service_state(&hive()).await, LifecycleState::Started);
    }

    #[tokio::test]
    async fn test_client_component_is_ignored() {
        let topology = create_test_topology(&[
            (ComponentKind::Server, LifecycleState::Started),
            (ComponentKind::from_name("HIVE_CLIENT"), LifecycleState::InstallFailed),
        ]);
        let aggregator = ServiceHealthAggregator::new(topology);

        assert_eq!(aggregator.compute_service_state(&hive()).await, LifecycleState::Started);
    }

    #[tokio::test]
    async fn test_component_missing_from_stack_is_skipped() {
        let topology = create_test_topology(&[
            (ComponentKind::Server, LifecycleState::Started),
            (ComponentKind::from_name("REMOVED_COMPONENT"), LifecycleState::Installed),
        ]);
        let aggregator = ServiceHealthAggregator::new(topology);

        assert_eq!(aggregator.compute_service_state(&hive()).await, LifecycleState::Started);
    }

    #[tokio::test]
    async fn test_unknown_service_is_unknown() {
        let aggregator = ServiceHealthAggregator::new(create_test_topology(&[]));

        let state = aggregator
            .compute_service_state(&ServiceId::new("c1", "OOZIE"))
            .await;
        assert_eq!(state, LifecycleState::Unknown);

        let state = aggregator
            .compute_service_state(&ServiceId::new("nope", "HIVE"))
            .await;
        assert_eq!(state, LifecycleState::Unknown);
    }

    #[tokio::test]
    async fn test_stack_lookup_failure_is_unknown() {
        let topology = create_test_topology(&[(ComponentKind::Server, LifecycleState::Started)]);
        topology
            .add_service("c1", "HIVE", StackId::new("HDP", "3.0"))
            .unwrap();
        let aggregator = ServiceHealthAggregator::new(topology);

        assert_eq!(aggregator.compute_service_state(&hive()).await, LifecycleState::Unknown);
    }

    #[tokio::test]
    async fn test_calculator_trait_object() {
        let topology = create_test_topology(&[(ComponentKind::Server, LifecycleState::Installed)]);
        let calculator: Arc<dyn ServiceStateCalculator> =
            Arc::new(ServiceHealthAggregator::new(topology));

        assert_eq!(calculator.service_state(&hive()).await, LifecycleState::Installed);
    }

    #[tokio::test]
    async fn test_cluster_states() {
        let topology = create_test_topology(&[(ComponentKind::Server, LifecycleState::Installed)]);
        topology.add_service("c1", "HDFS", StackId::new("HDP", "2.6")).unwrap();
        let aggregator = ServiceHealthAggregator::new(topology);

        let reports = aggregator.compute_cluster_states("c1").await.unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].service, "HIVE");
        assert_eq!(reports[0].state, LifecycleState::Installed);
        assert_eq!(reports[1].service, "HDFS");
        assert_eq!(reports[1].state, LifecycleState::Started);

        assert!(aggregator.compute_cluster_states("c9").await.is_err());
    }
}
