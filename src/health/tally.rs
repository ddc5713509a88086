use crate::types::{ComponentKind, LifecycleState};

/// Per-call accumulator over the primary components of one service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationTally {
    pub active_metastores: usize,
    pub last_non_running: Option<LifecycleState>,
    pub embedded_database_present: bool,
    pub server_started: bool,
    pub catalog_gateway_started: bool,
    pub database_started: bool,
}

impl AggregationTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one primary component. Callers filter out non-primary and
    /// unknown components beforehand.
    pub fn observe(&mut self, kind: &ComponentKind, state: LifecycleState) {
        if *kind == ComponentKind::EmbeddedDatabase {
            self.embedded_database_present = true;
        }

        if !state.is_running_class() {
            // last write wins
            self.last_non_running = Some(state);
            return;
        }

        match kind {
            ComponentKind::Metastore => self.active_metastores += 1,
            ComponentKind::Server => self.server_started = true,
            ComponentKind::EmbeddedDatabase => self.database_started = true,
            ComponentKind::CatalogGateway => self.catalog_gateway_started = true,
            ComponentKind::Other(_) => {}
        }
    }

    /// Server, catalog gateway, at least one metastore, and the database when
    /// one is deployed.
    pub fn required_roles_running(&self) -> bool {
        self.server_started
            && self.catalog_gateway_started
            && self.active_metastores > 0
            && (!self.embedded_database_present || self.database_started)
    }

    pub fn decide(&self) -> LifecycleState {
        match self.last_non_running {
            Some(state) if !self.required_roles_running() => state,
            _ => LifecycleState::Started,
        }
    }
}
