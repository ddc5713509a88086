use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ComponentCategory, LifecycleState};

/// Role of a component within the service, keyed by its stack component name.
///
/// Four roles carry weight in the health rule; every other component name
/// is kept verbatim as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentKind {
    /// Metastore coordinator. Several may run; one active instance is enough.
    Metastore,
    /// Primary query server.
    Server,
    /// Database deployed alongside the service, optional.
    EmbeddedDatabase,
    /// Web catalog gateway.
    CatalogGateway,
    Other(String),
}

impl ComponentKind {
    pub fn name(&self) -> &str {
        match self {
            ComponentKind::Metastore => "HIVE_METASTORE",
            ComponentKind::Server => "HIVE_SERVER",
            ComponentKind::EmbeddedDatabase => "MYSQL_SERVER",
            ComponentKind::CatalogGateway => "WEBHCAT_SERVER",
            ComponentKind::Other(name) => name,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "HIVE_METASTORE" => ComponentKind::Metastore,
            "HIVE_SERVER" => ComponentKind::Server,
            "MYSQL_SERVER" => ComponentKind::EmbeddedDatabase,
            "WEBHCAT_SERVER" => ComponentKind::CatalogGateway,
            other => ComponentKind::Other(other.to_string()),
        }
    }
}

impl From<String> for ComponentKind {
    fn from(name: String) -> Self {
        ComponentKind::from_name(&name)
    }
}

impl From<ComponentKind> for String {
    fn from(kind: ComponentKind) -> Self {
        kind.name().to_string()
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stack metadata for one component kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRole {
    pub category: ComponentCategory,
}

impl ComponentRole {
    pub fn new(category: ComponentCategory) -> Self {
        Self { category }
    }

    /// Only master components are load-bearing for service health.
    pub fn is_primary(&self) -> bool {
        self.category == ComponentCategory::Master
    }
}

/// One host-component record of a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentInstance {
    pub service: String,
    pub component: ComponentKind,
    pub host: String,
    pub live_state: LifecycleState,
}

impl ComponentInstance {
    pub fn new(
        service: impl Into<String>,
        component: ComponentKind,
        host: impl Into<String>,
        live_state: LifecycleState,
    ) -> Self {
        Self {
            service: service.into(),
            component,
            host: host.into(),
            live_state,
        }
    }
}
