use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::LifecycleState;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceId {
    pub cluster: String,
    pub service: String,
}

impl ServiceId {
    pub fn new(cluster: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            cluster: cluster.into(),
            service: service.into(),
        }
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.cluster, self.service)
    }
}

/// Stack a service is deployed from, e.g. `HDP-2.6`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackId {
    pub name: String,
    pub version: String,
}

impl StackId {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for StackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.version)
    }
}

impl FromStr for StackId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('-') {
            Some((name, version)) if !name.is_empty() && !version.is_empty() => {
                Ok(StackId::new(name, version))
            }
            _ => Err(format!("invalid stack id '{}', expected NAME-VERSION", s)),
        }
    }
}

/// A service resolved by the topology provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHandle {
    pub id: ServiceId,
    pub stack: StackId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStateReport {
    pub cluster: String,
    pub service: String,
    pub state: LifecycleState,
    pub computed_at: DateTime<Utc>,
}

impl ServiceStateReport {
    pub fn new(id: &ServiceId, state: LifecycleState) -> Self {
        Self {
            cluster: id.cluster.clone(),
            service: id.service.clone(),
            state,
            computed_at: Utc::now(),
        }
    }

    pub fn is_determined(&self) -> bool {
        self.state != LifecycleState::Unknown
    }
}
