use thiserror::Error;

use crate::types::StackId;

#[derive(Error, Debug)]
pub enum TopologyError {
    #[error("Cluster not found: {0}")]
    ClusterNotFound(String),

    #[error("Service {service} not found in cluster {cluster}")]
    ServiceNotFound { cluster: String, service: String },

    #[error("Stack not found: {0}")]
    StackNotFound(StackId),

    #[error("Unsupported topology format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid topology snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl TopologyError {
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn service_not_found<S: Into<String>>(cluster: S, service: S) -> Self {
        Self::ServiceNotFound {
            cluster: cluster.into(),
            service: service.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TopologyError>;
