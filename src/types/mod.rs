pub mod component;
pub mod service;

pub use component::{ComponentInstance, ComponentKind, ComponentRole};
pub use service::{ServiceHandle, ServiceId, ServiceStateReport, StackId};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleState {
    Init,          // Initial state, nothing installed yet
    Installing,    // Install in progress
    InstallFailed, // Install attempt failed
    Installed,     // Installed but not running
    Starting,      // Start in progress
    Started,       // Running
    Stopping,      // Stop in progress
    Stopped,       // Stopped by an operator
    Uninstalling,  // Uninstall in progress
    Uninstalled,   // Removed from the host
    WipingOut,     // Data wipe in progress
    Upgrading,     // Upgrade in progress
    Disabled,      // Running, but administratively disabled
    Unknown,       // Cannot be determined
}

impl LifecycleState {
    pub const ALL: [LifecycleState; 14] = [
        LifecycleState::Init,
        LifecycleState::Installing,
        LifecycleState::InstallFailed,
        LifecycleState::Installed,
        LifecycleState::Starting,
        LifecycleState::Started,
        LifecycleState::Stopping,
        LifecycleState::Stopped,
        LifecycleState::Uninstalling,
        LifecycleState::Uninstalled,
        LifecycleState::WipingOut,
        LifecycleState::Upgrading,
        LifecycleState::Disabled,
        LifecycleState::Unknown,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            LifecycleState::Init => "INIT",
            LifecycleState::Installing => "INSTALLING",
            LifecycleState::InstallFailed => "INSTALL_FAILED",
            LifecycleState::Installed => "INSTALLED",
            LifecycleState::Starting => "STARTING",
            LifecycleState::Started => "STARTED",
            LifecycleState::Stopping => "STOPPING",
            LifecycleState::Stopped => "STOPPED",
            LifecycleState::Uninstalling => "UNINSTALLING",
            LifecycleState::Uninstalled => "UNINSTALLED",
            LifecycleState::WipingOut => "WIPING_OUT",
            LifecycleState::Upgrading => "UPGRADING",
            LifecycleState::Disabled => "DISABLED",
            LifecycleState::Unknown => "UNKNOWN",
        }
    }

    pub fn is_running_class(&self) -> bool {
        is_running_class(*self)
    }
}

/// Whether a component in `state` is actively serving.
///
/// Only `STARTED` and `DISABLED` qualify; every other state is non-running.
pub fn is_running_class(state: LifecycleState) -> bool {
    matches!(state, LifecycleState::Started | LifecycleState::Disabled)
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        LifecycleState::ALL
            .iter()
            .copied()
            .find(|state| state.as_str() == wanted)
            .ok_or_else(|| format!("unknown lifecycle state: {}", s))
    }
}

/// Stack metadata category of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentCategory {
    Master,
    Slave,
    Client,
}

impl ComponentCategory {
    pub fn as_str(&self) -> &str {
        match self {
            ComponentCategory::Master => "MASTER",
            ComponentCategory::Slave => "SLAVE",
            ComponentCategory::Client => "CLIENT",
        }
    }
}
