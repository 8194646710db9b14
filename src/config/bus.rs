use serde::{Deserialize, Serialize};

/// Which message bus carries the daemon.
///
/// The production daemon lives on the system bus; the session bus is
/// only useful for talking to a staging daemon during development.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BusKind {
    /// The system-wide message bus.
    #[default]
    System,

    /// The per-login-session message bus.
    Session,
}

/// Bus endpoint of the GPU management daemon.
///
/// Identifies where the daemon's manager object lives. The defaults
/// match the production service; overriding them points the client at
/// a staging daemon without rebuilding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BusConfig {
    /// Which bus to connect to.
    pub kind: BusKind,

    /// Well-known bus name of the daemon.
    pub service: String,

    /// Object path of the daemon's manager object.
    pub manager_path: String,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            kind: BusKind::System,
            service: "com.intel.GPU".to_string(),
            manager_path: "/com/intel/GPU".to_string(),
        }
    }
}
