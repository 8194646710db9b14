/// GPU service errors
mod error;
/// Daemon availability monitoring
mod monitoring;
/// D-Bus proxy implementations for the daemon's interfaces.
mod proxy;
/// High-level client API for GPU management operations.
mod service;
/// Type definitions for devices, configurations and registers.
mod types;

#[cfg(test)]
mod tests;

pub use error::GpuError;
pub use proxy::*;
pub use service::{GpuService, GpuServiceConfig};
pub use types::{ConfigId, ConfigRegister, DeviceId};
