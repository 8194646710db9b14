//! Gpubus - D-Bus client for privileged GPU management operations.
//!
//! Gpubus lets instrumentation code request operations that need elevated
//! privileges — GPU frequency overrides and performance-configuration
//! registration — from the system-level GPU management daemon. The main
//! features include:
//!
//! - Typed client for the daemon's manager and per-device frequency interfaces
//! - Tracking of acquired frequency overrides per device
//! - Daemon availability monitoring over bus name ownership
//! - TOML configuration for pointing the client at a staging daemon
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gpubus::services::gpu::{DeviceId, GpuService, GpuServiceConfig};
//!
//! # async fn run() -> Result<(), gpubus::services::gpu::GpuError> {
//! let gpu = GpuService::start(GpuServiceConfig::default()).await?;
//!
//! gpu.acquire_frequency_override(DeviceId(0)).await?;
//! gpu.set_frequency(DeviceId(0), 300, 1100, 1150).await?;
//! gpu.release_frequency_override(DeviceId(0)).await?;
//! # Ok(())
//! # }
//! ```

/// Configuration schema definitions and loading.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Client services for the GPU management daemon.
pub mod services;

/// Tracing initialization helpers.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{GpubusError, Result};
