//! GPU management daemon D-Bus interfaces.

#![allow(missing_docs)]

use zbus::proxy;

/// Manager interface of the GPU management daemon.
///
/// Served at the daemon's manager object. Frequency overrides are granted
/// per device; performance configurations are registered globally per
/// device and referenced by the numeric id the daemon assigns.
#[proxy(
    default_service = "com.intel.GPU",
    interface = "com.intel.GPU",
    default_path = "/com/intel/GPU"
)]
pub trait GpuManager {
    /// Grant this client an exclusive frequency override for a device.
    ///
    /// # Returns
    /// Object path of the per-device frequency object, as a plain string.
    /// Subsequent frequency calls for the device go through that object.
    fn acquire_frequency_override(&self, device: u32) -> zbus::Result<String>;

    /// Register a performance configuration for a device.
    ///
    /// Each register list is a flattened sequence of (offset, value) pairs.
    /// Raises `com.intel.GPU.Error.InUse` when the UUID is already registered.
    ///
    /// # Returns
    /// Daemon-assigned id of the registered configuration.
    fn register_performance_configuration(
        &self,
        device: u32,
        uuid: &str,
        mux_regs: &[u32],
        boolean_regs: &[u32],
        flex_regs: &[u32],
    ) -> zbus::Result<u32>;

    /// Remove a previously registered performance configuration.
    fn unregister_performance_configuration(&self, device: u32, config: u32) -> zbus::Result<()>;
}

/// Per-device frequency override interface.
///
/// Served at the object path returned by `AcquireFrequencyOverride`; there
/// is no default path.
#[proxy(default_service = "com.intel.GPU", interface = "com.intel.GPU.Frequency")]
pub trait Frequency {
    /// Apply a min/max/boost frequency override, in MHz.
    fn set_frequency(&self, min_freq: u32, max_freq: u32, boost_freq: u32) -> zbus::Result<()>;

    /// Drop the override and return the device to daemon control.
    fn release(&self) -> zbus::Result<()>;
}
