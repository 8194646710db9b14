use super::types::DeviceId;

/// GPU service errors
#[derive(thiserror::Error, Debug)]
pub enum GpuError {
    /// D-Bus communication error
    #[error("D-Bus operation failed: {0}")]
    DbusError(#[from] zbus::Error),

    /// Service initialization failed (used for top-level service startup)
    #[error("Failed to initialize GPU service: {0}")]
    ServiceInitializationFailed(String),

    /// Frequency override already acquired for this device
    #[error("Frequency override for device {0} already acquired")]
    DeviceAlreadyAcquired(DeviceId),

    /// No frequency override acquired for this device
    #[error("No frequency override acquired for device {0}")]
    DeviceNotAcquired(DeviceId),

    /// The daemon reported the configuration UUID as already registered
    #[error("Performance configuration {uuid} on device {device} is already in use")]
    ConfigurationInUse {
        /// Device the registration targeted.
        device: DeviceId,
        /// UUID of the conflicting configuration.
        uuid: String,
    },

    /// Reply decoded but is unusable
    #[error("Unusable reply from {method}: {reason}")]
    InvalidReply {
        /// The daemon method that replied.
        method: &'static str,
        /// Why the reply is unusable.
        reason: String,
    },
}

impl GpuError {
    /// Whether retrying the failed operation may succeed.
    ///
    /// True for transient transport failures (I/O errors, missing or
    /// garbled replies); false for precondition violations and errors
    /// the daemon raised by name.
    pub fn suggests_retry(&self) -> bool {
        match self {
            GpuError::InvalidReply { .. } => true,
            GpuError::DbusError(zbus::Error::InputOutput(_) | zbus::Error::InvalidReply) => true,
            GpuError::DbusError(zbus::Error::MethodError(name, _, _)) => matches!(
                name.as_str(),
                "org.freedesktop.DBus.Error.NoReply" | "org.freedesktop.DBus.Error.Timeout"
            ),
            _ => false,
        }
    }
}
