use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, watch};
use tracing::{debug, info, instrument};
use zbus::Connection;
use zbus::names::BusName;
use zbus::zvariant::OwnedObjectPath;

use crate::config::{BusConfig, BusKind, Config};

use super::monitoring::GpuServiceMonitoring;
use super::proxy::{FrequencyProxy, GpuManagerProxy};
use super::{ConfigId, ConfigRegister, DeviceId, GpuError};

/// Error name the daemon raises for a duplicate configuration UUID.
const ERR_CONFIG_IN_USE: &str = "com.intel.GPU.Error.InUse";

/// Configuration for the GPU service
#[derive(Debug, Clone, Default)]
pub struct GpuServiceConfig {
    /// Bus endpoint of the management daemon
    pub bus: BusConfig,
}

impl From<&Config> for GpuServiceConfig {
    fn from(config: &Config) -> Self {
        Self {
            bus: config.bus.clone(),
        }
    }
}

/// Client for the GPU management daemon.
///
/// Issues privileged operations — frequency overrides and performance
/// configuration registration — over D-Bus and tracks which devices this
/// client currently holds a frequency override for. Every operation is a
/// single request/response exchange; a failed call leaves the acquired
/// table untouched.
#[derive(Clone)]
pub struct GpuService {
    connection: Connection,
    bus: BusConfig,
    acquired: Arc<RwLock<HashMap<DeviceId, OwnedObjectPath>>>,
    available: watch::Receiver<bool>,
}

impl GpuService {
    /// Start the GPU service with the given configuration.
    ///
    /// Connects to the configured bus and starts daemon availability
    /// monitoring.
    ///
    /// # Errors
    ///
    /// Returns `GpuError::ServiceInitializationFailed` if the bus
    /// connection fails.
    #[instrument(skip(config))]
    pub async fn start(config: GpuServiceConfig) -> Result<Self, GpuError> {
        info!("Starting GPU management service client");

        let connection = match config.bus.kind {
            BusKind::System => Connection::system().await,
            BusKind::Session => Connection::session().await,
        }
        .map_err(|e| {
            GpuError::ServiceInitializationFailed(format!("D-Bus connection failed: {e}"))
        })?;

        Ok(Self::with_connection(connection, config))
    }

    /// Build the service over a caller-provided connection.
    ///
    /// Useful for embedders that already hold a connection, and for tests
    /// talking to an in-process daemon over a peer-to-peer connection.
    pub fn with_connection(connection: Connection, config: GpuServiceConfig) -> Self {
        let acquired = Arc::new(RwLock::new(HashMap::new()));
        let (available_tx, available_rx) = watch::channel(true);

        GpuServiceMonitoring::start(
            connection.clone(),
            config.bus.service.clone(),
            Arc::clone(&acquired),
            available_tx,
        );

        Self {
            connection,
            bus: config.bus,
            acquired,
            available: available_rx,
        }
    }

    /// Acquire an exclusive frequency override for a device.
    ///
    /// Records the per-device object path the daemon grants; subsequent
    /// frequency calls for the device are routed through that object.
    ///
    /// # Errors
    ///
    /// Returns `GpuError::DeviceAlreadyAcquired` if this client already
    /// holds an override for the device, `GpuError::InvalidReply` if the
    /// daemon replies with something that is not an object path, and
    /// `GpuError::DbusError` for transport failures.
    #[instrument(skip(self))]
    pub async fn acquire_frequency_override(&self, device: DeviceId) -> Result<(), GpuError> {
        if self.acquired.read().await.contains_key(&device) {
            return Err(GpuError::DeviceAlreadyAcquired(device));
        }

        let manager = self.manager().await?;
        let reply = manager.acquire_frequency_override(device.0).await?;

        let path = OwnedObjectPath::try_from(reply).map_err(|e| GpuError::InvalidReply {
            method: "AcquireFrequencyOverride",
            reason: e.to_string(),
        })?;

        debug!(%device, path = %path, "acquired frequency override");
        self.acquired.write().await.insert(device, path);

        Ok(())
    }

    /// Apply a min/max/boost frequency override to an acquired device, in MHz.
    ///
    /// # Errors
    ///
    /// Returns `GpuError::DeviceNotAcquired` if no override is held for
    /// the device, and `GpuError::DbusError` for transport failures.
    #[instrument(skip(self))]
    pub async fn set_frequency(
        &self,
        device: DeviceId,
        min_freq: u32,
        max_freq: u32,
        boost_freq: u32,
    ) -> Result<(), GpuError> {
        let path = self.acquired_path(device).await?;

        let frequency = self.frequency(path).await?;
        frequency.set_frequency(min_freq, max_freq, boost_freq).await?;

        Ok(())
    }

    /// Release the frequency override held for a device.
    ///
    /// On success the device is removed from the acquired table and can
    /// be acquired again.
    ///
    /// # Errors
    ///
    /// Returns `GpuError::DeviceNotAcquired` if no override is held for
    /// the device, and `GpuError::DbusError` for transport failures.
    #[instrument(skip(self))]
    pub async fn release_frequency_override(&self, device: DeviceId) -> Result<(), GpuError> {
        let path = self.acquired_path(device).await?;

        let frequency = self.frequency(path).await?;
        frequency.release().await?;

        debug!(%device, "released frequency override");
        self.acquired.write().await.remove(&device);

        Ok(())
    }

    /// Whether this client currently holds a frequency override for a device.
    pub async fn is_frequency_acquired(&self, device: DeviceId) -> bool {
        self.acquired.read().await.contains_key(&device)
    }

    /// Devices this client currently holds frequency overrides for, sorted.
    pub async fn acquired_devices(&self) -> Vec<DeviceId> {
        let mut devices: Vec<DeviceId> = self.acquired.read().await.keys().copied().collect();
        devices.sort_unstable();
        devices
    }

    /// Register a performance configuration for a device.
    ///
    /// # Errors
    ///
    /// Returns `GpuError::ConfigurationInUse` if the daemon reports the
    /// UUID as already registered, and `GpuError::DbusError` for
    /// transport failures.
    #[instrument(skip(self, mux_regs, boolean_regs, flex_regs))]
    pub async fn register_configuration(
        &self,
        device: DeviceId,
        uuid: &str,
        mux_regs: &[ConfigRegister],
        boolean_regs: &[ConfigRegister],
        flex_regs: &[ConfigRegister],
    ) -> Result<ConfigId, GpuError> {
        let manager = self.manager().await?;

        let config = manager
            .register_performance_configuration(
                device.0,
                uuid,
                &ConfigRegister::flatten(mux_regs),
                &ConfigRegister::flatten(boolean_regs),
                &ConfigRegister::flatten(flex_regs),
            )
            .await
            .map_err(|e| Self::map_register_error(device, uuid, e))?;

        debug!(%device, uuid, config, "registered performance configuration");
        Ok(ConfigId(config))
    }

    /// Remove a previously registered performance configuration.
    ///
    /// # Errors
    ///
    /// Returns `GpuError::DbusError` for transport failures.
    #[instrument(skip(self))]
    pub async fn unregister_configuration(
        &self,
        device: DeviceId,
        config: ConfigId,
    ) -> Result<(), GpuError> {
        let manager = self.manager().await?;
        manager
            .unregister_performance_configuration(device.0, config.0)
            .await?;

        Ok(())
    }

    /// Whether the daemon currently owns its bus name.
    ///
    /// Reads the monitored value without a bus round trip, so it lags
    /// until monitoring has observed ownership at least once; starts out
    /// optimistically `true`. Use [`Self::query_service_available`] when
    /// a current answer matters more than avoiding the round trip.
    pub fn service_available(&self) -> bool {
        *self.available.borrow()
    }

    /// Query the daemon's bus-name ownership with a direct round trip.
    ///
    /// Falls back to the monitored value when ownership cannot be
    /// queried, e.g. on peer-to-peer connections without a bus daemon.
    pub async fn query_service_available(&self) -> bool {
        let Ok(dbus_proxy) = zbus::fdo::DBusProxy::new(&self.connection).await else {
            return self.service_available();
        };

        let Ok(name) = BusName::try_from(self.bus.service.clone()) else {
            return self.service_available();
        };

        match dbus_proxy.name_has_owner(name).await {
            Ok(has_owner) => has_owner,
            Err(_) => self.service_available(),
        }
    }

    /// Watch daemon availability changes.
    pub fn availability_changes(&self) -> watch::Receiver<bool> {
        self.available.clone()
    }

    async fn acquired_path(&self, device: DeviceId) -> Result<OwnedObjectPath, GpuError> {
        self.acquired
            .read()
            .await
            .get(&device)
            .cloned()
            .ok_or(GpuError::DeviceNotAcquired(device))
    }

    async fn manager(&self) -> Result<GpuManagerProxy<'static>, GpuError> {
        Ok(GpuManagerProxy::builder(&self.connection)
            .destination(self.bus.service.clone())?
            .path(self.bus.manager_path.clone())?
            .build()
            .await?)
    }

    async fn frequency(&self, path: OwnedObjectPath) -> Result<FrequencyProxy<'static>, GpuError> {
        Ok(FrequencyProxy::builder(&self.connection)
            .destination(self.bus.service.clone())?
            .path(path)?
            .build()
            .await?)
    }

    fn map_register_error(device: DeviceId, uuid: &str, error: zbus::Error) -> GpuError {
        match &error {
            zbus::Error::MethodError(name, _, _) if name.as_str() == ERR_CONFIG_IN_USE => {
                GpuError::ConfigurationInUse {
                    device,
                    uuid: uuid.to_string(),
                }
            }
            _ => GpuError::DbusError(error),
        }
    }
}
