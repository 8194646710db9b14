use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, watch};
use tokio_stream::StreamExt;
use tracing::{debug, warn};
use zbus::Connection;
use zbus::names::BusName;
use zbus::zvariant::OwnedObjectPath;

use super::DeviceId;

/// Handles ongoing monitoring of daemon availability.
///
/// Frequency overrides and registered configurations die with the daemon,
/// so the acquired-device table is cleared whenever the daemon's bus name
/// loses its owner.
pub(crate) struct GpuServiceMonitoring;

impl GpuServiceMonitoring {
    /// Start the availability monitoring task.
    ///
    /// Degrades to a warning when name ownership cannot be observed, e.g.
    /// on peer-to-peer connections without a bus daemon; the service keeps
    /// working without monitoring in that case.
    pub(crate) fn start(
        connection: Connection,
        service_name: String,
        acquired: Arc<RwLock<HashMap<DeviceId, OwnedObjectPath>>>,
        available: watch::Sender<bool>,
    ) {
        tokio::spawn(async move {
            let dbus_proxy = match zbus::fdo::DBusProxy::new(&connection).await {
                Ok(proxy) => proxy,
                Err(e) => {
                    warn!("Failed to create bus proxy, availability monitoring disabled: {e}");
                    return;
                }
            };

            let mut owner_changed = match dbus_proxy.receive_name_owner_changed().await {
                Ok(stream) => stream,
                Err(e) => {
                    warn!("Failed to subscribe to NameOwnerChanged: {e}");
                    return;
                }
            };

            let name = match BusName::try_from(service_name.clone()) {
                Ok(name) => name,
                Err(e) => {
                    warn!("Invalid daemon bus name {service_name}: {e}");
                    return;
                }
            };

            match dbus_proxy.name_has_owner(name.clone()).await {
                Ok(has_owner) => {
                    available.send_replace(has_owner);
                }
                Err(e) => {
                    debug!("Could not query initial owner of {service_name}: {e}");
                }
            }

            while let Some(signal) = owner_changed.next().await {
                let Ok(args) = signal.args() else {
                    continue;
                };

                if args.name != name {
                    continue;
                }

                let has_owner = args.new_owner.is_some();
                if !has_owner {
                    debug!("{service_name} lost its owner, clearing acquired devices");
                    acquired.write().await.clear();
                }
                available.send_replace(has_owner);
            }
        });
    }
}
