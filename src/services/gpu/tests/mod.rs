//! Unit tests for the GPU service building blocks.
//!
//! Wire-level behavior against a mock daemon lives in `tests/gpu_service.rs`;
//! these cover the pure pieces: register flattening, identifiers, and the
//! retry categorization of errors.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

use crate::services::gpu::{ConfigId, ConfigRegister, DeviceId, GpuError};

#[test]
fn flatten_empty_register_list() {
    assert!(ConfigRegister::flatten(&[]).is_empty());
}

#[test]
fn flatten_keeps_offset_value_order() {
    let registers = [
        ConfigRegister::new(0x9888, 0x1400_0000),
        ConfigRegister::new(0x9884, 0x0000_0007),
        ConfigRegister::new(0xe458, 0x0000_0005),
    ];

    let flat = ConfigRegister::flatten(&registers);

    assert_eq!(
        flat,
        vec![0x9888, 0x1400_0000, 0x9884, 0x0000_0007, 0xe458, 0x0000_0005]
    );
}

#[test]
fn device_id_display_and_ordering() {
    assert_eq!(DeviceId(3).to_string(), "3");
    assert!(DeviceId(1) < DeviceId(2));
    assert_eq!(ConfigId(7).to_string(), "7");
}

#[test]
fn invalid_reply_suggests_retry() {
    let error = GpuError::InvalidReply {
        method: "AcquireFrequencyOverride",
        reason: "not an object path".to_string(),
    };

    assert!(error.suggests_retry());
}

#[test]
fn transient_transport_errors_suggest_retry() {
    let garbled = GpuError::DbusError(zbus::Error::InvalidReply);
    assert!(garbled.suggests_retry());

    let io = GpuError::DbusError(zbus::Error::InputOutput(
        std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed").into(),
    ));
    assert!(io.suggests_retry());
}

#[test]
fn precondition_errors_do_not_suggest_retry() {
    assert!(!GpuError::DeviceAlreadyAcquired(DeviceId(0)).suggests_retry());
    assert!(!GpuError::DeviceNotAcquired(DeviceId(0)).suggests_retry());
    assert!(
        !GpuError::ConfigurationInUse {
            device: DeviceId(0),
            uuid: "uuid".to_string(),
        }
        .suggests_retry()
    );
    assert!(!GpuError::DbusError(zbus::Error::InterfaceNotFound).suggests_retry());
}
