/// GPU management daemon client service
pub mod gpu;

pub use gpu::{ConfigId, ConfigRegister, DeviceId, GpuError, GpuService, GpuServiceConfig};
