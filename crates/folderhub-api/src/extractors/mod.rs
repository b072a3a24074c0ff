//! Custom Axum extractors.

pub mod device;
pub mod json;
pub mod params;

pub use device::{DEVICE_HEADER, DeviceKey};
pub use json::ValidatedJson;
pub use params::{ApiPath, ApiQuery};
