//! Request context carrying the resolved device key.

use folderhub_core::types::DeviceId;

/// Context for one hierarchy operation.
///
/// The device key is assumed to be already resolved by the caller; it is
/// used only as the partition filter for every read and write.
#[derive(Debug, Clone)]
pub struct DeviceContext {
    /// The device whose tree is being operated on.
    pub device_id: DeviceId,
}

impl DeviceContext {
    /// Creates a new device context.
    pub fn new(device_id: impl Into<DeviceId>) -> Self {
        Self {
            device_id: device_id.into(),
        }
    }

    /// The device key.
    pub fn device(&self) -> &DeviceId {
        &self.device_id
    }
}
