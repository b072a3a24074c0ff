//! `DeviceKey` extractor: resolves the calling device from a request header.
//!
//! The key is taken as-is; authenticating the device is left to whatever
//! sits in front of this service.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use folderhub_core::error::AppError;
use folderhub_core::types::DeviceId;
use folderhub_service::context::DeviceContext;

use crate::error::ApiError;

/// Header carrying the device key.
pub const DEVICE_HEADER: &str = "x-device-id";

/// The device context available in handlers.
#[derive(Debug, Clone)]
pub struct DeviceKey(pub DeviceContext);

impl std::ops::Deref for DeviceKey {
    type Target = DeviceContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for DeviceKey
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(DEVICE_HEADER)
            .ok_or_else(|| AppError::invalid_input("Missing X-Device-Id header"))?
            .to_str()
            .map_err(|_| AppError::invalid_input("X-Device-Id header is not valid text"))?;

        let device_id = DeviceId::new(raw);
        if device_id.is_empty() {
            return Err(AppError::invalid_input("X-Device-Id header is empty").into());
        }

        Ok(DeviceKey(DeviceContext::new(device_id)))
    }
}
