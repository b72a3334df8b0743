// This is free and unencumbered software released into the public domain.

use derive_more::Display;
use std::error::Error as StdError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CameraError {
    #[error("camera permission not granted")]
    PermissionDenied,

    #[error("no camera device available")]
    NoCamera,

    #[error("camera device error ({0})")]
    DeviceError(DeviceErrorCode),

    #[error("capture session configuration failed")]
    ConfigurationFailed,

    #[error("camera device disconnected")]
    Disconnected,

    #[error("camera is closed")]
    Closed,

    #[error("camera service error while {context}")]
    ServiceError {
        context: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("{0}")]
    Other(String),
}

impl CameraError {
    #[inline]
    pub fn service(context: &'static str, source: impl StdError + Send + Sync + 'static) -> Self {
        Self::ServiceError {
            context,
            source: Box::new(source),
        }
    }

    #[inline]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Raw status code reported by the platform with a device error callback.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
#[display("{_0}")]
pub struct DeviceErrorCode(pub i32);

impl DeviceErrorCode {
    pub const CAMERA_IN_USE: Self = Self(1);
    pub const MAX_CAMERAS_IN_USE: Self = Self(2);
    pub const CAMERA_DISABLED: Self = Self(3);
    pub const CAMERA_DEVICE: Self = Self(4);
    pub const CAMERA_SERVICE: Self = Self(5);
}
