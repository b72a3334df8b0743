// This is free and unencumbered software released into the public domain.

//! Seam to the host camera subsystem.
//!
//! Device enumeration, characteristics, permissions, and the asynchronous
//! open/configure callbacks are platform services, not part of the adapter.
//! They are modelled as traits so the adapter can be driven by the real
//! camera service on-device or by a fake in tests. Completion callbacks are
//! delivered as [`CameraEvent`]s posted through an [`EventSink`] onto the
//! adapter's background queue.

use crate::{CameraError, CaptureRequest, DeviceErrorCode, EventSink, Facing};
use std::fmt;

/// Static properties of one camera, queried before opening it.
#[derive(Clone, Debug, Default)]
pub struct CameraCharacteristics {
    pub lens_facing: Option<Facing>,
    /// Supported preview output sizes, preferred first.
    pub preview_sizes: Vec<(u32, u32)>,
}

/// Completion events the platform delivers to the adapter's queue.
#[derive(Debug)]
pub enum CameraEvent {
    /// Device open succeeded; carries the open device handle.
    Opened(Box<dyn CameraDevice>),
    /// Device was disconnected (unplugged, evicted by another client).
    Disconnected,
    /// Device reported a fatal error.
    Error(DeviceErrorCode),
    /// Capture session configuration succeeded.
    SessionConfigured(Box<dyn CaptureSession>),
    /// Capture session configuration failed.
    SessionConfigureFailed,
}

/// The platform camera service: enumeration, characteristics, permission
/// checks, and asynchronous device open.
pub trait CameraService: Send + Sync {
    fn camera_ids(&self) -> Result<Vec<String>, CameraError>;

    fn characteristics(&self, id: &str) -> Result<CameraCharacteristics, CameraError>;

    fn permission_granted(&self) -> bool;

    /// Ask the host to prompt the user for camera permission. The adapter
    /// does not wait for the outcome; the caller re-invokes `start` once
    /// permission is granted.
    fn request_permission(&self);

    /// Begin opening the named camera. Completion arrives later as
    /// [`CameraEvent::Opened`], [`CameraEvent::Disconnected`], or
    /// [`CameraEvent::Error`] on `events`.
    fn open_camera(&self, id: &str, events: EventSink) -> Result<(), CameraError>;

    /// Allocate an image reader producing buffers of the given size.
    fn new_image_reader(
        &self,
        width: u32,
        height: u32,
    ) -> Result<Box<dyn ImageReader>, CameraError>;
}

/// An open camera device.
pub trait CameraDevice: Send + fmt::Debug {
    /// Begin configuring a capture session for the request's targets.
    /// Completion arrives as [`CameraEvent::SessionConfigured`] or
    /// [`CameraEvent::SessionConfigureFailed`] on `events`.
    fn create_capture_session(
        &mut self,
        request: &CaptureRequest,
        events: EventSink,
    ) -> Result<(), CameraError>;

    fn close(&mut self);
}

/// A configured capture session on an open device.
pub trait CaptureSession: Send + fmt::Debug {
    fn set_repeating_request(&mut self, request: &CaptureRequest) -> Result<(), CameraError>;

    fn close(&mut self);
}

pub trait ImageReader: Send + fmt::Debug {
    fn close(&mut self);
}
