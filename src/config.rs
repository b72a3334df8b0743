// This is free and unencumbered software released into the public domain.

use crate::{ControlMode, StabilizationMode};
use derive_more::Display;

/// Which physical direction the selected camera points.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum Facing {
    #[display("front")]
    Front,
    #[display("back")]
    Back,
}

#[derive(Clone, Debug)]
pub struct PreviewConfig {
    pub stabilization: StabilizationMode,
    pub control_mode: ControlMode,
    /// Overrides the buffer size taken from the camera characteristics.
    pub buffer_size: Option<(u32, u32)>,
    /// Attach an image reader alongside the preview surface.
    pub attach_image_reader: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            stabilization: StabilizationMode::On,
            control_mode: ControlMode::Auto,
            buffer_size: None,
            attach_image_reader: false,
        }
    }
}

impl PreviewConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stabilization(mut self, mode: StabilizationMode) -> Self {
        self.stabilization = mode;
        self
    }

    pub fn with_control_mode(mut self, mode: ControlMode) -> Self {
        self.control_mode = mode;
        self
    }

    pub fn with_buffer_size(mut self, width: u32, height: u32) -> Self {
        self.buffer_size = Some((width, height));
        self
    }

    pub fn with_image_reader(mut self, enabled: bool) -> Self {
        self.attach_image_reader = enabled;
        self
    }
}
