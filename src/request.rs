// This is free and unencumbered software released into the public domain.

use crate::OutputSurface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StabilizationMode {
    Off,
    On,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlMode {
    Off,
    Auto,
}

/// Capture parameters for the repeating preview request.
///
/// Rebuilt from scratch every time the preview is (re)started; the same
/// request is handed to session creation and then resubmitted as the
/// repeating request once the session is configured.
#[derive(Clone, Debug)]
pub struct CaptureRequest {
    pub stabilization: StabilizationMode,
    pub control_mode: ControlMode,
    targets: Vec<OutputSurface>,
}

impl CaptureRequest {
    /// Preview template: stabilization on, full auto control.
    pub fn preview() -> Self {
        Self {
            stabilization: StabilizationMode::On,
            control_mode: ControlMode::Auto,
            targets: Vec::new(),
        }
    }

    pub fn with_stabilization(mut self, mode: StabilizationMode) -> Self {
        self.stabilization = mode;
        self
    }

    pub fn with_control_mode(mut self, mode: ControlMode) -> Self {
        self.control_mode = mode;
        self
    }

    pub fn add_target(&mut self, surface: OutputSurface) {
        self.targets.push(surface);
    }

    pub fn targets(&self) -> &[OutputSurface] {
        &self.targets
    }
}
