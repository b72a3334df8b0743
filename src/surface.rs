// This is free and unencumbered software released into the public domain.

use std::sync::{Arc, Mutex};

/// Handle to the texture surface the preview stream renders into.
///
/// The surface belongs to the downstream frame consumer; the adapter only
/// sets its default buffer size before streaming starts. Cloning yields
/// another handle to the same surface.
#[derive(Clone, Debug)]
pub struct OutputSurface {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    texture_name: u32,
    buffer_size: Mutex<Option<(u32, u32)>>,
}

impl OutputSurface {
    pub fn new(texture_name: u32) -> Self {
        Self {
            inner: Arc::new(Inner {
                texture_name,
                buffer_size: Mutex::new(None),
            }),
        }
    }

    /// Surface not bound to any consumer texture, used when the caller
    /// starts the camera without supplying one.
    pub fn detached() -> Self {
        Self::new(0)
    }

    pub fn texture_name(&self) -> u32 {
        self.inner.texture_name
    }

    pub fn set_default_buffer_size(&self, width: u32, height: u32) {
        let mut guard = self
            .inner
            .buffer_size
            .lock()
            .unwrap_or_else(|p| p.into_inner());
        *guard = Some((width, height));
    }

    pub fn default_buffer_size(&self) -> Option<(u32, u32)> {
        *self
            .inner
            .buffer_size
            .lock()
            .unwrap_or_else(|p| p.into_inner())
    }

    /// Whether two handles refer to the same underlying surface.
    pub fn same_surface(&self, other: &OutputSurface) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
