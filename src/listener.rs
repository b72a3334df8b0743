// This is free and unencumbered software released into the public domain.

use crate::OutputSurface;

/// Outbound notifications from the adapter to its owner.
///
/// `on_camera_started` fires exactly once per successful device open,
/// carrying the surface the downstream consumer may begin reading frames
/// from. The remaining hooks exist so the host application can surface a
/// notice or re-run its permission flow; both default to no-ops.
pub trait CameraListener: Send + Sync {
    fn on_camera_started(&self, surface: &OutputSurface);

    fn on_configure_failed(&self) {}

    fn on_permission_required(&self) {}
}
