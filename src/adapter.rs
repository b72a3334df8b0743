// This is free and unencumbered software released into the public domain.

use crate::{
    CameraError, CameraListener, CaptureRequest, DeviceErrorCode, EventSink, Facing,
    OutputSurface, PreviewConfig,
    platform::{
        CameraCharacteristics, CameraDevice, CameraEvent, CameraService, CaptureSession,
        ImageReader,
    },
    worker::CallbackThread,
};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, warn};

/// Lifecycle phase of the preview session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PreviewPhase {
    #[default]
    Idle,
    Opening,
    SessionConfiguring,
    Streaming,
    Closing,
}

#[derive(Debug, Default)]
struct SessionState {
    phase: PreviewPhase,
    camera_id: Option<String>,
    buffer_size: Option<(u32, u32)>,
    surface: Option<OutputSurface>,
    request: Option<CaptureRequest>,
    device: Option<Box<dyn CameraDevice>>,
    session: Option<Box<dyn CaptureSession>>,
    image_reader: Option<Box<dyn ImageReader>>,
}

/// Everything the background event handler needs, moved into the worker
/// closure at start time.
struct EventCtx {
    service: Arc<dyn CameraService>,
    listener: Option<Arc<dyn CameraListener>>,
    config: PreviewConfig,
    shared: Arc<Mutex<SessionState>>,
}

/// Adapter between the platform camera service and a downstream frame
/// consumer's texture surface.
///
/// `start` resolves a camera for the requested facing, opens it, and brings
/// up a repeating preview capture session; all asynchronous callbacks run on
/// a dedicated background thread owned by the adapter. At most one device is
/// open at a time; starting again closes the previous session first.
///
/// Errors on the asynchronous paths are logged and absorbed rather than
/// propagated, matching the callback shape of the platform API: when
/// something goes wrong the camera simply does not start.
pub struct CameraSessionAdapter {
    service: Arc<dyn CameraService>,
    listener: Option<Arc<dyn CameraListener>>,
    config: PreviewConfig,
    shared: Arc<Mutex<SessionState>>,
    worker: Option<CallbackThread>,
}

impl CameraSessionAdapter {
    pub fn new(service: Arc<dyn CameraService>) -> Self {
        Self {
            service,
            listener: None,
            config: PreviewConfig::default(),
            shared: Arc::new(Mutex::new(SessionState::default())),
            worker: None,
        }
    }

    pub fn with_config(mut self, config: PreviewConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set_listener(&mut self, listener: Arc<dyn CameraListener>) {
        self.listener = Some(listener);
    }

    /// Starts the preview session for the requested facing.
    ///
    /// Closes any existing session, spins up the background callback thread,
    /// resolves a camera id, and requests an asynchronous device open. When
    /// no surface is supplied a detached one is created. If camera
    /// permission has not been granted, a grant is requested from the
    /// platform and the open is not attempted; the caller is expected to
    /// call `start` again after the grant.
    pub fn start(&mut self, facing: Facing, surface: Option<OutputSurface>) {
        self.stop();

        let ctx = EventCtx {
            service: Arc::clone(&self.service),
            listener: self.listener.clone(),
            config: self.config.clone(),
            shared: Arc::clone(&self.shared),
        };
        let worker = CallbackThread::spawn(move |sink, event| ctx.handle(sink, event));
        let sink = worker.sink();
        self.worker = Some(worker);

        let surface = surface.unwrap_or_else(OutputSurface::detached);

        let (camera_id, characteristics) = match self.resolve_camera(facing) {
            Ok(resolved) => resolved,
            Err(err) => {
                warn!(%facing, error = %err, "no usable camera for requested facing");
                return;
            },
        };

        let buffer_size = self
            .config
            .buffer_size
            .or_else(|| characteristics.preview_sizes.first().copied());

        {
            let mut state = lock(&self.shared);
            state.camera_id = Some(camera_id.clone());
            state.buffer_size = buffer_size;
            state.surface = Some(surface);
        }

        if !self.service.permission_granted() {
            debug!("camera permission not granted; requesting");
            self.service.request_permission();
            if let Some(listener) = &self.listener {
                listener.on_permission_required();
            }
            return;
        }

        // Phase moves to Opening before the request goes out, in case the
        // platform delivers the open callback synchronously.
        lock(&self.shared).phase = PreviewPhase::Opening;
        debug!(camera = %camera_id, "opening camera");
        if let Err(err) = self.service.open_camera(&camera_id, sink) {
            warn!(camera = %camera_id, error = %err, "failed to request camera open");
            lock(&self.shared).phase = PreviewPhase::Idle;
        }
    }

    /// Closes the session, device, and image reader, then quiesces and joins
    /// the background thread. Safe to call when nothing is open.
    pub fn stop(&mut self) {
        {
            let mut state = lock(&self.shared);
            state.phase = PreviewPhase::Closing;
            if let Some(mut session) = state.session.take() {
                session.close();
            }
            if let Some(mut device) = state.device.take() {
                debug!("closing camera device");
                device.close();
            }
            if let Some(mut reader) = state.image_reader.take() {
                reader.close();
            }
            state.request = None;
            state.surface = None;
        }

        // Handles are closed; the queue can now be torn down without any
        // callback observing a half-open session.
        if let Some(worker) = self.worker.take() {
            worker.quit();
        }

        lock(&self.shared).phase = PreviewPhase::Idle;
    }

    /// Alias kept for callers that phrase teardown as closing the camera.
    pub fn close_camera(&mut self) {
        self.stop();
    }

    pub fn phase(&self) -> PreviewPhase {
        lock(&self.shared).phase
    }

    /// Whether the background callback thread is running.
    pub fn background_alive(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| w.is_alive())
    }

    /// The display surface is used at the size the view requests.
    pub fn display_size_for_view(&self, width: u32, height: u32) -> (u32, u32) {
        (width, height)
    }

    pub fn is_camera_rotated(&self) -> bool {
        false
    }

    /// Picks a camera id for the requested facing.
    ///
    /// Lens-facing characteristics are consulted first; devices that expose
    /// no facing information fall back to positional selection (back camera
    /// first in the id list, front camera second).
    fn resolve_camera(
        &self,
        facing: Facing,
    ) -> Result<(String, CameraCharacteristics), CameraError> {
        let ids = self.service.camera_ids()?;
        if ids.is_empty() {
            return Err(CameraError::NoCamera);
        }

        for id in &ids {
            match self.service.characteristics(id) {
                Ok(ch) if ch.lens_facing == Some(facing) => return Ok((id.clone(), ch)),
                Ok(_) => {},
                Err(err) => debug!(camera = %id, error = %err, "characteristics query failed"),
            }
        }

        let index = match facing {
            Facing::Back => 0,
            Facing::Front => 1.min(ids.len() - 1),
        };
        let id = ids[index].clone();
        let characteristics = self.service.characteristics(&id).unwrap_or_default();
        Ok((id, characteristics))
    }
}

impl Drop for CameraSessionAdapter {
    fn drop(&mut self) {
        self.stop();
    }
}

impl EventCtx {
    fn handle(&self, sink: &EventSink, event: CameraEvent) {
        match event {
            CameraEvent::Opened(device) => self.on_opened(sink, device),
            CameraEvent::Disconnected => self.on_disconnected(),
            CameraEvent::Error(code) => self.on_error(code),
            CameraEvent::SessionConfigured(session) => self.on_session_configured(session),
            CameraEvent::SessionConfigureFailed => self.on_session_configure_failed(),
        }
    }

    fn on_opened(&self, sink: &EventSink, mut device: Box<dyn CameraDevice>) {
        let mut state = lock(&self.shared);
        if state.phase != PreviewPhase::Opening {
            // Stale open completing after the session was closed.
            debug!(phase = ?state.phase, "camera opened after close; discarding handle");
            device.close();
            return;
        }
        debug!(camera = ?state.camera_id, "camera device opened");

        if let (Some(surface), Some((width, height))) = (&state.surface, state.buffer_size) {
            surface.set_default_buffer_size(width, height);
        }

        let mut request = CaptureRequest::preview()
            .with_stabilization(self.config.stabilization)
            .with_control_mode(self.config.control_mode);
        if let Some(surface) = &state.surface {
            request.add_target(surface.clone());
        }

        if self.config.attach_image_reader {
            if let Some((width, height)) = state.buffer_size {
                match self.service.new_image_reader(width, height) {
                    Ok(reader) => state.image_reader = Some(reader),
                    Err(err) => warn!(error = %err, "failed to allocate image reader"),
                }
            }
        }

        match device.create_capture_session(&request, sink.clone()) {
            Ok(()) => {
                state.phase = PreviewPhase::SessionConfiguring;
                state.request = Some(request);
                state.device = Some(device);
            },
            Err(err) => {
                warn!(error = %err, "failed to create capture session");
                device.close();
                state.phase = PreviewPhase::Idle;
            },
        }

        // One-shot started notification, delivered at open time with the
        // surface the consumer should read from.
        let surface = state.surface.clone();
        drop(state);
        if let (Some(listener), Some(surface)) = (&self.listener, surface) {
            listener.on_camera_started(&surface);
        }
    }

    fn on_disconnected(&self) {
        let mut state = lock(&self.shared);
        debug!(camera = ?state.camera_id, "camera disconnected");
        if let Some(mut session) = state.session.take() {
            session.close();
        }
        if let Some(mut device) = state.device.take() {
            device.close();
        }
        state.phase = PreviewPhase::Idle;
    }

    fn on_error(&self, code: DeviceErrorCode) {
        let mut state = lock(&self.shared);
        error!(camera = ?state.camera_id, %code, "camera device error");
        if let Some(mut session) = state.session.take() {
            session.close();
        }
        if let Some(mut device) = state.device.take() {
            device.close();
        }
        // Terminal for this session; the caller decides whether to restart.
        state.phase = PreviewPhase::Idle;
    }

    fn on_session_configured(&self, mut session: Box<dyn CaptureSession>) {
        let mut state = lock(&self.shared);
        if state.device.is_none() {
            // The camera was closed while the session was configuring.
            debug!("capture session configured after camera close");
            return;
        }
        let Some(request) = state.request.clone() else {
            debug!("capture session configured without a pending request");
            return;
        };
        match session.set_repeating_request(&request) {
            Ok(()) => {
                debug!("preview streaming");
                state.session = Some(session);
                state.phase = PreviewPhase::Streaming;
            },
            Err(err) => {
                warn!(error = %err, "failed to submit repeating preview request");
                state.session = Some(session);
            },
        }
    }

    fn on_session_configure_failed(&self) {
        warn!("capture session configuration failed");
        if let Some(listener) = &self.listener {
            listener.on_configure_failed();
        }
    }
}

fn lock(shared: &Arc<Mutex<SessionState>>) -> MutexGuard<'_, SessionState> {
    shared.lock().unwrap_or_else(|p| p.into_inner())
}
