use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use quadray_core::{
    DemoConfig, DemoError, FrameLoop, InputEvent, Key, KeyState, LoopState, PointerTracker,
};

use crate::gpu::WgpuBackend;
use crate::lookup::ColorLookup;
use crate::shaders::CompiledShaders;

/// Map a physical key to the demo key set.
pub fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::KeyW | KeyCode::ArrowUp => Key::Forward,
        KeyCode::KeyS | KeyCode::ArrowDown => Key::Backward,
        _ => Key::Other,
    }
}

fn map_state(state: ElementState) -> KeyState {
    match state {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    }
}

/// Raw mouse motion as a pointer event. Deltas keep flowing while the
/// cursor is pinned against a window edge.
fn mouse_motion(pointer: &mut PointerTracker, delta: (f64, f64)) -> InputEvent {
    pointer.relative(delta.0 as f32, delta.1 as f32)
}

/// GPU inputs handed over to the backend once the window exists.
struct GpuInputs {
    shaders: CompiledShaders,
    lookup: Option<ColorLookup>,
}

struct DemoApp {
    config: DemoConfig,
    frame_loop: FrameLoop,
    gpu_inputs: Option<GpuInputs>,
    window: Option<Arc<Window>>,
    backend: Option<WgpuBackend>,
    pointer: PointerTracker,
    pending: Vec<InputEvent>,
    error: Option<DemoError>,
}

impl DemoApp {
    fn new(config: DemoConfig, shaders: CompiledShaders, lookup: Option<ColorLookup>) -> Self {
        let frame_loop = FrameLoop::new(&config);
        Self {
            config,
            frame_loop,
            gpu_inputs: Some(GpuInputs { shaders, lookup }),
            window: None,
            backend: None,
            pointer: PointerTracker::new(),
            pending: Vec::new(),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: DemoError) {
        tracing::error!("{err}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), DemoError> {
        let Some(GpuInputs { shaders, lookup }) = self.gpu_inputs.take() else {
            return Ok(());
        };

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| DemoError::Platform(format!("create window: {e}")))?,
        );

        let backend = WgpuBackend::new(
            window.clone(),
            &self.config,
            shaders,
            lookup.as_ref(),
            self.frame_loop.globals(),
        )?;

        self.window = Some(window);
        self.backend = Some(backend);
        Ok(())
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.start(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                // Exits directly: no redraw may follow a close request.
                self.frame_loop.close();
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => {
                self.pending.push(InputEvent::Key {
                    key: map_key(code),
                    state: map_state(state),
                });
            }
            WindowEvent::CursorMoved { position, .. } => {
                let moved = self.pointer.moved_to(position.x as f32, position.y as f32);
                self.pending.push(moved);
            }
            WindowEvent::Resized(size) => {
                if let Some(backend) = &mut self.backend {
                    backend.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                let Some(backend) = &mut self.backend else {
                    return;
                };
                let state = self.frame_loop.run_frame(self.pending.drain(..), backend);
                if state == LoopState::Terminated {
                    tracing::info!(frames = self.frame_loop.frames(), "exiting");
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.window.is_some() {
                let motion = mouse_motion(&mut self.pointer, delta);
                self.pending.push(motion);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Load every input named by `config`, then run the demo.
///
/// Shaders are compiled (vertex first) and the color lookup decoded
/// before the event loop starts.
pub fn launch(config: DemoConfig) -> Result<(), DemoError> {
    let shaders = CompiledShaders::load(&config.vertex_shader, &config.fragment_shader)?;
    let lookup = match &config.color_lookup {
        Some(path) if config.variant.uses_scene_resources() => Some(ColorLookup::open(path)?),
        _ => None,
    };
    run(config, shaders, lookup)
}

/// Open the window and run the frame loop until quit.
///
/// Errors raised inside the event loop are returned once it has stopped.
pub fn run(
    config: DemoConfig,
    shaders: CompiledShaders,
    lookup: Option<ColorLookup>,
) -> Result<(), DemoError> {
    let event_loop =
        EventLoop::new().map_err(|e| DemoError::Platform(format!("event loop: {e}")))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = DemoApp::new(config, shaders, lookup);
    event_loop
        .run_app(&mut app)
        .map_err(|e| DemoError::Platform(format!("event loop: {e}")))?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
