//! The per-frame state machine shared by both demos.
//!
//! A frame is: clear, drain input in arrival order, refresh the per-frame
//! uniforms, draw the quad, present, then yield briefly. Observing a quit
//! event ends the loop on the spot; nothing after the clear is issued.

use glam::Vec2;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crate::camera::{Camera, Motion};
use crate::config::DemoConfig;
use crate::input::{InputEvent, Key, KeyState, QuitTrigger, quit_requested};
use crate::projection::{ViewVolume, orthographic};
use crate::uniforms::{Globals, QUAD_VERTEX_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// Destination of one frame's draw commands.
///
/// Calls arrive in frame order: `clear`, then `upload_globals`, `draw` and
/// `present` unless the frame ended in a quit.
pub trait FrameSink {
    fn clear(&mut self);
    fn upload_globals(&mut self, globals: &Globals);
    fn draw(&mut self, vertex_count: u32);
    fn present(&mut self);
}

/// A single call received by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum FrameCall {
    Clear,
    UploadGlobals(Globals),
    Draw(u32),
    Present,
}

/// Sink that records every call instead of rendering.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub calls: Vec<FrameCall>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, FrameCall::Draw(_)))
            .count()
    }
}

impl FrameSink for RecordingSink {
    fn clear(&mut self) {
        self.calls.push(FrameCall::Clear);
    }

    fn upload_globals(&mut self, globals: &Globals) {
        self.calls.push(FrameCall::UploadGlobals(*globals));
    }

    fn draw(&mut self, vertex_count: u32) {
        self.calls.push(FrameCall::Draw(vertex_count));
    }

    fn present(&mut self) {
        self.calls.push(FrameCall::Present);
    }
}

/// Shader clock: a coarse wall-clock seed advanced by a monotonic timer.
#[derive(Debug, Clone, Copy)]
struct ShaderClock {
    origin: f32,
    started: Instant,
}

impl ShaderClock {
    fn start() -> Self {
        // Whole seconds folded into an hour so f32 keeps sub-millisecond steps.
        let origin = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() % 3600)
            .unwrap_or(0) as f32;
        Self {
            origin,
            started: Instant::now(),
        }
    }

    fn now(&self) -> f32 {
        self.origin + self.started.elapsed().as_secs_f32()
    }
}

/// Owns the camera and uniform state and runs frames against a
/// [`FrameSink`].
#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
    camera: Camera,
    globals: Globals,
    clock: ShaderClock,
    quit_trigger: QuitTrigger,
    motion_scale: f32,
    move_speed: f32,
    frame_delay: Duration,
    frames: u64,
}

impl FrameLoop {
    pub fn new(config: &DemoConfig) -> Self {
        let camera = Camera::default();
        let projection = orthographic(&ViewVolume::screen(config.width, config.height));
        let resolution = Vec2::new(config.width as f32, config.height as f32);
        let clock = ShaderClock::start();

        let mut globals = Globals::new(projection, resolution, &camera);
        globals.time = clock.now();

        Self {
            state: LoopState::Running,
            camera,
            globals,
            clock,
            quit_trigger: config.quit_trigger,
            motion_scale: config.motion_scale,
            move_speed: config.move_speed,
            frame_delay: config.frame_delay(),
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Uniform values as last uploaded (or as initialised, before the
    /// first frame).
    pub fn globals(&self) -> &Globals {
        &self.globals
    }

    /// Frames that ran to presentation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame, consuming `events` in order.
    ///
    /// Returns the loop state after the frame. Once `Terminated`, further
    /// calls do nothing.
    pub fn run_frame<I>(&mut self, events: I, sink: &mut impl FrameSink) -> LoopState
    where
        I: IntoIterator<Item = InputEvent>,
    {
        if self.state == LoopState::Terminated {
            return self.state;
        }

        sink.clear();

        for event in events {
            if quit_requested(self.quit_trigger, &event) {
                tracing::info!(?event, "quit requested");
                self.state = LoopState::Terminated;
                return self.state;
            }
            self.dispatch(&event);
        }

        self.globals.time = self.clock.now();
        self.globals.set_camera_position(self.camera.position);
        sink.upload_globals(&self.globals);

        sink.draw(QUAD_VERTEX_COUNT);
        sink.present();
        self.frames += 1;

        if !self.frame_delay.is_zero() {
            std::thread::sleep(self.frame_delay);
        }

        self.state
    }

    /// End the loop outside a frame, as when the window is closed.
    ///
    /// No clear, draw or present is issued; later frames do nothing.
    pub fn close(&mut self) -> LoopState {
        if self.state == LoopState::Running {
            tracing::info!(frames = self.frames, "window closed");
            self.state = LoopState::Terminated;
        }
        self.state
    }

    /// Rotation deltas for a pointer motion: scaled, both axes inverted.
    pub fn look_deltas(&self, xrel: f32, yrel: f32) -> (f32, f32) {
        (-xrel * self.motion_scale, -yrel * self.motion_scale)
    }

    fn dispatch(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerMotion { x, y, xrel, yrel } => {
                let (horizontal, vertical) = self.look_deltas(xrel, yrel);
                self.camera.rotate(horizontal, vertical);
                self.globals.set_camera_direction(self.camera.direction);
                self.globals.mouse = [x, y];
                tracing::debug!(horizontal, vertical, direction = ?self.camera.direction, "look");
            }
            InputEvent::Key {
                key,
                state: KeyState::Pressed,
            } => {
                let motion = match key {
                    Key::Forward => Motion::Forward,
                    Key::Backward => Motion::Backward,
                    _ => return,
                };
                self.camera.translate(motion, self.move_speed);
                tracing::debug!(?motion, position = ?self.camera.position, "move");
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_loop(config: DemoConfig) -> FrameLoop {
        FrameLoop::new(&DemoConfig {
            frame_delay_ms: 0,
            ..config
        })
    }

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state }
    }

    #[test]
    fn plain_frame_sequence() {
        let mut frame_loop = test_loop(DemoConfig::quad());
        let mut sink = RecordingSink::new();

        let state = frame_loop.run_frame([], &mut sink);

        assert_eq!(state, LoopState::Running);
        assert_eq!(sink.calls.len(), 4);
        assert_eq!(sink.calls[0], FrameCall::Clear);
        assert!(matches!(sink.calls[1], FrameCall::UploadGlobals(_)));
        assert_eq!(sink.calls[2], FrameCall::Draw(6));
        assert_eq!(sink.calls[3], FrameCall::Present);
        assert_eq!(frame_loop.frames(), 1);
    }

    #[test]
    fn quit_first_event_stops_before_draw() {
        let mut frame_loop = test_loop(DemoConfig::raymarch());
        let mut sink = RecordingSink::new();

        let state = frame_loop.run_frame(
            [
                key(Key::Escape, KeyState::Pressed),
                key(Key::Forward, KeyState::Pressed),
            ],
            &mut sink,
        );

        assert_eq!(state, LoopState::Terminated);
        assert_eq!(sink.calls, vec![FrameCall::Clear]);
        assert_eq!(sink.draw_count(), 0);
        // Events after the quit are not processed.
        assert_eq!(frame_loop.camera(), &Camera::default());
    }

    #[test]
    fn terminated_loop_is_inert() {
        let mut frame_loop = test_loop(DemoConfig::quad());
        let mut sink = RecordingSink::new();
        frame_loop.run_frame([InputEvent::CloseRequested], &mut sink);
        let state = frame_loop.run_frame([], &mut sink);
        assert_eq!(state, LoopState::Terminated);
        assert_eq!(sink.calls, vec![FrameCall::Clear]);
    }

    #[test]
    fn close_ends_loop_without_frame() {
        let mut frame_loop = test_loop(DemoConfig::quad());
        let mut sink = RecordingSink::new();
        frame_loop.run_frame([], &mut sink);

        assert_eq!(frame_loop.close(), LoopState::Terminated);
        assert_eq!(frame_loop.state(), LoopState::Terminated);

        let state = frame_loop.run_frame([key(Key::Forward, KeyState::Pressed)], &mut sink);
        assert_eq!(state, LoopState::Terminated);
        assert_eq!(sink.calls.len(), 4);
        assert_eq!(frame_loop.frames(), 1);
        assert_eq!(frame_loop.camera(), &Camera::default());
    }

    #[test]
    fn quad_variant_quits_on_release_only() {
        let mut frame_loop = test_loop(DemoConfig::quad());
        let mut sink = RecordingSink::new();

        let state = frame_loop.run_frame([key(Key::Escape, KeyState::Pressed)], &mut sink);
        assert_eq!(state, LoopState::Running);

        let state = frame_loop.run_frame([key(Key::Escape, KeyState::Released)], &mut sink);
        assert_eq!(state, LoopState::Terminated);
        assert_eq!(sink.draw_count(), 1);
    }

    #[test]
    fn raymarch_variant_ignores_release() {
        let mut frame_loop = test_loop(DemoConfig::raymarch());
        let mut sink = RecordingSink::new();
        let state = frame_loop.run_frame([key(Key::Escape, KeyState::Released)], &mut sink);
        assert_eq!(state, LoopState::Running);
    }

    #[test]
    fn motion_scale_and_inversion() {
        let frame_loop = test_loop(DemoConfig::raymarch());
        assert_eq!(frame_loop.look_deltas(800.0, 0.0), (-1.0, -0.0));
        assert_eq!(frame_loop.look_deltas(0.0, -400.0), (-0.0, 0.5));
    }

    #[test]
    fn pointer_motion_rotates_camera() {
        let mut frame_loop = test_loop(DemoConfig::raymarch());
        let mut sink = RecordingSink::new();

        frame_loop.run_frame(
            [InputEvent::PointerMotion {
                x: 400.0,
                y: 300.0,
                xrel: 800.0,
                yrel: 0.0,
            }],
            &mut sink,
        );

        let mut expected = Camera::default();
        expected.rotate(-1.0, 0.0);
        assert_eq!(frame_loop.camera(), &expected);

        let globals = frame_loop.globals();
        assert_eq!(globals.mouse, [400.0, 300.0]);
        assert_eq!(globals.camera_direction, expected.direction.to_array());
        assert!(matches!(&sink.calls[1], FrameCall::UploadGlobals(g) if g.mouse == [400.0, 300.0]));
    }

    #[test]
    fn movement_keys_translate() {
        let mut frame_loop = test_loop(DemoConfig::raymarch());
        let mut sink = RecordingSink::new();

        frame_loop.run_frame(
            [
                key(Key::Forward, KeyState::Pressed),
                key(Key::Forward, KeyState::Pressed),
                key(Key::Backward, KeyState::Pressed),
                key(Key::Forward, KeyState::Released),
                key(Key::Other, KeyState::Pressed),
            ],
            &mut sink,
        );

        let mut expected = Camera::default();
        expected.translate(Motion::Forward, 0.5);
        assert!(
            frame_loop
                .camera()
                .position
                .abs_diff_eq(expected.position, 1e-5)
        );
        assert_eq!(
            frame_loop.globals().camera_position,
            frame_loop.camera().position.to_array()
        );
    }

    #[test]
    fn projection_is_fixed_across_frames() {
        let mut frame_loop = test_loop(DemoConfig::quad());
        let before = frame_loop.globals().projection;
        let mut sink = RecordingSink::new();
        for _ in 0..3 {
            frame_loop.run_frame([], &mut sink);
        }
        assert_eq!(frame_loop.globals().projection, before);
        assert_eq!(frame_loop.frames(), 3);
    }

    #[test]
    fn time_advances() {
        let mut frame_loop = test_loop(DemoConfig::raymarch());
        let start = frame_loop.globals().time;
        let mut sink = RecordingSink::new();
        frame_loop.run_frame([], &mut sink);
        assert!(frame_loop.globals().time >= start);
        assert!(start < 3600.0 + 1.0);
    }
}
