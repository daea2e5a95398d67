use serde::{Deserialize, Serialize};

/// Keys the demos react to. Everything else collapses into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    /// Move the camera along its view direction.
    Forward,
    /// Move the camera against its view direction.
    Backward,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Platform-neutral input event, queued by the window layer and drained by
/// the frame loop once per frame in arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key { key: Key, state: KeyState },
    /// Cursor moved to `(x, y)` window pixels, `(xrel, yrel)` since the last
    /// motion event.
    PointerMotion { x: f32, y: f32, xrel: f32, yrel: f32 },
    /// The window manager asked the window to close.
    CloseRequested,
}

/// Which Escape transition ends a demo.
///
/// The quad demo quits when Escape is released, the raymarch demo as soon
/// as it is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuitTrigger {
    OnRelease,
    OnPress,
}

/// Returns true when `event` should terminate the frame loop.
pub fn quit_requested(trigger: QuitTrigger, event: &InputEvent) -> bool {
    match (trigger, event) {
        (_, InputEvent::CloseRequested) => true,
        (
            QuitTrigger::OnRelease,
            InputEvent::Key {
                key: Key::Escape,
                state: KeyState::Released,
            },
        ) => true,
        (
            QuitTrigger::OnPress,
            InputEvent::Key {
                key: Key::Escape,
                state: KeyState::Pressed,
            },
        ) => true,
        _ => false,
    }
}

/// Builds [`InputEvent::PointerMotion`] events from the two halves the
/// platform reports separately: the cursor's window position and raw
/// relative mouse motion.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    position: (f32, f32),
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor moved to `(x, y)` window pixels. Carries no rotation.
    pub fn moved_to(&mut self, x: f32, y: f32) -> InputEvent {
        self.position = (x, y);
        InputEvent::PointerMotion {
            x,
            y,
            xrel: 0.0,
            yrel: 0.0,
        }
    }

    /// Raw mouse motion of `(xrel, yrel)`, reported at the last known
    /// cursor position. Not bounded by the window edges.
    pub fn relative(&mut self, xrel: f32, yrel: f32) -> InputEvent {
        let (x, y) = self.position;
        InputEvent::PointerMotion { x, y, xrel, yrel }
    }

    pub fn position(&self) -> (f32, f32) {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escape(state: KeyState) -> InputEvent {
        InputEvent::Key {
            key: Key::Escape,
            state,
        }
    }

    #[test]
    fn release_trigger() {
        assert!(quit_requested(QuitTrigger::OnRelease, &escape(KeyState::Released)));
        assert!(!quit_requested(QuitTrigger::OnRelease, &escape(KeyState::Pressed)));
    }

    #[test]
    fn press_trigger() {
        assert!(quit_requested(QuitTrigger::OnPress, &escape(KeyState::Pressed)));
        assert!(!quit_requested(QuitTrigger::OnPress, &escape(KeyState::Released)));
    }

    #[test]
    fn close_always_quits() {
        assert!(quit_requested(QuitTrigger::OnPress, &InputEvent::CloseRequested));
        assert!(quit_requested(QuitTrigger::OnRelease, &InputEvent::CloseRequested));
    }

    #[test]
    fn other_events_do_not_quit() {
        let events = [
            InputEvent::Key {
                key: Key::Forward,
                state: KeyState::Pressed,
            },
            InputEvent::Key {
                key: Key::Other,
                state: KeyState::Released,
            },
            InputEvent::PointerMotion {
                x: 1.0,
                y: 2.0,
                xrel: 3.0,
                yrel: 4.0,
            },
        ];
        for event in &events {
            assert!(!quit_requested(QuitTrigger::OnPress, event));
            assert!(!quit_requested(QuitTrigger::OnRelease, event));
        }
    }

    #[test]
    fn cursor_position_has_no_delta() {
        let mut tracker = PointerTracker::new();
        assert_eq!(
            tracker.moved_to(10.0, 20.0),
            InputEvent::PointerMotion {
                x: 10.0,
                y: 20.0,
                xrel: 0.0,
                yrel: 0.0
            }
        );
        assert_eq!(tracker.position(), (10.0, 20.0));
    }

    #[test]
    fn raw_motion_uses_last_cursor_position() {
        let mut tracker = PointerTracker::new();
        assert_eq!(
            tracker.relative(3.0, -4.0),
            InputEvent::PointerMotion {
                x: 0.0,
                y: 0.0,
                xrel: 3.0,
                yrel: -4.0
            }
        );

        tracker.moved_to(15.0, 12.0);
        // Deltas pass through unchanged even when far larger than the window.
        assert_eq!(
            tracker.relative(5000.0, 0.0),
            InputEvent::PointerMotion {
                x: 15.0,
                y: 12.0,
                xrel: 5000.0,
                yrel: 0.0
            }
        );
        assert_eq!(tracker.position(), (15.0, 12.0));
    }
}
