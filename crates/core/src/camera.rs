use glam::Vec3;

/// Direction of a translation along the view direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Forward,
    Backward,
}

/// Free-look camera: a unit view direction and a position.
///
/// The rotation model is approximate: pitch input is added straight onto
/// `direction.y` before renormalising instead of rotating about the
/// camera's right axis, so large vertical deltas bend the view towards the
/// pole faster than a spherical camera would.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub direction: Vec3,
    pub position: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            direction: Vec3::Z,
            position: Vec3::new(0.0, 0.0, -3.0),
        }
    }
}

impl Camera {
    pub fn new(direction: Vec3, position: Vec3) -> Self {
        Self {
            direction: direction.normalize(),
            position,
        }
    }

    /// Turn by `horizontal` radians in the xz-plane and nudge the view up
    /// or down by `vertical`, then restore unit length.
    ///
    /// A nudge that cancels the direction exactly leaves it unchanged.
    pub fn rotate(&mut self, horizontal: f32, vertical: f32) {
        let mut d = self.direction;
        d.y += vertical;

        let (sin, cos) = horizontal.sin_cos();
        let (x, z) = (d.x, d.z);
        d.x = x * cos - z * sin;
        d.z = x * sin + z * cos;

        if let Some(unit) = d.try_normalize() {
            self.direction = unit;
        }
    }

    /// Move along the view direction by `speed` units.
    pub fn translate(&mut self, motion: Motion, speed: f32) {
        let step = self.direction * speed;
        match motion {
            Motion::Forward => self.position += step,
            Motion::Backward => self.position -= step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    #[test]
    fn default_camera() {
        let cam = Camera::default();
        assert_eq!(cam.direction, Vec3::Z);
        assert!((cam.direction.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn quarter_turn_in_plane() {
        let mut cam = Camera::new(Vec3::X, Vec3::ZERO);
        cam.rotate(FRAC_PI_2, 0.0);
        // x' = x cos - z sin = 0, z' = x sin + z cos = 1
        assert!(cam.direction.abs_diff_eq(Vec3::Z, EPS), "{}", cam.direction);
        assert!((cam.direction.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn vertical_delta_is_added_before_normalising() {
        let mut cam = Camera::new(Vec3::Z, Vec3::ZERO);
        cam.rotate(0.0, 1.0);
        let expected = Vec3::new(0.0, 1.0, 1.0).normalize();
        assert!(cam.direction.abs_diff_eq(expected, EPS), "{}", cam.direction);
    }

    #[test]
    fn stays_unit_length() {
        let mut cam = Camera::default();
        let deltas = [
            (0.3, 0.0),
            (-1.2, 0.4),
            (0.0, -2.5),
            (3.9, 0.01),
            (-0.001, 7.0),
            (12.0, -0.75),
        ];
        for _ in 0..50 {
            for (h, v) in deltas {
                cam.rotate(h, v);
                assert!((cam.direction.length() - 1.0).abs() < EPS);
            }
        }
    }

    #[test]
    fn cancelling_nudge_keeps_direction() {
        let mut cam = Camera::new(Vec3::NEG_Y, Vec3::ZERO);
        cam.rotate(0.4, 1.0);
        assert_eq!(cam.direction, Vec3::NEG_Y);
    }

    #[test]
    fn forward_then_backward_returns_home() {
        let mut cam = Camera::new(Vec3::new(0.3, -0.2, 0.9), Vec3::new(1.0, 2.0, 3.0));
        let start = cam.position;
        cam.translate(Motion::Forward, 0.5);
        assert_ne!(cam.position, start);
        cam.translate(Motion::Backward, 0.5);
        assert!(cam.position.abs_diff_eq(start, EPS));
    }

    #[test]
    fn translate_moves_along_direction() {
        let mut cam = Camera::default();
        cam.translate(Motion::Forward, 2.0);
        assert!(cam.position.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), EPS));
    }
}
