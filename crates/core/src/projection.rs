use glam::{Mat4, Vec4};

/// Axis-aligned view volume for an orthographic projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewVolume {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl ViewVolume {
    /// Pixel-space volume for a `width` x `height` window with y pointing
    /// down: `(0, width, height, 0, 0, 100)`.
    pub fn screen(width: u32, height: u32) -> Self {
        Self {
            left: 0.0,
            right: width as f32,
            bottom: height as f32,
            top: 0.0,
            near: 0.0,
            far: 100.0,
        }
    }
}

/// Build the OpenGL-style orthographic projection for `volume`.
///
/// The returned matrix flattens (`Mat4::to_cols_array`) to the classic
/// 16-float table: scale factors on the diagonal and the translation in
/// elements 12..15. Bounds must be non-degenerate (`left != right`,
/// `bottom != top`, `near != far`); degenerate volumes produce non-finite
/// entries.
pub fn orthographic(volume: &ViewVolume) -> Mat4 {
    let ViewVolume {
        left,
        right,
        bottom,
        top,
        near,
        far,
    } = *volume;

    let width = right - left;
    let height = top - bottom;
    let depth = far - near;

    Mat4::from_cols(
        Vec4::new(2.0 / width, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 / height, 0.0, 0.0),
        Vec4::new(0.0, 0.0, -2.0 / depth, 0.0),
        Vec4::new(
            -(right + left) / width,
            -(top + bottom) / height,
            -(far + near) / depth,
            1.0,
        ),
    )
}
