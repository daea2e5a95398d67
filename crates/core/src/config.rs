//! Demo configuration: built-in defaults per variant, optionally
//! overridden by a YAML file.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::DemoError;
use crate::input::QuitTrigger;

/// The two demo programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Colored quad with a fixed projection.
    Quad,
    /// Free-look camera, color lookup texture and octree block.
    Raymarch,
}

impl Variant {
    /// Whether the variant binds the `octree` block and `colors` texture.
    pub fn uses_scene_resources(self) -> bool {
        matches!(self, Variant::Raymarch)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DemoConfig {
    pub variant: Variant,
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    /// Image decoded into the `colors` lookup texture.
    pub color_lookup: Option<PathBuf>,
    pub clear_color: [f64; 4],
    pub quit_trigger: QuitTrigger,
    /// Pointer pixels to radians, applied with inverted sign.
    pub motion_scale: f32,
    pub move_speed: f32,
    pub frame_delay_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self::quad()
    }
}

impl DemoConfig {
    pub fn quad() -> Self {
        Self {
            variant: Variant::Quad,
            title: String::new(),
            width: 800,
            height: 600,
            vertex_shader: PathBuf::from("shader.vert"),
            fragment_shader: PathBuf::from("shader.frag"),
            color_lookup: None,
            clear_color: [0.5, 0.0, 0.0, 0.0],
            quit_trigger: QuitTrigger::OnRelease,
            motion_scale: 1.0 / 800.0,
            move_speed: 0.5,
            frame_delay_ms: 1,
        }
    }

    pub fn raymarch() -> Self {
        Self {
            variant: Variant::Raymarch,
            color_lookup: Some(PathBuf::from("colors.png")),
            quit_trigger: QuitTrigger::OnPress,
            ..Self::quad()
        }
    }

    /// Read a YAML override file on top of `base`. Keys missing from the
    /// file keep their value in `base`.
    pub fn load(path: impl AsRef<Path>, base: Self) -> Result<Self, DemoError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| DemoError::file_open(path, e))?;
        Self::from_yaml(&text, base).map_err(|message| DemoError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    fn from_yaml(text: &str, base: Self) -> Result<Self, String> {
        let overrides: Value = serde_yaml::from_str(text).map_err(|e| e.to_string())?;
        let mut merged = serde_yaml::to_value(base).map_err(|e| e.to_string())?;

        match (&mut merged, overrides) {
            (_, Value::Null) => {}
            (Value::Mapping(fields), Value::Mapping(overrides)) => {
                for (key, value) in overrides {
                    if !fields.contains_key(&key) {
                        return Err(format!("unknown field {key:?}"));
                    }
                    fields.insert(key, value);
                }
            }
            _ => return Err("expected a mapping of settings".into()),
        }

        let config: Self = serde_yaml::from_value(merged).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!("window size {}x{} is empty", self.width, self.height));
        }
        if self.variant.uses_scene_resources() && self.color_lookup.is_none() {
            return Err("raymarch variant needs a color_lookup image".into());
        }
        Ok(())
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}
