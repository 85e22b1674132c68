use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::math::LocalTransform;
use crate::types::AssetDescriptor;

pub const DEFAULT_TARGET_IMAGE: &str = "default";
pub const DEFAULT_VERTICAL_SHIFT: f32 = -10.0;
pub const DEFAULT_ROTATION_AXIS: [f32; 3] = [1.0, 0.0, 0.0];
pub const DEFAULT_ROTATION_DEGREES: f32 = -90.0;
pub const DEFAULT_SCALE: f32 = 0.2;

/// How a tracked image's name is compared with the target identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    Exact,
    #[default]
    Contains,
}

impl MatchRule {
    pub fn matches(self, name: &str, target: &str) -> bool {
        match self {
            MatchRule::Exact => name == target,
            MatchRule::Contains => name.contains(target),
        }
    }
}

/// What happens after an asset load fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RetryPolicy {
    /// A failed load is final for the session
    #[default]
    Never,
    /// Go back to waiting; the next qualifying sighting requests again
    OnNextSighting { max_attempts: u32 },
}

impl RetryPolicy {
    /// Whether another request may follow `failed` failed attempts
    pub fn allows_retry(self, failed: u32) -> bool {
        match self {
            RetryPolicy::Never => false,
            RetryPolicy::OnNextSighting { max_attempts } => failed < max_attempts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub target_image: String,
    pub match_rule: MatchRule,
    /// Offset along the anchor's Y axis, in scene units
    pub vertical_shift: f32,
    pub rotation_axis: [f32; 3],
    pub rotation_degrees: f32,
    pub scale: f32,
    pub asset: AssetDescriptor,
    pub retry: RetryPolicy,
    /// Frame-time budget for one asset request; `None` waits forever
    pub load_timeout_secs: Option<f32>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            target_image: DEFAULT_TARGET_IMAGE.to_string(),
            match_rule: MatchRule::default(),
            vertical_shift: DEFAULT_VERTICAL_SHIFT,
            rotation_axis: DEFAULT_ROTATION_AXIS,
            rotation_degrees: DEFAULT_ROTATION_DEGREES,
            scale: DEFAULT_SCALE,
            asset: AssetDescriptor::default(),
            retry: RetryPolicy::default(),
            load_timeout_secs: None,
        }
    }
}

impl PlacementConfig {
    /// Local transform of the placed node relative to its anchor
    pub fn local_transform(&self) -> LocalTransform {
        LocalTransform::new(
            Vec3::new(0.0, self.vertical_shift, 0.0),
            LocalTransform::axis_angle_degrees(
                Vec3::from_array(self.rotation_axis),
                self.rotation_degrees,
            ),
            self.scale,
        )
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.target_image.is_empty(), "placement.target_image must not be empty");
        ensure!(
            self.scale.is_finite() && self.scale > 0.0,
            "placement.scale must be positive, got {}",
            self.scale
        );
        ensure!(
            self.vertical_shift.is_finite() && self.rotation_degrees.is_finite(),
            "placement transform values must be finite"
        );
        ensure!(
            Vec3::from_array(self.rotation_axis).length_squared() > 0.0,
            "placement.rotation_axis must be non-zero"
        );
        if let RetryPolicy::OnNextSighting { max_attempts } = self.retry {
            ensure!(max_attempts > 0, "placement.retry.max_attempts must be at least 1");
        }
        if let Some(secs) = self.load_timeout_secs {
            ensure!(secs > 0.0, "placement.load_timeout_secs must be positive, got {secs}");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name the reference image is registered under
    pub reference_image_name: String,
    pub reference_image_path: Option<PathBuf>,
    pub plane_finding: bool,
    /// Use automatic depth when the device supports it
    pub prefer_automatic_depth: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reference_image_name: DEFAULT_TARGET_IMAGE.to_string(),
            reference_image_path: None,
            plane_finding: false,
            prefer_automatic_depth: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub placement: PlacementConfig,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config
            .placement
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Load `path` when given, otherwise fall back to the built-in defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
