use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::{MatchRule, SessionConfig};
use crate::error::SessionError;
use crate::traits::{Notice, Notifier};

/// Message shown when the reference image cannot be registered
pub const SETUP_FAILED_MESSAGE: &str = "Unable to setup augmented image database";

/// Encoded reference bitmap, decoded by the tracking subsystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceImage {
    pub bytes: Vec<u8>,
    pub source: Option<PathBuf>,
}

impl ReferenceImage {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            source: None,
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read reference image {}", path.display()))?;
        Ok(Self {
            bytes,
            source: Some(path.to_path_buf()),
        })
    }
}

/// Named reference images the tracker should look for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceImageDatabase {
    images: Vec<(String, ReferenceImage)>,
}

impl ReferenceImageDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `image` under `name`, returning its index
    pub fn add_image(
        &mut self,
        name: impl Into<String>,
        image: ReferenceImage,
    ) -> Result<usize, SessionError> {
        let name = name.into();
        if image.bytes.is_empty() {
            return Err(SessionError::EmptyImage(name));
        }
        if self.contains(&name) {
            return Err(SessionError::DuplicateImage(name));
        }
        self.images.push((name, image));
        Ok(self.images.len() - 1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.images.iter().any(|(existing, _)| existing == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.images.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// What the device can do
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionCapabilities {
    pub automatic_depth_supported: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthMode {
    Disabled,
    Automatic,
}

/// Configuration handed to the tracking subsystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSetup {
    pub plane_finding: bool,
    pub depth_mode: DepthMode,
    pub full_frame_rate: bool,
    pub image_database: Option<ReferenceImageDatabase>,
}

impl SessionSetup {
    /// Whether any registered image can satisfy `target` under `rule`
    pub fn can_track(&self, target: &str, rule: MatchRule) -> bool {
        self.image_database
            .as_ref()
            .is_some_and(|db| db.names().any(|name| rule.matches(name, target)))
    }
}

/// Read the configured reference image, if any. Failures are logged, not fatal.
pub fn load_reference_image(config: &SessionConfig) -> Option<ReferenceImage> {
    let path = config.reference_image_path.as_ref()?;
    match ReferenceImage::from_path(path) {
        Ok(image) => Some(image),
        Err(err) => {
            log::error!("{err:#}");
            None
        }
    }
}

/// Build the session setup, registering `reference` under the configured name.
///
/// Without a usable reference image the session still runs; it just never
/// reports the image, and the user gets a short notice.
pub fn configure_session(
    config: &SessionConfig,
    capabilities: SessionCapabilities,
    reference: Option<ReferenceImage>,
    notifier: &dyn Notifier,
) -> SessionSetup {
    let depth_mode = if config.prefer_automatic_depth && capabilities.automatic_depth_supported {
        DepthMode::Automatic
    } else {
        DepthMode::Disabled
    };

    let image_database = reference.and_then(|image| {
        let mut database = ReferenceImageDatabase::new();
        match database.add_image(config.reference_image_name.clone(), image) {
            Ok(_) => Some(database),
            Err(err) => {
                log::error!("reference image rejected: {err}");
                None
            }
        }
    });

    if image_database.is_none() {
        notifier.notify(Notice::short(SETUP_FAILED_MESSAGE));
    }

    log::info!(
        "session configured: plane finding {}, depth {:?}, {} reference image(s)",
        if config.plane_finding { "on" } else { "off" },
        depth_mode,
        image_database.as_ref().map_or(0, ReferenceImageDatabase::len)
    );

    SessionSetup {
        plane_finding: config.plane_finding,
        depth_mode,
        full_frame_rate: true,
        image_database,
    }
}
