use std::collections::HashMap;

use crate::error::AssetLoadError;
use crate::types::{AssetDescriptor, RenderableAsset, RenderableContent, DEFAULT_VIEW_LAYOUT};

/// Pixel size of an embedded view layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewLayout {
    pub width_px: u32,
    pub height_px: u32,
}

/// Registry of view layouts that can be turned into flat renderables
#[derive(Debug, Clone, Default)]
pub struct ViewLoader {
    layouts: HashMap<String, ViewLayout>,
}

impl ViewLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the title card layout
    pub fn with_builtin() -> Self {
        let mut loader = Self::new();
        loader.register(
            DEFAULT_VIEW_LAYOUT,
            ViewLayout {
                width_px: 400,
                height_px: 120,
            },
        );
        loader
    }

    pub fn register(&mut self, name: impl Into<String>, layout: ViewLayout) {
        self.layouts.insert(name.into(), layout);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.layouts.contains_key(name)
    }

    pub fn build(&self, name: &str) -> Result<RenderableAsset, AssetLoadError> {
        let layout = self
            .layouts
            .get(name)
            .ok_or_else(|| AssetLoadError::ResourceMissing(name.to_string()))?;

        Ok(RenderableAsset {
            descriptor: AssetDescriptor::View {
                layout: name.to_string(),
            },
            content: RenderableContent::View {
                layout: name.to_string(),
                width_px: layout.width_px,
                height_px: layout.height_px,
            },
        })
    }
}
