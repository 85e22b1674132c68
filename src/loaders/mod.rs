pub mod gltf;
pub mod view;

pub use self::gltf::load_model;
pub use view::{ViewLayout, ViewLoader};

use futures::future::{self, FutureExt};

use crate::traits::{AssetFuture, AssetLoader};
use crate::types::AssetDescriptor;

/// Local-resource loader: embedded view layouts and glTF files on disk
#[derive(Debug, Clone, Default)]
pub struct ResourceLoader {
    views: ViewLoader,
}

impl ResourceLoader {
    pub fn new(views: ViewLoader) -> Self {
        Self { views }
    }

    /// Loader knowing the built-in layouts
    pub fn with_builtin_views() -> Self {
        Self::new(ViewLoader::with_builtin())
    }

    pub fn views_mut(&mut self) -> &mut ViewLoader {
        &mut self.views
    }
}

impl AssetLoader for ResourceLoader {
    fn load(&self, descriptor: &AssetDescriptor) -> AssetFuture {
        match descriptor {
            AssetDescriptor::View { layout } => future::ready(self.views.build(layout)).boxed(),
            AssetDescriptor::Model { path } => {
                let path = path.clone();
                // Parsing happens when the spawned task polls, never on the caller
                async move { load_model(&path) }.boxed()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssetLoadError;
    use crate::types::RenderableContent;
    use futures::executor::block_on;
    use std::path::PathBuf;

    #[test]
    fn test_builtin_view_loads() {
        let loader = ResourceLoader::with_builtin_views();
        let asset = block_on(loader.load(&AssetDescriptor::default())).unwrap();
        assert!(matches!(asset.content, RenderableContent::View { .. }));
        assert_eq!(asset.descriptor, AssetDescriptor::default());
    }

    #[test]
    fn test_unknown_view_is_missing() {
        let loader = ResourceLoader::default();
        let result = block_on(loader.load(&AssetDescriptor::View {
            layout: "nope".to_string(),
        }));
        assert_eq!(result, Err(AssetLoadError::ResourceMissing("nope".to_string())));
    }

    #[test]
    fn test_missing_model_is_io_error() {
        let loader = ResourceLoader::default();
        let result = block_on(loader.load(&AssetDescriptor::Model {
            path: PathBuf::from("definitely/missing/model.glb"),
        }));
        assert!(matches!(result, Err(AssetLoadError::Io { .. })));
    }
}
