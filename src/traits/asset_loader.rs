use futures::future::BoxFuture;

use crate::error::AssetLoadError;
use crate::types::{AssetDescriptor, RenderableAsset};

/// Result of an asynchronous renderable build
pub type AssetFuture = BoxFuture<'static, Result<RenderableAsset, AssetLoadError>>;

/// Builds renderables asynchronously
pub trait AssetLoader: Send + Sync {
    /// Start building the renderable described by `descriptor`.
    /// Must return without blocking; the work happens when the future is polled.
    fn load(&self, descriptor: &AssetDescriptor) -> AssetFuture;
}
