pub mod asset_loader;
pub mod notifier;
pub mod scene;
pub mod spawner;
pub mod tracking;

pub use asset_loader::*;
pub use notifier::*;
pub use scene::*;
pub use spawner::*;
pub use tracking::*;
