//! Stand-ins for the external collaborators: a scripted tracker, an
//! in-memory scene graph, controllable asset loaders and a recording
//! notifier. Used by the demo driver, the tests and the bench.

mod loaders;
mod memory_scene;
mod notifier;
mod scripted_tracker;

pub use loaders::{DelayedLoader, FixtureLoader, ManualLoader};
pub use memory_scene::{InMemoryScene, SceneNode};
pub use notifier::RecordingNotifier;
pub use scripted_tracker::{FixedRateFrames, ScriptedTracker};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock ignoring poisoning; sim state stays usable after a panicking test thread
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
