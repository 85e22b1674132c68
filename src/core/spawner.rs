use futures::executor::LocalSpawner;
use futures::future::BoxFuture;
use futures::task::LocalSpawnExt;

use crate::traits::TaskSpawner;

/// Runs each task to completion on its own OS thread
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSpawner;

impl TaskSpawner for ThreadSpawner {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        let spawned = std::thread::Builder::new()
            .name("asset-load".to_string())
            .spawn(move || pollster::block_on(task));
        if let Err(err) = spawned {
            // The task is dropped here, which reports the load as cancelled
            log::error!("failed to spawn asset-load thread: {err}");
        }
    }
}

/// Single-threaded pool; tasks only run when the pool is driven
impl TaskSpawner for LocalSpawner {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        if let Err(err) = self.spawn_local(task) {
            log::error!("failed to spawn asset-load task: {err}");
        }
    }
}
