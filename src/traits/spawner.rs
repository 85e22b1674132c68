use futures::future::BoxFuture;

/// Runs detached background tasks off the update thread
pub trait TaskSpawner {
    fn spawn(&self, task: BoxFuture<'static, ()>);
}
