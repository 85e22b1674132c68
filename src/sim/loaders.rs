use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::channel::oneshot;
use futures::future::{self, FutureExt};

use super::lock;
use crate::error::AssetLoadError;
use crate::traits::{AssetFuture, AssetLoader};
use crate::types::{AssetDescriptor, RenderableAsset};

/// Loader that answers every request with the same result, immediately
#[derive(Debug, Clone)]
pub struct FixtureLoader {
    result: Result<RenderableAsset, AssetLoadError>,
    requests: Arc<AtomicUsize>,
}

impl FixtureLoader {
    pub fn succeeding(asset: RenderableAsset) -> Self {
        Self {
            result: Ok(asset),
            requests: Arc::default(),
        }
    }

    pub fn failing(error: AssetLoadError) -> Self {
        Self {
            result: Err(error),
            requests: Arc::default(),
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl AssetLoader for FixtureLoader {
    fn load(&self, _descriptor: &AssetDescriptor) -> AssetFuture {
        self.requests.fetch_add(1, Ordering::SeqCst);
        future::ready(self.result.clone()).boxed()
    }
}

/// Loader whose requests stay pending until the test resolves them, in order.
/// Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct ManualLoader {
    pending: Arc<Mutex<VecDeque<oneshot::Sender<Result<RenderableAsset, AssetLoadError>>>>>,
    requests: Arc<AtomicUsize>,
}

impl ManualLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn pending(&self) -> usize {
        lock(&self.pending).len()
    }

    /// Complete the oldest pending request; `false` if none was waiting
    pub fn resolve_next(&self, result: Result<RenderableAsset, AssetLoadError>) -> bool {
        match lock(&self.pending).pop_front() {
            Some(tx) => tx.send(result).is_ok(),
            None => false,
        }
    }
}

impl AssetLoader for ManualLoader {
    fn load(&self, _descriptor: &AssetDescriptor) -> AssetFuture {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = oneshot::channel();
        lock(&self.pending).push_back(tx);
        async move { rx.await.unwrap_or(Err(AssetLoadError::Cancelled)) }.boxed()
    }
}

/// Adds fixed latency in front of another loader.
/// The delay blocks the polling thread, so pair it with a thread spawner.
#[derive(Debug, Clone)]
pub struct DelayedLoader<L> {
    inner: L,
    delay: Duration,
}

impl<L: AssetLoader> DelayedLoader<L> {
    pub fn new(inner: L, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

impl<L: AssetLoader> AssetLoader for DelayedLoader<L> {
    fn load(&self, descriptor: &AssetDescriptor) -> AssetFuture {
        let delay = self.delay;
        let inner = self.inner.load(descriptor);
        async move {
            std::thread::sleep(delay);
            inner.await
        }
        .boxed()
    }
}
