use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use log::{debug, info, warn};

use super::epoch::{Epoch, EpochCounter};
use super::placement::{place, Placement};
use super::poller::{Sighting, TrackerPoller};
use crate::config::PlacementConfig;
use crate::error::AssetLoadError;
use crate::frame::FrameSnapshot;
use crate::math::{LocalTransform, Pose};
use crate::traits::{AssetLoader, Notice, Notifier, SceneGraph, TaskSpawner};
use crate::types::RenderableAsset;

/// Message shown when the renderable cannot be built
pub const LOAD_FAILED_MESSAGE: &str = "Unable to load model";

/// Where the controller is in its one-shot placement
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementPhase {
    /// No qualifying image seen yet
    Waiting,
    /// Asset request in flight for the pose captured at `requested_at`
    Placing {
        epoch: Epoch,
        image_name: String,
        pose: Pose,
        requested_at: f32,
    },
    /// Terminal: content is anchored
    Placed(Placement),
    /// Terminal: the asset could not be built
    Failed(AssetLoadError),
}

/// Payload-free view of [`PlacementPhase`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Waiting,
    Placing,
    Placed,
    Failed,
}

/// Per-session placement state, owned by the controller
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementState {
    phase: PlacementPhase,
    requests_issued: u32,
    failed_attempts: u32,
}

impl PlacementState {
    pub fn new() -> Self {
        Self {
            phase: PlacementPhase::Waiting,
            requests_issued: 0,
            failed_attempts: 0,
        }
    }

    /// Set the moment a request is issued, not when the asset arrives
    pub fn placed(&self) -> bool {
        !matches!(self.phase, PlacementPhase::Waiting)
    }

    pub fn phase(&self) -> &PlacementPhase {
        &self.phase
    }

    pub fn kind(&self) -> PhaseKind {
        match self.phase {
            PlacementPhase::Waiting => PhaseKind::Waiting,
            PlacementPhase::Placing { .. } => PhaseKind::Placing,
            PlacementPhase::Placed(_) => PhaseKind::Placed,
            PlacementPhase::Failed(_) => PhaseKind::Failed,
        }
    }

    pub fn placement(&self) -> Option<&Placement> {
        match &self.phase {
            PlacementPhase::Placed(placement) => Some(placement),
            _ => None,
        }
    }

    pub fn requests_issued(&self) -> u32 {
        self.requests_issued
    }

    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }
}

impl Default for PlacementState {
    fn default() -> Self {
        Self::new()
    }
}

/// Observable outcome of a controller step
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementEvent {
    RequestIssued { image_name: String, attempt: u32 },
    Placed(Placement),
    Failed { error: AssetLoadError, retrying: bool },
    /// A completion from a retired request arrived and was discarded
    StaleCompletion { epoch: Epoch },
}

struct LoadCompletion {
    epoch: Epoch,
    result: Result<RenderableAsset, AssetLoadError>,
}

/// Delivers exactly one completion per request, reporting a dropped task as cancelled
struct CompletionSender {
    epoch: Epoch,
    tx: Option<Sender<LoadCompletion>>,
}

impl CompletionSender {
    fn send(mut self, result: Result<RenderableAsset, AssetLoadError>) {
        if let Some(tx) = self.tx.take() {
            // Receiver gone means the controller was dropped
            let _ = tx.send(LoadCompletion {
                epoch: self.epoch,
                result,
            });
        }
    }
}

impl Drop for CompletionSender {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(LoadCompletion {
                epoch: self.epoch,
                result: Err(AssetLoadError::Cancelled),
            });
        }
    }
}

/// Anchors content at the first confident sighting of the target image, once.
///
/// Driven from the update thread through [`PlacementController::on_frame`].
/// Asset loads run on the injected spawner; their results come back over a
/// channel and are only applied to the scene during a later `on_frame`.
pub struct PlacementController {
    config: PlacementConfig,
    local: LocalTransform,
    poller: TrackerPoller,
    state: PlacementState,
    epochs: EpochCounter,
    session_active: bool,
    loader: Arc<dyn AssetLoader>,
    spawner: Box<dyn TaskSpawner>,
    notifier: Box<dyn Notifier>,
    completions_tx: Sender<LoadCompletion>,
    completions_rx: Receiver<LoadCompletion>,
}

impl PlacementController {
    pub fn new(
        config: PlacementConfig,
        loader: Arc<dyn AssetLoader>,
        spawner: Box<dyn TaskSpawner>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let (completions_tx, completions_rx) = channel();
        Self {
            local: config.local_transform(),
            poller: TrackerPoller::from_config(&config),
            config,
            state: PlacementState::new(),
            epochs: EpochCounter::new(),
            session_active: true,
            loader,
            spawner,
            notifier,
            completions_tx,
            completions_rx,
        }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    pub fn state(&self) -> &PlacementState {
        &self.state
    }

    pub fn session_active(&self) -> bool {
        self.session_active
    }

    /// One update-thread step: apply finished loads, expire a stale request,
    /// then poll this frame's tracked images.
    pub fn on_frame(
        &mut self,
        frame: &FrameSnapshot,
        scene: &mut dyn SceneGraph,
    ) -> Vec<PlacementEvent> {
        let mut events = Vec::new();
        self.drain_completions(scene, &mut events);

        if !self.session_active {
            return events;
        }

        if let Some(event) = self.expire_request(frame.info.time) {
            events.push(event);
        }

        for sighting in self.poller.poll(frame) {
            if let Some(event) = self.handle_sighting(sighting, frame.info.time) {
                events.push(event);
            }
        }
        events
    }

    /// Feed one qualifying sighting. Only the first one while waiting issues a request.
    pub fn handle_sighting(&mut self, sighting: Sighting, now: f32) -> Option<PlacementEvent> {
        if !self.session_active || self.state.placed() {
            debug!("ignoring sighting of {:?} in {:?}", sighting.image_name, self.state.kind());
            return None;
        }

        let epoch = self.epochs.advance();
        self.state.requests_issued += 1;
        let attempt = self.state.requests_issued;

        // Flip the phase before the request leaves, so a second sighting in
        // the same frame cannot issue another one.
        self.state.phase = PlacementPhase::Placing {
            epoch,
            image_name: sighting.image_name.clone(),
            pose: sighting.pose,
            requested_at: now,
        };

        info!(
            "image {:?} tracking, requesting {} (attempt {attempt})",
            sighting.image_name, self.config.asset
        );

        let future = self.loader.load(&self.config.asset);
        let sender = CompletionSender {
            epoch,
            tx: Some(self.completions_tx.clone()),
        };
        self.spawner.spawn(Box::pin(async move {
            let result = future.await;
            sender.send(result);
        }));

        Some(PlacementEvent::RequestIssued {
            image_name: sighting.image_name,
            attempt,
        })
    }

    /// Retire any in-flight request; its completion will be discarded
    pub fn end_session(&mut self) {
        let retired = self.epochs.advance();
        self.session_active = false;
        info!("session ended (epoch now {})", retired.value());
    }

    /// Start a fresh session: waiting again, with a new epoch
    pub fn begin_session(&mut self) {
        self.epochs.advance();
        self.state = PlacementState::new();
        self.session_active = true;
        info!("session started");
    }

    fn drain_completions(&mut self, scene: &mut dyn SceneGraph, events: &mut Vec<PlacementEvent>) {
        while let Ok(completion) = self.completions_rx.try_recv() {
            let in_flight = match &self.state.phase {
                PlacementPhase::Placing { epoch, pose, .. } if *epoch == completion.epoch => {
                    Some(*pose)
                }
                _ => None,
            };

            match in_flight {
                Some(pose) if self.epochs.is_current(completion.epoch) => match completion.result {
                    Ok(asset) => {
                        let placement = place(scene, pose, self.local, Arc::new(asset));
                        info!(
                            "placed node {:?} under anchor {:?}",
                            placement.node, placement.anchor
                        );
                        self.state.phase = PlacementPhase::Placed(placement);
                        events.push(PlacementEvent::Placed(placement));
                    }
                    Err(error) => events.push(self.fail(error)),
                },
                _ => {
                    debug!("dropping completion from retired epoch {}", completion.epoch.value());
                    events.push(PlacementEvent::StaleCompletion {
                        epoch: completion.epoch,
                    });
                }
            }
        }
    }

    fn expire_request(&mut self, now: f32) -> Option<PlacementEvent> {
        let secs = self.config.load_timeout_secs?;
        let PlacementPhase::Placing { requested_at, .. } = self.state.phase else {
            return None;
        };
        if now - requested_at < secs {
            return None;
        }

        self.epochs.advance();
        Some(self.fail(AssetLoadError::Timeout { secs }))
    }

    fn fail(&mut self, error: AssetLoadError) -> PlacementEvent {
        self.state.failed_attempts += 1;
        let retrying = self.config.retry.allows_retry(self.state.failed_attempts);
        warn!(
            "asset load failed ({error}); {}",
            if retrying { "waiting for next sighting" } else { "giving up" }
        );

        self.notifier.notify(Notice::long(LOAD_FAILED_MESSAGE));
        self.state.phase = if retrying {
            PlacementPhase::Waiting
        } else {
            PlacementPhase::Failed(error.clone())
        };
        PlacementEvent::Failed { error, retrying }
    }
}
