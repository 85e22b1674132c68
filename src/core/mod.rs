pub mod controller;
pub mod epoch;
pub mod placement;
pub mod poller;
pub mod spawner;

pub use controller::{PhaseKind, PlacementController, PlacementEvent, PlacementPhase, PlacementState};
pub use epoch::{Epoch, EpochCounter};
pub use placement::{place, Placement};
pub use poller::{Sighting, TrackerPoller};
pub use spawner::ThreadSpawner;
