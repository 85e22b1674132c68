pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod frame;
pub mod loaders;
pub mod math;
pub mod session;
pub mod sim;
pub mod traits;
pub mod types;

pub use crate::config::{AppConfig, MatchRule, PlacementConfig, RetryPolicy, SessionConfig};
pub use crate::core::{
    PhaseKind, Placement, PlacementController, PlacementEvent, PlacementState, Sighting,
    TrackerPoller,
};
pub use crate::error::{AssetLoadError, SessionError};
