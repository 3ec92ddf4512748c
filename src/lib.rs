//! Election results map core: seat outcomes, cluster majorities, compound
//! filters and the animation orchestrator that sequences map transitions.

pub mod config;
pub mod filters;
pub mod formats;
pub mod model;
pub mod orchestrator;
pub mod tabulation;
pub mod tooltip;
pub mod util;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::{OrchestratorConfig, SceneConfig, Timings};
pub use filters::{FilterEngine, FilterSpec, FilterTarget};
pub use model::{Candidate, Cluster, Clusters, PartyTable, Province, ResultsStore, Scene, SeatId, SeatResult, VotesKey};
pub use orchestrator::{Orchestrator, OrchestratorError, OrchestratorHandle, Renderer, ViewerEvent};
pub use tabulation::{ClusterOutcome, Outcome, RunnerUpMode, TabulationError};
