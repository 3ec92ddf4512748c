use crate::model::{SeatId, VotesKey};

pub mod cluster;
pub mod outcome;

pub use cluster::{compute_cluster_outcome, ClusterOutcome};
pub use outcome::{compute_outcome, compute_outcome_with, seat_color, Outcome, RunnerUpMode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TabulationError {
    #[error("Unrecognized vote-source key: {0}")]
    InvalidKey(String),
    #[error("Cluster has no member seats: {0}")]
    EmptyCluster(String),
    #[error("Cluster {cluster} references unknown seat {seat}")]
    UnknownClusterSeat { cluster: String, seat: SeatId },
    #[error("Cluster defined more than once: {0}")]
    DuplicateCluster(String),
    #[error("Unknown seat: {0}")]
    UnknownSeat(SeatId),
    #[error("Seat {0} has no candidates")]
    NoCandidates(SeatId),
    #[error("Seat {0} appears more than once")]
    DuplicateSeat(SeatId),
    #[error("Seat {seat}: candidate {candidate} has no {key} tally")]
    MissingTally {
        seat: SeatId,
        candidate: String,
        key: VotesKey,
    },
    #[error("Unknown province: {0}")]
    UnknownProvince(String),
}

pub type Result<T> = std::result::Result<T, TabulationError>;
