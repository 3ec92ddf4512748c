pub mod cluster;
pub mod parties;
pub mod results;

pub use cluster::{Cluster, Clusters};
pub use parties::PartyTable;
pub use results::{Candidate, Province, ResultsStore, SeatId, SeatResult, VotesKey};

/// Everything loaded once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Scene {
    pub results: ResultsStore,
    pub clusters: Clusters,
    pub parties: PartyTable,
}

impl Scene {
    pub fn new(results: ResultsStore, clusters: Clusters, parties: PartyTable) -> Self {
        Self {
            results,
            clusters,
            parties,
        }
    }
}
