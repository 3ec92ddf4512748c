use super::results::{Province, ResultsStore, SeatId};
use crate::tabulation::{Result, TabulationError};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A fixed group of seats drawn as one zoomed overlay element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub name: String,
    pub province: Province,
    pub seats: Vec<SeatId>,
}

impl Cluster {
    pub fn new(name: impl Into<String>, province: Province, seats: Vec<SeatId>) -> Self {
        Self {
            name: name.into(),
            province,
            seats,
        }
    }
}

/// Validated cluster configuration, kept in configuration order.
#[derive(Debug, Clone, Default)]
pub struct Clusters {
    clusters: Vec<Cluster>,
}

impl Clusters {
    /// Check every cluster against the results store.
    ///
    /// An empty cluster or a member seat missing from the store is a
    /// configuration error and fails the whole load. Repeated members are
    /// collapsed, keeping their first position.
    pub fn new(clusters: Vec<Cluster>, results: &ResultsStore) -> Result<Self> {
        let mut validated = Vec::with_capacity(clusters.len());

        for mut cluster in clusters {
            if cluster.seats.is_empty() {
                return Err(TabulationError::EmptyCluster(cluster.name));
            }
            if let Some(seat) = cluster.seats.iter().find(|s| results.get(**s).is_none()) {
                return Err(TabulationError::UnknownClusterSeat {
                    cluster: cluster.name.clone(),
                    seat: *seat,
                });
            }
            if validated.iter().any(|c: &Cluster| c.name == cluster.name) {
                return Err(TabulationError::DuplicateCluster(cluster.name));
            }

            cluster.seats = cluster.seats.into_iter().unique().collect();
            validated.push(cluster);
        }

        Ok(Self {
            clusters: validated,
        })
    }

    pub fn get(&self, name: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}
