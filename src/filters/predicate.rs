use super::{FilterSpec, FilterTarget};
use crate::model::{Cluster, PartyTable, ResultsStore, Scene, SeatResult, VotesKey};
use crate::tabulation::{compute_cluster_outcome, compute_outcome_with, Result, RunnerUpMode};
use std::collections::BTreeSet;

/// Evaluates a [`FilterSpec`] against seats and clusters of one scene.
///
/// The five criteria (seat label, province, leading party, runner-up party,
/// disputed) are AND-ed. A seat with an absent outcome never satisfies a
/// constrained party-based criterion.
#[derive(Debug, Clone, Copy)]
pub struct FilterEngine<'a> {
    results: &'a ResultsStore,
    parties: &'a PartyTable,
    mode: RunnerUpMode,
}

impl<'a> FilterEngine<'a> {
    pub fn new(scene: &'a Scene, mode: RunnerUpMode) -> Self {
        Self {
            results: &scene.results,
            parties: &scene.parties,
            mode,
        }
    }

    pub fn matches(&self, target: FilterTarget<'_>, spec: &FilterSpec, key: VotesKey) -> Result<bool> {
        match target {
            FilterTarget::Seat(seat) => self.matches_seat(seat, spec, key),
            FilterTarget::Cluster(cluster) => self.matches_cluster(cluster, spec, key),
        }
    }

    pub fn matches_seat(&self, seat: &SeatResult, spec: &FilterSpec, key: VotesKey) -> Result<bool> {
        let outcome = compute_outcome_with(seat, key, self.mode)?;
        let leader = outcome.map(|o| o.leader_party());
        let runner_up = outcome.map(|o| o.runner_up_party());

        Ok([
            spec.seat_labels.is_empty() || spec.seat_labels.contains(&seat.label()),
            spec.provinces.is_empty() || spec.provinces.contains(&seat.province),
            party_criterion(&spec.winner_parties, leader),
            party_criterion(&spec.runner_up_parties, runner_up),
            !spec.disputed_only || leader.map_or(false, |p| self.parties.is_disputed(p)),
        ]
        .iter()
        .all(|ok| *ok))
    }

    /// Province is checked against the cluster's tag and parties against the
    /// cluster majority; seat labels and the disputed flag hold when any
    /// member seat matches on its own.
    pub fn matches_cluster(&self, cluster: &Cluster, spec: &FilterSpec, key: VotesKey) -> Result<bool> {
        if !spec.provinces.is_empty() && !spec.provinces.contains(&cluster.province) {
            return Ok(false);
        }

        if !spec.seat_labels.is_empty()
            && !cluster
                .seats
                .iter()
                .any(|seat| spec.seat_labels.contains(&seat.label()))
        {
            return Ok(false);
        }

        if !spec.winner_parties.is_empty() || !spec.runner_up_parties.is_empty() {
            let outcome =
                compute_cluster_outcome(cluster, self.results, self.parties, key, self.mode)?;
            if !party_criterion(&spec.winner_parties, outcome.winner.as_deref())
                || !party_criterion(&spec.runner_up_parties, outcome.runner_up.as_deref())
            {
                return Ok(false);
            }
        }

        if spec.disputed_only {
            for seat in &cluster.seats {
                if self.seat_disputed(self.results.seat(*seat)?, key)? {
                    return Ok(true);
                }
            }
            return Ok(false);
        }

        Ok(true)
    }

    fn seat_disputed(&self, seat: &SeatResult, key: VotesKey) -> Result<bool> {
        Ok(compute_outcome_with(seat, key, self.mode)?
            .map_or(false, |o| self.parties.is_disputed(o.leader_party())))
    }
}

fn party_criterion(parties: &BTreeSet<String>, party: Option<&str>) -> bool {
    parties.is_empty() || party.map_or(false, |p| parties.contains(p))
}
