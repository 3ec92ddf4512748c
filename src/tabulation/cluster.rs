use super::outcome::{compute_outcome_with, RunnerUpMode};
use super::{Result, TabulationError};
use crate::model::parties::FALLBACK_COLOR;
use crate::model::{Cluster, PartyTable, ResultsStore, VotesKey};
use serde::Serialize;

/// Majority outcome of a cluster's member seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterOutcome {
    pub cluster: String,
    /// Most frequent leading party; `None` when every member is absent.
    pub winner: Option<String>,
    /// Most frequent runner-up party, tallied independently.
    pub runner_up: Option<String>,
    pub color: String,
    /// Members with a present outcome.
    pub counted: usize,
}

pub fn compute_cluster_outcome(
    cluster: &Cluster,
    results: &ResultsStore,
    parties: &PartyTable,
    key: VotesKey,
    mode: RunnerUpMode,
) -> Result<ClusterOutcome> {
    if cluster.seats.is_empty() {
        return Err(TabulationError::EmptyCluster(cluster.name.clone()));
    }

    let mut leaders = Vec::with_capacity(cluster.seats.len());
    let mut runners_up = Vec::with_capacity(cluster.seats.len());
    for seat in &cluster.seats {
        let result = results
            .get(*seat)
            .ok_or_else(|| TabulationError::UnknownClusterSeat {
                cluster: cluster.name.clone(),
                seat: *seat,
            })?;

        if let Some(outcome) = compute_outcome_with(result, key, mode)? {
            leaders.push(outcome.leader_party());
            runners_up.push(outcome.runner_up_party());
        }
    }

    let winner = majority(&leaders).map(str::to_string);
    let runner_up = majority(&runners_up).map(str::to_string);
    let color = winner
        .as_deref()
        .map(|party| parties.color(party))
        .unwrap_or(FALLBACK_COLOR)
        .to_string();

    Ok(ClusterOutcome {
        cluster: cluster.name.clone(),
        winner,
        runner_up,
        color,
        counted: leaders.len(),
    })
}

/// Mode of `parties`; ties go to the party seen first.
fn majority<'a>(parties: &[&'a str]) -> Option<&'a str> {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for party in parties.iter().copied() {
        match counts.iter_mut().find(|(p, _)| *p == party) {
            Some((_, n)) => *n += 1,
            None => counts.push((party, 1)),
        }
    }

    counts
        .into_iter()
        .fold(None, |best: Option<(&'a str, usize)>, (party, n)| match best {
            Some((_, top)) if top >= n => best,
            _ => Some((party, n)),
        })
        .map(|(party, _)| party)
}
