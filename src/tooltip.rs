use crate::model::{SeatResult, VotesKey};
use crate::tabulation::{compute_outcome_with, Result, RunnerUpMode};
use crate::util::group_thousands;
use serde::Serialize;

pub const POSTPONED: &str = "Election Postponed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateLine {
    pub candidate: String,
    pub party: String,
    pub votes: u64,
}

/// Hover card for one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipSummary {
    pub seat: String,
    pub location: Option<String>,
    pub votes_key: VotesKey,
    pub leader: Option<CandidateLine>,
    pub runner_up: Option<CandidateLine>,
    pub margin: Option<u64>,
}

impl TooltipSummary {
    pub fn for_seat(result: &SeatResult, key: VotesKey, mode: RunnerUpMode) -> Result<Self> {
        let outcome = compute_outcome_with(result, key, mode)?;

        let line = |candidate: &crate::model::Candidate, votes| CandidateLine {
            candidate: candidate.candidate.clone(),
            party: candidate.party.clone(),
            votes,
        };

        Ok(Self {
            seat: result.label(),
            location: result.location.clone(),
            votes_key: key,
            leader: outcome.map(|o| line(o.leader, o.leader_votes)),
            runner_up: outcome.map(|o| line(o.runner_up, o.runner_up_votes)),
            margin: outcome.map(|o| o.margin()),
        })
    }

    pub fn is_postponed(&self) -> bool {
        self.leader.is_none()
    }

    pub fn margin_display(&self) -> String {
        match self.margin {
            Some(margin) => group_thousands(margin),
            None => "N/A".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::model::SeatId;

    #[test]
    fn summarizes_leader_runner_up_and_margin() {
        let results = fixtures::results();
        let na2 = results.seat(SeatId(2)).unwrap();
        let summary = TooltipSummary::for_seat(na2, VotesKey::Declared, RunnerUpMode::Lowest).unwrap();

        assert_eq!(summary.seat, "NA-2");
        assert_eq!(summary.leader.as_ref().unwrap().party, "PTI");
        assert_eq!(summary.runner_up.as_ref().unwrap().party, "IND");
        assert_eq!(summary.margin, Some(290));
        assert_eq!(summary.margin_display(), "290");
        assert!(!summary.is_postponed());
    }

    #[test]
    fn second_place_mode_changes_runner_up() {
        let results = fixtures::results();
        let na2 = results.seat(SeatId(2)).unwrap();
        let summary =
            TooltipSummary::for_seat(na2, VotesKey::Declared, RunnerUpMode::SecondPlace).unwrap();

        assert_eq!(summary.runner_up.unwrap().party, "PML-N");
        assert_eq!(summary.margin, Some(100));
    }

    #[test]
    fn zero_vote_seat_is_postponed() {
        let results = fixtures::results();
        let na4 = results.seat(SeatId(4)).unwrap();
        let summary = TooltipSummary::for_seat(na4, VotesKey::Actual, RunnerUpMode::Lowest).unwrap();

        assert!(summary.is_postponed());
        assert_eq!(summary.runner_up, None);
        assert_eq!(summary.margin_display(), "N/A");
    }
}
