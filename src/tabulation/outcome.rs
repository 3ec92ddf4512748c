use super::{Result, TabulationError};
use crate::model::parties::PENDING_COLOR;
use crate::model::{Candidate, PartyTable, SeatResult, VotesKey};
use serde::{Deserialize, Serialize};

/// How the runner-up of a seat is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunnerUpMode {
    /// Lowest-polling candidate, reduced independently of the leader.
    /// A three-way race reports the last-placed candidate, not the second.
    #[default]
    Lowest,
    /// Highest-polling candidate other than the leader.
    SecondPlace,
}

/// Leader and runner-up of a seat under one vote-source key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome<'a> {
    pub leader: &'a Candidate,
    pub runner_up: &'a Candidate,
    pub leader_votes: u64,
    pub runner_up_votes: u64,
}

impl<'a> Outcome<'a> {
    pub fn leader_party(&self) -> &'a str {
        &self.leader.party
    }

    pub fn runner_up_party(&self) -> &'a str {
        &self.runner_up.party
    }

    /// Vote difference between leader and runner-up.
    pub fn margin(&self) -> u64 {
        self.leader_votes.saturating_sub(self.runner_up_votes)
    }
}

/// Outcome with the literal lowest-polling runner-up.
///
/// `Ok(None)` is the absent outcome: leader and runner-up both polled zero,
/// which marks a postponed or uncontested seat.
pub fn compute_outcome(result: &SeatResult, key: VotesKey) -> Result<Option<Outcome<'_>>> {
    compute_outcome_with(result, key, RunnerUpMode::Lowest)
}

pub fn compute_outcome_with(
    result: &SeatResult,
    key: VotesKey,
    mode: RunnerUpMode,
) -> Result<Option<Outcome<'_>>> {
    let tallies = result
        .candidates
        .iter()
        .map(|c| c.votes(key))
        .collect::<Result<Vec<u64>>>()?;

    if tallies.is_empty() {
        return Err(TabulationError::NoCandidates(result.seat));
    }

    // Strict comparisons keep the first-encountered candidate on ties.
    let leader = (1..tallies.len()).fold(0, |acc, i| if tallies[i] > tallies[acc] { i } else { acc });
    let runner_up = match mode {
        RunnerUpMode::Lowest => {
            (1..tallies.len()).fold(0, |acc, i| if tallies[i] < tallies[acc] { i } else { acc })
        }
        RunnerUpMode::SecondPlace => (0..tallies.len())
            .filter(|i| *i != leader)
            .fold(None, |acc: Option<usize>, i| match acc {
                Some(best) if tallies[best] >= tallies[i] => Some(best),
                _ => Some(i),
            })
            .unwrap_or(leader),
    };

    if tallies[leader] == 0 && tallies[runner_up] == 0 {
        return Ok(None);
    }

    Ok(Some(Outcome {
        leader: &result.candidates[leader],
        runner_up: &result.candidates[runner_up],
        leader_votes: tallies[leader],
        runner_up_votes: tallies[runner_up],
    }))
}

/// Map fill for a seat: pending for an absent outcome, otherwise the leader's
/// scale color.
pub fn seat_color<'p>(
    result: &SeatResult,
    key: VotesKey,
    mode: RunnerUpMode,
    parties: &'p PartyTable,
) -> Result<&'p str> {
    Ok(match compute_outcome_with(result, key, mode)? {
        Some(outcome) => parties.color(outcome.leader_party()),
        None => PENDING_COLOR,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parties::FALLBACK_COLOR;
    use crate::model::{Province, SeatId};

    fn seat(tallies: &[(&str, u64)]) -> SeatResult {
        SeatResult::new(
            SeatId(1),
            Province::Punjab,
            tallies
                .iter()
                .map(|(party, votes)| {
                    Candidate::new(format!("{} candidate", party), *party)
                        .with_votes(VotesKey::Declared, *votes)
                        .with_votes(VotesKey::Actual, votes / 2)
                })
                .collect(),
        )
    }

    #[test]
    fn two_way_race_reports_leader_runner_up_and_margin() {
        let result = seat(&[("X", 100), ("Y", 50)]);
        let outcome = compute_outcome(&result, VotesKey::Declared).unwrap().unwrap();

        assert_eq!(outcome.leader_party(), "X");
        assert_eq!(outcome.runner_up_party(), "Y");
        assert_eq!(outcome.leader_votes, 100);
        assert_eq!(outcome.margin(), 50);
    }

    #[test]
    fn repeated_evaluation_is_stable() {
        let result = seat(&[("X", 7), ("Y", 9), ("Z", 3)]);
        let first = compute_outcome(&result, VotesKey::Declared).unwrap();
        for _ in 0..5 {
            assert_eq!(compute_outcome(&result, VotesKey::Declared).unwrap(), first);
        }
    }

    #[test]
    fn all_zero_tallies_are_absent() {
        let result = seat(&[("X", 0), ("Y", 0), ("Z", 0)]);
        assert_eq!(compute_outcome(&result, VotesKey::Declared).unwrap(), None);
        assert_eq!(
            compute_outcome_with(&result, VotesKey::Declared, RunnerUpMode::SecondPlace).unwrap(),
            None
        );
    }

    #[test]
    fn ties_go_to_first_encountered_candidate() {
        let result = seat(&[("X", 40), ("Y", 40), ("Z", 10), ("W", 10)]);
        let outcome = compute_outcome(&result, VotesKey::Declared).unwrap().unwrap();

        assert_eq!(outcome.leader_party(), "X");
        assert_eq!(outcome.runner_up_party(), "Z");
    }

    #[test]
    fn lowest_mode_reports_last_place_in_three_way_race() {
        let result = seat(&[("X", 500), ("Y", 450), ("Z", 5)]);

        let literal = compute_outcome(&result, VotesKey::Declared).unwrap().unwrap();
        assert_eq!(literal.runner_up_party(), "Z");
        assert_eq!(literal.margin(), 495);

        let second = compute_outcome_with(&result, VotesKey::Declared, RunnerUpMode::SecondPlace)
            .unwrap()
            .unwrap();
        assert_eq!(second.runner_up_party(), "Y");
        assert_eq!(second.margin(), 50);
    }

    #[test]
    fn single_candidate_is_both_leader_and_runner_up() {
        let result = seat(&[("X", 12)]);
        for mode in [RunnerUpMode::Lowest, RunnerUpMode::SecondPlace] {
            let outcome = compute_outcome_with(&result, VotesKey::Declared, mode)
                .unwrap()
                .unwrap();
            assert_eq!(outcome.leader_party(), "X");
            assert_eq!(outcome.runner_up_party(), "X");
            assert_eq!(outcome.margin(), 0);
        }
    }

    #[test]
    fn key_selects_the_tally() {
        let mut result = seat(&[("X", 100), ("Y", 50)]);
        result.candidates[1]
            .votes_by_source
            .insert(VotesKey::Actual, 400);

        let outcome = compute_outcome(&result, VotesKey::Actual).unwrap().unwrap();
        assert_eq!(outcome.leader_party(), "Y");
        assert_eq!(outcome.runner_up_party(), "X");
    }

    #[test]
    fn missing_tally_is_invalid_key() {
        let result = SeatResult::new(
            SeatId(4),
            Province::Ict,
            vec![Candidate::new("A", "X").with_votes(VotesKey::Declared, 3)],
        );
        assert_eq!(
            compute_outcome(&result, VotesKey::Actual).unwrap_err(),
            TabulationError::InvalidKey("actualVotes".to_string())
        );
    }

    #[test]
    fn seat_color_uses_pending_and_fallback_fills() {
        let parties = PartyTable::default();

        let pending = seat(&[("PTI", 0), ("PPPP", 0)]);
        assert_eq!(
            seat_color(&pending, VotesKey::Declared, RunnerUpMode::Lowest, &parties).unwrap(),
            PENDING_COLOR
        );

        let unknown = seat(&[("Nobody", 10), ("PTI", 2)]);
        assert_eq!(
            seat_color(&unknown, VotesKey::Declared, RunnerUpMode::Lowest, &parties).unwrap(),
            FALLBACK_COLOR
        );

        let known = seat(&[("PTI", 10), ("PPPP", 2)]);
        assert_eq!(
            seat_color(&known, VotesKey::Declared, RunnerUpMode::Lowest, &parties).unwrap(),
            parties.color("PTI")
        );
    }
}
