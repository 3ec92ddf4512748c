use crate::tabulation::{Result, TabulationError};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// National Assembly constituency number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatId(pub u32);

impl SeatId {
    /// Display label, e.g. `NA-10`.
    pub fn label(self) -> String {
        format!("NA-{}", self.0)
    }

    /// Parse a label such as `NA-10` (case and spacing are not significant).
    pub fn from_label(label: &str) -> Option<SeatId> {
        lazy_static! {
            static ref LABEL_RX: Regex = Regex::new(r"(?i)^\s*NA\s*-\s*(\d+)\s*$").unwrap();
        }

        let caps = LABEL_RX.captures(label)?;
        caps.get(1)?.as_str().parse().ok().map(SeatId)
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NA-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Province {
    #[serde(rename = "KP")]
    Kp,
    Punjab,
    Sindh,
    Balochistan,
    #[serde(rename = "ICT")]
    Ict,
}

impl Province {
    pub const ALL: [Province; 5] = [
        Province::Kp,
        Province::Punjab,
        Province::Sindh,
        Province::Balochistan,
        Province::Ict,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Province::Kp => "KP",
            Province::Punjab => "Punjab",
            Province::Sindh => "Sindh",
            Province::Balochistan => "Balochistan",
            Province::Ict => "ICT",
        }
    }
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Province {
    type Err = TabulationError;

    fn from_str(s: &str) -> Result<Self> {
        Province::ALL
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TabulationError::UnknownProvince(s.to_string()))
    }
}

/// Selects which of the parallel tallies drives every computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VotesKey {
    /// Officially declared result (Form 47).
    #[serde(rename = "declaredVotes")]
    Declared,
    /// Independently observed result (Form 45).
    #[serde(rename = "actualVotes")]
    Actual,
}

impl VotesKey {
    pub const ALL: [VotesKey; 2] = [VotesKey::Declared, VotesKey::Actual];

    pub fn as_str(self) -> &'static str {
        match self {
            VotesKey::Declared => "declaredVotes",
            VotesKey::Actual => "actualVotes",
        }
    }
}

impl Default for VotesKey {
    fn default() -> Self {
        VotesKey::Declared
    }
}

impl fmt::Display for VotesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VotesKey {
    type Err = TabulationError;

    fn from_str(s: &str) -> Result<Self> {
        VotesKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s.trim())
            .ok_or_else(|| TabulationError::InvalidKey(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub candidate: String,
    pub party: String,
    pub votes_by_source: BTreeMap<VotesKey, u64>,
}

impl Candidate {
    pub fn new(candidate: impl Into<String>, party: impl Into<String>) -> Self {
        Self {
            candidate: candidate.into(),
            party: party.into(),
            votes_by_source: BTreeMap::new(),
        }
    }

    pub fn with_votes(mut self, key: VotesKey, votes: u64) -> Self {
        self.votes_by_source.insert(key, votes);
        self
    }

    pub fn votes(&self, key: VotesKey) -> Result<u64> {
        self.votes_by_source
            .get(&key)
            .copied()
            .ok_or_else(|| TabulationError::InvalidKey(key.to_string()))
    }
}

/// One constituency's contest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatResult {
    pub seat: SeatId,
    pub province: Province,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub candidates: Vec<Candidate>,
}

impl SeatResult {
    pub fn new(seat: SeatId, province: Province, candidates: Vec<Candidate>) -> Self {
        Self {
            seat,
            province,
            location: None,
            candidates,
        }
    }

    pub fn label(&self) -> String {
        self.seat.label()
    }
}

/// Immutable per-seat results, indexed by seat.
#[derive(Debug, Clone, Default)]
pub struct ResultsStore {
    seats: BTreeMap<SeatId, SeatResult>,
    keys: BTreeSet<VotesKey>,
}

impl ResultsStore {
    /// Validate and index a parsed results payload.
    ///
    /// The recognized vote-source keys are the ones carried by the first
    /// candidate; every other candidate must carry all of them.
    pub fn new(records: Vec<SeatResult>) -> Result<Self> {
        let keys: BTreeSet<VotesKey> = records
            .iter()
            .flat_map(|r| r.candidates.first())
            .next()
            .map(|c| c.votes_by_source.keys().copied().collect())
            .unwrap_or_default();

        let mut seats = BTreeMap::new();
        for record in records {
            if record.candidates.is_empty() {
                return Err(TabulationError::NoCandidates(record.seat));
            }

            for candidate in &record.candidates {
                if let Some(key) = keys
                    .iter()
                    .find(|k| !candidate.votes_by_source.contains_key(*k))
                {
                    return Err(TabulationError::MissingTally {
                        seat: record.seat,
                        candidate: candidate.candidate.clone(),
                        key: *key,
                    });
                }
            }

            let seat = record.seat;
            if seats.insert(seat, record).is_some() {
                return Err(TabulationError::DuplicateSeat(seat));
            }
        }

        Ok(Self { seats, keys })
    }

    pub fn get(&self, seat: SeatId) -> Option<&SeatResult> {
        self.seats.get(&seat)
    }

    pub fn seat(&self, seat: SeatId) -> Result<&SeatResult> {
        self.get(seat).ok_or(TabulationError::UnknownSeat(seat))
    }

    /// Seats in ascending constituency order.
    pub fn iter(&self) -> impl Iterator<Item = &SeatResult> {
        self.seats.values()
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn keys(&self) -> &BTreeSet<VotesKey> {
        &self.keys
    }

    pub fn recognizes(&self, key: VotesKey) -> bool {
        self.keys.contains(&key)
    }
}
