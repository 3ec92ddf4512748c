use super::{read_json, FormatError, Result};
use crate::model::{Candidate, Province, ResultsStore, SeatId, SeatResult};
use serde::Deserialize;
use std::path::Path;

/// Seat identifier as it appears in results files: either the bare number or
/// an `NA-<n>` label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SeatRef {
    Number(u32),
    Label(String),
}

impl SeatRef {
    pub fn resolve(&self) -> Result<SeatId> {
        match self {
            SeatRef::Number(n) => Ok(SeatId(*n)),
            SeatRef::Label(label) => {
                SeatId::from_label(label).ok_or_else(|| FormatError::SeatLabel(label.clone()))
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatRecord {
    pub seat: SeatRef,
    pub province: Province,
    #[serde(default)]
    pub location: Option<String>,
    pub candidates: Vec<Candidate>,
}

impl SeatRecord {
    pub fn into_result(self) -> Result<SeatResult> {
        let mut result = SeatResult::new(self.seat.resolve()?, self.province, self.candidates);
        result.location = self.location;
        Ok(result)
    }
}

pub fn parse_results(records: Vec<SeatRecord>) -> Result<ResultsStore> {
    let seats = records
        .into_iter()
        .map(SeatRecord::into_result)
        .collect::<Result<Vec<_>>>()?;

    Ok(ResultsStore::new(seats)?)
}

pub fn read_results(path: &Path) -> Result<ResultsStore> {
    parse_results(read_json(path)?)
}
