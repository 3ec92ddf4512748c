//! Small hand-checked scene shared by unit tests.
//!
//! | seat | province | declared leader / lowest | actual leader / lowest |
//! |------|----------|--------------------------|------------------------|
//! | NA-1 | KP       | X / Y                    | Y / X                  |
//! | NA-2 | KP       | PTI / IND                | PTI / IND              |
//! | NA-3 | Sindh    | PPPP / MQM-P             | MQM-P / PPPP           |
//! | NA-4 | Sindh    | absent                   | absent                 |
//! | NA-5 | Sindh    | MQM-P / PPPP             | PPPP / MQM-P           |
//! | NA-6 | Punjab   | PML-N / PTI              | PTI / PML-N            |
//! | NA-7 | Punjab   | PTI / PML-N              | PTI / PML-N            |
//!
//! Clusters: `peshawar` (KP: 1, 2), `hyderabad` (Sindh: 3, 4, 5),
//! `lahore` (Punjab: 6, 7). PML-N is flagged as disputed.

use crate::model::{
    Candidate, Cluster, Clusters, PartyTable, Province, ResultsStore, Scene, SeatId, SeatResult,
    VotesKey,
};

pub(crate) fn seat(id: u32, province: Province, tallies: &[(&str, u64, u64)]) -> SeatResult {
    SeatResult::new(
        SeatId(id),
        province,
        tallies
            .iter()
            .map(|(party, declared, actual)| {
                Candidate::new(format!("{} candidate", party), *party)
                    .with_votes(VotesKey::Declared, *declared)
                    .with_votes(VotesKey::Actual, *actual)
            })
            .collect(),
    )
}

pub(crate) fn results() -> ResultsStore {
    ResultsStore::new(vec![
        seat(1, Province::Kp, &[("X", 100, 40), ("Y", 50, 60)]),
        seat(
            2,
            Province::Kp,
            &[("PTI", 300, 320), ("PML-N", 200, 100), ("IND", 10, 5)],
        ),
        seat(3, Province::Sindh, &[("PPPP", 500, 300), ("MQM-P", 250, 400)]),
        seat(4, Province::Sindh, &[("PPPP", 0, 0), ("MQM-P", 0, 0)]),
        seat(5, Province::Sindh, &[("MQM-P", 120, 80), ("PPPP", 90, 150)]),
        seat(6, Province::Punjab, &[("PML-N", 400, 200), ("PTI", 100, 450)]),
        seat(7, Province::Punjab, &[("PTI", 300, 310), ("PML-N", 100, 90)]),
    ])
    .expect("fixture results are valid")
}

pub(crate) fn scene() -> Scene {
    let results = results();
    let clusters = Clusters::new(
        vec![
            Cluster::new("peshawar", Province::Kp, vec![SeatId(1), SeatId(2)]),
            Cluster::new(
                "hyderabad",
                Province::Sindh,
                vec![SeatId(3), SeatId(4), SeatId(5)],
            ),
            Cluster::new("lahore", Province::Punjab, vec![SeatId(6), SeatId(7)]),
        ],
        &results,
    )
    .expect("fixture clusters are valid");

    Scene::new(
        results,
        clusters,
        PartyTable::default().with_disputed(["PML-N"]),
    )
}
