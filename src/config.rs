use crate::model::{Cluster, Clusters, PartyTable, Province, ResultsStore, Scene, SeatId, VotesKey};
use crate::tabulation::{Result, RunnerUpMode};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Orchestrator settings. Every field has a default, so a config file only
/// needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrchestratorConfig {
    /// Key in context when the machine starts; first render always paints it.
    pub default_votes_key: VotesKey,
    pub runner_up_mode: RunnerUpMode,
    /// Opacity of seats and clusters that fail the active filter.
    pub dimmed_opacity: f32,
    pub timings: Timings,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            default_votes_key: VotesKey::Declared,
            runner_up_mode: RunnerUpMode::Lowest,
            dimmed_opacity: 0.2,
            timings: Timings::default(),
        }
    }
}

/// Transition durations in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Timings {
    pub first_render_ms: u64,
    pub first_render_stagger_ms: u64,
    pub key_change_ms: u64,
    pub key_change_stagger_ms: u64,
    pub filter_ms: u64,
    pub remove_filter_ms: u64,
    pub cluster_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            first_render_ms: 1400,
            first_render_stagger_ms: 200,
            key_change_ms: 300,
            key_change_stagger_ms: 10,
            filter_ms: 250,
            remove_filter_ms: 250,
            cluster_ms: 200,
        }
    }
}

/// Static map configuration: zoom clusters and party overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneConfig {
    pub clusters: Vec<Cluster>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_colors: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub disputed_parties: BTreeSet<String>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            clusters: builtin_clusters(),
            party_colors: None,
            disputed_parties: BTreeSet::new(),
        }
    }
}

impl SceneConfig {
    /// Validate clusters against the results and assemble the scene.
    pub fn into_scene(self, results: ResultsStore) -> Result<Scene> {
        let clusters = Clusters::new(self.clusters, &results)?;

        let parties = match self.party_colors {
            Some(colors) => PartyTable::new(colors, self.disputed_parties),
            None => PartyTable::default().with_disputed(self.disputed_parties),
        };

        Ok(Scene::new(results, clusters, parties))
    }
}

/// Zoomed overlays of the 2024 National Assembly map.
pub fn builtin_clusters() -> Vec<Cluster> {
    let cluster = |name: &str, province, seats: std::ops::RangeInclusive<u32>| {
        Cluster::new(name, province, seats.map(SeatId).collect())
    };
    let listed = |name: &str, province, seats: &[u32]| {
        Cluster::new(name, province, seats.iter().copied().map(SeatId).collect())
    };

    vec![
        listed("peshawar", Province::Kp, &[31, 32, 29]),
        listed("isb", Province::Ict, &[46, 47, 48, 55, 56, 57]),
        listed("gujranwala", Province::Punjab, &[78, 80]),
        cluster("faisalabad", Province::Punjab, 101..=104),
        cluster("lahore", Province::Punjab, 117..=130),
        cluster("quetta", Province::Balochistan, 263..=264),
        cluster("multan", Province::Punjab, 149..=150),
        cluster("hyderabad", Province::Sindh, 218..=220),
        cluster("karachi", Province::Sindh, 232..=250),
    ]
}
