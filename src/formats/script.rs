use super::{read_json, Result};
use crate::orchestrator::ViewerEvent;
use serde::Deserialize;
use std::path::Path;

fn wait_by_default() -> bool {
    true
}

/// One scripted viewer interaction for `simulate`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptStep {
    #[serde(flatten)]
    pub event: ViewerEvent,
    /// Wait for the map to become interactive before the next step. With
    /// `false` the next event arrives mid-animation and is dropped.
    #[serde(default = "wait_by_default")]
    pub wait: bool,
}

pub fn read_script(path: &Path) -> Result<Vec<ScriptStep>> {
    read_json(path)
}
