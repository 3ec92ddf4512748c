use crate::config::{OrchestratorConfig, SceneConfig};
use crate::model::Scene;
use crate::tabulation::TabulationError;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod results;
pub mod script;

pub use results::{read_results, SeatRecord, SeatRef};
pub use script::{read_script, ScriptStep};

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid results: {0}")]
    Tabulation(#[from] TabulationError),
    #[error("Unparseable seat label: {0}")]
    SeatLabel(String),
}

pub type Result<T> = std::result::Result<T, FormatError>;

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|source| FormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| FormatError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_scene_config(path: &Path) -> Result<SceneConfig> {
    read_json(path)
}

pub fn read_orchestrator_config(path: &Path) -> Result<OrchestratorConfig> {
    read_json(path)
}

/// Load results and pair them with a scene config, falling back to the
/// built-in clusters and palette when no config path is given.
pub fn load_scene(results_path: &Path, scene_path: Option<&Path>) -> Result<Scene> {
    let results = read_results(results_path)?;
    let config = match scene_path {
        Some(path) => read_scene_config(path)?,
        None => SceneConfig::default(),
    };

    let scene = config.into_scene(results)?;
    debug!(
        seats = scene.results.len(),
        clusters = scene.clusters.len(),
        "scene loaded"
    );
    Ok(scene)
}
