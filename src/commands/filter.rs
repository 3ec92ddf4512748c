use colored::Colorize;
use seat_map::{FilterEngine, FilterSpec, RunnerUpMode, Scene, VotesKey};
use std::error::Error;

pub fn filter(
    scene: &Scene,
    spec: &FilterSpec,
    key: VotesKey,
    mode: RunnerUpMode,
) -> Result<(), Box<dyn Error>> {
    println!("🔍 Filtering {} seats by {}", scene.results.len(), key.to_string().cyan());
    if spec.is_empty() {
        println!("  (no criteria, everything matches)");
    }

    let engine = FilterEngine::new(scene, mode);

    let mut seats = Vec::new();
    for result in scene.results.iter() {
        if engine.matches_seat(result, spec, key)? {
            seats.push(result.label());
        }
    }

    let mut clusters = Vec::new();
    for cluster in scene.clusters.iter() {
        if engine.matches_cluster(cluster, spec, key)? {
            clusters.push(cluster.name.as_str());
        }
    }

    println!(
        "✅ {} of {} seats match",
        seats.len().to_string().bright_green().bold(),
        scene.results.len()
    );
    if !seats.is_empty() {
        println!("  {}", seats.join(", "));
    }

    println!(
        "✅ {} of {} clusters match",
        clusters.len().to_string().bright_green().bold(),
        scene.clusters.len()
    );
    if !clusters.is_empty() {
        println!("  {}", clusters.join(", "));
    }

    Ok(())
}
