use colored::Colorize;
use seat_map::tabulation::compute_cluster_outcome;
use seat_map::{RunnerUpMode, Scene, VotesKey};
use std::error::Error;

pub fn clusters(scene: &Scene, key: VotesKey, mode: RunnerUpMode) -> Result<(), Box<dyn Error>> {
    println!(
        "🗺️  Cluster majorities by {} ({} clusters)",
        key.to_string().cyan(),
        scene.clusters.len().to_string().bright_yellow()
    );

    for cluster in scene.clusters.iter() {
        let outcome = compute_cluster_outcome(cluster, &scene.results, &scene.parties, key, mode)?;

        println!(
            "  {:<12} {:<12} {} (runner-up {}) {}/{} seats counted, fill {}",
            cluster.name.bold(),
            cluster.province.to_string(),
            outcome.winner.as_deref().unwrap_or("-").green(),
            outcome.runner_up.as_deref().unwrap_or("-"),
            outcome.counted,
            cluster.seats.len(),
            outcome.color
        );
    }

    Ok(())
}
