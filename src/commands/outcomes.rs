use colored::Colorize;
use seat_map::tabulation::{compute_outcome_with, seat_color};
use seat_map::util::{group_thousands, write_serialized};
use seat_map::{RunnerUpMode, Scene, VotesKey};
use serde::Serialize;
use std::error::Error;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SeatRow {
    seat: String,
    province: String,
    leader: Option<String>,
    runner_up: Option<String>,
    margin: Option<u64>,
    color: String,
}

pub fn outcomes(
    scene: &Scene,
    key: VotesKey,
    mode: RunnerUpMode,
    output: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    println!(
        "📊 Seat outcomes by {} ({} seats)",
        key.to_string().cyan(),
        scene.results.len().to_string().bright_yellow()
    );

    let mut rows = Vec::with_capacity(scene.results.len());
    let mut absent = 0;
    for result in scene.results.iter() {
        let outcome = compute_outcome_with(result, key, mode)?;
        let color = seat_color(result, key, mode, &scene.parties)?;

        match &outcome {
            Some(o) => println!(
                "  {:<8} {:<12} {} over {} by {}",
                result.label(),
                result.province.to_string(),
                o.leader_party().green(),
                o.runner_up_party(),
                group_thousands(o.margin()).bright_white()
            ),
            None => {
                absent += 1;
                println!(
                    "  {:<8} {:<12} {}",
                    result.label(),
                    result.province.to_string(),
                    "postponed".dimmed()
                );
            }
        }

        rows.push(SeatRow {
            seat: result.label(),
            province: result.province.to_string(),
            leader: outcome.map(|o| o.leader_party().to_string()),
            runner_up: outcome.map(|o| o.runner_up_party().to_string()),
            margin: outcome.map(|o| o.margin()),
            color: color.to_string(),
        });
    }

    if absent > 0 {
        println!("⏸️  {} seats without a result", absent.to_string().bright_yellow());
    }

    if let Some(path) = output {
        write_serialized(path, &rows)?;
        println!("✅ Wrote {}", path.display().to_string().bright_green());
    }

    Ok(())
}
