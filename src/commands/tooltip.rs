use colored::Colorize;
use seat_map::formats::FormatError;
use seat_map::tooltip::{TooltipSummary, POSTPONED};
use seat_map::{RunnerUpMode, Scene, SeatId, VotesKey};
use std::error::Error;

pub fn tooltip(scene: &Scene, seat: &str, key: VotesKey, mode: RunnerUpMode) -> Result<(), Box<dyn Error>> {
    let id = SeatId::from_label(seat)
        .or_else(|| seat.trim().parse().ok().map(SeatId))
        .ok_or_else(|| FormatError::SeatLabel(seat.to_string()))?;
    let summary = TooltipSummary::for_seat(scene.results.seat(id)?, key, mode)?;

    match &summary.location {
        Some(location) => println!("📍 {} {}", summary.seat.bold(), location),
        None => println!("📍 {}", summary.seat.bold()),
    }
    println!("   Margin: {}", summary.margin_display().bright_white());

    if summary.is_postponed() {
        println!("   {}", POSTPONED.yellow());
        return Ok(());
    }

    if let Some(leader) = &summary.leader {
        println!(
            "   🏆 {} ({}) {}",
            leader.candidate,
            leader.party.green(),
            leader.votes
        );
    }
    if let Some(runner_up) = &summary.runner_up {
        println!(
            "      {} ({}) {}",
            runner_up.candidate, runner_up.party, runner_up.votes
        );
    }

    Ok(())
}
