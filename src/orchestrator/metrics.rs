/// Timing and event accounting for orchestrator transitions
use super::machine::{Animating, Interactive};
use crate::model::VotesKey;
use chrono::{DateTime, Utc};
use instant::Instant;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRecord {
    pub animation: Animating,
    pub settled: Interactive,
    pub votes_key: VotesKey,
    pub duration_ms: u64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionLog {
    pub records: Vec<TransitionRecord>,
    pub dropped_events: u64,
    pub refused_events: u64,
    #[serde(skip)]
    in_flight: Option<(Animating, Instant)>,
}

impl TransitionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing an animation
    pub fn start(&mut self, animation: Animating) {
        self.in_flight = Some((animation, Instant::now()));
    }

    /// End timing the in-flight animation and record it
    pub fn finish(&mut self, settled: Interactive, votes_key: VotesKey) -> Option<&TransitionRecord> {
        let (animation, started) = self.in_flight.take()?;

        self.records.push(TransitionRecord {
            animation,
            settled,
            votes_key,
            duration_ms: started.elapsed().as_millis() as u64,
            timestamp: Utc::now(),
        });
        self.records.last()
    }

    pub fn record_dropped(&mut self) {
        self.dropped_events += 1;
    }

    pub fn record_refused(&mut self) {
        self.refused_events += 1;
    }

    pub fn total_ms(&self) -> u64 {
        self.records.iter().map(|r| r.duration_ms).sum()
    }

    /// Print a colored summary of every finished transition
    pub fn print_summary(&self) {
        use colored::*;

        println!("\n{}", "📊 Transition Summary".bright_cyan().bold());
        println!("{}", "=".repeat(50).bright_cyan());

        for record in &self.records {
            let animation_color = match record.animation {
                Animating::FirstRender => "yellow",
                Animating::DataKeyChange => "blue",
                Animating::ApplyFilter => "green",
                Animating::RemoveFilter => "magenta",
            };

            println!(
                "{} → {} [{}]: {} ms",
                record.animation.as_str().color(animation_color),
                record.settled.as_str(),
                record.votes_key.to_string().bright_yellow(),
                record.duration_ms.to_string().bright_white()
            );
        }

        println!("{}", "-".repeat(50).bright_cyan());
        println!(
            "{}: {} ms",
            "Total Duration".bright_white().bold(),
            self.total_ms().to_string().bright_green().bold()
        );
        println!(
            "{}: {} dropped, {} refused",
            "Ignored Events".bright_white().bold(),
            self.dropped_events.to_string().bright_yellow(),
            self.refused_events.to_string().bright_red()
        );
        println!();
    }
}
