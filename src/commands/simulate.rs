use colored::Colorize;
use seat_map::formats::ScriptStep;
use seat_map::orchestrator::SleepRenderer;
use seat_map::util::write_serialized;
use seat_map::{Orchestrator, OrchestratorConfig, Scene};
use std::error::Error;
use std::path::Path;
use std::sync::Arc;

/// Replay a script of viewer events against the orchestrator.
pub async fn simulate(
    scene: Scene,
    config: OrchestratorConfig,
    steps: Vec<ScriptStep>,
    time_scale: f64,
    output: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    println!(
        "🚀 Simulating {} viewer events over {} seats",
        steps.len().to_string().bright_yellow(),
        scene.results.len().to_string().bright_yellow()
    );

    let (orchestrator, mut handle) =
        Orchestrator::new(Arc::new(scene), SleepRenderer::new(time_scale), config)?;
    let running = tokio::spawn(orchestrator.run());

    let snapshot = handle.settled(1).await?;
    println!("🎬 First render done, now {}", snapshot.state.to_string().green());

    for step in steps {
        let before = handle.snapshot();
        let name = step.event.name();
        handle.send(step.event)?;

        if !step.wait {
            println!("  ➡️  {} (not waiting)", name.cyan());
            continue;
        }

        let after = handle
            .wait_for(|s| {
                s.state.is_interactive()
                    && (s.completed > before.completed
                        || s.refused > before.refused
                        || s.dropped > before.dropped)
            })
            .await?;

        let outcome = if after.refused > before.refused {
            "refused".red()
        } else if after.completed > before.completed {
            after.state.to_string().green()
        } else {
            "dropped".yellow()
        };
        println!("  ➡️  {} → {}", name.cyan(), outcome);
    }

    drop(handle);
    let log = running.await??;
    log.print_summary();

    if let Some(path) = output {
        write_serialized(path, &log)?;
        println!("✅ Wrote {}", path.display().to_string().bright_green());
    }

    Ok(())
}
