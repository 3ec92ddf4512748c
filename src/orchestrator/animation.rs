use super::machine::AnimationTask;
use super::render::{Paint, PaintTarget, Renderer, TransitionBatch};
use crate::config::OrchestratorConfig;
use crate::filters::{FilterEngine, FilterSpec};
use crate::model::{Scene, VotesKey};
use crate::tabulation::{compute_cluster_outcome, seat_color, ClusterOutcome, Result};
use futures::future::join_all;

/// Everything one animation hands to the renderer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnimationPlan {
    /// Applied before any transition starts.
    pub instant: Vec<Paint>,
    /// Seat layer first, then one batch per cluster.
    pub batches: Vec<TransitionBatch>,
}

/// Compute colors, opacity and interactivity for `task`.
pub fn plan(scene: &Scene, config: &OrchestratorConfig, task: &AnimationTask) -> Result<AnimationPlan> {
    let timings = &config.timings;

    match task {
        AnimationTask::FirstRender { votes_key } => {
            let key = *votes_key;
            let seats = seat_fills(scene, config, key)?
                .into_iter()
                .map(|paint| paint.opacity(1.0).interactive(true))
                .collect();
            let clusters = cluster_outcomes(scene, config, key)?;

            Ok(AnimationPlan {
                instant: clusters
                    .iter()
                    .map(|c| Paint::new(PaintTarget::Cluster(c.cluster.clone())).fill(c.color.clone()))
                    .collect(),
                batches: with_cluster_batches(
                    TransitionBatch::new(timings.first_render_ms, seats)
                        .stagger(timings.first_render_stagger_ms),
                    clusters.into_iter().map(|c| {
                        TransitionBatch::new(
                            timings.first_render_ms,
                            vec![Paint::new(PaintTarget::Cluster(c.cluster)).opacity(1.0)],
                        )
                    }),
                ),
            })
        }
        AnimationTask::DataKeyChange { votes_key } => {
            let seats = seat_fills(scene, config, *votes_key)?;
            let clusters = cluster_outcomes(scene, config, *votes_key)?;

            Ok(AnimationPlan {
                instant: Vec::new(),
                batches: with_cluster_batches(
                    TransitionBatch::new(timings.key_change_ms, seats)
                        .stagger(timings.key_change_stagger_ms),
                    clusters.into_iter().map(|c| {
                        TransitionBatch::new(
                            timings.cluster_ms,
                            vec![Paint::new(PaintTarget::Cluster(c.cluster)).fill(c.color)],
                        )
                    }),
                ),
            })
        }
        AnimationTask::ApplyFilter { filters, votes_key } => {
            filter_plan(scene, config, filters, *votes_key)
        }
        AnimationTask::RemoveFilter { .. } => {
            let seats = scene
                .results
                .iter()
                .map(|r| Paint::new(PaintTarget::Seat(r.seat)).opacity(1.0).interactive(true))
                .collect();

            Ok(AnimationPlan {
                instant: Vec::new(),
                batches: with_cluster_batches(
                    TransitionBatch::new(timings.remove_filter_ms, seats),
                    scene.clusters.iter().map(|c| {
                        TransitionBatch::new(
                            timings.cluster_ms,
                            vec![Paint::new(PaintTarget::Cluster(c.name.clone()))
                                .opacity(1.0)
                                .interactive(true)],
                        )
                    }),
                ),
            })
        }
    }
}

fn filter_plan(
    scene: &Scene,
    config: &OrchestratorConfig,
    filters: &FilterSpec,
    key: VotesKey,
) -> Result<AnimationPlan> {
    let engine = FilterEngine::new(scene, config.runner_up_mode);
    let opacity = |hit: bool| if hit { 1.0 } else { config.dimmed_opacity };

    let mut seats = Vec::with_capacity(scene.results.len());
    for (paint, result) in seat_fills(scene, config, key)?.into_iter().zip(scene.results.iter()) {
        let hit = engine.matches_seat(result, filters, key)?;
        seats.push(paint.opacity(opacity(hit)).interactive(hit));
    }

    let mut clusters = Vec::with_capacity(scene.clusters.len());
    for (cluster, outcome) in scene.clusters.iter().zip(cluster_outcomes(scene, config, key)?) {
        let hit = engine.matches_cluster(cluster, filters, key)?;
        clusters.push(TransitionBatch::new(
            config.timings.cluster_ms,
            vec![Paint::new(PaintTarget::Cluster(outcome.cluster))
                .fill(outcome.color)
                .opacity(opacity(hit))
                .interactive(hit)],
        ));
    }

    Ok(AnimationPlan {
        instant: Vec::new(),
        batches: with_cluster_batches(
            TransitionBatch::new(config.timings.filter_ms, seats),
            clusters,
        ),
    })
}

/// Fill paint for every seat, in store order.
fn seat_fills(scene: &Scene, config: &OrchestratorConfig, key: VotesKey) -> Result<Vec<Paint>> {
    scene
        .results
        .iter()
        .map(|r| {
            let color = seat_color(r, key, config.runner_up_mode, &scene.parties)?;
            Ok(Paint::new(PaintTarget::Seat(r.seat)).fill(color))
        })
        .collect()
}

fn cluster_outcomes(
    scene: &Scene,
    config: &OrchestratorConfig,
    key: VotesKey,
) -> Result<Vec<ClusterOutcome>> {
    scene
        .clusters
        .iter()
        .map(|c| {
            compute_cluster_outcome(c, &scene.results, &scene.parties, key, config.runner_up_mode)
        })
        .collect()
}

fn with_cluster_batches(
    seats: TransitionBatch,
    clusters: impl IntoIterator<Item = TransitionBatch>,
) -> Vec<TransitionBatch> {
    std::iter::once(seats)
        .filter(|batch| !batch.paints.is_empty())
        .chain(clusters)
        .collect()
}

/// Apply the instant paints, start every batch and wait for all of them.
pub async fn play<R: Renderer>(renderer: &R, plan: AnimationPlan) {
    for paint in &plan.instant {
        renderer.paint(paint);
    }

    join_all(plan.batches.into_iter().map(|batch| renderer.transition(batch))).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::model::parties::PENDING_COLOR;
    use crate::model::{Province, SeatId};

    fn seat_paint<'a>(plan: &'a AnimationPlan, seat: u32) -> &'a Paint {
        plan.batches[0]
            .paints
            .iter()
            .find(|p| p.target == PaintTarget::Seat(SeatId(seat)))
            .unwrap()
    }

    fn cluster_paint<'a>(plan: &'a AnimationPlan, name: &str) -> &'a Paint {
        plan.batches
            .iter()
            .flat_map(|b| b.paints.iter())
            .find(|p| p.target == PaintTarget::Cluster(name.to_string()))
            .unwrap()
    }

    #[test]
    fn first_render_fans_out_seats_and_each_cluster() {
        let scene = fixtures::scene();
        let config = OrchestratorConfig::default();
        let plan = plan(
            &scene,
            &config,
            &AnimationTask::FirstRender {
                votes_key: VotesKey::Declared,
            },
        )
        .unwrap();

        assert_eq!(plan.batches.len(), 1 + scene.clusters.len());
        assert_eq!(plan.instant.len(), scene.clusters.len());
        assert_eq!(plan.batches[0].paints.len(), scene.results.len());
        assert_eq!(plan.batches[0].total_ms(), 1600);
        assert_eq!(seat_paint(&plan, 4).fill.as_deref(), Some(PENDING_COLOR));
        assert_eq!(seat_paint(&plan, 2).opacity, Some(1.0));
    }

    #[test]
    fn first_render_paints_with_the_task_key() {
        let scene = fixtures::scene();
        let config = OrchestratorConfig::default();
        let plan = plan(
            &scene,
            &config,
            &AnimationTask::FirstRender {
                votes_key: VotesKey::Actual,
            },
        )
        .unwrap();

        assert_eq!(seat_paint(&plan, 6).fill.as_deref(), Some(scene.parties.color("PTI")));
        assert_eq!(
            plan.instant
                .iter()
                .find(|p| p.target == PaintTarget::Cluster("hyderabad".to_string()))
                .and_then(|p| p.fill.as_deref()),
            Some(scene.parties.color("MQM-P"))
        );
    }

    #[test]
    fn key_change_recolors_without_touching_opacity() {
        let scene = fixtures::scene();
        let config = OrchestratorConfig::default();
        let plan = plan(
            &scene,
            &config,
            &AnimationTask::DataKeyChange {
                votes_key: VotesKey::Actual,
            },
        )
        .unwrap();

        let na6 = seat_paint(&plan, 6);
        assert_eq!(na6.fill.as_deref(), Some(scene.parties.color("PTI")));
        assert_eq!(na6.opacity, None);
        assert_eq!(na6.interactive, None);
        assert_eq!(
            cluster_paint(&plan, "hyderabad").fill.as_deref(),
            Some(scene.parties.color("MQM-P"))
        );
    }

    #[test]
    fn apply_filter_dims_and_disables_non_matching_elements() {
        let scene = fixtures::scene();
        let config = OrchestratorConfig::default();
        let plan = plan(
            &scene,
            &config,
            &AnimationTask::ApplyFilter {
                filters: FilterSpec::default().provinces([Province::Sindh]),
                votes_key: VotesKey::Declared,
            },
        )
        .unwrap();

        let na3 = seat_paint(&plan, 3);
        assert_eq!(na3.opacity, Some(1.0));
        assert_eq!(na3.interactive, Some(true));
        assert_eq!(na3.fill.as_deref(), Some(scene.parties.color("PPPP")));

        let na1 = seat_paint(&plan, 1);
        assert_eq!(na1.opacity, Some(config.dimmed_opacity));
        assert_eq!(na1.interactive, Some(false));

        assert_eq!(cluster_paint(&plan, "hyderabad").opacity, Some(1.0));
        assert_eq!(cluster_paint(&plan, "lahore").interactive, Some(false));
    }

    #[test]
    fn remove_filter_restores_everything() {
        let scene = fixtures::scene();
        let plan = plan(
            &scene,
            &OrchestratorConfig::default(),
            &AnimationTask::RemoveFilter {
                votes_key: VotesKey::Actual,
            },
        )
        .unwrap();

        for paint in plan.batches.iter().flat_map(|b| b.paints.iter()) {
            assert_eq!(paint.opacity, Some(1.0));
            assert_eq!(paint.interactive, Some(true));
            assert_eq!(paint.fill, None);
        }
    }
}
