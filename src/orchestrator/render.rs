use crate::model::SeatId;
use futures::future::BoxFuture;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Map element a paint operation addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum PaintTarget {
    Seat(SeatId),
    Cluster(String),
}

impl fmt::Display for PaintTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaintTarget::Seat(seat) => write!(f, "{}", seat),
            PaintTarget::Cluster(name) => write!(f, "#{}", name),
        }
    }
}

/// Style change for one element; `None` fields are left as they are.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    pub target: PaintTarget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactive: Option<bool>,
}

impl Paint {
    pub fn new(target: PaintTarget) -> Self {
        Self {
            target,
            fill: None,
            opacity: None,
            interactive: None,
        }
    }

    pub fn fill(mut self, color: impl Into<String>) -> Self {
        self.fill = Some(color.into());
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = Some(interactive);
        self
    }
}

/// Paint operations run together as one timed visual transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionBatch {
    pub duration_ms: u64,
    /// Upper bound of the per-element start delay.
    pub stagger_ms: u64,
    pub paints: Vec<Paint>,
}

impl TransitionBatch {
    pub fn new(duration_ms: u64, paints: Vec<Paint>) -> Self {
        Self {
            duration_ms,
            stagger_ms: 0,
            paints,
        }
    }

    pub fn stagger(mut self, stagger_ms: u64) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    /// Longest time any element of the batch can take.
    pub fn total_ms(&self) -> u64 {
        self.duration_ms + self.stagger_ms
    }
}

/// The drawing side of the map.
///
/// `transition` must resolve only after every element of the batch has
/// finished; the orchestrator joins all batches of an animation before
/// it becomes interactive again.
pub trait Renderer: Send + Sync {
    /// Apply a paint immediately, without a transition.
    fn paint(&self, paint: &Paint);

    fn transition(&self, batch: TransitionBatch) -> BoxFuture<'static, ()>;
}

/// Renderer with no drawing surface: logs each batch and waits out its
/// duration, scaled by `time_scale`.
#[derive(Debug, Clone)]
pub struct SleepRenderer {
    time_scale: f64,
}

impl SleepRenderer {
    pub fn new(time_scale: f64) -> Self {
        Self {
            time_scale: time_scale.max(0.0),
        }
    }
}

impl Default for SleepRenderer {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Renderer for SleepRenderer {
    fn paint(&self, paint: &Paint) {
        debug!(target_element = %paint.target, fill = ?paint.fill, "paint");
    }

    fn transition(&self, batch: TransitionBatch) -> BoxFuture<'static, ()> {
        let wait = Duration::from_secs_f64(batch.total_ms() as f64 * self.time_scale / 1000.0);
        debug!(
            elements = batch.paints.len(),
            duration_ms = batch.duration_ms,
            stagger_ms = batch.stagger_ms,
            "transition started"
        );

        Box::pin(async move {
            tokio::time::sleep(wait).await;
        })
    }
}
