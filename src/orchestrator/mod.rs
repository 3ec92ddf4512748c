//! Animation orchestrator: owns the state machine, turns each `animating`
//! leaf into renderer transitions, and only settles once every fanned-out
//! transition has finished.

use crate::config::OrchestratorConfig;
use crate::model::Scene;
use crate::tabulation::TabulationError;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

pub mod animation;
pub mod machine;
pub mod metrics;
pub mod render;

pub use machine::{Animating, Context, Interactive, MachineState, ViewerEvent};
pub use metrics::{TransitionLog, TransitionRecord};
pub use render::{Paint, PaintTarget, Renderer, SleepRenderer, TransitionBatch};

use machine::{Handled, Machine};

#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error("Tabulation error: {0}")]
    Tabulation(#[from] TabulationError),
    #[error("Orchestrator has shut down")]
    Closed,
}

pub type Result<T> = std::result::Result<T, OrchestratorError>;

/// Published after every change so viewers can observe the machine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub state: MachineState,
    pub context: Context,
    /// Animations that have settled back into `interactive`.
    pub completed: u64,
    pub dropped: u64,
    pub refused: u64,
}

pub struct Orchestrator<R: Renderer> {
    machine: Machine,
    scene: Arc<Scene>,
    config: OrchestratorConfig,
    renderer: R,
    events: mpsc::UnboundedReceiver<ViewerEvent>,
    snapshot: watch::Sender<Snapshot>,
    log: TransitionLog,
}

impl<R: Renderer> Orchestrator<R> {
    /// Build an orchestrator in `animating.firstRender` plus the handle that
    /// feeds it. Fails when the configured default key is not carried by the
    /// results.
    pub fn new(
        scene: Arc<Scene>,
        renderer: R,
        config: OrchestratorConfig,
    ) -> Result<(Self, OrchestratorHandle)> {
        let key = config.default_votes_key;
        if !scene.results.recognizes(key) {
            return Err(TabulationError::InvalidKey(key.to_string()).into());
        }

        let machine = Machine::new(Context::new(key), scene.results.keys().clone());
        let (events_tx, events) = mpsc::unbounded_channel();
        let (snapshot, snapshot_rx) = watch::channel(Snapshot {
            state: machine.state(),
            context: machine.context().clone(),
            completed: 0,
            dropped: 0,
            refused: 0,
        });

        let orchestrator = Self {
            machine,
            scene,
            config,
            renderer,
            events,
            snapshot,
            log: TransitionLog::new(),
        };
        let handle = OrchestratorHandle {
            events: events_tx,
            snapshot: snapshot_rx,
        };

        Ok((orchestrator, handle))
    }

    /// Drive the machine until every handle has been dropped and the last
    /// animation has settled.
    pub async fn run(mut self) -> Result<TransitionLog> {
        let mut open = true;

        loop {
            if let Some(task) = self.machine.task() {
                let plan = animation::plan(&self.scene, &self.config, &task)?;
                self.log.start(task.state());
                info!(
                    state = %self.machine.state(),
                    batches = plan.batches.len(),
                    "transition started"
                );

                {
                    let playing = animation::play(&self.renderer, plan);
                    tokio::pin!(playing);

                    loop {
                        tokio::select! {
                            biased;
                            _ = &mut playing => break,
                            event = self.events.recv(), if open => match event {
                                Some(event) => {
                                    if drop_event(&mut self.machine, &mut self.log, event) {
                                        self.publish();
                                    }
                                }
                                None => open = false,
                            },
                        }
                    }
                }

                // Anything still queued was sent while animating.
                while open {
                    match self.events.try_recv() {
                        Ok(event) => {
                            if drop_event(&mut self.machine, &mut self.log, event) {
                                self.publish();
                            }
                        }
                        Err(TryRecvError::Empty) => break,
                        Err(TryRecvError::Disconnected) => open = false,
                    }
                }

                if let Some(settled) = self.machine.complete() {
                    let key = self.machine.context().votes_key;
                    if let Some(record) = self.log.finish(settled, key) {
                        info!(
                            animation = record.animation.as_str(),
                            duration_ms = record.duration_ms,
                            state = %self.machine.state(),
                            "transition settled"
                        );
                    }
                }
                self.publish();
                continue;
            }

            if !open {
                break;
            }

            let event = match self.events.recv().await {
                Some(event) => event,
                None => break,
            };

            let name = event.name();
            match self.machine.handle(event) {
                Ok(Handled::Started(task)) => {
                    debug!(event = name, animation = task.state().as_str(), "event accepted");
                }
                Ok(Handled::Dropped) => self.log.record_dropped(),
                Err(err) => {
                    warn!(event = name, error = %err, "event refused");
                    self.log.record_refused();
                }
            }
            self.publish();
        }

        info!(transitions = self.log.records.len(), "orchestrator stopped");
        Ok(self.log)
    }

    fn publish(&self) {
        self.snapshot.send_replace(Snapshot {
            state: self.machine.state(),
            context: self.machine.context().clone(),
            completed: self.log.records.len() as u64,
            dropped: self.log.dropped_events,
            refused: self.log.refused_events,
        });
    }
}

/// Feed an event to an animating machine. It is counted and has no other
/// effect; returns whether it was dropped.
fn drop_event(machine: &mut Machine, log: &mut TransitionLog, event: ViewerEvent) -> bool {
    let name = event.name();
    match machine.handle(event) {
        Ok(Handled::Dropped) => {
            log.record_dropped();
            debug!(event = name, state = %machine.state(), "event dropped");
            true
        }
        _ => false,
    }
}

/// Viewer side of a running orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorHandle {
    events: mpsc::UnboundedSender<ViewerEvent>,
    snapshot: watch::Receiver<Snapshot>,
}

impl OrchestratorHandle {
    pub fn send(&self, event: ViewerEvent) -> Result<()> {
        self.events.send(event).map_err(|_| OrchestratorError::Closed)
    }

    pub fn apply_filters(&self, filters: crate::filters::FilterSpec) -> Result<()> {
        self.send(ViewerEvent::ApplyFilters { filters })
    }

    pub fn remove_filters(&self) -> Result<()> {
        self.send(ViewerEvent::RemoveFilters)
    }

    pub fn change_votes_key(&self, votes_key: crate::model::VotesKey) -> Result<()> {
        self.send(ViewerEvent::ChangeVotesKey { votes_key })
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    pub fn state(&self) -> MachineState {
        self.snapshot.borrow().state
    }

    pub fn context(&self) -> Context {
        self.snapshot.borrow().context.clone()
    }

    /// Wait until a published snapshot satisfies `f`.
    pub async fn wait_for(&mut self, f: impl FnMut(&Snapshot) -> bool) -> Result<Snapshot> {
        self.snapshot
            .wait_for(f)
            .await
            .map(|snapshot| snapshot.clone())
            .map_err(|_| OrchestratorError::Closed)
    }

    /// Wait until the machine is interactive with at least `completed`
    /// settled animations.
    pub async fn settled(&mut self, completed: u64) -> Result<Snapshot> {
        self.wait_for(|s| s.state.is_interactive() && s.completed >= completed)
            .await
    }
}
