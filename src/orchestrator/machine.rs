use super::{OrchestratorError, Result};
use crate::filters::FilterSpec;
use crate::model::VotesKey;
use crate::tabulation::TabulationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Leaf states of `animating`: one visual transition in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Animating {
    FirstRender,
    DataKeyChange,
    ApplyFilter,
    RemoveFilter,
}

impl Animating {
    /// Interactive state entered once the animation has finished.
    pub fn on_done(self) -> Interactive {
        match self {
            Animating::FirstRender | Animating::DataKeyChange | Animating::RemoveFilter => {
                Interactive::Unfiltered
            }
            Animating::ApplyFilter => Interactive::Filtered,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Animating::FirstRender => "firstRender",
            Animating::DataKeyChange => "dataKeyChange",
            Animating::ApplyFilter => "applyFilter",
            Animating::RemoveFilter => "removeFilter",
        }
    }
}

/// Leaf states of `interactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Interactive {
    Unfiltered,
    Filtered,
}

impl Interactive {
    pub fn as_str(self) -> &'static str {
        match self {
            Interactive::Unfiltered => "unfiltered",
            Interactive::Filtered => "filtered",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "leaf", rename_all = "camelCase")]
pub enum MachineState {
    Animating(Animating),
    Interactive(Interactive),
}

impl MachineState {
    pub fn is_interactive(self) -> bool {
        matches!(self, MachineState::Interactive(_))
    }

    pub fn is_animating(self) -> bool {
        matches!(self, MachineState::Animating(_))
    }
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineState::Animating(leaf) => write!(f, "animating.{}", leaf.as_str()),
            MachineState::Interactive(leaf) => write!(f, "interactive.{}", leaf.as_str()),
        }
    }
}

/// Events a viewer can deliver to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ViewerEvent {
    ApplyFilters {
        filters: FilterSpec,
    },
    RemoveFilters,
    ChangeVotesKey {
        #[serde(rename = "votesKey")]
        votes_key: VotesKey,
    },
}

impl ViewerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ViewerEvent::ApplyFilters { .. } => "applyFilters",
            ViewerEvent::RemoveFilters => "removeFilters",
            ViewerEvent::ChangeVotesKey { .. } => "changeVotesKey",
        }
    }
}

/// The only mutable state of the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    pub filters: FilterSpec,
    pub votes_key: VotesKey,
}

impl Context {
    pub fn new(votes_key: VotesKey) -> Self {
        Self {
            filters: FilterSpec::default(),
            votes_key,
        }
    }
}

/// Work requested by an `animating` leaf, with its parameters taken from
/// context at the moment the leaf is entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationTask {
    FirstRender { votes_key: VotesKey },
    DataKeyChange { votes_key: VotesKey },
    ApplyFilter { filters: FilterSpec, votes_key: VotesKey },
    RemoveFilter { votes_key: VotesKey },
}

impl AnimationTask {
    pub fn state(&self) -> Animating {
        match self {
            AnimationTask::FirstRender { .. } => Animating::FirstRender,
            AnimationTask::DataKeyChange { .. } => Animating::DataKeyChange,
            AnimationTask::ApplyFilter { .. } => Animating::ApplyFilter,
            AnimationTask::RemoveFilter { .. } => Animating::RemoveFilter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ContextUpdate {
    Keep,
    Filters(FilterSpec),
    VotesKey(VotesKey),
}

/// Transition table for `interactive`. Every (state, event) pair has an
/// entry; `animating` has none, which is what drops events while a
/// transition is in flight.
fn transition(state: Interactive, event: ViewerEvent) -> (Animating, ContextUpdate) {
    use Interactive::*;

    match (state, event) {
        (_, ViewerEvent::ApplyFilters { filters }) => {
            (Animating::ApplyFilter, ContextUpdate::Filters(filters))
        }
        (_, ViewerEvent::RemoveFilters) => (Animating::RemoveFilter, ContextUpdate::Keep),
        (Unfiltered, ViewerEvent::ChangeVotesKey { votes_key }) => {
            (Animating::DataKeyChange, ContextUpdate::VotesKey(votes_key))
        }
        // Filtered views recolor and re-filter under the new key.
        (Filtered, ViewerEvent::ChangeVotesKey { votes_key }) => {
            (Animating::ApplyFilter, ContextUpdate::VotesKey(votes_key))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handled {
    /// The event moved the machine into an `animating` leaf.
    Started(AnimationTask),
    /// A transition was already in flight; nothing changed.
    Dropped,
}

/// Hierarchical state machine, free of any I/O.
#[derive(Debug, Clone)]
pub struct Machine {
    state: MachineState,
    context: Context,
    recognized: BTreeSet<VotesKey>,
}

impl Machine {
    /// Starts in `animating.firstRender`.
    pub fn new(context: Context, recognized: BTreeSet<VotesKey>) -> Self {
        Self {
            state: MachineState::Animating(Animating::FirstRender),
            context,
            recognized,
        }
    }

    pub fn state(&self) -> MachineState {
        self.state
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// The animation the current state is waiting on, if any.
    pub fn task(&self) -> Option<AnimationTask> {
        let ctx = &self.context;
        match self.state {
            MachineState::Interactive(_) => None,
            MachineState::Animating(Animating::FirstRender) => Some(AnimationTask::FirstRender {
                votes_key: ctx.votes_key,
            }),
            MachineState::Animating(Animating::DataKeyChange) => Some(AnimationTask::DataKeyChange {
                votes_key: ctx.votes_key,
            }),
            MachineState::Animating(Animating::ApplyFilter) => Some(AnimationTask::ApplyFilter {
                filters: ctx.filters.clone(),
                votes_key: ctx.votes_key,
            }),
            MachineState::Animating(Animating::RemoveFilter) => Some(AnimationTask::RemoveFilter {
                votes_key: ctx.votes_key,
            }),
        }
    }

    /// Deliver a viewer event.
    ///
    /// A key the results do not carry is refused with `InvalidKey` and leaves
    /// state and context untouched.
    pub fn handle(&mut self, event: ViewerEvent) -> Result<Handled> {
        let current = match self.state {
            MachineState::Animating(_) => return Ok(Handled::Dropped),
            MachineState::Interactive(leaf) => leaf,
        };

        if let ViewerEvent::ChangeVotesKey { votes_key } = &event {
            if !self.recognized.contains(votes_key) {
                return Err(OrchestratorError::Tabulation(TabulationError::InvalidKey(
                    votes_key.to_string(),
                )));
            }
        }

        let (next, update) = transition(current, event);
        match update {
            ContextUpdate::Keep => {}
            ContextUpdate::Filters(filters) => self.context.filters = filters,
            ContextUpdate::VotesKey(votes_key) => self.context.votes_key = votes_key,
        }
        self.state = MachineState::Animating(next);

        // task() is always Some right after entering an animating leaf.
        Ok(self.task().map_or(Handled::Dropped, Handled::Started))
    }

    /// Signal that the in-flight animation finished. Returns the interactive
    /// leaf entered, or `None` when nothing was animating.
    pub fn complete(&mut self) -> Option<Interactive> {
        match self.state {
            MachineState::Animating(leaf) => {
                let next = leaf.on_done();
                self.state = MachineState::Interactive(next);
                Some(next)
            }
            MachineState::Interactive(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Province;

    fn machine() -> Machine {
        Machine::new(
            Context::new(VotesKey::Declared),
            VotesKey::ALL.iter().copied().collect(),
        )
    }

    fn interactive() -> Machine {
        let mut m = machine();
        m.complete();
        m
    }

    fn sindh() -> FilterSpec {
        FilterSpec::default().provinces([Province::Sindh])
    }

    #[test]
    fn starts_in_first_render_and_settles_unfiltered() {
        let mut m = machine();
        assert_eq!(m.state(), MachineState::Animating(Animating::FirstRender));
        assert_eq!(
            m.task(),
            Some(AnimationTask::FirstRender {
                votes_key: VotesKey::Declared
            })
        );

        assert_eq!(m.complete(), Some(Interactive::Unfiltered));
        assert_eq!(m.task(), None);
        assert_eq!(m.complete(), None);
    }

    #[test]
    fn first_render_takes_its_key_from_context() {
        let m = Machine::new(
            Context::new(VotesKey::Actual),
            VotesKey::ALL.iter().copied().collect(),
        );
        assert_eq!(
            m.task(),
            Some(AnimationTask::FirstRender {
                votes_key: VotesKey::Actual
            })
        );
    }

    #[test]
    fn events_while_animating_are_dropped_without_side_effects() {
        let mut m = machine();
        let before = m.context().clone();

        for event in [
            ViewerEvent::ApplyFilters { filters: sindh() },
            ViewerEvent::RemoveFilters,
            ViewerEvent::ChangeVotesKey {
                votes_key: VotesKey::Actual,
            },
        ] {
            assert_eq!(m.handle(event).unwrap(), Handled::Dropped);
            assert_eq!(m.state(), MachineState::Animating(Animating::FirstRender));
            assert_eq!(m.context(), &before);
        }
    }

    #[test]
    fn apply_filters_keeps_key_and_settles_filtered() {
        let mut m = interactive();
        let handled = m.handle(ViewerEvent::ApplyFilters { filters: sindh() }).unwrap();

        assert_eq!(
            handled,
            Handled::Started(AnimationTask::ApplyFilter {
                filters: sindh(),
                votes_key: VotesKey::Declared,
            })
        );
        assert_eq!(m.complete(), Some(Interactive::Filtered));
        assert_eq!(m.context().filters, sindh());
    }

    #[test]
    fn key_change_while_unfiltered_only_recolors() {
        let mut m = interactive();
        let handled = m
            .handle(ViewerEvent::ChangeVotesKey {
                votes_key: VotesKey::Actual,
            })
            .unwrap();

        assert_eq!(
            handled,
            Handled::Started(AnimationTask::DataKeyChange {
                votes_key: VotesKey::Actual
            })
        );
        assert_eq!(m.complete(), Some(Interactive::Unfiltered));
    }

    #[test]
    fn key_change_while_filtered_reapplies_the_filter() {
        let mut m = interactive();
        m.handle(ViewerEvent::ApplyFilters { filters: sindh() }).unwrap();
        m.complete();

        let handled = m
            .handle(ViewerEvent::ChangeVotesKey {
                votes_key: VotesKey::Actual,
            })
            .unwrap();

        assert_eq!(m.state(), MachineState::Animating(Animating::ApplyFilter));
        assert_eq!(
            handled,
            Handled::Started(AnimationTask::ApplyFilter {
                filters: sindh(),
                votes_key: VotesKey::Actual,
            })
        );
        assert_eq!(m.complete(), Some(Interactive::Filtered));
        assert_eq!(
            m.context(),
            &Context {
                filters: sindh(),
                votes_key: VotesKey::Actual,
            }
        );
    }

    #[test]
    fn remove_filters_keeps_context_and_carries_key() {
        let mut m = interactive();
        m.handle(ViewerEvent::ChangeVotesKey {
            votes_key: VotesKey::Actual,
        })
        .unwrap();
        m.complete();
        m.handle(ViewerEvent::ApplyFilters { filters: sindh() }).unwrap();
        m.complete();

        let handled = m.handle(ViewerEvent::RemoveFilters).unwrap();
        assert_eq!(
            handled,
            Handled::Started(AnimationTask::RemoveFilter {
                votes_key: VotesKey::Actual
            })
        );
        assert_eq!(m.complete(), Some(Interactive::Unfiltered));
        assert_eq!(m.context().filters, sindh());
    }

    #[test]
    fn unrecognized_key_is_refused_in_place() {
        let mut m = Machine::new(
            Context::new(VotesKey::Declared),
            [VotesKey::Declared].into_iter().collect(),
        );
        m.complete();

        let err = m
            .handle(ViewerEvent::ChangeVotesKey {
                votes_key: VotesKey::Actual,
            })
            .unwrap_err();

        assert!(matches!(
            err,
            OrchestratorError::Tabulation(TabulationError::InvalidKey(_))
        ));
        assert_eq!(m.state(), MachineState::Interactive(Interactive::Unfiltered));
        assert_eq!(m.context().votes_key, VotesKey::Declared);
    }

    #[test]
    fn states_display_as_dotted_paths() {
        assert_eq!(
            MachineState::Animating(Animating::DataKeyChange).to_string(),
            "animating.dataKeyChange"
        );
        assert_eq!(
            MachineState::Interactive(Interactive::Filtered).to_string(),
            "interactive.filtered"
        );
    }

    #[test]
    fn events_deserialize_from_tagged_json() {
        let event: ViewerEvent = serde_json::from_value(serde_json::json!({
            "type": "changeVotesKey",
            "votesKey": "actualVotes"
        }))
        .unwrap();
        assert_eq!(
            event,
            ViewerEvent::ChangeVotesKey {
                votes_key: VotesKey::Actual
            }
        );

        let event: ViewerEvent =
            serde_json::from_value(serde_json::json!({"type": "removeFilters"})).unwrap();
        assert_eq!(event.name(), "removeFilters");
    }
}
