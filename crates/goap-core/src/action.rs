use core::fmt;

use crate::{TickContext, WorldMut};

/// Result of driving a runtime action for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    Running,
    Success,
    Failure,
}

/// Terminal outcome of a runtime action. Exactly one is signalled per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Success,
    Failure,
}

impl From<ActionOutcome> for ActionStatus {
    fn from(value: ActionOutcome) -> Self {
        match value {
            ActionOutcome::Success => ActionStatus::Success,
            ActionOutcome::Failure => ActionStatus::Failure,
        }
    }
}

impl ActionStatus {
    pub fn outcome(self) -> Option<ActionOutcome> {
        match self {
            ActionStatus::Running => None,
            ActionStatus::Success => Some(ActionOutcome::Success),
            ActionStatus::Failure => Some(ActionOutcome::Failure),
        }
    }
}

/// Stable name of an action, shared between the planning catalogue and the
/// runtime side so execution outcomes can be reported back to the entry that
/// planned the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActionKey(pub &'static str);

impl ActionKey {
    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl From<&'static str> for ActionKey {
    fn from(name: &'static str) -> Self {
        ActionKey(name)
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Real-world execution surface of one plan step.
///
/// `tick` is invoked once per agent tick while the step is in flight; it never
/// runs during search (the planner only ever consults the catalogue's
/// predicted effects). An action that can no longer run (target died, resource
/// gone) returns `Failure`; the owning agent must then discard the remaining
/// plan and request a new one rather than continue past the failed step.
pub trait Action<W>: 'static
where
    W: WorldMut + 'static,
{
    fn tick(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W) -> ActionStatus;

    fn cancel(&mut self, _ctx: &TickContext, _agent: W::Agent, _world: &mut W) {}
}
