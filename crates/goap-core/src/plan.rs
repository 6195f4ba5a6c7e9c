use crate::{Action, ActionStatus, TickContext, WorldMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Serializable plan data: the ordered action specs the planner chose, plus
/// the accumulated search cost for diagnostics.
///
/// A plan is owned by exactly one agent once delivered and is replaced
/// wholesale on every replan, never patched in place.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanSpec<S> {
    pub steps: Vec<S>,
    pub cost: f32,
}

impl<S> PlanSpec<S> {
    pub fn new(steps: Vec<S>, cost: f32) -> Self {
        Self { steps, cost }
    }

    /// The trivial plan for a goal the current state already satisfies.
    pub fn empty() -> Self {
        Self {
            steps: Vec::new(),
            cost: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Build runtime `Action`s from immutable, serializable specs.
///
/// The planner outputs `PlanSpec<Spec>`; the runner turns each `Spec` into an
/// executable `Action` lazily, one step at a time, so a step is instantiated
/// against the world as it is when the step is reached, not when the plan was
/// made.
pub trait ActionFactory<W>: 'static
where
    W: WorldMut + 'static,
{
    type Spec: Clone + 'static;

    fn build(
        &self,
        spec: &Self::Spec,
        ctx: &TickContext,
        agent: W::Agent,
        world: &W,
    ) -> Box<dyn Action<W>>;
}

/// Drives an installed `PlanSpec` one step at a time.
///
/// A `Failure` from any step aborts the remainder: effects of earlier steps
/// were only predicted by the planner, so a plan is not resumable past a
/// failed step. The runner keeps reporting `Failure` afterwards; the agent is
/// expected to discard it and request a new plan.
pub struct PlanRunner<W, F>
where
    W: WorldMut + 'static,
    F: ActionFactory<W>,
{
    plan: PlanSpec<F::Spec>,
    factory: F,
    index: usize,
    current: Option<Box<dyn Action<W>>>,
    failed: bool,
}

impl<W, F> PlanRunner<W, F>
where
    W: WorldMut + 'static,
    F: ActionFactory<W>,
{
    pub fn new(plan: PlanSpec<F::Spec>, factory: F) -> Self {
        Self {
            plan,
            factory,
            index: 0,
            current: None,
            failed: false,
        }
    }

    pub fn plan(&self) -> &PlanSpec<F::Spec> {
        &self.plan
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn is_finished(&self) -> bool {
        self.failed || self.index >= self.plan.steps.len()
    }

    pub fn tick(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W) -> ActionStatus {
        if self.failed {
            return ActionStatus::Failure;
        }

        while self.index < self.plan.steps.len() {
            if self.current.is_none() {
                let spec = &self.plan.steps[self.index];
                let world_view: &W = &*world;
                self.current = Some(self.factory.build(spec, ctx, agent, world_view));
            }

            let Some(action) = self.current.as_mut() else {
                self.failed = true;
                return ActionStatus::Failure;
            };

            match action.tick(ctx, agent, world) {
                ActionStatus::Running => return ActionStatus::Running,
                ActionStatus::Failure => {
                    self.current = None;
                    self.failed = true;
                    return ActionStatus::Failure;
                }
                ActionStatus::Success => {
                    self.current = None;
                    self.index += 1;
                }
            }
        }

        ActionStatus::Success
    }

    pub fn cancel(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W) {
        if let Some(current) = self.current.as_mut() {
            current.cancel(ctx, agent, world);
        }
        self.current = None;
    }
}
