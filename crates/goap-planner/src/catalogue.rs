use core::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use goap_core::{ActionKey, ActionOutcome, WorldState};

type CostFn = Box<dyn Fn(&WorldState) -> f32 + Send + Sync>;
type ValidFn = Box<dyn Fn(&WorldState) -> bool + Send + Sync>;

/// Planning-time description of one agent behavior.
///
/// The cost function must be strictly positive and a pure function of the
/// supplied state (no wall-clock, no randomness) or planning loses its
/// determinism guarantee. Dynamic policy lives here: double the cost when the
/// target is off-focus, multiply it when the action would undo another
/// agent's crowd control, and so on.
///
/// `spec` is the serializable payload copied into the resulting plan; the
/// runtime side builds the executable action from it.
pub struct PlannerAction<S> {
    pub name: ActionKey,
    pub preconditions: WorldState,
    pub effects: WorldState,
    cost_fn: CostFn,
    valid_fn: ValidFn,
    failures: AtomicU32,
    pub spec: S,
}

impl<S> PlannerAction<S> {
    /// Action with a fixed base cost.
    pub fn new(
        name: impl Into<ActionKey>,
        preconditions: WorldState,
        effects: WorldState,
        cost: f32,
        spec: S,
    ) -> Self {
        Self::with_cost_fn(name, preconditions, effects, move |_| cost, spec)
    }

    /// Action whose base cost depends on the state at invocation time.
    pub fn with_cost_fn(
        name: impl Into<ActionKey>,
        preconditions: WorldState,
        effects: WorldState,
        cost_fn: impl Fn(&WorldState) -> f32 + Send + Sync + 'static,
        spec: S,
    ) -> Self {
        Self {
            name: name.into(),
            preconditions,
            effects,
            cost_fn: Box::new(cost_fn),
            valid_fn: Box::new(|_| true),
            failures: AtomicU32::new(0),
            spec,
        }
    }

    /// Additional runtime validity check beyond the precondition facts, for
    /// rejecting actions that are structurally plannable but semantically
    /// stale (a target reference that is no longer alive, a depleted
    /// resource). Must be pure, like the cost function.
    pub fn with_validity(
        mut self,
        valid_fn: impl Fn(&WorldState) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.valid_fn = Box::new(valid_fn);
        self
    }

    pub fn is_applicable(&self, state: &WorldState) -> bool {
        state.satisfies(&self.preconditions) && (self.valid_fn)(state)
    }

    /// Predicted successor state. Never executes real side effects.
    pub fn apply(&self, state: &WorldState) -> WorldState {
        state.merged(&self.effects)
    }

    /// Effective cost: the base cost scaled up linearly per recorded
    /// execution failure, so a chronically failing action prices itself out
    /// of plans instead of being retried forever within a cycle.
    pub fn cost(&self, state: &WorldState) -> f32 {
        let base = (self.cost_fn)(state);
        debug_assert!(base > 0.0, "action `{}` must have positive cost", self.name);
        base * (1.0 + self.failures.load(Ordering::Relaxed) as f32)
    }

    pub fn failure_count(&self) -> u32 {
        self.failures.load(Ordering::Relaxed)
    }

    pub fn note_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn note_success(&self) {
        self.failures.store(0, Ordering::Relaxed);
    }
}

impl<S> fmt::Debug for PlannerAction<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlannerAction")
            .field("name", &self.name)
            .field("preconditions", &self.preconditions)
            .field("effects", &self.effects)
            .field("failures", &self.failure_count())
            .finish()
    }
}

/// An agent's full action catalogue.
///
/// Long-lived: one instance per agent (or per role), shared behind an `Arc`
/// between the agent's update path and the scheduler drain. Only the failure
/// counters mutate between planning cycles, which is why they are atomics.
#[derive(Debug, Default)]
pub struct Catalogue<S> {
    actions: Vec<PlannerAction<S>>,
}

impl<S> Catalogue<S> {
    pub fn new(actions: Vec<PlannerAction<S>>) -> Self {
        Self { actions }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn actions(&self) -> &[PlannerAction<S>] {
        &self.actions
    }

    pub fn get(&self, key: impl Into<ActionKey>) -> Option<&PlannerAction<S>> {
        let key = key.into();
        self.actions.iter().find(|a| a.name == key)
    }

    /// Report a runtime execution outcome back to the keyed action: success
    /// resets its failure counter, failure escalates it.
    pub fn note_outcome(&self, key: impl Into<ActionKey>, outcome: ActionOutcome) {
        if let Some(action) = self.get(key) {
            match outcome {
                ActionOutcome::Success => action.note_success(),
                ActionOutcome::Failure => action.note_failure(),
            }
        }
    }
}
