use crate::state::WorldState;

/// An objective with a dynamically computed urgency score and a desired
/// world state.
///
/// `priority` must be a pure function of the supplied snapshot: no hidden
/// side effects, no randomness, no wall-clock reads. The formula itself is
/// goal-specific policy (injury ratios, distance thresholds, emergency
/// escalators) and not part of this contract.
pub trait Goal: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Urgency of this goal given the current snapshot. `<= 0.0` (or NaN)
    /// means "not applicable this cycle"; higher is more urgent.
    fn priority(&self, state: &WorldState) -> f32;

    /// The facts that must hold for this goal to be satisfied.
    fn desired_state(&self, state: &WorldState) -> WorldState;

    /// Override when a cheaper equivalent check exists.
    fn is_satisfied(&self, state: &WorldState) -> bool {
        state.satisfies(&self.desired_state(state))
    }
}

/// Index of the unsatisfied goal with the highest positive priority.
///
/// Ties break toward the earlier catalogue entry so selection is
/// deterministic. Returns `None` when every goal is satisfied, inapplicable
/// (priority `<= 0`), or scores NaN.
pub fn select_goal(goals: &[Box<dyn Goal>], state: &WorldState) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;

    for (index, goal) in goals.iter().enumerate() {
        let priority = goal.priority(state);
        if priority.is_nan() || priority <= 0.0 {
            continue;
        }
        if goal.is_satisfied(state) {
            continue;
        }
        match best {
            Some((_, best_priority)) if priority <= best_priority => {}
            _ => best = Some((index, priority)),
        }
    }

    best.map(|(index, _)| index)
}
