use core::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use goap_core::{PlanSpec, WorldState};

use crate::Catalogue;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    /// Hard cap on node expansions. This is the safety valve that bounds the
    /// search when the goal is unreachable from any state the catalogue can
    /// compose; it is not a tuning knob to disable.
    pub max_expansions: usize,

    /// Per-missing-fact heuristic weight. Admissibility requires this to not
    /// exceed the cheapest effective action cost in the catalogue; lower it
    /// when actions cost less than 1.0.
    pub heuristic_weight: f32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_expansions: 4096,
            heuristic_weight: 1.0,
        }
    }
}

/// Heuristic best-first search over world-state snapshots.
///
/// The planner itself is stateless apart from its config: the catalogue is
/// supplied per call so one planner instance can serve every agent. It is not
/// re-entrant-safe by contract (see `goap-sched`), though nothing here
/// mutates shared state beyond reading the catalogue's failure counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Planner {
    config: PlannerConfig,
}

struct Node {
    state: WorldState,
    // (parent arena index, catalogue action index) that produced this node.
    parent: Option<(usize, usize)>,
}

#[derive(Clone, Copy)]
struct OpenEntry {
    f: f32,
    g: f32,
    node: usize,
    tie: u64,
}

impl OpenEntry {
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then(self.g.total_cmp(&other.g))
            .then(self.tie.cmp(&other.tie))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap; the tie
        // counter makes expansion order (and thus the returned plan) a pure
        // function of the inputs.
        other.key_cmp(self)
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Planner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> PlannerConfig {
        self.config
    }

    /// Cheapest ordered action sequence transforming `start` into a state
    /// satisfying `goal`, or `None` if the frontier empties or the expansion
    /// limit is hit first.
    pub fn plan<S: Clone>(
        &self,
        catalogue: &Catalogue<S>,
        start: &WorldState,
        goal: &WorldState,
    ) -> Option<PlanSpec<S>> {
        if start.satisfies(goal) {
            return Some(PlanSpec::empty());
        }

        let weight = self.config.heuristic_weight;
        let h = |state: &WorldState| -> f32 { state.distance(goal) as f32 * weight };

        let mut nodes: Vec<Node> = vec![Node {
            state: start.clone(),
            parent: None,
        }];

        let mut open = BinaryHeap::<OpenEntry>::new();
        let mut tie: u64 = 0;

        // Best known path cost per visited state; prunes revisits and bounds
        // the search against effect/undo cycles in the catalogue.
        let mut best_g: BTreeMap<WorldState, f32> = BTreeMap::new();
        best_g.insert(start.clone(), 0.0);

        open.push(OpenEntry {
            f: h(start),
            g: 0.0,
            node: 0,
            tie,
        });
        tie += 1;

        let mut expansions: usize = 0;

        while let Some(entry) = open.pop() {
            expansions += 1;
            if expansions > self.config.max_expansions {
                return None;
            }

            let current_state = nodes[entry.node].state.clone();

            if current_state.satisfies(goal) {
                return Some(reconstruct(catalogue, &nodes, entry.node, entry.g));
            }

            // A cheaper path to this state was found after this entry was
            // pushed; skip the stale copy.
            let best = best_g.get(&current_state).copied().unwrap_or(f32::INFINITY);
            if entry.g > best {
                continue;
            }

            for (action_idx, action) in catalogue.actions().iter().enumerate() {
                if !action.is_applicable(&current_state) {
                    continue;
                }

                let next = action.apply(&current_state);
                if next == current_state {
                    continue;
                }

                let step_cost = action.cost(&current_state).max(f32::EPSILON);
                let next_g = entry.g + step_cost;

                let prev_best = best_g.get(&next).copied().unwrap_or(f32::INFINITY);
                if next_g >= prev_best {
                    continue;
                }
                best_g.insert(next.clone(), next_g);

                let node_idx = nodes.len();
                let f = next_g + h(&next);
                nodes.push(Node {
                    state: next,
                    parent: Some((entry.node, action_idx)),
                });
                open.push(OpenEntry {
                    f,
                    g: next_g,
                    node: node_idx,
                    tie,
                });
                tie += 1;
            }
        }

        None
    }
}

fn reconstruct<S: Clone>(
    catalogue: &Catalogue<S>,
    nodes: &[Node],
    mut node: usize,
    cost: f32,
) -> PlanSpec<S> {
    let mut steps: Vec<S> = Vec::new();
    while let Some((parent, action_idx)) = nodes[node].parent {
        steps.push(catalogue.actions()[action_idx].spec.clone());
        node = parent;
    }
    steps.reverse();
    PlanSpec::new(steps, cost)
}
