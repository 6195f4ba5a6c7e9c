use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, trace, warn};

use goap_core::{AgentId, Goal, PlanSpec, WorldState};
use goap_planner::{Catalogue, Planner};

/// Why a plan request produced no plan.
///
/// Neither variant is fatal: the requesting agent falls back to a
/// lower-priority goal or idles, and operators see the `warn!` logs.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlanError {
    #[error("no plan found for goal `{goal}`")]
    NoPlanFound { goal: &'static str },

    #[error("planner panicked while planning goal `{goal}`")]
    Panicked { goal: &'static str },
}

pub type Result<T> = std::result::Result<T, PlanError>;

type Callback<S> = Box<dyn FnOnce(Result<PlanSpec<S>>) + Send>;

// Ephemeral: lives only inside the queue between submission and processing.
struct PlanRequest<A, S> {
    agent: A,
    goal_name: &'static str,
    start: WorldState,
    goal: WorldState,
    catalogue: Arc<Catalogue<S>>,
    on_complete: Callback<S>,
    submitted_at: Instant,
}

/// Process-wide planning service.
///
/// The intake side (`request_plan`) is safe from any number of agent update
/// threads. The drain side (`process_pending`) must be driven by a single
/// external tick loop; it is the only place the planner runs, which is what
/// serializes planning work. Requests are serviced strictly FIFO; there is no
/// per-request timeout, priority reordering, or mid-search cancellation: a
/// request either completes within the current tick's budget or carries over
/// whole to the next.
pub struct Scheduler<A, S>
where
    A: AgentId,
    S: Clone + Send + Sync + 'static,
{
    planner: Planner,
    pending: Mutex<VecDeque<PlanRequest<A, S>>>,
    active: DashMap<A, PlanSpec<S>>,
}

impl<A, S> Scheduler<A, S>
where
    A: AgentId,
    S: Clone + Send + Sync + 'static,
{
    pub fn new(planner: Planner) -> Self {
        Self {
            planner,
            pending: Mutex::new(VecDeque::new()),
            active: DashMap::new(),
        }
    }

    /// Enqueue a plan request. Returns immediately; the callback fires from
    /// within a later `process_pending` call with either the plan or the
    /// failure reason. The goal's desired state is captured against `start`
    /// now, so the request is self-contained once queued.
    pub fn request_plan(
        &self,
        agent: A,
        goal: &dyn Goal,
        start: WorldState,
        catalogue: Arc<Catalogue<S>>,
        on_complete: impl FnOnce(Result<PlanSpec<S>>) + Send + 'static,
    ) {
        let desired = goal.desired_state(&start);
        let request = PlanRequest {
            agent,
            goal_name: goal.name(),
            start,
            goal: desired,
            catalogue,
            on_complete: Box::new(on_complete),
            submitted_at: Instant::now(),
        };
        self.pending.lock().push_back(request);
    }

    /// Drain queued requests in submission order until the queue empties or
    /// `budget` has elapsed; returns the count processed.
    ///
    /// At least one request is serviced per call when the queue is non-empty,
    /// so a pathological budget cannot starve the queue. The budget is
    /// checked between requests only: a request is never split across ticks.
    pub fn process_pending(&self, budget: Duration) -> usize {
        let started = Instant::now();
        let mut processed = 0usize;

        loop {
            if processed > 0 && started.elapsed() >= budget {
                break;
            }
            let Some(request) = self.pending.lock().pop_front() else {
                break;
            };
            self.process_one(request);
            processed += 1;
        }

        processed
    }

    fn process_one(&self, request: PlanRequest<A, S>) {
        let PlanRequest {
            agent,
            goal_name,
            start,
            goal,
            catalogue,
            on_complete,
            submitted_at,
        } = request;

        trace!(
            goal = goal_name,
            agent = agent.stable_id(),
            wait_us = submitted_at.elapsed().as_micros() as u64,
            "processing plan request"
        );

        // A faulting cost function (or malformed action effects) must not
        // take the rest of the batch down with it.
        let planner = self.planner;
        let outcome =
            panic::catch_unwind(AssertUnwindSafe(|| planner.plan(&catalogue, &start, &goal)));

        match outcome {
            Ok(Some(plan)) => {
                debug!(
                    goal = goal_name,
                    agent = agent.stable_id(),
                    steps = plan.len(),
                    cost = plan.cost,
                    "plan installed"
                );
                self.active.insert(agent, plan.clone());
                on_complete(Ok(plan));
            }
            Ok(None) => {
                warn!(
                    goal = goal_name,
                    agent = agent.stable_id(),
                    state = ?start,
                    catalogue_size = catalogue.len(),
                    "no plan found"
                );
                on_complete(Err(PlanError::NoPlanFound { goal: goal_name }));
            }
            Err(_) => {
                warn!(
                    goal = goal_name,
                    agent = agent.stable_id(),
                    catalogue_size = catalogue.len(),
                    "planner panicked; surfacing as plan failure"
                );
                on_complete(Err(PlanError::Panicked { goal: goal_name }));
            }
        }
    }

    /// The agent's currently installed plan, if any. A newer request for the
    /// same agent replaces it wholesale once processed; cancelling in-flight
    /// execution of the old plan is the agent's responsibility.
    pub fn get_active_plan(&self, agent: A) -> Option<PlanSpec<S>> {
        self.active.get(&agent).map(|entry| entry.value().clone())
    }

    pub fn clear_active_plan(&self, agent: A) -> Option<PlanSpec<S>> {
        self.active.remove(&agent).map(|(_, plan)| plan)
    }

    pub fn pending_request_count(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn active_plan_count(&self) -> usize {
        self.active.len()
    }
}
