//! Deterministic, engine-agnostic GOAP kernel primitives.
//!
//! The kernel defines what a world-state snapshot is, what goals and actions
//! look like, and how a finished plan is executed. The search itself lives in
//! `goap-planner`; scheduling across many agents lives in `goap-sched`.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod agent;
pub mod goal;
pub mod plan;
pub mod state;
pub mod tick;

pub use action::{Action, ActionKey, ActionOutcome, ActionStatus};
pub use agent::{AgentId, WorldMut, WorldView};
pub use goal::{select_goal, Goal};
pub use plan::{ActionFactory, PlanRunner, PlanSpec};
pub use state::{StateValue, WorldState};
pub use tick::TickContext;
