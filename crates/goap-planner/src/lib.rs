//! Deterministic GOAP planner producing `goap-core` plan specs.
//!
//! The planner searches the space of world states reachable by chaining
//! catalogue actions, best-first on accumulated cost plus an admissible
//! missing-facts heuristic, and returns the cheapest ordered action sequence
//! that satisfies the goal.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod catalogue;
pub mod planner;

pub use catalogue::{Catalogue, PlannerAction};
pub use planner::{Planner, PlannerConfig};
