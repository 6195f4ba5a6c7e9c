//! Time-budgeted planning scheduler.
//!
//! Decouples plan computation from per-agent decision cycles: many agents
//! enqueue requests concurrently, a single tick-driven drain serializes the
//! actual planning work against one planner instance.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod scheduler;

pub use scheduler::{PlanError, Result, Scheduler};
