//! Umbrella crate that re-exports the `goap-*` building blocks.
//!
//! This crate is intended as a convenient entrypoint: world state, goals,
//! actions, and plan execution in [`core`], the search in [`planner`], and
//! the cross-agent request service in [`sched`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use goap_core as core;

#[cfg(feature = "planner")]
#[cfg_attr(docsrs, doc(cfg(feature = "planner")))]
pub use goap_planner as planner;

#[cfg(feature = "sched")]
#[cfg_attr(docsrs, doc(cfg(feature = "sched")))]
pub use goap_sched as sched;
