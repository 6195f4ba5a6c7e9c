use core::fmt::Debug;
use core::hash::Hash;

/// Stable identifier for an agent.
///
/// Deterministic planning and scheduling require:
/// - stable ordering (`Ord`) so batch logs replay identically
/// - hashing (`Hash`) so the scheduler can key its active-plan map
/// - a stable numeric ID (`stable_id`) for logs and diagnostics
pub trait AgentId: Copy + Ord + Eq + Hash + Debug + Send + Sync + 'static {
    fn stable_id(self) -> u64;
}

impl AgentId for u64 {
    fn stable_id(self) -> u64 {
        self
    }
}

impl AgentId for u32 {
    fn stable_id(self) -> u64 {
        self as u64
    }
}

impl AgentId for usize {
    fn stable_id(self) -> u64 {
        self as u64
    }
}

/// Read-only world access.
///
/// The kernel does not prescribe which queries a world must expose; the
/// perception collaborators that refresh an agent's `WorldState` each cycle
/// define their own extension traits.
pub trait WorldView {
    type Agent: AgentId;
}

/// Write access / effect sink for runtime actions.
pub trait WorldMut: WorldView {}
