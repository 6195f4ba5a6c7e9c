use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Key of a world-state fact.
pub type StateKey = Cow<'static, str>;

/// A single typed fact value.
///
/// The variant set is closed on purpose: comparisons are exhaustive and
/// statically checked instead of runtime-cast. `Ref` carries an opaque stable
/// entity id (an `AgentId::stable_id`, an object handle, etc.); the kernel
/// never dereferences it.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StateValue {
    Bool(bool),
    Int(i64),
    Float(f32),
    Ref(u64),
}

impl StateValue {
    pub fn as_bool(self) -> Option<bool> {
        match self {
            StateValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_int(self) -> Option<i64> {
        match self {
            StateValue::Int(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_float(self) -> Option<f32> {
        match self {
            StateValue::Float(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_ref_id(self) -> Option<u64> {
        match self {
            StateValue::Ref(r) => Some(r),
            _ => None,
        }
    }

    fn rank(self) -> u8 {
        match self {
            StateValue::Bool(_) => 0,
            StateValue::Int(_) => 1,
            StateValue::Float(_) => 2,
            StateValue::Ref(_) => 3,
        }
    }
}

// Floats compare by total order so snapshots can key ordered maps. `From<f32>`
// normalizes -0.0 to 0.0; values built through the conversions therefore never
// hit the -0.0 != 0.0 edge of `total_cmp`.
impl Ord for StateValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (StateValue::Bool(a), StateValue::Bool(b)) => a.cmp(b),
            (StateValue::Int(a), StateValue::Int(b)) => a.cmp(b),
            (StateValue::Float(a), StateValue::Float(b)) => a.total_cmp(b),
            (StateValue::Ref(a), StateValue::Ref(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for StateValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for StateValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for StateValue {}

impl Hash for StateValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.rank());
        match self {
            StateValue::Bool(b) => b.hash(state),
            StateValue::Int(i) => i.hash(state),
            StateValue::Float(f) => f.to_bits().hash(state),
            StateValue::Ref(r) => r.hash(state),
        }
    }
}

impl From<bool> for StateValue {
    fn from(value: bool) -> Self {
        StateValue::Bool(value)
    }
}

impl From<i64> for StateValue {
    fn from(value: i64) -> Self {
        StateValue::Int(value)
    }
}

impl From<i32> for StateValue {
    fn from(value: i32) -> Self {
        StateValue::Int(value as i64)
    }
}

impl From<f32> for StateValue {
    fn from(value: f32) -> Self {
        // Normalize -0.0 so equality stays bitwise-consistent.
        StateValue::Float(if value == 0.0 { 0.0 } else { value })
    }
}

/// A snapshot of named facts an agent currently believes to be true.
///
/// Snapshots are built in place (`set`/`with`) and then treated as immutable:
/// the search derives successor states with [`WorldState::merged`], never by
/// mutating a published snapshot. A `BTreeMap` keeps iteration order (and
/// therefore logs and search tie-breaking inputs) deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldState {
    facts: BTreeMap<StateKey, StateValue>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Look up a fact. Absent keys are `None`, never a silent default; the
    /// `*_or` accessors exist for callers that want one.
    pub fn get(&self, key: &str) -> Option<StateValue> {
        self.facts.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.facts.contains_key(key)
    }

    /// Insert or update a fact in this snapshot. Intended for snapshot
    /// construction; published snapshots must not be mutated further.
    pub fn set(&mut self, key: impl Into<StateKey>, value: impl Into<StateValue>) {
        self.facts.insert(key.into(), value.into());
    }

    /// Builder form of [`WorldState::set`].
    pub fn with(mut self, key: impl Into<StateKey>, value: impl Into<StateValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Typed accessor with a caller-supplied default. A partially populated
    /// snapshot (a sensor that has not run yet) degrades gracefully instead of
    /// failing planning. A present key of the wrong type also yields the
    /// default.
    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(StateValue::as_bool).unwrap_or(default)
    }

    pub fn int_or(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(StateValue::as_int).unwrap_or(default)
    }

    pub fn float_or(&self, key: &str, default: f32) -> f32 {
        self.get(key).and_then(StateValue::as_float).unwrap_or(default)
    }

    pub fn ref_or(&self, key: &str, default: u64) -> u64 {
        self.get(key).and_then(StateValue::as_ref_id).unwrap_or(default)
    }

    /// New snapshot with `other`'s facts overlaid onto this one. This is how
    /// the search applies action effects without touching the parent node.
    pub fn merged(&self, other: &WorldState) -> WorldState {
        let mut facts = self.facts.clone();
        for (key, value) in &other.facts {
            facts.insert(key.clone(), *value);
        }
        WorldState { facts }
    }

    /// True iff every fact in `goal` is present here with an equal value.
    /// Extra facts in `self` are ignored.
    pub fn satisfies(&self, goal: &WorldState) -> bool {
        goal.facts
            .iter()
            .all(|(key, want)| self.facts.get(key) == Some(want))
    }

    /// Count of goal facts not yet satisfied. Search heuristic input.
    pub fn distance(&self, goal: &WorldState) -> u32 {
        self.unsatisfied(goal).count() as u32
    }

    /// Goal keys whose values are absent or mismatched in this snapshot.
    pub fn unsatisfied<'a>(&'a self, goal: &'a WorldState) -> impl Iterator<Item = &'a str> + 'a {
        goal.facts
            .iter()
            .filter(move |(key, want)| self.facts.get(*key) != Some(*want))
            .map(|(key, _)| key.as_ref())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.facts.keys().map(|k| k.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, StateValue)> {
        self.facts.iter().map(|(k, v)| (k.as_ref(), *v))
    }
}

impl<K, V> FromIterator<(K, V)> for WorldState
where
    K: Into<StateKey>,
    V: Into<StateValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        WorldState {
            facts: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
