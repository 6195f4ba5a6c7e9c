use goap_core::{StateValue, WorldState};

#[test]
fn satisfies_is_a_subset_equality_check() {
    let state = WorldState::new()
        .with("has_target", true)
        .with("target_dead", false)
        .with("ammo", 12);

    let goal = WorldState::new().with("has_target", true);
    assert!(state.satisfies(&goal));

    // Extra keys in the state are ignored; a mismatched value is not.
    let goal = WorldState::new().with("has_target", true).with("ammo", 3);
    assert!(!state.satisfies(&goal));

    // An absent goal key fails the check.
    let goal = WorldState::new().with("in_cover", true);
    assert!(!state.satisfies(&goal));

    // The empty goal is satisfied by anything.
    assert!(state.satisfies(&WorldState::new()));
}

#[test]
fn merged_overlays_without_mutating_the_parent() {
    let parent = WorldState::new().with("a", 1).with("b", false);
    let effects = WorldState::new().with("b", true).with("c", 2.5f32);

    let child = parent.merged(&effects);

    assert!(!child.is_empty());
    assert_eq!(child.len(), 3);
    assert_eq!(child.get("a"), Some(StateValue::Int(1)));
    assert_eq!(child.get("b"), Some(StateValue::Bool(true)));
    assert_eq!(child.get("c"), Some(StateValue::Float(2.5)));

    // Parent snapshot untouched.
    assert_eq!(parent.get("b"), Some(StateValue::Bool(false)));
    assert!(!parent.contains("c"));
}

#[test]
fn distance_counts_unsatisfied_goal_keys() {
    let state = WorldState::new().with("a", true).with("b", 1);
    let goal = WorldState::new()
        .with("a", true)
        .with("b", 2)
        .with("c", false);

    assert_eq!(state.distance(&goal), 2);
    let mismatched: Vec<&str> = state.unsatisfied(&goal).collect();
    assert_eq!(mismatched, vec!["b", "c"]);

    assert_eq!(state.distance(&state.clone()), 0);
}

#[test]
fn typed_accessors_apply_caller_defaults() {
    let state = WorldState::new()
        .with("healthy", true)
        .with("health_ratio", 0.25f32)
        .with("target", StateValue::Ref(77));

    assert!(state.bool_or("healthy", false));
    assert_eq!(state.float_or("health_ratio", 1.0), 0.25);
    assert_eq!(state.ref_or("target", 0), 77);

    // Absent key -> default, no panic.
    assert_eq!(state.int_or("mana", 100), 100);
    // Present key of the wrong type also degrades to the default.
    assert_eq!(state.int_or("healthy", -1), -1);
}

#[test]
fn equality_covers_keys_and_values_of_both_snapshots() {
    let a = WorldState::new().with("x", 1).with("y", true);
    let b: WorldState = [("y", StateValue::Bool(true)), ("x", StateValue::Int(1))]
        .into_iter()
        .collect();
    let c = WorldState::new().with("x", 1);

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn float_values_compare_deterministically() {
    assert_eq!(StateValue::from(0.0f32), StateValue::from(-0.0f32));
    assert_eq!(StateValue::from(1.5f32), StateValue::from(1.5f32));
    assert_ne!(StateValue::from(1.5f32), StateValue::from(1.25f32));
    assert!(StateValue::from(1.0f32) < StateValue::from(2.0f32));
}
