use goap_core::{
    Action, ActionFactory, ActionStatus, PlanRunner, PlanSpec, TickContext, WorldMut, WorldView,
};

#[derive(Default)]
struct ArenaWorld {
    log: Vec<&'static str>,
    canceled: Vec<&'static str>,
    target_alive: bool,
}

impl WorldView for ArenaWorld {
    type Agent = u64;
}

impl WorldMut for ArenaWorld {}

#[derive(Debug, Clone)]
enum Spec {
    Approach,
    Strike,
}

struct ApproachAction {
    remaining: u32,
}

impl Action<ArenaWorld> for ApproachAction {
    fn tick(&mut self, _ctx: &TickContext, _agent: u64, world: &mut ArenaWorld) -> ActionStatus {
        world.log.push("approach");
        if self.remaining == 0 {
            return ActionStatus::Success;
        }
        self.remaining -= 1;
        ActionStatus::Running
    }

    fn cancel(&mut self, _ctx: &TickContext, _agent: u64, world: &mut ArenaWorld) {
        world.canceled.push("approach");
    }
}

struct StrikeAction;

impl Action<ArenaWorld> for StrikeAction {
    fn tick(&mut self, _ctx: &TickContext, _agent: u64, world: &mut ArenaWorld) -> ActionStatus {
        world.log.push("strike");
        // Structurally valid plan, semantically stale world: the target is
        // gone by the time this step runs.
        if !world.target_alive {
            return ActionStatus::Failure;
        }
        world.target_alive = false;
        ActionStatus::Success
    }
}

#[derive(Clone, Copy)]
struct ArenaFactory;

impl ActionFactory<ArenaWorld> for ArenaFactory {
    type Spec = Spec;

    fn build(
        &self,
        spec: &Self::Spec,
        _ctx: &TickContext,
        _agent: u64,
        _world: &ArenaWorld,
    ) -> Box<dyn Action<ArenaWorld>> {
        match spec {
            Spec::Approach => Box::new(ApproachAction { remaining: 2 }),
            Spec::Strike => Box::new(StrikeAction),
        }
    }
}

#[test]
fn runner_executes_steps_in_order() {
    let plan = PlanSpec::new(vec![Spec::Approach, Spec::Strike], 2.0);
    let mut runner = PlanRunner::new(plan, ArenaFactory);
    let mut world = ArenaWorld {
        target_alive: true,
        ..ArenaWorld::default()
    };

    let mut last = ActionStatus::Running;
    for tick in 0..10u64 {
        last = runner.tick(&TickContext::new(tick, 0.1), 1, &mut world);
        if last != ActionStatus::Running {
            break;
        }
    }

    assert_eq!(last, ActionStatus::Success);
    assert_eq!(world.log, vec!["approach", "approach", "approach", "strike"]);
    assert!(runner.is_finished());
}

#[test]
fn step_failure_aborts_the_remaining_plan() {
    // Strike twice: the second strike finds the target already dead.
    let plan = PlanSpec::new(vec![Spec::Strike, Spec::Strike], 2.0);
    let mut runner = PlanRunner::new(plan, ArenaFactory);
    let mut world = ArenaWorld {
        target_alive: true,
        ..ArenaWorld::default()
    };

    let ctx = TickContext::new(0, 0.1);
    assert_eq!(runner.tick(&ctx, 1, &mut world), ActionStatus::Failure);
    assert_eq!(world.log, vec!["strike", "strike"]);
    assert!(runner.is_finished());
    assert_eq!(runner.current_index(), 1);

    // The runner stays failed; it never resumes past the failed step.
    assert_eq!(runner.tick(&ctx, 1, &mut world), ActionStatus::Failure);
    assert_eq!(world.log.len(), 2);
}

#[test]
fn cancel_propagates_to_the_in_flight_step() {
    let plan = PlanSpec::new(vec![Spec::Approach], 1.0);
    let mut runner = PlanRunner::new(plan, ArenaFactory);
    let mut world = ArenaWorld::default();

    let ctx = TickContext::new(0, 0.1);
    assert_eq!(runner.tick(&ctx, 1, &mut world), ActionStatus::Running);

    runner.cancel(&ctx, 1, &mut world);
    assert_eq!(world.canceled, vec!["approach"]);
}

#[test]
fn empty_plan_succeeds_immediately() {
    let plan: PlanSpec<Spec> = PlanSpec::empty();
    let mut runner = PlanRunner::new(plan, ArenaFactory);
    let mut world = ArenaWorld::default();

    let ctx = TickContext::new(0, 0.1);
    assert_eq!(runner.tick(&ctx, 1, &mut world), ActionStatus::Success);
    assert!(runner.is_finished());
}
