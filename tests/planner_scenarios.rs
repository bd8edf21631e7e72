use gridplan::{
    Cell, Direction, Hazard, Layout, MdpPlanner, PlannerConfig, RewardConfig, RewardMapBuilder,
    Snapshot, simulation::Game,
};

mod common;

use common::{approx_eq, corridor_snapshot, open_snapshot, with_hazards};

fn planner() -> MdpPlanner {
    MdpPlanner::new(PlannerConfig::default()).expect("default config is valid")
}

#[test]
fn open_grid_moves_toward_single_goal() {
    let snapshot = open_snapshot(3, 3, Cell::new(0, 0), vec![Cell::new(2, 2)]);
    let config = PlannerConfig::default()
        .with_discount(0.95)
        .with_tolerance(0.01)
        .with_max_iterations(100);
    let planner = MdpPlanner::new(config).unwrap();

    let decision = planner.decide(&snapshot).unwrap();
    assert!(
        matches!(decision.action, Direction::North | Direction::East),
        "unexpected action {}",
        decision.action
    );

    let goal = Cell::new(2, 2);
    let next = snapshot.agent.offset(decision.action);
    assert!(next.manhattan(goal) < snapshot.agent.manhattan(goal));
    assert!(decision.report.iterations <= 100);
}

#[test]
fn symmetric_open_grid_breaks_tie_by_fixed_order() {
    let snapshot = open_snapshot(3, 3, Cell::new(0, 0), vec![Cell::new(2, 2)]);
    let decision = planner().decide(&snapshot).unwrap();
    let north = decision
        .candidates
        .iter()
        .find(|c| c.direction == Direction::North)
        .unwrap();
    let east = decision
        .candidates
        .iter()
        .find(|c| c.direction == Direction::East)
        .unwrap();
    assert_eq!(north.expected_value, east.expected_value);
    assert_eq!(decision.action, Direction::North);
}

#[test]
fn never_steps_onto_lethal_hazard_guarding_goal() {
    // Agent at x=2, hazard at x=3, the only food behind it at x=4.
    let mut snapshot = corridor_snapshot(4, 2);
    snapshot.food = vec![Cell::new(4, 1)];
    let snapshot = with_hazards(snapshot, vec![Hazard::lethal(Cell::new(3, 1))]);
    let decision = planner().decide(&snapshot).unwrap();
    assert_eq!(decision.action, Direction::West);
}

#[test]
fn neutralized_hazard_does_not_block_goal() {
    let mut snapshot = corridor_snapshot(4, 2);
    snapshot.food = vec![Cell::new(4, 1)];
    let snapshot = with_hazards(snapshot, vec![Hazard::new(Cell::new(3, 1), 10)]);
    let decision = planner().decide(&snapshot).unwrap();
    assert_eq!(decision.action, Direction::East);
}

#[test]
fn capsule_preferred_over_equidistant_food() {
    let mut snapshot = corridor_snapshot(5, 3);
    snapshot.food = vec![Cell::new(1, 1)];
    snapshot.capsules = vec![Cell::new(5, 1)];
    let decision = planner().decide(&snapshot).unwrap();
    assert_eq!(decision.action, Direction::East);
}

#[test]
fn solving_twice_is_identical() {
    let layout = Layout::parse(include_str!("../layouts/medium.lay")).unwrap();
    let snapshot = Snapshot::capture(&Game::new(&layout, Some(1)));
    let planner = planner();

    let first = planner.plan(&snapshot);
    let second = planner.plan(&snapshot);
    assert_eq!(first.values, second.values);
    assert_eq!(first.report, second.report);
    assert_eq!(
        planner.decide(&snapshot).unwrap(),
        planner.decide(&snapshot).unwrap()
    );
}

#[test]
fn wall_values_stay_zero_on_real_layout() {
    let layout = Layout::parse(include_str!("../layouts/medium.lay")).unwrap();
    let snapshot = Snapshot::capture(&Game::new(&layout, Some(1)));
    let plan = planner().plan(&snapshot);
    for wall in &layout.walls {
        assert_eq!(plan.values.value(*wall), 0.0, "wall {wall}");
        assert_eq!(plan.rewards.value(*wall), 0.0, "wall {wall}");
    }
}

#[test]
fn iteration_cap_bounds_work() {
    let layout = Layout::parse(include_str!("../layouts/medium.lay")).unwrap();
    let snapshot = Snapshot::capture(&Game::new(&layout, Some(1)));
    for cap in [1, 5, 20] {
        let config = PlannerConfig::default()
            .with_tolerance(1e-12)
            .with_max_iterations(cap);
        let plan = MdpPlanner::new(config).unwrap().plan(&snapshot);
        assert!(plan.report.iterations <= cap);
    }
}

#[test]
fn goal_in_dead_end_keeps_goal_reward() {
    let mut snapshot = corridor_snapshot(4, 2);
    snapshot.food = vec![Cell::new(1, 1), Cell::new(4, 1)];
    let config = RewardConfig::default();
    let rewards = RewardMapBuilder::new(&config).build(&snapshot.grid(), &snapshot);
    assert!(approx_eq(rewards.value(Cell::new(1, 1)), config.goal_reward));
    assert!(approx_eq(rewards.value(Cell::new(4, 1)), config.goal_reward));
}

#[test]
fn unassigned_lookups_default_to_zero() {
    let snapshot = open_snapshot(2, 2, Cell::new(0, 0), vec![Cell::new(1, 1)]);
    let plan = planner().plan(&snapshot);
    assert_eq!(plan.values.value(Cell::new(5, 5)), 0.0);
    assert_eq!(plan.rewards.value(Cell::new(-1, 0)), 0.0);
}

#[test]
fn decision_from_layout_file_picks_legal_move() {
    let layout = Layout::parse(include_str!("../layouts/small.lay")).unwrap();
    let game = Game::new(&layout, Some(3));
    let snapshot = Snapshot::capture(&game);
    let decision = planner().decide(&snapshot).unwrap();
    assert!(snapshot.legal.contains(&decision.action));
}
