//! Goal sequencing across turns.

use tamagocchi_core::goal::GoalStep;
use tamagocchi_core::prelude::*;
use tamagocchi_test_utils::fixtures::{planet, WorldBuilder, ENEMY, ME};
use tamagocchi_test_utils::navigator::RecordingNavigator;

fn run(goal: &mut Goal, map: &GameMap, navigator: &RecordingNavigator) -> GoalStep {
    let config = BotConfig::default();
    let me = map.ship(ME, ShipId(0)).cloned().unwrap();
    goal.update(map, navigator, &config, &me)
}

#[test]
fn test_defender_intercepts_then_resumes_patrol() {
    let guarded = planet(0, 100.0, 80.0, 5.0, 3);
    let config = BotConfig::default();
    let mut goal = Goal::defend(&guarded, &config);

    // Already on the orbit (radius + margin = 11) with an intruder 9 units away.
    let mut map = WorldBuilder::default()
        .planet(guarded)
        .my_ship(0, 89.0, 80.0)
        .enemy_ship(7, 80.0, 80.0)
        .build();
    let navigator = RecordingNavigator::new();

    assert!(matches!(run(&mut goal, &map, &navigator), GoalStep::Move(Some(_))));
    assert_eq!(goal.stage(), Stage::Interrupt);
    assert_eq!(goal.kind(), &GoalKind::Defend { planet: PlanetId(0) });

    let chase = navigator.last_request().unwrap();
    assert_eq!(chase.max_speed, 5);
    assert!((chase.target.x - 83.0).abs() < 1e-9);
    assert!((chase.target.y - 80.0).abs() < 1e-9);

    map.remove_ship(ENEMY, ShipId(7));
    assert!(matches!(run(&mut goal, &map, &navigator), GoalStep::Move(Some(_))));
    assert_eq!(goal.stage(), Stage::Secondary);
    assert!(matches!(goal.active_task(), Some(Task::PatrolPlanet(_))));
}

#[test]
fn test_reentry_hops_are_bounded_within_a_turn() {
    let guarded = planet(0, 100.0, 80.0, 5.0, 3);
    let mut goal = Goal::defend(&guarded, &BotConfig::default());
    let mut map = WorldBuilder::default()
        .planet(guarded)
        .my_ship(0, 89.0, 80.0)
        .enemy_ship(7, 80.0, 80.0)
        .enemy_ship(8, 89.0, 110.0)
        .build();
    let navigator = RecordingNavigator::new();

    assert!(matches!(run(&mut goal, &map, &navigator), GoalStep::Move(Some(_))));
    assert!(matches!(
        goal.active_task(),
        Some(Task::GoToShip(chase)) if chase.target_ship == ShipId(7)
    ));

    // Interrupt -> Primary -> Secondary -> Interrupt again uses every hop.
    map.remove_ship(ENEMY, ShipId(7));
    navigator.clear();
    assert_eq!(run(&mut goal, &map, &navigator), GoalStep::Move(None));
    assert_eq!(goal.stage(), Stage::Interrupt);
    assert!(matches!(
        goal.active_task(),
        Some(Task::GoToShip(chase)) if chase.target_ship == ShipId(8)
    ));
    assert!(navigator.requests().is_empty());

    assert!(matches!(run(&mut goal, &map, &navigator), GoalStep::Move(Some(_))));
}

#[test]
fn test_miner_ignores_nearby_enemies() {
    let target = planet(0, 100.0, 80.0, 5.0, 3);
    let mut goal = Goal::mine(&target, &BotConfig::default());
    let map = WorldBuilder::default()
        .planet(target)
        .my_ship(0, 40.0, 80.0)
        .enemy_ship(7, 45.0, 80.0)
        .build();
    let navigator = RecordingNavigator::new();

    assert!(matches!(run(&mut goal, &map, &navigator), GoalStep::Move(Some(_))));
    assert_eq!(goal.stage(), Stage::Primary);
}

#[test]
fn test_attack_ends_in_weapon_range() {
    let map = WorldBuilder::default()
        .my_ship(0, 40.0, 80.0)
        .enemy_ship(7, 43.0, 80.0)
        .build();
    let target = map.ship(ENEMY, ShipId(7)).cloned().unwrap();
    let mut goal = Goal::attack(&target, false, &BotConfig::default());

    assert_eq!(run(&mut goal, &map, &RecordingNavigator::new()), GoalStep::Ended);
}

#[test]
fn test_attack_on_vanished_target_needs_new_goal() {
    let mut map = WorldBuilder::default()
        .my_ship(0, 40.0, 80.0)
        .enemy_ship(7, 90.0, 80.0)
        .build();
    let target = map.ship(ENEMY, ShipId(7)).cloned().unwrap();
    let mut goal = Goal::attack(&target, true, &BotConfig::default());
    map.remove_ship(ENEMY, ShipId(7));

    assert_eq!(run(&mut goal, &map, &RecordingNavigator::new()), GoalStep::NeedsGoal);
}
