//! Travel-task contract: complete inside the stop radius, otherwise ask the
//! navigator for a bounded-speed thrust.

use proptest::prelude::*;
use tamagocchi_core::task::{GoToPlanet, GoToShip, TaskContext};
use tamagocchi_core::prelude::*;
use tamagocchi_test_utils::fixtures::{planet, ship, WorldBuilder, ENEMY, ME};
use tamagocchi_test_utils::navigator::RecordingNavigator;
use tamagocchi_test_utils::strategies::arb_coord;

fn step(task: &mut Task, map: &GameMap, navigator: &RecordingNavigator) -> TaskStep {
    let config = BotConfig::default();
    let me = map.ship(ME, ShipId(0)).cloned().unwrap();
    let ctx = TaskContext {
        world: map,
        navigator,
        config: &config,
        nav: config.mine_nav,
        ship: &me,
    };
    task.update(&ctx)
}

proptest! {
    #[test]
    fn prop_go_to_planet_speed_is_bounded(
        (sx, sy) in arb_coord(),
        (px, py) in arb_coord(),
        stop_radius in 0.0f64..20.0,
    ) {
        let map = WorldBuilder::default()
            .planet(planet(0, px, py, 3.0, 2))
            .my_ship(0, sx, sy)
            .build();
        let navigator = RecordingNavigator::new();
        let mut task = Task::GoToPlanet(GoToPlanet {
            planet: PlanetId(0),
            stop_radius,
            for_docking: true,
        });

        let distance = Position::new(sx, sy).distance_to(Position::new(px, py));
        let result = step(&mut task, &map, &navigator);

        if distance <= stop_radius {
            prop_assert_eq!(result, TaskStep::Completed);
            prop_assert!(navigator.requests().is_empty());
        } else {
            let request = navigator.last_request().unwrap();
            let remaining = distance - stop_radius;
            prop_assert!(request.max_speed >= 1);
            prop_assert!(request.max_speed <= 7);
            prop_assert!(f64::from(request.max_speed) <= remaining.max(1.0));
            prop_assert!(request.avoid_obstacles);
            prop_assert!(matches!(result, TaskStep::Move(Some(_))));
        }
    }

    #[test]
    fn prop_go_to_ship_completes_only_in_range(
        (sx, sy) in arb_coord(),
        (tx, ty) in arb_coord(),
        stop_radius in 0.0f64..10.0,
    ) {
        let map = WorldBuilder::default()
            .my_ship(0, sx, sy)
            .ship(ship(ENEMY, 5, tx, ty))
            .build();
        let navigator = RecordingNavigator::new();
        let mut task = Task::GoToShip(GoToShip {
            target_player: ENEMY,
            target_ship: ShipId(5),
            stop_radius,
            kamikaze: false,
        });

        let distance = Position::new(sx, sy).distance_to(Position::new(tx, ty));
        let completed = step(&mut task, &map, &navigator) == TaskStep::Completed;
        prop_assert_eq!(completed, distance <= stop_radius);
    }
}

#[test]
fn test_kamikaze_flies_without_avoidance() {
    let map = WorldBuilder::default()
        .my_ship(0, 20.0, 20.0)
        .ship(ship(ENEMY, 5, 60.0, 20.0))
        .build();
    let navigator = RecordingNavigator::new();
    let mut task = Task::GoToShip(GoToShip {
        target_player: ENEMY,
        target_ship: ShipId(5),
        stop_radius: 0.0,
        kamikaze: true,
    });

    step(&mut task, &map, &navigator);

    let request = navigator.last_request().unwrap();
    assert!(!request.avoid_obstacles);
    assert_eq!(request.max_speed, 7);
}

#[test]
fn test_refused_path_yields_empty_move() {
    let map = WorldBuilder::default()
        .planet(planet(0, 80.0, 20.0, 3.0, 2))
        .my_ship(0, 20.0, 20.0)
        .build();
    let navigator = RecordingNavigator::refusing();
    let mut task = Task::GoToPlanet(GoToPlanet {
        planet: PlanetId(0),
        stop_radius: 7.0,
        for_docking: true,
    });

    assert_eq!(step(&mut task, &map, &navigator), TaskStep::Move(None));
    assert_eq!(navigator.requests().len(), 1);
}

#[test]
fn test_full_planet_rejects_miners_but_not_defenders() {
    let mut full = planet(0, 80.0, 20.0, 3.0, 1);
    full.owner = Some(ME);
    full.docked_ships.push(ShipId(1));
    let map = WorldBuilder::default()
        .planet(full)
        .my_ship(0, 20.0, 20.0)
        .my_ship(1, 80.0, 25.0)
        .build();
    let navigator = RecordingNavigator::new();

    let mut mining = Task::GoToPlanet(GoToPlanet {
        planet: PlanetId(0),
        stop_radius: 7.0,
        for_docking: true,
    });
    assert_eq!(
        step(&mut mining, &map, &navigator),
        TaskStep::Alarm(Issue::NoTarget)
    );

    let mut guarding = Task::GoToPlanet(GoToPlanet {
        planet: PlanetId(0),
        stop_radius: 9.0,
        for_docking: false,
    });
    assert!(matches!(
        step(&mut guarding, &map, &navigator),
        TaskStep::Move(Some(_))
    ));
}
