use corner_rush_core::{fixtures::FixtureBoard, BoardLocation, Breach, Intent, Player, UnitKind};
use corner_rush_system_reactive_defense::BreachLog;

fn cell(x: i32, y: i32) -> BoardLocation {
    BoardLocation::new(x, y)
}

fn breach(x: i32, y: i32, attacker: Player) -> Breach {
    Breach {
        location: cell(x, y),
        attacker,
    }
}

#[test]
fn log_grows_only_for_enemy_breaches() {
    let events = [
        breach(3, 10, Player::Enemy),
        breach(20, 20, Player::Friendly),
        breach(3, 10, Player::Enemy),
        breach(24, 10, Player::Enemy),
        breach(7, 25, Player::Friendly),
    ];
    let mut log = BreachLog::new();
    let recorded: Vec<bool> = events.into_iter().map(|event| log.record(event)).collect();

    assert_eq!(recorded, vec![true, false, true, true, false]);
    assert_eq!(log.len(), 3);
    assert_eq!(log.locations(), &[cell(3, 10), cell(3, 10), cell(24, 10)]);
}

#[test]
fn reinforcement_requests_one_turret_per_entry_every_turn() {
    let mut log = BreachLog::new();
    for _ in 0..3 {
        let _ = log.record(breach(2, 11, Player::Enemy));
    }
    let mut board = FixtureBoard::new(12).with_resources(10.0, 0.0);

    assert_eq!(log.reinforce(&mut board), 1);
    assert_eq!(board.attempts().len(), 3, "duplicates are not collapsed");
    assert!(board
        .attempts()
        .iter()
        .all(|attempt| attempt.intent == Intent::place(UnitKind::Turret, &[cell(2, 12)])));

    board.clear_attempts();
    assert_eq!(log.reinforce(&mut board), 0);
    assert_eq!(board.attempts().len(), 3, "requests repeat on later turns");
}

#[test]
fn empty_log_requests_nothing() {
    let mut board = FixtureBoard::new(0).with_resources(10.0, 0.0);
    assert_eq!(BreachLog::new().reinforce(&mut board), 0);
    assert!(board.attempts().is_empty());
}
