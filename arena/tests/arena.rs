use corner_rush_arena::{parse_message, Action, Arena, Message, QueuedAction, TurnState};
use corner_rush_core::{
    Board, BoardLocation, Player, Quadrant, ResourceKind, UnitCatalog, UnitKind,
};
use serde_json::json;

fn config_line() -> String {
    json!({
        "unitInformation": [
            {"shorthand": "FF", "cost1": 1.0, "startHealth": 60.0,
             "upgrade": {"startHealth": 120.0}},
            {"shorthand": "EF", "cost1": 4.0, "startHealth": 30.0,
             "upgrade": {"cost1": 4.0}},
            {"shorthand": "DF", "cost1": 2.0, "startHealth": 75.0,
             "attackDamageWalker": 5.0, "attackRange": 2.5,
             "upgrade": {"cost1": 4.0, "attackDamageWalker": 14.0, "attackRange": 3.5}},
            {"shorthand": "PI", "cost2": 1.0, "startHealth": 15.0,
             "attackDamageWalker": 2.0, "attackDamageTower": 2.0, "attackRange": 3.5},
            {"shorthand": "EI", "cost2": 3.0, "startHealth": 5.0,
             "attackDamageWalker": 8.0, "attackDamageTower": 8.0, "attackRange": 4.5},
            {"shorthand": "SI", "cost2": 1.0, "startHealth": 40.0,
             "attackDamageWalker": 20.0, "attackRange": 4.5},
            {"shorthand": "RM"},
            {"shorthand": "UP"}
        ]
    })
    .to_string()
}

fn catalog() -> UnitCatalog {
    match parse_message(&config_line()).expect("config decodes") {
        Message::Config(catalog) => *catalog,
        other => panic!("expected configuration, got {other:?}"),
    }
}

fn empty_groups() -> serde_json::Value {
    json!([[], [], [], [], [], [], [], []])
}

fn turn_line(turn: u32, structure: f64, mobile: f64, enemy_units: serde_json::Value) -> String {
    json!({
        "turnInfo": [0, turn, -1],
        "p1Stats": [30.0, structure, mobile, 0],
        "p2Stats": [30.0, 40.0, 5.0, 0],
        "p1Units": empty_groups(),
        "p2Units": enemy_units,
        "events": {"breach": []}
    })
    .to_string()
}

fn turn_state(line: &str) -> TurnState {
    match parse_message(line).expect("turn decodes") {
        Message::Turn(state) => state,
        other => panic!("expected turn, got {other:?}"),
    }
}

#[test]
fn configuration_resolves_upgrade_overrides() {
    let catalog = catalog();
    let turret = catalog.spec(UnitKind::Turret);
    assert_eq!(turret.shorthand, "DF");
    let upgrade = turret.upgrade.as_ref().expect("turret upgrades");
    assert!((upgrade.range - 3.5).abs() < f64::EPSILON);
    assert!((upgrade.health - 75.0).abs() < f64::EPSILON, "health falls back to base");

    let wall_upgrade = catalog.spec(UnitKind::Wall).upgrade.as_ref().expect("wall upgrades");
    assert!((wall_upgrade.cost.structure - 1.0).abs() < f64::EPSILON, "cost falls back");
    assert_eq!(catalog.removal_code(), "RM");
    assert_eq!(catalog.kind_for_shorthand("EI"), Some(UnitKind::Demolisher));
}

#[test]
fn spawning_debits_budget_and_respects_occupancy() {
    let state = turn_state(&turn_line(3, 5.0, 4.0, empty_groups()));
    let mut arena = Arena::new(catalog(), &state);

    let walls = [BoardLocation::new(0, 13), BoardLocation::new(0, 13), BoardLocation::new(1, 13)];
    assert_eq!(arena.attempt_spawn(UnitKind::Wall, &walls, 1), 2);
    assert!((arena.resource(ResourceKind::StructurePoints) - 3.0).abs() < f64::EPSILON);

    assert_eq!(
        arena.attempt_spawn(UnitKind::Turret, &[BoardLocation::new(5, 20)], 1),
        0,
        "stationary units stay on the friendly half"
    );
    assert_eq!(
        arena.attempt_spawn(UnitKind::Scout, &[BoardLocation::new(13, 5)], 1),
        0,
        "mobile units spawn on the friendly edges only"
    );
    assert_eq!(
        arena.attempt_spawn(UnitKind::Scout, &[BoardLocation::new(13, 0)], 100),
        4,
        "uncapped waves spend the whole mobile budget"
    );
    assert_eq!(arena.deploy_stack().len(), 4);
}

#[test]
fn upgrades_and_removals_are_queued_on_the_build_stack() {
    let state = turn_state(&turn_line(3, 10.0, 0.0, empty_groups()));
    let mut arena = Arena::new(catalog(), &state);
    let cell = BoardLocation::new(5, 10);

    assert_eq!(arena.attempt_upgrade(&[cell]), 0, "nothing to upgrade yet");
    assert_eq!(arena.attempt_spawn(UnitKind::Turret, &[cell], 1), 1);
    assert_eq!(arena.attempt_upgrade(&[cell, cell]), 1, "units upgrade once");
    assert_eq!(arena.attempt_remove(&[cell, BoardLocation::new(6, 10)]), 1);

    assert_eq!(
        arena.build_stack(),
        &[
            QueuedAction {
                action: Action::Spawn(UnitKind::Turret),
                location: cell
            },
            QueuedAction {
                action: Action::Upgrade,
                location: cell
            },
            QueuedAction {
                action: Action::Remove,
                location: cell
            },
        ]
    );

    let submission = arena.submit_turn().expect("serialises");
    assert_eq!(submission.build, r#"[["DF",5,10],["UP",5,10],["RM",5,10]]"#);
    assert_eq!(submission.deploy, "[]");
    assert!(arena.build_stack().is_empty(), "submission drains the stacks");
}

#[test]
fn enemy_turrets_in_range_are_reported_as_attackers() {
    let enemy = json!([
        [],
        [],
        [[13, 15, 75.0, "1"], [20, 20, 75.0, "2"]],
        [], [], [], [],
        [[20, 20, 75.0, "2"]]
    ]);
    let state = turn_state(&turn_line(4, 0.0, 0.0, enemy));
    let arena = Arena::new(catalog(), &state);

    let near = arena.attackers_able_to_hit(BoardLocation::new(13, 13), Player::Friendly);
    assert_eq!(near.len(), 1);
    assert_eq!(near[0].owner, Player::Enemy);

    let upgraded_reach = arena.attackers_able_to_hit(BoardLocation::new(20, 17), Player::Friendly);
    assert_eq!(upgraded_reach.len(), 1, "upgraded turrets use their upgraded range");

    assert!(arena
        .attackers_able_to_hit(BoardLocation::new(13, 13), Player::Enemy)
        .is_empty());
}

#[test]
fn oversized_attack_range_is_bounded_by_the_arena() {
    let mut config: serde_json::Value =
        serde_json::from_str(&config_line()).expect("config is JSON");
    config["unitInformation"][2]["attackRange"] = json!(1.0e12);
    let catalog = match parse_message(&config.to_string()).expect("config decodes") {
        Message::Config(catalog) => *catalog,
        other => panic!("expected configuration, got {other:?}"),
    };
    let enemy = json!([[], [], [[13, 15, 75.0, "1"]], [], [], [], [], []]);
    let state = turn_state(&turn_line(4, 0.0, 0.0, enemy));
    let arena = Arena::new(catalog, &state);

    let far_corner = arena.attackers_able_to_hit(BoardLocation::new(0, 13), Player::Friendly);
    assert_eq!(far_corner.len(), 1, "the turret reaches across the whole board");
}

#[test]
fn path_to_edge_reaches_the_opposite_edge() {
    let state = turn_state(&turn_line(0, 0.0, 0.0, empty_groups()));
    let arena = Arena::new(catalog(), &state);

    let path = arena.find_path_to_edge(BoardLocation::new(14, 0));
    let last = path.last().copied().expect("open board has a path");
    assert!(Quadrant::TopLeft.edge_locations().contains(&last));
}

#[test]
fn game_over_and_action_frames_are_told_apart() {
    let over = json!({"turnInfo": [2, 50, 10]}).to_string();
    assert!(matches!(parse_message(&over), Ok(Message::GameOver)));

    let frame = json!({
        "turnInfo": [1, 7, 3],
        "events": {"breach": [[[3, 10], 1, 3, "9", 2]]}
    })
    .to_string();
    match parse_message(&frame).expect("frame decodes") {
        Message::Action(frame) => assert_eq!(frame.breaches().count(), 1),
        other => panic!("expected action frame, got {other:?}"),
    }

    assert!(parse_message("{not json").is_err());
}
