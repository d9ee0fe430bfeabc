use corner_rush_core::{
    fixtures::FixtureBoard, Board, BoardLocation, Corner, Intent, Player, Quadrant, ResourceKind,
    UnitKind,
};
use corner_rush_system_offense::{
    DirectionSignal, Offense, OffenseOutcome, RushState, Wave, LANE_MARKER, UNCAPPED_WAVE,
};
use corner_rush_system_path_risk::PathRisk;
use corner_rush_system_threat::{LEFT_CORNER, RIGHT_CORNER};
use proptest::prelude::*;

fn cell(x: i32, y: i32) -> BoardLocation {
    BoardLocation::new(x, y)
}

fn risk() -> PathRisk {
    PathRisk::new(5)
}

#[test]
fn turn_twenty_five_with_twelve_mobile_points_does_not_arm() {
    let mut board = FixtureBoard::new(25).with_resources(10.0, 12.0);
    let mut offense = Offense::new();

    assert_eq!(offense.observe(&board), DirectionSignal::Unset);
    assert_eq!(offense.attack(&mut board, &risk()), OffenseOutcome::Idle);
    assert_eq!(offense.state(), RushState::Idle);
    assert!(board.attempts().is_empty());
}

#[test]
fn rush_arms_then_fires_on_the_following_turn() {
    let mut board = FixtureBoard::new(25).with_resources(10.0, 14.0);
    let mut offense = Offense::new();

    assert_eq!(offense.observe(&board), DirectionSignal::Right);
    assert_eq!(
        offense.attack(&mut board, &risk()),
        OffenseOutcome::Armed(Corner::Right)
    );
    assert!(
        board.attempts().is_empty(),
        "nothing is spawned on the arming turn"
    );

    board.set_turn(26);
    assert_eq!(offense.observe(&board), DirectionSignal::Right);
    let outcome = offense.attack(&mut board, &risk());
    assert_eq!(
        outcome,
        OffenseOutcome::Fired {
            corner: Corner::Right,
            first_wave: Wave {
                location: cell(13, 0),
                requested: 6,
                accepted: 6,
            },
            second_wave: Wave {
                location: cell(11, 2),
                requested: UNCAPPED_WAVE,
                accepted: 8,
            },
        }
    );
    assert_eq!(offense.direction(), DirectionSignal::Unset);
    assert_eq!(offense.state(), RushState::Idle);
}

#[test]
fn firing_opens_the_lane_before_sending_scouts() {
    let mut board = FixtureBoard::new(30).with_resources(5.0, 30.0);
    let mut offense = Offense::new();
    let _ = offense.observe(&board);
    let _ = offense.attack(&mut board, &risk());
    board.set_turn(31);
    let _ = offense.attack(&mut board, &risk());

    let intents: Vec<&Intent> = board.attempts().iter().map(|attempt| &attempt.intent).collect();
    assert_eq!(intents[0], &Intent::place(UnitKind::Wall, &[LANE_MARKER]));
    assert_eq!(intents[1], &Intent::remove(&[LANE_MARKER]));
    assert_eq!(intents[2], &Intent::wave(UnitKind::Scout, cell(13, 0), 14));
    assert_eq!(intents[3], &Intent::wave(UnitKind::Scout, cell(11, 2), UNCAPPED_WAVE));
}

#[test]
fn second_wave_spends_a_large_mobile_pool() {
    let mut board = FixtureBoard::new(30).with_resources(5.0, 250.0);
    let mut offense = Offense::new();
    let _ = offense.observe(&board);
    let _ = offense.attack(&mut board, &risk());
    board.set_turn(31);

    let OffenseOutcome::Fired {
        first_wave,
        second_wave,
        ..
    } = offense.attack(&mut board, &risk())
    else {
        panic!("armed rush must fire");
    };
    assert_eq!(first_wave.accepted, 119);
    assert_eq!(second_wave.accepted, 131);
    let scout_price = board.type_cost(UnitKind::Scout).mobile;
    assert!(board.resource(ResourceKind::MobilePoints) < scout_price);
}

#[test]
fn left_rush_uses_the_left_lane() {
    let mut board = FixtureBoard::new(22)
        .with_resources(0.0, 20.0)
        .with_unit(cell(24, 14), UnitKind::Turret, Player::Enemy);
    let mut offense = Offense::new();

    assert_eq!(offense.observe(&board), DirectionSignal::Left);
    let _ = offense.attack(&mut board, &risk());
    board.set_turn(23);
    let OffenseOutcome::Fired {
        first_wave,
        second_wave,
        ..
    } = offense.attack(&mut board, &risk())
    else {
        panic!("armed rush must fire on the next turn");
    };
    assert_eq!(first_wave.location, cell(14, 0));
    assert_eq!(second_wave.location, cell(16, 2));
}

#[test]
fn harassment_supersedes_an_armed_rush() {
    let mut board = FixtureBoard::new(25).with_resources(0.0, 14.0);
    let mut offense = Offense::new();
    let _ = offense.observe(&board);
    let _ = offense.attack(&mut board, &risk());
    assert_eq!(offense.state(), RushState::Armed);

    board.set_turn(15);
    board.set_resources(0.0, 9.0);
    let outcome = offense.attack(&mut board, &risk());

    assert_eq!(
        outcome,
        OffenseOutcome::Harassed(Wave {
            location: cell(13, 0),
            requested: 1000,
            accepted: 3,
        })
    );
    assert_eq!(offense.state(), RushState::Armed, "rush was not evaluated");
}

#[test]
fn harassment_picks_the_lowest_risk_edge_cell() {
    let mut board = FixtureBoard::new(4)
        .with_resources(0.0, 6.0)
        .with_path(cell(13, 0), vec![cell(13, 0), cell(13, 1)])
        .with_attackers(cell(13, 1), 2);
    let outcome = Offense::new().attack(&mut board, &risk());
    assert_eq!(
        outcome,
        OffenseOutcome::Harassed(Wave {
            location: cell(12, 1),
            requested: 1000,
            accepted: 2,
        })
    );
}

#[test]
fn harassment_without_open_edges_spawns_nothing() {
    let mut board = FixtureBoard::new(3)
        .with_resources(0.0, 20.0)
        .with_edge(Quadrant::BottomLeft, Vec::new())
        .with_edge(Quadrant::BottomRight, vec![cell(14, 0)])
        .with_unit(cell(14, 0), UnitKind::Wall, Player::Friendly);

    assert_eq!(Offense::new().attack(&mut board, &risk()), OffenseOutcome::Held);
    assert!(board.attempts().is_empty());
}

#[test]
fn below_the_harassment_threshold_nothing_happens_early() {
    let mut board = FixtureBoard::new(12).with_resources(0.0, 8.5);
    assert_eq!(Offense::new().attack(&mut board, &risk()), OffenseOutcome::Idle);
    assert!(board.attempts().is_empty());
}

proptest! {
    /// Once latched, the direction survives any change in enemy corner counts.
    #[test]
    fn direction_never_changes_while_set(
        turns in proptest::collection::vec((0usize..=11, 0usize..=11, 0.0f64..40.0), 1..20),
    ) {
        let mut offense = Offense::new();
        let mut latched = DirectionSignal::Unset;
        for (offset, (left, right, mobile)) in turns.into_iter().enumerate() {
            let turn = 21 + u32::try_from(offset).expect("short sequence");
            let mut board = FixtureBoard::new(turn).with_resources(0.0, mobile);
            for location in LEFT_CORNER.iter().take(left) {
                board = board.with_unit(*location, UnitKind::Turret, Player::Enemy);
            }
            for location in RIGHT_CORNER.iter().take(right) {
                board = board.with_unit(*location, UnitKind::Turret, Player::Enemy);
            }

            let observed = offense.observe(&board);
            if latched == DirectionSignal::Unset {
                latched = observed;
            }
            prop_assert_eq!(observed, latched);
        }
    }
}
