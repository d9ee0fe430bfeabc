//! Host line protocol: configuration, turn snapshots and action frames.
//!
//! The host writes one JSON document per line. The first line carries the
//! game configuration; every later line carries a `turnInfo` array whose
//! first element tells deploy turns, action frames and the end of the game
//! apart.

use corner_rush_core::{
    BoardLocation, Breach, Cost, Player, UnitCatalog, UnitKind, UnitSpec, UpgradeSpec,
};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

const REMOVAL_INDEX: usize = 6;
const UPGRADE_INDEX: usize = 7;

const DEPLOY_PHASE: i64 = 0;
const ACTION_PHASE: i64 = 1;
const GAME_OVER_PHASE: i64 = 2;

/// Errors raised while decoding host messages.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The line was not valid JSON or did not match the expected layout.
    #[error("could not decode host message: {0}")]
    Json(#[from] serde_json::Error),
    /// The configuration lacks an entry of the `unitInformation` table.
    #[error("configuration has no unit information at index {0}")]
    MissingUnit(usize),
    /// A required field was absent or had the wrong shape.
    #[error("host message is missing `{0}`")]
    MissingField(&'static str),
    /// The `turnInfo` phase marker is not one the engine understands.
    #[error("unknown turn phase {0}")]
    UnknownPhase(i64),
    /// A breach entry did not carry a location and owner marker.
    #[error("malformed breach entry {0}")]
    MalformedBreach(String),
}

/// Decoded host message.
#[derive(Clone, Debug)]
pub enum Message {
    /// Game configuration sent once before the first turn.
    Config(Box<UnitCatalog>),
    /// Snapshot for a turn the agent must decide.
    Turn(TurnState),
    /// Sub-turn simulation frame.
    Action(ActionFrame),
    /// The match is over.
    GameOver,
}

/// Decodes one line sent by the host.
pub fn parse_message(line: &str) -> Result<Message, ProtocolError> {
    let value: Value = serde_json::from_str(line)?;
    if value.get("turnInfo").is_none() {
        return parse_config(value).map(|catalog| Message::Config(Box::new(catalog)));
    }

    let raw: RawFrame = serde_json::from_value(value)?;
    let phase = raw
        .turn_info
        .first()
        .copied()
        .ok_or(ProtocolError::MissingField("turnInfo"))?;

    match phase {
        DEPLOY_PHASE => TurnState::from_raw(raw).map(Message::Turn),
        ACTION_PHASE => Ok(Message::Action(ActionFrame {
            breaches: raw.events.breach,
        })),
        GAME_OVER_PHASE => Ok(Message::GameOver),
        other => Err(ProtocolError::UnknownPhase(other)),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    unit_information: Vec<RawUnit>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUnit {
    shorthand: Option<String>,
    cost1: Option<f64>,
    cost2: Option<f64>,
    start_health: Option<f64>,
    attack_damage_walker: Option<f64>,
    attack_damage_tower: Option<f64>,
    attack_range: Option<f64>,
    upgrade: Option<Box<RawUnit>>,
}

fn parse_config(value: Value) -> Result<UnitCatalog, ProtocolError> {
    let raw: RawConfig = serde_json::from_value(value)?;
    let shorthand_at = |index: usize| -> Result<String, ProtocolError> {
        raw.unit_information
            .get(index)
            .and_then(|unit| unit.shorthand.clone())
            .ok_or(ProtocolError::MissingUnit(index))
    };

    let mut specs = Vec::with_capacity(UnitKind::ALL.len());
    for kind in UnitKind::ALL {
        let unit = raw
            .unit_information
            .get(kind.index())
            .ok_or(ProtocolError::MissingUnit(kind.index()))?;
        specs.push(unit_spec(unit, shorthand_at(kind.index())?));
    }
    let units: [UnitSpec; 6] = specs
        .try_into()
        .map_err(|_| ProtocolError::MissingField("unitInformation"))?;

    Ok(UnitCatalog::new(
        units,
        shorthand_at(REMOVAL_INDEX)?,
        shorthand_at(UPGRADE_INDEX)?,
    ))
}

fn unit_spec(unit: &RawUnit, shorthand: String) -> UnitSpec {
    let cost = Cost::new(unit.cost1.unwrap_or(0.0), unit.cost2.unwrap_or(0.0));
    let health = unit.start_health.unwrap_or(0.0);
    let damage_to_mobile = unit.attack_damage_walker.unwrap_or(0.0);
    let damage_to_stationary = unit.attack_damage_tower.unwrap_or(0.0);
    let range = unit.attack_range.unwrap_or(0.0);

    let upgrade = unit.upgrade.as_deref().map(|upgrade| UpgradeSpec {
        cost: Cost::new(
            upgrade.cost1.unwrap_or(cost.structure),
            upgrade.cost2.unwrap_or(cost.mobile),
        ),
        health: upgrade.start_health.unwrap_or(health),
        damage_to_mobile: upgrade.attack_damage_walker.unwrap_or(damage_to_mobile),
        damage_to_stationary: upgrade.attack_damage_tower.unwrap_or(damage_to_stationary),
        range: upgrade.attack_range.unwrap_or(range),
    });

    UnitSpec {
        shorthand,
        cost,
        health,
        damage_to_mobile,
        damage_to_stationary,
        range,
        upgrade,
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFrame {
    turn_info: Vec<i64>,
    #[serde(default)]
    p1_stats: Vec<f64>,
    #[serde(default)]
    p2_stats: Vec<f64>,
    #[serde(default)]
    p1_units: Vec<Vec<Vec<Value>>>,
    #[serde(default)]
    p2_units: Vec<Vec<Vec<Value>>>,
    #[serde(default)]
    events: RawEvents,
}

#[derive(Debug, Default, Deserialize)]
struct RawEvents {
    #[serde(default)]
    breach: Vec<Value>,
}

/// Health and balances of one player.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerStats {
    /// Remaining health.
    pub health: f64,
    /// Structure point balance.
    pub structure: f64,
    /// Mobile point balance.
    pub mobile: f64,
}

impl PlayerStats {
    fn from_raw(stats: &[f64], field: &'static str) -> Result<Self, ProtocolError> {
        match stats {
            [health, structure, mobile, ..] => Ok(Self {
                health: *health,
                structure: *structure,
                mobile: *mobile,
            }),
            _ => Err(ProtocolError::MissingField(field)),
        }
    }
}

/// Unit reported by the host at the start of a turn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedUnit {
    /// Cell the unit occupies.
    pub location: BoardLocation,
    /// Kind of unit.
    pub kind: UnitKind,
    /// Owning side.
    pub owner: Player,
    /// Remaining health.
    pub health: f64,
}

/// Board snapshot for a deploy turn.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnState {
    /// Turn number, starting at zero.
    pub turn: u32,
    /// Friendly health and balances.
    pub friendly: PlayerStats,
    /// Enemy health and balances.
    pub enemy: PlayerStats,
    /// Every unit on the board.
    pub units: Vec<PlacedUnit>,
    /// Cells whose stationary unit has been upgraded.
    pub upgraded: Vec<BoardLocation>,
}

impl TurnState {
    fn from_raw(raw: RawFrame) -> Result<Self, ProtocolError> {
        let turn = raw
            .turn_info
            .get(1)
            .and_then(|turn| u32::try_from(*turn).ok())
            .ok_or(ProtocolError::MissingField("turnInfo"))?;

        let mut state = Self {
            turn,
            friendly: PlayerStats::from_raw(&raw.p1_stats, "p1Stats")?,
            enemy: PlayerStats::from_raw(&raw.p2_stats, "p2Stats")?,
            units: Vec::new(),
            upgraded: Vec::new(),
        };
        state.collect_units(&raw.p1_units, Player::Friendly);
        state.collect_units(&raw.p2_units, Player::Enemy);
        Ok(state)
    }

    fn collect_units(&mut self, groups: &[Vec<Vec<Value>>], owner: Player) {
        for (index, group) in groups.iter().enumerate() {
            for entry in group {
                let Some(location) = entry_location(entry) else {
                    tracing::warn!(?entry, "skipping unit entry without coordinates");
                    continue;
                };

                if index == UPGRADE_INDEX {
                    self.upgraded.push(location);
                    continue;
                }
                let Some(kind) = UnitKind::from_index(index) else {
                    continue;
                };

                let health = entry.get(2).and_then(Value::as_f64).unwrap_or(0.0);
                self.units.push(PlacedUnit {
                    location,
                    kind,
                    owner,
                    health,
                });
            }
        }
    }
}

fn entry_location(entry: &[Value]) -> Option<BoardLocation> {
    let x = entry.first()?.as_i64()?;
    let y = entry.get(1)?.as_i64()?;
    Some(BoardLocation::new(
        i32::try_from(x).ok()?,
        i32::try_from(y).ok()?,
    ))
}

/// Sub-turn frame carrying simulation events.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionFrame {
    breaches: Vec<Value>,
}

impl ActionFrame {
    /// Decodes the breach events of the frame, one result per entry.
    pub fn breaches(&self) -> impl Iterator<Item = Result<Breach, ProtocolError>> + '_ {
        self.breaches.iter().map(parse_breach)
    }
}

/// Owner marker the host uses for the agent itself inside raw frames.
const SELF_MARKER: i64 = 1;
const OWNER_SLOT: usize = 4;

fn parse_breach(entry: &Value) -> Result<Breach, ProtocolError> {
    let malformed = || ProtocolError::MalformedBreach(entry.to_string());
    let fields = entry.as_array().ok_or_else(malformed)?;
    let location = fields
        .first()
        .and_then(Value::as_array)
        .and_then(|pair| entry_location(pair))
        .ok_or_else(malformed)?;
    let marker = fields
        .get(OWNER_SLOT)
        .and_then(Value::as_i64)
        .ok_or_else(malformed)?;

    let attacker = if marker == SELF_MARKER {
        Player::Friendly
    } else {
        Player::Enemy
    };
    Ok(Breach { location, attacker })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breach_owner_marker_maps_to_players() {
        let frame = ActionFrame {
            breaches: vec![
                serde_json::json!([[3, 10], 1, 3, "12", 1]),
                serde_json::json!([[20, 6], 1, 3, "13", 2]),
            ],
        };
        let breaches: Vec<_> = frame.breaches().collect::<Result<_, _>>().expect("valid");
        assert_eq!(breaches[0].attacker, Player::Friendly);
        assert_eq!(breaches[1].attacker, Player::Enemy);
        assert_eq!(breaches[1].location, BoardLocation::new(20, 6));
    }

    #[test]
    fn breach_without_owner_is_rejected() {
        let frame = ActionFrame {
            breaches: vec![serde_json::json!([[3, 10], 1])],
        };
        let result = frame.breaches().next().expect("one entry");
        assert!(matches!(result, Err(ProtocolError::MalformedBreach(_))));
    }
}
