//! Per-kind payloads and the positional builders that produce them.
//!
//! Each builder documents the positions it consumes. Positions past those are
//! ignored for every kind; the cabinet appends fields across firmware versions.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::NaiveTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::error::{DecodeError, FieldError, Result};
use crate::event::{Payload, StatKind};
use crate::types::{Coordinates, GateType, MapType, Player, PlayerId, Side, VictoryType};

// --- Payloads ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alive {
    /// Cabinet wall-clock time of day.
    pub ts: NaiveTime,
}

/// Names typed in on the player cards, keyed by slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PlayerNames {
    pub names: BTreeMap<Player, String>,
}

impl PlayerNames {
    pub fn get(&self, player: Player) -> Option<&str> {
        self.names.get(&player).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerKill {
    pub coordinates: Coordinates,
    pub killer: Player,
    pub victim: Player,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlessMaiden {
    pub coordinates: Coordinates,
    pub side: Side,
}

/// Shared by `reserveMaiden` and `unreserveMaiden`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaidenReservation {
    pub coordinates: Coordinates,
    pub player: Player,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UseMaiden {
    pub coordinates: Coordinates,
    pub gate_type: GateType,
    pub player: Player,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Glance {
    pub player1: Player,
    pub player2: Player,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarryFood {
    pub player: Player,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStart {
    pub map: MapType,
    pub blue_on_right: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEnd {
    pub map: MapType,
    #[serde(serialize_with = "serialize_secs")]
    pub game_duration: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Victory {
    pub side: Side,
    pub victory_type: VictoryType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Spawn {
    pub player: Player,
    pub is_ai: bool,
}

/// A single player at a position: snail rides, escapes and berry scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerAt {
    pub player: Player,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnailEat {
    pub coordinates: Coordinates,
    pub eater: Player,
    pub meal: Player,
}

fn serialize_secs<S: Serializer>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

// --- Positional field access ---

/// Positional view over a line's value tokens. Every accessor reports the
/// failing position against the kind being built.
struct Fields<'a> {
    kind: StatKind,
    tokens: &'a [String],
}

impl<'a> Fields<'a> {
    fn new(kind: StatKind, tokens: &'a [String]) -> Self {
        Self { kind, tokens }
    }

    fn fail(&self, position: usize, source: FieldError) -> DecodeError {
        DecodeError::FieldParse {
            kind: self.kind,
            position,
            source,
        }
    }

    fn raw(&self, position: usize) -> Result<&'a str> {
        self.tokens
            .get(position)
            .map(|t| t.trim())
            .ok_or_else(|| self.fail(position, FieldError::Missing))
    }

    /// Rejects values that `Decimal` can only hold by rounding.
    fn decimal(&self, position: usize) -> Result<Decimal> {
        let raw = self.raw(position)?;
        Decimal::from_str_exact(raw)
            .map_err(|_| self.fail(position, FieldError::Decimal(raw.to_string())))
    }

    /// Two consecutive decimals starting at `position`.
    fn coordinates(&self, position: usize) -> Result<Coordinates> {
        Ok(Coordinates::new(self.decimal(position)?, self.decimal(position + 1)?))
    }

    fn player(&self, position: usize) -> Result<Player> {
        let raw = self.raw(position)?;
        let id = raw
            .parse::<i64>()
            .map_err(|_| self.fail(position, FieldError::Integer(raw.to_string())))?;
        PlayerId::try_from(id)
            .map(Player::from)
            .map_err(|e| self.fail(position, e))
    }

    fn boolean(&self, position: usize) -> Result<bool> {
        let raw = self.raw(position)?;
        parse_bool(raw).ok_or_else(|| self.fail(position, FieldError::Boolean(raw.to_string())))
    }

    /// Non-negative decimal seconds.
    fn duration(&self, position: usize) -> Result<Duration> {
        let raw = self.raw(position)?;
        raw.parse::<Decimal>()
            .ok()
            .and_then(decimal_to_duration)
            .ok_or_else(|| self.fail(position, FieldError::Duration(raw.to_string())))
    }

    /// `h:mm:ss AM/PM`.
    fn time_of_day(&self, position: usize) -> Result<NaiveTime> {
        let raw = self.raw(position)?;
        NaiveTime::parse_from_str(&raw.to_ascii_uppercase(), "%I:%M:%S %p")
            .map_err(|_| self.fail(position, FieldError::TimeOfDay(raw.to_string())))
    }
}

fn decimal_to_duration(secs: Decimal) -> Option<Duration> {
    if secs.is_sign_negative() && !secs.is_zero() {
        return None;
    }
    let whole = secs.trunc().to_u64()?;
    let nanos = (secs.fract() * Decimal::from(1_000_000_000u32)).trunc().to_u32()?;
    Some(Duration::new(whole, nanos))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Some(true),
        "false" | "f" | "0" => Some(false),
        _ => None,
    }
}

// --- Builders ---

/// Build the payload for `kind` from positional value tokens.
pub fn build(kind: StatKind, values: &[String]) -> Result<Payload> {
    let f = Fields::new(kind, values);
    let payload = match kind {
        StatKind::Alive => Payload::Alive(alive(&f)?),
        StatKind::PlayerNames => Payload::PlayerNames(player_names(values)),
        StatKind::PlayerKill => Payload::PlayerKill(player_kill(&f)?),
        StatKind::BlessMaiden => Payload::BlessMaiden(bless_maiden(&f)?),
        StatKind::ReserveMaiden => Payload::ReserveMaiden(maiden_reservation(&f)?),
        StatKind::UnreserveMaiden => Payload::UnreserveMaiden(maiden_reservation(&f)?),
        StatKind::UseMaiden => Payload::UseMaiden(use_maiden(&f)?),
        StatKind::Glance => Payload::Glance(glance(&f)?),
        StatKind::CarryFood => Payload::CarryFood(carry_food(&f)?),
        StatKind::GameStart => Payload::GameStart(game_start(&f)?),
        StatKind::GameEnd => Payload::GameEnd(game_end(&f)?),
        StatKind::Victory => Payload::Victory(victory(&f)?),
        StatKind::Spawn => Payload::Spawn(spawn(&f)?),
        StatKind::GetOnSnail => Payload::GetOnSnail(player_at(&f)?),
        StatKind::GetOffSnail => Payload::GetOffSnail(player_at(&f)?),
        StatKind::SnailEat => Payload::SnailEat(snail_eat(&f)?),
        StatKind::SnailEscape => Payload::SnailEscape(player_at(&f)?),
        StatKind::BerryDeposit => Payload::BerryDeposit(player_at(&f)?),
        StatKind::BerryKickIn => Payload::BerryKickIn(player_at(&f)?),
    };
    Ok(payload)
}

/// `[0]` time of day.
fn alive(f: &Fields) -> Result<Alive> {
    Ok(Alive { ts: f.time_of_day(0)? })
}

/// One name per slot, slot = position + 1. Positions past the last slot are dropped.
fn player_names(values: &[String]) -> PlayerNames {
    let names = values
        .iter()
        .enumerate()
        .filter_map(|(i, name)| {
            let id = PlayerId::try_from(i as i64 + 1).ok()?;
            Some((id.player(), name.clone()))
        })
        .collect();
    PlayerNames { names }
}

/// `[0..2]` coordinates, `[2]` killer, `[3]` victim.
fn player_kill(f: &Fields) -> Result<PlayerKill> {
    Ok(PlayerKill {
        coordinates: f.coordinates(0)?,
        killer: f.player(2)?,
        victim: f.player(3)?,
    })
}

/// `[0..2]` coordinates, `[2]` side.
fn bless_maiden(f: &Fields) -> Result<BlessMaiden> {
    Ok(BlessMaiden {
        coordinates: f.coordinates(0)?,
        side: Side::normalize(f.raw(2)?),
    })
}

/// `[0..2]` coordinates, `[2]` player.
fn maiden_reservation(f: &Fields) -> Result<MaidenReservation> {
    Ok(MaidenReservation {
        coordinates: f.coordinates(0)?,
        player: f.player(2)?,
    })
}

/// `[0..2]` coordinates, `[2]` gate type, `[3]` player.
fn use_maiden(f: &Fields) -> Result<UseMaiden> {
    Ok(UseMaiden {
        coordinates: f.coordinates(0)?,
        gate_type: GateType::normalize(f.raw(2)?),
        player: f.player(3)?,
    })
}

/// `[0]` first player, `[1]` second player.
fn glance(f: &Fields) -> Result<Glance> {
    Ok(Glance {
        player1: f.player(0)?,
        player2: f.player(1)?,
    })
}

/// `[0]` player.
fn carry_food(f: &Fields) -> Result<CarryFood> {
    Ok(CarryFood { player: f.player(0)? })
}

/// `[0]` map, `[1]` blue on right. Everything after is ignored.
fn game_start(f: &Fields) -> Result<GameStart> {
    Ok(GameStart {
        map: MapType::normalize(f.raw(0)?),
        blue_on_right: f.boolean(1)?,
    })
}

/// `[0]` map, `[1]` not read, `[2]` duration in seconds. Everything after is ignored.
fn game_end(f: &Fields) -> Result<GameEnd> {
    Ok(GameEnd {
        map: MapType::normalize(f.raw(0)?),
        game_duration: f.duration(2)?,
    })
}

/// `[0]` side, `[1]` victory type.
fn victory(f: &Fields) -> Result<Victory> {
    Ok(Victory {
        side: Side::normalize(f.raw(0)?),
        victory_type: VictoryType::normalize(f.raw(1)?),
    })
}

/// `[0]` player, `[1]` is AI.
fn spawn(f: &Fields) -> Result<Spawn> {
    Ok(Spawn {
        player: f.player(0)?,
        is_ai: f.boolean(1)?,
    })
}

/// `[0..2]` coordinates, `[2]` player.
fn player_at(f: &Fields) -> Result<PlayerAt> {
    Ok(PlayerAt {
        coordinates: f.coordinates(0)?,
        player: f.player(2)?,
    })
}

/// `[0..2]` coordinates, `[2]` eater, `[3]` meal.
fn snail_eat(f: &Fields) -> Result<SnailEat> {
    Ok(SnailEat {
        coordinates: f.coordinates(0)?,
        eater: f.player(2)?,
        meal: f.player(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn coordinates_keep_exact_precision() {
        let payload = build(StatKind::PlayerKill, &tokens(&["1071.977", "20", "3", "10"])).unwrap();
        let Payload::PlayerKill(kill) = payload else {
            panic!("expected playerKill");
        };
        assert_eq!(kill.coordinates.x, dec("1071.977"));
        assert_eq!(kill.coordinates.x.to_string(), "1071.977");
        assert_eq!(kill.killer, Player::GoldStripes);
        assert_eq!(kill.victim, Player::BlueChecks);
    }

    #[test]
    fn out_of_range_player_fails_whole_payload() {
        let err = build(StatKind::PlayerKill, &tokens(&["1", "2", "7", "11"])).unwrap_err();
        assert_eq!(
            err,
            DecodeError::FieldParse {
                kind: StatKind::PlayerKill,
                position: 3,
                source: FieldError::PlayerOutOfRange(11),
            }
        );
    }

    #[test]
    fn missing_position_is_a_field_error() {
        let err = build(StatKind::SnailEat, &tokens(&["1", "2", "3"])).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::FieldParse { position: 3, source: FieldError::Missing, .. }
        ));
    }

    #[test]
    fn non_numeric_coordinate_fails() {
        let err = build(StatKind::BerryDeposit, &tokens(&["abc", "2", "3"])).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::FieldParse { position: 0, source: FieldError::Decimal(_), .. }
        ));
    }

    #[test]
    fn coordinate_is_kept_digit_for_digit() {
        let raw = "1165.123456789012345678901234";
        let Payload::BerryDeposit(deposit) =
            build(StatKind::BerryDeposit, &tokens(&[raw, "995", "3"])).unwrap()
        else {
            panic!("expected berryDeposit payload");
        };
        assert_eq!(deposit.coordinates.x.to_string(), raw);
    }

    #[test]
    fn coordinate_beyond_decimal_precision_fails() {
        let raw = "1165.12345678901234567890123456789";
        let err = build(StatKind::BerryDeposit, &tokens(&[raw, "995", "3"])).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::FieldParse { position: 0, source: FieldError::Decimal(ref s), .. } if s == raw
        ));
    }

    #[test]
    fn alive_parses_lowercased_meridiem() {
        let payload = build(StatKind::Alive, &tokens(&["12:39:04 pm"])).unwrap();
        assert_eq!(
            payload,
            Payload::Alive(Alive { ts: NaiveTime::from_hms_opt(12, 39, 4).unwrap() })
        );
        let payload = build(StatKind::Alive, &tokens(&["1:05:00 am"])).unwrap();
        assert_eq!(
            payload,
            Payload::Alive(Alive { ts: NaiveTime::from_hms_opt(1, 5, 0).unwrap() })
        );
    }

    #[test]
    fn alive_rejects_garbage() {
        let err = build(StatKind::Alive, &tokens(&["noon"])).unwrap_err();
        assert!(matches!(err, DecodeError::FieldParse { source: FieldError::TimeOfDay(_), .. }));
    }

    #[test]
    fn game_start_ignores_trailing_fields() {
        let payload = build(StatKind::GameStart, &tokens(&["map_day", "true", "0", "false"])).unwrap();
        assert_eq!(
            payload,
            Payload::GameStart(GameStart { map: MapType::Day, blue_on_right: true })
        );
    }

    #[test]
    fn game_end_reads_duration_from_third_position() {
        let payload =
            build(StatKind::GameEnd, &tokens(&["map_night", "false", "97.324", "false"])).unwrap();
        assert_eq!(
            payload,
            Payload::GameEnd(GameEnd {
                map: MapType::Night,
                game_duration: Duration::from_millis(97_324),
            })
        );
    }

    #[test]
    fn game_end_rejects_negative_duration() {
        let err = build(StatKind::GameEnd, &tokens(&["map_night", "false", "-3"])).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::FieldParse { position: 2, source: FieldError::Duration(_), .. }
        ));
    }

    #[test]
    fn spawn_rejects_malformed_boolean() {
        let err = build(StatKind::Spawn, &tokens(&["3", "maybe"])).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::FieldParse { position: 1, source: FieldError::Boolean(_), .. }
        ));
        let ok = build(StatKind::Spawn, &tokens(&["3", "false"])).unwrap();
        assert_eq!(ok, Payload::Spawn(Spawn { player: Player::GoldStripes, is_ai: false }));
    }

    #[test]
    fn player_names_skips_extra_slots() {
        let values: Vec<String> = (1..=12).map(|i| format!("name{i}")).collect();
        let Payload::PlayerNames(names) = build(StatKind::PlayerNames, &values).unwrap() else {
            panic!("expected playernames");
        };
        assert_eq!(names.names.len(), 10);
        assert_eq!(names.get(Player::GoldQueen), Some("name1"));
        assert_eq!(names.get(Player::BlueChecks), Some("name10"));
    }

    #[test]
    fn use_maiden_normalizes_gate() {
        let payload = build(StatKind::UseMaiden, &tokens(&["560", "260", "maiden_speed", "5"])).unwrap();
        assert_eq!(
            payload,
            Payload::UseMaiden(UseMaiden {
                coordinates: Coordinates::new(dec("560"), dec("260")),
                gate_type: GateType::Speed,
                player: Player::GoldAbs,
            })
        );
    }

    #[test]
    fn victory_tolerates_unknown_codes() {
        let payload = build(StatKind::Victory, &tokens(&["purple", "forfeit"])).unwrap();
        assert_eq!(
            payload,
            Payload::Victory(Victory { side: Side::Neutral, victory_type: VictoryType::Unknown })
        );
    }
}
