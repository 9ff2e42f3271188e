//! The decoded event and the closed set of stat kinds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::payload::{
    Alive, BlessMaiden, CarryFood, GameEnd, GameStart, Glance, MaidenReservation, PlayerAt,
    PlayerKill, PlayerNames, SnailEat, Spawn, UseMaiden, Victory,
};

/// Every kind of message the cabinet broadcasts that we decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatKind {
    #[serde(rename = "alive")]
    Alive,
    #[serde(rename = "playernames")]
    PlayerNames,
    #[serde(rename = "playerKill")]
    PlayerKill,
    #[serde(rename = "blessMaiden")]
    BlessMaiden,
    #[serde(rename = "reserveMaiden")]
    ReserveMaiden,
    #[serde(rename = "unreserveMaiden")]
    UnreserveMaiden,
    #[serde(rename = "useMaiden")]
    UseMaiden,
    #[serde(rename = "glance")]
    Glance,
    #[serde(rename = "carryFood")]
    CarryFood,
    #[serde(rename = "gamestart")]
    GameStart,
    #[serde(rename = "gameend")]
    GameEnd,
    #[serde(rename = "victory")]
    Victory,
    #[serde(rename = "spawn")]
    Spawn,
    #[serde(rename = "getOnSnail")]
    GetOnSnail,
    #[serde(rename = "getOffSnail")]
    GetOffSnail,
    #[serde(rename = "snailEat")]
    SnailEat,
    #[serde(rename = "snailEscape")]
    SnailEscape,
    #[serde(rename = "berryDeposit")]
    BerryDeposit,
    #[serde(rename = "berryKickIn")]
    BerryKickIn,
}

impl StatKind {
    pub const ALL: [StatKind; 19] = [
        StatKind::Alive,
        StatKind::PlayerNames,
        StatKind::PlayerKill,
        StatKind::BlessMaiden,
        StatKind::ReserveMaiden,
        StatKind::UnreserveMaiden,
        StatKind::UseMaiden,
        StatKind::Glance,
        StatKind::CarryFood,
        StatKind::GameStart,
        StatKind::GameEnd,
        StatKind::Victory,
        StatKind::Spawn,
        StatKind::GetOnSnail,
        StatKind::GetOffSnail,
        StatKind::SnailEat,
        StatKind::SnailEscape,
        StatKind::BerryDeposit,
        StatKind::BerryKickIn,
    ];

    /// Look up a normalized key (letters only, lower-cased).
    pub fn from_key(key: &str) -> Option<Self> {
        let kind = match key {
            "alive" => StatKind::Alive,
            "playernames" => StatKind::PlayerNames,
            "playerkill" => StatKind::PlayerKill,
            "blessmaiden" => StatKind::BlessMaiden,
            "reservemaiden" => StatKind::ReserveMaiden,
            "unreservemaiden" => StatKind::UnreserveMaiden,
            "usemaiden" => StatKind::UseMaiden,
            "glance" => StatKind::Glance,
            "carryfood" => StatKind::CarryFood,
            "gamestart" => StatKind::GameStart,
            "gameend" => StatKind::GameEnd,
            "victory" => StatKind::Victory,
            "spawn" => StatKind::Spawn,
            "getonsnail" => StatKind::GetOnSnail,
            "getoffsnail" => StatKind::GetOffSnail,
            "snaileat" => StatKind::SnailEat,
            "snailescape" => StatKind::SnailEscape,
            "berrydeposit" => StatKind::BerryDeposit,
            "berrykickin" => StatKind::BerryKickIn,
            _ => return None,
        };
        Some(kind)
    }

    /// The key as the cabinet spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatKind::Alive => "alive",
            StatKind::PlayerNames => "playernames",
            StatKind::PlayerKill => "playerKill",
            StatKind::BlessMaiden => "blessMaiden",
            StatKind::ReserveMaiden => "reserveMaiden",
            StatKind::UnreserveMaiden => "unreserveMaiden",
            StatKind::UseMaiden => "useMaiden",
            StatKind::Glance => "glance",
            StatKind::CarryFood => "carryFood",
            StatKind::GameStart => "gamestart",
            StatKind::GameEnd => "gameend",
            StatKind::Victory => "victory",
            StatKind::Spawn => "spawn",
            StatKind::GetOnSnail => "getOnSnail",
            StatKind::GetOffSnail => "getOffSnail",
            StatKind::SnailEat => "snailEat",
            StatKind::SnailEscape => "snailEscape",
            StatKind::BerryDeposit => "berryDeposit",
            StatKind::BerryKickIn => "berryKickIn",
        }
    }
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Typed payload, one variant per [`StatKind`].
///
/// Serialized untagged: the owning [`Event`] already carries the kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Alive(Alive),
    PlayerNames(PlayerNames),
    PlayerKill(PlayerKill),
    BlessMaiden(BlessMaiden),
    ReserveMaiden(MaidenReservation),
    UnreserveMaiden(MaidenReservation),
    UseMaiden(UseMaiden),
    Glance(Glance),
    CarryFood(CarryFood),
    GameStart(GameStart),
    GameEnd(GameEnd),
    Victory(Victory),
    Spawn(Spawn),
    GetOnSnail(PlayerAt),
    GetOffSnail(PlayerAt),
    SnailEat(SnailEat),
    SnailEscape(PlayerAt),
    BerryDeposit(PlayerAt),
    BerryKickIn(PlayerAt),
}

impl Payload {
    pub fn kind(&self) -> StatKind {
        match self {
            Payload::Alive(_) => StatKind::Alive,
            Payload::PlayerNames(_) => StatKind::PlayerNames,
            Payload::PlayerKill(_) => StatKind::PlayerKill,
            Payload::BlessMaiden(_) => StatKind::BlessMaiden,
            Payload::ReserveMaiden(_) => StatKind::ReserveMaiden,
            Payload::UnreserveMaiden(_) => StatKind::UnreserveMaiden,
            Payload::UseMaiden(_) => StatKind::UseMaiden,
            Payload::Glance(_) => StatKind::Glance,
            Payload::CarryFood(_) => StatKind::CarryFood,
            Payload::GameStart(_) => StatKind::GameStart,
            Payload::GameEnd(_) => StatKind::GameEnd,
            Payload::Victory(_) => StatKind::Victory,
            Payload::Spawn(_) => StatKind::Spawn,
            Payload::GetOnSnail(_) => StatKind::GetOnSnail,
            Payload::GetOffSnail(_) => StatKind::GetOffSnail,
            Payload::SnailEat(_) => StatKind::SnailEat,
            Payload::SnailEscape(_) => StatKind::SnailEscape,
            Payload::BerryDeposit(_) => StatKind::BerryDeposit,
            Payload::BerryKickIn(_) => StatKind::BerryKickIn,
        }
    }
}

/// One decoded line. Fields are private so `kind` always agrees with `payload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    raw_message: String,
    #[serde(rename = "statType")]
    kind: StatKind,
    timestamp: DateTime<Utc>,
    payload: Payload,
}

impl Event {
    pub fn new(raw_message: impl Into<String>, timestamp: DateTime<Utc>, payload: Payload) -> Self {
        Self {
            raw_message: raw_message.into(),
            kind: payload.kind(),
            timestamp,
            payload,
        }
    }

    pub fn raw_message(&self) -> &str {
        &self.raw_message
    }

    pub fn kind(&self) -> StatKind {
        self.kind
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }

    /// JSON form for downstream consumers.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
