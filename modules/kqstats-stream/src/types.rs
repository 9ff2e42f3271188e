//! Normalization tables: raw protocol tokens to canonical domain names.
//!
//! Player slots are the only hard failure. Every other table falls back to a
//! sentinel so that an unfamiliar cabinet firmware token never drops an event.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

// --- Players ---

/// A player slot number as sent by the cabinet (1-10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(u8);

impl PlayerId {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn get(self) -> u8 {
        self.0
    }

    /// The player occupying this slot.
    pub fn player(self) -> Player {
        Player::ALL[usize::from(self.0 - 1)]
    }
}

impl TryFrom<i64> for PlayerId {
    type Error = FieldError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(PlayerId(value as u8))
        } else {
            Err(FieldError::PlayerOutOfRange(value))
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Gold,
    Blue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Queen,
    Stripes,
    Abs,
    Skulls,
    Checks,
}

/// Player identity. Declaration order matches cabinet slot order, so the
/// derived `Ord` sorts by slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Player {
    GoldQueen,
    BlueQueen,
    GoldStripes,
    BlueStripes,
    GoldAbs,
    BlueAbs,
    GoldSkulls,
    BlueSkulls,
    GoldChecks,
    BlueChecks,
}

impl Player {
    pub const ALL: [Player; 10] = [
        Player::GoldQueen,
        Player::BlueQueen,
        Player::GoldStripes,
        Player::BlueStripes,
        Player::GoldAbs,
        Player::BlueAbs,
        Player::GoldSkulls,
        Player::BlueSkulls,
        Player::GoldChecks,
        Player::BlueChecks,
    ];

    pub fn id(self) -> PlayerId {
        PlayerId(self as u8 + 1)
    }

    pub fn team(self) -> Team {
        // Odd slots are gold.
        if self.id().get() % 2 == 1 {
            Team::Gold
        } else {
            Team::Blue
        }
    }

    pub fn role(self) -> Role {
        match self {
            Player::GoldQueen | Player::BlueQueen => Role::Queen,
            Player::GoldStripes | Player::BlueStripes => Role::Stripes,
            Player::GoldAbs | Player::BlueAbs => Role::Abs,
            Player::GoldSkulls | Player::BlueSkulls => Role::Skulls,
            Player::GoldChecks | Player::BlueChecks => Role::Checks,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Player::GoldQueen => "goldQueen",
            Player::BlueQueen => "blueQueen",
            Player::GoldStripes => "goldStripes",
            Player::BlueStripes => "blueStripes",
            Player::GoldAbs => "goldAbs",
            Player::BlueAbs => "blueAbs",
            Player::GoldSkulls => "goldSkulls",
            Player::BlueSkulls => "blueSkulls",
            Player::GoldChecks => "goldChecks",
            Player::BlueChecks => "blueChecks",
        }
    }
}

impl From<PlayerId> for Player {
    fn from(id: PlayerId) -> Self {
        id.player()
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// --- Map objects ---

/// A position on the cabinet's screen, kept exactly as the cabinet wrote it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: Decimal,
    pub y: Decimal,
}

impl Coordinates {
    pub fn new(x: Decimal, y: Decimal) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// --- Normalized enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapType {
    Day,
    Night,
    Dusk,
    #[serde(rename = "twilightMeat")]
    Twilight,
    #[serde(rename = "warriorBonus")]
    BonusWarrior,
    #[serde(rename = "snailBonus")]
    BonusSnail,
    Unknown,
}

impl MapType {
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "map_day" | "mapday" | "day" => MapType::Day,
            "map_night" | "mapnight" | "night" => MapType::Night,
            "map_dusk" | "mapdusk" | "dusk" => MapType::Dusk,
            "map_twilight" | "maptwilight" | "twilight" => MapType::Twilight,
            "map_bonus" | "mapbonus" | "bonus" => MapType::BonusWarrior,
            "map_snailbonus" | "mapsnailbonus" | "snailbonus" => MapType::BonusSnail,
            _ => MapType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MapType::Day => "day",
            MapType::Night => "night",
            MapType::Dusk => "dusk",
            MapType::Twilight => "twilightMeat",
            MapType::BonusWarrior => "warriorBonus",
            MapType::BonusSnail => "snailBonus",
            MapType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for MapType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Upgrade granted when a player uses a maiden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateType {
    Warrior,
    Speed,
    Unknown,
}

impl GateType {
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "maiden_wings" | "maidenwings" | "wings" | "warrior" => GateType::Warrior,
            "maiden_speed" | "maidenspeed" | "speed" => GateType::Speed,
            _ => GateType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GateType::Warrior => "warrior",
            GateType::Speed => "speed",
            GateType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for GateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Gold,
    Blue,
    Neutral,
}

impl Side {
    /// `blessMaiden` reports gold as "red", `victory` as "gold".
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "gold" | "red" => Side::Gold,
            "blue" => Side::Blue,
            _ => Side::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Gold => "gold",
            Side::Blue => "blue",
            Side::Neutral => "neutral",
        }
    }

    pub fn team(self) -> Option<Team> {
        match self {
            Side::Gold => Some(Team::Gold),
            Side::Blue => Some(Team::Blue),
            Side::Neutral => None,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VictoryType {
    Military,
    Economic,
    Snail,
    Unknown,
}

impl VictoryType {
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "military" => VictoryType::Military,
            "economic" => VictoryType::Economic,
            "snail" => VictoryType::Snail,
            _ => VictoryType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VictoryType::Military => "military",
            VictoryType::Economic => "economic",
            VictoryType::Snail => "snail",
            VictoryType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for VictoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
