//! Shared primitive types used across every aggregator.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Provider game identifier (`gamePk`).
pub type GameId = i64;

/// Provider person identifier. Always positive once decoded.
pub type PlayerId = i64;

/// Matchup context a stat line is scoped to.
///
/// Batting lines use `VsLhp`/`VsRhp`/`Risp`, pitching lines use
/// `VsLhb`/`VsRhb`/`Risp`. `Risp` is an overlay: a play counted under it
/// is also counted under its hand split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Split {
    #[serde(rename = "vslhp")]
    VsLhp,
    #[serde(rename = "vsrhp")]
    VsRhp,
    #[serde(rename = "vslhb")]
    VsLhb,
    #[serde(rename = "vsrhb")]
    VsRhb,
    #[serde(rename = "risp")]
    Risp,
}

impl Split {
    /// Stable wire name, also the `split` column value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VsLhp => "vslhp",
            Self::VsRhp => "vsrhp",
            Self::VsLhb => "vslhb",
            Self::VsRhb => "vsrhb",
            Self::Risp  => "risp",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Split {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vslhp" => Ok(Self::VsLhp),
            "vsrhp" => Ok(Self::VsRhp),
            "vslhb" => Ok(Self::VsLhb),
            "vsrhb" => Ok(Self::VsRhb),
            "risp"  => Ok(Self::Risp),
            other   => Err(format!("unknown split '{other}'")),
        }
    }
}

/// Key of a split-scoped line (batting, pitching).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineKey {
    pub game_id:   GameId,
    pub player_id: PlayerId,
    pub split:     Split,
}

impl LineKey {
    pub fn new(game_id: GameId, player_id: PlayerId, split: Split) -> Self {
        Self { game_id, player_id, split }
    }
}

/// Key of a per-player line with no split (baserunning).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerKey {
    pub game_id:   GameId,
    pub player_id: PlayerId,
}

impl PlayerKey {
    pub fn new(game_id: GameId, player_id: PlayerId) -> Self {
        Self { game_id, player_id }
    }
}
