//! Decoded play-by-play feed for a single game.
//!
//! RULE: Nothing in this module rejects a play. Every field is optional,
//! and a field with the wrong shape decodes to its default. Deciding
//! whether a play or runner movement contributes is the aggregators' job.

use crate::{
    error::{StatsError, StatsResult},
    types::PlayerId,
};
use serde::Deserialize;
use serde_json::Value;

/// One game's complete, ordered event timeline.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameFeed {
    #[serde(rename = "allPlays", default, deserialize_with = "de::list")]
    pub all_plays: Vec<Play>,
}

impl GameFeed {
    pub fn from_json(json: &str) -> StatsResult<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Fails only when the document itself is not a JSON object.
    pub fn from_value(value: Value) -> StatsResult<Self> {
        if !value.is_object() {
            let err = <serde_json::Error as serde::de::Error>::custom(
                "game feed must be a JSON object",
            );
            return Err(StatsError::Serialization(err));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn is_empty(&self) -> bool {
        self.all_plays.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Play {
    #[serde(deserialize_with = "de::object")]
    pub result:      PlayResult,
    #[serde(deserialize_with = "de::object")]
    pub about:       About,
    #[serde(deserialize_with = "de::object")]
    pub matchup:     Matchup,
    #[serde(deserialize_with = "de::list")]
    pub runners:     Vec<Runner>,
    #[serde(deserialize_with = "de::list")]
    pub play_events: Vec<PlayEvent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayResult {
    #[serde(rename = "type", deserialize_with = "de::text")]
    pub result_type: String,
    #[serde(deserialize_with = "de::text")]
    pub event_type:  String,
    /// Human-readable label, e.g. "Grounded Into DP".
    #[serde(rename = "event", deserialize_with = "de::text")]
    pub event_label: String,
    #[serde(deserialize_with = "de::flag")]
    pub is_out:      bool,
    #[serde(deserialize_with = "de::int")]
    pub rbi:         i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct About {
    #[serde(deserialize_with = "de::flag")]
    pub is_complete: bool,
}

impl Default for About {
    // A play with no `about.isComplete` is treated as complete.
    fn default() -> Self {
        Self { is_complete: true }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Matchup {
    #[serde(deserialize_with = "de::object")]
    pub batter:     PersonRef,
    #[serde(deserialize_with = "de::object")]
    pub pitcher:    PersonRef,
    #[serde(deserialize_with = "de::object")]
    pub bat_side:   HandCode,
    #[serde(deserialize_with = "de::object")]
    pub pitch_hand: HandCode,
    #[serde(deserialize_with = "de::object")]
    pub splits:     MatchupSplits,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PersonRef {
    #[serde(deserialize_with = "de::id")]
    pub id: Option<PlayerId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HandCode {
    #[serde(deserialize_with = "de::text")]
    pub code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchupSplits {
    /// On-base-state label: "Empty", "Men_On", "RISP", "Loaded".
    #[serde(deserialize_with = "de::text")]
    pub men_on_base: String,
}

/// One runner's transition during a play.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Runner {
    #[serde(deserialize_with = "de::object")]
    pub movement: Movement,
    #[serde(deserialize_with = "de::object")]
    pub details:  RunnerDetails,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Movement {
    #[serde(deserialize_with = "de::text")]
    pub start:  String,
    #[serde(deserialize_with = "de::text")]
    pub end:    String,
    #[serde(deserialize_with = "de::flag")]
    pub is_out: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RunnerDetails {
    #[serde(deserialize_with = "de::text")]
    pub event_type:          String,
    #[serde(deserialize_with = "de::object")]
    pub runner:              PersonRef,
    #[serde(deserialize_with = "de::flag")]
    pub is_scoring_event:    bool,
    #[serde(deserialize_with = "de::flag")]
    pub earned:              bool,
    #[serde(deserialize_with = "de::object")]
    pub responsible_pitcher: PersonRef,
}

/// A single pitch or notable occurrence inside a play.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayEvent {
    #[serde(deserialize_with = "de::opt_flag")]
    pub is_pitch:   Option<bool>,
    #[serde(rename = "type", deserialize_with = "de::text")]
    pub event_kind: String,
    #[serde(deserialize_with = "de::object")]
    pub details:    PitchDetails,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PitchDetails {
    #[serde(deserialize_with = "de::flag")]
    pub is_ball:    bool,
    #[serde(deserialize_with = "de::text")]
    pub event_type: String,
}

/// Base codes as they appear in runner movements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Base {
    First,
    Second,
    Third,
    Home,
}

impl Base {
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "1B"        => Some(Self::First),
            "2B"        => Some(Self::Second),
            "3B"        => Some(Self::Third),
            "HOME" | "H" => Some(Self::Home),
            _           => None,
        }
    }

    /// A base a runner can be stranded on.
    pub fn is_occupiable(&self) -> bool {
        !matches!(self, Self::Home)
    }

    pub fn is_scoring_position(&self) -> bool {
        matches!(self, Self::Second | Self::Third)
    }
}

// ── Accessors ──────────────────────────────────────────────────────

impl Play {
    pub fn batter_id(&self) -> Option<PlayerId> {
        self.matchup.batter.id
    }

    pub fn pitcher_id(&self) -> Option<PlayerId> {
        self.matchup.pitcher.id
    }

    /// Trimmed, lowercased `result.type` ("atbat", "action", ...).
    pub fn result_type(&self) -> String {
        norm(&self.result.result_type)
    }

    /// Trimmed, lowercased `result.eventType` code.
    pub fn event_type(&self) -> String {
        norm(&self.result.event_type)
    }

    /// Trimmed display label, case preserved.
    pub fn event_label(&self) -> &str {
        self.result.event_label.trim()
    }

    pub fn is_complete(&self) -> bool {
        self.about.is_complete
    }

    pub fn is_out(&self) -> bool {
        self.result.is_out
    }

    pub fn rbi(&self) -> i64 {
        self.result.rbi
    }

    pub fn bat_side_code(&self) -> String {
        self.matchup.bat_side.code.trim().to_ascii_uppercase()
    }

    pub fn pitch_hand_code(&self) -> String {
        self.matchup.pitch_hand.code.trim().to_ascii_uppercase()
    }

    pub fn men_on_base(&self) -> String {
        norm(&self.matchup.splits.men_on_base)
    }
}

impl Runner {
    pub fn runner_id(&self) -> Option<PlayerId> {
        self.details.runner.id
    }

    pub fn responsible_pitcher_id(&self) -> Option<PlayerId> {
        self.details.responsible_pitcher.id
    }

    pub fn start_base(&self) -> Option<Base> {
        Base::parse(&self.movement.start)
    }

    pub fn end_base(&self) -> Option<Base> {
        Base::parse(&self.movement.end)
    }

    pub fn is_out(&self) -> bool {
        self.movement.is_out
    }

    pub fn is_scoring(&self) -> bool {
        self.details.is_scoring_event
    }

    pub fn is_earned(&self) -> bool {
        self.details.earned
    }

    /// Trimmed, lowercased `details.eventType` code.
    pub fn event_type(&self) -> String {
        norm(&self.details.event_type)
    }
}

impl PlayEvent {
    /// `isPitch` when present, otherwise `type == "pitch"`.
    pub fn is_pitch(&self) -> bool {
        self.is_pitch.unwrap_or(self.event_kind == "pitch")
    }

    pub fn event_type(&self) -> String {
        norm(&self.details.event_type)
    }
}

fn norm(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Lenient field decoders. Each one reads a raw `Value` and coerces it,
/// falling back to the field's default instead of failing the document.
mod de {
    use serde::{de::DeserializeOwned, Deserialize, Deserializer};
    use serde_json::Value;

    pub fn id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        Ok(integer(&Value::deserialize(d)?).filter(|id| *id > 0))
    }

    pub fn int<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        Ok(integer(&Value::deserialize(d)?).unwrap_or(0))
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(matches!(Value::deserialize(d)?, Value::Bool(true)))
    }

    pub fn opt_flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Bool(b) => Some(b),
            _ => None,
        })
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b)   => b.to_string(),
            _ => String::new(),
        })
    }

    pub fn object<'de, D, T>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let value = Value::deserialize(d)?;
        if !value.is_object() {
            return Ok(T::default());
        }
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    /// Non-list values decode to an empty list; non-object elements are dropped.
    pub fn list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let items = match Value::deserialize(d)? {
            Value::Array(items) => items,
            _ => return Ok(Vec::new()),
        };
        Ok(items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect())
    }

    fn integer(value: &Value) -> Option<i64> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}
