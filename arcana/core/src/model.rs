//! Wire Model
//!
//! Raw shapes as the tarot backend sends them. Field extraction is lenient:
//! a field with the wrong JSON type reads as absent, so a half-broken card
//! still renders with defaults instead of failing the whole response.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Card object as sent by the backend
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawCard {
    /// Lookup key for the card-detail endpoint
    pub name_short: Option<String>,
    /// Display name (possibly translated)
    pub name: Option<String>,
    /// Untranslated name
    pub original_name: Option<String>,
    /// `major` or `minor`
    pub arcana: Option<String>,
    /// Suit name for minor cards
    pub suit: Option<String>,
    /// Upright meaning
    pub meaning_upright: Option<String>,
    /// Reversed meaning
    pub meaning_reversed: Option<String>,
    /// Long description
    pub description: Option<String>,
    /// Drawn orientation (`upright` / `reversed`)
    pub position: Option<String>,
    /// Spread slot label
    pub position_name: Option<String>,
    /// Advice annotation
    pub advice: Option<String>,
    /// Context annotation
    pub context: Option<String>,
    /// Role annotation
    pub role: Option<String>,
}

impl RawCard {
    /// Extract a card from any JSON value; non-objects yield an empty card
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| string_field(value, key);

        Self {
            name_short: field("name_short"),
            name: field("name"),
            original_name: field("original_name"),
            arcana: field("type"),
            suit: field("suit"),
            meaning_upright: field("meaning_upright"),
            meaning_reversed: field("meaning_reversed"),
            description: field("description"),
            position: field("position"),
            position_name: field("position_name"),
            advice: field("advice"),
            context: field("context"),
            role: field("role"),
        }
    }
}

/// Read a string field; numbers are accepted and stringified, blanks are absent
pub(crate) fn string_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// The spreads the backend knows how to draw
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpreadKind {
    /// Single card of the day
    Daily,
    /// Past / present / future
    Three,
    /// Relationship spread
    Love,
    /// Ten-card Celtic cross
    Celtic,
}

impl SpreadKind {
    /// Wire name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Three => "three",
            Self::Love => "love",
            Self::Celtic => "celtic",
        }
    }

    /// Heading shown above the reading
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Daily => "Carta do Dia",
            Self::Three => "Tirada de Três Cartas",
            Self::Love => "Tirada do Amor",
            Self::Celtic => "Cruz Celta",
        }
    }

    /// Whether cards of this reading carry a daily message
    #[must_use]
    pub fn is_daily(self) -> bool {
        matches!(self, Self::Daily)
    }
}

impl fmt::Display for SpreadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpreadKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "three" => Ok(Self::Three),
            "love" => Ok(Self::Love),
            "celtic" => Ok(Self::Celtic),
            other => Err(format!(
                "unknown spread '{other}' (expected daily, three, love or celtic)"
            )),
        }
    }
}
