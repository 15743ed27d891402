//! Fixed-schema player attributes
//!
//! Upstream rosters deliver attributes as loosely typed, nullable, string-keyed
//! maps. They are resolved into [`PlayerAttributes`] exactly once, at
//! deserialization time; the rest of the crate only sees `Option<u8>` fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

/// Upper bound for every attribute value.
pub const ATTRIBUTE_MAX: u8 = 100;

/// The raw wire shape accepted for an attribute bundle.
pub type LooseAttributeMap = HashMap<String, Value>;

macro_rules! player_attributes {
    ($($variant:ident => $field:ident),* $(,)?) => {
        /// One named attribute of the schema.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum Attribute {
            $($variant,)*
        }

        impl Attribute {
            pub const ALL: &'static [Attribute] = &[$(Attribute::$variant,)*];

            /// Wire key, e.g. `sprint_speed`.
            pub fn key(&self) -> &'static str {
                match self {
                    $(Attribute::$variant => stringify!($field),)*
                }
            }

            pub fn from_key(key: &str) -> Option<Attribute> {
                match key {
                    $(stringify!($field) => Some(Attribute::$variant),)*
                    _ => None,
                }
            }
        }

        /// Player attributes, each bounded to `0..=100` or absent.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(from = "LooseAttributeMap")]
        pub struct PlayerAttributes {
            $(
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $field: Option<u8>,
            )*
        }

        impl PlayerAttributes {
            pub fn get(&self, attribute: Attribute) -> Option<u8> {
                match attribute {
                    $(Attribute::$variant => self.$field,)*
                }
            }

            /// Set a value, discarding anything above [`ATTRIBUTE_MAX`].
            pub fn set(&mut self, attribute: Attribute, value: Option<u8>) {
                let value = value.filter(|v| *v <= ATTRIBUTE_MAX);
                match attribute {
                    $(Attribute::$variant => self.$field = value,)*
                }
            }
        }
    };
}

player_attributes! {
    // physical
    Acceleration => acceleration,
    SprintSpeed => sprint_speed,
    Agility => agility,
    Balance => balance,
    Jumping => jumping,
    Stamina => stamina,
    Strength => strength,
    Reactions => reactions,
    // technical
    BallControl => ball_control,
    Dribbling => dribbling,
    ShortPassing => short_passing,
    LongPassing => long_passing,
    Crossing => crossing,
    Finishing => finishing,
    ShotPower => shot_power,
    LongShots => long_shots,
    Volleys => volleys,
    Curve => curve,
    FreeKickAccuracy => free_kick_accuracy,
    HeadingAccuracy => heading_accuracy,
    // mental
    Aggression => aggression,
    Composure => composure,
    Vision => vision,
    Positioning => positioning,
    Penalties => penalties,
    // defensive
    Marking => marking,
    StandingTackle => standing_tackle,
    SlidingTackle => sliding_tackle,
    Interceptions => interceptions,
    DefensiveAwareness => defensive_awareness,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl PlayerAttributes {
    /// Builder-style setter, mostly for fixtures.
    pub fn with(mut self, attribute: Attribute, value: u8) -> Self {
        self.set(attribute, Some(value));
        self
    }

    /// Number of attributes carrying a value.
    pub fn present_count(&self) -> usize {
        Attribute::ALL.iter().filter(|a| self.get(**a).is_some()).count()
    }

    /// Resolve a loosely typed map into the fixed schema.
    ///
    /// Unknown keys are ignored. `null`, non-numeric strings, and values
    /// outside `0..=100` become absent. Fractional values are rounded.
    pub fn from_loose(map: &LooseAttributeMap) -> Self {
        let mut attributes = PlayerAttributes::default();
        for (key, value) in map {
            let Some(attribute) = Attribute::from_key(key) else {
                continue;
            };
            attributes.set(attribute, resolve_value(attribute, value));
        }
        attributes
    }
}

impl From<LooseAttributeMap> for PlayerAttributes {
    fn from(map: LooseAttributeMap) -> Self {
        PlayerAttributes::from_loose(&map)
    }
}

fn resolve_value(attribute: Attribute, value: &Value) -> Option<u8> {
    let raw = match value {
        Value::Null => return None,
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match raw.map(f64::round) {
        Some(v) if (0.0..=f64::from(ATTRIBUTE_MAX)).contains(&v) => Some(v as u8),
        _ => {
            warn!(attribute = attribute.key(), value = %value, "discarding unusable attribute value");
            None
        }
    }
}
