use super::attributes::{Attribute, PlayerAttributes};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Player as delivered by the roster provider.
///
/// Immutable once fetched; the rest of the crate shares it behind `Arc`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    pub role: RoleCategory,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: PlayerAttributes,
    /// Aggregate performance score (0-100) used by upstream ranking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_performance: Option<f32>,
}

/// Explicit `null` reads the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: RoleCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: String::new(),
            role,
            attributes: PlayerAttributes::default(),
            overall_performance: None,
        }
    }

    pub fn with_attributes(mut self, attributes: PlayerAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute, value: u8) -> Self {
        self.attributes.set(attribute, Some(value));
        self
    }

    pub fn with_performance(mut self, performance: f32) -> Self {
        self.overall_performance = Some(performance);
        self
    }

    /// Performance score if it is a usable number in `0..=100`.
    pub fn performance(&self) -> Option<f32> {
        self.overall_performance.filter(|p| p.is_finite() && (0.0..=100.0).contains(p))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RoleCategory {
    #[serde(alias = "GK", alias = "Goalkeeper")]
    Goalkeeper,
    #[serde(alias = "DF", alias = "Defender")]
    Defender,
    #[serde(alias = "MF", alias = "Midfielder")]
    Midfielder,
    #[serde(alias = "FW", alias = "Forward")]
    Forward,
}

impl RoleCategory {
    /// Outfield roles in template declaration order.
    pub const OUTFIELD: [RoleCategory; 3] =
        [RoleCategory::Defender, RoleCategory::Midfielder, RoleCategory::Forward];

    pub fn short_name(&self) -> &'static str {
        match self {
            RoleCategory::Goalkeeper => "GK",
            RoleCategory::Defender => "DF",
            RoleCategory::Midfielder => "MF",
            RoleCategory::Forward => "FW",
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, RoleCategory::Goalkeeper)
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoleCategory::Goalkeeper => "goalkeeper",
            RoleCategory::Defender => "defender",
            RoleCategory::Midfielder => "midfielder",
            RoleCategory::Forward => "forward",
        };
        f.write_str(name)
    }
}

impl FromStr for RoleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gk" | "goalkeeper" => Ok(RoleCategory::Goalkeeper),
            "df" | "defender" => Ok(RoleCategory::Defender),
            "mf" | "midfielder" => Ok(RoleCategory::Midfielder),
            "fw" | "forward" => Ok(RoleCategory::Forward),
            other => Err(format!("unknown role category: {}", other)),
        }
    }
}
