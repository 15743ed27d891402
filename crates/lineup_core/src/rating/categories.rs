//! Category averages
//!
//! Mean of the attributes a player actually has within each skill category.
//! Absent attributes are skipped, not counted as zero.

use super::NOT_AVAILABLE;
use crate::models::{Attribute, Player, PlayerAttributes};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Physical,
    Technical,
    Mental,
    Defensive,
}

const PHYSICAL: &[Attribute] = &[
    Attribute::Acceleration,
    Attribute::SprintSpeed,
    Attribute::Agility,
    Attribute::Balance,
    Attribute::Jumping,
    Attribute::Stamina,
    Attribute::Strength,
    Attribute::Reactions,
];

const TECHNICAL: &[Attribute] = &[
    Attribute::BallControl,
    Attribute::Dribbling,
    Attribute::ShortPassing,
    Attribute::LongPassing,
    Attribute::Crossing,
    Attribute::Finishing,
    Attribute::ShotPower,
    Attribute::LongShots,
    Attribute::Volleys,
    Attribute::Curve,
    Attribute::FreeKickAccuracy,
    Attribute::HeadingAccuracy,
];

const MENTAL: &[Attribute] = &[
    Attribute::Aggression,
    Attribute::Composure,
    Attribute::Vision,
    Attribute::Positioning,
    Attribute::Penalties,
];

const DEFENSIVE: &[Attribute] = &[
    Attribute::Marking,
    Attribute::StandingTackle,
    Attribute::SlidingTackle,
    Attribute::Interceptions,
    Attribute::DefensiveAwareness,
];

impl SkillCategory {
    pub const ALL: [SkillCategory; 4] = [
        SkillCategory::Physical,
        SkillCategory::Technical,
        SkillCategory::Mental,
        SkillCategory::Defensive,
    ];

    /// Attributes contributing to this category.
    pub fn attributes(&self) -> &'static [Attribute] {
        match self {
            SkillCategory::Physical => PHYSICAL,
            SkillCategory::Technical => TECHNICAL,
            SkillCategory::Mental => MENTAL,
            SkillCategory::Defensive => DEFENSIVE,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkillCategory::Physical => "Physical",
            SkillCategory::Technical => "Technical",
            SkillCategory::Mental => "Mental",
            SkillCategory::Defensive => "Defensive",
        }
    }

    /// Rounded mean of the present attributes, `None` when none are present.
    pub fn average(&self, attributes: &PlayerAttributes) -> Option<u8> {
        let present: Vec<u32> = self
            .attributes()
            .iter()
            .filter_map(|a| attributes.get(*a))
            .map(u32::from)
            .collect();

        if present.is_empty() {
            return None;
        }
        let mean = f64::from(present.iter().sum::<u32>()) / present.len() as f64;
        Some(mean.round() as u8)
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-category averages for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAverages(BTreeMap<SkillCategory, Option<u8>>);

impl CategoryAverages {
    pub fn for_player(player: &Player) -> Self {
        Self::from_attributes(&player.attributes)
    }

    pub fn from_attributes(attributes: &PlayerAttributes) -> Self {
        Self(SkillCategory::ALL.into_iter().map(|c| (c, c.average(attributes))).collect())
    }

    pub fn get(&self, category: SkillCategory) -> Option<u8> {
        self.0.get(&category).copied().flatten()
    }

    /// Average as text, or `N/A` when the category has no data.
    pub fn display(&self, category: SkillCategory) -> String {
        self.get(category).map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkillCategory, Option<u8>)> + '_ {
        self.0.iter().map(|(c, v)| (*c, *v))
    }
}
