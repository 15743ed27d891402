//! Presentation views
//!
//! Flat, serialisable snapshots of session state for UI clients.

use super::ApiError;
use crate::error::{LineupError, Result};
use crate::lineup::{Assignment, SlotAssignmentEngine, SlotBinding};
use crate::models::{Player, RoleCategory};
use crate::rating::{CategoryAverages, RatingCalculator, SkillCategory, NOT_AVAILABLE};
use crate::roster::RankedRoster;
use crate::state::{FormationSession, Lineup};
use crate::tactics::{FormationMetadata, FormationTemplate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: String,
    pub name: String,
}

impl From<&Arc<Player>> for PlayerRef {
    fn from(player: &Arc<Player>) -> Self {
        Self { id: player.id.clone(), name: player.name.clone() }
    }
}

fn refs(players: &[Arc<Player>]) -> Vec<PlayerRef> {
    players.iter().map(PlayerRef::from).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotView {
    pub role: RoleCategory,
    pub index: usize,
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub occupant: Option<PlayerRef>,
    /// Occupant name, or the slot label when vacant.
    pub display: String,
}

impl From<&SlotBinding> for SlotView {
    fn from(binding: &SlotBinding) -> Self {
        Self {
            role: binding.role,
            index: binding.index,
            label: binding.slot.label.clone(),
            x: binding.slot.x,
            y: binding.slot.y,
            occupant: binding.occupant.as_ref().map(PlayerRef::from),
            display: binding.display_name().to_string(),
        }
    }
}

/// Surplus candidates per outfield role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailablePools {
    pub defenders: Vec<PlayerRef>,
    pub midfielders: Vec<PlayerRef>,
    pub forwards: Vec<PlayerRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalkeeperView {
    pub player: PlayerRef,
    /// One decimal, or `N/A`.
    pub rating: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupView {
    pub formation: String,
    #[serde(flatten)]
    pub metadata: FormationMetadata,
    /// `loading`, `ready` or `error`.
    pub phase: String,
    pub slots: Vec<SlotView>,
    pub available: AvailablePools,
    pub goalkeeper: Option<GoalkeeperView>,
    pub goalkeeper_pool: Vec<PlayerRef>,
    pub error: Option<ApiError>,
}

impl LineupView {
    /// Snapshot the session. While loading, the active template is shown
    /// with every slot vacant.
    pub fn from_session(session: &FormationSession<'_>) -> Result<Self> {
        let state = session.state();
        let error = state.error().map(ApiError::from);

        let view = match state.lineup() {
            Some(lineup) => {
                let template = match session.catalog().get(lineup.formation) {
                    Some(template) => template,
                    None => session.template()?,
                };
                Self::from_lineup(template, lineup, state.label(), error)
            }
            None => {
                let template = session.template()?;
                let empty = SlotAssignmentEngine::assign(template, &RankedRoster::empty())?;
                Self::build(template, &empty, state.label(), error)
            }
        };
        Ok(view)
    }

    fn from_lineup(
        template: &FormationTemplate,
        lineup: &Lineup,
        phase: &str,
        error: Option<ApiError>,
    ) -> Self {
        let mut view = Self::build(template, &lineup.assignment, phase, error);
        view.goalkeeper = lineup.selected_goalkeeper.as_ref().map(|keeper| GoalkeeperView {
            player: PlayerRef::from(keeper),
            rating: lineup
                .goalkeeper_rating_label()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        });
        view.goalkeeper_pool = refs(&lineup.goalkeeper_pool);
        view
    }

    fn build(
        template: &FormationTemplate,
        assignment: &Assignment,
        phase: &str,
        error: Option<ApiError>,
    ) -> Self {
        Self {
            formation: template.name().to_string(),
            metadata: template.metadata.clone(),
            phase: phase.to_string(),
            slots: assignment.bindings().map(SlotView::from).collect(),
            available: AvailablePools {
                defenders: refs(&assignment.defenders.available),
                midfielders: refs(&assignment.midfielders.available),
                forwards: refs(&assignment.forwards.available),
            },
            goalkeeper: None,
            goalkeeper_pool: Vec::new(),
            error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryView {
    pub category: SkillCategory,
    pub average: Option<u8>,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRatingView {
    pub player: PlayerRef,
    pub role: RoleCategory,
    pub categories: Vec<CategoryView>,
    /// Present for goalkeepers only: one decimal, or `N/A`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goalkeeper_rating: Option<String>,
    /// Attributes the goalkeeper composite could not find.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_attributes: Vec<String>,
}

impl PlayerRatingView {
    pub fn for_player(player: &Arc<Player>) -> Self {
        let averages = CategoryAverages::for_player(player);
        let categories = averages
            .iter()
            .map(|(category, average)| CategoryView {
                category,
                average,
                display: averages.display(category),
            })
            .collect();

        let (goalkeeper_rating, missing_attributes) = if player.role.is_goalkeeper() {
            let rating = RatingCalculator::goalkeeper_rating(player);
            let missing = match &rating {
                Err(LineupError::InvalidAttributes { missing, .. }) => missing.clone(),
                _ => Vec::new(),
            };
            (Some(RatingCalculator::rating_label(&rating)), missing)
        } else {
            (None, Vec::new())
        };

        Self {
            player: PlayerRef::from(player),
            role: player.role,
            categories,
            goalkeeper_rating,
            missing_attributes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationSummary {
    pub name: String,
    pub defenders: usize,
    pub midfielders: usize,
    pub forwards: usize,
    #[serde(flatten)]
    pub metadata: FormationMetadata,
}

impl From<&FormationTemplate> for FormationSummary {
    fn from(template: &FormationTemplate) -> Self {
        Self {
            name: template.name().to_string(),
            defenders: template.slot_count(RoleCategory::Defender),
            midfielders: template.slot_count(RoleCategory::Midfielder),
            forwards: template.slot_count(RoleCategory::Forward),
            metadata: template.metadata.clone(),
        }
    }
}
