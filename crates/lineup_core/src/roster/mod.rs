//! Roster inputs
//!
//! Ranked candidate lists and the provider seam they come through. Fetching,
//! caching, timeouts and retries belong to the provider implementation.

use crate::models::{Player, RoleCategory};
use crate::tactics::FormationKind;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;
use thiserror::Error;

/// Per-role candidate lists, each ranked best-first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedRoster {
    #[serde(default)]
    pub defenders: Vec<Arc<Player>>,
    #[serde(default)]
    pub midfielders: Vec<Arc<Player>>,
    #[serde(default)]
    pub forwards: Vec<Arc<Player>>,
}

impl RankedRoster {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Partition players by role and rank each list by performance.
    ///
    /// Goalkeepers are skipped; use [`rank_goalkeepers`] for those.
    pub fn from_players(players: impl IntoIterator<Item = Player>) -> Self {
        let mut defenders = Vec::new();
        let mut midfielders = Vec::new();
        let mut forwards = Vec::new();

        for player in players {
            match player.role {
                RoleCategory::Goalkeeper => {}
                RoleCategory::Defender => defenders.push(player),
                RoleCategory::Midfielder => midfielders.push(player),
                RoleCategory::Forward => forwards.push(player),
            }
        }

        Self {
            defenders: rank_by_performance(defenders),
            midfielders: rank_by_performance(midfielders),
            forwards: rank_by_performance(forwards),
        }
    }

    /// Candidates for an outfield role; goalkeepers are not part of this list.
    pub fn for_role(&self, role: RoleCategory) -> &[Arc<Player>] {
        match role {
            RoleCategory::Goalkeeper => &[],
            RoleCategory::Defender => &self.defenders,
            RoleCategory::Midfielder => &self.midfielders,
            RoleCategory::Forward => &self.forwards,
        }
    }

    pub fn len(&self) -> usize {
        self.defenders.len() + self.midfielders.len() + self.forwards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Stable sort, best performance first; players without a score go last.
pub fn rank_by_performance(mut players: Vec<Player>) -> Vec<Arc<Player>> {
    players.sort_by(|a, b| match (a.performance(), b.performance()) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    players.into_iter().map(Arc::new).collect()
}

/// Goalkeepers from a mixed roster, ranked best-first.
pub fn rank_goalkeepers(players: impl IntoIterator<Item = Player>) -> Vec<Arc<Player>> {
    rank_by_performance(players.into_iter().filter(|p| p.role.is_goalkeeper()).collect())
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("roster provider unavailable: {0}")]
    Unavailable(String),

    #[error("malformed roster payload: {0}")]
    Malformed(String),
}

/// Upstream source of ranked players.
pub trait RosterProvider {
    /// Outfield candidates for a formation, each list ranked best-first.
    fn fetch_ranked_players(
        &self,
        coach_id: &str,
        formation: FormationKind,
    ) -> Result<RankedRoster, FetchError>;

    /// Goalkeeper candidates, ranked best-first.
    fn fetch_goalkeeper_candidates(&self, coach_id: &str) -> Result<Vec<Arc<Player>>, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str, role: RoleCategory, performance: Option<f32>) -> Player {
        let mut p = Player::new(id, id.to_uppercase(), role);
        p.overall_performance = performance;
        p
    }

    fn ids(players: &[Arc<Player>]) -> Vec<&str> {
        players.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_rank_by_performance_puts_unscored_last() {
        let ranked = rank_by_performance(vec![
            player("a", RoleCategory::Defender, None),
            player("b", RoleCategory::Defender, Some(60.0)),
            player("c", RoleCategory::Defender, Some(88.0)),
            player("d", RoleCategory::Defender, None),
            player("e", RoleCategory::Defender, Some(60.0)),
        ]);
        assert_eq!(ids(&ranked), vec!["c", "b", "e", "a", "d"]);
    }

    #[test]
    fn test_from_players_partitions_by_role() {
        let roster = RankedRoster::from_players(vec![
            player("gk", RoleCategory::Goalkeeper, Some(90.0)),
            player("d1", RoleCategory::Defender, Some(70.0)),
            player("m1", RoleCategory::Midfielder, Some(50.0)),
            player("m2", RoleCategory::Midfielder, Some(80.0)),
            player("f1", RoleCategory::Forward, None),
        ]);

        assert_eq!(ids(&roster.defenders), vec!["d1"]);
        assert_eq!(ids(&roster.midfielders), vec!["m2", "m1"]);
        assert_eq!(ids(&roster.forwards), vec!["f1"]);
        assert_eq!(roster.len(), 4);
        assert!(roster.for_role(RoleCategory::Goalkeeper).is_empty());
    }

    #[test]
    fn test_rank_goalkeepers_filters_outfielders() {
        let keepers = rank_goalkeepers(vec![
            player("gk2", RoleCategory::Goalkeeper, Some(61.0)),
            player("d1", RoleCategory::Defender, Some(99.0)),
            player("gk1", RoleCategory::Goalkeeper, Some(72.0)),
        ]);
        assert_eq!(ids(&keepers), vec!["gk1", "gk2"]);
    }

    #[test]
    fn test_ranked_roster_wire_shape() {
        let roster: RankedRoster = serde_json::from_str(
            r#"{"defenders":[{"id":"d1","name":"D","role":"defender"}],"forwards":[]}"#,
        )
        .unwrap();
        assert_eq!(roster.defenders.len(), 1);
        assert!(roster.midfielders.is_empty());
    }
}
