//! Slot assignment
//!
//! Binds ranked candidate lists onto a template's declared slots. Slot `i` of
//! a role takes the candidate at rank `i`; there is no permutation search and
//! no best-fit matching. Missing candidates leave slots vacant, surplus
//! candidates go to the role's available pool.

use crate::error::Result;
use crate::models::{Player, RoleCategory};
use crate::roster::RankedRoster;
use crate::tactics::{FormationKind, FormationTemplate, Slot};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// One slot and whoever fills it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotBinding {
    pub role: RoleCategory,
    /// Declaration index within the role.
    pub index: usize,
    pub slot: Slot,
    pub occupant: Option<Arc<Player>>,
}

impl SlotBinding {
    pub fn is_vacant(&self) -> bool {
        self.occupant.is_none()
    }

    /// Occupant name, or the slot's default label when vacant.
    pub fn display_name(&self) -> &str {
        self.occupant.as_ref().map_or(self.slot.label.as_str(), |p| p.name.as_str())
    }
}

/// Bindings for one outfield role plus the candidates that did not fit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleAssignment {
    pub role: RoleCategory,
    pub bindings: Vec<SlotBinding>,
    /// Surplus candidates in rank order, never bound.
    pub available: Vec<Arc<Player>>,
}

impl RoleAssignment {
    pub fn vacant_count(&self) -> usize {
        self.bindings.iter().filter(|b| b.is_vacant()).count()
    }

    pub fn bound_count(&self) -> usize {
        self.bindings.len() - self.vacant_count()
    }
}

/// Resolved mapping from a template's slots to players.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub formation: FormationKind,
    pub goalkeeper: SlotBinding,
    pub defenders: RoleAssignment,
    pub midfielders: RoleAssignment,
    pub forwards: RoleAssignment,
}

impl Assignment {
    /// Outfield bindings for a role. The goalkeeper has its own field.
    pub fn role(&self, role: RoleCategory) -> Option<&RoleAssignment> {
        match role {
            RoleCategory::Goalkeeper => None,
            RoleCategory::Defender => Some(&self.defenders),
            RoleCategory::Midfielder => Some(&self.midfielders),
            RoleCategory::Forward => Some(&self.forwards),
        }
    }

    /// Every binding: goalkeeper first, then defenders, midfielders, forwards.
    pub fn bindings(&self) -> impl Iterator<Item = &SlotBinding> {
        std::iter::once(&self.goalkeeper)
            .chain(self.defenders.bindings.iter())
            .chain(self.midfielders.bindings.iter())
            .chain(self.forwards.bindings.iter())
    }

    pub fn vacant_count(&self) -> usize {
        self.bindings().filter(|b| b.is_vacant()).count()
    }

    /// Replace only the goalkeeper binding.
    pub fn bind_goalkeeper(&mut self, goalkeeper: Option<Arc<Player>>) {
        self.goalkeeper.occupant = goalkeeper;
    }
}

/// Stateless slot filler.
pub struct SlotAssignmentEngine;

impl SlotAssignmentEngine {
    /// Bind ranked candidates onto `template`.
    ///
    /// Only a malformed template is an error; empty or short candidate lists
    /// produce vacant slots.
    pub fn assign(template: &FormationTemplate, candidates: &RankedRoster) -> Result<Assignment> {
        template.validate()?;

        let bind = |role: RoleCategory| {
            Self::bind_role(role, template.slots(role), candidates.for_role(role))
        };
        let assignment = Assignment {
            formation: template.kind,
            goalkeeper: SlotBinding {
                role: RoleCategory::Goalkeeper,
                index: 0,
                slot: template.goalkeeper.clone(),
                occupant: None,
            },
            defenders: bind(RoleCategory::Defender),
            midfielders: bind(RoleCategory::Midfielder),
            forwards: bind(RoleCategory::Forward),
        };

        debug!(
            formation = %template.kind,
            vacant = assignment.vacant_count(),
            "assignment computed"
        );
        Ok(assignment)
    }

    /// Positional binding for a single role.
    ///
    /// A player id repeated in `ranked` only counts at its first rank.
    pub fn bind_role(role: RoleCategory, slots: &[Slot], ranked: &[Arc<Player>]) -> RoleAssignment {
        let mut seen = HashSet::new();
        let mut unique = ranked.iter().filter(|&player| {
            let first = seen.insert(player.id.as_str());
            if !first {
                warn!(role = %role, player_id = %player.id, "dropping repeated candidate");
            }
            first
        });

        let bindings = slots
            .iter()
            .enumerate()
            .map(|(index, slot)| SlotBinding {
                role,
                index,
                slot: slot.clone(),
                occupant: unique.next().cloned(),
            })
            .collect();
        let available = unique.cloned().collect();

        RoleAssignment { role, bindings, available }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LineupError;
    use crate::tactics::FormationCatalog;

    fn template(name: &str) -> &'static FormationTemplate {
        FormationCatalog::builtin().unwrap().get_template(name).unwrap()
    }

    fn players(prefix: &str, role: RoleCategory, n: usize) -> Vec<Arc<Player>> {
        (0..n)
            .map(|i| Arc::new(Player::new(format!("{prefix}{i}"), format!("{prefix} {i}"), role)))
            .collect()
    }

    fn roster(d: usize, m: usize, f: usize) -> RankedRoster {
        RankedRoster {
            defenders: players("d", RoleCategory::Defender, d),
            midfielders: players("m", RoleCategory::Midfielder, m),
            forwards: players("f", RoleCategory::Forward, f),
        }
    }

    fn occupant_ids(role: &RoleAssignment) -> Vec<Option<&str>> {
        role.bindings.iter().map(|b| b.occupant.as_ref().map(|p| p.id.as_str())).collect()
    }

    #[test]
    fn test_binds_in_rank_order() {
        let assignment = SlotAssignmentEngine::assign(template("4-3-3"), &roster(4, 3, 3)).unwrap();

        assert_eq!(
            occupant_ids(&assignment.defenders),
            vec![Some("d0"), Some("d1"), Some("d2"), Some("d3")]
        );
        assert_eq!(assignment.defenders.bindings[0].slot.label, "LB");
        assert_eq!(assignment.forwards.bindings[2].display_name(), "f 2");
        assert_eq!(assignment.vacant_count(), 1, "only the goalkeeper is unbound");
    }

    #[test]
    fn test_short_list_leaves_trailing_slots_vacant() {
        let assignment = SlotAssignmentEngine::assign(template("4-4-2"), &roster(3, 4, 2)).unwrap();

        assert_eq!(assignment.defenders.vacant_count(), 1);
        let last = &assignment.defenders.bindings[3];
        assert!(last.is_vacant());
        assert_eq!(last.display_name(), "RB");
        assert_eq!(assignment.midfielders.vacant_count(), 0);
        assert_eq!(assignment.forwards.vacant_count(), 0);
    }

    #[test]
    fn test_surplus_goes_to_available_pool_once() {
        let assignment = SlotAssignmentEngine::assign(template("4-5-1"), &roster(4, 5, 4)).unwrap();

        assert_eq!(assignment.forwards.bound_count(), 1);
        let pool: Vec<&str> =
            assignment.forwards.available.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(pool, vec!["f1", "f2", "f3"]);
    }

    #[test]
    fn test_empty_roster_is_all_vacant() {
        let assignment =
            SlotAssignmentEngine::assign(template("3-5-2"), &RankedRoster::empty()).unwrap();
        assert_eq!(assignment.vacant_count(), 11);
        assert!(assignment.defenders.available.is_empty());
    }

    #[test]
    fn test_repeated_candidate_is_bound_once() {
        let mut candidates = roster(4, 3, 3);
        candidates.defenders.insert(1, candidates.defenders[0].clone());

        let assignment = SlotAssignmentEngine::assign(template("4-3-3"), &candidates).unwrap();
        assert_eq!(
            occupant_ids(&assignment.defenders),
            vec![Some("d0"), Some("d1"), Some("d2"), Some("d3")]
        );
        assert!(assignment.defenders.available.is_empty());
    }

    #[test]
    fn test_malformed_template_is_rejected() {
        let mut broken = template("4-3-3").clone();
        broken.midfielders.push(Slot::new("CAM", 0.5, 0.6));
        let err = SlotAssignmentEngine::assign(&broken, &roster(4, 3, 3)).unwrap_err();
        assert!(matches!(err, LineupError::MalformedTemplate(_)));
    }

    #[test]
    fn test_bind_goalkeeper_leaves_outfield_alone() {
        let mut assignment =
            SlotAssignmentEngine::assign(template("4-4-2"), &roster(4, 4, 2)).unwrap();
        let before = assignment.clone();
        let keeper = Arc::new(Player::new("gk", "Keeper", RoleCategory::Goalkeeper));

        assignment.bind_goalkeeper(Some(keeper));

        assert_eq!(assignment.goalkeeper.display_name(), "Keeper");
        assert_eq!(assignment.defenders, before.defenders);
        assert_eq!(assignment.midfielders, before.midfielders);
        assert_eq!(assignment.forwards, before.forwards);
    }

    #[test]
    fn test_reassignment_is_deterministic() {
        let candidates = roster(5, 2, 1);
        let a = SlotAssignmentEngine::assign(template("4-2-3-1"), &candidates).unwrap();
        let b = SlotAssignmentEngine::assign(template("4-2-3-1"), &candidates).unwrap();
        assert_eq!(a, b);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: vacancies and overflow add up for every template and list size
            #[test]
            fn prop_counts_balance(
                formation in 0usize..6,
                d in 0usize..8,
                m in 0usize..8,
                f in 0usize..8
            ) {
                let catalog = FormationCatalog::builtin().unwrap();
                let template = &catalog.templates()[formation];
                let assignment = SlotAssignmentEngine::assign(template, &roster(d, m, f)).unwrap();

                for (role, given) in [
                    (RoleCategory::Defender, d),
                    (RoleCategory::Midfielder, m),
                    (RoleCategory::Forward, f),
                ] {
                    let slots = template.slot_count(role);
                    let bound = assignment.role(role).unwrap();
                    prop_assert_eq!(bound.bound_count(), given.min(slots));
                    prop_assert_eq!(bound.vacant_count(), slots.saturating_sub(given));
                    prop_assert_eq!(bound.available.len(), given.saturating_sub(slots));
                }
            }
        }
    }
}
