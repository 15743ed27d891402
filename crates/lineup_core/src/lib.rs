//! # lineup_core - Squad Formation and Player Rating Core
//!
//! Turns ranked player lists into an eleven-slot lineup for a chosen
//! formation and rates players for display.
//!
//! ## Features
//! - Versioned catalog of formation templates (embedded YAML)
//! - Deterministic positional slot assignment with vacancies and overflow pools
//! - Category averages and the goalkeeper composite rating
//! - Formation session state with stale-response suppression
//! - JSON API for presentation clients

// Doc formatting lints - purely cosmetic, fix incrementally
#![allow(clippy::doc_lazy_continuation)]

pub mod api;
pub mod config;
pub mod error;
pub mod lineup;
pub mod models;
pub mod rating;
pub mod roster;
pub mod state;
pub mod tactics;

// Re-export main API functions
pub use api::{
    formations_json, lineup_view_json, player_ratings_json, ApiError, ApiResponse,
    FormationSummary, LineupView, PlayerRatingView,
};
pub use config::SessionConfig;
pub use error::{LineupError, Result};

// Re-export domain types
pub use lineup::{Assignment, RoleAssignment, SlotAssignmentEngine, SlotBinding};
pub use models::{Attribute, Player, PlayerAttributes, RoleCategory};
pub use rating::{CategoryAverages, GoalkeeperRating, RatingCalculator, SkillCategory};
pub use roster::{FetchError, RankedRoster, RosterProvider};
pub use state::{
    Applied, FormationSession, FormationState, GoalkeeperTicket, Lineup, LineupController,
    RosterTicket,
};
pub use tactics::{FormationCatalog, FormationKind, FormationTemplate, Slot, TacticalStyle};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn squad() -> Vec<Player> {
        let mut players: Vec<Player> = serde_json::from_value(json!([
            {"id": "gk-a", "name": "Alves", "role": "GK", "overall_performance": 71.0,
             "attributes": {"reactions": 80, "positioning": 78, "jumping": 70, "strength": 66,
                            "composure": 72, "agility": 69, "acceleration": 55,
                            "sprint_speed": 57, "ball_control": 45, "short_passing": 62,
                            "long_passing": 65}},
            {"id": "gk-b", "name": "Berg", "role": "GK", "overall_performance": 64.0},
            {"id": "d-1", "name": "Costa", "role": "DF", "overall_performance": 77.0},
            {"id": "d-2", "name": "Dietz", "role": "DF", "overall_performance": 81.0},
            {"id": "d-3", "name": "Evans", "role": "DF"}
        ]))
        .unwrap();
        for i in 0..4 {
            players.push(
                Player::new(format!("m-{i}"), format!("Mid {i}"), RoleCategory::Midfielder)
                    .with_performance(60.0 + i as f32),
            );
        }
        for i in 0..2 {
            players.push(Player::new(format!("f-{i}"), format!("Fwd {i}"), RoleCategory::Forward));
        }
        players
    }

    #[test]
    fn test_end_to_end_four_four_two() {
        let config = SessionConfig { default_formation: "4-4-2".into(), ..Default::default() };
        let mut session = FormationSession::with_builtin(&config).unwrap();

        let roster_ticket = session.request_roster();
        let keeper_ticket = session.request_goalkeepers();
        session.goalkeepers_updated(keeper_ticket, Ok(roster::rank_goalkeepers(squad())));
        session.roster_updated(roster_ticket, Ok(RankedRoster::from_players(squad())));

        let response: Value = serde_json::from_str(&lineup_view_json(&session)).unwrap();
        let data = &response["data"];
        assert_eq!(data["phase"], json!("ready"));
        assert_eq!(data["goalkeeper"]["player"]["id"], json!("gk-a"));
        assert_eq!(data["goalkeeper_pool"][0]["id"], json!("gk-b"));

        let defenders: Vec<&Value> = data["slots"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|s| s["role"] == json!("defender"))
            .collect();
        assert_eq!(defenders[0]["occupant"]["id"], json!("d-2"));
        assert_eq!(defenders[1]["occupant"]["id"], json!("d-1"));
        assert_eq!(defenders[2]["occupant"]["id"], json!("d-3"));
        assert!(defenders[3]["occupant"].is_null());

        // 16.0 + 11.7 + 7.0 + 6.6 + 7.2 + 6.9 + 2.8 + 5.55 + 6.35 = 70.1
        let rating = data["goalkeeper"]["rating"].as_str().unwrap();
        assert_eq!(rating, "70.1");
    }

    #[test]
    fn test_rating_is_independent_of_session() {
        let keeper = Arc::new(squad().remove(0));
        let view = PlayerRatingView::for_player(&keeper);
        assert_eq!(view.goalkeeper_rating.as_deref(), Some("70.1"));
    }
}
