//! Provider-driven session
//!
//! Wires a [`RosterProvider`] to a [`FormationSession`]: every refresh or
//! formation change issues tickets, calls the provider and feeds the results
//! back through the session.

use super::{Applied, FormationSession, FormationState};
use crate::config::SessionConfig;
use crate::error::Result;
use crate::roster::RosterProvider;
use crate::tactics::FormationCatalog;
use tracing::{debug, info};

pub struct LineupController<'c, P: RosterProvider> {
    provider: P,
    coach_id: String,
    session: FormationSession<'c>,
}

impl<P: RosterProvider> LineupController<'static, P> {
    pub fn with_builtin(provider: P, config: &SessionConfig) -> Result<Self> {
        Self::new(provider, FormationCatalog::builtin()?, config)
    }
}

impl<'c, P: RosterProvider> LineupController<'c, P> {
    pub fn new(provider: P, catalog: &'c FormationCatalog, config: &SessionConfig) -> Result<Self> {
        let session = FormationSession::new(catalog, config)?;
        info!(
            coach_id = %config.coach_id,
            formation = %session.active_formation(),
            "lineup session started"
        );
        Ok(Self { provider, coach_id: config.coach_id.clone(), session })
    }

    /// Fetch both the ranked roster and the goalkeeper candidates.
    pub fn refresh(&mut self) -> &FormationState {
        self.load_goalkeepers();
        self.load_roster();
        self.session.state()
    }

    pub fn select_formation(&mut self, name: &str) -> Result<&FormationState> {
        let ticket = self.session.select_formation(name)?;
        let outcome = self.provider.fetch_ranked_players(&self.coach_id, ticket.formation());
        self.session.roster_updated(ticket, outcome);
        Ok(self.session.state())
    }

    pub fn select_goalkeeper(&mut self, player_id: &str) -> Result<&FormationState> {
        self.session.select_goalkeeper(player_id)?;
        Ok(self.session.state())
    }

    pub fn state(&self) -> &FormationState {
        self.session.state()
    }

    pub fn session(&self) -> &FormationSession<'c> {
        &self.session
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn load_roster(&mut self) -> Applied {
        let ticket = self.session.request_roster();
        let outcome = self.provider.fetch_ranked_players(&self.coach_id, ticket.formation());
        let applied = self.session.roster_updated(ticket, outcome);
        debug!(?applied, "roster refresh");
        applied
    }

    fn load_goalkeepers(&mut self) -> Applied {
        let ticket = self.session.request_goalkeepers();
        let outcome = self.provider.fetch_goalkeeper_candidates(&self.coach_id);
        let applied = self.session.goalkeepers_updated(ticket, outcome);
        debug!(?applied, "goalkeeper refresh");
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LineupError;
    use crate::models::{Player, RoleCategory};
    use crate::roster::{FetchError, RankedRoster};
    use crate::tactics::FormationKind;
    use std::cell::RefCell;
    use std::sync::Arc;

    /// Provider serving a fixed roster and recording each call.
    struct MockProvider {
        roster: std::result::Result<RankedRoster, FetchError>,
        keepers: Vec<Arc<Player>>,
        calls: RefCell<Vec<String>>,
    }

    impl MockProvider {
        fn new(d: usize, m: usize, f: usize) -> Self {
            let make = |prefix: &str, role: RoleCategory, n: usize| {
                (0..n)
                    .map(|i| Arc::new(Player::new(format!("{prefix}{i}"), prefix, role)))
                    .collect::<Vec<_>>()
            };
            Self {
                roster: Ok(RankedRoster {
                    defenders: make("d", RoleCategory::Defender, d),
                    midfielders: make("m", RoleCategory::Midfielder, m),
                    forwards: make("f", RoleCategory::Forward, f),
                }),
                keepers: vec![
                    Arc::new(Player::new("gk1", "First", RoleCategory::Goalkeeper)),
                    Arc::new(Player::new("gk2", "Second", RoleCategory::Goalkeeper)),
                ],
                calls: RefCell::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self { roster: Err(FetchError::Unavailable("offline".into())), ..Self::new(0, 0, 0) }
        }
    }

    impl RosterProvider for MockProvider {
        fn fetch_ranked_players(
            &self,
            coach_id: &str,
            formation: FormationKind,
        ) -> std::result::Result<RankedRoster, FetchError> {
            self.calls.borrow_mut().push(format!("roster:{coach_id}:{formation}"));
            self.roster.clone()
        }

        fn fetch_goalkeeper_candidates(
            &self,
            coach_id: &str,
        ) -> std::result::Result<Vec<Arc<Player>>, FetchError> {
            self.calls.borrow_mut().push(format!("keepers:{coach_id}"));
            Ok(self.keepers.clone())
        }
    }

    fn controller(provider: MockProvider) -> LineupController<'static, MockProvider> {
        let config =
            SessionConfig { coach_id: "coach-1".into(), default_formation: "4-4-2".into() };
        LineupController::with_builtin(provider, &config).unwrap()
    }

    #[test]
    fn test_refresh_loads_both_feeds() {
        let mut controller = controller(MockProvider::new(3, 4, 2));
        assert!(controller.state().is_loading());

        let state = controller.refresh();
        let lineup = state.lineup().unwrap();
        assert!(state.is_ready());
        assert_eq!(lineup.assignment.defenders.vacant_count(), 1);
        assert_eq!(lineup.assignment.goalkeeper.display_name(), "First");

        let calls = controller.provider().calls.borrow();
        assert_eq!(*calls, vec!["keepers:coach-1", "roster:coach-1:4-4-2"]);
    }

    #[test]
    fn test_select_formation_refetches_for_new_formation() {
        let mut controller = controller(MockProvider::new(4, 4, 2));
        controller.refresh();

        let state = controller.select_formation("3-5-2").unwrap();
        assert_eq!(state.lineup().unwrap().formation, FormationKind::T352);
        assert_eq!(
            controller.provider().calls.borrow().last().map(String::as_str),
            Some("roster:coach-1:3-5-2")
        );
    }

    #[test]
    fn test_unknown_formation_does_not_fetch() {
        let mut controller = controller(MockProvider::new(4, 4, 2));
        controller.refresh();
        let before = controller.provider().calls.borrow().len();

        let err = controller.select_formation("1-1-8").unwrap_err();
        assert!(matches!(err, LineupError::UnknownFormation(_)));
        assert_eq!(controller.provider().calls.borrow().len(), before);
        assert!(controller.state().lineup().is_some());
    }

    #[test]
    fn test_provider_failure_degrades() {
        let mut controller = controller(MockProvider::failing());
        let state = controller.refresh();

        assert!(matches!(state.error(), Some(LineupError::FetchFailure(_))));
        let fallback = state.lineup().unwrap();
        assert_eq!(fallback.assignment.vacant_count(), 10, "outfield vacant, keeper still bound");
    }

    #[test]
    fn test_select_goalkeeper_through_controller() {
        let mut controller = controller(MockProvider::new(4, 4, 2));
        controller.refresh();

        let state = controller.select_goalkeeper("gk2").unwrap();
        assert_eq!(state.lineup().unwrap().assignment.goalkeeper.display_name(), "Second");
        assert_eq!(controller.session().selected_goalkeeper().map(|p| p.id.as_str()), Some("gk2"));
    }
}
