//! Formation session state
//!
//! One `FormationSession` per screen/session. It owns the active formation,
//! the latest roster and goalkeeper data, and the derived [`FormationState`].
//! Every input change recomputes the lineup from scratch.
//!
//! Fetches are issued by the caller. Each request gets a ticket from the
//! session; a response is only applied if its ticket is still the latest one
//! for that channel, so superseded responses never overwrite newer state.

pub mod controller;


pub use controller::LineupController;

use crate::config::SessionConfig;
use crate::error::{LineupError, Result};
use crate::lineup::{Assignment, SlotAssignmentEngine};
use crate::models::Player;
use crate::rating::{GoalkeeperRating, RatingCalculator};
use crate::roster::{FetchError, RankedRoster};
use crate::tactics::{FormationCatalog, FormationKind, FormationTemplate};
use std::sync::Arc;
use tracing::{debug, warn};

/// Handle for an outstanding ranked-roster request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterTicket {
    formation: FormationKind,
    seq: u64,
}

impl RosterTicket {
    /// Formation the roster should be ranked for.
    pub fn formation(&self) -> FormationKind {
        self.formation
    }
}

/// Handle for an outstanding goalkeeper-candidates request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalkeeperTicket {
    seq: u64,
}

/// Outcome of feeding a response into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Updated,
    /// A newer request was issued; the response was dropped.
    Stale,
}

/// Latest known result of one upstream channel.
#[derive(Debug, Clone, PartialEq)]
enum Feed<T> {
    Pending,
    Loaded(T),
    Failed(LineupError),
}

/// Everything the presentation layer needs for one formation.
#[derive(Debug, Clone, PartialEq)]
pub struct Lineup {
    pub formation: FormationKind,
    pub assignment: Assignment,
    pub selected_goalkeeper: Option<Arc<Player>>,
    /// `None` while no goalkeeper is selected.
    pub goalkeeper_rating: Option<Result<GoalkeeperRating>>,
    /// Goalkeeper candidates other than the selected one, in rank order.
    pub goalkeeper_pool: Vec<Arc<Player>>,
}

impl Lineup {
    pub fn goalkeeper_rating_label(&self) -> Option<String> {
        self.goalkeeper_rating.as_ref().map(RatingCalculator::rating_label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormationState {
    Loading,
    Ready(Lineup),
    Error {
        reason: LineupError,
        /// What can still be shown: the previous lineup or an all-vacant one.
        fallback: Option<Lineup>,
    },
}

impl FormationState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FormationState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, FormationState::Ready(_))
    }

    /// The lineup to render, if any.
    pub fn lineup(&self) -> Option<&Lineup> {
        match self {
            FormationState::Loading => None,
            FormationState::Ready(lineup) => Some(lineup),
            FormationState::Error { fallback, .. } => fallback.as_ref(),
        }
    }

    pub fn error(&self) -> Option<&LineupError> {
        match self {
            FormationState::Error { reason, .. } => Some(reason),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormationState::Loading => "loading",
            FormationState::Ready(_) => "ready",
            FormationState::Error { .. } => "error",
        }
    }
}

pub struct FormationSession<'c> {
    catalog: &'c FormationCatalog,
    active: FormationKind,
    roster: Feed<RankedRoster>,
    goalkeepers: Feed<Vec<Arc<Player>>>,
    selected_goalkeeper: Option<Arc<Player>>,
    roster_seq: u64,
    goalkeeper_seq: u64,
    state: FormationState,
}

impl FormationSession<'static> {
    /// Session over the built-in catalog.
    pub fn with_builtin(config: &SessionConfig) -> Result<Self> {
        FormationSession::new(FormationCatalog::builtin()?, config)
    }
}

impl<'c> FormationSession<'c> {
    pub fn new(catalog: &'c FormationCatalog, config: &SessionConfig) -> Result<Self> {
        let active = config.validate(catalog)?;
        Ok(Self {
            catalog,
            active,
            roster: Feed::Pending,
            goalkeepers: Feed::Pending,
            selected_goalkeeper: None,
            roster_seq: 0,
            goalkeeper_seq: 0,
            state: FormationState::Loading,
        })
    }

    pub fn state(&self) -> &FormationState {
        &self.state
    }

    pub fn catalog(&self) -> &'c FormationCatalog {
        self.catalog
    }

    pub fn active_formation(&self) -> FormationKind {
        self.active
    }

    pub fn template(&self) -> Result<&'c FormationTemplate> {
        self.catalog
            .get(self.active)
            .ok_or_else(|| LineupError::UnknownFormation(self.active.name().to_string()))
    }

    pub fn roster(&self) -> Option<&RankedRoster> {
        match &self.roster {
            Feed::Loaded(roster) => Some(roster),
            _ => None,
        }
    }

    pub fn goalkeeper_candidates(&self) -> &[Arc<Player>] {
        match &self.goalkeepers {
            Feed::Loaded(candidates) => candidates,
            _ => &[],
        }
    }

    pub fn selected_goalkeeper(&self) -> Option<&Arc<Player>> {
        self.selected_goalkeeper.as_ref()
    }

    /// Start a ranked-roster request for the active formation.
    ///
    /// Any roster request issued earlier becomes stale.
    pub fn request_roster(&mut self) -> RosterTicket {
        self.roster_seq += 1;
        RosterTicket { formation: self.active, seq: self.roster_seq }
    }

    /// Start a goalkeeper-candidates request; earlier ones become stale.
    pub fn request_goalkeepers(&mut self) -> GoalkeeperTicket {
        self.goalkeeper_seq += 1;
        GoalkeeperTicket { seq: self.goalkeeper_seq }
    }

    /// Switch formation and rerun assignment against the current lists.
    ///
    /// Returns the ticket for re-fetching the roster ranked for the new
    /// formation. An unknown name moves the session to an error state that
    /// keeps the previous lineup on display, unless a feed has failed, in
    /// which case the fetch failure stays the reported state.
    pub fn select_formation(&mut self, name: &str) -> Result<RosterTicket> {
        let kind = match self.catalog.get_template(name) {
            Ok(template) => template.kind,
            Err(err) => {
                warn!(formation = name, "unknown formation selected");
                if self.feed_failure().is_some() {
                    self.recompute();
                } else {
                    let fallback = self.state.lineup().cloned();
                    self.state = FormationState::Error { reason: err.clone(), fallback };
                }
                return Err(err);
            }
        };

        debug!(from = %self.active, to = %kind, "formation selected");
        self.active = kind;
        self.recompute();
        Ok(self.request_roster())
    }

    /// Make `player_id` the goalkeeper. It must be one of the current candidates.
    pub fn select_goalkeeper(&mut self, player_id: &str) -> Result<()> {
        let candidate = self
            .goalkeeper_candidates()
            .iter()
            .find(|p| p.id == player_id)
            .cloned()
            .ok_or_else(|| LineupError::UnknownPlayer(player_id.to_string()))?;

        debug!(player_id, "goalkeeper selected");
        self.selected_goalkeeper = Some(candidate);
        self.recompute();
        Ok(())
    }

    /// Feed a ranked-roster response.
    pub fn roster_updated(
        &mut self,
        ticket: RosterTicket,
        outcome: std::result::Result<RankedRoster, FetchError>,
    ) -> Applied {
        if ticket.seq != self.roster_seq || ticket.formation != self.active {
            debug!(formation = %ticket.formation, seq = ticket.seq, "stale roster response dropped");
            return Applied::Stale;
        }

        self.roster = match outcome {
            Ok(roster) => Feed::Loaded(roster),
            Err(err) => {
                warn!(error = %err, "roster fetch failed");
                Feed::Failed(LineupError::FetchFailure(err.to_string()))
            }
        };
        self.recompute();
        Applied::Updated
    }

    /// Feed a goalkeeper-candidates response.
    ///
    /// The current selection survives if its id is still listed; otherwise
    /// the top-ranked candidate is selected.
    pub fn goalkeepers_updated(
        &mut self,
        ticket: GoalkeeperTicket,
        outcome: std::result::Result<Vec<Arc<Player>>, FetchError>,
    ) -> Applied {
        if ticket.seq != self.goalkeeper_seq {
            debug!(seq = ticket.seq, "stale goalkeeper response dropped");
            return Applied::Stale;
        }

        match outcome {
            Ok(candidates) => {
                let kept = self
                    .selected_goalkeeper
                    .as_ref()
                    .and_then(|current| candidates.iter().find(|p| p.id == current.id));
                self.selected_goalkeeper = kept.or_else(|| candidates.first()).cloned();
                self.goalkeepers = Feed::Loaded(candidates);
            }
            Err(err) => {
                warn!(error = %err, "goalkeeper fetch failed");
                self.selected_goalkeeper = None;
                self.goalkeepers = Feed::Failed(LineupError::FetchFailure(err.to_string()));
            }
        }
        self.recompute();
        Applied::Updated
    }

    fn recompute(&mut self) {
        let next = match self.derive_state() {
            Ok(state) => state,
            Err(err) => FormationState::Error { reason: err, fallback: None },
        };
        if next.label() != self.state.label() {
            debug!(from = self.state.label(), to = next.label(), "formation state changed");
        }
        self.state = next;
    }

    fn feed_failure(&self) -> Option<&LineupError> {
        match (&self.roster, &self.goalkeepers) {
            (Feed::Failed(err), _) | (_, Feed::Failed(err)) => Some(err),
            _ => None,
        }
    }

    fn derive_state(&self) -> Result<FormationState> {
        if let Some(reason) = self.feed_failure().cloned() {
            // Whatever did load is still shown; the failed side stays vacant.
            let fallback = self.build_lineup()?;
            return Ok(FormationState::Error { reason, fallback: Some(fallback) });
        }

        match (&self.roster, &self.goalkeepers) {
            (Feed::Loaded(_), Feed::Loaded(_)) => Ok(FormationState::Ready(self.build_lineup()?)),
            _ => Ok(FormationState::Loading),
        }
    }

    fn build_lineup(&self) -> Result<Lineup> {
        let empty = RankedRoster::empty();
        let roster = self.roster().unwrap_or(&empty);

        let mut assignment = SlotAssignmentEngine::assign(self.template()?, roster)?;
        assignment.bind_goalkeeper(self.selected_goalkeeper.clone());

        let goalkeeper_rating =
            self.selected_goalkeeper.as_deref().map(RatingCalculator::goalkeeper_rating);
        let goalkeeper_pool = self
            .goalkeeper_candidates()
            .iter()
            .filter(|p| self.selected_goalkeeper.as_ref().map_or(true, |s| s.id != p.id))
            .cloned()
            .collect();

        Ok(Lineup {
            formation: self.active,
            assignment,
            selected_goalkeeper: self.selected_goalkeeper.clone(),
            goalkeeper_rating,
            goalkeeper_pool,
        })
    }
}
