//! Lineup CLI Library
//!
//! File-backed roster provider plus the glue the `lineup_cli` binary runs:
//! roster JSON → ranked lists → formation session → lineup/rating views.

use anyhow::{bail, Context, Result};
use lineup_core::api::{FormationSummary, LineupView, PlayerRatingView};
use lineup_core::roster::{rank_goalkeepers, FetchError, RankedRoster, RosterProvider};
use lineup_core::{FormationCatalog, FormationKind, LineupController, Player, SessionConfig};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Accepted roster file layouts: a bare array or `{ "players": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RosterFile {
    Players(Vec<Player>),
    Wrapped { players: Vec<Player> },
}

impl RosterFile {
    fn into_players(self) -> Vec<Player> {
        match self {
            RosterFile::Players(players) | RosterFile::Wrapped { players } => players,
        }
    }
}

/// Roster provider reading a JSON player file on every fetch.
///
/// Players are ranked by `overall_performance`; the file content is the same
/// for every coach and formation.
#[derive(Debug, Clone)]
pub struct FileRosterProvider {
    path: PathBuf,
}

impl FileRosterProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse every player in the file.
    pub fn load_players(&self) -> std::result::Result<Vec<Player>, FetchError> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            FetchError::Unavailable(format!("{}: {}", self.path.display(), e))
        })?;
        let file: RosterFile = serde_json::from_str(&text)
            .map_err(|e| FetchError::Malformed(format!("{}: {}", self.path.display(), e)))?;
        let players = file.into_players();
        debug!(path = %self.path.display(), players = players.len(), "roster file loaded");
        Ok(players)
    }
}

impl RosterProvider for FileRosterProvider {
    fn fetch_ranked_players(
        &self,
        coach_id: &str,
        formation: FormationKind,
    ) -> std::result::Result<RankedRoster, FetchError> {
        debug!(coach_id, formation = %formation, "ranking roster from file");
        Ok(RankedRoster::from_players(self.load_players()?))
    }

    fn fetch_goalkeeper_candidates(
        &self,
        coach_id: &str,
    ) -> std::result::Result<Vec<Arc<Player>>, FetchError> {
        debug!(coach_id, "ranking goalkeepers from file");
        Ok(rank_goalkeepers(self.load_players()?))
    }
}

/// Session config from a YAML (or `.json`) file, or the defaults.
pub fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    let Some(path) = path else {
        return Ok(SessionConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = if path.extension().is_some_and(|ext| ext == "json") {
        SessionConfig::from_json_str(&text)
    } else {
        SessionConfig::from_yaml_str(&text)
    }
    .with_context(|| format!("Invalid config file: {}", path.display()))?;
    Ok(config)
}

/// Options for a single lineup build.
#[derive(Debug, Clone, Default)]
pub struct LineupRequest {
    pub roster: PathBuf,
    pub config: Option<PathBuf>,
    /// Overrides the config's default formation.
    pub formation: Option<String>,
    /// Goalkeeper id to select instead of the top-ranked candidate.
    pub goalkeeper: Option<String>,
}

/// Run one formation session against a roster file and snapshot the result.
pub fn build_lineup(request: &LineupRequest) -> Result<LineupView> {
    let mut config = load_config(request.config.as_deref())?;
    if let Some(formation) = &request.formation {
        config.default_formation = formation.clone();
    }

    let provider = FileRosterProvider::new(&request.roster);
    let mut controller = LineupController::with_builtin(provider, &config)
        .context("Failed to start lineup session")?;
    controller.refresh();

    if let Some(goalkeeper) = &request.goalkeeper {
        controller
            .select_goalkeeper(goalkeeper)
            .with_context(|| format!("Cannot select goalkeeper {}", goalkeeper))?;
    }

    let view = LineupView::from_session(controller.session())?;
    info!(formation = %view.formation, phase = %view.phase, "lineup built");
    Ok(view)
}

/// Rating view for one player in a roster file.
pub fn rate_player(roster: &Path, player_id: &str) -> Result<PlayerRatingView> {
    let players = FileRosterProvider::new(roster)
        .load_players()
        .with_context(|| format!("Failed to load roster: {}", roster.display()))?;

    let Some(player) = players.into_iter().find(|p| p.id == player_id) else {
        bail!("Player {} not found in {}", player_id, roster.display());
    };
    Ok(PlayerRatingView::for_player(&Arc::new(player)))
}

/// Summaries of every built-in formation, in catalog order.
pub fn formation_summaries() -> Result<Vec<FormationSummary>> {
    let catalog = FormationCatalog::builtin().context("Built-in formation catalog is invalid")?;
    Ok(catalog.templates().iter().map(FormationSummary::from).collect())
}
