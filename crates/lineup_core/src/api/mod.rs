//! JSON API for presentation clients
//!
//! Every entry point returns a JSON string wrapping its payload in
//! [`ApiResponse`], so callers only ever deal with one envelope shape.

pub mod view;

pub use view::{
    AvailablePools, CategoryView, FormationSummary, GoalkeeperView, LineupView, PlayerRatingView,
    PlayerRef, SlotView,
};

use crate::error::LineupError;
use crate::models::Player;
use crate::state::FormationSession;
use crate::tactics::FormationCatalog;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// API version for schema compatibility
pub const API_VERSION: &str = "v1";

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: String,
    pub timestamp: DateTime<Utc>,
}

/// Structured API error with codes and details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub recoverable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
}

impl From<&LineupError> for ApiError {
    fn from(error: &LineupError) -> Self {
        let details = match error {
            LineupError::InvalidAttributes { player_id, missing } => Some(HashMap::from([
                ("player_id".to_string(), serde_json::json!(player_id)),
                ("missing".to_string(), serde_json::json!(missing)),
            ])),
            _ => None,
        };
        Self {
            code: error.code().to_string(),
            message: error.to_string(),
            recoverable: error.is_recoverable(),
            details,
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Last-resort envelope when even the error response cannot be serialized.
const SERIALIZATION_FAILURE_JSON: &str = r#"{"success":false,"data":null,"error":{"code":"SERIALIZATION_ERROR","message":"Failed to serialize API response","recoverable":false},"schema_version":"v1","timestamp":null}"#;

impl<T: Serialize> ApiResponse<T> {
    /// Serialize the envelope. A payload that fails to serialize is reported
    /// as a `SERIALIZATION_ERROR` response.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            error!("Failed to serialize API response: {}", e);
            let error = ApiError::from(&LineupError::from(e));
            serde_json::to_string(&ApiResponse::<()>::error(error))
                .unwrap_or_else(|_| SERIALIZATION_FAILURE_JSON.to_string())
        })
    }
}

/// Current lineup of a session as `ApiResponse<LineupView>`.
pub fn lineup_view_json(session: &FormationSession<'_>) -> String {
    match LineupView::from_session(session) {
        Ok(view) => {
            debug!("Rendering lineup view for {} ({})", view.formation, view.phase);
            ApiResponse::success(view).to_json()
        }
        Err(e) => {
            error!("Failed to build lineup view: {}", e);
            ApiResponse::<LineupView>::error(ApiError::from(&e)).to_json()
        }
    }
}

/// Ratings for one player given as JSON, as `ApiResponse<PlayerRatingView>`.
pub fn player_ratings_json(player_json: &str) -> String {
    let player: Player = match serde_json::from_str(player_json) {
        Ok(player) => player,
        Err(e) => {
            warn!("Failed to parse player for rating: {}", e);
            let error = ApiError::from(&LineupError::from(e));
            return ApiResponse::<PlayerRatingView>::error(error).to_json();
        }
    };

    debug!("Rating player {}", player.id);
    ApiResponse::success(PlayerRatingView::for_player(&Arc::new(player))).to_json()
}

/// Registered formations as `ApiResponse<Vec<FormationSummary>>`.
pub fn formations_json() -> String {
    match FormationCatalog::builtin() {
        Ok(catalog) => {
            let summaries: Vec<FormationSummary> =
                catalog.templates().iter().map(FormationSummary::from).collect();
            ApiResponse::success(summaries).to_json()
        }
        Err(e) => {
            error!("Formation catalog unavailable: {}", e);
            ApiResponse::<Vec<FormationSummary>>::error(ApiError::from(&e)).to_json()
        }
    }
}
