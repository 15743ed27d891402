use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineupError {
    #[error("Unknown formation: {0}")]
    UnknownFormation(String),

    #[error("Roster data unavailable: {0}")]
    FetchFailure(String),

    #[error("Player {player_id} is missing attributes: {}", missing.join(", "))]
    InvalidAttributes { player_id: String, missing: Vec<String> },

    #[error("Malformed formation template: {0}")]
    MalformedTemplate(String),

    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LineupError {
    /// Stable error code for presentation clients.
    pub fn code(&self) -> &'static str {
        match self {
            LineupError::UnknownFormation(_) => "UNKNOWN_FORMATION",
            LineupError::FetchFailure(_) => "FETCH_FAILURE",
            LineupError::InvalidAttributes { .. } => "INVALID_ATTRIBUTES",
            LineupError::MalformedTemplate(_) => "MALFORMED_TEMPLATE",
            LineupError::UnknownPlayer(_) => "UNKNOWN_PLAYER",
            LineupError::InvalidConfig(_) => "INVALID_CONFIG",
            LineupError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Whether the user can get out of this error without restarting the session.
    pub fn is_recoverable(&self) -> bool {
        match self {
            LineupError::UnknownFormation(_) => true,
            LineupError::FetchFailure(_) => true, // next roster update clears it
            LineupError::InvalidAttributes { .. } => true,
            LineupError::UnknownPlayer(_) => true,
            LineupError::MalformedTemplate(_) => false,
            LineupError::InvalidConfig(_) => false,
            LineupError::Serialization(_) => false,
        }
    }
}

impl From<serde_json::Error> for LineupError {
    fn from(err: serde_json::Error) -> Self {
        LineupError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LineupError>;
