//! Player rating calculations
//!
//! Two independent pure computations:
//! - category averages, tolerant of missing attributes
//! - the goalkeeper composite, strict about missing attributes

pub mod categories;
pub mod goalkeeper;

pub use categories::{CategoryAverages, SkillCategory};
pub use goalkeeper::{
    goalkeeper_rating, required_attributes, GoalkeeperRating, RatingTerm, WeightedTerm,
    GOALKEEPER_WEIGHTS, WEIGHT_SCALE,
};

use crate::error::Result;
use crate::models::Player;

/// Placeholder shown for a rating that cannot be computed.
pub const NOT_AVAILABLE: &str = "N/A";

/// Entry point for on-demand ratings.
pub struct RatingCalculator;

impl RatingCalculator {
    pub fn category_averages(player: &Player) -> CategoryAverages {
        CategoryAverages::for_player(player)
    }

    pub fn goalkeeper_rating(player: &Player) -> Result<GoalkeeperRating> {
        goalkeeper_rating(player)
    }

    /// Rating text for display: one decimal, or `N/A` on error.
    pub fn rating_label(rating: &Result<GoalkeeperRating>) -> String {
        match rating {
            Ok(rating) => rating.to_string(),
            Err(_) => NOT_AVAILABLE.to_string(),
        }
    }
}
