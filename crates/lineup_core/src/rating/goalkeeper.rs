//! Goalkeeper composite rating
//!
//! Fixed weighted sum over nine terms. Weights are stored in hundredths so the
//! total is exactly 100. Unlike category averages, every input is mandatory.

use crate::error::{LineupError, Result};
use crate::models::{Attribute, Player};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One term of the formula: a single attribute or the mean of two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTerm {
    Single(Attribute),
    Mean(Attribute, Attribute),
}

impl RatingTerm {
    fn inputs(&self) -> impl Iterator<Item = Attribute> {
        let (first, second) = match *self {
            RatingTerm::Single(a) => (a, None),
            RatingTerm::Mean(a, b) => (a, Some(b)),
        };
        std::iter::once(first).chain(second)
    }

    fn value(&self, player: &Player) -> Option<f64> {
        let get = |a: Attribute| player.attributes.get(a).map(f64::from);
        match *self {
            RatingTerm::Single(a) => get(a),
            RatingTerm::Mean(a, b) => Some((get(a)? + get(b)?) / 2.0),
        }
    }
}

/// Term weight in hundredths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedTerm {
    pub term: RatingTerm,
    pub weight: u32,
}

const fn single(attribute: Attribute, weight: u32) -> WeightedTerm {
    WeightedTerm { term: RatingTerm::Single(attribute), weight }
}

const fn mean(a: Attribute, b: Attribute, weight: u32) -> WeightedTerm {
    WeightedTerm { term: RatingTerm::Mean(a, b), weight }
}

/// Denominator of every weight in [`GOALKEEPER_WEIGHTS`].
pub const WEIGHT_SCALE: u32 = 100;

pub const GOALKEEPER_WEIGHTS: [WeightedTerm; 9] = [
    single(Attribute::Reactions, 20),
    single(Attribute::Positioning, 15),
    single(Attribute::Jumping, 10),
    single(Attribute::Strength, 10),
    single(Attribute::Composure, 10),
    single(Attribute::Agility, 10),
    mean(Attribute::Acceleration, Attribute::SprintSpeed, 5),
    mean(Attribute::BallControl, Attribute::Strength, 10),
    mean(Attribute::ShortPassing, Attribute::LongPassing, 10),
];

/// Attributes the formula reads, in formula order, without repeats.
pub fn required_attributes() -> Vec<Attribute> {
    let mut required = Vec::new();
    for attribute in GOALKEEPER_WEIGHTS.iter().flat_map(|w| w.term.inputs()) {
        if !required.contains(&attribute) {
            required.push(attribute);
        }
    }
    required
}

/// Composite rating, already rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalkeeperRating(f64);

impl GoalkeeperRating {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for GoalkeeperRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Compute the composite rating, failing if any required attribute is absent.
pub fn goalkeeper_rating(player: &Player) -> Result<GoalkeeperRating> {
    let missing: Vec<String> = required_attributes()
        .into_iter()
        .filter(|a| player.attributes.get(*a).is_none())
        .map(|a| a.key().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LineupError::InvalidAttributes { player_id: player.id.clone(), missing });
    }

    let mut total = 0.0;
    for weighted in &GOALKEEPER_WEIGHTS {
        let value = weighted.term.value(player).ok_or_else(|| LineupError::InvalidAttributes {
            player_id: player.id.clone(),
            missing: weighted.term.inputs().map(|a| a.key().to_string()).collect(),
        })?;
        total += value * f64::from(weighted.weight);
    }

    let rating = total / f64::from(WEIGHT_SCALE);
    Ok(GoalkeeperRating((rating * 10.0).round() / 10.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayerAttributes, RoleCategory};

    fn keeper_with_all(value: u8) -> Player {
        let attributes = required_attributes()
            .into_iter()
            .fold(PlayerAttributes::default(), |attrs, a| attrs.with(a, value));
        Player::new("gk", "Keeper", RoleCategory::Goalkeeper).with_attributes(attributes)
    }

    #[test]
    fn test_weights_sum_to_one() {
        let total: u32 = GOALKEEPER_WEIGHTS.iter().map(|w| w.weight).sum();
        assert_eq!(total, WEIGHT_SCALE);
        assert_eq!(GOALKEEPER_WEIGHTS.len(), 9);
    }

    #[test]
    fn test_uniform_attributes_rate_at_that_value() {
        assert_eq!(goalkeeper_rating(&keeper_with_all(70)).unwrap().value(), 70.0);
        assert_eq!(goalkeeper_rating(&keeper_with_all(0)).unwrap().value(), 0.0);
        assert_eq!(goalkeeper_rating(&keeper_with_all(100)).unwrap().value(), 100.0);
    }

    #[test]
    fn test_formula_matches_hand_computation() {
        let player = Player::new("gk", "Keeper", RoleCategory::Goalkeeper)
            .with_attribute(Attribute::Reactions, 85)
            .with_attribute(Attribute::Positioning, 80)
            .with_attribute(Attribute::Jumping, 70)
            .with_attribute(Attribute::Strength, 65)
            .with_attribute(Attribute::Composure, 75)
            .with_attribute(Attribute::Agility, 72)
            .with_attribute(Attribute::Acceleration, 50)
            .with_attribute(Attribute::SprintSpeed, 55)
            .with_attribute(Attribute::BallControl, 40)
            .with_attribute(Attribute::ShortPassing, 60)
            .with_attribute(Attribute::LongPassing, 67);

        // 17.0 + 12.0 + 7.0 + 6.5 + 7.5 + 7.2 + 2.625 + 5.25 + 6.35 = 71.425
        let rating = goalkeeper_rating(&player).unwrap();
        assert_eq!(rating.value(), 71.4);
        assert_eq!(rating.to_string(), "71.4");
    }

    #[test]
    fn test_missing_attribute_is_an_error() {
        let mut player = keeper_with_all(60);
        player.attributes.set(Attribute::Reactions, None);
        player.attributes.set(Attribute::LongPassing, None);

        let err = goalkeeper_rating(&player).unwrap_err();
        assert_eq!(
            err,
            LineupError::InvalidAttributes {
                player_id: "gk".to_string(),
                missing: vec!["reactions".to_string(), "long_passing".to_string()],
            }
        );
    }

    #[test]
    fn test_required_attributes_are_deduplicated() {
        let required = required_attributes();
        assert_eq!(required.len(), 11);
        assert_eq!(required.iter().filter(|a| **a == Attribute::Strength).count(), 1);
    }

    #[test]
    fn test_display_keeps_one_decimal() {
        assert_eq!(goalkeeper_rating(&keeper_with_all(64)).unwrap().to_string(), "64.0");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: raising reactions never lowers the rating
            #[test]
            fn prop_monotonic_in_reactions(
                base in 0u8..=100,
                reactions in 0u8..100,
                bump in 1u8..=100
            ) {
                let mut low = keeper_with_all(base);
                low.attributes.set(Attribute::Reactions, Some(reactions));
                let mut high = low.clone();
                high.attributes.set(Attribute::Reactions, Some(reactions.saturating_add(bump).min(100)));

                let low = goalkeeper_rating(&low).unwrap();
                let high = goalkeeper_rating(&high).unwrap();
                prop_assert!(high.value() >= low.value());
            }

            /// Property: the rating stays within the attribute bounds
            #[test]
            fn prop_rating_within_bounds(value in 0u8..=100) {
                let rating = goalkeeper_rating(&keeper_with_all(value)).unwrap();
                prop_assert!((0.0..=100.0).contains(&rating.value()));
            }
        }
    }
}
