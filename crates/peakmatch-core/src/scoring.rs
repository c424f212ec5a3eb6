//! Move-count scoring.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Points lost for every move beyond the minimum.
pub const PENALTY_PER_EXTRA_MOVE: i64 = 5;

/// Score a finished quiz: 100 for a perfect run, minus five points per extra
/// move, never below zero.
///
/// `min_moves` is the number of items (one move per item in the ideal case).
pub fn score(moves: u32, min_moves: u32) -> u32 {
    let extra = i64::from(moves) - i64::from(min_moves);
    (100 - extra * PENALTY_PER_EXTRA_MOVE).clamp(0, 100) as u32
}

/// How well a score reads to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    Perfect,
    Excellent,
    Good,
    NeedsPractice,
}

impl ScoreTier {
    pub fn for_score(score: u32) -> Self {
        match score {
            100.. => ScoreTier::Perfect,
            80..=99 => ScoreTier::Excellent,
            50..=79 => ScoreTier::Good,
            _ => ScoreTier::NeedsPractice,
        }
    }

    /// The line shown under the final score.
    pub fn message(self) -> &'static str {
        match self {
            ScoreTier::Perfect => "Perfect! You matched them all in minimum moves!",
            ScoreTier::Excellent => "Excellent work! Almost perfect.",
            ScoreTier::Good => "Good job! You know your geography.",
            ScoreTier::NeedsPractice => "Keep practicing! You'll get better.",
        }
    }
}

impl fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreTier::Perfect => write!(f, "perfect"),
            ScoreTier::Excellent => write!(f, "excellent"),
            ScoreTier::Good => write!(f, "good"),
            ScoreTier::NeedsPractice => write!(f, "needs practice"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_reference_points() {
        assert_eq!(score(10, 10), 100);
        assert_eq!(score(14, 10), 80);
        assert_eq!(score(20, 10), 50);
        assert_eq!(score(30, 10), 0);
        assert_eq!(score(300, 10), 0);
    }

    #[test]
    fn score_never_exceeds_100() {
        assert_eq!(score(3, 10), 100);
        assert_eq!(score(0, 0), 100);
    }

    #[test]
    fn tier_boundaries_are_inclusive() {
        assert_eq!(ScoreTier::for_score(100), ScoreTier::Perfect);
        assert_eq!(ScoreTier::for_score(99), ScoreTier::Excellent);
        assert_eq!(ScoreTier::for_score(80), ScoreTier::Excellent);
        assert_eq!(ScoreTier::for_score(79), ScoreTier::Good);
        assert_eq!(ScoreTier::for_score(50), ScoreTier::Good);
        assert_eq!(ScoreTier::for_score(49), ScoreTier::NeedsPractice);
        assert_eq!(ScoreTier::for_score(0), ScoreTier::NeedsPractice);
    }

    #[test]
    fn tier_messages() {
        assert!(ScoreTier::Perfect.message().starts_with("Perfect!"));
        assert_eq!(ScoreTier::NeedsPractice.to_string(), "needs practice");
    }
}
