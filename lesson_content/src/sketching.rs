//! Sketching challenges and the proportional ratio comparator.

use serde::{Deserialize, Serialize};

/// Maximum distance between a drawn ratio and its target that still counts as a match.
pub const RATIO_TOLERANCE: f64 = 0.15;

/// A target proportion such as 3:2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProportionalRatio {
    pub numerator: u32,
    pub denominator: u32,
}

impl ProportionalRatio {
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn value(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Check whether a drawn `width` x `height` shape has this proportion.
    ///
    /// Orientation does not matter: the shape matches if either
    /// `width / height` or `height / width` is within [`RATIO_TOLERANCE`] of
    /// the target. A shape with a non-positive side is still being drawn and
    /// never matches.
    pub fn matches(&self, width: f64, height: f64) -> bool {
        if width <= 0.0 || height <= 0.0 || self.numerator == 0 || self.denominator == 0 {
            return false;
        }

        let target = self.value();
        let actual = width / height;
        let inverse = height / width;

        (actual - target).abs() < RATIO_TOLERANCE || (inverse - target).abs() < RATIO_TOLERANCE
    }
}

impl std::fmt::Display for ProportionalRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.numerator, self.denominator)
    }
}

/// Geometry a player must reproduce when sketching a building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SketchChallenge {
    pub building_name: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub ratios: Vec<ProportionalRatio>,
}

impl SketchChallenge {
    /// The first target ratio the shape satisfies, if any.
    pub fn matching_ratio(&self, width: f64, height: f64) -> Option<ProportionalRatio> {
        self.ratios.iter().copied().find(|r| r.matches(width, height))
    }

    pub fn ratio_matches_any(&self, width: f64, height: f64) -> bool {
        self.matching_ratio(width, height).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_ratio_matches() {
        assert!(ProportionalRatio::new(3, 2).matches(6.0, 4.0));
    }

    #[test]
    fn test_orientation_insensitive() {
        assert!(ProportionalRatio::new(3, 2).matches(4.0, 6.0));
    }

    #[test]
    fn test_distant_ratio_rejected() {
        assert!(!ProportionalRatio::new(3, 2).matches(10.0, 1.0));
    }

    #[test]
    fn test_non_positive_sides_rejected() {
        let square = ProportionalRatio::new(1, 1);
        assert!(!square.matches(0.0, 5.0));
        assert!(!square.matches(5.0, 0.0));
        assert!(!square.matches(-3.0, -3.0));
    }

    #[test]
    fn test_tolerance_boundary() {
        let square = ProportionalRatio::new(1, 1);
        assert!(square.matches(1.1, 1.0));
        assert!(!square.matches(1.2, 1.0));
    }

    #[test]
    fn test_challenge_matching_ratio() {
        let challenge = SketchChallenge {
            building_name: "Forum".into(),
            title: "Lay out the forum".into(),
            description: "Vitruvius recommends a 3:2 plan.".into(),
            ratios: vec![ProportionalRatio::new(1, 1), ProportionalRatio::new(3, 2)],
        };

        assert_eq!(challenge.matching_ratio(30.0, 20.0), Some(ProportionalRatio::new(3, 2)));
        assert!(challenge.ratio_matches_any(10.0, 10.0));
        assert!(!challenge.ratio_matches_any(50.0, 10.0));
    }
}
