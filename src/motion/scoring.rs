use crate::motion::types::{MovementMetrics, ScoringWeights, TimingMetrics};

/// Weighted combination of all metrics on a 0-100 scale
pub fn overall_score(timing: &TimingMetrics, movement: &MovementMetrics, weights: &ScoringWeights) -> f64 {
    let score = (weights.timing * timing.sync_score
        + weights.smoothness * movement.smoothness_score
        + weights.accuracy * movement.accuracy_score
        + weights.energy * movement.energy_score
        + weights.form * movement.form_score)
        * 100.0;

    score.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(value: f64) -> (TimingMetrics, MovementMetrics) {
        (
            TimingMetrics {
                avg_lag_ms: 0.0,
                sync_score: value,
                on_beat_percentage: 100.0,
            },
            MovementMetrics {
                smoothness_score: value,
                accuracy_score: value,
                energy_score: value,
                form_score: value,
            },
        )
    }

    #[test]
    fn test_weights_conserve_full_and_empty_scores() {
        let weights = ScoringWeights::default();

        let (timing, movement) = uniform(1.0);
        assert_eq!(overall_score(&timing, &movement, &weights), 100.0);

        let (timing, movement) = uniform(0.0);
        assert_eq!(overall_score(&timing, &movement, &weights), 0.0);
    }

    #[test]
    fn test_fallback_form_scenario() {
        let (timing, mut movement) = uniform(1.0);
        movement.form_score = 0.8;
        assert_eq!(overall_score(&timing, &movement, &ScoringWeights::default()), 97.0);
    }

    #[test]
    fn test_timing_weight() {
        let (mut timing, movement) = uniform(1.0);
        timing.sync_score = 0.0;
        let score = overall_score(&timing, &movement, &ScoringWeights::default());
        assert!((score - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_is_clipped() {
        let weights = ScoringWeights {
            timing: 2.0,
            ..Default::default()
        };
        let (timing, movement) = uniform(1.0);
        assert_eq!(overall_score(&timing, &movement, &weights), 100.0);
    }
}
