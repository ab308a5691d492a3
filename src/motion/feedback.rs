use crate::motion::types::{
    FeedbackCategory, FeedbackItem, FeedbackThresholds, MovementMetrics, Severity, TimingMetrics,
};

/// Turn metrics into coaching messages
///
/// Rules are evaluated in a fixed order (timing, smoothness, energy,
/// posture, accuracy) and any number may fire. The result is never empty:
/// when no rule fires a single congratulatory item is returned.
pub fn generate_feedback(
    timing: &TimingMetrics,
    movement: &MovementMetrics,
    thresholds: &FeedbackThresholds,
) -> Vec<FeedbackItem> {
    let mut feedback = Vec::new();

    if timing.sync_score < thresholds.sync_warning {
        feedback.push(FeedbackItem::new(
            FeedbackCategory::Timing,
            Severity::Warning,
            format!(
                "Your timing is off. Try to sync your movements with the beat. \
                 You're hitting {:.1}% of beats on time.",
                timing.on_beat_percentage
            ),
        ));
    } else if timing.sync_score >= thresholds.sync_praise {
        feedback.push(FeedbackItem::new(
            FeedbackCategory::Timing,
            Severity::Info,
            "Excellent timing! You're perfectly synced with the music.",
        ));
    }

    if movement.smoothness_score < thresholds.smoothness_warning {
        feedback.push(FeedbackItem::new(
            FeedbackCategory::Form,
            Severity::Warning,
            "Your movements are a bit jerky. Focus on flowing smoothly between positions.",
        ));
    }

    if movement.energy_score < thresholds.energy_low {
        feedback.push(FeedbackItem::new(
            FeedbackCategory::Energy,
            Severity::Info,
            "Put more energy into your movements! Go bigger and stronger.",
        ));
    } else if movement.energy_score > thresholds.energy_high {
        feedback.push(FeedbackItem::new(
            FeedbackCategory::Energy,
            Severity::Info,
            "Great energy! Keep up that intensity.",
        ));
    }

    if movement.form_score < thresholds.form_warning {
        feedback.push(FeedbackItem::new(
            FeedbackCategory::Form,
            Severity::Warning,
            "Pay attention to your posture and alignment. Keep your core engaged.",
        ));
    }

    if movement.accuracy_score < thresholds.accuracy_warning {
        feedback.push(FeedbackItem::new(
            FeedbackCategory::Accuracy,
            Severity::Warning,
            "Your movements are inconsistent. Try to replicate the reference motion more precisely.",
        ));
    }

    if feedback.is_empty() {
        feedback.push(FeedbackItem::new(
            FeedbackCategory::Overall,
            Severity::Info,
            "Outstanding performance! All metrics look great.",
        ));
    }

    feedback
}
