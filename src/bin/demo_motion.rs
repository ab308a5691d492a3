// Demo binary that scores synthetic recordings end to end

use stepflow_motion::{
    config::Config,
    motion::{Frame, KeyPoint, MotionData, PredictionResult},
    prediction::PredictionEngine,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("💃 Testing StepFlow Motion Scoring");

    let engine = PredictionEngine::new(Config::default());

    // Test 1: Two landmarks drifting apart at 120 BPM
    println!("\n1. Basic motion at 120 BPM...");
    let basic = MotionData::new(
        (0..10)
            .map(|i| {
                let step = i as f64 * 0.01;
                Frame::new(
                    i as f64 * 0.033,
                    vec![
                        KeyPoint::new(0.5 + step, 0.5 + step).with_confidence(0.9),
                        KeyPoint::new(0.4 - step, 0.6 + step).with_confidence(0.85),
                    ],
                )
            })
            .collect(),
    )
    .with_bpm(120.0);
    print_result(&engine.predict(&basic)?);

    // Test 2: Fast single-landmark sweep, no tempo
    println!("\n2. High-energy motion...");
    let high_energy = MotionData::new(
        (0..20)
            .map(|i| {
                let step = i as f64 * 0.05;
                Frame::new(i as f64 * 0.033, vec![KeyPoint::new(0.5 + step, 0.5 + step).with_confidence(0.9)])
            })
            .collect(),
    );
    print_result(&engine.predict(&high_energy)?);

    // Test 3: Three seconds of a 17-landmark body bouncing on the beat
    println!("\n3. Three-second performance at 100 BPM...");
    let bpm = 100.0;
    let beat_interval = 60.0 / bpm;
    let performance = MotionData::new(
        (0..90)
            .map(|i| {
                let t = i as f64 / 30.0;
                let phase = (t % beat_interval) / beat_interval;
                let bounce = 0.05 * (1.0 - phase).powi(4);
                let keypoints = (0..17)
                    .map(|j| {
                        let x = 0.3 + 0.4 * (j as f64 / 16.0);
                        let y = 0.2 + 0.03 * j as f64 + bounce;
                        KeyPoint::new(x, y).with_z(0.0).with_confidence(0.8 + 0.01 * (j % 10) as f64)
                    })
                    .collect();
                Frame::new(t, keypoints)
            })
            .collect(),
    )
    .with_bpm(bpm);
    print_result(&engine.predict(&performance)?);

    println!("\n🎉 All motion scoring scenarios completed!");
    Ok(())
}

fn print_result(result: &PredictionResult) {
    println!("   ✅ Overall score: {:.2}/100", result.overall_score);
    println!(
        "   Timing: sync {:.0}%, lag {:.1}ms, on beat {:.1}%",
        result.timing_metrics.sync_score * 100.0,
        result.timing_metrics.avg_lag_ms,
        result.timing_metrics.on_beat_percentage
    );
    println!(
        "   Movement: smoothness {:.0}%, accuracy {:.0}%, energy {:.0}%, form {:.0}%",
        result.movement_metrics.smoothness_score * 100.0,
        result.movement_metrics.accuracy_score * 100.0,
        result.movement_metrics.energy_score * 100.0,
        result.movement_metrics.form_score * 100.0
    );
    println!("   Processing time: {:.2}ms", result.processing_time_ms);
    println!("   Feedback ({} items):", result.feedback.len());
    for item in &result.feedback {
        println!("     - [{}/{}] {}", item.category, item.severity, item.message);
    }
}
