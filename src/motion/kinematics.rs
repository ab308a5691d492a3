use crate::motion::types::Frame;

/// Frame-to-frame velocity and acceleration scalars for a sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Kinematics {
    /// Mean keypoint speed between consecutive frames (units per second)
    pub velocities: Vec<f64>,

    /// First difference of `velocities` (units per second, per step)
    pub accelerations: Vec<f64>,
}

impl Kinematics {
    /// Derive velocities and accelerations from a frame sequence
    ///
    /// `default_frame_interval` stands in for `dt` whenever a timestamp does
    /// not advance.
    pub fn from_frames(frames: &[Frame], default_frame_interval: f64) -> Self {
        let velocities = velocities(frames, default_frame_interval);
        let accelerations = accelerations(&velocities);
        Self { velocities, accelerations }
    }
}

/// Average keypoint speed between each pair of consecutive frames
///
/// Returns `[0.0]` when there are fewer than two frames. Keypoints are paired
/// by index up to the shorter of the two frames.
pub fn velocities(frames: &[Frame], default_frame_interval: f64) -> Vec<f64> {
    if frames.len() < 2 {
        return vec![0.0];
    }

    frames
        .windows(2)
        .map(|pair| {
            let (prev, curr) = (&pair[0], &pair[1]);

            let mut dt = curr.timestamp - prev.timestamp;
            if dt <= 0.0 {
                dt = default_frame_interval;
            }

            let (displacement, count) = curr
                .keypoints
                .iter()
                .zip(prev.keypoints.iter())
                .fold((0.0, 0usize), |(sum, n), (a, b)| (sum + a.distance_to(b), n + 1));

            let avg_displacement = displacement / count.max(1) as f64;
            avg_displacement / dt
        })
        .collect()
}

/// Step-to-step change in velocity
///
/// Not divided by `dt`; returns `[0.0]` when fewer than two velocities exist.
pub fn accelerations(velocities: &[f64]) -> Vec<f64> {
    if velocities.len() < 2 {
        return vec![0.0];
    }

    velocities.windows(2).map(|pair| pair[1] - pair[0]).collect()
}
