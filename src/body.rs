//! Body pose detection results in the 17-keypoint MoveNet layout.

use crate::image::{draw, Color, Image};
use crate::landmark::{Landmark, Landmarks};

/// Number of keypoints carried by every body [`Detection`].
pub const NUM_KEYPOINTS: usize = 17;

/// Minimum keypoint score required to render a keypoint marker or skeleton edge.
///
/// The comparison is a strict inequality: a score of exactly 0.3 is not rendered.
pub const VISIBILITY_THRESHOLD: f32 = 0.3;

const COLOR: Color = Color::GREEN;
const MARK_SIZE: u32 = 9;
const STROKE_WIDTH: u32 = 2;

/// Names for the body pose keypoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypointIdx {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

/// Skeleton edges drawn between body keypoints.
pub const CONNECTIVITY: &[(KeypointIdx, KeypointIdx)] = {
    use KeypointIdx::*;
    &[
        // Head:
        (Nose, LeftEye),
        (LeftEye, LeftEar),
        (Nose, RightEye),
        (RightEye, RightEar),
        // Arms:
        (Nose, LeftShoulder),
        (LeftShoulder, LeftElbow),
        (LeftElbow, LeftWrist),
        (Nose, RightShoulder),
        (RightShoulder, RightElbow),
        (RightElbow, RightWrist),
        // Torso:
        (LeftShoulder, RightShoulder),
        (LeftShoulder, LeftHip),
        (RightShoulder, RightHip),
        (LeftHip, RightHip),
        // Legs:
        (LeftHip, LeftKnee),
        (LeftKnee, LeftAnkle),
        (RightHip, RightKnee),
        (RightKnee, RightAnkle),
    ]
};

/// A detected body pose: 17 scored keypoints and an overall confidence.
#[derive(Debug, Clone)]
pub struct Detection {
    keypoints: Landmarks,
    confidence: f32,
}

impl Detection {
    /// Creates a body pose detection from a detector's output.
    ///
    /// # Panics
    ///
    /// This method panics if `keypoints` does not contain exactly [`NUM_KEYPOINTS`] entries, or
    /// if it carries no per-keypoint scores.
    pub fn new(keypoints: Landmarks, confidence: f32) -> Self {
        assert_eq!(
            keypoints.len(),
            NUM_KEYPOINTS,
            "body detections carry {NUM_KEYPOINTS} keypoints"
        );
        assert!(
            keypoints.scores().is_some(),
            "body keypoints carry per-keypoint scores"
        );
        Self {
            keypoints,
            confidence,
        }
    }

    pub fn keypoints(&self) -> &Landmarks {
        &self.keypoints
    }

    pub fn get(&self, i: KeypointIdx) -> Landmark {
        self.keypoints.get(i as usize)
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Draws visible keypoints and skeleton edges onto `target`.
    ///
    /// A keypoint is rendered only if its score exceeds [`VISIBILITY_THRESHOLD`]; an edge is
    /// rendered only if the scores of *both* of its endpoints do.
    pub fn draw(&self, target: &mut Image) {
        for kp in self.keypoints.iter() {
            if visible(kp) {
                draw::marker(target, kp.x().round() as i32, kp.y().round() as i32)
                    .color(COLOR)
                    .size(MARK_SIZE);
            }
        }

        for &(a, b) in CONNECTIVITY {
            let a = self.get(a);
            let b = self.get(b);
            if visible(a) && visible(b) {
                draw::line(
                    target,
                    a.x().round() as i32,
                    a.y().round() as i32,
                    b.x().round() as i32,
                    b.y().round() as i32,
                )
                .color(COLOR)
                .stroke_width(STROKE_WIDTH);
            }
        }
    }
}

fn visible(kp: Landmark) -> bool {
    kp.score().map_or(false, |score| score > VISIBILITY_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectivity_covers_all_keypoints() {
        assert_eq!(CONNECTIVITY.len(), 18);
        let mut seen = [false; NUM_KEYPOINTS];
        for &(a, b) in CONNECTIVITY {
            seen[a as usize] = true;
            seen[b as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn visibility_threshold_is_strict() {
        let at = Landmark::new([0.0, 0.0]).with_score(VISIBILITY_THRESHOLD);
        let above = Landmark::new([0.0, 0.0]).with_score(VISIBILITY_THRESHOLD + 0.01);
        let unscored = Landmark::new([0.0, 0.0]);
        assert!(!visible(at));
        assert!(visible(above));
        assert!(!visible(unscored));
    }

    #[test]
    #[should_panic(expected = "per-keypoint scores")]
    fn rejects_unscored_keypoints() {
        Detection::new(Landmarks::new(NUM_KEYPOINTS), 1.0);
    }
}
