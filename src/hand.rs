//! Hand pose detection results in the 21-point MediaPipe hand layout.

use crate::image::{draw, Color, Image};
use crate::landmark::{Landmark, Landmarks};

/// Number of landmarks carried by every hand [`Detection`].
pub const NUM_LANDMARKS: usize = 21;

const COLOR: Color = Color::from_rgb8(255, 165, 0);
const MARK_SIZE: u32 = 9;
const STROKE_WIDTH: u32 = 2;

/// Names for the hand pose landmarks.
///
/// # Terminology
///
/// - **CMC**: [Carpometacarpal joint], the lowest joint of the thumb, located near the wrist.
/// - **MCP**: [Metacarpophalangeal joint], the lower joint forming the knuckles near the palm of
///   the hand.
/// - **PIP**: Proximal Interphalangeal joint, the joint between the MCP and DIP.
/// - **DIP**: Distal Interphalangeal joint, the highest joint of a finger.
/// - **Tip**: This landmark is just placed on the tip of the finger, above the DIP.
///
/// [Carpometacarpal joint]: https://en.wikipedia.org/wiki/Carpometacarpal_joint
/// [Metacarpophalangeal joint]: https://en.wikipedia.org/wiki/Metacarpophalangeal_joint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkIdx {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexFingerMcp,
    IndexFingerPip,
    IndexFingerDip,
    IndexFingerTip,
    MiddleFingerMcp,
    MiddleFingerPip,
    MiddleFingerDip,
    MiddleFingerTip,
    RingFingerMcp,
    RingFingerPip,
    RingFingerDip,
    RingFingerTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// Edges drawn between hand landmarks: the thumb and finger chains, each anchored at the wrist.
pub const CONNECTIVITY: &[(LandmarkIdx, LandmarkIdx)] = {
    use LandmarkIdx::*;
    &[
        // Thumb:
        (Wrist, ThumbCmc),
        (ThumbCmc, ThumbMcp),
        (ThumbMcp, ThumbIp),
        (ThumbIp, ThumbTip),
        // Index:
        (Wrist, IndexFingerMcp),
        (IndexFingerMcp, IndexFingerPip),
        (IndexFingerPip, IndexFingerDip),
        (IndexFingerDip, IndexFingerTip),
        // Middle:
        (Wrist, MiddleFingerMcp),
        (MiddleFingerMcp, MiddleFingerPip),
        (MiddleFingerPip, MiddleFingerDip),
        (MiddleFingerDip, MiddleFingerTip),
        // Ring:
        (Wrist, RingFingerMcp),
        (RingFingerMcp, RingFingerPip),
        (RingFingerPip, RingFingerDip),
        (RingFingerDip, RingFingerTip),
        // Pinky:
        (Wrist, PinkyMcp),
        (PinkyMcp, PinkyPip),
        (PinkyPip, PinkyDip),
        (PinkyDip, PinkyTip),
    ]
};

/// A detected hand: 21 landmark positions and an in-view confidence.
///
/// The hand model emits no per-landmark scores.
#[derive(Debug, Clone)]
pub struct Detection {
    landmarks: Landmarks,
    confidence: f32,
}

impl Detection {
    /// Creates a hand pose detection from a detector's output.
    ///
    /// # Panics
    ///
    /// This method panics if `landmarks` does not contain exactly [`NUM_LANDMARKS`] entries.
    pub fn new(landmarks: Landmarks, confidence: f32) -> Self {
        assert_eq!(
            landmarks.len(),
            NUM_LANDMARKS,
            "hand detections carry {NUM_LANDMARKS} landmarks"
        );
        Self {
            landmarks,
            confidence,
        }
    }

    pub fn landmarks(&self) -> &Landmarks {
        &self.landmarks
    }

    pub fn get(&self, i: LandmarkIdx) -> Landmark {
        self.landmarks.get(i as usize)
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Draws all landmark markers and edges onto `target`, unconditionally.
    pub fn draw(&self, target: &mut Image) {
        for &[x, y] in self.landmarks.positions() {
            draw::marker(target, x.round() as i32, y.round() as i32)
                .color(COLOR)
                .size(MARK_SIZE);
        }

        for &(a, b) in CONNECTIVITY {
            let a = self.get(a);
            let b = self.get(b);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectivity_covers_all_landmarks() {
        assert_eq!(CONNECTIVITY.len(), 20);
        let mut seen = [false; NUM_LANDMARKS];
        for &(a, b) in CONNECTIVITY {
            assert!((a as usize) < NUM_LANDMARKS);
            assert!((b as usize) < NUM_LANDMARKS);
            seen[a as usize] = true;
            seen[b as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn finger_chains_anchor_at_wrist() {
        let spokes = CONNECTIVITY
            .iter()
            .filter(|(a, _)| *a == LandmarkIdx::Wrist)
            .count();
        assert_eq!(spokes, 5);
    }
}
