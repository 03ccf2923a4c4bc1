//! Face detection results.
//!
//! Faces use the [68 facial landmark points] popularized by the now defunct Multi-PIE dataset:
//! a bounding box, 68 landmark positions, and an overall confidence value.
//!
//! [68 facial landmark points]: https://ibug.doc.ic.ac.uk/media/uploads/images/annotpics/figure_68_markup.jpg

use std::ops::RangeInclusive;

use itertools::Itertools;

use crate::image::{draw, Color, Image, Rect};
use crate::landmark::Landmarks;

/// Number of landmarks carried by every face [`Detection`].
pub const NUM_LANDMARKS: usize = 68;

const BOX_COLOR: Color = Color::RED;
const MARK_COLOR: Color = Color::BLUE;
const MARK_SIZE: u32 = 5;
const STROKE_WIDTH: u32 = 2;

/// A contiguous run of face landmarks that is drawn as a connected contour.
///
/// Contours connect consecutive landmark indices within the run. They are *not* closed into
/// loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Jaw,
    LeftEye,
    RightEye,
    LeftEyebrow,
    RightEyebrow,
    Nose,
    OuterLips,
    InnerLips,
}

/// All face regions, in draw order.
pub const REGIONS: [Region; 8] = [
    Region::Jaw,
    Region::LeftEye,
    Region::RightEye,
    Region::LeftEyebrow,
    Region::RightEyebrow,
    Region::Nose,
    Region::OuterLips,
    Region::InnerLips,
];

impl Region {
    /// Returns the range of landmark indices covered by this region.
    pub fn landmark_range(self) -> RangeInclusive<usize> {
        match self {
            Region::Jaw => 0..=16,
            Region::LeftEye => 36..=41,
            Region::RightEye => 42..=47,
            Region::LeftEyebrow => 17..=21,
            Region::RightEyebrow => 22..=26,
            Region::Nose => 27..=35,
            Region::OuterLips => 48..=59,
            Region::InnerLips => 60..=67,
        }
    }
}

/// A detected face: bounding box, landmark positions, and overall confidence.
#[derive(Debug, Clone)]
pub struct Detection {
    rect: Rect,
    landmarks: Landmarks,
    confidence: f32,
}

impl Detection {
    /// Creates a face detection from a detector's output.
    ///
    /// # Panics
    ///
    /// This method panics if `landmarks` does not contain exactly [`NUM_LANDMARKS`] entries.
    pub fn new(rect: Rect, landmarks: Landmarks, confidence: f32) -> Self {
        assert_eq!(
            landmarks.len(),
            NUM_LANDMARKS,
            "face detections carry {NUM_LANDMARKS} landmarks"
        );
        Self {
            rect,
            landmarks,
            confidence,
        }
    }

    /// Returns the axis-aligned bounding rectangle containing the detected face.
    pub fn bounding_rect(&self) -> Rect {
        self.rect
    }

    pub fn landmarks(&self) -> &Landmarks {
        &self.landmarks
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Draws the bounding box, landmark markers, and region contours onto `target`.
    pub fn draw(&self, target: &mut Image) {
        draw::rect(target, self.rect)
            .color(BOX_COLOR)
            .stroke_width(STROKE_WIDTH);

        for &[x, y] in self.landmarks.positions() {
            draw::marker(target, x.round() as i32, y.round() as i32)
                .color(MARK_COLOR)
                .size(MARK_SIZE);
        }

        for region in REGIONS {
            let run = &self.landmarks.positions()[region.landmark_range()];
            for (&[x1, y1], &[x2, y2]) in run.iter().tuple_windows() {
                draw::line(
                    target,
                    x1.round() as i32,
                    y1.round() as i32,
                    x2.round() as i32,
                    y2.round() as i32,
                )
                .color(MARK_COLOR)
                .stroke_width(STROKE_WIDTH);
            }
        }
    }
}
