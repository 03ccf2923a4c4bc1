//! Draws detection results onto a canvas image and summarizes them.

use std::fmt;

use crate::image::Image;
use crate::{body, face, hand};

/// Fixed summary text reported for an image that has no pixels.
const NOT_LOADED: &str = "Image not loaded!";

/// Renders detection results onto `canvas` and returns a per-image [`Summary`].
///
/// The canvas is resized to the image's dimensions and overwritten with the image itself before
/// any overlays are drawn; prior canvas contents are never read. Results are then drawn in a
/// fixed order: faces, bodies, hands.
///
/// If `image` has zero width or height, nothing is drawn (the canvas is left untouched) and
/// [`Summary::NotLoaded`] is returned. This is the only error path; the inputs cannot otherwise
/// be invalid.
pub fn annotate(
    image: &Image,
    canvas: &mut Image,
    faces: &[face::Detection],
    bodies: &[body::Detection],
    hands: &[hand::Detection],
) -> Summary {
    if image.width() == 0 || image.height() == 0 {
        return Summary::NotLoaded;
    }

    *canvas = image.clone();

    for detection in faces {
        detection.draw(canvas);
    }
    for detection in bodies {
        detection.draw(canvas);
    }
    for detection in hands {
        detection.draw(canvas);
    }

    Summary::Report(Report {
        faces: faces.iter().map(|det| det.confidence()).collect(),
        bodies: bodies.iter().map(|det| det.confidence()).collect(),
        hands: hands.iter().map(|det| det.confidence()).collect(),
    })
}

/// The outcome of [`annotate`] for one image.
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    /// The image was not fully decoded; nothing was drawn.
    NotLoaded,
    /// Per-family detection counts and confidences.
    Report(Report),
}

/// Detection counts and per-instance confidences, in detection order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Report {
    faces: Vec<f32>,
    bodies: Vec<f32>,
    hands: Vec<f32>,
}

impl Report {
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn hand_count(&self) -> usize {
        self.hands.len()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = match self {
            Summary::NotLoaded => return f.write_str(NOT_LOADED),
            Summary::Report(report) => report,
        };

        writeln!(f, "Faces detected: {}", report.faces.len())?;
        for (i, confidence) in report.faces.iter().enumerate() {
            writeln!(f, "Face {} confidence: {:.1}%", i + 1, confidence * 100.0)?;
        }
        writeln!(f, "Bodies detected: {}", report.bodies.len())?;
        for (i, confidence) in report.bodies.iter().enumerate() {
            writeln!(f, "Body {} confidence: {:.1}%", i + 1, confidence * 100.0)?;
        }
        writeln!(f, "Hands detected: {}", report.hands.len())?;
        for (i, confidence) in report.hands.iter().enumerate() {
            writeln!(f, "Hand {} confidence: {:.1}%", i + 1, confidence * 100.0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Rect;
    use crate::landmark::{Landmark, Landmarks};

    fn base_image() -> Image {
        Image::from_rgba8(8, 8, &[255; 8 * 8 * 4])
    }

    fn mk_face(confidence: f32) -> face::Detection {
        face::Detection::new(
            Rect::from_top_left(1, 1, 4, 4),
            Landmarks::new(face::NUM_LANDMARKS),
            confidence,
        )
    }

    #[test]
    fn not_loaded_image_leaves_canvas_untouched() {
        let image = Image::new(0, 0);
        let mut canvas = base_image();
        let before = canvas.data().to_vec();

        let summary = annotate(&image, &mut canvas, &[mk_face(0.9)], &[], &[]);

        assert_eq!(summary, Summary::NotLoaded);
        assert_eq!(summary.to_string(), "Image not loaded!");
        assert_eq!(canvas.data(), &before[..]);
    }

    #[test]
    fn zero_detections_reports_zero_counts() {
        let image = base_image();
        let mut canvas = Image::new(0, 0);

        let summary = annotate(&image, &mut canvas, &[], &[], &[]);

        assert_eq!(
            summary.to_string(),
            "Faces detected: 0\nBodies detected: 0\nHands detected: 0\n"
        );
        assert_eq!(canvas.data(), image.data());
    }

    #[test]
    fn one_line_per_face_with_one_decimal() {
        let image = base_image();
        let mut canvas = Image::new(0, 0);

        let summary = annotate(
            &image,
            &mut canvas,
            &[mk_face(0.876), mk_face(0.5), mk_face(0.123)],
            &[],
            &[],
        );

        let text = summary.to_string();
        assert_eq!(text.lines().filter(|l| l.starts_with("Face ")).count(), 3);
        assert!(text.contains("Faces detected: 3"));
        assert!(text.contains("Face 1 confidence: 87.6%"));
        assert!(text.contains("Face 2 confidence: 50.0%"));
        assert!(text.contains("Face 3 confidence: 12.3%"));
    }

    #[test]
    fn summary_keeps_detection_order() {
        let image = base_image();
        let mut canvas = Image::new(0, 0);

        let mut keypoints = Landmarks::new(body::NUM_KEYPOINTS);
        for i in 0..body::NUM_KEYPOINTS {
            keypoints.set(i, Landmark::new([1.0, 1.0]).with_score(0.0));
        }
        let bodies = [body::Detection::new(keypoints, 0.91)];
        let hands = [hand::Detection::new(
            Landmarks::new(hand::NUM_LANDMARKS),
            0.99,
        )];

        let summary = annotate(&image, &mut canvas, &[mk_face(0.8)], &bodies, &hands);
        let text = summary.to_string();

        let face_at = text.find("Face 1 confidence").unwrap();
        let body_at = text.find("Body 1 confidence: 91.0%").unwrap();
        let hand_at = text.find("Hand 1 confidence: 99.0%").unwrap();
        assert!(face_at < body_at && body_at < hand_at);
    }

    #[test]
    fn annotation_is_idempotent() {
        let image = base_image();
        let faces = [mk_face(0.8)];
        let hands = [hand::Detection::new(
            Landmarks::new(hand::NUM_LANDMARKS),
            0.5,
        )];

        let mut first = Image::new(0, 0);
        let mut second = base_image();
        annotate(&image, &mut first, &faces, &[], &hands);
        annotate(&image, &mut second, &faces, &[], &hands);

        assert_eq!(first.data(), second.data());
    }
}
