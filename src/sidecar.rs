//! JSON sidecar import for detection results.
//!
//! Model runtimes export one JSON document per image, holding the results of all three detector
//! families:
//!
//! ```json
//! {
//!     "faces": [
//!         {
//!             "box": { "x": 12.0, "y": 8.5, "width": 120.0, "height": 130.0 },
//!             "landmarks": [[14.2, 33.0], ...],
//!             "confidence": 0.97
//!         }
//!     ],
//!     "bodies": [
//!         {
//!             "keypoints": [{ "x": 80.0, "y": 40.0, "score": 0.81 }, ...],
//!             "confidence": 0.91
//!         }
//!     ],
//!     "hands": [
//!         { "landmarks": [[200.0, 310.0], ...], "confidence": 0.99 }
//!     ]
//! }
//! ```
//!
//! Faces carry 68 landmarks, bodies 17 scored keypoints, hands 21 landmarks; other counts are
//! rejected. All three lists may be omitted, and a missing sidecar file behaves like a document
//! with three empty lists.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use serde::Deserialize;

use crate::detector::{BodyDetector, FaceDetector, HandDetector};
use crate::image::{Image, Rect};
use crate::iter::zip_exact;
use crate::landmark::{Landmark, Landmarks};
use crate::{body, face, hand};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Document {
    #[serde(default)]
    faces: Vec<RawFace>,
    #[serde(default)]
    bodies: Vec<RawBody>,
    #[serde(default)]
    hands: Vec<RawHand>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFace {
    #[serde(rename = "box")]
    bounding_box: RawBox,
    landmarks: Vec<[f32; 2]>,
    confidence: f32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBox {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBody {
    keypoints: Vec<RawKeypoint>,
    confidence: f32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawKeypoint {
    x: f32,
    y: f32,
    score: f32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHand {
    landmarks: Vec<[f32; 2]>,
    confidence: f32,
}

impl RawFace {
    fn into_detection(self) -> anyhow::Result<face::Detection> {
        if self.landmarks.len() != face::NUM_LANDMARKS {
            bail!(
                "face detection has {} landmarks (expected {})",
                self.landmarks.len(),
                face::NUM_LANDMARKS
            );
        }

        let mut landmarks = Landmarks::new(face::NUM_LANDMARKS);
        for (slot, &[x, y]) in zip_exact(landmarks.positions_mut(), &self.landmarks) {
            *slot = [x, y];
        }

        let b = self.bounding_box;
        let rect = Rect::from_top_left(
            b.x.round() as i32,
            b.y.round() as i32,
            b.width.round() as u32,
            b.height.round() as u32,
        );
        Ok(face::Detection::new(rect, landmarks, self.confidence))
    }
}

impl RawBody {
    fn into_detection(self) -> anyhow::Result<body::Detection> {
        if self.keypoints.len() != body::NUM_KEYPOINTS {
            bail!(
                "body detection has {} keypoints (expected {})",
                self.keypoints.len(),
                body::NUM_KEYPOINTS
            );
        }

        let mut keypoints = Landmarks::new(body::NUM_KEYPOINTS);
        for (i, kp) in self.keypoints.iter().enumerate() {
            keypoints.set(i, Landmark::new([kp.x, kp.y]).with_score(kp.score));
        }
        Ok(body::Detection::new(keypoints, self.confidence))
    }
}

impl RawHand {
    fn into_detection(self) -> anyhow::Result<hand::Detection> {
        if self.landmarks.len() != hand::NUM_LANDMARKS {
            bail!(
                "hand detection has {} landmarks (expected {})",
                self.landmarks.len(),
                hand::NUM_LANDMARKS
            );
        }

        let mut landmarks = Landmarks::new(hand::NUM_LANDMARKS);
        for (slot, &[x, y]) in zip_exact(landmarks.positions_mut(), &self.landmarks) {
            *slot = [x, y];
        }
        Ok(hand::Detection::new(landmarks, self.confidence))
    }
}

/// Detection provider backed by one image's sidecar document.
///
/// Implements all three detector traits; hand one clone per seat to the
/// [`Pipeline`][crate::pipeline::Pipeline].
#[derive(Debug, Clone, Default)]
pub struct SidecarProvider {
    faces: Vec<face::Detection>,
    bodies: Vec<body::Detection>,
    hands: Vec<hand::Detection>,
}

impl SidecarProvider {
    /// Creates a provider that reports no detections.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a sidecar document from a JSON string.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let doc: Document = serde_json::from_str(json)?;
        Ok(Self {
            faces: doc
                .faces
                .into_iter()
                .map(RawFace::into_detection)
                .collect::<anyhow::Result<_>>()?,
            bodies: doc
                .bodies
                .into_iter()
                .map(RawBody::into_detection)
                .collect::<anyhow::Result<_>>()?,
            hands: doc
                .hands
                .into_iter()
                .map(RawHand::into_detection)
                .collect::<anyhow::Result<_>>()?,
        })
    }

    /// Loads the sidecar file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read sidecar '{}'", path.display()))?;
        Self::from_json(&json).with_context(|| format!("malformed sidecar '{}'", path.display()))
    }

    /// Locates and loads the sidecar belonging to `image_path`.
    ///
    /// The sidecar is `<image stem>.json`, looked up in `detections_dir` when given and next to
    /// the image otherwise. A missing sidecar yields an empty provider.
    pub fn for_image(image_path: &Path, detections_dir: Option<&Path>) -> anyhow::Result<Self> {
        let mut sidecar = match (detections_dir, image_path.file_name()) {
            (Some(dir), Some(name)) => dir.join(name),
            _ => image_path.to_path_buf(),
        };
        sidecar.set_extension("json");

        if !sidecar.exists() {
            log::debug!("no sidecar at '{}'", sidecar.display());
            return Ok(Self::empty());
        }
        Self::load(&sidecar)
    }
}

impl FaceDetector for SidecarProvider {
    fn detect(&mut self, _image: &Image) -> anyhow::Result<Vec<face::Detection>> {
        Ok(self.faces.clone())
    }
}

impl BodyDetector for SidecarProvider {
    fn detect(&mut self, _image: &Image) -> anyhow::Result<Vec<body::Detection>> {
        Ok(self.bodies.clone())
    }
}

impl HandDetector for SidecarProvider {
    fn detect(&mut self, _image: &Image) -> anyhow::Result<Vec<hand::Detection>> {
        Ok(self.hands.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn face_landmarks() -> Vec<[f32; 2]> {
        (0..face::NUM_LANDMARKS).map(|i| [i as f32, 1.0]).collect()
    }

    #[test]
    fn parses_all_three_families() {
        let keypoints: Vec<_> = (0..body::NUM_KEYPOINTS)
            .map(|i| json!({ "x": i as f32, "y": 2.0, "score": 0.5 }))
            .collect();
        let hand_landmarks: Vec<[f32; 2]> =
            (0..hand::NUM_LANDMARKS).map(|i| [i as f32, 3.0]).collect();

        let doc = json!({
            "faces": [{
                "box": { "x": 4.0, "y": 5.0, "width": 10.0, "height": 12.0 },
                "landmarks": face_landmarks(),
                "confidence": 0.9,
            }],
            "bodies": [{ "keypoints": keypoints, "confidence": 0.8 }],
            "hands": [{ "landmarks": hand_landmarks, "confidence": 0.7 }],
        });

        let provider = SidecarProvider::from_json(&doc.to_string()).unwrap();
        assert_eq!(provider.faces.len(), 1);
        assert_eq!(provider.bodies.len(), 1);
        assert_eq!(provider.hands.len(), 1);

        let face = &provider.faces[0];
        assert_eq!(face.bounding_rect(), Rect::from_top_left(4, 5, 10, 12));
        assert_eq!(face.landmarks().positions()[67], [67.0, 1.0]);
        assert_eq!(face.confidence(), 0.9);

        let body = &provider.bodies[0];
        assert_eq!(body.get(body::KeypointIdx::Nose).score(), Some(0.5));
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let provider = SidecarProvider::from_json("{}").unwrap();
        assert!(provider.faces.is_empty());
        assert!(provider.bodies.is_empty());
        assert!(provider.hands.is_empty());
    }

    #[test]
    fn rejects_wrong_landmark_count() {
        let doc = json!({
            "faces": [{
                "box": { "x": 0.0, "y": 0.0, "width": 1.0, "height": 1.0 },
                "landmarks": [[0.0, 0.0]],
                "confidence": 0.9,
            }],
        });
        let err = SidecarProvider::from_json(&doc.to_string()).unwrap_err();
        assert!(err.to_string().contains("expected 68"));
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(SidecarProvider::from_json(r#"{ "factes": [] }"#).is_err());
    }

    #[test]
    fn missing_sidecar_file_yields_empty_provider() {
        let provider =
            SidecarProvider::for_image(Path::new("/nonexistent/image.jpg"), None).unwrap();
        assert!(provider.faces.is_empty());
    }
}
