//! Detector provider traits.
//!
//! The three pretrained detection models are external collaborators; this crate only consumes
//! their output. Anything that can produce detections for an image can implement these traits: an
//! inference runtime, a remote service, or the JSON import in [`crate::sidecar`].
//!
//! The traits take `&mut self` so that providers may keep internal state or reusable buffers.

use crate::image::Image;
use crate::{body, face, hand};

/// Produces face detections for an image.
pub trait FaceDetector {
    fn detect(&mut self, image: &Image) -> anyhow::Result<Vec<face::Detection>>;
}

/// Produces body pose detections for an image.
pub trait BodyDetector {
    fn detect(&mut self, image: &Image) -> anyhow::Result<Vec<body::Detection>>;
}

/// Produces hand pose detections for an image.
pub trait HandDetector {
    fn detect(&mut self, image: &Image) -> anyhow::Result<Vec<hand::Detection>>;
}
