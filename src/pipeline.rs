//! Sequential per-image detection and annotation.

use crate::annotator::{self, Summary};
use crate::detector::{BodyDetector, FaceDetector, HandDetector};
use crate::image::Image;
use crate::timer::Timer;

/// Runs the three detectors over an image and draws their results onto a canvas.
///
/// Detection is strictly ordered (face, then body, then hand) and never fans out; the canvas has
/// exactly one writer while a call is in flight. Callers that process several images do so one
/// image at a time.
pub struct Pipeline {
    face: Box<dyn FaceDetector>,
    body: Box<dyn BodyDetector>,
    hand: Box<dyn HandDetector>,
    t_face: Timer,
    t_body: Timer,
    t_hand: Timer,
    t_draw: Timer,
}

impl Pipeline {
    pub fn new(
        face: Box<dyn FaceDetector>,
        body: Box<dyn BodyDetector>,
        hand: Box<dyn HandDetector>,
    ) -> Self {
        Self {
            face,
            body,
            hand,
            t_face: Timer::new("face"),
            t_body: Timer::new("body"),
            t_hand: Timer::new("hand"),
            t_draw: Timer::new("draw"),
        }
    }

    /// Detects faces, bodies, and hands in `image`, in that order, draws the results onto
    /// `canvas`, and returns the [`Summary`].
    ///
    /// Detector errors propagate to the caller; the canvas is left untouched in that case.
    pub fn process(&mut self, image: &Image, canvas: &mut Image) -> anyhow::Result<Summary> {
        let Self {
            face,
            body,
            hand,
            t_face,
            t_body,
            t_hand,
            t_draw,
        } = self;

        let faces = t_face.time(|| face.detect(image))?;
        let bodies = t_body.time(|| body.detect(image))?;
        let hands = t_hand.time(|| hand.detect(image))?;

        let summary = t_draw.time(|| annotator::annotate(image, canvas, &faces, &bodies, &hands));
        log::debug!("{} {} {} {}", t_face, t_body, t_hand, t_draw);

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use anyhow::bail;

    use super::*;
    use crate::{body, face, hand};

    struct Recorder {
        name: &'static str,
        calls: Rc<RefCell<Vec<&'static str>>>,
        fail: bool,
    }

    impl Recorder {
        fn record(&mut self) -> anyhow::Result<()> {
            self.calls.borrow_mut().push(self.name);
            if self.fail {
                bail!("{} detector failed", self.name);
            }
            Ok(())
        }
    }

    impl FaceDetector for Recorder {
        fn detect(&mut self, _image: &Image) -> anyhow::Result<Vec<face::Detection>> {
            self.record().map(|()| Vec::new())
        }
    }

    impl BodyDetector for Recorder {
        fn detect(&mut self, _image: &Image) -> anyhow::Result<Vec<body::Detection>> {
            self.record().map(|()| Vec::new())
        }
    }

    impl HandDetector for Recorder {
        fn detect(&mut self, _image: &Image) -> anyhow::Result<Vec<hand::Detection>> {
            self.record().map(|()| Vec::new())
        }
    }

    fn pipeline(calls: &Rc<RefCell<Vec<&'static str>>>, fail: &'static str) -> Pipeline {
        let recorder = |name| Recorder {
            name,
            calls: calls.clone(),
            fail: name == fail,
        };
        Pipeline::new(
            Box::new(recorder("face")),
            Box::new(recorder("body")),
            Box::new(recorder("hand")),
        )
    }

    #[test]
    fn detectors_run_in_fixed_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut pipeline = pipeline(&calls, "");

        let image = Image::from_rgba8(2, 2, &[0; 16]);
        let mut canvas = Image::new(0, 0);
        pipeline.process(&image, &mut canvas).unwrap();
        pipeline.process(&image, &mut canvas).unwrap();

        assert_eq!(
            *calls.borrow(),
            ["face", "body", "hand", "face", "body", "hand"]
        );
    }

    #[test]
    fn detector_error_stops_the_image() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut pipeline = pipeline(&calls, "body");

        let image = Image::from_rgba8(2, 2, &[0; 16]);
        let mut canvas = Image::new(0, 0);
        let err = pipeline.process(&image, &mut canvas).unwrap_err();

        assert!(err.to_string().contains("body detector failed"));
        // The hand detector is never reached, and nothing was drawn.
        assert_eq!(*calls.borrow(), ["face", "body"]);
        assert_eq!(canvas.width(), 0);
    }
}
