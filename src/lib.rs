//! Limn draws the output of pretrained detection models onto images.
//!
//! Three detector families are supported: faces (bounding box plus 68 landmarks), body poses
//! (17 scored keypoints) and hand poses (21 landmarks). Detection itself is delegated to
//! external pretrained-model runtimes; their results enter through the [`detector`] traits,
//! typically via the JSON import in [`sidecar`]. The [`annotator`] renders markers, skeleton
//! edges and face contours onto a canvas image and reports a per-image text summary, and the
//! [`pipeline`] sequences the three detectors over an image in a fixed order.
//!
//! # Environment Variables
//!
//! Some parts of Limn can be overridden by setting environment variables:
//!
//! * `LIMN_JPEG_BACKEND`: Configures the JPEG image decoder to use. Allowed values are:
//!   * `zune-jpeg`: uses the [zune-jpeg] crate to decode JPEG images (the default).
//!   * `jpeg-decoder`: uses the [jpeg-decoder] crate.
//!
//! [zune-jpeg]: https://github.com/etemesi254/zune-jpeg
//! [jpeg-decoder]: https://github.com/image-rs/jpeg-decoder/

use log::LevelFilter;

pub mod annotator;
pub mod body;
pub mod detector;
pub mod face;
pub mod hand;
pub mod image;
pub mod iter;
pub mod landmark;
pub mod pipeline;
pub mod sidecar;
pub mod timer;

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = LevelFilter::Debug;
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_PKG_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// The calling crate and Limn will log at *debug* level; `RUST_LOG` overrides this.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
