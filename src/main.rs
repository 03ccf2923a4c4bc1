use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use limn::image::Image;
use limn::pipeline::Pipeline;
use limn::sidecar::SidecarProvider;

/// Draws exported face, body pose, and hand pose detections onto images.
///
/// Each image is paired with a `<stem>.json` sidecar holding its exported detector output; the
/// annotated result is written as `<stem>.annotated.png` and a per-image summary is printed to
/// stdout.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Images to annotate.
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Directory holding the detection sidecars (defaults to each image's own directory).
    #[arg(long, value_name = "DIR")]
    detections: Option<PathBuf>,

    /// Directory to write annotated images into (defaults to each image's own directory).
    #[arg(short, long, value_name = "DIR")]
    out_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    limn::init_logger!();

    let args = Args::parse();

    // Images are processed strictly one at a time; the canvas is reused across them.
    let mut canvas = Image::new(0, 0);
    let mut failed = 0usize;
    for path in &args.images {
        if let Err(e) = process(path, &args, &mut canvas) {
            log::error!("{}: {:#}", path.display(), e);
            failed += 1;
        }
    }

    if failed != 0 {
        anyhow::bail!("{failed} of {} images failed", args.images.len());
    }
    Ok(())
}

fn process(path: &Path, args: &Args, canvas: &mut Image) -> anyhow::Result<()> {
    let image = Image::load(path)?;
    let provider = SidecarProvider::for_image(path, args.detections.as_deref())?;
    let mut pipeline = Pipeline::new(
        Box::new(provider.clone()),
        Box::new(provider.clone()),
        Box::new(provider),
    );

    let summary = pipeline.process(&image, canvas)?;
    println!("{}:", path.display());
    print!("{summary}");

    let out = output_path(path, args.out_dir.as_deref());
    canvas
        .save(&out)
        .with_context(|| format!("failed to save '{}'", out.display()))?;
    log::info!("wrote {}", out.display());
    Ok(())
}

fn output_path(image_path: &Path, out_dir: Option<&Path>) -> PathBuf {
    let mut name = image_path.file_stem().unwrap_or_default().to_os_string();
    name.push(".annotated.png");
    match out_dir {
        Some(dir) => dir.join(name),
        None => image_path.with_file_name(name),
    }
}
