//! Frame enumeration and the per-frame processing loop.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use preygate_core::RunStatistics;
use preygate_cv::overlay::ImageOverlay;
use preygate_cv::traits::{Detector, FullFrameDetector};
use preygate_cv::utils::ImageOps;
use preygate_cv::{FramePipeline, PipelineConfig, SnoutTemplate};

use crate::Args;

pub fn run(args: &Args) -> Result<()> {
    let template = match &args.snout {
        Some(path) => Some(
            SnoutTemplate::load(path)
                .with_context(|| format!("loading snout template {}", path.display()))?,
        ),
        None => {
            info!("no snout template given, template matching disabled");
            None
        }
    };

    if let Some(dir) = &args.output {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
    }

    let pipeline = FramePipeline::new(PipelineConfig::default(), template);
    let detector = FullFrameDetector;
    let min_size = (args.min_width, args.min_height);

    let mut stats = RunStatistics::new();

    for path in collect_images(&args.images)? {
        info!("{}", path.display());

        // Unreadable frames are skipped and never counted.
        let gray = match ImageOps::load_grayscale(&path) {
            Ok(img) => img,
            Err(e) => {
                warn!("skipping: {e}");
                continue;
            }
        };

        let equalized = ImageOps::equalize(&gray);
        let detections = detector.detect(&equalized, min_size);

        let outcome = if let Some(dir) = &args.output {
            let color = match ImageOps::load_color(&path) {
                Ok(img) => img,
                Err(e) => {
                    warn!("skipping: {e}");
                    continue;
                }
            };
            let mut overlay = ImageOverlay::new(color);
            let outcome = pipeline.process_frame_with_overlay(&gray, &detections, &mut overlay);

            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "frame.png".to_owned());
            let save_path = dir.join(format!("{name}_screenshot.png"));
            overlay
                .into_image()
                .save(&save_path)
                .with_context(|| format!("saving {}", save_path.display()))?;
            outcome
        } else {
            pipeline.process_frame(&gray, &detections)
        };

        debug!("match ok: {}", outcome.decision.matched);
        stats.record(&outcome.decision);
    }

    report(&stats, args.json)
}

/// Expand the command-line inputs: directories contribute their PNG files
/// in sorted order, plain paths pass through.
fn collect_images(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(input)
                .with_context(|| format!("reading directory {}", input.display()))?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| {
                    p.extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
                })
                .collect();
            entries.sort();
            paths.extend(entries);
        } else {
            paths.push(input.clone());
        }
    }
    Ok(paths)
}

fn report(stats: &RunStatistics, json: bool) -> Result<()> {
    let summary = stats.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if summary.frames_seen == 0 {
        println!("No images specified ...");
        return Ok(());
    }

    println!(
        "{} of {} matches ok ({:.2})",
        summary.frames_matched, summary.frames_seen, summary.match_ratio
    );
    println!(
        "({:.1}, {:.1}) average size of match",
        summary.avg_width, summary.avg_height
    );
    Ok(())
}
