mod replay;

use std::collections::HashSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use overlay_common::frame_file::{FrameFileNaming, DEFAULT_EXTENSION, DEFAULT_PREFIX};
use overlay_common::frame_log::FrameLog;
use overlay_common::rect::Point;
use overlay_common::scene::OverlayScene;
use tracing_subscriber::prelude::*;

use crate::replay::{replay, ReplayScript};

#[derive(Debug, Parser)]
pub struct Args {
    /// Directory of frame files written by the relay.
    input: PathBuf,
    /// Pointer position in overlay pixels, as `X,Y`.
    #[arg(long, default_value = "0,0", value_parser = parse_point)]
    pointer: Point,
    /// Frame numbers on which to click. May be repeated.
    #[arg(long = "click-at")]
    click_at: Vec<u64>,
    /// Overlay ticks per metadata frame.
    #[arg(long, default_value = "1")]
    ticks_per_frame: u32,
    /// Optional path to write every scene snapshot as JSON.
    #[arg(long, short)]
    output: Option<PathBuf>,
    #[arg(long, default_value = DEFAULT_PREFIX)]
    prefix: String,
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    extension: String,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x.trim().parse::<f32>().map_err(|e| format!("bad x {x:?}: {e}"))?;
    let y = y.trim().parse::<f32>().map_err(|e| format!("bad y {y:?}: {e}"))?;
    Ok(Point::new(x, y))
}

fn main() -> Result<()> {
    // Initialize logging.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,overlay_replay=info,overlay_common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let naming = FrameFileNaming::new(args.prefix, args.extension);
    let frames = FrameLog::load_dir(&args.input, &naming)?;
    if frames.is_empty() {
        log::warn!("No frames found in {:?}", args.input);
        return Ok(());
    }

    let script = ReplayScript {
        pointer: args.pointer,
        clicks: args.click_at.into_iter().collect::<HashSet<_>>(),
        ticks_per_frame: args.ticks_per_frame,
    };
    let mut scene = OverlayScene::default();
    let ticks = replay(&frames, &mut scene, &script);

    if let Some(output) = args.output {
        let file = File::create(&output)
            .with_context(|| format!("Failed to create output file {output:?}"))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &ticks)
            .context("Failed to write replay snapshots")?;
        log::info!("Wrote {} snapshots to {:?}", ticks.len(), output);
    }

    Ok(())
}
