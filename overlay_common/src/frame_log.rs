use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::frame_file::FrameFileNaming;
use crate::frame_meta::FrameMeta;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedFrame {
    pub number: u64,
    pub meta: FrameMeta,
}

/// Frames recorded by the relay, ordered by frame number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameLog {
    /// Directory the frames were read from.
    pub source_dir: PathBuf,
    pub frames: Vec<LoggedFrame>,
}

impl FrameLog {
    pub fn new(source_dir: PathBuf) -> Self {
        Self {
            source_dir,
            frames: Vec::new(),
        }
    }

    /// Read every frame file in `dir`. Files that do not follow `naming` are
    /// ignored; files that fail to parse are skipped with a warning.
    pub fn load_dir(dir: &Path, naming: &FrameFileNaming) -> Result<Self> {
        let entries =
            fs::read_dir(dir).with_context(|| format!("Failed to read frame dir {dir:?}"))?;

        let mut frame_log = Self::new(dir.to_path_buf());
        for entry in entries {
            let entry = entry.context("Failed to read directory entry")?;
            let name = entry.file_name();
            let Some(number) = name.to_str().and_then(|n| naming.parse(n)) else {
                continue;
            };

            let path = entry.path();
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read frame file {path:?}"))?;
            match FrameMeta::from_json(&raw) {
                Ok(meta) => frame_log.push(LoggedFrame { number, meta }),
                Err(e) => log::warn!("Skipping frame {number} ({path:?}): {e:#}"),
            }
        }
        frame_log.frames.sort_by_key(|frame| frame.number);

        log::info!("Loaded {} frames from {:?}", frame_log.len(), dir);
        Ok(frame_log)
    }

    pub fn push(&mut self, frame: LoggedFrame) {
        self.frames.push(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoggedFrame> {
        self.frames.iter()
    }
}
