use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use overlay_common::frame_file::FrameFileNaming;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::RelayError;

/// Recording session, restarted by every `init`.
#[derive(Debug, Clone, Copy)]
pub struct Session {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
}

impl Session {
    fn start() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }
}

#[derive(Debug)]
struct StoreState {
    latest: Option<u64>,
    session: Session,
}

/// Numbered frame files in a single directory.
///
/// `clear` takes the gate exclusively; writes and reads share it, so an init
/// never interleaves with a half-written frame.
pub struct FrameStore {
    dir: PathBuf,
    naming: FrameFileNaming,
    gate: RwLock<()>,
    state: Mutex<StoreState>,
}

impl FrameStore {
    /// Open (and create if needed) the frame directory. The most recent frame
    /// is recovered as the highest numbered file already on disk.
    pub async fn open(dir: impl Into<PathBuf>, naming: FrameFileNaming) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create frame dir {dir:?}"))?;

        let existing = scan(&dir, &naming)
            .await
            .with_context(|| format!("Failed to scan frame dir {dir:?}"))?;
        let latest = existing.last().copied();
        info!(
            "Frame store at {:?}: {} existing frames, latest {:?}",
            dir,
            existing.len(),
            latest
        );

        Ok(Self {
            dir,
            naming,
            gate: RwLock::new(()),
            state: Mutex::new(StoreState {
                latest,
                session: Session::start(),
            }),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn naming(&self) -> &FrameFileNaming {
        &self.naming
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn latest(&self) -> Option<u64> {
        self.state().latest
    }

    pub fn session(&self) -> Session {
        self.state().session
    }

    fn frame_path(&self, frame: u64) -> PathBuf {
        self.dir.join(self.naming.file_name(frame))
    }

    /// Remove every regular file in the directory and start a new session.
    /// Returns the number of files removed.
    pub async fn clear(&self) -> Result<usize, RelayError> {
        let _guard = self.gate.write().await;

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| RelayError::storage("create the frame directory", e))?;

        let mut entries = fs::read_dir(&self.dir)
            .await
            .map_err(|e| RelayError::storage("list the frame directory", e))?;

        let mut removed = 0;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| RelayError::storage("list the frame directory", e))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| RelayError::storage("inspect a directory entry", e))?;
            if !file_type.is_file() {
                debug!("Leaving non-file entry {:?}", entry.path());
                continue;
            }

            match fs::remove_file(entry.path()).await {
                Ok(()) => removed += 1,
                // Removed by someone else in the meantime.
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(RelayError::storage(
                        format!("remove {:?}", entry.file_name()),
                        e,
                    ))
                }
            }
        }

        let session = Session::start();
        {
            let mut state = self.state();
            state.latest = None;
            state.session = session;
        }
        info!("Cleared {} files, new session {}", removed, session.id);

        Ok(removed)
    }

    /// Store `payload` as frame `frame`, replacing any previous content.
    /// Returns the number of bytes written.
    pub async fn write(&self, frame: u64, payload: &str) -> Result<usize, RelayError> {
        let _guard = self.gate.read().await;

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| RelayError::storage("create the frame directory", e))?;

        let path = self.frame_path(frame);
        // Unique per write so concurrent updates of one frame never share a temp file.
        let tmp = self.dir.join(format!(
            ".{}.{}.tmp",
            self.naming.file_name(frame),
            Uuid::new_v4().simple()
        ));

        write_then_rename(&tmp, &path, payload.as_bytes())
            .await
            .map_err(|e| RelayError::storage(format!("write frame {frame}"), e))?;

        self.state().latest = Some(frame);
        debug!("Stored frame {} ({} bytes)", frame, payload.len());

        Ok(payload.len())
    }

    pub async fn read(&self, frame: u64) -> Result<String, RelayError> {
        let _guard = self.gate.read().await;

        match fs::read_to_string(self.frame_path(frame)).await {
            Ok(payload) => Ok(payload),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(RelayError::FrameNotFound(frame)),
            Err(e) => Err(RelayError::storage(format!("read frame {frame}"), e)),
        }
    }

    /// Payload of the most recently written frame.
    pub async fn read_latest(&self) -> Result<(u64, String), RelayError> {
        let frame = self.latest().ok_or(RelayError::NoFrames)?;
        let payload = self.read(frame).await?;
        Ok((frame, payload))
    }

    /// Frame numbers currently on disk, ascending.
    pub async fn list(&self) -> Result<Vec<u64>, RelayError> {
        let _guard = self.gate.read().await;

        match scan(&self.dir, &self.naming).await {
            Ok(frames) => Ok(frames),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(RelayError::storage("list the frame directory", e)),
        }
    }
}

/// Write `payload` to `tmp` and move it over `path`. On any failure the temp
/// file is removed, including a partially written one.
async fn write_then_rename(tmp: &Path, path: &Path, payload: &[u8]) -> std::io::Result<()> {
    let result = match fs::write(tmp, payload).await {
        Ok(()) => fs::rename(tmp, path).await,
        Err(e) => Err(e),
    };

    if result.is_err() {
        match fs::remove_file(tmp).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove temp file {:?}: {}", tmp, e),
        }
    }
    result
}

async fn scan(dir: &Path, naming: &FrameFileNaming) -> std::io::Result<Vec<u64>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut frames = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if let Some(frame) = entry.file_name().to_str().and_then(|n| naming.parse(n)) {
            frames.push(frame);
        }
    }
    frames.sort_unstable();
    Ok(frames)
}
