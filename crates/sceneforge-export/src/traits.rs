//! Collaborator interfaces consumed by the export engine.
//!
//! The engine itself never touches the filesystem or a UI directly; it
//! talks to these traits. Hosts plug in their own implementations, the
//! defaults here cover headless batch use.

use std::path::Path;

use tracing::debug;

/// Produces an on-disk asset for a source texture.
///
/// Returns the URL of the produced file relative to the output directory,
/// or `None` when the asset cannot be read or re-encoded. A `None` is a
/// recoverable outcome: the exporter leaves the texture slot unset and
/// carries on.
pub trait AssetMaterializer {
    /// Copy or convert the asset at `asset_path` into `out_dir`.
    fn copy_or_convert(&mut self, asset_path: &Path, out_dir: &Path) -> Option<String>;
}

/// Receives traversal progress, once per visited node.
pub trait ProgressSink {
    /// Running completion fraction in 0.0..=1.0, non-decreasing
    fn report(&mut self, fraction: f32);

    /// The run is over; tear down any progress display
    fn clear(&mut self) {}
}

/// Discards all progress reports
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&mut self, _fraction: f32) {}
}

/// Logs progress at whole-percent milestones
#[derive(Debug, Default)]
pub struct LogProgress {
    last_percent: Option<u32>,
}

impl ProgressSink for LogProgress {
    fn report(&mut self, fraction: f32) {
        let percent = (fraction.clamp(0.0, 1.0) * 100.0) as u32;
        if self.last_percent != Some(percent) {
            self.last_percent = Some(percent);
            debug!(percent, "export progress");
        }
    }

    fn clear(&mut self) {
        self.last_percent = None;
    }
}

/// Writes one text artifact to its final destination.
pub trait TextSink {
    /// Write `content` at `path`, replacing any previous artifact
    fn write_text(&mut self, path: &Path, content: &str) -> std::io::Result<()>;
}

/// Writes artifacts straight to the filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsTextSink;

impl TextSink for FsTextSink {
    fn write_text(&mut self, path: &Path, content: &str) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
    }
}
