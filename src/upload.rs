//! Upload session: the single file selected for upload and its form fields

use crate::types::Id;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

/// The file awaiting submission plus the metadata the admin attached to it.
/// Cloned into the upload task, so the UI never shares it with a request.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadSession {
    pub path: PathBuf,
    pub file_name: String,
    /// `None` when the file's metadata could not be read at selection time
    pub size: Option<u64>,
    pub category_id: Option<Id>,
    pub description: String,
}

impl UploadSession {
    pub fn new(path: PathBuf) -> Self {
        let size = std::fs::metadata(&path).ok().map(|m| m.len());
        Self::with_size(path, size)
    }

    pub fn with_size(path: PathBuf, size: Option<u64>) -> Self {
        let file_name = display_name(&path);
        Self {
            path,
            file_name,
            size,
            category_id: None,
            description: String::new(),
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Percentage of an upload that has been sent, `None` when the total is unknown.
pub fn progress_percent(loaded: u64, total: u64) -> Option<f32> {
    if total == 0 {
        return None;
    }
    Some((loaded as f64 / total as f64 * 100.0).min(100.0) as f32)
}

/// Drops progress reports that do not move the whole percentage.
/// The stream reports every chunk, the UI only needs each percent once.
#[derive(Debug)]
pub struct ProgressThrottle {
    // Last whole percent reported, plus one; zero before the first report
    last: AtomicU32,
}

impl ProgressThrottle {
    pub fn new() -> Self {
        Self { last: AtomicU32::new(0) }
    }

    pub fn step(&self, loaded: u64, total: u64) -> Option<f32> {
        let whole = progress_percent(loaded, total)?.floor() as u32;
        let previous = self.last.swap(whole + 1, Ordering::Relaxed);
        (previous != whole + 1).then_some(whole as f32)
    }
}

impl Default for ProgressThrottle {
    fn default() -> Self {
        Self::new()
    }
}
