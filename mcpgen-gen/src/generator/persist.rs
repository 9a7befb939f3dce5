use std::io;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

/// Replaces `location` with `contents` in one step.
///
/// Bytes go to a uniquely named sibling temp file which is synced and then renamed over the
/// target, so readers see either the old file or the complete new one. The temp file is removed
/// on every failure path, including the future being dropped mid-write.
pub(crate) async fn write_atomic(location: &Path, contents: &[u8]) -> io::Result<()> {
    let file_name = location.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "output location has no file name")
    })?;
    let dir = match location.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let temp_path = dir.join(format!(
        ".{}.{}.tmp",
        file_name.to_string_lossy(),
        uuid::Uuid::new_v4().simple()
    ));

    let mut guard = TempGuard::new(temp_path.clone());
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .await?;
    file.write_all(contents).await?;
    file.flush().await?;
    file.sync_all().await?;
    drop(file);

    tokio::fs::rename(&temp_path, location).await?;
    guard.disarm();
    Ok(())
}

struct TempGuard {
    path: Option<PathBuf>,
}

impl TempGuard {
    fn new(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    fn disarm(&mut self) {
        self.path = None;
    }
}

impl Drop for TempGuard {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}
