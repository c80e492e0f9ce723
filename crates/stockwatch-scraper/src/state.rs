//! Last known state persisted between check cycles as a plain text file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::ScraperError;

/// Plain-text file holding the most recently notified report.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored report. A missing file reads as `""`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::State`] if the file exists but cannot be read.
    pub async fn read(&self) -> Result<String, ScraperError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(content.trim_end().to_string()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Replaces the stored report, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::State`] if the directory or file cannot be written.
    pub async fn write(&self, report: &str) -> Result<(), ScraperError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }
        tokio::fs::write(&self.path, report)
            .await
            .map_err(|e| self.io_error(e))
    }

    /// Deletes the state file. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::State`] if the file exists but cannot be removed.
    pub async fn clear(&self) -> Result<(), ScraperError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> ScraperError {
        ScraperError::State {
            path: self.path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("stockwatch-state-test-{}", std::process::id()))
            .join(name)
    }

    #[tokio::test]
    async fn missing_file_reads_empty() {
        let state = StateFile::new(scratch_path("missing/last.txt"));
        assert_eq!(state.read().await.unwrap(), "");
    }

    #[tokio::test]
    async fn write_then_read_returns_report() {
        let state = StateFile::new(scratch_path("roundtrip/last.txt"));
        state
            .write("✅ In-store pickup: Orchard\nPhone: 555")
            .await
            .unwrap();
        assert_eq!(
            state.read().await.unwrap(),
            "✅ In-store pickup: Orchard\nPhone: 555"
        );
        state.clear().await.unwrap();
    }

    #[tokio::test]
    async fn read_trims_trailing_newline() {
        let path = scratch_path("trailing/last.txt");
        tokio::fs::create_dir_all(path.parent().unwrap())
            .await
            .unwrap();
        tokio::fs::write(&path, "report\n").await.unwrap();
        let state = StateFile::new(&path);
        assert_eq!(state.read().await.unwrap(), "report");
        state.clear().await.unwrap();
    }

    #[tokio::test]
    async fn write_overwrites_previous_report() {
        let state = StateFile::new(scratch_path("overwrite/last.txt"));
        state.write("first").await.unwrap();
        state.write("").await.unwrap();
        assert_eq!(state.read().await.unwrap(), "");
        state.clear().await.unwrap();
    }

    #[tokio::test]
    async fn clear_missing_file_is_ok() {
        let state = StateFile::new(scratch_path("never-written/last.txt"));
        assert!(state.clear().await.is_ok());
    }

    #[tokio::test]
    async fn unreadable_path_is_state_error() {
        // A directory cannot be read as a file.
        let dir = scratch_path("is-a-dir");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let err = StateFile::new(&dir).read().await.unwrap_err();
        assert!(matches!(err, ScraperError::State { .. }));
    }
}
