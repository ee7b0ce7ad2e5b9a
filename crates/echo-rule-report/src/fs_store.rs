// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem-backed [`ReportStore`]: one JSON file in a config directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::config::{ReportConfigError, ReportStore};
use crate::settings::REPORT_CONFIG_KEY;

/// Keeps the settings document at `<dir>/rule-report.json`.
#[derive(Debug, Clone)]
pub struct FsReportStore {
    path: PathBuf,
}

impl FsReportStore {
    /// Store in the platform config directory, e.g.
    /// `~/.config/Echo/rules/rule-report.json` on Linux.
    ///
    /// # Errors
    ///
    /// [`ReportConfigError::NoConfigDir`] when no home directory is known.
    pub fn new() -> Result<Self, ReportConfigError> {
        let proj = ProjectDirs::from("dev", "flyingrobots", "Echo")
            .ok_or(ReportConfigError::NoConfigDir)?;
        Ok(Self::in_dir(proj.config_dir().join("rules")))
    }

    /// Store inside `dir`. The directory is created on first write.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{REPORT_CONFIG_KEY}.json")),
        }
    }

    /// The settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> ReportConfigError {
        ReportConfigError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ReportStore for FsReportStore {
    fn read(&self) -> Result<Option<Vec<u8>>, ReportConfigError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(self.io_error(err)),
        }
    }

    fn write(&self, document: &[u8]) -> Result<(), ReportConfigError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|err| self.io_error(err))?;
        }
        fs::write(&self.path, document).map_err(|err| self.io_error(err))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_nothing_saved() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsReportStore::in_dir(dir.path());
        assert!(store.read().unwrap().is_none());
    }

    #[test]
    fn writes_create_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsReportStore::in_dir(dir.path().join("nested"));
        store.write(b"{}").unwrap();
        assert_eq!(store.path(), dir.path().join("nested").join("rule-report.json"));
        assert_eq!(store.read().unwrap().unwrap(), b"{}");
    }

    #[test]
    fn io_errors_name_the_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes reads fail.
        fs::create_dir(dir.path().join("rule-report.json")).unwrap();
        let store = FsReportStore::in_dir(dir.path());
        let err = store.read().unwrap_err();
        assert!(matches!(err, ReportConfigError::Io { .. }));
        assert!(err.to_string().starts_with("[RULE_REPORT_IO] rule-report settings at "));
    }
}
