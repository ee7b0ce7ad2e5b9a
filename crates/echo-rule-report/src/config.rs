// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Where reporter settings are kept.
//!
//! The reporter has exactly one settings document, stored under
//! [`REPORT_CONFIG_KEY`](crate::REPORT_CONFIG_KEY). A [`ReportStore`] only
//! moves that document's bytes; parsing and defaults live with
//! [`ReportConfig`](crate::ReportConfig).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Storage for the reporter settings document.
pub trait ReportStore {
    /// Read the stored document, `None` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`ReportConfigError`] when the backing storage fails.
    fn read(&self) -> Result<Option<Vec<u8>>, ReportConfigError>;
    /// Replace the stored document.
    ///
    /// # Errors
    ///
    /// Returns [`ReportConfigError`] when the backing storage fails.
    fn write(&self, document: &[u8]) -> Result<(), ReportConfigError>;
}

/// Failure loading or saving the `rule-report` settings.
#[derive(Debug, Error)]
pub enum ReportConfigError {
    /// No platform config directory could be resolved.
    #[error("[RULE_REPORT_NO_CONFIG_DIR] no config directory for rule-report settings")]
    NoConfigDir,
    /// Reading or writing the settings file failed.
    #[error("[RULE_REPORT_IO] rule-report settings at {}: {source}", path.display())]
    Io {
        /// File that was being read or written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The stored document is not valid settings JSON.
    #[error("[RULE_REPORT_MALFORMED] rule-report settings are not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),
    /// The settings could not be encoded.
    #[error("[RULE_REPORT_ENCODE] could not encode rule-report settings: {0}")]
    Encode(#[source] serde_json::Error),
    /// A store that is neither file- nor JSON-backed refused the operation.
    #[error("[RULE_REPORT_STORE] rule-report store unavailable: {0}")]
    Unavailable(String),
}
