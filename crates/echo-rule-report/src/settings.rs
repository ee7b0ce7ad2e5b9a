// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Reporter settings persisted through a [`ReportStore`].

use serde::{Deserialize, Serialize};

use crate::config::{ReportConfigError, ReportStore};

/// Config key the reporter settings live under.
pub const REPORT_CONFIG_KEY: &str = "rule-report";

/// Severity used for reported rule diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLevel {
    /// `tracing::error!`.
    Error,
    /// `tracing::warn!`.
    #[default]
    Warn,
    /// `tracing::info!`.
    Info,
    /// `tracing::debug!`.
    Debug,
}

/// Settings for [`RuleReporter`](crate::RuleReporter).
///
/// Missing fields take their defaults, so a partial JSON document such as
/// `{"level": "info"}` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Report each distinct rule path at most once.
    pub dedupe: bool,
    /// Upper bound on remembered rule paths. Past it, reports are still
    /// emitted but no longer remembered.
    pub max_tracked: usize,
    /// Level reports are emitted at.
    pub level: ReportLevel,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dedupe: true,
            max_tracked: 4096,
            level: ReportLevel::Warn,
        }
    }
}

impl ReportConfig {
    /// Load settings from `store`.
    ///
    /// Nothing saved, or an empty document, yields the defaults.
    ///
    /// # Errors
    ///
    /// Store failures pass through; an unparsable document is
    /// [`ReportConfigError::Malformed`].
    pub fn load(store: &impl ReportStore) -> Result<Self, ReportConfigError> {
        match store.read()? {
            Some(document) if !document.is_empty() => {
                serde_json::from_slice(&document).map_err(ReportConfigError::Malformed)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Persist settings to `store` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the write fails.
    pub fn save(&self, store: &impl ReportStore) -> Result<(), ReportConfigError> {
        let document = serde_json::to_vec_pretty(self).map_err(ReportConfigError::Encode)?;
        store.write(&document)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn partial_documents_fill_in_defaults() {
        let cfg: ReportConfig = serde_json::from_str(r#"{"level":"info"}"#).unwrap();
        assert_eq!(
            cfg,
            ReportConfig {
                level: ReportLevel::Info,
                ..ReportConfig::default()
            }
        );
    }

    #[test]
    fn malformed_documents_name_the_settings() {
        let err = serde_json::from_slice::<ReportConfig>(b"{not json")
            .map_err(ReportConfigError::Malformed)
            .unwrap_err();
        assert!(err
            .to_string()
            .starts_with("[RULE_REPORT_MALFORMED] rule-report settings"));
    }

    #[test]
    fn levels_serialize_lowercase() {
        let json = serde_json::to_string(&ReportLevel::Debug).unwrap();
        assert_eq!(json, r#""debug""#);
    }
}
