// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rule diagnostics reported once per rule path.

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use echo_rule_describe::RuleDescriptor;
use tracing::{debug, error, info, warn};

use crate::config::{ReportConfigError, ReportStore};
use crate::failure::RuleFailure;
use crate::settings::{ReportConfig, ReportLevel};

/// What [`RuleReporter::report`] did with a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Emitted and remembered.
    Emitted,
    /// Emitted, but the tracked set was full so a repeat will be emitted too.
    EmittedUntracked,
    /// An equal rule path was already reported; nothing emitted.
    Suppressed,
}

/// Emits rule diagnostics through `tracing`, at most once per rule path.
///
/// Paths are keyed by descriptor value, so two descriptors built
/// independently for the same nesting count as the same rule. Safe to share
/// across threads.
#[derive(Debug)]
pub struct RuleReporter {
    config: ReportConfig,
    seen: Mutex<HashSet<RuleDescriptor>>,
    emitted: AtomicU64,
    suppressed: AtomicU64,
}

impl Default for RuleReporter {
    fn default() -> Self {
        Self::new(ReportConfig::default())
    }
}

impl RuleReporter {
    /// Reporter using `config`.
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            seen: Mutex::new(HashSet::new()),
            emitted: AtomicU64::new(0),
            suppressed: AtomicU64::new(0),
        }
    }

    /// Reporter configured from `store`, defaults when nothing is stored.
    ///
    /// # Errors
    ///
    /// See [`ReportConfig::load`].
    pub fn from_store(store: &impl ReportStore) -> Result<Self, ReportConfigError> {
        Ok(Self::new(ReportConfig::load(store)?))
    }

    /// Active settings.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Report `message` against `rule`.
    ///
    /// Deferred leaves of `rule` are formatted before the tracked set is
    /// locked, so a supplier may itself report through this reporter.
    #[allow(clippy::needless_pass_by_value)]
    pub fn report(&self, rule: &RuleDescriptor, message: impl fmt::Display) -> ReportOutcome {
        let outcome = if self.config.dedupe {
            rule.materialize();
            let mut seen = self.seen.lock().unwrap_or_else(|e| e.into_inner());
            if seen.contains(rule) {
                self.suppressed.fetch_add(1, Ordering::Relaxed);
                debug!(rule = %rule, "suppressed repeated rule diagnostic");
                return ReportOutcome::Suppressed;
            }
            if seen.len() < self.config.max_tracked {
                seen.insert(rule.clone());
                ReportOutcome::Emitted
            } else {
                ReportOutcome::EmittedUntracked
            }
        } else {
            ReportOutcome::EmittedUntracked
        };
        self.emit(rule, &message);
        outcome
    }

    /// Report a [`RuleFailure`] against its own rule path.
    pub fn report_failure(&self, failure: &RuleFailure) -> ReportOutcome {
        match std::error::Error::source(failure) {
            Some(cause) => {
                self.report(failure.rule(), format_args!("{}: {cause}", failure.message()))
            }
            None => self.report(failure.rule(), failure.message()),
        }
    }

    fn emit(&self, rule: &RuleDescriptor, message: &dyn fmt::Display) {
        self.emitted.fetch_add(1, Ordering::Relaxed);
        let depth = rule.depth();
        match self.config.level {
            ReportLevel::Error => error!(rule = %rule, depth, "{message}"),
            ReportLevel::Warn => warn!(rule = %rule, depth, "{message}"),
            ReportLevel::Info => info!(rule = %rule, depth, "{message}"),
            ReportLevel::Debug => debug!(rule = %rule, depth, "{message}"),
        }
    }

    /// Whether an equal rule path has been remembered.
    pub fn has_reported(&self, rule: &RuleDescriptor) -> bool {
        rule.materialize();
        self.seen
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(rule)
    }

    /// Number of remembered rule paths.
    pub fn tracked(&self) -> usize {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Number of diagnostics emitted so far.
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    /// Number of diagnostics suppressed as repeats.
    pub fn suppressed(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }

    /// Forget every remembered path and zero the counters.
    pub fn reset(&self) {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).clear();
        self.emitted.store(0, Ordering::Relaxed);
        self.suppressed.store(0, Ordering::Relaxed);
    }
}
