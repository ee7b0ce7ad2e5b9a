// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Errors attributed to the rule that raised them.

use std::error::Error;

use echo_rule_describe::RuleDescriptor;

type BoxedSource = Box<dyn Error + Send + Sync + 'static>;

/// A rule failed; carries the path describing how the rule was reached.
///
/// ```
/// use echo_rule_describe::RuleDescriptor;
/// use echo_rule_report::RuleFailure;
///
/// let rule = RuleDescriptor::leaf("model.tasks").append("create(build)");
/// let failure = RuleFailure::new(rule, "duplicate task name");
/// assert_eq!(
///     failure.to_string(),
///     "[RULE_FAILURE] model.tasks > create(build): duplicate task name"
/// );
/// ```
#[derive(Debug, thiserror::Error)]
#[error("[RULE_FAILURE] {rule}: {message}")]
pub struct RuleFailure {
    rule: RuleDescriptor,
    message: String,
    #[source]
    source: Option<BoxedSource>,
}

impl RuleFailure {
    /// Failure of `rule` described by `message`.
    pub fn new(rule: RuleDescriptor, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying error.
    pub fn with_source(mut self, source: impl Into<BoxedSource>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Path of the failing rule.
    pub fn rule(&self) -> &RuleDescriptor {
        &self.rule
    }

    /// What went wrong, without the rule path.
    pub fn message(&self) -> &str {
        &self.message
    }
}
