// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Descriptor chain builders.

use echo_rule_describe::{append, RuleDescriptor};

/// Build `root > rest[0] > rest[1] > ...` by repeated [`append`].
pub fn chain(root: &'static str, rest: &[&'static str]) -> RuleDescriptor {
    rest.iter()
        .fold(RuleDescriptor::leaf(root), |parent, segment| append(&parent, *segment))
}

/// Step-by-step builder for nested descriptors.
///
/// ```
/// use echo_rule_dry_tests::DescriptorChainBuilder;
///
/// let rule = DescriptorChainBuilder::new("model")
///     .then("tasks")
///     .then_deferred("create(%s)", "build")
///     .build();
/// assert_eq!(rule.to_string(), "model > tasks > create(build)");
/// ```
#[derive(Debug, Clone)]
pub struct DescriptorChainBuilder {
    current: RuleDescriptor,
}

impl DescriptorChainBuilder {
    /// Start from a literal root segment.
    pub fn new(root: &'static str) -> Self {
        Self::from_descriptor(RuleDescriptor::leaf(root))
    }

    /// Start from an existing descriptor.
    pub fn from_descriptor(root: RuleDescriptor) -> Self {
        Self { current: root }
    }

    /// Append a literal segment.
    pub fn then(self, segment: impl Into<String>) -> Self {
        Self {
            current: append(&self.current, segment.into()),
        }
    }

    /// Append a deferred single-argument template segment.
    pub fn then_deferred(self, template: &'static str, arg: &'static str) -> Self {
        Self {
            current: self
                .current
                .nest(RuleDescriptor::deferred(template, vec![arg.into()])),
        }
    }

    /// Append an arbitrary child descriptor.
    pub fn then_nested(self, child: RuleDescriptor) -> Self {
        Self {
            current: self.current.nest(child),
        }
    }

    /// Finish the chain.
    pub fn build(self) -> RuleDescriptor {
        self.current
    }
}
