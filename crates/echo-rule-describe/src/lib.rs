// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! echo-rule-describe: provenance paths for configuration rules.
//!
//! Every rule the engine registers or applies carries a [`RuleDescriptor`]
//! recording how it was reached, e.g. `model.components > add(Bar)`. Error
//! messages, logs and debugging tools render the descriptor to show which
//! rule produced an effect or a failure.
//!
//! ```
//! use echo_rule_describe::{append, RuleDescriptor};
//!
//! let components = RuleDescriptor::leaf("model.components");
//! let rule = append(&components, "add(Bar)");
//! assert_eq!(rule.to_string(), "model.components > add(Bar)");
//! ```
//!
//! # Rendering contract
//!
//! Segments are joined with exactly [`SEPARATOR`] (`" > "`), no leading or
//! trailing separator. Rendering writes into a caller-supplied
//! [`DescriptionSink`]; the only possible failure is the sink rejecting a
//! write, reported as [`DescribeError`] with the sink's error as its source.
//!
//! # Identity
//!
//! Descriptors compare and hash structurally: two nested descriptors are
//! equal when their parents and children are equal, and two leaves are
//! equal when their text is, however that text was produced.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::multiple_crate_versions,
    clippy::module_name_repetitions
)]

mod descriptor;
mod error;
mod leaf;
mod nested;
mod serializable;
mod sink;
/// printf-style templates used by deferred leaves.
pub mod template;

pub use descriptor::RuleDescriptor;
pub use error::DescribeError;
pub use leaf::LeafDescriptor;
/// Nesting and the `append` helpers.
pub use nested::{append, append_formatted, NestedDescriptor, SEPARATOR};
pub use serializable::SerializableDescriptor;
/// Sinks descriptors render into.
pub use sink::{DescriptionSink, FmtSink, IoSink};
pub use template::{format_template, TemplateArg};

/// Attribute a rule to `parent`, formatting its description eagerly with
/// Rust `format!` syntax.
///
/// ```
/// use echo_rule_describe::{append, RuleDescriptor};
///
/// let tasks = RuleDescriptor::leaf("model.tasks");
/// let rule = append!(&tasks, "create({})", "build");
/// assert_eq!(rule.to_string(), "model.tasks > create(build)");
/// ```
#[macro_export]
macro_rules! append {
    ($parent:expr, $($fmt:tt)+) => {
        $crate::append($parent, ::std::format!($($fmt)+))
    };
}

/// Build a [`RuleDescriptor`] leaf from a printf-style template that is only
/// formatted when first rendered.
///
/// ```
/// use echo_rule_describe::{deferred, RuleDescriptor};
///
/// let rule = deferred!("%s:%d", "x", 1);
/// assert_eq!(rule, RuleDescriptor::leaf("x:1"));
/// ```
#[macro_export]
macro_rules! deferred {
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::RuleDescriptor::deferred(
            $template,
            ::std::vec![$($crate::TemplateArg::from($arg)),*],
        )
    };
}
