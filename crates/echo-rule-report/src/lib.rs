// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Diagnostics for Echo rule descriptors.
//!
//! Engines attach a [`RuleDescriptor`](echo_rule_describe::RuleDescriptor)
//! to every rule. This crate turns those paths into log output: a
//! [`RuleReporter`] that warns once per distinct rule path, a
//! [`RuleFailure`] error that prefixes messages with the path, and the
//! [`ReportStore`] the reporter settings load from.
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

pub mod config;
mod failure;
mod fs_store;
mod reporter;
mod settings;

pub use config::{ReportConfigError, ReportStore};
pub use failure::RuleFailure;
pub use fs_store::FsReportStore;
pub use reporter::{ReportOutcome, RuleReporter};
pub use settings::{ReportConfig, ReportLevel, REPORT_CONFIG_KEY};
