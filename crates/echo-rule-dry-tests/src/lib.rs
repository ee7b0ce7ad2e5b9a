// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for Echo rule descriptor crates.
//!
//! # Modules
//!
//! - [`config`] - In-memory reporter settings store
//! - [`descriptors`] - Descriptor chain builders
//! - [`sinks`] - Description sinks that fail on demand or record writes
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
pub mod descriptors;
pub mod sinks;

pub use config::MemoryReportStore;
pub use descriptors::{chain, DescriptorChainBuilder};
pub use sinks::{FailingSink, RecordingSink};
