// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Description sinks for exercising render paths.

use echo_rule_describe::DescriptionSink;
use std::io;

/// Sink that accepts a fixed number of writes, then rejects every write.
///
/// Accepted text is kept so tests can check exactly what was emitted before
/// the failure.
#[derive(Debug)]
pub struct FailingSink {
    accept: usize,
    kind: io::ErrorKind,
    message: &'static str,
    attempts: usize,
    written: String,
}

impl FailingSink {
    /// Sink that accepts `accept` writes before failing with
    /// [`io::ErrorKind::BrokenPipe`].
    pub fn after(accept: usize) -> Self {
        Self {
            accept,
            kind: io::ErrorKind::BrokenPipe,
            message: "sink closed",
            attempts: 0,
            written: String::new(),
        }
    }

    /// Sink that rejects the first write.
    pub fn always() -> Self {
        Self::after(0)
    }

    /// Use `kind` and `message` for the injected error.
    pub fn with_error(mut self, kind: io::ErrorKind, message: &'static str) -> Self {
        self.kind = kind;
        self.message = message;
        self
    }

    /// Number of writes attempted, including rejected ones.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Text accepted before the first rejection.
    pub fn written(&self) -> &str {
        &self.written
    }
}

impl DescriptionSink for FailingSink {
    fn append_str(&mut self, text: &str) -> io::Result<()> {
        self.attempts += 1;
        if self.attempts > self.accept {
            return Err(io::Error::new(self.kind, self.message));
        }
        self.written.push_str(text);
        Ok(())
    }
}

/// Sink that records every write as a separate chunk.
#[derive(Debug, Default)]
pub struct RecordingSink {
    chunks: Vec<String>,
}

impl RecordingSink {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes in the order they arrived.
    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    /// All writes concatenated.
    pub fn text(&self) -> String {
        self.chunks.concat()
    }
}

impl DescriptionSink for RecordingSink {
    fn append_str(&mut self, text: &str) -> io::Result<()> {
        self.chunks.push(text.to_owned());
        Ok(())
    }
}
