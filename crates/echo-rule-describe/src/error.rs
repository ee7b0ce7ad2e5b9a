// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error surfaced when a description sink rejects a write.

use std::io;

/// A description sink refused text while a descriptor was rendering into it.
///
/// This is the only failure a descriptor can report: descriptor logic itself
/// never fails, so an error always means the output destination broke. The
/// sink's [`io::Error`] is kept intact and exposed through
/// [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
#[error("[RULE_DESCRIBE_SINK] description sink rejected write: {source}")]
pub struct DescribeError {
    #[from]
    source: io::Error,
}

impl DescribeError {
    /// Borrow the sink's original error.
    pub fn io_error(&self) -> &io::Error {
        &self.source
    }

    /// Kind of the sink's original error.
    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }

    /// Unwrap into the sink's original error.
    pub fn into_io_error(self) -> io::Error {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn source_is_the_sink_error() {
        let err = DescribeError::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        let source = err.source().and_then(|s| s.downcast_ref::<io::Error>());
        assert_eq!(source.map(ToString::to_string).as_deref(), Some("pipe closed"));
        assert!(err.to_string().starts_with("[RULE_DESCRIBE_SINK]"));
        assert_eq!(err.into_io_error().kind(), io::ErrorKind::BrokenPipe);
    }
}
