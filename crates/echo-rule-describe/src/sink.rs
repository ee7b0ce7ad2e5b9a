// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Append-only text destinations that descriptors render into.

use std::fmt;
use std::io;

/// Append-only text destination supplied by the caller of
/// [`RuleDescriptor::describe_to`](crate::RuleDescriptor::describe_to).
///
/// Implementations report rejection as an [`io::Error`]; descriptors wrap it
/// in [`DescribeError`](crate::DescribeError) and stop rendering at the first
/// failed write. Concurrent writes into a single sink are the sink's concern.
pub trait DescriptionSink {
    /// Append `text` to the sink.
    fn append_str(&mut self, text: &str) -> io::Result<()>;
}

impl DescriptionSink for String {
    fn append_str(&mut self, text: &str) -> io::Result<()> {
        self.push_str(text);
        Ok(())
    }
}

impl DescriptionSink for Vec<u8> {
    fn append_str(&mut self, text: &str) -> io::Result<()> {
        self.extend_from_slice(text.as_bytes());
        Ok(())
    }
}

impl<S: DescriptionSink + ?Sized> DescriptionSink for &mut S {
    fn append_str(&mut self, text: &str) -> io::Result<()> {
        (**self).append_str(text)
    }
}

impl<S: DescriptionSink + ?Sized> DescriptionSink for Box<S> {
    fn append_str(&mut self, text: &str) -> io::Result<()> {
        (**self).append_str(text)
    }
}

/// Adapts any [`io::Write`] (files, sockets, stderr locks) into a sink.
#[derive(Debug)]
pub struct IoSink<W> {
    inner: W,
}

impl<W: io::Write> IoSink<W> {
    /// Wrap a writer.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Borrow the wrapped writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Return the wrapped writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> DescriptionSink for IoSink<W> {
    fn append_str(&mut self, text: &str) -> io::Result<()> {
        self.inner.write_all(text.as_bytes())
    }
}

/// Adapts any [`fmt::Write`] (including a `Formatter`) into a sink.
///
/// [`fmt::Error`] carries no detail, so it becomes an [`io::Error`] of kind
/// [`io::ErrorKind::Other`] whose source is the `fmt::Error` itself.
#[derive(Debug)]
pub struct FmtSink<W> {
    inner: W,
}

impl<W: fmt::Write> FmtSink<W> {
    /// Wrap a formatter or string-like writer.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Return the wrapped writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: fmt::Write> DescriptionSink for FmtSink<W> {
    fn append_str(&mut self, text: &str) -> io::Result<()> {
        self.inner.write_str(text).map_err(io::Error::other)
    }
}
