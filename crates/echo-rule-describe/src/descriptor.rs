// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The rule descriptor value type.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::DescribeError;
use crate::leaf::LeafDescriptor;
use crate::nested::{self, NestedDescriptor, SEPARATOR};
use crate::sink::DescriptionSink;
use crate::template::TemplateArg;

/// Describes how a rule was reached, e.g. `model.components > add(Bar)`.
///
/// A descriptor is either a single [`LeafDescriptor`] or a
/// [`NestedDescriptor`] attributing a child description to a parent one.
/// Descriptors are immutable and cheap to clone; equality and hashing are
/// structural, so equal paths built independently can deduplicate in a
/// `HashSet` or key a `HashMap`.
///
/// Every traversal (rendering, comparison, hashing, drop) runs on the heap
/// rather than the call stack, so chains of any depth are safe.
#[derive(Clone, Debug)]
pub enum RuleDescriptor {
    /// One description segment.
    Leaf(LeafDescriptor),
    /// `parent > child`.
    Nested(NestedDescriptor),
}

impl RuleDescriptor {
    /// Leaf with literal text.
    pub fn leaf(text: impl Into<Cow<'static, str>>) -> Self {
        Self::Leaf(LeafDescriptor::new(text))
    }

    /// Leaf formatted from a printf-style template on first use.
    pub fn deferred(template: impl Into<Cow<'static, str>>, args: Vec<TemplateArg>) -> Self {
        Self::Leaf(LeafDescriptor::deferred(template, args))
    }

    /// Leaf whose text is produced by `supplier` on first use.
    pub fn lazy<F>(supplier: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self::Leaf(LeafDescriptor::lazy(supplier))
    }

    /// `parent > child`.
    pub fn nested(parent: impl Into<Self>, child: impl Into<Self>) -> Self {
        Self::Nested(NestedDescriptor::new(parent, child))
    }

    /// Attribute a rule described by `text` to this one.
    pub fn append(&self, text: impl Into<Cow<'static, str>>) -> Self {
        nested::append(self, text)
    }

    /// Attribute `child` to this rule.
    pub fn nest(&self, child: impl Into<Self>) -> Self {
        Self::nested(self.clone(), child)
    }

    /// Append the full description to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`DescribeError`] if, and only if, the sink rejects a write.
    /// Nothing after the rejected write is attempted.
    pub fn describe_to<S>(&self, sink: &mut S) -> Result<(), DescribeError>
    where
        S: DescriptionSink + ?Sized,
    {
        for piece in Pieces::new(self) {
            sink.append_str(piece.text())?;
        }
        Ok(())
    }

    /// The full description as an owned string.
    pub fn description(&self) -> String {
        Pieces::new(self).map(Piece::text).collect()
    }

    /// Leaf texts in render order.
    pub fn segments(&self) -> Vec<&str> {
        Pieces::new(self)
            .filter_map(|piece| match piece {
                Piece::Segment(text) => Some(text),
                Piece::Separator => None,
            })
            .collect()
    }

    /// Format every deferred leaf now.
    ///
    /// Afterwards rendering, comparing and hashing this descriptor run no
    /// templates or suppliers.
    pub fn materialize(&self) -> &Self {
        Pieces::new(self).for_each(|_| ());
        self
    }

    /// Number of segments in the rendered path.
    ///
    /// Deferred leaves are not materialized.
    pub fn depth(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            match node {
                Self::Leaf(_) => count += 1,
                Self::Nested(nested) => {
                    pending.push(nested.child());
                    pending.push(nested.parent());
                }
            }
        }
        count
    }

    /// The first segment rendered, i.e. the outermost rule.
    pub fn root_segment(&self) -> &str {
        let mut current = self;
        loop {
            match current {
                Self::Leaf(leaf) => return leaf.text(),
                Self::Nested(nested) => current = nested.parent(),
            }
        }
    }

    /// The leaf, if this descriptor is one.
    pub fn as_leaf(&self) -> Option<&LeafDescriptor> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Nested(_) => None,
        }
    }

    /// The nested composition, if this descriptor is one.
    pub fn as_nested(&self) -> Option<&NestedDescriptor> {
        match self {
            Self::Nested(nested) => Some(nested),
            Self::Leaf(_) => None,
        }
    }

    /// Whether this descriptor has a parent.
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Nested(_))
    }

    /// Whether both descriptors share the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Leaf(a), Self::Leaf(b)) => a.ptr_eq(b),
            (Self::Nested(a), Self::Nested(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl PartialEq for RuleDescriptor {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some(pair) = pending.pop() {
            match pair {
                (Self::Leaf(a), Self::Leaf(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (Self::Nested(a), Self::Nested(b)) => {
                    if !a.ptr_eq(b) {
                        pending.push((a.child(), b.child()));
                        pending.push((a.parent(), b.parent()));
                    }
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for RuleDescriptor {}

impl Hash for RuleDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Pre-order tags plus leaf text identify the tree shape exactly.
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            match node {
                Self::Leaf(leaf) => {
                    state.write_u8(0);
                    leaf.hash(state);
                }
                Self::Nested(nested) => {
                    state.write_u8(1);
                    pending.push(nested.child());
                    pending.push(nested.parent());
                }
            }
        }
    }
}

impl fmt::Display for RuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Pieces::new(self).try_for_each(|piece| f.write_str(piece.text()))
    }
}

/// One write of a rendered description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Piece<'a> {
    Segment(&'a str),
    Separator,
}

impl<'a> Piece<'a> {
    pub(crate) const fn text(self) -> &'a str {
        match self {
            Self::Segment(text) => text,
            Self::Separator => SEPARATOR,
        }
    }
}

enum Frame<'a> {
    Node(&'a RuleDescriptor),
    Separator,
}

/// Render-order walk over a descriptor tree with an explicit stack.
pub(crate) struct Pieces<'a> {
    stack: Vec<Frame<'a>>,
}

impl<'a> Pieces<'a> {
    pub(crate) fn new(root: &'a RuleDescriptor) -> Self {
        Self {
            stack: vec![Frame::Node(root)],
        }
    }

    pub(crate) fn nested(root: &'a NestedDescriptor) -> Self {
        let mut pieces = Self { stack: Vec::new() };
        pieces.push_nested(root);
        pieces
    }

    fn push_nested(&mut self, nested: &'a NestedDescriptor) {
        self.stack.push(Frame::Node(nested.child()));
        self.stack.push(Frame::Separator);
        self.stack.push(Frame::Node(nested.parent()));
    }
}

impl<'a> Iterator for Pieces<'a> {
    type Item = Piece<'a>;

    fn next(&mut self) -> Option<Piece<'a>> {
        loop {
            match self.stack.pop()? {
                Frame::Separator => return Some(Piece::Separator),
                Frame::Node(RuleDescriptor::Leaf(leaf)) => {
                    return Some(Piece::Segment(leaf.text()));
                }
                Frame::Node(RuleDescriptor::Nested(nested)) => self.push_nested(nested),
            }
        }
    }
}

impl From<LeafDescriptor> for RuleDescriptor {
    fn from(leaf: LeafDescriptor) -> Self {
        Self::Leaf(leaf)
    }
}

impl From<NestedDescriptor> for RuleDescriptor {
    fn from(nested: NestedDescriptor) -> Self {
        Self::Nested(nested)
    }
}

impl From<&'static str> for RuleDescriptor {
    fn from(text: &'static str) -> Self {
        Self::leaf(text)
    }
}

impl From<String> for RuleDescriptor {
    fn from(text: String) -> Self {
        Self::leaf(text)
    }
}

impl From<&RuleDescriptor> for RuleDescriptor {
    fn from(descriptor: &RuleDescriptor) -> Self {
        descriptor.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn leaf_and_nested_with_same_text_differ() {
        let flat = RuleDescriptor::leaf("a > b");
        let nested = RuleDescriptor::leaf("a").append("b");
        assert_eq!(flat.description(), nested.description());
        assert_ne!(flat, nested);
    }

    #[test]
    fn structure_matters_not_just_text() {
        let left = RuleDescriptor::nested(RuleDescriptor::leaf("a").append("b"), "c");
        let right = RuleDescriptor::nested("a", RuleDescriptor::leaf("b").append("c"));
        assert_eq!(left.description(), "a > b > c");
        assert_eq!(right.description(), "a > b > c");
        assert_ne!(left, right);
    }

    #[test]
    fn independently_built_paths_deduplicate() {
        let mut seen = HashSet::new();
        assert!(seen.insert(RuleDescriptor::leaf("model").append("tasks")));
        assert!(!seen.insert(RuleDescriptor::leaf("model").append("tasks")));
        assert!(seen.insert(RuleDescriptor::leaf("model").append("tasks").append("build")));
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn segments_depth_and_root() {
        let path = RuleDescriptor::nested(
            RuleDescriptor::leaf("a").append("b"),
            RuleDescriptor::leaf("c").append("d"),
        );
        assert_eq!(path.segments(), ["a", "b", "c", "d"]);
        assert_eq!(path.depth(), 4);
        assert_eq!(path.root_segment(), "a");
        assert!(path.is_nested());
        assert!(path.as_leaf().is_none());
    }

    #[test]
    fn materialize_runs_deferred_leaves() {
        let deferred = RuleDescriptor::deferred("%s", vec!["b".into()]);
        let path = RuleDescriptor::leaf("a").nest(deferred);
        let child = path
            .as_nested()
            .map(NestedDescriptor::child)
            .and_then(RuleDescriptor::as_leaf);
        assert!(child.is_some_and(|leaf| !leaf.is_materialized()));
        assert_eq!(path.materialize().description(), "a > b");
        assert!(child.is_some_and(LeafDescriptor::is_materialized));
    }

    #[test]
    fn clones_share_allocation() {
        let path = RuleDescriptor::leaf("a").append("b");
        let copy = path.clone();
        assert!(path.ptr_eq(&copy));
        assert!(!path.ptr_eq(&RuleDescriptor::leaf("a").append("b")));
    }
}
