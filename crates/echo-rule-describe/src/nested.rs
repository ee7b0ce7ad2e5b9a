// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Parent/child composition of rule descriptions.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::sync::{Arc, LazyLock};

use crate::descriptor::Pieces;
use crate::error::DescribeError;
use crate::leaf::LeafDescriptor;
use crate::sink::DescriptionSink;
use crate::template::{format_template, TemplateArg};
use crate::RuleDescriptor;

/// Text written between a parent and its child.
///
/// Downstream tooling may split rendered paths on this exact string.
pub const SEPARATOR: &str = " > ";

/// A rule reached from inside another rule, rendered as `parent > child`.
///
/// Parent and child are shared, so one parent can head any number of
/// independent children without copying. Both are fixed at construction.
#[derive(Clone)]
pub struct NestedDescriptor {
    inner: Arc<NestedInner>,
}

struct NestedInner {
    parent: RuleDescriptor,
    child: RuleDescriptor,
}

impl Drop for NestedInner {
    fn drop(&mut self) {
        // Unlink uniquely owned descendants onto a heap list so a long
        // chain is freed in a loop instead of by nested drop calls.
        let mut orphans = Vec::new();
        detach(&mut self.parent, &mut orphans);
        detach(&mut self.child, &mut orphans);
        while let Some(mut inner) = orphans.pop() {
            detach(&mut inner.parent, &mut orphans);
            detach(&mut inner.child, &mut orphans);
        }
    }
}

/// Empty `slot`, queueing its nested node when this was the last owner.
fn detach(slot: &mut RuleDescriptor, orphans: &mut Vec<NestedInner>) {
    static VACANT: LazyLock<RuleDescriptor> = LazyLock::new(|| RuleDescriptor::leaf(""));

    if !slot.is_nested() {
        return;
    }
    let RuleDescriptor::Nested(nested) = mem::replace(slot, VACANT.clone()) else {
        return;
    };
    orphans.extend(Arc::into_inner(nested.inner));
}

impl NestedDescriptor {
    /// Compose `child` under `parent`.
    pub fn new(parent: impl Into<RuleDescriptor>, child: impl Into<RuleDescriptor>) -> Self {
        Self {
            inner: Arc::new(NestedInner {
                parent: parent.into(),
                child: child.into(),
            }),
        }
    }

    /// Compose a literal leaf `child_text` under `parent`.
    pub fn with_text(
        parent: impl Into<RuleDescriptor>,
        child_text: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(parent, LeafDescriptor::new(child_text))
    }

    /// The enclosing rule.
    pub fn parent(&self) -> &RuleDescriptor {
        &self.inner.parent
    }

    /// The rule reached from the parent.
    pub fn child(&self) -> &RuleDescriptor {
        &self.inner.child
    }

    /// Render `parent > child` into `sink`.
    ///
    /// Parent text is fully written before the separator and the child; the
    /// first rejected write stops rendering and is returned.
    pub fn describe_to<S>(&self, sink: &mut S) -> Result<(), DescribeError>
    where
        S: DescriptionSink + ?Sized,
    {
        for piece in Pieces::nested(self) {
            sink.append_str(piece.text())?;
        }
        Ok(())
    }

    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for NestedDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.inner.parent == other.inner.parent && self.inner.child == other.inner.child)
    }
}

impl Eq for NestedDescriptor {}

impl Hash for NestedDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.parent.hash(state);
        self.inner.child.hash(state);
    }
}

impl fmt::Display for NestedDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Pieces::nested(self).try_for_each(|piece| f.write_str(piece.text()))
    }
}

impl fmt::Debug for NestedDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NestedDescriptor")
            .field("parent", &self.inner.parent)
            .field("child", &self.inner.child)
            .finish()
    }
}

/// Attribute a rule described by `text` to `parent`.
pub fn append(parent: &RuleDescriptor, text: impl Into<Cow<'static, str>>) -> RuleDescriptor {
    NestedDescriptor::with_text(parent.clone(), text).into()
}

/// Like [`append`], formatting the printf-style `template` right away.
///
/// Use [`LeafDescriptor::deferred`] instead when the text may never be
/// rendered.
pub fn append_formatted(
    parent: &RuleDescriptor,
    template: &str,
    args: &[TemplateArg],
) -> RuleDescriptor {
    append(parent, format_template(template, args))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn render(d: &RuleDescriptor) -> String {
        let mut out = String::new();
        d.describe_to(&mut out).unwrap();
        out
    }

    #[test]
    fn renders_parent_separator_child() {
        let nested = NestedDescriptor::with_text("model.components", "add(Bar)");
        assert_eq!(render(&nested.into()), "model.components > add(Bar)");
    }

    #[test]
    fn appends_chain_left_to_right() {
        let root = RuleDescriptor::leaf("A");
        let path = append(&append(&root, "B"), "C");
        assert_eq!(render(&path), "A > B > C");
    }

    #[test]
    fn formatted_append_is_eager() {
        let root = RuleDescriptor::leaf("model");
        let path = append_formatted(&root, "%s(%d)", &["create".into(), 3.into()]);
        let child = path.as_nested().map(NestedDescriptor::child).unwrap();
        assert!(child.as_leaf().unwrap().is_materialized());
        assert_eq!(render(&path), "model > create(3)");
    }

    #[test]
    fn display_matches_rendering() {
        let path = append(&RuleDescriptor::leaf("a"), "b");
        assert_eq!(path.to_string(), render(&path));
    }

    #[test]
    fn shared_parent_with_many_children() {
        let parent = RuleDescriptor::leaf("tasks");
        let a = append(&parent, "a");
        let b = append(&parent, "b");
        assert_eq!(render(&a), "tasks > a");
        assert_eq!(render(&b), "tasks > b");
        assert_ne!(a, b);
        assert_eq!(a.as_nested().unwrap().parent(), b.as_nested().unwrap().parent());
    }
}
