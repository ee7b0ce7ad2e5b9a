// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Single-segment rule descriptions.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use crate::template::{format_template, TemplateArg};

type Supplier = Arc<dyn Fn() -> String + Send + Sync>;

/// Description of a single rule, e.g. `"apply rule Foo"`.
///
/// A leaf holds either literal text or a recipe for producing it: a
/// printf-style template with captured arguments, or a supplier closure.
/// Recipes run on first use and the result is cached, so creating a
/// descriptor for every registered rule stays cheap even though few of them
/// are ever rendered.
///
/// Equality and hashing use the materialized text: a deferred leaf equals a
/// literal leaf with the same resulting text.
#[derive(Clone)]
pub struct LeafDescriptor {
    inner: Arc<LeafInner>,
}

struct LeafInner {
    source: LeafSource,
    materialized: OnceLock<Box<str>>,
}

enum LeafSource {
    Literal(Cow<'static, str>),
    Template {
        template: Cow<'static, str>,
        args: Box<[TemplateArg]>,
    },
    Supplier(Supplier),
}

impl LeafDescriptor {
    /// Leaf with already-formatted text.
    pub fn new(text: impl Into<Cow<'static, str>>) -> Self {
        Self::from_source(LeafSource::Literal(text.into()))
    }

    /// Leaf formatted from `template` and `args` on first use.
    ///
    /// See [`crate::template`] for the placeholder grammar.
    pub fn deferred(template: impl Into<Cow<'static, str>>, args: Vec<TemplateArg>) -> Self {
        Self::from_source(LeafSource::Template {
            template: template.into(),
            args: args.into_boxed_slice(),
        })
    }

    /// Leaf whose text comes from `supplier`, called at most once.
    pub fn lazy<F>(supplier: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self::from_source(LeafSource::Supplier(Arc::new(supplier)))
    }

    fn from_source(source: LeafSource) -> Self {
        Self {
            inner: Arc::new(LeafInner {
                source,
                materialized: OnceLock::new(),
            }),
        }
    }

    /// The description text, materializing it if needed.
    pub fn text(&self) -> &str {
        match &self.inner.source {
            LeafSource::Literal(text) => text,
            LeafSource::Template { template, args } => self
                .inner
                .materialized
                .get_or_init(|| format_template(template, args).into_boxed_str()),
            LeafSource::Supplier(supplier) => self
                .inner
                .materialized
                .get_or_init(|| supplier().into_boxed_str()),
        }
    }

    /// Whether the text is available without running a template or supplier.
    pub fn is_materialized(&self) -> bool {
        matches!(self.inner.source, LeafSource::Literal(_))
            || self.inner.materialized.get().is_some()
    }

    /// Whether this leaf was built from a template or supplier.
    pub fn is_deferred(&self) -> bool {
        !matches!(self.inner.source, LeafSource::Literal(_))
    }

    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for LeafDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.text() == other.text()
    }
}

impl Eq for LeafDescriptor {}

impl Hash for LeafDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text().hash(state);
    }
}

impl fmt::Display for LeafDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl fmt::Debug for LeafDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LeafDescriptor").field(&self.text()).finish()
    }
}

impl From<&'static str> for LeafDescriptor {
    fn from(text: &'static str) -> Self {
        Self::new(text)
    }
}

impl From<String> for LeafDescriptor {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn literal_is_materialized_from_the_start() {
        let leaf = LeafDescriptor::new("apply rule Foo");
        assert!(leaf.is_materialized());
        assert!(!leaf.is_deferred());
        assert_eq!(leaf.text(), "apply rule Foo");
    }

    #[test]
    fn template_formats_on_first_use_only() {
        let leaf = LeafDescriptor::deferred("%s:%d", vec!["x".into(), 1.into()]);
        assert!(!leaf.is_materialized());
        assert_eq!(leaf.text(), "x:1");
        assert!(leaf.is_materialized());
        let first = leaf.text().as_ptr();
        assert_eq!(leaf.text().as_ptr(), first);
    }

    #[test]
    fn supplier_runs_once_across_clones() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let leaf = LeafDescriptor::lazy(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            "computed".to_owned()
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let copy = leaf.clone();
        assert_eq!(leaf.text(), "computed");
        assert_eq!(copy.text(), "computed");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn equality_ignores_how_text_was_produced() {
        let literal = LeafDescriptor::new("x:1");
        let template = LeafDescriptor::deferred("%s:%d", vec!["x".into(), 1.into()]);
        let supplied = LeafDescriptor::lazy(|| String::from("x:1"));
        assert_eq!(literal, template);
        assert_eq!(template, supplied);
        assert_ne!(literal, LeafDescriptor::new("x:2"));
    }
}
