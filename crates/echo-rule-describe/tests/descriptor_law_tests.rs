// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use proptest::prelude::*;

use echo_rule_describe::{append, RuleDescriptor, TemplateArg, SEPARATOR};

fn hash_of(d: &RuleDescriptor) -> u64 {
    let mut h = DefaultHasher::new();
    d.hash(&mut h);
    h.finish()
}

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_.()]{0,8}"
}

/// Leaves built three ways (literal, template, supplier) so equality is
/// exercised across representations.
fn leaf() -> impl Strategy<Value = RuleDescriptor> {
    (segment(), 0..3u8).prop_map(|(text, how)| match how {
        0 => RuleDescriptor::leaf(text),
        1 => RuleDescriptor::deferred("%s", vec![TemplateArg::from(text)]),
        _ => RuleDescriptor::lazy(move || text.clone()),
    })
}

fn descriptor() -> impl Strategy<Value = RuleDescriptor> {
    leaf().prop_recursive(4, 24, 2, |inner| {
        (inner.clone(), inner).prop_map(|(p, c)| RuleDescriptor::nested(p, c))
    })
}

/// Rebuild `d` from scratch with literal leaves only.
fn rebuild(d: &RuleDescriptor) -> RuleDescriptor {
    match d {
        RuleDescriptor::Leaf(leaf) => RuleDescriptor::leaf(leaf.text().to_owned()),
        RuleDescriptor::Nested(n) => {
            RuleDescriptor::nested(rebuild(n.parent()), rebuild(n.child()))
        }
    }
}

proptest! {
    #[test]
    fn render_is_deterministic(d in descriptor()) {
        let first = d.description();
        let mut again = String::new();
        d.describe_to(&mut again).unwrap();
        prop_assert_eq!(&first, &again);
        prop_assert_eq!(first, d.to_string());
    }

    #[test]
    fn nested_render_law(p in descriptor(), c in descriptor()) {
        let nested = RuleDescriptor::nested(p.clone(), c.clone());
        prop_assert_eq!(
            nested.description(),
            format!("{}{}{}", p.description(), SEPARATOR, c.description())
        );
    }

    #[test]
    fn equality_is_structural(d in descriptor()) {
        let copy = rebuild(&d);
        prop_assert_eq!(&d, &copy);
        prop_assert_eq!(&copy, &d);
        prop_assert_eq!(hash_of(&d), hash_of(&copy));
    }

    #[test]
    fn equality_is_transitive(d in descriptor()) {
        let a = rebuild(&d);
        let b = rebuild(&a);
        prop_assert_eq!(&d, &a);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(&d, &b);
    }

    #[test]
    fn nested_equality_is_componentwise(
        p1 in descriptor(), c1 in descriptor(), p2 in descriptor(), c2 in descriptor()
    ) {
        let left = RuleDescriptor::nested(p1.clone(), c1.clone());
        let right = RuleDescriptor::nested(p2.clone(), c2.clone());
        prop_assert_eq!(left == right, p1 == p2 && c1 == c2);
        if left == right {
            prop_assert_eq!(hash_of(&left), hash_of(&right));
        }
    }

    #[test]
    fn leaf_equality_is_textual(a in leaf(), b in leaf()) {
        let text_equal = a.description() == b.description();
        prop_assert_eq!(a == b, text_equal);
        if text_equal {
            prop_assert_eq!(hash_of(&a), hash_of(&b));
        }
    }

    #[test]
    fn append_extends_the_path(p in descriptor(), a in segment(), b in segment()) {
        let path = append(&append(&p, a.clone()), b.clone());
        prop_assert_eq!(
            path.description(),
            format!("{} > {a} > {b}", p.description())
        );
        prop_assert_eq!(path.depth(), p.depth() + 2);
    }

    #[test]
    fn segments_join_to_the_description(d in descriptor()) {
        prop_assert_eq!(d.segments().join(SEPARATOR), d.description());
        prop_assert_eq!(d.segments().len(), d.depth());
    }

    #[test]
    fn deferred_matches_eager_formatting(s in segment(), n in any::<i64>()) {
        let lazy = RuleDescriptor::deferred("%s:%d", vec![s.clone().into(), n.into()]);
        prop_assert_eq!(lazy, RuleDescriptor::leaf(format!("{s}:{n}")));
    }
}
