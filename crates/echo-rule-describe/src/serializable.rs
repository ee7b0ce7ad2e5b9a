// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! UI-friendly serializable form of rule descriptors.
//!
//! With the `serde` feature, descriptors serialize as their rendered path
//! string. [`SerializableDescriptor`] additionally carries the segments for
//! tools that want to show the path as a breadcrumb.

use crate::RuleDescriptor;

/// Rendered path plus its segments, for diagnostics tooling.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SerializableDescriptor {
    /// Full description, segments joined with `" > "`.
    pub path: String,
    /// Segment texts in render order.
    pub segments: Vec<String>,
}

impl From<&RuleDescriptor> for SerializableDescriptor {
    fn from(descriptor: &RuleDescriptor) -> Self {
        Self {
            path: descriptor.description(),
            segments: descriptor
                .segments()
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

#[cfg(feature = "serde")]
mod impls {
    use serde::{Serialize, Serializer};

    use crate::{LeafDescriptor, NestedDescriptor, RuleDescriptor};

    impl Serialize for RuleDescriptor {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.description())
        }
    }

    impl Serialize for LeafDescriptor {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.text())
        }
    }

    impl Serialize for NestedDescriptor {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }
}
