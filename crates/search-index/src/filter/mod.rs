use node::FilterNode;
use serde::{Serialize, Serializer};
use std::fmt;

pub mod leaf;
pub mod node;

/// A compiled condition, ready to hand to the index.
///
/// The index always receives a disjunction at the top, even for a single
/// condition, so the compiled root is kept inside a one-child `Or`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilter {
    root: FilterNode,
}

impl SearchFilter {
    pub fn with_root(root: FilterNode) -> Self {
        SearchFilter { root }
    }

    /// The compiled condition, without the top-level disjunction.
    pub fn root(&self) -> &FilterNode {
        &self.root
    }

    /// The tree as the index sees it.
    pub fn to_node(&self) -> FilterNode {
        FilterNode::Or(vec![self.root.clone()])
    }

    pub fn into_node(self) -> FilterNode {
        FilterNode::Or(vec![self.root])
    }

    pub fn fields(&self) -> Vec<String> {
        self.root.fields()
    }
}

impl fmt::Display for SearchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OR({})", self.root)
    }
}

impl Serialize for SearchFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_node().serialize(serializer)
    }
}
