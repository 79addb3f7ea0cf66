use super::range::RangeSpec;
use search_index::{
    FilterNode,
    filter::leaf::{PhraseFilter, PrefixFilter, TermFilter},
};

/// Target of a compilation walk.
///
/// The walker performs every check and hands each validated piece to the
/// builder, so a builder that discards its input validates exactly what a
/// materializing one would accept.
pub trait FilterBuilder {
    /// What one compiled node turns into.
    type Node;

    fn match_all(&self) -> Self::Node;
    fn match_none(&self) -> Self::Node;
    fn term(&self, term: TermFilter) -> Self::Node;
    fn range(&self, range: RangeSpec) -> Self::Node;
    fn phrase(&self, phrase: PhraseFilter) -> Self::Node;
    fn prefix(&self, prefix: PrefixFilter) -> Self::Node;
    fn and(&self, children: Vec<Self::Node>) -> Self::Node;
    fn or(&self, children: Vec<Self::Node>) -> Self::Node;
    fn not(&self, child: Self::Node) -> Self::Node;
}

/// Builds the filter tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeBuilder;

impl FilterBuilder for NodeBuilder {
    type Node = FilterNode;

    fn match_all(&self) -> FilterNode {
        FilterNode::MatchAll
    }

    fn match_none(&self) -> FilterNode {
        FilterNode::MatchNone
    }

    fn term(&self, term: TermFilter) -> FilterNode {
        term.into()
    }

    fn range(&self, range: RangeSpec) -> FilterNode {
        range.into()
    }

    fn phrase(&self, phrase: PhraseFilter) -> FilterNode {
        phrase.into()
    }

    fn prefix(&self, prefix: PrefixFilter) -> FilterNode {
        prefix.into()
    }

    fn and(&self, children: Vec<FilterNode>) -> FilterNode {
        FilterNode::and(children)
    }

    fn or(&self, children: Vec<FilterNode>) -> FilterNode {
        FilterNode::or(children)
    }

    fn not(&self, child: FilterNode) -> FilterNode {
        FilterNode::not(child)
    }
}

/// Accepts everything and keeps nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunBuilder;

impl FilterBuilder for DryRunBuilder {
    type Node = ();

    fn match_all(&self) {}
    fn match_none(&self) {}
    fn term(&self, _term: TermFilter) {}
    fn range(&self, _range: RangeSpec) {}
    fn phrase(&self, _phrase: PhraseFilter) {}
    fn prefix(&self, _prefix: PrefixFilter) {}
    fn and(&self, _children: Vec<()>) {}
    fn or(&self, _children: Vec<()>) {}
    fn not(&self, _child: ()) {}
}
