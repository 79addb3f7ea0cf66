use super::leaf::{PhraseFilter, PrefixFilter, RangeFilter, TermFilter, display_field};
use crate::encoding::{Token, number::GranularTerms};
use serde::Serialize;
use std::fmt;

/// A filter tree executed by the index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FilterNode {
    /// Matches every document.
    MatchAll,
    /// Matches no document.
    MatchNone,
    Term(TermFilter),
    /// String, boolean or null bounds.
    Range(RangeFilter<Token>),
    /// Numeric bounds, matched through terms of several precisions.
    GranularRange(RangeFilter<GranularTerms>),
    Phrase(PhraseFilter),
    Prefix(PrefixFilter),
    And(Vec<FilterNode>),
    Or(Vec<FilterNode>),
    Not(Box<FilterNode>),
}

impl FilterNode {
    pub fn term(field: impl Into<String>, token: Token) -> Self {
        FilterNode::Term(TermFilter::new(field, token))
    }

    pub fn and(children: Vec<FilterNode>) -> Self {
        FilterNode::And(children)
    }

    pub fn or(children: Vec<FilterNode>) -> Self {
        FilterNode::Or(children)
    }

    pub fn not(child: FilterNode) -> Self {
        FilterNode::Not(Box::new(child))
    }

    /// Return a deduplicated list of all mangled fields referenced in this filter.
    pub fn fields(&self) -> Vec<String> {
        let mut fields: Vec<String> = match self {
            FilterNode::MatchAll | FilterNode::MatchNone => Vec::new(),
            FilterNode::Term(t) => vec![t.field.clone()],
            FilterNode::Range(r) => vec![r.field().to_string()],
            FilterNode::GranularRange(r) => vec![r.field().to_string()],
            FilterNode::Phrase(p) => vec![p.field().to_string()],
            FilterNode::Prefix(p) => vec![p.field.clone()],
            FilterNode::And(children) | FilterNode::Or(children) => {
                children.iter().flat_map(|c| c.fields()).collect()
            }
            FilterNode::Not(child) => child.fields(),
        };
        fields.sort_unstable();
        fields.dedup();
        fields
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            FilterNode::And(children) | FilterNode::Or(children) => {
                1 + children.iter().map(FilterNode::depth).max().unwrap_or(0)
            }
            FilterNode::Not(child) => 1 + child.depth(),
            _ => 1,
        }
    }
}

fn join(children: &[FilterNode]) -> String {
    children
        .iter()
        .map(FilterNode::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for FilterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterNode::MatchAll => write!(f, "ALL"),
            FilterNode::MatchNone => write!(f, "EMPTY"),
            FilterNode::Term(t) => write!(f, "{t}"),
            FilterNode::Range(r) => write!(f, "{r}"),
            FilterNode::GranularRange(r) => write!(f, "{r}"),
            FilterNode::Phrase(p) => write!(f, "{p}"),
            FilterNode::Prefix(p) => write!(f, "{p}"),
            FilterNode::And(children) => write!(f, "AND({})", join(children)),
            FilterNode::Or(children) => write!(f, "OR({})", join(children)),
            FilterNode::Not(child) => write!(f, "NOT({child})"),
        }
    }
}

impl From<TermFilter> for FilterNode {
    fn from(t: TermFilter) -> Self {
        FilterNode::Term(t)
    }
}

impl From<RangeFilter<Token>> for FilterNode {
    fn from(r: RangeFilter<Token>) -> Self {
        FilterNode::Range(r)
    }
}

impl From<RangeFilter<GranularTerms>> for FilterNode {
    fn from(r: RangeFilter<GranularTerms>) -> Self {
        FilterNode::GranularRange(r)
    }
}

impl From<PhraseFilter> for FilterNode {
    fn from(p: PhraseFilter) -> Self {
        FilterNode::Phrase(p)
    }
}

impl From<PrefixFilter> for FilterNode {
    fn from(p: PrefixFilter) -> Self {
        FilterNode::Prefix(p)
    }
}

/// Printable list of mangled field names.
pub struct FieldList<'a>(pub &'a [String]);

impl fmt::Display for FieldList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.0.iter().map(|s| display_field(s)).collect::<Vec<_>>();
        write!(f, "{}", fields.join(", "))
    }
}
