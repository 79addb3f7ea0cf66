use crate::encoding::{Token, number::GranularTerms};
use serde::Serialize;
use std::{fmt, num::NonZeroUsize};

/// Render a mangled field name with its NUL separator made visible.
pub(crate) fn display_field(field: &str) -> String {
    field.replace('\0', "\\0")
}

/// Exact match of one term in one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermFilter {
    pub field: String,
    pub token: Token,
}

impl TermFilter {
    pub fn new(field: impl Into<String>, token: Token) -> Self {
        TermFilter {
            field: field.into(),
            token,
        }
    }
}

impl fmt::Display for TermFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TERM({}={})", display_field(&self.field), self.token)
    }
}

/// One side of a range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bound<T> {
    pub value: T,
    pub inclusive: bool,
}

impl<T> Bound<T> {
    pub fn inclusive(value: T) -> Self {
        Bound {
            value,
            inclusive: true,
        }
    }

    pub fn exclusive(value: T) -> Self {
        Bound {
            value,
            inclusive: false,
        }
    }
}

/// Which side of a range a bound sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Min,
    Max,
}

/// Range over one field. There is no way to build one without a bound.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeFilter<T> {
    field: String,
    min: Option<Bound<T>>,
    max: Option<Bound<T>>,
}

impl<T> RangeFilter<T> {
    pub fn single(field: impl Into<String>, side: Side, bound: Bound<T>) -> Self {
        let (min, max) = match side {
            Side::Min => (Some(bound), None),
            Side::Max => (None, Some(bound)),
        };
        RangeFilter {
            field: field.into(),
            min,
            max,
        }
    }

    pub fn between(field: impl Into<String>, min: Bound<T>, max: Bound<T>) -> Self {
        RangeFilter {
            field: field.into(),
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn min(&self) -> Option<&Bound<T>> {
        self.min.as_ref()
    }

    pub fn max(&self) -> Option<&Bound<T>> {
        self.max.as_ref()
    }

    /// The side of a one-sided range, `None` for a two-sided one.
    pub fn open_side(&self) -> Option<Side> {
        match (&self.min, &self.max) {
            (Some(_), None) => Some(Side::Min),
            (None, Some(_)) => Some(Side::Max),
            _ => None,
        }
    }

    /// Combine two one-sided ranges on the same field with opposite sides.
    /// Anything else is handed back untouched.
    pub fn merge(self, other: Self) -> Result<Self, (Self, Self)> {
        if self.field != other.field {
            return Err((self, other));
        }
        match (self.open_side(), other.open_side()) {
            (Some(Side::Min), Some(Side::Max)) => Ok(RangeFilter {
                field: self.field,
                min: self.min,
                max: other.max,
            }),
            (Some(Side::Max), Some(Side::Min)) => Ok(RangeFilter {
                field: self.field,
                min: other.min,
                max: self.max,
            }),
            _ => Err((self, other)),
        }
    }

    fn fmt_bounds(
        &self,
        f: &mut fmt::Formatter<'_>,
        name: &str,
        render: impl Fn(&T) -> String,
    ) -> fmt::Result {
        write!(f, "{name}({}", display_field(&self.field))?;
        if let Some(min) = &self.min {
            let op = if min.inclusive { ">=" } else { ">" };
            write!(f, ", {op}{}", render(&min.value))?;
        }
        if let Some(max) = &self.max {
            let op = if max.inclusive { "<=" } else { "<" };
            write!(f, ", {op}{}", render(&max.value))?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for RangeFilter<Token> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_bounds(f, "RANGE", Token::to_hex)
    }
}

impl fmt::Display for RangeFilter<GranularTerms> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_bounds(f, "GRANULAR_RANGE", |terms| terms.exact().to_hex())
    }
}

/// A phrase term and the number of positions skipped before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhraseTerm {
    pub term: String,
    pub gap_before: usize,
}

/// Ordered terms that must appear in one field with the given gaps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhraseFilter {
    field: String,
    terms: Vec<PhraseTerm>,
}

impl PhraseFilter {
    /// Start a phrase; the first term never has a gap.
    pub fn new(field: impl Into<String>, first: impl Into<String>) -> Self {
        PhraseFilter {
            field: field.into(),
            terms: vec![PhraseTerm {
                term: first.into(),
                gap_before: 0,
            }],
        }
    }

    pub fn push(mut self, term: impl Into<String>, gap_before: usize) -> Self {
        self.terms.push(PhraseTerm {
            term: term.into(),
            gap_before,
        });
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn terms(&self) -> &[PhraseTerm] {
        &self.terms
    }
}

impl fmt::Display for PhraseFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PHRASE({}", display_field(&self.field))?;
        for (i, t) in self.terms.iter().enumerate() {
            if i > 0 && t.gap_before > 0 {
                write!(f, ", +{} {}", t.gap_before, t.term)?;
            } else {
                write!(f, ", {}", t.term)?;
            }
        }
        write!(f, ")")
    }
}

/// Terms starting with `term`; only the first `scored_terms_limit` matches
/// take part in scoring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrefixFilter {
    pub field: String,
    pub term: String,
    pub scored_terms_limit: NonZeroUsize,
}

impl PrefixFilter {
    pub fn new(field: impl Into<String>, term: impl Into<String>, limit: NonZeroUsize) -> Self {
        PrefixFilter {
            field: field.into(),
            term: term.into(),
            scored_terms_limit: limit,
        }
    }
}

impl fmt::Display for PrefixFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PREFIX({}, {}*, limit={})",
            display_field(&self.field),
            self.term,
            self.scored_terms_limit
        )
    }
}
