//! Scanning text for inline annotations.
//!
//! Each kind has its own pattern. A scan step searches all enabled patterns
//! from the same offset and keeps the earliest match; on an exact tie the
//! order of [`AnnotationKind::ALL`] decides.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static HIGHLIGHT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"==([^=]+)==").expect("valid highlight pattern"));
static SUPERSCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\^([^\^]+)\^").expect("valid superscript pattern"));
static SUBSCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"~([^~]+)~").expect("valid subscript pattern"));

/// The inline markup forms, in tie-break priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    Highlight,
    Superscript,
    Subscript,
}

impl AnnotationKind {
    pub const ALL: [AnnotationKind; 3] = [
        AnnotationKind::Highlight,
        AnnotationKind::Superscript,
        AnnotationKind::Subscript,
    ];

    /// Element tag the match is rewritten to.
    pub fn tag(self) -> &'static str {
        match self {
            AnnotationKind::Highlight => "mark",
            AnnotationKind::Superscript => "sup",
            AnnotationKind::Subscript => "sub",
        }
    }

    /// The kind whose element carries `tag`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Opening and closing delimiter.
    pub fn delimiter(self) -> &'static str {
        match self {
            AnnotationKind::Highlight => "==",
            AnnotationKind::Superscript => "^",
            AnnotationKind::Subscript => "~",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            AnnotationKind::Highlight => &HIGHLIGHT,
            AnnotationKind::Superscript => &SUPERSCRIPT,
            AnnotationKind::Subscript => &SUBSCRIPT,
        }
    }
}

/// One annotation found in a text value.
///
/// `start..end` is a half-open byte range covering the delimiters; `inner`
/// is the text between them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationMatch {
    pub kind: AnnotationKind,
    pub start: usize,
    pub end: usize,
    pub inner: String,
}

/// Find the earliest annotation of any of `kinds` at or after `offset`.
///
/// `kinds` is consulted in order and only a strictly earlier start replaces
/// the current candidate, so earlier kinds win ties.
pub fn next_match(text: &str, offset: usize, kinds: &[AnnotationKind]) -> Option<AnnotationMatch> {
    let mut best: Option<(AnnotationKind, regex::Match<'_>)> = None;

    for &kind in kinds {
        let Some(found) = kind.pattern().find_at(text, offset) else {
            continue;
        };
        let earlier = best.map_or(true, |(_, current)| found.start() < current.start());
        if earlier {
            best = Some((kind, found));
        }
    }

    best.map(|(kind, found)| {
        let delim = kind.delimiter().len();
        AnnotationMatch {
            kind,
            start: found.start(),
            end: found.end(),
            inner: text[found.start() + delim..found.end() - delim].to_string(),
        }
    })
}

/// Scan `text` from the start and return every annotation the rewrite would
/// extract, in order.
pub fn find_annotations(text: &str) -> Vec<AnnotationMatch> {
    scan(text, &AnnotationKind::ALL)
}

pub(crate) fn scan(text: &str, kinds: &[AnnotationKind]) -> Vec<AnnotationMatch> {
    let mut found = Vec::new();
    let mut offset = 0;
    while let Some(m) = next_match(text, offset, kinds) {
        offset = m.end;
        found.push(m);
    }
    found
}
