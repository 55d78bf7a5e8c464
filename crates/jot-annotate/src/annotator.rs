//! The annotation rewrite pass.
//!
//! The pass is a functional rewrite: it consumes a tree and returns a new one.
//! A text node with at least one annotation is replaced, at its position among
//! its siblings, by the plain spans and `mark`/`sup`/`sub` elements it splits
//! into. Nodes emitted by a replacement are not scanned again in the same
//! pass; the walk resumes at the sibling that followed the original node.
//!
//! Text directly inside a `mark`/`sup`/`sub` element is already extracted
//! and is never rescanned, so running the pass on its own output is a no-op.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::node::DocumentNode;
use crate::pattern::{next_match, AnnotationKind};

/// Tag of the element [`Annotator::annotate`] returns when the root itself
/// is an annotated text node.
pub const ROOT_WRAPPER_TAG: &str = "span";

/// Configuration for the annotation pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorConfig {
    /// Rewrite `==text==` to `mark`.
    pub highlight: bool,
    /// Rewrite `^text^` to `sup`.
    pub superscript: bool,
    /// Rewrite `~text~` to `sub`.
    pub subscript: bool,
    /// Elements whose whole subtree is left verbatim (e.g. `code`).
    pub skip_tags: BTreeSet<String>,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            highlight: true,
            superscript: true,
            subscript: true,
            skip_tags: BTreeSet::new(),
        }
    }
}

impl AnnotatorConfig {
    fn kinds(&self) -> Vec<AnnotationKind> {
        AnnotationKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                AnnotationKind::Highlight => self.highlight,
                AnnotationKind::Superscript => self.superscript,
                AnnotationKind::Subscript => self.subscript,
            })
            .collect()
    }
}

/// Rewrites inline annotations in a document tree.
#[derive(Clone, Debug)]
pub struct Annotator {
    kinds: Vec<AnnotationKind>,
    skip_tags: BTreeSet<String>,
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new(&AnnotatorConfig::default())
    }
}

impl Annotator {
    pub fn new(config: &AnnotatorConfig) -> Self {
        Self {
            kinds: config.kinds(),
            skip_tags: config.skip_tags.clone(),
        }
    }

    /// Rewrite every text node in the tree rooted at `root`.
    ///
    /// A root that is itself an annotated text node has no parent to splice
    /// into, so its pieces are wrapped in a [`ROOT_WRAPPER_TAG`] (`span`)
    /// element: `"x^2^"` comes back as
    /// `{"type":"element","tag":"span","children":[{"type":"text","value":"x"},{"type":"element","tag":"sup",...}]}`.
    /// A root text node without annotations is returned unchanged. Callers
    /// that want the bare sibling sequence should use
    /// [`Annotator::annotate_children`] instead.
    pub fn annotate(&self, root: DocumentNode) -> DocumentNode {
        let mut rewritten = 0;
        let out = match root {
            DocumentNode::Text { value } => match self.split_text(&value) {
                Some(parts) => {
                    rewritten += 1;
                    DocumentNode::element(ROOT_WRAPPER_TAG, parts)
                }
                None => DocumentNode::Text { value },
            },
            element => self.rewrite_node(element, &mut rewritten),
        };
        if rewritten > 0 {
            debug!(rewritten, "inline annotations applied");
        }
        out
    }

    /// Rewrite a sibling sequence, splicing annotated text nodes in place.
    pub fn annotate_children(&self, children: Vec<DocumentNode>) -> Vec<DocumentNode> {
        let mut rewritten = 0;
        let out = self.rewrite_children(children, false, &mut rewritten);
        if rewritten > 0 {
            debug!(rewritten, "inline annotations applied");
        }
        out
    }

    /// Split one text value around its annotations.
    ///
    /// Returns `None` when the text has no annotation, in which case the
    /// original node must be kept as is.
    pub fn split_text(&self, text: &str) -> Option<Vec<DocumentNode>> {
        let mut parts = Vec::new();
        let mut offset = 0;
        let mut matched = false;

        while let Some(m) = next_match(text, offset, &self.kinds) {
            matched = true;
            if m.start > offset {
                parts.push(DocumentNode::text(&text[offset..m.start]));
            }
            parts.push(DocumentNode::element(
                m.kind.tag(),
                vec![DocumentNode::text(m.inner)],
            ));
            offset = m.end;
        }

        if !matched {
            return None;
        }
        if offset < text.len() {
            parts.push(DocumentNode::text(&text[offset..]));
        }
        Some(parts)
    }

    fn rewrite_node(&self, node: DocumentNode, rewritten: &mut usize) -> DocumentNode {
        match node {
            DocumentNode::Element { tag, children } if !self.skip_tags.contains(&tag) => {
                let extracted = AnnotationKind::from_tag(&tag).is_some();
                let children = self.rewrite_children(children, extracted, rewritten);
                DocumentNode::Element { tag, children }
            }
            other => other,
        }
    }

    /// `extracted` marks the children of an annotation element, whose text
    /// is kept verbatim.
    fn rewrite_children(
        &self,
        children: Vec<DocumentNode>,
        extracted: bool,
        rewritten: &mut usize,
    ) -> Vec<DocumentNode> {
        let mut out = Vec::with_capacity(children.len());
        for child in children {
            match child {
                DocumentNode::Text { value } if extracted => out.push(DocumentNode::Text { value }),
                DocumentNode::Text { value } => match self.split_text(&value) {
                    Some(parts) => {
                        *rewritten += 1;
                        out.extend(parts);
                    }
                    None => out.push(DocumentNode::Text { value }),
                },
                element => out.push(self.rewrite_node(element, rewritten)),
            }
        }
        out
    }
}

/// Rewrite `root` with every annotation kind enabled.
pub fn annotate(root: DocumentNode) -> DocumentNode {
    Annotator::default().annotate(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> DocumentNode {
        DocumentNode::text(value)
    }

    fn el(tag: &str, children: Vec<DocumentNode>) -> DocumentNode {
        DocumentNode::element(tag, children)
    }

    fn paragraph(value: &str) -> DocumentNode {
        el("p", vec![text(value)])
    }

    #[test]
    fn highlight_in_middle() {
        let out = annotate(paragraph("a ==b== c"));
        assert_eq!(
            out,
            el(
                "p",
                vec![text("a "), el("mark", vec![text("b")]), text(" c")]
            )
        );
    }

    #[test]
    fn superscript_and_subscript() {
        let out = annotate(paragraph("^x^ ~y~"));
        assert_eq!(
            out,
            el(
                "p",
                vec![
                    el("sup", vec![text("x")]),
                    text(" "),
                    el("sub", vec![text("y")]),
                ]
            )
        );
    }

    #[test]
    fn plain_text_is_untouched() {
        let tree = el("root", vec![paragraph("nothing special here")]);
        assert_eq!(annotate(tree.clone()), tree);
    }

    #[test]
    fn lone_delimiters_are_untouched() {
        let tree = paragraph("a = b, x^2, ~approx");
        assert_eq!(annotate(tree.clone()), tree);
    }

    #[test]
    fn splice_preserves_sibling_order() {
        let tree = el(
            "p",
            vec![
                el("em", vec![text("lead")]),
                text("H~2~O"),
                el("strong", vec![text("tail")]),
            ],
        );
        let out = annotate(tree);
        assert_eq!(
            out,
            el(
                "p",
                vec![
                    el("em", vec![text("lead")]),
                    text("H"),
                    el("sub", vec![text("2")]),
                    text("O"),
                    el("strong", vec![text("tail")]),
                ]
            )
        );
    }

    #[test]
    fn nested_text_nodes_are_rewritten() {
        let tree = el(
            "root",
            vec![el(
                "ul",
                vec![el("li", vec![el("p", vec![text("E = mc^2^")])])],
            )],
        );
        let out = annotate(tree);
        let p = &out.children()[0].children()[0].children()[0];
        assert_eq!(
            p.children(),
            &[text("E = mc"), el("sup", vec![text("2")])]
        );
    }

    #[test]
    fn adjacent_matches_emit_no_empty_text() {
        let out = annotate(paragraph("==a==^b^~c~"));
        assert_eq!(
            out.children(),
            &[
                el("mark", vec![text("a")]),
                el("sup", vec![text("b")]),
                el("sub", vec![text("c")]),
            ]
        );
    }

    #[test]
    fn emitted_nodes_are_not_rescanned() {
        // The highlight's inner text holds a superscript; the pass must not
        // descend into what it just produced.
        let out = annotate(paragraph("==a^b^c=="));
        assert_eq!(out.children(), &[el("mark", vec![text("a^b^c")])]);
    }

    #[test]
    fn every_text_sibling_is_visited() {
        let tree = el("p", vec![text("^1^"), text("~2~"), text("==3==")]);
        let out = annotate(tree);
        assert_eq!(
            out.children(),
            &[
                el("sup", vec![text("1")]),
                el("sub", vec![text("2")]),
                el("mark", vec![text("3")]),
            ]
        );
    }

    #[test]
    fn rerun_is_idempotent() {
        let tree = el(
            "root",
            vec![
                paragraph("a ==b== c ^x^ and ~y~"),
                paragraph("plain"),
            ],
        );
        let once = annotate(tree);
        let twice = annotate(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn rerun_keeps_nested_delimiters_extracted() {
        let tree = el(
            "root",
            vec![
                paragraph("==a^b^c== and ^x~y~z^"),
                paragraph("~p==q==r~"),
            ],
        );
        let once = annotate(tree);
        assert_eq!(
            once.children()[0].children(),
            &[
                el("mark", vec![text("a^b^c")]),
                text(" and "),
                el("sup", vec![text("x~y~z")]),
            ]
        );
        let twice = annotate(once.clone());
        assert_eq!(once, twice);
        assert_eq!(annotate(twice.clone()), twice);
    }

    #[test]
    fn text_nested_deeper_in_annotation_is_rewritten() {
        // Only the direct text of a mark/sup/sub is treated as extracted.
        let tree = el("mark", vec![el("em", vec![text("^1^")])]);
        let out = annotate(tree);
        assert_eq!(
            out,
            el("mark", vec![el("em", vec![el("sup", vec![text("1")])])])
        );
    }

    #[test]
    fn root_text_is_wrapped() {
        let out = annotate(text("x^2^"));
        assert_eq!(
            out,
            el(ROOT_WRAPPER_TAG, vec![text("x"), el("sup", vec![text("2")])])
        );
        assert_eq!(out.tag(), Some("span"));
        assert_eq!(annotate(text("x")), text("x"));
    }

    #[test]
    fn skip_tags_leave_subtree_verbatim() {
        let config = AnnotatorConfig {
            skip_tags: ["code".to_string()].into_iter().collect(),
            ..Default::default()
        };
        let annotator = Annotator::new(&config);
        let tree = el(
            "p",
            vec![el("code", vec![text("a ~= b ~ c")]), text(" ~ok~")],
        );
        let out = annotator.annotate(tree);
        assert_eq!(
            out.children(),
            &[
                el("code", vec![text("a ~= b ~ c")]),
                text(" "),
                el("sub", vec![text("ok")]),
            ]
        );
    }

    #[test]
    fn disabled_kind_is_kept_as_text() {
        let config = AnnotatorConfig {
            highlight: false,
            ..Default::default()
        };
        let out = Annotator::new(&config).annotate(paragraph("==a== ^b^"));
        assert_eq!(
            out.children(),
            &[text("==a== "), el("sup", vec![text("b")])]
        );
    }

    #[test]
    fn annotate_children_splices_sequence() {
        let out = Annotator::default().annotate_children(vec![text("a"), text("^b^c")]);
        assert_eq!(out, vec![text("a"), el("sup", vec![text("b")]), text("c")]);
    }

    #[test]
    fn split_text_returns_none_without_match() {
        assert!(Annotator::default().split_text("hello").is_none());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: AnnotatorConfig =
            serde_json::from_str(r#"{"subscript":false,"skip_tags":["pre"]}"#).unwrap();
        assert!(config.highlight);
        assert!(!config.subscript);
        assert!(config.skip_tags.contains("pre"));
    }
}
