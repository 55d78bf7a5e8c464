//! Parsed document tree.

use serde::{Deserialize, Serialize};

/// A node of the document tree handed over by the markdown parser.
///
/// Serialized with a `type` tag so trees can be exchanged as JSON:
/// `{"type":"text","value":"hi"}` and
/// `{"type":"element","tag":"p","children":[...]}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DocumentNode {
    /// Raw inline text.
    Text { value: String },
    /// An element with ordered children.
    Element {
        tag: String,
        #[serde(default)]
        children: Vec<DocumentNode>,
    },
}

impl DocumentNode {
    pub fn text(value: impl Into<String>) -> Self {
        DocumentNode::Text {
            value: value.into(),
        }
    }

    pub fn element(tag: impl Into<String>, children: Vec<DocumentNode>) -> Self {
        DocumentNode::Element {
            tag: tag.into(),
            children,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, DocumentNode::Text { .. })
    }

    /// The value of a text node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DocumentNode::Text { value } => Some(value),
            DocumentNode::Element { .. } => None,
        }
    }

    /// The tag of an element node.
    pub fn tag(&self) -> Option<&str> {
        match self {
            DocumentNode::Text { .. } => None,
            DocumentNode::Element { tag, .. } => Some(tag),
        }
    }

    /// Children of an element; empty for text.
    pub fn children(&self) -> &[DocumentNode] {
        match self {
            DocumentNode::Text { .. } => &[],
            DocumentNode::Element { children, .. } => children,
        }
    }

    /// All text below this node, concatenated in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            DocumentNode::Text { value } => out.push_str(value),
            DocumentNode::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_shape() {
        let node = DocumentNode::element("p", vec![DocumentNode::text("hi")]);
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(
            json,
            r#"{"type":"element","tag":"p","children":[{"type":"text","value":"hi"}]}"#
        );
        let back: DocumentNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn element_without_children_field() {
        let node: DocumentNode = serde_json::from_str(r#"{"type":"element","tag":"br"}"#).unwrap();
        assert_eq!(node, DocumentNode::element("br", vec![]));
    }

    #[test]
    fn text_content_walks_tree() {
        let node = DocumentNode::element(
            "p",
            vec![
                DocumentNode::text("a "),
                DocumentNode::element("em", vec![DocumentNode::text("b")]),
                DocumentNode::text(" c"),
            ],
        );
        assert_eq!(node.text_content(), "a b c");
        assert_eq!(node.tag(), Some("p"));
        assert_eq!(node.children().len(), 3);
        assert!(node.children()[0].is_text());
        assert_eq!(node.children()[2].as_text(), Some(" c"));
    }
}
