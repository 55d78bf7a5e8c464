//! Inline annotation pass for Jotter.
//!
//! Runs after the markdown parser has produced a document tree and before the
//! tree is rendered. Every text node is scanned for three lightweight markup
//! forms and split around them:
//!
//! | Syntax         | Element |
//! |----------------|---------|
//! | `==marked==`   | `mark`  |
//! | `^raised^`     | `sup`   |
//! | `~lowered~`    | `sub`   |
//!
//! Text directly inside those elements is treated as already extracted, so
//! the pass is idempotent. A bare text root with annotations comes back
//! wrapped in a `span` element.
//!
//! # Key Types
//!
//! - [`DocumentNode`] -- Text or element node of the parsed document
//! - [`Annotator`] / [`AnnotatorConfig`] -- The tree rewrite pass
//! - [`AnnotationMatch`] / [`AnnotationKind`] -- Raw scan results

pub mod annotator;
pub mod node;
pub mod pattern;

pub use annotator::{annotate, Annotator, AnnotatorConfig, ROOT_WRAPPER_TAG};
pub use node::DocumentNode;
pub use pattern::{find_annotations, next_match, AnnotationKind, AnnotationMatch};
