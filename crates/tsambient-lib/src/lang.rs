//! Java parsing facade over tree-sitter.

use std::ops::Range;
use std::sync::LazyLock;

use arborium_tree_sitter::{Language, Node, Parser, Tree};

static JAVA: LazyLock<Language> = LazyLock::new(|| arborium_java::language().into());

/// The tree-sitter Java language.
pub fn java() -> &'static Language {
    &JAVA
}

/// Parse Java source into a tree-sitter tree.
///
/// Returns `None` only when tree-sitter gives up entirely; syntax errors
/// are represented inside the tree (see [`first_error`]).
pub fn parse(source: &str) -> Option<Tree> {
    let mut parser = Parser::new();
    parser.set_language(java()).ok()?;
    parser.parse(source, None)
}

/// Byte range of the first ERROR or MISSING node, in document order.
pub fn first_error(root: Node<'_>) -> Option<Range<usize>> {
    if !root.has_error() {
        return None;
    }
    if root.is_error() || root.is_missing() {
        return Some(root.byte_range());
    }

    let mut cursor = root.walk();
    let children: Vec<_> = root.children(&mut cursor).collect();
    children
        .into_iter()
        .find_map(first_error)
        .or(Some(root.byte_range()))
}

/// Source text covered by `node`.
pub fn text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    &source[node.byte_range()]
}

/// Named children of `node`, comments excluded.
pub fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !is_comment(*child))
        .collect()
}

/// First named child of `node` with the given kind.
pub fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    named_children(node).into_iter().find(|c| c.kind() == kind)
}

/// Whether any direct child (named or anonymous) of `node` has the given kind.
///
/// Modifier keywords such as `static` are anonymous tokens.
pub fn has_token(node: Node<'_>, kind: &str) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor).any(|c| c.kind() == kind)
}

pub fn is_comment(node: Node<'_>) -> bool {
    matches!(node.kind(), "block_comment" | "line_comment" | "comment")
}
