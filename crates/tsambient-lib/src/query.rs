//! Kind-path queries over syntax trees.
//!
//! A path `[K1, .., Kn]` is evaluated loosely: collect every `K1` node
//! under the root, then evaluate `[K2, .., Kn]` against each named child of
//! every match. Intermediate hops are not filtered by kind, so `K2` may sit
//! at any depth below `K1`.

use arborium_tree_sitter::Node;

use crate::lang::named_children;

/// Evaluate a kind path against `root`.
///
/// Results keep discovery order (depth-first, pre-order). A match with no
/// named children contributes nothing to deeper hops. An empty path
/// matches nothing.
pub fn query<'t>(root: Node<'t>, path: &[&str]) -> Vec<Node<'t>> {
    let Some((first, rest)) = path.split_first() else {
        return Vec::new();
    };

    let matches = collect(root, first);
    if rest.is_empty() {
        return matches;
    }

    matches
        .into_iter()
        .flat_map(named_children)
        .flat_map(|child| query(child, rest))
        .collect()
}

/// Every node of `kind` at or below `node`, depth-first in first-seen order.
pub fn collect<'t>(node: Node<'t>, kind: &str) -> Vec<Node<'t>> {
    let mut out = Vec::new();
    collect_into(node, kind, &mut out);
    out
}

/// First match of `path` under `root`.
pub fn query_first<'t>(root: Node<'t>, path: &[&str]) -> Option<Node<'t>> {
    query(root, path).into_iter().next()
}

fn collect_into<'t>(node: Node<'t>, kind: &str, out: &mut Vec<Node<'t>>) {
    if node.kind() == kind {
        out.push(node);
    }
    for child in named_children(node) {
        collect_into(child, kind, out);
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod query_tests;
