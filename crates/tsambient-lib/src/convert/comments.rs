//! Doc comment extraction.

use arborium_tree_sitter::Node;

use super::Converter;

impl<'a> Converter<'a> {
    /// The `/** ... */` comment directly preceding `node`, re-indented.
    ///
    /// Returns an empty string when there is none; otherwise the comment
    /// lines each end with a newline.
    pub(super) fn doc_comment(&self, node: Node<'_>, indent: &str) -> String {
        let Some(prev) = node.prev_named_sibling() else {
            return String::new();
        };
        if prev.kind() != "block_comment" {
            return String::new();
        }
        let text = self.text(prev);
        if !text.starts_with("/**") {
            return String::new();
        }
        reindent(text, indent)
    }
}

/// Strip the original indentation of a block comment and apply `indent`.
///
/// Continuation lines starting with `*` are aligned one column in, so the
/// stars line up under the opening `/**`.
pub(super) fn reindent(comment: &str, indent: &str) -> String {
    let mut out = String::new();
    for (i, line) in comment.lines().enumerate() {
        let line = line.trim();
        out.push_str(indent);
        if i > 0 && line.starts_with('*') {
            out.push(' ');
        } else if i > 0 && !line.is_empty() {
            out.push_str("   ");
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}
