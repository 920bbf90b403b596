use std::path::PathBuf;

use arborium_tree_sitter as tree_sitter;
use tsambient_lib::lang;

use super::read_source;

pub struct TreeArgs {
    pub file: PathBuf,
    pub raw: bool,
    pub spans: bool,
}

pub fn run(args: TreeArgs) {
    let source = read_source(&args.file);
    let Some(tree) = lang::parse(&source) else {
        eprintln!("error: {}: parser produced no tree", args.file.display());
        std::process::exit(1);
    };
    print!("{}", dump_tree(&tree, &source, args.raw, args.spans));
}

pub fn dump_tree(tree: &tree_sitter::Tree, source: &str, raw: bool, spans: bool) -> String {
    let mut dump = Dump {
        source,
        raw,
        spans,
        out: String::new(),
    };
    dump.node(tree.root_node(), None, 0);
    dump.out.push('\n');
    dump.out
}

struct Dump<'s> {
    source: &'s str,
    raw: bool,
    spans: bool,
    out: String,
}

impl Dump<'_> {
    fn node(&mut self, node: tree_sitter::Node, field: Option<&str>, depth: usize) {
        let children = self.children(node);

        self.out.push_str(&"  ".repeat(depth));
        if let Some(field) = field {
            self.out.push_str(field);
            self.out.push_str(": ");
        }
        self.out.push('(');

        let kind = node.kind();
        if children.is_empty() {
            let text = lang::text(node, self.source);
            if text != kind {
                self.out.push_str(kind);
                self.out.push(' ');
            }
            self.out.push('"');
            self.out.push_str(&escape(text));
            self.out.push_str("\")");
            self.span(node);
            return;
        }

        self.out.push_str(kind);
        self.span(node);
        for (child, child_field) in children {
            self.out.push('\n');
            self.node(child, child_field, depth + 1);
        }
        self.out.push(')');
    }

    /// Children to print, with their field names. Anonymous tokens only in raw mode.
    fn children<'t>(&self, node: tree_sitter::Node<'t>) -> Vec<(tree_sitter::Node<'t>, Option<&'static str>)> {
        let mut children = Vec::new();
        let mut cursor = node.walk();
        if !cursor.goto_first_child() {
            return children;
        }
        loop {
            let child = cursor.node();
            if self.raw || child.is_named() {
                children.push((child, cursor.field_name()));
            }
            if !cursor.goto_next_sibling() {
                return children;
            }
        }
    }

    fn span(&mut self, node: tree_sitter::Node) {
        if !self.spans {
            return;
        }
        let (start, end) = (node.start_position(), node.end_position());
        self.out.push_str(&format!(
            " [{}:{}-{}:{}]",
            start.row, start.column, end.row, end.column
        ));
    }
}

/// Escape leaf text for a quoted literal. Java leaves carry at most
/// quotes, backslashes and line breaks from comments and text blocks.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}
