//! Per-file conversion: one Java compilation unit to one declaration blob.
//!
//! A blob starts with a `namespace <package>` line, followed by import
//! aliases, interface and class declarations in source order, then every
//! enum found in the file. Blocks are separated by a blank line.

mod comments;
mod declarations;
mod enums;
mod imports;
mod types;


use std::ops::Range;

use arborium_tree_sitter::Node;

use crate::config::Config;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::lang::{self, named_children};
use crate::query::{query, query_first};

pub use declarations::{DeclarationKind, DeclarationStyle};

/// A construct the renderers cannot express. Fatal for the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RenderError {
    pub message: String,
    /// Byte range of the offending node.
    pub range: Range<usize>,
}

impl RenderError {
    pub(crate) fn new(message: impl Into<String>, node: Node<'_>) -> Self {
        Self {
            message: message.into(),
            range: node.byte_range(),
        }
    }
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Output of converting one source file.
#[derive(Debug, Clone)]
pub struct FileOutput {
    pub namespace: String,
    /// The blob, namespace line first.
    pub text: String,
    /// Interfaces, classes and enums rendered.
    pub declarations: usize,
    /// Expected omissions met along the way.
    pub diagnostics: Diagnostics,
}

/// Dotted package name of a compilation unit.
pub fn package_name(root: Node<'_>, source: &str) -> Option<String> {
    let package = query_first(root, &["package_declaration"])?;
    named_children(package)
        .into_iter()
        .find(|c| matches!(c.kind(), "scoped_identifier" | "identifier"))
        .map(|name| lang::text(name, source).to_string())
}

/// Renders declarations of one source file against a configuration.
pub struct Converter<'a> {
    source: &'a str,
    config: &'a Config,
    diagnostics: Diagnostics,
}

impl<'a> Converter<'a> {
    pub fn new(source: &'a str, config: &'a Config) -> Self {
        Self {
            source,
            config,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Render the whole file under `namespace`.
    pub fn convert(mut self, root: Node<'_>, namespace: String) -> RenderResult<FileOutput> {
        let mut blocks = Vec::new();
        let mut declarations = 0;

        let imports = query(root, &["import_declaration"]);
        let imports = self.render_imports(&imports);
        if !imports.is_empty() {
            blocks.push(imports);
        }

        for child in named_children(root) {
            match child.kind() {
                "interface_declaration" | "class_declaration" => {
                    blocks.push(self.render_declaration(child)?);
                    declarations += 1;
                }
                "annotation_type_declaration" | "record_declaration" => {
                    let name = self.name_of(child).unwrap_or(child.kind());
                    self.warn(DiagnosticKind::UnsupportedTopLevel, child, name);
                }
                _ => {}
            }
        }

        let (enums, count) = self.render_enums(root)?;
        if count > 0 {
            blocks.push(enums);
            declarations += count;
        }

        let mut text = format!("namespace {namespace}\n");
        if !blocks.is_empty() {
            text.push('\n');
            text.push_str(&blocks.join("\n\n"));
            text.push('\n');
        }

        Ok(FileOutput {
            namespace,
            text,
            declarations,
            diagnostics: self.diagnostics,
        })
    }

    /// Diagnostics collected so far.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn text(&self, node: Node<'_>) -> &'a str {
        lang::text(node, self.source)
    }

    fn name_of(&self, node: Node<'_>) -> Option<&'a str> {
        node.child_by_field_name("name").map(|n| self.text(n))
    }

    fn warn(&mut self, kind: DiagnosticKind, node: Node<'_>, detail: &str) {
        tracing::warn!(
            kind = kind.fallback_message(),
            detail,
            start = node.start_byte(),
            "construct skipped"
        );
        self.diagnostics.report_with(kind, node.byte_range(), detail);
    }
}
