//! Import aliases.

use arborium_tree_sitter::Node;

use super::Converter;
use crate::diagnostics::DiagnosticKind;
use crate::lang::{child_of_kind, has_token, named_children};

impl<'a> Converter<'a> {
    /// Render imports as `import Name = a.b.Name;` lines, in source order.
    ///
    /// Block-listed imports (static and wildcard ones included) are dropped
    /// silently; other static and wildcard imports are dropped with a
    /// warning. Duplicates are kept; the bundler removes them once files
    /// are merged.
    pub fn render_imports(&mut self, imports: &[Node<'_>]) -> String {
        let mut lines = Vec::new();

        for import in imports {
            let Some(path) = named_children(*import)
                .into_iter()
                .find(|c| matches!(c.kind(), "scoped_identifier" | "identifier"))
            else {
                continue;
            };
            let qualified = self.text(path);

            if self.config.is_blocked(qualified) {
                tracing::debug!(import = qualified, "import block-listed");
                continue;
            }
            if has_token(*import, "static") {
                self.warn(DiagnosticKind::StaticImport, *import, qualified);
                continue;
            }
            if child_of_kind(*import, "asterisk").is_some() {
                self.warn(DiagnosticKind::WildcardImport, *import, qualified);
                continue;
            }

            let alias = qualified.rsplit('.').next().unwrap_or(qualified);
            lines.push(format!("import {alias} = {qualified};"));
        }

        lines.join("\n")
    }
}
