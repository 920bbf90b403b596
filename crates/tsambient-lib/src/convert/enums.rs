use arborium_tree_sitter::Node;

use super::{Converter, RenderError, RenderResult};
use crate::lang::named_children;
use crate::query::collect;

impl<'a> Converter<'a> {
    /// Render every enum under `root`, nested ones included, in discovery order.
    ///
    /// Constants get positional ordinals starting at 0. Enum-body fields,
    /// methods and constructor arguments are ignored. Returns the blocks
    /// joined by blank lines, and how many enums were rendered.
    pub fn render_enums(&self, root: Node<'_>) -> RenderResult<(String, usize)> {
        let enums = collect(root, "enum_declaration");
        let blocks = enums
            .iter()
            .map(|node| self.render_enum(*node))
            .collect::<RenderResult<Vec<_>>>()?;
        Ok((blocks.join("\n\n"), blocks.len()))
    }

    fn render_enum(&self, node: Node<'_>) -> RenderResult<String> {
        let name = self
            .name_of(node)
            .ok_or_else(|| RenderError::new("enum without a name", node))?;

        let mut out = self.doc_comment(node, "");
        out.push_str(&format!("enum {name} {{\n"));

        let constants = node
            .child_by_field_name("body")
            .map(named_children)
            .unwrap_or_default();
        let constants = constants.iter().filter(|c| c.kind() == "enum_constant");
        for (ordinal, constant) in constants.enumerate() {
            let constant_name = self
                .name_of(*constant)
                .ok_or_else(|| RenderError::new("enum constant without a name", *constant))?;
            out.push_str(&self.doc_comment(*constant, "  "));
            out.push_str(&format!("  {constant_name} = {ordinal},\n"));
        }

        out.push('}');
        Ok(out)
    }
}
