//! Type reference rendering.

use arborium_tree_sitter::Node;

use super::{Converter, RenderError, RenderResult};
use crate::lang::named_children;

impl<'a> Converter<'a> {
    /// Render one type reference as a target type expression.
    ///
    /// The result depends only on the node's shape and the override table.
    pub fn render_type(&self, node: Node<'_>) -> RenderResult<String> {
        match node.kind() {
            "integral_type" | "floating_point_type" => Ok("number".to_string()),
            "boolean_type" => Ok("boolean".to_string()),
            "void_type" => Ok("void".to_string()),
            "type_identifier" | "scoped_type_identifier" => {
                let name = self.bare_name(node)?;
                Ok(self.reference(name, Vec::new()))
            }
            "generic_type" => {
                let mut children = named_children(node).into_iter();
                let head = children
                    .next()
                    .ok_or_else(|| RenderError::new("generic type without a name", node))?;
                let name = self.bare_name(head)?;

                let mut args = Vec::new();
                for list in children.filter(|c| c.kind() == "type_arguments") {
                    for arg in named_children(list) {
                        args.push(self.render_type(arg)?);
                    }
                }
                Ok(self.reference(name, args))
            }
            "array_type" => {
                let element = node
                    .child_by_field_name("element")
                    .ok_or_else(|| RenderError::new("array type without an element", node))?;
                let element = self.render_type(element)?;
                let suffix = array_suffix(node.child_by_field_name("dimensions"));
                Ok(array_of(element, &suffix))
            }
            "wildcard" => {
                let bound = named_children(node)
                    .into_iter()
                    .find(|c| !matches!(c.kind(), "super" | "annotation" | "marker_annotation"));
                match bound {
                    Some(bound) => self.render_type(bound),
                    None => Ok("unknown".to_string()),
                }
            }
            "annotated_type" => {
                let inner = named_children(node)
                    .into_iter()
                    .rfind(|c| !matches!(c.kind(), "annotation" | "marker_annotation"))
                    .ok_or_else(|| RenderError::new("annotated type without a type", node))?;
                self.render_type(inner)
            }
            other => Err(RenderError::new(
                format!("type `{other}` has no ambient form"),
                node,
            )),
        }
    }

    /// Bare (unqualified) name of a named type reference.
    pub(super) fn bare_name(&self, node: Node<'_>) -> RenderResult<&'a str> {
        match node.kind() {
            "type_identifier" => Ok(self.text(node)),
            "scoped_type_identifier" => named_children(node)
                .into_iter()
                .rfind(|c| c.kind() == "type_identifier")
                .map(|c| self.text(c))
                .ok_or_else(|| RenderError::new("unresolvable type name", node)),
            "generic_type" => match named_children(node).first() {
                Some(head) => self.bare_name(*head),
                None => Err(RenderError::new("unresolvable type name", node)),
            },
            _ => Err(RenderError::new("unresolvable type name", node)),
        }
    }

    fn reference(&self, name: &str, args: Vec<String>) -> String {
        if let Some(spelling) = self.config.spelling(name) {
            return spelling.to_string();
        }
        if args.is_empty() {
            return name.to_string();
        }
        format!("{name}<{}>", args.join(", "))
    }
}

/// Append an array suffix, wrapping function and union spellings so the
/// suffix binds to the whole element.
pub(super) fn array_of(element: String, suffix: &str) -> String {
    if suffix.is_empty() {
        return element;
    }
    if element.contains("=>") || element.contains('|') || element.contains('&') {
        format!("({element}){suffix}")
    } else {
        format!("{element}{suffix}")
    }
}

/// One `[]` per bracket pair in a `dimensions` node.
pub(super) fn array_suffix(dimensions: Option<Node<'_>>) -> String {
    let Some(dimensions) = dimensions else {
        return String::new();
    };
    let mut cursor = dimensions.walk();
    let count = dimensions
        .children(&mut cursor)
        .filter(|c| c.kind() == "[")
        .count();
    "[]".repeat(count)
}
