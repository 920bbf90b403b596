//! Interface and class rendering.
//!
//! Each top-level declaration renders as one block: doc comment, header
//! with generics and parents, then members in source order. Whether
//! methods keep their names is decided once per declaration, see
//! [`DeclarationStyle`].

use arborium_tree_sitter::Node;

use super::types::{array_of, array_suffix};
use super::{Converter, RenderError, RenderResult};
use crate::diagnostics::DiagnosticKind;
use crate::lang::{child_of_kind, has_token, is_comment, named_children};

const MEMBER_INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Interface,
    Class,
}

impl DeclarationKind {
    fn from_node(node: Node<'_>) -> Option<Self> {
        match node.kind() {
            "interface_declaration" => Some(Self::Interface),
            "class_declaration" => Some(Self::Class),
            _ => None,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Self::Interface => "interface",
            Self::Class => "class",
        }
    }
}

/// How methods of a declaration render.
///
/// Function-shaped contracts (name or parent ending with the callback
/// suffix) expose their methods as bare call signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationStyle {
    Named,
    CallSignature,
}

struct Header<'a> {
    kind: DeclarationKind,
    name: &'a str,
    style: DeclarationStyle,
}

impl<'a> Converter<'a> {
    /// Render one top-level interface or class.
    pub fn render_declaration(&mut self, node: Node<'_>) -> RenderResult<String> {
        let kind = DeclarationKind::from_node(node).ok_or_else(|| {
            RenderError::new(
                format!("`{}` is not an interface or class", node.kind()),
                node,
            )
        })?;
        let name = self
            .name_of(node)
            .ok_or_else(|| RenderError::new("declaration without a name", node))?;

        let generics = match node.child_by_field_name("type_parameters") {
            Some(params) => self.render_type_parameters(params, true)?,
            None => String::new(),
        };

        let (extends, implements) = self.parents(node, kind)?;
        let style = self.style_for(name, extends.iter().chain(&implements).copied())?;
        tracing::debug!(name, ?kind, ?style, "rendering declaration");

        let mut out = self.doc_comment(node, "");
        if kind == DeclarationKind::Class && self.has_modifier(node, "abstract") {
            out.push_str("abstract ");
        }
        out.push_str(kind.keyword());
        out.push(' ');
        out.push_str(name);
        out.push_str(&generics);
        if !extends.is_empty() {
            out.push_str(" extends ");
            out.push_str(&self.render_type_list(&extends)?);
        }
        if !implements.is_empty() {
            out.push_str(" implements ");
            out.push_str(&self.render_type_list(&implements)?);
        }
        out.push_str(" {\n");

        let header = Header { kind, name, style };
        if let Some(body) = node.child_by_field_name("body") {
            self.render_body(body, &header, &mut out)?;
        }
        out.push('}');
        Ok(out)
    }

    /// Decide the declaration style from its name and parents.
    pub fn style_for<'n>(
        &self,
        name: &str,
        parents: impl IntoIterator<Item = Node<'n>>,
    ) -> RenderResult<DeclarationStyle> {
        let suffix = self.config.callback_suffix.as_str();
        if suffix.is_empty() {
            return Ok(DeclarationStyle::Named);
        }
        if name.ends_with(suffix) {
            return Ok(DeclarationStyle::CallSignature);
        }
        for parent in parents {
            if self.bare_name(parent)?.ends_with(suffix) {
                return Ok(DeclarationStyle::CallSignature);
            }
        }
        Ok(DeclarationStyle::Named)
    }

    /// Parent type nodes: `extends` list, then `implements` list.
    ///
    /// Interfaces may extend several interfaces; a class extends at most one.
    fn parents<'t>(
        &self,
        node: Node<'t>,
        kind: DeclarationKind,
    ) -> RenderResult<(Vec<Node<'t>>, Vec<Node<'t>>)> {
        match kind {
            DeclarationKind::Interface => {
                let extends = child_of_kind(node, "extends_interfaces")
                    .map(type_list)
                    .unwrap_or_default();
                Ok((extends, Vec::new()))
            }
            DeclarationKind::Class => {
                let extends = match node.child_by_field_name("superclass") {
                    Some(superclass) => {
                        let base = named_children(superclass).into_iter().next().ok_or_else(
                            || RenderError::new("superclass without a type", superclass),
                        )?;
                        vec![base]
                    }
                    None => Vec::new(),
                };
                let implements = node
                    .child_by_field_name("interfaces")
                    .map(type_list)
                    .unwrap_or_default();
                Ok((extends, implements))
            }
        }
    }

    fn render_type_list(&self, types: &[Node<'_>]) -> RenderResult<String> {
        let rendered = types
            .iter()
            .map(|t| self.render_type(*t))
            .collect::<RenderResult<Vec<_>>>()?;
        Ok(rendered.join(", "))
    }

    /// `<A, B extends Bound = Bound>`; bounded parameters default to their
    /// bound when `defaults` is set.
    fn render_type_parameters(&self, node: Node<'_>, defaults: bool) -> RenderResult<String> {
        let mut params = Vec::new();
        for param in named_children(node) {
            if param.kind() != "type_parameter" {
                continue;
            }
            let name = child_of_kind(param, "type_identifier")
                .map(|n| self.text(n))
                .ok_or_else(|| RenderError::new("type parameter without a name", param))?;

            let bound = match child_of_kind(param, "type_bound") {
                Some(bound) => {
                    let parts = named_children(bound)
                        .into_iter()
                        .map(|t| self.render_type(t))
                        .collect::<RenderResult<Vec<_>>>()?;
                    Some(parts.join(" & "))
                }
                None => None,
            };

            params.push(match bound {
                Some(bound) if defaults => format!("{name} extends {bound} = {bound}"),
                Some(bound) => format!("{name} extends {bound}"),
                None => name.to_string(),
            });
        }

        if params.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("<{}>", params.join(", ")))
    }

    fn render_body(&mut self, body: Node<'_>, header: &Header<'_>, out: &mut String) -> RenderResult<()> {
        let mut cursor = body.walk();
        let members: Vec<_> = body.children(&mut cursor).collect();

        for member in members {
            match member.kind() {
                "{" | "}" => {}
                _ if is_comment(member) => {}
                ";" => {
                    self.warn(DiagnosticKind::EmptyMember, member, header.name);
                }
                "method_declaration" => {
                    if !self.is_private(member) {
                        self.render_method(member, header, out)?;
                    }
                }
                "field_declaration" | "constant_declaration" => {
                    if !self.is_private(member) {
                        self.render_field(member, header, out)?;
                    }
                }
                "constructor_declaration" => {
                    if !self.is_private(member) {
                        self.render_constructor(member, out)?;
                    }
                }
                "class_declaration"
                | "interface_declaration"
                | "record_declaration"
                | "annotation_type_declaration" => {
                    let name = self.name_of(member).unwrap_or(member.kind());
                    self.warn(DiagnosticKind::NestedDeclaration, member, name);
                }
                "enum_declaration" => {
                    tracing::debug!(parent = header.name, "nested enum left to the enum renderer");
                }
                "static_initializer" | "block" => {
                    self.warn(DiagnosticKind::InitializerBlock, member, header.name);
                }
                other => {
                    return Err(RenderError::new(
                        format!("member `{other}` in `{}` has no ambient form", header.name),
                        member,
                    ));
                }
            }
        }
        Ok(())
    }

    fn render_method(&mut self, node: Node<'_>, header: &Header<'_>, out: &mut String) -> RenderResult<()> {
        let name = self
            .name_of(node)
            .ok_or_else(|| RenderError::new("method without a name", node))?;
        let result = node
            .child_by_field_name("type")
            .ok_or_else(|| RenderError::new(format!("method `{name}` without a result type"), node))?;
        let result = array_of(
            self.render_type(result)?,
            &array_suffix(node.child_by_field_name("dimensions")),
        );

        let generics = match node.child_by_field_name("type_parameters") {
            Some(params) => self.render_type_parameters(params, false)?,
            None => String::new(),
        };
        let params = self.render_parameters(node)?;

        out.push_str(&self.doc_comment(node, MEMBER_INDENT));
        out.push_str(MEMBER_INDENT);
        if header.kind == DeclarationKind::Class && self.has_modifier(node, "static") {
            out.push_str("static ");
        }
        if header.style == DeclarationStyle::Named {
            out.push_str(name);
        }
        out.push_str(&format!("{generics}({params}): {result};\n"));
        Ok(())
    }

    fn render_field(&mut self, node: Node<'_>, header: &Header<'_>, out: &mut String) -> RenderResult<()> {
        let ty = node
            .child_by_field_name("type")
            .ok_or_else(|| RenderError::new("field without a type", node))?;
        let ty = self.render_type(ty)?;
        let is_static =
            header.kind == DeclarationKind::Class && self.has_modifier(node, "static");

        out.push_str(&self.doc_comment(node, MEMBER_INDENT));
        for declarator in named_children(node) {
            if declarator.kind() != "variable_declarator" {
                continue;
            }
            let name = self
                .name_of(declarator)
                .ok_or_else(|| RenderError::new("field without a name", declarator))?;
            let dims = array_suffix(declarator.child_by_field_name("dimensions"));

            out.push_str(MEMBER_INDENT);
            if is_static {
                out.push_str("static ");
            }
            out.push_str(&format!("{name}: {};\n", array_of(ty.clone(), &dims)));
        }
        Ok(())
    }

    fn render_constructor(&mut self, node: Node<'_>, out: &mut String) -> RenderResult<()> {
        let params = self.render_parameters(node)?;
        out.push_str(&self.doc_comment(node, MEMBER_INDENT));
        out.push_str(&format!("{MEMBER_INDENT}constructor({params});\n"));
        Ok(())
    }

    /// `a: A, ...rest: B[]` for a method or constructor.
    fn render_parameters(&self, node: Node<'_>) -> RenderResult<String> {
        let Some(list) = node.child_by_field_name("parameters") else {
            return Ok(String::new());
        };

        let mut params = Vec::new();
        for param in named_children(list) {
            match param.kind() {
                "formal_parameter" => {
                    let name = self
                        .name_of(param)
                        .ok_or_else(|| RenderError::new("parameter without a name", param))?;
                    let ty = param
                        .child_by_field_name("type")
                        .ok_or_else(|| RenderError::new("parameter without a type", param))?;
                    let dims = array_suffix(param.child_by_field_name("dimensions"));
                    params.push(format!("{name}: {}", array_of(self.render_type(ty)?, &dims)));
                }
                "spread_parameter" => params.push(self.render_spread(param)?),
                "receiver_parameter" => {}
                other => {
                    return Err(RenderError::new(
                        format!("parameter `{other}` has no ambient form"),
                        param,
                    ));
                }
            }
        }
        Ok(params.join(", "))
    }

    fn render_spread(&self, param: Node<'_>) -> RenderResult<String> {
        let children = named_children(param);
        let declarator = children
            .iter()
            .find(|c| c.kind() == "variable_declarator")
            .ok_or_else(|| RenderError::new("variadic parameter without a name", param))?;
        let name = self
            .name_of(*declarator)
            .ok_or_else(|| RenderError::new("variadic parameter without a name", param))?;
        let ty = children
            .iter()
            .find(|c| {
                !matches!(
                    c.kind(),
                    "modifiers" | "variable_declarator" | "annotation" | "marker_annotation"
                )
            })
            .ok_or_else(|| RenderError::new("variadic parameter without a type", param))?;
        Ok(format!("...{name}: {}", array_of(self.render_type(*ty)?, "[]")))
    }

    fn has_modifier(&self, node: Node<'_>, keyword: &str) -> bool {
        child_of_kind(node, "modifiers").is_some_and(|m| has_token(m, keyword))
    }

    fn is_private(&self, node: Node<'_>) -> bool {
        self.has_modifier(node, "private")
    }
}

fn type_list(node: Node<'_>) -> Vec<Node<'_>> {
    match child_of_kind(node, "type_list") {
        Some(list) => named_children(list),
        None => Vec::new(),
    }
}
