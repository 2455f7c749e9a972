//! Macro-dialect re-emission plugins.
//!
//! One plugin per node kind; each claims exactly its kind and stops the
//! chain (the default `should_stop_rendering`). Block and macro plugins
//! recurse through the dispatching renderer, so mixing these with custom
//! plugins keeps the whole chain in play for nested nodes.

use motif_ast::{Node, NodeKind};
use motif_config::ExportConfiguration;

use crate::render::{NodeRenderer, Renderer};

/// Emits literal text verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNodes;

impl NodeRenderer for TextNodes {
    fn will_render(&self, node: &Node, _configuration: &ExportConfiguration) -> bool {
        node.is(NodeKind::Text)
    }

    fn render(
        &self,
        node: &Node,
        _configuration: &ExportConfiguration,
        _renderer: &Renderer,
    ) -> String {
        match node {
            Node::Text { content } => content.clone(),
            _ => String::new(),
        }
    }
}

/// Emits `{{ expression }}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionNodes;

impl NodeRenderer for ExpressionNodes {
    fn will_render(&self, node: &Node, _configuration: &ExportConfiguration) -> bool {
        node.is(NodeKind::Expression)
    }

    fn render(
        &self,
        node: &Node,
        _configuration: &ExportConfiguration,
        _renderer: &Renderer,
    ) -> String {
        match node {
            Node::Expression { expression } => format!("{{{{ {} }}}}", expression),
            _ => String::new(),
        }
    }
}

/// Emits `{# comment #}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentNodes;

impl NodeRenderer for CommentNodes {
    fn will_render(&self, node: &Node, _configuration: &ExportConfiguration) -> bool {
        node.is(NodeKind::Comment)
    }

    fn render(
        &self,
        node: &Node,
        _configuration: &ExportConfiguration,
        _renderer: &Renderer,
    ) -> String {
        match node {
            Node::Comment { content } => format!("{{# {} #}}", content),
            _ => String::new(),
        }
    }
}

/// Emits standalone statements, `{% name arguments %}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementNodes;

impl NodeRenderer for StatementNodes {
    fn will_render(&self, node: &Node, _configuration: &ExportConfiguration) -> bool {
        node.is(NodeKind::Statement)
    }

    fn render(
        &self,
        node: &Node,
        _configuration: &ExportConfiguration,
        _renderer: &Renderer,
    ) -> String {
        match node {
            Node::Statement { name, arguments } => tag(name, arguments),
            _ => String::new(),
        }
    }
}

/// Emits block statements with their body, `{% name %}...{% endname %}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockNodes;

impl NodeRenderer for BlockNodes {
    fn will_render(&self, node: &Node, _configuration: &ExportConfiguration) -> bool {
        node.is(NodeKind::Block)
    }

    fn render(
        &self,
        node: &Node,
        configuration: &ExportConfiguration,
        renderer: &Renderer,
    ) -> String {
        match node {
            Node::Block {
                name,
                arguments,
                body,
            } => format!(
                "{}{}{{% end{} %}}",
                tag(name, arguments),
                renderer.render_list(body, configuration),
                name
            ),
            _ => String::new(),
        }
    }
}

/// Emits macro definitions, `{% macro name(params) %}...{% endmacro %}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacroNodes;

impl NodeRenderer for MacroNodes {
    fn will_render(&self, node: &Node, _configuration: &ExportConfiguration) -> bool {
        node.is(NodeKind::Macro)
    }

    fn render(
        &self,
        node: &Node,
        configuration: &ExportConfiguration,
        renderer: &Renderer,
    ) -> String {
        match node {
            Node::Macro {
                name,
                parameters,
                body,
            } => format!(
                "{{% macro {}({}) %}}{}{{% endmacro %}}",
                name,
                parameters.join(", "),
                renderer.render_node(Some(body), configuration)
            ),
            _ => String::new(),
        }
    }
}

fn tag(name: &str, arguments: &str) -> String {
    if arguments.is_empty() {
        format!("{{% {} %}}", name)
    } else {
        format!("{{% {} {} %}}", name, arguments)
    }
}

/// The full re-emission set, one plugin per renderable kind.
pub fn jinja_renderers() -> Vec<Box<dyn NodeRenderer>> {
    vec![
        Box::new(TextNodes),
        Box::new(ExpressionNodes),
        Box::new(CommentNodes),
        Box::new(StatementNodes),
        Box::new(BlockNodes),
        Box::new(MacroNodes),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use motif_ast::JinjaParser;
    use motif_model::{Entity, EntityId, Site};

    fn configuration() -> ExportConfiguration {
        ExportConfiguration::new(
            Arc::new(Entity::new(EntityId::new("Base", "element", "e-headline"))),
            Arc::new(Site::new("Base")),
            None,
            serde_json::json!({}),
        )
    }

    fn renderer() -> Renderer {
        Renderer::new().with_plugins(jinja_renderers())
    }

    fn reemit(source: &str) -> String {
        let tree = JinjaParser::new().parse_source(source).unwrap();
        renderer().render_node(Some(&tree), &configuration())
    }

    #[test]
    fn each_kind_emits_its_syntax() {
        let configuration = configuration();
        let renderer = renderer();

        let cases = [
            (Node::text("plain"), "plain"),
            (Node::expression("name | upper"), "{{ name | upper }}"),
            (Node::comment("note"), "{# note #}"),
            (
                Node::Statement {
                    name: "set".into(),
                    arguments: "x = 1".into(),
                },
                "{% set x = 1 %}",
            ),
        ];
        for (node, expected) in cases {
            assert_eq!(renderer.render_node(Some(&node), &configuration), expected);
        }
    }

    #[test]
    fn blocks_recurse_through_the_dispatch_chain() {
        let out = reemit("{% if logged_in %}Hi {{ user }}{% endif %}");
        assert_eq!(out, "{% if logged_in %}Hi {{ user }}{% endif %}");
    }

    #[test]
    fn macro_definitions_round_trip() {
        let source = "{% macro e_headline(text, level=2) %}{{ text }}{% endmacro %}";
        assert_eq!(reemit(source), source);
    }

    #[test]
    fn whitespace_inside_delimiters_normalizes() {
        assert_eq!(reemit("{{   name   }}"), "{{ name }}");
        assert_eq!(reemit("{%  set x = 1  %}"), "{% set x = 1 %}");
    }

    #[test]
    fn mixed_documents_round_trip() {
        let source = "{# header #}{% macro card(title) %}{% if title %}{{ title }}{% else %}untitled{% endif %}{% endmacro %}";
        assert_eq!(reemit(source), source);
    }
}
