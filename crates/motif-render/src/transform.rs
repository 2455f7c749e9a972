//! Ordered transform passes over the tree.

use motif_ast::Node;
use motif_config::ExportConfiguration;

/// One tree-rewriting plugin.
///
/// A transform receives the tree by value and returns the tree the next
/// plugin sees - rewritten, annotated, or untouched. The transformer is
/// agnostic to which.
pub trait NodeTransform: Send + Sync {
    fn transform(&self, node: Node, configuration: &ExportConfiguration) -> Node;
}

impl<F> NodeTransform for F
where
    F: Fn(Node, &ExportConfiguration) -> Node + Send + Sync,
{
    fn transform(&self, node: Node, configuration: &ExportConfiguration) -> Node {
        self(node, configuration)
    }
}

/// Runs ordered passes of [`NodeTransform`] plugins.
///
/// A pass is itself an ordered plugin list; a bare plugin added with
/// [`with_plugin`](Self::with_plugin) becomes a singleton pass. The tree is
/// threaded through every plugin of every pass in declaration order.
#[derive(Default)]
pub struct Transformer {
    passes: Vec<Vec<Box<dyn NodeTransform>>>,
}

impl Transformer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a singleton pass.
    pub fn with_plugin(mut self, plugin: Box<dyn NodeTransform>) -> Self {
        self.passes.push(vec![plugin]);
        self
    }

    /// Appends a pass of plugins run back to back.
    pub fn with_pass(mut self, plugins: Vec<Box<dyn NodeTransform>>) -> Self {
        self.passes.push(plugins);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Threads `node` through every plugin of every pass, in order.
    pub fn transform(&self, node: Node, configuration: &ExportConfiguration) -> Node {
        self.passes
            .iter()
            .flatten()
            .fold(node, |node, plugin| plugin.transform(node, configuration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use motif_model::{Entity, EntityId, Site};

    fn configuration() -> ExportConfiguration {
        ExportConfiguration::new(
            Arc::new(Entity::new(EntityId::new("Base", "element", "e-headline"))),
            Arc::new(Site::new("Base")),
            None,
            serde_json::json!({}),
        )
    }

    /// Appends a marker to every text node's content.
    struct Mark(&'static str);

    impl NodeTransform for Mark {
        fn transform(&self, node: Node, _configuration: &ExportConfiguration) -> Node {
            match node {
                Node::Text { content } => Node::text(format!("{}{}", content, self.0)),
                other => other,
            }
        }
    }

    #[test]
    fn empty_transformer_is_identity() {
        let transformer = Transformer::new();
        let node = Node::text("unchanged");
        assert_eq!(
            transformer.transform(node.clone(), &configuration()),
            node
        );
    }

    #[test]
    fn plugins_run_in_declaration_order() {
        let transformer = Transformer::new()
            .with_plugin(Box::new(Mark(".a")))
            .with_plugin(Box::new(Mark(".b")));

        let out = transformer.transform(Node::text("x"), &configuration());
        assert_eq!(out, Node::text("x.a.b"));
    }

    #[test]
    fn passes_flatten_in_order() {
        let transformer = Transformer::new()
            .with_pass(vec![Box::new(Mark(".1")), Box::new(Mark(".2"))])
            .with_plugin(Box::new(Mark(".3")));

        let out = transformer.transform(Node::text("x"), &configuration());
        assert_eq!(out, Node::text("x.1.2.3"));
    }

    #[test]
    fn closures_are_transforms() {
        let transformer = Transformer::new().with_plugin(Box::new(
            |node: Node, _configuration: &ExportConfiguration| match node {
                Node::Text { content } => Node::text(content.to_uppercase()),
                other => other,
            },
        ));

        let out = transformer.transform(Node::text("shout"), &configuration());
        assert_eq!(out, Node::text("SHOUT"));
    }

    #[test]
    fn structural_rewrites_flow_through() {
        // A plugin may return a different node kind entirely.
        let strip_comments = |node: Node, _: &ExportConfiguration| match node {
            Node::List { items } => Node::list(
                items
                    .into_iter()
                    .filter(|item| !matches!(item, Node::Comment { .. }))
                    .collect(),
            ),
            other => other,
        };

        let transformer = Transformer::new().with_plugin(Box::new(strip_comments));
        let out = transformer.transform(
            Node::list(vec![Node::comment("gone"), Node::text("kept")]),
            &configuration(),
        );
        assert_eq!(out, Node::list(vec![Node::text("kept")]));
    }
}
