//! The renderer dispatch protocol.

use tracing::error;

use motif_ast::Node;
use motif_config::ExportConfiguration;

/// A side-output artifact produced alongside the rendered text (shared
/// includes, manifests, ...). The file-writing layer decides where it lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdditionalFile {
    pub filename: String,
    pub contents: String,
}

impl AdditionalFile {
    pub fn new(filename: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            contents: contents.into(),
        }
    }
}

/// A plugin that claims and renders specific node kinds.
///
/// `render` receives the dispatching [`Renderer`] so plugins with nested
/// children (blocks, macro bodies) can recurse through the full dispatch
/// chain rather than hard-wiring their own descent.
///
/// Plugins holding per-export state keep it behind interior mutability and
/// clear it in [`reset`](Self::reset).
pub trait NodeRenderer: Send + Sync {
    /// Whether this plugin wants to render `node`. Must be side-effect free;
    /// the dispatcher may ask repeatedly.
    fn will_render(&self, node: &Node, configuration: &ExportConfiguration) -> bool;

    /// Renders `node` to output text.
    fn render(
        &self,
        node: &Node,
        configuration: &ExportConfiguration,
        renderer: &Renderer,
    ) -> String;

    /// Whether dispatch ends with this plugin's output. The default re-asks
    /// [`will_render`](Self::will_render): a plugin that wants the node once
    /// stops the chain after rendering it once. Decorator plugins return
    /// `false` to let later plugins contribute too.
    fn should_stop_rendering(&self, node: &Node, configuration: &ExportConfiguration) -> bool {
        self.will_render(node, configuration)
    }

    /// Clears any per-export internal state. Called once before each export.
    fn reset(&self, _configuration: &ExportConfiguration) {}

    /// Side-output artifacts this plugin accumulated during rendering.
    fn additional_files(&self) -> Vec<AdditionalFile> {
        Vec::new()
    }
}

/// Dispatches nodes to an ordered list of [`NodeRenderer`] plugins.
///
/// The built-in list rule sits ahead of every registered plugin: a list node
/// recurses into its children and concatenates their output in list order,
/// and no plugin is consulted for the list itself. Registered plugins then
/// see every non-list node in registration order.
#[derive(Default)]
pub struct Renderer {
    plugins: Vec<Box<dyn NodeRenderer>>,
    preface: String,
    postface: String,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plugin(mut self, plugin: Box<dyn NodeRenderer>) -> Self {
        self.plugins.push(plugin);
        self
    }

    pub fn with_plugins(mut self, plugins: Vec<Box<dyn NodeRenderer>>) -> Self {
        self.plugins.extend(plugins);
        self
    }

    /// Text emitted ahead of the rendered tree (target-dialect boilerplate).
    pub fn with_preface(mut self, preface: impl Into<String>) -> Self {
        self.preface = preface.into();
        self
    }

    /// Text emitted after the rendered tree.
    pub fn with_postface(mut self, postface: impl Into<String>) -> Self {
        self.postface = postface.into();
        self
    }

    /// Renders a whole tree, wrapped in the preface and postface.
    pub fn render(&self, node: Option<&Node>, configuration: &ExportConfiguration) -> String {
        format!(
            "{}{}{}",
            self.preface,
            self.render_node(node, configuration),
            self.postface
        )
    }

    /// The dispatch loop.
    ///
    /// 1. An absent node renders as empty text.
    /// 2. A list node recurses into its children (the built-in list rule).
    /// 3. Otherwise plugins are consulted in order: a plugin that answers
    ///    `will_render` contributes its output, and dispatch returns early
    ///    when it also answers `should_stop_rendering`.
    /// 4. Output from every contributing plugin is concatenated when none
    ///    stopped the chain.
    /// 5. A node no plugin claimed logs an error and yields empty text -
    ///    a configuration defect, not a fatal one.
    pub fn render_node(&self, node: Option<&Node>, configuration: &ExportConfiguration) -> String {
        let Some(node) = node else {
            return String::new();
        };

        if let Node::List { items } = node {
            return self.render_list(items, configuration);
        }

        let mut output = String::new();
        let mut handled = false;

        for plugin in &self.plugins {
            if !plugin.will_render(node, configuration) {
                continue;
            }
            handled = true;
            output.push_str(&plugin.render(node, configuration, self));
            if plugin.should_stop_rendering(node, configuration) {
                return output;
            }
        }

        if !handled {
            error!(kind = ?node.kind(), "no renderer claimed node");
        }
        output
    }

    /// Concatenates [`render_node`](Self::render_node) over a sequence.
    pub fn render_list(&self, items: &[Node], configuration: &ExportConfiguration) -> String {
        items
            .iter()
            .map(|item| self.render_node(Some(item), configuration))
            .collect()
    }

    /// Clears per-export state in every plugin.
    pub fn reset(&self, configuration: &ExportConfiguration) {
        for plugin in &self.plugins {
            plugin.reset(configuration);
        }
    }

    /// Collects side-output artifacts from every plugin, in plugin order.
    pub fn create_additional_files(&self) -> Vec<AdditionalFile> {
        self.plugins
            .iter()
            .flat_map(|plugin| plugin.additional_files())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use motif_ast::NodeKind;
    use motif_model::{Entity, EntityId, Site};

    fn configuration() -> ExportConfiguration {
        ExportConfiguration::new(
            Arc::new(Entity::new(EntityId::new("Base", "element", "e-headline"))),
            Arc::new(Site::new("Base")),
            None,
            serde_json::json!({}),
        )
    }

    /// Claims text nodes, emits a fixed marker, and stops or not on demand.
    struct Claimer {
        marker: &'static str,
        stop: bool,
    }

    impl NodeRenderer for Claimer {
        fn will_render(&self, node: &Node, _configuration: &ExportConfiguration) -> bool {
            node.is(NodeKind::Text)
        }

        fn render(
            &self,
            _node: &Node,
            _configuration: &ExportConfiguration,
            _renderer: &Renderer,
        ) -> String {
            self.marker.to_string()
        }

        fn should_stop_rendering(
            &self,
            _node: &Node,
            _configuration: &ExportConfiguration,
        ) -> bool {
            self.stop
        }
    }

    // ==================== Dispatch protocol ====================

    #[test]
    fn absent_node_renders_empty() {
        let renderer = Renderer::new();
        assert_eq!(renderer.render_node(None, &configuration()), "");
    }

    #[test]
    fn stopping_plugin_ends_the_chain() {
        let renderer = Renderer::new()
            .with_plugin(Box::new(Claimer { marker: "[P1]", stop: true }))
            .with_plugin(Box::new(Claimer { marker: "[P2]", stop: true }));

        let out = renderer.render_node(Some(&Node::text("x")), &configuration());
        assert_eq!(out, "[P1]");
    }

    #[test]
    fn non_stopping_plugin_decorates_later_output() {
        let renderer = Renderer::new()
            .with_plugin(Box::new(Claimer { marker: "[P1]", stop: false }))
            .with_plugin(Box::new(Claimer { marker: "[P2]", stop: true }));

        let out = renderer.render_node(Some(&Node::text("x")), &configuration());
        assert_eq!(out, "[P1][P2]");
    }

    #[test]
    fn chain_exhaustion_returns_the_accumulation() {
        let renderer = Renderer::new()
            .with_plugin(Box::new(Claimer { marker: "[P1]", stop: false }))
            .with_plugin(Box::new(Claimer { marker: "[P2]", stop: false }));

        let out = renderer.render_node(Some(&Node::text("x")), &configuration());
        assert_eq!(out, "[P1][P2]");
    }

    #[test]
    fn default_stop_reasks_will_render() {
        /// Claims text nodes and relies on the default stop behavior.
        struct Plain;
        impl NodeRenderer for Plain {
            fn will_render(&self, node: &Node, _: &ExportConfiguration) -> bool {
                node.is(NodeKind::Text)
            }
            fn render(&self, _: &Node, _: &ExportConfiguration, _: &Renderer) -> String {
                "[plain]".into()
            }
        }

        let renderer = Renderer::new()
            .with_plugin(Box::new(Plain))
            .with_plugin(Box::new(Claimer { marker: "[never]", stop: true }));

        let out = renderer.render_node(Some(&Node::text("x")), &configuration());
        assert_eq!(out, "[plain]");
    }

    #[test]
    fn unclaimed_node_yields_empty_text() {
        let renderer = Renderer::new().with_plugin(Box::new(Claimer { marker: "[P1]", stop: true }));
        let out = renderer.render_node(Some(&Node::expression("x")), &configuration());
        assert_eq!(out, "");
    }

    #[test]
    fn skipped_plugins_have_no_side_effects() {
        struct Counting {
            renders: AtomicUsize,
        }
        impl NodeRenderer for Counting {
            fn will_render(&self, node: &Node, _: &ExportConfiguration) -> bool {
                node.is(NodeKind::Expression)
            }
            fn render(&self, _: &Node, _: &ExportConfiguration, _: &Renderer) -> String {
                self.renders.fetch_add(1, Ordering::SeqCst);
                String::new()
            }
        }

        let counting = Arc::new(Counting { renders: AtomicUsize::new(0) });

        struct Shared(Arc<Counting>);
        impl NodeRenderer for Shared {
            fn will_render(&self, node: &Node, configuration: &ExportConfiguration) -> bool {
                self.0.will_render(node, configuration)
            }
            fn render(
                &self,
                node: &Node,
                configuration: &ExportConfiguration,
                renderer: &Renderer,
            ) -> String {
                self.0.render(node, configuration, renderer)
            }
        }

        let renderer = Renderer::new().with_plugin(Box::new(Shared(Arc::clone(&counting))));
        renderer.render_node(Some(&Node::text("not an expression")), &configuration());
        assert_eq!(counting.renders.load(Ordering::SeqCst), 0);
    }

    // ==================== List rule ====================

    #[test]
    fn list_nodes_recurse_in_order() {
        let renderer = Renderer::new().with_plugin(Box::new(Claimer { marker: "[t]", stop: true }));
        let list = Node::list(vec![Node::text("a"), Node::text("b"), Node::text("c")]);
        assert_eq!(renderer.render_node(Some(&list), &configuration()), "[t][t][t]");
    }

    #[test]
    fn nested_lists_flatten_through_recursion() {
        let renderer = Renderer::new().with_plugin(Box::new(Claimer { marker: "[t]", stop: true }));
        let list = Node::list(vec![
            Node::text("a"),
            Node::list(vec![Node::text("b"), Node::text("c")]),
        ]);
        assert_eq!(renderer.render_node(Some(&list), &configuration()), "[t][t][t]");
    }

    #[test]
    fn empty_list_renders_empty() {
        let renderer = Renderer::new();
        assert_eq!(
            renderer.render_node(Some(&Node::list(vec![])), &configuration()),
            ""
        );
    }

    // ==================== Wrapping and fan-out ====================

    #[test]
    fn preface_and_postface_wrap_output() {
        let renderer = Renderer::new()
            .with_plugin(Box::new(Claimer { marker: "body", stop: true }))
            .with_preface("<start>")
            .with_postface("<end>");

        let out = renderer.render(Some(&Node::text("x")), &configuration());
        assert_eq!(out, "<start>body<end>");
    }

    #[test]
    fn reset_fans_out_to_every_plugin() {
        struct Resettable(Arc<AtomicUsize>);
        impl NodeRenderer for Resettable {
            fn will_render(&self, _: &Node, _: &ExportConfiguration) -> bool {
                false
            }
            fn render(&self, _: &Node, _: &ExportConfiguration, _: &Renderer) -> String {
                String::new()
            }
            fn reset(&self, _: &ExportConfiguration) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let resets = Arc::new(AtomicUsize::new(0));
        let renderer = Renderer::new()
            .with_plugin(Box::new(Resettable(Arc::clone(&resets))))
            .with_plugin(Box::new(Resettable(Arc::clone(&resets))));

        renderer.reset(&configuration());
        assert_eq!(resets.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn additional_files_concatenate_in_plugin_order() {
        struct WithFiles(&'static str);
        impl NodeRenderer for WithFiles {
            fn will_render(&self, _: &Node, _: &ExportConfiguration) -> bool {
                false
            }
            fn render(&self, _: &Node, _: &ExportConfiguration, _: &Renderer) -> String {
                String::new()
            }
            fn additional_files(&self) -> Vec<AdditionalFile> {
                vec![AdditionalFile::new(self.0, "contents")]
            }
        }

        let renderer = Renderer::new()
            .with_plugin(Box::new(WithFiles("a.inc")))
            .with_plugin(Box::new(WithFiles("b.inc")));

        let files = renderer.create_additional_files();
        let names: Vec<&str> = files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, vec!["a.inc", "b.inc"]);
    }
}
