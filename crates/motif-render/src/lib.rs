//! # Motif Render - Transform Passes and Renderer Dispatch
//!
//! The back half of the export pipeline:
//!
//! - [`Transformer`]: ordered passes of [`NodeTransform`] plugins rewriting
//!   the tree. Each plugin receives the previous plugin's output; a plugin
//!   may return a rewritten tree or the same one annotated in place.
//! - [`Renderer`]: dispatches each node to zero-or-more [`NodeRenderer`]
//!   plugins. The built-in list rule always gets first refusal - list nodes
//!   recurse into their children - and the registered plugins are then
//!   consulted in order under the claim/accumulate/stop protocol.
//!
//! ## Dispatch Protocol
//!
//! For each node, every plugin is asked `will_render`. A claiming plugin's
//! output is appended to the accumulator, then `should_stop_rendering`
//! decides whether later plugins still see the node (the default re-asks
//! `will_render`: a plugin that wants a node once stops the chain after
//! rendering it once). Plugins that claim without stopping act as
//! decorators around whatever later plugins contribute. A node no plugin
//! claims logs an error and yields empty text; one unsupported node does
//! not fail the whole export.
//!
//! ## Example
//!
//! ```rust
//! use motif_render::{plugins, Renderer};
//! use motif_ast::Node;
//! # use std::sync::Arc;
//! # use motif_config::ExportConfiguration;
//! # use motif_model::{Entity, EntityId, Site};
//!
//! let renderer = Renderer::new().with_plugins(plugins::jinja_renderers());
//! # let configuration = ExportConfiguration::new(
//! #     Arc::new(Entity::new(EntityId::new("Base", "element", "e-headline"))),
//! #     Arc::new(Site::new("Base")),
//! #     None,
//! #     serde_json::json!({}),
//! # );
//! let node = Node::list(vec![Node::text("Hi "), Node::expression("name")]);
//! assert_eq!(renderer.render_node(Some(&node), &configuration), "Hi {{ name }}");
//! ```

pub mod plugins;
mod render;
mod transform;

pub use render::{AdditionalFile, NodeRenderer, Renderer};
pub use transform::{NodeTransform, Transformer};
