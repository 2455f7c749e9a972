//! # Motif - Design-System Macro Export
//!
//! Motif compiles reusable "macro" templates belonging to design-system
//! components ("entities") into target-specific output artifacts, with
//! per-macro, per-entity, per-site and global configuration overlays.
//!
//! One export flows through five stages:
//!
//! 1. **Resolve**: the [`GlobalRepository`] locates which macro, in which
//!    entity, on which site, the request refers to - honoring site
//!    extension, category exclusion and `used_by` listings.
//! 2. **Configure**: a [`Configuration`] deep-merges the settings layers,
//!    least to most specific.
//! 3. **Parse**: a [`Parser`] turns the macro source into a [`Node`] tree.
//! 4. **Transform**: the [`Transformer`] threads the tree through ordered
//!    rewrite passes.
//! 5. **Render**: the [`Renderer`] dispatches every node to its plugins
//!    under the claim/accumulate/stop protocol.
//!
//! The [`Exporter`] sequences the stages and is the one place a resolution
//! miss becomes a hard error; everywhere else, not-found is ordinary data.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use motif::{
//!     plugins, Entity, EntityCategory, EntityId, Exporter, GlobalRepository, JinjaParser,
//!     Macro, MemoryCategoryStore, MemoryEntityStore, MemorySiteStore, Renderer, Site,
//!     Transformer,
//! };
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), motif::ExportError> {
//! let sites = Arc::new(MemorySiteStore::new());
//! sites.insert(Site::new("Base"));
//! let categories = Arc::new(MemoryCategoryStore::new());
//! categories.insert(EntityCategory::new("element"));
//! let entities = Arc::new(MemoryEntityStore::new());
//! entities.insert(
//!     Entity::new(EntityId::new("Base", "element", "e-headline")).with_macro(
//!         Macro::new("e_headline", "Base")
//!             .with_content("{% macro e_headline(text) %}{{ text }}{% endmacro %}"),
//!     ),
//! );
//!
//! let exporter = Exporter::new(
//!     Arc::new(GlobalRepository::new(sites, categories, entities)),
//!     Box::new(JinjaParser::new()),
//!     Transformer::new(),
//!     Renderer::new().with_plugins(plugins::jinja_renderers()),
//! );
//!
//! let export = exporter.export("Base", "e_headline", json!({})).await?;
//! assert_eq!(
//!     export.contents,
//!     "{% macro e_headline(text) %}{{ text }}{% endmacro %}"
//! );
//! # Ok(())
//! # }
//! ```

mod error;
mod exporter;

pub use error::ExportError;
pub use exporter::{Export, Exporter};

// The entity graph
pub use motif_model::{
    ContentType, Entity, EntityAspect, EntityCategory, EntityId, Macro, MacroParameter, Site,
};

// Resolution
pub use motif_resolve::{
    AspectCache, CategoryStore, EntityStore, GlobalRepository, MemoryCategoryStore,
    MemoryEntityStore, MemorySiteStore, QueryMatch, SiteQuery, SiteStore,
};

// Configuration
pub use motif_config::{
    deep_merge, merge_into, value_at_path, wildcard_match, Configuration, ConfigurationScheme,
    DefaultScheme, ExportConfiguration,
};

// Trees and parsing
pub use motif_ast::{JinjaParser, Node, NodeKind, ParseError, Parser};

// Transforming and rendering
pub use motif_render::{plugins, AdditionalFile, NodeRenderer, NodeTransform, Renderer, Transformer};
