//! # Motif Model - Design-System Entity Graph
//!
//! `motif-model` defines the data model the motif export pipeline operates
//! on: brands ("sites"), component groupings ("categories"), the components
//! themselves ("entities") and the reusable template fragments they declare
//! ("macros").
//!
//! Objects of this crate are constructed once by a loader and then held in
//! repositories for the process lifetime; nothing in here reads the
//! filesystem or mutates shared state.
//!
//! ## Core Concepts
//!
//! - [`Site`]: a brand/variant of the design system. Sites can extend a
//!   parent site and inherit its entities, minus excluded categories.
//! - [`EntityCategory`]: a grouping of entities (element, module, page, ...)
//!   with derived short and plural names.
//! - [`Entity`]: one design-system component, identified by
//!   site/category/name ([`EntityId`]) and carrying a free-form `properties`
//!   bag plus its declared [`Macro`]s.
//! - [`EntityAspect`]: a read-only view of an entity as seen from one
//!   specific site. Aspects never mutate the underlying entity.
//!
//! ## Quick Start
//!
//! ```rust
//! use motif_model::{Entity, EntityId, Macro, Site};
//!
//! let site = Site::new("Base");
//! let entity = Entity::new(EntityId::new("Base", "element", "e-headline"))
//!     .with_macro(
//!         Macro::new("e_headline", "Base")
//!             .with_content("{% macro e_headline(text) %}{{ text }}{% endmacro %}"),
//!     );
//!
//! assert_eq!(entity.path_string(), "Base/element/e-headline");
//! assert_eq!(entity.macros[0].name, "e_headline");
//! assert_eq!(site.name, "Base");
//! ```

mod aspect;
mod category;
mod entity;
mod macros;
mod site;

pub use aspect::EntityAspect;
pub use category::EntityCategory;
pub use entity::{Entity, EntityId};
pub use macros::{ContentType, Macro, MacroParameter};
pub use site::Site;
