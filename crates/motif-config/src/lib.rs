//! # Motif Config - Layered Export Configuration
//!
//! For one (entity, macro) pair, `motif-config` computes the fully merged
//! settings object driving an export. The layering lets a design-system-wide
//! default be overridden progressively - category conventions, per-macro
//! wildcard rules, then the export call's explicit settings - without any
//! layer repeating the others' keys.
//!
//! ## Pieces
//!
//! - [`value_at_path`]: dotted-path access into a `serde_json::Value` tree
//!   (the entity `properties` bag).
//! - [`wildcard_match`]: shell-style `*` matching for per-macro settings
//!   patterns.
//! - [`deep_merge`] / [`merge_into`]: the merge algorithm. Arrays combine
//!   **by index position** - `[1, 2]` merged with `[9]` yields `[9, 2]`,
//!   not a concatenation and not a wholesale replacement.
//! - [`Configuration`]: binds a repository, an entity, an optional macro and
//!   call-site settings; [`Configuration::macro_configuration`] assembles
//!   and merges the layer stack.
//! - [`ConfigurationScheme`]: the subclass hook - identifier, extra
//!   defaults, and a final refine pass.
//! - [`ExportConfiguration`]: the merged result handed to the parser,
//!   transformer and renderer. Recomputed per export call, never persisted.

mod configuration;
mod merge;
mod path;
mod pattern;
mod scheme;

pub use configuration::{Configuration, ExportConfiguration};
pub use merge::{deep_merge, merge_into};
pub use path::value_at_path;
pub use pattern::wildcard_match;
pub use scheme::{ConfigurationScheme, DefaultScheme};
