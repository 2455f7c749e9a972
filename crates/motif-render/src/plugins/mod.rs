//! Bundled node-renderer plugin sets.
//!
//! Renderers are dialect-specific and pluggable; this module carries the
//! sets shipped with motif. [`jinja_renderers`] re-emits the tree as macro
//! dialect source - the identity target, useful for template migration and
//! as the reference implementation of the plugin contract.

mod jinja;

pub use jinja::{
    jinja_renderers, BlockNodes, CommentNodes, ExpressionNodes, MacroNodes, StatementNodes,
    TextNodes,
};
