//! # Motif AST - Macro-Dialect Syntax Trees
//!
//! `motif-ast` defines the tree the export pipeline flows through: a closed
//! set of node kinds ([`Node`], discriminated by [`NodeKind`]) plus the
//! [`Parser`] contract turning macro source text into a tree.
//!
//! The tree is deliberately small: the export pipeline rewrites and
//! re-emits macro *structure*, it does not evaluate templates. Expression
//! and statement interiors stay as raw text for the renderer plugins to
//! interpret per target dialect.
//!
//! [`JinjaParser`] is the default [`Parser`]: a tolerant tokenizer over
//! `{{ ... }}` / `{% ... %}` / `{# ... #}` delimiters and a block-stack pass
//! that pairs `{% macro %}` / `{% if %}` / `{% for %}` openers with their
//! `{% end... %}` closers.
//!
//! ## Example
//!
//! ```rust
//! use motif_ast::{JinjaParser, Node, NodeKind};
//!
//! let ast = JinjaParser::new()
//!     .parse_source("Hello {{ name }}!")
//!     .unwrap();
//!
//! assert!(ast.is(NodeKind::List));
//! if let Node::List { items } = &ast {
//!     assert_eq!(items.len(), 3);
//!     assert!(items[1].is(NodeKind::Expression));
//! }
//! ```

mod node;
mod parser;

pub use node::{Node, NodeKind};
pub use parser::{JinjaParser, ParseError, Parser};
