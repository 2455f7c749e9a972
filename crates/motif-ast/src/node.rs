//! The node sum type.

use serde::{Deserialize, Serialize};

/// Discriminant for [`Node`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    List,
    Text,
    Expression,
    Comment,
    Statement,
    Block,
    Macro,
}

/// One syntactic unit of a parsed macro.
///
/// The set of kinds is closed; renderers and transformers dispatch by
/// pattern matching (or the [`kind`](Node::kind)/[`is`](Node::is) helpers
/// where a match arm would be noise). Trees serialize to a `kind`-tagged
/// structure so tests can diff them as plain data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    /// An ordered sequence of sibling nodes; the root of every parse.
    List { items: Vec<Node> },

    /// Literal template text.
    Text { content: String },

    /// An output expression, `{{ ... }}`. The interior stays raw.
    Expression { expression: String },

    /// A comment, `{# ... #}`.
    Comment { content: String },

    /// A standalone statement tag, `{% set x = 1 %}`.
    Statement { name: String, arguments: String },

    /// A statement with a body, `{% if ... %} ... {% endif %}`.
    Block {
        name: String,
        arguments: String,
        body: Vec<Node>,
    },

    /// A macro definition, `{% macro name(params) %} ... {% endmacro %}`.
    Macro {
        name: String,
        parameters: Vec<String>,
        body: Box<Node>,
    },
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::List { .. } => NodeKind::List,
            Node::Text { .. } => NodeKind::Text,
            Node::Expression { .. } => NodeKind::Expression,
            Node::Comment { .. } => NodeKind::Comment,
            Node::Statement { .. } => NodeKind::Statement,
            Node::Block { .. } => NodeKind::Block,
            Node::Macro { .. } => NodeKind::Macro,
        }
    }

    pub fn is(&self, kind: NodeKind) -> bool {
        self.kind() == kind
    }

    pub fn list(items: Vec<Node>) -> Self {
        Node::List { items }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Node::Text {
            content: content.into(),
        }
    }

    pub fn expression(expression: impl Into<String>) -> Self {
        Node::Expression {
            expression: expression.into(),
        }
    }

    pub fn comment(content: impl Into<String>) -> Self {
        Node::Comment {
            content: content.into(),
        }
    }

    /// Depth-first search for a macro definition by name.
    pub fn find_macro(&self, name: &str) -> Option<&Node> {
        match self {
            Node::Macro {
                name: macro_name, ..
            } if macro_name == name => Some(self),
            Node::List { items } => items.iter().find_map(|item| item.find_macro(name)),
            Node::Block { body, .. } => body.iter().find_map(|item| item.find_macro(name)),
            Node::Macro { body, .. } => body.find_macro(name),
            _ => None,
        }
    }
}
