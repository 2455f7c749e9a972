//! The configuration hook seam.

use serde_json::{Map, Value};

/// Customization hooks for a [`Configuration`](crate::Configuration).
///
/// A scheme names the settings namespace it reads from entity properties
/// (`export.settings.<identifier>`), contributes defaults below every other
/// layer, and gets a final look at the merged result. The default
/// implementations are deliberately inert; target-dialect exporters override
/// what they need.
pub trait ConfigurationScheme: Send + Sync {
    /// Namespace under `export.settings.` this scheme reads.
    fn identifier(&self) -> &str {
        "default"
    }

    /// Defaults layered directly above the basics record.
    fn defaults(&self) -> Map<String, Value> {
        Map::new()
    }

    /// Final pass over the merged settings.
    fn refine(&self, merged: Value) -> Value {
        merged
    }
}

/// The inert scheme: `default` namespace, no defaults, identity refine.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultScheme;

impl ConfigurationScheme for DefaultScheme {}
