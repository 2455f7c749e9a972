//! Entities: single design-system components.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::macros::Macro;

/// Identity of an entity: owning site, category and name.
///
/// The slash-joined path string is the entity's uniqueness key across the
/// whole graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId {
    /// Owning site name.
    pub site: String,
    /// Category long name.
    pub category: String,
    /// Entity name, conventionally prefixed with the category short name
    /// (e.g. `e-headline` for an element).
    pub name: String,
}

impl EntityId {
    pub fn new(
        site: impl Into<String>,
        category: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            site: site.into(),
            category: category.into(),
            name: name.into(),
        }
    }

    /// The slash-joined `site/category/name` path string.
    pub fn path(&self) -> String {
        format!("{}/{}/{}", self.site, self.category, self.name)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.site, self.category, self.name)
    }
}

/// A single design-system component.
///
/// Entities are owned by exactly one site but may be visible under others:
/// either through the owning site's descendants (site extension) or through
/// an explicit `used_by` listing populated by the loader.
///
/// The `properties` bag is an arbitrary nested key/value tree addressable by
/// dotted paths; the export layer reads `export.settings.*` out of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    /// Sites that inherit this entity even though they do not own it.
    pub used_by: Vec<String>,
    /// Free-form configuration tree from the entity's definition file.
    pub properties: Value,
    /// Macros declared by this entity, in declaration order.
    pub macros: Vec<Arc<Macro>>,
}

impl Entity {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            used_by: Vec::new(),
            properties: Value::Null,
            macros: Vec::new(),
        }
    }

    pub fn used_by(mut self, site: impl Into<String>) -> Self {
        self.used_by.push(site.into());
        self
    }

    pub fn with_properties(mut self, properties: Value) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_macro(mut self, makro: Macro) -> Self {
        self.macros.push(Arc::new(makro));
        self
    }

    /// The uniqueness key, `site/category/name`.
    pub fn path_string(&self) -> String {
        self.id.path()
    }

    /// Whether `site` is listed as an explicit user of this entity.
    pub fn is_used_by(&self, site: &str) -> bool {
        self.used_by.iter().any(|s| s == site)
    }
}
