//! Entity categories: element, module, page and friends.

use serde::{Deserialize, Serialize};

/// A grouping of entities.
///
/// Categories are addressable by three names: the long name ("element"),
/// a short name ("e", the prefix used in entity naming conventions such as
/// `e-headline`) and a plural name ("elements", used in path-like listings).
/// Short and plural names derive from the long name when the loader does not
/// provide them explicitly.
///
/// `priority` is the declaration order assigned by the backing store; it is
/// not meaningful until the category has been registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCategory {
    /// Primary category name, e.g. "element".
    pub long_name: String,

    /// Abbreviated name, e.g. "e". Derived from `long_name` when absent.
    pub short_name: String,

    /// Plural name, e.g. "elements". Derived from `long_name` when absent.
    pub plural_name: String,

    /// Global categories have at most one member per site (e.g. a single
    /// "doc" entity holding site-wide documentation).
    #[serde(default)]
    pub is_global: bool,

    /// Declaration order, assigned by the store at registration time.
    #[serde(default)]
    pub priority: usize,
}

impl EntityCategory {
    /// Creates a category with derived short and plural names.
    ///
    /// # Example
    ///
    /// ```rust
    /// use motif_model::EntityCategory;
    ///
    /// let category = EntityCategory::new("element");
    /// assert_eq!(category.short_name, "e");
    /// assert_eq!(category.plural_name, "elements");
    /// ```
    pub fn new(long_name: impl Into<String>) -> Self {
        let long_name = long_name.into();
        let short_name = derive_short_name(&long_name);
        let plural_name = derive_plural_name(&long_name);
        Self {
            long_name,
            short_name,
            plural_name,
            is_global: false,
            priority: 0,
        }
    }

    /// Overrides the derived short name.
    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = short_name.into();
        self
    }

    /// Overrides the derived plural name.
    pub fn with_plural_name(mut self, plural_name: impl Into<String>) -> Self {
        self.plural_name = plural_name.into();
        self
    }

    /// Marks the category as global (one member per site).
    pub fn global(mut self) -> Self {
        self.is_global = true;
        self
    }

    /// Whether `name` refers to this category by any of its names.
    ///
    /// Matching is case-sensitive, like the rest of the resolution layer.
    pub fn matches_name(&self, name: &str) -> bool {
        name == self.long_name || name == self.short_name || name == self.plural_name
    }
}

/// Derives the conventional short name: the long name's first character.
fn derive_short_name(long_name: &str) -> String {
    long_name.chars().take(1).collect()
}

/// Derives the plural name by appending "s".
fn derive_plural_name(long_name: &str) -> String {
    format!("{}s", long_name)
}
