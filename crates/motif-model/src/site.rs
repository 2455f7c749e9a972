//! Sites: brands/variants of the design system.

use serde::{Deserialize, Serialize};

/// A brand or variant of the design system.
///
/// Sites form an extension tree: a site with `extends` set inherits the
/// entities of its parent unless the entity's category appears in
/// `excluded_categories`. The tree shape (no cycles) is a loader invariant;
/// consumers walking the chain should still guard against repeats.
///
/// # Example
///
/// ```rust
/// use motif_model::Site;
///
/// let child = Site::new("Retail")
///     .extending("Base")
///     .excluding_category("page");
///
/// assert_eq!(child.extends.as_deref(), Some("Base"));
/// assert!(child.excludes("page"));
/// assert!(!child.excludes("element"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// Unique site name, also the first segment of entity id paths.
    pub name: String,

    /// Name of the parent site this site extends, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Category long names whose entities are not inherited from ancestors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_categories: Vec<String>,
}

impl Site {
    /// Creates a standalone site (no parent, no exclusions).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: None,
            excluded_categories: Vec::new(),
        }
    }

    /// Sets the parent site this site extends.
    pub fn extending(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    /// Adds a category whose entities are not inherited.
    pub fn excluding_category(mut self, category: impl Into<String>) -> Self {
        self.excluded_categories.push(category.into());
        self
    }

    /// Whether entities of `category` are excluded from inheritance.
    pub fn excludes(&self, category: &str) -> bool {
        self.excluded_categories.iter().any(|c| c == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standalone_site_has_no_parent() {
        let site = Site::new("Base");
        assert_eq!(site.name, "Base");
        assert!(site.extends.is_none());
        assert!(site.excluded_categories.is_empty());
    }

    #[test]
    fn excludes_checks_category_list() {
        let site = Site::new("Retail")
            .extending("Base")
            .excluding_category("page")
            .excluding_category("module");

        assert!(site.excludes("page"));
        assert!(site.excludes("module"));
        assert!(!site.excludes("element"));
    }

    #[test]
    fn deserializes_from_loader_yaml() {
        let site: Site = serde_yaml::from_str(
            r#"
            name: Retail
            extends: Base
            excluded_categories: [page]
            "#,
        )
        .unwrap();

        assert_eq!(site.name, "Retail");
        assert_eq!(site.extends.as_deref(), Some("Base"));
        assert!(site.excludes("page"));
    }

    #[test]
    fn missing_optional_fields_default() {
        let site: Site = serde_yaml::from_str("name: Base").unwrap();
        assert!(site.extends.is_none());
        assert!(site.excluded_categories.is_empty());
    }
}
