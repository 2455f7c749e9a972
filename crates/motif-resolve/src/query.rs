//! Query classification types.

use std::fmt;
use std::sync::Arc;

use motif_model::{Entity, EntityCategory, Site};

/// The structured result of classifying a slash-delimited query string.
///
/// See [`GlobalRepository::resolve`](crate::GlobalRepository::resolve) for
/// the classification rules and their tie-break order.
#[derive(Debug, Clone)]
pub enum QueryMatch {
    /// The `*` wildcard: every site.
    AllSites,
    /// A bare segment matching a site name.
    Site(Arc<Site>),
    /// A bare segment matching a category by any of its names.
    Category(Arc<EntityCategory>),
    /// Two segments, `site/category`.
    SiteCategory {
        site: Arc<Site>,
        category: Arc<EntityCategory>,
    },
    /// An entity id hit (bare name or full path).
    Entity(Arc<Entity>),
}

/// How a caller names the site a lookup should run against.
///
/// Accepts a name, an already-resolved instance, or nothing - in which case
/// the first registered site is used.
///
/// # Example
///
/// ```rust
/// use motif_resolve::SiteQuery;
///
/// let by_name: SiteQuery = "Base".into();
/// let default = SiteQuery::Default;
/// assert_eq!(by_name.to_string(), "Base");
/// assert_eq!(default.to_string(), "<default site>");
/// ```
#[derive(Debug, Clone, Default)]
pub enum SiteQuery {
    /// Use the first registered site.
    #[default]
    Default,
    /// Look the site up by name.
    Name(String),
    /// Use this site instance directly.
    Instance(Arc<Site>),
}

impl From<&str> for SiteQuery {
    fn from(name: &str) -> Self {
        SiteQuery::Name(name.to_string())
    }
}

impl From<String> for SiteQuery {
    fn from(name: String) -> Self {
        SiteQuery::Name(name)
    }
}

impl From<Arc<Site>> for SiteQuery {
    fn from(site: Arc<Site>) -> Self {
        SiteQuery::Instance(site)
    }
}

impl From<Option<&str>> for SiteQuery {
    fn from(name: Option<&str>) -> Self {
        match name {
            Some(name) => SiteQuery::Name(name.to_string()),
            None => SiteQuery::Default,
        }
    }
}

impl fmt::Display for SiteQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteQuery::Default => write!(f, "<default site>"),
            SiteQuery::Name(name) => write!(f, "{}", name),
            SiteQuery::Instance(site) => write!(f, "{}", site.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        assert!(matches!(SiteQuery::from("Base"), SiteQuery::Name(_)));
        assert!(matches!(SiteQuery::from(None), SiteQuery::Default));
        assert!(matches!(
            SiteQuery::from(Some("Base")),
            SiteQuery::Name(_)
        ));
        assert!(matches!(
            SiteQuery::from(Arc::new(Site::new("Base"))),
            SiteQuery::Instance(_)
        ));
    }

    #[test]
    fn display_names_the_target() {
        assert_eq!(SiteQuery::from("Retail").to_string(), "Retail");
        assert_eq!(SiteQuery::Default.to_string(), "<default site>");
    }
}
