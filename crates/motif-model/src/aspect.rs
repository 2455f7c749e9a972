//! Entity aspects: site-bound read views of entities.

use std::sync::Arc;

use crate::entity::{Entity, EntityId};
use crate::site::Site;

/// A read view of an [`Entity`] as seen from one specific [`Site`].
///
/// An inherited entity keeps its owning site in `entity.id`, but callers
/// working in the context of the inheriting site want ids and paths rooted
/// at that site. The aspect performs that re-rooting without ever touching
/// the underlying entity.
///
/// Aspects are cheap to create, but downstream result aggregation compares
/// them by reference; the resolution layer therefore caches them per
/// `(site, entity)` key so repeated lookups converge on one instance.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use motif_model::{Entity, EntityAspect, EntityId, Site};
///
/// let entity = Arc::new(Entity::new(EntityId::new("Base", "element", "e-headline")));
/// let retail = Arc::new(Site::new("Retail").extending("Base"));
///
/// let aspect = EntityAspect::new(entity, retail);
/// assert_eq!(aspect.id_string(), "Retail/element/e-headline");
/// ```
#[derive(Debug, Clone)]
pub struct EntityAspect {
    entity: Arc<Entity>,
    site: Arc<Site>,
}

impl EntityAspect {
    pub fn new(entity: Arc<Entity>, site: Arc<Site>) -> Self {
        Self { entity, site }
    }

    /// The wrapped entity, untouched.
    pub fn entity(&self) -> &Arc<Entity> {
        &self.entity
    }

    /// The site this view is bound to.
    pub fn site(&self) -> &Arc<Site> {
        &self.site
    }

    /// The entity's id re-rooted at the viewing site.
    pub fn id(&self) -> EntityId {
        EntityId::new(
            self.site.name.clone(),
            self.entity.id.category.clone(),
            self.entity.id.name.clone(),
        )
    }

    /// `site/category/name` with the viewing site as first segment.
    pub fn id_string(&self) -> String {
        self.id().path()
    }

    /// The filename-flavored path of this view; identical to
    /// [`id_string`](Self::id_string) in the default layout.
    pub fn path_string(&self) -> String {
        self.id_string()
    }

    /// Whether this view is the owning site's own view.
    pub fn is_owned_view(&self) -> bool {
        self.entity.id.site == self.site.name
    }

    /// Cache key for a `(site, entity)` pair: the site name joined with the
    /// entity's uniqueness key.
    pub fn cache_key(site: &Site, entity: &Entity) -> String {
        format!("{}+{}", site.name, entity.id.path())
    }
}
