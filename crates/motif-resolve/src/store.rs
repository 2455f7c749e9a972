//! Backing-store contracts and in-memory implementations.
//!
//! The loader subsystem owns the authoritative data; these stores hold the
//! loaded objects and may be refreshed through the insert/remove/clear entry
//! points while resolution calls are in flight. Every accessor therefore
//! reads the current contents under a lock rather than caching a snapshot.
//!
//! Store lookups are the suspension points of the export pipeline, so the
//! contracts are async even though the in-memory implementations never
//! actually block.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use motif_model::{Entity, EntityCategory, Site};

/// Backing store of registered sites.
#[async_trait]
pub trait SiteStore: Send + Sync {
    /// All sites in registration order.
    async fn all(&self) -> Vec<Arc<Site>>;

    /// Site by exact name.
    async fn by_name(&self, name: &str) -> Option<Arc<Site>>;

    /// The first registered site, the default for site-less queries.
    async fn first(&self) -> Option<Arc<Site>>;
}

/// Backing store of entity categories.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// All categories in declaration (priority) order.
    async fn all(&self) -> Vec<Arc<EntityCategory>>;

    /// Category by any of its long/short/plural names.
    async fn by_name(&self, name: &str) -> Option<Arc<EntityCategory>>;
}

/// Backing store of entities.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// All entities in the store's natural (load) order.
    ///
    /// Macro resolution scans this order and takes the first match, so the
    /// order is part of the contract, not an implementation detail.
    async fn all(&self) -> Vec<Arc<Entity>>;

    /// Entity by its full `site/category/name` path string.
    async fn by_path(&self, path: &str) -> Option<Arc<Entity>>;

    /// First entity (natural order) with the given bare name.
    async fn by_name(&self, name: &str) -> Option<Arc<Entity>>;
}

/// In-memory [`SiteStore`].
#[derive(Default)]
pub struct MemorySiteStore {
    sites: RwLock<Vec<Arc<Site>>>,
}

impl MemorySiteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, site: Site) -> Arc<Site> {
        let site = Arc::new(site);
        self.sites.write().unwrap().push(Arc::clone(&site));
        site
    }

    pub fn remove(&self, name: &str) -> bool {
        let mut sites = self.sites.write().unwrap();
        let before = sites.len();
        sites.retain(|s| s.name != name);
        sites.len() != before
    }

    pub fn clear(&self) {
        self.sites.write().unwrap().clear();
    }
}

#[async_trait]
impl SiteStore for MemorySiteStore {
    async fn all(&self) -> Vec<Arc<Site>> {
        self.sites.read().unwrap().clone()
    }

    async fn by_name(&self, name: &str) -> Option<Arc<Site>> {
        self.sites
            .read()
            .unwrap()
            .iter()
            .find(|s| s.name == name)
            .cloned()
    }

    async fn first(&self) -> Option<Arc<Site>> {
        self.sites.read().unwrap().first().cloned()
    }
}

/// In-memory [`CategoryStore`].
///
/// Insertion assigns each category its declaration-order priority.
#[derive(Default)]
pub struct MemoryCategoryStore {
    categories: RwLock<Vec<Arc<EntityCategory>>>,
}

impl MemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, mut category: EntityCategory) -> Arc<EntityCategory> {
        let mut categories = self.categories.write().unwrap();
        category.priority = categories.len();
        let category = Arc::new(category);
        categories.push(Arc::clone(&category));
        category
    }

    pub fn clear(&self) {
        self.categories.write().unwrap().clear();
    }
}

#[async_trait]
impl CategoryStore for MemoryCategoryStore {
    async fn all(&self) -> Vec<Arc<EntityCategory>> {
        self.categories.read().unwrap().clone()
    }

    async fn by_name(&self, name: &str) -> Option<Arc<EntityCategory>> {
        self.categories
            .read()
            .unwrap()
            .iter()
            .find(|c| c.matches_name(name))
            .cloned()
    }
}

/// In-memory [`EntityStore`].
#[derive(Default)]
pub struct MemoryEntityStore {
    entities: RwLock<Vec<Arc<Entity>>>,
}

impl MemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, entity: Entity) -> Arc<Entity> {
        let entity = Arc::new(entity);
        self.entities.write().unwrap().push(Arc::clone(&entity));
        entity
    }

    pub fn remove(&self, path: &str) -> bool {
        let mut entities = self.entities.write().unwrap();
        let before = entities.len();
        entities.retain(|e| e.path_string() != path);
        entities.len() != before
    }

    pub fn clear(&self) {
        self.entities.write().unwrap().clear();
    }
}

#[async_trait]
impl EntityStore for MemoryEntityStore {
    async fn all(&self) -> Vec<Arc<Entity>> {
        self.entities.read().unwrap().clone()
    }

    async fn by_path(&self, path: &str) -> Option<Arc<Entity>> {
        self.entities
            .read()
            .unwrap()
            .iter()
            .find(|e| e.path_string() == path)
            .cloned()
    }

    async fn by_name(&self, name: &str) -> Option<Arc<Entity>> {
        self.entities
            .read()
            .unwrap()
            .iter()
            .find(|e| e.id.name == name)
            .cloned()
    }
}
