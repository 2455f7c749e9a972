//! The resolution front door.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use motif_model::{Entity, EntityAspect, Macro, Site};

use crate::cache::AspectCache;
use crate::query::{QueryMatch, SiteQuery};
use crate::store::{CategoryStore, EntityStore, SiteStore};

/// Resolution repository over the three backing stores.
///
/// Answers "which entities/macros match this query" and "which entity
/// defines this macro", honoring site extension and category exclusion, and
/// owns the [`AspectCache`] that keeps site-bound entity views stable across
/// lookups.
///
/// All lookups return `Option`/empty collections on a miss and log at
/// `debug!`; nothing here raises for missing data.
pub struct GlobalRepository {
    sites: Arc<dyn SiteStore>,
    categories: Arc<dyn CategoryStore>,
    entities: Arc<dyn EntityStore>,
    aspects: AspectCache,
}

impl GlobalRepository {
    pub fn new(
        sites: Arc<dyn SiteStore>,
        categories: Arc<dyn CategoryStore>,
        entities: Arc<dyn EntityStore>,
    ) -> Self {
        Self {
            sites,
            categories,
            entities,
            aspects: AspectCache::default(),
        }
    }

    /// Replaces the default aspect cache (e.g. with a disabled one).
    pub fn with_aspect_cache(mut self, aspects: AspectCache) -> Self {
        self.aspects = aspects;
        self
    }

    pub fn sites(&self) -> &Arc<dyn SiteStore> {
        &self.sites
    }

    pub fn categories(&self) -> &Arc<dyn CategoryStore> {
        &self.categories
    }

    pub fn entities(&self) -> &Arc<dyn EntityStore> {
        &self.entities
    }

    pub fn aspects(&self) -> &AspectCache {
        &self.aspects
    }

    /// Classifies a slash-delimited query string.
    ///
    /// Checked in tie-break order: the `*` wildcard, a bare site name, a
    /// bare category name (long, short or plural), a two-segment
    /// `site/category` pair, and finally an entity id (a bare entity name
    /// or a full three-segment path).
    pub async fn resolve(&self, query: &str) -> Option<QueryMatch> {
        let query = query.trim();
        if query == "*" {
            return Some(QueryMatch::AllSites);
        }

        let segments: Vec<&str> = query
            .split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        let matched = match segments.as_slice() {
            [single] => {
                if let Some(site) = self.sites.by_name(single).await {
                    Some(QueryMatch::Site(site))
                } else if let Some(category) = self.categories.by_name(single).await {
                    Some(QueryMatch::Category(category))
                } else {
                    self.entities.by_name(single).await.map(QueryMatch::Entity)
                }
            }
            [site_name, category_name] => {
                match (
                    self.sites.by_name(site_name).await,
                    self.categories.by_name(category_name).await,
                ) {
                    (Some(site), Some(category)) => {
                        Some(QueryMatch::SiteCategory { site, category })
                    }
                    _ => None,
                }
            }
            [_, _, _] => self
                .entities
                .by_path(&segments.join("/"))
                .await
                .map(QueryMatch::Entity),
            _ => None,
        };

        if matched.is_none() {
            debug!(%query, "query matched nothing");
        }
        matched
    }

    /// Expands a query into a flat list of site-bound entity views.
    ///
    /// A site context binds the views to that site; matches without one (a
    /// bare category, a direct entity hit) bind each entity to its owning
    /// site. An entity already present under the same `(site, entity)` key
    /// is never added twice.
    pub async fn resolve_entities(&self, query: &str) -> Vec<Arc<EntityAspect>> {
        let Some(matched) = self.resolve(query).await else {
            return Vec::new();
        };

        let mut results: Vec<Arc<EntityAspect>> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        match matched {
            QueryMatch::AllSites => {
                for site in self.sites.all().await {
                    for aspect in self.entities_for_site(&site).await {
                        push_unique(&mut results, &mut seen, aspect);
                    }
                }
            }
            QueryMatch::Site(site) => {
                for aspect in self.entities_for_site(&site).await {
                    push_unique(&mut results, &mut seen, aspect);
                }
            }
            QueryMatch::Category(category) => {
                for entity in self.entities.all().await {
                    if entity.id.category == category.long_name {
                        if let Some(aspect) = self.owning_view(&entity).await {
                            push_unique(&mut results, &mut seen, aspect);
                        }
                    }
                }
            }
            QueryMatch::SiteCategory { site, category } => {
                for aspect in self.entities_for_site(&site).await {
                    if aspect.entity().id.category == category.long_name {
                        push_unique(&mut results, &mut seen, aspect);
                    }
                }
            }
            QueryMatch::Entity(entity) => {
                if let Some(aspect) = self.owning_view(&entity).await {
                    push_unique(&mut results, &mut seen, aspect);
                }
            }
        }

        results
    }

    /// Resolves a site query against the site store.
    pub async fn resolve_site(&self, query: &SiteQuery) -> Option<Arc<Site>> {
        let site = match query {
            SiteQuery::Default => self.sites.first().await,
            SiteQuery::Name(name) => self.sites.by_name(name).await,
            SiteQuery::Instance(site) => Some(Arc::clone(site)),
        };
        if site.is_none() {
            debug!(%query, "site query matched nothing");
        }
        site
    }

    /// Finds the entity within a site's entity list whose id equals
    /// `entity_query` (full path, site-local id or bare name).
    pub async fn resolve_entity(
        &self,
        site: impl Into<SiteQuery>,
        entity_query: &str,
    ) -> Option<Arc<EntityAspect>> {
        let site_query = site.into();
        let site = self.resolve_site(&site_query).await?;

        for aspect in self.entities_for_site(&site).await {
            let entity = aspect.entity();
            if aspect.id_string() == entity_query
                || entity.path_string() == entity_query
                || entity.id.name == entity_query
            {
                return Some(aspect);
            }
        }

        debug!(site = %site.name, query = %entity_query, "entity query matched nothing");
        None
    }

    /// Finds the first macro across the site's visible entities whose name
    /// matches `macro_query`.
    ///
    /// The scan follows the backing store's natural order and the first
    /// match wins; this is a deliberate first-match policy, not best-match.
    pub async fn resolve_macro(
        &self,
        site: impl Into<SiteQuery>,
        macro_query: &str,
    ) -> Option<Arc<Macro>> {
        let site_query = site.into();
        let site = self.resolve_site(&site_query).await?;

        match self.find_macro(&site, macro_query).await {
            Some((makro, _)) => Some(makro),
            None => {
                debug!(site = %site.name, query = %macro_query, "macro query matched nothing");
                None
            }
        }
    }

    /// Like [`resolve_macro`](Self::resolve_macro), but returns the owning
    /// entity.
    ///
    /// With `find_defining` set, a macro found through inheritance (its own
    /// site differs from the queried site) is followed back to its own site,
    /// so the caller receives the entity that defines the macro rather than
    /// the one inheriting it.
    pub async fn resolve_entity_for_macro(
        &self,
        site: impl Into<SiteQuery>,
        macro_query: &str,
        find_defining: bool,
    ) -> Option<Arc<Entity>> {
        let site_query = site.into();
        let mut site = self.resolve_site(&site_query).await?;
        let mut hops: HashSet<String> = HashSet::new();

        loop {
            let Some((makro, entity)) = self.find_macro(&site, macro_query).await else {
                debug!(site = %site.name, query = %macro_query, "macro query matched nothing");
                return None;
            };

            if find_defining && makro.site != site.name && hops.insert(site.name.clone()) {
                if let Some(defining) = self.sites.by_name(&makro.site).await {
                    site = defining;
                    continue;
                }
            }

            return Some(entity);
        }
    }

    /// All entities visible to `site`, as cached site-bound views, in the
    /// backing store's natural order.
    ///
    /// An entity is visible when the site owns it, is listed in its
    /// `used_by`, or inherits it along the `extends` chain without the
    /// entity's category being excluded anywhere on the path.
    pub async fn entities_for_site(&self, site: &Arc<Site>) -> Vec<Arc<EntityAspect>> {
        let chain = self.inheritance_chain(site).await;
        let mut visible = Vec::new();

        for entity in self.entities.all().await {
            let inherited = chain.iter().any(|(ancestor, excluded)| {
                entity.id.site == *ancestor && !excluded.contains(&entity.id.category)
            });
            if entity.id.site == site.name || entity.is_used_by(&site.name) || inherited {
                visible.push(self.aspects.get_or_create(&entity, site));
            }
        }

        visible
    }

    /// Walks the `extends` chain upwards, pairing each ancestor with the
    /// categories excluded on the path down to the queried site. Exclusions
    /// accumulate: what an intermediate site refuses to inherit, its
    /// descendants cannot see either.
    async fn inheritance_chain(&self, site: &Arc<Site>) -> Vec<(String, HashSet<String>)> {
        let mut chain = Vec::new();
        let mut excluded: HashSet<String> = site.excluded_categories.iter().cloned().collect();
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(site.name.clone());

        let mut current = Arc::clone(site);
        while let Some(parent_name) = current.extends.clone() {
            if !seen.insert(parent_name.clone()) {
                break;
            }
            let Some(parent) = self.sites.by_name(&parent_name).await else {
                debug!(site = %parent_name, "extended site is not registered");
                break;
            };
            chain.push((parent.name.clone(), excluded.clone()));
            excluded.extend(parent.excluded_categories.iter().cloned());
            current = parent;
        }

        chain
    }

    /// First matching macro in the site's visible entities, with its entity.
    async fn find_macro(
        &self,
        site: &Arc<Site>,
        macro_query: &str,
    ) -> Option<(Arc<Macro>, Arc<Entity>)> {
        for aspect in self.entities_for_site(site).await {
            for makro in &aspect.entity().macros {
                if makro.matches(macro_query) {
                    return Some((Arc::clone(makro), Arc::clone(aspect.entity())));
                }
            }
        }
        None
    }

    /// The entity viewed from its own site, when that site is registered.
    async fn owning_view(&self, entity: &Arc<Entity>) -> Option<Arc<EntityAspect>> {
        match self.sites.by_name(&entity.id.site).await {
            Some(site) => Some(self.aspects.get_or_create(entity, &site)),
            None => {
                debug!(entity = %entity.id, "owning site is not registered");
                None
            }
        }
    }
}

fn push_unique(
    results: &mut Vec<Arc<EntityAspect>>,
    seen: &mut HashSet<String>,
    aspect: Arc<EntityAspect>,
) {
    let key = EntityAspect::cache_key(aspect.site(), aspect.entity());
    if seen.insert(key) {
        results.push(aspect);
    }
}
