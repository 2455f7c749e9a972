//! Configuration assembly: the layer stack and its merged result.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;

use motif_model::{Entity, Macro, Site};
use motif_resolve::{GlobalRepository, SiteQuery};

use crate::merge::deep_merge;
use crate::path::value_at_path;
use crate::pattern::wildcard_match;
use crate::scheme::{ConfigurationScheme, DefaultScheme};

/// The fully merged settings for one export, recomputed per call.
///
/// Typed handles for the entity, site and macro sit next to the merged
/// settings tree; path-like values contributed by the `basics` layer
/// (`filename`, `mode`, `site`, ...) live inside the tree where overlays can
/// reach them.
#[derive(Debug, Clone)]
pub struct ExportConfiguration {
    pub entity: Arc<Entity>,
    pub site: Arc<Site>,
    /// The macro under export; `None` for entity-level configurations.
    pub template_macro: Option<Arc<Macro>>,
    pub settings: Value,
}

impl ExportConfiguration {
    pub fn new(
        entity: Arc<Entity>,
        site: Arc<Site>,
        template_macro: Option<Arc<Macro>>,
        settings: Value,
    ) -> Self {
        Self {
            entity,
            site,
            template_macro,
            settings,
        }
    }

    /// Dotted-path access into the merged settings.
    pub fn setting(&self, path: &str) -> Option<&Value> {
        value_at_path(&self.settings, path)
    }

    /// The output filename, as contributed by the basics layer or overridden
    /// by a more specific one.
    pub fn filename(&self) -> Option<&str> {
        self.settings.get("filename").and_then(Value::as_str)
    }

    pub fn mode(&self) -> Option<&str> {
        self.settings.get("mode").and_then(Value::as_str)
    }
}

/// Assembles the merged settings for one (entity, macro) export.
///
/// The layer stack, least to most specific:
///
/// 1. The `basics` record (macro, entity, site, filename, mode).
/// 2. Scheme-provided defaults.
/// 3. The entity's properties at `export.settings.<identifier>`, minus its
///    `macros` sub-key.
/// 4. Every wildcard pattern under `export.settings.<identifier>.macros`
///    matching the macro's name, in property-declaration order.
/// 5. Every wildcard pattern under the call-site settings' `macros` key,
///    matched the same way.
/// 6. The call-site settings themselves (minus `macros`/`macro`), applied
///    only when no macro was bound at construction time or the bound name
///    equals the resolved one.
///
/// The stack is deep-merged left to right and handed to the scheme's
/// `refine` hook.
pub struct Configuration {
    repository: Arc<GlobalRepository>,
    site: SiteQuery,
    entity: Option<Arc<Entity>>,
    macro_name: Option<String>,
    settings: Value,
    scheme: Arc<dyn ConfigurationScheme>,
}

impl Configuration {
    pub fn new(repository: Arc<GlobalRepository>) -> Self {
        Self {
            repository,
            site: SiteQuery::Default,
            entity: None,
            macro_name: None,
            settings: Value::Null,
            scheme: Arc::new(DefaultScheme),
        }
    }

    /// Site context for repository lookups.
    pub fn for_site(mut self, site: impl Into<SiteQuery>) -> Self {
        self.site = site.into();
        self
    }

    /// Binds the entity; its macros are checked before the repository.
    pub fn for_entity(mut self, entity: Arc<Entity>) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Binds the macro this configuration is about.
    pub fn for_macro(mut self, name: impl Into<String>) -> Self {
        self.macro_name = Some(name.into());
        self
    }

    /// Call-site settings, the most specific layer.
    pub fn with_settings(mut self, settings: Value) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_scheme(mut self, scheme: Arc<dyn ConfigurationScheme>) -> Self {
        self.scheme = scheme;
        self
    }

    /// Computes the merged configuration for `macro_query`, defaulting to
    /// the bound macro. Returns `None` (logged at `debug!`) when no macro or
    /// owning entity can be resolved.
    pub async fn macro_configuration(
        &self,
        macro_query: Option<&str>,
    ) -> Option<ExportConfiguration> {
        let Some(query) = macro_query.or(self.macro_name.as_deref()) else {
            debug!("no macro bound or queried");
            return None;
        };

        let (makro, entity) = self.resolve_target(query).await?;
        let site = self.owning_site(&entity).await?;

        let mut layers: Vec<Value> = Vec::new();
        layers.push(json!({
            "macro": makro.name,
            "entity": entity.path_string(),
            "site": site.name,
            "filename": entity.path_string(),
            "mode": "default",
        }));
        layers.push(Value::Object(self.scheme.defaults()));

        let namespace = format!("export.settings.{}", self.scheme.identifier());
        if let Some(value) = value_at_path(&entity.properties, &namespace) {
            push_object(&mut layers, without_keys(value, &["macros"]));
        }

        let patterns_path = format!("{namespace}.macros");
        if let Some(Value::Object(patterns)) = value_at_path(&entity.properties, &patterns_path) {
            for (pattern, settings) in patterns {
                if wildcard_match(pattern, &makro.name) {
                    push_object(&mut layers, settings.clone());
                }
            }
        }

        if let Some(Value::Object(patterns)) = self.settings.get("macros") {
            for (pattern, settings) in patterns {
                if wildcard_match(pattern, &makro.name) {
                    push_object(&mut layers, settings.clone());
                }
            }
        }

        let call_settings_apply = match self.macro_name.as_deref() {
            None => true,
            Some(bound) => bound == makro.name,
        };
        if call_settings_apply {
            push_object(&mut layers, without_keys(&self.settings, &["macros", "macro"]));
        }

        let merged = self.scheme.refine(deep_merge(layers.iter()));
        Some(ExportConfiguration::new(entity, site, Some(makro), merged))
    }

    /// Entity-level configuration: the same layering minus the
    /// macro-specific layers. Requires a bound entity.
    pub async fn export_configuration(&self) -> Option<ExportConfiguration> {
        let Some(entity) = self.entity.as_ref().map(Arc::clone) else {
            debug!("no entity bound for export configuration");
            return None;
        };
        let site = self.owning_site(&entity).await?;

        let mut layers: Vec<Value> = Vec::new();
        layers.push(json!({
            "entity": entity.path_string(),
            "site": site.name,
            "filename": entity.path_string(),
            "mode": "default",
        }));
        layers.push(Value::Object(self.scheme.defaults()));

        let namespace = format!("export.settings.{}", self.scheme.identifier());
        if let Some(value) = value_at_path(&entity.properties, &namespace) {
            push_object(&mut layers, without_keys(value, &["macros"]));
        }

        push_object(&mut layers, without_keys(&self.settings, &["macros", "macro"]));

        let merged = self.scheme.refine(deep_merge(layers.iter()));
        Some(ExportConfiguration::new(entity, site, None, merged))
    }

    /// The macro and its owning entity: the bound entity's own macros first,
    /// then the resolution repository.
    async fn resolve_target(&self, query: &str) -> Option<(Arc<Macro>, Arc<Entity>)> {
        if let Some(entity) = &self.entity {
            if let Some(makro) = entity.macros.iter().find(|m| m.matches(query)) {
                return Some((Arc::clone(makro), Arc::clone(entity)));
            }
        }

        let makro = self.repository.resolve_macro(self.site.clone(), query).await;
        let entity = self
            .repository
            .resolve_entity_for_macro(self.site.clone(), query, false)
            .await;
        match (makro, entity) {
            (Some(makro), Some(entity)) => Some((makro, entity)),
            _ => {
                debug!(query = %query, "macro configuration target matched nothing");
                None
            }
        }
    }

    async fn owning_site(&self, entity: &Arc<Entity>) -> Option<Arc<Site>> {
        let site = self.repository.sites().by_name(&entity.id.site).await;
        if site.is_none() {
            debug!(entity = %entity.id, "owning site is not registered");
        }
        site
    }
}

/// Clones `value` with the given top-level keys removed; non-objects pass
/// through unchanged.
fn without_keys(value: &Value, keys: &[&str]) -> Value {
    match value {
        Value::Object(map) => {
            let mut map = map.clone();
            for key in keys {
                map.remove(*key);
            }
            Value::Object(map)
        }
        other => other.clone(),
    }
}

/// Only object layers enter the stack; scalars and nulls in place of a
/// settings object are loader mistakes and must not clobber lower layers.
fn push_object(layers: &mut Vec<Value>, value: Value) {
    if value.is_object() {
        layers.push(value);
    }
}
