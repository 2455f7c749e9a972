//! The export orchestrator.

use std::sync::Arc;

use serde_json::Value;

use motif_ast::Parser;
use motif_config::{Configuration, ConfigurationScheme, DefaultScheme, ExportConfiguration};
use motif_render::{AdditionalFile, Renderer, Transformer};
use motif_resolve::{GlobalRepository, SiteQuery};

use crate::error::ExportError;

/// The result of one export run, handed to the file-writing layer.
#[derive(Debug)]
pub struct Export {
    pub configuration: ExportConfiguration,
    pub contents: String,
    /// Side-output artifacts collected from the renderer plugins.
    pub additional_files: Vec<AdditionalFile>,
}

/// Orchestrates one export: resolve, configure, parse, transform, render.
///
/// The four collaborators arrive as plain constructor arguments; the
/// exporter owns no policy of its own beyond sequencing them and turning
/// resolution misses into descriptive hard errors.
///
/// Exports run strictly sequentially within one call; multiple calls may
/// run concurrently against the same shared repository.
pub struct Exporter {
    repository: Arc<GlobalRepository>,
    parser: Box<dyn Parser>,
    transformer: Transformer,
    renderer: Renderer,
    scheme: Arc<dyn ConfigurationScheme>,
}

impl Exporter {
    pub fn new(
        repository: Arc<GlobalRepository>,
        parser: Box<dyn Parser>,
        transformer: Transformer,
        renderer: Renderer,
    ) -> Self {
        Self {
            repository,
            parser,
            transformer,
            renderer,
            scheme: Arc::new(DefaultScheme),
        }
    }

    /// Replaces the configuration scheme handed to every export.
    pub fn with_scheme(mut self, scheme: Arc<dyn ConfigurationScheme>) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn repository(&self) -> &Arc<GlobalRepository> {
        &self.repository
    }

    /// Runs one export for `macro_query` in the context of `site`.
    ///
    /// Fails fast when the macro or its entity cannot be resolved, and
    /// propagates parse failures undecorated. Renderer dispatch gaps do not
    /// fail the export; they yield empty text for the unclaimed node.
    pub async fn export(
        &self,
        site: impl Into<SiteQuery>,
        macro_query: &str,
        settings: Value,
    ) -> Result<Export, ExportError> {
        let site_query = site.into();

        let makro = self
            .repository
            .resolve_macro(site_query.clone(), macro_query)
            .await
            .ok_or_else(|| ExportError::MacroNotFound {
                site: site_query.to_string(),
                name: macro_query.to_string(),
            })?;
        let entity = self
            .repository
            .resolve_entity_for_macro(site_query.clone(), macro_query, false)
            .await
            .ok_or_else(|| ExportError::EntityNotFound {
                site: site_query.to_string(),
                name: macro_query.to_string(),
            })?;

        let configuration = Configuration::new(Arc::clone(&self.repository))
            .for_site(site_query)
            .for_entity(entity)
            .for_macro(makro.name.clone())
            .with_settings(settings)
            .with_scheme(Arc::clone(&self.scheme))
            .macro_configuration(None)
            .await
            .ok_or_else(|| ExportError::Configuration {
                name: makro.name.clone(),
            })?;

        let tree = self
            .parser
            .parse_macro(&makro.name, &configuration)
            .map_err(|source| ExportError::Parse {
                name: makro.name.clone(),
                source,
            })?;

        let tree = self.transformer.transform(tree, &configuration);

        self.renderer.reset(&configuration);
        let contents = self.renderer.render(Some(&tree), &configuration);
        let additional_files = self.renderer.create_additional_files();

        Ok(Export {
            configuration,
            contents,
            additional_files,
        })
    }
}
