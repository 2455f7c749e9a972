//! Macros: callable template fragments with documentation.

use std::path::PathBuf;

use serde_json::Value;

/// What kind of content a macro file carries.
///
/// Only [`ContentType::TemplateMacro`] entries participate in macro
/// resolution; documentation and asset entries ride along in the entity
/// graph but are never parsed or rendered by the export pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// A macro in the template-macro dialect; the export pipeline's input.
    TemplateMacro,
    /// Prose documentation accompanying an entity.
    Documentation,
    /// Any other asset the loader picked up alongside the entity.
    Asset,
}

/// One documented macro parameter, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct MacroParameter {
    pub name: String,
    pub description: Option<String>,
    /// Documented default value, free-form.
    pub default: Option<Value>,
}

impl MacroParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            default: None,
        }
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// A callable template fragment declared by an entity.
///
/// The loader populates `content` with the macro's source text; the core
/// never reads the filesystem. `file` is kept purely as a reference for
/// diagnostics and output naming.
#[derive(Debug, Clone, PartialEq)]
pub struct Macro {
    /// Macro name as called from templates, e.g. `e_headline`.
    pub name: String,
    /// Documented parameters, in declaration order.
    pub parameters: Vec<MacroParameter>,
    /// Names of other macros this macro calls.
    pub dependencies: Vec<String>,
    /// Documented return description, if any.
    pub returns: Option<String>,
    /// Name of the site that defines this macro.
    pub site: String,
    /// Content kind; resolution only considers template macros.
    pub content_type: ContentType,
    /// Loader-populated source text.
    pub content: String,
    /// Source file this macro was loaded from, if known.
    pub file: Option<PathBuf>,
}

impl Macro {
    /// Creates a template macro owned by `site` with empty content.
    pub fn new(name: impl Into<String>, site: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            dependencies: Vec::new(),
            returns: None,
            site: site.into(),
            content_type: ContentType::TemplateMacro,
            content: String::new(),
            file: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn with_parameter(mut self, parameter: MacroParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn depending_on(mut self, name: impl Into<String>) -> Self {
        self.dependencies.push(name.into());
        self
    }

    pub fn returning(mut self, returns: impl Into<String>) -> Self {
        self.returns = Some(returns.into());
        self
    }

    pub fn from_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Whether this macro is resolvable under `name`.
    ///
    /// A macro matches when its content type is the template-macro dialect
    /// AND its name equals the query; documentation entries never match even
    /// under their own name.
    pub fn matches(&self, name: &str) -> bool {
        self.content_type == ContentType::TemplateMacro && self.name == name
    }
}
