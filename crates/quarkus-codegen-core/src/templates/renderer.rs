//! Handlebars-based template renderer.
//!
//! Wraps the [`handlebars::Handlebars`] engine with **strict mode** enabled.
//! Any `{{variable}}` referenced by a template must be present in the data
//! context, otherwise rendering returns an error. Templates produce Java and
//! Maven sources; a silently empty `groupId` or package would only surface
//! later as a failed Maven build.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::templates::renderer::TemplateRenderer;
//!
//! let renderer = TemplateRenderer::new();
//! let data = renderer.settings_context(&settings);
//! let pom = renderer.render(&pom_template, &data)?;
//! ```

use handlebars::Handlebars;
use serde_json::Value;

use crate::config::GenerationSettings;
use crate::error::{CodegenError, Result};

/// Template renderer using Handlebars for project files.
pub struct TemplateRenderer {
    hbs: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Create a new renderer with strict mode enabled.
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        Self { hbs }
    }

    /// Render a template string with the given data context.
    pub fn render(&self, template: &str, data: &Value) -> Result<String> {
        self.hbs
            .render_template(template, data)
            .map_err(|e| CodegenError::TemplateRender(e.to_string()))
    }

    /// The data context every project template is rendered with.
    pub fn settings_context(&self, settings: &GenerationSettings) -> Value {
        serde_json::json!({
            "project_name": settings.project_name,
            "group_id": settings.group_id,
            "artifact_id": settings.artifact_id,
            "version": settings.version,
            "java_package": settings.java_package,
        })
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_settings() {
        let renderer = TemplateRenderer::new();
        let settings = GenerationSettings::default();
        let data = renderer.settings_context(&settings);
        let out = renderer
            .render("<groupId>{{group_id}}</groupId>", &data)
            .unwrap();
        assert_eq!(out, "<groupId>org.example</groupId>");
    }

    #[test]
    fn test_strict_mode_rejects_missing_variable() {
        let renderer = TemplateRenderer::new();
        let err = renderer
            .render("{{quarkus_version}}", &serde_json::json!({}))
            .unwrap_err();
        assert!(matches!(err, CodegenError::TemplateRender(_)));
    }
}
