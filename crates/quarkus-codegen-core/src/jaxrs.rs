//! The JAX-RS base project: the steps every flavor starts from.
//!
//! | Step | Runs when | Writes |
//! |---|---|---|
//! | [`POM_STEP`] | full project | `pom.xml` |
//! | [`SOURCES_STEP`] | always | whatever the [`SourceProvider`] supplies |
//! | [`DOCUMENT_STEP`] | not update-only, document given | `src/main/resources/META-INF/openapi.*` |
//! | [`APPLICATION_STEP`] | not update-only | `src/main/java/<package>/JaxRsApplication.java` |

use crate::archive::ArchiveEntry;
use crate::error::Result;
use crate::log::GenerationLog;
use crate::pipeline::{ProjectPipeline, StepContext};
use crate::sources::{SourceProvider, JAVA_SOURCE_ROOT};
use crate::templates::load_template;

pub const POM_STEP: &str = "pom";
pub const SOURCES_STEP: &str = "sources";
pub const DOCUMENT_STEP: &str = "openapi-document";
pub const APPLICATION_STEP: &str = "application";

/// Template path of the `Application` subclass.
pub const APPLICATION_TEMPLATE: &str = "JaxRsApplication.java";

/// Build the base pipeline around an external source generator.
pub fn pipeline(sources: Box<dyn SourceProvider>) -> ProjectPipeline {
    ProjectPipeline::new()
        .step(POM_STEP, generate_pom)
        .step(SOURCES_STEP, move |ctx, log| {
            log.append("Generating JAX-RS interfaces and beans");
            sources.sources(ctx.settings)
        })
        .step(DOCUMENT_STEP, generate_document)
        .step(APPLICATION_STEP, generate_application)
}

fn generate_pom(ctx: &StepContext<'_>, log: &mut GenerationLog) -> Result<Vec<ArchiveEntry>> {
    if !ctx.settings.is_full_project() {
        return Ok(Vec::new());
    }
    log.append("Generating pom.xml");
    let template = load_template(ctx.templates, "pom.xml")?;
    let data = ctx.renderer.settings_context(ctx.settings);
    Ok(vec![ArchiveEntry::new(
        "pom.xml",
        ctx.renderer.render(&template, &data)?,
    )])
}

fn generate_document(ctx: &StepContext<'_>, log: &mut GenerationLog) -> Result<Vec<ArchiveEntry>> {
    let document = match ctx.document {
        Some(document) if !ctx.settings.update_only => document,
        _ => return Ok(Vec::new()),
    };
    log.append("Generating OpenAPI document");
    Ok(vec![ArchiveEntry::new(
        document.archive_path(),
        document.content.clone(),
    )])
}

fn generate_application(
    ctx: &StepContext<'_>,
    log: &mut GenerationLog,
) -> Result<Vec<ArchiveEntry>> {
    if ctx.settings.update_only {
        return Ok(Vec::new());
    }
    log.append("Generating JAX-RS Application class");
    let template = load_template(ctx.templates, APPLICATION_TEMPLATE)?;
    let data = ctx.renderer.settings_context(ctx.settings);
    let path = format!(
        "{JAVA_SOURCE_ROOT}/{}/{APPLICATION_TEMPLATE}",
        ctx.settings.package_path()
    );
    Ok(vec![ArchiveEntry::new(
        path,
        ctx.renderer.render(&template, &data)?,
    )])
}
