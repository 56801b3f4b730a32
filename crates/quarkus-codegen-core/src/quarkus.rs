//! Quarkus variant of the JAX-RS project.
//!
//! Starts from [`crate::jaxrs::pipeline`], drops the `Application` subclass
//! (Quarkus discovers resources on its own) and appends the project files a
//! fresh Quarkus project needs: Dockerfiles, `application.properties`, the
//! Maven wrapper, ignore files and a README.

use crate::archive::ArchiveEntry;
use crate::config::GenerationSettings;
use crate::error::Result;
use crate::jaxrs::{self, APPLICATION_STEP};
use crate::log::GenerationLog;
use crate::pipeline::ProjectPipeline;
use crate::sources::SourceProvider;
use crate::templates::{load_bytes, load_template, TemplateStore};

pub const EXTRAS_STEP: &str = "quarkus-extras";

/// Dockerfile variants under `src/main/docker/`.
pub const DOCKERFILE_VARIANTS: [&str; 4] = ["jvm", "legacy-jar", "native", "native-micro"];

pub const APPLICATION_PROPERTIES: &str = "src/main/resources/application.properties";

/// Serve the bundled OpenAPI document instead of scanning annotations.
pub const SCAN_DISABLE_DIRECTIVE: &str = "mp.openapi.scan.disable=true";

/// Wrapper, ignore and documentation files, in emission order.
pub const PROJECT_FILES: [&str; 8] = [
    ".mvn/wrapper/.gitignore",
    ".mvn/wrapper/maven-wrapper.properties",
    ".mvn/wrapper/MavenWrapperDownloader.java",
    ".dockerignore",
    ".gitignore",
    "mvnw",
    "mvnw.cmd",
    "README.md",
];

/// Files extracted with the executable bit set.
const EXECUTABLE_FILES: [&str; 1] = ["mvnw"];

/// Build the Quarkus pipeline around an external source generator.
pub fn pipeline(sources: Box<dyn SourceProvider>) -> ProjectPipeline {
    jaxrs::pipeline(sources)
        .remove(APPLICATION_STEP)
        .step(EXTRAS_STEP, |ctx, log| {
            emit_extras(ctx.settings, ctx.templates, log)
        })
}

/// The Quarkus project files for a full run, in emission order.
///
/// Returns no entries and logs nothing when `code_only` or `update_only` is
/// set: those modes regenerate sources into an existing project.
pub fn emit_extras(
    settings: &GenerationSettings,
    templates: &dyn TemplateStore,
    log: &mut GenerationLog,
) -> Result<Vec<ArchiveEntry>> {
    if !settings.is_full_project() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::with_capacity(DOCKERFILE_VARIANTS.len() + 1 + PROJECT_FILES.len());

    log.append("Generating Dockerfiles");
    for variant in DOCKERFILE_VARIANTS {
        entries.push(copy_template(templates, &format!("src/main/docker/Dockerfile.{variant}"))?);
    }

    log.append("Generating application.properties");
    let properties = load_template(templates, APPLICATION_PROPERTIES)?;
    entries.push(ArchiveEntry::new(
        APPLICATION_PROPERTIES,
        derive_properties_override(&properties),
    ));

    log.append("Generating project files");
    for path in PROJECT_FILES {
        entries.push(copy_template(templates, path)?);
    }

    Ok(entries)
}

/// Append the scan-disable directive to the base properties text.
///
/// No deduplication: deriving already-derived text appends a second copy.
pub fn derive_properties_override(template: &str) -> String {
    format!("{template}\n{SCAN_DISABLE_DIRECTIVE}\n")
}

fn copy_template(templates: &dyn TemplateStore, path: &str) -> Result<ArchiveEntry> {
    let content = load_bytes(templates, path)?;
    if EXECUTABLE_FILES.contains(&path) {
        Ok(ArchiveEntry::executable(path, content))
    } else {
        Ok(ArchiveEntry::new(path, content))
    }
}
