use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

use quarkus_codegen_core::config::GenerationSettings;
use quarkus_codegen_core::pipeline::{generate_archive, GeneratedProject, StepContext};
use quarkus_codegen_core::sources::{DirectorySources, NoSources, OpenApiDocument, SourceProvider};
use quarkus_codegen_core::templates::embedded::EmbeddedTemplates;
use quarkus_codegen_core::templates::renderer::TemplateRenderer;
use quarkus_codegen_core::templates::store::{DirectoryTemplates, OverlayTemplates};
use quarkus_codegen_core::templates::TemplateStore;

use crate::output;
use crate::FlavorChoice;

pub struct GenerateOptions {
    pub output: PathBuf,
    pub sources: Option<PathBuf>,
    pub openapi: Option<PathBuf>,
    pub templates: Option<PathBuf>,
    pub flavor: Option<FlavorChoice>,
    pub code_only: bool,
    pub update_only: bool,
    pub force: bool,
    pub log_file: Option<PathBuf>,
}

/// Assemble the project archive and write it to `options.output`.
///
/// The archive is built in memory and only written once every step has
/// succeeded; a failed run leaves no output file behind.
pub fn run(config_path: &Path, options: GenerateOptions) -> Result<()> {
    output::print_header("quarkus-codegen generate");

    if options.output.exists() && !options.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            options.output.display()
        );
    }

    output::print_step(1, 3, "Loading settings");
    let settings = resolve_settings(config_path, &options)?;
    output::print_key_value("Flavor", settings.flavor.as_str());
    output::print_key_value("Package", &settings.java_package);
    if settings.code_only {
        output::print_key_value("Mode", "code only");
    } else if settings.update_only {
        output::print_key_value("Mode", "update only");
    }

    let document = options
        .openapi
        .as_deref()
        .map(|path| {
            OpenApiDocument::load(path)
                .with_context(|| format!("failed to read OpenAPI document {}", path.display()))
        })
        .transpose()?;

    let sources: Box<dyn SourceProvider> = match &options.sources {
        Some(dir) => Box::new(DirectorySources::new(dir)),
        None => {
            output::print_warning("No --sources given; the project will contain no API sources");
            Box::new(NoSources)
        }
    };

    output::print_step(2, 3, "Assembling project");
    let bundled = EmbeddedTemplates::new(settings.flavor);
    let overlay;
    let templates: &dyn TemplateStore = match &options.templates {
        Some(dir) => {
            overlay = OverlayTemplates::new(DirectoryTemplates::new(dir), bundled);
            &overlay
        }
        None => &bundled,
    };
    let renderer = TemplateRenderer::new();
    let ctx = StepContext::new(&settings, templates, &renderer).with_document(document.as_ref());
    let project = generate_archive(&settings.flavor.pipeline(sources), &ctx)?;
    for line in project.log.lines() {
        output::print_log_line(line);
    }

    output::print_step(3, 3, &format!("Writing {}", options.output.display()));
    write_outputs(&project, &options)?;

    output::print_success("Project archive complete");
    output::print_key_value("Entries", &project.entries.len().to_string());
    output::print_key_value("Size", &output::format_size(project.archive.len()));
    output::print_key_value("SHA-256", &archive_digest(&project.archive));

    Ok(())
}

/// Settings file values (or defaults when there is none) with flags applied on top.
pub fn resolve_settings(config_path: &Path, options: &GenerateOptions) -> Result<GenerationSettings> {
    let mut settings = if config_path.exists() {
        GenerationSettings::load(config_path)?
    } else {
        tracing::info!(
            "no settings file at {}, using defaults",
            config_path.display()
        );
        GenerationSettings::default()
    };

    if let Some(flavor) = options.flavor {
        settings.flavor = flavor.as_flavor();
    }
    settings.code_only |= options.code_only;
    settings.update_only |= options.update_only;
    Ok(settings)
}

fn write_outputs(project: &GeneratedProject, options: &GenerateOptions) -> Result<()> {
    if let Some(parent) = options.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&options.output, &project.archive)
        .with_context(|| format!("failed to write {}", options.output.display()))?;

    if let Some(log_file) = &options.log_file {
        std::fs::write(log_file, project.log.render())
            .with_context(|| format!("failed to write {}", log_file.display()))?;
    }
    Ok(())
}

/// Hex-encoded SHA-256 of the archive bytes.
pub fn archive_digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarkus_codegen_core::config::Flavor;
    use std::io::Read;

    fn options(dir: &Path) -> GenerateOptions {
        GenerateOptions {
            output: dir.join("out/project.zip"),
            sources: None,
            openapi: None,
            templates: None,
            flavor: None,
            code_only: false,
            update_only: false,
            force: false,
            log_file: None,
        }
    }

    #[test]
    fn test_flags_override_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("quarkus-codegen.config.json");
        GenerationSettings {
            flavor: Flavor::Jaxrs,
            ..Default::default()
        }
        .save(&config)
        .unwrap();

        let mut opts = options(dir.path());
        opts.flavor = Some(FlavorChoice::Quarkus);
        opts.update_only = true;
        let settings = resolve_settings(&config, &opts).unwrap();
        assert_eq!(settings.flavor, Flavor::Quarkus);
        assert!(settings.update_only);
        assert!(!settings.code_only);
    }

    #[test]
    fn test_missing_settings_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings =
            resolve_settings(&dir.path().join("absent.json"), &options(dir.path())).unwrap();
        assert_eq!(settings, GenerationSettings::default());
    }

    #[test]
    fn test_generate_writes_archive_and_log() {
        let dir = tempfile::tempdir().unwrap();
        let sources = dir.path().join("generated/org/example/api");
        std::fs::create_dir_all(&sources).unwrap();
        std::fs::write(sources.join("AppResource.java"), "public interface AppResource {}").unwrap();
        let openapi = dir.path().join("api.json");
        std::fs::write(&openapi, r#"{"openapi":"3.0.2"}"#).unwrap();

        let mut opts = options(dir.path());
        opts.sources = Some(dir.path().join("generated"));
        opts.openapi = Some(openapi);
        opts.log_file = Some(dir.path().join("generation.log"));
        let output = opts.output.clone();
        let log_file = dir.path().join("generation.log");

        run(&dir.path().join("absent.json"), opts).unwrap();

        let mut zip = zip::ZipArchive::new(std::fs::File::open(&output).unwrap()).unwrap();
        let mut resource = String::new();
        zip.by_name("src/main/java/org/example/api/AppResource.java")
            .unwrap()
            .read_to_string(&mut resource)
            .unwrap();
        assert_eq!(resource, "public interface AppResource {}");
        assert!(zip.by_name("src/main/resources/META-INF/openapi.json").is_ok());
        assert!(zip.by_name("mvnw").is_ok());

        let log = std::fs::read_to_string(log_file).unwrap();
        assert!(log.contains("Generating Dockerfiles\r\n"));
        assert!(log.ends_with("Generating project files\r\n"));
    }

    #[test]
    fn test_failed_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(dir.path());
        opts.sources = Some(dir.path().join("does-not-exist"));
        let output = opts.output.clone();

        assert!(run(&dir.path().join("absent.json"), opts).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_existing_output_requires_force() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path());
        std::fs::create_dir_all(opts.output.parent().unwrap()).unwrap();
        std::fs::write(&opts.output, b"keep me").unwrap();
        let output = opts.output.clone();

        assert!(run(&dir.path().join("absent.json"), opts).is_err());
        assert_eq!(std::fs::read(&output).unwrap(), b"keep me");
    }

    #[test]
    fn test_template_override_directory() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = dir.path().join("overrides");
        std::fs::create_dir_all(&overrides).unwrap();
        std::fs::write(overrides.join("README.md"), "# Custom readme\n").unwrap();

        let mut opts = options(dir.path());
        opts.templates = Some(overrides);
        let output = opts.output.clone();
        run(&dir.path().join("absent.json"), opts).unwrap();

        let mut zip = zip::ZipArchive::new(std::fs::File::open(&output).unwrap()).unwrap();
        let mut readme = String::new();
        zip.by_name("README.md")
            .unwrap()
            .read_to_string(&mut readme)
            .unwrap();
        assert_eq!(readme, "# Custom readme\n");
        assert!(zip.by_name("src/main/docker/Dockerfile.jvm").is_ok());
    }

    #[test]
    fn test_archive_digest() {
        assert_eq!(
            archive_digest(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
