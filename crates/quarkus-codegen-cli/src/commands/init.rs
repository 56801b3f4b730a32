use std::path::Path;

use anyhow::Result;
use dialoguer::{Confirm, Input};

use quarkus_codegen_core::config::GenerationSettings;

use crate::output;
use crate::FlavorChoice;

/// Values given on the command line; anything missing falls back to defaults.
pub struct InitOptions {
    pub project_name: Option<String>,
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub java_package: Option<String>,
    pub flavor: FlavorChoice,
}

/// Write a settings file for a new project.
///
/// Prompts for the project name when it is not given, and asks before
/// overwriting an existing file unless `force` is set.
pub fn run(config_path: &Path, options: InitOptions, force: bool) -> Result<()> {
    output::print_header("quarkus-codegen init");

    if config_path.exists() && !force {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} exists. Overwrite?", config_path.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            output::print_warning("Left existing settings untouched");
            return Ok(());
        }
    }

    let project_name = match options.project_name.clone() {
        Some(name) => name,
        None => Input::new()
            .with_prompt("Project name")
            .default(GenerationSettings::default().project_name)
            .interact_text()?,
    };

    let settings = settings_from(InitOptions {
        project_name: Some(project_name),
        ..options
    });
    settings.validate()?;

    output::print_step(1, 1, &format!("Writing {}", config_path.display()));
    settings.save(config_path)?;

    output::print_success(&format!(
        "Settings for '{}' written ({} flavor)",
        settings.project_name, settings.flavor
    ));
    output::print_key_value("groupId", &settings.group_id);
    output::print_key_value("artifactId", &settings.artifact_id);
    output::print_key_value("package", &settings.java_package);
    println!();
    println!("  Next steps:");
    println!("    quarkus-codegen generate --sources <generated-dir> --openapi <api.json> -o project.zip");
    println!();

    Ok(())
}

/// Merge command-line values over the defaults.
pub fn settings_from(options: InitOptions) -> GenerationSettings {
    let defaults = GenerationSettings::default();
    let project_name = options.project_name.unwrap_or(defaults.project_name);
    GenerationSettings {
        artifact_id: options.artifact_id.unwrap_or_else(|| project_name.clone()),
        group_id: options.group_id.unwrap_or(defaults.group_id),
        java_package: options.java_package.unwrap_or(defaults.java_package),
        flavor: options.flavor.as_flavor(),
        project_name,
        ..GenerationSettings::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarkus_codegen_core::config::Flavor;

    #[test]
    fn test_artifact_id_follows_project_name() {
        let settings = settings_from(InitOptions {
            project_name: Some("petstore".into()),
            group_id: None,
            artifact_id: None,
            java_package: Some("io.petstore.api".into()),
            flavor: FlavorChoice::Jaxrs,
        });
        assert_eq!(settings.artifact_id, "petstore");
        assert_eq!(settings.group_id, "org.example");
        assert_eq!(settings.java_package, "io.petstore.api");
        assert_eq!(settings.flavor, Flavor::Jaxrs);
        assert!(settings.is_full_project());
    }

    #[test]
    fn test_forced_init_writes_loadable_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quarkus-codegen.config.json");
        std::fs::write(&path, "{}").unwrap();

        run(
            &path,
            InitOptions {
                project_name: Some("inventory".into()),
                group_id: Some("com.acme".into()),
                artifact_id: None,
                java_package: None,
                flavor: FlavorChoice::Quarkus,
            },
            true,
        )
        .unwrap();

        let loaded = GenerationSettings::load(&path).unwrap();
        assert_eq!(loaded.project_name, "inventory");
        assert_eq!(loaded.group_id, "com.acme");
        assert_eq!(loaded.flavor, Flavor::Quarkus);
    }
}
