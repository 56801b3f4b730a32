//! quarkus-codegen CLI — package generated OpenAPI sources as a Quarkus project.
//!
//! Provides three commands: `init` writes a settings file, `generate` assembles
//! the project archive, `templates` lists what is bundled.
//!
//! Each command is a thin layer over [`quarkus_codegen_core`].

mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use quarkus_codegen_core::config::Flavor;

#[derive(Parser)]
#[command(
    name = "quarkus-codegen",
    about = "Emit Quarkus JAX-RS project archives from generated OpenAPI sources",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to quarkus-codegen.config.json (default: ./quarkus-codegen.config.json)
    #[arg(long, global = true, default_value = quarkus_codegen_core::config::CONFIG_FILE)]
    config: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a settings file for a new project
    Init {
        /// Human-readable project name
        #[arg(long)]
        project_name: Option<String>,

        /// Maven groupId
        #[arg(long)]
        group_id: Option<String>,

        /// Maven artifactId (defaults to the project name)
        #[arg(long)]
        artifact_id: Option<String>,

        /// Java package of the generated sources
        #[arg(long = "package")]
        java_package: Option<String>,

        /// Target project flavor
        #[arg(long, value_enum, default_value = "quarkus")]
        flavor: FlavorChoice,

        /// Overwrite an existing settings file without asking
        #[arg(long)]
        force: bool,
    },

    /// Assemble the project archive
    Generate {
        /// Output zip file
        #[arg(long, short)]
        output: PathBuf,

        /// Directory of generated Java sources, laid out by package
        #[arg(long)]
        sources: Option<PathBuf>,

        /// OpenAPI document to ship in the project (.json, .yaml or .yml)
        #[arg(long)]
        openapi: Option<PathBuf>,

        /// Directory of template overrides, looked up before the bundled set
        #[arg(long)]
        templates: Option<PathBuf>,

        /// Override the flavor from the settings file
        #[arg(long, value_enum)]
        flavor: Option<FlavorChoice>,

        /// Emit sources only (no build files or project metadata)
        #[arg(long)]
        code_only: bool,

        /// Regenerate sources for an existing project
        #[arg(long)]
        update_only: bool,

        /// Overwrite the output file if it exists
        #[arg(long)]
        force: bool,

        /// Also write the generation log to this file
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// List the bundled templates
    Templates {
        /// Flavor whose templates to list
        #[arg(long, value_enum, default_value = "quarkus")]
        flavor: FlavorChoice,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FlavorChoice {
    Quarkus,
    Jaxrs,
}

impl FlavorChoice {
    pub fn as_flavor(&self) -> Flavor {
        match self {
            Self::Quarkus => Flavor::Quarkus,
            Self::Jaxrs => Flavor::Jaxrs,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Init {
            project_name,
            group_id,
            artifact_id,
            java_package,
            flavor,
            force,
        } => {
            commands::init::run(
                &cli.config,
                commands::init::InitOptions {
                    project_name,
                    group_id,
                    artifact_id,
                    java_package,
                    flavor,
                },
                force,
            )?;
        }
        Commands::Generate {
            output,
            sources,
            openapi,
            templates,
            flavor,
            code_only,
            update_only,
            force,
            log_file,
        } => {
            commands::generate::run(
                &cli.config,
                commands::generate::GenerateOptions {
                    output,
                    sources,
                    openapi,
                    templates,
                    flavor,
                    code_only,
                    update_only,
                    force,
                    log_file,
                },
            )?;
        }
        Commands::Templates { flavor } => {
            commands::templates::run(flavor);
        }
    }

    Ok(())
}
