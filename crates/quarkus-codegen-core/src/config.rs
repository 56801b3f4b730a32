//! Generation settings and their JSON config file.
//!
//! Settings are loaded once per run and never mutated while the pipeline
//! executes. The on-disk form is `quarkus-codegen.config.json`:
//!
//! ```json
//! {
//!   "project_name": "petstore",
//!   "group_id": "org.example",
//!   "artifact_id": "petstore-api",
//!   "version": "1.0.0-SNAPSHOT",
//!   "java_package": "org.example.api",
//!   "flavor": "quarkus",
//!   "code_only": false,
//!   "update_only": false
//! }
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CodegenError, Result};
use crate::pipeline::ProjectPipeline;
use crate::sources::SourceProvider;
use crate::{jaxrs, quarkus};

/// Default config file name, resolved relative to the working directory.
pub const CONFIG_FILE: &str = "quarkus-codegen.config.json";

/// Reserved words and literals that cannot name a package segment.
const JAVA_KEYWORDS: [&str; 54] = [
    "_", "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while",
];

/// Target project layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    /// Quarkus project: Dockerfiles, Maven wrapper, no `Application` class.
    #[default]
    Quarkus,
    /// Plain JAX-RS project with an `Application` subclass.
    Jaxrs,
}

impl Flavor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quarkus => "quarkus",
            Self::Jaxrs => "jaxrs",
        }
    }

    /// The project pipeline for this flavor around an external source generator.
    pub fn pipeline(&self, sources: Box<dyn SourceProvider>) -> ProjectPipeline {
        match self {
            Self::Quarkus => quarkus::pipeline(sources),
            Self::Jaxrs => jaxrs::pipeline(sources),
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flavor {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "quarkus" => Ok(Self::Quarkus),
            "jaxrs" => Ok(Self::Jaxrs),
            other => Err(CodegenError::UnknownFlavor(other.to_string())),
        }
    }
}

/// Flags and project coordinates for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub project_name: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    /// Package of the generated sources, e.g. `org.example.api`.
    pub java_package: String,
    pub flavor: Flavor,
    /// Emit sources only; skip build files and project metadata.
    pub code_only: bool,
    /// Regenerate into an existing project; skip everything scaffolded once.
    pub update_only: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            project_name: "generated-api".into(),
            group_id: "org.example".into(),
            artifact_id: "generated-api".into(),
            version: "1.0.0-SNAPSHOT".into(),
            java_package: "org.example.api".into(),
            flavor: Flavor::Quarkus,
            code_only: false,
            update_only: false,
        }
    }
}

impl GenerationSettings {
    /// Whether the run scaffolds a whole project rather than regenerating sources.
    pub fn is_full_project(&self) -> bool {
        !self.code_only && !self.update_only
    }

    /// Directory of `java_package` inside `src/main/java`, e.g. `org/example/api`.
    pub fn package_path(&self) -> String {
        self.java_package.replace('.', "/")
    }

    /// Reject settings that would render a broken project.
    pub fn validate(&self) -> Result<()> {
        let valid_package = !self.java_package.is_empty()
            && self.java_package.split('.').all(|segment| {
                let mut chars = segment.chars();
                chars
                    .next()
                    .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
                    && !JAVA_KEYWORDS.contains(&segment)
            });
        if !valid_package {
            return Err(CodegenError::InvalidSettings(format!(
                "java_package '{}' is not a valid Java package name",
                self.java_package
            )));
        }
        if self.artifact_id.trim().is_empty() {
            return Err(CodegenError::InvalidSettings(
                "artifact_id must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| CodegenError::ConfigNotFound {
                path: path.to_path_buf(),
                source: e,
            })?;
        serde_json::from_str(&contents).map_err(|e| CodegenError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write settings as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| CodegenError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
