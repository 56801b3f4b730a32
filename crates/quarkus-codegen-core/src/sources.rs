//! Inputs produced outside this crate: generated sources and the OpenAPI document.
//!
//! Turning an OpenAPI document into JAX-RS interfaces and beans is the job of
//! an external generator. Its output reaches the pipeline through the
//! [`SourceProvider`] trait; the document itself is only copied into the
//! project, never interpreted.

use std::path::{Path, PathBuf};

use crate::archive::ArchiveEntry;
use crate::config::GenerationSettings;
use crate::error::{CodegenError, Result};

/// Prefix for Java sources inside a Maven project.
pub const JAVA_SOURCE_ROOT: &str = "src/main/java";

/// Supplier of the bulk of the project's source files.
pub trait SourceProvider {
    /// Entries to add to the archive, with project-relative paths.
    fn sources(&self, settings: &GenerationSettings) -> Result<Vec<ArchiveEntry>>;
}

/// Contributes no sources. Useful for scaffolding an empty project.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSources;

impl SourceProvider for NoSources {
    fn sources(&self, _settings: &GenerationSettings) -> Result<Vec<ArchiveEntry>> {
        Ok(Vec::new())
    }
}

/// Fixed, already-built entries.
#[derive(Debug, Clone, Default)]
pub struct StaticSources {
    entries: Vec<ArchiveEntry>,
}

impl StaticSources {
    pub fn new(entries: Vec<ArchiveEntry>) -> Self {
        Self { entries }
    }
}

impl SourceProvider for StaticSources {
    fn sources(&self, _settings: &GenerationSettings) -> Result<Vec<ArchiveEntry>> {
        Ok(self.entries.clone())
    }
}

/// A directory of pre-generated Java files, laid out by package.
///
/// `<root>/org/example/api/PetsResource.java` becomes
/// `src/main/java/org/example/api/PetsResource.java`. Files are emitted sorted
/// by path so the archive does not depend on directory iteration order.
#[derive(Debug, Clone)]
pub struct DirectorySources {
    root: PathBuf,
}

impl DirectorySources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SourceProvider for DirectorySources {
    fn sources(&self, _settings: &GenerationSettings) -> Result<Vec<ArchiveEntry>> {
        if !self.root.is_dir() {
            return Err(CodegenError::SourcesNotFound(self.root.clone()));
        }

        let mut files = Vec::new();
        collect_files(&self.root, &mut files)?;
        files.sort();

        let mut entries = Vec::with_capacity(files.len());
        for file in files {
            let relative = file
                .strip_prefix(&self.root)
                .map_err(|e| CodegenError::Other(e.into()))?;
            let segments = relative
                .components()
                .map(|c| {
                    c.as_os_str()
                        .to_str()
                        .ok_or_else(|| CodegenError::NonUtf8Path(file.clone()))
                })
                .collect::<Result<Vec<_>>>()?;
            let path = format!("{JAVA_SOURCE_ROOT}/{}", segments.join("/"));
            entries.push(ArchiveEntry::new(path, std::fs::read(&file)?));
        }

        tracing::debug!(
            root = %self.root.display(),
            count = entries.len(),
            "collected generated sources"
        );
        Ok(entries)
    }
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            collect_files(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}

/// Serialization of an OpenAPI document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// The OpenAPI document shipped inside the generated project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenApiDocument {
    pub format: DocumentFormat,
    pub content: Vec<u8>,
}

impl OpenApiDocument {
    pub fn new(format: DocumentFormat, content: impl Into<Vec<u8>>) -> Self {
        Self {
            format,
            content: content.into(),
        }
    }

    /// Read a document, choosing the format from the file extension
    /// (`.yaml`/`.yml` in any case are YAML, anything else JSON).
    pub fn load(path: &Path) -> Result<Self> {
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml")
            });
        let format = if is_yaml {
            DocumentFormat::Yaml
        } else {
            DocumentFormat::Json
        };
        Ok(Self::new(format, std::fs::read(path)?))
    }

    /// Where the document lands in the project, served as static OpenAPI.
    pub fn archive_path(&self) -> String {
        format!("src/main/resources/META-INF/openapi.{}", self.format.extension())
    }
}
