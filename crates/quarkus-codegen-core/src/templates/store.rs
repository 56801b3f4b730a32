//! Read-only template lookup.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{CodegenError, Result};

/// A read-only `logical path -> bytes` store.
///
/// Implementations return [`CodegenError::ResourceNotFound`] for an unknown
/// path. Lookups are not cached; templates are small and read once per run.
pub trait TemplateStore {
    fn load(&self, path: &str) -> Result<Cow<'_, [u8]>>;
}

/// Load a template's raw bytes, for verbatim copies.
pub fn load_bytes(store: &dyn TemplateStore, path: &str) -> Result<Vec<u8>> {
    Ok(store.load(path)?.into_owned())
}

/// Load a template as text.
pub fn load_template(store: &dyn TemplateStore, path: &str) -> Result<String> {
    String::from_utf8(load_bytes(store, path)?).map_err(|e| CodegenError::InvalidTemplate {
        path: path.to_string(),
        source: e,
    })
}

/// Templates read from a directory tree, e.g. user overrides.
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    root: PathBuf,
}

impl DirectoryTemplates {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TemplateStore for DirectoryTemplates {
    fn load(&self, path: &str) -> Result<Cow<'_, [u8]>> {
        match std::fs::read(self.root.join(path)) {
            Ok(bytes) => Ok(Cow::Owned(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(CodegenError::ResourceNotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Looks in `primary` first and falls back to `fallback` only when the
/// template is missing there. Any other error from `primary` is returned.
pub struct OverlayTemplates<P, F> {
    primary: P,
    fallback: F,
}

impl<P: TemplateStore, F: TemplateStore> OverlayTemplates<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: TemplateStore, F: TemplateStore> TemplateStore for OverlayTemplates<P, F> {
    fn load(&self, path: &str) -> Result<Cow<'_, [u8]>> {
        match self.primary.load(path) {
            Err(CodegenError::ResourceNotFound(_)) => {
                tracing::trace!(path, "template not overridden, using fallback");
                self.fallback.load(path)
            }
            other => other,
        }
    }
}

/// In-memory templates.
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplates {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.entries.insert(path.into(), content.into());
    }

    pub fn remove(&mut self, path: &str) -> Option<Vec<u8>> {
        self.entries.remove(path)
    }

    /// Copy every path of another store into memory.
    pub fn from_store<'a>(
        store: &dyn TemplateStore,
        paths: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self> {
        let mut templates = Self::new();
        for path in paths {
            templates.insert(path, load_bytes(store, path)?);
        }
        Ok(templates)
    }
}

impl TemplateStore for MemoryTemplates {
    fn load(&self, path: &str) -> Result<Cow<'_, [u8]>> {
        self.entries
            .get(path)
            .map(|bytes| Cow::Borrowed(bytes.as_slice()))
            .ok_or_else(|| CodegenError::ResourceNotFound(path.to_string()))
    }
}
