//! Unified error types for the quarkus-codegen toolkit.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur while assembling a project archive.
#[derive(Error, Debug)]
pub enum CodegenError {
    // --- Configuration ---

    /// The settings file (`quarkus-codegen.config.json`) could not be read.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The specified flavor is not one of: `quarkus`, `jaxrs`.
    #[error("unknown flavor: {0} (supported: quarkus, jaxrs)")]
    UnknownFlavor(String),

    /// Settings that cannot produce a valid project (e.g. a malformed Java package).
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    // --- Templates ---

    /// A bundled template path does not exist. Indicates a packaging defect.
    #[error("template resource not found: {0}")]
    ResourceNotFound(String),

    /// A template expected to be text is not valid UTF-8.
    #[error("template {path} is not valid UTF-8")]
    InvalidTemplate {
        path: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Handlebars template rendering failed (invalid template or missing variables).
    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    // --- Sources ---

    /// The directory of pre-generated sources does not exist.
    #[error("sources directory not found: {0}")]
    SourcesNotFound(PathBuf),

    /// A generated source file name cannot be represented as an archive path.
    #[error("source path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    // --- Archive ---

    /// The archive sink rejected a write. The archive is unusable after this.
    #[error("failed to write archive entry {path}")]
    IoFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The same path was written twice in one run.
    #[error("duplicate archive entry: {0}")]
    DuplicateEntry(String),

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A catch-all for errors from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Alias for `Result<T, CodegenError>`.
pub type Result<T> = std::result::Result<T, CodegenError>;
