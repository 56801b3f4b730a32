//! Core library for the quarkus-codegen toolkit.
//!
//! Assembles a deployable Java project as a zip archive from sources produced
//! by an external OpenAPI generator. The pieces:
//! - [`pipeline::ProjectPipeline`] — ordered, named generation steps
//! - [`jaxrs`] — base steps shared by every flavor (`pom.xml`, sources, document)
//! - [`quarkus`] — the Quarkus variant: Dockerfiles, `application.properties`,
//!   Maven wrapper and project files
//! - [`templates`] — template lookup behind [`templates::TemplateStore`] and
//!   Handlebars rendering
//! - [`archive`] — sequential, duplicate-checked zip writing
//!
//! A run either returns a complete archive or an error; see
//! [`pipeline::generate_archive`].

pub mod archive;
pub mod config;
pub mod error;
pub mod jaxrs;
pub mod log;
pub mod pipeline;
pub mod quarkus;
pub mod sources;
pub mod templates;
