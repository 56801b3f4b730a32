//! Template system for project generation.
//!
//! Templates are looked up by logical path (the path they are written to in the
//! archive, e.g. `src/main/docker/Dockerfile.jvm`) through the
//! [`store::TemplateStore`] trait. The core never assumes where bytes come from:
//! the bundled set is compiled in by [`embedded`], a directory on disk or an
//! in-memory map work the same way.
//!
//! Most templates are copied verbatim. The few that need project coordinates
//! (`pom.xml`, `JaxRsApplication.java`) go through the Handlebars
//! [`renderer::TemplateRenderer`]. Variables available to them:
//! - `{{project_name}}`, `{{group_id}}`, `{{artifact_id}}`, `{{version}}`
//! - `{{java_package}}` — e.g. `org.example.api`
//!
//! ## Adding a new template
//!
//! 1. Create the file under `templates/<flavor>/` at its logical path
//! 2. Add an entry to the flavor's table in [`embedded`]
//! 3. Run `cargo build` to verify the `include_bytes!` path resolves

pub mod embedded;
pub mod renderer;
pub mod store;

pub use store::{load_bytes, load_template, TemplateStore};
