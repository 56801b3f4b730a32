//! Compile-time embedded templates, one table per [`Flavor`].
//!
//! Each entry pairs a logical path with bytes loaded from the repository-level
//! `templates/` directory via [`include_bytes!`]. The paths are relative to this
//! source file (`crates/quarkus-codegen-core/src/templates/embedded.rs`).
//!
//! ## Warning
//!
//! Do NOT rename or move template files without updating the `include_bytes!`
//! path here. Do NOT add Handlebars variables to `pom.xml` or
//! `JaxRsApplication.java` without checking that the JAX-RS steps pass them in.

use std::borrow::Cow;

use crate::config::Flavor;
use crate::error::{CodegenError, Result};

use super::store::TemplateStore;

macro_rules! template {
    ($flavor:literal, $path:literal) => {
        (
            $path,
            include_bytes!(concat!("../../../../templates/", $flavor, "/", $path)) as &[u8],
        )
    };
}

// -------------------------------------------------------
// Plain JAX-RS project
// -------------------------------------------------------

const JAXRS: &[(&str, &[u8])] = &[
    template!("jaxrs", "pom.xml"),
    template!("jaxrs", "JaxRsApplication.java"),
];

// -------------------------------------------------------
// Quarkus project
// -------------------------------------------------------

const QUARKUS: &[(&str, &[u8])] = &[
    template!("quarkus", "pom.xml"),
    template!("quarkus", "src/main/docker/Dockerfile.jvm"),
    template!("quarkus", "src/main/docker/Dockerfile.legacy-jar"),
    template!("quarkus", "src/main/docker/Dockerfile.native"),
    template!("quarkus", "src/main/docker/Dockerfile.native-micro"),
    template!("quarkus", "src/main/resources/application.properties"),
    template!("quarkus", ".mvn/wrapper/.gitignore"),
    template!("quarkus", ".mvn/wrapper/maven-wrapper.properties"),
    template!("quarkus", ".mvn/wrapper/MavenWrapperDownloader.java"),
    template!("quarkus", ".dockerignore"),
    template!("quarkus", ".gitignore"),
    template!("quarkus", "mvnw"),
    template!("quarkus", "mvnw.cmd"),
    template!("quarkus", "README.md"),
];

/// The templates bundled into the binary for one flavor.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedTemplates {
    flavor: Flavor,
}

impl EmbeddedTemplates {
    pub fn new(flavor: Flavor) -> Self {
        Self { flavor }
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    fn table(&self) -> &'static [(&'static str, &'static [u8])] {
        match self.flavor {
            Flavor::Quarkus => QUARKUS,
            Flavor::Jaxrs => JAXRS,
        }
    }

    /// Logical paths of every bundled template, in table order.
    pub fn paths(&self) -> impl Iterator<Item = &'static str> {
        self.table().iter().map(|(path, _)| *path)
    }

    /// Logical paths paired with their sizes in bytes.
    pub fn sizes(&self) -> impl Iterator<Item = (&'static str, usize)> {
        self.table().iter().map(|(path, bytes)| (*path, bytes.len()))
    }
}

impl TemplateStore for EmbeddedTemplates {
    fn load(&self, path: &str) -> Result<Cow<'_, [u8]>> {
        self.table()
            .iter()
            .find(|(candidate, _)| *candidate == path)
            .map(|(_, bytes)| Cow::Borrowed(*bytes))
            .ok_or_else(|| CodegenError::ResourceNotFound(path.to_string()))
    }
}
