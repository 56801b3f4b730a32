//! Project assembly as an ordered list of named steps.
//!
//! A flavor is a pipeline: the JAX-RS base defines the steps every project
//! shares, and a variant derives from it by removing, replacing or appending
//! steps (see [`crate::quarkus::pipeline`]).
//!
//! Each step returns the entries it produces; [`ProjectPipeline::run`] writes
//! them to the archive before the next step starts. The first failing step
//! aborts the run and nothing after the failure point is written.

use std::io::{Cursor, Seek, Write};

use crate::archive::{ArchiveEntry, ArchiveWriter};
use crate::config::GenerationSettings;
use crate::error::Result;
use crate::log::GenerationLog;
use crate::sources::OpenApiDocument;
use crate::templates::renderer::TemplateRenderer;
use crate::templates::TemplateStore;

/// Everything a step may read. Shared, never mutated during a run.
pub struct StepContext<'a> {
    pub settings: &'a GenerationSettings,
    pub templates: &'a dyn TemplateStore,
    pub renderer: &'a TemplateRenderer,
    pub document: Option<&'a OpenApiDocument>,
}

impl<'a> StepContext<'a> {
    pub fn new(
        settings: &'a GenerationSettings,
        templates: &'a dyn TemplateStore,
        renderer: &'a TemplateRenderer,
    ) -> Self {
        Self {
            settings,
            templates,
            renderer,
            document: None,
        }
    }

    pub fn with_document(mut self, document: Option<&'a OpenApiDocument>) -> Self {
        self.document = document;
        self
    }
}

/// One unit of project assembly.
pub type Step = Box<dyn Fn(&StepContext<'_>, &mut GenerationLog) -> Result<Vec<ArchiveEntry>>>;

struct NamedStep {
    name: &'static str,
    run: Step,
}

/// Ordered, composable project assembly.
#[derive(Default)]
pub struct ProjectPipeline {
    steps: Vec<NamedStep>,
}

impl ProjectPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step. A step with the same name is replaced in place instead.
    pub fn step<F>(self, name: &'static str, run: F) -> Self
    where
        F: Fn(&StepContext<'_>, &mut GenerationLog) -> Result<Vec<ArchiveEntry>> + 'static,
    {
        if self.contains(name) {
            return self.replace(name, run);
        }
        let mut pipeline = self;
        pipeline.steps.push(NamedStep {
            name,
            run: Box::new(run),
        });
        pipeline
    }

    /// Override an existing step, keeping its position. Unknown names are ignored.
    pub fn replace<F>(mut self, name: &'static str, run: F) -> Self
    where
        F: Fn(&StepContext<'_>, &mut GenerationLog) -> Result<Vec<ArchiveEntry>> + 'static,
    {
        if let Some(step) = self.steps.iter_mut().find(|s| s.name == name) {
            step.run = Box::new(run);
        }
        self
    }

    /// Suppress a step.
    pub fn remove(mut self, name: &str) -> Self {
        self.steps.retain(|s| s.name != name);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.steps.iter().any(|s| s.name == name)
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name).collect()
    }

    /// Run every step in order, streaming entries into `archive`.
    pub fn run<W: Write + Seek>(
        &self,
        ctx: &StepContext<'_>,
        archive: &mut ArchiveWriter<W>,
        log: &mut GenerationLog,
    ) -> Result<()> {
        for step in &self.steps {
            tracing::debug!(step = step.name, "running generation step");
            let entries = (step.run)(ctx, log)?;
            for entry in &entries {
                archive.write(entry)?;
            }
        }
        Ok(())
    }
}

/// A finished project archive.
#[derive(Debug, Clone)]
pub struct GeneratedProject {
    /// Complete zip bytes.
    pub archive: Vec<u8>,
    /// Entry paths in write order.
    pub entries: Vec<String>,
    pub log: GenerationLog,
}

/// Run `pipeline` against an in-memory archive.
///
/// Returns the archive only when every step succeeded, so callers never see a
/// partially written project.
pub fn generate_archive(pipeline: &ProjectPipeline, ctx: &StepContext<'_>) -> Result<GeneratedProject> {
    ctx.settings.validate()?;

    let mut archive = ArchiveWriter::new(Cursor::new(Vec::new()));
    let mut log = GenerationLog::new();
    pipeline.run(ctx, &mut archive, &mut log)?;

    let entries = archive.paths().to_vec();
    let archive = archive.finish()?.into_inner();
    tracing::info!(
        entries = entries.len(),
        bytes = archive.len(),
        "project archive complete"
    );
    Ok(GeneratedProject {
        archive,
        entries,
        log,
    })
}
