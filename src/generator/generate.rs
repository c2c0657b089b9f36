//! The generation pipeline.
//!
//! Single-threaded and synchronous: each stage completes before the next
//! begins, and every write targets the virtual overlay. The pipeline's only
//! touch on the real file system is the prober's read-only static analysis.

use std::path::PathBuf;

use tracing::debug;

use super::cancel::CancelToken;
use super::error::GenerateError;
use super::manifest::reconcile_manifest;
use super::overlay::{install_gitattributes, Overlay, PostCommand};
use super::probe::{module_functions, probe_package, PackageInfo, Probe};
use super::scaffold::{write_scaffold, Convergence};
use super::templates::{
    render_enum, render_header, render_input, render_module, render_object, render_scalar,
};
use crate::schema::{to_camel_case, Schema, TypeDef};

/// Physical name of the generated client file, constant across invocations.
pub const CLIENT_GEN_FILE: &str = "src/client_gen.rs";

/// Options recognized by the generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Names the extension module being scaffolded and seeds default
    /// identifiers. `None` generates a plain client.
    pub module_name: Option<String>,
    /// Workspace analyzed for user-declared module functions.
    pub source_dir: PathBuf,
    /// Where generated artifacts and manifests are written.
    pub output_dir: PathBuf,
}

/// Everything a generation pass produced, owned by the caller.
#[derive(Debug)]
pub struct GeneratedState {
    /// Base workspace overlaid by the generated layer.
    pub overlay: Overlay,
    /// Commands to run against the materialized workspace after applying
    /// the overlay.
    pub post_commands: Vec<PostCommand>,
    /// Whether a second full pass is required.
    pub convergence: Convergence,
}

impl GeneratedState {
    pub fn needs_regenerate(&self) -> bool {
        self.convergence.needs_regenerate()
    }
}

/// Schema-driven client generator and module bootstrapper.
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Generator { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run one generation pass over `schema`.
    ///
    /// Probes the output workspace, scaffolds a missing entry point,
    /// reconciles the dependency manifest, renders every schema type through
    /// the section templates, canonicalizes the result and stages it all in
    /// a virtual overlay. `cancel` is honored at each stage boundary;
    /// cancelling discards the overlay without touching the real workspace.
    pub fn generate(
        &self,
        schema: &Schema,
        cancel: &CancelToken,
    ) -> Result<GeneratedState, GenerateError> {
        let mut overlay = Overlay::new(&self.config.output_dir);

        cancel.ensure_active("probe")?;
        let probed = probe_package(&self.config.output_dir)?;

        let convergence = write_scaffold(&mut overlay, self.config.module_name.as_deref())?;

        let crate_name = reconcile_manifest(&mut overlay, self.config.module_name.as_deref())?;
        let pkg = match probed {
            Probe::Found(info) => info,
            Probe::Absent => PackageInfo {
                module_path: crate_name.replace('-', "_"),
                package_name: crate_name,
            },
        };

        cancel.ensure_active("render")?;
        let is_module_code = self.config.module_name.is_some();
        let mut sections = vec![render_header(&pkg, schema)?];
        schema.visit(|t| {
            let section = match t {
                TypeDef::Scalar(s) => render_scalar(s)?,
                TypeDef::Object(o) => render_object(o, schema, is_module_code)?,
                TypeDef::Enum(e) => render_enum(e)?,
                TypeDef::Input(i) => render_input(i)?,
            };
            sections.push(section);
            Ok::<(), GenerateError>(())
        })?;
        if let Some(module_name) = &self.config.module_name {
            let struct_name = to_camel_case(module_name);
            let functions = module_functions(&self.config.source_dir, &struct_name);
            sections.push(render_module(
                &struct_name,
                &self.config.source_dir,
                &functions,
            )?);
        }
        let source = sections.join("\n");

        cancel.ensure_active("canonicalize")?;
        let formatted = super::postprocess::postprocess(&source)?;
        overlay.write(CLIENT_GEN_FILE, formatted.into_bytes());

        install_gitattributes(&mut overlay, CLIENT_GEN_FILE)?;

        debug!(
            output_dir = %self.config.output_dir.display(),
            files = overlay.files().count(),
            needs_regenerate = convergence.needs_regenerate(),
            "generation pass complete"
        );
        Ok(GeneratedState {
            overlay,
            post_commands: vec![PostCommand::new("cargo", ["update", "--workspace"])],
            convergence,
        })
    }
}
