//! # CLI Module
//!
//! Command-line interface for the modforge generator.
//!
//! ```bash
//! modforge-gen generate --schema schema.json --output my-module --module "my module"
//! ```
//!
//! The CLI owns process orchestration around the core pipeline: it loads the
//! introspection document, drives the bounded convergence loop, applies the
//! overlay and runs the queued post-generation commands.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::warn;

use crate::generator::{CancelToken, Generator, GeneratorConfig};
use crate::schema::Schema;

/// Command-line interface for modforge.
#[derive(Parser)]
#[command(name = "modforge-gen")]
#[command(about = "Modforge client generator and module bootstrapper", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate client bindings and bootstrap the module workspace
    Generate {
        /// Path to the introspected schema document (JSON or YAML)
        #[arg(short, long)]
        schema: PathBuf,

        /// Output directory for generated artifacts and manifests
        #[arg(short, long)]
        output: PathBuf,

        /// Name of the extension module being scaffolded; omit to generate a
        /// plain client
        #[arg(short, long)]
        module: Option<String>,

        /// Source directory analyzed for module functions (defaults to the
        /// output directory)
        #[arg(long)]
        source: Option<PathBuf>,

        /// Show what would be written without touching the workspace
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Maximum number of generation passes before giving up on
        /// convergence
        #[arg(long, default_value_t = 3)]
        max_passes: u32,
    },
}

/// Load an introspection document, by file extension.
pub fn load_schema(path: &std::path::Path) -> anyhow::Result<Schema> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read schema: {}", path.display()))?;
    let is_yaml = path
        .extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false);
    let schema = if is_yaml {
        serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse schema: {}", path.display()))?
    } else {
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse schema: {}", path.display()))?
    };
    Ok(schema)
}

/// Execute the CLI command provided by the user.
///
/// # Errors
///
/// Returns an error if the schema cannot be loaded, a generation pass
/// fails, the overlay cannot be applied, or the workspace does not converge
/// within the pass limit.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Generate {
            schema,
            output,
            module,
            source,
            dry_run,
            max_passes,
        } => {
            let schema = load_schema(schema)?;
            let generator = Generator::new(GeneratorConfig {
                module_name: module.clone(),
                source_dir: source.clone().unwrap_or_else(|| output.clone()),
                output_dir: output.clone(),
            });
            let cancel = CancelToken::new();

            let mut passes = 0u32;
            loop {
                passes += 1;
                let state = generator.generate(&schema, &cancel)?;

                if *dry_run {
                    println!("Dry run: would write");
                    for (path, contents) in state.overlay.files() {
                        println!("  {} ({} bytes)", path.display(), contents.len());
                    }
                    for cmd in &state.post_commands {
                        println!("  then run: {cmd}");
                    }
                    return Ok(());
                }

                state.overlay.apply()?;
                println!("✅ Applied generated files to {}", output.display());

                for cmd in &state.post_commands {
                    match cmd.command(output).status() {
                        Ok(status) if status.success() => {}
                        Ok(status) => warn!(command = %cmd, %status, "post command failed"),
                        Err(e) => warn!(command = %cmd, error = %e, "post command did not start"),
                    }
                }

                if !state.needs_regenerate() {
                    println!("✅ Workspace converged after {passes} pass(es)");
                    return Ok(());
                }
                if passes >= *max_passes {
                    anyhow::bail!("workspace did not converge after {max_passes} passes");
                }
                println!("ℹ️  Scaffold written; running a second pass");
            }
        }
    }
}
