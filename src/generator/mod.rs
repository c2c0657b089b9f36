//! # Generator Module
//!
//! Turns an introspected engine schema into a typed Rust client and
//! bootstraps an extension-module crate around it.
//!
//! ## Overview
//!
//! One generation pass produces:
//! - **`src/client_gen.rs`** - the generated client: one section per schema
//!   type plus, for modules, the dispatch shim the host engine calls into
//! - **`Cargo.toml` / `Cargo.lock`** - the workspace manifest reconciled
//!   against the embedded engine baseline, and its integrity lock
//! - **`src/main.rs`** - a starter entry point, only when the workspace has
//!   none yet
//! - **`.gitattributes`** - a marker flagging the generated file for tooling
//!
//! ## Architecture
//!
//! ```text
//! Schema → Prober → Scaffold → Manifest → Templates → Post-Processor → Overlay
//! ```
//!
//! 1. **Prober** - static analysis of the output workspace (crate identity,
//!    user module functions)
//! 2. **Scaffold** - starter entry point for fresh workspaces
//! 3. **Manifest** - non-destructive merge of engine-required dependencies
//! 4. **Templates** - Askama sections rendered in schema visitation order
//! 5. **Post-Processor** - syntax canonicalization plus import resolution
//! 6. **Overlay** - virtual layer the caller inspects and applies
//!
//! ## Two-pass convergence
//!
//! Generated code depends on user code that may not exist yet. The scaffold
//! writer resolves this chicken-and-egg dependency by writing the starter
//! source and reporting [`Convergence::FirstPass`]: probing happened before
//! scaffolding, so this pass rendered without visibility into the new file,
//! and the caller must apply the overlay and run a second pass. The second
//! pass finds the entry point in place and reports
//! [`Convergence::Converged`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use modforge::generator::{CancelToken, Generator, GeneratorConfig};
//!
//! let generator = Generator::new(GeneratorConfig {
//!     module_name: Some("my module".to_string()),
//!     source_dir: "out".into(),
//!     output_dir: "out".into(),
//! });
//! let state = generator.generate(&schema, &CancelToken::new())?;
//! state.overlay.apply()?;
//! if state.needs_regenerate() {
//!     // run a second pass
//! }
//! ```

mod cancel;
mod error;
mod generate;
mod manifest;
mod overlay;
mod postprocess;
mod probe;
mod scaffold;
mod templates;

pub use cancel::CancelToken;
pub use error::{GenerateError, OutputStage};
pub use generate::{GeneratedState, Generator, GeneratorConfig, CLIENT_GEN_FILE};
pub use manifest::{
    baseline_dependencies, reconcile_manifest, DependencySpec, DEFAULT_PACKAGE_NAME, LOCKFILE,
    MANIFEST_FILE,
};
pub use overlay::{install_gitattributes, Overlay, PostCommand, GITATTRIBUTES_FILE};
pub use probe::{module_functions, probe_package, FunctionArg, ModuleFunction, PackageInfo, Probe};
pub use scaffold::{write_scaffold, Convergence, SCAFFOLD_FILE};
pub use templates::{
    render_enum, render_header, render_input, render_module, render_object, render_scalar,
    render_starter,
};

pub use postprocess::postprocess;
