//! # Modforge
//!
//! **Modforge** generates strongly-typed Rust client bindings for the
//! Modforge automation engine's API and bootstraps extension-module crates
//! around them.
//!
//! ## Overview
//!
//! The engine describes its API as an introspectable schema of scalars,
//! objects, enums and input types. Modforge renders that schema into a
//! single generated client file, scaffolds a starter entry point for fresh
//! workspaces, and reconciles the workspace manifest against the engine's
//! dependency baseline without clobbering user edits. A developer writes
//! functions on the scaffolded module struct; the generated dispatch shim
//! makes those functions remotely invokable, and the generated client lets
//! them call back into the engine.
//!
//! ## Architecture
//!
//! - **[`schema`]** - read-only model of the introspected type system with a
//!   deterministic, kind-grouped visitor
//! - **[`generator`]** - the generation pipeline: workspace probing, starter
//!   scaffolding, manifest reconciliation, template rendering,
//!   canonicalization and the virtual overlay
//! - **[`cli`]** - the `modforge-gen` command-line interface
//!
//! ### Generation Flow
//!
//! ```text
//! schema.json → Schema → Generator::generate → GeneratedState
//!                              │                    │
//!                              │                    ├── overlay (apply to commit)
//!                              │                    ├── post commands (cargo update)
//!                              │                    └── convergence (FirstPass → rerun)
//!                              └── probes Cargo.toml + src/main.rs first
//! ```
//!
//! Generation is a two-pass protocol against a fresh workspace: the first
//! pass scaffolds the entry point the second pass needs to read. Callers
//! loop until [`generator::Convergence::Converged`], bounded by a fixed cap.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use modforge::generator::{CancelToken, Generator, GeneratorConfig};
//! use modforge::schema::Schema;
//!
//! let schema: Schema = serde_json::from_str(&std::fs::read_to_string("schema.json")?)?;
//! let generator = Generator::new(GeneratorConfig {
//!     module_name: Some("my module".to_string()),
//!     source_dir: "my-module".into(),
//!     output_dir: "my-module".into(),
//! });
//! let state = generator.generate(&schema, &CancelToken::new())?;
//! state.overlay.apply()?;
//! ```

pub mod cli;
pub mod generator;
pub mod schema;

pub use generator::{
    CancelToken, Convergence, GenerateError, GeneratedState, Generator, GeneratorConfig, Overlay,
    PostCommand,
};
pub use schema::{Schema, TypeDef};
