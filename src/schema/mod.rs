//! # Schema Module
//!
//! In-memory model of the engine's introspected type system.
//!
//! The schema is the single input to code generation: a flat list of named
//! types partitioned into four kinds (scalars, objects, enums, inputs). The
//! model is read-only once constructed and is threaded explicitly through
//! every generation stage; there is no process-wide schema state.
//!
//! ## Overview
//!
//! - **[`TypeDef`]** - closed tagged union over the four type kinds. Adding a
//!   kind is a compile error until every consumer's `match` is updated.
//! - **[`Schema::visit`]** - delivers each type exactly once, grouped by kind
//!   in the order scalars, objects, enums, inputs, each kind in the schema's
//!   own declaration order. Generated output is deterministic because this
//!   order is.
//! - **naming helpers** - casing conversions used for crate names, type names
//!   and generated identifiers.
//!
//! The model derives `Serialize`/`Deserialize` so the CLI can load an
//! introspection document from JSON or YAML; the core itself never touches
//! the transport.

mod naming;
mod types;

pub use naming::{
    sanitize_identifier, to_camel_case, to_kebab_case, to_lower_camel_case, to_snake_case,
};
pub use types::{
    ArgDef, EnumDef, EnumValueDef, FieldDef, InputDef, InputFieldDef, ObjectDef, ScalarDef, Schema,
    TypeDef, TypeKind, TypeRef,
};
