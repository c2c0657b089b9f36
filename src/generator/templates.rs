//! Askama section templates for the generated client.
//!
//! Each schema kind has one template; the pipeline renders them in a fixed
//! order and concatenates the results. Template data is fully precomputed
//! here (names cased, types mapped, docs split into lines) so the templates
//! themselves stay pure layout.

use std::path::Path;

use askama::Template;

use super::error::GenerateError;
use super::probe::{ModuleFunction, PackageInfo};
use crate::schema::{
    sanitize_identifier, to_camel_case, to_snake_case, EnumDef, InputDef, ObjectDef, ScalarDef,
    Schema, TypeDef,
};

/// Name of the schema object that roots the API graph.
const ROOT_OBJECT: &str = "Query";

fn render_err(section: &str, e: askama::Error) -> GenerateError {
    GenerateError::Render {
        section: section.to_string(),
        message: e.to_string(),
    }
}

fn doc_lines(description: &str) -> Vec<String> {
    if description.trim().is_empty() {
        return Vec::new();
    }
    description
        .lines()
        .map(|l| l.trim_end().to_string())
        .collect()
}

#[derive(Template)]
#[template(path = "header.rs.txt", escape = "none")]
struct HeaderTemplateData<'a> {
    package_name: &'a str,
    module_path: &'a str,
    type_count: usize,
    has_root: bool,
}

/// Render the header section: workspace identity plus the engine handle.
///
/// The full schema is part of the context so the header can cross-reference
/// it (the type count, and whether a root object exists to hang the `dag()`
/// accessor off).
pub fn render_header(pkg: &PackageInfo, schema: &Schema) -> Result<String, GenerateError> {
    HeaderTemplateData {
        package_name: &pkg.package_name,
        module_path: &pkg.module_path,
        type_count: schema.types.len(),
        has_root: schema.objects().any(|o| o.name == ROOT_OBJECT),
    }
    .render()
    .map_err(|e| render_err("header", e))
}

#[derive(Template)]
#[template(path = "scalar.rs.txt", escape = "none")]
struct ScalarTemplateData {
    doc_lines: Vec<String>,
    rust_name: String,
}

pub fn render_scalar(scalar: &ScalarDef) -> Result<String, GenerateError> {
    ScalarTemplateData {
        doc_lines: doc_lines(&scalar.description),
        rust_name: to_camel_case(&scalar.name),
    }
    .render()
    .map_err(|e| render_err("scalar", e))
}

struct ArgContext {
    rust_name: String,
    selector: String,
    ty: String,
}

struct ObjectFieldContext {
    doc_lines: Vec<String>,
    rust_name: String,
    selector: String,
    args: Vec<ArgContext>,
    returns_object: bool,
    ret_ty: String,
}

#[derive(Template)]
#[template(path = "object.rs.txt", escape = "none")]
struct ObjectTemplateData {
    doc_lines: Vec<String>,
    rust_name: String,
    is_root: bool,
    is_module_code: bool,
    fields: Vec<ObjectFieldContext>,
}

/// Render one object section.
///
/// `is_module_code` widens the rendered surface: module-only fields and the
/// host-invocation constructor are emitted only when generating an extension
/// module, never for a plain client.
pub fn render_object(
    object: &ObjectDef,
    schema: &Schema,
    is_module_code: bool,
) -> Result<String, GenerateError> {
    let fields = object
        .fields
        .iter()
        .filter(|f| is_module_code || !f.module_only)
        .map(|f| {
            let returns_object =
                !f.ty.list && matches!(schema.type_by_name(&f.ty.name), Some(TypeDef::Object(_)));
            let ret_ty = if returns_object {
                to_camel_case(&f.ty.name)
            } else {
                f.ty.rust_type()
            };
            ObjectFieldContext {
                doc_lines: doc_lines(&f.description),
                rust_name: sanitize_identifier(&to_snake_case(&f.name)),
                selector: f.name.clone(),
                args: f
                    .args
                    .iter()
                    .map(|a| ArgContext {
                        rust_name: sanitize_identifier(&to_snake_case(&a.name)),
                        selector: a.name.clone(),
                        ty: a.ty.rust_type(),
                    })
                    .collect(),
                returns_object,
                ret_ty,
            }
        })
        .collect();

    ObjectTemplateData {
        doc_lines: doc_lines(&object.description),
        rust_name: to_camel_case(&object.name),
        is_root: object.name == ROOT_OBJECT,
        is_module_code,
        fields,
    }
    .render()
    .map_err(|e| render_err("object", e))
}

struct EnumValueContext {
    doc_lines: Vec<String>,
    rust_name: String,
    wire_name: String,
}

#[derive(Template)]
#[template(path = "enum.rs.txt", escape = "none")]
struct EnumTemplateData {
    doc_lines: Vec<String>,
    rust_name: String,
    values: Vec<EnumValueContext>,
}

pub fn render_enum(def: &EnumDef) -> Result<String, GenerateError> {
    EnumTemplateData {
        doc_lines: doc_lines(&def.description),
        rust_name: to_camel_case(&def.name),
        values: def
            .values
            .iter()
            .map(|v| EnumValueContext {
                doc_lines: doc_lines(&v.description),
                rust_name: to_camel_case(&v.name),
                wire_name: v.name.clone(),
            })
            .collect(),
    }
    .render()
    .map_err(|e| render_err("enum", e))
}

struct InputFieldContext {
    doc_lines: Vec<String>,
    rust_name: String,
    wire_name: String,
    ty: String,
    optional: bool,
}

#[derive(Template)]
#[template(path = "input.rs.txt", escape = "none")]
struct InputTemplateData {
    doc_lines: Vec<String>,
    rust_name: String,
    fields: Vec<InputFieldContext>,
}

pub fn render_input(def: &InputDef) -> Result<String, GenerateError> {
    let fields = def
        .fields
        .iter()
        .map(|f| {
            let optional = f.optional || f.ty.optional;
            let mut base = f.ty.clone();
            base.optional = false;
            let base = base.rust_type();
            InputFieldContext {
                doc_lines: doc_lines(&f.description),
                rust_name: sanitize_identifier(&to_snake_case(&f.name)),
                wire_name: f.name.clone(),
                ty: if optional {
                    format!("Option<{base}>")
                } else {
                    base
                },
                optional,
            }
        })
        .collect();

    InputTemplateData {
        doc_lines: doc_lines(&def.description),
        rust_name: to_camel_case(&def.name),
        fields,
    }
    .render()
    .map_err(|e| render_err("input", e))
}

struct ModuleArgContext {
    wire_name: String,
}

struct ModuleFunctionContext {
    match_name: String,
    rust_name: String,
    args: Vec<ModuleArgContext>,
}

#[derive(Template)]
#[template(path = "module.rs.txt", escape = "none")]
struct ModuleTemplateData {
    struct_name: String,
    source_dir: String,
    functions: Vec<ModuleFunctionContext>,
}

/// Render the module entry-point section: the dispatch shim routing host
/// invocations to the user's declared functions by name.
pub fn render_module(
    struct_name: &str,
    source_dir: &Path,
    functions: &[ModuleFunction],
) -> Result<String, GenerateError> {
    ModuleTemplateData {
        struct_name: struct_name.to_string(),
        source_dir: source_dir.display().to_string(),
        functions: functions
            .iter()
            .map(|f| ModuleFunctionContext {
                match_name: f.invoke_name.clone(),
                rust_name: f.name.clone(),
                args: f
                    .args
                    .iter()
                    .map(|a| ModuleArgContext {
                        wire_name: a.invoke_name.clone(),
                    })
                    .collect(),
            })
            .collect(),
    }
    .render()
    .map_err(|e| render_err("module", e))
}

#[derive(Template)]
#[template(path = "starter.rs.txt", escape = "none")]
struct StarterTemplateData {
    struct_name: String,
}

/// Render the starter entry-point source for a fresh workspace.
pub fn render_starter(struct_name: &str) -> Result<String, GenerateError> {
    StarterTemplateData {
        struct_name: struct_name.to_string(),
    }
    .render()
    .map_err(|e| render_err("starter", e))
}
