//! Static analysis of the target workspace.
//!
//! Probing runs before anything is written and answers two questions: what
//! crate identity should the generated code declare itself under, and which
//! user functions must the module dispatch shim route to. Probing is
//! read-only and best-effort: a missing workspace is the expected first-run
//! outcome, but a malformed one is user-visible corruption and propagates.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::error::GenerateError;
use super::manifest::MANIFEST_FILE;
use super::scaffold::SCAFFOLD_FILE;
use crate::schema::to_lower_camel_case;

/// Identity the generated code declares itself under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    /// Crate name of the workspace the generated file lives in.
    pub package_name: String,
    /// Root import path the generated code is addressed under.
    pub module_path: String,
}

/// Outcome of probing the output directory.
///
/// `Absent` is the one expected non-error outcome; the caller substitutes
/// defaults. Every other failure propagates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    Found(PackageInfo),
    Absent,
}

/// Attempt to load the output directory as an existing crate.
///
/// Returns `Probe::Absent` when no manifest is present. A manifest that is
/// present but malformed, or one that holds several packages where exactly
/// one is expected, is an error, not an absence.
pub fn probe_package(dir: &Path) -> Result<Probe, GenerateError> {
    let manifest_path = dir.join(MANIFEST_FILE);
    let contents = match fs::read_to_string(&manifest_path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Probe::Absent),
        Err(e) => return Err(GenerateError::io(manifest_path, e)),
    };

    let doc: toml::Table = toml::from_str(&contents).map_err(|e| GenerateError::ManifestParse {
        path: manifest_path.clone(),
        message: e.to_string(),
    })?;

    let name = match doc.get("package").and_then(|p| p.get("name")) {
        Some(name) => name
            .as_str()
            .ok_or_else(|| GenerateError::ManifestParse {
                path: manifest_path.clone(),
                message: "package.name is not a string".to_string(),
            })?
            .to_string(),
        None => {
            // A virtual workspace manifest holds zero or many member
            // packages; more than one at a path expected to hold exactly
            // one violates the prober invariant.
            let members = doc
                .get("workspace")
                .and_then(|w| w.get("members"))
                .and_then(|m| m.as_array())
                .map(|m| m.len())
                .unwrap_or(0);
            if members > 1 {
                return Err(GenerateError::ProbeAmbiguity {
                    dir: dir.to_path_buf(),
                    found: members,
                });
            }
            return Ok(Probe::Absent);
        }
    };

    // Full static analysis: an entry-point source that no longer parses is
    // workspace corruption the generator must not paper over.
    let scaffold_path = dir.join(SCAFFOLD_FILE);
    if let Ok(source) = fs::read_to_string(&scaffold_path) {
        syn::parse_file(&source).map_err(|e| GenerateError::SourceParse {
            path: scaffold_path,
            message: e.to_string(),
        })?;
    }

    let info = PackageInfo {
        module_path: name.replace('-', "_"),
        package_name: name,
    };
    debug!(
        package_name = %info.package_name,
        module_path = %info.module_path,
        "found existing package"
    );
    Ok(Probe::Found(info))
}

/// A user function the dispatch shim routes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFunction {
    /// Rust method name on the module struct.
    pub name: String,
    /// Name the host engine invokes the function by.
    pub invoke_name: String,
    pub args: Vec<FunctionArg>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionArg {
    pub name: String,
    /// Wire name of the argument in an invocation payload.
    pub invoke_name: String,
}

/// Discover the public methods declared on the module struct in the user's
/// source directory.
///
/// Best effort by design: on the first pass the scaffold only exists in the
/// not-yet-applied overlay, so there is nothing to read and the shim renders
/// with no dispatch arms. The second pass sees the applied scaffold and
/// regenerates the full dispatch table.
pub fn module_functions(source_dir: &Path, struct_name: &str) -> Vec<ModuleFunction> {
    let path = source_dir.join(SCAFFOLD_FILE);
    let source = match fs::read_to_string(&path) {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };
    let file = match syn::parse_file(&source) {
        Ok(f) => f,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping unparseable module source");
            return Vec::new();
        }
    };

    let mut functions = Vec::new();
    for item in &file.items {
        let syn::Item::Impl(imp) = item else { continue };
        if imp.trait_.is_some() || !impl_targets(imp, struct_name) {
            continue;
        }
        for impl_item in &imp.items {
            let syn::ImplItem::Fn(func) = impl_item else {
                continue;
            };
            if !matches!(func.vis, syn::Visibility::Public(_)) {
                continue;
            }
            let name = func.sig.ident.to_string();
            let args = func
                .sig
                .inputs
                .iter()
                .filter_map(|input| match input {
                    syn::FnArg::Typed(pat) => match pat.pat.as_ref() {
                        syn::Pat::Ident(ident) => Some(ident.ident.to_string()),
                        _ => None,
                    },
                    syn::FnArg::Receiver(_) => None,
                })
                .map(|arg| FunctionArg {
                    invoke_name: to_lower_camel_case(&arg),
                    name: arg,
                })
                .collect();
            functions.push(ModuleFunction {
                invoke_name: to_lower_camel_case(&name),
                name,
                args,
            });
        }
    }
    debug!(
        source_dir = %source_dir.display(),
        count = functions.len(),
        "discovered module functions"
    );
    functions
}

fn impl_targets(imp: &syn::ItemImpl, struct_name: &str) -> bool {
    match imp.self_ty.as_ref() {
        syn::Type::Path(p) => p
            .path
            .segments
            .last()
            .is_some_and(|seg| seg.ident == struct_name),
        _ => false,
    }
}
