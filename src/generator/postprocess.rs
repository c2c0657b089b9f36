//! Canonicalization of the concatenated render.
//!
//! Raw template concatenation commonly produces text that is syntactically
//! valid but reference-incomplete, so this runs two separable stages with
//! distinct failure modes:
//!
//! 1. **format** - parse with `syn` and re-emit with `prettyplease`, which
//!    normalizes whitespace deterministically; a parse failure means a
//!    template emitted broken syntax.
//! 2. **imports** - compute the `use` list the render needs from a table of
//!    known imports, and reject any capitalized reference that is neither
//!    defined in the file nor resolvable.
//!
//! Both stages attach the complete pre-canonicalization source to their
//! error so a failure is diagnosable without re-running the pipeline.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use syn::visit::Visit;

use super::error::{GenerateError, OutputStage};

/// Idents the generated code may reference without qualification, mapped to
/// the import that resolves them.
static KNOWN_IMPORTS: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        ("Arc", "std::sync::Arc"),
        ("BTreeMap", "std::collections::BTreeMap"),
        ("HashMap", "std::collections::HashMap"),
        ("fmt", "std::fmt"),
        ("Serialize", "serde::Serialize"),
        ("Deserialize", "serde::Deserialize"),
        ("Engine", "modforge_client::Engine"),
        ("EngineError", "modforge_client::EngineError"),
        ("Selection", "modforge_client::Selection"),
        ("Args", "modforge_client::Args"),
        ("ReturnValue", "modforge_client::ReturnValue"),
    ])
});

/// Names resolvable without any import.
const PRELUDE: &[&str] = &[
    "String", "Vec", "Option", "Result", "Box", "Some", "None", "Ok", "Err", "Self", "Clone",
    "Copy", "Debug", "Default", "PartialEq", "Eq", "Hash", "From", "Into", "Iterator", "ToString",
    "Send", "Sync",
];

struct IdentCollector {
    /// Unqualified single-segment references.
    single: BTreeSet<String>,
    /// First segments of qualified paths (e.g. `fmt` in `fmt::Display`).
    roots: BTreeSet<String>,
}

impl<'ast> Visit<'ast> for IdentCollector {
    fn visit_path(&mut self, path: &'ast syn::Path) {
        if path.leading_colon.is_none() {
            if path.segments.len() == 1 {
                self.single.insert(path.segments[0].ident.to_string());
            } else if let Some(first) = path.segments.first() {
                self.roots.insert(first.ident.to_string());
            }
        }
        syn::visit::visit_path(self, path);
    }

    fn visit_attribute(&mut self, attr: &'ast syn::Attribute) {
        // Derive invocations name traits outside any visited Path, so scan
        // their token list directly.
        if attr.path().is_ident("derive") {
            if let syn::Meta::List(list) = &attr.meta {
                for tt in list.tokens.clone() {
                    if let proc_macro2::TokenTree::Ident(ident) = tt {
                        self.single.insert(ident.to_string());
                    }
                }
            }
        }
        syn::visit::visit_attribute(self, attr);
    }
}

fn defined_names(file: &syn::File) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for item in &file.items {
        let ident = match item {
            syn::Item::Struct(i) => Some(&i.ident),
            syn::Item::Enum(i) => Some(&i.ident),
            syn::Item::Fn(i) => Some(&i.sig.ident),
            syn::Item::Type(i) => Some(&i.ident),
            syn::Item::Const(i) => Some(&i.ident),
            syn::Item::Static(i) => Some(&i.ident),
            syn::Item::Trait(i) => Some(&i.ident),
            syn::Item::Mod(i) => Some(&i.ident),
            syn::Item::Union(i) => Some(&i.ident),
            _ => None,
        };
        if let Some(ident) = ident {
            names.insert(ident.to_string());
        }
    }
    names
}

fn malformed(stage: OutputStage, message: String, source: &str) -> GenerateError {
    GenerateError::MalformedOutput {
        stage,
        message,
        source: source.to_string(),
    }
}

/// Canonicalize the rendered source and resolve its import list.
///
/// Deterministic: identical input yields byte-identical output.
pub fn postprocess(source: &str) -> Result<String, GenerateError> {
    let mut file = syn::parse_file(source)
        .map_err(|e| malformed(OutputStage::Format, e.to_string(), source))?;

    let mut collector = IdentCollector {
        single: BTreeSet::new(),
        roots: BTreeSet::new(),
    };
    collector.visit_file(&file);
    let defined = defined_names(&file);

    let mut required = BTreeSet::new();
    for ident in collector.single.iter().chain(collector.roots.iter()) {
        if defined.contains(ident) {
            continue;
        }
        if let Some(path) = KNOWN_IMPORTS.get(ident.as_str()) {
            required.insert(*path);
        }
    }

    for ident in &collector.single {
        if !ident
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase())
        {
            continue;
        }
        // Single uppercase letters follow the generic-parameter convention.
        if ident.len() == 1 {
            continue;
        }
        if defined.contains(ident)
            || PRELUDE.contains(&ident.as_str())
            || KNOWN_IMPORTS.contains_key(ident.as_str())
        {
            continue;
        }
        return Err(malformed(
            OutputStage::Imports,
            format!("unresolved reference `{ident}`"),
            source,
        ));
    }

    for (offset, path) in required.iter().enumerate() {
        let item: syn::Item = syn::parse_str(&format!("use {path};"))
            .map_err(|e| malformed(OutputStage::Imports, e.to_string(), source))?;
        file.items.insert(offset, item);
    }

    Ok(prettyplease::unparse(&file))
}
