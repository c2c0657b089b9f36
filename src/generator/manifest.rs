//! Dependency-manifest reconciliation.
//!
//! The generator ships an embedded baseline manifest naming exactly the
//! dependencies generated code needs at the versions it was built against.
//! Reconciliation is additive with respect to that baseline: engine-required
//! entries are upserted by name, everything else in a user-owned manifest is
//! preserved verbatim, unknown keys included.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::GenerateError;
use super::overlay::Overlay;
use crate::schema::to_kebab_case;

/// Physical manifest name recognized by cargo.
pub const MANIFEST_FILE: &str = "Cargo.toml";
/// Integrity-lock companion, rewritten from the embedded baseline each run.
pub const LOCKFILE: &str = "Cargo.lock";

const BASELINE_MANIFEST: &str = include_str!("../../baseline/Cargo.toml");
const BASELINE_LOCKFILE: &str = include_str!("../../baseline/Cargo.lock");

/// Crate name used when no module name is configured and no manifest exists.
pub const DEFAULT_PACKAGE_NAME: &str = "main";

/// Dependency requirement as it appears in a manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DependencySpec {
    /// Simple version string: `"1.0"`
    Version(String),
    /// Full specification: `{ version = "1.0", features = ["derive"] }`
    Detailed {
        #[serde(skip_serializing_if = "Option::is_none")]
        version: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        features: Option<Vec<String>>,
        #[serde(flatten)]
        rest: toml::Table,
    },
}

#[derive(Debug, Clone, Deserialize)]
struct Baseline {
    #[serde(default)]
    dependencies: BTreeMap<String, DependencySpec>,
}

/// Parse the embedded baseline. The baseline is a build-time constant, so a
/// parse failure here is an internal defect and fails fast.
fn baseline() -> Result<Baseline, GenerateError> {
    toml::from_str(BASELINE_MANIFEST).map_err(|e| GenerateError::BaselineManifest {
        message: e.to_string(),
    })
}

/// The engine-required dependency set, keyed by crate name.
pub fn baseline_dependencies() -> Result<BTreeMap<String, DependencySpec>, GenerateError> {
    Ok(baseline()?.dependencies)
}

/// Reconcile the workspace manifest against the embedded baseline and stage
/// the result (plus the lockfile) in the overlay.
///
/// Returns the crate name the manifest declares, which doubles as the module
/// identity the generated code is addressed under.
///
/// An existing manifest keeps its identity and every non-baseline entry
/// untouched; baseline entries are upserted at the baseline's version. A
/// missing manifest is synthesized with its name derived from the module
/// name and its requirement list set to exactly the baseline.
pub fn reconcile_manifest(
    overlay: &mut Overlay,
    module_name: Option<&str>,
) -> Result<String, GenerateError> {
    let baseline = baseline()?;
    let manifest_path = overlay.base().join(MANIFEST_FILE);

    let (doc, crate_name) = match overlay.read(MANIFEST_FILE)? {
        Some(bytes) => {
            let text = String::from_utf8_lossy(&bytes).into_owned();
            let mut doc: toml::Table =
                toml::from_str(&text).map_err(|e| GenerateError::ManifestParse {
                    path: manifest_path.clone(),
                    message: e.to_string(),
                })?;

            let name = doc
                .get("package")
                .and_then(|p| p.get("name"))
                .and_then(|n| n.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| derived_name(module_name));

            let deps = doc
                .entry("dependencies".to_string())
                .or_insert_with(|| toml::Value::Table(toml::Table::new()));
            let deps = deps
                .as_table_mut()
                .ok_or_else(|| GenerateError::ManifestParse {
                    path: manifest_path.clone(),
                    message: "dependencies is not a table".to_string(),
                })?;
            for (name, spec) in &baseline.dependencies {
                deps.insert(name.clone(), spec_value(spec)?);
            }
            (doc, name)
        }
        None => {
            let name = derived_name(module_name);
            let mut package = toml::Table::new();
            package.insert("name".to_string(), toml::Value::String(name.clone()));
            package.insert(
                "version".to_string(),
                toml::Value::String("0.1.0".to_string()),
            );
            package.insert(
                "edition".to_string(),
                toml::Value::String("2021".to_string()),
            );

            let mut deps = toml::Table::new();
            for (name, spec) in &baseline.dependencies {
                deps.insert(name.clone(), spec_value(spec)?);
            }

            let mut doc = toml::Table::new();
            doc.insert("package".to_string(), toml::Value::Table(package));
            doc.insert("dependencies".to_string(), toml::Value::Table(deps));
            (doc, name)
        }
    };

    let body = toml::to_string_pretty(&doc).map_err(|e| GenerateError::ManifestParse {
        path: manifest_path,
        message: e.to_string(),
    })?;
    overlay.write(MANIFEST_FILE, body.into_bytes());
    overlay.write(LOCKFILE, BASELINE_LOCKFILE.as_bytes().to_vec());
    Ok(crate_name)
}

fn derived_name(module_name: Option<&str>) -> String {
    match module_name {
        Some(name) => to_kebab_case(name),
        None => DEFAULT_PACKAGE_NAME.to_string(),
    }
}

fn spec_value(spec: &DependencySpec) -> Result<toml::Value, GenerateError> {
    toml::Value::try_from(spec.clone()).map_err(|e| GenerateError::BaselineManifest {
        message: e.to_string(),
    })
}
