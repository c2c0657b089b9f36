//! Starter entry-point synthesis for fresh workspaces.

use super::error::GenerateError;
use super::overlay::Overlay;
use super::templates::render_starter;
use crate::schema::to_camel_case;

/// Physical name of the user-owned entry-point file.
pub const SCAFFOLD_FILE: &str = "src/main.rs";

/// Convergence state of a generation pass.
///
/// `FirstPass` means this pass wrote inputs (the scaffold) that the next
/// pass must re-read: probing runs before scaffolding, so the pipeline never
/// reads a file it wrote within the same pass. The caller loops until
/// `Converged`, bounded by a fixed iteration cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convergence {
    /// The scaffold was just written; a second full pass is required.
    FirstPass,
    /// The workspace was already self-consistent before this pass.
    Converged,
}

impl Convergence {
    pub fn needs_regenerate(&self) -> bool {
        matches!(self, Convergence::FirstPass)
    }
}

/// Write the starter module source into the overlay when the entry-point
/// file does not already exist.
///
/// The starter declares one module struct named after the extension module
/// and one example function demonstrating the callback-into-engine idiom.
/// Writes target the virtual layer only; an existing entry point is never
/// touched.
pub fn write_scaffold(
    overlay: &mut Overlay,
    module_name: Option<&str>,
) -> Result<Convergence, GenerateError> {
    if overlay.exists(SCAFFOLD_FILE) {
        return Ok(Convergence::Converged);
    }
    let struct_name = to_camel_case(module_name.unwrap_or("module"));
    let rendered = render_starter(&struct_name)?;
    overlay.write(SCAFFOLD_FILE, rendered.into_bytes());
    Ok(Convergence::FirstPass)
}
