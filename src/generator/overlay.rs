//! Virtual overlay over the real output workspace.
//!
//! Generation writes only into an in-memory layer; reads consult the layer
//! first and fall through to the base directory. Nothing touches the real
//! file system until the caller applies the overlay, so a failed pass never
//! leaves a half-written generated file behind.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::GenerateError;

/// Layered view of the output workspace: a read-only base directory plus a
/// writable generated layer.
#[derive(Debug, Clone)]
pub struct Overlay {
    base: PathBuf,
    layer: BTreeMap<PathBuf, Vec<u8>>,
}

impl Overlay {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Overlay {
            base: base.into(),
            layer: BTreeMap::new(),
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Stage `contents` at `path` (relative to the base) in the generated
    /// layer. The base directory is not modified.
    pub fn write(&mut self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) {
        self.layer
            .insert(path.as_ref().to_path_buf(), contents.into());
    }

    /// Read through the overlay: the generated layer wins, the base
    /// workspace is consulted second. `Ok(None)` means the file exists in
    /// neither.
    pub fn read(&self, path: impl AsRef<Path>) -> Result<Option<Vec<u8>>, GenerateError> {
        let path = path.as_ref();
        if let Some(contents) = self.layer.get(path) {
            return Ok(Some(contents.clone()));
        }
        let real = self.base.join(path);
        match fs::read(&real) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GenerateError::io(real, e)),
        }
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        self.layer.contains_key(path) || self.base.join(path).exists()
    }

    /// Files staged in the generated layer, in path order.
    pub fn files(&self) -> impl Iterator<Item = (&Path, &[u8])> {
        self.layer.iter().map(|(p, c)| (p.as_path(), c.as_slice()))
    }

    /// Commit the generated layer into the base workspace, creating parent
    /// directories as needed.
    pub fn apply(&self) -> Result<(), GenerateError> {
        for (path, contents) in &self.layer {
            let real = self.base.join(path);
            if let Some(parent) = real.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| GenerateError::io(parent.to_path_buf(), e))?;
            }
            fs::write(&real, contents).map_err(|e| GenerateError::io(real.clone(), e))?;
        }
        Ok(())
    }
}

/// Shell-level command queued for the caller to run against the
/// materialized workspace after applying the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl PostCommand {
    pub fn new(program: &str, args: impl IntoIterator<Item = &'static str>) -> Self {
        PostCommand {
            program: program.to_string(),
            args: args.into_iter().map(String::from).collect(),
        }
    }

    /// Build a `std::process::Command` running in `dir`.
    pub fn command(&self, dir: &Path) -> std::process::Command {
        let mut cmd = std::process::Command::new(&self.program);
        cmd.args(&self.args).current_dir(dir);
        cmd
    }
}

impl std::fmt::Display for PostCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.program, self.args.join(" "))
    }
}

/// Marker file consumed by diff/merge tooling.
pub const GITATTRIBUTES_FILE: &str = ".gitattributes";

/// Ensure `.gitattributes` flags `gen_file` as machine-generated.
///
/// Reads through the overlay and appends the entry only when missing, so a
/// user-customized attributes file is never clobbered.
pub fn install_gitattributes(overlay: &mut Overlay, gen_file: &str) -> Result<(), GenerateError> {
    let entry = format!("/{gen_file} linguist-generated=true");
    let existing = overlay.read(GITATTRIBUTES_FILE)?;
    let mut contents = existing
        .map(|c| String::from_utf8_lossy(&c).into_owned())
        .unwrap_or_default();
    if contents.lines().any(|l| l.trim() == entry) {
        return Ok(());
    }
    if !contents.is_empty() && !contents.ends_with('\n') {
        contents.push('\n');
    }
    contents.push_str(&entry);
    contents.push('\n');
    overlay.write(GITATTRIBUTES_FILE, contents.into_bytes());
    Ok(())
}
