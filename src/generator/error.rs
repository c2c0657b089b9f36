use std::fmt;
use std::path::PathBuf;

/// Post-processing stage that rejected the rendered source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStage {
    /// Syntax canonicalization: the concatenated render did not parse.
    Format,
    /// Import resolution: the render references a type that is neither
    /// defined in the file nor resolvable to a known import.
    Imports,
}

impl fmt::Display for OutputStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputStage::Format => f.write_str("format"),
            OutputStage::Imports => f.write_str("imports"),
        }
    }
}

/// Failure surfaced by the generation pipeline.
///
/// Nothing here is retried; every variant aborts the current pass and carries
/// enough context (path, or the full rendered source) to diagnose without
/// re-running.
#[derive(Debug)]
pub enum GenerateError {
    /// More than one package found at a path expected to hold exactly one.
    ProbeAmbiguity { dir: PathBuf, found: usize },
    /// An existing manifest is malformed.
    ManifestParse { path: PathBuf, message: String },
    /// The embedded baseline manifest failed to parse. The baseline is a
    /// build-time constant, so this is an internal defect, never user error.
    BaselineManifest { message: String },
    /// An existing source file in the probed workspace failed to parse.
    SourceParse { path: PathBuf, message: String },
    /// A section template failed to render.
    Render { section: String, message: String },
    /// Canonicalization or import resolution rejected the concatenated
    /// render. Carries the complete pre-canonicalization source.
    MalformedOutput {
        stage: OutputStage,
        message: String,
        source: String,
    },
    /// Underlying read/write failure, with the offending path.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The caller's cancellation signal fired at a stage boundary.
    Cancelled { stage: &'static str },
}

impl GenerateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenerateError::Io {
            path: path.into(),
            source,
        }
    }

    /// The full pre-canonicalization source, when this error carries one.
    pub fn rendered_source(&self) -> Option<&str> {
        match self {
            GenerateError::MalformedOutput { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::ProbeAmbiguity { dir, found } => {
                write!(
                    f,
                    "expected exactly one package at {}, found {found}",
                    dir.display()
                )
            }
            GenerateError::ManifestParse { path, message } => {
                write!(f, "parse manifest {}: {message}", path.display())
            }
            GenerateError::BaselineManifest { message } => {
                write!(f, "embedded baseline manifest is invalid: {message}")
            }
            GenerateError::SourceParse { path, message } => {
                write!(f, "parse source {}: {message}", path.display())
            }
            GenerateError::Render { section, message } => {
                write!(f, "render section '{section}': {message}")
            }
            GenerateError::MalformedOutput {
                stage,
                message,
                source,
            } => {
                write!(
                    f,
                    "generated code failed the {stage} stage: {message}\nsource:\n{source}"
                )
            }
            GenerateError::Io { path, source } => {
                write!(f, "{}: {source}", path.display())
            }
            GenerateError::Cancelled { stage } => {
                write!(f, "generation cancelled before the {stage} stage")
            }
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
