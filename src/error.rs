//! Crate-level error types.

use std::fmt;

use crate::camera::framing::FramingError;
use crate::chain_list::ChainListError;
use crate::engine::EngineError;

/// Errors produced by the molsnap crate.
#[derive(Debug)]
pub enum MolsnapError {
    /// Failed to load or decode a structure document.
    StructureLoad(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// JSON serialization failure (state sidecars).
    Json(serde_json::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// A model, assembly or chain named by the caller does not exist.
    TargetNotFound(String),
    /// A selection that must contain atoms came out empty.
    EmptySelection(String),
    /// Invalid chain-list token stream or unresolved operator list.
    ChainList(ChainListError),
    /// Camera framing failure.
    Framing(FramingError),
    /// The rendering engine failed to build a layer or rasterize.
    Engine(EngineError),
    /// Encoding or writing an output image failed.
    ImageWrite(String),
    /// A failure attributed to a specific render target.
    Target {
        /// Human-readable target description, e.g. `chain B`.
        target: String,
        /// The underlying failure.
        source: Box<MolsnapError>,
    },
}

impl MolsnapError {
    /// Attach a render target description to this error.
    #[must_use]
    pub fn for_target(self, target: impl Into<String>) -> Self {
        Self::Target {
            target: target.into(),
            source: Box::new(self),
        }
    }
}

impl fmt::Display for MolsnapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StructureLoad(msg) => {
                write!(f, "structure load error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::TargetNotFound(msg) => write!(f, "not found: {msg}"),
            Self::EmptySelection(msg) => {
                write!(f, "empty selection: {msg}")
            }
            Self::ChainList(e) => write!(f, "invalid chain list: {e}"),
            Self::Framing(e) => write!(f, "camera framing failed: {e}"),
            Self::Engine(e) => write!(f, "render engine error: {e}"),
            Self::ImageWrite(msg) => write!(f, "image write error: {msg}"),
            Self::Target { target, source } => {
                write!(f, "{target}: {source}")
            }
        }
    }
}

impl std::error::Error for MolsnapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::ChainList(e) => Some(e),
            Self::Framing(e) => Some(e),
            Self::Engine(e) => Some(e),
            Self::Target { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MolsnapError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for MolsnapError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<ChainListError> for MolsnapError {
    fn from(e: ChainListError) -> Self {
        Self::ChainList(e)
    }
}

impl From<FramingError> for MolsnapError {
    fn from(e: FramingError) -> Self {
        Self::Framing(e)
    }
}

impl From<EngineError> for MolsnapError {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}
