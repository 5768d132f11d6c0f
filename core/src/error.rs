//! Error types for dumping and configuration.

use thiserror::Error;

/// Failure to render an instruction list.
///
/// Every variant except `Io` names the offending instruction.
#[derive(Error, Debug)]
pub enum DumpError {
    /// The memory-access constant has no valid access kind.
    #[error("op {index}: unknown memory access kind in {raw:#x}")]
    UnknownAccessKind { index: usize, raw: u64 },

    /// The memory operation type has no name.
    #[error("op {index}: no name for memory operation {memop:#x}")]
    UnknownMemOpName { index: usize, memop: u16 },

    /// A constant the opcode requires is absent.
    #[error("op {index}: {opcode} is missing a constant argument")]
    MissingConstArg { index: usize, opcode: &'static str },

    /// Writing to the output sink failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DumpError {
    /// Index of the instruction at fault, if the error is tied to one.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::UnknownAccessKind { index, .. }
            | Self::UnknownMemOpName { index, .. }
            | Self::MissingConstArg { index, .. } => Some(*index),
            Self::Io(_) => None,
        }
    }
}

/// Failure to load a dump configuration or helper table.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
