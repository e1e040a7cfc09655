//! Error types for the generator.

use std::path::PathBuf;

use thiserror::Error;

use crate::mapping::MappingTarget;
use crate::strategy::MappingStrategy;

/// Failure of a single type-mapping resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// A strategy token was present but empty.
    #[error("type mapping strategy must not be empty")]
    EmptyStrategy,

    /// An unrecognized token that is not a usable Kotlin function name.
    #[error("unknown type mapping strategy `{0}` (expected a strategy constant or a function name)")]
    InvalidStrategy(String),

    /// `no-mapping` was requested for a type the bridge cannot return as-is.
    #[error("{target}: strategy `{strategy}` cannot be used with non-native type `{ty}`")]
    NoMappingForNonNative {
        target: MappingTarget,
        strategy: MappingStrategy,
        ty: String,
    },

    /// The strategy has no meaning for this direction of the bridge.
    #[error("{target}: strategy `{strategy}` is not allowed here")]
    IllegalForTarget {
        target: MappingTarget,
        strategy: MappingStrategy,
    },

    /// A conversion function name was reused for a different signature.
    #[error(
        "conversion function `{name}({parameter})` is already declared returning `{existing}`, cannot redeclare it returning `{requested}`"
    )]
    ConflictingSignature {
        name: String,
        parameter: String,
        existing: String,
        requested: String,
    },
}

/// Errors surfaced by [`CodeGenerator`](crate::CodeGenerator).
#[derive(Debug, Error)]
pub enum Error {
    /// Reading sources or writing generated files failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A source file could not be read as the supported Kotlin subset.
    #[error("{}:{line}:{column}: {message}", file.display())]
    Parse {
        file: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// An option or annotation argument has an unsupported value.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A member's type mapping could not be resolved.
    #[error("{class}.{member}: {source}")]
    Mapping {
        class: String,
        member: String,
        #[source]
        source: MappingError,
    },

    /// A declaration does not meet the generator's prerequisites.
    #[error("{0}")]
    Structure(String),
}

impl Error {
    pub(crate) fn mapping(
        class: impl Into<String>,
        member: impl Into<String>,
        source: MappingError,
    ) -> Self {
        Self::Mapping {
            class: class.into(),
            member: member.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
