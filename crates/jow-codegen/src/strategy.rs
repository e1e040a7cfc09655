//! Type-mapping strategies as written in `@JsObjectProperty`,
//! `@JsObjectFunction` and `@JsObjectParameter` arguments.

use std::fmt;
use std::str::FromStr;

use crate::error::MappingError;

/// How a value crossing the bridge is converted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MappingStrategy {
    /// Decide from the type's classification.
    AutoDetermine,
    /// Pass the value through unchanged.
    NoMapping,
    /// Pass through unless a built-in conversion exists for the type.
    NoMappingExceptBuiltin,
    /// Always convert, with a generated function name.
    AutoGenerate,
    /// Always convert, through the named function.
    UserSpecify(String),
}

impl MappingStrategy {
    pub const AUTO_DETERMINE: &'static str = "auto-determine";
    pub const NO_MAPPING: &'static str = "no-mapping";
    pub const NO_MAPPING_EXCEPT_BUILTIN: &'static str = "no-mapping-except-builtin";
    pub const AUTO_GENERATE: &'static str = "auto-gen";

    const LEGACY_NO_MAPPING: &'static str = "no-cast";
    const LEGACY_NO_MAPPING_EXCEPT_BUILTIN: &'static str = "no-cast-except-builtin";

    /// Parse an annotation token. Surrounding whitespace is ignored. Any
    /// other token must be a Kotlin identifier naming a user-written
    /// conversion function.
    pub fn from_token(token: &str) -> Result<Self, MappingError> {
        Ok(match token.trim() {
            "" => return Err(MappingError::EmptyStrategy),
            Self::AUTO_DETERMINE => Self::AutoDetermine,
            Self::NO_MAPPING | Self::LEGACY_NO_MAPPING => Self::NoMapping,
            Self::NO_MAPPING_EXCEPT_BUILTIN | Self::LEGACY_NO_MAPPING_EXCEPT_BUILTIN => {
                Self::NoMappingExceptBuiltin
            }
            Self::AUTO_GENERATE => Self::AutoGenerate,
            other if is_function_name(other) => Self::UserSpecify(other.to_string()),
            _ => return Err(MappingError::InvalidStrategy(token.to_string())),
        })
    }

    /// Token for a `TypeMappingStrategy` constant name such as `AUTO_GENERATE`
    /// or `TypeMappingStrategy.Companion.NO_CAST`.
    pub fn constant_token(name: &str) -> Option<&'static str> {
        let last = name.rsplit('.').next().unwrap_or(name);
        match last {
            "AUTO_DETERMINE" => Some(Self::AUTO_DETERMINE),
            "NO_MAPPING" | "NO_CAST" => Some(Self::NO_MAPPING),
            "NO_MAPPING_EXCEPT_BUILTIN" | "NO_CAST_EXCEPT_BUILTIN" => {
                Some(Self::NO_MAPPING_EXCEPT_BUILTIN)
            }
            "AUTO_GENERATE" | "AUTO_GEN" => Some(Self::AUTO_GENERATE),
            _ => None,
        }
    }

    /// The canonical token.
    pub fn token(&self) -> &str {
        match self {
            Self::AutoDetermine => Self::AUTO_DETERMINE,
            Self::NoMapping => Self::NO_MAPPING,
            Self::NoMappingExceptBuiltin => Self::NO_MAPPING_EXCEPT_BUILTIN,
            Self::AutoGenerate => Self::AUTO_GENERATE,
            Self::UserSpecify(name) => name,
        }
    }
}

/// `name` or a backquoted `` `any name` ``.
fn is_function_name(name: &str) -> bool {
    if let Some(quoted) = name.strip_prefix('`').and_then(|n| n.strip_suffix('`')) {
        return !quoted.is_empty() && !quoted.contains(['`', '\n', '\r']);
    }
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for MappingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for MappingStrategy {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
    }
}
