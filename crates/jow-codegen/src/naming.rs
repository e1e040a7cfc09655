//! Conversion-function names.
//!
//! A generated name is built from its parts in this order:
//!
//! ```text
//! {prefix}{verb}{Nullable?}{SimpleName}{_token if generic}{suffix}
//! ```
//!
//! The verb is `cast` (or `mapping`) towards the bridge and `as` away from
//! it, capitalized when a prefix is present. So with no affixes a
//! `List<String>` property gets `castList_1234567` and `asList_1234567`,
//! where the token is derived from the qualified type signature.

use std::fmt;
use std::hash::Hasher;
use std::str::FromStr;

use rustc_hash::FxHasher;

use crate::error::Error;
use crate::mapping::MappingTarget;
use crate::types::TypeRef;

/// Verb used for conversions into the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Verb {
    #[default]
    Cast,
    Mapping,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cast => "cast",
            Self::Mapping => "mapping",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cast" => Ok(Self::Cast),
            "mapping" => Ok(Self::Mapping),
            other => Err(Error::Configuration(format!(
                "unknown mapping verb `{}` (expected `cast` or `mapping`)",
                other
            ))),
        }
    }
}

/// Derives conversion-function names for one output class.
#[derive(Debug, Clone, Default)]
pub struct NameGenerator {
    verb: Verb,
    prefix: String,
    suffix: String,
}

impl NameGenerator {
    pub fn new(verb: Verb) -> Self {
        Self {
            verb,
            ..Self::default()
        }
    }

    pub fn with_affixes(verb: Verb, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            verb,
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// Name for converting `ty` at `target`, using this generator's affixes.
    pub fn generate(&self, target: MappingTarget, ty: &TypeRef) -> String {
        self.generate_with(target, ty, &self.prefix, &self.suffix)
    }

    pub fn generate_with(
        &self,
        target: MappingTarget,
        ty: &TypeRef,
        prefix: &str,
        suffix: &str,
    ) -> String {
        let verb = if target.is_to_bridge() {
            self.verb.as_str()
        } else {
            "as"
        };

        let mut name = String::from(prefix);
        if prefix.is_empty() {
            name.push_str(verb);
        } else {
            name.push_str(&capitalize(verb));
        }
        if ty.nullable {
            name.push_str("Nullable");
        }
        name.push_str(ty.simple_name());
        if ty.has_type_arguments() {
            name.push('_');
            name.push_str(&signature_token(ty).to_string());
        }
        name.push_str(suffix);
        name
    }
}

/// Stable decimal token for a generic type signature. Nullability of the
/// outer type does not take part.
pub fn signature_token(ty: &TypeRef) -> u32 {
    let mut hasher = FxHasher::default();
    hasher.write(ty.non_null().to_qualified().as_bytes());
    let hash = hasher.finish();
    (hash ^ (hash >> 32)) as u32
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
