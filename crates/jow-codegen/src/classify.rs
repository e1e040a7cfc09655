//! Type classification: which declared types the JavaScript bridge can carry
//! as-is and which need a conversion function.
//!
//! The capability checks (`JsObjectWrapper`, `JsArrayInterface`) need to know
//! the supertypes of user types. That knowledge lives in a [`TypeHierarchy`],
//! seeded with the runtime library and extended with every interface the
//! generator reads.
//!
//! # Runtime hierarchy
//!
//! | Type | Direct supertypes |
//! |------|-------------------|
//! | `JsObjectWrapper` | none |
//! | `JsArrayInterface<T>` | none |
//! | `JsArray<T>` | `JsArrayInterface` |
//! | `JsObjectWrapperArrayTemplate<T>` | `JsArrayInterface` |
//! | `JsObjectWrapperArray<T>` | `JsObjectWrapperArrayTemplate` |

use rustc_hash::{FxHashMap, FxHashSet};

use crate::types::{names, TypeRef};

const NATIVE_TYPES: &[&str] = &[
    names::BOOLEAN,
    names::INT,
    names::DOUBLE,
    names::STRING,
    names::JS_OBJECT,
];

const VOID_TYPES: &[&str] = &[names::UNIT, names::JAVA_VOID, names::NOTHING];

/// Types with a `toTypedArray()` bulk conversion usable when spreading varargs.
const BULK_CONVERSION_TYPES: &[&str] = &[
    "kotlin.Boolean",
    "kotlin.Byte",
    "kotlin.Char",
    "kotlin.Double",
    "kotlin.Float",
    "kotlin.Int",
    "kotlin.Long",
    "kotlin.Short",
    "kotlin.UByte",
    "kotlin.UInt",
    "kotlin.ULong",
    "kotlin.UShort",
    names::COLLECTION,
];

/// Qualified type name -> direct supertypes.
#[derive(Debug, Clone, Default)]
pub struct TypeHierarchy {
    supertypes: FxHashMap<String, Vec<String>>,
}

impl TypeHierarchy {
    /// Create an empty hierarchy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hierarchy pre-populated with the wrapper runtime library.
    pub fn with_runtime() -> Self {
        let mut hierarchy = Self::new();
        hierarchy.register(names::JS_OBJECT_WRAPPER, std::iter::empty::<&str>());
        hierarchy.register(names::JS_ARRAY_INTERFACE, std::iter::empty::<&str>());
        hierarchy.register(names::JS_ARRAY, [names::JS_ARRAY_INTERFACE]);
        hierarchy.register(names::JS_OBJECT_WRAPPER_ARRAY_TEMPLATE, [names::JS_ARRAY_INTERFACE]);
        hierarchy.register(
            names::JS_OBJECT_WRAPPER_ARRAY,
            [names::JS_OBJECT_WRAPPER_ARRAY_TEMPLATE],
        );
        hierarchy
    }

    /// Record direct supertypes of `ty`. Repeated calls accumulate.
    pub fn register<I, S>(&mut self, ty: impl Into<String>, supertypes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self.supertypes.entry(ty.into()).or_default();
        for supertype in supertypes {
            let supertype = supertype.into();
            if !entry.contains(&supertype) {
                entry.push(supertype);
            }
        }
    }

    pub fn contains(&self, ty: &str) -> bool {
        self.supertypes.contains_key(ty)
    }

    /// Whether `ty` is `ancestor` or transitively extends it.
    pub fn is_subtype_of(&self, ty: &str, ancestor: &str) -> bool {
        let mut seen = FxHashSet::default();
        let mut stack = vec![ty];
        while let Some(current) = stack.pop() {
            if current == ancestor {
                return true;
            }
            if !seen.insert(current) {
                continue;
            }
            if let Some(parents) = self.supertypes.get(current) {
                stack.extend(parents.iter().map(String::as_str));
            }
        }
        false
    }
}

/// Read-only facts about one declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypeClassification {
    pub is_native: bool,
    pub is_void: bool,
    pub is_any: bool,
    pub is_nullable: bool,
    pub has_type_arguments: bool,
    pub is_wrapper_type: bool,
    pub is_foreign_array_type: bool,
    pub has_bulk_conversion_op: bool,
}

impl TypeClassification {
    /// The bridge passes values of this type through unchanged.
    pub fn is_bridge_compatible(&self) -> bool {
        self.is_native || self.is_void || self.is_any
    }

    /// A pre-supplied conversion exists in the setter/parameter direction.
    pub fn has_builtin_conversion(&self) -> bool {
        self.is_wrapper_type || self.is_foreign_array_type
    }
}

/// Classifies declared types against a [`TypeHierarchy`].
#[derive(Debug, Clone)]
pub struct TypeClassifier {
    hierarchy: TypeHierarchy,
}

impl Default for TypeClassifier {
    fn default() -> Self {
        Self::new(TypeHierarchy::with_runtime())
    }
}

impl TypeClassifier {
    pub fn new(hierarchy: TypeHierarchy) -> Self {
        Self { hierarchy }
    }

    pub fn hierarchy(&self) -> &TypeHierarchy {
        &self.hierarchy
    }

    pub fn hierarchy_mut(&mut self) -> &mut TypeHierarchy {
        &mut self.hierarchy
    }

    pub fn classify(&self, ty: &TypeRef) -> TypeClassification {
        let name = ty.qualified_name.as_str();
        TypeClassification {
            is_native: NATIVE_TYPES.contains(&name),
            is_void: VOID_TYPES.contains(&name),
            is_any: name == names::ANY,
            is_nullable: ty.nullable,
            has_type_arguments: ty.has_type_arguments(),
            is_wrapper_type: self.hierarchy.is_subtype_of(name, names::JS_OBJECT_WRAPPER),
            is_foreign_array_type: self.hierarchy.is_subtype_of(name, names::JS_ARRAY_INTERFACE),
            has_bulk_conversion_op: !ty.nullable && BULK_CONVERSION_TYPES.contains(&name),
        }
    }
}
