//! Conversion functions and the per-class registry that deduplicates them.
//!
//! Each output class owns one [`FunctionRegistry`]. Every member that needs a
//! conversion goes through [`FunctionRegistry::of`], which resolves the
//! mapping and binds the decision to a [`ConversionFunction`] keyed by
//! `(name, parameter type)`. Two members converting the same type therefore
//! share a single declaration in the generated class.
//!
//! # Built-in conversions
//!
//! Two conversions ship with a body and are shared by every class of a run
//! (one set per [`Verb`]):
//!
//! | Function | Parameter | Body |
//! |----------|-----------|------|
//! | `__castJsObjectWrapper__` | `JsObjectWrapper?` | `arg?.source` |
//! | `__castJsArrayInterface__` | `JsArrayInterface<*>?` | `arg?.reference` |

use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::diagnostics::Diagnostics;
use crate::error::MappingError;
use crate::mapping::{MappingDecision, MappingMethod, MappingTarget, TypeMapper};
use crate::naming::Verb;
use crate::strategy::MappingStrategy;
use crate::types::{names, TypeArg, TypeRef};

/// A conversion function declared in a generated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionFunction {
    pub name: String,
    pub parameter_name: String,
    pub parameter_type: TypeRef,
    pub return_type: TypeRef,
    /// Kotlin statements; `None` for functions the user implements.
    pub body: Option<String>,
}

impl ConversionFunction {
    pub fn new_abstract(
        name: impl Into<String>,
        parameter_name: impl Into<String>,
        parameter_type: TypeRef,
        return_type: TypeRef,
    ) -> Self {
        Self {
            name: name.into(),
            parameter_name: parameter_name.into(),
            parameter_type,
            return_type,
            body: None,
        }
    }

    pub fn is_abstract(&self) -> bool {
        self.body.is_none()
    }

    /// The `(param:T) -> R` line used in generated documentation.
    pub fn signature(&self) -> String {
        format!(
            "({}:{}) -> {}",
            self.parameter_name,
            self.parameter_type.to_kotlin(),
            self.return_type.to_kotlin()
        )
    }
}

/// The pre-supplied conversions for one verb.
#[derive(Debug)]
pub struct Builtins {
    pub wrapper: Arc<ConversionFunction>,
    pub array: Arc<ConversionFunction>,
}

impl Builtins {
    fn new(verb: Verb) -> Self {
        let wrapper = ConversionFunction {
            name: format!("__{}JsObjectWrapper__", verb),
            parameter_name: "arg".to_string(),
            parameter_type: TypeRef::new(names::JS_OBJECT_WRAPPER).nullable(),
            return_type: TypeRef::js_object_nullable(),
            body: Some("return arg?.source".to_string()),
        };
        let array = ConversionFunction {
            name: format!("__{}JsArrayInterface__", verb),
            parameter_name: "arg".to_string(),
            parameter_type: TypeRef::new(names::JS_ARRAY_INTERFACE)
                .with_args(vec![TypeArg::Star])
                .nullable(),
            return_type: TypeRef::js_object_nullable(),
            body: Some("return arg?.reference".to_string()),
        };
        Self {
            wrapper: Arc::new(wrapper),
            array: Arc::new(array),
        }
    }
}

static CAST_BUILTINS: Lazy<Builtins> = Lazy::new(|| Builtins::new(Verb::Cast));
static MAPPING_BUILTINS: Lazy<Builtins> = Lazy::new(|| Builtins::new(Verb::Mapping));

/// Shared built-in conversions for `verb`.
pub fn builtins(verb: Verb) -> &'static Builtins {
    match verb {
        Verb::Cast => &CAST_BUILTINS,
        Verb::Mapping => &MAPPING_BUILTINS,
    }
}

/// One member facet asking for a mapping.
#[derive(Debug, Clone, Copy)]
pub struct MappingRequest<'a> {
    pub target: MappingTarget,
    /// Member label used in diagnostics, e.g. `JsPoint.plus`.
    pub member: &'a str,
    pub ty: &'a TypeRef,
    pub strategy: &'a MappingStrategy,
}

/// Conversion functions of one output class, in registration order.
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    functions: IndexMap<(String, TypeRef), Arc<ConversionFunction>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn find(&self, name: &str, parameter_type: &TypeRef) -> Option<&Arc<ConversionFunction>> {
        self.functions
            .get(&(name.to_string(), parameter_type.clone()))
    }

    pub fn functions(&self) -> impl Iterator<Item = &Arc<ConversionFunction>> {
        self.functions.values()
    }

    /// Add `function` unless an entry with the same name and parameter type
    /// exists, and return the entry that is now registered.
    pub fn insert(
        &mut self,
        function: Arc<ConversionFunction>,
    ) -> Result<Arc<ConversionFunction>, MappingError> {
        let key = (function.name.clone(), function.parameter_type.clone());
        if let Some(existing) = self.functions.get(&key) {
            if existing.return_type != function.return_type {
                return Err(MappingError::ConflictingSignature {
                    name: function.name.clone(),
                    parameter: function.parameter_type.to_kotlin(),
                    existing: existing.return_type.to_kotlin(),
                    requested: function.return_type.to_kotlin(),
                });
            }
            return Ok(Arc::clone(existing));
        }
        self.functions.insert(key, Arc::clone(&function));
        Ok(function)
    }

    /// Resolve `request` and bind the decision to its registered function.
    pub fn of(
        &mut self,
        mapper: &TypeMapper,
        request: &MappingRequest<'_>,
        diagnostics: &mut dyn Diagnostics,
    ) -> Result<MappingDecision, MappingError> {
        let mut decision = mapper.resolve(request.target, request.ty, request.strategy)?;
        if decision.method == MappingMethod::NoMapping {
            return Ok(decision);
        }

        let candidate = match decision.function.take() {
            Some(builtin) => builtin,
            None => Arc::new(abstract_conversion(&decision, request)),
        };
        let known = self.len();
        let bound = self.insert(candidate)?;
        if self.len() > known {
            diagnostics.debug(&format!(
                "{}: registered {} `{}{}`",
                request.member,
                if bound.is_abstract() { "abstract" } else { "built-in" },
                bound.name,
                bound.signature()
            ));
        }
        decision.function = Some(bound);
        Ok(decision)
    }
}

/// Descriptor for a conversion the user implements.
fn abstract_conversion(decision: &MappingDecision, request: &MappingRequest<'_>) -> ConversionFunction {
    match request.target {
        MappingTarget::PropSetter => ConversionFunction::new_abstract(
            decision.function_name.as_str(),
            "src",
            request.ty.clone(),
            TypeRef::any_nullable(),
        ),
        MappingTarget::FuncParameter => ConversionFunction::new_abstract(
            decision.function_name.as_str(),
            "arg",
            request.ty.clone(),
            TypeRef::any_nullable(),
        ),
        MappingTarget::PropGetter | MappingTarget::FuncReturn => ConversionFunction::new_abstract(
            decision.function_name.as_str(),
            "src",
            TypeRef::any_nullable(),
            request.ty.clone(),
        ),
    }
}
