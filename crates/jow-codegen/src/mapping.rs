//! Type-mapping resolution.
//!
//! Every value that crosses the JavaScript bridge does so at one of four
//! places: a property getter or setter, a function's return value, or one of
//! its parameters. [`TypeMapper::resolve`] decides, for one such place, one
//! declared type and one [`MappingStrategy`], whether a conversion function
//! is needed and which one.
//!
//! Setters and parameters convert a typed value into something the bridge
//! accepts, so they may use the built-in conversions for `JsObjectWrapper`
//! and `JsArrayInterface`. Getters and returns convert a bridge value back
//! into the declared type; there are no built-ins in that direction and
//! passing a non-native value through unchanged is an error.

use std::fmt;
use std::sync::Arc;

use crate::classify::{TypeClassification, TypeClassifier};
use crate::error::MappingError;
use crate::naming::NameGenerator;
use crate::registry::{builtins, ConversionFunction};
use crate::strategy::MappingStrategy;
use crate::types::TypeRef;

/// Where a value crosses the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingTarget {
    PropGetter,
    PropSetter,
    FuncReturn,
    FuncParameter,
}

impl MappingTarget {
    /// Setters and parameters hand values to the bridge.
    pub fn is_to_bridge(&self) -> bool {
        matches!(self, Self::PropSetter | Self::FuncParameter)
    }
}

impl fmt::Display for MappingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PropGetter => "property getter",
            Self::PropSetter => "property setter",
            Self::FuncReturn => "function return",
            Self::FuncParameter => "function parameter",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingMethod {
    NoMapping,
    UseFunction,
}

/// Outcome of resolving one mapping request.
///
/// `function` is set right away for built-ins. For everything else it is
/// bound by [`FunctionRegistry::of`](crate::registry::FunctionRegistry::of).
#[derive(Debug, Clone)]
pub struct MappingDecision {
    pub method: MappingMethod,
    pub target: MappingTarget,
    pub function_name: String,
    pub function: Option<Arc<ConversionFunction>>,
    pub is_builtin: bool,
}

impl MappingDecision {
    fn no_mapping(target: MappingTarget) -> Self {
        Self {
            method: MappingMethod::NoMapping,
            target,
            function_name: String::new(),
            function: None,
            is_builtin: false,
        }
    }

    fn builtin(target: MappingTarget, function: &Arc<ConversionFunction>) -> Self {
        Self {
            method: MappingMethod::UseFunction,
            target,
            function_name: function.name.clone(),
            function: Some(Arc::clone(function)),
            is_builtin: true,
        }
    }

    fn named(target: MappingTarget, name: impl Into<String>) -> Self {
        Self {
            method: MappingMethod::UseFunction,
            target,
            function_name: name.into(),
            function: None,
            is_builtin: false,
        }
    }

    pub fn uses_function(&self) -> bool {
        self.method == MappingMethod::UseFunction
    }

    /// Wrap `expr` in the conversion call, if any.
    pub fn apply(&self, expr: &str) -> String {
        match self.method {
            MappingMethod::NoMapping => expr.to_string(),
            MappingMethod::UseFunction => format!("{}({})", self.function_name, expr),
        }
    }
}

/// Resolves mapping requests for one output class.
#[derive(Debug, Clone, Default)]
pub struct TypeMapper {
    classifier: TypeClassifier,
    names: NameGenerator,
}

impl TypeMapper {
    pub fn new(classifier: TypeClassifier, names: NameGenerator) -> Self {
        Self { classifier, names }
    }

    pub fn classifier(&self) -> &TypeClassifier {
        &self.classifier
    }

    pub fn names(&self) -> &NameGenerator {
        &self.names
    }

    pub fn classify(&self, ty: &TypeRef) -> TypeClassification {
        self.classifier.classify(ty)
    }

    /// Built-in conversion for `ty` in the setter/parameter direction.
    /// The array capability is checked before the wrapper one.
    pub fn builtin_for(&self, classification: &TypeClassification) -> Option<&'static Arc<ConversionFunction>> {
        let builtins = builtins(self.names.verb());
        if classification.is_foreign_array_type {
            Some(&builtins.array)
        } else if classification.is_wrapper_type {
            Some(&builtins.wrapper)
        } else {
            None
        }
    }

    pub fn resolve(
        &self,
        target: MappingTarget,
        ty: &TypeRef,
        strategy: &MappingStrategy,
    ) -> Result<MappingDecision, MappingError> {
        let classification = self.classify(ty);
        if target.is_to_bridge() {
            self.resolve_to_bridge(target, ty, &classification, strategy)
        } else {
            self.resolve_from_bridge(target, ty, &classification, strategy)
        }
    }

    fn resolve_to_bridge(
        &self,
        target: MappingTarget,
        ty: &TypeRef,
        classification: &TypeClassification,
        strategy: &MappingStrategy,
    ) -> Result<MappingDecision, MappingError> {
        let decision = match strategy {
            MappingStrategy::AutoDetermine => {
                if classification.is_bridge_compatible() {
                    MappingDecision::no_mapping(target)
                } else if let Some(builtin) = self.builtin_for(classification) {
                    MappingDecision::builtin(target, builtin)
                } else {
                    MappingDecision::named(target, self.names.generate(target, ty))
                }
            }
            MappingStrategy::NoMapping => MappingDecision::no_mapping(target),
            MappingStrategy::NoMappingExceptBuiltin => match self.builtin_for(classification) {
                Some(builtin) => MappingDecision::builtin(target, builtin),
                None => MappingDecision::no_mapping(target),
            },
            MappingStrategy::AutoGenerate => {
                MappingDecision::named(target, self.names.generate(target, ty))
            }
            MappingStrategy::UserSpecify(name) => MappingDecision::named(target, name.as_str()),
        };
        Ok(decision)
    }

    fn resolve_from_bridge(
        &self,
        target: MappingTarget,
        ty: &TypeRef,
        classification: &TypeClassification,
        strategy: &MappingStrategy,
    ) -> Result<MappingDecision, MappingError> {
        match strategy {
            MappingStrategy::AutoDetermine => {
                if classification.is_bridge_compatible() {
                    Ok(MappingDecision::no_mapping(target))
                } else {
                    Ok(MappingDecision::named(target, self.names.generate(target, ty)))
                }
            }
            MappingStrategy::NoMapping => {
                if classification.is_bridge_compatible() {
                    Ok(MappingDecision::no_mapping(target))
                } else {
                    Err(MappingError::NoMappingForNonNative {
                        target,
                        strategy: strategy.clone(),
                        ty: ty.to_kotlin(),
                    })
                }
            }
            MappingStrategy::NoMappingExceptBuiltin => Err(MappingError::IllegalForTarget {
                target,
                strategy: strategy.clone(),
            }),
            MappingStrategy::AutoGenerate => {
                Ok(MappingDecision::named(target, self.names.generate(target, ty)))
            }
            MappingStrategy::UserSpecify(name) => Ok(MappingDecision::named(target, name.as_str())),
        }
    }
}
