//! # jow-codegen
//!
//! Kotlin code generator for JavaScript object wrappers. This crate reads
//! Kotlin interfaces annotated with `@JsObjectClass` and generates abstract
//! classes that implement them on top of `netscape.javascript.JSObject`.
//!
//! ## Usage
//!
//! ### 1. Annotate your interfaces
//!
//! ```kotlin
//! @JsObjectClass
//! interface JsPoint : JsObjectWrapper {
//!     var x: Double
//!     var y: Double
//!
//!     @JsObjectFunction(jsMemberName = "add")
//!     fun plus(other: JsPoint): JsPoint
//! }
//! ```
//!
//! ### 2. Generate the wrapper classes
//!
//! ```rust,ignore
//! use jow_codegen::CodeGenerator;
//!
//! fn main() {
//!     let generation = CodeGenerator::new()
//!         .add_source_dir("src/main/kotlin").unwrap()
//!         .write_to_dir("build/generated/jow").unwrap();
//!
//!     for err in &generation.errors {
//!         eprintln!("{}", err);
//!     }
//! }
//! ```
//!
//! Every annotated interface produces `AbsJsPoint.kt` (the prefix is
//! configurable) next to its package. Values that the bridge cannot carry
//! as they are go through conversion functions: the two built-ins for
//! `JsObjectWrapper` and `JsArrayInterface` come with a body, every other one
//! is declared `abstract` for you to implement in a subclass.
//!
//! ## Type mapping
//!
//! Each property getter/setter, function return and function parameter
//! resolves a [`MappingStrategy`] against its declared type. See
//! [`TypeMapper::resolve`] for the rules and [`FunctionRegistry`] for how
//! the resulting conversion functions are shared within a class.

mod classify;
mod decl;
mod diagnostics;
mod emit;
mod error;
mod extractor;
mod generator;
mod lexer;
mod mapping;
mod naming;
mod registry;
mod strategy;
mod types;

pub use classify::{TypeClassification, TypeClassifier, TypeHierarchy};
pub use decl::{
    ClassDecl, ClassKind, ClassMeta, FunctionDecl, FunctionMeta, FunctionOptions, ParameterDecl,
    ParameterMeta, PrimaryConstructor, PropertyDecl, PropertyMeta, PropertyOptions,
    ResolvedClassMeta,
};
pub use diagnostics::{CollectedDiagnostics, Diagnostics, LogDiagnostics};
pub use error::{Error, MappingError, Result};
pub use generator::{
    CodeGenerator, GeneratedFile, Generation, OPTION_MAPPING_VERB, OPTION_OUTPUT_CLASS_PREFIX,
    OPTION_OUTPUT_CLASS_SUFFIX,
};
pub use mapping::{MappingDecision, MappingMethod, MappingTarget, TypeMapper};
pub use naming::{signature_token, NameGenerator, Verb};
pub use registry::{builtins, Builtins, ConversionFunction, FunctionRegistry, MappingRequest};
pub use strategy::MappingStrategy;
pub use types::{names, TypeArg, TypeRef, Variance};
