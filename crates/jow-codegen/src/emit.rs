//! Kotlin source for one output class.
//!
//! The assembler walks the abstract members of an annotated interface, asks
//! the class's [`FunctionRegistry`] for a mapping decision at every place a
//! value crosses the bridge, and writes an `abstract class` whose members
//! forward to `JSObject.getMember`, `setMember` and `call`. The conversion
//! functions the decisions refer to are appended at the end.
//!
//! ```kotlin
//! abstract class AbsJsPoint(override val source: JSObject) : JsPoint {
//!     override var x: Double
//!         get() {
//!             val ret = source.getMember("x")
//!             return ret as Double
//!         }
//!         set(value) {
//!             source.setMember("x", value)
//!         }
//!
//!     override fun plus(other: JsPoint): JsPoint {
//!         val ret = source.call("plus", __castJsObjectWrapper__(other))
//!         return asJsPoint(ret)
//!     }
//!     // conversion functions follow
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::decl::{
    ClassDecl, ClassKind, FunctionDecl, PrimaryConstructor, PropertyDecl, ResolvedClassMeta,
};
use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::mapping::{MappingDecision, MappingTarget, TypeMapper};
use crate::registry::{ConversionFunction, FunctionRegistry, MappingRequest};
use crate::strategy::MappingStrategy;
use crate::types::{names, TypeRef};

const INDENT: &str = "    ";

pub(crate) const DEFAULT_HEADER: &str = "Auto-generated by jow-codegen\nDO NOT EDIT MANUALLY";

const DOC_COMMON: &str =
    "This is an auto-generated type mapping function, which is used in the underlying web engine calls.";
const DOC_ABSTRACT: &str =
    "This is an abstract function please implement it with your own type mapping logic.";
const DOC_BUILTIN: &str =
    "This is a built-in function with a default implementation, override it to change how the value is passed to the web engine.";

/// Undefined-value handling for one getter or function return.
#[derive(Debug, Clone, Copy)]
struct UndefinedPolicy {
    as_null: bool,
    raise: bool,
}

pub(crate) struct ClassAssembler<'a> {
    class: &'a ClassDecl,
    meta: &'a ResolvedClassMeta,
    mapper: &'a TypeMapper,
    diagnostics: &'a mut dyn Diagnostics,
    registry: FunctionRegistry,
    imports: BTreeSet<String>,
    /// Written out in full and never imported.
    qualified: BTreeSet<String>,
    raises: bool,
}

impl<'a> ClassAssembler<'a> {
    pub(crate) fn new(
        class: &'a ClassDecl,
        meta: &'a ResolvedClassMeta,
        mapper: &'a TypeMapper,
        diagnostics: &'a mut dyn Diagnostics,
    ) -> Self {
        Self {
            class,
            meta,
            mapper,
            diagnostics,
            registry: FunctionRegistry::new(),
            imports: BTreeSet::new(),
            qualified: clashing_names(class),
            raises: false,
        }
    }

    /// Generate the whole file. `header` replaces the default header comment.
    pub(crate) fn assemble(mut self, header: Option<&str>) -> Result<String> {
        self.check_structure()?;
        let class = self.class;

        let mut members = Vec::new();
        for property in &class.properties {
            if let Some(code) = self.generate_property(property)? {
                members.push(code);
            }
        }
        for function in &class.functions {
            if let Some(code) = self.generate_function(function)? {
                members.push(code);
            }
        }
        let conversions: Vec<Arc<ConversionFunction>> = self.registry.functions().cloned().collect();
        for function in &conversions {
            self.use_type(&function.parameter_type);
            self.use_type(&function.return_type);
            members.push(generate_conversion(function, &self.qualified));
        }

        let mut output = String::new();
        output.push_str("/**\n");
        for line in header.unwrap_or(DEFAULT_HEADER).lines() {
            output.push_str(" * ");
            output.push_str(line);
            output.push('\n');
        }
        output.push_str(" */\n");
        if !class.package.is_empty() {
            output.push_str(&format!("package {}\n\n", class.package));
        }
        output.push_str(&self.generate_imports());
        output.push_str(&self.generate_class_header());
        output.push_str(" {\n");
        output.push_str(&members.join("\n"));
        output.push_str("}\n");
        Ok(output)
    }

    fn check_structure(&self) -> Result<()> {
        let name = self.class.qualified_name();
        match self.class.kind {
            ClassKind::Interface => {}
            ClassKind::Class => {
                return Err(Error::Structure(format!(
                    "{}: @{} cannot annotate a non-abstract class",
                    name,
                    names::ANNOTATION_CLASS
                )))
            }
            ClassKind::AbstractClass => {
                return Err(Error::Structure(format!(
                    "{}: abstract classes are not supported, annotate an interface instead",
                    name
                )))
            }
        }
        let hierarchy = self.mapper.classifier().hierarchy();
        if !hierarchy.is_subtype_of(&name, names::JS_OBJECT_WRAPPER) {
            return Err(Error::Structure(format!(
                "{}: an interface annotated with @{} must extend {}",
                name,
                names::ANNOTATION_CLASS,
                names::JS_OBJECT_WRAPPER
            )));
        }
        Ok(())
    }

    fn generate_imports(&mut self) -> String {
        if self.meta.primary_constructor == PrimaryConstructor::WithParameter {
            self.imports.insert(names::JS_OBJECT.to_string());
        }
        if self.raises {
            self.imports.insert(names::JS_EXCEPTION.to_string());
        }
        // Star imports carry names the reader could not qualify.
        for directive in &self.class.imports {
            if directive.ends_with(".*") {
                self.imports.insert(directive.clone());
            }
        }
        let qualified = &self.qualified;
        self.imports.retain(|name| !qualified.contains(name));
        if self.imports.is_empty() {
            return String::new();
        }
        let mut output = String::new();
        for import in &self.imports {
            output.push_str(&format!("import {}\n", import));
        }
        output.push('\n');
        output
    }

    fn generate_class_header(&self) -> String {
        let mut output = String::new();
        if let Some(doc) = &self.meta.class_doc {
            output.push_str("/**\n");
            for line in doc.lines() {
                output.push_str(format!(" * {}", line).trim_end());
                output.push('\n');
            }
            output.push_str(" */\n");
        }
        let constructor = match self.meta.primary_constructor {
            PrimaryConstructor::None => "",
            PrimaryConstructor::Blank => "()",
            PrimaryConstructor::WithParameter => "(override val source: JSObject)",
        };
        output.push_str(&format!(
            "abstract class {}{} : {}",
            self.meta.output_class_name,
            constructor,
            self.kotlin_type(&self.class.as_type())
        ));
        output
    }

    fn skipped(&mut self, member: &str) {
        self.diagnostics.warn(&format!(
            "{}.{}: skipped, the member stays abstract",
            self.class.qualified_name(),
            member
        ));
    }

    fn kotlin_type(&self, ty: &TypeRef) -> String {
        ty.to_kotlin_with(&self.qualified)
    }

    fn map(
        &mut self,
        target: MappingTarget,
        member: &str,
        facet: &str,
        ty: &TypeRef,
        strategy: &MappingStrategy,
    ) -> Result<MappingDecision> {
        let label = format!("{}.{}", self.class.name, member);
        let request = MappingRequest {
            target,
            member: &label,
            ty,
            strategy,
        };
        let decision = self
            .registry
            .of(self.mapper, &request, &mut *self.diagnostics)
            .map_err(|e| Error::mapping(&self.class.name, format!("{}[{}]", member, facet), e))?;
        if *strategy == MappingStrategy::NoMappingExceptBuiltin && !decision.uses_function() {
            self.warn_if_unknown(&label, ty);
        }
        Ok(decision)
    }

    /// A type missing from the hierarchy could not be checked for a built-in
    /// conversion, so a wrapper of it would reach the bridge unconverted.
    fn warn_if_unknown(&mut self, label: &str, ty: &TypeRef) {
        let name = ty.qualified_name.as_str();
        if self.mapper.classify(ty).is_bridge_compatible()
            || self.mapper.classifier().hierarchy().contains(name)
            || ["kotlin.", "java.", "javax."].iter().any(|p| name.starts_with(p))
        {
            return;
        }
        self.diagnostics.warn(&format!(
            "{}: `{}` is not a known type, it is passed to the bridge unchanged",
            label, name
        ));
    }

    fn use_type(&mut self, ty: &TypeRef) {
        ty.collect_imports(&self.class.package, &mut self.imports);
    }

    fn generate_property(&mut self, property: &PropertyDecl) -> Result<Option<String>> {
        if !property.is_abstract {
            return Ok(None);
        }
        let options = property.resolve(&self.class.name)?;
        if options.skip {
            self.skipped(&property.name);
            return Ok(None);
        }
        self.use_type(&property.ty);

        let getter = self.map(
            MappingTarget::PropGetter,
            &property.name,
            "getter",
            &property.ty,
            &options.getter,
        )?;
        let policy = UndefinedPolicy {
            as_null: options.undefined_as_null,
            raise: options.raise_exception_on_undefined,
        };
        let body_indent = INDENT.repeat(3);

        let mut output = String::new();
        output.push_str(&format!(
            "{}override {} {}: {}\n",
            INDENT,
            if property.mutable { "var" } else { "val" },
            property.name,
            self.kotlin_type(&property.ty)
        ));
        output.push_str(&format!("{}get() {{\n", INDENT.repeat(2)));
        output.push_str(&format!(
            "{}val ret = source.getMember(\"{}\")\n",
            body_indent, options.js_name
        ));
        for line in self.return_lines(&property.ty, &getter, policy, &options.js_name) {
            output.push_str(&format!("{}{}\n", body_indent, line));
        }
        output.push_str(&format!("{}}}\n", INDENT.repeat(2)));

        if let Some(strategy) = &options.setter {
            let setter = self.map(
                MappingTarget::PropSetter,
                &property.name,
                "setter",
                &property.ty,
                strategy,
            )?;
            output.push_str(&format!("{}set(value) {{\n", INDENT.repeat(2)));
            output.push_str(&format!(
                "{}source.setMember(\"{}\", {})\n",
                body_indent,
                options.js_name,
                setter.apply("value")
            ));
            output.push_str(&format!("{}}}\n", INDENT.repeat(2)));
        }
        Ok(Some(output))
    }

    fn generate_function(&mut self, function: &FunctionDecl) -> Result<Option<String>> {
        if !function.is_abstract {
            return Ok(None);
        }
        let options = function.resolve(&self.class.name)?;
        if options.skip {
            self.skipped(&function.name);
            return Ok(None);
        }
        if function.is_generic() {
            return Err(Error::Structure(format!(
                "{}.{}: generic functions are not supported, mark them with skip = true",
                self.class.qualified_name(),
                function.name
            )));
        }
        let Some(return_type) = &function.return_type else {
            return Err(Error::Structure(format!(
                "{}.{}: missing return type",
                self.class.qualified_name(),
                function.name
            )));
        };
        if function.parameters.iter().filter(|p| p.vararg).count() > 1 {
            return Err(Error::Structure(format!(
                "{}.{}: a function can have only one vararg parameter",
                self.class.qualified_name(),
                function.name
            )));
        }

        let mut parameters = Vec::new();
        let mut arguments = vec![format!("\"{}\"", options.js_name)];
        for (index, parameter) in function.parameters.iter().enumerate() {
            let name = parameter.name_or(index);
            let member = format!("{}({})", function.name, name);
            let strategy = parameter.strategy(&self.class.name, &member)?;
            self.use_type(&parameter.ty);
            let decision = self.map(
                MappingTarget::FuncParameter,
                &member,
                "parameter",
                &parameter.ty,
                &strategy,
            )?;
            if parameter.vararg {
                parameters.push(format!("vararg {}: {}", name, self.kotlin_type(&parameter.ty)));
                arguments.push(self.spread(&name, &parameter.ty, &decision));
            } else {
                parameters.push(format!("{}: {}", name, self.kotlin_type(&parameter.ty)));
                arguments.push(decision.apply(&name));
            }
        }

        self.use_type(return_type);
        let decision = self.map(
            MappingTarget::FuncReturn,
            &function.name,
            "return",
            return_type,
            &options.return_strategy,
        )?;
        let call = format!("source.call({})", arguments.join(", "));
        let body_indent = INDENT.repeat(2);

        let mut output = String::new();
        output.push_str(&format!(
            "{}override fun {}({}): {} {{\n",
            INDENT,
            function.name,
            parameters.join(", "),
            self.kotlin_type(return_type)
        ));
        if return_type.qualified_name == names::NOTHING && !decision.uses_function() {
            output.push_str(&format!("{}{}\n", body_indent, call));
            if return_type.nullable {
                output.push_str(&format!("{}return null\n", body_indent));
            } else {
                self.raises = true;
                output.push_str(&format!(
                    "{}throw JSException(\"{} returned normally\")\n",
                    body_indent, options.js_name
                ));
            }
        } else if self.mapper.classify(return_type).is_void && !decision.uses_function() {
            output.push_str(&format!("{}{}\n", body_indent, call));
        } else {
            let policy = UndefinedPolicy {
                as_null: options.undefined_as_null,
                raise: options.raise_exception_on_undefined,
            };
            output.push_str(&format!("{}val ret = {}\n", body_indent, call));
            for line in self.return_lines(return_type, &decision, policy, &options.js_name) {
                output.push_str(&format!("{}{}\n", body_indent, line));
            }
        }
        output.push_str(&format!("{}}}\n", INDENT));
        Ok(Some(output))
    }

    /// Spread a vararg parameter into `source.call`.
    fn spread(&self, name: &str, ty: &TypeRef, decision: &MappingDecision) -> String {
        if decision.uses_function() {
            format!("*({}.map {{ {} }}.toTypedArray())", name, decision.apply("it"))
        } else if self.mapper.classify(ty).has_bulk_conversion_op {
            format!("*({}.toTypedArray())", name)
        } else {
            format!("*({})", name)
        }
    }

    /// Statements turning `ret`, a raw bridge value, into the declared type.
    fn return_lines(
        &mut self,
        ty: &TypeRef,
        decision: &MappingDecision,
        policy: UndefinedPolicy,
        js_name: &str,
    ) -> Vec<String> {
        let mut lines = Vec::new();
        if policy.raise {
            self.raises = true;
            lines.push(format!(
                "if (ret == \"undefined\") throw JSException(\"{} is undefined\")",
                js_name
            ));
        } else if policy.as_null && ty.nullable {
            lines.push("if (ret == \"undefined\") return null".to_string());
        }
        if decision.uses_function() {
            lines.push(format!("return {}", decision.apply("ret")));
        } else if self.mapper.classify(ty).is_any {
            lines.push("return ret".to_string());
        } else {
            lines.push(format!("return ret as {}", self.kotlin_type(ty)));
        }
        lines
    }
}

/// Qualified names whose simple name is shared with another type the class
/// refers to.
fn clashing_names(class: &ClassDecl) -> BTreeSet<String> {
    let mut mentioned = BTreeSet::new();
    mentioned.insert(class.qualified_name());
    mentioned.insert(names::JS_OBJECT_WRAPPER.to_string());
    mentioned.insert(names::JS_ARRAY_INTERFACE.to_string());
    for property in &class.properties {
        property.ty.collect_names(&mut mentioned);
    }
    for function in &class.functions {
        for parameter in &function.parameters {
            parameter.ty.collect_names(&mut mentioned);
        }
        if let Some(ty) = &function.return_type {
            ty.collect_names(&mut mentioned);
        }
    }

    let mut by_simple_name: BTreeMap<&str, Vec<&String>> = BTreeMap::new();
    for name in &mentioned {
        let simple = name.rsplit('.').next().unwrap_or(name);
        by_simple_name.entry(simple).or_default().push(name);
    }
    by_simple_name
        .into_values()
        .filter(|group| group.len() > 1)
        .flatten()
        .cloned()
        .collect()
}

fn generate_conversion(function: &ConversionFunction, qualified: &BTreeSet<String>) -> String {
    let parameter_type = function.parameter_type.to_kotlin_with(qualified);
    let return_type = function.return_type.to_kotlin_with(qualified);
    let mut output = String::new();
    output.push_str(&format!("{}/**\n", INDENT));
    output.push_str(&format!("{} * {}\n", INDENT, DOC_COMMON));
    output.push_str(&format!(
        "{} * {}\n",
        INDENT,
        if function.is_abstract() { DOC_ABSTRACT } else { DOC_BUILTIN }
    ));
    output.push_str(&format!("{} *\n", INDENT));
    output.push_str(&format!(
        "{} *     {}({}:{}) -> {}\n",
        INDENT, function.name, function.parameter_name, parameter_type, return_type
    ));
    output.push_str(&format!("{} *\n", INDENT));
    output.push_str(&format!(
        "{} * @param {} {}\n",
        INDENT, function.parameter_name, parameter_type
    ));
    output.push_str(&format!("{} * @return {}\n", INDENT, return_type));
    output.push_str(&format!("{} */\n", INDENT));

    let declaration = format!(
        "fun {}({}: {}): {}",
        function.name, function.parameter_name, parameter_type, return_type
    );
    match &function.body {
        None => output.push_str(&format!("{}abstract {}\n", INDENT, declaration)),
        Some(body) => {
            output.push_str(&format!("{}open {} {{\n", INDENT, declaration));
            for line in body.lines() {
                output.push_str(&format!("{}{}{}\n", INDENT, INDENT, line));
            }
            output.push_str(&format!("{}}}\n", INDENT));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{TypeClassifier, TypeHierarchy};
    use crate::decl::{ClassMeta, FunctionMeta, ParameterDecl, PropertyMeta};
    use crate::diagnostics::CollectedDiagnostics;
    use crate::naming::NameGenerator;
    use crate::types::TypeArg;
    use log::Level;

    const PACKAGE: &str = "com.example";

    fn point_type() -> TypeRef {
        TypeRef::new("com.example.JsPoint")
    }

    fn mapper() -> TypeMapper {
        let mut hierarchy = TypeHierarchy::with_runtime();
        hierarchy.register("com.example.JsPoint", [names::JS_OBJECT_WRAPPER]);
        hierarchy.register("com.example.JsLine", [names::JS_OBJECT_WRAPPER]);
        hierarchy.register("com.example.Plain", std::iter::empty::<&str>());
        TypeMapper::new(TypeClassifier::new(hierarchy), NameGenerator::default())
    }

    fn assemble_with(class: &ClassDecl, diagnostics: &mut CollectedDiagnostics) -> Result<String> {
        let meta = class.resolve_meta("Abs", "")?;
        let mapper = mapper();
        ClassAssembler::new(class, &meta, &mapper, diagnostics).assemble(None)
    }

    fn assemble(class: &ClassDecl) -> String {
        assemble_with(class, &mut CollectedDiagnostics::new()).unwrap()
    }

    fn line() -> ClassDecl {
        ClassDecl::interface(PACKAGE, "JsLine")
            .with_supertype(TypeRef::new(names::JS_OBJECT_WRAPPER))
            .with_meta(ClassMeta::default())
    }

    #[test]
    fn test_class_header() {
        let code = assemble(&line());
        assert!(code.starts_with("/**\n * Auto-generated by jow-codegen\n"));
        assert!(code.contains("package com.example\n"));
        assert!(code.contains("import netscape.javascript.JSObject\n"));
        assert!(code.contains("abstract class AbsJsLine(override val source: JSObject) : JsLine {\n"));
        assert!(code.ends_with("}\n"));
    }

    #[test]
    fn test_native_property() {
        let class = line().with_property(PropertyDecl::var("width", TypeRef::new(names::DOUBLE)));
        let code = assemble(&class);
        assert!(code.contains("    override var width: Double\n"));
        assert!(code.contains("val ret = source.getMember(\"width\")"));
        assert!(code.contains("return ret as Double"));
        assert!(code.contains("source.setMember(\"width\", value)"));
        assert!(!code.contains("undefined"));
    }

    #[test]
    fn test_wrapper_property_uses_generated_and_builtin_functions() {
        let class = line()
            .with_property(PropertyDecl::var("start", point_type()))
            .with_property(PropertyDecl::var("end", point_type()));
        let code = assemble(&class);

        assert!(code.contains("return asJsPoint(ret)"));
        assert!(code.contains("source.setMember(\"start\", __castJsObjectWrapper__(value))"));
        assert_eq!(code.matches("abstract fun asJsPoint(src: Any?): JsPoint").count(), 1);
        assert_eq!(code.matches("open fun __castJsObjectWrapper__(").count(), 1);
        assert!(code.contains("        return arg?.source\n"));
        assert!(code.contains("import com.github.zimolab.jow.core.JsObjectWrapper\n"));
    }

    #[test]
    fn test_nullable_property_maps_undefined_to_null() {
        let class = line().with_property(PropertyDecl::val("label", TypeRef::new(names::STRING).nullable()));
        let code = assemble(&class);
        assert!(code.contains("    override val label: String?\n"));
        assert!(code.contains("if (ret == \"undefined\") return null"));
        assert!(code.contains("return ret as String?"));
        assert!(!code.contains("set(value)"));
    }

    #[test]
    fn test_raise_on_undefined() {
        let class = line().with_property(
            PropertyDecl::val("id", TypeRef::new(names::INT)).with_meta(PropertyMeta {
                js_member_name: "_id".into(),
                undefined_as_null: false,
                raise_exception_on_undefined: true,
                ..PropertyMeta::default()
            }),
        );
        let code = assemble(&class);
        assert!(code.contains("source.getMember(\"_id\")"));
        assert!(code.contains("throw JSException(\"_id is undefined\")"));
        assert!(code.contains("import netscape.javascript.JSException\n"));
    }

    #[test]
    fn test_function_with_wrapper_parameter() {
        let class = line().with_function(
            FunctionDecl::new("plus", point_type())
                .with_parameter(ParameterDecl::new("other", point_type())),
        );
        let code = assemble(&class);
        assert!(code.contains("    override fun plus(other: JsPoint): JsPoint {\n"));
        assert!(code.contains("val ret = source.call(\"plus\", __castJsObjectWrapper__(other))"));
        assert!(code.contains("return asJsPoint(ret)"));
    }

    #[test]
    fn test_unit_function_discards_result() {
        let class = line().with_function(
            FunctionDecl::new("clear", TypeRef::unit()),
        );
        let code = assemble(&class);
        assert!(code.contains("override fun clear(): Unit {\n        source.call(\"clear\")\n    }"));
    }

    #[test]
    fn test_any_return_is_passed_through() {
        let class = line().with_function(FunctionDecl::new("raw", TypeRef::any_nullable()));
        let code = assemble(&class);
        assert!(code.contains("if (ret == \"undefined\") return null\n        return ret\n"));
    }

    #[test]
    fn test_vararg_spreading() {
        let class = line()
            .with_function(
                FunctionDecl::new("addPoints", TypeRef::unit())
                    .with_parameter(ParameterDecl::new("points", point_type()).vararg()),
            )
            .with_function(
                FunctionDecl::new("addNumbers", TypeRef::unit())
                    .with_parameter(ParameterDecl::new("numbers", TypeRef::new(names::INT)).vararg()),
            )
            .with_function(
                FunctionDecl::new("addNames", TypeRef::unit())
                    .with_parameter(ParameterDecl::new("label", TypeRef::new(names::STRING)))
                    .with_parameter(ParameterDecl::new("names", TypeRef::new(names::STRING)).vararg()),
            );
        let code = assemble(&class);
        assert!(code.contains("override fun addPoints(vararg points: JsPoint): Unit {"));
        assert!(code.contains("*(points.map { __castJsObjectWrapper__(it) }.toTypedArray())"));
        assert!(code.contains("source.call(\"addNumbers\", *(numbers.toTypedArray()))"));
        assert!(code.contains(
            "override fun addNames(label: String, vararg names: String): Unit {\n        source.call(\"addNames\", label, *(names))"
        ));
    }

    #[test]
    fn test_second_vararg_fails() {
        let class = line().with_function(
            FunctionDecl::new("test", TypeRef::unit())
                .with_parameter(ParameterDecl::new("points", point_type()).vararg())
                .with_parameter(ParameterDecl::new("numbers", TypeRef::new(names::INT)).vararg()),
        );
        let err = assemble_with(&class, &mut CollectedDiagnostics::new()).unwrap_err();
        assert!(matches!(err, Error::Structure(_)));
        assert!(err.to_string().contains("com.example.JsLine.test"));
    }

    #[test]
    fn test_nothing_return_never_completes() {
        let class = line()
            .with_function(FunctionDecl::new("fail", TypeRef::new(names::NOTHING)))
            .with_function(FunctionDecl::new("failOrNull", TypeRef::new(names::NOTHING).nullable()));
        let code = assemble(&class);
        assert!(code.contains(
            "override fun fail(): Nothing {\n        source.call(\"fail\")\n        throw JSException(\"fail returned normally\")\n    }"
        ));
        assert!(code.contains(
            "override fun failOrNull(): Nothing? {\n        source.call(\"failOrNull\")\n        return null\n    }"
        ));
        assert!(code.contains("import netscape.javascript.JSException\n"));
    }

    #[test]
    fn test_unknown_parameter_type_warns() {
        let class = line()
            .with_function(
                FunctionDecl::new("contains", TypeRef::new(names::BOOLEAN))
                    .with_parameter(ParameterDecl::new("shape", TypeRef::new("com.example.Shape"))),
            )
            .with_function(
                FunctionDecl::new("accept", TypeRef::unit())
                    .with_parameter(ParameterDecl::new("plain", TypeRef::new("com.example.Plain")))
                    .with_parameter(ParameterDecl::new("date", TypeRef::new("java.util.Date"))),
            );
        let mut diagnostics = CollectedDiagnostics::new();
        let code = assemble_with(&class, &mut diagnostics).unwrap();
        assert!(code.contains("source.call(\"contains\", shape)"));

        let warnings: Vec<_> = diagnostics.at(Level::Warn).collect();
        assert_eq!(warnings.len(), 1, "{:?}", warnings);
        assert!(warnings[0].starts_with("JsLine.contains(shape): "));
        assert!(warnings[0].contains("`com.example.Shape`"));
    }

    #[test]
    fn test_clashing_simple_names_are_qualified() {
        let class = line().with_function(
            FunctionDecl::new("link", TypeRef::unit())
                .with_parameter(ParameterDecl::new("x", TypeRef::new("com.a.Foo")).with_strategy("auto-gen"))
                .with_parameter(ParameterDecl::new("y", TypeRef::new("com.b.Foo")).with_strategy("auto-gen"))
                .with_parameter(ParameterDecl::new("p", point_type())),
        );
        let code = assemble(&class);
        assert!(code.contains("override fun link(x: com.a.Foo, y: com.b.Foo, p: JsPoint): Unit {"));
        assert!(code.contains("source.call(\"link\", castFoo(x), castFoo(y), __castJsObjectWrapper__(p))"));
        assert!(code.contains("abstract fun castFoo(arg: com.a.Foo): Any?"));
        assert!(code.contains("abstract fun castFoo(arg: com.b.Foo): Any?"));
        assert!(code.contains(" *     castFoo(arg:com.b.Foo) -> Any?\n"));
        assert!(!code.contains("import com.a.Foo"));
        assert!(!code.contains("import com.b.Foo"));
        assert!(code.contains("import com.github.zimolab.jow.core.JsObjectWrapper\n"));
    }

    #[test]
    fn test_misspelled_strategy_fails_class() {
        let class = line().with_property(
            PropertyDecl::var("foo", TypeRef::new("com.example.Plain")).with_meta(PropertyMeta {
                setter_strategy: "auto-generate".into(),
                ..PropertyMeta::default()
            }),
        );
        let err = assemble_with(&class, &mut CollectedDiagnostics::new()).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("JsLine.foo[setter]: "), "{}", message);
        assert!(message.contains("auto-generate"));
    }

    #[test]
    fn test_user_specified_parameter_mapping() {
        let list = TypeRef::new("kotlin.collections.List")
            .with_args(vec![TypeArg::invariant(TypeRef::new(names::STRING))]);
        let class = line().with_function(
            FunctionDecl::new("setTags", TypeRef::unit())
                .with_parameter(ParameterDecl::new("tags", list).with_strategy("tagsToJs")),
        );
        let code = assemble(&class);
        assert!(code.contains("source.call(\"setTags\", tagsToJs(tags))"));
        assert!(code.contains("abstract fun tagsToJs(arg: List<String>): Any?"));
        assert!(code.contains(" *     tagsToJs(arg:List<String>) -> Any?\n"));
    }

    #[test]
    fn test_skipped_members_warn_and_stay_abstract() {
        let class = line()
            .with_property(PropertyDecl::val("hidden", TypeRef::new(names::INT)).with_meta(PropertyMeta {
                skip: true,
                ..PropertyMeta::default()
            }))
            .with_function(
                FunctionDecl::new("map", TypeRef::new("R"))
                    .with_type_parameter("R")
                    .with_meta(FunctionMeta {
                        skip: true,
                        ..FunctionMeta::default()
                    }),
            );
        let mut diagnostics = CollectedDiagnostics::new();
        let code = assemble_with(&class, &mut diagnostics).unwrap();
        assert!(!code.contains("hidden"));
        assert!(!code.contains("fun map"));
        assert_eq!(diagnostics.at(Level::Warn).count(), 2);
    }

    #[test]
    fn test_generic_function_fails() {
        let class = line().with_function(FunctionDecl::new("map", TypeRef::new("R")).with_type_parameter("R"));
        let err = assemble_with(&class, &mut CollectedDiagnostics::new()).unwrap_err();
        assert!(matches!(err, Error::Structure(_)));
        assert!(err.to_string().contains("com.example.JsLine.map"));
    }

    #[test]
    fn test_missing_return_type_fails() {
        let mut function = FunctionDecl::new("size", TypeRef::unit());
        function.return_type = None;
        let err = assemble_with(&line().with_function(function), &mut CollectedDiagnostics::new())
            .unwrap_err();
        assert!(matches!(err, Error::Structure(_)));
    }

    #[test]
    fn test_interface_must_extend_wrapper() {
        let class = ClassDecl::interface(PACKAGE, "Plain").with_meta(ClassMeta::default());
        let err = assemble_with(&class, &mut CollectedDiagnostics::new()).unwrap_err();
        assert!(err.to_string().contains("must extend"));
    }

    #[test]
    fn test_getter_no_mapping_for_non_native_fails() {
        let class = line().with_property(PropertyDecl::val("start", point_type()).with_meta(PropertyMeta {
            getter_strategy: "no-mapping".into(),
            ..PropertyMeta::default()
        }));
        let err = assemble_with(&class, &mut CollectedDiagnostics::new()).unwrap_err();
        assert!(err.to_string().starts_with("JsLine.start[getter]"));
    }

    #[test]
    fn test_constructor_styles_and_class_doc() {
        let class = line().with_meta(ClassMeta {
            primary_constructor: "None".into(),
            class_doc: "A line segment.\nTwo points.".into(),
            ..ClassMeta::default()
        });
        let code = assemble(&class);
        assert!(code.contains("/**\n * A line segment.\n * Two points.\n */\nabstract class AbsJsLine : JsLine {"));
        assert!(!code.contains("import netscape.javascript.JSObject"));

        let class = line().with_meta(ClassMeta {
            primary_constructor: "Blank".into(),
            ..ClassMeta::default()
        });
        assert!(assemble(&class).contains("abstract class AbsJsLine() : JsLine {"));
    }

    #[test]
    fn test_non_abstract_members_are_not_emitted() {
        let mut property = PropertyDecl::val("length", TypeRef::new(names::DOUBLE));
        property.is_abstract = false;
        let code = assemble(&line().with_property(property));
        assert!(!code.contains("length"));
    }

    #[test]
    fn test_star_imports_are_carried() {
        let mut class = line().with_property(PropertyDecl::val("created", TypeRef::new("com.example.Date")));
        class.imports = vec!["java.util.*".into(), names::JS_OBJECT.into()];
        let code = assemble(&class);
        assert!(code.contains("import java.util.*\n"));
        assert!(code.contains("return asDate(ret)"));
    }
}
