//! Declarations the generator works from, and their annotation metadata.
//!
//! A [`ClassDecl`] is what the extractor produces for every interface or
//! class it reads; it can also be built by hand. Annotation arguments are
//! kept as written (`*Meta` records with the annotation defaults) and turned
//! into parsed options once, by the `resolve` methods.

use crate::error::{Error, Result};
use crate::strategy::MappingStrategy;
use crate::types::TypeRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Interface,
    AbstractClass,
    Class,
}

/// Arguments of `@JsObjectClass`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMeta {
    pub output_class_name: String,
    pub output_filename: String,
    pub output_file_encoding: String,
    pub primary_constructor: String,
    pub class_doc: String,
}

impl Default for ClassMeta {
    fn default() -> Self {
        Self {
            output_class_name: String::new(),
            output_filename: String::new(),
            output_file_encoding: "UTF-8".to_string(),
            primary_constructor: PrimaryConstructor::WITH_PARAMETER.to_string(),
            class_doc: String::new(),
        }
    }
}

/// Arguments of `@JsObjectProperty`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMeta {
    pub js_member_name: String,
    pub skip: bool,
    pub undefined_as_null: bool,
    pub raise_exception_on_undefined: bool,
    pub getter_strategy: String,
    pub setter_strategy: String,
}

impl Default for PropertyMeta {
    fn default() -> Self {
        Self {
            js_member_name: String::new(),
            skip: false,
            undefined_as_null: true,
            raise_exception_on_undefined: false,
            getter_strategy: MappingStrategy::AUTO_DETERMINE.to_string(),
            setter_strategy: MappingStrategy::AUTO_DETERMINE.to_string(),
        }
    }
}

/// Arguments of `@JsObjectFunction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionMeta {
    pub js_member_name: String,
    pub skip: bool,
    pub undefined_as_null: bool,
    pub raise_exception_on_undefined: bool,
    pub return_strategy: String,
}

impl Default for FunctionMeta {
    fn default() -> Self {
        Self {
            js_member_name: String::new(),
            skip: false,
            undefined_as_null: true,
            raise_exception_on_undefined: false,
            return_strategy: MappingStrategy::AUTO_DETERMINE.to_string(),
        }
    }
}

/// Arguments of `@JsObjectParameter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterMeta {
    pub strategy: String,
}

impl Default for ParameterMeta {
    fn default() -> Self {
        Self {
            strategy: MappingStrategy::NO_MAPPING_EXCEPT_BUILTIN.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub package: String,
    pub name: String,
    pub kind: ClassKind,
    pub supertypes: Vec<TypeRef>,
    /// Import directives of the source file, as qualified names.
    pub imports: Vec<String>,
    /// `None` when the class carries no `@JsObjectClass`.
    pub meta: Option<ClassMeta>,
    pub properties: Vec<PropertyDecl>,
    pub functions: Vec<FunctionDecl>,
}

impl ClassDecl {
    pub fn new(package: impl Into<String>, name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            kind,
            supertypes: Vec::new(),
            imports: Vec::new(),
            meta: None,
            properties: Vec::new(),
            functions: Vec::new(),
        }
    }

    pub fn interface(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(package, name, ClassKind::Interface)
    }

    pub fn with_supertype(mut self, supertype: TypeRef) -> Self {
        self.supertypes.push(supertype);
        self
    }

    pub fn with_meta(mut self, meta: ClassMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn with_property(mut self, property: PropertyDecl) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_function(mut self, function: FunctionDecl) -> Self {
        self.functions.push(function);
        self
    }

    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    pub fn as_type(&self) -> TypeRef {
        TypeRef::new(self.qualified_name())
    }

    /// Final output settings for this class. `prefix` and `suffix` apply only
    /// when `outputClassName` is not given.
    pub fn resolve_meta(&self, prefix: &str, suffix: &str) -> Result<ResolvedClassMeta> {
        let meta = self.meta.clone().unwrap_or_default();

        if !meta.output_file_encoding.eq_ignore_ascii_case("UTF-8")
            && !meta.output_file_encoding.eq_ignore_ascii_case("UTF8")
        {
            return Err(Error::Configuration(format!(
                "{}: unsupported output file encoding `{}`, only UTF-8 is supported",
                self.qualified_name(),
                meta.output_file_encoding
            )));
        }

        let primary_constructor = PrimaryConstructor::parse(&meta.primary_constructor)
            .ok_or_else(|| {
                Error::Configuration(format!(
                    "{}: unknown primaryConstructor `{}` (expected None, Blank or WithParameter)",
                    self.qualified_name(),
                    meta.primary_constructor
                ))
            })?;

        let output_class_name = if meta.output_class_name.is_empty() {
            format!("{}{}{}", prefix, self.name, suffix)
        } else {
            meta.output_class_name
        };
        let output_filename = if meta.output_filename.is_empty() {
            output_class_name.clone()
        } else {
            meta.output_filename
                .strip_suffix(".kt")
                .unwrap_or(&meta.output_filename)
                .to_string()
        };

        Ok(ResolvedClassMeta {
            output_class_name,
            output_filename,
            primary_constructor,
            class_doc: Some(meta.class_doc).filter(|doc| !doc.trim().is_empty()),
        })
    }
}

/// Shape of the generated class's primary constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryConstructor {
    /// `abstract class AbsFoo : Foo`
    None,
    /// `abstract class AbsFoo() : Foo`
    Blank,
    /// `abstract class AbsFoo(override val source: JSObject) : Foo`
    WithParameter,
}

impl PrimaryConstructor {
    pub const NONE: &'static str = "None";
    pub const BLANK: &'static str = "Blank";
    pub const WITH_PARAMETER: &'static str = "WithParameter";

    pub fn parse(value: &str) -> Option<Self> {
        let last = value.rsplit('.').next().unwrap_or(value);
        match last {
            Self::NONE => Some(Self::None),
            Self::BLANK => Some(Self::Blank),
            Self::WITH_PARAMETER => Some(Self::WithParameter),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedClassMeta {
    pub output_class_name: String,
    pub output_filename: String,
    pub primary_constructor: PrimaryConstructor,
    pub class_doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDecl {
    pub name: String,
    pub ty: TypeRef,
    pub mutable: bool,
    pub is_abstract: bool,
    pub meta: Option<PropertyMeta>,
}

impl PropertyDecl {
    pub fn val(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            mutable: false,
            is_abstract: true,
            meta: None,
        }
    }

    pub fn var(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            mutable: true,
            ..Self::val(name, ty)
        }
    }

    pub fn with_meta(mut self, meta: PropertyMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Effective settings. A skipped property keeps the default strategies
    /// and its strategy tokens are not read.
    pub fn resolve(&self, class: &str) -> Result<PropertyOptions> {
        let meta = self.meta.clone().unwrap_or_default();
        let (getter, setter) = if meta.skip {
            let setter = self.mutable.then_some(MappingStrategy::AutoDetermine);
            (MappingStrategy::AutoDetermine, setter)
        } else {
            let getter = parse_strategy(&meta.getter_strategy, class, &self.name, "getter")?;
            let setter = if self.mutable {
                Some(parse_strategy(&meta.setter_strategy, class, &self.name, "setter")?)
            } else {
                None
            };
            (getter, setter)
        };
        Ok(PropertyOptions {
            js_name: js_name(&meta.js_member_name, &self.name),
            skip: meta.skip,
            undefined_as_null: meta.undefined_as_null,
            raise_exception_on_undefined: !meta.undefined_as_null
                && meta.raise_exception_on_undefined,
            getter,
            setter,
        })
    }
}

/// Effective settings of one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyOptions {
    pub js_name: String,
    pub skip: bool,
    pub undefined_as_null: bool,
    pub raise_exception_on_undefined: bool,
    pub getter: MappingStrategy,
    /// `None` for read-only properties.
    pub setter: Option<MappingStrategy>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: String,
    pub type_parameters: Vec<String>,
    pub parameters: Vec<ParameterDecl>,
    pub return_type: Option<TypeRef>,
    pub is_abstract: bool,
    pub is_override: bool,
    pub meta: Option<FunctionMeta>,
}

impl FunctionDecl {
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type: Some(return_type),
            is_abstract: true,
            is_override: false,
            meta: None,
        }
    }

    pub fn with_parameter(mut self, parameter: ParameterDecl) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_type_parameter(mut self, name: impl Into<String>) -> Self {
        self.type_parameters.push(name.into());
        self
    }

    pub fn with_meta(mut self, meta: FunctionMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn is_generic(&self) -> bool {
        !self.type_parameters.is_empty()
    }

    pub fn resolve(&self, class: &str) -> Result<FunctionOptions> {
        let meta = self.meta.clone().unwrap_or_default();
        let return_strategy = if meta.skip {
            MappingStrategy::AutoDetermine
        } else {
            parse_strategy(&meta.return_strategy, class, &self.name, "return")?
        };
        Ok(FunctionOptions {
            js_name: js_name(&meta.js_member_name, &self.name),
            skip: meta.skip,
            undefined_as_null: meta.undefined_as_null,
            raise_exception_on_undefined: !meta.undefined_as_null
                && meta.raise_exception_on_undefined,
            return_strategy,
        })
    }
}

/// Effective settings of one function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionOptions {
    pub js_name: String,
    pub skip: bool,
    pub undefined_as_null: bool,
    pub raise_exception_on_undefined: bool,
    pub return_strategy: MappingStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDecl {
    pub name: Option<String>,
    pub ty: TypeRef,
    pub vararg: bool,
    pub meta: Option<ParameterMeta>,
}

impl ParameterDecl {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: Some(name.into()),
            ty,
            vararg: false,
            meta: None,
        }
    }

    pub fn vararg(mut self) -> Self {
        self.vararg = true;
        self
    }

    pub fn with_strategy(mut self, token: impl Into<String>) -> Self {
        self.meta = Some(ParameterMeta {
            strategy: token.into(),
        });
        self
    }

    /// Declared name, or a positional one for unnamed parameters.
    pub fn name_or(&self, index: usize) -> String {
        self.name.clone().unwrap_or_else(|| format!("arg{}", index))
    }

    pub fn strategy(&self, class: &str, member: &str) -> Result<MappingStrategy> {
        let meta = self.meta.clone().unwrap_or_default();
        parse_strategy(&meta.strategy, class, member, "parameter")
    }
}

fn js_name(declared: &str, fallback: &str) -> String {
    if declared.is_empty() {
        fallback.to_string()
    } else {
        declared.to_string()
    }
}

fn parse_strategy(token: &str, class: &str, member: &str, facet: &str) -> Result<MappingStrategy> {
    MappingStrategy::from_token(token)
        .map_err(|e| Error::mapping(class, format!("{}[{}]", member, facet), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::names;

    fn point() -> ClassDecl {
        ClassDecl::interface("com.example", "JsPoint")
            .with_meta(ClassMeta::default())
            .with_property(PropertyDecl::var("x", TypeRef::new(names::DOUBLE)))
    }

    #[test]
    fn test_class_meta_defaults() {
        let meta = point().resolve_meta("Abs", "").unwrap();
        assert_eq!(meta.output_class_name, "AbsJsPoint");
        assert_eq!(meta.output_filename, "AbsJsPoint");
        assert_eq!(meta.primary_constructor, PrimaryConstructor::WithParameter);
        assert_eq!(meta.class_doc, None);
    }

    #[test]
    fn test_class_meta_explicit_values() {
        let class = point().with_meta(ClassMeta {
            output_class_name: "PointBase".into(),
            output_filename: "Points.kt".into(),
            primary_constructor: "JsObjectClass.PrimaryConstructor.Blank".into(),
            class_doc: "A point.".into(),
            ..ClassMeta::default()
        });
        let meta = class.resolve_meta("Abs", "Impl").unwrap();
        assert_eq!(meta.output_class_name, "PointBase");
        assert_eq!(meta.output_filename, "Points");
        assert_eq!(meta.primary_constructor, PrimaryConstructor::Blank);
        assert_eq!(meta.class_doc.as_deref(), Some("A point."));
    }

    #[test]
    fn test_suffix_applies_to_derived_name() {
        let meta = point().resolve_meta("", "Wrapper").unwrap();
        assert_eq!(meta.output_class_name, "JsPointWrapper");
    }

    #[test]
    fn test_unsupported_encoding_is_configuration_error() {
        let class = point().with_meta(ClassMeta {
            output_file_encoding: "GBK".into(),
            ..ClassMeta::default()
        });
        let err = class.resolve_meta("Abs", "").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("GBK"));
    }

    #[test]
    fn test_unknown_primary_constructor() {
        let class = point().with_meta(ClassMeta {
            primary_constructor: "Secondary".into(),
            ..ClassMeta::default()
        });
        assert!(matches!(class.resolve_meta("Abs", ""), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_property_defaults() {
        let options = PropertyDecl::var("x", TypeRef::new(names::DOUBLE))
            .resolve("JsPoint")
            .unwrap();
        assert_eq!(options.js_name, "x");
        assert!(!options.skip);
        assert!(options.undefined_as_null);
        assert!(!options.raise_exception_on_undefined);
        assert_eq!(options.getter, MappingStrategy::AutoDetermine);
        assert_eq!(options.setter, Some(MappingStrategy::AutoDetermine));

        let options = PropertyDecl::val("y", TypeRef::new(names::DOUBLE))
            .resolve("JsPoint")
            .unwrap();
        assert_eq!(options.setter, None);
    }

    #[test]
    fn test_raise_only_when_undefined_is_not_null() {
        let property = PropertyDecl::val("y", TypeRef::new(names::DOUBLE)).with_meta(PropertyMeta {
            raise_exception_on_undefined: true,
            ..PropertyMeta::default()
        });
        assert!(!property.resolve("JsPoint").unwrap().raise_exception_on_undefined);

        let function = FunctionDecl::new("toDateString", TypeRef::new(names::STRING)).with_meta(
            FunctionMeta {
                undefined_as_null: false,
                raise_exception_on_undefined: true,
                ..FunctionMeta::default()
            },
        );
        assert!(function.resolve("JsDate").unwrap().raise_exception_on_undefined);
    }

    #[test]
    fn test_empty_strategy_names_member_and_facet() {
        let property = PropertyDecl::var("x", TypeRef::new(names::DOUBLE)).with_meta(PropertyMeta {
            setter_strategy: String::new(),
            ..PropertyMeta::default()
        });
        let err = property.resolve("JsPoint").unwrap_err();
        assert!(matches!(
            err,
            Error::Mapping {
                source: crate::error::MappingError::EmptyStrategy,
                ..
            }
        ));
        assert!(err.to_string().starts_with("JsPoint.x[setter]"));
    }

    #[test]
    fn test_misspelled_strategy_names_member_facet_and_token() {
        let property = PropertyDecl::var("foo", TypeRef::new("com.example.Foo")).with_meta(
            PropertyMeta {
                setter_strategy: "auto-generate".into(),
                ..PropertyMeta::default()
            },
        );
        let err = property.resolve("JsFoo").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("JsFoo.foo[setter]: "), "{}", message);
        assert!(message.contains("`auto-generate`"), "{}", message);
    }

    #[test]
    fn test_padded_strategy_resolves() {
        let property = PropertyDecl::var("foo", TypeRef::new("com.example.Foo")).with_meta(
            PropertyMeta {
                getter_strategy: " auto-gen".into(),
                ..PropertyMeta::default()
            },
        );
        let options = property.resolve("JsFoo").unwrap();
        assert_eq!(options.getter, MappingStrategy::AutoGenerate);
    }

    #[test]
    fn test_skipped_members_ignore_strategy_tokens() {
        let property = PropertyDecl::var("foo", TypeRef::new("com.example.Foo")).with_meta(
            PropertyMeta {
                skip: true,
                getter_strategy: String::new(),
                setter_strategy: "not a name".into(),
                ..PropertyMeta::default()
            },
        );
        assert!(property.resolve("JsFoo").unwrap().skip);

        let function = FunctionDecl::new("copy", TypeRef::new("com.example.Foo")).with_meta(
            FunctionMeta {
                skip: true,
                return_strategy: String::new(),
                ..FunctionMeta::default()
            },
        );
        assert!(function.resolve("JsFoo").unwrap().skip);
    }

    #[test]
    fn test_parameter_default_strategy() {
        let parameter = ParameterDecl::new("other", TypeRef::new("com.example.JsPoint"));
        assert_eq!(
            parameter.strategy("JsPoint", "plus").unwrap(),
            MappingStrategy::NoMappingExceptBuiltin
        );
        let parameter = parameter.with_strategy("auto-gen");
        assert_eq!(parameter.strategy("JsPoint", "plus").unwrap(), MappingStrategy::AutoGenerate);
    }

    #[test]
    fn test_function_js_name() {
        let function = FunctionDecl::new("plus", TypeRef::new("com.example.JsPoint")).with_meta(
            FunctionMeta {
                js_member_name: "add".into(),
                ..FunctionMeta::default()
            },
        );
        assert_eq!(function.resolve("JsPoint").unwrap().js_name, "add");
    }
}
