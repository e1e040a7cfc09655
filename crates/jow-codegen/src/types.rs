//! Kotlin type references as seen by the generator.

use std::collections::BTreeSet;
use std::fmt;

/// Fully-qualified names the generator knows about.
pub mod names {
    pub const ANY: &str = "kotlin.Any";
    pub const UNIT: &str = "kotlin.Unit";
    pub const NOTHING: &str = "kotlin.Nothing";
    pub const JAVA_VOID: &str = "java.lang.Void";
    pub const BOOLEAN: &str = "kotlin.Boolean";
    pub const INT: &str = "kotlin.Int";
    pub const DOUBLE: &str = "kotlin.Double";
    pub const STRING: &str = "kotlin.String";
    pub const ARRAY: &str = "kotlin.Array";
    pub const COLLECTION: &str = "kotlin.collections.Collection";

    pub const JS_OBJECT: &str = "netscape.javascript.JSObject";
    pub const JS_EXCEPTION: &str = "netscape.javascript.JSException";

    pub const JS_OBJECT_WRAPPER: &str = "com.github.zimolab.jow.core.JsObjectWrapper";
    pub const JS_ARRAY_INTERFACE: &str = "com.github.zimolab.jsarray.base.JsArrayInterface";
    pub const JS_ARRAY: &str = "com.github.zimolab.jsarray.base.JsArray";
    pub const JS_OBJECT_WRAPPER_ARRAY_TEMPLATE: &str =
        "com.github.zimolab.jow.array.JsObjectWrapperArrayTemplate";
    pub const JS_OBJECT_WRAPPER_ARRAY: &str = "com.github.zimolab.jow.array.JsObjectWrapperArray";

    pub const ANNOTATION_CLASS: &str = "JsObjectClass";
    pub const ANNOTATION_PROPERTY: &str = "JsObjectProperty";
    pub const ANNOTATION_FUNCTION: &str = "JsObjectFunction";
    pub const ANNOTATION_PARAMETER: &str = "JsObjectParameter";
}

/// Packages whose members need no import in generated Kotlin.
const DEFAULT_PACKAGES: &[&str] = &["kotlin", "kotlin.collections"];

/// Use-site variance of a type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variance {
    #[default]
    Invariant,
    Out,
    In,
}

/// A single type argument: `*`, `T`, `out T` or `in T`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeArg {
    Star,
    Type { variance: Variance, ty: TypeRef },
}

impl TypeArg {
    pub fn invariant(ty: TypeRef) -> Self {
        Self::Type {
            variance: Variance::Invariant,
            ty,
        }
    }

    pub fn out(ty: TypeRef) -> Self {
        Self::Type {
            variance: Variance::Out,
            ty,
        }
    }

    fn render(&self, qualify: &dyn Fn(&str) -> bool) -> String {
        match self {
            Self::Star => "*".to_string(),
            Self::Type { variance, ty } => {
                let ty = ty.render(qualify);
                match variance {
                    Variance::Invariant => ty,
                    Variance::Out => format!("out {}", ty),
                    Variance::In => format!("in {}", ty),
                }
            }
        }
    }
}

/// A declared Kotlin type with its name already resolved to a qualified one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub qualified_name: String,
    pub arguments: Vec<TypeArg>,
    pub nullable: bool,
}

impl TypeRef {
    /// A non-nullable type without arguments.
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            arguments: Vec::new(),
            nullable: false,
        }
    }

    pub fn with_args(mut self, arguments: Vec<TypeArg>) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn non_null(&self) -> Self {
        Self {
            nullable: false,
            ..self.clone()
        }
    }

    /// `kotlin.Any?`, the bridge side of every user conversion.
    pub fn any_nullable() -> Self {
        Self::new(names::ANY).nullable()
    }

    /// `netscape.javascript.JSObject?`, the bridge side of the built-ins.
    pub fn js_object_nullable() -> Self {
        Self::new(names::JS_OBJECT).nullable()
    }

    pub fn unit() -> Self {
        Self::new(names::UNIT)
    }

    /// Last segment of the qualified name.
    pub fn simple_name(&self) -> &str {
        match self.qualified_name.rfind('.') {
            Some(pos) => &self.qualified_name[pos + 1..],
            None => &self.qualified_name,
        }
    }

    /// Everything before the last segment; empty for the root package.
    pub fn package(&self) -> &str {
        match self.qualified_name.rfind('.') {
            Some(pos) => &self.qualified_name[..pos],
            None => "",
        }
    }

    pub fn has_type_arguments(&self) -> bool {
        !self.arguments.is_empty()
    }

    /// Kotlin source form using simple names, e.g. `JsArrayInterface<out Any?>?`.
    pub fn to_kotlin(&self) -> String {
        self.render(&|_| false)
    }

    /// Kotlin source form using qualified names.
    pub fn to_qualified(&self) -> String {
        self.render(&|_| true)
    }

    /// Simple names, except for the names in `qualified`, which are
    /// written out in full.
    pub fn to_kotlin_with(&self, qualified: &BTreeSet<String>) -> String {
        self.render(&|name| qualified.contains(name))
    }

    fn render(&self, qualify: &dyn Fn(&str) -> bool) -> String {
        let mut out = if qualify(&self.qualified_name) {
            self.qualified_name.clone()
        } else {
            self.simple_name().to_string()
        };
        if !self.arguments.is_empty() {
            let args: Vec<_> = self.arguments.iter().map(|a| a.render(qualify)).collect();
            out.push('<');
            out.push_str(&args.join(", "));
            out.push('>');
        }
        if self.nullable {
            out.push('?');
        }
        out
    }

    /// Every qualified name this type mentions, its own and its arguments'.
    pub fn collect_names(&self, out: &mut BTreeSet<String>) {
        out.insert(self.qualified_name.clone());
        for arg in &self.arguments {
            if let TypeArg::Type { ty, .. } = arg {
                ty.collect_names(out);
            }
        }
    }

    /// Collect every qualified name this type mentions that generated code
    /// referring to it by simple name would have to import.
    pub fn collect_imports(&self, own_package: &str, out: &mut BTreeSet<String>) {
        let package = self.package();
        if !package.is_empty() && package != own_package && !DEFAULT_PACKAGES.contains(&package)
        {
            out.insert(self.qualified_name.clone());
        }
        for arg in &self.arguments {
            if let TypeArg::Type { ty, .. } = arg {
                ty.collect_imports(own_package, out);
            }
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_kotlin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn js_array_of_any() -> TypeRef {
        TypeRef::new(names::JS_ARRAY_INTERFACE)
            .with_args(vec![TypeArg::out(TypeRef::any_nullable())])
            .nullable()
    }

    #[test]
    fn test_simple_name_and_package() {
        let ty = TypeRef::new(names::JS_OBJECT);
        assert_eq!(ty.simple_name(), "JSObject");
        assert_eq!(ty.package(), "netscape.javascript");

        let root = TypeRef::new("Point");
        assert_eq!(root.simple_name(), "Point");
        assert_eq!(root.package(), "");
    }

    #[test]
    fn test_render_generic_nullable() {
        let ty = js_array_of_any();
        assert_eq!(ty.to_kotlin(), "JsArrayInterface<out Any?>?");
        assert_eq!(
            ty.to_qualified(),
            "com.github.zimolab.jsarray.base.JsArrayInterface<out kotlin.Any?>?"
        );
        assert_eq!(ty.to_string(), ty.to_kotlin());
    }

    #[test]
    fn test_render_star_projection() {
        let ty = TypeRef::new("kotlin.collections.Map")
            .with_args(vec![TypeArg::invariant(TypeRef::new(names::STRING)), TypeArg::Star]);
        assert_eq!(ty.to_kotlin(), "Map<String, *>");
    }

    #[test]
    fn test_non_null_keeps_arguments() {
        let ty = js_array_of_any();
        let plain = ty.non_null();
        assert!(!plain.nullable);
        assert_eq!(plain.arguments, ty.arguments);
    }

    #[test]
    fn test_collect_imports_skips_default_and_own_package() {
        let ty = TypeRef::new("kotlin.collections.List").with_args(vec![
            TypeArg::invariant(TypeRef::new("com.example.js.JsPoint")),
        ]);
        let mut imports = BTreeSet::new();
        ty.collect_imports("com.example.js", &mut imports);
        assert!(imports.is_empty());

        let mut imports = BTreeSet::new();
        js_array_of_any().collect_imports("com.example.js", &mut imports);
        assert_eq!(
            imports.into_iter().collect::<Vec<_>>(),
            vec![names::JS_ARRAY_INTERFACE.to_string()]
        );
    }

    #[test]
    fn test_render_with_selected_qualified_names() {
        let ty = TypeRef::new("kotlin.collections.Map").with_args(vec![
            TypeArg::invariant(TypeRef::new("com.a.Foo")),
            TypeArg::invariant(TypeRef::new("com.b.Foo").nullable()),
        ]);
        let qualified: BTreeSet<String> = ["com.a.Foo".to_string(), "com.b.Foo".to_string()].into();
        assert_eq!(ty.to_kotlin_with(&qualified), "Map<com.a.Foo, com.b.Foo?>");

        let mut mentioned = BTreeSet::new();
        ty.collect_names(&mut mentioned);
        assert_eq!(mentioned.len(), 3);
        assert!(mentioned.contains("kotlin.collections.Map"));
    }
}
