//! Source file parser that extracts annotated Kotlin interfaces.
//!
//! This reads the part of Kotlin that interface declarations use: package
//! and imports, annotations, class headers with supertypes, properties,
//! functions and their parameters, and types. Bodies, initializers and
//! default values are skipped by balancing delimiters. Every class found is
//! added to the generator; only those carrying `@JsObjectClass` produce
//! output, the rest only teach it the type hierarchy.

use std::fs;
use std::path::Path;

use rustc_hash::{FxHashMap, FxHashSet};
use walkdir::WalkDir;

use crate::decl::{
    ClassDecl, ClassKind, ClassMeta, FunctionDecl, FunctionMeta, ParameterDecl, ParameterMeta,
    PropertyDecl, PropertyMeta,
};
use crate::error::{Error, Result};
use crate::lexer::{lex, line_col, Span, Spanned, Token};
use crate::strategy::MappingStrategy;
use crate::types::{names, TypeArg, TypeRef, Variance};
use crate::CodeGenerator;

/// Simple names visible without an import.
const DEFAULT_IMPORTS: &[(&str, &str)] = &[
    ("Any", "kotlin"),
    ("Unit", "kotlin"),
    ("Nothing", "kotlin"),
    ("Boolean", "kotlin"),
    ("Byte", "kotlin"),
    ("Short", "kotlin"),
    ("Int", "kotlin"),
    ("Long", "kotlin"),
    ("Float", "kotlin"),
    ("Double", "kotlin"),
    ("Char", "kotlin"),
    ("String", "kotlin"),
    ("CharSequence", "kotlin"),
    ("Number", "kotlin"),
    ("UByte", "kotlin"),
    ("UShort", "kotlin"),
    ("UInt", "kotlin"),
    ("ULong", "kotlin"),
    ("Array", "kotlin"),
    ("BooleanArray", "kotlin"),
    ("ByteArray", "kotlin"),
    ("ShortArray", "kotlin"),
    ("IntArray", "kotlin"),
    ("LongArray", "kotlin"),
    ("FloatArray", "kotlin"),
    ("DoubleArray", "kotlin"),
    ("CharArray", "kotlin"),
    ("Comparable", "kotlin"),
    ("Enum", "kotlin"),
    ("Pair", "kotlin"),
    ("Triple", "kotlin"),
    ("Throwable", "kotlin"),
    ("Exception", "kotlin"),
    ("RuntimeException", "kotlin"),
    ("Iterable", "kotlin.collections"),
    ("MutableIterable", "kotlin.collections"),
    ("Collection", "kotlin.collections"),
    ("MutableCollection", "kotlin.collections"),
    ("List", "kotlin.collections"),
    ("MutableList", "kotlin.collections"),
    ("Set", "kotlin.collections"),
    ("MutableSet", "kotlin.collections"),
    ("Map", "kotlin.collections"),
    ("MutableMap", "kotlin.collections"),
    ("Iterator", "kotlin.collections"),
    ("ArrayList", "kotlin.collections"),
    ("HashMap", "kotlin.collections"),
    ("HashSet", "kotlin.collections"),
    ("LinkedHashMap", "kotlin.collections"),
    ("LinkedHashSet", "kotlin.collections"),
];

const MODIFIERS: &[&str] = &[
    "abstract",
    "open",
    "override",
    "final",
    "private",
    "protected",
    "public",
    "internal",
    "suspend",
    "inline",
    "operator",
    "infix",
    "external",
    "const",
    "lateinit",
    "data",
    "sealed",
    "enum",
    "annotation",
    "companion",
    "inner",
    "tailrec",
    "expect",
    "actual",
    "value",
    "crossinline",
    "noinline",
    "reified",
];

const CLASS_ARGS: &[&str] = &[
    "outputClassName",
    "outputFilename",
    "outputFileEncoding",
    "primaryConstructor",
    "classDoc",
];

const PROPERTY_ARGS: &[&str] = &[
    "jsMemberName",
    "skip",
    "undefinedAsNull",
    "raiseExceptionOnUndefined",
    "getterTypeMappingStrategy",
    "setterTypeMappingStrategy",
];

const FUNCTION_ARGS: &[&str] = &[
    "jsMemberName",
    "skip",
    "undefinedAsNull",
    "raiseExceptionOnUndefined",
    "returnTypeMappingStrategy",
];

const PARAMETER_ARGS: &[&str] = &["typeMappingStrategy"];

/// Where a skipped expression ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExprEnd {
    /// Inside an argument list: at `,` or `)`.
    Argument,
    /// A member initializer or expression body: at the end of the line.
    Member,
    /// A delegation in a supertype list: at `,`, `{` or the end of the line.
    Supertype,
}

#[derive(Debug, Clone, PartialEq)]
enum AnnotationValue {
    Str(String),
    Bool(bool),
    Ref(String),
    Other,
}

#[derive(Debug, Clone)]
struct Annotation {
    /// Last segment of the annotation name.
    name: String,
    args: Vec<(Option<String>, AnnotationValue)>,
    span: Span,
}

#[derive(Debug, Default)]
struct Modifiers<'a>(Vec<&'a str>);

impl Modifiers<'_> {
    fn has(&self, modifier: &str) -> bool {
        self.0.iter().any(|m| *m == modifier)
    }
}

/// Parse Kotlin `source` into class declarations. `file` is used in errors.
pub(crate) fn parse_source(source: &str, file: &Path) -> Result<Vec<ClassDecl>> {
    let tokens = lex(source).map_err(|span| {
        let (line, column) = line_col(source, span.start);
        Error::Parse {
            file: file.to_path_buf(),
            line,
            column,
            message: "unrecognized input".to_string(),
        }
    })?;
    Parser::new(source, file, tokens).parse_file()
}

struct Parser<'a> {
    source: &'a str,
    file: &'a Path,
    tokens: Vec<Spanned<'a>>,
    pos: usize,
    package: String,
    /// Imported simple name (or alias) -> qualified name.
    imports: FxHashMap<String, String>,
    directives: Vec<String>,
    local_types: FxHashSet<String>,
    type_params: Vec<String>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, file: &'a Path, tokens: Vec<Spanned<'a>>) -> Self {
        Self {
            source,
            file,
            tokens,
            pos: 0,
            package: String::new(),
            imports: FxHashMap::default(),
            directives: Vec::new(),
            local_types: FxHashSet::default(),
            type_params: Vec::new(),
        }
    }

    // ── token access ──────────────────────────────────────────────────

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).map(|s| s.token)
    }

    fn peek_at(&self, offset: usize) -> Option<Token<'a>> {
        self.tokens.get(self.pos + offset).map(|s| s.token)
    }

    fn newline_before(&self) -> bool {
        self.tokens.get(self.pos).is_some_and(|s| s.newline_before)
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn at(&self, token: Token<'_>) -> bool {
        self.peek() == Some(token)
    }

    fn at_ident(&self, word: &str) -> bool {
        matches!(self.peek(), Some(Token::Ident(s)) if s == word)
    }

    fn eat(&mut self, token: Token<'_>) -> bool {
        if self.at(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token<'_>) -> Result<()> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("{}", token)))
        }
    }

    fn ident(&mut self) -> Result<&'a str> {
        match self.peek() {
            Some(Token::Ident(s)) | Some(Token::QuotedIdent(s)) => {
                self.pos += 1;
                Ok(s)
            }
            _ => Err(self.unexpected("an identifier")),
        }
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> Error {
        let (line, column) = line_col(self.source, offset);
        Error::Parse {
            file: self.file.to_path_buf(),
            line,
            column,
            message: message.into(),
        }
    }

    fn unexpected(&self, expected: &str) -> Error {
        match self.tokens.get(self.pos) {
            Some(s) => self.error_at(s.span.start, format!("expected {}, found {}", expected, s.token)),
            None => self.error_at(self.source.len(), format!("expected {}, found end of file", expected)),
        }
    }

    // ── file level ────────────────────────────────────────────────────

    fn parse_file(mut self) -> Result<Vec<ClassDecl>> {
        self.collect_local_types();

        // File annotations such as `@file:JvmName("...")`.
        while self.at(Token::At) && matches!(self.peek_at(1), Some(Token::Ident("file"))) {
            self.annotation()?;
        }
        if self.eat(Token::Package) {
            self.package = self.dotted_name()?;
            self.eat(Token::Semi);
        }
        while self.at(Token::Import) {
            self.import()?;
        }

        let mut classes = Vec::new();
        while self.peek().is_some() {
            let (annotations, modifiers) = self.annotations_and_modifiers()?;
            match self.peek() {
                Some(Token::Interface) => {
                    classes.push(self.class(ClassKind::Interface, annotations)?);
                }
                Some(Token::Class) => {
                    let kind = if modifiers.has("abstract") || modifiers.has("sealed") {
                        ClassKind::AbstractClass
                    } else {
                        ClassKind::Class
                    };
                    classes.push(self.class(kind, annotations)?);
                }
                Some(Token::Semi) => {
                    self.bump();
                }
                Some(_) => self.skip_declaration()?,
                None => break,
            }
        }
        Ok(classes)
    }

    /// Names of the top-level types declared in this file.
    fn collect_local_types(&mut self) {
        let mut depth = 0usize;
        for window in self.tokens.windows(2) {
            match window[0].token {
                Token::LBrace => depth += 1,
                Token::RBrace => depth = depth.saturating_sub(1),
                Token::Class | Token::Interface | Token::Object if depth == 0 => {
                    if let Token::Ident(name) = window[1].token {
                        self.local_types.insert(name.to_string());
                    }
                }
                _ => {}
            }
        }
    }

    fn dotted_name(&mut self) -> Result<String> {
        let mut name = self.ident()?.to_string();
        while self.at(Token::Dot) && matches!(self.peek_at(1), Some(Token::Ident(_) | Token::QuotedIdent(_))) {
            self.bump();
            name.push('.');
            name.push_str(self.ident()?);
        }
        Ok(name)
    }

    fn import(&mut self) -> Result<()> {
        self.expect(Token::Import)?;
        let path = self.dotted_name()?;
        if self.at(Token::Dot) && self.peek_at(1) == Some(Token::Star) {
            self.bump();
            self.bump();
            self.directives.push(format!("{}.*", path));
        } else {
            let visible = if self.eat(Token::As) {
                self.ident()?.to_string()
            } else {
                path.rsplit('.').next().unwrap_or(&path).to_string()
            };
            self.imports.insert(visible, path.clone());
            self.directives.push(path);
        }
        self.eat(Token::Semi);
        Ok(())
    }

    // ── declarations ──────────────────────────────────────────────────

    fn class(&mut self, kind: ClassKind, annotations: Vec<Annotation>) -> Result<ClassDecl> {
        self.bump();
        let name = self.ident()?.to_string();
        let scope = self.type_params.len();
        if self.at(Token::Lt) {
            let params = self.type_parameters()?;
            self.type_params.extend(params);
        }

        // Primary constructor, possibly with modifiers and `constructor`.
        let save = self.pos;
        self.annotations_and_modifiers()?;
        if self.at_ident("constructor") {
            self.bump();
        }
        if self.at(Token::LParen) {
            self.skip_balanced()?;
        } else {
            self.pos = save;
        }

        let mut supertypes = Vec::new();
        if self.eat(Token::Colon) {
            loop {
                self.annotations_and_modifiers()?;
                let supertype = self.parse_type()?;
                supertypes.push(supertype.non_null());
                if self.at(Token::LParen) {
                    self.skip_balanced()?;
                }
                if self.at_ident("by") {
                    self.bump();
                    self.skip_expression(ExprEnd::Supertype)?;
                }
                if !self.eat(Token::Comma) {
                    break;
                }
            }
        }
        if self.at_ident("where") {
            self.bump();
            self.type_constraints()?;
        }

        let mut decl = ClassDecl::new(self.package.clone(), name, kind);
        decl.supertypes = supertypes;
        decl.imports = self.directives.clone();
        decl.meta = self.class_meta(&annotations)?;
        if self.at(Token::LBrace) {
            self.class_body(&mut decl)?;
        }
        self.type_params.truncate(scope);
        Ok(decl)
    }

    fn class_body(&mut self, decl: &mut ClassDecl) -> Result<()> {
        self.expect(Token::LBrace)?;
        loop {
            match self.peek() {
                Some(Token::RBrace) => {
                    self.bump();
                    return Ok(());
                }
                Some(Token::Semi) => {
                    self.bump();
                }
                Some(_) => self.member(decl)?,
                None => return Err(self.unexpected("`}`")),
            }
        }
    }

    fn member(&mut self, decl: &mut ClassDecl) -> Result<()> {
        let (annotations, modifiers) = self.annotations_and_modifiers()?;
        match self.peek() {
            Some(Token::Val) | Some(Token::Var) => {
                if let Some(property) = self.property(decl.kind, &annotations, &modifiers)? {
                    decl.properties.push(property);
                }
            }
            Some(Token::Fun) => {
                if let Some(function) = self.function(decl.kind, &annotations, &modifiers)? {
                    decl.functions.push(function);
                }
            }
            Some(Token::Class) | Some(Token::Interface) | Some(Token::Object) => {
                self.skip_declaration()?;
            }
            Some(Token::Ident("init")) | Some(Token::Ident("constructor")) => {
                self.skip_declaration()?;
            }
            Some(Token::RBrace) => {}
            _ => return Err(self.unexpected("a member declaration")),
        }
        Ok(())
    }

    fn property(
        &mut self,
        kind: ClassKind,
        annotations: &[Annotation],
        modifiers: &Modifiers<'_>,
    ) -> Result<Option<PropertyDecl>> {
        let mutable = self.bump() == Some(Token::Var);
        let scope = self.type_params.len();
        if self.at(Token::Lt) {
            let params = self.type_parameters()?;
            self.type_params.extend(params);
        }
        let (name, is_extension) = self.member_name()?;
        let ty = if self.eat(Token::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };

        let mut has_initializer = false;
        if self.at(Token::Eq) || self.at_ident("by") {
            self.bump();
            self.skip_expression(ExprEnd::Member)?;
            has_initializer = true;
        }
        let has_getter = self.accessors()?;
        self.eat(Token::Semi);
        self.type_params.truncate(scope);

        let Some(ty) = ty else {
            return Ok(None);
        };
        if is_extension {
            log::debug!("skipping extension property `{}`", name);
            return Ok(None);
        }

        let is_abstract = match kind {
            ClassKind::Interface => !has_initializer && !has_getter,
            ClassKind::AbstractClass | ClassKind::Class => modifiers.has("abstract"),
        };
        let meta = self.property_meta(annotations)?;
        Ok(Some(PropertyDecl {
            name,
            ty,
            mutable,
            is_abstract,
            meta,
        }))
    }

    /// Skip `get()`/`set(value)` accessors; returns whether a getter has a body.
    fn accessors(&mut self) -> Result<bool> {
        let mut getter_body = false;
        loop {
            let save = self.pos;
            self.annotations_and_modifiers()?;
            let is_getter = self.at_ident("get");
            if !(is_getter || self.at_ident("set")) {
                self.pos = save;
                return Ok(getter_body);
            }
            self.bump();
            if self.at(Token::LParen) {
                self.skip_balanced()?;
            }
            if self.eat(Token::Colon) {
                self.parse_type()?;
            }
            let has_body = if self.eat(Token::Eq) {
                self.skip_expression(ExprEnd::Member)?;
                true
            } else if self.at(Token::LBrace) {
                self.skip_balanced()?;
                true
            } else {
                false
            };
            getter_body |= is_getter && has_body;
            self.eat(Token::Semi);
        }
    }

    fn function(
        &mut self,
        kind: ClassKind,
        annotations: &[Annotation],
        modifiers: &Modifiers<'_>,
    ) -> Result<Option<FunctionDecl>> {
        self.expect(Token::Fun)?;
        let scope = self.type_params.len();
        let type_parameters = if self.at(Token::Lt) {
            self.type_parameters()?
        } else {
            Vec::new()
        };
        self.type_params.extend(type_parameters.iter().cloned());

        let (name, is_extension) = self.member_name()?;
        let parameters = self.parameters()?;
        let declared_return = if self.eat(Token::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        if self.at_ident("where") {
            self.bump();
            self.type_constraints()?;
        }

        let (has_body, expression_body) = if self.eat(Token::Eq) {
            self.skip_expression(ExprEnd::Member)?;
            (true, true)
        } else if self.at(Token::LBrace) {
            self.skip_balanced()?;
            (true, false)
        } else {
            (false, false)
        };
        self.eat(Token::Semi);
        self.type_params.truncate(scope);

        if is_extension {
            log::debug!("skipping extension function `{}`", name);
            return Ok(None);
        }

        // Without `: T` a block body or no body means Unit; an expression
        // body has an inferred type we cannot know.
        let return_type = match declared_return {
            Some(ty) => Some(ty),
            None if expression_body => None,
            None => Some(TypeRef::unit()),
        };
        let is_abstract = match kind {
            ClassKind::Interface => !has_body,
            ClassKind::AbstractClass | ClassKind::Class => modifiers.has("abstract"),
        };
        let meta = self.function_meta(annotations)?;
        Ok(Some(FunctionDecl {
            name,
            type_parameters,
            parameters,
            return_type,
            is_abstract,
            is_override: modifiers.has("override"),
            meta,
        }))
    }

    /// Member name, possibly after a receiver type (`Foo.bar`).
    fn member_name(&mut self) -> Result<(String, bool)> {
        let mut is_extension = false;
        loop {
            let name = self.ident()?.to_string();
            if self.at(Token::Lt) {
                self.type_arguments()?;
            }
            while self.eat(Token::Question) {}
            if self.eat(Token::Dot) {
                is_extension = true;
                continue;
            }
            return Ok((name, is_extension));
        }
    }

    fn parameters(&mut self) -> Result<Vec<ParameterDecl>> {
        self.expect(Token::LParen)?;
        let mut parameters = Vec::new();
        loop {
            if self.eat(Token::RParen) {
                break;
            }
            let (annotations, modifiers) = self.annotations_and_modifiers()?;
            let name = self.ident()?.to_string();
            self.expect(Token::Colon)?;
            let ty = self.parse_type()?;
            if self.eat(Token::Eq) {
                self.skip_expression(ExprEnd::Argument)?;
            }
            parameters.push(ParameterDecl {
                name: Some(name),
                ty,
                vararg: modifiers.has("vararg"),
                meta: self.parameter_meta(&annotations)?,
            });
            if !self.eat(Token::Comma) {
                self.expect(Token::RParen)?;
                break;
            }
        }
        Ok(parameters)
    }

    fn type_parameters(&mut self) -> Result<Vec<String>> {
        self.expect(Token::Lt)?;
        let mut params = Vec::new();
        loop {
            self.annotations_and_modifiers()?;
            if self.at_ident("in") || self.at_ident("out") {
                self.bump();
            }
            params.push(self.ident()?.to_string());
            if self.eat(Token::Colon) {
                self.parse_type()?;
            }
            if !self.eat(Token::Comma) {
                break;
            }
        }
        self.expect(Token::Gt)?;
        Ok(params)
    }

    fn type_constraints(&mut self) -> Result<()> {
        loop {
            self.ident()?;
            self.expect(Token::Colon)?;
            self.parse_type()?;
            if !self.eat(Token::Comma) {
                return Ok(());
            }
        }
    }

    // ── types ─────────────────────────────────────────────────────────

    fn parse_type(&mut self) -> Result<TypeRef> {
        while self.at(Token::At) {
            self.annotation()?;
        }
        if self.at_ident("suspend") {
            self.bump();
        }
        let mut ty = if self.at(Token::LParen) {
            self.parenthesized_type()?
        } else {
            self.type_reference()?
        };
        while self.eat(Token::Question) {
            ty.nullable = true;
        }
        Ok(ty)
    }

    fn type_reference(&mut self) -> Result<TypeRef> {
        let start = self.tokens.get(self.pos).map_or(self.source.len(), |s| s.span.start);
        let mut segments = vec![self.ident()?.to_string()];
        let mut arguments = Vec::new();
        loop {
            if self.at(Token::Lt) {
                arguments = self.type_arguments()?;
            }
            match (self.peek(), self.peek_at(1)) {
                (Some(Token::Dot), Some(Token::Ident(_) | Token::QuotedIdent(_))) => {
                    self.bump();
                    segments.push(self.ident()?.to_string());
                    arguments.clear();
                }
                (Some(Token::Dot), Some(Token::LParen)) => {
                    return Err(self.error_at(start, "function types with a receiver are not supported"));
                }
                _ => break,
            }
        }
        Ok(TypeRef::new(self.resolve_name(&segments)).with_args(arguments))
    }

    /// `(T)` or a function type `(A, B) -> R`, read as `kotlin.FunctionN`.
    fn parenthesized_type(&mut self) -> Result<TypeRef> {
        self.expect(Token::LParen)?;
        let mut params = Vec::new();
        while !self.at(Token::RParen) {
            if matches!(self.peek(), Some(Token::Ident(_))) && self.peek_at(1) == Some(Token::Colon) {
                self.bump();
                self.bump();
            }
            params.push(self.parse_type()?);
            if !self.eat(Token::Comma) {
                break;
            }
        }
        self.expect(Token::RParen)?;
        if self.eat(Token::Arrow) {
            let result = self.parse_type()?;
            let arity = params.len();
            let mut arguments: Vec<TypeArg> = params.into_iter().map(TypeArg::invariant).collect();
            arguments.push(TypeArg::invariant(result));
            return Ok(TypeRef::new(format!("kotlin.Function{}", arity)).with_args(arguments));
        }
        match params.pop() {
            Some(inner) if params.is_empty() => Ok(inner),
            _ => Err(self.unexpected("`->`")),
        }
    }

    fn type_arguments(&mut self) -> Result<Vec<TypeArg>> {
        self.expect(Token::Lt)?;
        let mut arguments = Vec::new();
        loop {
            if self.eat(Token::Star) {
                arguments.push(TypeArg::Star);
            } else {
                let followed_by_type = !matches!(self.peek_at(1), Some(Token::Comma | Token::Gt));
                let variance = if self.at_ident("out") && followed_by_type {
                    self.bump();
                    Variance::Out
                } else if self.at_ident("in") && followed_by_type {
                    self.bump();
                    Variance::In
                } else {
                    Variance::Invariant
                };
                let ty = self.parse_type()?;
                arguments.push(TypeArg::Type { variance, ty });
            }
            if !self.eat(Token::Comma) {
                break;
            }
        }
        self.expect(Token::Gt)?;
        Ok(arguments)
    }

    fn resolve_name(&self, segments: &[String]) -> String {
        let first = segments[0].as_str();
        let rest: String = segments[1..].iter().map(|s| format!(".{}", s)).collect();

        if segments.len() == 1 && self.type_params.iter().any(|p| p == first) {
            return first.to_string();
        }
        if let Some(qualified) = self.imports.get(first) {
            return format!("{}{}", qualified, rest);
        }
        if self.local_types.contains(first) {
            return self.in_package(&format!("{}{}", first, rest));
        }
        if segments.len() > 1 && first.starts_with(|c: char| c.is_ascii_lowercase()) {
            return segments.join(".");
        }
        if let Some((_, package)) = DEFAULT_IMPORTS.iter().find(|(name, _)| *name == first) {
            return format!("{}.{}{}", package, first, rest);
        }
        self.in_package(&format!("{}{}", first, rest))
    }

    fn in_package(&self, name: &str) -> String {
        if self.package.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.package, name)
        }
    }

    // ── annotations and modifiers ─────────────────────────────────────

    fn annotations_and_modifiers(&mut self) -> Result<(Vec<Annotation>, Modifiers<'a>)> {
        let mut annotations = Vec::new();
        let mut modifiers = Modifiers::default();
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(Token::At), _) => annotations.push(self.annotation()?),
                (Some(Token::Vararg), _) => {
                    self.bump();
                    modifiers.0.push("vararg");
                }
                // `fun interface`
                (Some(Token::Fun), Some(Token::Interface)) => {
                    self.bump();
                }
                (Some(Token::Ident(word)), next) if is_modifier(word) && is_modifier_follower(next) => {
                    self.bump();
                    modifiers.0.push(word);
                }
                _ => return Ok((annotations, modifiers)),
            }
        }
    }

    fn annotation(&mut self) -> Result<Annotation> {
        let span = self.tokens.get(self.pos).map_or(
            Span {
                start: self.source.len(),
                end: self.source.len(),
            },
            |s| s.span,
        );
        self.expect(Token::At)?;
        // Use-site target: `@get:JvmName(...)`.
        if matches!(self.peek(), Some(Token::Ident(_))) && self.peek_at(1) == Some(Token::Colon) {
            self.bump();
            self.bump();
        }
        if self.at(Token::LBracket) {
            self.skip_balanced()?;
            return Ok(Annotation {
                name: String::new(),
                args: Vec::new(),
                span,
            });
        }
        let path = self.dotted_name()?;
        let name = path.rsplit('.').next().unwrap_or(&path).to_string();
        if self.at(Token::Lt) {
            self.type_arguments()?;
        }
        let args = if self.at(Token::LParen) && !self.newline_before() {
            self.annotation_args()?
        } else {
            Vec::new()
        };
        Ok(Annotation { name, args, span })
    }

    fn annotation_args(&mut self) -> Result<Vec<(Option<String>, AnnotationValue)>> {
        self.expect(Token::LParen)?;
        let mut args = Vec::new();
        loop {
            if self.eat(Token::RParen) {
                break;
            }
            let name = match (self.peek(), self.peek_at(1)) {
                (Some(Token::Ident(name)), Some(Token::Eq)) => {
                    self.bump();
                    self.bump();
                    Some(name.to_string())
                }
                _ => None,
            };
            let value = self.annotation_value()?;
            args.push((name, value));
            if !self.eat(Token::Comma) {
                self.expect(Token::RParen)?;
                break;
            }
        }
        Ok(args)
    }

    fn annotation_value(&mut self) -> Result<AnnotationValue> {
        let value = match self.peek() {
            Some(Token::Str(_)) | Some(Token::RawStr(_)) => {
                let mut text = self.string_literal()?;
                while matches!(self.peek(), Some(Token::Op("+")))
                    && matches!(self.peek_at(1), Some(Token::Str(_) | Token::RawStr(_)))
                {
                    self.bump();
                    text.push_str(&self.string_literal()?);
                }
                AnnotationValue::Str(text)
            }
            Some(Token::True) => {
                self.bump();
                AnnotationValue::Bool(true)
            }
            Some(Token::False) => {
                self.bump();
                AnnotationValue::Bool(false)
            }
            Some(Token::Ident(_)) if !matches!(self.peek_at(1), Some(Token::LParen)) => {
                let path = self.dotted_name()?;
                AnnotationValue::Ref(path)
            }
            _ => AnnotationValue::Other,
        };
        if !matches!(self.peek(), Some(Token::Comma | Token::RParen)) {
            self.skip_expression(ExprEnd::Argument)?;
            return Ok(AnnotationValue::Other);
        }
        Ok(value)
    }

    fn string_literal(&mut self) -> Result<String> {
        let offset = self.tokens.get(self.pos).map_or(0, |s| s.span.start);
        match self.bump() {
            Some(Token::RawStr(s)) => Ok(s.to_string()),
            Some(Token::Str(s)) => {
                unescape(&s[1..s.len() - 1]).ok_or_else(|| self.error_at(offset, "invalid escape sequence"))
            }
            _ => Err(self.error_at(offset, "expected a string literal")),
        }
    }

    // ── skipping ──────────────────────────────────────────────────────

    /// Skip an opening delimiter and everything up to its match.
    fn skip_balanced(&mut self) -> Result<()> {
        let start = self.tokens.get(self.pos).map_or(self.source.len(), |s| s.span.start);
        let mut depth = 0usize;
        while let Some(token) = self.bump() {
            match token {
                Token::LParen | Token::LBracket | Token::LBrace => depth += 1,
                Token::RParen | Token::RBracket | Token::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
        Err(self.error_at(start, "unbalanced delimiter"))
    }

    fn skip_expression(&mut self, end: ExprEnd) -> Result<()> {
        let mut depth = 0usize;
        let mut previous: Option<Token<'a>> = None;
        while let Some(spanned) = self.tokens.get(self.pos).copied() {
            let token = spanned.token;
            if depth == 0 {
                let stop = match token {
                    Token::Semi | Token::RBrace | Token::RParen | Token::RBracket => true,
                    Token::Comma => end != ExprEnd::Member,
                    Token::LBrace => end == ExprEnd::Supertype,
                    _ => false,
                };
                let line_ends = end != ExprEnd::Argument
                    && previous.is_some()
                    && spanned.newline_before
                    && !continues_line(previous, token);
                if stop || line_ends {
                    break;
                }
            }
            match token {
                Token::LParen | Token::LBracket | Token::LBrace => depth += 1,
                Token::RParen | Token::RBracket | Token::RBrace => depth = depth.saturating_sub(1),
                _ => {}
            }
            previous = Some(token);
            self.pos += 1;
        }
        Ok(())
    }

    /// Skip a declaration this reader does not model (top-level functions,
    /// objects, nested classes, `init` blocks).
    fn skip_declaration(&mut self) -> Result<()> {
        let mut depth = 0usize;
        let mut previous = self.bump();
        while let Some(spanned) = self.tokens.get(self.pos).copied() {
            let token = spanned.token;
            if depth == 0 {
                if token == Token::RBrace {
                    break;
                }
                if token == Token::Semi {
                    self.pos += 1;
                    break;
                }
                if spanned.newline_before
                    && starts_declaration(token)
                    && !continues_line(previous, token)
                {
                    break;
                }
            }
            match token {
                Token::LParen | Token::LBracket | Token::LBrace => depth += 1,
                Token::RParen | Token::RBracket | Token::RBrace => depth = depth.saturating_sub(1),
                _ => {}
            }
            previous = Some(token);
            self.pos += 1;
        }
        if depth > 0 {
            return Err(self.unexpected("a closing delimiter"));
        }
        Ok(())
    }

    // ── annotation metadata ───────────────────────────────────────────

    fn class_meta(&self, annotations: &[Annotation]) -> Result<Option<ClassMeta>> {
        let Some(annotation) = find(annotations, names::ANNOTATION_CLASS) else {
            return Ok(None);
        };
        let mut meta = ClassMeta::default();
        for (key, value) in self.arguments(annotation, CLASS_ARGS)? {
            match key {
                "outputClassName" => meta.output_class_name = self.string_arg(annotation, key, value)?,
                "outputFilename" => meta.output_filename = self.string_arg(annotation, key, value)?,
                "outputFileEncoding" => {
                    meta.output_file_encoding = self.string_arg(annotation, key, value)?
                }
                "primaryConstructor" => {
                    meta.primary_constructor = match value {
                        AnnotationValue::Str(s) | AnnotationValue::Ref(s) => s.clone(),
                        _ => return Err(self.bad_arg(annotation, key, "a string")),
                    }
                }
                _ => meta.class_doc = self.string_arg(annotation, key, value)?,
            }
        }
        Ok(Some(meta))
    }

    fn property_meta(&self, annotations: &[Annotation]) -> Result<Option<PropertyMeta>> {
        let Some(annotation) = find(annotations, names::ANNOTATION_PROPERTY) else {
            return Ok(None);
        };
        let mut meta = PropertyMeta::default();
        for (key, value) in self.arguments(annotation, PROPERTY_ARGS)? {
            match key {
                "jsMemberName" => meta.js_member_name = self.string_arg(annotation, key, value)?,
                "skip" => meta.skip = self.bool_arg(annotation, key, value)?,
                "undefinedAsNull" => meta.undefined_as_null = self.bool_arg(annotation, key, value)?,
                "raiseExceptionOnUndefined" => {
                    meta.raise_exception_on_undefined = self.bool_arg(annotation, key, value)?
                }
                "getterTypeMappingStrategy" => {
                    meta.getter_strategy = self.strategy_arg(annotation, key, value)?
                }
                _ => meta.setter_strategy = self.strategy_arg(annotation, key, value)?,
            }
        }
        Ok(Some(meta))
    }

    fn function_meta(&self, annotations: &[Annotation]) -> Result<Option<FunctionMeta>> {
        let Some(annotation) = find(annotations, names::ANNOTATION_FUNCTION) else {
            return Ok(None);
        };
        let mut meta = FunctionMeta::default();
        for (key, value) in self.arguments(annotation, FUNCTION_ARGS)? {
            match key {
                "jsMemberName" => meta.js_member_name = self.string_arg(annotation, key, value)?,
                "skip" => meta.skip = self.bool_arg(annotation, key, value)?,
                "undefinedAsNull" => meta.undefined_as_null = self.bool_arg(annotation, key, value)?,
                "raiseExceptionOnUndefined" => {
                    meta.raise_exception_on_undefined = self.bool_arg(annotation, key, value)?
                }
                _ => meta.return_strategy = self.strategy_arg(annotation, key, value)?,
            }
        }
        Ok(Some(meta))
    }

    fn parameter_meta(&self, annotations: &[Annotation]) -> Result<Option<ParameterMeta>> {
        let Some(annotation) = find(annotations, names::ANNOTATION_PARAMETER) else {
            return Ok(None);
        };
        let mut meta = ParameterMeta::default();
        for (key, value) in self.arguments(annotation, PARAMETER_ARGS)? {
            meta.strategy = self.strategy_arg(annotation, key, value)?;
        }
        Ok(Some(meta))
    }

    /// Pair each argument with its parameter name. Older argument names
    /// (`getterTypeCast`, `typeCast`, ...) map to the current ones.
    fn arguments<'n>(
        &self,
        annotation: &'n Annotation,
        params: &[&'static str],
    ) -> Result<Vec<(&'static str, &'n AnnotationValue)>> {
        let mut out = Vec::new();
        for (index, (name, value)) in annotation.args.iter().enumerate() {
            let key = match name.as_deref() {
                Some(name) => {
                    let name = match name {
                        "getterTypeCast" => "getterTypeMappingStrategy",
                        "setterTypeCast" => "setterTypeMappingStrategy",
                        "typeCast" => "typeMappingStrategy",
                        other => other,
                    };
                    params.iter().copied().find(|p| *p == name)
                }
                None => params.get(index).copied(),
            };
            match key {
                Some(key) => out.push((key, value)),
                None => {
                    return Err(self.error_at(
                        annotation.span.start,
                        format!(
                            "unknown argument {} for @{}",
                            name.as_deref().map_or_else(|| format!("#{}", index + 1), |n| format!("`{}`", n)),
                            annotation.name
                        ),
                    ))
                }
            }
        }
        Ok(out)
    }

    fn bad_arg(&self, annotation: &Annotation, key: &str, expected: &str) -> Error {
        self.error_at(
            annotation.span.start,
            format!("@{}: `{}` must be {}", annotation.name, key, expected),
        )
    }

    fn string_arg(&self, annotation: &Annotation, key: &str, value: &AnnotationValue) -> Result<String> {
        match value {
            AnnotationValue::Str(s) => Ok(s.clone()),
            AnnotationValue::Ref(r) => Err(self.error_at(
                annotation.span.start,
                format!("@{}: cannot evaluate constant `{}` for `{}`", annotation.name, r, key),
            )),
            _ => Err(self.bad_arg(annotation, key, "a string literal")),
        }
    }

    fn bool_arg(&self, annotation: &Annotation, key: &str, value: &AnnotationValue) -> Result<bool> {
        match value {
            AnnotationValue::Bool(b) => Ok(*b),
            _ => Err(self.bad_arg(annotation, key, "`true` or `false`")),
        }
    }

    fn strategy_arg(&self, annotation: &Annotation, key: &str, value: &AnnotationValue) -> Result<String> {
        match value {
            AnnotationValue::Str(s) => Ok(s.clone()),
            AnnotationValue::Ref(r) => MappingStrategy::constant_token(r)
                .map(str::to_string)
                .ok_or_else(|| {
                    self.error_at(
                        annotation.span.start,
                        format!("@{}: unknown type mapping strategy constant `{}`", annotation.name, r),
                    )
                }),
            _ => Err(self.bad_arg(annotation, key, "a strategy string or constant")),
        }
    }
}

fn is_modifier(word: &str) -> bool {
    MODIFIERS.iter().any(|m| *m == word)
}

fn find<'n>(annotations: &'n [Annotation], name: &str) -> Option<&'n Annotation> {
    annotations.iter().find(|a| a.name == name)
}

/// Whether a word that could be a modifier is used as one here, judging by
/// the token after it (`open: Boolean` is a parameter named `open`).
fn is_modifier_follower(next: Option<Token<'_>>) -> bool {
    !matches!(
        next,
        None | Some(
            Token::Colon
                | Token::Eq
                | Token::LParen
                | Token::RParen
                | Token::Comma
                | Token::Dot
                | Token::Lt
                | Token::Question
        )
    )
}

fn starts_declaration(token: Token<'_>) -> bool {
    match token {
        Token::At
        | Token::Val
        | Token::Var
        | Token::Fun
        | Token::Class
        | Token::Interface
        | Token::Object
        | Token::Import => true,
        Token::Ident(word) => {
            is_modifier(word) || matches!(word, "typealias" | "init" | "constructor")
        }
        _ => false,
    }
}

/// Whether `next`, at the start of a new line, still belongs to the
/// expression that `previous` was part of.
fn continues_line(previous: Option<Token<'_>>, next: Token<'_>) -> bool {
    let next_continues = match next {
        Token::Dot | Token::Question | Token::Arrow | Token::As | Token::Op(_) | Token::Colon => true,
        Token::Ident(word) => matches!(word, "else" | "catch" | "finally" | "is" | "in"),
        _ => false,
    };
    let previous_continues = matches!(
        previous,
        Some(
            Token::Dot
                | Token::Op(_)
                | Token::Eq
                | Token::Comma
                | Token::LParen
                | Token::Arrow
                | Token::As
                | Token::Question
                | Token::Colon
                | Token::Lt
        )
    );
    next_continues || previous_continues
}

fn unescape(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            '\\' => out.push('\\'),
            '$' => out.push('$'),
            'u' => {
                let hex: String = chars.by_ref().take(4).collect();
                out.push(char::from_u32(u32::from_str_radix(&hex, 16).ok()?)?);
            }
            _ => return None,
        }
    }
    Some(out)
}

impl CodeGenerator {
    /// Parse a Kotlin source file and add every class it declares.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let mut generator = CodeGenerator::new();
    /// generator.add_source_file("src/main/kotlin/com/example/JsPoint.kt")?;
    /// ```
    pub fn add_source_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        for class in parse_source(&source, path)? {
            self.add_class(class);
        }
        Ok(self)
    }

    /// Parse Kotlin source code from a string.
    pub fn add_source_str(&mut self, source: &str) -> Result<&mut Self> {
        for class in parse_source(source, Path::new("<string>"))? {
            self.add_class(class);
        }
        Ok(self)
    }

    /// Parse every `.kt` file under a directory, recursively.
    pub fn add_source_dir(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        for entry in WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.extension().map(|e| e == "kt").unwrap_or(false) {
                self.add_source_file(path)?;
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Vec<ClassDecl> {
        parse_source(source, Path::new("Test.kt")).unwrap()
    }

    const POINT: &str = r#"
package com.example.js

import com.github.zimolab.jow.annotation.obj.JsObjectClass
import com.github.zimolab.jow.annotation.obj.JsObjectFunction
import com.github.zimolab.jow.annotation.obj.JsObjectProperty
import com.github.zimolab.jow.core.JsObjectWrapper
import netscape.javascript.JSObject

/** A point on the page. */
@JsObjectClass(outputClassName = "JsPointBase")
interface JsPoint : JsObjectWrapper {
    var x: Double
    @JsObjectProperty(jsMemberName = "y_coord", undefinedAsNull = false)
    var y: Double?
    val raw: JSObject
    val label: String
        get() = "point"

    fun plus(other: JsPoint): JsPoint
    @JsObjectFunction(skip = true)
    fun <R> apply(block: (JsPoint) -> R): R
    override fun toString(): String
    fun describe(): String {
        return "($x, $y)"
    }
}
"#;

    #[test]
    fn test_parse_annotated_interface() {
        let classes = parse(POINT);
        assert_eq!(classes.len(), 1);
        let class = &classes[0];
        assert_eq!(class.qualified_name(), "com.example.js.JsPoint");
        assert_eq!(class.kind, ClassKind::Interface);
        assert_eq!(class.supertypes, vec![TypeRef::new(names::JS_OBJECT_WRAPPER)]);
        let meta = class.meta.as_ref().unwrap();
        assert_eq!(meta.output_class_name, "JsPointBase");
        assert_eq!(meta.output_file_encoding, "UTF-8");
        assert!(class.imports.contains(&names::JS_OBJECT.to_string()));
    }

    #[test]
    fn test_parse_properties() {
        let class = &parse(POINT)[0];
        let members: Vec<_> = class.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(members, vec!["x", "y", "raw", "label"]);

        let x = &class.properties[0];
        assert!(x.mutable && x.is_abstract);
        assert_eq!(x.ty, TypeRef::new("kotlin.Double"));
        assert!(x.meta.is_none());

        let y = &class.properties[1];
        assert!(y.ty.nullable);
        let meta = y.meta.as_ref().unwrap();
        assert_eq!(meta.js_member_name, "y_coord");
        assert!(!meta.undefined_as_null);

        assert_eq!(class.properties[2].ty, TypeRef::new(names::JS_OBJECT));
        assert!(!class.properties[3].is_abstract);
    }

    #[test]
    fn test_parse_functions() {
        let class = &parse(POINT)[0];
        let members: Vec<_> = class.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(members, vec!["plus", "apply", "toString", "describe"]);

        let plus = &class.functions[0];
        assert_eq!(plus.parameters.len(), 1);
        assert_eq!(plus.parameters[0].ty, TypeRef::new("com.example.js.JsPoint"));
        assert_eq!(plus.return_type, Some(TypeRef::new("com.example.js.JsPoint")));

        let apply = &class.functions[1];
        assert_eq!(apply.type_parameters, vec!["R".to_string()]);
        assert!(apply.meta.as_ref().unwrap().skip);
        assert_eq!(apply.return_type, Some(TypeRef::new("R")));
        let block = &apply.parameters[0].ty;
        assert_eq!(block.qualified_name, "kotlin.Function1");
        assert_eq!(block.to_kotlin(), "Function1<JsPoint, R>");

        assert!(class.functions[2].is_override);
        assert!(class.functions[2].is_abstract);
        assert!(!class.functions[3].is_abstract);
    }

    #[test]
    fn test_parse_parameter_annotations_and_varargs() {
        let source = r#"
package com.example
import com.github.zimolab.jow.annotation.obj.JsObjectParameter
import com.github.zimolab.jow.annotation.obj.typemapping.TypeMappingStrategy.Companion.AUTO_GENERATE
import com.github.zimolab.jsarray.base.JsArray
import java.util.*

interface JsDate : com.github.zimolab.jow.core.JsObjectWrapper {
    fun test5(@JsObjectParameter(AUTO_GENERATE) b: JsArray<Any?>?, @JsObjectParameter(typeMappingStrategy = "no-mapping") vararg dates: Date?)
    fun test6(count: Int = 1, vararg values: Int)
}
"#;
        let class = &parse(source)[0];
        assert_eq!(class.supertypes[0].qualified_name, names::JS_OBJECT_WRAPPER);
        assert!(class.imports.contains(&"java.util.*".to_string()));

        let test5 = &class.functions[0];
        assert_eq!(test5.return_type, Some(TypeRef::unit()));
        let b = &test5.parameters[0];
        assert_eq!(b.ty.qualified_name, names::JS_ARRAY);
        assert_eq!(b.ty.to_kotlin(), "JsArray<Any?>?");
        assert_eq!(b.meta.as_ref().unwrap().strategy, "auto-gen");
        let dates = &test5.parameters[1];
        assert!(dates.vararg);
        assert_eq!(dates.meta.as_ref().unwrap().strategy, "no-mapping");
        assert_eq!(dates.ty.simple_name(), "Date");

        let test6 = &class.functions[1];
        assert_eq!(test6.parameters.len(), 2);
        assert!(test6.parameters[1].vararg);
        assert!(test6.parameters[0].meta.is_none());
    }

    #[test]
    fn test_legacy_argument_names() {
        let source = r#"
interface JsThing {
    @JsObjectProperty(getterTypeCast = "auto-gen", setterTypeCast = TypeMappingStrategy.NO_CAST)
    var value: Any?
}
"#;
        let class = &parse(source)[0];
        let meta = class.properties[0].meta.as_ref().unwrap();
        assert_eq!(meta.getter_strategy, "auto-gen");
        assert_eq!(meta.setter_strategy, "no-mapping");
    }

    #[test]
    fn test_star_projection_and_variance() {
        let source = r#"
interface JsList {
    val items: Map<String, out List<*>>
}
"#;
        let ty = &parse(source)[0].properties[0].ty;
        assert_eq!(ty.qualified_name, "kotlin.collections.Map");
        assert_eq!(ty.to_kotlin(), "Map<String, out List<*>>");
    }

    #[test]
    fn test_skips_top_level_noise() {
        let source = r#"
package com.example

const val VERSION = "1.0"

fun helper(x: Int): Int =
    x + 1

object Registry {
    val items = mutableListOf<String>()
}

abstract class Base : com.github.zimolab.jow.core.JsObjectWrapper {
    abstract val id: Int
    val name: String = "base"
    init {
        println("init")
    }
}

class Plain(val x: Int) : Base()
"#;
        let classes = parse(source);
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0].kind, ClassKind::AbstractClass);
        assert_eq!(classes[0].properties.len(), 2);
        assert!(classes[0].properties[0].is_abstract);
        assert!(!classes[0].properties[1].is_abstract);
        assert_eq!(classes[1].kind, ClassKind::Class);
        assert_eq!(classes[1].supertypes, vec![TypeRef::new("com.example.Base")]);
    }

    #[test]
    fn test_class_doc_concatenation() {
        let source = r#"
@JsObjectClass(classDoc = "First line. " + "Second line.", primaryConstructor = JsObjectClass.PrimaryConstructor.None)
interface JsDoc
"#;
        let meta = parse(source)[0].meta.clone().unwrap();
        assert_eq!(meta.class_doc, "First line. Second line.");
        assert_eq!(meta.primary_constructor, "JsObjectClass.PrimaryConstructor.None");
    }

    #[test]
    fn test_unknown_strategy_constant_is_error() {
        let source = r#"
interface JsThing {
    @JsObjectFunction(returnTypeMappingStrategy = SOMETHING)
    fun go(): Int
}
"#;
        let err = parse_source(source, Path::new("JsThing.kt")).unwrap_err();
        match err {
            Error::Parse { line, message, .. } => {
                assert_eq!(line, 3);
                assert!(message.contains("SOMETHING"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_syntax_error_has_location() {
        let err = parse_source("interface Broken {\n    val x Int\n}", Path::new("Broken.kt")).unwrap_err();
        match err {
            Error::Parse { file, line, column, .. } => {
                assert_eq!(file, Path::new("Broken.kt"));
                assert_eq!(line, 2);
                assert_eq!(column, 11);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r#"a\"b\nA"#).as_deref(), Some("a\"b\nA"));
        assert_eq!(unescape(r"\q"), None);
    }
}
