//! Kotlin code generator for annotated JavaScript object interfaces.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::classify::{TypeClassifier, TypeHierarchy};
use crate::decl::{ClassDecl, ClassKind};
use crate::diagnostics::{Diagnostics, LogDiagnostics};
use crate::emit::ClassAssembler;
use crate::error::{Error, Result};
use crate::mapping::TypeMapper;
use crate::naming::{NameGenerator, Verb};

/// Option key for the prefix of derived output class names.
pub const OPTION_OUTPUT_CLASS_PREFIX: &str = "output_class_prefix";
/// Option key for the suffix of derived output class names.
pub const OPTION_OUTPUT_CLASS_SUFFIX: &str = "output_class_suffix";
/// Option key for the conversion verb, `cast` or `mapping`.
pub const OPTION_MAPPING_VERB: &str = "mapping_verb";

/// Code generator that collects interface declarations and outputs one
/// Kotlin wrapper class per `@JsObjectClass` interface.
#[derive(Debug)]
pub struct CodeGenerator {
    /// Annotated classes: qualified name -> declaration
    classes: BTreeMap<String, ClassDecl>,

    /// Supertypes of every class seen, annotated or not
    hierarchy: TypeHierarchy,

    /// Custom header comment
    header: Option<String>,

    output_class_prefix: String,
    output_class_suffix: String,
    verb: Verb,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self {
            classes: BTreeMap::new(),
            hierarchy: TypeHierarchy::with_runtime(),
            header: None,
            output_class_prefix: "Abs".to_string(),
            output_class_suffix: String::new(),
            verb: Verb::Cast,
        }
    }
}

impl CodeGenerator {
    /// Create a new code generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom header comment for the generated files.
    pub fn set_header(&mut self, header: impl Into<String>) -> &mut Self {
        self.header = Some(header.into());
        self
    }

    /// Prefix for output class names not given by `outputClassName`.
    /// Defaults to `Abs`.
    pub fn set_output_class_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.output_class_prefix = prefix.into();
        self
    }

    /// Suffix for output class names not given by `outputClassName`.
    pub fn set_output_class_suffix(&mut self, suffix: impl Into<String>) -> &mut Self {
        self.output_class_suffix = suffix.into();
        self
    }

    /// Verb used in generated setter and parameter conversion names.
    pub fn set_verb(&mut self, verb: Verb) -> &mut Self {
        self.verb = verb;
        self
    }

    /// Declare that `ty` extends `supertype`, for types defined outside the
    /// sources given to the generator.
    ///
    /// ```rust,ignore
    /// generator.register_supertype(
    ///     "com.example.lib.JsRect",
    ///     "com.github.zimolab.jow.core.JsObjectWrapper",
    /// );
    /// ```
    pub fn register_supertype(
        &mut self,
        ty: impl Into<String>,
        supertype: impl Into<String>,
    ) -> &mut Self {
        self.hierarchy.register(ty, [supertype.into()]);
        self
    }

    /// Apply processor-style options. Unknown keys are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use jow_codegen::CodeGenerator;
    ///
    /// let options = HashMap::from([
    ///     ("output_class_prefix".to_string(), "Base".to_string()),
    ///     ("mapping_verb".to_string(), "mapping".to_string()),
    /// ]);
    /// let mut generator = CodeGenerator::new();
    /// generator.with_options(&options).unwrap();
    /// ```
    pub fn with_options(&mut self, options: &HashMap<String, String>) -> Result<&mut Self> {
        for (key, value) in options {
            match key.as_str() {
                OPTION_OUTPUT_CLASS_PREFIX => {
                    self.output_class_prefix = value.clone();
                }
                OPTION_OUTPUT_CLASS_SUFFIX => {
                    self.output_class_suffix = value.clone();
                }
                OPTION_MAPPING_VERB => {
                    self.verb = value.parse()?;
                }
                other => log::debug!("ignoring unknown option `{}`", other),
            }
        }
        Ok(self)
    }

    /// Add a class declaration.
    ///
    /// Every class contributes its supertypes to the type hierarchy. Only
    /// classes carrying `@JsObjectClass` are generated.
    ///
    /// # Example
    ///
    /// ```
    /// use jow_codegen::{ClassDecl, ClassMeta, CodeGenerator, PropertyDecl, TypeRef};
    ///
    /// let mut generator = CodeGenerator::new();
    /// generator.add_class(
    ///     ClassDecl::interface("com.example", "JsPoint")
    ///         .with_supertype(TypeRef::new("com.github.zimolab.jow.core.JsObjectWrapper"))
    ///         .with_meta(ClassMeta::default())
    ///         .with_property(PropertyDecl::var("x", TypeRef::new("kotlin.Double"))),
    /// );
    /// ```
    pub fn add_class(&mut self, class: ClassDecl) -> &mut Self {
        let name = class.qualified_name();
        self.hierarchy.register(
            name.clone(),
            class.supertypes.iter().map(|s| s.qualified_name.clone()),
        );
        if class.meta.is_none() {
            return self;
        }
        if self.classes.insert(name.clone(), class).is_some() {
            log::warn!("{} was declared more than once, keeping the last declaration", name);
        }
        self
    }

    /// Annotated classes collected so far, by qualified name.
    pub fn classes(&self) -> impl Iterator<Item = &ClassDecl> {
        self.classes.values()
    }

    /// Generate every collected class, reporting through the `log` facade.
    pub fn generate(&self) -> Generation {
        self.generate_with(&mut LogDiagnostics)
    }

    /// Generate every collected class, in qualified-name order. A class that
    /// fails is reported and left out; the others are still generated.
    ///
    /// Two classes may not share an output file or an output class in one
    /// package. The later one in name order fails.
    pub fn generate_with(&self, diagnostics: &mut dyn Diagnostics) -> Generation {
        let mapper = TypeMapper::new(
            TypeClassifier::new(self.hierarchy.clone()),
            NameGenerator::new(self.verb),
        );
        let mut generation = Generation::default();
        // Output file and output class, each mapped to the class that claimed it.
        let mut paths: HashMap<PathBuf, &str> = HashMap::new();
        let mut output_classes: HashMap<(String, String), &str> = HashMap::new();

        for (name, class) in &self.classes {
            if class.kind == ClassKind::AbstractClass {
                diagnostics.warn(&format!(
                    "{}: abstract classes are not supported yet, skipping",
                    name
                ));
                continue;
            }
            let generated = self
                .generate_class(class, &mapper, diagnostics)
                .and_then(|file| {
                    if let Some(owner) = paths.get(&file.relative_path()) {
                        return Err(Error::Configuration(format!(
                            "{}: output file {} is already generated for {}",
                            name,
                            file.relative_path().display(),
                            owner
                        )));
                    }
                    let key = (file.package.clone(), file.output_class_name.clone());
                    if let Some(owner) = output_classes.get(&key) {
                        return Err(Error::Configuration(format!(
                            "{}: output class {} is already generated for {}",
                            name, file.output_class_name, owner
                        )));
                    }
                    paths.insert(file.relative_path(), name);
                    output_classes.insert(key, name);
                    Ok(file)
                });
            match generated {
                Ok(file) => {
                    diagnostics.info(&format!(
                        "{}: generated {}",
                        name,
                        file.relative_path().display()
                    ));
                    generation.files.push(file);
                }
                Err(err) => {
                    diagnostics.error(&format!("{}: {}", name, err));
                    generation.errors.push(err);
                }
            }
        }
        generation
    }

    fn generate_class(
        &self,
        class: &ClassDecl,
        mapper: &TypeMapper,
        diagnostics: &mut dyn Diagnostics,
    ) -> Result<GeneratedFile> {
        let meta = class.resolve_meta(&self.output_class_prefix, &self.output_class_suffix)?;
        let code = ClassAssembler::new(class, &meta, mapper, diagnostics)
            .assemble(self.header.as_deref())?;
        Ok(GeneratedFile {
            class_name: class.qualified_name(),
            package: class.package.clone(),
            output_class_name: meta.output_class_name,
            file_name: format!("{}.kt", meta.output_filename),
            code,
        })
    }

    /// Generate and write every file below `dir` as
    /// `<package path>/<outputFilename>.kt`.
    ///
    /// Classes that fail are listed in the returned [`Generation`]; only I/O
    /// failures abort.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<Generation> {
        let generation = self.generate();
        for file in &generation.files {
            let path = dir.as_ref().join(file.relative_path());
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &file.code)?;
        }
        Ok(generation)
    }
}

/// One generated Kotlin file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Qualified name of the annotated interface.
    pub class_name: String,
    pub package: String,
    pub output_class_name: String,
    /// File name including the `.kt` extension.
    pub file_name: String,
    pub code: String,
}

impl GeneratedFile {
    /// Path relative to an output root, following the package.
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self.package.split('.').filter(|s| !s.is_empty()).collect();
        path.push(&self.file_name);
        path
    }

    /// Write the generated code to a writer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(self.code.as_bytes())
    }
}

/// Result of one generation run.
#[derive(Debug, Default)]
pub struct Generation {
    pub files: Vec<GeneratedFile>,
    pub errors: Vec<Error>,
}

impl Generation {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The file generated for output class `name`.
    pub fn file(&self, name: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.output_class_name == name)
    }
}
