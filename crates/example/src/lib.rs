//! Example crate demonstrating jow-codegen usage.
//!
//! The Kotlin interfaces under `kotlin/` are the kind of declarations a
//! JavaFX WebView application writes to talk to JavaScript objects. The
//! `generate-wrappers` binary turns them into abstract wrapper classes; the
//! tests below check the generated code for each sample.

use std::path::{Path, PathBuf};

use jow_codegen::{CodeGenerator, Result};

/// A 2D point with arithmetic implemented on the JavaScript side.
pub const JS_POINT: &str = include_str!("../kotlin/com/github/zimolab/jow/sample/simpleobject/JsPoint.kt");

/// A line segment between two [`JS_POINT`]s, with a custom output class name.
pub const JS_LINE: &str = include_str!("../kotlin/com/github/zimolab/jow/sample/simpleobject/JsLine.kt");

/// The JavaScript `Date` object, exercising every mapping strategy.
pub const JS_DATE: &str = include_str!("../kotlin/com/github/zimolab/jow/sample/JsDate.kt");

/// Directory holding the sample Kotlin sources.
pub fn kotlin_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("kotlin")
}

/// A generator loaded with every sample.
pub fn sample_generator() -> Result<CodeGenerator> {
    let mut generator = CodeGenerator::new();
    generator
        .set_header("Generated wrapper for the jow-example samples\nDO NOT EDIT MANUALLY")
        .add_source_str(JS_POINT)?
        .add_source_str(JS_LINE)?
        .add_source_str(JS_DATE)?;
    Ok(generator)
}
