//! Generates Kotlin wrapper classes for every annotated interface in a
//! source tree.
//!
//! Usage: `generate-wrappers [input dir] [output dir]`. Both default to the
//! sample sources and `generated/`. Set `RUST_LOG=info` to see each
//! generated class, `RUST_LOG=debug` for every conversion function.

use std::env;
use std::path::PathBuf;
use std::process;

use env_logger::{Builder, Env};
use jow_codegen::CodeGenerator;

fn main() {
    Builder::from_env(Env::default().default_filter_or("warn")).init();

    let mut args = env::args().skip(1);
    let input = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(jow_example::kotlin_dir);
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("generated"));

    let mut generator = CodeGenerator::new();
    if let Err(err) = generator.add_source_dir(&input) {
        log::error!("failed to read {}: {}", input.display(), err);
        process::exit(1);
    }

    let generation = match generator.write_to_dir(&output) {
        Ok(generation) => generation,
        Err(err) => {
            log::error!("failed to write {}: {}", output.display(), err);
            process::exit(1);
        }
    };

    for file in &generation.files {
        println!("  Wrote {}", output.join(file.relative_path()).display());
    }
    println!(
        "Generated {} wrapper(s), {} failed",
        generation.files.len(),
        generation.errors.len()
    );
    if !generation.is_ok() {
        process::exit(1);
    }
}
