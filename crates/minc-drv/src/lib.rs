//! minc-drv - Compiler driver.
//!
//! Orchestrates the pipeline (lex → parse → annotate → codegen), handles
//! the command line, and owns all file I/O. The phases themselves never
//! touch the filesystem.
//!
//! Exit codes: 0 on success, 1 on any compile error, 2 on a usage error.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use minc_gen::CodeGenError;
use minc_util::render_snippet;

/// Compiler version, from the workspace manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Help text for `--help` and usage errors.
pub const USAGE: &str = "\
Usage: mincc [OPTIONS] <input>

Arguments:
  <input>  C source file to compile, or - for standard input

Options:
  -o, --output <PATH>  Write assembly to PATH instead of standard output
      --verbose        Print phase progress to standard error
  -h, --help           Print help
  -V, --version        Print version
";

/// One compiler invocation's configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Input source path; `-` reads standard input.
    pub input: PathBuf,
    /// Output path; `None` writes standard output.
    pub output: Option<PathBuf>,
    /// Print phase progress to stderr.
    pub verbose: bool,
}

/// What the command line asked for.
#[derive(Clone, Debug)]
pub enum Action {
    Compile(Config),
    Help,
    Version,
}

/// Parse command-line arguments (program name already stripped).
///
/// Errors are usage errors; the caller prints them with the usage text
/// and exits 2.
pub fn parse_args(args: &[String]) -> Result<Action> {
    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut verbose = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Action::Help),
            "-V" | "--version" => return Ok(Action::Version),
            "--verbose" => verbose = true,
            "-o" | "--output" => {
                let path = iter
                    .next()
                    .ok_or_else(|| anyhow!("option '{}' requires a path", arg))?;
                output = Some(PathBuf::from(path));
            }
            "-" => {
                if input.replace(PathBuf::from("-")).is_some() {
                    bail!("more than one input file");
                }
            }
            other if other.starts_with('-') => bail!("unknown option '{}'", other),
            other => {
                if input.replace(PathBuf::from(other)).is_some() {
                    bail!("more than one input file");
                }
            }
        }
    }

    let input = input.ok_or_else(|| anyhow!("no input file"))?;
    Ok(Action::Compile(Config {
        input,
        output,
        verbose,
    }))
}

/// Run one compilation per `config`.
pub fn run(config: &Config) -> Result<()> {
    let source = read_input(&config.input)?;
    let asm = compile_source(&source, config.verbose)?;
    write_output(config.output.as_deref(), &asm)?;
    Ok(())
}

/// Compile one translation unit to assembly text.
///
/// All diagnostics are rendered against `source` before being returned,
/// so the caller only prints them.
pub fn compile_source(source: &str, verbose: bool) -> Result<String> {
    if verbose {
        eprintln!("lexing...");
    }
    let tokens = minc_lex::tokenize(source).map_err(|e| anyhow!("{}", e.render(source)))?;

    if verbose {
        eprintln!("parsing {} tokens...", tokens.len());
    }
    let mut program = minc_par::parse(tokens).map_err(|e| anyhow!("{}", e.render(source)))?;

    if verbose {
        eprintln!("annotating...");
    }
    minc_sem::annotate(&mut program).map_err(|e| anyhow!("{}", e.render(source)))?;

    if verbose {
        eprintln!("generating code...");
    }
    let asm = minc_gen::codegen(&mut program).map_err(|e| match e {
        CodeGenError::NotAnLvalue { span } => {
            anyhow!("{}", render_snippet(source, span.start, "not an lvalue"))
        }
        other => anyhow!("internal compiler error: {}", other),
    })?;

    Ok(asm)
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("reading standard input")?;
        Ok(source)
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}

fn write_output(path: Option<&Path>, asm: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, asm).with_context(|| format!("writing {}", path.display()))
        }
        None => {
            let mut stdout = std::io::stdout();
            stdout
                .write_all(asm.as_bytes())
                .context("writing standard output")
        }
    }
}
