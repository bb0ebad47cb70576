//! Nether Trace - print the decoding events of a WebAssembly module
//!
//! # Usage
//!
//! ```bash
//! # Trace a compiled module to stdout
//! nether-trace game.wasm
//!
//! # Text format is assembled first
//! nether-trace game.wat -o game.trace
//!
//! # Skip the name section, log reader details
//! RUST_LOG=nether_trace=debug nether-trace game.wasm --no-debug-names
//! ```
//!
//! # Config (trace.toml)
//!
//! ```toml
//! [reader]
//! debug_names = true
//! fail_on_custom_section_error = false
//!
//! [log]
//! filter = "warn"
//! ```

mod config;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use nether_trace::{LoggingVisitor, NopVisitor, ReadOptions, read_module};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Print the decoding event trace of a WebAssembly module
#[derive(Parser, Debug)]
#[command(name = "nether-trace")]
#[command(about = "Print the decoding event trace of a WebAssembly module")]
#[command(version)]
struct Cli {
    /// Module to trace (.wasm, or .wat/.wast text)
    input: PathBuf,

    /// Write the trace to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (default: trace.toml in the config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not expand the name section
    #[arg(long)]
    no_debug_names: bool,

    /// Stop on a malformed custom section
    #[arg(long)]
    fail_on_custom_section_error: bool,
}

impl Cli {
    /// Reader options from the config file, overridden by flags
    fn read_options(&self, config: &Config) -> ReadOptions {
        let mut options = config.reader.options();
        if self.no_debug_names {
            options.read_debug_names = false;
        }
        if self.fail_on_custom_section_error {
            options.fail_on_custom_section_error = true;
        }
        options
    }
}

/// Read module bytes, assembling text format input
fn load_module(path: &Path) -> Result<Vec<u8>> {
    let is_text = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wat") || ext.eq_ignore_ascii_case("wast"));

    if is_text {
        wat::parse_file(path).with_context(|| format!("failed to assemble {}", path.display()))
    } else {
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

/// Trace `wasm` into `out`
fn trace<W: Write>(wasm: &[u8], out: W, options: &ReadOptions) -> Result<W> {
    let mut logger = LoggingVisitor::new(out, NopVisitor);
    let result = read_module(wasm, &mut logger, options);

    let sink_error = logger.sink_error().map(|err| err.to_string());
    let (mut out, NopVisitor) = logger.into_parts();
    out.flush().context("failed to flush trace output")?;
    if let Some(err) = sink_error {
        bail!("failed to write trace: {}", err);
    }
    result.context("failed to decode module")?;
    Ok(out)
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    let wasm = load_module(&cli.input)?;
    let out = open_output(cli.output.as_deref())?;
    trace(&wasm, out, &cli.read_options(config))
        .with_context(|| format!("tracing {}", cli.input.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_from(path)?,
        None => config::load(),
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.filter)),
        )
        .init();

    run(&cli, &config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("nether-trace").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        config.reader.debug_names = true;

        let options = cli(&["game.wasm", "--no-debug-names"]).read_options(&config);
        assert!(!options.read_debug_names);
        assert!(!options.fail_on_custom_section_error);

        let options = cli(&["game.wasm", "--fail-on-custom-section-error"]).read_options(&config);
        assert!(options.read_debug_names);
        assert!(options.fail_on_custom_section_error);
    }

    #[test]
    fn test_config_used_without_flags() {
        let mut config = Config::default();
        config.reader.debug_names = false;
        let options = cli(&["game.wasm"]).read_options(&config);
        assert!(!options.read_debug_names);
    }

    #[test]
    fn test_output_flag() {
        let args = cli(&["game.wat", "-o", "game.trace"]);
        assert_eq!(args.input, PathBuf::from("game.wat"));
        assert_eq!(args.output, Some(PathBuf::from("game.trace")));
    }

    #[test]
    fn test_missing_input_is_rejected() {
        assert!(Cli::try_parse_from(["nether-trace"]).is_err());
    }

    #[test]
    fn test_text_input_is_assembled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.wat");
        std::fs::write(&path, "(module)").unwrap();

        let wasm = load_module(&path).unwrap();
        assert_eq!(wasm, [0x00, 0x61, 0x73, 0x6d, 0x01, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_trace_to_buffer() {
        let wasm = wat::parse_str("(module (memory 1))").unwrap();
        let out = trace(&wasm, Vec::new(), &ReadOptions::default()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "BeginModule(version: 1)\n\
             \x20 BeginMemorySection(size: 3)\n\
             \x20   OnMemoryCount(count: 1)\n\
             \x20   OnMemory(index: 0, initial: 1)\n\
             \x20 EndMemorySection\n\
             EndModule\n"
        );
    }

    #[test]
    fn test_malformed_module_fails() {
        let err = trace(b"\0asm\x01", Vec::new(), &ReadOptions::default()).unwrap_err();
        assert!(err.to_string().contains("failed to decode module"));
    }

    #[test]
    fn test_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_module(&dir.path().join("missing.wasm")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
