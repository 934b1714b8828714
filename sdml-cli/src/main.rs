//! Command-line interface for sdml
//! This binary parses sdml sources into their structural result, writing one JSON file per source
//! into the build directory and printing a per-file view to stdout.
//!
//! Usage:
//!   sdml [`<path>`] [--config `<file>`] [--format `<format>`] [--build-dir `<dir>`] [--no-color]

mod discovery;
mod process;

use clap::{Arg, ArgAction, Command};
use process::{OutputFormat, ProcessError};
use sdml_config::{Loader, SdmlConfig};
use sdml_parser::sdml::formats::FormatRegistry;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::Level;

fn main() {
    let matches = Command::new("sdml")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing sdml files into their structural result")
        .arg(
            Arg::new("path")
                .help("File or directory to process (default: the configured source path)")
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: summary, events, tokens, treeviz, json, yaml")
                .default_value("summary"),
        )
        .arg(
            Arg::new("build-dir")
                .long("build-dir")
                .short('o')
                .help("Directory the structural results are written to"),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable colored log output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let config = load_config(
        matches.get_one::<String>("config"),
        matches.get_one::<String>("build-dir"),
        matches.get_flag("no-color"),
    )
    .unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if !config.is_supported_encoding() {
        eprintln!(
            "Unsupported encoding '{}': only utf-8 sources can be read",
            config.encoding
        );
        std::process::exit(1);
    }

    init_logging(&config);

    let registry = FormatRegistry::with_defaults();
    let format_name = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("summary");
    let format = OutputFormat::parse(format_name, &registry).unwrap_or_else(|| {
        eprintln!("Format '{}' not supported", format_name);
        eprint!("Available formats:\n{}", OutputFormat::describe(&registry));
        std::process::exit(1);
    });

    let root = matches
        .get_one::<String>("path")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&config.source.path));

    let failures = handle_process_command(&root, &config, &format, &registry);
    if failures > 0 {
        std::process::exit(1);
    }
}

/// Layer the config file, the environment and the command line flags over the defaults.
fn load_config(
    file: Option<&String>,
    build_dir: Option<&String>,
    no_color: bool,
) -> Result<SdmlConfig, sdml_config::Error> {
    let mut loader = Loader::new();
    if let Some(file) = file {
        loader = loader.with_file(file);
    }
    loader = loader.with_environment()?;
    if let Some(dir) = build_dir {
        loader = loader.set_override("build.path", dir.as_str())?;
    }
    if no_color {
        loader = loader.set_override("logging.color", false)?;
    }
    loader.build()
}

fn init_logging(config: &SdmlConfig) {
    let level = Level::from_str(&config.logging.level).unwrap_or(Level::WARN);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(config.logging.color)
        .with_max_level(level)
        .init();
}

/// Process every source under `root`, returning how many failed.
fn handle_process_command(
    root: &Path,
    config: &SdmlConfig,
    format: &OutputFormat,
    registry: &FormatRegistry,
) -> usize {
    let files = discovery::discover(root, &config.source.extension).unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    });

    let build_dir = PathBuf::from(&config.build.path);
    if *format != OutputFormat::Tokens {
        if let Err(e) = std::fs::create_dir_all(&build_dir) {
            eprintln!("{}: {}", build_dir.display(), ProcessError::from(e));
            std::process::exit(1);
        }
    }

    let mut failures = 0;
    for file in &files {
        let output = discovery::output_path(file, root, &build_dir);
        match process::process_file(file, &output, format, registry) {
            Ok(printed) => print!("{}", printed),
            Err(e) => {
                eprintln!("{}: {}", file.display(), e);
                failures += 1;
            }
        }
    }
    tracing::info!(
        processed = files.len(),
        failed = failures,
        "finished processing sources"
    );
    failures
}
