use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use treepath::config::{Config, OutputFormat};
use treepath::document::diff::diff_at;
use treepath::document::parser::Format;
use treepath::file::loader::{LoadOptions, Source};
use treepath::path::parse_path;
use treepath::session::{Lookup, Session};

/// Exit code for a path that does not exist, or documents that differ.
const EXIT_MISSING: u8 = 1;
/// Exit code for a path that cannot be applied to the document's shape.
const EXIT_INVALID: u8 = 2;
/// Exit code for unreadable input, bad config or bad arguments.
const EXIT_ERROR: u8 = 3;

/// treepath - resolve dotted paths against YAML and JSON documents
#[derive(Parser)]
#[command(name = "treepath")]
#[command(version)]
#[command(about = "Resolve dotted paths against YAML and JSON documents", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.config/treepath/config.toml
    #[arg(long, global = true)]
    config: Option<String>,

    /// Input format (default: detected from file name or content)
    #[arg(long, global = true, value_enum)]
    format: Option<InputFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the subtree at PATH (empty path prints the whole document)
    Get {
        /// Document file, or - for stdin
        source: String,

        /// Dotted path, e.g. g.h.0.k
        #[arg(default_value = "")]
        path: String,

        /// Output encoding (default: from config)
        #[arg(short, long, value_enum)]
        output: Option<OutputArg>,

        /// Document index within a multi-document YAML stream
        #[arg(short, long, default_value_t = 0)]
        document: usize,
    },
    /// Show where two documents differ below PATH
    Compare {
        /// Left document file, or - for stdin
        left: String,

        /// Right document file, or - for stdin
        right: String,

        /// Dotted path to compare (default: whole documents)
        #[arg(default_value = "")]
        path: String,

        /// Document index within a multi-document YAML stream
        #[arg(short, long, default_value_t = 0)]
        document: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum InputFormat {
    Yaml,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputArg {
    Yaml,
    Json,
}

fn init_logging(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help and --version are reported through the same error path.
            return if err.use_stderr() {
                ExitCode::from(EXIT_ERROR)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("treepath: {:#}", err);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    init_logging(&config);

    let load_options = LoadOptions {
        format: cli.format.map(|f| match f {
            InputFormat::Yaml => Format::Yaml,
            InputFormat::Json => Format::Json,
        }),
        ..config.load_options()
    };
    let session = Session::new(config).with_load_options(load_options);

    let code = match cli.command {
        Command::Get {
            source,
            path,
            output,
            document,
        } => {
            let output = output
                .map(|o| match o {
                    OutputArg::Yaml => OutputFormat::Yaml,
                    OutputArg::Json => OutputFormat::Json,
                })
                .unwrap_or(session.config().output_format);
            run_get(&session, &Source::from_arg(&source), &path, document, output)?
        }
        Command::Compare {
            left,
            right,
            path,
            document,
        } => run_compare(
            &session,
            &Source::from_arg(&left),
            &Source::from_arg(&right),
            &path,
            document,
        )?,
    };

    session.close();
    Ok(code)
}

fn run_get(
    session: &Session,
    source: &Source,
    path: &str,
    document: usize,
    output: OutputFormat,
) -> Result<ExitCode> {
    match session.resolve(source, document, path)? {
        Lookup::Found(node) => {
            let text = match output {
                OutputFormat::Yaml => node.to_yaml_string(),
                OutputFormat::Json => node.to_json_string().map(|s| s + "\n"),
            }
            .context("Failed to encode result")?;
            print!("{}", text);
            Ok(ExitCode::SUCCESS)
        }
        Lookup::NotFound => {
            eprintln!("{}: path '{}' not found", source, path);
            if session.config().fail_on_missing {
                Ok(ExitCode::from(EXIT_MISSING))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Lookup::Invalid(err) => {
            eprintln!("{}: {}", source, err);
            Ok(ExitCode::from(EXIT_INVALID))
        }
    }
}

fn run_compare(
    session: &Session,
    left: &Source,
    right: &Source,
    path: &str,
    document: usize,
) -> Result<ExitCode> {
    let left_node = match session.resolve(left, document, path)? {
        Lookup::Invalid(err) => {
            eprintln!("{}: {}", left, err);
            return Ok(ExitCode::from(EXIT_INVALID));
        }
        lookup => lookup.node().cloned(),
    };
    let right_node = match session.resolve(right, document, path)? {
        Lookup::Invalid(err) => {
            eprintln!("{}: {}", right, err);
            return Ok(ExitCode::from(EXIT_INVALID));
        }
        lookup => lookup.node().cloned(),
    };

    let differences = diff_at(&parse_path(path), left_node.as_ref(), right_node.as_ref());
    for difference in &differences {
        println!("{}", difference);
    }

    if differences.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_MISSING))
    }
}
