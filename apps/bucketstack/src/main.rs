//! bucketstack - render a bucket specification into Terraform JSON.
//!
//! Reads the validated input envelope (`data` + `provision`), builds the
//! resource graph, and writes the Terraform-JSON document to stdout or a
//! file. Logs go to stderr so the document stream stays clean.
//!
//! # Usage
//!
//! ```text
//! bucketstack input.json
//! cat input.json | bucketstack
//! bucketstack input.json --output cdk.tf.json
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bucketstack_model::AppInput;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LOG_LEVEL: &str = "info";

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` variable.
fn init_tracing() -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_owned());
        EnvFilter::try_new(&level).with_context(|| format!("invalid log level filter: {level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Parsed command line: optional input path, optional output path.
#[derive(Debug)]
struct Args {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut input = None;
    let mut output = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--output" | "-o" => {
                let path = args.next().context("--output requires a path")?;
                output = Some(PathBuf::from(path));
            }
            _ => input = Some(PathBuf::from(arg)),
        }
    }
    Ok(Args { input, output })
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read input from {}", path.display())),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("cannot read input from stdin")?;
            Ok(raw)
        }
    }
}

fn main() -> Result<()> {
    init_tracing()?;
    let args = parse_args(std::env::args().skip(1))?;

    let raw = read_input(args.input.as_deref())?;
    let input: AppInput =
        serde_json::from_str(&raw).context("input envelope is not valid JSON")?;

    info!(
        bucket = %input.data.identifier,
        provisioner = %input.provision.provisioner,
        version = VERSION,
        "rendering bucket specification",
    );

    let graph = bucketstack_graph::build(&input.data)?;
    let document = bucketstack_tfjson::render_json(&input, &graph)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, document)
                .with_context(|| format!("cannot write document to {}", path.display()))?;
            info!(path = %path.display(), "wrote document");
        }
        None => println!("{document}"),
    }

    Ok(())
}
