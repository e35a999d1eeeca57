//! `typeagen` CLI: generate TypeScript interfaces from JSON files, URLs, or a
//! `.typeagenrc.json` list of endpoints.
//!
//! ## Usage
//!
//! ```sh
//! # JSON on stdin → interfaces on stdout
//! echo '{"id":1,"geo":{"lat":"1"}}' | typeagen generate --root Place
//!
//! # From file to file, with ${NAME} placeholders filled from .env
//! typeagen generate -i user.json -o types.d.ts --root User --env-file .env
//!
//! # Fetch one endpoint
//! typeagen fetch https://jsonplaceholder.typicode.com/users/1 --root User
//!
//! # Every endpoint in .typeagenrc.json
//! typeagen run
//! ```

mod config;
mod fetch;
mod output;

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use indexmap::IndexMap;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use typeagen_core::{env, synth, SynthOptions, Synthesizer, Value, WorklistOrder};

use crate::config::{Config, Endpoint};
use crate::output::Output;

#[derive(Parser)]
#[command(
    name = "typeagen",
    version,
    about = "Generate TypeScript interfaces from JSON documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate interfaces from a JSON file or stdin
    Generate {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Name of the root interface
        #[arg(short, long, default_value = "Root")]
        root: String,
        /// NAME=VALUE file used to fill ${NAME} placeholders in strings
        #[arg(long)]
        env_file: Option<PathBuf>,
        /// Print the parsed document tree to stderr
        #[arg(long)]
        dump_tree: bool,
        #[command(flatten)]
        synth: SynthArgs,
    },
    /// Fetch a JSON document over HTTP and generate interfaces for it
    Fetch {
        /// URL to request
        url: String,
        /// Name of the root interface
        #[arg(short, long, default_value = "Root")]
        root: String,
        /// HTTP method
        #[arg(short = 'X', long, default_value = "GET")]
        method: String,
        /// Request header as `Name: value` (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        synth: SynthArgs,
    },
    /// Generate interfaces for every endpoint in a config file
    Run {
        /// Config file
        #[arg(short, long, default_value = config::DEFAULT_FILE)]
        config: PathBuf,
        /// Output file, overriding `outFile` from the config
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        synth: SynthArgs,
    },
}

#[derive(Args)]
struct SynthArgs {
    /// Emit nested interfaces breadth-first instead of depth-first
    #[arg(long)]
    fifo: bool,
    /// Give structurally identical objects a single shared interface
    #[arg(long)]
    dedupe: bool,
}

impl SynthArgs {
    fn options(&self) -> SynthOptions {
        SynthOptions {
            order: if self.fifo {
                WorklistOrder::Fifo
            } else {
                WorklistOrder::Lifo
            },
            dedupe: self.dedupe,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            input,
            output,
            root,
            env_file,
            dump_tree,
            synth,
        } => {
            let json = read_input(input.as_deref())?;
            let vars = match env_file {
                Some(path) => env::load_file(&path)
                    .with_context(|| format!("Failed to load env file: {}", path.display()))?,
                None => None,
            };
            let value = typeagen_core::parse(&json, vars.as_ref())
                .context("Failed to parse JSON input")?;
            if dump_tree {
                eprint!("{}", value.outline());
            }
            let text = render(value, &root, synth.options())?;

            let mut out = Output::open(output.as_deref())?;
            out.write_document(&text)?;
            out.finish()?;
        }
        Commands::Fetch {
            url,
            root,
            method,
            headers,
            output,
            synth,
        } => {
            let endpoint = Endpoint {
                root_type: root,
                url,
                method,
                headers: parse_headers(&headers)?,
            };
            let client = fetch::client()?;
            let text = process_endpoint(&client, &endpoint, synth.options()).await?;

            let mut out = Output::open(output.as_deref())?;
            out.write_document(&text)?;
            out.finish()?;
        }
        Commands::Run {
            config,
            output,
            synth,
        } => {
            run_config(&config, output, synth.options()).await?;
        }
    }

    Ok(())
}

/// Log to stderr so generated code on stdout stays clean. `RUST_LOG`
/// overrides the verbosity flags.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Process every configured endpoint. A failing endpoint is reported and
/// skipped; the run fails at the end if any endpoint failed. The output is
/// only opened once some endpoint has produced a document, so a run where
/// everything fails leaves an existing `outFile` untouched.
async fn run_config(path: &Path, output: Option<PathBuf>, options: SynthOptions) -> Result<()> {
    let config = Config::load(path)?;
    debug!(endpoints = config.endpoints.len(), "loaded config");

    let client = fetch::client()?;
    let mut documents = Vec::new();
    let mut failed = Vec::new();
    for endpoint in &config.endpoints {
        match process_endpoint(&client, endpoint, options).await {
            Ok(text) => {
                info!(root = %endpoint.root_type, url = %endpoint.url, "generated interfaces");
                documents.push(text);
            }
            Err(e) => {
                error!(root = %endpoint.root_type, url = %endpoint.url, "{e:#}");
                failed.push(endpoint.root_type.as_str());
            }
        }
    }

    if !documents.is_empty() {
        let out_path = output.or_else(|| config.output.clone());
        let mut out = Output::open(out_path.as_deref())?;
        for text in &documents {
            out.write_document(text)?;
        }
        out.finish()?;
    }

    if !failed.is_empty() {
        bail!(
            "{} of {} endpoints failed: {}",
            failed.len(),
            config.endpoints.len(),
            failed.join(", ")
        );
    }
    Ok(())
}

async fn process_endpoint(
    client: &reqwest::Client,
    endpoint: &Endpoint,
    options: SynthOptions,
) -> Result<String> {
    let body = fetch::fetch_body(client, endpoint).await?;
    let value = typeagen_core::parse(&body, None)
        .with_context(|| format!("Response from {} is not valid JSON", endpoint.url))?;
    render(value, &endpoint.root_type, options)
}

/// Synthesize the whole document into a buffer, so a failure part-way
/// through never leaves half a document in the output.
fn render(value: Value, root_name: &str, options: SynthOptions) -> Result<String> {
    let mut root = synth::root_object(value)?;
    root.set_key(root_name);

    let mut buf = Vec::new();
    Synthesizer::new(options)
        .generate(&root, &mut buf)
        .with_context(|| format!("Failed to generate interfaces for {root_name}"))?;
    Ok(String::from_utf8(buf)?)
}

/// Parse `Name: value` header arguments.
fn parse_headers(raw: &[String]) -> Result<IndexMap<String, String>> {
    let mut headers = IndexMap::new();
    for header in raw {
        let Some((name, value)) = header.split_once(':') else {
            bail!("Invalid header '{header}': expected 'Name: value'");
        };
        headers.insert(name.trim().to_string(), value.trim().to_string());
    }
    Ok(headers)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_split_on_first_colon() {
        let headers = parse_headers(&[
            "Authorization: Bearer abc".to_string(),
            "X-Url:https://a.test".to_string(),
        ])
        .unwrap();
        assert_eq!(headers["Authorization"], "Bearer abc");
        assert_eq!(headers["X-Url"], "https://a.test");
    }

    #[test]
    fn header_without_colon_is_rejected() {
        assert!(parse_headers(&["nocolon".to_string()]).is_err());
    }

    #[test]
    fn render_names_the_root() {
        let value = typeagen_core::parse(r#"{"id": 1}"#, None).unwrap();
        let text = render(value, "user", SynthOptions::default()).unwrap();
        assert_eq!(text, "interface User {\n  id: number,\n}\n");
    }

    #[test]
    fn render_fails_on_empty_array() {
        let value = typeagen_core::parse(r#"{"items": []}"#, None).unwrap();
        let err = render(value, "Root", SynthOptions::default()).unwrap_err();
        assert!(format!("{err:#}").contains("empty array"));
    }
}
