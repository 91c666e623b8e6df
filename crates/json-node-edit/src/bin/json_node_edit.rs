//! `json-node-edit` — edit one node of a JSON document the way the graph view
//! modal does.
//!
//! Usage:
//!   json-node-edit --path /a/b --input '{"x":1}' < doc.json
//!   json-node-edit --path /a/b --show --file doc.json
//!
//! The document is read from `--file` or stdin; the result goes to stdout.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use json_node_edit::json_cli::{edit_node, log_filter, show_node, CliError, NodeShape};
use json_node_edit::EditOptions;
use tracing_subscriber::EnvFilter;

/// Apply a node edit to a JSON document
#[derive(Parser, Debug)]
#[command(name = "json-node-edit")]
#[command(version)]
struct Cli {
    /// JSON Pointer of the node ("" is the root)
    #[arg(short, long, default_value = "")]
    path: String,

    /// Text typed into the node modal
    #[arg(short, long, required_unless_present = "show")]
    input: Option<String>,

    /// Read the document from this file instead of stdin
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// How the node is presented to the edit
    #[arg(short, long, default_value = "node")]
    shape: NodeShape,

    /// Spaces per indentation level of the output
    #[arg(long, default_value_t = 2, env = "JSON_NODE_EDIT_INDENT")]
    indent: usize,

    /// Reject unparseable input instead of storing it as a string
    #[arg(long)]
    strict: bool,

    /// Print the modal's text for the node and exit
    #[arg(long, conflicts_with = "input")]
    show: bool,
}

fn read_document(file: Option<&PathBuf>) -> Result<String, CliError> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(text)
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let document = read_document(cli.file.as_ref())?;
    if cli.show {
        return show_node(&document, &cli.path, cli.shape);
    }
    let options = EditOptions {
        indent: cli.indent,
        literal_fallback: !cli.strict,
    };
    let input = cli.input.as_deref().unwrap_or_default();
    edit_node(&document, &cli.path, input, cli.shape, &options)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(result) => {
            let mut stdout = io::stdout();
            if let Err(e) = stdout
                .write_all(result.as_bytes())
                .and_then(|()| stdout.write_all(b"\n"))
            {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
