//! Reads HTML from stdin and prints the reader-view markup as JSON.
//!
//! Usage: `extract_stdin [--config options.json] < page.html`
//!
//! Output is `{"content": "<article>...</article>"}`, or `{"content": null}`
//! when no main content was found. Logs go to stderr, filtered by `RUST_LOG`.

use rs_reader_view::dom::Document;
use rs_reader_view::encoding::decode_html;
use rs_reader_view::{extract_with_options, InlineStyleResolver, Options};
use serde::Serialize;
use std::env;
use std::fs;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

const NULL_OUTPUT: &str = r#"{"content":null}"#;

#[derive(Serialize)]
struct Output {
    content: Option<String>,
}

/// JSON line for stdout. Falls back to a null result if serialization fails.
fn render(content: Option<String>) -> String {
    match serde_json::to_string(&Output { content }) {
        Ok(json) => json,
        Err(err) => {
            tracing::error!(error = %err, "failed to serialize output");
            NULL_OUTPUT.to_string()
        }
    }
}

fn load_options() -> Result<Options, String> {
    let mut args = env::args().skip(1);
    match (args.next().as_deref(), args.next()) {
        (None, _) => Ok(Options::default()),
        (Some("--config"), Some(path)) => {
            let json = fs::read_to_string(&path).map_err(|err| format!("cannot read {path}: {err}"))?;
            Options::from_json(&json).map_err(|err| err.to_string())
        }
        _ => Err("usage: extract_stdin [--config options.json] < page.html".to_string()),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let options = match load_options() {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    };

    let mut bytes = Vec::new();
    if io::stdin().read_to_end(&mut bytes).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    let doc = Document::from(decode_html(&bytes));
    let content = extract_with_options(&doc, &InlineStyleResolver, &options).map(|e| e.content);
    println!("{}", render(content));
}
