//! CLI binary for edgequake-uri.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `DecodeConfig` and stream-info hints, and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use edgequake_uri::{
    decode_uri_with, resolve_uri, truncate_data_uri, truncate_data_uris, Base64Mode,
    DecodeConfig, DecodedUri, ResolvedUri, StreamInfo,
};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Print the local path of a file URI
  uri-decode 'file:///home/me/My%20Report.docx'

  # Write an embedded image to disk
  uri-decode 'data:image/png;base64,iVBORw0KGgo...' -o image.png

  # Inspect a data URI as JSON (content is base64 in the output)
  uri-decode --json 'data:text/plain;charset=utf-8,Hi%20there'

  # Override the guessed type and charset
  uri-decode -m text/markdown -c utf8 'data:,%23%20Title'

  # Shorten a data URI for logs or Markdown output
  uri-decode --truncate 'data:image/png;base64,iVBORw0KGgo...'

  # Strip embedded image payloads from a Markdown document
  uri-decode --markdown < report.md > report.slim.md

NOTES:
  Remote content is never fetched. http(s) URIs and file URIs naming a host
  other than localhost are reported as errors (use --json to inspect them).
"#;

/// Decode file: and data: URIs into local paths and inline payloads.
#[derive(Parser, Debug)]
#[command(
    name = "uri-decode",
    version,
    about = "Decode file: and data: URIs into local paths and inline payloads",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// A file: or data: URI.
    #[arg(required_unless_present = "markdown")]
    uri: Option<String>,

    /// Write the payload (data:) or path (file:) to this file instead of stdout.
    #[arg(short, long, env = "URI_DECODE_OUTPUT")]
    output: Option<PathBuf>,

    /// Extension hint, e.g. pdf or .md.
    #[arg(short = 'x', long, env = "URI_DECODE_EXTENSION")]
    extension: Option<String>,

    /// MIME-type hint, e.g. text/html.
    #[arg(short, long, env = "URI_DECODE_MIME_TYPE")]
    mime_type: Option<String>,

    /// Charset hint, e.g. UTF-8.
    #[arg(short, long, env = "URI_DECODE_CHARSET")]
    charset: Option<String>,

    /// Directory relative file: paths are resolved against (default: cwd).
    #[arg(long, env = "URI_DECODE_BASE_DIR")]
    base_dir: Option<PathBuf>,

    /// Ignore non-base64 characters (whitespace, line breaks) in ;base64 payloads.
    #[arg(long, env = "URI_DECODE_LENIENT_BASE64")]
    lenient_base64: bool,

    /// Print the decoded structure and stream info as JSON.
    #[arg(long)]
    json: bool,

    /// Print the data URI cut down to its header and exit.
    #[arg(long)]
    truncate: bool,

    /// Read Markdown from stdin and shorten its inline data: URI targets.
    #[arg(long, conflicts_with_all = ["uri", "json", "truncate"])]
    markdown: bool,

    /// With --markdown, copy data: URIs through unchanged.
    #[arg(long, requires = "markdown")]
    keep_data_uris: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "URI_DECODE_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "URI_DECODE_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Markdown mode ────────────────────────────────────────────────────
    if cli.markdown {
        let mut markdown = String::new();
        io::stdin()
            .read_to_string(&mut markdown)
            .context("Failed to read Markdown from stdin")?;
        if !cli.keep_data_uris {
            markdown = truncate_data_uris(&markdown);
        }
        return emit(&cli, markdown.as_bytes(), true);
    }

    let uri = cli.uri.as_deref().context("A URI argument is required")?;

    if cli.truncate {
        println!("{}", truncate_data_uri(uri));
        return Ok(());
    }

    // ── Build config and hints ───────────────────────────────────────────
    let config = build_config(&cli)?;
    let hints = StreamInfo::from_hints(
        cli.extension.as_deref(),
        cli.mime_type.as_deref(),
        cli.charset.as_deref(),
    )
    .context("Invalid hint")?;

    // Long data URIs are shortened in error messages.
    let shown = truncate_data_uri(uri);

    // ── JSON mode ────────────────────────────────────────────────────────
    if cli.json {
        let decoded = decode_uri_with(uri, &config)
            .with_context(|| format!("Failed to decode '{shown}'"))?;
        let guess = match decoded {
            DecodedUri::File(ref f) => StreamInfo::from_file_uri(f),
            DecodedUri::Data(ref d) => StreamInfo::from_data_uri(d),
        };
        let stream_info = match hints {
            Some(ref h) => guess.copy_and_update(h),
            None => guess,
        };
        let json = serde_json::to_string_pretty(&serde_json::json!({
            "uri": decoded,
            "stream_info": stream_info,
        }))
        .context("Failed to serialise output")?;
        return emit(&cli, json.as_bytes(), true);
    }

    // ── Resolve and emit ─────────────────────────────────────────────────
    let resolved = resolve_uri(uri, &config, hints.as_ref())
        .with_context(|| format!("Failed to resolve '{shown}'"))?;

    match resolved {
        ResolvedUri::LocalFile { ref path, .. } => {
            emit(&cli, path.display().to_string().as_bytes(), true)?;
        }
        ResolvedUri::Inline {
            ref content,
            ref stream_info,
        } => {
            emit(&cli, content, false)?;
            if !cli.quiet && cli.output.is_some() {
                eprintln!(
                    "{}  {} bytes  {}",
                    green("✔"),
                    bold(&content.len().to_string()),
                    dim(stream_info.mimetype.as_deref().unwrap_or("no mime type")),
                );
            }
        }
    }

    Ok(())
}

/// Map CLI args to `DecodeConfig`.
fn build_config(cli: &Cli) -> Result<DecodeConfig> {
    let mut builder = DecodeConfig::builder();
    if let Some(ref dir) = cli.base_dir {
        builder = builder.base_dir(dir);
    }
    if cli.lenient_base64 {
        builder = builder.base64_mode(Base64Mode::Lenient);
    }
    builder.build().context("Invalid configuration")
}

/// Write `bytes` to `--output` or stdout. Text gets a trailing newline on stdout.
fn emit(cli: &Cli, bytes: &[u8], is_text: bool) -> Result<()> {
    if let Some(ref path) = cli.output {
        return std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write output file {:?}", path));
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(bytes)
        .context("Failed to write to stdout")?;
    if is_text && !bytes.ends_with(b"\n") {
        handle.write_all(b"\n").ok();
    }
    handle.flush().context("Failed to flush stdout")
}
