//! `zplm`: translate label markup to ZPL II, check it, and preview it.

mod debounce;
mod render;
mod store;
mod watch;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use zpl_markup_core::{TranslateOptions, Translation, Translator, parse_with_diagnostics};
use zpl_markup_diagnostics::{self as diag, Diagnostic, codes};
use zpl_markup_raster_client::{HttpRasterizer, RasterConfig, Rasterizer, RetryRasterizer};

use crate::render::{Format, print_summary, render_diagnostics};
use crate::store::{DEFAULT_PATH, MarkupStore, TEMPLATE, read_markup};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "zplm",
    version,
    about = "Translate label markup to ZPL II and preview it"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Log debug events to stderr (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Translate a markup file (or `-` for stdin) to ZPL.
    Translate {
        #[arg(default_value = DEFAULT_PATH)]
        file: String,
        /// Reject unrecognized elements and warn on unknown attributes.
        #[arg(long)]
        strict: bool,
        /// Write the command stream here instead of stdout.
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },

    /// Parse a markup file and print the element list as JSON.
    Parse {
        #[arg(default_value = DEFAULT_PATH)]
        file: String,
    },

    /// Check that a markup file translates, without printing the result.
    Check {
        #[arg(default_value = DEFAULT_PATH)]
        file: String,
        /// Reject unrecognized elements and warn on unknown attributes.
        #[arg(long)]
        strict: bool,
    },

    /// Translate and render a PNG preview through a rasterization service.
    Preview {
        #[arg(default_value = DEFAULT_PATH)]
        file: String,
        /// Reject unrecognized elements and warn on unknown attributes.
        #[arg(long)]
        strict: bool,
        /// Where to write the PNG.
        #[arg(long, short = 'o', default_value = "label.png")]
        out: PathBuf,
        /// Also write the command stream here (kept even if rendering fails).
        #[arg(long)]
        zpl: Option<PathBuf>,
        #[command(flatten)]
        raster: RasterArgs,
    },

    /// Re-translate a markup file whenever it changes.
    Watch {
        #[arg(default_value = DEFAULT_PATH)]
        file: String,
        /// Reject unrecognized elements and warn on unknown attributes.
        #[arg(long)]
        strict: bool,
        /// Write the command stream here on every change (default: stdout).
        #[arg(long)]
        zpl: Option<PathBuf>,
        /// Render a PNG preview here on every change.
        #[arg(long)]
        png: Option<PathBuf>,
        /// Quiet interval before a burst of edits triggers one refresh.
        #[arg(long, default_value_t = 500)]
        debounce_ms: u64,
        #[command(flatten)]
        raster: RasterArgs,
    },

    /// Write a starter markup file (refuses to overwrite).
    Init {
        #[arg(default_value = DEFAULT_PATH)]
        file: PathBuf,
    },

    /// Explain a diagnostic ID (e.g. ZPLM2001).
    Explain { id: String },
}

/// Rasterization service settings.
#[derive(Args, Debug)]
struct RasterArgs {
    /// Service root URL.
    #[arg(long, env = "ZPLM_RASTER_URL", default_value = "http://api.labelary.com/v1")]
    raster_url: String,
    /// Print density in dots per millimetre (6, 8, 12, 24).
    #[arg(long, default_value_t = 8)]
    dpmm: u8,
    /// Label width in inches.
    #[arg(long, default_value_t = 3.94)]
    width: f64,
    /// Label height in inches.
    #[arg(long, default_value_t = 3.94)]
    height: f64,
    /// Which label of the stream to render (0-based).
    #[arg(long, default_value_t = 0)]
    index: u32,
    /// Attempts per render, including the first.
    #[arg(long, default_value_t = 3)]
    attempts: u32,
    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

impl RasterArgs {
    fn config(&self) -> RasterConfig {
        let mut config = RasterConfig::with_base_url(&self.raster_url);
        config.dpmm = self.dpmm;
        config.width_in = self.width;
        config.height_in = self.height;
        config.index = self.index;
        config.timeouts.request = Duration::from_secs(self.timeout_secs);
        config.retry.max_attempts = self.attempts;
        config
    }

    fn rasterizer(&self) -> Result<RetryRasterizer<HttpRasterizer>> {
        let config = self.config();
        let http = HttpRasterizer::new(&config).context("invalid rasterization settings")?;
        Ok(RetryRasterizer::new(http, config.retry))
    }
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = Format::resolve_or_detect(cli.output.as_deref());

    match cli.cmd {
        Cmd::Translate { file, strict, out } => cmd_translate(&file, strict, out, format)?,
        Cmd::Parse { file } => cmd_parse(&file, format)?,
        Cmd::Check { file, strict } => cmd_check(&file, strict, format)?,
        Cmd::Preview {
            file,
            strict,
            out,
            zpl,
            raster,
        } => cmd_preview(&file, strict, &out, zpl, &raster, format)?,
        Cmd::Watch {
            file,
            strict,
            zpl,
            png,
            debounce_ms,
            raster,
        } => {
            let rasterizer = png.as_ref().map(|_| raster.rasterizer()).transpose()?;
            watch::Watch {
                store: MarkupStore::new(file),
                translator: translator(strict),
                rasterizer,
                png,
                zpl,
                debounce: Duration::from_millis(debounce_ms),
                format,
            }
            .run()
        }
        Cmd::Init { file } => cmd_init(file, format)?,
        Cmd::Explain { id } => cmd_explain(&id, format)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_translate(file: &str, strict: bool, out: Option<PathBuf>, format: Format) -> Result<()> {
    let input = read_markup(file)?;
    let Some(translation) = translate_or_report(&input, file, strict, format) else {
        process::exit(1);
    };

    if let Some(path) = &out {
        fs::write(path, &translation.zpl)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    match format {
        Format::Json => {
            let json = serde_json::json!({
                "zpl": translation.zpl,
                "diagnostics": translation.diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Format::Pretty => {
            if out.is_none() {
                println!("{}", translation.zpl);
            }
            render_diagnostics(&input, file, &translation.diagnostics, format);
            print_summary(&translation.diagnostics);
        }
    }
    Ok(())
}

fn cmd_parse(file: &str, format: Format) -> Result<()> {
    let input = read_markup(file)?;
    let parsed = match parse_with_diagnostics(&input) {
        Ok(parsed) => parsed,
        Err(e) => {
            report_failure(&input, file, e.to_diagnostic(), format);
            process::exit(1);
        }
    };

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&parsed)?),
        Format::Pretty => {
            println!("{}", serde_json::to_string_pretty(&parsed.document)?);
            render_diagnostics(&input, file, &parsed.diagnostics, format);
        }
    }
    Ok(())
}

fn cmd_check(file: &str, strict: bool, format: Format) -> Result<()> {
    let input = read_markup(file)?;
    let Some(translation) = translate_or_report(&input, file, strict, format) else {
        process::exit(1);
    };

    match format {
        Format::Json => {
            let json = serde_json::json!({
                "ok": true,
                "diagnostics": translation.diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Format::Pretty => {
            render_diagnostics(&input, file, &translation.diagnostics, format);
            print_summary(&translation.diagnostics);
            eprintln!("check ok");
        }
    }
    Ok(())
}

fn cmd_preview(
    file: &str,
    strict: bool,
    out: &Path,
    zpl: Option<PathBuf>,
    raster: &RasterArgs,
    format: Format,
) -> Result<()> {
    let input = read_markup(file)?;
    let Some(translation) = translate_or_report(&input, file, strict, format) else {
        process::exit(1);
    };
    if let Some(path) = &zpl {
        fs::write(path, &translation.zpl)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    if format == Format::Pretty {
        render_diagnostics(&input, file, &translation.diagnostics, format);
    }

    let image = match raster.rasterizer()?.rasterize(&translation.zpl) {
        Ok(image) => image,
        Err(e) => {
            let mut failure = Diagnostic::error(
                codes::RASTER_FAILED,
                format!("preview failed: {}", error_chain(&e)),
                None,
            );
            if let Some(status) = e.status() {
                failure = failure.with_context(
                    [("status".to_string(), status.to_string())].into_iter().collect(),
                );
            }
            report_failure(&input, file, failure, format);
            process::exit(1);
        }
    };

    fs::write(out, &image.bytes).with_context(|| format!("failed to write {}", out.display()))?;
    match format {
        Format::Json => {
            let json = serde_json::json!({
                "image": out,
                "content_type": image.content_type,
                "bytes": image.bytes.len(),
                "diagnostics": translation.diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Format::Pretty => eprintln!("rendered {}", out.display()),
    }
    Ok(())
}

fn cmd_init(file: PathBuf, format: Format) -> Result<()> {
    let store = MarkupStore::new(file);
    let created = match store.load()? {
        Some(_) => false,
        None => {
            store
                .save(TEMPLATE)
                .with_context(|| format!("failed to write {}", store.path().display()))?;
            true
        }
    };
    let status = if created { "created" } else { "exists" };
    match format {
        Format::Json => {
            let json = serde_json::json!({ "status": status, "file": store.path() });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Format::Pretty => eprintln!("{status}: {}", store.path().display()),
    }
    Ok(())
}

fn cmd_explain(id: &str, format: Format) -> Result<()> {
    let text = diag::explain(id);
    match format {
        Format::Json => {
            let json = serde_json::json!({ "id": id, "explanation": text });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Format::Pretty => {
            use ariadne::Fmt;
            match text {
                Some(text) => println!("{}: {}", id.fg(ariadne::Color::Cyan), text),
                None => println!("{id}: (no explanation available)"),
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn translator(strict: bool) -> Translator {
    let options = if strict {
        TranslateOptions::strict()
    } else {
        TranslateOptions::default()
    };
    Translator::new(options)
}

/// Translate, or render the failure and return `None`. Nothing else is
/// written when translation fails.
fn translate_or_report(
    input: &str,
    file: &str,
    strict: bool,
    format: Format,
) -> Option<Translation> {
    match translator(strict).translate(input) {
        Ok(translation) => Some(translation),
        Err(e) => {
            tracing::debug!(error = %e, "translation failed");
            report_failure(input, file, e.to_diagnostic(), format);
            None
        }
    }
}

/// Report a fatal diagnostic: pretty to stderr, or `{ok: false, ...}` JSON.
fn report_failure(input: &str, file: &str, failure: Diagnostic, format: Format) {
    match format {
        Format::Json => {
            let json = serde_json::json!({ "ok": false, "diagnostics": [failure] });
            match serde_json::to_string_pretty(&json) {
                Ok(text) => println!("{text}"),
                Err(e) => eprintln!("error: {e}"),
            }
        }
        Format::Pretty => {
            render_diagnostics(input, file, std::slice::from_ref(&failure), format);
            print_summary(std::slice::from_ref(&failure));
        }
    }
}

/// `outer: inner: root` for an error and its sources.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(inner) = source {
        parts.push(inner.to_string());
        source = inner.source();
    }
    parts.join(": ")
}
