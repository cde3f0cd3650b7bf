//! statdoc CLI: JSON report request in, paginated PDF out.
//!
//! The binary is the transport stand-in: it owns wall-clock time, the
//! filesystem, and the exit-code mapping; everything report-shaped lives in
//! the library crates.

mod args;
mod request;

mod exitcodes {
    pub const OK: i32 = 0;
    /// JSON shape / request parse failures.
    pub const INPUT: i32 = 2;
    /// Filesystem read/write failures.
    pub const IO: i32 = 4;
    /// Document layer failures.
    pub const RENDER: i32 = 5;
}

use std::fmt;
use std::process::ExitCode;

use clap::Parser;

use args::{Cli, Command, GenerateArgs};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    Input(String),
    Io(String),
    Render(String),
}

impl fmt::Display for MainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MainError::Input(m) => write!(f, "invalid request: {m}"),
            MainError::Io(m) => write!(f, "{m}"),
            MainError::Render(m) => write!(f, "report generation failed: {m}"),
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let rc = match cli.command {
        Command::Generate(args) => match generate(&args) {
            Ok(()) => exitcodes::OK,
            Err(e) => {
                eprintln!("statdoc: error: {e}");
                map_error(&e)
            }
        },
    };
    ExitCode::from(rc as u8)
}

/// Stderr subscriber; `RUST_LOG` overrides, default shows warnings
/// (skipped distribution entries, chart fallbacks).
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn generate(args: &GenerateArgs) -> Result<(), MainError> {
    let raw = std::fs::read_to_string(&args.input)
        .map_err(|e| MainError::Io(format!("read {}: {e}", args.input.display())))?;
    let dto: request::RequestDto =
        serde_json::from_str(&raw).map_err(|e| MainError::Input(e.to_string()))?;

    let mut req = dto.into_request();
    tracing::debug!(
        summary = req.summary.len(),
        detail_rows = req.detail_rows.len(),
        distribution = req.distribution.len(),
        "request loaded"
    );
    if let Some(title) = &args.title {
        req.title = Some(title.clone());
    }
    req.generated_at = Some(
        chrono::Utc::now()
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
    );

    let bytes = sd_pdf::generate_report(&req, args.variant.into())
        .map_err(|e| MainError::Render(e.to_string()))?;

    std::fs::write(&args.out, &bytes)
        .map_err(|e| MainError::Io(format!("write {}: {e}", args.out.display())))?;

    if !args.quiet {
        eprintln!("generate: wrote {} ({} bytes)", args.out.display(), bytes.len());
    }
    Ok(())
}

fn map_error(e: &MainError) -> i32 {
    match e {
        MainError::Input(_) => exitcodes::INPUT,
        MainError::Io(_) => exitcodes::IO,
        MainError::Render(_) => exitcodes::RENDER,
    }
}
