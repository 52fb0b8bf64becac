//! Logging setup: append to a file under the XDG state dir, else stderr.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,formfill=debug,formfill_core=debug";

/// Where log output ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    File(PathBuf),
    Stderr,
}

/// Per-event writer; stderr when the file handle could not be cloned.
enum SinkWriter {
    File(fs::File),
    Stderr,
}

impl io::Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            SinkWriter::File(f) => f.write(buf),
            SinkWriter::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            SinkWriter::File(f) => f.flush(),
            SinkWriter::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct LogFile(fs::File);

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = SinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(SinkWriter::File)
            .unwrap_or(SinkWriter::Stderr)
    }
}

/// `RUST_LOG` if set and valid, else the crate default.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `~/.local/state/formfill/formfill.log`.
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("formfill")?;
    Ok(xdg_dirs.get_state_home().join("formfill.log"))
}

/// Install the file subscriber. Errors (unwritable state dir) are returned so the
/// caller can fall back to [`init_logging_stderr`].
pub fn init_logging() -> Result<PathBuf> {
    let path = log_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(BoxMakeWriter::new(LogFile(file)))
        .with_ansi(false)
        .init();

    tracing::info!("formfill logging to {}", path.display());
    Ok(path)
}

pub fn init_logging_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

/// File logging with stderr fallback; reports which one took effect.
pub fn init() -> LogSink {
    match init_logging() {
        Ok(path) => LogSink::File(path),
        Err(e) => {
            init_logging_stderr();
            tracing::warn!("log file unavailable ({e:#}); logging to stderr");
            LogSink::Stderr
        }
    }
}
