//! Tracing setup: stderr output plus a size-rotated log file.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::{AppConfig, ConfigError};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured log level.
///
/// # Errors
///
/// Returns [`ConfigError::Logging`] if the log file cannot be opened, the
/// level filter is invalid, or a global subscriber is already installed.
pub fn init_tracing(config: &AppConfig) -> Result<(), ConfigError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| ConfigError::Logging(e.to_string()))?;

    let file = RotatingFile::open(&config.log_path, config.log_max_bytes)
        .map_err(|e| ConfigError::Logging(format!("{}: {e}", config.log_path.display())))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file),
        )
        .try_init()
        .map_err(|e| ConfigError::Logging(e.to_string()))
}

/// Append-only log file that rolls over to `<path>.1` once it would exceed `max_bytes`.
#[derive(Clone)]
pub struct RotatingFile {
    inner: Arc<Mutex<RotatingState>>,
}

struct RotatingState {
    path: PathBuf,
    max_bytes: u64,
    file: File,
    written: u64,
}

impl RotatingFile {
    /// Opens (or creates) the log file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory or file cannot be created.
    pub fn open(path: &Path, max_bytes: u64) -> io::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            inner: Arc::new(Mutex::new(RotatingState {
                path: path.to_path_buf(),
                max_bytes,
                file,
                written,
            })),
        })
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, RotatingState>> {
        self.inner
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))
    }
}

impl RotatingState {
    fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".1");
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        fs::rename(&self.path, self.backup_path())?;
        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.lock()?;
        let incoming = buf.len() as u64;
        // A zero limit disables rotation.
        if state.max_bytes > 0 && state.written > 0 && state.written + incoming > state.max_bytes
        {
            state.rotate()?;
        }
        let n = state.file.write(buf)?;
        state.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock()?.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RotatingFile {
    type Writer = RotatingFile;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
