use std::fmt::{Display, Formatter};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::Local;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Per-run routing log. Every line carries the run id so interleaved runs
/// in the shared daily file can be told apart.
#[derive(Debug, Clone)]
pub struct AppLogger {
    pub run_id: String,
    pub log_path: PathBuf,
    file: Arc<Mutex<File>>,
    echo_stderr: bool,
}

impl AppLogger {
    /// Appends to `<log_dir>/aiq-deeplink-YYYYMMDD.log`, creating the directory.
    ///
    /// With `echo_stderr` each line is also written to stderr; stdout stays
    /// reserved for the CLI's report or JSON output.
    pub fn new(log_dir: &Path, echo_stderr: bool) -> Result<Self> {
        fs::create_dir_all(log_dir)
            .with_context(|| format!("failed to create logs dir: {}", log_dir.display()))?;

        let date = Local::now().format("%Y%m%d");
        let log_path = log_dir.join(format!("aiq-deeplink-{date}.log"));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("failed to open log file: {}", log_path.display()))?;

        Ok(Self {
            run_id: Uuid::new_v4().to_string(),
            log_path,
            file: Arc::new(Mutex::new(file)),
            echo_stderr,
        })
    }

    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    /// Write failures are dropped; routing must not depend on the log file.
    pub fn log(&self, level: Level, message: &str) {
        let line = format_line(&self.run_id, level, message);
        if self.echo_stderr {
            eprintln!("{line}");
        }
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{line}");
        }
    }
}

fn format_line(run_id: &str, level: Level, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("[{timestamp}] [{run_id}] [{level}] {message}")
}
