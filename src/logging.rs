use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Where `--debug` writes its log
pub fn log_path() -> PathBuf {
    PathBuf::from("/tmp/glyphfield.log")
}

/// Open the log file for appending, owner read/write only
fn open_log(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .mode(0o600)
        .open(path)
}

/// Install the file subscriber when debugging. Without `--debug` nothing is
/// installed and every event is dropped, since stdout belongs to the display.
pub fn init(debug: bool) -> io::Result<()> {
    if !debug {
        return Ok(());
    }

    let path = log_path();
    let file = open_log(&path)?;

    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::DEBUG.into())
        .from_env_lossy();

    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(())
}
