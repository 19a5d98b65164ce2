use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log file size that triggers trimming (10 MB)
const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;
/// Tail kept after trimming (2 MB)
const KEEP_SIZE: u64 = 2 * 1024 * 1024;

/// Cut `log_path` down to its newest `KEEP_SIZE` bytes once it outgrows
/// `MAX_LOG_SIZE`, starting at a line boundary.
fn trim_log_if_needed(log_path: &Path) -> std::io::Result<()> {
    let Ok(metadata) = fs::metadata(log_path) else {
        return Ok(());
    };
    if metadata.len() <= MAX_LOG_SIZE {
        return Ok(());
    }

    let mut file = File::open(log_path)?;
    file.seek(SeekFrom::Start(metadata.len().saturating_sub(KEEP_SIZE)))?;
    let mut tail = Vec::new();
    file.read_to_end(&mut tail)?;
    drop(file);

    let skip = tail
        .iter()
        .position(|&b| b == b'\n')
        .map_or(0, |i| i + 1);

    let mut file = File::create(log_path)?;
    file.write_all(b"--- earlier sweep logs trimmed ---\n")?;
    file.write_all(&tail[skip..])?;
    Ok(())
}

/// Initialize logging to stderr, and to `log_file` when given.
///
/// The level applies to both crates unless `RUST_LOG` is set. The file sink
/// writes through a background worker; keep the returned guard alive until
/// the program exits so buffered lines are flushed.
pub fn init_logging(
    level: &str,
    log_file: Option<&Path>,
) -> color_eyre::Result<Option<WorkerGuard>> {
    let default_filter = format!("knotdrift={level},knotdrift_core={level}");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            if let Err(e) = trim_log_if_needed(path) {
                eprintln!("Warning: Failed to trim log file: {e}");
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .try_init()?;

    if let Some(path) = log_file {
        tracing::debug!(log_path = %path.display(), "File logging initialized");
    }
    Ok(guard)
}
