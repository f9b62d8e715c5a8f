use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::{Mutex, Once};

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber, writing to `log_file`.
///
/// `RUST_LOG` takes precedence over `level`. Without a log file nothing is
/// installed, since stdout and stderr are owned by the terminal UI. Only the
/// first call has any effect.
pub fn init_tracing(level: &str, log_file: Option<&Path>) -> io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;

    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(format!("money_manager={level}")))
            .unwrap_or_else(|_| EnvFilter::new("money_manager=info"));

        let installed = fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .try_init();

        if installed.is_ok() {
            tracing::info!(version = crate::VERSION, "money-manager tracing initialized");
        }
    });

    Ok(())
}
