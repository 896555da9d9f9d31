use tracing_subscriber::EnvFilter;

use crate::constants::LOG_ENV;

/// Initialize front-end diagnostics on stderr.
///
/// `GPSEQ_ANIM_LOG` takes a filter directive; without it the level is
/// `debug` in debug mode and `warn` otherwise. Calling this more than once
/// is harmless.
pub fn init_tracing(debug_mode: bool) {
    let fallback = if debug_mode { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .try_init();
}
