use regex::Regex;
use std::sync::OnceLock;

/// Name of the per-project configuration file.
pub const CONFIG_FILENAME: &str = ".gpseq-anim.toml";

/// Table inside the configuration file holding the settings.
pub const CONFIG_SECTION: &str = "gpseq-anim";

/// Environment variable naming the analysis engine executable.
pub const ENGINE_ENV: &str = "GPSEQ_ENGINE";

/// Engine executable used when nothing else is configured.
pub const DEFAULT_ENGINE: &str = "gpseq-engine";

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "GPSEQ_ANIM_LOG";

/// File written into the output directory and handed to the engine.
pub const SETTINGS_FILENAME: &str = "gpseq-anim.settings.json";

/// Suffix of generated log file names.
pub const LOG_SUFFIX: &str = "_gpseq-anim.log";

/// Default voxel aspect, as (Z, Y, X).
pub const DEFAULT_ASPECT: [f64; 3] = [300.0, 216.6, 216.6];

/// Default unit of the voxel aspect.
pub const DEFAULT_UMES: &str = "nm";

/// Default minimum Z extension of a nucleus.
pub const DEFAULT_MIN_Z: f64 = 0.25;

/// Default sigma of the Gaussian smoothing applied to profiles.
pub const DEFAULT_SIGMA_SMOOTH: f64 = 0.1;

/// Default sigma of the Gaussian used for density estimation.
pub const DEFAULT_SIGMA_DENSITY: f64 = 0.1;

/// Default number of engine worker threads.
pub const DEFAULT_THREADS: usize = 1;

/// Default DNA staining channels.
pub const DEFAULT_DNA_CHANNELS: [&str; 1] = ["dapi"];

/// Default signal channels.
pub const DEFAULT_SIG_CHANNELS: [&str; 2] = ["tmr", "cy5"];

/// Named groups every filename pattern must define.
pub const REQUIRED_GROUPS: [&str; 3] = ["channel_name", "channel_id", "series_id"];

/// Default filename pattern: `<channel_name>.channel<digits>.series<digits>[_cmle].tif`.
pub const DEFAULT_REGEXP: &str = r"^(?P<channel_name>[^/]*)\.channel(?P<channel_id>[0-9]+)\.series(?P<series_id>[0-9]+)(?P<ext>_cmle)?\.tif$";

/// Compiled [`DEFAULT_REGEXP`].
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_default_image_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(DEFAULT_REGEXP).expect("Invalid default filename pattern"))
}

/// Terminal sequence clearing the screen and homing the cursor.
pub const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";
