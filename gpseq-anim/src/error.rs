use std::path::PathBuf;

/// Failures raised while turning command-line input into a run.
#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    /// A `--description` entry without the `condition:description` colon.
    #[error("Malformed condition description '{0}': expected CONDITION:DESCRIPTION")]
    MalformedCondition(String),

    /// The filename pattern does not compile.
    #[error("Invalid filename pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// Compilation error reported by the regex engine.
        #[source]
        source: regex::Error,
    },

    /// The filename pattern compiles but lacks a required named group.
    #[error("Filename pattern is missing the named group '{0}'")]
    MissingCaptureGroup(&'static str),

    /// The input directory does not exist or is not a directory.
    #[error("The input directory '{}' does not exist.", .0.display())]
    MissingInputDir(PathBuf),

    /// A numeric option is outside its accepted range.
    #[error("Invalid value for {option}: {reason}")]
    InvalidValue {
        /// Option name as typed on the command line.
        option: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Standard input closed before the run was confirmed.
    #[error("Input closed before the run was confirmed")]
    InputExhausted,

    /// The analysis engine could not be launched.
    #[error("Failed to launch analysis engine '{engine}': {source}")]
    EngineSpawn {
        /// Executable that was spawned.
        engine: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
}
