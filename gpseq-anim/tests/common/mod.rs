//! Shared helpers for integration tests.
#![allow(dead_code, clippy::unwrap_used)]

use anyhow::Result;
use gpseq_anim::pipeline::Pipeline;
use gpseq_anim::resolve::ResolvedConfig;
use std::io::Cursor;
use tempfile::TempDir;

/// Log name returned by [`RecordingPipeline`].
pub const FIXED_LOG_NAME: &str = "20260101-000000_gpseq-anim.log";

/// Pipeline that remembers the configuration it was run with.
#[derive(Debug, Default)]
pub struct RecordingPipeline {
    pub runs: Vec<ResolvedConfig>,
    pub exit_code: i32,
}

impl Pipeline for RecordingPipeline {
    fn log_name(&self) -> String {
        FIXED_LOG_NAME.to_owned()
    }

    fn run(&mut self, config: &ResolvedConfig) -> Result<i32> {
        self.runs.push(config.clone());
        Ok(self.exit_code)
    }
}

/// Input and output directories for one run.
pub struct Dataset {
    pub root: TempDir,
}

impl Dataset {
    /// Creates `in/` with two series of images; `out/` is left to the run.
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        let in_dir = root.path().join("in");
        std::fs::create_dir(&in_dir).unwrap();
        for name in [
            "dapi.channel001.series001.tif",
            "tmr.channel002.series001.tif",
            "dapi.channel001.series002_cmle.tif",
        ] {
            std::fs::write(in_dir.join(name), b"").unwrap();
        }
        Self { root }
    }

    pub fn in_dir(&self) -> String {
        self.root.path().join("in").to_string_lossy().into_owned()
    }

    pub fn out_dir(&self) -> String {
        self.root.path().join("out").to_string_lossy().into_owned()
    }

    /// Positional arguments followed by `extra`.
    pub fn args(&self, extra: &[&str]) -> Vec<String> {
        let mut args = vec![self.in_dir(), self.out_dir()];
        args.extend(extra.iter().map(|&s| s.to_owned()));
        args
    }
}

/// Runs the front end with `answers` on stdin; returns (code, stdout, pipeline).
pub fn run(args: Vec<String>, answers: &str) -> (i32, String, RecordingPipeline) {
    let mut pipeline = RecordingPipeline::default();
    let mut input = Cursor::new(answers.as_bytes().to_vec());
    let mut out = Vec::new();
    let code =
        gpseq_anim::entry_point::run_with_pipeline(args, &mut input, &mut out, &mut pipeline)
            .unwrap();
    (code, String::from_utf8(out).unwrap(), pipeline)
}
