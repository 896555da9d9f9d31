//! Translation of raw command-line options into the run configuration.
//!
//! [`resolve`] merges three layers (command line, configuration file,
//! built-in defaults), validates the result and produces a [`ResolvedConfig`],
//! which is never mutated afterwards.

use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::choices::{AnType, MidType, NuclearSel, SegType, Stage, DEFAULT_NUCLEAR_SEL};
use crate::cli::Cli;
use crate::conditions::parse_descriptions;
use crate::config::GpseqConfig;
use crate::constants::{
    DEFAULT_ASPECT, DEFAULT_DNA_CHANNELS, DEFAULT_MIN_Z, DEFAULT_REGEXP, DEFAULT_SIGMA_DENSITY,
    DEFAULT_SIGMA_SMOOTH, DEFAULT_SIG_CHANNELS, DEFAULT_THREADS, DEFAULT_UMES,
};
use crate::error::FrontendError;
use crate::naming::compile_pattern;

/// Physical size of a voxel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aspect {
    /// Z size.
    pub z: f64,
    /// Y size.
    pub y: f64,
    /// X size.
    pub x: f64,
}

impl Aspect {
    /// Builds an aspect from a (Z, Y, X) triple.
    #[must_use]
    pub fn from_zyx([z, y, x]: [f64; 3]) -> Self {
        Self { z, y, x }
    }

    /// Returns the (Z, Y, X) triple.
    #[must_use]
    pub fn as_zyx(&self) -> [f64; 3] {
        [self.z, self.y, self.x]
    }
}

/// Minimum Z extension a nucleus must have to be kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MinZ {
    /// Fraction of the stack height, in `[0, 1]`.
    Fraction(f64),
    /// Absolute number of slices.
    Slices(u32),
}

impl MinZ {
    /// Interprets `value`: fractions up to 1, slice counts above.
    ///
    /// # Errors
    ///
    /// Rejects negative or non-finite values, and slice counts that are not
    /// whole numbers.
    pub fn from_value(value: f64) -> Result<Self, FrontendError> {
        if !value.is_finite() || value < 0.0 {
            return Err(FrontendError::InvalidValue {
                option: "--min-z",
                reason: format!("{value} must be a non-negative number"),
            });
        }
        if value <= 1.0 {
            return Ok(MinZ::Fraction(value));
        }
        if value > f64::from(u32::MAX) {
            return Err(FrontendError::InvalidValue {
                option: "--min-z",
                reason: format!("{value} slices is out of range"),
            });
        }
        if value.fract() > 0.0 {
            return Err(FrontendError::InvalidValue {
                option: "--min-z",
                reason: format!("{value} is above 1 and must be a whole number of slices"),
            });
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let slices = value.trunc() as u32;
        Ok(MinZ::Slices(slices))
    }

    /// The value as handed to the engine.
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            MinZ::Fraction(fraction) => fraction,
            MinZ::Slices(slices) => f64::from(slices),
        }
    }
}

/// The fully translated run configuration.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Directory with the dataset images.
    pub in_dir: PathBuf,
    /// Directory receiving the analysis output.
    pub out_dir: PathBuf,
    /// Log file path.
    pub log_path: PathBuf,
    /// Stages the engine must skip.
    pub skip: BTreeSet<Stage>,
    /// Voxel aspect.
    pub aspect: Aspect,
    /// Unit of the voxel aspect.
    pub umes: String,
    /// DNA staining channel names, in command-line order.
    pub dna_channels: Box<[String]>,
    /// Signal channel names, in command-line order.
    pub sig_channels: Box<[String]>,
    /// Minimum Z extension of a nucleus.
    pub min_z: MinZ,
    /// Segmentation type.
    pub seg_type: SegType,
    /// Analysis type.
    pub an_type: AnType,
    /// Mid-section method.
    pub mid_type: MidType,
    /// Nuclear selection features.
    pub nuclear_sel: Box<[NuclearSel]>,
    /// Sigma of the profile smoothing.
    pub sigma_smooth: f64,
    /// Sigma of the density estimation.
    pub sigma_density: f64,
    /// Condition name → description.
    pub descriptions: BTreeMap<String, String>,
    /// Number of engine threads.
    pub threads: usize,
    /// Free-text note.
    pub note: Option<String>,
    /// Compiled filename pattern.
    pub regexp: Regex,
    /// Rescale deconvolved images.
    pub rescale_deconvolved: bool,
    /// Normalize distances on the nuclear radius.
    pub normalize_distance: bool,
    /// Debug mode.
    pub debug_mode: bool,
}

fn check_positive(option: &'static str, value: f64) -> Result<f64, FrontendError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(FrontendError::InvalidValue {
            option,
            reason: format!("{value} must be a positive number"),
        })
    }
}

fn owned_list(values: Option<Vec<String>>, default: &[&str]) -> Box<[String]> {
    values
        .unwrap_or_else(|| default.iter().map(|&s| s.to_owned()).collect())
        .into_boxed_slice()
}

/// Caps `requested` at the machine's available parallelism.
#[must_use]
pub fn cap_threads(requested: usize) -> usize {
    let available = std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get);
    cap_threads_to(requested, available)
}

/// Caps `requested` at `available`.
#[must_use]
pub fn cap_threads_to(requested: usize, available: usize) -> usize {
    if requested > available {
        tracing::warn!(requested, available, "capping thread count to available cores");
        available
    } else {
        requested
    }
}

/// Builds the run configuration.
///
/// `log_name` is only called when no explicit log path was given; the
/// default log path is `<out_dir>/<log_name()>`.
///
/// # Errors
///
/// Returns the first validation failure.
pub fn resolve(
    cli: Cli,
    file: GpseqConfig,
    log_name: impl FnOnce() -> String,
) -> Result<ResolvedConfig, FrontendError> {
    if !cli.in_dir.is_dir() {
        return Err(FrontendError::MissingInputDir(cli.in_dir));
    }

    let aspect = match cli.aspect {
        Some(values) => {
            let triple: [f64; 3] =
                values
                    .try_into()
                    .map_err(|values: Vec<f64>| FrontendError::InvalidValue {
                        option: "--aspect",
                        reason: format!("expected 3 values, got {}", values.len()),
                    })?;
            triple
        }
        None => file.aspect.unwrap_or(DEFAULT_ASPECT),
    };
    for value in aspect {
        check_positive("--aspect", value)?;
    }

    let min_z = MinZ::from_value(cli.min_z.or(file.min_z).unwrap_or(DEFAULT_MIN_Z))?;
    let sigma_smooth = check_positive(
        "--sigma-smooth",
        cli.sigma_smooth
            .or(file.sigma_smooth)
            .unwrap_or(DEFAULT_SIGMA_SMOOTH),
    )?;
    let sigma_density = check_positive(
        "--sigma-density",
        cli.sigma_density
            .or(file.sigma_density)
            .unwrap_or(DEFAULT_SIGMA_DENSITY),
    )?;

    let pattern = cli.regexp.or(file.regexp);
    let regexp = compile_pattern(pattern.as_deref().unwrap_or(DEFAULT_REGEXP))?;
    let descriptions = parse_descriptions(&cli.description)?;

    let threads = cap_threads(
        cli.threads
            .or(file.threads)
            .map_or(DEFAULT_THREADS, usize::from),
    );

    let log_path = cli
        .logpath
        .unwrap_or_else(|| default_log_path(&cli.out_dir, &log_name()));

    Ok(ResolvedConfig {
        in_dir: cli.in_dir,
        out_dir: cli.out_dir,
        log_path,
        skip: cli.skip.into_iter().collect(),
        aspect: Aspect::from_zyx(aspect),
        umes: cli
            .umes
            .or(file.umes)
            .unwrap_or_else(|| DEFAULT_UMES.to_owned()),
        dna_channels: owned_list(cli.dna_channels.or(file.dna_channels), &DEFAULT_DNA_CHANNELS),
        sig_channels: owned_list(cli.sig_channels.or(file.sig_channels), &DEFAULT_SIG_CHANNELS),
        min_z,
        seg_type: cli.seg_type.or(file.seg_type).unwrap_or_default(),
        an_type: cli.an_type.or(file.an_type).unwrap_or_default(),
        mid_type: cli.mid_type.or(file.mid_type).unwrap_or_default(),
        nuclear_sel: cli
            .nuclear_sel
            .or(file.nuclear_sel)
            .unwrap_or_else(|| DEFAULT_NUCLEAR_SEL.to_vec())
            .into_boxed_slice(),
        sigma_smooth,
        sigma_density,
        descriptions,
        threads,
        note: cli.note,
        regexp,
        rescale_deconvolved: cli.rescale_deconvolved || file.rescale_deconvolved.unwrap_or(false),
        normalize_distance: cli.normalize_distance || file.normalize_distance.unwrap_or(false),
        debug_mode: cli.debug_mode,
    })
}

/// `<out_dir>/<log_name>`.
#[must_use]
pub fn default_log_path(out_dir: &Path, log_name: &str) -> PathBuf {
    out_dir.join(log_name)
}

/// Settings in the shape the analysis engine reads: every choice is an
/// integer code.
#[derive(Debug, Clone, Serialize)]
pub struct EngineSettings {
    /// Input directory.
    pub basedir: PathBuf,
    /// Output directory.
    pub outdir: PathBuf,
    /// Log file path.
    pub logpath: PathBuf,
    /// Skipped stage codes, ascending.
    pub skip: Vec<u8>,
    /// Voxel aspect as (Z, Y, X).
    pub aspect: [f64; 3],
    /// Aspect unit.
    pub umes: String,
    /// DNA channel names.
    pub dna_names: Vec<String>,
    /// Signal channel names.
    pub sig_names: Vec<String>,
    /// Minimum Z extension.
    pub min_z_size: f64,
    /// Whether `min_z_size` is a fraction of the stack.
    pub min_z_is_fraction: bool,
    /// Segmentation type code.
    pub seg_type: u8,
    /// Analysis type code.
    pub an_type: u8,
    /// Mid-section method code.
    pub mid_type: u8,
    /// Nuclear selection feature codes.
    pub nsf: Vec<u8>,
    /// Profile smoothing sigma.
    pub sigma_smooth: f64,
    /// Density estimation sigma.
    pub sigma_density: f64,
    /// Condition descriptions.
    pub cdescr: BTreeMap<String, String>,
    /// Engine threads.
    pub ncores: usize,
    /// Free-text note.
    pub notes: Option<String>,
    /// Filename pattern source.
    pub reg: String,
    /// Rescale deconvolved images.
    pub rescale_deconvolved: bool,
    /// Normalize distances.
    pub normalize_distance: bool,
    /// Debug mode.
    pub debugging: bool,
}

impl ResolvedConfig {
    /// Collaborator-shaped view of the configuration.
    #[must_use]
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            basedir: self.in_dir.clone(),
            outdir: self.out_dir.clone(),
            logpath: self.log_path.clone(),
            skip: self.skip.iter().map(|s| s.ordinal()).collect(),
            aspect: self.aspect.as_zyx(),
            umes: self.umes.clone(),
            dna_names: self.dna_channels.to_vec(),
            sig_names: self.sig_channels.to_vec(),
            min_z_size: self.min_z.value(),
            min_z_is_fraction: matches!(self.min_z, MinZ::Fraction(_)),
            seg_type: self.seg_type.ordinal(),
            an_type: self.an_type.ordinal(),
            mid_type: self.mid_type.ordinal(),
            nsf: self.nuclear_sel.iter().map(|n| n.ordinal()).collect(),
            sigma_smooth: self.sigma_smooth,
            sigma_density: self.sigma_density,
            cdescr: self.descriptions.clone(),
            ncores: self.threads,
            notes: self.note.clone(),
            reg: self.regexp.as_str().to_owned(),
            rescale_deconvolved: self.rescale_deconvolved,
            normalize_distance: self.normalize_distance,
            debugging: self.debug_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_z_threshold_interpretation() {
        assert_eq!(MinZ::from_value(0.25).unwrap(), MinZ::Fraction(0.25));
        assert_eq!(MinZ::from_value(1.0).unwrap(), MinZ::Fraction(1.0));
        assert_eq!(MinZ::from_value(5.0).unwrap(), MinZ::Slices(5));
        assert!(MinZ::from_value(5.9).is_err());
        assert!(MinZ::from_value(-0.5).is_err());
        assert!(MinZ::from_value(f64::NAN).is_err());
    }

    #[test]
    fn test_default_log_path_is_inside_out_dir() {
        let path = default_log_path(Path::new("/data/out"), "20260101-000000_gpseq-anim.log");
        assert!(path.starts_with("/data/out/"));
        assert_eq!(path, PathBuf::from("/data/out/20260101-000000_gpseq-anim.log"));
    }

    #[test]
    fn test_thread_cap() {
        assert_eq!(cap_threads_to(8, 4), 4);
        assert_eq!(cap_threads_to(2, 4), 2);
        assert_eq!(cap_threads_to(4, 4), 4);
        assert_eq!(cap_threads(1), 1);
    }
}
