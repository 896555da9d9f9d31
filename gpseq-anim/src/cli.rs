use clap::Parser;
use std::path::PathBuf;

use crate::choices::{AnType, MidType, NuclearSel, SegType, Stage};

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.gpseq-anim.toml):
  Searched upwards from OUT_DIR (or given with --config). Command-line
  flags take precedence over the file.

  [gpseq-anim]
  aspect = [300.0, 216.6, 216.6]  # Voxel aspect (Z, Y, X)
  umes = \"nm\"                     # Aspect unit
  dna_channels = [\"dapi\"]
  sig_channels = [\"tmr\", \"cy5\"]
  min_z = 0.25                    # Fraction if <= 1, slices otherwise
  seg_type = \"3d\"                 # sum_proj, max_proj, 3d
  an_type = \"mid\"                 # sum_proj, max_proj, 3d, mid
  mid_type = \"largest\"            # central, largest, maxIsum
  nuclear_sel = [\"flat_size\", \"sumI\"]
  sigma_smooth = 0.1
  sigma_density = 0.1
  threads = 1
  engine = \"gpseq-engine\"         # Analysis engine executable
";

/// Command line interface configuration using `clap`.
///
/// This is the raw, untranslated view of the run: values are exactly what
/// was typed, and options left out are `None` so the configuration file can
/// fill them before built-in defaults apply.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "gpseq-anim",
    author,
    version,
    about = "Configure and launch a GPSeq image analysis run",
    long_about = None,
    after_help = CONFIG_HELP
)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are legitimately booleans
pub struct Cli {
    /// Directory containing the dataset images.
    #[arg(value_name = "IN_DIR")]
    pub in_dir: PathBuf,

    /// Directory receiving the analysis output.
    #[arg(value_name = "OUT_DIR")]
    pub out_dir: PathBuf,

    /// Pipeline steps to skip.
    #[arg(long, value_enum, num_args = 1..)]
    pub skip: Vec<Stage>,

    /// Log file path [default: OUT_DIR/<timestamp>_gpseq-anim.log].
    #[arg(short = 'l', long)]
    pub logpath: Option<PathBuf>,

    /// Physical size of a voxel, as Z Y X [default: 300.0 216.6 216.6].
    #[arg(short = 'a', long, num_args = 3, value_names = ["Z", "Y", "X"])]
    pub aspect: Option<Vec<f64>>,

    /// Unit of the voxel aspect [default: nm].
    #[arg(short = 'U', long)]
    pub umes: Option<String>,

    /// Names of the DNA staining channels [default: dapi].
    #[arg(short = 'd', long, num_args = 1..)]
    pub dna_channels: Option<Vec<String>>,

    /// Names of the signal channels [default: tmr cy5].
    #[arg(short = 's', long, num_args = 1..)]
    pub sig_channels: Option<Vec<String>>,

    /// Minimum Z extension of a nucleus: a fraction of the stack if <= 1,
    /// a whole number of slices otherwise [default: 0.25].
    #[arg(short = 'z', long, allow_negative_numbers = true)]
    pub min_z: Option<f64>,

    /// Segmentation type [default: 3d].
    #[arg(long, value_enum)]
    pub seg_type: Option<SegType>,

    /// Analysis type [default: mid].
    #[arg(long, value_enum)]
    pub an_type: Option<AnType>,

    /// Method used to select the mid-section [default: largest].
    #[arg(long, value_enum)]
    pub mid_type: Option<MidType>,

    /// Features used to select nuclei [default: flat_size sumI].
    #[arg(long, value_enum, num_args = 1..)]
    pub nuclear_sel: Option<Vec<NuclearSel>>,

    /// Sigma of the Gaussian smoothing of profiles [default: 0.1].
    #[arg(long)]
    pub sigma_smooth: Option<f64>,

    /// Sigma of the Gaussian used for density estimation [default: 0.1].
    #[arg(long)]
    pub sigma_density: Option<f64>,

    /// Condition descriptions, as CONDITION:DESCRIPTION.
    #[arg(long, num_args = 1.., value_name = "COND:DESC")]
    pub description: Vec<String>,

    /// Number of threads for the analysis engine [default: 1].
    #[arg(short = 't', long, value_parser = clap::value_parser!(u16).range(1..))]
    pub threads: Option<u16>,

    /// Free-text note stored with the run.
    #[arg(long)]
    pub note: Option<String>,

    /// Regular expression recognizing image file names. Must define the
    /// named groups channel_name, channel_id and series_id.
    #[arg(long)]
    pub regexp: Option<String>,

    /// Rescale deconvolved images.
    #[arg(short = 'r', long)]
    pub rescale_deconvolved: bool,

    /// Normalize distances on the nuclear radius.
    #[arg(short = 'n', long)]
    pub normalize_distance: bool,

    /// Debug mode: verbose diagnostics and engine debugging.
    #[arg(short = 'u', long = "DEBUG-MODE")]
    pub debug_mode: bool,

    /// Start the run without asking for confirmation.
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Read this configuration file instead of searching for one.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Analysis engine executable.
    #[arg(long)]
    pub engine: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("gpseq-anim").chain(args.iter().copied()))
    }

    #[test]
    fn test_positionals_are_required() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["in"]).is_err());
        let cli = parse(&["in", "out"]).unwrap();
        assert_eq!(cli.in_dir, PathBuf::from("in"));
        assert_eq!(cli.out_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_omitted_options_stay_unset() {
        let cli = parse(&["in", "out"]).unwrap();
        assert!(cli.aspect.is_none());
        assert!(cli.seg_type.is_none());
        assert!(cli.threads.is_none());
        assert!(cli.skip.is_empty());
        assert!(!cli.debug_mode);
    }

    #[test]
    fn test_aspect_takes_three_values() {
        let cli = parse(&["-a", "250", "100", "100", "in", "out"]).unwrap();
        assert_eq!(cli.aspect, Some(vec![250.0, 100.0, 100.0]));
        assert!(parse(&["in", "out", "-a", "250", "100"]).is_err());
    }

    #[test]
    fn test_out_of_set_choice_is_rejected() {
        let err = parse(&["in", "out", "--seg-type", "mid"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
        assert!(parse(&["in", "out", "--skip", "everything"]).is_err());
        assert!(parse(&["in", "out", "--nuclear-sel", "volume"]).is_err());
    }

    #[test]
    fn test_zero_threads_is_rejected() {
        assert!(parse(&["in", "out", "-t", "0"]).is_err());
        assert_eq!(parse(&["in", "out", "-t", "4"]).unwrap().threads, Some(4));
    }

    #[test]
    fn test_debug_mode_spelling() {
        assert!(parse(&["in", "out", "--DEBUG-MODE"]).unwrap().debug_mode);
        assert!(parse(&["in", "out", "-u"]).unwrap().debug_mode);
    }

    #[test]
    fn test_skip_accepts_several_stages() {
        let cli = parse(&["in", "out", "--skip", "seg", "report"]).unwrap();
        assert_eq!(cli.skip, vec![Stage::Segmentation, Stage::Report]);
    }
}
