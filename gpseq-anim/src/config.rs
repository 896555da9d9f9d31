use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::choices::{AnType, MidType, NuclearSel, SegType};
use crate::constants::{CONFIG_FILENAME, CONFIG_SECTION};

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default, rename = "gpseq-anim")]
    /// The main configuration section.
    pub gpseq: GpseqConfig,
    /// The path to the configuration file this was loaded from.
    /// Set during loading, `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
/// Per-project defaults for a run. Every key is optional.
pub struct GpseqConfig {
    /// Voxel aspect as (Z, Y, X).
    pub aspect: Option<[f64; 3]>,
    /// Unit of the voxel aspect.
    pub umes: Option<String>,
    /// DNA staining channel names.
    pub dna_channels: Option<Vec<String>>,
    /// Signal channel names.
    pub sig_channels: Option<Vec<String>>,
    /// Minimum Z extension of a nucleus.
    pub min_z: Option<f64>,
    /// Segmentation type.
    pub seg_type: Option<SegType>,
    /// Analysis type.
    pub an_type: Option<AnType>,
    /// Mid-section method.
    pub mid_type: Option<MidType>,
    /// Nuclear selection features.
    pub nuclear_sel: Option<Vec<NuclearSel>>,
    /// Sigma of the profile smoothing.
    pub sigma_smooth: Option<f64>,
    /// Sigma of the density estimation.
    pub sigma_density: Option<f64>,
    /// Number of engine threads.
    pub threads: Option<u16>,
    /// Filename pattern.
    pub regexp: Option<String>,
    /// Rescale deconvolved images.
    pub rescale_deconvolved: Option<bool>,
    /// Normalize distances on the nuclear radius.
    pub normalize_distance: Option<bool>,
    /// Analysis engine executable.
    pub engine: Option<String>,
}

impl Config {
    /// Loads configuration starting from a specific path and traversing up.
    ///
    /// The output directory may not exist yet, so missing directories are
    /// skipped while walking towards the root.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Self::load_file(&candidate);
            }
            if !current.pop() {
                break;
            }
        }

        Config::default()
    }

    /// Loads an explicit configuration file.
    ///
    /// Unreadable or malformed files yield the default configuration.
    #[must_use]
    pub fn load_file(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read configuration file");
                return Config::default();
            }
        };
        match toml::from_str::<Config>(&content) {
            Ok(mut config) => {
                tracing::debug!(path = %path.display(), "loaded [{CONFIG_SECTION}] configuration");
                config.config_file_path = Some(path.to_path_buf());
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed configuration file");
                Config::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_path_no_config() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from_path(dir.path());
        assert_eq!(config.gpseq, GpseqConfig::default());
        assert!(config.config_file_path.is_none());
    }

    #[test]
    fn test_load_from_path_reads_section() {
        let dir = TempDir::new().unwrap();
        let mut file = std::fs::File::create(dir.path().join(CONFIG_FILENAME)).unwrap();
        writeln!(
            file,
            r#"[gpseq-anim]
aspect = [250.0, 130.0, 130.0]
seg_type = "sum_proj"
mid_type = "maxIsum"
nuclear_sel = ["size", "meanI"]
threads = 8
"#
        )
        .unwrap();

        let config = Config::load_from_path(dir.path());
        assert_eq!(config.gpseq.aspect, Some([250.0, 130.0, 130.0]));
        assert_eq!(config.gpseq.seg_type, Some(SegType::SumProj));
        assert_eq!(config.gpseq.mid_type, Some(MidType::MaxIntensitySum));
        assert_eq!(
            config.gpseq.nuclear_sel,
            Some(vec![NuclearSel::Size, NuclearSel::MeanIntensity])
        );
        assert_eq!(config.gpseq.threads, Some(8));
        assert!(config.config_file_path.is_some());
    }

    #[test]
    fn test_load_from_missing_path_traverses_up() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILENAME),
            "[gpseq-anim]\numes = \"um\"\n",
        )
        .unwrap();

        // Output directories usually do not exist before the run.
        let config = Config::load_from_path(&dir.path().join("out").join("run1"));
        assert_eq!(config.gpseq.umes.as_deref(), Some("um"));
    }

    #[test]
    fn test_unknown_choice_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[gpseq-anim]\nan_type = \"volume\"\n").unwrap();

        let config = Config::load_file(&path);
        assert_eq!(config.gpseq, GpseqConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_file(&dir.path().join("absent.toml"));
        assert!(config.config_file_path.is_none());
    }
}
