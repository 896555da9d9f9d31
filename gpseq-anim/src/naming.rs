//! Image filename recognition.

use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::constants::{get_default_image_re, DEFAULT_REGEXP, REQUIRED_GROUPS};
use crate::error::FrontendError;

/// Compiles a filename pattern and checks it defines every required group.
///
/// # Errors
///
/// Returns [`FrontendError::InvalidPattern`] if the pattern does not compile and
/// [`FrontendError::MissingCaptureGroup`] if a required group is absent.
pub fn compile_pattern(pattern: &str) -> Result<Regex, FrontendError> {
    if pattern == DEFAULT_REGEXP {
        return Ok(get_default_image_re().clone());
    }
    let re = Regex::new(pattern).map_err(|source| FrontendError::InvalidPattern {
        pattern: pattern.to_owned(),
        source,
    })?;
    let names: Vec<&str> = re.capture_names().flatten().collect();
    for group in REQUIRED_GROUPS {
        if !names.contains(&group) {
            return Err(FrontendError::MissingCaptureGroup(group));
        }
    }
    Ok(re)
}

/// Fields captured from an image filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageName {
    /// Channel name, e.g. `dapi`.
    pub channel_name: String,
    /// Channel identifier.
    pub channel_id: String,
    /// Series identifier.
    pub series_id: String,
    /// Whether the `ext` group matched, marking a deconvolved image.
    pub deconvolved: bool,
}

impl ImageName {
    /// Matches `file_name` against `re`.
    ///
    /// Returns `None` when the name does not match.
    #[must_use]
    pub fn parse(re: &Regex, file_name: &str) -> Option<Self> {
        let caps = re.captures(file_name)?;
        let group = |name: &str| caps.name(name).map(|m| m.as_str().to_owned());
        Some(Self {
            channel_name: group("channel_name")?,
            channel_id: group("channel_id")?,
            series_id: group("series_id")?,
            deconvolved: caps.name("ext").is_some_and(|m| !m.as_str().is_empty()),
        })
    }
}

/// Images found in the input directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputPreview {
    /// Number of matching files.
    pub images: usize,
    /// Number of distinct series ids among them.
    pub series: usize,
    /// Number of matching files marked as deconvolved.
    pub deconvolved: usize,
}

/// Counts the files directly inside `dir` whose names match `re`.
///
/// Unreadable directories yield an empty preview.
#[must_use]
pub fn preview_input(dir: &Path, re: &Regex) -> InputPreview {
    let Ok(entries) = fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "cannot list input directory");
        return InputPreview::default();
    };

    let mut preview = InputPreview::default();
    let mut series = BTreeSet::new();
    for entry in entries.flatten() {
        if !entry.path().is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(image) = ImageName::parse(re, &file_name.to_string_lossy()) else {
            tracing::debug!(file = ?file_name, "skipping non-matching file");
            continue;
        };
        preview.images += 1;
        if image.deconvolved {
            preview.deconvolved += 1;
        }
        series.insert(image.series_id);
    }
    preview.series = series.len();
    preview
}
