//! Closed choice sets accepted on the command line.
//!
//! Every enum here doubles as a translation table: `ordinal()` is the integer
//! code the analysis engine expects. The `match` in each `ordinal()` is
//! exhaustive, so a new variant cannot be added without giving it a code.

use clap::ValueEnum;
use serde::Deserialize;

/// A step of the analysis pipeline that can be skipped with `--skip`.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Instantiation of the series/condition tree.
    #[value(name = "inst")]
    #[serde(rename = "inst")]
    Instantiation,
    /// Nuclear segmentation.
    #[value(name = "seg")]
    #[serde(rename = "seg")]
    Segmentation,
    /// Per-nucleus analysis.
    #[value(name = "an")]
    #[serde(rename = "an")]
    Analysis,
    /// Profile boxing.
    #[value(name = "box")]
    #[serde(rename = "box")]
    Boxing,
    /// Plot generation.
    #[value(name = "plot")]
    #[serde(rename = "plot")]
    Plot,
    /// Final report.
    #[value(name = "report")]
    #[serde(rename = "report")]
    Report,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Stage; 6] = [
        Stage::Instantiation,
        Stage::Segmentation,
        Stage::Analysis,
        Stage::Boxing,
        Stage::Plot,
        Stage::Report,
    ];

    /// Numeric stage identifier.
    #[must_use]
    pub fn ordinal(self) -> u8 {
        match self {
            Stage::Instantiation => 0,
            Stage::Segmentation => 1,
            Stage::Analysis => 2,
            Stage::Boxing => 3,
            Stage::Plot => 4,
            Stage::Report => 5,
        }
    }

    /// Human-readable name used in the run summary.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Stage::Instantiation => "Instantiation",
            Stage::Segmentation => "Segmentation",
            Stage::Analysis => "Analysis",
            Stage::Boxing => "Box",
            Stage::Plot => "Plot",
            Stage::Report => "Report",
        }
    }
}

/// Projection used when segmenting nuclei.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegType {
    /// Sum projection along Z.
    #[value(name = "sum_proj")]
    #[serde(rename = "sum_proj")]
    SumProj,
    /// Max projection along Z.
    #[value(name = "max_proj")]
    #[serde(rename = "max_proj")]
    MaxProj,
    /// Full 3D segmentation.
    #[default]
    #[value(name = "3d")]
    #[serde(rename = "3d")]
    ThreeD,
}

impl SegType {
    /// Integer code of the segmentation type.
    #[must_use]
    pub fn ordinal(self) -> u8 {
        match self {
            SegType::SumProj => 0,
            SegType::MaxProj => 1,
            SegType::ThreeD => 2,
        }
    }

    /// Human-readable name used in the run summary.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SegType::SumProj => "Sum Z projection",
            SegType::MaxProj => "Max Z projection",
            SegType::ThreeD => "3D",
        }
    }
}

/// Volume on which nuclear profiles are computed.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnType {
    /// Sum projection along Z.
    #[value(name = "sum_proj")]
    #[serde(rename = "sum_proj")]
    SumProj,
    /// Max projection along Z.
    #[value(name = "max_proj")]
    #[serde(rename = "max_proj")]
    MaxProj,
    /// Whole 3D volume.
    #[value(name = "3d")]
    #[serde(rename = "3d")]
    ThreeD,
    /// A single mid-section, chosen with [`MidType`].
    #[default]
    #[value(name = "mid")]
    #[serde(rename = "mid")]
    Mid,
}

impl AnType {
    /// Integer code of the analysis type.
    #[must_use]
    pub fn ordinal(self) -> u8 {
        match self {
            AnType::SumProj => 0,
            AnType::MaxProj => 1,
            AnType::ThreeD => 2,
            AnType::Mid => 3,
        }
    }

    /// Human-readable name used in the run summary.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AnType::SumProj => "Sum Z projection",
            AnType::MaxProj => "Max Z projection",
            AnType::ThreeD => "3D",
            AnType::Mid => "Mid-section",
        }
    }
}

/// Strategy for picking the mid-section of a nucleus.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MidType {
    /// Central slice of the nuclear bounding box.
    #[value(name = "central")]
    #[serde(rename = "central")]
    Central,
    /// Slice with the largest nuclear area.
    #[default]
    #[value(name = "largest")]
    #[serde(rename = "largest")]
    Largest,
    /// Slice with the highest summed DNA intensity.
    #[value(name = "maxIsum")]
    #[serde(rename = "maxIsum")]
    MaxIntensitySum,
}

impl MidType {
    /// Integer code of the mid-section method.
    #[must_use]
    pub fn ordinal(self) -> u8 {
        match self {
            MidType::Central => 0,
            MidType::Largest => 1,
            MidType::MaxIntensitySum => 2,
        }
    }

    /// Human-readable name used in the run summary.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MidType::Central => "Central",
            MidType::Largest => "Largest",
            MidType::MaxIntensitySum => "Max intensity sum",
        }
    }
}

/// Feature used to select nuclei after segmentation.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NuclearSel {
    /// Nuclear volume (or area in 2D).
    #[value(name = "size")]
    #[serde(rename = "size")]
    Size,
    /// Nuclear surface.
    #[value(name = "surf")]
    #[serde(rename = "surf")]
    Surface,
    /// Shape descriptor.
    #[value(name = "shape")]
    #[serde(rename = "shape")]
    Shape,
    /// Summed DNA intensity.
    #[value(name = "sumI")]
    #[serde(rename = "sumI")]
    SumIntensity,
    /// Mean DNA intensity.
    #[value(name = "meanI")]
    #[serde(rename = "meanI")]
    MeanIntensity,
    /// Area of the Z projection.
    #[value(name = "flat_size")]
    #[serde(rename = "flat_size")]
    FlatSize,
}

impl NuclearSel {
    /// Integer code of the selection feature.
    #[must_use]
    pub fn ordinal(self) -> u8 {
        match self {
            NuclearSel::Size => 0,
            NuclearSel::Surface => 1,
            NuclearSel::Shape => 2,
            NuclearSel::SumIntensity => 3,
            NuclearSel::MeanIntensity => 4,
            NuclearSel::FlatSize => 5,
        }
    }

    /// Human-readable name used in the run summary.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            NuclearSel::Size => "Size",
            NuclearSel::Surface => "Surface",
            NuclearSel::Shape => "Shape",
            NuclearSel::SumIntensity => "Intensity sum",
            NuclearSel::MeanIntensity => "Mean intensity",
            NuclearSel::FlatSize => "Area",
        }
    }
}

/// Default nuclear selection features.
pub const DEFAULT_NUCLEAR_SEL: [NuclearSel; 2] = [NuclearSel::FlatSize, NuclearSel::SumIntensity];
