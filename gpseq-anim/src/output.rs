use colored::Colorize;
use std::io::Write;

use crate::choices::{AnType, Stage};
use crate::conditions::render_descriptions;
use crate::constants::CLEAR_SCREEN;
use crate::naming::InputPreview;
use crate::resolve::{MinZ, ResolvedConfig};

/// Print the main header with box-drawing characters.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_header(writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "{}",
        "╔════════════════════════════════════════╗".cyan()
    )?;
    writeln!(
        writer,
        "{}",
        format!("║  GPSeq image analysis  v{:<15}║", env!("CARGO_PKG_VERSION"))
            .cyan()
            .bold()
    )?;
    writeln!(
        writer,
        "{}",
        "╚════════════════════════════════════════╝".cyan()
    )?;
    writeln!(writer)?;
    Ok(())
}

fn section(writer: &mut impl Write, title: &str) -> std::io::Result<()> {
    writeln!(writer, "{}", format!(" {title}").yellow().bold())
}

fn row(writer: &mut impl Write, key: &str, value: impl std::fmt::Display) -> std::io::Result<()> {
    writeln!(writer, "   {:<26} {}", format!("{key}:").dimmed(), value)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn list(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_owned()
    } else {
        items.join(", ")
    }
}

/// Clears the screen and prints every resolved setting.
///
/// The layout is fixed: one line per setting, grouped in sections, in the
/// same order on every run.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_summary(
    writer: &mut impl Write,
    config: &ResolvedConfig,
    preview: &InputPreview,
) -> std::io::Result<()> {
    write!(writer, "{CLEAR_SCREEN}")?;
    print_header(writer)?;

    section(writer, "Paths")?;
    row(writer, "Input directory", config.in_dir.display())?;
    row(writer, "Output directory", config.out_dir.display())?;
    row(writer, "Log file", config.log_path.display())?;
    row(
        writer,
        "Images found",
        format!(
            "{} in {} series ({} deconvolved)",
            preview.images, preview.series, preview.deconvolved
        ),
    )?;
    writeln!(writer)?;

    section(writer, "Stages")?;
    for stage in Stage::ALL {
        let state = if config.skip.contains(&stage) {
            "skip".red().to_string()
        } else {
            "run".green().to_string()
        };
        row(writer, stage.label(), state)?;
    }
    writeln!(writer)?;

    section(writer, "Images")?;
    let [z, y, x] = config.aspect.as_zyx();
    row(
        writer,
        "Voxel aspect (ZYX)",
        format!("({z:.3}, {y:.3}, {x:.3}) [{}]", config.umes),
    )?;
    row(writer, "DNA channels", list(&config.dna_channels))?;
    row(writer, "Signal channels", list(&config.sig_channels))?;
    row(writer, "Filename pattern", config.regexp.as_str())?;
    row(
        writer,
        "Rescale deconvolved",
        yes_no(config.rescale_deconvolved),
    )?;
    writeln!(writer)?;

    section(writer, "Segmentation & analysis")?;
    row(writer, "Segmentation type", config.seg_type.label())?;
    row(writer, "Analysis type", config.an_type.label())?;
    if config.an_type == AnType::Mid {
        row(writer, "Mid-section method", config.mid_type.label())?;
    }
    let min_z = match config.min_z {
        MinZ::Fraction(fraction) => format!("{:.0}% of the stack", fraction * 100.0),
        MinZ::Slices(slices) => format!("{slices} slices"),
    };
    row(writer, "Minimum Z extension", min_z)?;
    let features: Vec<String> = config
        .nuclear_sel
        .iter()
        .map(|f| f.label().to_owned())
        .collect();
    row(writer, "Nuclear selection", list(&features))?;
    row(writer, "Smoothing sigma", config.sigma_smooth)?;
    row(writer, "Density sigma", config.sigma_density)?;
    row(
        writer,
        "Normalize distance",
        yes_no(config.normalize_distance),
    )?;
    writeln!(writer)?;

    section(writer, "Run")?;
    row(writer, "Threads", config.threads)?;
    row(writer, "Debug mode", yes_no(config.debug_mode))?;
    row(writer, "Note", config.note.as_deref().unwrap_or("-"))?;
    let descriptions = render_descriptions(&config.descriptions);
    if descriptions.is_empty() {
        row(writer, "Conditions", "-")?;
    } else {
        row(writer, "Conditions", descriptions.len())?;
        for entry in descriptions {
            writeln!(writer, "     {entry}")?;
        }
    }
    writeln!(writer)?;
    Ok(())
}
