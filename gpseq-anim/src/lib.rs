//! Front end for GPSeq image analysis runs.
//!
//! This library turns command-line options into a validated run
//! configuration, shows it, asks for confirmation and hands it to the
//! external analysis engine.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module defining the command-line interface arguments.
pub mod cli;

/// Module containing the closed choice sets and their integer codes.
pub mod choices;

/// Module for parsing `condition:description` pairs.
pub mod conditions;

/// Module for loading the per-project configuration file.
pub mod config;

/// Module for the interactive confirmation gate.
pub mod confirm;

/// Module containing shared constants and default values.
pub mod constants;

/// Module defining the entry point logic shared by the binaries.
pub mod entry_point;

/// Module defining the front-end error type.
pub mod error;

/// Module for initializing diagnostics.
pub mod logging;

/// Module for recognizing image file names.
pub mod naming;

/// Module for rendering the run summary.
pub mod output;

/// Module defining the boundary with the analysis engine.
pub mod pipeline;

/// Module translating raw options into the run configuration.
pub mod resolve;
