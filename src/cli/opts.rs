use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// Command-line options for the dot-plot comparison tool.
#[derive(Parser, Debug)]
#[command(
    name = "dotplot",
    about = "Render a dot-plot comparison between two sequences",
    author = "dotplot contributors",
    version = "0.1.0"
)]
#[clap(group = ArgGroup::new("persist").args(&["save", "load"]).multiple(false))]
pub struct Cli {
    /// FASTA file(s) for the X axis [path] (repeatable)
    #[clap(short = 'x', long = "x-fasta", value_parser, num_args = 1.., required_unless_present = "load", help_heading = "Core")]
    pub x_fasta: Vec<PathBuf>,

    /// FASTA file(s) for the Y axis [path] (repeatable)
    #[clap(short = 'y', long = "y-fasta", value_parser, num_args = 1.., required_unless_present = "load", help_heading = "Core")]
    pub y_fasta: Vec<PathBuf>,

    /// Output image path (written as a raw PGM) [path]
    #[clap(short = 'o', long, value_parser, help_heading = "Core")]
    pub output: Option<PathBuf>,

    /// Longest-side length of the rendered grid, in pixels [integer]
    #[clap(short = 's', long, default_value = "1000", help_heading = "Core")]
    pub size: u32,

    /// K-tuple (seed) size [integer]
    #[clap(short = 'k', long, default_value = "8", help_heading = "Core")]
    pub k: u32,

    /// Sliding mismatch-tolerance window size [integer]
    #[clap(short = 'w', long, default_value = "16", help_heading = "Core")]
    pub window: u32,

    /// Minimum reported match length [integer]
    #[clap(short = 'm', long, default_value = "8", help_heading = "Core")]
    pub min_match: u32,

    /// Mismatch budget per window [integer]
    #[clap(short = 'd', long, default_value = "0", help_heading = "Core")]
    pub mismatch: u32,

    /// Save the computed plot to a `_FDP` container [path]
    #[clap(short = 'S', long, value_parser, group = "persist", help_heading = "Persistence (select one)")]
    pub save: Option<PathBuf>,

    /// Load a previously saved plot instead of recomputing [path]
    #[clap(short = 'L', long, value_parser, group = "persist", help_heading = "Persistence (select one)")]
    pub load: Option<PathBuf>,

    /// Crop the rendered image to the sub-rectangle starting at this X
    /// coordinate instead of the whole X axis [integer]. Must be given
    /// together with `--crop-y1`, `--crop-x2`, and `--crop-y2`.
    #[clap(long, help_heading = "Core")]
    pub crop_x1: Option<i32>,

    /// Crop start Y coordinate [integer]; see `--crop-x1`.
    #[clap(long, help_heading = "Core")]
    pub crop_y1: Option<i32>,

    /// Crop end X coordinate (exclusive) [integer]; see `--crop-x1`.
    #[clap(long, help_heading = "Core")]
    pub crop_x2: Option<i32>,

    /// Crop end Y coordinate (exclusive) [integer]; see `--crop-x1`.
    #[clap(long, help_heading = "Core")]
    pub crop_y2: Option<i32>,

    /// Major tick spacing override, in bases [integer]
    ///
    /// Accepted for compatibility; tick rendering itself is out of
    /// scope for this tool.
    #[clap(short = 'M', long, help_heading = "Display (accepted, unused)")]
    pub major_tick: Option<u32>,

    /// Minor tick spacing override, in bases [integer]
    #[clap(short = 'T', long, help_heading = "Display (accepted, unused)")]
    pub minor_tick: Option<u32>,
}
