use crate::constants::*;
use anyhow::{anyhow, Result};
use chrono::Datelike;
use clap::{ArgAction, Args, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

/// Full version string including the crate version and git description.
///
/// # Examples
/// * `0.1.0-1ba958a-dirty` - while on a dirty branch
/// * `0.1.0-1ba958a` - with a fresh commit
pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    let git_describe = env!("VERGEN_GIT_DESCRIBE");
    if git_describe.is_empty() {
        env!("CARGO_PKG_VERSION").to_string()
    } else {
        format!("{}-{}", env!("CARGO_PKG_VERSION"), git_describe)
    }
});

#[derive(Parser, Debug)]
#[command(name="svplot",
          author="Tom Mokveld <tmokveld@pacificbiosciences.com>",
          version=&**FULL_VERSION,
          about="Structural variant plotter",
          long_about = None,
          after_help = format!("Copyright (C) 2004-{}     Pacific Biosciences of California, Inc.
          This program comes with ABSOLUTELY NO WARRANTY; it is intended for
          Research Use Only and not for use in diagnostic procedures.", chrono::Utc::now().year()),
          help_template = "{name} {version}\n{author}{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true
    )]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate SV calls and draw the linear and circos plots
    Plot(PlotArgs),
    /// Validate SV calls without plotting
    Validate(ValidateArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Plot(_) => "plot",
            Command::Validate(_) => "validate",
        }
    }
}

/// Inputs and validation settings shared by all subcommands.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Two-column chromosome length file (name, length)
    #[arg(
        short = 'l',
        long = "lengths",
        value_name = "FILE",
        value_parser = check_file_exists
    )]
    pub lengths: PathBuf,

    /// Tab-separated SV caller output (at least 13 columns)
    #[arg(
        short = 's',
        long = "svs",
        value_name = "FILE",
        value_parser = check_file_exists
    )]
    pub svs: PathBuf,

    /// Write the validated SV table as TSV to this file
    #[arg(
        long = "table-out",
        value_name = "FILE",
        value_parser = check_prefix_path
    )]
    pub table_out: Option<PathBuf>,

    /// Factor applied to chromosome lengths for display
    #[arg(
        help_heading("Advanced"),
        long = "padding",
        value_name = "FACTOR",
        default_value_t = DEFAULT_PADDING_FACTOR,
        value_parser = padding_in_range
    )]
    pub padding: f64,

    /// Drop SV rows that cannot be parsed instead of aborting
    #[arg(
        help_heading("Advanced"),
        long = "skip-malformed",
        default_value_t = DEFAULT_SKIP_MALFORMED
    )]
    pub skip_malformed: bool,

    /// Check SV coordinates against unpadded chromosome lengths
    #[arg(
        help_heading("Advanced"),
        long = "strict-bounds",
        default_value_t = DEFAULT_STRICT_BOUNDS
    )]
    pub strict_bounds: bool,
}

#[derive(Parser, Debug, Clone)]
#[command(arg_required_else_help(true))]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Parser, Debug, Clone)]
#[command(arg_required_else_help(true))]
pub struct PlotArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output path of the linear plot
    #[arg(
        long = "linear-out",
        value_name = "PNG",
        default_value = DEFAULT_LINEAR_OUTPUT,
        value_parser = check_prefix_path
    )]
    pub linear_out: PathBuf,

    /// Output path of the circos plot
    #[arg(
        long = "circos-out",
        value_name = "PNG",
        default_value = DEFAULT_CIRCOS_OUTPUT,
        value_parser = check_prefix_path
    )]
    pub circos_out: PathBuf,

    /// Width in pixels of the linear plot
    #[arg(
        help_heading("Plot"),
        long = "linear-width",
        default_value_t = DEFAULT_LINEAR_WIDTH,
        value_parser = pixels_in_range
    )]
    pub linear_width: u32,

    /// Height in pixels of the linear plot
    #[arg(
        help_heading("Plot"),
        long = "linear-height",
        default_value_t = DEFAULT_LINEAR_HEIGHT,
        value_parser = pixels_in_range
    )]
    pub linear_height: u32,

    /// Width and height in pixels of the circos plot
    #[arg(
        help_heading("Plot"),
        long = "circos-size",
        default_value_t = DEFAULT_CIRCOS_SIZE,
        value_parser = pixels_in_range
    )]
    pub circos_size: u32,

    /// Resolution recorded in both images
    #[arg(
        help_heading("Plot"),
        long = "dpi",
        default_value_t = DEFAULT_DPI,
        value_parser = pixels_in_range
    )]
    pub dpi: u32,

    /// Gap between circos sectors in degrees
    #[arg(
        help_heading("Plot"),
        long = "gap-degrees",
        default_value_t = DEFAULT_GAP_DEGREES,
        value_parser = degrees_in_range
    )]
    pub gap_degrees: f64,

    /// Angle of the first circos sector in degrees (90 = 12 o'clock)
    #[arg(
        help_heading("Plot"),
        long = "start-degrees",
        default_value_t = DEFAULT_START_DEGREES,
        allow_hyphen_values = true
    )]
    pub start_degrees: f64,
}

/// Initializes the verbosity level for logging based on the command-line arguments.
///
/// Sets up the logger with a specific verbosity level that is determined
/// by the number of occurrences of the `-v` or `--verbose` flag in the command-line arguments.
pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.module_path().unwrap_or("unknown_module"),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

/// Checks if the provided file path exists.
fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        return Err(anyhow!("File does not exist: {}", path.display()));
    }
    Ok(path.to_path_buf())
}

fn check_prefix_path(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(anyhow!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(path.to_path_buf())
}

fn padding_in_range(s: &str) -> Result<f64> {
    let factor: f64 = s
        .parse::<f64>()
        .map_err(|_| anyhow!("`{}` is not a valid padding factor", s))?;
    if !factor.is_finite() || factor < 1.0 {
        return Err(anyhow!("Padding factor must be a finite number >= 1.0"));
    }
    Ok(factor)
}

fn pixels_in_range(s: &str) -> Result<u32> {
    let value: u32 = s
        .parse::<u32>()
        .map_err(|_| anyhow!("`{}` is not a valid positive integer", s))?;
    if value == 0 {
        return Err(anyhow!("Value must be >= 1"));
    }
    Ok(value)
}

fn degrees_in_range(s: &str) -> Result<f64> {
    let degrees: f64 = s
        .parse::<f64>()
        .map_err(|_| anyhow!("`{}` is not a valid angle", s))?;
    if !(0.0..360.0).contains(&degrees) {
        return Err(anyhow!("Gap must be in the range [0, 360)"));
    }
    Ok(degrees)
}
