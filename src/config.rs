use crate::{
    cli::{InputArgs, PlotArgs, ValidateArgs},
    constants::*,
    io::sv_reader::{BoundsMode, MalformedRowPolicy, SvLoadOptions},
    render::{
        circos::CircosOptions,
        palette::{LinearColors, SvPalette},
        CanvasSpec,
    },
};
use std::path::PathBuf;

/// Input files and the rules used to load and validate them.
#[derive(Debug, Clone, PartialEq)]
pub struct InputConfig {
    pub lengths_path: PathBuf,
    pub sv_path: PathBuf,
    pub table_output: Option<PathBuf>,
    pub padding_factor: f64,
    pub load_options: SvLoadOptions,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            lengths_path: PathBuf::new(),
            sv_path: PathBuf::new(),
            table_output: None,
            padding_factor: DEFAULT_PADDING_FACTOR,
            load_options: SvLoadOptions {
                malformed: if DEFAULT_SKIP_MALFORMED {
                    MalformedRowPolicy::Skip
                } else {
                    MalformedRowPolicy::Abort
                },
                bounds: if DEFAULT_STRICT_BOUNDS {
                    BoundsMode::Raw
                } else {
                    BoundsMode::Padded
                },
            },
        }
    }
}

impl From<InputArgs> for InputConfig {
    fn from(args: InputArgs) -> Self {
        Self {
            lengths_path: args.lengths,
            sv_path: args.svs,
            table_output: args.table_out,
            padding_factor: args.padding,
            load_options: SvLoadOptions {
                malformed: if args.skip_malformed {
                    MalformedRowPolicy::Skip
                } else {
                    MalformedRowPolicy::Abort
                },
                bounds: if args.strict_bounds {
                    BoundsMode::Raw
                } else {
                    BoundsMode::Padded
                },
            },
        }
    }
}

impl From<ValidateArgs> for InputConfig {
    fn from(args: ValidateArgs) -> Self {
        args.input.into()
    }
}

/// Everything the `plot` command needs, independent of the working directory.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub input: InputConfig,
    pub linear_output: PathBuf,
    pub circos_output: PathBuf,
    pub linear_canvas: CanvasSpec,
    pub circos_canvas: CanvasSpec,
    pub circos: CircosOptions,
    pub palette: SvPalette,
    pub linear_colors: LinearColors,
}

impl PlotConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, updates: impl FnOnce(&mut Self)) -> Self {
        updates(&mut self);
        self
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            linear_output: PathBuf::from(DEFAULT_LINEAR_OUTPUT),
            circos_output: PathBuf::from(DEFAULT_CIRCOS_OUTPUT),
            linear_canvas: CanvasSpec {
                width: DEFAULT_LINEAR_WIDTH,
                height: DEFAULT_LINEAR_HEIGHT,
                dpi: DEFAULT_DPI,
            },
            circos_canvas: CanvasSpec {
                width: DEFAULT_CIRCOS_SIZE,
                height: DEFAULT_CIRCOS_SIZE,
                dpi: DEFAULT_DPI,
            },
            circos: CircosOptions {
                gap_degrees: DEFAULT_GAP_DEGREES,
                start_degrees: DEFAULT_START_DEGREES,
            },
            palette: SvPalette::default(),
            linear_colors: LinearColors::default(),
        }
    }
}

impl From<PlotArgs> for PlotConfig {
    fn from(args: PlotArgs) -> Self {
        Self {
            input: args.input.into(),
            linear_output: args.linear_out,
            circos_output: args.circos_out,
            linear_canvas: CanvasSpec {
                width: args.linear_width,
                height: args.linear_height,
                dpi: args.dpi,
            },
            circos_canvas: CanvasSpec {
                width: args.circos_size,
                height: args.circos_size,
                dpi: args.dpi,
            },
            circos: CircosOptions {
                gap_degrees: args.gap_degrees,
                start_degrees: args.start_degrees,
            },
            ..Self::default()
        }
    }
}
