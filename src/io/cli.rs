//! Command-line interface for generating a single pattern

use crate::algorithm::executor::{FailureReason, Generator, GeneratorConfig, RunState};
use crate::algorithm::selection::TieBreak;
use crate::io::configuration::{
    DEFAULT_PROPAGATION_LIMIT, DEFAULT_SEED, DEFAULT_SIZE, GIF_FRAME_DELAY_MS, IMAGE_CELL_SCALE,
};
use crate::io::error::{AlgorithmError, Result};
use crate::io::image::export_grid_as_png;
use crate::io::presets::Preset;
use crate::io::progress::ProgressTracker;
use crate::io::render::{JsonReport, render_ascii};
use crate::io::tileset::load_tile_set;
use crate::io::visualization::VisualizationCapture;
use crate::spatial::tiles::TileSet;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

/// Rendering written to stdout or `--output`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line of symbols per row
    #[default]
    Text,
    /// JSON report with the text rendering embedded
    Json,
}

#[derive(Parser)]
#[command(name = "tilecollapse")]
#[command(
    author,
    version,
    about = "Generate tile patterns by entropy-ordered collapse and constraint propagation"
)]
/// Command-line arguments for the pattern generation tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Grid side length when neither width nor height is given
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    pub size: usize,

    /// Grid width in cells (implies square if height not specified)
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Grid height in cells (implies square if width not specified)
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// Built-in tile set to generate with
    #[arg(short, long, value_enum, default_value_t)]
    pub pattern: Preset,

    /// JSON tile set file, used instead of the built-in pattern
    #[arg(short, long, value_name = "FILE")]
    pub tileset: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Write the rendering to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also export the grid as a PNG image
    #[arg(long, value_name = "FILE")]
    pub png: Option<PathBuf>,

    /// Also export an animated GIF replaying the collapse order
    #[arg(long, value_name = "FILE")]
    pub gif: Option<PathBuf>,

    /// Queue pops allowed per propagation before the run fails
    #[arg(long, default_value_t = DEFAULT_PROPAGATION_LIMIT)]
    pub propagation_limit: usize,

    /// How cells of equal entropy are ordered
    #[arg(long, value_enum, default_value_t)]
    pub tie_break: TieBreak,

    /// Show a progress bar and a summary of the run
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress progress output and the run summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Grid dimensions as (width, height)
    pub fn dimensions(&self) -> (usize, usize) {
        match (self.width, self.height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, w),
            (None, Some(h)) => (h, h),
            (None, None) => (self.size, self.size),
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        self.verbose && !self.quiet
    }

    /// Name reported for the tile set: the file stem or the preset name
    pub fn pattern_name(&self) -> String {
        self.tileset.as_ref().map_or_else(
            || self.pattern.name().to_string(),
            |path| {
                path.file_stem()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string()
            },
        )
    }

    /// Generator configuration derived from the arguments
    pub fn generator_config(&self) -> GeneratorConfig {
        let (width, height) = self.dimensions();
        GeneratorConfig {
            propagation_limit: self.propagation_limit,
            tie_break: self.tie_break,
            ..GeneratorConfig::new(width, height, self.seed)
        }
    }
}

/// Runs one generation and writes its outputs
pub struct PatternRunner {
    cli: Cli,
}

impl PatternRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Arguments this runner was created with
    pub const fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Resolve the tile set: a file if given, otherwise the preset
    ///
    /// # Errors
    ///
    /// Returns an error if the tile set file cannot be loaded
    pub fn tile_set(&self) -> Result<TileSet> {
        match &self.cli.tileset {
            Some(path) => load_tile_set(path),
            None => self.cli.pattern.tile_set(),
        }
    }

    /// Run the generator to completion and write the rendering to `out`
    ///
    /// Image exports requested on the command line are written as well. A
    /// failed run is not an error here; inspect the returned generator's
    /// state.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, tile loading, writing or image
    /// export fails
    pub fn execute(&self, out: &mut impl Write) -> Result<Generator> {
        let mut generator = Generator::new(self.cli.generator_config(), self.tile_set()?)?;
        let total_cells = generator.grid().len();
        let mut progress = if self.cli.should_show_progress() {
            ProgressTracker::new(total_cells)
        } else {
            ProgressTracker::hidden(total_cells)
        };

        while !generator.state().is_terminal() {
            generator.step()?;
            progress.update(&generator);
        }
        progress.finish(&generator);

        self.write_rendering(&generator, out)?;

        if let Some(path) = &self.cli.png {
            export_grid_as_png(generator.grid(), generator.tiles(), path, IMAGE_CELL_SCALE)?;
        }
        if let Some(path) = &self.cli.gif {
            VisualizationCapture::from_generator(&generator).export_gif(
                path,
                GIF_FRAME_DELAY_MS,
                IMAGE_CELL_SCALE,
            )?;
        }

        Ok(generator)
    }

    /// Run, writing to `--output` or stdout, and turn a failed run into an error
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::GenerationFailed`] if the run ended in a
    /// contradiction or hit the propagation limit, or any error from
    /// [`PatternRunner::execute`]
    pub fn process(&self) -> Result<()> {
        let generator = match &self.cli.output {
            Some(path) => {
                crate::io::image::ensure_parent_dir(path)?;
                let file =
                    std::fs::File::create(path).map_err(|source| AlgorithmError::FileSystem {
                        path: path.clone(),
                        operation: "create output",
                        source,
                    })?;
                let mut writer = std::io::BufWriter::new(file);
                let generator = self.execute(&mut writer)?;
                writer.flush()?;
                generator
            }
            None => self.execute(&mut std::io::stdout().lock())?,
        };

        if self.cli.verbose && !self.cli.quiet {
            Self::report_summary(&generator);
        }

        match generator.state() {
            RunState::Failed(reason) => Err(AlgorithmError::GenerationFailed { reason }),
            RunState::Succeeded | RunState::Running => Ok(()),
        }
    }

    fn write_rendering(&self, generator: &Generator, out: &mut impl Write) -> Result<()> {
        let rendering = match self.cli.format {
            OutputFormat::Text => render_ascii(generator.grid(), generator.tiles()),
            OutputFormat::Json => {
                JsonReport::from_generator(&self.cli.pattern_name(), generator).to_json()?
            }
        };
        writeln!(out, "{rendering}")?;
        Ok(())
    }

    /// Lines reported on stderr with `--verbose`
    ///
    /// Counters first, then how the run ended: where a contradiction
    /// appeared and which collapse started the propagation that caused it,
    /// or the cell whose propagation ran past the limit.
    pub fn summary_lines(generator: &Generator) -> Vec<String> {
        let stats = generator.stats();
        let mut lines = vec![format!(
            "{} steps, {} collapses ({} forced), {} propagation pops, largest queue {}",
            stats.steps,
            stats.collapses,
            stats.forced_collapses,
            stats.propagation_pops,
            stats.max_queue
        )];

        let trigger = |step: usize| {
            generator
                .history()
                .last()
                .filter(|event| event.step == step)
                .map(|event| event.position)
        };

        match generator.state() {
            RunState::Failed(FailureReason::Contradiction { position, step }) => {
                lines.push(match trigger(step) {
                    Some(origin) => {
                        format!("Contradiction at {position} after collapsing {origin} (step {step})")
                    }
                    None => format!("Contradiction at {position} (step {step})"),
                });
            }
            RunState::Failed(FailureReason::PropagationLimitExceeded {
                limit,
                origin,
                step,
            }) => {
                lines.push(format!(
                    "Propagation failure from {origin}: more than {limit} queue pops (step {step})"
                ));
            }
            RunState::Succeeded => {
                lines.push(format!("Adjacencies verified: {}", generator.verify()));
            }
            RunState::Running => {}
        }
        lines
    }

    // Allow print for the run summary requested with --verbose
    #[allow(clippy::print_stderr)]
    fn report_summary(generator: &Generator) {
        for line in Self::summary_lines(generator) {
            eprintln!("{line}");
        }
    }
}
