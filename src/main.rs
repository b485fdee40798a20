mod barnsley;
mod canvas;
mod colors;
mod config;
mod fractal;
mod geometry;
mod help;
mod koch;
mod random;
mod render;
mod settings;
mod sierpinski;
mod terminal;

use clap::{Args, Parser, Subcommand};
use config::{FractalConfig, FractalKind, Overrides};
use settings::Settings;
use std::io;

#[derive(Parser)]
#[command(name = "termfractal")]
#[command(author = "Terminal Art Generator")]
#[command(version)]
#[command(about = "Terminal fractals grown one step at a time: Sierpinski, Barnsley fern, Koch curve", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every fractal
#[derive(Args)]
struct CommonArgs {
    /// Seconds per step
    #[arg(short, long)]
    time: Option<f32>,

    /// Print the result to stdout instead of animating
    #[arg(short, long)]
    print: bool,

    /// Number of steps to run in print mode
    #[arg(short = 'n', long)]
    steps: Option<u32>,

    /// Start over after the fractal is complete
    #[arg(short, long)]
    infinite: bool,

    /// Wait time before starting over in infinite mode (seconds)
    #[arg(short, long)]
    wait: Option<f64>,

    /// Print mode width in terminal cells
    #[arg(long)]
    width: Option<u16>,

    /// Print mode height in terminal cells
    #[arg(long)]
    height: Option<u16>,

    /// Color scheme (0=classic, 1-9 themed, 7=mono)
    #[arg(short = 'C', long)]
    scheme: Option<u8>,
}

impl CommonArgs {
    fn into_overrides(self) -> Overrides {
        Overrides {
            time_step: self.time,
            time_wait: self.wait,
            print: self.print,
            steps: self.steps,
            infinite: self.infinite,
            width: self.width,
            height: self.height,
            scheme: self.scheme,
            ..Overrides::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Sierpinski triangle: every triangle splits into three corners
    #[command(alias = "triangle")]
    Sierpinski {
        #[command(flatten)]
        common: CommonArgs,

        /// Number of subdivisions before the triangle is complete
        #[arg(short, long)]
        depth: Option<u32>,
    },

    /// Barnsley fern drawn by the chaos game
    #[command(alias = "barnsley")]
    Fern {
        #[command(flatten)]
        common: CommonArgs,

        /// Points added per step
        #[arg(short = 'I', long)]
        iterations: Option<usize>,

        /// Stop once this many points are drawn
        #[arg(short = 'P', long)]
        max_points: Option<usize>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Use gap-free probability bands instead of the classic open bands
        #[arg(long)]
        closed_partition: bool,
    },

    /// Koch curve: every segment grows a triangular bump
    #[command(alias = "snowflake")]
    Koch {
        #[command(flatten)]
        common: CommonArgs,

        /// Number of refinements before the curve is complete
        #[arg(short, long)]
        depth: Option<u32>,
    },
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let settings = Settings::load();

    let (kind, overrides) = match cli.command {
        Commands::Sierpinski { common, depth } => (
            FractalKind::Sierpinski,
            Overrides { depth, ..common.into_overrides() },
        ),
        Commands::Fern {
            common,
            iterations,
            max_points,
            seed,
            closed_partition,
        } => (
            FractalKind::Fern,
            Overrides {
                iterations,
                max_points,
                seed,
                closed_partition,
                ..common.into_overrides()
            },
        ),
        Commands::Koch { common, depth } => (
            FractalKind::Koch,
            Overrides { depth, ..common.into_overrides() },
        ),
    };

    let config = FractalConfig::resolve(kind, overrides, &settings);
    log::debug!("resolved config: {:?}", config);
    fractal::run(config)
}
