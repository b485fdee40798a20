use crate::barnsley::Partition;
use crate::colors::CLASSIC;
use crate::settings::Settings;

pub const DEFAULT_SIERPINSKI_DEPTH: u32 = 7;
pub const DEFAULT_KOCH_DEPTH: u32 = 6;
/// Deeper refinement is refused: 3^10 triangles or 4^9 segments is already far below one dot
pub const MAX_SIERPINSKI_DEPTH: u32 = 10;
pub const MAX_KOCH_DEPTH: u32 = 9;
pub const DEFAULT_FERN_ITERATIONS: usize = 200;
pub const DEFAULT_FERN_MAX_POINTS: usize = 60_000;
pub const DEFAULT_REFINE_TIME: f32 = 0.5;
pub const DEFAULT_FERN_TIME: f32 = 0.05;
pub const DEFAULT_WAIT: f64 = 3.0;

/// Fractals available
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FractalKind {
    Sierpinski, // corner subdivision of a triangle
    Fern,       // Barnsley fern chaos game
    Koch,       // Koch curve refinement
}

impl FractalKind {
    pub fn name(self) -> &'static str {
        match self {
            FractalKind::Sierpinski => "sierpinski",
            FractalKind::Fern => "fern",
            FractalKind::Koch => "koch",
        }
    }
}

/// Values given on the command line; `None` defers to settings, then defaults
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub time_step: Option<f32>,
    pub time_wait: Option<f64>,
    pub depth: Option<u32>,
    pub iterations: Option<usize>,
    pub max_points: Option<usize>,
    pub seed: Option<u64>,
    pub closed_partition: bool,
    pub print: bool,
    pub steps: Option<u32>,
    pub infinite: bool,
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub scheme: Option<u8>,
}

/// Resolved runtime configuration for one fractal run
#[derive(Clone, Debug)]
pub struct FractalConfig {
    pub kind: FractalKind,
    pub time_step: f32,
    pub time_wait: f64,
    pub max_depth: u32,
    pub iterations: usize,
    pub max_points: usize,
    pub seed: Option<u64>,
    pub partition: Partition,
    pub print: bool,
    pub steps: Option<u32>,
    pub infinite: bool,
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub scheme: u8,
}

impl FractalConfig {
    pub fn resolve(kind: FractalKind, cli: Overrides, settings: &Settings) -> Self {
        let (default_depth, depth_cap, file_depth) = match kind {
            FractalKind::Sierpinski => (
                DEFAULT_SIERPINSKI_DEPTH,
                MAX_SIERPINSKI_DEPTH,
                settings.sierpinski.depth,
            ),
            FractalKind::Koch => (DEFAULT_KOCH_DEPTH, MAX_KOCH_DEPTH, settings.koch.depth),
            FractalKind::Fern => (0, 0, None),
        };
        let default_time = match kind {
            FractalKind::Fern => DEFAULT_FERN_TIME,
            _ => DEFAULT_REFINE_TIME,
        };
        let closed = cli.closed_partition || settings.fern.closed_partition.unwrap_or(false);

        Self {
            kind,
            time_step: cli
                .time_step
                .or(settings.display.time)
                .unwrap_or(default_time)
                .max(0.0),
            time_wait: cli
                .time_wait
                .or(settings.display.wait)
                .unwrap_or(DEFAULT_WAIT)
                .max(0.0),
            max_depth: cli.depth.or(file_depth).unwrap_or(default_depth).min(depth_cap),
            iterations: cli
                .iterations
                .or(settings.fern.iterations)
                .unwrap_or(DEFAULT_FERN_ITERATIONS),
            max_points: cli
                .max_points
                .or(settings.fern.max_points)
                .unwrap_or(DEFAULT_FERN_MAX_POINTS),
            seed: cli.seed.or(settings.fern.seed),
            partition: if closed { Partition::Closed } else { Partition::Observed },
            print: cli.print,
            steps: cli.steps,
            infinite: cli.infinite,
            width: cli.width,
            height: cli.height,
            scheme: cli.scheme.or(settings.display.scheme).unwrap_or(CLASSIC).min(9),
        }
    }
}
