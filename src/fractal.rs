//! Runs a generator against the braille canvas, live or in print mode.

use crate::barnsley::Barnsley;
use crate::canvas::{BrailleCanvas, ShapeId};
use crate::colors::ColorState;
use crate::config::{FractalConfig, FractalKind};
use crate::geometry::{Point, Triangle};
use crate::help::show_help_modal;
use crate::koch::Koch;
use crate::sierpinski::Sierpinski;
use crate::terminal::Terminal;
use crossterm::event::{KeyCode, KeyModifiers};
use crossterm::style::Color;
use rand::prelude::*;
use std::io::{self, Write};
use std::time::Instant;

const HELP: &str = "\
FRACTAL
─────────────────
q/Esc  Quit
Space  Pause
n      Single step
r      Restart
1-9,0  Speed
!..)   Color scheme
?      Close help";

/// Koch baseline margin in dots, shrunk on narrow canvases
const KOCH_MARGIN: f64 = 50.0;
/// Height of the unscaled fern in local units
const FERN_EXTENT: f64 = 300.0;
const FERN_FILL: f64 = 0.95;

/// Fallback size when print mode runs without a terminal
const PRINT_FALLBACK: (u16, u16) = (80, 24);

#[derive(Debug, PartialEq)]
enum KeyAction {
    None,
    Quit,
    Help,
    Step,
    Restart,
}

/// Runtime state for interactive controls
struct RunState {
    speed: f32,
    paused: bool,
    colors: ColorState,
}

impl RunState {
    fn new(initial_speed: f32, scheme: u8) -> Self {
        Self {
            speed: initial_speed,
            paused: false,
            colors: ColorState::new(scheme),
        }
    }

    fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) -> KeyAction {
        if self.colors.handle_key(code) {
            return KeyAction::None;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
            KeyCode::Char('?') => return KeyAction::Help,
            KeyCode::Char('n') => return KeyAction::Step,
            KeyCode::Char('r') => return KeyAction::Restart,
            KeyCode::Char(' ') => self.paused = !self.paused,
            // Number keys: change speed (1=fastest, 9=slowest, 0=very slow)
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.speed = match c {
                    '0' => 3.0,
                    '1' => 0.01,
                    '2' => 0.03,
                    '3' => 0.05,
                    '4' => 0.1,
                    '5' => 0.2,
                    '6' => 0.3,
                    '7' => 0.5,
                    '8' => 1.0,
                    '9' => 2.0,
                    _ => self.speed,
                };
            }
            _ => {}
        }
        KeyAction::None
    }
}

enum Generator {
    Sierpinski(Sierpinski<ShapeId>),
    Fern(Barnsley<ShapeId>),
    Koch(Koch<ShapeId>),
}

impl Generator {
    /// Build the seed geometry for `kind` sized to the canvas
    fn seed(config: &FractalConfig, canvas: &mut BrailleCanvas) -> Self {
        let (w, h) = canvas.dot_size();
        match config.kind {
            FractalKind::Sierpinski => {
                let seed = Triangle::new(Point::new(w / 2.0, 0.0), Point::new(0.0, h), Point::new(w, h));
                Generator::Sierpinski(Sierpinski::new(canvas, seed))
            }
            FractalKind::Fern => {
                let scale = FERN_FILL * h / FERN_EXTENT;
                Generator::Fern(Barnsley::new(canvas, Point::new(w / 2.0, h), scale, config.partition))
            }
            FractalKind::Koch => {
                let margin = KOCH_MARGIN.min(w / 8.0);
                Generator::Koch(Koch::new(
                    canvas,
                    Point::new(margin, h / 2.0),
                    Point::new(w - margin, h / 2.0),
                ))
            }
        }
    }

    fn finished(&self, config: &FractalConfig) -> bool {
        match self {
            Generator::Sierpinski(g) => g.generation() >= config.max_depth,
            Generator::Koch(g) => g.generation() >= config.max_depth,
            Generator::Fern(g) => g.points().len() >= config.max_points,
        }
    }

    fn step(&mut self, config: &FractalConfig, canvas: &mut BrailleCanvas, rng: &mut StdRng) {
        match self {
            Generator::Sierpinski(g) => g.step(canvas),
            Generator::Koch(g) => g.step(canvas),
            Generator::Fern(g) => {
                let room = config.max_points.saturating_sub(g.points().len());
                g.step(canvas, rng, config.iterations.min(room));
            }
        }
    }

    fn status(&self) -> String {
        match self {
            Generator::Sierpinski(g) => {
                format!("sierpinski  depth {}  {} triangles", g.generation(), g.triangles().len())
            }
            Generator::Koch(g) => {
                format!("koch  depth {}  {} segments", g.generation(), g.segments())
            }
            Generator::Fern(g) => format!("fern  {} points", g.points().len()),
        }
    }
}

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0) // Fallback seed for misconfigured system clocks
}

/// Run the configured fractal
pub fn run(config: FractalConfig) -> io::Result<()> {
    let seed = config.seed.unwrap_or_else(time_seed);
    let mut rng = StdRng::seed_from_u64(seed);
    log::info!("{} with seed {}", config.kind.name(), seed);

    if config.print {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        run_print_mode(&config, &mut rng, &mut out)
    } else {
        run_interactive(&config, &mut rng)
    }
}

/// Step off-screen and print the final frame
fn run_print_mode<W: Write>(config: &FractalConfig, rng: &mut StdRng, out: &mut W) -> io::Result<()> {
    let (term_w, term_h) = match (config.width, config.height) {
        (Some(w), Some(h)) => (w, h),
        (w, h) => {
            let (tw, th) = crossterm::terminal::size().unwrap_or(PRINT_FALLBACK);
            (w.unwrap_or(tw), h.unwrap_or(th))
        }
    };

    let mut canvas = BrailleCanvas::new(term_w, term_h);
    let mut gen = Generator::seed(config, &mut canvas);

    let steps = config.steps.unwrap_or(match config.kind {
        FractalKind::Fern => (config.max_points / config.iterations.max(1)) as u32,
        _ => config.max_depth,
    });
    for _ in 0..steps {
        if gen.finished(config) {
            break;
        }
        gen.step(config, &mut canvas, rng);
    }
    log::info!("{} ({} primitives)", gen.status(), canvas.len());

    let mut term = Terminal::offscreen(term_w, term_h);
    paint(&mut term, &canvas, &ColorState::new(config.scheme));
    term.write_ansi(out)
}

fn run_interactive(config: &FractalConfig, rng: &mut StdRng) -> io::Result<()> {
    let mut state = RunState::new(config.time_step, config.scheme);
    let mut term = Terminal::new()?;
    term.clear_screen()?;

    let (mut w, mut h) = term.size();
    let mut canvas = BrailleCanvas::new(w, h.saturating_sub(1));
    let mut gen = Generator::seed(config, &mut canvas);
    let mut finished_at: Option<Instant> = None;

    loop {
        let (new_w, new_h) = crossterm::terminal::size().unwrap_or((w, h));
        if new_w != w || new_h != h {
            w = new_w;
            h = new_h;
            term.resize(w, h);
            term.clear_screen()?;
            canvas.reset(w, h.saturating_sub(1));
            gen = Generator::seed(config, &mut canvas);
            finished_at = None;
            log::debug!("resized to {}x{}, restarting", w, h);
        }

        let mut single_step = false;
        if let Some((code, mods)) = term.check_key()? {
            match state.handle_key(code, mods) {
                KeyAction::Quit => break,
                KeyAction::Help => {
                    if show_help_modal(&mut term, HELP)? {
                        break;
                    }
                }
                KeyAction::Step => single_step = true,
                KeyAction::Restart => {
                    canvas.reset(w, h.saturating_sub(1));
                    gen = Generator::seed(config, &mut canvas);
                    finished_at = None;
                }
                KeyAction::None => {}
            }
        }

        if state.paused && !single_step {
            draw_frame(&mut term, &canvas, &gen, &state)?;
            term.sleep(0.1);
            continue;
        }

        if !gen.finished(config) {
            gen.step(config, &mut canvas, rng);
        } else if config.infinite {
            let since = *finished_at.get_or_insert_with(Instant::now);
            if since.elapsed().as_secs_f64() >= config.time_wait {
                canvas.reset(w, h.saturating_sub(1));
                gen = Generator::seed(config, &mut canvas);
                finished_at = None;
                log::debug!("restarting {}", config.kind.name());
            }
        }

        draw_frame(&mut term, &canvas, &gen, &state)?;
        term.sleep(state.speed);
    }

    Ok(())
}

fn draw_frame(term: &mut Terminal, canvas: &BrailleCanvas, gen: &Generator, state: &RunState) -> io::Result<()> {
    paint(term, canvas, &state.colors);

    let (_, status_row) = canvas.cell_size();
    let mut status = gen.status();
    if state.paused {
        status.push_str("  [paused]");
    }
    term.set_str(0, status_row as i32, &status, Some(Color::DarkGrey), false);
    term.present()
}

/// Copy the rasterised canvas into the terminal buffer
fn paint(term: &mut Terminal, canvas: &BrailleCanvas, colors: &ColorState) {
    term.clear();
    for (y, row) in canvas.rasterize().iter().enumerate() {
        for (x, glyph) in row.iter().enumerate() {
            if let Some((ch, swatch)) = glyph {
                term.set(x as i32, y as i32, *ch, Some(colors.color(*swatch)), false);
            }
        }
    }
}
