//! Braille-dot canvas that implements `RenderSurface` for the terminal.
//!
//! Each terminal cell holds a 2x4 block of braille dots, so a canvas of
//! `cols x rows` cells exposes a `2*cols x 4*rows` dot space. Primitives are
//! kept in a display list and rasterised on demand.

use crate::barnsley::FernCategory;
use crate::colors::Swatch;
use crate::geometry::{Point, Triangle};
use crate::render::RenderSurface;
use crate::sierpinski::TriangleTint;
use std::collections::BTreeMap;

const BRAILLE_BASE: u32 = 0x2800;

/// Bit for dot (column, row) inside one braille cell
const DOT_BITS: [[u8; 2]; 4] = [
    [0x01, 0x08],
    [0x02, 0x10],
    [0x04, 0x20],
    [0x40, 0x80],
];

#[derive(Clone, Debug)]
enum Shape {
    Triangle(Triangle),
    Dot(Point),
    Polyline(Vec<Point>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(u64);

pub struct BrailleCanvas {
    cols: usize,
    rows: usize,
    next_id: u64,
    shapes: BTreeMap<ShapeId, (Shape, Swatch)>,
}

/// One glyph of the rasterised canvas
pub type Glyph = Option<(char, Swatch)>;

struct DotGrid {
    cols: usize,
    rows: usize,
    bits: Vec<u8>,
    swatch: Vec<Option<Swatch>>,
}

impl DotGrid {
    fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            bits: vec![0; cols * rows],
            swatch: vec![None; cols * rows],
        }
    }

    fn plot(&mut self, x: i64, y: i64, swatch: Swatch) {
        if x < 0 || y < 0 {
            return;
        }
        let (cx, cy) = (x as usize / 2, y as usize / 4);
        if cx >= self.cols || cy >= self.rows {
            return;
        }
        let i = cy * self.cols + cx;
        self.bits[i] |= DOT_BITS[y as usize % 4][x as usize % 2];
        self.swatch[i] = Some(swatch);
    }

    fn plot_point(&mut self, p: Point, swatch: Swatch) {
        if p.x.is_finite() && p.y.is_finite() {
            self.plot(p.x.floor() as i64, p.y.floor() as i64, swatch);
        }
    }

    /// Bresenham between the dots containing `a` and `b`
    fn line(&mut self, a: Point, b: Point, swatch: Swatch) {
        if !(a.x.is_finite() && a.y.is_finite() && b.x.is_finite() && b.y.is_finite()) {
            return;
        }
        let (mut x, mut y) = (a.x.floor() as i64, a.y.floor() as i64);
        let (x1, y1) = (b.x.floor() as i64, b.y.floor() as i64);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y, swatch);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Scanline fill sampled at dot-row centres, clamped so thin triangles keep a row
    fn fill(&mut self, t: &Triangle, swatch: Swatch) {
        let [a, b, c] = t.vertices();
        let min_y = a.y.min(b.y).min(c.y);
        let max_y = a.y.max(b.y).max(c.y);
        if !(min_y.is_finite() && max_y.is_finite()) {
            return;
        }

        let first = min_y.floor() as i64;
        let last = (max_y.ceil() as i64 - 1).max(first);
        for row in first..=last {
            let y = (row as f64 + 0.5).clamp(min_y, max_y);
            let mut lo = f64::INFINITY;
            let mut hi = f64::NEG_INFINITY;

            for (p, q) in [(a, b), (b, c), (c, a)] {
                let (y0, y1) = (p.y.min(q.y), p.y.max(q.y));
                if y < y0 || y > y1 {
                    continue;
                }
                if y1 - y0 < f64::EPSILON {
                    lo = lo.min(p.x.min(q.x));
                    hi = hi.max(p.x.max(q.x));
                } else {
                    let x = p.x + (y - p.y) * (q.x - p.x) / (q.y - p.y);
                    lo = lo.min(x);
                    hi = hi.max(x);
                }
            }

            if lo > hi {
                continue;
            }
            let x0 = lo.floor() as i64;
            let x1 = (hi.ceil() as i64 - 1).max(x0);
            for x in x0..=x1 {
                self.plot(x, row, swatch);
            }
        }
    }

    fn glyphs(&self) -> Vec<Vec<Glyph>> {
        (0..self.rows)
            .map(|cy| {
                (0..self.cols)
                    .map(|cx| {
                        let i = cy * self.cols + cx;
                        let bits = self.bits[i];
                        if bits == 0 {
                            return None;
                        }
                        let ch = char::from_u32(BRAILLE_BASE + bits as u32)?;
                        self.swatch[i].map(|s| (ch, s))
                    })
                    .collect()
            })
            .collect()
    }
}

impl BrailleCanvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols: cols as usize,
            rows: rows as usize,
            next_id: 0,
            shapes: BTreeMap::new(),
        }
    }

    /// Dot-space extent as (width, height)
    pub fn dot_size(&self) -> (f64, f64) {
        ((self.cols * 2) as f64, (self.rows * 4) as f64)
    }

    pub fn cell_size(&self) -> (u16, u16) {
        (self.cols as u16, self.rows as u16)
    }

    /// Drop every primitive and adopt a new cell size
    pub fn reset(&mut self, cols: u16, rows: u16) {
        self.cols = cols as usize;
        self.rows = rows as usize;
        self.shapes.clear();
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Paint the display list in draw order. A cell takes the swatch of the
    /// last primitive that touched it.
    pub fn rasterize(&self) -> Vec<Vec<Glyph>> {
        let mut grid = DotGrid::new(self.cols, self.rows);
        for (shape, swatch) in self.shapes.values() {
            match shape {
                Shape::Triangle(t) => grid.fill(t, *swatch),
                Shape::Dot(p) => grid.plot_point(*p, *swatch),
                Shape::Polyline(points) => {
                    if let [only] = points.as_slice() {
                        grid.plot_point(*only, *swatch);
                    }
                    for pair in points.windows(2) {
                        grid.line(pair[0], pair[1], *swatch);
                    }
                }
            }
        }
        grid.glyphs()
    }

    fn insert(&mut self, shape: Shape, swatch: Swatch) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.shapes.insert(id, (shape, swatch));
        id
    }
}

impl RenderSurface for BrailleCanvas {
    type Handle = ShapeId;

    fn draw_triangle(&mut self, triangle: &Triangle, tint: TriangleTint) -> ShapeId {
        self.insert(Shape::Triangle(*triangle), Swatch::Triangle(tint))
    }

    fn draw_point(&mut self, position: Point, category: FernCategory) -> ShapeId {
        self.insert(Shape::Dot(position), Swatch::Fern(category))
    }

    fn draw_polyline(&mut self, points: &[Point]) -> ShapeId {
        self.insert(Shape::Polyline(points.to_vec()), Swatch::Curve)
    }

    fn remove(&mut self, handle: ShapeId) {
        self.shapes.remove(&handle);
    }
}
