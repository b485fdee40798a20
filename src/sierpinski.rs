//! Sierpinski triangle by repeated corner subdivision.

use crate::geometry::{Point, Triangle};
use crate::render::RenderSurface;

/// Fill tag of a triangle, fixed by its position among its siblings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriangleTint {
    Red,
    Yellow,
    Blue,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TintedTriangle {
    pub triangle: Triangle,
    pub tint: TriangleTint,
}

/// Edge points used by the subdivision: (top-left, top-right, left-right).
///
/// The left-right point reuses `left.y`, so it is only a true midpoint while
/// `left` and `right` are level. Every descendant of a level seed stays level.
fn edge_points(t: &Triangle) -> (Point, Point, Point) {
    let tl = t.top.midpoint(t.left);
    let tr = t.top.midpoint(t.right);
    let lr = Point::new((t.left.x + t.right.x) / 2.0, t.left.y);
    (tl, tr, lr)
}

/// The three corner children of `t`. The centre is dropped.
pub fn subdivide(t: &Triangle) -> [TintedTriangle; 3] {
    let (tl, tr, lr) = edge_points(t);
    [
        TintedTriangle { triangle: Triangle::new(t.top, tl, tr), tint: TriangleTint::Red },
        TintedTriangle { triangle: Triangle::new(tl, t.left, lr), tint: TriangleTint::Yellow },
        TintedTriangle { triangle: Triangle::new(tr, lr, t.right), tint: TriangleTint::Blue },
    ]
}

/// The centre triangle that `subdivide` leaves out
#[cfg(test)]
pub fn center(t: &Triangle) -> Triangle {
    let (tl, tr, lr) = edge_points(t);
    Triangle::new(tl, lr, tr)
}

pub struct Sierpinski<H> {
    triangles: Vec<TintedTriangle>,
    handles: Vec<H>,
    generation: u32,
}

impl<H> Sierpinski<H> {
    /// Start from one seed triangle, drawn red
    pub fn new<S: RenderSurface<Handle = H>>(surface: &mut S, seed: Triangle) -> Self {
        let seed = TintedTriangle { triangle: seed, tint: TriangleTint::Red };
        let handles = vec![surface.draw_triangle(&seed.triangle, seed.tint)];
        Self {
            triangles: vec![seed],
            handles,
            generation: 0,
        }
    }

    /// Replace every held triangle with its three corner children and redraw them all
    pub fn step<S: RenderSurface<Handle = H>>(&mut self, surface: &mut S) {
        for handle in self.handles.drain(..) {
            surface.remove(handle);
        }

        let next: Vec<TintedTriangle> = self
            .triangles
            .iter()
            .flat_map(|t| subdivide(&t.triangle))
            .collect();

        self.handles = next
            .iter()
            .map(|t| surface.draw_triangle(&t.triangle, t.tint))
            .collect();

        if !next.is_empty() {
            self.generation += 1;
        }
        self.triangles = next;
        log::debug!(
            "sierpinski generation {}: {} triangles",
            self.generation,
            self.triangles.len()
        );
    }

    pub fn triangles(&self) -> &[TintedTriangle] {
        &self.triangles
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::{Primitive, RecordingSurface};
    use proptest::prelude::*;

    const W: f64 = 600.0;
    const H: f64 = 520.0;

    fn seed() -> Triangle {
        Triangle::new(Point::new(W / 2.0, 0.0), Point::new(0.0, H), Point::new(W, H))
    }

    #[test]
    fn count_triples_each_step() {
        let mut surface = RecordingSurface::new();
        let mut gen = Sierpinski::new(&mut surface, seed());
        assert_eq!(gen.triangles().len(), 1);
        for n in 1..=6u32 {
            gen.step(&mut surface);
            assert_eq!(gen.triangles().len(), 3usize.pow(n));
            assert_eq!(gen.generation(), n);
        }
    }

    #[test]
    fn first_step_keeps_documented_children() {
        let mut surface = RecordingSurface::new();
        let mut gen = Sierpinski::new(&mut surface, seed());
        gen.step(&mut surface);

        let top = Point::new(W / 2.0, 0.0);
        let left = Point::new(0.0, H);
        let right = Point::new(W, H);
        let tl = Point::new(W / 4.0, H / 2.0);
        let tr = Point::new(3.0 * W / 4.0, H / 2.0);
        let lr = Point::new(W / 2.0, H);

        let expected = [
            TintedTriangle { triangle: Triangle::new(top, tl, tr), tint: TriangleTint::Red },
            TintedTriangle { triangle: Triangle::new(tl, left, lr), tint: TriangleTint::Yellow },
            TintedTriangle { triangle: Triangle::new(tr, lr, right), tint: TriangleTint::Blue },
        ];
        assert_eq!(gen.triangles(), &expected);

        let hole = center(&seed());
        assert_eq!(hole, Triangle::new(tl, lr, tr));
        assert!(gen.triangles().iter().all(|t| t.triangle != hole));
    }

    #[test]
    fn tints_follow_sibling_position() {
        let mut surface = RecordingSurface::new();
        let mut gen = Sierpinski::new(&mut surface, seed());
        gen.step(&mut surface);
        gen.step(&mut surface);
        let tints: Vec<TriangleTint> = gen.triangles().iter().map(|t| t.tint).collect();
        for chunk in tints.chunks(3) {
            assert_eq!(chunk, [TriangleTint::Red, TriangleTint::Yellow, TriangleTint::Blue]);
        }
    }

    #[test]
    fn step_redraws_every_triangle() {
        let mut surface = RecordingSurface::new();
        let mut gen = Sierpinski::new(&mut surface, seed());
        assert_eq!(surface.draws(), 1);

        gen.step(&mut surface);
        assert_eq!(surface.removals(), 1);
        assert_eq!(surface.live.len(), 3);

        gen.step(&mut surface);
        assert_eq!(surface.removals(), 4);
        assert_eq!(surface.live.len(), 9);
        assert!(surface
            .live
            .values()
            .all(|p| matches!(p, Primitive::Triangle(..))));
    }

    #[test]
    fn left_and_right_stay_level() {
        let mut surface = RecordingSurface::new();
        let mut gen = Sierpinski::new(&mut surface, seed());
        for _ in 0..4 {
            gen.step(&mut surface);
        }
        assert!(gen
            .triangles()
            .iter()
            .all(|t| t.triangle.left.y == t.triangle.right.y));
    }

    proptest! {
        #[test]
        fn children_never_degenerate(
            width in 16.0f64..4000.0,
            height in 16.0f64..4000.0,
            steps in 0u32..6,
        ) {
            let seed = Triangle::new(
                Point::new(width / 2.0, 0.0),
                Point::new(0.0, height),
                Point::new(width, height),
            );
            let mut surface = RecordingSurface::new();
            let mut gen = Sierpinski::new(&mut surface, seed);
            for _ in 0..steps {
                gen.step(&mut surface);
            }
            prop_assert_eq!(gen.triangles().len(), 3usize.pow(steps));
            prop_assert!(gen.triangles().iter().all(|t| !t.triangle.is_degenerate()));
        }
    }
}
