//! Koch curve by segment refinement.

use crate::geometry::Point;
use crate::render::RenderSurface;
use std::f64::consts::FRAC_PI_3;

/// The three points inserted into segment `start -> end`: (third, peak, two_third).
///
/// The bump is built in y-up space and flipped back, so on a left-to-right
/// baseline the peak sits above the line on screen.
pub fn bump(start: Point, end: Point) -> [Point; 3] {
    let third = start.lerp(end, 1.0 / 3.0);
    let two_third = start.lerp(end, 2.0 / 3.0);

    let dx = two_third.x - third.x;
    let dy = -(two_third.y - third.y);
    let (sin, cos) = FRAC_PI_3.sin_cos();
    let rotated = Point::new(dx * cos - dy * sin, -(dx * sin + dy * cos));

    [third, third + rotated, two_third]
}

/// One refinement pass: every segment becomes four.
/// Fewer than two points has no segments and comes back unchanged.
pub fn refine(points: &[Point]) -> Vec<Point> {
    let Some(&last) = points.last() else {
        return Vec::new();
    };
    if points.len() < 2 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity((points.len() - 1) * 4 + 1);
    for pair in points.windows(2) {
        out.push(pair[0]);
        out.extend(bump(pair[0], pair[1]));
    }
    out.push(last);
    out
}

pub struct Koch<H> {
    polyline: Vec<Point>,
    handle: Option<H>,
    generation: u32,
}

impl<H> Koch<H> {
    pub fn new<S: RenderSurface<Handle = H>>(surface: &mut S, start: Point, end: Point) -> Self {
        Self::from_points(surface, vec![start, end])
    }

    pub fn from_points<S: RenderSurface<Handle = H>>(surface: &mut S, polyline: Vec<Point>) -> Self {
        let handle = Some(surface.draw_polyline(&polyline));
        Self {
            polyline,
            handle,
            generation: 0,
        }
    }

    pub fn step<S: RenderSurface<Handle = H>>(&mut self, surface: &mut S) {
        if self.polyline.len() < 2 {
            return;
        }

        self.polyline = refine(&self.polyline);
        self.generation += 1;

        if let Some(old) = self.handle.take() {
            surface.remove(old);
        }
        self.handle = Some(surface.draw_polyline(&self.polyline));
        log::debug!(
            "koch generation {}: {} segments",
            self.generation,
            self.segments()
        );
    }

    pub fn polyline(&self) -> &[Point] {
        &self.polyline
    }

    pub fn segments(&self) -> usize {
        self.polyline.len().saturating_sub(1)
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

    const W: f64 = 800.0;
    const H: f64 = 600.0;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn counts_quadruple() {
        let mut surface = RecordingSurface::new();
        let mut gen = Koch::new(&mut surface, Point::new(50.0, H / 2.0), Point::new(W - 50.0, H / 2.0));
        for n in 0..=6u32 {
            assert_eq!(gen.segments(), 4usize.pow(n));
            assert_eq!(gen.polyline().len(), 4usize.pow(n) + 1);
            gen.step(&mut surface);
        }
    }

    #[test]
    fn first_refinement_of_horizontal_baseline() {
        let start = Point::new(50.0, H / 2.0);
        let end = Point::new(W - 50.0, H / 2.0);
        let mut surface = RecordingSurface::new();
        let mut gen = Koch::new(&mut surface, start, end);
        gen.step(&mut surface);

        let pts = gen.polyline();
        assert_eq!(pts.len(), 5);
        assert_eq!(pts[0], start);
        assert_eq!(pts[4], end);

        // baseline length 700, one third is 233.33
        let third = Point::new(50.0 + 700.0 / 3.0, H / 2.0);
        let two_third = Point::new(50.0 + 1400.0 / 3.0, H / 2.0);
        let side = 700.0 / 3.0;
        let peak = Point::new(W / 2.0, H / 2.0 - side * (3.0f64).sqrt() / 2.0);

        assert!(close(pts[1], third));
        assert!(close(pts[2], peak));
        assert!(close(pts[3], two_third));
        assert!(pts[2].y < H / 2.0);
    }

    #[test]
    fn segments_keep_a_third_of_parent_length() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(90.0, 0.0);
        let refined = refine(&[a, b]);
        for pair in refined.windows(2) {
            let d = pair[1] - pair[0];
            assert!(((d.x * d.x + d.y * d.y).sqrt() - 30.0).abs() < 1e-9);
        }
    }

    #[test]
    fn inert_polylines_do_not_change() {
        assert!(refine(&[]).is_empty());
        let lone = [Point::new(4.0, 4.0)];
        assert_eq!(refine(&lone), lone.to_vec());

        let mut surface = RecordingSurface::new();
        let mut gen = Koch::from_points(&mut surface, lone.to_vec());
        gen.step(&mut surface);
        assert_eq!(gen.polyline(), &lone);
        assert_eq!(gen.generation(), 0);
        assert_eq!(surface.removals(), 0);
    }

    #[test]
    fn single_polyline_handle_is_replaced() {
        let mut surface = RecordingSurface::new();
        let mut gen = Koch::new(&mut surface, Point::new(0.0, 10.0), Point::new(81.0, 10.0));
        gen.step(&mut surface);
        gen.step(&mut surface);
        assert_eq!(surface.live.len(), 1);
        assert_eq!(surface.removals(), 2);
        match surface.live.values().next() {
            Some(Primitive::Polyline(pts)) => assert_eq!(pts.as_slice(), gen.polyline()),
            other => panic!("expected polyline, got {:?}", other),
        }
    }

    #[test]
    fn original_points_survive_in_place() {
        let seed = [Point::new(0.0, 0.0), Point::new(27.0, 0.0), Point::new(27.0, 27.0)];
        let refined = refine(&seed);
        assert_eq!(refined.len(), 9);
        assert_eq!(refined[0], seed[0]);
        assert_eq!(refined[4], seed[1]);
        assert_eq!(refined[8], seed[2]);
    }

    proptest! {
        #[test]
        fn point_count_matches_segments(
            x0 in -500.0f64..500.0,
            y0 in -500.0f64..500.0,
            x1 in -500.0f64..500.0,
            y1 in -500.0f64..500.0,
            steps in 0u32..6,
        ) {
            let mut points = vec![Point::new(x0, y0), Point::new(x1, y1)];
            for _ in 0..steps {
                points = refine(&points);
            }
            prop_assert_eq!(points.len(), 4usize.pow(steps) + 1);
            prop_assert_eq!(points[0], Point::new(x0, y0));
            prop_assert_eq!(points[points.len() - 1], Point::new(x1, y1));
        }
    }
}
