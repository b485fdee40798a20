//! Barnsley fern via the chaos game.
//!
//! A running point in local fern space is pushed through one of four affine
//! maps per iteration. Every image is kept and drawn, so the fern fills in over
//! time instead of being redrawn.

use crate::geometry::Point;
use crate::random::UniformSource;
use crate::render::RenderSurface;

/// Which affine map produced a point
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FernCategory {
    Stem,
    Base,
    LeftLeaflet,
    RightLeaflet,
}

/// How a draw in `[0, 1)` is split between the four maps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Partition {
    /// Open middle bands: exactly 0.73 and 0.76 fall through to the right leaflet
    #[default]
    Observed,
    /// Half-open bands covering `[0, 1)` without gaps
    Closed,
}

const STEM_CUT: f64 = 0.73;
const BASE_CUT: f64 = 0.76;
const LEFT_CUT: f64 = 0.89;

const TALL_SHIFT: f64 = 48.0;
const SHORT_SHIFT: f64 = 13.2;

impl Partition {
    pub fn select(self, r: f64) -> FernCategory {
        match self {
            Partition::Observed => {
                if r < STEM_CUT {
                    FernCategory::Stem
                } else if r > STEM_CUT && r < BASE_CUT {
                    FernCategory::Base
                } else if r > BASE_CUT && r < LEFT_CUT {
                    FernCategory::LeftLeaflet
                } else {
                    FernCategory::RightLeaflet
                }
            }
            Partition::Closed => {
                if r < STEM_CUT {
                    FernCategory::Stem
                } else if r < BASE_CUT {
                    FernCategory::Base
                } else if r < LEFT_CUT {
                    FernCategory::LeftLeaflet
                } else {
                    FernCategory::RightLeaflet
                }
            }
        }
    }
}

/// Apply the affine map for `category` to `p` (local, y-up space)
pub fn ifs_map(category: FernCategory, p: Point, scale: f64) -> Point {
    let Point { x, y } = p;
    match category {
        FernCategory::Stem => Point::new(
            0.85 * x + 0.04 * y,
            -0.04 * x + 0.85 * y + TALL_SHIFT * scale,
        ),
        FernCategory::Base => Point::new(0.0, 0.16 * y),
        FernCategory::LeftLeaflet => Point::new(
            -0.15 * x + 0.28 * y,
            0.26 * x + 0.24 * y + TALL_SHIFT * scale,
        ),
        FernCategory::RightLeaflet => Point::new(
            0.20 * x - 0.26 * y,
            0.23 * x + 0.20 * y + SHORT_SHIFT * scale,
        ),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FernPoint {
    /// Screen position
    pub position: Point,
    pub category: FernCategory,
}

pub struct Barnsley<H> {
    current: Point,
    origin: Point,
    scale: f64,
    partition: Partition,
    points: Vec<FernPoint>,
    handles: Vec<H>,
}

impl<H> Barnsley<H> {
    /// Anchor the fern at `origin` (its foot on screen) and draw the seed dot there
    pub fn new<S: RenderSurface<Handle = H>>(
        surface: &mut S,
        origin: Point,
        scale: f64,
        partition: Partition,
    ) -> Self {
        let seed = FernPoint { position: origin, category: FernCategory::Base };
        let handles = vec![surface.draw_point(seed.position, seed.category)];
        Self {
            current: Point::default(),
            origin,
            scale,
            partition,
            points: vec![seed],
            handles,
        }
    }

    /// Run `iterations` rounds of the chaos game, drawing one point per round
    pub fn step<S, R>(&mut self, surface: &mut S, rng: &mut R, iterations: usize)
    where
        S: RenderSurface<Handle = H>,
        R: UniformSource + ?Sized,
    {
        self.points.reserve(iterations);
        self.handles.reserve(iterations);

        for _ in 0..iterations {
            let category = self.partition.select(rng.next_unit());
            let next = ifs_map(category, self.current, self.scale);
            self.current = next;

            // local space is y-up, the screen is y-down
            let position = Point::new(self.origin.x + next.x, self.origin.y - next.y);
            self.handles.push(surface.draw_point(position, category));
            self.points.push(FernPoint { position, category });
        }
        log::trace!("fern: {} points", self.points.len());
    }

    /// Most recent point in local fern space
    pub fn current(&self) -> Point {
        self.current
    }

    pub fn points(&self) -> &[FernPoint] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Scripted;
    use crate::render::testing::RecordingSurface;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ORIGIN: Point = Point::new(300.0, 600.0);

    fn fern(surface: &mut RecordingSurface) -> Barnsley<usize> {
        Barnsley::new(surface, ORIGIN, 2.0, Partition::Observed)
    }

    #[test]
    fn observed_partition_bands() {
        let p = Partition::Observed;
        assert_eq!(p.select(0.0), FernCategory::Stem);
        assert_eq!(p.select(0.7299), FernCategory::Stem);
        assert_eq!(p.select(0.74), FernCategory::Base);
        assert_eq!(p.select(0.80), FernCategory::LeftLeaflet);
        assert_eq!(p.select(0.89), FernCategory::RightLeaflet);
        assert_eq!(p.select(0.999), FernCategory::RightLeaflet);
    }

    #[test]
    fn boundary_draws_fall_through_to_right_leaflet() {
        let mut surface = RecordingSurface::new();
        let mut gen = fern(&mut surface);
        let mut rng = Scripted::new(vec![0.73, 0.76]);
        gen.step(&mut surface, &mut rng, 2);

        let cats: Vec<FernCategory> = gen.points()[1..].iter().map(|p| p.category).collect();
        assert_eq!(cats, [FernCategory::RightLeaflet, FernCategory::RightLeaflet]);
    }

    #[test]
    fn closed_partition_has_no_gap() {
        let p = Partition::Closed;
        assert_eq!(p.select(0.73), FernCategory::Base);
        assert_eq!(p.select(0.76), FernCategory::LeftLeaflet);
        assert_eq!(p.select(0.89), FernCategory::RightLeaflet);
    }

    #[test]
    fn stem_from_origin_lifts_by_scaled_shift() {
        let mut surface = RecordingSurface::new();
        let mut gen = fern(&mut surface);
        gen.step(&mut surface, &mut Scripted::new(vec![0.1]), 1);

        assert_eq!(gen.current(), Point::new(0.0, 96.0));
        let last = gen.points().last().copied();
        assert_eq!(
            last,
            Some(FernPoint {
                position: Point::new(300.0, 504.0),
                category: FernCategory::Stem,
            })
        );
    }

    #[test]
    fn base_map_collapses_x() {
        let p = ifs_map(FernCategory::Base, Point::new(12.0, 10.0), 1.0);
        assert_eq!(p.x, 0.0);
        assert!((p.y - 1.6).abs() < 1e-12);
    }

    #[test]
    fn zero_iterations_is_a_no_op() {
        let mut surface = RecordingSurface::new();
        let mut gen = fern(&mut surface);
        gen.step(&mut surface, &mut Scripted::new(vec![0.5]), 0);
        assert_eq!(gen.points().len(), 1);
        assert_eq!(gen.current(), Point::default());
        assert_eq!(surface.draws(), 1);
    }

    #[test]
    fn points_accumulate_and_nothing_is_removed() {
        let mut surface = RecordingSurface::new();
        let mut gen = fern(&mut surface);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..5 {
            gen.step(&mut surface, &mut rng, 100);
        }
        assert_eq!(gen.points().len(), 501);
        assert_eq!(surface.live.len(), 501);
        assert_eq!(surface.removals(), 0);
    }

    proptest! {
        #[test]
        fn step_appends_exactly_n(seed in 0u64..10_000, n in 0usize..400, before in 0usize..50) {
            let mut surface = RecordingSurface::new();
            let mut gen = fern(&mut surface);
            let mut rng = StdRng::seed_from_u64(seed);
            gen.step(&mut surface, &mut rng, before);
            let len = gen.points().len();

            gen.step(&mut surface, &mut rng, n);
            prop_assert_eq!(gen.points().len(), len + n);

            if n > 0 {
                let last = gen.points()[gen.points().len() - 1].position;
                let local = gen.current();
                prop_assert!((ORIGIN.x + local.x - last.x).abs() < 1e-9);
                prop_assert!((ORIGIN.y - local.y - last.y).abs() < 1e-9);
            }
        }
    }
}
