//! Drawing collaborator used by the generators.
//!
//! Generators never paint anything themselves. They hand primitives to a
//! `RenderSurface` and keep whatever handles it returns so they can take the
//! primitives back down on the next step.

use crate::barnsley::FernCategory;
use crate::geometry::{Point, Triangle};
use crate::sierpinski::TriangleTint;

pub trait RenderSurface {
    type Handle;

    fn draw_triangle(&mut self, triangle: &Triangle, tint: TriangleTint) -> Self::Handle;
    fn draw_point(&mut self, position: Point, category: FernCategory) -> Self::Handle;
    fn draw_polyline(&mut self, points: &[Point]) -> Self::Handle;
    fn remove(&mut self, handle: Self::Handle);
}
