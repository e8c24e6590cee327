//! Recursive fractal curves built on top of the scan conversion primitives
use crate::{
    geometry::{equilateral_apex, SQRT_3},
    Canvas, Coord, Pixel, Point, Scalar, SierpinskiMode,
};

impl<P: Pixel> Canvas<P> {
    /// Koch snowflake over the equilateral triangle standing on
    /// `start -> start + (side, 0)`
    ///
    /// Each of the three base edges is subdivided `depth` times, resulting in
    /// `3 * 4^depth` line segments. `depth` is clamped to
    /// [`RasterOptions::max_depth`](crate::RasterOptions::max_depth).
    pub fn draw_koch_snowflake(
        &mut self,
        depth: usize,
        start: impl Into<Point>,
        side: Coord,
        color: P,
    ) {
        let depth = self.clamp_depth("koch", depth);
        let start = start.into();
        let right = start + Point::new(side, 0);
        let apex = equilateral_apex(start, side);
        tracing::debug!("[koch] depth:{} start:{:?} side:{}", depth, start, side);
        self.koch_edge(depth, start, right, color);
        self.koch_edge(depth, right, apex, color);
        self.koch_edge(depth, apex, start, color);
    }

    fn koch_edge(&mut self, depth: usize, start: Point, end: Point, color: P) {
        if depth == 0 {
            self.draw_line(start, end, color);
            return;
        }
        let Point([dx, dy]) = end - start;
        let p1 = start + Point::new(dx / 3, dy / 3);
        let p3 = start + Point::new(2 * dx / 3, 2 * dy / 3);
        // bump apex is offset from the midpoint perpendicular to the edge,
        // coordinates are truncated toward zero
        let p2 = Point::new(
            ((start.x() + end.x()) as Scalar / 2.0 + dy as Scalar * SQRT_3 / 6.0) as Coord,
            ((start.y() + end.y()) as Scalar / 2.0 - dx as Scalar * SQRT_3 / 6.0) as Coord,
        );
        self.koch_edge(depth - 1, start, p1, color);
        self.koch_edge(depth - 1, p1, p2, color);
        self.koch_edge(depth - 1, p2, p3, color);
        self.koch_edge(depth - 1, p3, end, color);
    }

    /// Sierpinski triangle standing on `start -> start + (side, 0)`
    ///
    /// Level zero is a single filled triangle. Every other level clamps `side`
    /// to the canvas width and recurses with half of the side, on four anchors
    /// for [`SierpinskiMode::Quad`] (default) or three for
    /// [`SierpinskiMode::Classic`]. `depth` is clamped to
    /// [`RasterOptions::max_depth`](crate::RasterOptions::max_depth).
    pub fn draw_sierpinski_triangle(
        &mut self,
        depth: usize,
        start: impl Into<Point>,
        side: Coord,
        color: P,
    ) {
        let depth = self.clamp_depth("sierpinski", depth);
        let start = start.into();
        tracing::debug!("[sierpinski] depth:{} start:{:?} side:{}", depth, start, side);
        self.sierpinski(depth, start, side, color);
    }

    fn sierpinski(&mut self, depth: usize, start: Point, side: Coord, color: P) {
        if depth == 0 {
            let apex = equilateral_apex(start, side);
            self.draw_filled_triangle(start, start + Point::new(side, 0), apex, color);
            return;
        }
        let side = side.min(self.width() as Coord);
        let v1 = start;
        let v2 = start + Point::new(side, 0);
        let v3 = equilateral_apex(start, side);
        let half = side / 2;
        let mode = self.options().sierpinski;
        match mode {
            SierpinskiMode::Quad => {
                for anchor in [v1.midpoint(v2), v1, v2.midpoint(v3), v1.midpoint(v3)] {
                    self.sierpinski(depth - 1, anchor, half, color);
                }
            }
            SierpinskiMode::Classic => {
                for anchor in [v1, v1.midpoint(v2), v1.midpoint(v3)] {
                    self.sierpinski(depth - 1, anchor, half, color);
                }
            }
        }
    }

    fn clamp_depth(&self, name: &str, depth: usize) -> usize {
        let max_depth = self.options().max_depth;
        if depth > max_depth {
            tracing::warn!(
                "[{}] depth {} exceeds limit, clamped to {}",
                name,
                depth,
                max_depth
            );
            max_depth
        } else {
            depth
        }
    }
}
