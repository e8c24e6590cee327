//! Scan conversion of lines, rectangles, circles, triangles and polygons
//!
//! All primitives write through [`Canvas::plot`], anything that falls outside
//! of the canvas is clipped silently.
use crate::{
    geometry::round_coord, BBox, Canvas, Coord, Pixel, Point, PolygonFill, Scalar, TriangleFill,
};

impl<P: Pixel> Canvas<P> {
    /// Draw line from `p1` to `p2` (both inclusive) with DDA stepping
    ///
    /// Number of plotted points is `max(|dx|, |dy|) + 1`, a zero length line
    /// plots exactly one pixel.
    pub fn draw_line(&mut self, p1: impl Into<Point>, p2: impl Into<Point>, color: P) {
        let p1 = p1.into();
        let p2 = p2.into();
        let dx = (p2.x() - p1.x()) as Scalar;
        let dy = (p2.y() - p1.y()) as Scalar;

        let steps = round_coord(dx.abs().max(dy.abs()));
        if steps == 0 {
            self.plot(p1.x(), p1.y(), color);
            return;
        }
        let x_inc = dx / steps as Scalar;
        let y_inc = dy / steps as Scalar;

        let mut x = p1.x() as Scalar;
        let mut y = p1.y() as Scalar;
        for _ in 0..=steps {
            self.plot(round_coord(x), round_coord(y), color);
            x += x_inc;
            y += y_inc;
        }
    }

    /// Outline of the rectangle with corners `origin` and `origin + (width, height)`
    pub fn draw_rectangle(
        &mut self,
        origin: impl Into<Point>,
        width: Coord,
        height: Coord,
        color: P,
    ) {
        let p0 = origin.into();
        let p1 = p0 + Point::new(width, 0);
        let p2 = p0 + Point::new(width, height);
        let p3 = p0 + Point::new(0, height);
        self.draw_line(p0, p1, color);
        self.draw_line(p1, p2, color);
        self.draw_line(p2, p3, color);
        self.draw_line(p3, p0, color);
    }

    /// Fill every pixel of `[x0, x0 + width) x [y0, y0 + height)`
    pub fn draw_filled_rectangle(
        &mut self,
        origin: impl Into<Point>,
        width: Coord,
        height: Coord,
        color: P,
    ) {
        let origin = origin.into();
        let y_start = origin.y().max(0);
        let y_end = (origin.y() + height).min(self.height() as Coord);
        for y in y_start..y_end {
            self.fill_span(y, origin.x(), origin.x() + width - 1, color);
        }
    }

    /// Ring of pixels whose distance to `center` is within 1.0 of `radius`
    ///
    /// Whole canvas is scanned, resulting ring is about two pixels thick.
    pub fn draw_circle(&mut self, center: impl Into<Point>, radius: Coord, color: P) {
        let radius = radius as Scalar;
        self.plot_where(center.into(), color, |dist| (dist - radius).abs() < 1.0);
    }

    /// Disk of pixels strictly closer to `center` than `radius`
    ///
    /// Boundary of the disk does not necessary match the ring produced by
    /// [`Canvas::draw_circle`].
    pub fn draw_filled_circle(&mut self, center: impl Into<Point>, radius: Coord, color: P) {
        let radius = radius as Scalar;
        self.plot_where(center.into(), color, |dist| dist < radius);
    }

    /// Plot every canvas pixel for which `pred(distance to center)` holds
    fn plot_where(&mut self, center: Point, color: P, pred: impl Fn(Scalar) -> bool) {
        let (width, height) = self.size();
        for y in 0..height as Coord {
            for x in 0..width as Coord {
                if pred(Point::new(x, y).dist(center)) {
                    self.plot(x, y, color);
                }
            }
        }
    }

    /// Outline of the triangle
    pub fn draw_triangle(
        &mut self,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
        color: P,
    ) {
        let (p1, p2, p3) = (p1.into(), p2.into(), p3.into());
        self.draw_line(p1, p2, color);
        self.draw_line(p2, p3, color);
        self.draw_line(p3, p1, color);
    }

    /// Filled triangle, scanline strategy is selected by [`RasterOptions::triangle_fill`]
    ///
    /// [`TriangleFill::TopPivot`] (default) tracks only the two edges leaving
    /// the top vertex for the whole height. Span ends are truncated and rows
    /// where the first edge lies right of the second one stay empty, so only
    /// triangles whose middle and bottom vertices share a row (in left to right
    /// argument order) are filled exactly.
    ///
    /// [`RasterOptions::triangle_fill`]: crate::RasterOptions::triangle_fill
    pub fn draw_filled_triangle(
        &mut self,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
        color: P,
    ) {
        let mut vertices = [p1.into(), p2.into(), p3.into()];
        // stable, vertices sharing a row keep their argument order
        vertices.sort_by_key(|p| p.y());
        let fill = self.options().triangle_fill;
        match fill {
            TriangleFill::TopPivot => self.fill_triangle_top_pivot(vertices, color),
            TriangleFill::Split => self.fill_triangle_split(vertices, color),
        }
    }

    fn fill_triangle_top_pivot(&mut self, [top, mid, bottom]: [Point; 3], color: P) {
        let inv_slope1 = inverse_slope(top, mid);
        let inv_slope2 = inverse_slope(top, bottom);

        let mut x_left = top.x() as Scalar;
        let mut x_right = top.x() as Scalar;
        for y in top.y()..=bottom.y() {
            // truncated toward zero, nothing is drawn once the edges cross
            self.fill_span(y, x_left as Coord, x_right as Coord, color);
            x_left += inv_slope1;
            x_right += inv_slope2;
        }
    }

    fn fill_triangle_split(&mut self, [top, mid, bottom]: [Point; 3], color: P) {
        if top.y() == bottom.y() {
            let x0 = top.x().min(mid.x()).min(bottom.x());
            let x1 = top.x().max(mid.x()).max(bottom.x());
            self.fill_span(top.y(), x0, x1, color);
            return;
        }
        for y in top.y()..=bottom.y() {
            let long = edge_x(top, bottom, y);
            // flat bottom keeps using upper edge on the last row
            let short = if y < mid.y() || mid.y() == bottom.y() {
                edge_x(top, mid, y)
            } else {
                edge_x(mid, bottom, y)
            };
            self.draw_span(y, long, short, color);
        }
    }

    /// Closed outline through all `points`, last point connects back to the first
    pub fn draw_polygon(&mut self, points: &[Point], color: P) {
        for (index, start) in points.iter().enumerate() {
            let end = points[(index + 1) % points.len()];
            self.draw_line(*start, end, color);
        }
    }

    /// Filled polygon, strategy is selected by [`RasterOptions::polygon_fill`]
    ///
    /// [`PolygonFill::BoundingHexagon`] (default) ignores the shape of the
    /// polygon: it only outlines a regular hexagon centered in the bounding box
    /// of the points with radius equal to half of its width.
    /// [`PolygonFill::FilledHexagon`] fills the same hexagon.
    ///
    /// [`RasterOptions::polygon_fill`]: crate::RasterOptions::polygon_fill
    pub fn draw_filled_polygon(&mut self, points: &[Point], color: P) {
        let fill = self.options().polygon_fill;
        match fill {
            PolygonFill::BoundingHexagon => {
                if let Some(hexagon) = bounding_hexagon(points) {
                    self.draw_polygon(&hexagon, color);
                }
            }
            PolygonFill::FilledHexagon => {
                if let Some(hexagon) = bounding_hexagon(points) {
                    self.fill_even_odd(&hexagon, color);
                }
            }
            PolygonFill::EvenOdd => self.fill_even_odd(points, color),
        }
    }

    /// Even-odd scanline fill sampled at integer rows, followed by outline
    fn fill_even_odd(&mut self, points: &[Point], color: P) {
        let Some(bbox) = BBox::from_points(points) else {
            return;
        };
        let y_start = bbox.min().y().max(0);
        let y_end = bbox.max().y().min(self.height() as Coord - 1);
        let mut crossings: Vec<Scalar> = Vec::with_capacity(points.len());
        for y in y_start..=y_end {
            crossings.clear();
            for (index, p0) in points.iter().enumerate() {
                let p1 = points[(index + 1) % points.len()];
                let (lo, hi) = if p0.y() <= p1.y() { (*p0, p1) } else { (p1, *p0) };
                // half-open so shared vertices are counted once
                if lo.y() <= y && y < hi.y() {
                    crossings.push(edge_x(lo, hi, y));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks_exact(2) {
                self.fill_span(y, pair[0].ceil() as Coord, pair[1].floor() as Coord, color);
            }
        }
        self.draw_polygon(points, color);
    }

    /// Fill row `y` between two fractional edges, inclusive after rounding
    fn draw_span(&mut self, y: Coord, x0: Scalar, x1: Scalar, color: P) {
        let (x0, x1) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        self.fill_span(y, round_coord(x0), round_coord(x1), color);
    }

    /// Fill row `y` from `x0` to `x1` inclusive, clipped to the canvas
    fn fill_span(&mut self, y: Coord, x0: Coord, x1: Coord, color: P) {
        if y < 0 || y >= self.height() as Coord {
            return;
        }
        let x0 = x0.max(0);
        let x1 = x1.min(self.width() as Coord - 1);
        for x in x0..=x1 {
            self.plot(x, y, color);
        }
    }
}

/// Change of `x` per unit of `y` along the edge, zero for a horizontal edge
fn inverse_slope(from: Point, to: Point) -> Scalar {
    let dy = to.y() - from.y();
    if dy == 0 {
        0.0
    } else {
        (to.x() - from.x()) as Scalar / dy as Scalar
    }
}

/// `x` coordinate of the edge at row `y`, end point `x` for a horizontal edge
fn edge_x(from: Point, to: Point, y: Coord) -> Scalar {
    let dy = to.y() - from.y();
    if dy == 0 {
        to.x() as Scalar
    } else {
        from.x() as Scalar + (to.x() - from.x()) as Scalar * (y - from.y()) as Scalar / dy as Scalar
    }
}

/// Regular hexagon inscribed into the bounding box of `points`
fn bounding_hexagon(points: &[Point]) -> Option<[Point; 6]> {
    let bbox = BBox::from_points(points)?;
    let Point([cx, cy]) = bbox.center();
    let r = bbox.width() / 2;
    Some([
        Point::new(cx, cy - r),
        Point::new(cx + r, cy - r / 2),
        Point::new(cx + r, cy + r / 2),
        Point::new(cx, cy + r),
        Point::new(cx - r, cy + r / 2),
        Point::new(cx - r, cy - r / 2),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Pixmap, RasterOptions, Rgb};
    use std::collections::BTreeSet;

    /// Set of painted pixel positions
    fn painted(canvas: &Pixmap) -> BTreeSet<(usize, usize)> {
        canvas
            .pixels()
            .filter(|(_, pixel)| *pixel != Rgb::BLACK)
            .map(|(pos, _)| pos)
            .collect()
    }

    fn corrected(width: usize, height: usize) -> Pixmap {
        Pixmap::new(width, height).with_options(RasterOptions::corrected())
    }

    #[test]
    fn test_line_single_point() {
        let mut canvas = Pixmap::new(5, 5);
        canvas.draw_line((2, 3), (2, 3), Rgb::GREEN);
        assert_eq!(painted(&canvas), BTreeSet::from([(2, 3)]));
        assert_eq!(canvas.get(2, 3), Ok(Rgb::GREEN));
    }

    #[test]
    fn test_line_horizontal() {
        let mut canvas = Pixmap::new(8, 8);
        canvas.draw_line((0, 0), (4, 0), Rgb::RED);
        let expected: BTreeSet<_> = (0..=4).map(|x| (x, 0)).collect();
        assert_eq!(painted(&canvas), expected);
        assert!(canvas.pixels().all(|(pos, pixel)| expected.contains(&pos) == (pixel == Rgb::RED)));
    }

    #[test]
    fn test_line_diagonal() {
        let mut canvas = Pixmap::new(10, 10);
        canvas.draw_line((6, 0), (0, 3), Rgb::WHITE);
        let pixels = painted(&canvas);
        // max(|dx|, |dy|) + 1 points, both end points included
        assert_eq!(pixels.len(), 7);
        assert!(pixels.contains(&(6, 0)));
        assert!(pixels.contains(&(0, 3)));
        // x = 5 sits at y = 0.5 which rounds away from zero
        assert!(pixels.contains(&(5, 1)));
    }

    #[test]
    fn test_line_clipped() {
        let mut canvas = Pixmap::new(4, 4);
        canvas.draw_line((-3, 1), (6, 1), Rgb::RED);
        let expected: BTreeSet<_> = (0..4).map(|x| (x, 1)).collect();
        assert_eq!(painted(&canvas), expected);
    }

    #[test]
    fn test_rectangle() {
        let mut canvas = Pixmap::new(6, 6);
        canvas.draw_rectangle((1, 1), 3, 2, Rgb::WHITE);
        let pixels = painted(&canvas);
        assert_eq!(pixels.len(), 10);
        assert!(pixels.contains(&(1, 1)));
        assert!(pixels.contains(&(4, 3)));
        assert!(!pixels.contains(&(2, 2)));
    }

    #[test]
    fn test_filled_rectangle() {
        let mut canvas = Pixmap::new(10, 10);
        canvas.draw_filled_rectangle((1, 1), 3, 2, Rgb::WHITE);
        let expected: BTreeSet<_> = (1..3)
            .flat_map(|y| (1..4).map(move |x| (x, y)))
            .collect();
        assert_eq!(expected.len(), 6);
        assert_eq!(painted(&canvas), expected);

        let mut canvas = Pixmap::new(3, 3);
        canvas.draw_filled_rectangle((-1, -1), 10, 2, Rgb::RED);
        assert_eq!(painted(&canvas), BTreeSet::from([(0, 0), (1, 0), (2, 0)]));
        canvas.draw_filled_rectangle((0, 0), 0, 3, Rgb::BLUE);
        canvas.draw_filled_rectangle((0, 0), -2, 3, Rgb::BLUE);
        assert_eq!(painted(&canvas).len(), 3);
    }

    #[test]
    fn test_circle() {
        let mut canvas = Pixmap::new(11, 11);
        canvas.draw_circle((5, 5), 3, Rgb::WHITE);
        let ring = painted(&canvas);
        for pos in [(8, 5), (2, 5), (5, 8), (5, 2)] {
            assert!(ring.contains(&pos));
        }
        assert!(!ring.contains(&(5, 5)));
        assert!(!ring.contains(&(10, 5)));
        assert!(ring.iter().all(|&(x, y)| {
            let dist = Point::new(x as Coord, y as Coord).dist(Point::new(5, 5));
            (dist - 3.0).abs() < 1.0
        }));
    }

    #[test]
    fn test_filled_circle() {
        let mut canvas = Pixmap::new(7, 7);
        canvas.draw_filled_circle((3, 3), 2, Rgb::WHITE);
        let disk = painted(&canvas);
        // strict inequality, points at distance 2 are excluded
        assert!(!disk.contains(&(5, 3)));
        assert!(disk.contains(&(4, 4)));
        assert_eq!(disk.len(), 9);

        let mut canvas = Pixmap::new(4, 4);
        canvas.draw_filled_circle((0, 0), 0, Rgb::WHITE);
        assert!(painted(&canvas).is_empty());
    }

    #[test]
    fn test_triangle_matches_lines() {
        let (p1, p2, p3) = (Point::new(1, 8), Point::new(8, 6), Point::new(4, 1));
        let mut triangle = Pixmap::new(10, 10);
        triangle.draw_triangle(p1, p2, p3, Rgb::WHITE);
        let mut polygon = Pixmap::new(10, 10);
        polygon.draw_polygon(&[p1, p2, p3], Rgb::WHITE);
        let mut lines = Pixmap::new(10, 10);
        lines.draw_line(p1, p2, Rgb::WHITE);
        lines.draw_line(p2, p3, Rgb::WHITE);
        lines.draw_line(p3, p1, Rgb::WHITE);
        assert_eq!(painted(&polygon), painted(&lines));
        assert_eq!(painted(&triangle), painted(&lines));
    }

    #[test]
    fn test_filled_triangle_flat_bottom() {
        for mut canvas in [Pixmap::new(10, 10), corrected(10, 10)] {
            canvas.draw_filled_triangle((0, 4), (8, 4), (4, 0), Rgb::WHITE);
            let expected: BTreeSet<_> = (0..=4usize)
                .flat_map(|y| (4 - y..=4 + y).map(move |x| (x, y)))
                .collect();
            assert_eq!(expected.len(), 25);
            assert_eq!(painted(&canvas), expected);
        }
    }

    #[test]
    fn test_filled_triangle_top_pivot() {
        // middle vertex on the right, edges cross right below the top vertex
        let mut canvas = Pixmap::new(10, 10);
        canvas.draw_filled_triangle((0, 0), (4, 4), (0, 8), Rgb::WHITE);
        assert_eq!(painted(&canvas), BTreeSet::from([(0, 0)]));

        // fractional edges are truncated toward zero
        let mut canvas = Pixmap::new(10, 10);
        canvas.draw_filled_triangle((0, 0), (3, 6), (8, 8), Rgb::WHITE);
        let pixels = painted(&canvas);
        assert!(pixels.contains(&(0, 1)));
        assert!(pixels.contains(&(1, 3)));
        assert!(pixels.contains(&(8, 8)));
        assert!(!pixels.contains(&(3, 8)));
        assert_eq!(pixels.len(), 1 + 2 + 2 + 3 + 3 + 4 + 4 + 5 + 5);

        let mut canvas = corrected(10, 10);
        canvas.draw_filled_triangle((0, 0), (4, 4), (0, 8), Rgb::WHITE);
        let pixels = painted(&canvas);
        assert!(!pixels.contains(&(8, 8)));
        assert!(pixels.contains(&(0, 8)));
        assert!(pixels.contains(&(4, 4)));
        assert!(pixels.contains(&(2, 6)));
        assert!(!pixels.contains(&(3, 6)));
    }

    #[test]
    fn test_filled_triangle_degenerate() {
        // horizontal edge leaving the top vertex must not divide by zero
        let mut canvas = Pixmap::new(10, 10);
        canvas.draw_filled_triangle((0, 0), (6, 0), (3, 6), Rgb::WHITE);
        let pixels = painted(&canvas);
        assert!(pixels.contains(&(0, 0)));
        assert!(pixels.contains(&(3, 6)));

        let mut canvas = corrected(10, 10);
        canvas.draw_filled_triangle((0, 0), (6, 0), (3, 6), Rgb::WHITE);
        let pixels = painted(&canvas);
        assert!((0..=6).all(|x| pixels.contains(&(x, 0))));
        assert!(pixels.contains(&(3, 6)));

        // all vertices on one row
        let mut canvas = corrected(10, 10);
        canvas.draw_filled_triangle((5, 2), (1, 2), (8, 2), Rgb::WHITE);
        let expected: BTreeSet<_> = (1..=8).map(|x| (x, 2)).collect();
        assert_eq!(painted(&canvas), expected);

        let mut canvas = Pixmap::new(10, 10);
        canvas.draw_filled_triangle((3, 3), (3, 3), (3, 3), Rgb::WHITE);
        assert_eq!(painted(&canvas), BTreeSet::from([(3, 3)]));
    }

    #[test]
    fn test_polygon_closes() {
        let mut canvas = Pixmap::new(6, 6);
        canvas.draw_polygon(&[Point::new(0, 0), Point::new(4, 0), Point::new(4, 4)], Rgb::RED);
        // closing edge from (4, 4) back to (0, 0)
        assert!(painted(&canvas).contains(&(2, 2)));

        let mut canvas = Pixmap::new(6, 6);
        canvas.draw_polygon(&[], Rgb::RED);
        assert!(painted(&canvas).is_empty());
        canvas.draw_polygon(&[Point::new(1, 1)], Rgb::RED);
        assert_eq!(painted(&canvas), BTreeSet::from([(1, 1)]));
    }

    #[test]
    fn test_filled_polygon_hexagon() {
        let points = [
            Point::new(2, 8),
            Point::new(8, 8),
            Point::new(5, 2),
            Point::new(3, 4),
        ];
        assert_eq!(
            bounding_hexagon(&points),
            Some([
                Point::new(5, 2),
                Point::new(8, 4),
                Point::new(8, 6),
                Point::new(5, 8),
                Point::new(2, 6),
                Point::new(2, 4),
            ])
        );
        let mut outline = Pixmap::new(10, 10);
        outline.draw_polygon(&bounding_hexagon(&points).unwrap_or_default(), Rgb::WHITE);

        let mut canvas = Pixmap::new(10, 10);
        canvas.draw_filled_polygon(&points, Rgb::WHITE);
        let pixels = painted(&canvas);
        assert_eq!(pixels, painted(&outline));
        assert!(pixels.contains(&(8, 5)));
        assert!(!pixels.contains(&(5, 5)));
        assert!(!pixels.contains(&(2, 8)));
        assert!(!pixels.contains(&(8, 8)));

        let options = RasterOptions {
            polygon_fill: PolygonFill::FilledHexagon,
            ..RasterOptions::default()
        };
        let mut canvas = Pixmap::new(10, 10).with_options(options);
        canvas.draw_filled_polygon(&points, Rgb::WHITE);
        let pixels = painted(&canvas);
        assert!(pixels.contains(&(5, 5)));
        assert!(pixels.is_superset(&painted(&outline)));
        assert!(!pixels.contains(&(2, 8)));

        let mut canvas = Pixmap::new(10, 10);
        canvas.draw_filled_polygon(&[], Rgb::WHITE);
        assert!(painted(&canvas).is_empty());
    }

    #[test]
    fn test_filled_polygon_even_odd() {
        let square = [
            Point::new(1, 1),
            Point::new(5, 1),
            Point::new(5, 5),
            Point::new(1, 5),
        ];
        let mut canvas = corrected(8, 8);
        canvas.draw_filled_polygon(&square, Rgb::WHITE);
        let expected: BTreeSet<_> = (1..=5)
            .flat_map(|y| (1..=5).map(move |x| (x, y)))
            .collect();
        assert_eq!(painted(&canvas), expected);

        // concave shape keeps its notch empty
        let notched = [
            Point::new(0, 0),
            Point::new(8, 0),
            Point::new(8, 8),
            Point::new(4, 4),
            Point::new(0, 8),
        ];
        let mut canvas = corrected(10, 10);
        canvas.draw_filled_polygon(&notched, Rgb::WHITE);
        let pixels = painted(&canvas);
        assert!(pixels.contains(&(1, 1)));
        assert!(pixels.contains(&(7, 6)));
        assert!(!pixels.contains(&(4, 7)));
    }
}
