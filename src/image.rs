use crate::{Bit, Coord, Gray, Pixel, RasterOptions, Rgb};
use bytemuck::Pod;
use std::fmt;

/// Canvas holding `Rgb` pixels, stored as `P3`
pub type Pixmap = Canvas<Rgb>;
/// Canvas holding `Gray` pixels, stored as `P2`
pub type Graymap = Canvas<Gray>;
/// Canvas holding `Bit` pixels, stored as `P1`
pub type Bitmap = Canvas<Bit>;

/// Dimensions of a row-major pixel grid
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Shape {
    /// Width of the image
    pub width: usize,
    /// Height of the image
    pub height: usize,
}

impl Shape {
    #[inline]
    pub fn offset(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Row and column of the `n`-th pixel in row-major order
    #[inline]
    pub fn nth(&self, n: usize) -> Option<(usize, usize)> {
        if self.width == 0 {
            return None;
        }
        let row = n / self.width;
        let col = n - row * self.width;
        (row < self.height).then_some((row, col))
    }

    /// Offset of a signed coordinate, `None` if it lies outside
    #[inline]
    pub fn offset_checked(&self, x: Coord, y: Coord) -> Option<usize> {
        let col = usize::try_from(x).ok()?;
        let row = usize::try_from(y).ok()?;
        (col < self.width && row < self.height).then(|| self.offset(row, col))
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Owned raster of pixels together with the header metadata of its file
///
/// Pixels live in a single row-major buffer whose length is always
/// `width * height`. Every mutator keeps that invariant.
///
/// Drawing primitives go through [`Canvas::plot`] which silently clips
/// coordinates outside the canvas, direct [`Canvas::get`] and [`Canvas::set`]
/// report them as [`CanvasError::OutOfBounds`] instead.
#[derive(Clone)]
pub struct Canvas<P> {
    shape: Shape,
    data: Vec<P>,
    format_tag: String,
    max_value: u8,
    options: RasterOptions,
}

impl<P: Pixel> Canvas<P> {
    /// Create canvas filled with default (black) pixels
    pub fn new(width: usize, height: usize) -> Self {
        Self::new_with(width, height, |_, _| P::default())
    }

    /// Create canvas where pixel at `(x, y)` is `f(x, y)`
    pub fn new_with<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> P,
    {
        let mut data = Vec::with_capacity(height * width);
        for row in 0..height {
            for col in 0..width {
                data.push(f(col, row))
            }
        }
        Self {
            shape: Shape { width, height },
            data,
            format_tag: P::FORMAT.magic.to_owned(),
            max_value: P::FORMAT.default_max,
            options: RasterOptions::default(),
        }
    }

    /// Construct canvas from decoded parts, `data` must hold `width * height` pixels
    pub(crate) fn from_parts(
        shape: Shape,
        data: Vec<P>,
        format_tag: String,
        max_value: u8,
    ) -> Self {
        debug_assert_eq!(shape.len(), data.len());
        Self {
            shape,
            data,
            format_tag,
            max_value,
            options: RasterOptions::default(),
        }
    }

    /// Width and height of the canvas
    pub fn size(&self) -> (usize, usize) {
        (self.shape.width, self.shape.height)
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn width(&self) -> usize {
        self.shape.width
    }

    pub fn height(&self) -> usize {
        self.shape.height
    }

    /// Format tag (magic number) written to the header on save
    pub fn format_tag(&self) -> &str {
        &self.format_tag
    }

    /// Declared max channel value
    pub fn max_value(&self) -> u8 {
        self.max_value
    }

    /// Replace the format tag, pixel representation is not affected
    pub fn set_format_tag(&mut self, tag: impl Into<String>) {
        self.format_tag = tag.into();
    }

    /// Replace declared max channel value, existing pixels are not revalidated
    pub fn set_max_value(&mut self, max_value: u8) {
        self.max_value = max_value;
    }

    /// Options used by drawing primitives and fractal generators
    pub fn options(&self) -> &RasterOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: RasterOptions) {
        self.options = options;
    }

    /// Builder style version of [`Canvas::set_options`]
    pub fn with_options(mut self, options: RasterOptions) -> Self {
        self.options = options;
        self
    }

    /// Pixel at column `x` and row `y`
    pub fn get(&self, x: usize, y: usize) -> Result<P, CanvasError> {
        self.check_bounds(x, y)?;
        Ok(self.data[self.shape.offset(y, x)])
    }

    /// Replace pixel at column `x` and row `y`
    pub fn set(&mut self, x: usize, y: usize, pixel: P) -> Result<(), CanvasError> {
        self.check_bounds(x, y)?;
        let offset = self.shape.offset(y, x);
        self.data[offset] = pixel;
        Ok(())
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<(), CanvasError> {
        if x < self.shape.width && y < self.shape.height {
            Ok(())
        } else {
            Err(CanvasError::OutOfBounds {
                x: x as Coord,
                y: y as Coord,
                width: self.shape.width,
                height: self.shape.height,
            })
        }
    }

    /// Clipping pixel setter used by all drawing primitives
    ///
    /// Coordinates outside of the canvas (including negative) are ignored.
    #[inline]
    pub fn plot(&mut self, x: Coord, y: Coord, pixel: P) {
        if let Some(offset) = self.shape.offset_checked(x, y) {
            self.data[offset] = pixel;
        }
    }

    /// All pixels in row-major order
    pub fn data(&self) -> &[P] {
        &self.data
    }

    /// Iterator over rows, each exactly `width` pixels long
    pub fn rows(&self) -> impl Iterator<Item = &[P]> + '_ {
        // `chunks_exact` panics on zero chunk size
        self.data.chunks_exact(self.shape.width.max(1))
    }

    /// Iterator over `((x, y), pixel)` pairs in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = ((usize, usize), P)> + '_ {
        let shape = self.shape;
        self.data.iter().enumerate().filter_map(move |(index, pixel)| {
            let (row, col) = shape.nth(index)?;
            Some(((col, row), *pixel))
        })
    }

    /// Set every pixel to `pixel`
    pub fn fill(&mut self, pixel: P) {
        self.data.fill(pixel);
    }

    /// Replace every pixel with its complement
    ///
    /// See [`Pixel::invert`], RGB pixels complement against 255 regardless
    /// of the declared max value.
    pub fn invert(&mut self) {
        let max = self.max_value;
        for pixel in self.data.iter_mut() {
            *pixel = pixel.invert(max);
        }
    }

    /// Mirror horizontally (left <-> right)
    pub fn flip(&mut self) {
        if self.shape.width == 0 {
            return;
        }
        for row in self.data.chunks_exact_mut(self.shape.width) {
            row.reverse();
        }
    }

    /// Mirror vertically (top <-> bottom)
    pub fn flop(&mut self) {
        let Shape { width, height } = self.shape;
        for row in 0..height / 2 {
            let (top, bottom) = self.data.split_at_mut((height - row - 1) * width);
            top[row * width..(row + 1) * width].swap_with_slice(&mut bottom[..width]);
        }
    }

    /// Rotate by 90 degrees clockwise, width and height are swapped
    pub fn rotate_90_cw(&mut self) {
        let Shape { width, height } = self.shape;
        let mut data = Vec::with_capacity(self.data.len());
        // new[i][j] = old[height - 1 - j][i]
        for i in 0..width {
            for j in 0..height {
                data.push(self.data[self.shape.offset(height - 1 - j, i)]);
            }
        }
        self.data = data;
        self.shape = Shape {
            width: height,
            height: width,
        };
    }
}

impl<P: Pixel + Pod> Canvas<P> {
    /// Raw channel bytes in row-major order
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

/// Canvases are equal if their pixels and header metadata are equal,
/// drawing options are not compared.
impl<P: PartialEq> PartialEq for Canvas<P> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape
            && self.max_value == other.max_value
            && self.format_tag == other.format_tag
            && self.data == other.data
    }
}

impl<P: fmt::Debug> fmt::Debug for Canvas<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("format_tag", &self.format_tag)
            .field("width", &self.shape.width)
            .field("height", &self.shape.height)
            .field("max_value", &self.max_value)
            .finish_non_exhaustive()
    }
}

/// Error returned by checked pixel accessors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanvasError {
    /// Coordinate lies outside of the canvas
    OutOfBounds {
        x: Coord,
        y: Coord,
        width: usize,
        height: usize,
    },
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanvasError::OutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(f, "pixel ({x}, {y}) is outside of {width}x{height} canvas"),
        }
    }
}

impl std::error::Error for CanvasError {}
