//! Small library to load, edit and save plain-text pixel maps and draw on them.
//!
//! Main features:
//!  - `P1` bitmap, `P2` graymap and `P3` pixmap decoding and encoding
//!  - Whole image transforms: invert, flip, flop, rotation
//!  - Scan conversion of lines, rectangles, circles, triangles and polygons
//!  - Koch snowflake and Sierpinski triangle fractals
//!
#![deny(warnings)]

mod color;
mod fractal;
mod geometry;
mod image;
mod options;
mod pnm;
mod rasterize;

pub use color::{Bit, ColorError, Gray, Pixel, Rgb};
pub use geometry::{round_coord, BBox, Coord, Point, Scalar, SQRT_3};
pub use image::{Bitmap, Canvas, CanvasError, Graymap, Pixmap, Shape};
pub use options::{PolygonFill, RasterOptions, SierpinskiMode, TriangleFill, DEFAULT_MAX_DEPTH};
pub use pnm::{decode, encode, Format, PnmError};
