use crate::Format;
use bytemuck::{Pod, Zeroable};
use std::{fmt, str::FromStr};

/// Common interface to all pixel shapes a canvas can hold
///
/// Every shape carries a [`Format`] descriptor which ties it to its on-disk
/// variant, and knows how to split itself into 8-bit channels for the codec.
pub trait Pixel: Copy + Default + PartialEq + fmt::Debug {
    /// Descriptor of the plain-text variant storing this pixel shape
    const FORMAT: Format;

    /// Complement of the pixel, `max` is the canvas declared max value
    fn invert(self, max: u8) -> Self;

    /// Build pixel from exactly `FORMAT.channels` channel values
    ///
    /// Returns `None` if a channel is out of range for this shape.
    fn from_channels(channels: &[u8]) -> Option<Self>;

    /// Write `FORMAT.channels` channel values into `out`
    fn to_channels(self, out: &mut [u8]);
}

/// RGB color with 8-bit channels
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Pod, Zeroable)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn to_rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl Pixel for Rgb {
    const FORMAT: Format = Format::PIXMAP;

    /// Complements against the fixed 255, declared max value is ignored
    fn invert(self, _max: u8) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b)
    }

    fn from_channels(channels: &[u8]) -> Option<Self> {
        match channels {
            [r, g, b] => Some(Self::new(*r, *g, *b)),
            _ => None,
        }
    }

    fn to_channels(self, out: &mut [u8]) {
        out[..3].copy_from_slice(&self.to_rgb());
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_rgb();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(color: &str) -> Result<Self, Self::Err> {
        if color.starts_with('#') && color.len() == 7 {
            // #RRGGBB
            let bytes: &[u8] = color[1..].as_ref();
            let digit = |byte| match byte {
                b'A'..=b'F' => Ok(byte - b'A' + 10),
                b'a'..=b'f' => Ok(byte - b'a' + 10),
                b'0'..=b'9' => Ok(byte - b'0'),
                _ => Err(ColorError::HexExpected),
            };
            let mut hex = bytes
                .chunks(2)
                .map(|pair| Ok(digit(pair[0])? << 4 | digit(pair[1])?));
            Ok(Rgb::new(
                hex.next().unwrap_or(Ok(0))?,
                hex.next().unwrap_or(Ok(0))?,
                hex.next().unwrap_or(Ok(0))?,
            ))
        } else {
            Err(ColorError::HexExpected)
        }
    }
}

/// Single 8-bit gray intensity
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Pod, Zeroable)]
pub struct Gray(pub u8);

impl Pixel for Gray {
    const FORMAT: Format = Format::GRAYMAP;

    /// Complements against the declared max value, intensities above `max`
    /// saturate to 0 instead of wrapping around
    fn invert(self, max: u8) -> Self {
        Self(max.saturating_sub(self.0))
    }

    fn from_channels(channels: &[u8]) -> Option<Self> {
        match channels {
            [v] => Some(Self(*v)),
            _ => None,
        }
    }

    fn to_channels(self, out: &mut [u8]) {
        out[0] = self.0;
    }
}

impl fmt::Debug for Gray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gray({})", self.0)
    }
}

/// Monochrome pixel, `true` is ink (written as `1`)
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Bit(pub bool);

impl Pixel for Bit {
    const FORMAT: Format = Format::BITMAP;

    fn invert(self, _max: u8) -> Self {
        Self(!self.0)
    }

    fn from_channels(channels: &[u8]) -> Option<Self> {
        match channels {
            [0] => Some(Self(false)),
            [1] => Some(Self(true)),
            _ => None,
        }
    }

    fn to_channels(self, out: &mut [u8]) {
        out[0] = self.0 as u8;
    }
}

impl fmt::Debug for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 as u8)
    }
}

#[derive(Debug, Clone)]
pub enum ColorError {
    HexExpected,
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::HexExpected => {
                write!(f, "Color expected to be #RRGGBB in hexidemical format")
            }
        }
    }
}

impl std::error::Error for ColorError {}
