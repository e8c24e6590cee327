//! Plain-text portable any-map codec (`P1` bitmap, `P2` graymap, `P3` pixmap)
//!
//! Layout of the file:
//! ```text
//! P3          <- magic number, must match pixel shape of the canvas
//! 4 2         <- width height
//! 255         <- declared max value (absent for bitmaps)
//! 255 0 0 ... <- whitespace separated channels in row-major order
//! ```
//! Lines starting with `#` are skipped while the header is parsed, a `#` in
//! the middle of a line is an ordinary token. Comments are never written.
//!
//! The magic number is kept as the canvas format tag. Any of `P1`, `P2` and
//! `P3` is accepted for every pixel shape, so a canvas saved under a foreign
//! tag loads back unchanged, the pixel layout always follows the pixel shape.
use crate::{Canvas, Pixel, Shape};
use std::{
    fmt,
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
    str::FromStr,
};

/// Descriptor of a plain-text variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Format {
    /// Magic number expected on decode
    pub magic: &'static str,
    /// Human readable name
    pub name: &'static str,
    /// Number of tokens per pixel
    pub channels: usize,
    /// Whether header carries max value line
    pub has_max: bool,
    /// Max value of the newly created canvas
    pub default_max: u8,
}

impl Format {
    pub const BITMAP: Format = Format {
        magic: "P1",
        name: "bitmap",
        channels: 1,
        has_max: false,
        default_max: 1,
    };
    pub const GRAYMAP: Format = Format {
        magic: "P2",
        name: "graymap",
        channels: 1,
        has_max: true,
        default_max: 255,
    };
    pub const PIXMAP: Format = Format {
        magic: "P3",
        name: "pixmap",
        channels: 3,
        has_max: true,
        default_max: 255,
    };

    /// Every variant recognized by the decoder
    pub const ALL: [Format; 3] = [Format::BITMAP, Format::GRAYMAP, Format::PIXMAP];

    /// Find variant by its magic number
    pub fn from_magic(magic: &[u8]) -> Option<Format> {
        Format::ALL
            .into_iter()
            .find(|format| format.magic.as_bytes() == magic)
    }
}

// at most three channels per pixel (rgb)
const MAX_CHANNELS: usize = 3;

/// Whitespace separated token stream with line tracking
struct Tokenizer<'a> {
    input: &'a [u8],
    offset: usize,
    line: usize,
    // `#` at the start of a line starts a comment running to the end of it
    comments: bool,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            offset: 0,
            line: 1,
            comments: true,
        }
    }

    fn next_token(&mut self) -> Option<&'a [u8]> {
        loop {
            let byte = *self.input.get(self.offset)?;
            match byte {
                b'\n' => {
                    self.line += 1;
                    self.offset += 1;
                }
                b'#' if self.comments && self.at_line_start() => {
                    while self.input.get(self.offset).is_some_and(|b| *b != b'\n') {
                        self.offset += 1;
                    }
                }
                _ if byte.is_ascii_whitespace() => self.offset += 1,
                _ => break,
            }
        }
        let start = self.offset;
        while self
            .input
            .get(self.offset)
            .is_some_and(|b| !b.is_ascii_whitespace())
        {
            self.offset += 1;
        }
        Some(&self.input[start..self.offset])
    }

    fn at_line_start(&self) -> bool {
        self.offset == 0 || self.input[self.offset - 1] == b'\n'
    }

    fn parse<N: lexical_core::FromLexical>(&mut self, what: &str) -> Result<N, PnmError> {
        let token = self
            .next_token()
            .ok_or_else(|| self.error(format!("unexpected end of input, {what} expected")))?;
        lexical_core::parse(token).map_err(|_| {
            self.error(format!(
                "invalid {what}: {:?}",
                String::from_utf8_lossy(token)
            ))
        })
    }

    /// Error construction helper
    fn error<S: Into<String>>(&self, reason: S) -> PnmError {
        PnmError::Format {
            reason: reason.into(),
            line: self.line,
        }
    }
}

/// Decode canvas from plain-text representation
///
/// Input is validated completely before canvas is constructed, any failure
/// returns an error and no canvas.
pub fn decode<P: Pixel>(input: &[u8]) -> Result<Canvas<P>, PnmError> {
    let format = P::FORMAT;
    let mut tokens = Tokenizer::new(input);

    let magic = tokens
        .next_token()
        .ok_or_else(|| tokens.error("missing magic number"))?;
    let Some(tag) = Format::from_magic(magic) else {
        return Err(tokens.error(format!(
            "unknown magic number {:?}, expected one of P1, P2, P3",
            String::from_utf8_lossy(magic),
        )));
    };
    if tag != format {
        tracing::debug!("[decode] {} stored under {} tag", format.name, tag.magic);
    }
    let width: usize = tokens.parse("width")?;
    let height: usize = tokens.parse("height")?;
    let max_value = if format.has_max {
        let max_value: u32 = tokens.parse("max value")?;
        match u8::try_from(max_value) {
            Ok(max_value) if max_value > 0 => max_value,
            _ => {
                return Err(tokens.error(format!(
                    "max value {max_value} is outside of 1..=255"
                )));
            }
        }
    } else {
        format.default_max
    };
    let shape = Shape { width, height };
    let len = width
        .checked_mul(height)
        .filter(|len| len.checked_mul(format.channels).is_some())
        .ok_or_else(|| tokens.error(format!("dimensions {width}x{height} are too large")))?;
    tracing::debug!(
        "[decode] {} {}x{} max:{}",
        format.name,
        width,
        height,
        max_value
    );

    // pixel stream does not allow comments
    tokens.comments = false;
    // do not trust header for preallocation, each pixel takes at least two bytes
    let mut data = Vec::with_capacity(len.min(input.len() / 2 + 1));
    let mut channels = [0u8; MAX_CHANNELS];
    for _ in 0..len {
        for channel in channels[..format.channels].iter_mut() {
            *channel = tokens.parse("channel value")?;
        }
        let pixel = P::from_channels(&channels[..format.channels]).ok_or_else(|| {
            tokens.error(format!(
                "invalid {} pixel {:?}",
                format.name,
                &channels[..format.channels]
            ))
        })?;
        data.push(pixel);
    }
    if let Some(token) = tokens.next_token() {
        return Err(tokens.error(format!(
            "trailing token {:?} after {} pixels",
            String::from_utf8_lossy(token),
            len
        )));
    }

    Ok(Canvas::from_parts(
        shape,
        data,
        tag.magic.to_owned(),
        max_value,
    ))
}

/// Encode canvas into plain-text representation
///
/// Header uses the canvas format tag as is, while the pixel layout (and the
/// presence of the max value line) is determined by the pixel shape.
pub fn encode<P: Pixel>(canvas: &Canvas<P>, mut out: impl Write) -> Result<(), PnmError> {
    let format = P::FORMAT;
    let (width, height) = canvas.size();
    write!(out, "{}\n{} {}\n", canvas.format_tag(), width, height)?;
    if format.has_max {
        writeln!(out, "{}", canvas.max_value())?;
    }
    let mut buffer = [0u8; lexical_core::BUFFER_SIZE];
    let mut channels = [0u8; MAX_CHANNELS];
    for row in canvas.rows() {
        for pixel in row {
            pixel.to_channels(&mut channels);
            for channel in &channels[..format.channels] {
                out.write_all(lexical_core::write(*channel, &mut buffer))?;
                out.write_all(b" ")?;
            }
        }
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

impl<P: Pixel> Canvas<P> {
    /// Read whole input and decode canvas from it
    pub fn read_pnm(mut input: impl Read) -> Result<Self, PnmError> {
        let mut contents = Vec::new();
        input.read_to_end(&mut contents)?;
        decode(&contents)
    }

    /// Write canvas in the plain-text format
    pub fn write_pnm(&self, out: impl Write) -> Result<(), PnmError> {
        encode(self, out)
    }

    /// Load canvas from the file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PnmError> {
        let path = path.as_ref();
        let _span = tracing::debug_span!("[load]", path = %path.display()).entered();
        Self::read_pnm(File::open(path)?)
    }

    /// Save canvas to the file, file is created or truncated
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PnmError> {
        let path = path.as_ref();
        let _span = tracing::debug_span!("[save]", path = %path.display()).entered();
        self.write_pnm(BufWriter::new(File::create(path)?))
    }

    /// Encode canvas into a string
    pub fn to_pnm_string(&self) -> String {
        let mut out = Vec::new();
        // writing into `Vec` never fails
        let _ = encode(self, &mut out);
        // encoder only emits the format tag and ascii digits
        String::from_utf8_lossy(&out).into_owned()
    }
}

impl<P: Pixel> FromStr for Canvas<P> {
    type Err = PnmError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        decode(text.as_bytes())
    }
}

/// Error while decoding or encoding a plain-text canvas
#[derive(Debug)]
pub enum PnmError {
    /// Malformed input: bad magic number, header or pixel token
    Format { reason: String, line: usize },
    /// IO error propagated from the underlying reader or writer
    Io(std::io::Error),
}

impl fmt::Display for PnmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PnmError::Format { reason, line } => write!(f, "line {line}: {reason}"),
            PnmError::Io(error) => write!(f, "{error}"),
        }
    }
}

impl From<std::io::Error> for PnmError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<PnmError> for std::io::Error {
    fn from(error: PnmError) -> Self {
        match error {
            PnmError::Io(error) => error,
            _ => Self::new(std::io::ErrorKind::InvalidData, error),
        }
    }
}

impl std::error::Error for PnmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PnmError::Io(error) => Some(error),
            PnmError::Format { .. } => None,
        }
    }
}
