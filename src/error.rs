// Engine error type, kept small on purpose so we don't rely on anyhow/thiserror.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Construction with a zero width or height.
    InvalidDimensions { width: u32, height: u32 },
    /// Raw pixel accessor called outside `[0,width) x [0,height)`.
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },
    /// Ratio requested over a buffer with no pixels.
    EmptyBuffer,
    /// Seed mask size differs from the configured buffer size.
    SeedMismatch { expected: (u32, u32), found: (u32, u32) },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDimensions { width, height } => {
                write!(f, "Invalid dimensions: {width}x{height} (both must be > 0)")
            }
            Error::OutOfBounds { x, y, width, height } => {
                write!(f, "Pixel ({x}, {y}) out of bounds for {width}x{height} buffer")
            }
            Error::EmptyBuffer => write!(f, "Ratio of an empty buffer is undefined"),
            Error::SeedMismatch { expected, found } => write!(
                f,
                "Seed mask is {}x{}, expected {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
        }
    }
}

impl std::error::Error for Error {}
