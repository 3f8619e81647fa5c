// Construction-time settings for a scratch surface.

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScratchConfig {
    pub width: u32,        // buffer width in pixels
    pub height: u32,       // buffer height in pixels
    pub stroke_width: f32, // brush diameter in pixels; <= 0 means hairline
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self { width: 320, height: 200, stroke_width: 24.0 }
    }
}

impl ScratchConfig {
    pub fn new(width: u32, height: u32, stroke_width: f32) -> Self {
        Self { width, height, stroke_width }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions { width: self.width, height: self.height });
        }
        Ok(())
    }
}

/// Negative and non-finite widths collapse to 0 (hairline).
pub(crate) fn sanitize_stroke_width(width: f32) -> f32 {
    if width.is_finite() && width > 0.0 { width } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(ScratchConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_side_is_rejected() {
        let err = ScratchConfig::new(0, 10, 4.0).validate().unwrap_err();
        assert_eq!(err, Error::InvalidDimensions { width: 0, height: 10 });
    }

    #[test]
    fn stroke_width_sanitizing() {
        assert_eq!(sanitize_stroke_width(12.5), 12.5);
        assert_eq!(sanitize_stroke_width(-1.0), 0.0);
        assert_eq!(sanitize_stroke_width(f32::NAN), 0.0);
        assert_eq!(sanitize_stroke_width(f32::INFINITY), 0.0);
    }
}
