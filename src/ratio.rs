// Reveal ratio: fraction of the coverage grid that has any paint on it.
//
// Full linear scan on every call. Strokes are cheap compared to a frame, and
// a cached counter would have to stay in sync with concurrent writers.

use crate::coverage::CoverageBuffer;
use crate::error::Error;

/// `revealed pixels / total pixels`, in `[0, 1]`.
pub fn reveal_ratio(buffer: &CoverageBuffer) -> Result<f64, Error> {
    if buffer.is_empty() {
        return Err(Error::EmptyBuffer);
    }
    Ok(buffer.revealed_count() as f64 / buffer.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::REVEALED;

    #[test]
    fn untouched_buffer_is_zero() {
        for (w, h) in [(1, 1), (3, 7), (640, 480)] {
            let b = CoverageBuffer::new(w, h).unwrap();
            assert_eq!(reveal_ratio(&b), Ok(0.0));
        }
    }

    #[test]
    fn any_non_zero_value_counts() {
        let b = CoverageBuffer::new(2, 2).unwrap();
        b.set_pixel(0, 0, 1).unwrap();
        b.set_pixel(1, 1, REVEALED).unwrap();
        assert_eq!(reveal_ratio(&b), Ok(0.5));
    }

    #[test]
    fn fully_painted_is_one() {
        let b = CoverageBuffer::new(3, 3).unwrap();
        for y in 0..3 {
            for x in 0..3 {
                b.set_pixel(x, y, REVEALED).unwrap();
            }
        }
        assert_eq!(reveal_ratio(&b), Ok(1.0));
    }
}
