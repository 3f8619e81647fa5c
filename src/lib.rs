//! Scratch-off mask engine.
//!
//! A covering layer is erased by dragging a pointer over it. The engine keeps
//! a one-byte-per-pixel [`CoverageBuffer`] (0 = covered), rasterizes
//! round-capped strokes into it from pointer samples, and reports how much of
//! the surface has been revealed.
//!
//! ```no_run
//! use scratch_card::{Point, PointerPath, ScratchConfig};
//!
//! let mut card = PointerPath::new(ScratchConfig::new(100, 100, 10.0))?;
//! card.begin(Point::new(0.0, 50.0));
//! card.move_to(Point::new(50.0, 50.0));
//! card.end(Point::new(99.0, 50.0));
//! assert!((card.ratio() - 0.10).abs() < 0.01);
//! # Ok::<(), scratch_card::Error>(())
//! ```
//!
//! Coordinates are buffer pixels with the origin at the top-left and `y`
//! pointing down. Hosts with a bottom-left origin convert with
//! [`Point::flip_y`] before feeding events in.

pub mod config;
pub mod coverage;
pub mod error;
pub mod path;
pub mod raster;
pub mod ratio;
pub mod types;

pub use config::ScratchConfig;
pub use coverage::{CoverageBuffer, CoverageReader, REVEALED};
pub use error::Error;
pub use path::{PathState, PointerPath, ScratchObserver};
pub use raster::{draw_segment, draw_stroke};
pub use ratio::reveal_ratio;
pub use types::{Point, Stroke};
