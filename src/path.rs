//! Pointer path controller: turns begin/move/end samples into strokes.
//!
//! [`PointerPath`] owns the [`CoverageBuffer`] and is the only code that
//! rasterizes into it. One press is tracked at a time:
//!
//! ```text
//! Idle --begin(p)--> Tracking --move(p)--> Tracking --end(p)--> Idle
//! ```
//!
//! A second `begin` while tracking restarts the path: it behaves like
//! `end(current)` followed by `begin(p)`.

use image::GrayImage;
use log::{debug, info, warn};

use crate::config::{ScratchConfig, sanitize_stroke_width};
use crate::coverage::{CoverageBuffer, CoverageReader};
use crate::error::Error;
use crate::raster::draw_segment;
use crate::types::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathState {
    Idle,
    Tracking,
}

/// Callbacks fired after each path event. All methods default to no-ops,
/// so an observer implements only what it cares about.
pub trait ScratchObserver {
    fn began(&self, _path: &PointerPath) {}
    fn moved(&self, _path: &PointerPath) {}
    fn ended(&self, _path: &PointerPath) {}
}

#[derive(Clone, Copy)]
enum PathEvent {
    Began,
    Moved,
    Ended,
}

pub struct PointerPath {
    buffer: CoverageReader,
    stroke_width: f32,
    state: PathState,
    previous: Point,
    current: Point,
    scratch_position: Option<Point>,
    observers: Vec<Box<dyn ScratchObserver>>,
}

impl PointerPath {
    pub fn new(config: ScratchConfig) -> Result<Self, Error> {
        config.validate()?;
        let buffer = CoverageBuffer::new(config.width, config.height)?;
        info!(
            "scratch surface {}x{} (stroke width {})",
            config.width, config.height, config.stroke_width
        );
        Ok(Self::from_buffer(buffer, config.stroke_width))
    }

    /// Like [`PointerPath::new`], but coverage starts from `seed`.
    pub fn with_seed(config: ScratchConfig, seed: &GrayImage) -> Result<Self, Error> {
        config.validate()?;
        let found = seed.dimensions();
        if found != (config.width, config.height) {
            return Err(Error::SeedMismatch { expected: (config.width, config.height), found });
        }
        let buffer = CoverageBuffer::from_seed(seed)?;
        info!(
            "scratch surface {}x{} seeded with {} revealed pixels",
            config.width,
            config.height,
            buffer.revealed_count()
        );
        Ok(Self::from_buffer(buffer, config.stroke_width))
    }

    fn from_buffer(buffer: CoverageBuffer, stroke_width: f32) -> Self {
        Self {
            buffer: CoverageReader::new(buffer),
            stroke_width: sanitize_stroke_width(stroke_width),
            state: PathState::Idle,
            previous: Point::default(),
            current: Point::default(),
            scratch_position: None,
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: impl ScratchObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Press. Positions outside the buffer are tracked but paint nothing.
    pub fn begin(&mut self, p: Point) {
        if !p.is_finite() {
            debug!("begin: dropping non-finite position {p:?}");
            return;
        }
        if self.state == PathState::Tracking {
            warn!("begin while tracking; restarting path at {p:?}");
            let at = self.current;
            self.end(at);
        }
        self.previous = p;
        self.current = p;
        self.state = PathState::Tracking;
        debug!("path began at {p:?}");
        self.notify(PathEvent::Began);
    }

    /// Drag to `p`, painting the segment from the last sample.
    pub fn move_to(&mut self, p: Point) {
        if self.state != PathState::Tracking {
            warn!("move without an active press ignored");
            return;
        }
        if !p.is_finite() {
            debug!("move: dropping non-finite position {p:?}");
            return;
        }
        self.advance(p);
        self.notify(PathEvent::Moved);
    }

    /// Release at `p`: paints the final segment and returns to idle.
    pub fn end(&mut self, p: Point) {
        if self.state != PathState::Tracking {
            warn!("end without an active press ignored");
            return;
        }
        if p.is_finite() {
            self.advance(p);
        } else {
            debug!("end: dropping non-finite position {p:?}");
        }
        self.state = PathState::Idle;
        debug!("path ended at {:?}", self.current);
        self.notify(PathEvent::Ended);
    }

    fn advance(&mut self, p: Point) {
        self.previous = self.current;
        self.current = p;
        draw_segment(self.buffer.writer(), self.previous, self.current, self.stroke_width);
    }

    fn notify(&mut self, event: PathEvent) {
        if self.previous.within(self.buffer.width(), self.buffer.height()) {
            self.scratch_position = Some(self.previous);
        }
        self.fire(event);
    }

    fn fire(&self, event: PathEvent) {
        for observer in &self.observers {
            match event {
                PathEvent::Began => observer.began(self),
                PathEvent::Moved => observer.moved(self),
                PathEvent::Ended => observer.ended(self),
            }
        }
    }

    #[inline]
    pub fn state(&self) -> PathState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == PathState::Tracking
    }

    pub fn previous_position(&self) -> Point {
        self.previous
    }

    pub fn current_position(&self) -> Point {
        self.current
    }

    /// Last tracked sample that fell on the surface, if any.
    pub fn scratch_position(&self) -> Option<Point> {
        self.scratch_position
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// Takes effect from the next segment.
    pub fn set_stroke_width(&mut self, width: f32) {
        self.stroke_width = sanitize_stroke_width(width);
    }

    /// Read-only view of the coverage grid.
    pub fn buffer(&self) -> &CoverageReader {
        &self.buffer
    }

    /// Shared read handle for a render or query thread.
    pub fn reader(&self) -> CoverageReader {
        self.buffer.clone()
    }

    /// Fraction of the surface scratched so far.
    pub fn ratio(&self) -> f64 {
        // Construction rejects empty buffers, so this cannot fail.
        self.buffer.reveal_ratio().unwrap_or_default()
    }

    pub fn export_mask(&self) -> GrayImage {
        self.buffer.export_mask()
    }
}

impl std::fmt::Debug for PointerPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerPath")
            .field("buffer", &self.buffer)
            .field("stroke_width", &self.stroke_width)
            .field("state", &self.state)
            .field("previous", &self.previous)
            .field("current", &self.current)
            .field("observers", &self.observers.len())
            .finish()
    }
}
