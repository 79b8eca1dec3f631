//! Traces a segment by repeatedly stepping along its direction, with the direction's sine and
//! cosine taken from the truncated series in `taylor`. How far the walk ends up from the real
//! endpoint is the error of the approximation.
use log::debug;

use crate::canvas::Surface;
use crate::constants::MAX_TRACE_STEPS;
use crate::error::TraceError;
use crate::shapes::{Color, Pixel, Point, Segment};
use crate::taylor::ApproximationRequest;

/// What a single trace leaves behind. The residual is measured from the last position visited
/// *before* its step, which is what the error logs have always recorded; `final_residual()`
/// measures from where the walk actually stopped.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceResult {
    pixels: Vec<Pixel>,
    residual: f64,
    final_position: Point,
    target: Point,
}

impl TraceResult {
    /// Emitted pixels, in the order they were visited.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn steps(&self) -> usize {
        self.pixels.len()
    }

    pub fn residual(&self) -> f64 {
        self.residual
    }

    pub fn final_position(&self) -> Point {
        self.final_position
    }

    pub fn final_residual(&self) -> f64 {
        self.final_position.distance(self.target)
    }
}

#[derive(Copy, Clone, Debug)]
pub struct SteppedTracer {
    terms: u32,
    step: i64,
    color: Color,
}

impl SteppedTracer {
    pub fn new(terms: u32, step: i64, color: Color) -> Result<SteppedTracer, TraceError> {
        if terms == 0 {
            return Err(TraceError::ZeroTerms);
        }
        if step <= 0 {
            return Err(TraceError::NonPositiveStep(step));
        }
        Ok(SteppedTracer { terms, step, color })
    }

    pub fn terms(&self) -> u32 {
        self.terms
    }

    /// Walks `segment` from its left endpoint while x hasn't reached the right one, emitting
    /// every visited position to `surface` before stepping past it.
    ///
    /// The segment must already be ordered (see `Segment::ordered`).
    pub fn trace<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        segment: Segment,
    ) -> Result<TraceResult, TraceError> {
        segment.check()?;
        let target = segment.end();
        let direction = ApproximationRequest::new(segment.angle(), self.terms)?;

        let step = self.step as f64;
        let (dx, dy) = (step * direction.cos(), step * direction.sin());
        let no_progress = TraceError::NoProgress {
            step: self.step,
            terms: self.terms,
            advance: dx,
        };
        if !(dx.is_finite() && dy.is_finite() && dx > 0.0) {
            return Err(no_progress);
        }

        let mut position = segment.start();
        let needed = (target.x() - position.x()) / dx;
        if needed > MAX_TRACE_STEPS as f64 {
            return Err(TraceError::TooManySteps {
                needed,
                limit: MAX_TRACE_STEPS,
            });
        }

        let mut squared_residual = position.squared_distance(target);
        let mut pixels = Vec::new();

        while position.x() < target.x() {
            let next = Point::new(position.x() + dx, position.y() + dy);
            // dx can be below the spacing of floats this far from the origin
            if next.x() <= position.x() {
                return Err(no_progress);
            }
            squared_residual = position.squared_distance(target);
            let pixel = position.round();
            surface.emit(pixel.x, pixel.y, self.color);
            pixels.push(pixel);
            position = next;
        }

        let result = TraceResult {
            pixels,
            residual: squared_residual.sqrt(),
            final_position: position,
            target,
        };
        debug!(
            "Traced {:?} with {} terms: angle {}, {} steps, residual {}",
            segment,
            self.terms,
            direction.angle(),
            result.steps(),
            result.residual()
        );
        Ok(result)
    }
}
