//! Reference rasterization of a segment straight from its line equation `y = k*x + b`, with one
//! pixel per integer column. The stepped traces are compared against this one.
use crate::canvas::Surface;
use crate::constants::MAX_TRACE_STEPS;
use crate::error::TraceError;
use crate::shapes::{Color, Pixel, Segment};

/// Draws `segment` onto `surface` and returns the emitted pixels. Steep segments come out
/// sparse since only one pixel per column is drawn.
pub fn slope_line<S: Surface + ?Sized>(
    surface: &mut S,
    segment: Segment,
    color: Color,
) -> Result<Vec<Pixel>, TraceError> {
    segment.check()?;
    let columns = segment.x1 as i128 - segment.x0 as i128 + 1;
    if columns > MAX_TRACE_STEPS as i128 {
        return Err(TraceError::TooManySteps {
            needed: columns as f64,
            limit: MAX_TRACE_STEPS,
        });
    }
    let k = segment.slope();
    let b = segment.y0 as f64 - k * segment.x0 as f64;

    Ok((segment.x0..=segment.x1)
        .map(|x| {
            let pixel = Pixel {
                x,
                y: (k * x as f64 + b).round() as i64,
            };
            surface.emit(pixel.x, pixel.y, color);
            pixel
        })
        .collect())
}
