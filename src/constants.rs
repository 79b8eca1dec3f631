//! This module defines constants that are used by the rest of the project: canvas size, colors
//! and the defaults of the convergence sweep.

/// Height of the canvas
pub const CANVAS_HEIGHT: u32 = 1000;

/// Width of the canvas
pub const CANVAS_WIDTH: u32 = 1000;

pub const BACKGROUND_COLOR: &str = "#808080";

/// Color of the slope-intercept reference line
pub const LINE_COLOR: &str = "#000000";

/// Color of the stepped traces
pub const TRACE_COLOR: &str = "#ffd700";

/// Terms used by a single trace when none are given
pub const DEFAULT_TERMS: u32 = 3;

pub const DEFAULT_STEP: i64 = 1;

/// Most pixels a single trace or reference line may emit
pub const MAX_TRACE_STEPS: u64 = 10_000_000;

/// Sweep endpoints, chosen so the direction angle is large enough for the low-order
/// approximations to visibly miss the target.
pub const SWEEP_FROM: (i64, i64) = (-200, -200);
pub const SWEEP_TO: (i64, i64) = (7800, 7900);

/// Highest term count of the sweep (it starts at 1)
pub const SWEEP_MAX_TERMS: u32 = 17;

pub const SWEEP_DELAY_MS: u64 = 0;

pub const SWEEP_OUTPUT: &str = "result/data.txt";
