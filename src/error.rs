/// Precondition failures of the tracer and the reference rasterizer. Anything on the host side
/// (parsing, files) goes through `anyhow` instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TraceError {
    #[error("vertical segment at x = {x}: the direction angle is undefined")]
    DegenerateGeometry { x: i64 },

    #[error("endpoints not ordered by x ({x1} > {x2}), swap them before tracing")]
    UnorderedEndpoints { x1: i64, x2: i64 },

    #[error("step must be positive, got {0}")]
    NonPositiveStep(i64),

    #[error("at least one series term is needed")]
    ZeroTerms,

    /// The approximated cosine does not move the trace towards the target, so stepping would
    /// never finish.
    #[error("a step of {step} with {terms} terms advances x by {advance}, the trace can't reach its end")]
    NoProgress { step: i64, terms: u32, advance: f64 },

    #[error("reaching the end takes about {needed} steps, more than the limit of {limit}")]
    TooManySteps { needed: f64, limit: u64 },
}
