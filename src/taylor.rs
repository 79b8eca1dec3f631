//! Sine and cosine by truncated Maclaurin series.
//!
//! Both functions take the number of series terms to accumulate. A single term gives the
//! lowest order approximation (`x` for sine, `1` for cosine). Nothing stops the series from
//! diverging for large angles and few terms: that error is exactly what the tracer measures.

use crate::error::TraceError;

/// `sin(x)` with `n` terms of `x - x³/3! + x⁵/5! - ...`
pub fn sin(x: f64, n: u32) -> f64 {
    let xx = x * x;
    let mut term = x;
    let mut result = x;

    for i in 1..n {
        let k = f64::from(i);
        // advances from order 2i-1 to 2i+1
        term *= xx / ((2.0 * k) * (2.0 * k + 1.0));
        result = alternate(result, term, i);
    }
    result
}

/// `cos(x)` with `n` terms of `1 - x²/2! + x⁴/4! - ...`
pub fn cos(x: f64, n: u32) -> f64 {
    let xx = x * x;
    let mut term = 1.0;
    let mut result = 1.0;

    for i in 1..n {
        let k = f64::from(i);
        // advances from order 2i-2 to 2i
        term *= xx / ((2.0 * k - 1.0) * (2.0 * k));
        result = alternate(result, term, i);
    }
    result
}

fn alternate(result: f64, term: f64, i: u32) -> f64 {
    if i % 2 == 0 {
        result + term
    } else {
        result - term
    }
}

/// An angle paired with the amount of terms to approximate it with. Unlike the bare
/// functions, it refuses a term count of zero.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ApproximationRequest {
    angle: f64,
    terms: u32,
}

impl ApproximationRequest {
    pub fn new(angle: f64, terms: u32) -> Result<ApproximationRequest, TraceError> {
        if terms == 0 {
            return Err(TraceError::ZeroTerms);
        }
        Ok(ApproximationRequest { angle, terms })
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }
    pub fn terms(&self) -> u32 {
        self.terms
    }

    pub fn sin(&self) -> f64 {
        sin(self.angle, self.terms)
    }
    pub fn cos(&self) -> f64 {
        cos(self.angle, self.terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use std::f64::consts::{FRAC_PI_4, PI};

    #[rstest]
    fn zero_angle_is_exact(#[values(1, 2, 3, 5, 10, 17, 40)] n: u32) {
        assert_eq!(sin(0.0, n), 0.0);
        assert_eq!(cos(0.0, n), 1.0);
    }

    #[rstest]
    fn single_term_is_first_order(#[values(-3.0, -0.5, 0.0, 0.25, 1.0, 12.5)] x: f64) {
        assert_eq!(sin(x, 1), x);
        assert_eq!(cos(x, 1), 1.0);
    }

    #[rstest]
    fn zero_terms_degrades_to_first_term() {
        assert_eq!(sin(0.7, 0), 0.7);
        assert_eq!(cos(0.7, 0), 1.0);
    }

    #[rstest]
    #[case(0.3)]
    #[case(1.1)]
    #[case(2.9)]
    #[case(7.0)]
    fn odd_and_even_symmetry(#[case] x: f64) {
        for n in 1..=20 {
            assert_eq!(sin(-x, n), -sin(x, n));
            assert_eq!(cos(-x, n), cos(x, n));
        }
    }

    #[rstest]
    #[case(FRAC_PI_4)]
    #[case(-FRAC_PI_4)]
    #[case(0.5)]
    #[case(0.01)]
    fn error_shrinks_with_more_terms(#[case] x: f64) {
        let mut prev_sin = f64::INFINITY;
        let mut prev_cos = f64::INFINITY;
        for n in 1..=20 {
            let sin_err = (sin(x, n) - x.sin()).abs();
            let cos_err = (cos(x, n) - x.cos()).abs();
            assert!(sin_err <= prev_sin + 1e-15, "sin error grew at n = {}", n);
            assert!(cos_err <= prev_cos + 1e-15, "cos error grew at n = {}", n);
            prev_sin = sin_err;
            prev_cos = cos_err;
        }
        assert!(prev_sin < 1e-15);
        assert!(prev_cos < 1e-15);
    }

    #[rstest]
    fn known_partial_sums() {
        // x - x³/6 + x⁵/120
        let x: f64 = 0.5;
        assert_relative_eq!(sin(x, 3), x - x.powi(3) / 6.0 + x.powi(5) / 120.0);
        // 1 - x²/2 + x⁴/24
        assert_relative_eq!(cos(x, 3), 1.0 - x * x / 2.0 + x.powi(4) / 24.0);
    }

    #[rstest]
    fn large_angle_needs_many_terms() {
        assert!((sin(PI, 2) - PI.sin()).abs() > 1.0);
        assert_relative_eq!(sin(PI, 30), PI.sin(), epsilon = 1e-12);
        assert_relative_eq!(cos(PI, 30), PI.cos(), epsilon = 1e-12);
    }

    #[rstest]
    fn repeated_calls_are_bitwise_identical() {
        for n in 1..=17 {
            assert_eq!(sin(0.7816, n).to_bits(), sin(0.7816, n).to_bits());
            assert_eq!(cos(0.7816, n).to_bits(), cos(0.7816, n).to_bits());
        }
    }

    #[rstest]
    fn request_rejects_zero_terms() {
        assert_eq!(
            ApproximationRequest::new(1.0, 0),
            Err(TraceError::ZeroTerms)
        );
        let request = ApproximationRequest::new(0.4, 17).unwrap();
        assert_relative_eq!(request.sin(), 0.4f64.sin());
        assert_relative_eq!(request.cos(), 0.4f64.cos());
    }
}
