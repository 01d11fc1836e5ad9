use std::fmt;

/// Absolute tolerance used for every floating point comparison in the solver.
pub const DEFAULT_EPS: f64 = 1.0e-6;

/// Absolute-epsilon comparator.
///
/// Pivoting accumulates rounding drift, so entries that should be exactly
/// `0` or `1` are only ever compared through this type.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tolerance(f64);

impl Default for Tolerance {
    fn default() -> Self {
        Self(DEFAULT_EPS)
    }
}

impl Tolerance {
    pub fn new(eps: f64) -> Self {
        Self(eps)
    }

    pub fn eps(&self) -> f64 {
        self.0
    }

    #[inline]
    pub fn approx_eq(&self, x: f64, y: f64) -> bool {
        (x - y).abs() < self.0
    }

    #[inline]
    pub fn is_zero(&self, x: f64) -> bool {
        self.approx_eq(x, 0.0_f64)
    }

    #[inline]
    pub fn is_one(&self, x: f64) -> bool {
        self.approx_eq(x, 1.0_f64)
    }

    /// Strictly greater than `eps`.
    #[inline]
    pub fn is_positive(&self, x: f64) -> bool {
        x > self.0
    }

    /// Strictly less than `-eps`.
    #[inline]
    pub fn is_negative(&self, x: f64) -> bool {
        x < -self.0
    }

    //values printed as integers
    pub fn is_integral(&self, x: f64) -> bool {
        x.is_finite() && self.approx_eq(x.round(), x)
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:e}", self.0)
    }
}
