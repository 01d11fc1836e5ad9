use std::fmt;

use crate::tolerance::Tolerance;

/// `coefficients . x <= rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub coefficients: Vec<f64>,
    pub rhs: f64,
}

impl Constraint {
    pub fn new<T: Into<Vec<f64>>>(coefficients: T, rhs: f64) -> Self {
        Self {
            coefficients: coefficients.into(),
            rhs,
        }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    pub fn n_vars(&self) -> usize {
        self.coefficients.len()
    }

    /// Left-hand side at `x`; missing trailing values count as `0`.
    pub fn lhs(&self, x: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(x.iter())
            .map(|(a, v)| a * v)
            .sum()
    }

    pub fn is_satisfied_by(&self, x: &[f64], tol: Tolerance) -> bool {
        let lhs = self.lhs(x);
        lhs < self.rhs || tol.approx_eq(lhs, self.rhs)
    }

    /// Tableau row `[rhs, a_1, .., a_n]`.
    pub fn as_row(&self) -> Vec<f64> {
        let mut row = Vec::with_capacity(self.coefficients.len() + 1);
        row.push(self.rhs);
        row.extend_from_slice(&self.coefficients);
        row
    }
}

pub(crate) fn fmt_linear(f: &mut fmt::Formatter, coefficients: &[f64]) -> fmt::Result {
    let mut first = true;
    for (j, coeff) in coefficients.iter().enumerate() {
        if *coeff == 0.0_f64 {
            continue;
        }
        let sign = if *coeff < 0.0_f64 { "-" } else { "+" };
        if first {
            if *coeff < 0.0_f64 {
                write!(f, "-")?;
            }
        } else {
            write!(f, " {} ", sign)?;
        }
        write!(f, "{}*x{}", coeff.abs(), j + 1)?;
        first = false;
    }
    if first {
        write!(f, "0")?;
    }
    Ok(())
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_linear(f, &self.coefficients)?;
        write!(f, " \u{2264} {}", self.rhs)
    }
}
