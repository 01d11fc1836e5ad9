use std::fmt;

use crate::error::{Result, SimplexError};
use crate::tolerance::Tolerance;

pub const DEFAULT_MAX_ITERATIONS: usize = 30;
pub const DEFAULT_MAX_ROWS: usize = 30;
pub const DEFAULT_MAX_COLS: usize = 30;

/// Entering/leaving variable selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PivotRule {
    /// Most negative reduced cost, first row among minimum ratios.
    #[default]
    Dantzig,
    /// Lowest index entering column, lowest basic variable among minimum ratios.
    /// Never cycles.
    Bland,
}

impl fmt::Display for PivotRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PivotRule::Dantzig => write!(f, "Dantzig"),
            PivotRule::Bland => write!(f, "Bland"),
        }
    }
}

/// Upper bound on the augmented tableau size.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Capacity {
    pub max_rows: usize,
    pub max_cols: usize,
}

impl Default for Capacity {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
            max_cols: DEFAULT_MAX_COLS,
        }
    }
}

impl Capacity {
    pub fn new(max_rows: usize, max_cols: usize) -> Self {
        Self { max_rows, max_cols }
    }

    /// Checks a raw `rows x cols` problem against the bound once one slack
    /// column per constraint row has been appended.
    pub fn check(&self, rows: usize, cols: usize) -> Result<()> {
        let augmented_cols = cols + rows.saturating_sub(1);
        if rows > self.max_rows || augmented_cols > self.max_cols {
            return Err(SimplexError::CapacityExceeded {
                rows,
                cols: augmented_cols,
                max_rows: self.max_rows,
                max_cols: self.max_cols,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfig {
    max_iterations: usize,
    tolerance: Tolerance,
    capacity: Capacity,
    pivot_rule: PivotRule,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: Tolerance::default(),
            capacity: Capacity::default(),
            pivot_rule: PivotRule::default(),
        }
    }
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_epsilon(mut self, eps: f64) -> Self {
        self.tolerance = Tolerance::new(eps);
        self
    }

    pub fn with_capacity(mut self, capacity: Capacity) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_pivot_rule(mut self, pivot_rule: PivotRule) -> Self {
        self.pivot_rule = pivot_rule;
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn pivot_rule(&self) -> PivotRule {
        self.pivot_rule
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(SimplexError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        let eps = self.tolerance.eps();
        if !eps.is_finite() || eps <= 0.0_f64 {
            return Err(SimplexError::InvalidConfig(format!(
                "epsilon must be positive and finite, got {}",
                eps
            )));
        }
        if self.capacity.max_rows == 0 || self.capacity.max_cols == 0 {
            return Err(SimplexError::InvalidConfig(
                "capacity must allow at least one row and one column".to_string(),
            ));
        }
        Ok(())
    }
}
