use tabular::{Row, Table};

use std::fmt;

use crate::constraint::{fmt_linear, Constraint};
use crate::error::{Result, SimplexError};
use crate::solver::{Assignment, Solution};
use crate::tableau::Tableau;
use crate::tolerance::Tolerance;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OptDir {
    Max,
    Min,
}

impl fmt::Display for OptDir {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OptDir::Max => write!(f, "Max"),
            OptDir::Min => write!(f, "Min"),
        }
    }
}

/// `opt c'x` subject to `Ax <= b`, `x >= 0`.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    pub(crate) obj_fn: Vec<f64>,
    pub(crate) opt_dir: OptDir,
    pub(crate) constraints: Vec<Constraint>,
}

impl Model {
    pub fn new(opt_dir: OptDir, obj_fn: Vec<f64>) -> Self {
        Self {
            obj_fn,
            opt_dir,
            constraints: Vec::new(),
        }
    }

    //set objective function and optimization direction
    pub fn set_obj_fn(&mut self, opt_dir: OptDir, obj_fn: Vec<f64>) {
        self.obj_fn = obj_fn;
        self.opt_dir = opt_dir;
    }

    //add a constraint to model
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.add_constraint(constraint);
        self
    }

    pub fn opt_dir(&self) -> OptDir {
        self.opt_dir
    }

    pub fn obj_fn(&self) -> &[f64] {
        &self.obj_fn
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn n_vars(&self) -> usize {
        self.obj_fn.len()
    }

    /// Input matrix for the solver. Minimization is posed as `max -c'x`.
    pub fn as_tableau(&self) -> Result<Tableau> {
        let n = self.n_vars();
        let sign = match self.opt_dir {
            OptDir::Max => -1.0_f64,
            OptDir::Min => 1.0_f64,
        };

        let mut rows = Vec::with_capacity(self.constraints.len() + 1);
        let mut obj_row = vec![0.0_f64];
        obj_row.extend(self.obj_fn.iter().map(|c| sign * c));
        rows.push(obj_row);

        for con in &self.constraints {
            if con.n_vars() != n {
                return Err(SimplexError::DimensionMismatch {
                    expected: n,
                    found: con.n_vars(),
                });
            }
            rows.push(con.as_row());
        }
        Tableau::from_rows(&rows)
    }

    /// `c'x`
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        self.obj_fn.iter().zip(x.iter()).map(|(c, v)| c * v).sum()
    }

    /// Objective of `sol` in this model's direction.
    pub fn objective_value(&self, sol: &Solution) -> Option<f64> {
        let val = sol.objective()?;
        match self.opt_dir {
            OptDir::Max => Some(val),
            OptDir::Min => Some(-val),
        }
    }

    /// Non-negativity and every constraint, within `tol`.
    pub fn is_feasible(&self, assignment: &Assignment, tol: Tolerance) -> bool {
        let x = assignment.to_vec();
        x.iter().all(|v| !tol.is_negative(*v))
            && self.constraints.iter().all(|c| c.is_satisfied_by(&x, tol))
    }
}

struct Linear<'a>(&'a [f64]);

impl fmt::Display for Linear<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_linear(f, self.0)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        //OptDir, colon, lhs, comp, rhs
        let mut table = Table::new("{:<}{:^}{:<}{:^}{:>}");

        table.add_row(
            Row::new()
                .with_cell(self.opt_dir)
                .with_cell(":")
                .with_cell(Linear(&self.obj_fn))
                .with_cell("")
                .with_cell(""),
        );
        table.add_row(Row::from_cells(
            ["Subject to", ":", "", "", ""].iter().map(|s| s.to_string()),
        ));
        for constraint in &self.constraints {
            table.add_row(
                Row::new()
                    .with_cell("")
                    .with_cell("")
                    .with_cell(Linear(&constraint.coefficients))
                    .with_cell(" \u{2264} ")
                    .with_cell(constraint.rhs),
            );
        }
        table.add_row(Row::from_cells(
            ["", "", "x >= 0", "", ""].iter().map(|s| s.to_string()),
        ));

        write!(f, "{}", table)
    }
}
