use ndarray::{s, Array2, ArrayView1};
use num::ToPrimitive;

use std::fmt;

use crate::error::{Result, SimplexError};
use crate::solver::Assignment;
use crate::tolerance::Tolerance;

/// Position of a pivot element: constraint row `i`, variable column `j`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TableauIx {
    i: usize,
    j: usize,
}

impl TableauIx {
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }

    pub fn i(&self) -> usize {
        self.i
    }

    pub fn j(&self) -> usize {
        self.j
    }
}

impl fmt::Display for TableauIx {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "A[{},{}]", self.i, self.j)
    }
}

/// Augmented coefficient matrix of a `max c'x, Ax <= b, x >= 0` problem.
///
/// Row 0 is the objective row: column 0 holds the current objective value and
/// columns `1..` the reduced costs. Rows `1..` are constraints with the
/// right-hand side in column 0.
#[derive(Clone, Debug, PartialEq)]
pub struct Tableau {
    pub(crate) tbl: Array2<f64>,
    n_structural: usize,
    n_slack: usize,
    augmented: bool,
}

impl Tableau {
    //constructor
    pub fn new(tbl: Array2<f64>) -> Result<Self> {
        let (m, n) = tbl.dim();
        if m == 0 || n == 0 {
            return Err(SimplexError::EmptyProblem);
        }
        if let Some(((row, col), _)) = tbl.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(SimplexError::NonFiniteEntry { row, col });
        }
        Ok(Self {
            tbl,
            n_structural: n - 1,
            n_slack: 0,
            augmented: false,
        })
    }

    /// Builds a tableau from `rows` of `[rhs, a_1, .., a_n]`, objective row first.
    pub fn from_rows<T: ToPrimitive>(rows: &[Vec<T>]) -> Result<Self> {
        let m = rows.len();
        let n = rows.first().map(|r| r.len()).unwrap_or(0);
        if m == 0 || n == 0 {
            return Err(SimplexError::EmptyProblem);
        }

        let mut tbl = Array2::<f64>::zeros((m, n));
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(SimplexError::RaggedRow {
                    row: i,
                    expected: n,
                    found: row.len(),
                });
            }
            for (j, v) in row.iter().enumerate() {
                tbl[[i, j]] = v
                    .to_f64()
                    .ok_or(SimplexError::NonFiniteEntry { row: i, col: j })?;
            }
        }
        Self::new(tbl)
    }

    pub fn tbl(&self) -> &Array2<f64> {
        &self.tbl
    }

    pub fn rows(&self) -> usize {
        self.tbl.nrows()
    }

    pub fn cols(&self) -> usize {
        self.tbl.ncols()
    }

    pub fn n_constraints(&self) -> usize {
        self.rows() - 1
    }

    /// Number of original decision variables (columns `1..=n_structural`).
    pub fn n_structural(&self) -> usize {
        self.n_structural
    }

    pub fn n_slack(&self) -> usize {
        self.n_slack
    }

    pub fn is_augmented(&self) -> bool {
        self.augmented
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.tbl[[i, j]]
    }

    pub fn rhs(&self, i: usize) -> f64 {
        self.tbl[[i, 0]]
    }

    pub fn objective_row(&self) -> ArrayView1<'_, f64> {
        self.tbl.row(0)
    }

    pub fn column(&self, j: usize) -> ArrayView1<'_, f64> {
        self.tbl.column(j)
    }

    /// Appends one slack column per constraint row, forming an identity block
    /// over the constraint rows. Zero in the objective row.
    pub fn augment_with_slacks(&mut self) -> Result<()> {
        if self.augmented {
            return Err(SimplexError::AlreadyAugmented);
        }
        let (m, n) = self.tbl.dim();
        let n_slack = m - 1;

        let mut wide = Array2::<f64>::zeros((m, n + n_slack));
        wide.slice_mut(s![.., ..n]).assign(&self.tbl);
        for i in 1..m {
            wide[[i, n + i - 1]] = 1.0_f64;
        }

        self.tbl = wide;
        self.n_slack = n_slack;
        self.augmented = true;
        Ok(())
    }

    /// The all-slack starting basis is feasible only if every constraint
    /// right-hand side is non-negative.
    pub fn verify_non_negative_rhs(&self) -> Result<()> {
        match (1..self.rows()).find(|&i| self.rhs(i) < 0.0_f64) {
            Some(row) => Err(SimplexError::InfeasibleStart {
                row,
                rhs: self.rhs(row),
            }),
            None => Ok(()),
        }
    }

    /// Row holding the single `1` of a unit column over the constraint rows,
    /// `None` if column `col` is not a unit vector or has a non-zero reduced
    /// cost (its variable is non-basic).
    pub fn find_basis_column(&self, col: usize, tol: Tolerance) -> Option<usize> {
        if !tol.is_zero(self.tbl[[0, col]]) {
            return None;
        }
        let mut found = None;
        for i in 1..self.rows() {
            let v = self.tbl[[i, col]];
            if tol.is_one(v) {
                if found.is_some() {
                    return None;
                }
                found = Some(i);
            } else if !tol.is_zero(v) {
                return None;
            }
        }
        found
    }

    /// Basic column of each row; index 0 (objective row) is always `None`.
    /// When several columns qualify for a row the leftmost one holds it.
    pub fn basis(&self, tol: Tolerance) -> Vec<Option<usize>> {
        let mut basis = vec![None; self.rows()];
        for j in 1..self.cols() {
            if let Some(i) = self.find_basis_column(j, tol) {
                if basis[i].is_none() {
                    basis[i] = Some(j);
                }
            }
        }
        basis
    }

    //pivot
    #[inline(always)]
    pub fn pivot(&mut self, pivot_ind: &TableauIx) {
        //assert row and col in valid range
        debug_assert!(pivot_ind.i() >= 1 && pivot_ind.i() < self.rows());
        debug_assert!(pivot_ind.j() >= 1 && pivot_ind.j() < self.cols());

        let (r, c) = (pivot_ind.i(), pivot_ind.j());

        //normalize pivot row
        let div = self.tbl[[r, c]];
        debug_assert!(div != 0.0_f64, "pivot on a zero entry");
        let mut row_r = self.tbl.row_mut(r);
        row_r /= div;
        row_r[c] = 1.0_f64;

        //eliminate column in every other row
        let pivot_row = self.tbl.row(r).to_owned();
        for (i, mut row) in self.tbl.rows_mut().into_iter().enumerate() {
            if i == r {
                continue;
            }
            let ratio = row[c];
            if ratio == 0.0_f64 {
                continue;
            }
            row.scaled_add(-ratio, &pivot_row);
            row[c] = 0.0_f64;
        }
    }

    /// Current objective value, `A[0,0]`.
    pub fn objective_value(&self) -> f64 {
        self.tbl[[0, 0]]
    }

    //one variable per row, read through the basis
    fn assignment_over(&self, n_vars: usize, tol: Tolerance) -> Assignment {
        let mut assignment = Assignment::new(n_vars);
        for (i, basic) in self.basis(tol).into_iter().enumerate() {
            match basic {
                Some(j) if j <= n_vars => assignment.insert(j, self.rhs(i)),
                _ => {}
            }
        }
        assignment
    }

    /// Values of the structural variables `x_1..x_n`.
    pub fn current_assignment(&self, tol: Tolerance) -> Assignment {
        self.assignment_over(self.n_structural, tol)
    }

    /// Values of every column variable, slack columns included.
    pub fn basic_solution(&self, tol: Tolerance) -> Assignment {
        self.assignment_over(self.cols() - 1, tol)
    }
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.tbl)
    }
}
