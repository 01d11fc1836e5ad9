//! Tableau simplex for `max c'x` subject to `Ax <= b`, `x >= 0`, `b >= 0`.
//!
//! A [`Tableau`] is widened with one slack column per constraint, giving an
//! all-slack starting basis, then pivoted with Dantzig's rule (or Bland's)
//! until it is optimal, unbounded, or the pivot budget is spent.

pub mod config;
pub mod constraint;
pub mod error;
pub mod model;
pub mod pivot;
pub mod print_table;
pub mod simplex;
pub mod solver;
pub mod tableau;
pub mod tolerance;

pub use crate::config::{Capacity, PivotRule, SolverConfig};
pub use crate::constraint::Constraint;
pub use crate::error::{Result, SimplexError};
pub use crate::model::{Model, OptDir};
pub use crate::print_table::TableauPrinter;
pub use crate::simplex::{Simplex, SolverState};
pub use crate::solver::{
    solve, Assignment, NoopObserver, Snapshot, SolveAlgorithm, SolveObserver, Solution, Stage,
    Status,
};
pub use crate::tableau::{Tableau, TableauIx};
pub use crate::tolerance::Tolerance;
