use rustc_hash::FxHashMap;

use std::fmt;

use crate::config::SolverConfig;
use crate::error::Result;
use crate::simplex::Simplex;
use crate::tableau::{Tableau, TableauIx};

/// Variable values read off a tableau. Non-basic variables are implicitly `0`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assignment {
    n_vars: usize,
    values: FxHashMap<usize, f64>,
}

impl Assignment {
    pub fn new(n_vars: usize) -> Self {
        Self {
            n_vars,
            values: FxHashMap::default(),
        }
    }

    pub(crate) fn insert(&mut self, var: usize, value: f64) {
        debug_assert!(var >= 1 && var <= self.n_vars);
        self.values.insert(var, value);
    }

    /// Number of variables covered, `x_1..=x_len`.
    pub fn len(&self) -> usize {
        self.n_vars
    }

    pub fn is_empty(&self) -> bool {
        self.n_vars == 0
    }

    /// Value of `x_var` (1-based).
    pub fn get(&self, var: usize) -> f64 {
        self.values.get(&var).copied().unwrap_or(0.0_f64)
    }

    pub fn is_basic(&self, var: usize) -> bool {
        self.values.contains_key(&var)
    }

    /// `(index, value)` for every covered variable in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        (1..=self.n_vars).map(move |j| (j, self.get(j)))
    }

    /// Values as a dense vector, `x_1` first.
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().map(|(_j, v)| v).collect()
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let parts = self
            .iter()
            .map(|(j, v)| format!("x{}={:.2}", j, v))
            .collect::<Vec<String>>();
        write!(f, "{}", parts.join(", "))
    }
}

/// Terminal classification of a solve.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Optimal,
    /// The objective grows without bound along `column`.
    Unbounded { column: usize },
    /// The pivot budget ran out; the tableau is the best one found.
    IterationLimitExceeded,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Status::Optimal => write!(f, "optimal"),
            Status::Unbounded { column } => write!(f, "unbounded along x{}", column),
            Status::IterationLimitExceeded => write!(f, "iteration limit exceeded"),
        }
    }
}

pub struct Solution {
    status: Status,
    iterations: usize,
    tableau: Tableau,
    var_values: Assignment,
}

impl Solution {
    pub fn new(status: Status, iterations: usize, tableau: Tableau, var_values: Assignment) -> Self {
        Self {
            status,
            iterations,
            tableau,
            var_values,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Pivots performed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    /// `None` when the problem is unbounded.
    pub fn objective(&self) -> Option<f64> {
        match self.status {
            Status::Unbounded { .. } => None,
            _ => Some(self.tableau.objective_value()),
        }
    }

    /// Structural variable values.
    pub fn assignment(&self) -> &Assignment {
        &self.var_values
    }

    pub fn var_value(&self, var: usize) -> f64 {
        self.var_values.get(var)
    }

    pub fn into_tableau(self) -> Tableau {
        self.tableau
    }
}

/// What a snapshot was taken after.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    Initial,
    SlackVariablesAdded,
    AfterRowOperation,
    Optimal,
    Unbounded,
    IterationLimitExceeded,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Initial => "initial",
            Stage::SlackVariablesAdded => "slack variables added",
            Stage::AfterRowOperation => "after row operation",
            Stage::Optimal => "optimal solution",
            Stage::Unbounded => "unbounded",
            Stage::IterationLimitExceeded => "iteration limit exceeded",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Stage::Optimal | Stage::Unbounded | Stage::IterationLimitExceeded
        )
    }
}

impl From<Status> for Stage {
    fn from(status: Status) -> Self {
        match status {
            Status::Optimal => Stage::Optimal,
            Status::Unbounded { .. } => Stage::Unbounded,
            Status::IterationLimitExceeded => Stage::IterationLimitExceeded,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// State of the tableau at one step of a solve.
#[derive(Debug)]
pub struct Snapshot<'a> {
    /// 1-based, counts every emitted snapshot.
    pub step: usize,
    pub stage: Stage,
    pub tableau: &'a Tableau,
    /// Pivot just applied (`AfterRowOperation`).
    pub pivot: Option<TableauIx>,
    /// Entering column with no positive constraint entry (`Unbounded`).
    pub entering: Option<usize>,
    pub objective: Option<f64>,
    /// Basic feasible solution over every column, slacks included.
    pub assignment: Option<Assignment>,
}

pub trait SolveObserver {
    fn on_snapshot(&mut self, snapshot: &Snapshot<'_>);
}

impl<F> SolveObserver for F
where
    F: FnMut(&Snapshot<'_>),
{
    fn on_snapshot(&mut self, snapshot: &Snapshot<'_>) {
        self(snapshot)
    }
}

/// Discards every snapshot.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopObserver;

impl SolveObserver for NoopObserver {
    fn on_snapshot(&mut self, _snapshot: &Snapshot<'_>) {}
}

pub trait SolveAlgorithm {
    fn solve(&self, tableau: Tableau, observer: &mut dyn SolveObserver) -> Result<Solution>;
}

/// Solves `tableau` with the simplex method, without observing steps.
pub fn solve(tableau: Tableau, config: &SolverConfig) -> Result<Solution> {
    Simplex::new(config.clone()).solve(tableau, &mut NoopObserver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn assignment_defaults_to_zero() {
        let mut a = Assignment::new(3);
        a.insert(2, 7.5);
        assert_eq!(a.get(1), 0.0);
        assert_eq!(a.get(2), 7.5);
        assert!(a.is_basic(2));
        assert!(!a.is_basic(3));
        assert_eq!(a.to_vec(), vec![0.0, 7.5, 0.0]);
        assert_eq!(a.to_string(), "x1=0.00, x2=7.50, x3=0.00");
    }

    #[test]
    fn stage_labels() {
        assert_eq!(Stage::SlackVariablesAdded.label(), "slack variables added");
        assert_eq!(Stage::AfterRowOperation.to_string(), "after row operation");
        assert_eq!(Stage::from(Status::Unbounded { column: 2 }), Stage::Unbounded);
        assert!(Stage::IterationLimitExceeded.is_terminal());
        assert!(!Stage::Initial.is_terminal());
    }
}
