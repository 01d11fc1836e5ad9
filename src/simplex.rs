use crate::config::SolverConfig;
use crate::error::{Result, SimplexError};
use crate::pivot::{select_pivot_column, select_pivot_row, ColumnChoice, RowChoice};
use crate::solver::{Assignment, Snapshot, SolveAlgorithm, SolveObserver, Solution, Stage, Status};
use crate::tableau::{Tableau, TableauIx};

/// Pivoting state machine. `Optimal`, `Unbounded` and
/// `IterationLimitExceeded` are terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SolverState {
    Selecting,
    Pivoting(TableauIx),
    Optimal,
    Unbounded { column: usize },
    IterationLimitExceeded,
}

impl SolverState {
    pub fn is_terminal(&self) -> bool {
        self.status().is_some()
    }

    pub fn status(&self) -> Option<Status> {
        match *self {
            SolverState::Optimal => Some(Status::Optimal),
            SolverState::Unbounded { column } => Some(Status::Unbounded { column }),
            SolverState::IterationLimitExceeded => Some(Status::IterationLimitExceeded),
            SolverState::Selecting | SolverState::Pivoting(_) => None,
        }
    }
}

//numbers and forwards snapshots
struct Emitter<'o> {
    observer: &'o mut dyn SolveObserver,
    step: usize,
}

impl<'o> Emitter<'o> {
    fn emit(
        &mut self,
        stage: Stage,
        tableau: &Tableau,
        pivot: Option<TableauIx>,
        entering: Option<usize>,
        objective: Option<f64>,
        assignment: Option<Assignment>,
    ) {
        self.step += 1;
        self.observer.on_snapshot(&Snapshot {
            step: self.step,
            stage,
            tableau,
            pivot,
            entering,
            objective,
            assignment,
        });
    }
}

/// Primal tableau simplex for `max c'x, Ax <= b, x >= 0` with `b >= 0`.
#[derive(Clone, Debug, Default)]
pub struct Simplex {
    config: SolverConfig,
}

impl Simplex {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// One `Selecting` transition: entering column, leaving row, then the
    /// pivot budget.
    pub fn step(&self, tbl: &Tableau, pivots: usize) -> SolverState {
        let tol = self.config.tolerance();
        let rule = self.config.pivot_rule();

        let j = match select_pivot_column(tbl, rule, tol) {
            ColumnChoice::Entering(j) => j,
            ColumnChoice::Optimal => return SolverState::Optimal,
        };
        log::info!("entering var x{} into basis, pivot_c = {}", j, j);

        let i = match select_pivot_row(tbl, j, rule, tol) {
            RowChoice::Leaving(i) => i,
            RowChoice::Unbounded => return SolverState::Unbounded { column: j },
        };
        log::info!("exiting var from row {}, pivot_r = {}", i, i);

        if pivots >= self.config.max_iterations() {
            return SolverState::IterationLimitExceeded;
        }
        SolverState::Pivoting(TableauIx::new(i, j))
    }

    fn _solve(&self, tbl: &mut Tableau, emitter: &mut Emitter) -> (Status, usize) {
        let tol = self.config.tolerance();
        let mut pvt_cnt = 0;
        let mut state = SolverState::Selecting;

        loop {
            state = match state {
                SolverState::Selecting => self.step(tbl, pvt_cnt),
                SolverState::Pivoting(ix) => {
                    tbl.pivot(&ix);
                    pvt_cnt += 1;
                    log::debug!("pivot {} at {}:\n{}", pvt_cnt, ix, tbl);
                    emitter.emit(
                        Stage::AfterRowOperation,
                        tbl,
                        Some(ix),
                        None,
                        Some(tbl.objective_value()),
                        Some(tbl.basic_solution(tol)),
                    );
                    SolverState::Selecting
                }
                terminal => {
                    // status() is Some for every remaining state
                    let status = terminal.status().unwrap_or(Status::IterationLimitExceeded);
                    return (status, pvt_cnt);
                }
            };
        }
    }
}

impl SolveAlgorithm for Simplex {
    fn solve(&self, mut tableau: Tableau, observer: &mut dyn SolveObserver) -> Result<Solution> {
        let tol = self.config.tolerance();
        self.config.validate()?;
        if tableau.is_augmented() {
            return Err(SimplexError::AlreadyAugmented);
        }
        self.config
            .capacity()
            .check(tableau.rows(), tableau.cols())?;
        tableau.verify_non_negative_rhs()?;

        let mut emitter = Emitter { observer, step: 0 };
        emitter.emit(Stage::Initial, &tableau, None, None, None, None);

        tableau.augment_with_slacks()?;
        emitter.emit(Stage::SlackVariablesAdded, &tableau, None, None, None, None);

        let (status, iterations) = self._solve(&mut tableau, &mut emitter);

        let (objective, entering) = match status {
            Status::Optimal => {
                log::info!("opt value is at A[0,0] = {}", tableau.objective_value());
                (Some(tableau.objective_value()), None)
            }
            Status::Unbounded { column } => {
                log::info!("unbounded problem along x{}", column);
                (None, Some(column))
            }
            Status::IterationLimitExceeded => {
                log::warn!(
                    "too many ({}) iterations, reporting best tableau found",
                    iterations
                );
                (Some(tableau.objective_value()), None)
            }
        };
        emitter.emit(
            Stage::from(status),
            &tableau,
            None,
            entering,
            objective,
            Some(tableau.basic_solution(tol)),
        );

        let var_values = tableau.current_assignment(tol);
        Ok(Solution::new(status, iterations, tableau, var_values))
    }
}
