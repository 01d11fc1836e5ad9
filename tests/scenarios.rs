use approx::assert_abs_diff_eq;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use tableau_simplex::{
    solve, Constraint, Model, NoopObserver, OptDir, PivotRule, SimplexError, Simplex, Snapshot,
    SolveAlgorithm, SolveObserver, SolverConfig, Stage, Status, Tableau, Tolerance,
};

const TOL: f64 = 1.0e-6;

fn example_model() -> Model {
    Model::new(OptDir::Max, vec![1.5, 3.0, 1.0, 4.0])
        .with_constraint(Constraint::new(vec![1.0, 1.0, 1.0, 1.0], 20.0))
        .with_constraint(Constraint::new(vec![-2.0, -1.0, 1.0, 11.0], 10.0))
        .with_constraint(Constraint::new(vec![4.0, 1.0, 0.0, -1.0], 10.0))
}

#[test]
fn single_variable_bound() {
    //max 3x: x <= 20
    let tbl = Tableau::from_rows(&[vec![0.0, -3.0], vec![20.0, 1.0]]).unwrap();
    let sol = solve(tbl, &SolverConfig::default()).unwrap();

    assert_eq!(sol.status(), Status::Optimal);
    assert_eq!(sol.iterations(), 1);
    assert_eq!(sol.tableau().cols(), 3);
    assert_abs_diff_eq!(sol.objective().unwrap(), 60.0, epsilon = TOL);
    assert_abs_diff_eq!(sol.var_value(1), 20.0, epsilon = TOL);
}

#[test]
fn unbounded_direction_stops_pivoting() {
    //max x + 2y: x - y <= 4, -x <= 3 -> y is unbounded
    let tbl = Tableau::from_rows(&[
        vec![0.0, -1.0, -2.0],
        vec![4.0, 1.0, -1.0],
        vec![3.0, -1.0, 0.0],
    ])
    .unwrap();
    let sol = solve(tbl, &SolverConfig::default()).unwrap();

    assert_eq!(sol.status(), Status::Unbounded { column: 2 });
    assert_eq!(sol.iterations(), 0);
    assert_eq!(sol.objective(), None);
}

#[test]
fn example_problem_is_optimal_and_feasible() {
    let mdl = example_model();
    let tbl = mdl.as_tableau().unwrap();
    assert_eq!(
        tbl.tbl().row(0).to_vec(),
        vec![0.0, -1.5, -3.0, -1.0, -4.0]
    );

    let sol = solve(tbl, &SolverConfig::default()).unwrap();
    assert_eq!(sol.status(), Status::Optimal);
    assert!(sol.iterations() <= 30);
    assert_abs_diff_eq!(sol.objective().unwrap(), 46.25, epsilon = TOL);

    let x = sol.assignment().to_vec();
    assert_abs_diff_eq!(x[0], 0.0, epsilon = TOL);
    assert_abs_diff_eq!(x[1], 11.25, epsilon = TOL);
    assert_abs_diff_eq!(x[2], 7.5, epsilon = TOL);
    assert_abs_diff_eq!(x[3], 1.25, epsilon = TOL);

    //substitute back into the original constraints
    assert!(mdl.is_feasible(sol.assignment(), Tolerance::default()));
    assert_abs_diff_eq!(mdl.evaluate(&x), 46.25, epsilon = TOL);
}

#[test]
fn mixed_sign_objective_reports_consistent_assignment() {
    //max -x1 + 2*x2: x2 <= 3, x1 + x2 <= 5
    let tbl = Tableau::from_rows(&[
        vec![0.0, 1.0, -2.0],
        vec![3.0, 0.0, 1.0],
        vec![5.0, 1.0, 1.0],
    ])
    .unwrap();
    let sol = solve(tbl, &SolverConfig::default()).unwrap();

    assert_eq!(sol.status(), Status::Optimal);
    assert_abs_diff_eq!(sol.objective().unwrap(), 6.0, epsilon = TOL);
    let x = sol.assignment().to_vec();
    assert_abs_diff_eq!(x[0], 0.0, epsilon = TOL);
    assert_abs_diff_eq!(x[1], 3.0, epsilon = TOL);
    assert!(!sol.assignment().is_basic(1));
    assert_abs_diff_eq!(-x[0] + 2.0 * x[1], 6.0, epsilon = TOL);
}

#[test]
fn negative_rhs_fails_before_any_pivot() {
    struct Count(usize);
    impl SolveObserver for Count {
        fn on_snapshot(&mut self, _snapshot: &Snapshot<'_>) {
            self.0 += 1;
        }
    }

    let tbl = Tableau::from_rows(&[vec![0.0, -1.0, -1.0], vec![-5.0, 1.0, 1.0]]).unwrap();
    let mut count = Count(0);
    let err = Simplex::default().solve(tbl, &mut count).err();

    assert_eq!(err, Some(SimplexError::InfeasibleStart { row: 1, rhs: -5.0 }));
    assert_eq!(count.0, 0);
}

#[test]
fn oversized_problem_is_rejected() {
    let rows = vec![vec![1.0; 20]; 12];
    let tbl = Tableau::from_rows(&rows).unwrap();
    let err = solve(tbl, &SolverConfig::default()).err();
    assert_eq!(
        err,
        Some(SimplexError::CapacityExceeded {
            rows: 12,
            cols: 31,
            max_rows: 30,
            max_cols: 30
        })
    );
}

#[test]
fn terminal_snapshot_carries_objective() {
    #[derive(Default)]
    struct Last(Option<(Stage, Option<f64>)>);
    impl SolveObserver for Last {
        fn on_snapshot(&mut self, snapshot: &Snapshot<'_>) {
            self.0 = Some((snapshot.stage, snapshot.objective));
        }
    }

    let mut last = Last::default();
    Simplex::default()
        .solve(example_model().as_tableau().unwrap(), &mut last)
        .unwrap();
    let (stage, objective) = last.0.unwrap();
    assert_eq!(stage, Stage::Optimal);
    assert_abs_diff_eq!(objective.unwrap(), 46.25, epsilon = TOL);
}

//objective row values after each pivot
struct Trace(Vec<f64>);

impl SolveObserver for Trace {
    fn on_snapshot(&mut self, snapshot: &Snapshot<'_>) {
        if snapshot.stage == Stage::AfterRowOperation {
            self.0.push(snapshot.tableau.objective_value());
        }
    }
}

fn random_problem() -> impl Strategy<Value = Model> {
    (1usize..5, 1usize..5).prop_flat_map(|(n, m)| {
        (
            prop::collection::vec(-10.0_f64..10.0, n),
            prop::collection::vec((prop::collection::vec(0.1_f64..10.0, n), 0.0_f64..50.0), m),
        )
            .prop_map(|(obj, cons)| {
                cons.into_iter().fold(Model::new(OptDir::Max, obj), |mdl, (a, b)| {
                    mdl.with_constraint(Constraint::new(a, b))
                })
            })
    })
}

proptest! {
    #[test]
    fn reported_solutions_are_feasible_and_monotone(mdl in random_problem()) {
        let tol = Tolerance::default();
        for rule in [PivotRule::Dantzig, PivotRule::Bland] {
            let mut trace = Trace(Vec::new());
            let sol = Simplex::new(SolverConfig::new().with_pivot_rule(rule))
                .solve(mdl.as_tableau().unwrap(), &mut trace)
                .unwrap();

            //positive constraint matrix bounds every variable
            prop_assert_eq!(sol.status(), Status::Optimal);
            prop_assert!(mdl.is_feasible(sol.assignment(), tol));
            prop_assert!(
                (mdl.evaluate(&sol.assignment().to_vec()) - sol.objective().unwrap()).abs() < 1.0e-6
            );
            for pair in trace.0.windows(2) {
                prop_assert!(pair[1] >= pair[0] - 1.0e-9);
            }
        }
    }

    #[test]
    fn noop_and_observed_solves_agree(mdl in random_problem()) {
        let a = solve(mdl.as_tableau().unwrap(), &SolverConfig::default()).unwrap();
        let b = Simplex::default()
            .solve(mdl.as_tableau().unwrap(), &mut NoopObserver)
            .unwrap();
        prop_assert_eq!(a.tableau(), b.tableau());
    }
}
