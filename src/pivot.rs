//! Entering column and leaving row selection.

use std::cmp::Ordering;

use crate::config::PivotRule;
use crate::tableau::Tableau;
use crate::tolerance::Tolerance;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColumnChoice {
    Entering(usize),
    /// No reduced cost is negative.
    Optimal,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RowChoice {
    Leaving(usize),
    /// No constraint row limits the entering variable.
    Unbounded,
}

/// Picks the entering column from the objective row.
///
/// Dantzig takes the most negative reduced cost, the leftmost on ties.
/// Bland takes the leftmost negative one.
pub fn select_pivot_column(tbl: &Tableau, rule: PivotRule, tol: Tolerance) -> ColumnChoice {
    let objective_row = tbl.objective_row();
    let negative = objective_row
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_j, v)| tol.is_negative(**v));

    let entering = match rule {
        PivotRule::Dantzig => negative
            .min_by(|(_j1, v1), (_j2, v2)| v1.partial_cmp(v2).unwrap_or(Ordering::Equal))
            .map(|(j, _v)| j),
        PivotRule::Bland => negative.map(|(j, _v)| j).next(),
    };

    match entering {
        Some(j) => {
            log::debug!(
                "entering column in objective row is col {} = {}",
                j,
                tbl.get(0, j)
            );
            ColumnChoice::Entering(j)
        }
        None => ColumnChoice::Optimal,
    }
}

/// Minimum ratio test over the rows with a positive entry in `pivot_col`.
///
/// Dantzig keeps the first row reaching the minimum ratio. Bland breaks ties
/// by the lowest index of the row's basic variable.
pub fn select_pivot_row(
    tbl: &Tableau,
    pivot_col: usize,
    rule: PivotRule,
    tol: Tolerance,
) -> RowChoice {
    let thetas = (1..tbl.rows())
        .filter(|&i| tol.is_positive(tbl.get(i, pivot_col)))
        .map(|i| (i, tbl.rhs(i) / tbl.get(i, pivot_col)))
        .collect::<Vec<(usize, f64)>>();
    log::debug!("theta x[row_i,0]/x[row_i,{}] = {:?}", pivot_col, thetas);

    let min_theta = thetas
        .iter()
        .min_by(|(_i1, t1), (_i2, t2)| t1.partial_cmp(t2).unwrap_or(Ordering::Equal));
    let (first_row, min_theta) = match min_theta {
        Some(&(i, theta)) => (i, theta),
        None => return RowChoice::Unbounded,
    };

    let leaving = match rule {
        PivotRule::Dantzig => first_row,
        PivotRule::Bland => {
            let basis = tbl.basis(tol);
            thetas
                .iter()
                .filter(|(_i, theta)| tol.approx_eq(*theta, min_theta))
                .min_by_key(|(i, _theta)| basis[*i].unwrap_or(usize::MAX))
                .map(|(i, _theta)| *i)
                .unwrap_or(first_row)
        }
    };

    log::debug!(
        "pivot at A[{},{}], min ratio = {} in row {}",
        leaving,
        pivot_col,
        min_theta,
        leaving
    );
    RowChoice::Leaving(leaving)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use proptest::prelude::*;

    fn tableau(tbl: ndarray::Array2<f64>) -> Tableau {
        Tableau::new(tbl).unwrap()
    }

    #[test]
    fn dantzig_takes_most_negative_leftmost() {
        let tbl = tableau(array![
            [0.0, -1.0, -4.0, -4.0, 2.0],
            [1.0, 1.0, 1.0, 1.0, 1.0]
        ]);
        let tol = Tolerance::default();
        assert_eq!(
            select_pivot_column(&tbl, PivotRule::Dantzig, tol),
            ColumnChoice::Entering(2)
        );
        assert_eq!(
            select_pivot_column(&tbl, PivotRule::Bland, tol),
            ColumnChoice::Entering(1)
        );
    }

    #[test]
    fn non_negative_objective_row_is_optimal() {
        let tbl = tableau(array![[60.0, 0.0, 3.0, -1.0e-12], [20.0, 1.0, 1.0, 0.0]]);
        let tol = Tolerance::default();
        assert_eq!(
            select_pivot_column(&tbl, PivotRule::Dantzig, tol),
            ColumnChoice::Optimal
        );
        assert_eq!(
            select_pivot_column(&tbl, PivotRule::Bland, tol),
            ColumnChoice::Optimal
        );
    }

    #[test]
    fn objective_value_column_is_ignored() {
        let tbl = tableau(array![[-5.0, 1.0], [1.0, 1.0]]);
        assert_eq!(
            select_pivot_column(&tbl, PivotRule::Dantzig, Tolerance::default()),
            ColumnChoice::Optimal
        );
    }

    #[test]
    fn ratio_test_skips_non_positive_entries() {
        let tbl = tableau(array![
            [0.0, -1.0],
            [4.0, -2.0],
            [9.0, 3.0],
            [5.0, 0.0],
            [2.0, 1.0]
        ]);
        assert_eq!(
            select_pivot_row(&tbl, 1, PivotRule::Dantzig, Tolerance::default()),
            RowChoice::Leaving(4)
        );
    }

    #[test]
    fn no_positive_entry_is_unbounded() {
        let tbl = tableau(array![[0.0, -1.0, 0.0], [4.0, -1.0, 1.0], [3.0, 0.0, 2.0]]);
        assert_eq!(
            select_pivot_row(&tbl, 1, PivotRule::Dantzig, Tolerance::default()),
            RowChoice::Unbounded
        );
    }

    #[test]
    fn ratio_ties() {
        //rows 1 and 2 tie at theta = 2; row 2's basic variable has the lower index
        let tbl = tableau(array![
            [0.0, -1.0, 0.0, 0.0],
            [4.0, 2.0, 0.0, 1.0],
            [2.0, 1.0, 1.0, 0.0]
        ]);
        let tol = Tolerance::default();
        assert_eq!(
            select_pivot_row(&tbl, 1, PivotRule::Dantzig, tol),
            RowChoice::Leaving(1)
        );
        assert_eq!(
            select_pivot_row(&tbl, 1, PivotRule::Bland, tol),
            RowChoice::Leaving(2)
        );
    }

    proptest! {
        #[test]
        fn optimal_is_stable(
            costs in prop::collection::vec(-5.0_f64..5.0, 4),
        ) {
            let mut row = vec![0.0];
            row.extend(costs);
            let tbl = Tableau::from_rows(&[row, vec![1.0; 5]]).unwrap();
            let tol = Tolerance::default();
            let first = select_pivot_column(&tbl, PivotRule::Dantzig, tol);
            if first == ColumnChoice::Optimal {
                prop_assert_eq!(select_pivot_column(&tbl, PivotRule::Dantzig, tol), ColumnChoice::Optimal);
            } else {
                prop_assert!(tbl.objective_row().iter().skip(1).any(|v| tol.is_negative(*v)));
            }
        }
    }
}
