use colored::*;
use tabled::{Table as TabledTable, Tabled};
use tabular::{Row, Table};
use unicode_width::UnicodeWidthStr;

use std::io::{self, Write};

use crate::solver::{Assignment, Snapshot, SolveObserver, Stage};
use crate::tolerance::Tolerance;

#[derive(Tabled)]
struct AssignmentRow {
    variable: String,
    value: String,
    basic: bool,
}

/// Renders solver snapshots as numbered tableau listings.
pub struct TableauPrinter<W: Write> {
    out: W,
    tol: Tolerance,
    color: bool,
}

impl TableauPrinter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TableauPrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            tol: Tolerance::default(),
            color: true,
        }
    }

    pub fn with_tolerance(mut self, tol: Tolerance) -> Self {
        self.tol = tol;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    //integers without decimals
    fn cell(&self, v: f64) -> String {
        if self.tol.is_integral(v) {
            format!("{}", v.round() as i64)
        } else {
            format!("{:.2}", v)
        }
    }

    fn stage_label(&self, stage: Stage) -> String {
        if !self.color {
            return stage.label().to_string();
        }
        match stage {
            Stage::Optimal => stage.label().green().bold().to_string(),
            Stage::Unbounded => stage.label().red().bold().to_string(),
            Stage::IterationLimitExceeded => stage.label().yellow().bold().to_string(),
            _ => stage.label().bold().to_string(),
        }
    }

    fn matrix(&self, snapshot: &Snapshot<'_>) -> String {
        let tbl = snapshot.tableau;
        let mut spec = "{:<} {:>}".to_string();
        spec += &"  {:>}".repeat(tbl.cols() - 1);
        let mut table = Table::new(&spec);

        let mut header = Row::new().with_cell("col:").with_cell("b[i]");
        for j in 1..tbl.cols() {
            header.add_cell(format!("x{}", j));
        }
        table.add_row(header);

        for i in 0..tbl.rows() {
            let mut row = Row::new();
            if i == 0 {
                row.add_cell("max:");
            } else {
                row.add_cell(format!("b{}:", i));
            }
            for j in 0..tbl.cols() {
                row.add_cell(self.cell(tbl.get(i, j)));
            }
            table.add_row(row);
        }
        table.to_string()
    }

    fn assignment(&self, assignment: &Assignment) -> String {
        let rows = assignment
            .iter()
            .map(|(j, v)| AssignmentRow {
                variable: format!("x{}", j),
                value: format!("{:.2}", v),
                basic: assignment.is_basic(j),
            })
            .collect::<Vec<AssignmentRow>>();
        TabledTable::new(rows).to_string()
    }

    pub fn render(&self, snapshot: &Snapshot<'_>) -> String {
        let matrix = self.matrix(snapshot);
        let width = matrix
            .lines()
            .map(UnicodeWidthStr::width)
            .max()
            .unwrap_or(0);
        let rule = "-".repeat(width);

        let mut out = format!(
            "\n{}. Problem {}:\n{}\n{}\n{}\n",
            snapshot.step,
            self.stage_label(snapshot.stage),
            rule,
            matrix.trim_end(),
            rule
        );

        match snapshot.stage {
            Stage::AfterRowOperation => {
                if let Some(ix) = snapshot.pivot {
                    out += &format!("pivot at {}\n", ix);
                }
                if let Some(assignment) = &snapshot.assignment {
                    out += &format!("BFS at\n{}\n", assignment);
                }
            }
            Stage::Optimal | Stage::IterationLimitExceeded => {
                if let Some(objective) = snapshot.objective {
                    out += &format!("opt value is at A[0,0]={:.2}\n", objective);
                }
                if let Some(assignment) = &snapshot.assignment {
                    out += &self.assignment(assignment);
                    out += "\n";
                }
            }
            Stage::Unbounded => {
                if let Some(j) = snapshot.entering {
                    out += &format!("unbounded problem: no positive entry in column x{}\n", j);
                }
            }
            Stage::Initial | Stage::SlackVariablesAdded => {}
        }
        out
    }
}

impl<W: Write> SolveObserver for TableauPrinter<W> {
    fn on_snapshot(&mut self, snapshot: &Snapshot<'_>) {
        let text = self.render(snapshot);
        if let Err(err) = self.out.write_all(text.as_bytes()) {
            log::error!("failed to print step {}: {}", snapshot.step, err);
        }
    }
}
