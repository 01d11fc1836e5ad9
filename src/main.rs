use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

use std::str::FromStr;

use tableau_simplex::{
    Simplex, SimplexError, SolveAlgorithm, SolverConfig, Status, Tableau, TableauPrinter,
};

fn setup_logger() -> Result<(), log::SetLoggerError> {
    let level = std::env::var("SIMPLEX_LOG")
        .ok()
        .and_then(|s| LevelFilter::from_str(&s).ok())
        .unwrap_or(LevelFilter::Info);

    let colors = ColoredLevelConfig::new()
        .debug(Color::White)
        .info(Color::Green)
        .warn(Color::BrightYellow)
        .error(Color::BrightRed);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!("{:5} | {}", colors.color(record.level()), message))
        })
        .level(level)
        .chain(std::io::stdout())
        .apply()
}

fn run() -> Result<(), SimplexError> {
    //max: z = 1.5x + 3y + z + 4w
    let tbl = Tableau::from_rows(&[
        vec![0.0, -1.5, -3.0, -1.0, -4.0],
        vec![20.0, 1.0, 1.0, 1.0, 1.0],   //  x + y + z +   w <= 20
        vec![10.0, -2.0, -1.0, 1.0, 11.0], //-2x - y + z + 11w <= 10
        vec![10.0, 4.0, 1.0, 0.0, -1.0],  // 4x + y     -   w <= 10
    ])?;

    let config = SolverConfig::default();
    let mut printer = TableauPrinter::stdout().with_tolerance(config.tolerance());
    let sol = Simplex::new(config).solve(tbl, &mut printer)?;

    match sol.status() {
        Status::Optimal => log::info!(
            "optimal value {:.2} at {}",
            sol.objective().unwrap_or_default(),
            sol.assignment()
        ),
        Status::Unbounded { column } => log::info!("unbounded along x{}", column),
        Status::IterationLimitExceeded => log::warn!(
            "stopped after {} pivots, best value {:.2}",
            sol.iterations(),
            sol.objective().unwrap_or_default()
        ),
    }
    Ok(())
}

fn main() {
    if let Err(err) = setup_logger() {
        eprintln!("logger setup failed: {}", err);
    }

    if let Err(err) = run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
