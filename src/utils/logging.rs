use std::time::Duration;

use log::info;

use crate::utils::num;

/// Iteration trace of the ILS. Rows are emitted through the `log` facade so
/// they interleave with the rest of the run output; the `verbose` option
/// gates them entirely.
pub fn log_header(verbose: bool) {
    if verbose {
        info!("---------------------------------------------------------------------");
        info!("| Iter. |   Before LS  |   After LS   |   Incumbent  |   Time (s)   |");
        info!("---------------------------------------------------------------------");
    }
}

pub fn log_footer(verbose: bool) {
    if verbose {
        info!("---------------------------------------------------------------------");
    }
}

pub fn log_start(start: f64, elapsed: Duration, verbose: bool) {
    if verbose {
        info!(
            "| Start | {:>12} | {:>12} | {:12.3} | {:12.3} |",
            "---",
            "---",
            start,
            elapsed.as_secs_f64()
        );
    }
}

pub fn log_iteration(
    iteration: u64,
    incumbent: f64,
    before_ls: f64,
    after_ls: f64,
    elapsed: Duration,
    verbose: bool,
) {
    if verbose {
        let new_incumbent = num::is_lower(after_ls, incumbent);
        info!(
            "| {}{:4} | {:12.3} | {:12.3} | {:12.3} | {:12.3} |",
            if new_incumbent { "*" } else { " " },
            iteration,
            before_ls,
            after_ls,
            if new_incumbent { after_ls } else { incumbent },
            elapsed.as_secs_f64()
        );
    }
}
