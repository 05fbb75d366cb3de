#![allow(dead_code)]

use clap::{CommandFactory, FromArgMatches};
use log::info;
use os_str_bytes::OsStrBytesExt;
use took::Timer;

use crate::cli::AlgorithmChoice;
use crate::io::{load_instance, write_summary, RunSummary};
use crate::solver::construction::Greedy;
use crate::solver::ils::Ils;
use crate::solver::{Algorithm, Diagnostics};

mod cli;
mod io;
mod problem;
mod search;
mod solution;
mod solver;
mod utils;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = argfile::expand_args_from(
        std::env::args_os(),
        argfile::parse_fromfile,
        argfile::PREFIX,
    )?;
    let args = cli::ProgramArguments::from_arg_matches(
        &cli::ProgramArguments::command().get_matches_from(
            args.iter()
                .flat_map(|it| it.split(" ").into_iter().collect::<Vec<_>>()),
        ),
    )?;
    info!("{:?}", &args);

    let load_timer = Timer::new();
    let instance = load_instance(&args.file)?;
    info!("instance loaded after {}", load_timer.took());
    info!("{:?}", &instance);

    let algorithm: Box<dyn Algorithm> = match args.algorithm {
        AlgorithmChoice::Greedy => Box::new(Greedy),
        AlgorithmChoice::Ils => Box::new(Ils::new(args.ils_settings())),
    };

    info!("starting solver");
    let timer = Timer::new();
    let mut diagnostics = Diagnostics::default();
    let result = algorithm.solve(&instance, Some(&mut diagnostics));
    let elapsed = timer.took();
    info!("finished after {}", elapsed);

    // re-derive makespan and feasibility from scratch, independently of the
    // values the search carried along
    let makespan = instance.evaluate(&result.schedule);
    let (feasible, message) = instance.is_feasible(&result.schedule);
    info!("{}", message);

    let status = if feasible { "SUBOPTIMAL" } else { "INFEASIBLE" };
    let elapsed_seconds = elapsed.as_std().as_secs_f64();

    match args.details {
        0 => {}
        1 => {
            if feasible {
                println!("{} {:.6}", status, makespan);
            } else {
                println!("{} ?", status);
            }
        }
        2 => {
            let iterations = diagnostics
                .iterations
                .map(|it| it.to_string())
                .unwrap_or_else(|| "?".to_string());
            if feasible {
                println!(
                    "{} {:.6} {:.4} {}",
                    status, makespan, elapsed_seconds, iterations
                );
            } else {
                println!("{} ? {:.4} {}", status, elapsed_seconds, iterations);
            }
        }
        _ => {
            println!();
            println!("======================================================================");
            println!("SUMMARY");
            println!("======================================================================");
            if feasible {
                println!("Makespan:         {:.6}", makespan);
            } else {
                println!("Makespan:         ?");
            }
            println!("Status:           {}", status);
            println!("Elapsed time (s): {:.4}", elapsed_seconds);
            println!();
            println!("Additional Information:");
            let entries = diagnostics.entries();
            if entries.is_empty() {
                println!(" * No additional information to show.");
            } else {
                for (key, value) in entries {
                    println!(" * {}: {}", key, value);
                }
            }
        }
    }

    if args.solution {
        println!();
        println!("======================================================================");
        println!("SOLUTION");
        println!("======================================================================");
        println!("{}", result.schedule);
    }

    if let Some(path) = &args.summary_json {
        write_summary(
            path,
            &RunSummary {
                status,
                makespan: feasible.then_some(makespan),
                runtime_seconds: elapsed_seconds,
                diagnostics: &diagnostics,
                schedule: &result.schedule,
            },
        )?;
    }

    Ok(())
}
