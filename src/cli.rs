use clap::{Parser, ValueEnum};

use crate::solver::ils::IlsSettings;

#[derive(Parser, Debug)]
#[command(version, about = "Switch Operations Scheduling Problem")]
pub struct ProgramArguments {
    #[arg(short, long, help = "instance file path")]
    pub file: String,

    #[arg(short, long, value_enum, help = "algorithm used to solve the problem")]
    pub algorithm: AlgorithmChoice,

    #[arg(short, long, help = "enable algorithm output")]
    pub verbose: bool,

    #[arg(
        short,
        long,
        default_value = "1",
        help = "level of details to show at the end of the optimization process: \
                (0) nothing; (1) status and makespan; (2) status, makespan, \
                runtime and iterations; (3) a detailed report"
    )]
    pub details: u8,

    #[arg(short, long, help = "display the best solution found")]
    pub solution: bool,

    #[arg(long, default_value = "0", help = "rng seed")]
    pub seed: u64,

    #[arg(long, help = "limit the total time expended (in seconds)")]
    pub time_limit: Option<f64>,

    #[arg(long, help = "limit the total number of iterations expended")]
    pub iterations_limit: Option<u64>,

    #[arg(
        long,
        default_value = "5",
        help = "highest perturbation strength; the ILS stops once no \
                improvement is found after a perturbation of this strength"
    )]
    pub perturbation_passes_limit: u64,

    #[arg(long, help = "write a machine-readable run summary to this path")]
    pub summary_json: Option<String>,
}

#[derive(Clone, ValueEnum, Debug)]
pub enum AlgorithmChoice {
    Greedy,
    Ils,
}

impl ProgramArguments {
    pub fn ils_settings(&self) -> IlsSettings {
        IlsSettings {
            verbose: self.verbose,
            seed: self.seed,
            time_limit: self.time_limit,
            iterations_limit: self.iterations_limit.unwrap_or(u64::MAX),
            perturbation_passes_limit: self.perturbation_passes_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        ProgramArguments::command().debug_assert()
    }

    #[test]
    fn settings_carry_the_configured_limits() {
        let args = ProgramArguments::parse_from([
            "sosp-solver",
            "--file",
            "instance.txt",
            "--algorithm",
            "ils",
            "--seed",
            "7",
            "--time-limit",
            "2.5",
            "--perturbation-passes-limit",
            "9",
        ]);
        let settings = args.ils_settings();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.time_limit, Some(2.5));
        assert_eq!(settings.iterations_limit, u64::MAX);
        assert_eq!(settings.perturbation_passes_limit, 9);
    }
}
