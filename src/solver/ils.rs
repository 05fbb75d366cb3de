use rand::seq::SliceRandom;
use rand::Rng;
use took::Timer;

use crate::problem::sosp::SospInstance;
use crate::problem::TeamId;
use crate::search::local_search;
use crate::search::vnd_neighborhoods;
use crate::solution::evaluator::fix_moments;
use crate::solution::Candidate;
use crate::solver::construction::earliest_start_time;
use crate::solver::{Algorithm, Diagnostics};
use crate::utils::{create_seeded_rng, logging, num, Countdown, Random, TimeLimit};

pub struct IlsSettings {
    pub verbose: bool,
    pub seed: u64,
    pub time_limit: Option<f64>,
    pub iterations_limit: u64,
    /// Highest perturbation strength. The search stops once a perturbation
    /// of this strength fails to yield an improvement.
    pub perturbation_passes_limit: u64,
}

impl Default for IlsSettings {
    fn default() -> Self {
        Self {
            verbose: false,
            seed: 0,
            time_limit: None,
            iterations_limit: u64::MAX,
            perturbation_passes_limit: 15,
        }
    }
}

/// Iterated local search: earliest-start-time construction, VND descent, then
/// a perturb/descend/accept loop with escalating perturbation strength.
pub struct Ils {
    pub settings: IlsSettings,
}

impl Ils {
    pub fn new(settings: IlsSettings) -> Self {
        Self { settings }
    }
}

impl Algorithm for Ils {
    fn solve(&self, instance: &SospInstance, diagnostics: Option<&mut Diagnostics>) -> Candidate {
        let settings = &self.settings;
        let mut rng = create_seeded_rng(settings.seed);

        let timer = Timer::new();
        let countdown = Countdown::new(
            Timer::new(),
            match settings.time_limit {
                Some(seconds) => TimeLimit::Seconds(seconds),
                None => TimeLimit::None,
            },
        );

        let neighborhoods = vnd_neighborhoods();

        logging::log_header(settings.verbose);

        let start = earliest_start_time(instance);
        logging::log_start(start.makespan, countdown.time_elapsed(), settings.verbose);

        let mut incumbent = local_search::best_improvement_vnd(instance, &start, &neighborhoods);
        logging::log_iteration(
            0,
            start.makespan,
            start.makespan,
            incumbent.makespan,
            countdown.time_elapsed(),
            settings.verbose,
        );

        let mut iteration = 0u64;
        let mut perturbation_passes = 1u64;
        let mut iteration_last_improvement = 0u64;

        while iteration < settings.iterations_limit
            && !countdown.is_finished()
            && perturbation_passes <= settings.perturbation_passes_limit
        {
            iteration += 1;

            let mut perturbed = perturb(instance, &incumbent, &mut rng);
            for _ in 1..perturbation_passes {
                perturbed = perturb(instance, &perturbed, &mut rng);
            }

            let trial = local_search::best_improvement_vnd(instance, &perturbed, &neighborhoods);

            logging::log_iteration(
                iteration,
                incumbent.makespan,
                perturbed.makespan,
                trial.makespan,
                countdown.time_elapsed(),
                settings.verbose,
            );

            if num::is_lower(trial.makespan, incumbent.makespan) {
                incumbent = trial;
                iteration_last_improvement = iteration;
                perturbation_passes = 1;
            } else {
                perturbation_passes += 1;
            }
        }

        logging::log_footer(settings.verbose);

        if let Some(diagnostics) = diagnostics {
            diagnostics.iterations = Some(iteration);
            diagnostics.runtime_seconds = Some(timer.took().as_std().as_secs_f64());
            diagnostics.start_solution = Some(start.makespan);
            diagnostics.iteration_last_improvement = Some(iteration_last_improvement);
        }

        incumbent
    }
}

/// Ejection-chain perturbation. The physical teams are visited in a shuffled
/// cyclic order; each passes a randomly chosen maneuver on to the next team
/// in the chain, re-inserted at a random feasible position. A hand-off with
/// no feasible position is undone and that pair is skipped.
fn perturb(instance: &SospInstance, entry: &Candidate, rng: &mut Random) -> Candidate {
    let mut schedule = entry.schedule.clone();
    let mut makespan = entry.makespan;

    let mut chain: Vec<TeamId> = (1..=instance.num_teams()).collect();
    chain.shuffle(rng);

    for idx in 0..chain.len() {
        let origin = chain[idx];
        let target = chain[(idx + 1) % chain.len()];

        if schedule.team(origin).is_empty() {
            continue;
        }

        let from = rng.gen_range(0..schedule.team(origin).len());
        let maneuver = schedule.remove(origin, from);

        let mut positions: Vec<usize> = (0..=schedule.team(target).len()).collect();
        positions.shuffle(rng);

        let mut success = false;
        for to in positions {
            schedule.insert(target, to, maneuver);
            let evaluation = fix_moments(instance, &mut schedule);
            if evaluation.feasible {
                makespan = evaluation.makespan;
                success = true;
                break;
            }
            schedule.remove(target, to);
        }

        if !success {
            // restore the removed maneuver and its moments
            schedule.insert(origin, from, maneuver);
            let evaluation = fix_moments(instance, &mut schedule);
            makespan = evaluation.makespan;
        }
    }

    Candidate { schedule, makespan }
}
