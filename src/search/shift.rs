use rand::seq::SliceRandom;

use crate::problem::sosp::SospInstance;
use crate::problem::TeamId;
use crate::search::Neighborhood;
use crate::solution::evaluator::fix_moments;
use crate::solution::{Candidate, Schedule};
use crate::utils::Random;

/// Relocate one maneuver to a different position within the same team's
/// list. Applies to all teams, including the virtual one.
pub struct Shift;

struct ShiftMove {
    team: TeamId,
    from: usize,
    /// Insertion position after the maneuver has been removed.
    to: usize,
}

fn enumerate(schedule: &Schedule) -> Vec<ShiftMove> {
    let mut moves = Vec::new();
    for (team, maneuvers) in schedule.iter() {
        for from in 0..maneuvers.len() {
            for to in 0..maneuvers.len() {
                if to != from {
                    moves.push(ShiftMove { team, from, to });
                }
            }
        }
    }
    moves
}

fn apply(incumbent: &Schedule, mv: &ShiftMove) -> Schedule {
    let mut schedule = incumbent.clone();
    let maneuver = schedule.remove(mv.team, mv.from);
    schedule.insert(mv.team, mv.to, maneuver);
    schedule
}

impl Neighborhood for Shift {
    fn best_improvement(&self, instance: &SospInstance, incumbent: &Candidate) -> Candidate {
        let mut best = incumbent.clone();
        for mv in enumerate(&incumbent.schedule) {
            let mut schedule = apply(&incumbent.schedule, &mv);
            let evaluation = fix_moments(instance, &mut schedule);
            if evaluation.feasible && evaluation.makespan < best.makespan {
                best = Candidate {
                    schedule,
                    makespan: evaluation.makespan,
                };
            }
        }
        best
    }

    fn first_improvement(
        &self,
        instance: &SospInstance,
        incumbent: &Candidate,
        rng: &mut Random,
    ) -> Candidate {
        let mut moves = enumerate(&incumbent.schedule);
        moves.shuffle(rng);
        for mv in moves {
            let mut schedule = apply(&incumbent.schedule, &mv);
            let evaluation = fix_moments(instance, &mut schedule);
            if evaluation.feasible && evaluation.makespan < incumbent.makespan {
                return Candidate {
                    schedule,
                    makespan: evaluation.makespan,
                };
            }
        }
        incumbent.clone()
    }

    fn shake(
        &self,
        instance: &SospInstance,
        incumbent: &Candidate,
        feasible_only: bool,
        rng: &mut Random,
    ) -> Candidate {
        let mut moves = enumerate(&incumbent.schedule);
        moves.shuffle(rng);
        for mv in moves {
            let mut schedule = apply(&incumbent.schedule, &mv);
            let evaluation = fix_moments(instance, &mut schedule);
            if evaluation.feasible || !feasible_only {
                return Candidate {
                    schedule,
                    makespan: evaluation.makespan,
                };
            }
        }
        incumbent.clone()
    }
}
