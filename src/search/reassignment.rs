use rand::seq::SliceRandom;

use crate::problem::sosp::SospInstance;
use crate::problem::TeamId;
use crate::search::Neighborhood;
use crate::solution::evaluator::fix_moments;
use crate::solution::{Candidate, Schedule};
use crate::utils::Random;

/// Move one maneuver from one physical team to another, at any insertion
/// position. The virtual team is never origin nor target: remote switches
/// have nowhere else to go, and crews cannot take them over.
pub struct Reassignment;

struct ReassignmentMove {
    origin: TeamId,
    from: usize,
    target: TeamId,
    to: usize,
}

fn enumerate(schedule: &Schedule) -> Vec<ReassignmentMove> {
    let m = schedule.num_teams();
    let mut moves = Vec::new();
    for origin in 1..=m {
        for from in 0..schedule.team(origin).len() {
            for target in 1..=m {
                if target != origin {
                    for to in 0..=schedule.team(target).len() {
                        moves.push(ReassignmentMove {
                            origin,
                            from,
                            target,
                            to,
                        });
                    }
                }
            }
        }
    }
    moves
}

fn apply(incumbent: &Schedule, mv: &ReassignmentMove) -> Schedule {
    let mut schedule = incumbent.clone();
    let maneuver = schedule.remove(mv.origin, mv.from);
    schedule.insert(mv.target, mv.to, maneuver);
    schedule
}

impl Neighborhood for Reassignment {
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
