use rand::seq::SliceRandom;

use crate::problem::sosp::SospInstance;
use crate::problem::TeamId;
use crate::search::Neighborhood;
use crate::solution::evaluator::fix_moments;
use crate::solution::{Candidate, Schedule};
use crate::utils::Random;

/// Exchange one maneuver of physical team l1 with one of physical team l2
/// (l1 < l2), each re-inserted at an arbitrary position in the other's list.
pub struct Swap;

struct SwapMove {
    team1: TeamId,
    team2: TeamId,
    index1: usize,
    index2: usize,
    /// Position in team2 taking the maneuver removed from team1.
    target1: usize,
    /// Position in team1 taking the maneuver removed from team2.
    target2: usize,
}

fn enumerate(schedule: &Schedule) -> Vec<SwapMove> {
    let m = schedule.num_teams();
    let mut moves = Vec::new();
    for team1 in 1..=m {
        let len1 = schedule.team(team1).len();
        if len1 == 0 {
            continue;
        }
        for team2 in (team1 + 1)..=m {
            let len2 = schedule.team(team2).len();
            if len2 == 0 {
                continue;
            }
            for index1 in 0..len1 {
                for index2 in 0..len2 {
                    for target1 in 0..len2 {
                        for target2 in 0..len1 {
                            moves.push(SwapMove {
                                team1,
                                team2,
                                index1,
                                index2,
                                target1,
                                target2,
                            });
                        }
                    }
                }
            }
        }
    }
    moves
}

fn apply(incumbent: &Schedule, mv: &SwapMove) -> Schedule {
    let mut schedule = incumbent.clone();
    let maneuver1 = schedule.remove(mv.team1, mv.index1);
    let maneuver2 = schedule.remove(mv.team2, mv.index2);
    schedule.insert(mv.team2, mv.target1, maneuver1);
    schedule.insert(mv.team1, mv.target2, maneuver2);
    schedule
}

impl Neighborhood for Swap {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::sosp::test_instances::*;
    use crate::problem::travel_matrix::TeamTravelMatrices;
    use crate::problem::SwitchId;
    use crate::solution::Maneuver;

    fn evaluated(instance: &SospInstance, mut schedule: Schedule) -> Candidate {
        let evaluation = fix_moments(instance, &mut schedule);
        assert!(evaluation.feasible);
        Candidate {
            schedule,
            makespan: evaluation.makespan,
        }
    }

    #[test]
    fn exchanging_mismatched_maneuvers_improves() {
        // durations [5, 1, 1, 5]: pairing the long maneuvers on one team is
        // bad; swapping one of them against a short one levels the load
        let instance = SospInstance::new(
            "swap".to_string(),
            2,
            1,
            vec![
                manual_switch(1, 5.0),
                manual_switch(2, 1.0),
                manual_switch(3, 1.0),
                manual_switch(4, 5.0),
            ],
            vec![vec![]; 5],
            TeamTravelMatrices::zero(2, 5),
        )
        .unwrap();

        let mut schedule = Schedule::empty(2);
        schedule.team_mut(1).push(Maneuver::unscheduled(1));
        schedule.team_mut(1).push(Maneuver::unscheduled(4));
        schedule.team_mut(2).push(Maneuver::unscheduled(2));
        schedule.team_mut(2).push(Maneuver::unscheduled(3));
        let incumbent = evaluated(&instance, schedule);
        assert_eq!(incumbent.makespan, 10.0);

        let neighbor = Swap.best_improvement(&instance, &incumbent);
        assert_eq!(neighbor.makespan, 6.0);
        let (feasible, message) = instance.is_feasible(&neighbor.schedule);
        assert!(feasible, "{}", message);
    }

    #[test]
    fn swap_preserves_the_assignment_invariant() {
        let instance = two_team_chain_instance();
        let mut schedule = Schedule::empty(2);
        schedule.team_mut(1).push(Maneuver::unscheduled(1));
        schedule.team_mut(1).push(Maneuver::unscheduled(2));
        schedule.team_mut(2).push(Maneuver::unscheduled(4));
        schedule.team_mut(2).push(Maneuver::unscheduled(3));
        let incumbent = evaluated(&instance, schedule);

        for mv in enumerate(&incumbent.schedule) {
            let schedule = apply(&incumbent.schedule, &mv);
            let mut switches: Vec<SwitchId> = schedule
                .iter()
                .flat_map(|(_, team)| team.iter().map(|maneuver| maneuver.switch))
                .collect();
            switches.sort_unstable();
            assert_eq!(switches, vec![1, 2, 3, 4]);
        }
    }

    #[test]
    fn shake_exchanges_work_between_teams_feasibly() {
        let instance = two_team_chain_instance();
        let mut schedule = Schedule::empty(2);
        schedule.team_mut(1).push(Maneuver::unscheduled(1));
        schedule.team_mut(1).push(Maneuver::unscheduled(2));
        schedule.team_mut(2).push(Maneuver::unscheduled(4));
        schedule.team_mut(2).push(Maneuver::unscheduled(3));
        let incumbent = evaluated(&instance, schedule);

        let mut rng = crate::utils::create_seeded_rng(21);
        let shaken = Swap.shake(&instance, &incumbent, true, &mut rng);
        let (feasible, message) = instance.is_feasible(&shaken.schedule);
        assert!(feasible, "{}", message);
        assert_ne!(shaken.schedule, incumbent.schedule);

        let mut switches: Vec<SwitchId> = shaken
            .schedule
            .iter()
            .flat_map(|(_, team)| team.iter().map(|maneuver| maneuver.switch))
            .collect();
        switches.sort_unstable();
        assert_eq!(switches, vec![1, 2, 3, 4]);
    }

    #[test]
    fn unconstrained_shake_applies_the_first_enumerated_move() {
        let instance = two_team_chain_instance();
        let mut schedule = Schedule::empty(2);
        schedule.team_mut(1).push(Maneuver::unscheduled(1));
        schedule.team_mut(1).push(Maneuver::unscheduled(2));
        schedule.team_mut(2).push(Maneuver::unscheduled(4));
        schedule.team_mut(2).push(Maneuver::unscheduled(3));
        let incumbent = evaluated(&instance, schedule);

        let mut rng = crate::utils::create_seeded_rng(23);
        let shaken = Swap.shake(&instance, &incumbent, false, &mut rng);
        assert_ne!(shaken.schedule, incumbent.schedule);
        assert_eq!(shaken.schedule.num_maneuvers(), 4);
    }

    #[test]
    fn single_team_admits_no_swap() {
        let instance = single_team_instance();
        let mut schedule = Schedule::empty(1);
        for switch in 1..=3 {
            schedule.team_mut(1).push(Maneuver::unscheduled(switch));
        }
        let incumbent = evaluated(&instance, schedule);

        assert!(enumerate(&incumbent.schedule).is_empty());
        let neighbor = Swap.best_improvement(&instance, &incumbent);
        assert_eq!(neighbor.schedule, incumbent.schedule);
    }
}
