use crate::problem::sosp::SospInstance;
use crate::solution::Schedule;

#[derive(Debug, Clone, Copy)]
pub struct Evaluation {
    pub feasible: bool,
    pub makespan: f64,
}

/// Fix the moments of a schedule whose team lists carry only assignment and
/// relative order, and compute its makespan.
///
/// Readiness simulation: every switch holds a counter of pending direct
/// predecessors. Teams are scanned in fixed order 0..=m; whenever the switch
/// at a team's cursor has no pending predecessors, its moment becomes
/// max(finish of the team's previous location + travel, finish of each
/// direct predecessor), with zero travel for the virtual team. A full scan
/// with no progress means the given orders can never satisfy the remaining
/// dependencies; the schedule is infeasible and the makespan infinite.
pub fn fix_moments(instance: &SospInstance, schedule: &mut Schedule) -> Evaluation {
    let n = instance.num_switches();
    let m = instance.num_teams();

    let mut cursor = vec![0usize; m + 1];
    let mut location = vec![0usize; m + 1];
    let mut pending = vec![0isize; n + 1];
    // write-once per switch before any dependent reads it; slot 0 is the depot
    let mut moments = vec![0.0f64; n + 1];

    for (_, team) in schedule.iter() {
        for maneuver in team {
            pending[maneuver.switch] = instance.predecessors(maneuver.switch).len() as isize;
        }
    }

    let mut makespan = 0.0f64;
    let mut done = 0usize;
    let mut progress = true;

    while done < n && progress {
        progress = false;
        for l in 0..=m {
            let index = cursor[l];
            if index >= schedule.team(l).len() {
                continue;
            }
            let j = schedule.team(l)[index].switch;
            if pending[j] != 0 {
                continue;
            }

            let previous = location[l];
            let mut moment = moments[previous]
                + instance.duration(previous)
                + instance.travel_cost(l, previous, j);
            for &k in instance.predecessors(j) {
                moment = moment.max(moments[k] + instance.duration(k));
            }

            moments[j] = moment;
            schedule.team_mut(l)[index].moment = moment;
            for &k in instance.successors(j) {
                pending[k] -= 1;
            }

            makespan = makespan.max(moment + instance.duration(j));
            cursor[l] += 1;
            location[l] = j;
            done += 1;
            progress = true;
        }
    }

    if done < n {
        Evaluation {
            feasible: false,
            makespan: f64::INFINITY,
        }
    } else {
        Evaluation {
            feasible: true,
            makespan,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::sosp::test_instances::*;
    use crate::solution::Maneuver;

    #[test]
    fn single_team_serializes_all_work() {
        let instance = single_team_instance();
        let mut schedule = Schedule::empty(1);
        for switch in 1..=3 {
            schedule.team_mut(1).push(Maneuver::unscheduled(switch));
        }

        let evaluation = fix_moments(&instance, &mut schedule);
        assert!(evaluation.feasible);
        assert_eq!(evaluation.makespan, 6.0);
        assert_eq!(schedule.team(1)[0].moment, 0.0);
        assert_eq!(schedule.team(1)[1].moment, 2.0);
        assert_eq!(schedule.team(1)[2].moment, 5.0);
    }

    #[test]
    fn precedence_delays_the_successor() {
        let instance = mixed_technology_instance();
        let mut schedule = Schedule::empty(2);
        schedule.team_mut(0).push(Maneuver::unscheduled(1));
        schedule.team_mut(1).push(Maneuver::unscheduled(2));
        schedule.team_mut(2).push(Maneuver::unscheduled(3));

        let evaluation = fix_moments(&instance, &mut schedule);
        assert!(evaluation.feasible);
        // switch 1 (remote, duration 1) gates both manual switches
        assert_eq!(schedule.team(0)[0].moment, 0.0);
        assert_eq!(schedule.team(1)[0].moment, 1.0);
        assert_eq!(schedule.team(2)[0].moment, 1.0);
        assert_eq!(evaluation.makespan, 3.0);
    }

    #[test]
    fn travel_times_enter_the_recurrence() {
        let instance = two_team_chain_instance();
        let mut schedule = Schedule::empty(2);
        schedule.team_mut(1).push(Maneuver::unscheduled(1));
        schedule.team_mut(1).push(Maneuver::unscheduled(2));
        schedule.team_mut(2).push(Maneuver::unscheduled(3));
        schedule.team_mut(2).push(Maneuver::unscheduled(4));

        let evaluation = fix_moments(&instance, &mut schedule);
        assert!(evaluation.feasible);
        // team 1: depot -> 1 (travel 1), then 1 -> 2 (finish 3 + travel 1 vs
        // predecessor finish 3)
        assert_eq!(schedule.team(1)[0].moment, 1.0);
        assert_eq!(schedule.team(1)[1].moment, 4.0);
        // team 2 waits for switch 2 to finish before maneuvering 3
        assert_eq!(schedule.team(2)[0].moment, 7.0);
        assert_eq!(schedule.team(2)[1].moment, 9.0);
        assert_eq!(evaluation.makespan, 13.0);
    }

    #[test]
    fn unsatisfiable_orders_are_infeasible() {
        let instance = two_team_chain_instance();
        // both ends of the chain in one team, ordered against the precedence
        let mut schedule = Schedule::empty(2);
        schedule.team_mut(1).push(Maneuver::unscheduled(3));
        schedule.team_mut(1).push(Maneuver::unscheduled(2));
        schedule.team_mut(1).push(Maneuver::unscheduled(1));
        schedule.team_mut(2).push(Maneuver::unscheduled(4));

        let evaluation = fix_moments(&instance, &mut schedule);
        assert!(!evaluation.feasible);
        assert!(evaluation.makespan.is_infinite());
    }

    #[test]
    fn evaluator_feasible_schedules_pass_the_verifier() {
        let instance = two_team_chain_instance();
        let mut schedule = Schedule::empty(2);
        schedule.team_mut(1).push(Maneuver::unscheduled(1));
        schedule.team_mut(1).push(Maneuver::unscheduled(2));
        schedule.team_mut(2).push(Maneuver::unscheduled(4));
        schedule.team_mut(2).push(Maneuver::unscheduled(3));

        let evaluation = fix_moments(&instance, &mut schedule);
        assert!(evaluation.feasible);
        let (feasible, message) = instance.is_feasible(&schedule);
        assert!(feasible, "{}", message);
        assert_eq!(instance.evaluate(&schedule), evaluation.makespan);
    }

    #[test]
    fn virtual_team_chains_remote_maneuvers() {
        let instance = mixed_technology_instance();
        let mut schedule = Schedule::empty(2);
        schedule.team_mut(0).push(Maneuver::unscheduled(1));
        schedule.team_mut(1).push(Maneuver::unscheduled(2));
        schedule.team_mut(1).push(Maneuver::unscheduled(3));

        let evaluation = fix_moments(&instance, &mut schedule);
        assert!(evaluation.feasible);
        let (feasible, _) = instance.is_feasible(&schedule);
        assert!(feasible);
    }
}
