use fixedbitset::FixedBitSet;
use took::Timer;

use crate::problem::sosp::SospInstance;
use crate::problem::{SwitchId, TeamId};
use crate::solution::{Candidate, Maneuver, Schedule};
use crate::solver::{Algorithm, Diagnostics};

/// Earliest-start-time construction. Repeatedly appends, among all ready
/// switches and compatible teams, the (switch, team) pair with the smallest
/// resulting start moment. Ties are broken by the scan order: switches in
/// increasing id, teams in increasing index. Deterministic.
pub fn earliest_start_time(instance: &SospInstance) -> Candidate {
    let n = instance.num_switches();
    let m = instance.num_teams();

    let mut schedule = Schedule::empty(m);
    let mut scheduled = FixedBitSet::with_capacity(n + 1);
    let mut pending: Vec<usize> = (0..=n).map(|j| instance.predecessors(j).len()).collect();
    let mut moments = vec![0.0; n + 1];

    // Per-team progress: finish moment of the last maneuver and the location
    // it left the team at (depot 0 initially).
    let mut team_finish = vec![0.0; m + 1];
    let mut location: Vec<usize> = vec![0; m + 1];

    let mut makespan = 0.0_f64;
    for _ in 0..n {
        let mut best: Option<(SwitchId, TeamId, f64)> = None;
        for j in 1..=n {
            if scheduled.contains(j) || pending[j] > 0 {
                continue;
            }
            let readiness = instance
                .predecessors(j)
                .iter()
                .map(|&i| moments[i] + instance.duration(i))
                .fold(0.0_f64, f64::max);
            for l in instance.compatible_teams(j) {
                let start = readiness
                    .max(team_finish[l] + instance.travel_cost(l, location[l], j));
                if best.map_or(true, |(_, _, t)| start < t) {
                    best = Some((j, l, start));
                }
            }
        }

        // a validated instance is acyclic, so some switch is always ready
        let Some((j, l, start)) = best else { break };
        schedule.team_mut(l).push(Maneuver {
            switch: j,
            moment: start,
        });
        moments[j] = start;
        scheduled.insert(j);
        team_finish[l] = start + instance.duration(j);
        location[l] = j;
        makespan = makespan.max(team_finish[l]);
        for &k in instance.successors(j) {
            pending[k] -= 1;
        }
    }

    Candidate { schedule, makespan }
}

/// The earliest-start-time heuristic exposed through the common algorithm
/// contract, selectable from the command line on its own.
pub struct Greedy;

impl Algorithm for Greedy {
    fn solve(&self, instance: &SospInstance, diagnostics: Option<&mut Diagnostics>) -> Candidate {
        let timer = Timer::new();
        let candidate = earliest_start_time(instance);
        if let Some(diagnostics) = diagnostics {
            diagnostics.runtime_seconds = Some(timer.took().as_std().as_secs_f64());
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::sosp::test_instances::*;

    #[test]
    fn serial_instance_yields_the_serial_makespan() {
        let instance = single_team_instance();
        let candidate = earliest_start_time(&instance);

        assert_eq!(candidate.makespan, 6.0);
        assert_eq!(candidate.schedule.num_maneuvers(), 3);
        let (feasible, message) = instance.is_feasible(&candidate.schedule);
        assert!(feasible, "{}", message);
    }

    #[test]
    fn respects_precedence_and_uses_both_teams() {
        let instance = two_team_chain_instance();
        let candidate = earliest_start_time(&instance);

        let (feasible, message) = instance.is_feasible(&candidate.schedule);
        assert!(feasible, "{}", message);
        assert_eq!(candidate.makespan, instance.evaluate(&candidate.schedule));
        // team 1 walks the chain head 1 -> 2 while team 2 takes the free
        // switch 4 and picks up the chain tail 3 once it is released
        assert_eq!(candidate.makespan, 8.0);
        assert_eq!(candidate.schedule.team(2)[0].switch, 4);
    }

    #[test]
    fn remote_switches_go_to_the_virtual_team() {
        let instance = mixed_technology_instance();
        let candidate = earliest_start_time(&instance);

        assert_eq!(candidate.schedule.team(0).len(), 1);
        assert_eq!(candidate.schedule.team(0)[0].switch, 1);
        let (feasible, message) = instance.is_feasible(&candidate.schedule);
        assert!(feasible, "{}", message);
    }

    #[test]
    fn construction_is_deterministic() {
        let instance = two_team_chain_instance();
        let a = earliest_start_time(&instance);
        let b = earliest_start_time(&instance);
        assert_eq!(a.schedule, b.schedule);
        assert_eq!(a.makespan, b.makespan);
    }

    #[test]
    fn greedy_algorithm_reports_its_runtime() {
        let instance = single_team_instance();
        let mut diagnostics = Diagnostics::default();
        let candidate = Greedy.solve(&instance, Some(&mut diagnostics));

        assert_eq!(candidate.makespan, 6.0);
        assert!(diagnostics.runtime_seconds.is_some());
        assert!(diagnostics.iterations.is_none());
    }
}
