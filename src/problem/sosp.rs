use std::fmt::{Debug, Formatter};

use anyhow::{bail, Result};
use fixedbitset::FixedBitSet;
use itertools::Itertools;

use crate::problem::travel_matrix::TeamTravelMatrices;
use crate::problem::{SwitchId, TeamId, REMOTE_TEAM};
use crate::solution::Schedule;
use crate::utils::num;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Technology {
    Manual,
    Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Open,
    Close,
}

#[derive(Debug, Clone)]
pub struct Switch {
    pub id: SwitchId,
    pub technology: Technology,
    pub action: Action,
    /// Restoration stage the maneuver belongs to. Informational only.
    pub stage: usize,
    pub duration: f64,
}

/// Instance of the switch operations scheduling problem: the switches to
/// maneuver, the precedence relation between them, and the per-team travel
/// times. Built once per run and shared read-only afterwards.
pub struct SospInstance {
    pub name: String,
    num_switches: usize,
    num_teams: usize,
    num_stages: usize,
    switches: Vec<Switch>,
    predecessors: Vec<Vec<SwitchId>>,
    successors: Vec<Vec<SwitchId>>,
    /// ancestors[j] holds every switch that must complete before j, direct
    /// or transitive (backward reachability from j).
    ancestors: Vec<FixedBitSet>,
    travel: TeamTravelMatrices,
}

impl Debug for SospInstance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SOSP instance {}: {} switches, {} teams, {} stages",
            self.name, self.num_switches, self.num_teams, self.num_stages
        )
    }
}

impl SospInstance {
    pub fn new(
        name: String,
        num_teams: usize,
        num_stages: usize,
        switches: Vec<Switch>,
        predecessors: Vec<Vec<SwitchId>>,
        travel: TeamTravelMatrices,
    ) -> Result<Self> {
        let n = switches.len();

        for (idx, switch) in switches.iter().enumerate() {
            if switch.id != idx + 1 {
                bail!("switch ids must be consecutive starting at 1");
            }
            if switch.duration < 0.0 || !switch.duration.is_finite() {
                bail!("switch {} has an invalid maneuver duration", switch.id);
            }
        }
        if predecessors.len() != n + 1 {
            bail!("expected one predecessor set per switch");
        }
        if predecessors
            .iter()
            .flatten()
            .any(|pred| *pred < 1 || *pred > n)
        {
            bail!("predecessor ids must be within 1..={}", n);
        }
        if travel.num_teams() != num_teams {
            bail!(
                "expected {} travel matrices, got {}",
                num_teams,
                travel.num_teams()
            );
        }

        let mut successors = vec![Vec::new(); n + 1];
        for j in 1..=n {
            for &i in &predecessors[j] {
                successors[i].push(j);
            }
        }

        let ancestors = compute_ancestors(n, &predecessors)?;

        Ok(Self {
            name,
            num_switches: n,
            num_teams,
            num_stages,
            switches,
            predecessors,
            successors,
            ancestors,
            travel,
        })
    }

    pub fn num_switches(&self) -> usize {
        self.num_switches
    }

    pub fn num_teams(&self) -> usize {
        self.num_teams
    }

    pub fn num_stages(&self) -> usize {
        self.num_stages
    }

    pub fn switch(&self, id: SwitchId) -> &Switch {
        &self.switches[id - 1]
    }

    /// Maneuver duration of a location; the depot (location 0) takes no time.
    #[inline]
    pub fn duration(&self, id: SwitchId) -> f64 {
        if id == 0 {
            0.0
        } else {
            self.switches[id - 1].duration
        }
    }

    pub fn predecessors(&self, id: SwitchId) -> &[SwitchId] {
        &self.predecessors[id]
    }

    pub fn successors(&self, id: SwitchId) -> &[SwitchId] {
        &self.successors[id]
    }

    /// Whether switch i must complete before switch j, directly or through a
    /// chain of precedence edges.
    pub fn is_ancestor(&self, i: SwitchId, j: SwitchId) -> bool {
        self.ancestors[j].contains(i)
    }

    #[inline]
    pub fn travel_cost(&self, team: TeamId, from: usize, to: usize) -> f64 {
        self.travel.cost(team, from, to)
    }

    pub fn compatible_teams(&self, id: SwitchId) -> std::ops::RangeInclusive<TeamId> {
        match self.switch(id).technology {
            Technology::Remote => REMOTE_TEAM..=REMOTE_TEAM,
            Technology::Manual => 1..=self.num_teams,
        }
    }

    /// Makespan of a schedule whose moments are already fixed. Pure
    /// aggregation, no feasibility check.
    pub fn evaluate(&self, schedule: &Schedule) -> f64 {
        schedule
            .iter()
            .flat_map(|(_, team)| team.iter())
            .fold(0.0f64, |makespan, maneuver| {
                makespan.max(maneuver.moment + self.duration(maneuver.switch))
            })
    }

    /// From-scratch verifier, independent of the evaluator. Checks the
    /// constraint classes in a fixed order and reports the first violation;
    /// the order and the messages are part of the external contract.
    pub fn is_feasible(&self, schedule: &Schedule) -> (bool, &'static str) {
        let n = self.num_switches;
        let m = self.num_teams;

        if schedule.num_teams() != m {
            return (false, "The number of maintenance teams is wrong.");
        }

        let mut assignment = vec![0usize; n + 1];
        for (_, team) in schedule.iter() {
            for maneuver in team {
                if maneuver.switch < 1 || maneuver.switch > n {
                    return (false, "Using invalid switch IDs.");
                }
                assignment[maneuver.switch] += 1;
            }
        }
        if assignment[1..].iter().any(|count| *count != 1) {
            return (
                false,
                "There are switches assigned to more than one team or not assigned to any team.",
            );
        }

        for maneuver in schedule.team(REMOTE_TEAM) {
            if self.switch(maneuver.switch).technology != Technology::Remote {
                return (false, "Non-remote controlled switch assigned to dummy team 0.");
            }
        }

        for l in 1..=m {
            for maneuver in schedule.team(l) {
                if self.switch(maneuver.switch).technology != Technology::Manual {
                    // message kept byte-for-byte, misspelling included
                    return (
                        false,
                        "Non-manual controlled switch assigned to a maintenace team.",
                    );
                }
            }
        }

        let mut moments = vec![0.0f64; n + 1];
        for (_, team) in schedule.iter() {
            for maneuver in team {
                moments[maneuver.switch] = maneuver.moment;
            }
        }
        for j in 1..=n {
            for &i in &self.predecessors[j] {
                if num::is_lower(moments[j], moments[i] + self.duration(i)) {
                    return (false, "Precedence rules violated.");
                }
            }
        }

        for (_, team) in schedule.iter() {
            for (previous, current) in team.iter().tuple_windows() {
                if num::is_lower(current.moment, previous.moment) {
                    return (false, "Moments not consistent to the sequence.");
                }
            }
        }

        for l in 1..=m {
            let team = schedule.team(l);
            if let Some(first) = team.first() {
                if num::is_lower(first.moment, self.travel_cost(l, 0, first.switch)) {
                    return (false, "Moments not consistent to travel times.");
                }
            }
            for (previous, current) in team.iter().tuple_windows() {
                let lower_bound = previous.moment
                    + self.duration(previous.switch)
                    + self.travel_cost(l, previous.switch, current.switch);
                if num::is_lower(current.moment, lower_bound) {
                    return (false, "Moments not consistent to travel times.");
                }
            }
        }

        (true, "Feasible solution.")
    }
}

fn compute_ancestors(n: usize, predecessors: &[Vec<SwitchId>]) -> Result<Vec<FixedBitSet>> {
    let mut ancestors = vec![FixedBitSet::with_capacity(n + 1); n + 1];
    let mut pending = Vec::new();
    for j in 1..=n {
        pending.extend(predecessors[j].iter().copied());
        while let Some(i) = pending.pop() {
            if !ancestors[j].contains(i) {
                ancestors[j].insert(i);
                pending.extend(predecessors[i].iter().copied());
            }
        }
        if ancestors[j].contains(j) {
            bail!("precedence relation contains a cycle through switch {}", j);
        }
    }
    Ok(ancestors)
}
