use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::problem::{SwitchId, TeamId, REMOTE_TEAM};

pub mod evaluator;

/// A scheduled switch operation: which switch, and the moment its maneuver
/// starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Maneuver {
    pub switch: SwitchId,
    pub moment: f64,
}

impl Maneuver {
    pub fn unscheduled(switch: SwitchId) -> Self {
        Self {
            switch,
            moment: 0.0,
        }
    }
}

/// Per-team ordered maneuver sequences. Index 0 is the virtual team holding
/// the remotely actuated switches; indices 1..=m are the field crews.
/// Execution order within a team is list order. Schedules are plain owned
/// values, cloned for every move trial.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    teams: Vec<Vec<Maneuver>>,
}

impl Schedule {
    /// Empty schedule for m physical teams (m + 1 lists including the
    /// virtual team).
    pub fn empty(num_teams: usize) -> Self {
        Self {
            teams: vec![Vec::new(); num_teams + 1],
        }
    }

    /// Number of physical teams (excluding the virtual team).
    pub fn num_teams(&self) -> usize {
        self.teams.len() - 1
    }

    pub fn team(&self, team: TeamId) -> &[Maneuver] {
        &self.teams[team]
    }

    pub fn team_mut(&mut self, team: TeamId) -> &mut Vec<Maneuver> {
        &mut self.teams[team]
    }

    pub fn iter(&self) -> impl Iterator<Item = (TeamId, &[Maneuver])> {
        self.teams
            .iter()
            .enumerate()
            .map(|(team, maneuvers)| (team, maneuvers.as_slice()))
    }

    pub fn remove(&mut self, team: TeamId, index: usize) -> Maneuver {
        self.teams[team].remove(index)
    }

    pub fn insert(&mut self, team: TeamId, index: usize, maneuver: Maneuver) {
        self.teams[team].insert(index, maneuver);
    }

    pub fn num_maneuvers(&self) -> usize {
        self.teams.iter().map(|team| team.len()).sum()
    }
}

impl Display for Schedule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (team, maneuvers) in self.iter() {
            if team == REMOTE_TEAM {
                write!(f, "REMOTE : < ")?;
            } else {
                write!(f, "TEAM {} : < ", team)?;
            }
            for maneuver in maneuvers {
                write!(f, "({}, {}) ", maneuver.switch, maneuver.moment)?;
            }
            writeln!(f, ">")?;
        }
        Ok(())
    }
}

/// A schedule together with its makespan, as threaded through construction,
/// the neighborhoods and the search drivers.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub schedule: Schedule,
    pub makespan: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_schedule_has_a_list_per_team_plus_dummy() {
        let schedule = Schedule::empty(3);
        assert_eq!(schedule.num_teams(), 3);
        assert_eq!(schedule.iter().count(), 4);
        assert_eq!(schedule.num_maneuvers(), 0);
    }

    #[test]
    fn display_renders_remote_and_crew_lists() {
        let mut schedule = Schedule::empty(1);
        schedule.team_mut(0).push(Maneuver {
            switch: 2,
            moment: 0.0,
        });
        schedule.team_mut(1).push(Maneuver {
            switch: 1,
            moment: 1.5,
        });
        let rendered = schedule.to_string();
        assert!(rendered.starts_with("REMOTE : < (2, 0) >"));
        assert!(rendered.contains("TEAM 1 : < (1, 1.5) >"));
    }
}
