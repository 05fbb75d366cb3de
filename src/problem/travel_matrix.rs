use anyhow::{bail, Result};

use crate::problem::{TeamId, REMOTE_TEAM};

/// Travel times of a single field team between switch locations. Location 0
/// is the depot the team starts from; location i (1..=n) is the site of
/// switch i.
#[derive(Debug, Clone)]
pub struct TravelMatrix {
    num_locations: usize,
    data: Vec<f64>,
}

impl TravelMatrix {
    pub fn zero(num_locations: usize) -> Self {
        Self {
            num_locations,
            data: vec![0.0; num_locations * num_locations],
        }
    }

    pub fn from_costs(num_locations: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != num_locations * num_locations {
            bail!(
                "travel matrix requires {}x{} entries, got {}",
                num_locations,
                num_locations,
                data.len()
            );
        }
        if data.iter().any(|value| *value < 0.0 || !value.is_finite()) {
            bail!("travel costs must be finite and non-negative");
        }
        Ok(Self {
            num_locations,
            data,
        })
    }

    pub fn num_locations(&self) -> usize {
        self.num_locations
    }

    #[inline]
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        debug_assert!(from < self.num_locations && to < self.num_locations);
        self.data[from * self.num_locations + to]
    }
}

/// One matrix per physical team (1..=m), since each team starts from a
/// possibly different depot location. The virtual team travels for free.
#[derive(Debug, Clone)]
pub struct TeamTravelMatrices {
    matrices: Vec<TravelMatrix>,
}

impl TeamTravelMatrices {
    pub fn new(matrices: Vec<TravelMatrix>) -> Self {
        Self { matrices }
    }

    pub fn zero(num_teams: usize, num_locations: usize) -> Self {
        Self {
            matrices: (0..num_teams)
                .map(|_| TravelMatrix::zero(num_locations))
                .collect(),
        }
    }

    pub fn num_teams(&self) -> usize {
        self.matrices.len()
    }

    #[inline]
    pub fn cost(&self, team: TeamId, from: usize, to: usize) -> f64 {
        if team == REMOTE_TEAM {
            0.0
        } else {
            self.matrices[team - 1].cost(from, to)
        }
    }
}
