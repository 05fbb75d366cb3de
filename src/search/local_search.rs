use crate::problem::sosp::SospInstance;
use crate::search::Neighborhood;
use crate::solution::Candidate;
use crate::utils::{num, Random};

/// Drive a single neighborhood to a local optimum, replacing the incumbent
/// while its best neighbor strictly improves beyond the tolerance.
pub fn best_improvement(
    instance: &SospInstance,
    entry: &Candidate,
    neighborhood: &dyn Neighborhood,
) -> Candidate {
    let mut incumbent = entry.clone();
    loop {
        let neighbor = neighborhood.best_improvement(instance, &incumbent);
        if num::is_lower(neighbor.makespan, incumbent.makespan) {
            incumbent = neighbor;
        } else {
            return incumbent;
        }
    }
}

pub fn first_improvement(
    instance: &SospInstance,
    entry: &Candidate,
    neighborhood: &dyn Neighborhood,
    rng: &mut Random,
) -> Candidate {
    let mut incumbent = entry.clone();
    loop {
        let neighbor = neighborhood.first_improvement(instance, &incumbent, rng);
        if num::is_lower(neighbor.makespan, incumbent.makespan) {
            incumbent = neighbor;
        } else {
            return incumbent;
        }
    }
}

/// Variable Neighborhood Descent: restart from the first neighborhood on
/// every improvement, advance on failure, stop once the last neighborhood
/// cannot improve the current incumbent.
pub fn best_improvement_vnd(
    instance: &SospInstance,
    entry: &Candidate,
    neighborhoods: &[Box<dyn Neighborhood>],
) -> Candidate {
    let mut incumbent = entry.clone();
    let mut k = 0;
    while k < neighborhoods.len() {
        let neighbor = neighborhoods[k].best_improvement(instance, &incumbent);
        if num::is_lower(neighbor.makespan, incumbent.makespan) {
            incumbent = neighbor;
            k = 0;
        } else {
            k += 1;
        }
    }
    incumbent
}

pub fn first_improvement_vnd(
    instance: &SospInstance,
    entry: &Candidate,
    neighborhoods: &[Box<dyn Neighborhood>],
    rng: &mut Random,
) -> Candidate {
    let mut incumbent = entry.clone();
    let mut k = 0;
    while k < neighborhoods.len() {
        let neighbor = neighborhoods[k].first_improvement(instance, &incumbent, rng);
        if num::is_lower(neighbor.makespan, incumbent.makespan) {
            incumbent = neighbor;
            k = 0;
        } else {
            k += 1;
        }
    }
    incumbent
}
