use crate::problem::sosp::SospInstance;
use crate::solution::Candidate;
use crate::utils::Random;

pub mod local_search;
mod reassignment;
mod shift;
mod swap;

pub use reassignment::Reassignment;
pub use shift::Shift;
pub use swap::Swap;

/// Capability set shared by the move generators. Every candidate is built by
/// applying a move to a copy of the incumbent and re-running the schedule
/// evaluator; infeasible candidates are discarded.
pub trait Neighborhood {
    /// Enumerate the full move space and return the strictly best feasible
    /// improving neighbor, or the unchanged incumbent if none improves.
    fn best_improvement(&self, instance: &SospInstance, incumbent: &Candidate) -> Candidate;

    /// Enumerate the move space in uniformly shuffled order and return the
    /// first feasible improving neighbor, or the unchanged incumbent.
    fn first_improvement(
        &self,
        instance: &SospInstance,
        incumbent: &Candidate,
        rng: &mut Random,
    ) -> Candidate;

    /// Return the first candidate, in shuffled order, that is feasible (or
    /// the first candidate regardless of feasibility when `feasible_only` is
    /// false). Diversification move, distinct from the ILS perturbation.
    fn shake(
        &self,
        instance: &SospInstance,
        incumbent: &Candidate,
        feasible_only: bool,
        rng: &mut Random,
    ) -> Candidate;
}

/// Neighborhood list driven by the VND, in its fixed order.
pub fn vnd_neighborhoods() -> Vec<Box<dyn Neighborhood>> {
    vec![Box::new(Shift), Box::new(Reassignment), Box::new(Swap)]
}
