use serde::Serialize;

use crate::problem::sosp::SospInstance;
use crate::solution::Candidate;

pub mod construction;
pub mod ils;

/// Contract shared by the selectable solution methods. Implementations fill
/// the diagnostics when the caller provides them; fields an algorithm does
/// not track stay `None`.
pub trait Algorithm {
    fn solve(&self, instance: &SospInstance, diagnostics: Option<&mut Diagnostics>) -> Candidate;
}

/// Optional per-run output of an algorithm, reported at the end of a run and
/// serialized into the machine-readable summary.
#[derive(Debug, Default, Serialize)]
pub struct Diagnostics {
    #[serde(rename = "Iterations", skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u64>,

    #[serde(rename = "Runtime (s)", skip_serializing_if = "Option::is_none")]
    pub runtime_seconds: Option<f64>,

    #[serde(rename = "Start solution", skip_serializing_if = "Option::is_none")]
    pub start_solution: Option<f64>,

    #[serde(
        rename = "Iteration of last improvement",
        skip_serializing_if = "Option::is_none"
    )]
    pub iteration_last_improvement: Option<u64>,
}

impl Diagnostics {
    /// Key/value rows for the textual summary block, in reporting order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = Vec::new();
        if let Some(iterations) = self.iterations {
            entries.push(("Iterations", iterations.to_string()));
        }
        if let Some(runtime) = self.runtime_seconds {
            entries.push(("Runtime (s)", format!("{:.4}", runtime)));
        }
        if let Some(start) = self.start_solution {
            entries.push(("Start solution", format!("{:.6}", start)));
        }
        if let Some(iteration) = self.iteration_last_improvement {
            entries.push(("Iteration of last improvement", iteration.to_string()));
        }
        entries
    }
}
