use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;

use crate::problem::sosp::{Action, SospInstance, Switch, Technology};
use crate::problem::travel_matrix::{TeamTravelMatrices, TravelMatrix};
use crate::problem::SwitchId;

/// Loads an instance from the whitespace-separated text format:
///
/// ```text
/// n m s
/// <n switch records:     id duration technology action stage>
/// <n precedence records: id count pred...>
/// <m travel matrices of (n+1) x (n+1) entries, row by row>
/// ```
pub fn load_instance<P: AsRef<Path>>(path: P) -> Result<SospInstance> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("cannot read instance file {}", path.display()))?;
    let name = path
        .file_name()
        .map(|it| it.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_instance(name, &content)
}

fn next_token<'a>(tokens: &mut impl Iterator<Item = &'a str>, what: &str) -> Result<&'a str> {
    tokens
        .next()
        .ok_or_else(|| anyhow!("unexpected end of file, expected {}", what))
}

fn next_parsed<'a, T>(tokens: &mut impl Iterator<Item = &'a str>, what: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let token = next_token(tokens, what)?;
    token
        .parse()
        .with_context(|| format!("invalid {}: {:?}", what, token))
}

pub fn parse_instance(name: String, content: &str) -> Result<SospInstance> {
    let tokens = &mut content.split_whitespace();

    let n: usize = next_parsed(tokens, "number of switches")?;
    let m: usize = next_parsed(tokens, "number of teams")?;
    let s: usize = next_parsed(tokens, "number of stages")?;

    let mut switches = Vec::with_capacity(n);
    for record in 1..=n {
        let id: SwitchId = next_parsed(tokens, "switch id")?;
        let duration: f64 = next_parsed(tokens, "maneuver duration")
            .with_context(|| format!("in switch record {}", record))?;
        let technology = match next_token(tokens, "technology")? {
            "R" => Technology::Remote,
            "M" => Technology::Manual,
            other => bail!("unknown technology {:?} for switch {}", other, record),
        };
        let action = match next_token(tokens, "action")? {
            "O" => Action::Open,
            "C" => Action::Close,
            other => bail!("unknown action {:?} for switch {}", other, record),
        };
        let stage: usize = next_parsed(tokens, "stage")?;

        switches.push(Switch {
            id,
            technology,
            action,
            stage,
            duration,
        });
    }

    let mut predecessors = vec![Vec::new(); n + 1];
    for record in 1..=n {
        let id: SwitchId = next_parsed(tokens, "switch id of precedence record")?;
        if id < 1 || id > n {
            bail!("precedence record for unknown switch {}", id);
        }
        let count: usize = next_parsed(tokens, "number of predecessors")?;
        let mut preds = Vec::with_capacity(count);
        for _ in 0..count {
            preds.push(
                next_parsed(tokens, "predecessor id")
                    .with_context(|| format!("in precedence record {} of {}", record, n))?,
            );
        }
        predecessors[id] = preds;
    }

    let mut matrices = Vec::with_capacity(m);
    for team in 1..=m {
        let entries = (n + 1) * (n + 1);
        let mut costs = Vec::with_capacity(entries);
        for _ in 0..entries {
            costs.push(
                next_parsed::<f64>(tokens, "travel time")
                    .with_context(|| format!("in travel matrix of team {}", team))?,
            );
        }
        matrices.push(TravelMatrix::from_costs(n + 1, costs)?);
    }

    SospInstance::new(
        name,
        m,
        s,
        switches,
        predecessors,
        TeamTravelMatrices::new(matrices),
    )
}

/// Machine-readable run summary written by the CLI on request.
#[derive(Serialize)]
pub struct RunSummary<'a> {
    pub status: &'a str,
    pub makespan: Option<f64>,
    pub runtime_seconds: f64,
    pub diagnostics: &'a crate::solver::Diagnostics,
    pub schedule: &'a crate::solution::Schedule,
}

pub fn write_summary<P: AsRef<Path>>(path: P, summary: &RunSummary) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json)
        .with_context(|| format!("cannot write summary file {}", path.display()))?;
    Ok(())
}
