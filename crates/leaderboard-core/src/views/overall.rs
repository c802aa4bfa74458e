//! Overall performance: each agent's best run by pass rate.

use std::cmp::Ordering;

use crate::domain::SubmissionResult;
use crate::extract::agent_id_of;
use crate::format::{format_fixed, format_time, MISSING};
use crate::reporting::LeaderboardTable;

/// Higher pass rate first, then lower time; missing values sort last.
fn compare_runs(a: &SubmissionResult, b: &SubmissionResult) -> Ordering {
    let by_rate = match (a.pass_rate, b.pass_rate) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_rate.then_with(|| match (a.time_used, b.time_used) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    })
}

/// Best run per agent by pass rate (ties: faster run), with the sum of
/// `max_score` over all of the agent's runs as "Total Tasks". The sum
/// saturates at `u64::MAX`.
///
/// Agents with no pass rate in any run are left out.
pub fn overall_performance(submissions: &[SubmissionResult]) -> LeaderboardTable {
    let mut agents: Vec<(&str, Vec<&SubmissionResult>)> = Vec::new();
    for sub in submissions {
        let Some(agent) = agent_id_of(sub) else {
            continue;
        };
        match agents.iter_mut().find(|(a, _)| *a == agent) {
            Some((_, runs)) => runs.push(sub),
            None => agents.push((agent, vec![sub])),
        }
    }

    let mut best: Vec<(&str, &SubmissionResult, Option<u64>)> = agents
        .into_iter()
        .filter_map(|(agent, runs)| {
            let total_tasks = runs
                .iter()
                .filter_map(|r| r.max_score)
                .fold(None, |acc: Option<u64>, m| Some(acc.unwrap_or(0).saturating_add(m)));
            let top = runs.into_iter().min_by(|a, b| compare_runs(a, b))?;
            top.pass_rate.map(|_| (agent, top, total_tasks))
        })
        .collect();
    best.sort_by(|a, b| compare_runs(a.1, b.1));

    let rows = best
        .into_iter()
        .map(|(agent, run, total_tasks)| {
            vec![
                agent.to_string(),
                format_fixed(run.pass_rate, 1),
                format_time(run.time_used),
                total_tasks.map_or_else(|| MISSING.to_string(), |t| t.to_string()),
            ]
        })
        .collect();

    LeaderboardTable::new(
        "Overall Performance",
        ["Agent ID", "Pass Rate (%)", "Time (s)", "Total Tasks"]
            .map(str::to_string)
            .to_vec(),
        rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(agent: &str, rate: Option<f64>, time: f64, max_score: u64) -> SubmissionResult {
        SubmissionResult {
            agent_id: Some(agent.to_string()),
            pass_rate: rate,
            time_used: Some(time),
            max_score: Some(max_score),
            ..SubmissionResult::default()
        }
    }

    #[test]
    fn picks_highest_rate_then_fastest() {
        let subs = vec![
            run("A", Some(50.0), 10.0, 40),
            run("A", Some(75.0), 30.0, 40),
            run("A", Some(75.0), 20.0, 40),
            run("B", Some(80.0), 99.0, 40),
        ];
        let table = overall_performance(&subs);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["B", "80.0", "99.0", "40"]);
        assert_eq!(table.rows[1], vec!["A", "75.0", "20.0", "120"]);
    }

    #[test]
    fn total_tasks_saturates_instead_of_overflowing() {
        let subs = vec![
            run("A", Some(50.0), 10.0, u64::MAX),
            run("A", Some(40.0), 10.0, 1),
        ];
        let table = overall_performance(&subs);
        assert_eq!(table.cell(0, "Total Tasks"), Some("18446744073709551615"));
    }

    #[test]
    fn agent_without_pass_rate_is_left_out() {
        let subs = vec![run("A", None, 1.0, 1), run("B", Some(10.0), 1.0, 1)];
        let table = overall_performance(&subs);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.cell(0, "Agent ID"), Some("B"));
    }
}
