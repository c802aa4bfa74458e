//! Mean per-split performance per agent.

use std::collections::BTreeMap;

use crate::aggregate::MeanAccumulator;
use crate::domain::{Split, SubmissionResult};
use crate::extract::agent_id_of;
use crate::format::format_fixed;
use crate::reporting::LeaderboardTable;

#[derive(Default)]
struct SplitTotals {
    pass_rate: MeanAccumulator,
    time: MeanAccumulator,
}

/// Mean Pass^1 (as a percentage, one decimal) and mean run time for every
/// agent and split, ordered by agent id then split name.
pub fn performance_by_split(submissions: &[SubmissionResult]) -> LeaderboardTable {
    let mut totals: BTreeMap<(&str, &'static str), SplitTotals> = BTreeMap::new();
    for sub in submissions {
        let Some(agent) = agent_id_of(sub) else {
            continue;
        };
        for split in Split::ALL {
            let entry = totals.entry((agent, split.as_str())).or_default();
            entry.pass_rate.push(sub.split(split).pass_power_1.map(|v| v * 100.0));
            entry.time.push(sub.time_used);
        }
    }

    let rows = totals
        .into_iter()
        .map(|((agent, split), t)| {
            vec![
                agent.to_string(),
                split.to_string(),
                format_fixed(t.pass_rate.mean(), 1),
                format_fixed(t.time.mean(), 1),
            ]
        })
        .collect();

    LeaderboardTable::new(
        "Performance by Split",
        ["Agent ID", "Split", "Avg Pass Rate (%)", "Avg Time (s)"]
            .map(str::to_string)
            .to_vec(),
        rows,
    )
}
