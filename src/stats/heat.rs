use crate::error::Result;
use crate::model::HeatCell;
use crate::store::CommitStore;
use crate::util::{hour_block_index, parse_commit_date, BLOCK_LABELS, DAY_LABELS};
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::collections::BTreeMap;

/// Sparse weekday x hour-block commit counts over every stored commit.
pub fn compute_heat(store: &CommitStore) -> Result<Vec<HeatCell>> {
    let mut timestamps = Vec::new();
    for raw in store.commit_dates()? {
        timestamps.push(parse_commit_date(&raw)?);
    }
    Ok(heat_cells(timestamps))
}

/// Cells come out ordered Sun..Sat, then by block; empty cells are omitted.
pub fn heat_cells<I>(timestamps: I) -> Vec<HeatCell>
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let mut counts: BTreeMap<(usize, usize), u32> = BTreeMap::new();
    for ts in timestamps {
        let day = ts.weekday().num_days_from_sunday() as usize;
        let block = hour_block_index(ts.hour());
        *counts.entry((day, block)).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((day, block), count)| HeatCell {
            day: DAY_LABELS[day].to_string(),
            block: BLOCK_LABELS[block].to_string(),
            count,
        })
        .collect()
}
