use crate::error::{GhHeatError, Result};
use crate::model::HeatCell;
use crate::util::{BLOCK_LABELS, DAY_LABELS};

/// 256-colour greens from faint to saturated, indexed by intensity level 1..=4.
pub const GREENS: [u8; 5] = [0, 151, 114, 77, 40];

/// Dense weekday x hour-block matrix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeatGrid {
    counts: [[u32; BLOCK_LABELS.len()]; DAY_LABELS.len()],
}

impl HeatGrid {
    /// Place sparse cells into the fixed grid. A label outside the weekday or
    /// block vocabulary means the aggregator and reporter disagree, so it is
    /// an error rather than a skipped cell.
    pub fn from_cells(cells: &[HeatCell]) -> Result<Self> {
        let mut grid = Self::default();
        for cell in cells {
            let day = day_index(&cell.day)?;
            let block = block_index(&cell.block)?;
            grid.counts[day][block] += cell.count;
        }
        Ok(grid)
    }

    pub fn get(&self, day: usize, block: usize) -> u32 {
        self.counts[day][block]
    }

    pub fn max(&self) -> u32 {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().map(|&c| c as u64).sum()
    }

    pub fn rows(&self) -> Vec<Vec<u32>> {
        self.counts.iter().map(|row| row.to_vec()).collect()
    }
}

pub fn day_index(label: &str) -> Result<usize> {
    DAY_LABELS
        .iter()
        .position(|d| *d == label)
        .ok_or_else(|| GhHeatError::UnknownLabel {
            kind: "weekday",
            label: label.to_string(),
        })
}

pub fn block_index(label: &str) -> Result<usize> {
    BLOCK_LABELS
        .iter()
        .position(|b| *b == label)
        .ok_or_else(|| GhHeatError::UnknownLabel {
            kind: "hour block",
            label: label.to_string(),
        })
}

/// 0 for an empty cell, otherwise 1..=4 scaled against the busiest cell.
pub fn intensity_level(count: u32, max: u32) -> usize {
    if count == 0 || max == 0 {
        return 0;
    }
    let ratio = count as f64 / max as f64;
    ((ratio * 4.0).ceil() as usize).clamp(1, 4)
}
