pub mod grid;
pub mod output;
pub mod tui;

pub use grid::HeatGrid;
pub use output::{output_heatmap, output_json, render_grid};

use crate::error::Result;
use crate::model::{CommitterCount, HeatCell, Report, Streak, Summary, SCHEMA_VERSION};
use crate::stats::{streak_summary, top_committers_summary};
use anyhow::Context;
use chrono::Utc;

pub const TITLE: &str = "Commit Heatmap by Day of Week and Hour Ranges";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
    Interactive,
}

impl OutputFormat {
    pub fn from_flags(json: bool, interactive: bool) -> Self {
        if json {
            OutputFormat::Json
        } else if interactive {
            OutputFormat::Interactive
        } else {
            OutputFormat::Console
        }
    }
}

/// Assemble the report document. Fails if a heat cell carries a label the
/// grid does not know.
pub fn build_report(
    repository: Option<String>,
    top_n: usize,
    top_committers: Vec<CommitterCount>,
    longest_streak: Option<Streak>,
    heatmap: Vec<HeatCell>,
) -> Result<(Report, HeatGrid)> {
    let grid = HeatGrid::from_cells(&heatmap)?;
    let summary = Summary {
        top_committers: top_committers_summary(top_n, &top_committers),
        longest_streak: streak_summary(longest_streak.as_ref()),
    };
    let report = Report {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository,
        top_committers,
        longest_streak,
        summary,
        heatmap,
        grid: grid.rows(),
    };
    Ok((report, grid))
}

pub fn render(report: &Report, grid: &HeatGrid, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => output_json(report),
        OutputFormat::Console => output_heatmap(report, grid),
        OutputFormat::Interactive => tui::run(report, grid).context("Terminal UI failed"),
    }
}
