use super::grid::{intensity_level, HeatGrid, GREENS};
use super::TITLE;
use crate::model::Report;
use crate::util::{BLOCK_LABELS, DAY_LABELS};
use anyhow::Result;
use console::style;

const CELL_WIDTH: usize = 7;
const DAY_WIDTH: usize = 6;

pub fn output_json(report: &Report) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

pub fn output_heatmap(report: &Report, grid: &HeatGrid) -> Result<()> {
    println!("{}", style(&report.summary.top_committers).bold());
    println!();
    println!("{}", style(&report.summary.longest_streak).bold());
    println!();

    println!("{}", style(TITLE).bold());
    println!("{}", "─".repeat(DAY_WIDTH + CELL_WIDTH * BLOCK_LABELS.len()));
    print!("{}", render_grid(grid));

    let max = grid.max();
    println!(
        "\n{} {}",
        style("Commit Count").bold(),
        GREENS[1..]
            .iter()
            .map(|c| style("  ").on_color256(*c).to_string())
            .collect::<String>()
    );
    println!("  0 .. {max}  ({} commits total)", grid.total());

    Ok(())
}

/// The grid as text: a header row of hour blocks, then one row per weekday.
pub fn render_grid(grid: &HeatGrid) -> String {
    let max = grid.max();
    let mut out = format!("{:<DAY_WIDTH$}", "");
    for block in BLOCK_LABELS {
        out.push_str(&format!("{}", style(format!("{block:^CELL_WIDTH$}")).cyan()));
    }
    out.push('\n');

    for (day, label) in DAY_LABELS.iter().enumerate() {
        out.push_str(&format!("{}", style(format!("{label:<DAY_WIDTH$}")).yellow()));
        for block in 0..BLOCK_LABELS.len() {
            let count = grid.get(day, block);
            let text = format!("{count:^CELL_WIDTH$}");
            let cell = match intensity_level(count, max) {
                0 => style(text).white().dim(),
                level => style(text).black().on_color256(GREENS[level]),
            };
            out.push_str(&cell.to_string());
        }
        out.push('\n');
    }
    out
}
