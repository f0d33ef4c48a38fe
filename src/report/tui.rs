use super::grid::{intensity_level, HeatGrid, GREENS};
use super::TITLE;
use crate::model::Report;
use crate::util::{BLOCK_LABELS, DAY_LABELS};
use crossterm::event::{poll, read, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::{Frame, Terminal};
use std::io;

/// Show the heatmap in the terminal until the user presses `q` or `Esc`.
pub fn run(report: &Report, grid: &HeatGrid) -> io::Result<()> {
    enable_raw_mode()?;
    let result = Terminal::new(CrosstermBackend::new(io::stdout())).and_then(|mut terminal| {
        terminal.clear()?;
        let shown = event_loop(&mut terminal, report, grid);
        shown.and(terminal.clear())
    });
    finish(result, disable_raw_mode)
}

/// Always runs `restore`; an earlier error takes precedence over its own.
fn finish(result: io::Result<()>, restore: impl FnOnce() -> io::Result<()>) -> io::Result<()> {
    let restored = restore();
    result.and(restored)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    report: &Report,
    grid: &HeatGrid,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, report, grid))?;

        if poll(std::time::Duration::from_millis(200))? {
            if let Event::Key(key) = read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    return Ok(());
                }
            }
        }
    }
}

fn draw(f: &mut Frame, report: &Report, grid: &HeatGrid) {
    let summary_height = report.summary.top_committers.lines().count() as u16 + 4;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(summary_height),
            Constraint::Length(DAY_LABELS.len() as u16 + 4),
            Constraint::Min(0),
        ])
        .split(f.size());

    draw_summary(f, chunks[0], report);
    draw_grid(f, chunks[1], grid);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" / "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" to quit"),
    ]))
    .alignment(Alignment::Right);
    f.render_widget(footer, chunks[2]);
}

fn draw_summary(f: &mut Frame, area: Rect, report: &Report) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = report
        .summary
        .top_committers
        .lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                Line::from(Span::styled(line.to_string(), bold.fg(Color::Yellow)))
            } else {
                Line::from(Span::styled(line.to_string(), Style::default().fg(Color::Magenta)))
            }
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        report.summary.longest_streak.clone(),
        bold.fg(Color::Green),
    )));

    let title = match &report.repository {
        Some(repo) => format!("Summary: {repo}"),
        None => "Summary".to_string(),
    };
    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(panel, area);
}

fn draw_grid(f: &mut Frame, area: Rect, grid: &HeatGrid) {
    let max = grid.max();

    let rows: Vec<Row> = DAY_LABELS
        .iter()
        .enumerate()
        .map(|(day, label)| {
            let mut cells = vec![Cell::from(label.to_string()).style(Style::default().fg(Color::Yellow))];
            cells.extend((0..BLOCK_LABELS.len()).map(|block| {
                let count = grid.get(day, block);
                Cell::from(Line::from(count.to_string()).alignment(Alignment::Center))
                    .style(cell_style(count, max))
            }));
            Row::new(cells)
        })
        .collect();

    let mut header = vec![header_cell("Day", Color::Yellow)];
    header.extend(BLOCK_LABELS.iter().map(|b| header_cell(b, Color::Cyan)));

    let mut widths = vec![Constraint::Length(6)];
    widths.extend(std::iter::repeat(Constraint::Length(7)).take(BLOCK_LABELS.len()));

    let table = Table::new(rows, widths).header(Row::new(header)).block(
        Block::default()
            .title(format!("{TITLE} (max {max})"))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(table, area);
}

fn header_cell(text: &str, color: Color) -> Cell<'static> {
    Cell::from(text.to_string()).style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}

/// Dark text on a green scale for busy cells, plain white text for empty ones.
pub fn cell_style(count: u32, max: u32) -> Style {
    match intensity_level(count, max) {
        0 => Style::default().fg(Color::White),
        level => Style::default()
            .fg(Color::Black)
            .bg(Color::Indexed(GREENS[level])),
    }
}
